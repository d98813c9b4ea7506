//! Miscellaneous tools.
//!
//! Sums here run over every cell with unit cell area; there is no quadrature
//! weighting at the grid edges.

use ndarray as nd;
use crate::Arr2;

/// Total probability `Σ (re² + im²)` of a wavefunction given as separate
/// parts.
pub fn wf_norm_sqr<S, T>(re: &Arr2<S>, im: &Arr2<T>) -> f64
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
{
    nd::Zip::from(re).and(im)
        .fold(0.0, |acc, rek, imk| acc + rek * rek + imk * imk)
}

/// Calculate the norm `sqrt(Σ (re² + im²))` of a wavefunction.
pub fn wf_norm<S, T>(re: &Arr2<S>, im: &Arr2<T>) -> f64
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
{
    wf_norm_sqr(re, im).sqrt()
}

/// Renormalize a wavefunction in place, returning the norm it had before.
///
/// Nothing is changed if the norm is zero.
pub fn wf_renormalize<S, T>(re: &mut Arr2<S>, im: &mut Arr2<T>) -> f64
where
    S: nd::DataMut<Elem = f64>,
    T: nd::DataMut<Elem = f64>,
{
    let norm = wf_norm(re, im);
    if norm > 0.0 {
        nd::Zip::from(re).and(im)
            .for_each(|rek, imk| { *rek /= norm; *imk /= norm; });
    }
    norm
}

/// Probability density `re² + im²` at every cell.
pub fn density<S, T>(re: &Arr2<S>, im: &Arr2<T>) -> nd::Array2<f64>
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
{
    nd::Zip::from(re).and(im)
        .map_collect(|rek, imk| rek * rek + imk * imk)
}

/// Complex phase `atan2(im, re)` at every cell, in `[-π, π]`.
pub fn phase<S, T>(re: &Arr2<S>, im: &Arr2<T>) -> nd::Array2<f64>
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
{
    nd::Zip::from(re).and(im)
        .map_collect(|rek, imk| imk.atan2(*rek))
}

/// Expectation value of position `(⟨x⟩, ⟨y⟩)` in cell units, weighted by the
/// probability density.
///
/// Returns `None` if the wavefunction is zero everywhere.
pub fn wf_mean_position<S, T>(re: &Arr2<S>, im: &Arr2<T>) -> Option<(f64, f64)>
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
{
    let (p, px, py)
        = nd::Zip::indexed(re).and(im)
        .fold((0.0, 0.0, 0.0), |(p, px, py), (y, x), rek, imk| {
            let pk = rek * rek + imk * imk;
            (p + pk, px + pk * x as f64, py + pk * y as f64)
        });
    (p > 0.0).then(|| (px / p, py / p))
}

/// Discrete 5-point Laplacian at the center of a 3×3 window (unit spacing).
#[inline]
pub fn laplacian5<S>(w: &Arr2<S>) -> f64
where S: nd::Data<Elem = f64>
{
    w[[0, 1]] + w[[2, 1]] + w[[1, 0]] + w[[1, 2]] - 4.0 * w[[1, 1]]
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use super::*;

    #[test]
    fn renormalize_to_unit() {
        let mut re = nd::array![[3.0, 0.0], [0.0, 0.0]];
        let mut im = nd::array![[0.0, 0.0], [0.0, 4.0]];
        let old = wf_renormalize(&mut re, &mut im);
        assert_abs_diff_eq!(old, 5.0);
        assert_abs_diff_eq!(wf_norm_sqr(&re, &im), 1.0, epsilon = 1e-15);
        assert_abs_diff_eq!(re[[0, 0]], 0.6);
    }

    #[test]
    fn renormalize_zero_is_noop() {
        let mut re: nd::Array2<f64> = nd::Array2::zeros((3, 3));
        let mut im: nd::Array2<f64> = nd::Array2::zeros((3, 3));
        assert_eq!(wf_renormalize(&mut re, &mut im), 0.0);
        assert!(re.iter().all(|r| *r == 0.0));
    }

    #[test]
    fn laplacian_of_quadratic() {
        // f = x² + y² has ∇²f = 4 exactly on a unit grid
        let w = nd::Array2::from_shape_fn((3, 3), |(y, x)| {
            let (x, y) = (x as f64 + 2.0, y as f64 - 5.0);
            x * x + y * y
        });
        assert_eq!(laplacian5(&w), 4.0);
    }

    #[test]
    fn mean_position() {
        let re = nd::array![[0.0, 0.0, 0.0], [0.0, 0.0, 1.0]];
        let im = nd::array![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]];
        assert_eq!(wf_mean_position(&re, &im), Some((1.0, 1.0)));
        let zero: nd::Array2<f64> = nd::Array2::zeros((2, 3));
        assert_eq!(wf_mean_position(&zero, &zero), None);
    }

    #[test]
    fn phase_and_density() {
        let re = nd::array![[0.0, -1.0]];
        let im = nd::array![[2.0, 0.0]];
        assert_eq!(density(&re, &im), nd::array![[4.0, 1.0]]);
        let ph = phase(&re, &im);
        assert_abs_diff_eq!(ph[[0, 0]], std::f64::consts::FRAC_PI_2);
        assert_abs_diff_eq!(ph[[0, 1]], std::f64::consts::PI);
    }
}
