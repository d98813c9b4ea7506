//! Staggered (leapfrog) finite-difference integration of the 2D
//! time-dependent Schrödinger equation (TDSE).
//!
//! See [`docs`][crate::docs#time-dependence] for the discretization.

use ndarray as nd;
use serde::{ Deserialize, Serialize };
use tracing::{ instrument, trace };
use crate::{
    Arr2,
    error::ParamError,
    field::Wavefunction,
    utils::laplacian5,
};

/// Time step and physical constants for leapfrog integration.
///
/// Grid spacing is fixed at 1. Nothing here is checked when stepping: a `dt`
/// that is too large for the grid and potential (see [`Self::max_stable_dt`])
/// makes the field grow without bound, and non-positive values produce
/// garbage or `NaN`s. Use [`Self::validate`] to catch the latter up front.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Leapfrog {
    /// Time step
    pub dt: f64,
    /// Reduced Planck constant
    pub hbar: f64,
    /// Particle mass
    pub mass: f64,
}

impl Default for Leapfrog {
    fn default() -> Self { Self { dt: 0.005, hbar: 1.0, mass: 20.0 } }
}

impl Leapfrog {
    /// Check that the time step and both constants are positive.
    pub fn validate(&self) -> Result<(), ParamError> {
        ParamError::check_time_step(self.dt)?;
        ParamError::check_hbar(self.hbar)?;
        ParamError::check_mass(self.mass)?;
        Ok(())
    }

    /// Coefficient `ħ/2m` on the Laplacian.
    pub fn kinetic_coeff(&self) -> f64 { self.hbar / (2.0 * self.mass) }

    /// Coefficient `1/ħ` on the potential.
    pub fn potential_coeff(&self) -> f64 { self.hbar.recip() }

    /// Largest time step for which the scheme stays bounded with potential
    /// energies up to `v_max`.
    ///
    /// The highest-energy mode on a unit grid has `E = 4ħ²/m + V`, and the
    /// staggered update is stable for `E dt / ħ ≤ 2`. This is advisory only.
    pub fn max_stable_dt(&self, v_max: f64) -> f64 {
        2.0 * self.hbar / (4.0 * self.hbar.powi(2) / self.mass + v_max.max(0.0))
    }

    /// Advance `wf` by a single time step *in place*.
    ///
    /// The imaginary part is updated first from the current real part, then
    /// the real part from the freshly updated imaginary part. The outermost
    /// ring of cells is never written and acts as a fixed boundary. Grids
    /// without interior cells are left untouched.
    ///
    /// *Panics if `potential` and `wf` have different shapes*.
    pub fn step<S>(&self, wf: &mut Wavefunction, potential: &Arr2<S>)
    where S: nd::Data<Elem = f64>
    {
        assert_eq!(
            potential.dim(), wf.dim(),
            "potential and wavefunction must share a grid",
        );
        let (rows, cols) = wf.dim();
        if rows < 3 || cols < 3 { return; }

        let dt = self.dt;
        let c1 = self.kinetic_coeff();
        let c2 = self.potential_coeff();
        let v = potential.slice(nd::s![1..rows - 1, 1..cols - 1]);
        let Wavefunction { re, im } = wf;

        nd::Zip::from(im.slice_mut(nd::s![1..rows - 1, 1..cols - 1]))
            .and(re.windows((3, 3)))
            .and(&v)
            .for_each(|imk, w, vk| {
                *imk += dt * (c1 * laplacian5(&w) - c2 * vk * w[[1, 1]]);
            });

        nd::Zip::from(re.slice_mut(nd::s![1..rows - 1, 1..cols - 1]))
            .and(im.windows((3, 3)))
            .and(&v)
            .for_each(|rek, w, vk| {
                *rek -= dt * (c1 * laplacian5(&w) - c2 * vk * w[[1, 1]]);
            });
    }

    /// Take `steps` consecutive steps.
    ///
    /// *Panics if `potential` and `wf` have different shapes*.
    #[instrument(skip_all, fields(steps = steps))]
    pub fn run<S>(&self, wf: &mut Wavefunction, potential: &Arr2<S>, steps: usize)
    where S: nd::Data<Elem = f64>
    {
        for _ in 0..steps {
            self.step(wf, potential);
        }
        trace!(steps, dt = self.dt, "advanced wavefunction");
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use crate::field::Grid;
    use super::*;

    #[test]
    fn single_interior_cell() {
        let grid = Grid::new(3, 3).unwrap();
        let mut re = grid.zeros();
        re[[1, 1]] = 1.0;
        let mut wf = Wavefunction::from_parts(re, grid.zeros()).unwrap();
        let lf = Leapfrog { dt: 0.1, hbar: 1.0, mass: 0.5 };
        lf.step(&mut wf, &grid.zeros());
        // c1 = 1: im = -4 dt, then re = 1 - dt * (-4 im) = 1 - 16 dt²
        assert_relative_eq!(wf.im()[[1, 1]], -0.4, epsilon = 1e-15);
        assert_relative_eq!(wf.re()[[1, 1]], 1.0 - 16.0 * 0.01, epsilon = 1e-15);
    }

    #[test]
    fn potential_rotates_phase() {
        let grid = Grid::new(3, 3).unwrap();
        let mut re = grid.zeros();
        re[[1, 1]] = 1.0;
        let mut wf = Wavefunction::from_parts(re, grid.zeros()).unwrap();
        let mut v = grid.zeros();
        v[[1, 1]] = 10.0;
        let lf = Leapfrog { dt: 0.01, hbar: 2.0, mass: 1e12 };
        lf.step(&mut wf, &v);
        // kinetic term is negligible; e^{-iVt/ħ} to first order
        assert_relative_eq!(wf.im()[[1, 1]], -0.05, epsilon = 1e-9);
    }

    #[test]
    fn thin_grids_are_untouched() {
        for (cols, rows) in [(2, 10), (10, 2), (1, 1)] {
            let grid = Grid::new(cols, rows).unwrap();
            let re = grid.zeros() + 1.0;
            let mut wf = Wavefunction::from_parts(re, grid.zeros()).unwrap();
            let before = wf.clone();
            Leapfrog::default().run(&mut wf, &grid.zeros(), 5);
            assert_eq!(wf, before);
        }
    }

    #[test]
    #[should_panic]
    fn shape_mismatch_panics() {
        let grid = Grid::new(4, 4).unwrap();
        let mut wf = Wavefunction::zeros(grid);
        let v: nd::Array2<f64> = nd::Array2::zeros((4, 5));
        Leapfrog::default().step(&mut wf, &v);
    }

    #[test]
    fn stability_bound() {
        let lf = Leapfrog::default();
        assert_relative_eq!(lf.max_stable_dt(5.0), 2.0 / 5.2, epsilon = 1e-15);
        assert!(lf.dt < lf.max_stable_dt(5.0));
        assert!(Leapfrog { dt: 0.0, ..lf }.validate().is_err());
    }
}
