//! Fractal potential landscapes via midpoint displacement (the
//! "diamond-square" algorithm).
//!
//! ```
//! use rand::{ rngs::StdRng, SeedableRng };
//! use xyspace::{ field::Grid, fractal::FractalParams };
//!
//! let grid = Grid::new(40, 25).unwrap();
//! let params = FractalParams { height: 5.0, complexity: 5.0 };
//! let mut rng = StdRng::seed_from_u64(10);
//! let v = params.generate(grid, &mut rng);
//! assert_eq!(v.dim(), (25, 40));
//! assert!(v.iter().all(|vk| (0.0..=5.0).contains(vk)));
//! ```

use ndarray as nd;
use rand::Rng;
use serde::{ Deserialize, Serialize };
use tracing::{ debug, instrument };
use crate::{
    error::ParamError,
    field::Grid,
};

/// Parameters controlling the shape and scale of a fractal potential.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FractalParams {
    /// Potential energy assigned to the highest cell; the lowest cell always
    /// sits at 0.
    pub height: f64,
    /// Complexity of the landscape. Larger values damp the perturbations of
    /// finer subdivisions faster, giving smoother terrain.
    pub complexity: f64,
}

impl Default for FractalParams {
    fn default() -> Self { Self { height: 5.0, complexity: 5.0 } }
}

impl FractalParams {
    /// Factor by which the perturbation magnitude is divided at each
    /// subdivision.
    pub fn roughness(&self) -> f64 { 2.0 + self.complexity / 4.0 }

    /// Check that the potential height is non-negative.
    pub fn validate(&self) -> Result<(), ParamError> {
        ParamError::check_height(self.height)
    }

    /// Generate a fresh potential on `grid`, drawing all randomness from `rng`.
    ///
    /// A square landscape is computed on the smallest power-of-two edge
    /// covering the grid, then the top-left `cols × rows` corner is cut out
    /// and rescaled linearly onto `[0, height]`. If the cut-out region is flat,
    /// every cell is set to 0.
    #[instrument(skip_all, fields(cols = grid.cols(), rows = grid.rows()))]
    pub fn generate<R>(&self, grid: Grid, rng: &mut R) -> nd::Array2<f64>
    where R: Rng + ?Sized
    {
        let size = working_size(grid);
        let raw = diamond_square(size, self.roughness(), rng);
        let region = raw.slice(nd::s![..grid.rows(), ..grid.cols()]);
        let (min, max) = bounds(&region);
        debug!(size, min, max, "generated fractal landscape");
        rescale(&region, min, max, self.height)
    }
}

/// Edge length of the square working grid needed to cover `grid`.
pub fn working_size(grid: Grid) -> usize {
    grid.cols().max(grid.rows()).next_power_of_two()
}

// uniform on [-magnitude/2, magnitude/2)
fn perturbation<R>(rng: &mut R, magnitude: f64) -> f64
where R: Rng + ?Sized
{
    (rng.gen::<f64>() - 0.5) * magnitude
}

/// Compute a raw `(size + 1) × (size + 1)` midpoint-displacement landscape.
///
/// `size` must be a power of two. Corners are seeded uniformly on `[0, 1)`;
/// each subdivision perturbs new midpoints by a uniform amount whose range
/// starts at 1 and shrinks by `roughness` per level.
///
/// Edge midpoints are read with wraparound modulo `size`, and are only written
/// while they still hold exactly 0. A midpoint whose computed value happens to
/// be exactly 0 is therefore treated as unset by later passes.
pub fn diamond_square<R>(size: usize, roughness: f64, rng: &mut R)
    -> nd::Array2<f64>
where R: Rng + ?Sized
{
    let mut w: nd::Array2<f64> = nd::Array2::zeros((size + 1, size + 1));
    w[[0, 0]] = rng.gen();
    w[[0, size]] = rng.gen();
    w[[size, 0]] = rng.gen();
    w[[size, size]] = rng.gen();

    let mut step = size;
    let mut magnitude: f64 = 1.0;
    while step > 1 {
        let half = step / 2;

        // diamond: centers of each coarse cell from its four corners
        for y in (half..size).step_by(step) {
            for x in (half..size).step_by(step) {
                let avg = (
                    w[[y - half, x - half]]
                    + w[[y - half, x + half]]
                    + w[[y + half, x - half]]
                    + w[[y + half, x + half]]
                ) / 4.0;
                w[[y, x]] = avg + perturbation(rng, magnitude);
            }
        }

        // square: edge midpoints from their four orthogonal neighbors
        for y in (0..=size).step_by(half) {
            for x in ((y + half) % step..=size).step_by(step) {
                if w[[y, x]] != 0.0 { continue; }
                let avg = (
                    w[[y, (x + size - half) % size]]
                    + w[[y, (x + half) % size]]
                    + w[[(y + size - half) % size, x]]
                    + w[[(y + half) % size, x]]
                ) / 4.0;
                w[[y, x]] = avg + perturbation(rng, magnitude);
            }
        }

        step /= 2;
        magnitude /= roughness;
    }
    w
}

fn bounds<S>(a: &nd::ArrayBase<S, nd::Ix2>) -> (f64, f64)
where S: nd::Data<Elem = f64>
{
    a.iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), ak| {
            (lo.min(*ak), hi.max(*ak))
        })
}

fn rescale<S>(a: &nd::ArrayBase<S, nd::Ix2>, min: f64, max: f64, height: f64)
    -> nd::Array2<f64>
where S: nd::Data<Elem = f64>
{
    if max > min {
        let span = max - min;
        a.mapv(|ak| (ak - min) / span * height)
    } else {
        nd::Array2::zeros(a.raw_dim())
    }
}
