//! Owner of a grid, its potential, and the wavefunction evolving on it.
//!
//! [`Simulation`] is the surface meant for drivers: it allocates fields,
//! regenerates them independently of one another, advances time, and hands
//! out read access for rendering.
//!
//! ```
//! use rand::{ rngs::StdRng, SeedableRng };
//! use xyspace::{
//!     fractal::FractalParams,
//!     leapfrog::Leapfrog,
//!     packet::WavePacket,
//!     sim::Simulation,
//! };
//!
//! let mut sim = Simulation::new(64, 48, Leapfrog::default()).unwrap();
//! let mut rng = StdRng::seed_from_u64(1234);
//! sim.regenerate_potential(&FractalParams::default(), &mut rng);
//! sim.reset_wave(&WavePacket::centered(sim.grid(), 6.0, 1.5, 0.0));
//! for _ in 0..10 {
//!     let frame = sim.run_frame(3);
//!     assert_eq!(frame.re.dim(), (48, 64));
//! }
//! assert_eq!(sim.steps(), 30);
//! // the staggered scheme keeps the total probability close to, but not
//! // exactly at, 1
//! assert!((sim.total_probability() - 1.0).abs() < 0.1);
//! ```

use ndarray as nd;
use num_complex::Complex64 as C64;
use rand::Rng;
use tracing::debug;
use crate::{
    error::{ GridError, ShapeError },
    field::{ Grid, Wavefunction },
    fractal::FractalParams,
    leapfrog::Leapfrog,
    packet::WavePacket,
    utils,
};

pub type GridResult<T> = Result<T, GridError>;

/// Borrowed view of the fields after a batch of steps, for rendering.
#[derive(Copy, Clone, Debug)]
pub struct Frame<'a> {
    /// Potential energy per cell
    pub potential: nd::ArrayView2<'a, f64>,
    /// Real part of the wavefunction
    pub re: nd::ArrayView2<'a, f64>,
    /// Imaginary part of the wavefunction
    pub im: nd::ArrayView2<'a, f64>,
}

impl<'a> Frame<'a> {
    /// Probability density `re² + im²` per cell.
    pub fn density(&self) -> nd::Array2<f64> { utils::density(&self.re, &self.im) }

    /// Phase `atan2(im, re)` per cell.
    pub fn phase(&self) -> nd::Array2<f64> { utils::phase(&self.re, &self.im) }
}

/// A potential and a wavefunction on a shared grid.
///
/// Both fields start zeroed. The potential is only ever replaced wholesale
/// (by [`Self::regenerate_potential`] or [`Self::set_potential`]); the
/// wavefunction is replaced by [`Self::reset_wave`] or
/// [`Self::set_wavefunction`] and evolved in place by [`Self::advance`].
/// Neither kind of replacement touches the other field.
#[derive(Clone, Debug)]
pub struct Simulation {
    grid: Grid,
    potential: nd::Array2<f64>,
    wf: Wavefunction,
    leapfrog: Leapfrog,
    steps: u64,
}

impl Simulation {
    /// Allocate zeroed fields on a `cols × rows` grid.
    pub fn new(cols: usize, rows: usize, leapfrog: Leapfrog) -> GridResult<Self> {
        let grid = Grid::new(cols, rows)?;
        debug!(cols, rows, "allocated simulation fields");
        Ok(Self {
            grid,
            potential: grid.zeros(),
            wf: Wavefunction::zeros(grid),
            leapfrog,
            steps: 0,
        })
    }

    /// Reallocate all fields for a `cols × rows` grid, discarding their
    /// contents.
    ///
    /// On error the current grid and fields are kept as they are.
    pub fn configure(&mut self, cols: usize, rows: usize) -> GridResult<()> {
        *self = Self::new(cols, rows, self.leapfrog)?;
        Ok(())
    }

    /// Replace the wavefunction with a normalized wave packet and reset the
    /// step counter. The potential is left alone.
    pub fn reset_wave(&mut self, packet: &WavePacket) {
        self.wf = packet.generate(self.grid);
        self.steps = 0;
    }

    /// Replace the potential with a fresh fractal landscape. The wavefunction
    /// is left alone, so a running simulation continues in the new landscape.
    pub fn regenerate_potential<R>(&mut self, params: &FractalParams, rng: &mut R)
    where R: Rng + ?Sized
    {
        self.potential = params.generate(self.grid, rng);
    }

    /// Replace the potential with a caller-built field of matching shape.
    pub fn set_potential(&mut self, potential: nd::Array2<f64>) -> GridResult<()> {
        ShapeError::check(self.grid.shape(), &potential)?;
        self.potential = potential.as_standard_layout().into_owned();
        Ok(())
    }

    /// Replace the wavefunction with caller-built real and imaginary parts of
    /// matching shape and reset the step counter.
    pub fn set_wavefunction(&mut self, re: nd::Array2<f64>, im: nd::Array2<f64>)
        -> GridResult<()>
    {
        ShapeError::check(self.grid.shape(), &re)?;
        self.wf = Wavefunction::from_parts(re, im)?;
        self.steps = 0;
        Ok(())
    }

    /// Run `steps` leapfrog steps back to back. `advance(0)` does nothing.
    pub fn advance(&mut self, steps: usize) {
        self.leapfrog.run(&mut self.wf, &self.potential, steps);
        self.steps += steps as u64;
    }

    /// Advance by `steps` and return a view of the result.
    pub fn run_frame(&mut self, steps: usize) -> Frame<'_> {
        self.advance(steps);
        self.frame()
    }

    /// View of the current fields.
    pub fn frame(&self) -> Frame<'_> {
        Frame {
            potential: self.potential.view(),
            re: self.wf.re(),
            im: self.wf.im(),
        }
    }

    /// Grid dimensions.
    pub fn grid(&self) -> Grid { self.grid }

    /// Integration parameters used by [`Self::advance`].
    pub fn leapfrog(&self) -> Leapfrog { self.leapfrog }

    /// Change the integration parameters for subsequent steps.
    pub fn set_leapfrog(&mut self, leapfrog: Leapfrog) { self.leapfrog = leapfrog; }

    /// Number of steps taken since the wavefunction was last replaced.
    pub fn steps(&self) -> u64 { self.steps }

    /// Elapsed simulation time, assuming the current time step was used
    /// throughout.
    pub fn time(&self) -> f64 { self.steps as f64 * self.leapfrog.dt }

    /// Potential energy at `(x, y)`.
    pub fn potential_at(&self, x: usize, y: usize) -> Option<f64> {
        self.potential.get((y, x)).copied()
    }

    /// Wavefunction value at `(x, y)`.
    pub fn wavefunction_at(&self, x: usize, y: usize) -> Option<C64> {
        self.wf.get(x, y)
    }

    /// The whole potential field.
    pub fn potential(&self) -> nd::ArrayView2<'_, f64> { self.potential.view() }

    /// The potential as a flat row-major slice.
    pub fn potential_slice(&self) -> &[f64] {
        self.potential.as_slice().expect("potential is in standard layout")
    }

    /// The whole wavefunction.
    pub fn wavefunction(&self) -> &Wavefunction { &self.wf }

    /// Largest potential energy on the grid, floored at 0.
    pub fn potential_max(&self) -> f64 {
        self.potential.iter().copied().fold(0.0, f64::max)
    }

    /// Sum of `re² + im²` over every cell.
    pub fn total_probability(&self) -> f64 {
        utils::wf_norm_sqr(&self.wf.re, &self.wf.im)
    }

    /// Probability density per cell.
    pub fn probability_density(&self) -> nd::Array2<f64> {
        utils::density(&self.wf.re, &self.wf.im)
    }

    /// Phase per cell.
    pub fn phase(&self) -> nd::Array2<f64> {
        utils::phase(&self.wf.re, &self.wf.im)
    }

    /// Density-weighted mean position `(⟨x⟩, ⟨y⟩)`, if the wavefunction is
    /// nonzero.
    pub fn mean_position(&self) -> Option<(f64, f64)> {
        utils::wf_mean_position(&self.wf.re, &self.wf.im)
    }
}

#[cfg(test)]
mod tests {
    use rand::{ rngs::StdRng, SeedableRng };
    use crate::error::DimError;
    use super::*;

    fn seeded(cols: usize, rows: usize) -> Simulation {
        let mut sim = Simulation::new(cols, rows, Leapfrog::default()).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        sim.regenerate_potential(&FractalParams::default(), &mut rng);
        sim.reset_wave(&WavePacket::centered(sim.grid(), 3.0, 1.5, 0.0));
        sim
    }

    #[test]
    fn bad_configure_keeps_state() {
        let mut sim = seeded(12, 9);
        let before = (sim.potential().to_owned(), sim.wavefunction().clone());
        let err = sim.configure(0, 9).unwrap_err();
        assert_eq!(err, GridError::Dim(DimError { cols: 0, rows: 9 }));
        assert_eq!(sim.grid(), Grid::new(12, 9).unwrap());
        assert_eq!(sim.potential(), before.0);
        assert_eq!(sim.wavefunction(), &before.1);
    }

    #[test]
    fn configure_zeroes_fields() {
        let mut sim = seeded(12, 9);
        sim.configure(5, 6).unwrap();
        assert_eq!(sim.grid().shape(), (6, 5));
        assert_eq!(sim.potential_max(), 0.0);
        assert_eq!(sim.total_probability(), 0.0);
        assert_eq!(sim.leapfrog(), Leapfrog::default());
    }

    #[test]
    fn regeneration_is_independent() {
        let mut sim = seeded(16, 16);
        sim.advance(4);
        let wf = sim.wavefunction().clone();
        let mut rng = StdRng::seed_from_u64(99);
        sim.regenerate_potential(
            &FractalParams { height: 2.0, complexity: 1.0 }, &mut rng);
        assert_eq!(sim.wavefunction(), &wf);
        assert_eq!(sim.steps(), 4);

        let v = sim.potential().to_owned();
        sim.reset_wave(&WavePacket::centered(sim.grid(), 2.0, 0.0, 0.0));
        assert_eq!(sim.potential(), v);
        assert_eq!(sim.steps(), 0);
    }

    #[test]
    fn point_accessors() {
        let sim = seeded(10, 4);
        let i = sim.grid().index(7, 3).unwrap();
        assert_eq!(sim.potential_at(7, 3), Some(sim.potential_slice()[i]));
        let q = sim.wavefunction_at(7, 3).unwrap();
        assert_eq!(q.re, sim.wavefunction().re_slice()[i]);
        assert_eq!(q.im, sim.wavefunction().im_slice()[i]);
        assert_eq!(sim.potential_at(10, 0), None);
        assert_eq!(sim.wavefunction_at(0, 4), None);
    }

    #[test]
    fn caller_fields_are_shape_checked() {
        let mut sim = Simulation::new(4, 3, Leapfrog::default()).unwrap();
        assert!(sim.set_potential(nd::Array2::ones((3, 4))).is_ok());
        assert_eq!(sim.potential_max(), 1.0);
        let err = sim.set_potential(nd::Array2::ones((4, 3))).unwrap_err();
        assert!(matches!(err, GridError::Shape(_)));
        let err = sim.set_wavefunction(nd::Array2::ones((3, 3)), nd::Array2::zeros((3, 3)))
            .unwrap_err();
        assert!(matches!(err, GridError::Shape(_)));
        let err = sim.set_wavefunction(nd::Array2::ones((3, 4)), nd::Array2::zeros((4, 3)))
            .unwrap_err();
        assert!(matches!(err, GridError::Shape(_)));
        sim.set_wavefunction(nd::Array2::ones((3, 4)), nd::Array2::zeros((3, 4))).unwrap();
        assert_eq!(sim.total_probability(), 12.0);
        assert_eq!(sim.steps(), 0);
    }

    #[test]
    fn time_tracks_steps() {
        let mut sim = seeded(8, 8);
        sim.advance(3);
        sim.advance(0);
        sim.advance(5);
        assert_eq!(sim.steps(), 8);
        assert!((sim.time() - 8.0 * 0.005).abs() < 1e-15);
    }
}
