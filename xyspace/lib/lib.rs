//! Provides a finite-difference engine for the two-dimensional, time-dependent
//! Schrödinger equation on a uniform grid, with randomly generated fractal
//! potential landscapes and Gaussian wave-packet initial states.
//!
//! Provides implementations for the following numerical routines:
//! - Potentials:
//!     - Midpoint-displacement ("diamond-square") fractal terrain, rescaled to
//!       a chosen height
//! - Initial states:
//!     - Normalized Gaussian wave packets carrying a plane-wave momentum
//! - Time-dependent:
//!     - Staggered (leapfrog) real/imaginary update with a 5-point Laplacian
//!       and fixed boundary cells
//!
//! [`sim::Simulation`] ties these together for an external driver, which is
//! expected to own the frame loop and any rendering.
//!
//! See [`docs`] for theoretical background.

pub mod error;
pub mod field;
pub mod fractal;
pub mod packet;
pub mod leapfrog;
pub mod sim;
pub mod utils;

pub mod docs;

pub type Arr2<S> = ndarray::ArrayBase<S, ndarray::Ix2>;
