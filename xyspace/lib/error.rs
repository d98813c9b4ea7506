//! Collection of all error types.
//!
//! All errors derive [`thiserror::Error`], making them composable when allowed
//! and compatible with application code using [`anyhow`][anyhow].
//!
//! [anyhow]: https://crates.io/crates/anyhow

use ndarray as nd;
use thiserror::Error;

/// Returned when a grid is requested with a zero-length axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
#[error("grid dimensions must be positive; got {cols} columns and {rows} rows")]
pub struct DimError {
    pub cols: usize,
    pub rows: usize,
}

impl DimError {
    pub(crate) fn check(cols: usize, rows: usize) -> Result<(), Self> {
        (cols > 0 && rows > 0).then_some(()).ok_or(Self { cols, rows })
    }
}

/// Returned when a caller-supplied field does not match the shape of the
/// grid it is meant for.
///
/// Shapes are reported as `(rows, cols)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
#[error("field shape mismatch; expected {expected:?} but got {got:?}")]
pub struct ShapeError {
    pub expected: (usize, usize),
    pub got: (usize, usize),
}

impl ShapeError {
    pub(crate) fn check<S, A>(
        expected: (usize, usize),
        a: &nd::ArrayBase<S, nd::Ix2>,
    ) -> Result<(), Self>
    where S: nd::Data<Elem = A>
    {
        let got = a.dim();
        (got == expected).then_some(()).ok_or(Self { expected, got })
    }
}

/// Returned by the parameter checks offered to callers.
///
/// The engine itself never applies these; out-of-range inputs handed straight
/// to a step or initializer simply propagate `NaN`s.
#[derive(Copy, Clone, Debug, PartialEq, Error)]
pub enum ParamError {
    /// Returned when a non-positive time step is encountered.
    #[error("time step must be greater than 0; got {0}")]
    BadTimeStep(f64),

    /// Returned when a non-positive reduced Planck constant is encountered.
    #[error("hbar must be greater than 0; got {0}")]
    BadHbar(f64),

    /// Returned when a non-positive particle mass is encountered.
    #[error("mass must be greater than 0; got {0}")]
    BadMass(f64),

    /// Returned when a non-positive (or NaN) packet width is encountered.
    #[error("packet widths must be greater than 0; got ({0}, {1})")]
    BadWidth(f64, f64),

    /// Returned when a negative (or NaN) potential height is encountered.
    #[error("potential height must be non-negative; got {0}")]
    BadHeight(f64),
}

impl ParamError {
    pub(crate) fn check_time_step(dt: f64) -> Result<(), Self> {
        (dt > 0.0).then_some(()).ok_or(Self::BadTimeStep(dt))
    }

    pub(crate) fn check_hbar(hbar: f64) -> Result<(), Self> {
        (hbar > 0.0).then_some(()).ok_or(Self::BadHbar(hbar))
    }

    pub(crate) fn check_mass(mass: f64) -> Result<(), Self> {
        (mass > 0.0).then_some(()).ok_or(Self::BadMass(mass))
    }

    pub(crate) fn check_width(sigma_x: f64, sigma_y: f64) -> Result<(), Self> {
        (sigma_x > 0.0 && sigma_y > 0.0).then_some(())
            .ok_or(Self::BadWidth(sigma_x, sigma_y))
    }

    pub(crate) fn check_height(height: f64) -> Result<(), Self> {
        (height >= 0.0).then_some(()).ok_or(Self::BadHeight(height))
    }
}

/// Returned from [`Simulation`][crate::sim::Simulation] methods.
#[derive(Copy, Clone, Debug, PartialEq, Error)]
pub enum GridError {
    /// [`DimError`]
    #[error("dimension error: {0}")]
    Dim(#[from] DimError),

    /// [`ShapeError`]
    #[error("shape error: {0}")]
    Shape(#[from] ShapeError),

    /// [`ParamError`]
    #[error("parameter error: {0}")]
    Param(#[from] ParamError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dim_check() {
        assert!(DimError::check(1, 1).is_ok());
        assert_eq!(
            DimError::check(0, 7),
            Err(DimError { cols: 0, rows: 7 }),
        );
    }

    #[test]
    fn shape_check() {
        let a: nd::Array2<f64> = nd::Array2::zeros((3, 4));
        assert!(ShapeError::check((3, 4), &a).is_ok());
        assert_eq!(
            ShapeError::check((4, 3), &a),
            Err(ShapeError { expected: (4, 3), got: (3, 4) }),
        );
    }

    #[test]
    fn param_checks_reject_nan() {
        assert!(ParamError::check_time_step(f64::NAN).is_err());
        assert!(ParamError::check_width(1.0, f64::NAN).is_err());
        assert!(ParamError::check_width(0.5, 2.0).is_ok());
        assert_eq!(
            ParamError::check_width(0.0, 1.0),
            Err(ParamError::BadWidth(0.0, 1.0)),
        );
        assert!(ParamError::check_height(-1.0).is_err());
    }
}
