//! Grid dimensions and the dense per-cell buffers living on them.
//!
//! All fields are stored as 2D arrays of shape `(rows, cols)` in standard
//! (row-major) layout, so that the flat index of cell `(x, y)` is
//! `y * cols + x`.

use ndarray as nd;
use num_complex::Complex64 as C64;
use crate::error::{ DimError, ShapeError };

/// Dimensions of a simulation grid.
///
/// A `Grid` is fixed for the lifetime of the fields allocated on it; changing
/// the size of a simulation means reallocating every field.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    cols: usize,
    rows: usize,
}

impl Grid {
    /// Create a new grid, failing if either axis is empty.
    pub fn new(cols: usize, rows: usize) -> Result<Self, DimError> {
        DimError::check(cols, rows)?;
        Ok(Self { cols, rows })
    }

    /// Create a grid covering a drawing surface of `width × height` pixels with
    /// one cell for every `resolution × resolution` block of pixels.
    ///
    /// Partial blocks at the right and bottom edges are dropped.
    pub fn from_canvas(width: usize, height: usize, resolution: usize)
        -> Result<Self, DimError>
    {
        let res = resolution.max(1);
        Self::new(width / res, height / res)
    }

    /// Number of columns (extent along *x*).
    pub fn cols(&self) -> usize { self.cols }

    /// Number of rows (extent along *y*).
    pub fn rows(&self) -> usize { self.rows }

    /// Array shape of fields on this grid, `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) { (self.rows, self.cols) }

    /// Flat row-major index of the cell at `(x, y)`, if it lies on the grid.
    pub fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.cols && y < self.rows).then_some(y * self.cols + x)
    }

    /// Return `true` if `(x, y)` lies on the outermost ring of cells.
    pub fn is_border(&self, x: usize, y: usize) -> bool {
        x == 0 || y == 0 || x + 1 == self.cols || y + 1 == self.rows
    }

    /// Allocate a zeroed real-valued field on this grid.
    pub fn zeros(&self) -> nd::Array2<f64> { nd::Array2::zeros(self.shape()) }
}

/// A complex scalar field stored as two parallel real arrays.
///
/// Keeping the real and imaginary parts apart lets the leapfrog scheme update
/// one component from the other without touching the component being read.
#[derive(Clone, Debug, PartialEq)]
pub struct Wavefunction {
    pub(crate) re: nd::Array2<f64>,
    pub(crate) im: nd::Array2<f64>,
}

impl Wavefunction {
    /// Create an all-zero wavefunction on a grid.
    pub fn zeros(grid: Grid) -> Self {
        Self { re: grid.zeros(), im: grid.zeros() }
    }

    /// Build a wavefunction from separate real and imaginary parts.
    pub fn from_parts(re: nd::Array2<f64>, im: nd::Array2<f64>)
        -> Result<Self, ShapeError>
    {
        ShapeError::check(re.dim(), &im)?;
        Ok(Self {
            re: re.as_standard_layout().into_owned(),
            im: im.as_standard_layout().into_owned(),
        })
    }

    /// Array shape, `(rows, cols)`.
    pub fn dim(&self) -> (usize, usize) { self.re.dim() }

    /// Real part.
    pub fn re(&self) -> nd::ArrayView2<'_, f64> { self.re.view() }

    /// Imaginary part.
    pub fn im(&self) -> nd::ArrayView2<'_, f64> { self.im.view() }

    /// Real part as a flat row-major slice.
    pub fn re_slice(&self) -> &[f64] {
        self.re.as_slice().expect("wavefunction arrays are in standard layout")
    }

    /// Imaginary part as a flat row-major slice.
    pub fn im_slice(&self) -> &[f64] {
        self.im.as_slice().expect("wavefunction arrays are in standard layout")
    }

    /// Value at `(x, y)`, if it lies on the grid.
    pub fn get(&self, x: usize, y: usize) -> Option<C64> {
        let re = self.re.get((y, x))?;
        let im = self.im.get((y, x))?;
        Some(C64::new(*re, *im))
    }

    /// Collect both parts into a single complex-valued array.
    pub fn to_complex(&self) -> nd::Array2<C64> {
        nd::Zip::from(&self.re).and(&self.im)
            .map_collect(|re, im| C64::new(*re, *im))
    }

    /// Split a complex-valued array into a wavefunction.
    pub fn from_complex<S>(q: &nd::ArrayBase<S, nd::Ix2>) -> Self
    where S: nd::Data<Elem = C64>
    {
        let q = q.as_standard_layout();
        Self { re: q.mapv(|qk| qk.re), im: q.mapv(|qk| qk.im) }
    }
}
