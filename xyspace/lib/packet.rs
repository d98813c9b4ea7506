//! Gaussian wave packets with an initial momentum kick.

use ndarray as nd;
use serde::{ Deserialize, Serialize };
use tracing::{ instrument, warn };
use crate::{
    error::ParamError,
    field::{ Grid, Wavefunction },
    utils::wf_renormalize,
};

/// A Gaussian envelope multiplied by a plane wave.
///
/// Positions and widths are measured in cells, momenta in radians per cell.
/// ```text
/// ψ(x, y) ∝ exp(-(x - x₀)²/2σx² - (y - y₀)²/2σy²) exp(i (kx (x - x₀) + ky (y - y₀)))
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WavePacket {
    pub center_x: f64,
    pub center_y: f64,
    pub sigma_x: f64,
    pub sigma_y: f64,
    pub kx: f64,
    pub ky: f64,
}

impl WavePacket {
    /// Default packet width, in cells.
    pub const DEF_WIDTH: f64 = 20.0;
    /// Default momentum along *x*.
    pub const DEF_KX: f64 = 1.5;

    /// An isotropic packet of the given `width` sitting on the central cell
    /// of `grid` (rounding down on even axes).
    pub fn centered(grid: Grid, width: f64, kx: f64, ky: f64) -> Self {
        Self {
            center_x: (grid.cols() / 2) as f64,
            center_y: (grid.rows() / 2) as f64,
            sigma_x: width,
            sigma_y: width,
            kx,
            ky,
        }
    }

    /// Check that both widths are positive.
    pub fn validate(&self) -> Result<(), ParamError> {
        ParamError::check_width(self.sigma_x, self.sigma_y)
    }

    /// Unnormalized amplitude at cell `(x, y)`.
    pub fn amplitude(&self, x: f64, y: f64) -> (f64, f64) {
        let dx = x - self.center_x;
        let dy = y - self.center_y;
        let env = (
            -(dx.powi(2) / (2.0 * self.sigma_x.powi(2))
            + dy.powi(2) / (2.0 * self.sigma_y.powi(2)))
        ).exp();
        let (s, c) = (self.kx * dx + self.ky * dy).sin_cos();
        (env * c, env * s)
    }

    /// Sample the packet over `grid` and normalize so that the sum of
    /// `re² + im²` over all cells is 1.
    ///
    /// If every sample is zero the field is returned as-is. A zero width
    /// yields `NaN`s; see [`Self::validate`].
    #[instrument(skip_all, fields(cols = grid.cols(), rows = grid.rows()))]
    pub fn generate(&self, grid: Grid) -> Wavefunction {
        let mut wf = Wavefunction::zeros(grid);
        nd::Zip::indexed(&mut wf.re).and(&mut wf.im)
            .for_each(|(y, x), re, im| {
                (*re, *im) = self.amplitude(x as f64, y as f64);
            });
        let norm = wf_renormalize(&mut wf.re, &mut wf.im);
        if norm == 0.0 {
            warn!(packet = ?self, "wave packet vanishes on the grid; left unnormalized");
        } else if !norm.is_finite() {
            warn!(packet = ?self, norm, "wave packet has a non-finite norm");
        }
        wf
    }
}
