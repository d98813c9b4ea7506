use std::path::{ Path, PathBuf };
use anyhow::Context;
use serde::{ Deserialize, Serialize };
use xyspace::{
    field::Grid,
    fractal::FractalParams,
    leapfrog::Leapfrog,
    packet::WavePacket,
};

/// Grid size, either given directly or derived from a drawing surface.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Columns; overrides `width` if given together with `rows`
    pub cols: Option<usize>,
    /// Rows; overrides `height` if given together with `cols`
    pub rows: Option<usize>,
    /// Canvas width in pixels
    pub width: usize,
    /// Canvas height in pixels
    pub height: usize,
    /// Pixels per cell along each axis
    pub resolution: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { cols: None, rows: None, width: 1280, height: 720, resolution: 4 }
    }
}

impl GridConfig {
    pub fn to_grid(&self) -> anyhow::Result<Grid> {
        let grid = match (self.cols, self.rows) {
            (Some(cols), Some(rows)) => Grid::new(cols, rows)?,
            _ => Grid::from_canvas(self.width, self.height, self.resolution)?,
        };
        Ok(grid)
    }
}

/// Initial wave packet. Without an explicit center the packet starts on the
/// middle cell of the grid.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PacketConfig {
    pub width: f64,
    pub kx: f64,
    pub ky: f64,
    pub center: Option<[f64; 2]>,
}

impl Default for PacketConfig {
    fn default() -> Self {
        Self {
            width: WavePacket::DEF_WIDTH,
            kx: WavePacket::DEF_KX,
            ky: 0.0,
            center: None,
        }
    }
}

impl PacketConfig {
    pub fn to_packet(&self, grid: Grid) -> WavePacket {
        let mut packet = WavePacket::centered(grid, self.width, self.kx, self.ky);
        if let Some([cx, cy]) = self.center {
            packet.center_x = cx;
            packet.center_y = cy;
        }
        packet
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Number of frames to run
    pub frames: usize,
    /// Leapfrog steps per frame
    pub steps_per_frame: usize,
    /// Keep a snapshot every this many frames
    pub save_every: usize,
    /// Seed for the potential; drawn from the OS if missing
    pub seed: Option<u64>,
    /// Output archive
    pub output: PathBuf,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            frames: 600,
            steps_per_frame: 3,
            save_every: 20,
            seed: None,
            output: PathBuf::from("output").join("fractal_packet.npz"),
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub grid: GridConfig,
    pub potential: FractalParams,
    pub packet: PacketConfig,
    pub physics: Leapfrog,
    pub run: RunConfig,
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("couldn't read config {}", path.display()))?;
        let config: Self = toml::from_str(&text)
            .with_context(|| format!("couldn't parse config {}", path.display()))?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        self.grid.to_grid().context("invalid [grid]")?;
        self.potential.validate().context("invalid [potential]")?;
        self.physics.validate().context("invalid [physics]")?;
        let packet = WavePacket::centered(
            self.grid.to_grid()?, self.packet.width, self.packet.kx, self.packet.ky);
        packet.validate().context("invalid [packet]")?;
        anyhow::ensure!(self.run.save_every > 0, "run.save_every must be greater than 0");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.physics, Leapfrog::default());
        assert_eq!(config.potential, FractalParams::default());
        let grid = config.grid.to_grid().unwrap();
        assert_eq!((grid.cols(), grid.rows()), (320, 180));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn explicit_grid_and_center() {
        let config: Config = toml::from_str(r#"
            [grid]
            cols = 50
            rows = 30

            [packet]
            width = 4.0
            center = [10.0, 12.5]

            [physics]
            dt = 0.01
        "#).unwrap();
        let grid = config.grid.to_grid().unwrap();
        assert_eq!(grid.shape(), (30, 50));
        let packet = config.packet.to_packet(grid);
        assert_eq!((packet.center_x, packet.center_y), (10.0, 12.5));
        assert_eq!(packet.kx, WavePacket::DEF_KX);
        assert_eq!(config.physics.mass, 20.0);
    }

    #[test]
    fn rejects_bad_values() {
        let config: Config = toml::from_str("[physics]\ndt = -1.0").unwrap();
        assert!(config.validate().is_err());
        let config: Config = toml::from_str("[packet]\nwidth = -2.0").unwrap();
        assert!(config.validate().is_err());
        let config: Config = toml::from_str("[packet]\nwidth = 0.0").unwrap();
        assert!(config.validate().is_err());
        let config: Config = toml::from_str("[grid]\nresolution = 5000").unwrap();
        assert!(config.validate().is_err());
    }
}
