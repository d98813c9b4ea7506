use std::{ fs::File, path::PathBuf };
use anyhow::Context;
use clap::Parser;
use ndarray as nd;
use ndarray_npy::NpzWriter;
use rand::{ rngs::StdRng, SeedableRng };
use tracing::{ info, warn };
use tracing_subscriber::EnvFilter;
use xyspace::sim::Simulation;

mod config;
use config::Config;

// evolve a Gaussian wave packet through a random fractal landscape, saving
// density and phase snapshots

#[derive(Debug, Parser)]
#[command(about = "Wave packet evolution in a fractal potential")]
struct Cli {
    /// TOML configuration file; built-in defaults are used if omitted
    config: Option<PathBuf>,

    /// Override the potential seed
    #[arg(long)]
    seed: Option<u64>,

    /// Override the number of frames
    #[arg(long)]
    frames: Option<usize>,

    /// Override the output archive
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    let cli = Cli::parse();
    let mut config = match cli.config.as_deref() {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(seed) = cli.seed { config.run.seed = Some(seed); }
    if let Some(frames) = cli.frames { config.run.frames = frames; }
    if let Some(output) = cli.output { config.run.output = output; }
    config.validate()?;

    let grid = config.grid.to_grid()?;
    let mut sim = Simulation::new(grid.cols(), grid.rows(), config.physics)?;
    let mut rng = match config.run.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    sim.regenerate_potential(&config.potential, &mut rng);
    sim.reset_wave(&config.packet.to_packet(grid));
    info!(
        cols = grid.cols(),
        rows = grid.rows(),
        probability = sim.total_probability(),
        "initialized"
    );

    let dt_max = config.physics.max_stable_dt(sim.potential_max());
    if config.physics.dt > dt_max {
        warn!(dt = config.physics.dt, dt_max, "time step is likely unstable");
    }

    let run = &config.run;
    let nsnap = run.frames / run.save_every + 1;
    let (rows, cols) = grid.shape();
    let mut t: nd::Array1<f64> = nd::Array1::zeros(nsnap);
    let mut prob: nd::Array1<f64> = nd::Array1::zeros(nsnap);
    let mut density: nd::Array3<f64> = nd::Array3::zeros((nsnap, rows, cols));
    let mut phase: nd::Array3<f64> = nd::Array3::zeros((nsnap, rows, cols));

    let mut record = |k: usize, sim: &Simulation| {
        let frame = sim.frame();
        t[k] = sim.time();
        prob[k] = sim.total_probability();
        density.slice_mut(nd::s![k, .., ..]).assign(&frame.density());
        phase.slice_mut(nd::s![k, .., ..]).assign(&frame.phase());
    };
    record(0, &sim);
    for n in 1..=run.frames {
        sim.run_frame(run.steps_per_frame);
        if n % run.save_every == 0 {
            record(n / run.save_every, &sim);
            info!(
                frame = n,
                time = sim.time(),
                probability = sim.total_probability(),
                "saved snapshot"
            );
        }
    }

    if let Some(dir) = run.output.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("couldn't create {}", dir.display()))?;
    }
    let file = File::create(&run.output)
        .with_context(|| format!("couldn't create {}", run.output.display()))?;
    let mut npz = NpzWriter::new(file);
    npz.add_array("v", &sim.potential())?;
    npz.add_array("t", &t)?;
    npz.add_array("prob", &prob)?;
    npz.add_array("density", &density)?;
    npz.add_array("phase", &phase)?;
    npz.add_array("q", &sim.wavefunction().to_complex())?;
    npz.finish()?;
    info!(output = %run.output.display(), "done");
    Ok(())
}
