//! Free-kick CLI
//!
//! Runs the animation driver against a simulated refresh cadence and prints
//! what a painter would receive, one JSON object per line.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use fk_core::{
    compose_scene, timestep, AnimationDriver, Coefficients, Frame, FrameQueue, KickConfig,
    PlaybackState, Preset, Project, Scene, ScreenPoint,
};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fk")]
#[command(about = "Simulate and inspect free-kick trajectories", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the kick from start to finish and print every rendered frame
    Simulate {
        #[command(flatten)]
        kick: KickArgs,

        /// Host refresh rate used for timing
        #[arg(long, default_value_t = timestep::REFERENCE_REFRESH_HZ)]
        refresh_hz: u32,

        /// Stop after this many host frames
        #[arg(long, default_value_t = 10_000)]
        max_frames: u64,

        /// Print full scenes instead of ball positions
        #[arg(long)]
        scenes: bool,
    },

    /// Print the scene at a single progress value
    Scene {
        #[command(flatten)]
        kick: KickArgs,

        /// Progress along the kick, clamped to [0, 1]
        #[arg(long, default_value_t = 0.0)]
        progress: f64,
    },

    /// Dump the built-in presets
    Presets {
        #[arg(long, value_enum, default_value_t = DumpFormat::Yaml)]
        format: DumpFormat,
    },
}

#[derive(Args)]
struct KickArgs {
    /// Built-in preset
    #[arg(long, default_value = "classic")]
    preset: Preset,

    /// YAML/JSON config file (overrides --preset)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Quadratic coefficient a
    #[arg(short = 'a', long, default_value_t = 0.0, allow_hyphen_values = true)]
    a: f64,

    /// Linear coefficient b
    #[arg(short = 'b', long, default_value_t = 0.0, allow_hyphen_values = true)]
    b: f64,

    /// Constant coefficient c
    #[arg(short = 'c', long, default_value_t = 0.0, allow_hyphen_values = true)]
    c: f64,
}

impl KickArgs {
    fn config(&self) -> Result<KickConfig> {
        match &self.config {
            Some(path) => KickConfig::load(path)
                .with_context(|| format!("failed to load config {}", path.display())),
            None => Ok(KickConfig::preset(self.preset)),
        }
    }

    fn coefficients(&self) -> Coefficients {
        Coefficients::new(self.a, self.b, self.c)
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum DumpFormat {
    Yaml,
    Json,
}

/// One line of `simulate` output
#[derive(Serialize)]
struct BallLine {
    frame: usize,
    progress: f64,
    state: PlaybackState,
    ball: ScreenPoint,
}

#[derive(Serialize)]
struct Summary {
    config: String,
    equation: String,
    frames: u64,
    renders: usize,
    final_progress: f64,
    state: PlaybackState,
    simulated_secs: f64,
    expected_frames: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            kick,
            refresh_hz,
            max_frames,
            scenes,
        } => {
            let config = kick.config()?;
            simulate(&config, kick.coefficients(), refresh_hz, max_frames, scenes)?;
        }

        Commands::Scene { kick, progress } => {
            let config = kick.config()?;
            let scene = compose_scene(&config, &kick.coefficients(), progress);
            println!("{}", serde_json::to_string_pretty(&scene)?);
        }

        Commands::Presets { format } => {
            let presets: Vec<KickConfig> =
                Preset::ALL.into_iter().map(KickConfig::preset).collect();
            match format {
                DumpFormat::Yaml => print!("{}", serde_yaml::to_string(&presets)?),
                DumpFormat::Json => println!("{}", serde_json::to_string_pretty(&presets)?),
            }
        }
    }

    Ok(())
}

/// Drive one full kick and collect every rendered frame
fn run_kick(
    config: &KickConfig,
    coefficients: Coefficients,
    refresh_hz: u32,
    max_frames: u64,
) -> (Vec<Frame>, Summary) {
    let mut rendered: Vec<Frame> = Vec::new();
    let mut driver = AnimationDriver::with_step(
        config.step,
        FrameQueue::new(refresh_hz),
        |frame: &Frame| rendered.push(*frame),
    );

    driver.set_coefficients(coefficients);
    driver.start();
    let frames = driver.run_until_idle(max_frames);

    let final_progress = driver.progress();
    let state = driver.state();
    let simulated_secs = driver.scheduler().elapsed().as_secs_f64();
    let expected_frames = timestep::frames_to_finish(driver.step());
    drop(driver);

    let summary = Summary {
        config: config.name.clone(),
        equation: coefficients.equation(),
        frames,
        renders: rendered.len(),
        final_progress,
        state,
        simulated_secs,
        expected_frames,
    };
    (rendered, summary)
}

fn simulate(
    config: &KickConfig,
    coefficients: Coefficients,
    refresh_hz: u32,
    max_frames: u64,
    full_scenes: bool,
) -> Result<()> {
    let (rendered, summary) = run_kick(config, coefficients, refresh_hz, max_frames);

    for (idx, frame) in rendered.iter().enumerate() {
        let line = if full_scenes {
            serde_json::to_string(&frame_scene(config, frame))?
        } else {
            let model = &config.trajectory;
            let ball = config
                .projection
                .project(model.sample(frame.progress, &frame.coefficients));
            serde_json::to_string(&BallLine {
                frame: idx,
                progress: frame.progress,
                state: frame.state,
                ball,
            })?
        };
        println!("{line}");
    }

    eprintln!("{}", serde_json::to_string(&summary)?);

    if summary.state != PlaybackState::Finished {
        tracing::warn!(frames = summary.frames, "kick did not finish within --max-frames");
    }
    Ok(())
}

fn frame_scene(config: &KickConfig, frame: &Frame) -> Scene {
    compose_scene(config, &frame.coefficients, frame.progress)
}
