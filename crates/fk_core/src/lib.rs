//! # fk_core - Free-Kick Trajectory Engine
//!
//! Headless core of the free-kick visualizer: a quadratic trajectory model,
//! flat and depth-projected screen projections, scene composition and a
//! frame-paced animation driver with revocable frame requests.
//!
//! ## Features
//! - Deterministic: progress advances a fixed step per host frame
//! - Host agnostic: frames come through the [`FrameScheduler`] trait
//! - Three presets (`classic`, `minimal`, `broadcast`), loadable from YAML/JSON
//!
//! ```rust
//! use fk_core::{compose_scene, AnimationDriver, Coefficients, FrameQueue, KickConfig};
//!
//! let config = KickConfig::classic();
//! let mut last = None;
//! let mut driver = AnimationDriver::with_step(config.step, FrameQueue::default(), |f: &fk_core::Frame| {
//!     last = Some(compose_scene(&config, &f.coefficients, f.progress));
//! });
//! driver.set_coefficients(Coefficients::new(1.0, -0.5, 0.1));
//! driver.start();
//! driver.run_until_idle(1_000);
//! assert_eq!(driver.progress(), 1.0);
//! drop(driver);
//! assert_eq!(last.unwrap().progress, 1.0);
//! ```

pub mod config;
pub mod debug_flags;
pub mod driver;
pub mod error;
pub mod projection;
pub mod scene;
pub mod scheduler;
pub mod timestep;
pub mod trajectory;

pub use config::{FigureSpec, KickConfig, Preset};
pub use driver::{AnimationDriver, Frame, PlaybackState, RenderSink};
pub use error::{ConfigError, Result};
pub use projection::{DepthProjection, FlatProjection, Project, Projection, ScreenPoint};
pub use scene::{compose_scene, BallSprite, Figure, Scene};
pub use scheduler::{FrameHandle, FrameQueue, FrameScheduler};
pub use trajectory::{arc_height, lateral, Coefficients, CurvePoint, TrajectoryModel};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
