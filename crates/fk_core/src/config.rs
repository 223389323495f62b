//! # Kick Configuration
//!
//! All tuning constants for one rendition of the free kick live here.
//!
//! ## Presets
//! - `classic`: flat top-down field, the reference look
//! - `minimal`: flat field on a smaller canvas with a tighter frame
//! - `broadcast`: depth-projected camera with a lifted ball arc
//!
//! The presets disagree on some constants and none of them is canonical;
//! each is kept as its own starting point.
//!
//! ## Usage
//! ```rust
//! use fk_core::config::{KickConfig, Preset};
//!
//! let classic = KickConfig::default();
//! let broadcast = KickConfig::preset(Preset::Broadcast);
//! assert!(broadcast.validate().is_ok());
//! # let _ = classic;
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::projection::Projection;
use crate::timestep::{is_valid_step, DEFAULT_STEP};
use crate::trajectory::TrajectoryModel;

/// Segments used to draw the dashed trajectory path
pub const DEFAULT_PATH_SAMPLES: usize = 120;

/// A static figure standing on the field (wall or keeper).
///
/// `position` is the fraction along the kick (flat x, or depth),
/// `height` the figure's height in curve units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FigureSpec {
    pub position: f64,
    pub height: f64,
}

impl FigureSpec {
    pub const WALL: FigureSpec = FigureSpec { position: 0.55, height: 0.32 };
    pub const KEEPER: FigureSpec = FigureSpec { position: 0.88, height: 0.22 };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    Classic,
    Minimal,
    Broadcast,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::Classic, Preset::Minimal, Preset::Broadcast];

    pub fn name(&self) -> &'static str {
        match self {
            Preset::Classic => "classic",
            Preset::Minimal => "minimal",
            Preset::Broadcast => "broadcast",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Preset::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownPreset(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KickConfig {
    /// Display name
    pub name: String,
    /// Progress gained per tick
    pub step: f64,
    pub trajectory: TrajectoryModel,
    pub projection: Projection,
    /// Segments in the drawn path polyline
    pub path_samples: usize,
    pub wall: FigureSpec,
    pub keeper: FigureSpec,
}

impl Default for KickConfig {
    fn default() -> Self {
        Self::classic()
    }
}

impl KickConfig {
    /// Flat top-down field (reference look)
    pub fn classic() -> Self {
        Self {
            name: Preset::Classic.name().to_string(),
            step: DEFAULT_STEP,
            trajectory: TrajectoryModel::flat(),
            projection: Projection::flat(960.0, 540.0, 60.0),
            path_samples: DEFAULT_PATH_SAMPLES,
            wall: FigureSpec::WALL,
            keeper: FigureSpec::KEEPER,
        }
    }

    /// Flat field, smaller canvas, coarser path
    pub fn minimal() -> Self {
        let mut cfg = Self::classic();
        cfg.name = Preset::Minimal.name().to_string();
        cfg.projection = Projection::flat(640.0, 360.0, 40.0);
        cfg.path_samples = 60;
        cfg
    }

    /// Depth-projected camera behind the kicker
    pub fn broadcast() -> Self {
        let mut cfg = Self::classic();
        cfg.name = Preset::Broadcast.name().to_string();
        cfg.trajectory = TrajectoryModel::lifted();
        cfg.projection = Projection::depth(480.0, 150.0, 500.0, 260.0);
        cfg
    }

    pub fn preset(preset: Preset) -> Self {
        match preset {
            Preset::Classic => Self::classic(),
            Preset::Minimal => Self::minimal(),
            Preset::Broadcast => Self::broadcast(),
        }
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let cfg: Self = serde_yaml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load from a `.yaml`, `.yml` or `.json` file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        let text = match ext.as_deref() {
            Some("yaml" | "yml" | "json") => std::fs::read_to_string(path)?,
            _ => {
                return Err(ConfigError::UnsupportedFormat {
                    path: path.display().to_string(),
                })
            }
        };

        let cfg = if ext.as_deref() == Some("json") {
            Self::from_json_str(&text)?
        } else {
            Self::from_yaml_str(&text)?
        };

        tracing::info!(config = %cfg.name, path = %path.display(), "loaded kick config");
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if !is_valid_step(self.step) {
            return Err(ConfigError::invalid("step", format!("{} not in (0, 1]", self.step)));
        }
        if self.path_samples == 0 {
            return Err(ConfigError::invalid("path_samples", "must be at least 1"));
        }

        match self.trajectory {
            TrajectoryModel::Flat { bias } => {
                ensure_finite("trajectory.bias", bias)?;
            }
            TrajectoryModel::Lifted { lateral_scale, peak } => {
                ensure_non_negative("trajectory.lateral_scale", lateral_scale)?;
                ensure_non_negative("trajectory.peak", peak)?;
            }
        }

        match self.projection {
            Projection::Flat(flat) => {
                ensure_finite("projection.width", flat.width)?;
                ensure_finite("projection.height", flat.height)?;
                ensure_finite("projection.padding", flat.padding)?;
                if flat.padding < 0.0 {
                    return Err(ConfigError::invalid("projection.padding", "negative"));
                }
                if flat.width <= flat.padding * 2.0 {
                    return Err(ConfigError::invalid(
                        "projection.width",
                        format!("{} leaves no room inside padding {}", flat.width, flat.padding),
                    ));
                }
                if flat.height <= flat.padding * 2.0 {
                    return Err(ConfigError::invalid(
                        "projection.height",
                        format!("{} leaves no room inside padding {}", flat.height, flat.padding),
                    ));
                }
            }
            Projection::Depth(depth) => {
                ensure_finite("projection.center_x", depth.center_x)?;
                ensure_finite("projection.horizon_y", depth.horizon_y)?;
                ensure_finite("projection.ground_y", depth.ground_y)?;
                ensure_non_negative("projection.height_px", depth.height_px)?;
                if depth.horizon_y >= depth.ground_y {
                    return Err(ConfigError::invalid(
                        "projection.horizon_y",
                        format!(
                            "horizon row {} must be above ground row {}",
                            depth.horizon_y, depth.ground_y
                        ),
                    ));
                }
            }
        }

        for (field, fig) in [("wall", self.wall), ("keeper", self.keeper)] {
            if !(0.0..=1.0).contains(&fig.position) {
                return Err(ConfigError::invalid(
                    field,
                    format!("position {} not in [0, 1]", fig.position),
                ));
            }
            ensure_non_negative(field, fig.height)?;
        }

        Ok(())
    }
}

fn ensure_finite(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("{value} is not finite")))
    }
}

fn ensure_non_negative(field: &'static str, value: f64) -> Result<()> {
    ensure_finite(field, value)?;
    if value < 0.0 {
        return Err(ConfigError::invalid(field, format!("{value} is negative")));
    }
    Ok(())
}

// ========== Tests ==========
