//! Screen projection
//!
//! Converts curve-space points into canvas pixels.
//!
//! ## Policies
//!
//! **Flat** (top-down field):
//! - x: 0 = left padding edge, 1 = right padding edge
//! - y: 0 = bottom padding edge, 1 = top padding edge (pixel y is inverted)
//!
//! **Depth** (broadcast camera):
//! - x: sideways pixels from the centre line, shrunk by depth
//! - y: height above the ground line, shrunk by depth
//! - z: depth, 0 = at the camera, 1 = at the goal
//!
//! Larger depth always means a smaller scale and a ground line closer to the
//! horizon row.

use serde::{Deserialize, Serialize};

use crate::trajectory::CurvePoint;

/// Fraction of size lost between depth 0 and depth 1
pub const DEPTH_SHRINK: f64 = 0.55;

/// Position in canvas pixels (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Anything that can place a curve-space point on the canvas
pub trait Project {
    fn project(&self, p: CurvePoint) -> ScreenPoint;
}

/// Linear map from the unit square onto a padded canvas
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlatProjection {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl FlatProjection {
    pub fn inner_width(&self) -> f64 {
        self.width - self.padding * 2.0
    }

    pub fn inner_height(&self) -> f64 {
        self.height - self.padding * 2.0
    }
}

impl Project for FlatProjection {
    fn project(&self, p: CurvePoint) -> ScreenPoint {
        ScreenPoint {
            x: self.padding + p.x * self.inner_width(),
            y: self.height - self.padding - p.y * self.inner_height(),
        }
    }
}

/// Perspective-like projection around a horizontal centre line
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepthProjection {
    /// Pixel column of the centre line
    pub center_x: f64,
    /// Pixel row the ground converges to at depth 1
    pub horizon_y: f64,
    /// Pixel row of the ground at depth 0
    pub ground_y: f64,
    /// Pixels per unit of height at depth 0
    pub height_px: f64,
}

impl DepthProjection {
    /// Size multiplier at `depth`: 1 at the camera, 0.45 at the far end
    pub fn scale(depth: f64) -> f64 {
        1.0 - depth.clamp(0.0, 1.0) * DEPTH_SHRINK
    }

    /// Pixel row of the ground at `depth`
    pub fn ground_line(&self, depth: f64) -> f64 {
        let depth = depth.clamp(0.0, 1.0);
        self.ground_y + (self.horizon_y - self.ground_y) * depth
    }
}

impl Project for DepthProjection {
    fn project(&self, p: CurvePoint) -> ScreenPoint {
        let scale = Self::scale(p.z);
        ScreenPoint {
            x: self.center_x + p.x * scale,
            y: self.ground_line(p.z) - p.y * self.height_px * scale,
        }
    }
}

/// Projection policy chosen at construction time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Projection {
    Flat(FlatProjection),
    Depth(DepthProjection),
}

impl Projection {
    pub fn flat(width: f64, height: f64, padding: f64) -> Self {
        Projection::Flat(FlatProjection { width, height, padding })
    }

    pub fn depth(center_x: f64, horizon_y: f64, ground_y: f64, height_px: f64) -> Self {
        Projection::Depth(DepthProjection {
            center_x,
            horizon_y,
            ground_y,
            height_px,
        })
    }

    pub fn is_depth(&self) -> bool {
        matches!(self, Projection::Depth(_))
    }
}

impl Default for Projection {
    fn default() -> Self {
        Projection::flat(960.0, 540.0, 60.0)
    }
}

impl Project for Projection {
    fn project(&self, p: CurvePoint) -> ScreenPoint {
        match self {
            Projection::Flat(flat) => flat.project(p),
            Projection::Depth(depth) => depth.project(p),
        }
    }
}
