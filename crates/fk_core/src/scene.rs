//! Scene composition
//!
//! Turns (config, coefficients, progress) into the geometry of one rendered
//! frame. Painting is left to the host; everything here is plain data and is
//! rebuilt from scratch for every frame.

use serde::Serialize;

use crate::config::{FigureSpec, KickConfig};
use crate::projection::{Project, Projection, ScreenPoint};
use crate::trajectory::{Coefficients, CurvePoint, TrajectoryModel};

/// Radians of spin per unit of progress
pub const BALL_SPIN: f64 = 20.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BallSprite {
    pub center: ScreenPoint,
    /// Where the shadow sits on the ground
    pub shadow: ScreenPoint,
    /// Shadow opacity, fades as the ball rises
    pub shadow_alpha: f64,
    /// Shadow size multiplier, shrinks as the ball rises (floor 0.5)
    pub shadow_scale: f64,
    /// Ball rotation in radians
    pub rotation: f64,
}

/// A standing figure, from its feet to the top of its head
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Figure {
    pub base: ScreenPoint,
    pub top: ScreenPoint,
}

impl Figure {
    pub fn pixel_height(&self) -> f64 {
        (self.base.y - self.top.y).abs()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub progress: f64,
    pub coefficients: Coefficients,
    pub equation: String,
    /// Polyline of the whole kick, `path_samples + 1` points
    pub path: Vec<ScreenPoint>,
    pub ball: BallSprite,
    pub wall: Figure,
    pub keeper: Figure,
}

/// Build the full scene for `progress` (clamped to [0, 1])
pub fn compose_scene(config: &KickConfig, coeffs: &Coefficients, progress: f64) -> Scene {
    let progress = progress.clamp(0.0, 1.0);
    let model = &config.trajectory;
    let proj = &config.projection;

    Scene {
        progress,
        coefficients: *coeffs,
        equation: coeffs.equation(),
        path: trajectory_path(model, proj, coeffs, config.path_samples),
        ball: ball_sprite(model, proj, coeffs, progress),
        wall: figure(proj, config.wall),
        keeper: figure(proj, config.keeper),
    }
}

/// Sample the curve at `samples + 1` evenly spaced points
pub fn trajectory_path(
    model: &TrajectoryModel,
    proj: &Projection,
    coeffs: &Coefficients,
    samples: usize,
) -> Vec<ScreenPoint> {
    let samples = samples.max(1);
    (0..=samples)
        .map(|i| {
            let t = i as f64 / samples as f64;
            proj.project(model.sample(t, coeffs))
        })
        .collect()
}

pub fn ball_sprite(
    model: &TrajectoryModel,
    proj: &Projection,
    coeffs: &Coefficients,
    progress: f64,
) -> BallSprite {
    let height = model.height_above_ground(progress, coeffs);

    BallSprite {
        center: proj.project(model.sample(progress, coeffs)),
        shadow: proj.project(model.ground(progress, coeffs)),
        shadow_alpha: (0.4 - height * 0.1).max(0.0),
        shadow_scale: (1.0 - height * 0.2).max(0.5),
        rotation: progress * BALL_SPIN,
    }
}

fn figure(proj: &Projection, spec: FigureSpec) -> Figure {
    let (base, top) = match proj {
        Projection::Flat(_) => (
            CurvePoint::new(spec.position, 0.0, 0.0),
            CurvePoint::new(spec.position, spec.height, 0.0),
        ),
        Projection::Depth(_) => (
            CurvePoint::new(0.0, 0.0, spec.position),
            CurvePoint::new(0.0, spec.height, spec.position),
        ),
    };
    Figure {
        base: proj.project(base),
        top: proj.project(top),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_classic_ball_follows_curve() {
        let cfg = KickConfig::classic();
        let coeffs = Coefficients::new(1.0, 0.0, 0.0);
        let scene = compose_scene(&cfg, &coeffs, 0.5);

        // x = 60 + 0.5 * 840, y = 540 - 60 - (0.25 + 0.25) * 420
        assert!((scene.ball.center.x - 480.0).abs() < EPS);
        assert!((scene.ball.center.y - 270.0).abs() < EPS);
        assert!((scene.ball.shadow.y - 480.0).abs() < EPS);
        assert!((scene.ball.rotation - 10.0).abs() < EPS);
        assert_eq!(scene.equation, "y = 1.0x² + 0.0x + 0.0");
    }

    #[test]
    fn test_path_has_all_samples() {
        let cfg = KickConfig::classic();
        let scene = compose_scene(&cfg, &Coefficients::default(), 0.0);
        assert_eq!(scene.path.len(), cfg.path_samples + 1);
        assert_eq!(scene.path[0].x, 60.0);
        assert!((scene.path[cfg.path_samples].x - 900.0).abs() < EPS);

        let minimal = KickConfig::minimal();
        let scene = compose_scene(&minimal, &Coefficients::default(), 0.0);
        assert_eq!(scene.path.len(), 61);
    }

    #[test]
    fn test_shadow_fades_with_height() {
        let cfg = KickConfig::classic();
        let low = compose_scene(&cfg, &Coefficients::new(0.0, 0.0, 0.0), 0.3);
        let high = compose_scene(&cfg, &Coefficients::new(0.0, 0.0, 2.0), 0.3);

        assert!(high.ball.shadow_alpha < low.ball.shadow_alpha);
        assert!(high.ball.shadow_scale < low.ball.shadow_scale);

        let very_high = compose_scene(&cfg, &Coefficients::new(0.0, 0.0, 40.0), 0.3);
        assert_eq!(very_high.ball.shadow_alpha, 0.0);
        assert_eq!(very_high.ball.shadow_scale, 0.5);
    }

    #[test]
    fn test_progress_is_clamped() {
        let cfg = KickConfig::classic();
        let coeffs = Coefficients::new(0.3, -0.2, 0.1);
        assert_eq!(compose_scene(&cfg, &coeffs, 1.7), compose_scene(&cfg, &coeffs, 1.0));
        assert_eq!(compose_scene(&cfg, &coeffs, -2.0).progress, 0.0);
    }

    #[test]
    fn test_flat_figures_stand_on_ground() {
        let cfg = KickConfig::classic();
        let scene = compose_scene(&cfg, &Coefficients::default(), 0.0);

        assert_eq!(scene.wall.base.y, 480.0);
        assert_eq!(scene.keeper.base.y, 480.0);
        assert!((scene.wall.base.x - (60.0 + 0.55 * 840.0)).abs() < EPS);
        assert!((scene.wall.pixel_height() - 0.32 * 420.0).abs() < EPS);
        assert!(scene.keeper.pixel_height() < scene.wall.pixel_height());
    }

    #[test]
    fn test_broadcast_ball_recedes() {
        let cfg = KickConfig::broadcast();
        let coeffs = Coefficients::default();

        let start = compose_scene(&cfg, &coeffs, 0.0);
        let mid = compose_scene(&cfg, &coeffs, 0.5);
        let end = compose_scene(&cfg, &coeffs, 1.0);

        // Straight kick stays on the centre line
        assert_eq!(start.ball.center.x, 480.0);
        assert_eq!(end.ball.center.x, 480.0);
        // Ground contact at both ends, lifted in the middle
        assert_eq!(start.ball.center, start.ball.shadow);
        assert!((end.ball.center.y - end.ball.shadow.y).abs() < EPS);
        assert!(mid.ball.center.y < mid.ball.shadow.y);
        // Shadow climbs toward the horizon
        assert!(end.ball.shadow.y < start.ball.shadow.y);
        // Keeper is deeper than the wall, so drawn smaller
        assert!(end.keeper.base.y < end.wall.base.y);
        assert!(end.keeper.pixel_height() < end.wall.pixel_height());
    }

    #[test]
    fn test_broadcast_curve_bends_sideways() {
        let cfg = KickConfig::broadcast();
        let scene = compose_scene(&cfg, &Coefficients::new(0.0, 0.0, 1.0), 0.0);
        // c = 1 → 18px right at depth 0
        assert!((scene.ball.center.x - 498.0).abs() < EPS);
    }
}
