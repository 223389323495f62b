//! Trajectory model
//!
//! Maps kick progress `t ∈ [0, 1]` and the quadratic coefficients `(a, b, c)`
//! to a point in curve space. Two models exist:
//!
//! - **Flat**: the quadratic is the ball's vertical offset on a top-down field,
//!   shifted by a constant bias so a zero curve sits inside the pitch.
//! - **Lifted**: the quadratic becomes a scaled sideways deviation and an
//!   independent parabolic arc supplies the ball's height; progress doubles as
//!   depth into the scene.
//!
//! Both are total over the reals. Coefficient ranges are the caller's concern.

use serde::{Deserialize, Serialize};

/// Vertical bias applied by the flat model
pub const FLAT_BIAS: f64 = 0.25;

/// Lifted model: pixels of sideways deviation per curve unit
pub const LIFTED_LATERAL_SCALE: f64 = 18.0;

/// Lifted model: arc height at mid-flight
pub const LIFTED_ARC_PEAK: f64 = 0.65;

/// Quadratic curve parameters `y = a·x² + b·x + c`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coefficients {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Coefficients {
    pub const fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }

    /// Evaluate the quadratic at `x`
    #[inline]
    pub fn eval(&self, x: f64) -> f64 {
        self.a * x * x + self.b * x + self.c
    }

    /// One-decimal labels for `(a, b, c)`, as shown next to the sliders
    pub fn labels(&self) -> [String; 3] {
        [
            format_coefficient(self.a),
            format_coefficient(self.b),
            format_coefficient(self.c),
        ]
    }

    /// Human readable equation, e.g. `y = 1.0x² + 0.0x + 0.0`
    pub fn equation(&self) -> String {
        let [a, b, c] = self.labels();
        format!("y = {a}x² + {b}x + {c}")
    }
}

/// Format a coefficient with exactly one decimal place
pub fn format_coefficient(value: f64) -> String {
    format!("{:.1}", value)
}

/// Sideways offset of the curve at progress `t`
#[inline]
pub fn lateral(t: f64, coeffs: &Coefficients) -> f64 {
    coeffs.eval(t)
}

/// Ball lift along the kick: 0 at both ends, `peak` at mid-flight
#[inline]
pub fn arc_height(t: f64, peak: f64) -> f64 {
    let u = 2.0 * t - 1.0;
    (peak * (1.0 - u * u)).max(0.0)
}

/// A point in curve space, handed to a projector.
///
/// Meaning of the axes depends on the model:
/// - Flat: `x` = progress along the field, `y` = vertical field offset, `z` unused
/// - Lifted: `x` = sideways pixels, `y` = height, `z` = depth
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CurvePoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl CurvePoint {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TrajectoryModel {
    Flat {
        #[serde(default = "default_bias")]
        bias: f64,
    },
    Lifted {
        #[serde(default = "default_lateral_scale")]
        lateral_scale: f64,
        #[serde(default = "default_peak")]
        peak: f64,
    },
}

fn default_bias() -> f64 {
    FLAT_BIAS
}

fn default_lateral_scale() -> f64 {
    LIFTED_LATERAL_SCALE
}

fn default_peak() -> f64 {
    LIFTED_ARC_PEAK
}

impl Default for TrajectoryModel {
    fn default() -> Self {
        Self::flat()
    }
}

impl TrajectoryModel {
    pub fn flat() -> Self {
        TrajectoryModel::Flat { bias: FLAT_BIAS }
    }

    pub fn lifted() -> Self {
        TrajectoryModel::Lifted {
            lateral_scale: LIFTED_LATERAL_SCALE,
            peak: LIFTED_ARC_PEAK,
        }
    }

    /// Ball position at progress `t`
    pub fn sample(&self, t: f64, coeffs: &Coefficients) -> CurvePoint {
        match *self {
            TrajectoryModel::Flat { bias } => CurvePoint::new(t, lateral(t, coeffs) + bias, 0.0),
            TrajectoryModel::Lifted { lateral_scale, peak } => {
                CurvePoint::new(lateral(t, coeffs) * lateral_scale, arc_height(t, peak), t)
            }
        }
    }

    /// Point directly below the ball, where its shadow falls
    pub fn ground(&self, t: f64, coeffs: &Coefficients) -> CurvePoint {
        let p = self.sample(t, coeffs);
        CurvePoint::new(p.x, 0.0, p.z)
    }

    /// Height of the ball over the ground line, used for shadow fading
    pub fn height_above_ground(&self, t: f64, coeffs: &Coefficients) -> f64 {
        self.sample(t, coeffs).y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_lateral_is_plain_quadratic() {
        let c = Coefficients::new(1.0, 0.0, 0.0);
        assert_eq!(lateral(0.5, &c), 0.25);

        let c = Coefficients::new(-2.0, 3.0, 0.5);
        for i in 0..=10 {
            let t = i as f64 / 10.0;
            assert!((lateral(t, &c) - (-2.0 * t * t + 3.0 * t + 0.5)).abs() < EPS);
        }
    }

    #[test]
    fn test_arc_height_shape() {
        assert_eq!(arc_height(0.0, LIFTED_ARC_PEAK), 0.0);
        assert_eq!(arc_height(1.0, LIFTED_ARC_PEAK), 0.0);
        assert_eq!(arc_height(0.5, LIFTED_ARC_PEAK), 0.65);
        assert!(arc_height(0.25, LIFTED_ARC_PEAK) < 0.65);
        // Outside [0, 1] the parabola would go negative; it is floored at 0
        assert_eq!(arc_height(1.5, LIFTED_ARC_PEAK), 0.0);
    }

    #[test]
    fn test_flat_sample_applies_bias() {
        let model = TrajectoryModel::flat();
        let c = Coefficients::new(1.0, 0.0, 0.0);
        let p = model.sample(0.5, &c);
        assert_eq!(p.x, 0.5);
        assert!((p.y - 0.5).abs() < EPS);
        assert_eq!(model.ground(0.5, &c).y, 0.0);
        assert!((model.height_above_ground(0.5, &c) - 0.5).abs() < EPS);
    }

    #[test]
    fn test_lifted_sample_separates_axes() {
        let model = TrajectoryModel::lifted();
        let c = Coefficients::new(0.0, 1.0, 0.0);
        let p = model.sample(0.5, &c);
        assert!((p.x - 9.0).abs() < EPS);
        assert!((p.y - 0.65).abs() < EPS);
        assert_eq!(p.z, 0.5);

        // Coefficients never touch the lift
        let other = Coefficients::new(5.0, -3.0, 2.0);
        assert_eq!(model.sample(0.5, &other).y, p.y);
    }

    #[test]
    fn test_equation_label() {
        let c = Coefficients::new(1.0, -0.26, 0.04);
        assert_eq!(c.labels(), ["1.0".to_string(), "-0.3".to_string(), "0.0".to_string()]);
        assert_eq!(c.equation(), "y = 1.0x² + -0.3x + 0.0");
    }

    #[test]
    fn test_model_serde_tagging() {
        let json = serde_json::to_value(TrajectoryModel::lifted()).unwrap();
        assert_eq!(json["kind"], "lifted");

        let parsed: TrajectoryModel = serde_json::from_str(r#"{"kind":"flat"}"#).unwrap();
        assert_eq!(parsed, TrajectoryModel::flat());
    }
}
