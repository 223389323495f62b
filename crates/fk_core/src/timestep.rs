/// timestep.rs
/// Frame Step Constants
///
/// Progress advances by a fixed amount per host frame, so wall-clock duration
/// depends only on the host refresh rate:
/// - Step (0.006): progress gained per tick
/// - Reference refresh (60Hz): cadence used for duration estimates
use std::time::Duration;

/// Progress gained per animation tick
pub const DEFAULT_STEP: f64 = 0.006;

/// Refresh rate assumed when no host cadence is known
pub const REFERENCE_REFRESH_HZ: u32 = 60;

/// Whether `step` can drive progress from 0 to 1: finite and in (0, 1]
pub fn is_valid_step(step: f64) -> bool {
    step.is_finite() && step > 0.0 && step <= 1.0
}

/// Number of ticks needed to go from progress 0 to the terminal value 1.
///
/// A step of zero or less never finishes; `u64::MAX` is returned.
pub fn frames_to_finish(step: f64) -> u64 {
    if step.is_nan() || step <= 0.0 {
        return u64::MAX;
    }
    (1.0 / step).ceil() as u64
}

/// Wall-clock length of a full kick when ticks arrive at `refresh_hz`.
pub fn estimated_duration(step: f64, refresh_hz: u32) -> Duration {
    let frames = frames_to_finish(step);
    if frames == u64::MAX || refresh_hz == 0 {
        return Duration::MAX;
    }
    Duration::from_secs_f64(frames as f64 / refresh_hz as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_step_frame_count() {
        // 166 * 0.006 = 0.996, 167 * 0.006 = 1.002
        assert_eq!(frames_to_finish(DEFAULT_STEP), 167);
    }

    #[test]
    fn test_duration_at_reference_rate() {
        let d = estimated_duration(DEFAULT_STEP, REFERENCE_REFRESH_HZ);
        // 167 frames / 60Hz ≈ 2.78s
        assert!(d.as_secs_f64() > 2.5 && d.as_secs_f64() < 3.0);
    }

    #[test]
    fn test_step_validity() {
        assert!(is_valid_step(DEFAULT_STEP));
        assert!(is_valid_step(1.0));
        for bad in [0.0, -0.01, 1.5, f64::NAN, f64::INFINITY] {
            assert!(!is_valid_step(bad), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_degenerate_steps() {
        assert_eq!(frames_to_finish(0.0), u64::MAX);
        assert_eq!(frames_to_finish(-0.1), u64::MAX);
        assert_eq!(frames_to_finish(f64::NAN), u64::MAX);
        assert_eq!(frames_to_finish(1.0), 1);
        assert_eq!(estimated_duration(DEFAULT_STEP, 0), Duration::MAX);
    }
}
