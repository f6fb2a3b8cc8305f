use std::f64::consts::TAU;

/// Normalized time units per caller time unit. One `time_scale` of caller
/// time is one full cycle (2π) at unit angular frequency.
#[inline]
pub fn scale_factor(time_scale: f64) -> f64 {
    TAU / time_scale
}

/// Map caller time `t` to the dimensionless time used by the closed forms.
///
/// Time before `time_start` is clamped to zero elapsed.
#[inline]
pub fn normalize(t: f64, time_scale: f64, time_start: f64) -> f64 {
    let k = scale_factor(time_scale);
    (t * k - time_start * k).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_before_start() {
        assert_eq!(normalize(-10.0, 1000.0, 0.0), 0.0);
        assert_eq!(normalize(100.0, 1000.0, 500.0), 0.0);
        assert_eq!(normalize(500.0, 1000.0, 500.0), 0.0);
    }

    #[test]
    fn one_time_scale_is_one_cycle() {
        assert!((normalize(1000.0, 1000.0, 0.0) - TAU).abs() < 1e-12);
        assert!((normalize(1.0, 1.0, 0.0) - TAU).abs() < 1e-12);
    }

    #[test]
    fn start_is_in_caller_units() {
        let shifted = normalize(250.0, 1000.0, -500.0);
        let plain = normalize(750.0, 1000.0, 0.0);
        assert!((shifted - plain).abs() < 1e-12);
    }
}
