use humpf_traits::SpringState;

use crate::config::SpringConfig;

/// Round `value` to the nearest multiple of `precision`, which must be > 0.
#[inline]
pub fn snap(value: f64, precision: f64) -> f64 {
    debug_assert!(precision > 0.0, "snap precision must be > 0 (received: {precision})");
    (value / precision).round() * precision
}

/// Snap a state onto the position/velocity grids of `cfg`.
#[inline]
pub fn snap_state(state: SpringState, cfg: &SpringConfig) -> SpringState {
    SpringState::new(
        snap(state.position, cfg.position_precision),
        snap(state.velocity, cfg.velocity_precision),
    )
}

/// At rest: within `position_precision` of equilibrium and slower than
/// `velocity_precision`.
#[inline]
pub fn is_stable(state: SpringState, cfg: &SpringConfig) -> bool {
    (state.position - cfg.equilibrium).abs() <= cfg.position_precision
        && state.velocity.abs() <= cfg.velocity_precision
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_PRECISION;

    #[test]
    fn snaps_to_grid() {
        assert_eq!(snap(0.26, 0.25), 0.25);
        assert_eq!(snap(0.38, 0.25), 0.5);
        assert_eq!(snap(-0.26, 0.25), -0.25);
        let v = snap(0.123_456_789, DEFAULT_PRECISION);
        assert_eq!((v / DEFAULT_PRECISION).fract(), 0.0);
    }

    #[test]
    fn snap_is_idempotent() {
        for x in [0.1, 1.0 / 3.0, 96.279_1, -12.5] {
            let once = snap(x, DEFAULT_PRECISION);
            assert_eq!(snap(once, DEFAULT_PRECISION), once);
        }
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "snap precision must be > 0")]
    fn zero_precision_is_caught_in_debug() {
        let _ = snap(0.5, 0.0);
    }

    #[test]
    fn stability_bounds_are_inclusive() {
        let cfg = SpringConfig {
            equilibrium: 1.0,
            position_precision: 0.5,
            velocity_precision: 0.5,
            ..SpringConfig::default()
        };
        assert!(is_stable(SpringState::new(1.5, -0.5), &cfg));
        assert!(!is_stable(SpringState::new(1.51, 0.0), &cfg));
        assert!(!is_stable(SpringState::new(1.0, 0.51), &cfg));
    }
}
