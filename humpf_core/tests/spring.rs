use approx::assert_abs_diff_eq;
use humpf_core::presets;
use humpf_core::{
    DEFAULT_PRECISION, PartialSpringConfig, Regime, Spring, SpringConfig, SpringError, SpringFn,
    solve,
};
use rstest::rstest;

fn spring(partial: PartialSpringConfig) -> Spring {
    Spring::from_partial(&partial).expect("valid config")
}

#[test]
fn default_spring_reaches_equilibrium() {
    let s = spring(PartialSpringConfig::new());
    assert_eq!(s.regime(), Regime::CriticallyDamped);

    let start = s.evaluate(0.0);
    assert_eq!(start.position, 0.0);
    assert_eq!(start.velocity, 0.0);

    let mid = s.evaluate(1000.0);
    assert_abs_diff_eq!(mid.position, 0.9864, epsilon = 1e-3);
    assert_abs_diff_eq!(mid.velocity, 0.0117, epsilon = 1e-3);

    let end = s.evaluate(2500.0);
    assert_eq!(end.position, 1.0);
    assert_eq!(end.velocity, 0.0);
    assert!(s.stable(2500.0));
}

#[test]
fn over_damped_spring() {
    let s = spring(
        PartialSpringConfig::new()
            .with_damping_ratio(2.0)
            .with_equilibrium(100.0),
    );
    assert!(matches!(s.regime(), Regime::OverDamped { .. }));

    let start = s.evaluate(0.0);
    assert_abs_diff_eq!(start.position, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(start.velocity, 0.0, epsilon = 1e-9);

    let later = s.evaluate(2000.0);
    assert_abs_diff_eq!(later.position, 96.28, epsilon = 0.01);
    assert_abs_diff_eq!(later.velocity, 0.996, epsilon = 0.01);
}

#[test]
fn under_damped_spring_overshoots() {
    let s = spring(
        PartialSpringConfig::new()
            .with_damping_ratio(0.2)
            .with_equilibrium(10.0),
    );
    assert!(matches!(s.regime(), Regime::UnderDamped { .. }));
    let peak = (0..2000)
        .map(|t| s.position(f64::from(t)))
        .fold(f64::MIN, f64::max);
    assert!(peak > 10.0, "expected overshoot, peak = {peak}");
    assert!(s.stable(60_000.0));
}

#[test]
fn negative_time_start_shifts_motion() {
    let shifted = spring(
        PartialSpringConfig::new()
            .with_time_start(-500.0)
            .with_equilibrium(100.0),
    );
    let plain = spring(PartialSpringConfig::new().with_equilibrium(100.0));

    let at_start = shifted.evaluate(-500.0);
    assert_eq!(at_start.position, 0.0);
    assert_eq!(at_start.velocity, 0.0);
    // Nothing moves before the start.
    assert_eq!(shifted.evaluate(-2000.0), at_start);

    for t in [-250.0, 0.0, 100.0, 1500.0] {
        let a = shifted.evaluate(t);
        let b = plain.evaluate(t + 500.0);
        assert_abs_diff_eq!(a.position, b.position, epsilon = 1e-3);
        assert_abs_diff_eq!(a.velocity, b.velocity, epsilon = 1e-3);
    }
}

#[test]
fn decay_glides_to_rest() {
    let partial = presets::decay(&PartialSpringConfig::new().with_velocity(5.0));
    let s = spring(partial);
    assert_eq!(s.config().damping_ratio, 1.0);
    assert_eq!(s.config().equilibrium, 5.0);

    let start = s.evaluate(0.0);
    assert_eq!(start.position, 0.0);
    assert_eq!(start.velocity, 5.0);

    let end = s.evaluate(2000.0);
    assert_abs_diff_eq!(end.position, 5.0, epsilon = 1e-3);
    assert_abs_diff_eq!(end.velocity, 0.0, epsilon = 1e-3);
}

#[test]
fn near_zero_frequency_is_constant() {
    let s = spring(
        PartialSpringConfig::new()
            .with_angular_frequency(1e-10)
            .with_position(3.0)
            .with_velocity(2.0)
            .with_equilibrium(50.0),
    );
    assert_eq!(s.regime(), Regime::Identity);
    for t in [-1e6, 0.0, 1.0, 1e3, 1e9] {
        let state = s.evaluate(t);
        assert_eq!(state.position, 3.0);
        assert_eq!(state.velocity, 2.0);
        assert!(s.stable(t));
    }
}

#[test]
fn resting_spring_keeps_unsnapped_state() {
    let s = spring(PartialSpringConfig::new().with_position(1.0).with_velocity(1e-12));
    assert_eq!(s.regime(), Regime::Identity);
    assert_eq!(s.evaluate(12_345.0).velocity, 1e-12);
}

#[rstest]
#[case::negative_damping(1.0, -0.5, SpringError::InvalidDampingRatio { received: -0.5 })]
#[case::negative_frequency(-1.0, 1.0, SpringError::InvalidAngularFrequency { received: -1.0 })]
#[case::damping_checked_first(-1.0, -1.0, SpringError::InvalidDampingRatio { received: -1.0 })]
fn rejects_negative_parameters(
    #[case] angular_frequency: f64,
    #[case] damping_ratio: f64,
    #[case] expected: SpringError,
) {
    let cfg = SpringConfig {
        angular_frequency,
        damping_ratio,
        ..SpringConfig::default()
    };
    let err = solve(&cfg).expect_err("must reject");
    assert_eq!(err, expected);
    assert!(err.to_string().contains(&format!("{}", expected.received())));
}

#[test]
fn zero_parameters_are_accepted() {
    let s = solve(&SpringConfig {
        angular_frequency: 0.0,
        damping_ratio: 0.0,
        ..SpringConfig::default()
    })
    .expect("zero is valid");
    assert_eq!(s.regime(), Regime::Identity);
}

#[rstest]
#[case::over(2.0)]
#[case::under(0.4)]
#[case::critical(1.0)]
fn accessors_agree_with_evaluate(#[case] damping_ratio: f64) {
    let s = spring(
        PartialSpringConfig::new()
            .with_damping_ratio(damping_ratio)
            .with_velocity(-3.0)
            .with_equilibrium(20.0),
    );
    for i in 0..50 {
        let t = f64::from(i) * 97.0;
        let state = s.evaluate(t);
        assert_eq!(state.position, s.position(t));
        assert_eq!(state.velocity, s.velocity(t));
        // Through the trait as well.
        assert_eq!(SpringFn::evaluate(&s, t), state);
    }
}

#[test]
fn regimes_agree_across_the_critical_band() {
    let eps = DEFAULT_PRECISION;
    let base = PartialSpringConfig::new().with_velocity(0.5);
    let under = spring(base.with_damping_ratio(1.0 - 1.5 * eps));
    let critical = spring(base.with_damping_ratio(1.0));
    let over = spring(base.with_damping_ratio(1.0 + 1.5 * eps));
    assert!(matches!(under.regime(), Regime::UnderDamped { .. }));
    assert_eq!(critical.regime(), Regime::CriticallyDamped);
    assert!(matches!(over.regime(), Regime::OverDamped { .. }));

    for i in 0..40 {
        let t = f64::from(i) * 100.0;
        let c = critical.evaluate(t);
        for other in [under.evaluate(t), over.evaluate(t)] {
            assert_abs_diff_eq!(other.position, c.position, epsilon = 1e-3);
            assert_abs_diff_eq!(other.velocity, c.velocity, epsilon = 1e-3);
        }
    }
}

#[test]
fn stability_holds_once_reached() {
    let s = spring(PartialSpringConfig::new().with_equilibrium(100.0));
    assert!(!s.stable(0.0));
    let first = (0..400)
        .map(|i| f64::from(i) * 100.0)
        .find(|&t| s.stable(t))
        .expect("converges within 40s");
    for i in 1..200 {
        assert!(s.stable(first + f64::from(i) * 250.0));
    }
}

#[test]
fn outputs_sit_on_the_precision_grid() {
    let s = spring(
        PartialSpringConfig::new()
            .with_damping_ratio(0.3)
            .with_equilibrium(7.3),
    );
    for i in 0..30 {
        let state = s.evaluate(f64::from(i) * 33.0);
        assert_eq!((state.position / DEFAULT_PRECISION).fract(), 0.0);
        assert_eq!((state.velocity / DEFAULT_PRECISION).fract(), 0.0);
    }
}

#[test]
fn custom_time_scale_stretches_motion() {
    let fast = spring(PartialSpringConfig::new());
    let slow = spring(PartialSpringConfig::new().with_time_scale(2000.0));
    for t in [0.0, 300.0, 1000.0] {
        assert_abs_diff_eq!(
            slow.position(2.0 * t),
            fast.position(t),
            epsilon = 1e-3
        );
    }
}
