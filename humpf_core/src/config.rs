//! Spring configuration: the fully resolved `SpringConfig` and the overlay
//! type `PartialSpringConfig` used everywhere a caller supplies parameters.

use humpf_traits::SpringState;

/// Caller time units per full cycle at unit angular frequency.
/// With the default, times are expressed in milliseconds.
pub const DEFAULT_TIME_SCALE: f64 = 1000.0;

/// Binary-friendly grid (1/16384) so snapped values round exactly.
pub const DEFAULT_PRECISION: f64 = 1.0 / 16384.0;

/// A fully resolved spring configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringConfig {
    /// Initial displacement.
    pub position: f64,
    /// Initial rate of change.
    pub velocity: f64,
    /// Rest position the spring approaches.
    pub equilibrium: f64,
    /// Natural frequency ω of the undamped system. Must be >= 0.
    pub angular_frequency: f64,
    /// Damping ratio ζ. Must be >= 0.
    pub damping_ratio: f64,
    /// Caller time units per full cycle at ω = 1. Must be non-zero.
    pub time_scale: f64,
    /// Time (caller units) at which motion starts; earlier times are clamped.
    pub time_start: f64,
    /// Grid that evaluated positions snap to. Must be > 0; [`Spring::new`]
    /// does not check it.
    ///
    /// [`Spring::new`]: crate::Spring::new
    pub position_precision: f64,
    /// Grid that evaluated velocities snap to. Must be > 0.
    pub velocity_precision: f64,
    /// Width of the band around ζ = 1 treated as critical damping; also the
    /// threshold under which ω counts as zero.
    pub damping_ratio_precision: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            position: 0.0,
            velocity: 0.0,
            equilibrium: 1.0,
            angular_frequency: 1.0,
            damping_ratio: 1.0,
            time_scale: DEFAULT_TIME_SCALE,
            time_start: 0.0,
            position_precision: DEFAULT_PRECISION,
            velocity_precision: DEFAULT_PRECISION,
            damping_ratio_precision: DEFAULT_PRECISION,
        }
    }
}

impl SpringConfig {
    /// Resolve a partial config against the library defaults.
    pub fn resolve(partial: &PartialSpringConfig) -> Self {
        partial.resolve_with(&Self::default())
    }

    /// Initial state encoded in this config.
    pub fn state(&self) -> SpringState {
        SpringState::new(self.position, self.velocity)
    }

    /// `true` when the initial state already sits at equilibrium within the
    /// configured precisions.
    pub fn is_at_rest(&self) -> bool {
        crate::precision::is_stable(self.state(), self)
    }
}

/// Overlay of optional spring parameters.
///
/// Merging is right-biased: `base.merge(&over)` keeps every field set in
/// `over` and falls back to `base` for the rest.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct PartialSpringConfig {
    pub position: Option<f64>,
    pub velocity: Option<f64>,
    pub equilibrium: Option<f64>,
    pub angular_frequency: Option<f64>,
    pub damping_ratio: Option<f64>,
    pub time_scale: Option<f64>,
    pub time_start: Option<f64>,
    pub position_precision: Option<f64>,
    pub velocity_precision: Option<f64>,
    pub damping_ratio_precision: Option<f64>,
}

impl PartialSpringConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overlay `over` on top of `self`; fields set in `over` win.
    #[must_use]
    pub fn merge(&self, over: &Self) -> Self {
        Self {
            position: over.position.or(self.position),
            velocity: over.velocity.or(self.velocity),
            equilibrium: over.equilibrium.or(self.equilibrium),
            angular_frequency: over.angular_frequency.or(self.angular_frequency),
            damping_ratio: over.damping_ratio.or(self.damping_ratio),
            time_scale: over.time_scale.or(self.time_scale),
            time_start: over.time_start.or(self.time_start),
            position_precision: over.position_precision.or(self.position_precision),
            velocity_precision: over.velocity_precision.or(self.velocity_precision),
            damping_ratio_precision: over
                .damping_ratio_precision
                .or(self.damping_ratio_precision),
        }
    }

    /// Fill unset fields from the library defaults.
    pub fn resolve(&self) -> SpringConfig {
        SpringConfig::resolve(self)
    }

    /// Fill unset fields from `base`.
    pub fn resolve_with(&self, base: &SpringConfig) -> SpringConfig {
        SpringConfig {
            position: self.position.unwrap_or(base.position),
            velocity: self.velocity.unwrap_or(base.velocity),
            equilibrium: self.equilibrium.unwrap_or(base.equilibrium),
            angular_frequency: self.angular_frequency.unwrap_or(base.angular_frequency),
            damping_ratio: self.damping_ratio.unwrap_or(base.damping_ratio),
            time_scale: self.time_scale.unwrap_or(base.time_scale),
            time_start: self.time_start.unwrap_or(base.time_start),
            position_precision: self.position_precision.unwrap_or(base.position_precision),
            velocity_precision: self.velocity_precision.unwrap_or(base.velocity_precision),
            damping_ratio_precision: self
                .damping_ratio_precision
                .unwrap_or(base.damping_ratio_precision),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Chainable setters.
impl PartialSpringConfig {
    pub fn with_position(mut self, position: f64) -> Self {
        self.position = Some(position);
        self
    }
    pub fn with_velocity(mut self, velocity: f64) -> Self {
        self.velocity = Some(velocity);
        self
    }
    pub fn with_equilibrium(mut self, equilibrium: f64) -> Self {
        self.equilibrium = Some(equilibrium);
        self
    }
    pub fn with_angular_frequency(mut self, angular_frequency: f64) -> Self {
        self.angular_frequency = Some(angular_frequency);
        self
    }
    pub fn with_damping_ratio(mut self, damping_ratio: f64) -> Self {
        self.damping_ratio = Some(damping_ratio);
        self
    }
    pub fn with_time_scale(mut self, time_scale: f64) -> Self {
        self.time_scale = Some(time_scale);
        self
    }
    pub fn with_time_start(mut self, time_start: f64) -> Self {
        self.time_start = Some(time_start);
        self
    }
    pub fn with_position_precision(mut self, precision: f64) -> Self {
        self.position_precision = Some(precision);
        self
    }
    pub fn with_velocity_precision(mut self, precision: f64) -> Self {
        self.velocity_precision = Some(precision);
        self
    }
    pub fn with_damping_ratio_precision(mut self, precision: f64) -> Self {
        self.damping_ratio_precision = Some(precision);
        self
    }
    /// Set both `position` and `velocity` from a sampled state.
    pub fn with_state(self, state: SpringState) -> Self {
        self.with_position(state.position)
            .with_velocity(state.velocity)
    }
}

impl From<SpringConfig> for PartialSpringConfig {
    fn from(c: SpringConfig) -> Self {
        Self {
            position: Some(c.position),
            velocity: Some(c.velocity),
            equilibrium: Some(c.equilibrium),
            angular_frequency: Some(c.angular_frequency),
            damping_ratio: Some(c.damping_ratio),
            time_scale: Some(c.time_scale),
            time_start: Some(c.time_start),
            position_precision: Some(c.position_precision),
            velocity_precision: Some(c.velocity_precision),
            damping_ratio_precision: Some(c.damping_ratio_precision),
        }
    }
}

/// A bare number is shorthand for `{ equilibrium: number }`.
impl From<f64> for PartialSpringConfig {
    fn from(equilibrium: f64) -> Self {
        Self::new().with_equilibrium(equilibrium)
    }
}

impl From<SpringState> for PartialSpringConfig {
    fn from(state: SpringState) -> Self {
        Self::new().with_state(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_precision_is_exact_power_of_two() {
        assert_eq!(DEFAULT_PRECISION, 0.000_061_035_156_25);
    }

    #[test]
    fn merge_is_right_biased() {
        let base = PartialSpringConfig::new()
            .with_equilibrium(10.0)
            .with_damping_ratio(0.5);
        let over = PartialSpringConfig::new().with_equilibrium(20.0);
        let merged = base.merge(&over);
        assert_eq!(merged.equilibrium, Some(20.0));
        assert_eq!(merged.damping_ratio, Some(0.5));
        assert_eq!(merged.position, None);
    }

    #[test]
    fn number_is_equilibrium_shorthand() {
        let p = PartialSpringConfig::from(42.0);
        assert_eq!(p, PartialSpringConfig::new().with_equilibrium(42.0));
    }

    #[test]
    fn resolve_fills_defaults() {
        let cfg = PartialSpringConfig::new().with_position(200.0).resolve();
        assert_eq!(
            cfg,
            SpringConfig {
                position: 200.0,
                ..SpringConfig::default()
            }
        );
    }

    #[test]
    fn at_rest_uses_precisions() {
        let resting = SpringConfig {
            position: 1.0,
            velocity: 0.000_01,
            ..SpringConfig::default()
        };
        assert!(resting.is_at_rest());
        assert!(!SpringConfig::default().is_at_rest());
    }
}
