//! Live spring value driven by a clock.
//!
//! `SpringValue` owns one spring and reads the current time from a
//! [`Clock`] on every query. Mutations re-seed the spring from its state at
//! the moment of the call, so the motion stays continuous.

use std::fmt;

use humpf_traits::{Clock, MonotonicClock, SpringState};

use crate::config::{PartialSpringConfig, SpringConfig};
use crate::error::Result;
use crate::presets;
use crate::spring::Spring;

/// Thresholds used by [`SpringValue::stable`]. Comparisons are strict.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringValueOptions {
    pub position_threshold: f64,
    pub velocity_threshold: f64,
}

impl Default for SpringValueOptions {
    fn default() -> Self {
        Self {
            position_threshold: 0.01,
            velocity_threshold: 0.001,
        }
    }
}

type OnChange = Box<dyn FnMut(&SpringConfig)>;

pub struct SpringValue<C: Clock = MonotonicClock> {
    clock: C,
    spring: Spring,
    options: SpringValueOptions,
    on_change: Option<OnChange>,
}

impl<C: Clock> fmt::Debug for SpringValue<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpringValue")
            .field("config", self.spring.config())
            .field("regime", &self.spring.regime())
            .field("options", &self.options)
            .field("on_change", &self.on_change.is_some())
            .finish_non_exhaustive()
    }
}

impl SpringValue<MonotonicClock> {
    /// Start a value on the real-time clock, with motion starting now.
    pub fn new(initial: impl Into<PartialSpringConfig>) -> Result<Self> {
        Self::with_clock(initial, MonotonicClock::new())
    }
}

impl<C: Clock> SpringValue<C> {
    pub fn with_clock(initial: impl Into<PartialSpringConfig>, clock: C) -> Result<Self> {
        let now = clock.now_ms();
        let config = PartialSpringConfig::new()
            .with_time_start(now)
            .merge(&initial.into())
            .resolve();
        let spring = Spring::new(config)?;
        tracing::debug!(
            regime = spring.regime().name(),
            equilibrium = config.equilibrium,
            "spring value created"
        );
        Ok(Self {
            clock,
            spring,
            options: SpringValueOptions::default(),
            on_change: None,
        })
    }

    #[must_use]
    pub fn with_options(mut self, options: SpringValueOptions) -> Self {
        self.options = options;
        self
    }

    /// Called with the new config after every successful mutation.
    #[must_use]
    pub fn on_change(mut self, callback: impl FnMut(&SpringConfig) + 'static) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    pub fn config(&self) -> &SpringConfig {
        self.spring.config()
    }

    pub fn spring(&self) -> &Spring {
        &self.spring
    }

    pub fn options(&self) -> SpringValueOptions {
        self.options
    }

    pub fn state(&self) -> SpringState {
        self.spring.evaluate(self.clock.now_ms())
    }

    pub fn position(&self) -> f64 {
        self.state().position
    }

    pub fn velocity(&self) -> f64 {
        self.state().velocity
    }

    /// Close enough to equilibrium by the value's own thresholds.
    pub fn stable(&self) -> bool {
        let state = self.state();
        state.velocity.abs() < self.options.velocity_threshold
            && (state.position - self.config().equilibrium).abs()
                < self.options.position_threshold
    }

    /// Merge `partial` into the config. The re-seeded start time, position
    /// and velocity override anything `partial` sets for them.
    pub fn update(&mut self, partial: impl Into<PartialSpringConfig>) -> Result<()> {
        let partial = partial.into();
        let config = PartialSpringConfig::from(*self.config())
            .merge(&partial)
            .merge(&self.reseed())
            .resolve();
        self.commit(config)
    }

    /// Like [`update`](Self::update), but fields in `partial` win over the
    /// re-seeded ones.
    pub fn replace(&mut self, partial: impl Into<PartialSpringConfig>) -> Result<()> {
        let partial = partial.into();
        let config = PartialSpringConfig::from(*self.config())
            .merge(&self.reseed())
            .merge(&partial)
            .resolve();
        self.commit(config)
    }

    /// Coast to rest from the current state under critical damping,
    /// optionally with a new angular frequency.
    pub fn decay(&mut self, angular_frequency: Option<f64>) -> Result<()> {
        let current = *self.config();
        let base = PartialSpringConfig::from(current)
            .with_angular_frequency(angular_frequency.unwrap_or(current.angular_frequency))
            .merge(&self.reseed());
        let config = presets::decay(&base).resolve();
        self.commit(config)
    }

    /// Current time and state, sampled once.
    fn reseed(&self) -> PartialSpringConfig {
        let now = self.clock.now_ms();
        PartialSpringConfig::from(self.spring.evaluate(now)).with_time_start(now)
    }

    fn commit(&mut self, config: SpringConfig) -> Result<()> {
        self.spring = Spring::new(config)?;
        tracing::debug!(
            regime = self.spring.regime().name(),
            equilibrium = config.equilibrium,
            "spring value changed"
        );
        if let Some(callback) = self.on_change.as_mut() {
            callback(self.spring.config());
        }
        Ok(())
    }
}
