//! Timeline of springs, each seeded from the state of the one before it.
//!
//! Steps live in a vector sorted by time. A mutation invalidates the steps
//! from the first affected index and rebuilds them left to right before
//! returning, so every stored step always carries a built spring.
//!
//! Mutations are transactional: on a `SpringError` the sequence is left
//! exactly as it was before the call.

use humpf_traits::{SpringFn, SpringState};

use crate::config::{DEFAULT_TIME_SCALE, PartialSpringConfig, SpringConfig};
use crate::error::Result;
use crate::presets;
use crate::spring::Spring;

#[derive(Debug, Clone, PartialEq)]
pub struct SequenceStep {
    time: f64,
    config: PartialSpringConfig,
    spring: Option<Spring>,
}

impl SequenceStep {
    fn new(time: f64, config: PartialSpringConfig) -> Self {
        Self {
            time,
            config,
            spring: None,
        }
    }

    /// Time (caller units) at which this step takes over.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Config as supplied by the caller, before defaults and seeding.
    pub fn config(&self) -> &PartialSpringConfig {
        &self.config
    }

    pub fn spring(&self) -> &Spring {
        self.built()
    }

    #[track_caller]
    fn built(&self) -> &Spring {
        match &self.spring {
            Some(spring) => spring,
            None => unbuilt_step(self.time),
        }
    }
}

/// Steps are ordered with `partition_point`, which needs a total order.
#[track_caller]
fn assert_finite_time(time: f64) {
    assert!(time.is_finite(), "step time must be finite (received: {time})");
}

#[cold]
#[track_caller]
fn unbuilt_step(time: f64) -> ! {
    panic!("sequence step at t={time} used before its spring was built")
}

/// If only one of position/equilibrium is set the other copies it; if
/// neither is set both are 0.
fn resolve_initial(initial: &PartialSpringConfig) -> PartialSpringConfig {
    match (initial.position, initial.equilibrium) {
        (None, None) => initial.with_position(0.0).with_equilibrium(0.0),
        (None, Some(eq)) => initial.with_position(eq),
        (Some(pos), None) => initial.with_equilibrium(pos),
        (Some(_), Some(_)) => *initial,
    }
}

/// A spring that sits at 0 forever. Valid without validation.
fn resting_spring(time_scale: f64) -> Spring {
    Spring::at_rest(SpringConfig {
        equilibrium: 0.0,
        time_scale,
        ..SpringConfig::default()
    })
}

#[derive(Debug, Clone, Default)]
pub struct SpringSequenceBuilder {
    time_scale: Option<f64>,
    default_config: PartialSpringConfig,
    initial: PartialSpringConfig,
}

impl SpringSequenceBuilder {
    pub fn with_time_scale(mut self, time_scale: f64) -> Self {
        self.time_scale = Some(time_scale);
        self
    }

    /// Config merged under every step.
    pub fn with_default_config(mut self, config: impl Into<PartialSpringConfig>) -> Self {
        self.default_config = config.into();
        self
    }

    /// State before the first step.
    pub fn with_initial(mut self, initial: impl Into<PartialSpringConfig>) -> Self {
        self.initial = initial.into();
        self
    }

    pub fn build(self) -> Result<SpringSequence> {
        let time_scale = self.time_scale.unwrap_or(DEFAULT_TIME_SCALE);
        let mut seq = SpringSequence {
            time_scale,
            default_config: self.default_config,
            initial: self.initial,
            initial_spring: resting_spring(time_scale),
            steps: Vec::new(),
        };
        seq.initial_spring = seq.build_initial()?;
        Ok(seq)
    }
}

/// Piecewise spring over time.
///
/// `Clone` is a deep copy: the clone shares nothing with the original.
#[derive(Debug, Clone)]
pub struct SpringSequence {
    time_scale: f64,
    default_config: PartialSpringConfig,
    initial: PartialSpringConfig,
    initial_spring: Spring,
    steps: Vec<SequenceStep>,
}

impl Default for SpringSequence {
    fn default() -> Self {
        Self::new()
    }
}

impl SpringSequence {
    /// Empty timeline resting at 0 with the default time scale.
    pub fn new() -> Self {
        Self {
            time_scale: DEFAULT_TIME_SCALE,
            default_config: PartialSpringConfig::default(),
            initial: PartialSpringConfig::default(),
            initial_spring: resting_spring(DEFAULT_TIME_SCALE),
            steps: Vec::new(),
        }
    }

    pub fn builder() -> SpringSequenceBuilder {
        SpringSequenceBuilder::default()
    }

    // ── Introspection ────────────────────────────────────────────────────────

    pub fn steps(&self) -> &[SequenceStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    pub fn default_config(&self) -> &PartialSpringConfig {
        &self.default_config
    }

    pub fn initial(&self) -> &PartialSpringConfig {
        &self.initial
    }

    /// Spring in effect before the first step.
    pub fn initial_spring(&self) -> &Spring {
        &self.initial_spring
    }

    /// Spring in effect at `t`: the last step with `time <= t`, else the
    /// initial spring.
    pub fn spring_at(&self, t: f64) -> &Spring {
        match self.step_index_at(t) {
            Some(i) => self.steps[i].built(),
            None => &self.initial_spring,
        }
    }

    pub fn evaluate(&self, t: f64) -> SpringState {
        self.spring_at(t).evaluate(t)
    }

    pub fn position(&self, t: f64) -> f64 {
        self.evaluate(t).position
    }

    pub fn velocity(&self, t: f64) -> f64 {
        self.evaluate(t).velocity
    }

    pub fn stable(&self, t: f64) -> bool {
        self.spring_at(t).stable(t)
    }

    fn step_index_at(&self, t: f64) -> Option<usize> {
        self.steps
            .partition_point(|s| s.time <= t)
            .checked_sub(1)
    }

    // ── Mutations ────────────────────────────────────────────────────────────

    /// Insert a step in time order. A step already at exactly `time` is
    /// replaced.
    ///
    /// # Panics
    /// If `time` is not finite.
    pub fn insert_at(
        &mut self,
        time: f64,
        config: impl Into<PartialSpringConfig>,
    ) -> Result<&mut Self> {
        let config = config.into();
        self.transact("insert_at", |seq| {
            let index = seq.insert_step(time, config);
            seq.rebuild_from(index)
        })
    }

    /// Drop every step at or after `time`, then append the new step.
    ///
    /// # Panics
    /// If `time` is not finite.
    pub fn replace_tail(
        &mut self,
        time: f64,
        config: impl Into<PartialSpringConfig>,
    ) -> Result<&mut Self> {
        let config = config.into();
        self.transact("replace_tail", |seq| {
            let keep = seq.splice_tail(time, config);
            seq.rebuild_from(keep)
        })
    }

    /// Discard the timeline and keep a single step.
    ///
    /// # Panics
    /// If `time` is not finite.
    pub fn replace_all(
        &mut self,
        time: f64,
        config: impl Into<PartialSpringConfig>,
    ) -> Result<&mut Self> {
        let config = config.into();
        self.transact("replace_all", |seq| {
            assert_finite_time(time);
            seq.steps.clear();
            seq.steps.push(SequenceStep::new(time, config));
            seq.rebuild_from(0)
        })
    }

    /// Let go at `time`: from the state sampled there, coast to rest under
    /// critical damping. Everything at or after `time` is dropped.
    ///
    /// # Panics
    /// If `time` is not finite.
    pub fn decay(
        &mut self,
        time: f64,
        config: impl Into<PartialSpringConfig>,
    ) -> Result<&mut Self> {
        let state = self.evaluate(time);
        let over = self
            .default_config
            .merge(&PartialSpringConfig::from(state))
            .merge(&config.into());
        let decayed = presets::decay(&over);
        self.transact("decay", |seq| {
            let keep = seq.splice_tail(time, decayed);
            seq.rebuild_from(keep)
        })
    }

    /// Forget every step up to and including the one active at `time`. The
    /// initial spring takes over its motion from `time` on, so evaluation at
    /// or after `time` is unchanged.
    pub fn clear_before(&mut self, time: f64) -> Result<&mut Self> {
        let Some(index) = self.step_index_at(time) else {
            return Ok(self);
        };
        self.transact("clear_before", |seq| {
            let active = *seq.steps[index].built();
            let state = active.evaluate(time);
            let cfg = active.config();
            seq.steps.drain(..=index);
            seq.initial = PartialSpringConfig::from(*cfg)
                .with_state(state)
                .with_time_start(time.max(cfg.time_start));
            seq.initial_spring = seq.build_initial()?;
            seq.rebuild_from(0)
        })
    }

    /// Shift every step by `delta` time units.
    ///
    /// # Panics
    /// If a shifted step time is not finite.
    pub fn offset(&mut self, delta: f64) -> Result<&mut Self> {
        self.transact("offset", |seq| {
            for step in &mut seq.steps {
                step.time += delta;
                assert_finite_time(step.time);
            }
            seq.rebuild_from(0)
        })
    }

    pub fn set_initial(&mut self, initial: impl Into<PartialSpringConfig>) -> Result<&mut Self> {
        let initial = initial.into();
        self.transact("set_initial", |seq| {
            seq.initial = initial;
            seq.rebuild_all()
        })
    }

    pub fn set_default_config(
        &mut self,
        config: impl Into<PartialSpringConfig>,
    ) -> Result<&mut Self> {
        let config = config.into();
        self.transact("set_default_config", |seq| {
            seq.default_config = config;
            seq.rebuild_all()
        })
    }

    pub fn set_time_scale(&mut self, time_scale: f64) -> Result<&mut Self> {
        self.transact("set_time_scale", |seq| {
            seq.time_scale = time_scale;
            seq.rebuild_all()
        })
    }

    // ── Internals ────────────────────────────────────────────────────────────

    /// Run `op` on a copy and commit only if it succeeds.
    fn transact(
        &mut self,
        op: &'static str,
        f: impl FnOnce(&mut Self) -> Result<()>,
    ) -> Result<&mut Self> {
        let mut next = self.clone();
        match f(&mut next) {
            Ok(()) => {
                *self = next;
                tracing::debug!(op, steps = self.steps.len(), "sequence updated");
                Ok(self)
            }
            Err(err) => {
                tracing::warn!(op, error = %err, "sequence mutation rejected");
                Err(err)
            }
        }
    }

    #[allow(clippy::float_cmp)]
    fn insert_step(&mut self, time: f64, config: PartialSpringConfig) -> usize {
        assert_finite_time(time);
        let after = self.steps.partition_point(|s| s.time <= time);
        let step = SequenceStep::new(time, config);
        match after.checked_sub(1) {
            Some(i) if self.steps[i].time == time => {
                self.steps[i] = step;
                i
            }
            _ => {
                self.steps.insert(after, step);
                after
            }
        }
    }

    /// Truncate at the first step at or after `time` and append; returns the
    /// index of the new step.
    fn splice_tail(&mut self, time: f64, config: PartialSpringConfig) -> usize {
        assert_finite_time(time);
        let keep = self.steps.partition_point(|s| s.time < time);
        self.steps.truncate(keep);
        self.steps.push(SequenceStep::new(time, config));
        keep
    }

    fn build_initial(&self) -> Result<Spring> {
        let cfg = self
            .default_config
            .merge(&resolve_initial(&self.initial))
            .with_time_scale(self.time_scale);
        Spring::from_partial(&cfg)
    }

    fn rebuild_all(&mut self) -> Result<()> {
        self.initial_spring = self.build_initial()?;
        self.rebuild_from(0)
    }

    /// Rebuild steps `index..` in order, seeding each from its predecessor.
    fn rebuild_from(&mut self, index: usize) -> Result<()> {
        for step in &mut self.steps[index..] {
            step.spring = None;
        }
        for i in index..self.steps.len() {
            let time = self.steps[i].time;
            let seed = match i.checked_sub(1) {
                Some(prev) => self.steps[prev].built().evaluate(time),
                None => self.initial_spring.evaluate(time),
            };
            let step = &mut self.steps[i];
            let overlay = self.default_config.merge(&step.config);
            let offset = overlay.time_start.unwrap_or(0.0);
            let cfg = PartialSpringConfig::from(seed)
                .merge(&overlay)
                .with_time_scale(self.time_scale)
                .with_time_start(time + offset);
            step.spring = Some(Spring::from_partial(&cfg)?);
        }
        tracing::trace!(from = index, steps = self.steps.len(), "rebuilt sequence steps");
        Ok(())
    }
}

impl SpringFn for SpringSequence {
    fn evaluate(&self, t: f64) -> SpringState {
        Self::evaluate(self, t)
    }

    fn stable(&self, t: f64) -> bool {
        Self::stable(self, t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn times(seq: &SpringSequence) -> Vec<f64> {
        seq.steps().iter().map(SequenceStep::time).collect()
    }

    #[test]
    fn initial_resolution_copies_missing_anchor() {
        assert_eq!(
            resolve_initial(&PartialSpringConfig::new()),
            PartialSpringConfig::new()
                .with_position(0.0)
                .with_equilibrium(0.0)
        );
        assert_eq!(
            resolve_initial(&PartialSpringConfig::new().with_equilibrium(4.0)).position,
            Some(4.0)
        );
        assert_eq!(
            resolve_initial(&PartialSpringConfig::new().with_position(-2.0)).equilibrium,
            Some(-2.0)
        );
    }

    #[test]
    fn steps_stay_sorted_and_deduplicated() {
        let mut seq = SpringSequence::new();
        seq.insert_at(500.0, 1.0).unwrap();
        seq.insert_at(100.0, 2.0).unwrap();
        seq.insert_at(300.0, 3.0).unwrap();
        seq.insert_at(300.0, 4.0).unwrap();
        assert_eq!(times(&seq), vec![100.0, 300.0, 500.0]);
        assert_eq!(seq.steps()[1].config().equilibrium, Some(4.0));
    }

    #[test]
    fn lookup_picks_last_step_at_or_before() {
        let mut seq = SpringSequence::new();
        seq.insert_at(100.0, 1.0).unwrap().insert_at(200.0, 2.0).unwrap();
        assert_eq!(seq.step_index_at(50.0), None);
        assert_eq!(seq.step_index_at(100.0), Some(0));
        assert_eq!(seq.step_index_at(199.9), Some(0));
        assert_eq!(seq.step_index_at(200.0), Some(1));
        assert_eq!(seq.step_index_at(1e9), Some(1));
    }

    #[test]
    fn splice_tail_drops_steps_at_or_after() {
        let mut seq = SpringSequence::new();
        for t in [0.0, 100.0, 200.0, 300.0] {
            seq.insert_at(t, t).unwrap();
        }
        seq.replace_tail(200.0, 9.0).unwrap();
        assert_eq!(times(&seq), vec![0.0, 100.0, 200.0]);
        assert_eq!(seq.steps()[2].config().equilibrium, Some(9.0));
        seq.replace_tail(150.0, 7.0).unwrap();
        assert_eq!(times(&seq), vec![0.0, 100.0, 150.0]);
    }

    #[test]
    #[should_panic(expected = "used before its spring was built")]
    fn unbuilt_step_is_fatal() {
        let step = SequenceStep::new(10.0, PartialSpringConfig::new());
        let _ = step.spring();
    }
}
