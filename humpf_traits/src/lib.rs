pub mod clock;

pub use clock::{Clock, ManualClock, MonotonicClock};

/// Position and velocity of a spring at one instant.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct SpringState {
    pub position: f64,
    pub velocity: f64,
}

impl SpringState {
    #[inline]
    pub fn new(position: f64, velocity: f64) -> Self {
        Self { position, velocity }
    }
}

/// Anything that can be sampled as a spring at an arbitrary time `t`.
///
/// `position(t)` and `velocity(t)` must always agree with `evaluate(t)`.
pub trait SpringFn {
    fn evaluate(&self, t: f64) -> SpringState;

    /// `true` once the motion has converged to its equilibrium at time `t`.
    fn stable(&self, t: f64) -> bool;

    fn position(&self, t: f64) -> f64 {
        self.evaluate(t).position
    }

    fn velocity(&self, t: f64) -> f64 {
        self.evaluate(t).velocity
    }
}

impl<S: SpringFn + ?Sized> SpringFn for &S {
    fn evaluate(&self, t: f64) -> SpringState {
        (**self).evaluate(t)
    }

    fn stable(&self, t: f64) -> bool {
        (**self).stable(t)
    }

    fn position(&self, t: f64) -> f64 {
        (**self).position(t)
    }

    fn velocity(&self, t: f64) -> f64 {
        (**self).velocity(t)
    }
}
