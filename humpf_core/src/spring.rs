//! Regime classification and closed-form evaluation of a single spring.
//!
//! A `Spring` is built once from a resolved [`SpringConfig`] and never
//! mutated afterwards. Classification happens at construction and the
//! coefficients each closed form needs are precomputed into [`Regime`].

use std::fmt;

use humpf_traits::{SpringFn, SpringState};

use crate::config::{PartialSpringConfig, SpringConfig};
use crate::error::{Result, SpringError};
use crate::precision::{is_stable, snap_state};
use crate::time::normalize;

/// Damping regime with the coefficients its closed form needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Regime {
    /// No restoring force, or already at rest: the state never changes.
    Identity,
    /// `ζ > 1`: sum of two real exponentials.
    OverDamped {
        z1: f64,
        z2: f64,
        /// `1 / (2·ω·√(ζ² − 1))`
        inv_two_zb: f64,
    },
    /// `ζ < 1`: exponentially decaying oscillation.
    UnderDamped {
        omega_zeta: f64,
        /// Damped oscillation frequency `ω·√(1 − ζ²)`.
        alpha: f64,
    },
    /// `ζ ≈ 1` within `damping_ratio_precision`.
    CriticallyDamped,
}

impl Regime {
    /// Classify a validated config. Identity is checked first so the other
    /// branches never see ω ≈ 0.
    pub fn classify(cfg: &SpringConfig) -> Self {
        let w = cfg.angular_frequency;
        let z = cfg.damping_ratio;
        let eps = cfg.damping_ratio_precision;

        if w <= eps || cfg.is_at_rest() {
            Self::Identity
        } else if z > 1.0 + eps {
            let zb = w * (z * z - 1.0).sqrt();
            Self::OverDamped {
                z1: -w * z - zb,
                z2: -w * z + zb,
                inv_two_zb: 1.0 / (2.0 * zb),
            }
        } else if z < 1.0 - eps {
            Self::UnderDamped {
                omega_zeta: w * z,
                alpha: w * (1.0 - z * z).sqrt(),
            }
        } else {
            Self::CriticallyDamped
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Identity => "identity",
            Self::OverDamped { .. } => "over-damped",
            Self::UnderDamped { .. } => "under-damped",
            Self::CriticallyDamped => "critically-damped",
        }
    }
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Closed-form solution of one damped spring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    config: SpringConfig,
    regime: Regime,
}

/// Validate and classify a resolved config.
pub fn solve(config: &SpringConfig) -> Result<Spring> {
    Spring::new(*config)
}

impl Spring {
    pub fn new(config: SpringConfig) -> Result<Self> {
        // `!(x >= 0)` also rejects NaN.
        if !(config.damping_ratio >= 0.0) {
            return Err(SpringError::InvalidDampingRatio {
                received: config.damping_ratio,
            });
        }
        if !(config.angular_frequency >= 0.0) {
            return Err(SpringError::InvalidAngularFrequency {
                received: config.angular_frequency,
            });
        }
        let regime = Regime::classify(&config);
        tracing::trace!(
            regime = regime.name(),
            angular_frequency = config.angular_frequency,
            damping_ratio = config.damping_ratio,
            equilibrium = config.equilibrium,
            "solved spring"
        );
        Ok(Self { config, regime })
    }

    /// Resolve `partial` against the library defaults, then solve.
    pub fn from_partial(partial: &PartialSpringConfig) -> Result<Self> {
        Self::new(partial.resolve())
    }

    /// Identity spring holding the initial state of `config` forever.
    pub(crate) fn at_rest(config: SpringConfig) -> Self {
        Self {
            config,
            regime: Regime::Identity,
        }
    }

    pub fn config(&self) -> &SpringConfig {
        &self.config
    }

    pub fn regime(&self) -> Regime {
        self.regime
    }

    /// Caller time mapped onto the dimensionless axis of the closed forms.
    #[inline]
    pub fn normalized_time(&self, t: f64) -> f64 {
        normalize(t, self.config.time_scale, self.config.time_start)
    }

    /// Snapped state at caller time `t`.
    pub fn evaluate(&self, t: f64) -> SpringState {
        match self.regime {
            Regime::Identity => self.config.state(),
            _ => snap_state(self.raw_state(self.normalized_time(t)), &self.config),
        }
    }

    pub fn position(&self, t: f64) -> f64 {
        self.evaluate(t).position
    }

    pub fn velocity(&self, t: f64) -> f64 {
        self.evaluate(t).velocity
    }

    /// `true` when the state at `t` is within precision of equilibrium.
    /// Identity springs are always stable.
    pub fn stable(&self, t: f64) -> bool {
        match self.regime {
            Regime::Identity => true,
            _ => is_stable(self.evaluate(t), &self.config),
        }
    }

    /// Unsnapped closed form at normalized time `nt`.
    fn raw_state(&self, nt: f64) -> SpringState {
        let SpringConfig {
            position,
            velocity,
            equilibrium,
            angular_frequency: w,
            ..
        } = self.config;
        let delta = position - equilibrium;

        match self.regime {
            Regime::Identity => SpringState::new(position, velocity),
            Regime::OverDamped { z1, z2, inv_two_zb: d } => {
                let e1 = (z1 * nt).exp();
                let e2 = (z2 * nt).exp();
                let pos = equilibrium
                    + delta * (e1 * d * z2 - z2 * e2 * d + e2)
                    + velocity * (-e1 * d + e2 * d);
                let vel = delta * ((z1 * e1 * d - z2 * e2 * d + e2) * z2)
                    + velocity * (-z1 * e1 * d + z2 * e2 * d);
                SpringState::new(pos, vel)
            }
            Regime::UnderDamped { omega_zeta, alpha } => {
                let exp = (-omega_zeta * nt).exp();
                let (sin, cos) = (alpha * nt).sin_cos();
                let pos = equilibrium
                    + delta * (exp * cos + exp * omega_zeta * sin / alpha)
                    + velocity * exp * sin / alpha;
                let vel = delta * (-exp * sin * alpha - omega_zeta * exp * omega_zeta * sin / alpha)
                    + velocity * (exp * cos - exp * omega_zeta * sin / alpha);
                SpringState::new(pos, vel)
            }
            Regime::CriticallyDamped => {
                let exp = (-w * nt).exp();
                let time_exp = nt * exp;
                let pos = delta * (nt * w * exp + exp) + velocity * time_exp + equilibrium;
                let vel = delta * (-w * nt * w * exp) + velocity * (-nt * w * exp + exp);
                SpringState::new(pos, vel)
            }
        }
    }
}

impl SpringFn for Spring {
    fn evaluate(&self, t: f64) -> SpringState {
        Self::evaluate(self, t)
    }

    fn stable(&self, t: f64) -> bool {
        Self::stable(self, t)
    }
}

impl TryFrom<SpringConfig> for Spring {
    type Error = SpringError;

    fn try_from(config: SpringConfig) -> Result<Self> {
        Self::new(config)
    }
}

impl TryFrom<&PartialSpringConfig> for Spring {
    type Error = SpringError;

    fn try_from(partial: &PartialSpringConfig) -> Result<Self> {
        Self::from_partial(partial)
    }
}
