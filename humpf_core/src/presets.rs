//! Named parameter sets and derived configurations.

use std::fmt;
use std::str::FromStr;

use crate::config::{PartialSpringConfig, SpringConfig};

/// Named `{angular_frequency, damping_ratio}` pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    Basic,
    Gentle,
    Wobbly,
    Stiff,
    Slow,
}

impl Preset {
    pub const ALL: [Self; 5] = [
        Self::Basic,
        Self::Gentle,
        Self::Wobbly,
        Self::Stiff,
        Self::Slow,
    ];

    /// `(angular_frequency, damping_ratio)`
    pub const fn parameters(self) -> (f64, f64) {
        match self {
            Self::Basic => (1.0, 1.0),
            Self::Gentle => (0.6, 0.6),
            Self::Wobbly => (0.8, 0.4),
            Self::Stiff => (1.1, 0.7),
            Self::Slow => (0.5, 1.0),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Gentle => "gentle",
            Self::Wobbly => "wobbly",
            Self::Stiff => "stiff",
            Self::Slow => "slow",
        }
    }

    /// The preset alone, as an overlay.
    pub fn overlay(self) -> PartialSpringConfig {
        let (w, z) = self.parameters();
        PartialSpringConfig::new()
            .with_angular_frequency(w)
            .with_damping_ratio(z)
    }

    /// The preset merged under `partial`: fields the caller sets win.
    pub fn apply(self, partial: &PartialSpringConfig) -> PartialSpringConfig {
        self.overlay().merge(partial)
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown preset {0:?} (expected basic|gentle|wobbly|stiff|slow)")]
pub struct UnknownPreset(pub String);

impl FromStr for Preset {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownPreset(s.to_string()))
    }
}

pub fn basic(partial: &PartialSpringConfig) -> PartialSpringConfig {
    Preset::Basic.apply(partial)
}

pub fn gentle(partial: &PartialSpringConfig) -> PartialSpringConfig {
    Preset::Gentle.apply(partial)
}

pub fn wobbly(partial: &PartialSpringConfig) -> PartialSpringConfig {
    Preset::Wobbly.apply(partial)
}

pub fn stiff(partial: &PartialSpringConfig) -> PartialSpringConfig {
    Preset::Stiff.apply(partial)
}

pub fn slow(partial: &PartialSpringConfig) -> PartialSpringConfig {
    Preset::Slow.apply(partial)
}

/// Coast to rest: critical damping towards the point a critically damped
/// spring reaches from the given position and velocity.
///
/// Unset position, velocity and angular frequency come from the library
/// defaults.
pub fn decay(partial: &PartialSpringConfig) -> PartialSpringConfig {
    decay_with(partial, &SpringConfig::default())
}

/// Like [`decay`], resolving unset fields against `base`.
pub fn decay_with(partial: &PartialSpringConfig, base: &SpringConfig) -> PartialSpringConfig {
    let resolved = partial.resolve_with(base);
    let equilibrium =
        resolved.position + find_equilibrium(resolved.velocity, resolved.angular_frequency);
    partial
        .with_damping_ratio(1.0)
        .with_equilibrium(equilibrium)
}

/// A spring already at rest at `equilibrium`. Position, velocity and
/// equilibrium override whatever `partial` carries.
pub fn stable(equilibrium: f64, partial: &PartialSpringConfig) -> PartialSpringConfig {
    partial
        .with_position(equilibrium)
        .with_velocity(0.0)
        .with_equilibrium(equilibrium)
}

/// Distance travelled by a critically damped spring launched with `velocity`.
pub fn find_equilibrium(velocity: f64, angular_frequency: f64) -> f64 {
    velocity / angular_frequency
}

/// ω for a mass on a spring with constant `spring_constant` (use 1.0 for unit stiffness).
pub fn angular_frequency_from_mass(mass: f64, spring_constant: f64) -> f64 {
    (spring_constant / mass).sqrt()
}

/// ω for a spring with constant `spring_constant` carrying `mass` (use 1.0 for unit mass).
pub fn angular_frequency_from_spring_constant(spring_constant: f64, mass: f64) -> f64 {
    (spring_constant / mass).sqrt()
}
