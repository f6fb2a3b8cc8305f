//! Bridges from `humpf_config` types to core types.

use std::path::Path;

use eyre::WrapErr;
use humpf_config::{PresetName, SpringCfg, StepOp};

use crate::config::PartialSpringConfig;
use crate::error::SpringError;
use crate::presets::Preset;
use crate::sequence::SpringSequence;

// ── Preset ───────────────────────────────────────────────────────────────────

impl From<PresetName> for Preset {
    fn from(name: PresetName) -> Self {
        match name {
            PresetName::Basic => Self::Basic,
            PresetName::Gentle => Self::Gentle,
            PresetName::Wobbly => Self::Wobbly,
            PresetName::Stiff => Self::Stiff,
            PresetName::Slow => Self::Slow,
        }
    }
}

// ── PartialSpringConfig ──────────────────────────────────────────────────────

/// The table's preset, if any, sits under its explicit fields.
impl From<&SpringCfg> for PartialSpringConfig {
    fn from(c: &SpringCfg) -> Self {
        let explicit = Self {
            position: c.position,
            velocity: c.velocity,
            equilibrium: c.equilibrium,
            angular_frequency: c.angular_frequency,
            damping_ratio: c.damping_ratio,
            time_scale: None,
            time_start: c.time_start,
            position_precision: c.position_precision,
            velocity_precision: c.velocity_precision,
            damping_ratio_precision: c.damping_ratio_precision,
        };
        match c.preset {
            Some(name) => Preset::from(name).apply(&explicit),
            None => explicit,
        }
    }
}

// ── SpringSequence ───────────────────────────────────────────────────────────

impl TryFrom<&humpf_config::Config> for SpringSequence {
    type Error = SpringError;

    /// Build the timeline, applying `[[step]]` entries in file order.
    fn try_from(cfg: &humpf_config::Config) -> Result<Self, Self::Error> {
        let mut builder = Self::builder()
            .with_default_config(&cfg.defaults)
            .with_initial(&cfg.initial);
        if let Some(scale) = cfg.timeline.time_scale {
            builder = builder.with_time_scale(scale);
        }
        let mut seq = builder.build()?;
        for step in &cfg.steps {
            let config = PartialSpringConfig::from(&step.spring);
            match step.op {
                StepOp::Insert => seq.insert_at(step.time, config)?,
                StepOp::ReplaceTail => seq.replace_tail(step.time, config)?,
                StepOp::ReplaceAll => seq.replace_all(step.time, config)?,
                StepOp::Decay => seq.decay(step.time, config)?,
            };
        }
        Ok(seq)
    }
}

/// Load, validate and build a timeline from a TOML file.
pub fn load_sequence(path: &Path) -> eyre::Result<SpringSequence> {
    let cfg = humpf_config::load_file(path)?;
    SpringSequence::try_from(&cfg)
        .wrap_err_with(|| format!("build timeline from {}", path.display()))
}
