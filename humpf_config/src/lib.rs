#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Timeline schema for spring animations, deserialized from TOML.
//!
//! - `Config` and sub-structs are deserialized from TOML and validated.
//! - Types here are plain data; `humpf_core` converts them into resolvable
//!   spring configs and a `SpringSequence`.
use std::path::Path;

use eyre::WrapErr;
use serde::Deserialize;

/// Named parameter sets for `{angular_frequency, damping_ratio}`.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PresetName {
    Basic,
    Gentle,
    Wobbly,
    Stiff,
    Slow,
}

/// Partial spring parameters. Every field is optional; unset fields fall back
/// to the composer defaults and then to the library defaults.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq)]
#[serde(default)]
pub struct SpringCfg {
    /// Preset applied underneath the explicit fields of this table.
    pub preset: Option<PresetName>,
    pub position: Option<f64>,
    pub velocity: Option<f64>,
    pub equilibrium: Option<f64>,
    pub angular_frequency: Option<f64>,
    pub damping_ratio: Option<f64>,
    /// Offset (caller time units) added to the step time.
    pub time_start: Option<f64>,
    pub position_precision: Option<f64>,
    pub velocity_precision: Option<f64>,
    pub damping_ratio_precision: Option<f64>,
}

/// Timeline operation used to apply a step.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StepOp {
    /// Insert in time order (replacing a step at the same time).
    #[default]
    Insert,
    /// Drop every step at or after `time`, then insert.
    ReplaceTail,
    /// Drop the whole timeline, then insert.
    ReplaceAll,
    /// Let the value coast to rest from its state at `time`.
    Decay,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct StepCfg {
    /// Step start time in caller units (milliseconds with the default scale).
    pub time: f64,
    #[serde(default)]
    pub op: StepOp,
    #[serde(flatten)]
    pub spring: SpringCfg,
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq)]
#[serde(default)]
pub struct TimelineCfg {
    /// Caller time units per full cycle at unit angular frequency.
    /// Absent means the library default (1000, i.e. milliseconds).
    pub time_scale: Option<f64>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Logging {
    /// "error" | "warn" | "info" | "debug" | "trace"
    pub level: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub timeline: TimelineCfg,
    /// Config merged under every step.
    #[serde(default)]
    pub defaults: SpringCfg,
    /// State used before the first step.
    #[serde(default)]
    pub initial: SpringCfg,
    #[serde(default, rename = "step")]
    pub steps: Vec<StepCfg>,
    #[serde(default)]
    pub logging: Logging,
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

/// Read, parse and validate a timeline file.
pub fn load_file(path: &Path) -> eyre::Result<Config> {
    let text = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("read timeline config {}", path.display()))?;
    let cfg = load_toml(&text)
        .wrap_err_with(|| format!("parse timeline config {}", path.display()))?;
    cfg.validate()
        .wrap_err_with(|| format!("invalid timeline config {}", path.display()))?;
    Ok(cfg)
}

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

impl SpringCfg {
    /// Validate field ranges; `table` names the section in error messages.
    pub fn validate(&self, table: &str) -> eyre::Result<()> {
        let finite = [
            ("position", self.position),
            ("velocity", self.velocity),
            ("equilibrium", self.equilibrium),
            ("time_start", self.time_start),
        ];
        for (name, value) in finite {
            if let Some(v) = value
                && !v.is_finite()
            {
                eyre::bail!("{table}.{name} must be finite");
            }
        }
        if let Some(w) = self.angular_frequency
            && !(w >= 0.0 && w.is_finite())
        {
            eyre::bail!("{table}.angular_frequency must be finite and >= 0");
        }
        if let Some(z) = self.damping_ratio
            && !(z >= 0.0 && z.is_finite())
        {
            eyre::bail!("{table}.damping_ratio must be finite and >= 0");
        }
        let precisions = [
            ("position_precision", self.position_precision),
            ("velocity_precision", self.velocity_precision),
            ("damping_ratio_precision", self.damping_ratio_precision),
        ];
        for (name, value) in precisions {
            if let Some(p) = value
                && !(p > 0.0 && p.is_finite())
            {
                eyre::bail!("{table}.{name} must be finite and > 0");
            }
        }
        Ok(())
    }
}

impl Config {
    pub fn validate(&self) -> eyre::Result<()> {
        // Timeline
        if let Some(scale) = self.timeline.time_scale
            && !(scale.is_finite() && scale != 0.0)
        {
            eyre::bail!("timeline.time_scale must be finite and non-zero");
        }

        // Spring tables
        self.defaults.validate("defaults")?;
        self.initial.validate("initial")?;
        for (idx, step) in self.steps.iter().enumerate() {
            if !step.time.is_finite() {
                eyre::bail!("step[{idx}].time must be finite");
            }
            step.spring.validate(&format!("step[{idx}]"))?;
        }

        // Logging
        if let Some(level) = self.logging.level.as_deref()
            && !LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str())
        {
            eyre::bail!("logging.level must be one of error|warn|info|debug|trace, got {level:?}");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_valid() {
        let cfg = load_toml("").expect("parse empty TOML");
        cfg.validate().expect("empty config is valid");
        assert!(cfg.steps.is_empty());
        assert_eq!(cfg.timeline.time_scale, None);
    }

    #[test]
    fn step_fields_are_flattened() {
        let cfg = load_toml(
            r#"
[[step]]
time = 250.0
op = "replace_tail"
equilibrium = 40.0
preset = "stiff"
"#,
        )
        .expect("parse TOML");
        let step = cfg.steps[0];
        assert_eq!(step.time, 250.0);
        assert_eq!(step.op, StepOp::ReplaceTail);
        assert_eq!(step.spring.equilibrium, Some(40.0));
        assert_eq!(step.spring.preset, Some(PresetName::Stiff));
    }
}
