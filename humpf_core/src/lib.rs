#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Closed-form damped springs for animation.
//!
//! A spring is solved once from its configuration and can then be sampled
//! at any time `t` without stepping a simulation.
//!
//! ## Architecture
//!
//! - **Configuration**: `SpringConfig` and the `PartialSpringConfig` overlay (`config`)
//! - **Presets**: named parameter sets, decay and rest helpers (`presets`)
//! - **Solver**: regime classification and closed forms (`spring`)
//! - **Time and precision**: normalization and grid snapping (`time`, `precision`)
//! - **Sequence**: piecewise timelines of springs (`sequence`)
//! - **Value**: a clock-driven live spring (`value`)
//!
//! ## Time
//!
//! Caller time is scaled so that `time_scale` units make one full cycle
//! (2π) at unit angular frequency. With the default of 1000, times are
//! milliseconds.

pub mod config;
pub mod conversions;
pub mod error;
pub mod precision;
pub mod presets;
pub mod sequence;
pub mod spring;
pub mod time;
pub mod value;

pub use config::{DEFAULT_PRECISION, DEFAULT_TIME_SCALE, PartialSpringConfig, SpringConfig};
pub use conversions::load_sequence;
pub use error::{Result, SpringError};
pub use presets::Preset;
pub use sequence::{SequenceStep, SpringSequence, SpringSequenceBuilder};
pub use spring::{Regime, Spring, solve};
pub use value::{SpringValue, SpringValueOptions};

pub use humpf_traits::{Clock, ManualClock, MonotonicClock, SpringFn, SpringState};
