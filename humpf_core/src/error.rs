use thiserror::Error;

/// Validation errors raised while solving a spring configuration.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum SpringError {
    #[error("damping ratio must be >= 0 (received: {received})")]
    InvalidDampingRatio { received: f64 },
    #[error("angular frequency must be >= 0 (received: {received})")]
    InvalidAngularFrequency { received: f64 },
}

impl SpringError {
    /// The offending value carried by the error.
    pub fn received(&self) -> f64 {
        match self {
            Self::InvalidDampingRatio { received } | Self::InvalidAngularFrequency { received } => {
                *received
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, SpringError>;
