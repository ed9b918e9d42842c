use thiserror::Error;

/// Errors surfaced by the chart and insight calculations.
///
/// Every operation is a pure function of its inputs, so neither variant is
/// worth retrying: the caller maps them onto its own status codes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BaziError {
    /// Malformed date-time, unknown timezone, symbol outside its alphabet,
    /// or an out-of-range configuration value.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// A lookup table or derived structure broke one of its invariants.
    #[error("Internal consistency violation: {0}")]
    InternalConsistency(String),
}

impl BaziError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        BaziError::InvalidInput(message.into())
    }

    pub(crate) fn inconsistent(message: impl Into<String>) -> Self {
        BaziError::InternalConsistency(message.into())
    }
}

pub type Result<T> = std::result::Result<T, BaziError>;
