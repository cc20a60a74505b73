use thiserror::Error;

#[derive(Error, Debug)]
pub enum ComparisonError {
    #[error("invalid input: {message}")]
    InvalidInput {
        message: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("upstream fetch failure: {message}")]
    UpstreamFetchFailure {
        message: String,
    },

    #[error("no borrower data available")]
    NoData,

    #[error("calculation error: {message}")]
    Calculation {
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, ComparisonError>;

impl ComparisonError {
    /// non-fatal at the recompute boundary: the engine keeps its
    /// last-known-good snapshot and surfaces a notice instead of failing
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ComparisonError::UpstreamFetchFailure { .. } | ComparisonError::NoData
        )
    }
}
