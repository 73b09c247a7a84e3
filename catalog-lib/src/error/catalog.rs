//! Crate-level error type

use super::ApiError;

/// Errors surfaced by page aggregation, value resolution and the catalog state.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An upstream request failed.
    #[error("Upstream error: {0}")]
    Upstream(#[from] ApiError),

    /// The aggregation completed but the filtered set is empty.
    #[error("No results found")]
    NoResults,

    /// A caller passed a page index or page size outside the contract.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    /// Creates a new invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Returns `true` if this is the empty-result condition.
    pub fn is_no_results(&self) -> bool {
        matches!(self, Self::NoResults)
    }

    /// Returns the underlying API error, if any.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Upstream(e) => Some(e),
            _ => None,
        }
    }

    /// Message shown to the user.
    ///
    /// Upstream failures and empty results share the same wording; match on
    /// the variant when the distinction matters.
    pub fn user_message(&self) -> String {
        match self {
            Self::Upstream(_) | Self::NoResults => {
                "No results found or the API is unavailable".to_string()
            }
            Self::InvalidArgument(message) => message.clone(),
        }
    }
}
