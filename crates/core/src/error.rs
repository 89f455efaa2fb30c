use thiserror::Error;

/// Errors surfaced by the matching core.
///
/// Degenerate input (empty text, empty skill sets, no targets) is never an error;
/// it produces zero scores or empty results instead.
#[derive(Debug, Error)]
pub enum MatchError {
    /// A process-wide resource (vocabulary, pipeline tables) is missing or corrupt.
    #[error("Failed to initialize {resource}: {reason}")]
    Initialization {
        resource: &'static str,
        reason: String,
    },

    #[error("Invalid top_k {0}: must be zero or positive")]
    InvalidTopK(i64),
}

impl MatchError {
    pub(crate) fn init(resource: &'static str, reason: impl Into<String>) -> Self {
        MatchError::Initialization {
            resource,
            reason: reason.into(),
        }
    }
}

pub type Result<T, E = MatchError> = std::result::Result<T, E>;
