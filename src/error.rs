//! Error taxonomy for paper generation.
//!
//! Single source of truth for everything that can go wrong between input
//! validation and the final assembled document.

use thiserror::Error;

/// Errors surfaced by validation, the dispatcher, and the orchestrator
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Input failed validation before any network call was attempted
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The generation service reported quota exhaustion; never retried
    #[error("generation service quota exhausted; try again later")]
    QuotaExceeded,

    /// The local request budget was already spent before issuing
    #[error("daily limit of {limit} requests reached")]
    DailyLimitReached { limit: u32 },

    /// Every retry attempt for one request failed
    #[error("request failed after {attempts} attempts: {source}")]
    RetryExhausted {
        attempts: u32,
        #[source]
        source: Box<GenerationError>,
    },

    /// A section's dispatch failed, aborting the whole paper
    #[error("section '{section}' failed to generate: {source}")]
    SectionFailed {
        section: &'static str,
        #[source]
        source: Box<GenerationError>,
    },

    /// The generation service rejected the request or returned garbage
    #[error("generation service error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Transport-level failure talking to the generation service
    #[error("transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// Task or runtime plumbing failure
    #[error("internal error: {0}")]
    Internal(String),
}

impl GenerationError {
    /// Quota errors short-circuit retry loops and in-flight chunk work
    pub const fn is_quota(&self) -> bool {
        matches!(self, Self::QuotaExceeded)
    }
}
