//! Error types for prompt evolution.
//!
//! Three kinds of failure exist:
//!
//! - **Configuration**: detected by validation before any strategy is called.
//! - **Strategy**: a strategy rejected the inputs it was handed.
//! - **Collaborator**: an injected text-generation or student callable
//!   failed. The original error is kept as the `source` and the run halts.
//!
//! Unparsable fitness ratings are not errors; they degrade to a minimum
//! score inside the fitness strategy.

use thiserror::Error;

/// Boxed error returned by injected collaborators.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error type for evolution runs and strategies.
#[derive(Debug, Error)]
pub enum EvolutionError {
    /// Invalid configuration, raised before any work begins.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A strategy could not operate on its inputs.
    #[error("Strategy error: {0}")]
    Strategy(String),

    /// An injected collaborator failed during `stage`.
    #[error("Collaborator failed during {stage}: {source}")]
    Collaborator {
        stage: &'static str,
        #[source]
        source: BoxError,
    },
}

impl EvolutionError {
    /// Wraps a collaborator failure, keeping the original error as source.
    pub fn collaborator(stage: &'static str, source: BoxError) -> Self {
        EvolutionError::Collaborator { stage, source }
    }

    /// Returns `true` for configuration errors.
    pub fn is_configuration(&self) -> bool {
        matches!(self, EvolutionError::Configuration(_))
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EvolutionError>;
