//! Evolutionary optimization of natural-language prompts.
//!
//! Maintains a population of candidate prompts, scores each with a
//! pluggable fitness criterion, keeps the best with a pluggable ranking
//! policy and refills the population with a pluggable mutation operator,
//! for a fixed number of generations.
//!
//! - **Evolution**: the generic loop ([`EvolutionRunner`]) and the three
//!   strategy contracts it composes.
//! - **Mutation**: rule-guided rewriting with probabilistic technique hints.
//! - **Fitness**: student-mediated and direct rating, with graceful
//!   degradation on unparsable ratings.
//! - **Ranking**: stable truncation selection.
//!
//! # Architecture
//!
//! The crate performs no I/O. Every call to a language model goes through
//! the [`llm::TextGenerator`] and [`llm::Student`] traits, implemented by
//! the caller (closures work). Failures from those collaborators halt the
//! run and reach the caller unchanged as the error source.
//!
//! # Example
//!
//! ```
//! use u_promptevo::prelude::*;
//!
//! let writer = |_: &str| -> Result<String, BoxError> { Ok("Answer in JSON.".into()) };
//! let rater = |_: &str| -> Result<String, BoxError> { Ok("7".into()) };
//! let student = |p: &Prompt, q: &str| -> Result<String, BoxError> { Ok(format!("{p} {q}")) };
//!
//! let runner = EvolutionRunner::new(
//!     RuleBasedMutation::new(writer),
//!     RuleBasedFitness::new(rater, student),
//!     TopNRanking,
//!     RuleBasedMutationConfig::new(["It must be in english"]),
//!     RuleBasedFitnessConfig::new(["The JSON must be valid"], 10, ["Pass the salt?"], 2)?,
//!     TopNRankingConfig::new(2),
//!     EvolutionConfig::new(["Extract the concepts."])
//!         .with_population_size(4)
//!         .with_iterations(2)
//!         .with_seed(42),
//! );
//!
//! for generation in runner.run()? {
//!     let generation = generation?;
//!     assert_eq!(generation.survivors.len(), 2);
//! }
//! # Ok::<(), u_promptevo::EvolutionError>(())
//! ```

pub mod error;
pub mod evolution;
pub mod fitness;
pub mod llm;
pub mod mutation;
pub mod prompt;
pub mod ranking;

pub use error::{BoxError, EvolutionError, Result};
pub use evolution::{EvolutionConfig, EvolutionRunner, Generation};
pub use prompt::{Population, Prompt, ScoredPrompt};

/// Common imports.
pub mod prelude {
    pub use crate::error::{BoxError, EvolutionError};
    pub use crate::evolution::{
        EvolutionConfig, EvolutionObserver, EvolutionRunner, FitnessStrategy, Generation,
        LogObserver, MutationStrategy, ParentSource, RankingStrategy,
    };
    pub use crate::fitness::{
        DirectRatingFitness, DirectRatingFitnessConfig, RuleBasedFitness, RuleBasedFitnessConfig,
    };
    pub use crate::llm::{Student, TextGenerator};
    pub use crate::mutation::{default_techniques, RuleBasedMutation, RuleBasedMutationConfig, Technique};
    pub use crate::prompt::{Prompt, ScoredPrompt};
    pub use crate::ranking::{TopNRanking, TopNRankingConfig};
}
