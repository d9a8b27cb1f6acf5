//! Strategy contracts for the evolution engine.
//!
//! [`MutationStrategy`], [`FitnessStrategy`] and
//! [`RankingStrategy`] define the contract between the generic
//! [`EvolutionRunner`](super::EvolutionRunner) and concrete strategies.
//! Each carries an associated `Config` type. The runner holds one config
//! value per strategy and passes it by reference into every call without
//! looking inside it.

use crate::error::Result;
use crate::prompt::{Prompt, ScoredPrompt};
use rand::Rng;

/// Produces one new prompt from a set of parents.
///
/// `parents` holds the seed prompts during bootstrap and the survivors
/// (or the whole pre-ranking population, see
/// [`ParentSource`](super::ParentSource)) during replenishment, so
/// implementations must accept anything from a single parent upward.
///
/// # Thread Safety
///
/// `MutationStrategy` must be `Send + Sync` because the runner may call
/// it from several rayon workers during replenishment.
///
/// # Implementing
///
/// ```ignore
/// struct Concat;
///
/// impl MutationStrategy for Concat {
///     type Config = String;
///
///     fn mutate<R: Rng>(&self, sep: &String, parents: &[Prompt], _rng: &mut R) -> Result<Prompt> {
///         let texts: Vec<&str> = parents.iter().map(|p| p.as_str()).collect();
///         Ok(Prompt::new(texts.join(sep)))
///     }
/// }
/// ```
pub trait MutationStrategy: Send + Sync {
    /// Strategy-specific configuration.
    type Config: Send + Sync;

    /// Checks `config` before a run starts. Defaults to accepting it.
    fn validate(&self, _config: &Self::Config) -> Result<()> {
        Ok(())
    }

    /// Creates a new prompt from `parents`.
    ///
    /// Collaborator failures must be returned, not swallowed.
    fn mutate<R: Rng>(
        &self,
        config: &Self::Config,
        parents: &[Prompt],
        rng: &mut R,
    ) -> Result<Prompt>;
}

/// Scores a single prompt. Higher is better.
///
/// Returning `Ok(None)` means the score could not be computed; the prompt
/// then ranks last. Evaluations are independent of each other, which lets
/// the runner fan them out across threads.
pub trait FitnessStrategy: Send + Sync {
    /// Strategy-specific configuration.
    type Config: Send + Sync;

    /// Checks `config` before a run starts. Defaults to accepting it.
    fn validate(&self, _config: &Self::Config) -> Result<()> {
        Ok(())
    }

    /// Computes the fitness of `prompt`.
    fn fitness<R: Rng>(
        &self,
        config: &Self::Config,
        prompt: &Prompt,
        rng: &mut R,
    ) -> Result<Option<f64>>;
}

/// Selects and orders the survivors of a generation.
pub trait RankingStrategy: Send + Sync {
    /// Strategy-specific configuration.
    type Config: Send + Sync;

    /// Maximum number of survivors [`rank`](RankingStrategy::rank) returns.
    ///
    /// The runner uses this to validate the configuration and to size
    /// replenishment.
    fn survivor_count(&self, config: &Self::Config) -> usize;

    /// Orders `scored` best first and returns at most
    /// [`survivor_count`](RankingStrategy::survivor_count) prompts.
    fn rank(&self, config: &Self::Config, scored: Vec<ScoredPrompt>) -> Vec<Prompt>;
}
