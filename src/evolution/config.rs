//! Evolution configuration.
//!
//! [`EvolutionConfig`] holds the parameters the runner itself owns. The
//! three strategy configs are separate values handed to
//! [`EvolutionRunner::new`](super::EvolutionRunner::new).

use crate::error::{EvolutionError, Result};
use crate::prompt::Prompt;

/// Which prompts are handed to mutation during replenishment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParentSource {
    /// Mutate from the ranked survivors only.
    #[default]
    Survivors,

    /// Mutate from the whole population as it was before ranking.
    Population,
}

/// Configuration for the evolution loop.
///
/// # Builder Pattern
///
/// ```
/// use u_promptevo::EvolutionConfig;
///
/// let config = EvolutionConfig::new(["Extract the concepts as a JSON list"])
///     .with_population_size(10)
///     .with_iterations(5)
///     .with_seed(42);
///
/// assert_eq!(config.seed_prompts.len(), 1);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvolutionConfig {
    /// Number of prompts in the population after bootstrap.
    pub population_size: usize,

    /// Number of generations to run. `0` bootstraps and emits nothing.
    pub iterations: usize,

    /// Initial prompts, copied verbatim into the population.
    ///
    /// Must be non-empty and no longer than `population_size`.
    pub seed_prompts: Vec<Prompt>,

    /// Parent set used for replenishment.
    pub parent_source: ParentSource,

    /// Whether to evaluate and replenish in parallel using rayon.
    ///
    /// Only honored when the `parallel` feature is enabled.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 10,
            iterations: 5,
            seed_prompts: Vec::new(),
            parent_source: ParentSource::default(),
            parallel: false,
            seed: None,
        }
    }
}

impl EvolutionConfig {
    /// Creates a default configuration with the given seed prompts.
    pub fn new<I, P>(seed_prompts: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Prompt>,
    {
        Self {
            seed_prompts: seed_prompts.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_iterations(mut self, n: usize) -> Self {
        self.iterations = n;
        self
    }

    /// Replaces the seed prompts.
    pub fn with_seed_prompts<I, P>(mut self, prompts: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Prompt>,
    {
        self.seed_prompts = prompts.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the replenishment parent source.
    pub fn with_parent_source(mut self, source: ParentSource) -> Self {
        self.parent_source = source;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration on its own.
    ///
    /// The runner additionally checks the ranking's survivor count via
    /// [`validate_survivors`](Self::validate_survivors).
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(EvolutionError::Configuration(
                "population_size must be positive".into(),
            ));
        }
        if self.seed_prompts.is_empty() {
            return Err(EvolutionError::Configuration(
                "at least one seed prompt is required".into(),
            ));
        }
        if self.seed_prompts.len() > self.population_size {
            return Err(EvolutionError::Configuration(format!(
                "seed prompt count ({}) is greater than population size ({})",
                self.seed_prompts.len(),
                self.population_size
            )));
        }
        Ok(())
    }

    /// Checks that `top_n` is at least 1 and fits in the population.
    pub fn validate_survivors(&self, top_n: usize) -> Result<()> {
        if top_n == 0 {
            return Err(EvolutionError::Configuration(
                "top_n must be at least 1".into(),
            ));
        }
        if top_n > self.population_size {
            return Err(EvolutionError::Configuration(format!(
                "top_n ({top_n}) is greater than population size ({})",
                self.population_size
            )));
        }
        Ok(())
    }
}
