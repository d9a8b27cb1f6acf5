//! Fitness computed by rating the prompt text itself.

use super::rating::{parse_rating, render_rating_instruction};
use crate::error::{EvolutionError, Result};
use crate::evolution::FitnessStrategy;
use crate::llm::TextGenerator;
use crate::prompt::Prompt;
use rand::Rng;

/// Configuration for [`DirectRatingFitness`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DirectRatingFitnessConfig {
    /// Rules the prompt is rated against.
    pub rules: Vec<String>,

    /// Top of the rating scale `1..=rating_notation`.
    pub rating_notation: u32,
}

impl DirectRatingFitnessConfig {
    /// Creates a config with the given rules and scale.
    pub fn new<I, S>(rules: I, rating_notation: u32) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rules: rules.into_iter().map(Into::into).collect(),
            rating_notation,
        }
    }
}

/// Scores a prompt with a single rater call, without a student.
///
/// An unparsable rating leaves the prompt unscored (`None`).
#[derive(Debug, Clone)]
pub struct DirectRatingFitness<G> {
    rater: G,
}

impl<G: TextGenerator> DirectRatingFitness<G> {
    /// Wraps the rater.
    pub fn new(rater: G) -> Self {
        Self { rater }
    }
}

impl<G: TextGenerator> FitnessStrategy for DirectRatingFitness<G> {
    type Config = DirectRatingFitnessConfig;

    fn validate(&self, config: &DirectRatingFitnessConfig) -> Result<()> {
        if config.rating_notation == 0 {
            return Err(EvolutionError::Configuration(
                "rating_notation must be positive".into(),
            ));
        }
        Ok(())
    }

    fn fitness<R: Rng>(
        &self,
        config: &DirectRatingFitnessConfig,
        prompt: &Prompt,
        _rng: &mut R,
    ) -> Result<Option<f64>> {
        let instruction =
            render_rating_instruction(&config.rules, "prompt", prompt, config.rating_notation);
        let reply = self
            .rater
            .generate(&instruction)
            .map_err(|e| EvolutionError::collaborator("rating", e))?;

        let score = parse_rating(&reply);
        if score.is_none() {
            log::warn!("Unparsable rating {reply:?}, leaving prompt unscored");
        }
        Ok(score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BoxError;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_rates_prompt_text() {
        let rater = |instruction: &str| -> std::result::Result<String, BoxError> {
            assert!(instruction.contains("`Summarize the text`"));
            Ok(" 8 ".to_string())
        };
        let fitness = DirectRatingFitness::new(rater);
        let mut rng = StdRng::seed_from_u64(42);

        let score = fitness
            .fitness(
                &DirectRatingFitnessConfig::new(["be clear"], 10),
                &Prompt::from("Summarize the text"),
                &mut rng,
            )
            .unwrap();
        assert_eq!(score, Some(8.0));
    }

    #[test]
    fn test_unparsable_is_absent() {
        let rater = |_: &str| -> std::result::Result<String, BoxError> { Ok("excellent".into()) };
        let fitness = DirectRatingFitness::new(rater);
        let mut rng = StdRng::seed_from_u64(42);

        let score = fitness
            .fitness(
                &DirectRatingFitnessConfig::new(["r"], 10),
                &Prompt::from("p"),
                &mut rng,
            )
            .unwrap();
        assert_eq!(score, None);
    }

    #[test]
    fn test_zero_notation_rejected() {
        let rater = |_: &str| -> std::result::Result<String, BoxError> { Ok("1".into()) };
        let fitness = DirectRatingFitness::new(rater);
        let config = DirectRatingFitnessConfig::new(Vec::<String>::new(), 0);
        assert!(fitness.validate(&config).unwrap_err().is_configuration());
    }
}
