//! Student-mediated fitness rated by a text generator.

use super::rating::{parse_rating, render_rating_instruction};
use crate::error::{EvolutionError, Result};
use crate::evolution::FitnessStrategy;
use crate::llm::{Student, TextGenerator};
use crate::prompt::Prompt;
use rand::Rng;

/// Configuration for [`RuleBasedFitness`].
///
/// # Examples
///
/// ```
/// use u_promptevo::fitness::RuleBasedFitnessConfig;
///
/// let config = RuleBasedFitnessConfig::new(
///     ["The JSON must be valid"],
///     10,
///     ["Could you please pass me the salt?"],
///     3,
/// )
/// .unwrap();
/// assert_eq!(config.example_amount, 3);
///
/// assert!(RuleBasedFitnessConfig::new(["rule"], 10, ["example"], 0).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RuleBasedFitnessConfig {
    /// Rules the student's answers are rated against.
    pub rules: Vec<String>,

    /// Top of the rating scale `1..=rating_notation`.
    pub rating_notation: u32,

    /// Held-out examples answered by the student.
    pub examples: Vec<String>,

    /// Number of examples drawn per evaluation, with replacement.
    pub example_amount: usize,
}

impl RuleBasedFitnessConfig {
    /// Creates and validates a config.
    pub fn new<R, RS, E, ES>(
        rules: R,
        rating_notation: u32,
        examples: E,
        example_amount: usize,
    ) -> Result<Self>
    where
        R: IntoIterator<Item = RS>,
        RS: Into<String>,
        E: IntoIterator<Item = ES>,
        ES: Into<String>,
    {
        let config = Self {
            rules: rules.into_iter().map(Into::into).collect(),
            rating_notation,
            examples: examples.into_iter().map(Into::into).collect(),
            example_amount,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.example_amount == 0 {
            return Err(EvolutionError::Configuration(
                "example_amount must be positive".into(),
            ));
        }
        if self.examples.is_empty() {
            return Err(EvolutionError::Configuration(
                "at least one example is required".into(),
            ));
        }
        if self.rating_notation == 0 {
            return Err(EvolutionError::Configuration(
                "rating_notation must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Scores a prompt by rating the answers a student gives with it.
///
/// For each of `example_amount` examples drawn uniformly with replacement,
/// the student answers the example following the prompt and the rater
/// scores that answer. A rating that does not parse as a number counts as
/// `0.0` for that example. The fitness is the mean over all examples.
#[derive(Debug, Clone)]
pub struct RuleBasedFitness<G, S> {
    rater: G,
    student: S,
}

impl<G: TextGenerator, S: Student> RuleBasedFitness<G, S> {
    /// Wraps the rater and the student.
    pub fn new(rater: G, student: S) -> Self {
        Self { rater, student }
    }

    fn rate_answer(&self, config: &RuleBasedFitnessConfig, answer: &str) -> Result<f64> {
        let instruction =
            render_rating_instruction(&config.rules, "answer", answer, config.rating_notation);
        let reply = self
            .rater
            .generate(&instruction)
            .map_err(|e| EvolutionError::collaborator("rating", e))?;

        Ok(parse_rating(&reply).unwrap_or_else(|| {
            log::warn!("Unparsable rating {reply:?}, scoring 0");
            0.0
        }))
    }
}

impl<G: TextGenerator, S: Student> FitnessStrategy for RuleBasedFitness<G, S> {
    type Config = RuleBasedFitnessConfig;

    fn validate(&self, config: &RuleBasedFitnessConfig) -> Result<()> {
        config.validate()
    }

    fn fitness<R: Rng>(
        &self,
        config: &RuleBasedFitnessConfig,
        prompt: &Prompt,
        rng: &mut R,
    ) -> Result<Option<f64>> {
        // Direct callers bypass `run()`; an empty example set would panic below.
        config.validate()?;

        let mut total = 0.0;
        for _ in 0..config.example_amount {
            let example = &config.examples[rng.random_range(0..config.examples.len())];
            let answer = self
                .student
                .answer(prompt, example)
                .map_err(|e| EvolutionError::collaborator("student", e))?;
            total += self.rate_answer(config, &answer)?;
        }

        Ok(Some(total / config.example_amount as f64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BoxError;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    type Reply = std::result::Result<String, BoxError>;

    /// Replies from a script, one entry per call.
    struct Scripted {
        replies: Mutex<VecDeque<String>>,
    }

    impl Scripted {
        fn new(replies: &[&str]) -> Self {
            Self {
                replies: Mutex::new(replies.iter().map(|r| r.to_string()).collect()),
            }
        }
    }

    impl TextGenerator for Scripted {
        fn generate(&self, _instruction: &str) -> Reply {
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| "script exhausted".into())
        }
    }

    /// Records the examples it was asked about.
    #[derive(Default)]
    struct EchoStudent {
        seen: Mutex<Vec<String>>,
    }

    impl Student for EchoStudent {
        fn answer(&self, prompt: &Prompt, example: &str) -> Reply {
            self.seen.lock().unwrap().push(example.to_string());
            Ok(format!("{prompt} -> {example}"))
        }
    }

    fn config(examples: &[&str], amount: usize) -> RuleBasedFitnessConfig {
        RuleBasedFitnessConfig::new(["rule"], 10, examples.iter().copied(), amount).unwrap()
    }

    #[test]
    fn test_averages_constant_scores() {
        let fitness = RuleBasedFitness::new(Scripted::new(&["4", "4", "4"]), EchoStudent::default());
        let mut rng = StdRng::seed_from_u64(42);

        let score = fitness
            .fitness(&config(&["q1", "q2"], 3), &Prompt::from("p"), &mut rng)
            .unwrap();
        assert_eq!(score, Some(4.0));
    }

    #[test]
    fn test_unparsable_rating_degrades_to_zero() {
        let fitness = RuleBasedFitness::new(
            Scripted::new(&["4", "not a number", "4.0"]),
            EchoStudent::default(),
        );
        let mut rng = StdRng::seed_from_u64(42);

        let score = fitness
            .fitness(&config(&["q"], 3), &Prompt::from("p"), &mut rng)
            .unwrap()
            .unwrap();
        assert!((score - 8.0 / 3.0).abs() < 1e-9, "got {score}");
    }

    #[test]
    fn test_student_sees_prompt_and_example() {
        let fitness = RuleBasedFitness::new(Scripted::new(&["1"]), EchoStudent::default());
        let mut rng = StdRng::seed_from_u64(42);

        fitness
            .fitness(&config(&["only example"], 1), &Prompt::from("p"), &mut rng)
            .unwrap();
        assert_eq!(*fitness.student.seen.lock().unwrap(), vec!["only example"]);
    }

    #[test]
    fn test_samples_with_replacement() {
        let replies = vec!["5"; 50];
        let fitness = RuleBasedFitness::new(Scripted::new(&replies), EchoStudent::default());
        let mut rng = StdRng::seed_from_u64(42);

        // Fifty draws from two examples must repeat at least one of them.
        fitness
            .fitness(&config(&["a", "b"], 50), &Prompt::from("p"), &mut rng)
            .unwrap();
        let seen = fitness.student.seen.lock().unwrap();
        assert_eq!(seen.len(), 50);
        assert!(seen.iter().any(|e| e == "a"));
        assert!(seen.iter().any(|e| e == "b"));
    }

    #[test]
    fn test_zero_example_amount_rejected() {
        let err = RuleBasedFitnessConfig::new(["rule"], 10, ["q"], 0).unwrap_err();
        assert!(err.is_configuration());

        let raw = RuleBasedFitnessConfig {
            rules: vec![],
            rating_notation: 10,
            examples: vec!["q".into()],
            example_amount: 0,
        };
        let fitness = RuleBasedFitness::new(Scripted::new(&[]), EchoStudent::default());
        assert!(fitness.validate(&raw).unwrap_err().is_configuration());
    }

    #[test]
    fn test_direct_call_with_empty_examples_is_rejected() {
        let raw = RuleBasedFitnessConfig {
            rules: vec![],
            rating_notation: 10,
            examples: vec![],
            example_amount: 2,
        };
        let fitness = RuleBasedFitness::new(Scripted::new(&[]), EchoStudent::default());
        let mut rng = StdRng::seed_from_u64(1);
        let err = fitness
            .fitness(&raw, &Prompt::from("p"), &mut rng)
            .unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_empty_examples_rejected() {
        let empty: [&str; 0] = [];
        assert!(RuleBasedFitnessConfig::new(["rule"], 10, empty, 2).is_err());
    }

    #[test]
    fn test_rater_failure_propagates() {
        let fitness = RuleBasedFitness::new(Scripted::new(&[]), EchoStudent::default());
        let mut rng = StdRng::seed_from_u64(42);

        let err = fitness
            .fitness(&config(&["q"], 1), &Prompt::from("p"), &mut rng)
            .unwrap_err();
        assert!(matches!(err, EvolutionError::Collaborator { stage: "rating", .. }));
    }

    #[test]
    fn test_student_failure_propagates() {
        let student = |_: &Prompt, _: &str| -> Reply { Err("student offline".into()) };
        let fitness = RuleBasedFitness::new(Scripted::new(&["4"]), student);
        let mut rng = StdRng::seed_from_u64(42);

        let err = fitness
            .fitness(&config(&["q"], 1), &Prompt::from("p"), &mut rng)
            .unwrap_err();
        assert!(matches!(err, EvolutionError::Collaborator { stage: "student", .. }));
    }
}
