//! Rule-guided mutation through a text generator.

use super::techniques::{sample_techniques, Technique};
use crate::error::{EvolutionError, Result};
use crate::evolution::MutationStrategy;
use crate::llm::TextGenerator;
use crate::prompt::Prompt;
use rand::Rng;

/// Configuration for [`RuleBasedMutation`].
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RuleBasedMutationConfig {
    /// Rules every generated prompt must follow.
    pub rules: Vec<String>,

    /// Techniques that may be suggested, each drawn independently.
    pub techniques: Vec<Technique>,
}

impl RuleBasedMutationConfig {
    /// Creates a config with the given rules and no techniques.
    pub fn new<I, S>(rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rules: rules.into_iter().map(Into::into).collect(),
            techniques: Vec::new(),
        }
    }

    /// Sets the technique catalog.
    pub fn with_techniques(mut self, techniques: Vec<Technique>) -> Self {
        self.techniques = techniques;
        self
    }
}

/// Asks a text generator to merge the parents into a new prompt.
///
/// Each call renders the parents and rules into one instruction, appends
/// the hints of the techniques drawn for this call and makes exactly one
/// generator call. The generator output is returned as-is.
#[derive(Debug, Clone)]
pub struct RuleBasedMutation<G> {
    generator: G,
}

impl<G: TextGenerator> RuleBasedMutation<G> {
    /// Wraps the generator used to write new prompts.
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    /// Renders the mutation instruction.
    pub fn render_instruction(
        config: &RuleBasedMutationConfig,
        parents: &[Prompt],
        techniques: &[&Technique],
    ) -> String {
        let rules = bullet_list(config.rules.iter().map(String::as_str), "\t- ");
        let prompts = bullet_list(parents.iter().map(Prompt::as_str), "\t- ");

        let mut instruction = format!(
            "Generate a new prompt that takes the best of each prompt below, \
             following these rules:\n{rules}\n\nFor the prompt(s):\n{prompts}\n"
        );

        if !techniques.is_empty() {
            let hints = bullet_list(techniques.iter().map(|t| t.hint.as_str()), "\t- ");
            instruction.push_str("\nAlso apply these techniques:\n");
            instruction.push_str(&hints);
            instruction.push('\n');
        }

        instruction.push_str("\nThe new prompt is:\n");
        instruction
    }
}

impl<G: TextGenerator> MutationStrategy for RuleBasedMutation<G> {
    type Config = RuleBasedMutationConfig;

    fn mutate<R: Rng>(
        &self,
        config: &RuleBasedMutationConfig,
        parents: &[Prompt],
        rng: &mut R,
    ) -> Result<Prompt> {
        if parents.is_empty() {
            return Err(EvolutionError::Strategy(
                "mutation needs at least one parent prompt".into(),
            ));
        }

        let drawn = sample_techniques(&config.techniques, rng);
        if !drawn.is_empty() {
            let names: Vec<&str> = drawn.iter().map(|t| t.name.as_str()).collect();
            log::debug!("Mutation techniques: {}", names.join(", "));
        }

        let instruction = Self::render_instruction(config, parents, &drawn);
        let text = self
            .generator
            .generate(&instruction)
            .map_err(|e| EvolutionError::collaborator("mutation", e))?;
        Ok(Prompt::from(text))
    }
}

fn bullet_list<'s>(items: impl Iterator<Item = &'s str>, marker: &str) -> String {
    items
        .map(|item| format!("{marker}{item}"))
        .collect::<Vec<_>>()
        .join("\n")
}
