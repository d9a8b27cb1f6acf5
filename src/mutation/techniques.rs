//! Prompt-engineering technique catalog.
//!
//! A [`Technique`] is a short hint appended to the mutation instruction.
//! Each technique is included independently with its own probability, so
//! one mutation call may carry none, some or all of them.

use rand::Rng;

/// An optional hint mutation may include when writing a new prompt.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Technique {
    /// Short identifier, used in logs.
    pub name: String,

    /// Text appended to the mutation instruction when the technique is drawn.
    pub hint: String,

    /// Inclusion probability per mutation call, in [0, 1].
    pub probability: f64,
}

impl Technique {
    /// Creates a technique. `probability` is clamped to [0, 1].
    pub fn new(name: impl Into<String>, hint: impl Into<String>, probability: f64) -> Self {
        Self {
            name: name.into(),
            hint: hint.into(),
            probability: clamp_probability(probability),
        }
    }

    /// Runs this technique's Bernoulli trial.
    pub fn draw<R: Rng>(&self, rng: &mut R) -> bool {
        rng.random_bool(clamp_probability(self.probability))
    }
}

fn clamp_probability(p: f64) -> f64 {
    if p.is_nan() {
        0.0
    } else {
        p.clamp(0.0, 1.0)
    }
}

/// Draws every technique independently and returns the ones that hit,
/// in catalog order.
pub fn sample_techniques<'t, R: Rng>(techniques: &'t [Technique], rng: &mut R) -> Vec<&'t Technique> {
    techniques.iter().filter(|t| t.draw(rng)).collect()
}

/// The built-in technique catalog.
pub fn default_techniques() -> Vec<Technique> {
    vec![
        Technique::new(
            "chain_of_thought",
            "Ask the model to reason step by step before giving its final answer.",
            0.3,
        ),
        Technique::new(
            "role",
            "Give the model an explicit expert role suited to the task.",
            0.3,
        ),
        Technique::new(
            "few_shot",
            "Include one short example of the expected input and output.",
            0.2,
        ),
        Technique::new(
            "output_format",
            "State the exact output format and forbid any text outside it.",
            0.4,
        ),
        Technique::new(
            "conciseness",
            "Make the prompt shorter without losing any requirement.",
            0.2,
        ),
        Technique::new(
            "negative_constraints",
            "List the mistakes the model must avoid.",
            0.2,
        ),
    ]
}
