//! Prompt data model.
//!
//! A [`Prompt`] is the unit being evolved: an immutable piece of text with
//! no identity beyond its content. The orchestrator never edits a prompt,
//! it only changes which prompts belong to the population.

use std::fmt;
use std::ops::Deref;

/// An immutable candidate prompt.
///
/// Two prompts are equal when their text is equal.
///
/// ```
/// use u_promptevo::Prompt;
///
/// let p = Prompt::from("Extract the concepts as a JSON list");
/// assert_eq!(p.as_str(), "Extract the concepts as a JSON list");
/// assert!(p.starts_with("Extract"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Prompt(String);

impl Prompt {
    /// Creates a prompt from any string-like value.
    pub fn new(text: impl Into<String>) -> Self {
        Prompt(text.into())
    }

    /// Returns the prompt text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the prompt and returns its text.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl Deref for Prompt {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Prompt {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Prompt {
    fn from(text: String) -> Self {
        Prompt(text)
    }
}

impl From<&str> for Prompt {
    fn from(text: &str) -> Self {
        Prompt(text.to_owned())
    }
}

impl PartialEq<str> for Prompt {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Prompt {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// The working set of prompts for one generation.
///
/// Order only matters for tie-breaking during ranking.
pub type Population = Vec<Prompt>;

/// A prompt paired with the score it received in one generation.
///
/// `score == None` means the fitness could not be computed. It ranks as
/// the lowest possible score and never aborts a run.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPrompt {
    /// The evaluated prompt.
    pub prompt: Prompt,

    /// Fitness score, higher is better.
    pub score: Option<f64>,
}

impl ScoredPrompt {
    /// Pairs a prompt with its score.
    pub fn new(prompt: Prompt, score: Option<f64>) -> Self {
        Self { prompt, score }
    }

    /// Score used for ordering.
    ///
    /// Absent and NaN scores map to `f64::NEG_INFINITY` so they sort last.
    pub fn effective_score(&self) -> f64 {
        match self.score {
            Some(s) if !s.is_nan() => s,
            _ => f64::NEG_INFINITY,
        }
    }
}
