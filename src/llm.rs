//! Collaborator contracts for text generation.
//!
//! The crate never talks to a language model itself. Strategies receive
//! implementations of these traits and delegate every generation call to
//! them. Latency, retries and timeouts are the implementor's business;
//! any error returned here halts the run.
//!
//! Both traits are implemented for plain closures:
//!
//! ```
//! use u_promptevo::llm::{Student, TextGenerator};
//! use u_promptevo::{BoxError, Prompt};
//!
//! let echo = |instruction: &str| -> Result<String, BoxError> { Ok(instruction.to_uppercase()) };
//! assert_eq!(echo.generate("hi").unwrap(), "HI");
//!
//! let student = |prompt: &Prompt, example: &str| -> Result<String, BoxError> {
//!     Ok(format!("{prompt}: {example}"))
//! };
//! assert_eq!(student.answer(&Prompt::from("p"), "q").unwrap(), "p: q");
//! ```

use crate::error::BoxError;
use crate::prompt::Prompt;

/// Generates text from an instruction.
///
/// Used by mutation to write new prompts and by fitness to rate answers.
pub trait TextGenerator: Send + Sync {
    /// Returns the generated text for `instruction`.
    fn generate(&self, instruction: &str) -> Result<String, BoxError>;
}

impl<F> TextGenerator for F
where
    F: Fn(&str) -> Result<String, BoxError> + Send + Sync,
{
    fn generate(&self, instruction: &str) -> Result<String, BoxError> {
        self(instruction)
    }
}

/// Produces the artifact a prompt is judged on.
///
/// Given a candidate prompt and one example input, the student returns the
/// answer it would give when following that prompt.
pub trait Student: Send + Sync {
    /// Answers `example` while following `prompt`.
    fn answer(&self, prompt: &Prompt, example: &str) -> Result<String, BoxError>;
}

impl<F> Student for F
where
    F: Fn(&Prompt, &str) -> Result<String, BoxError> + Send + Sync,
{
    fn answer(&self, prompt: &Prompt, example: &str) -> Result<String, BoxError> {
        self(prompt, example)
    }
}
