//! Mutation strategies.
//!
//! Mutation writes one new prompt from a set of parent prompts. The
//! reference strategy delegates the writing to an injected
//! [`TextGenerator`](crate::llm::TextGenerator).
//!
//! - [`RuleBasedMutation`]: rule-guided rewrite with optional technique hints
//! - [`Technique`] / [`default_techniques`]: hints drawn by independent
//!   Bernoulli trials

mod rule_based;
mod techniques;

pub use rule_based::{RuleBasedMutation, RuleBasedMutationConfig};
pub use techniques::{default_techniques, sample_techniques, Technique};
