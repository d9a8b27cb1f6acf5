//! Fitness strategies.
//!
//! Fitness turns one prompt into a score, higher being better, or into no
//! score when the evaluation produced nothing usable.
//!
//! - [`RuleBasedFitness`]: a student answers sampled examples with the
//!   prompt, a rater scores each answer, the mean is the fitness
//! - [`DirectRatingFitness`]: the rater scores the prompt text directly
//! - [`parse_rating`]: shared parsing of rater replies

mod direct;
mod rating;
mod rule_based;

pub use direct::{DirectRatingFitness, DirectRatingFitnessConfig};
pub use rating::parse_rating;
pub use rule_based::{RuleBasedFitness, RuleBasedFitnessConfig};
