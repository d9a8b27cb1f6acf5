//! Generational prompt evolution.
//!
//! A generic, strategy-agnostic evolution loop. Users plug in three
//! strategies, each with its own opaque configuration:
//!
//! - [`MutationStrategy`]: writes a new prompt from parent prompts
//! - [`FitnessStrategy`]: scores one prompt, possibly failing to
//! - [`RankingStrategy`]: selects and orders the survivors
//!
//! # Key Types
//!
//! - [`EvolutionConfig`]: population size, iterations, seed prompts
//! - [`EvolutionRunner`]: validates the setup and starts a run
//! - [`Generations`]: lazy iterator yielding one [`Generation`] at a time
//! - [`EvolutionObserver`]: optional progress hook
//!
//! # Lifecycle
//!
//! `Idle → Bootstrapping → (Evaluating → Ranking → Mutating)* → Done`
//!
//! Bootstrap copies the seeds and mutates from them until the population
//! is full. Each generation scores every prompt, ranks them, emits the
//! survivors and refills the population by mutating `population_size -
//! top_n` new prompts.

mod config;
mod observer;
mod runner;
mod types;

pub use config::{EvolutionConfig, ParentSource};
pub use observer::{EvolutionObserver, LogObserver, NoopObserver};
pub use runner::{EvolutionResult, EvolutionRunner, Generation, Generations, Phase};
pub use types::{FitnessStrategy, MutationStrategy, RankingStrategy};
