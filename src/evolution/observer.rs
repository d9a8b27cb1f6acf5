//! Progress hooks for the evolution loop.
//!
//! Observers are optional. The runner behaves identically with or without
//! one; they only see progress notifications and the emitted survivors.

use crate::prompt::Prompt;

/// Receives progress notifications from a running evolution.
///
/// All methods default to no-ops.
pub trait EvolutionObserver {
    /// Called after each prompt generated during bootstrap.
    fn on_bootstrap_progress(&mut self, _done: usize, _total: usize) {}

    /// Called before a generation's evaluation starts. `index` is 1-based.
    fn on_generation_start(&mut self, _index: usize) {}

    /// Called with the survivors just before they are emitted.
    fn on_generation_complete(&mut self, _index: usize, _survivors: &[Prompt]) {}
}

/// Observer that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl EvolutionObserver for NoopObserver {}

/// Observer that reports progress through the `log` facade at `info` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl EvolutionObserver for LogObserver {
    fn on_bootstrap_progress(&mut self, done: usize, total: usize) {
        log::info!("{done}/{total} prompts generated");
    }

    fn on_generation_start(&mut self, index: usize) {
        log::info!("Generation {index}");
    }

    fn on_generation_complete(&mut self, index: usize, survivors: &[Prompt]) {
        log::info!("Generation {index}: {} survivors", survivors.len());
        for prompt in survivors {
            log::info!("\t{prompt}");
        }
    }
}

impl<O: EvolutionObserver + ?Sized> EvolutionObserver for &mut O {
    fn on_bootstrap_progress(&mut self, done: usize, total: usize) {
        (**self).on_bootstrap_progress(done, total);
    }

    fn on_generation_start(&mut self, index: usize) {
        (**self).on_generation_start(index);
    }

    fn on_generation_complete(&mut self, index: usize, survivors: &[Prompt]) {
        (**self).on_generation_complete(index, survivors);
    }
}
