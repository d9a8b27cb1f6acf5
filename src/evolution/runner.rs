//! Evolution loop execution.
//!
//! [`EvolutionRunner`] owns the strategies and their configs.
//! [`EvolutionRunner::run`] validates the configuration and returns a lazy
//! [`Generations`] iterator that drives the population through
//! bootstrap → (evaluate → rank → replenish)* and yields one
//! [`Generation`] per completed ranking.
//!
//! Work only happens inside `next()`. Replenishment for generation g+1 runs
//! at the start of the pull that follows generation g, so a caller that
//! stops iterating causes no further strategy calls.

use super::config::{EvolutionConfig, ParentSource};
use super::observer::{EvolutionObserver, NoopObserver};
use super::types::{FitnessStrategy, MutationStrategy, RankingStrategy};
use crate::error::Result;
use crate::prompt::{Population, Prompt, ScoredPrompt};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::iter::FusedIterator;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// The ranked survivors of one generation.
#[derive(Debug, Clone, PartialEq)]
pub struct Generation {
    /// 1-based generation index.
    pub index: usize,

    /// Survivors in rank order, best first.
    pub survivors: Vec<Prompt>,
}

/// Result of draining a run with [`Generations::finish`].
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionResult {
    /// Survivors of the last generation. Empty when no generation ran.
    pub best: Vec<Prompt>,

    /// Number of generations emitted.
    pub generations: usize,

    /// Survivors of every generation, in order.
    pub history: Vec<Vec<Prompt>>,
}

/// Lifecycle phase of a run.
///
/// Between pulls, [`Generations::phase`] reports the phase the next pull
/// starts in: `Idle` before the first pull, `Mutating` while a
/// replenishment is pending and `Done` once the run is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing has run yet.
    Idle,
    /// Growing the seeds to the target population size.
    Bootstrapping,
    /// Scoring every prompt of the population.
    Evaluating,
    /// Selecting the survivors.
    Ranking,
    /// Refilling the population from the survivors.
    Mutating,
    /// All generations ran, or a strategy failed.
    Done,
}

/// Bundles the three strategies, their configs and the loop parameters.
///
/// # Usage
///
/// ```ignore
/// let runner = EvolutionRunner::new(
///     RuleBasedMutation::new(writer),
///     RuleBasedFitness::new(rater, student),
///     TopNRanking,
///     mutation_config, fitness_config, TopNRankingConfig::new(5),
///     EvolutionConfig::new(["seed prompt"]).with_population_size(10),
/// );
/// for generation in runner.run()? {
///     let generation = generation?;
///     println!("{}: {:?}", generation.index, generation.survivors);
/// }
/// ```
pub struct EvolutionRunner<M, F, K>
where
    M: MutationStrategy,
    F: FitnessStrategy,
    K: RankingStrategy,
{
    mutation: M,
    fitness: F,
    ranking: K,
    mutation_config: M::Config,
    fitness_config: F::Config,
    ranking_config: K::Config,
    config: EvolutionConfig,
}

impl<M, F, K> EvolutionRunner<M, F, K>
where
    M: MutationStrategy,
    F: FitnessStrategy,
    K: RankingStrategy,
{
    /// Creates a runner. Nothing is validated until [`run`](Self::run).
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        mutation: M,
        fitness: F,
        ranking: K,
        mutation_config: M::Config,
        fitness_config: F::Config,
        ranking_config: K::Config,
        config: EvolutionConfig,
    ) -> Self {
        Self {
            mutation,
            fitness,
            ranking,
            mutation_config,
            fitness_config,
            ranking_config,
            config,
        }
    }

    /// Returns the loop configuration.
    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    /// Validates the configuration and returns the lazy generation sequence.
    ///
    /// Fails with [`EvolutionError::Configuration`](crate::EvolutionError)
    /// before any strategy call when the seeds do not fit in the population,
    /// `top_n` is out of range or a strategy rejects its config.
    pub fn run(&self) -> Result<Generations<'_, M, F, K>> {
        self.run_with_observer(NoopObserver)
    }

    /// Like [`run`](Self::run), reporting progress to `observer`.
    pub fn run_with_observer<O: EvolutionObserver>(
        &self,
        observer: O,
    ) -> Result<Generations<'_, M, F, K, O>> {
        self.config.validate()?;
        let top_n = self.ranking.survivor_count(&self.ranking_config);
        self.config.validate_survivors(top_n)?;
        self.mutation.validate(&self.mutation_config)?;
        self.fitness.validate(&self.fitness_config)?;

        let rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };

        Ok(Generations {
            runner: self,
            observer,
            rng,
            phase: Phase::Idle,
            population: Vec::new(),
            parents: Vec::new(),
            completed: 0,
        })
    }

    /// Runs every generation and collects the survivors.
    pub fn run_to_end(&self) -> Result<EvolutionResult> {
        self.run()?.finish()
    }
}

/// Lazy, pull-based sequence of generations.
///
/// Yields `Ok(Generation)` once per generation. A strategy failure is
/// yielded as `Err` and ends the sequence.
pub struct Generations<'a, M, F, K, O = NoopObserver>
where
    M: MutationStrategy,
    F: FitnessStrategy,
    K: RankingStrategy,
{
    runner: &'a EvolutionRunner<M, F, K>,
    observer: O,
    rng: StdRng,
    phase: Phase,
    population: Population,
    // Parents for the pending replenishment.
    parents: Vec<Prompt>,
    completed: usize,
}

impl<M, F, K, O> Generations<'_, M, F, K, O>
where
    M: MutationStrategy,
    F: FitnessStrategy,
    K: RankingStrategy,
    O: EvolutionObserver,
{
    /// Phase the next pull starts in.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Number of generations emitted so far.
    pub fn completed(&self) -> usize {
        self.completed
    }

    /// Current internal population.
    ///
    /// After a generation is emitted this holds only the survivors until the
    /// next pull replenishes it.
    pub fn population(&self) -> &[Prompt] {
        &self.population
    }

    /// Runs the remaining generations and collects their survivors.
    ///
    /// Stops right after the last generation, without the replenishment a
    /// further pull would perform. Returns the first error encountered, if
    /// any.
    pub fn finish(mut self) -> Result<EvolutionResult> {
        let mut history = Vec::new();
        while self.phase == Phase::Idle || self.completed < self.runner.config.iterations {
            match self.next() {
                Some(generation) => history.push(generation?.survivors),
                None => break,
            }
        }
        self.stop();
        Ok(EvolutionResult {
            best: history.last().cloned().unwrap_or_default(),
            generations: history.len(),
            history,
        })
    }

    fn step(&mut self) -> Result<Option<Generation>> {
        match self.phase {
            Phase::Done => return Ok(None),
            Phase::Idle => self.bootstrap()?,
            _ => self.replenish()?,
        }

        if self.completed >= self.runner.config.iterations {
            self.stop();
            return Ok(None);
        }

        self.generation().map(Some)
    }

    fn bootstrap(&mut self) -> Result<()> {
        self.phase = Phase::Bootstrapping;
        let runner = self.runner;
        let seeds = &runner.config.seed_prompts;
        let target = runner.config.population_size;
        let total = target - seeds.len();

        self.population = seeds.clone();
        self.population.reserve(total);

        log::debug!("Bootstrapping {total} prompts from {} seeds", seeds.len());
        for done in 1..=total {
            let mut rng = self.child_rng();
            let prompt = runner
                .mutation
                .mutate(&runner.mutation_config, seeds, &mut rng)?;
            self.population.push(prompt);
            self.observer.on_bootstrap_progress(done, total);
        }
        Ok(())
    }

    fn generation(&mut self) -> Result<Generation> {
        let runner = self.runner;
        let index = self.completed + 1;

        self.phase = Phase::Evaluating;
        self.observer.on_generation_start(index);
        log::debug!("Generation {index}: evaluating {} prompts", self.population.len());
        let scored = self.evaluate()?;

        self.phase = Phase::Ranking;
        let population = std::mem::take(&mut self.population);
        let top_n = runner.ranking.survivor_count(&runner.ranking_config);
        let mut survivors = runner.ranking.rank(&runner.ranking_config, scored);
        if survivors.len() > top_n {
            log::warn!(
                "Ranking returned {} prompts for top_n {top_n}; truncating",
                survivors.len()
            );
            survivors.truncate(top_n);
        }
        log::debug!("Generation {index}: {} survivors", survivors.len());

        self.parents = match runner.config.parent_source {
            ParentSource::Survivors => survivors.clone(),
            ParentSource::Population => population,
        };
        self.population = survivors.clone();
        self.completed = index;
        self.phase = Phase::Mutating;

        self.observer.on_generation_complete(index, &survivors);
        Ok(Generation { index, survivors })
    }

    fn evaluate(&mut self) -> Result<Vec<ScoredPrompt>> {
        let runner = self.runner;
        let seeds: Vec<u64> = (0..self.population.len())
            .map(|_| self.rng.random())
            .collect();
        let score = |prompt: &Prompt, seed: u64| {
            let mut rng = StdRng::seed_from_u64(seed);
            runner
                .fitness
                .fitness(&runner.fitness_config, prompt, &mut rng)
        };

        #[cfg(feature = "parallel")]
        {
            if runner.config.parallel {
                let scores = self
                    .population
                    .par_iter()
                    .zip(seeds.par_iter())
                    .map(|(prompt, &seed)| score(prompt, seed))
                    .collect::<Result<Vec<_>>>()?;
                return Ok(attach_scores(&self.population, scores));
            }
        }

        let scores = self
            .population
            .iter()
            .zip(seeds)
            .map(|(prompt, seed)| score(prompt, seed))
            .collect::<Result<Vec<_>>>()?;
        Ok(attach_scores(&self.population, scores))
    }

    fn replenish(&mut self) -> Result<()> {
        self.phase = Phase::Mutating;
        let runner = self.runner;
        let count = runner
            .config
            .population_size
            .saturating_sub(self.population.len());
        let parents = std::mem::take(&mut self.parents);
        let seeds: Vec<u64> = (0..count).map(|_| self.rng.random()).collect();
        let mutate = |seed: u64| {
            let mut rng = StdRng::seed_from_u64(seed);
            runner
                .mutation
                .mutate(&runner.mutation_config, &parents, &mut rng)
        };

        log::debug!("Replenishing {count} prompts from {} parents", parents.len());

        #[cfg(feature = "parallel")]
        {
            if runner.config.parallel {
                let mutants = seeds
                    .into_par_iter()
                    .map(mutate)
                    .collect::<Result<Vec<_>>>()?;
                self.population.extend(mutants);
                return Ok(());
            }
        }

        for seed in seeds {
            let mutant = mutate(seed)?;
            self.population.push(mutant);
        }
        Ok(())
    }

    fn child_rng(&mut self) -> StdRng {
        StdRng::seed_from_u64(self.rng.random())
    }

    fn stop(&mut self) {
        self.phase = Phase::Done;
        self.population = Vec::new();
        self.parents = Vec::new();
    }
}

fn attach_scores(population: &[Prompt], scores: Vec<Option<f64>>) -> Vec<ScoredPrompt> {
    population
        .iter()
        .cloned()
        .zip(scores)
        .map(|(prompt, score)| ScoredPrompt::new(prompt, score))
        .collect()
}

impl<M, F, K, O> Iterator for Generations<'_, M, F, K, O>
where
    M: MutationStrategy,
    F: FitnessStrategy,
    K: RankingStrategy,
    O: EvolutionObserver,
{
    type Item = Result<Generation>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.step() {
            Ok(Some(generation)) => Some(Ok(generation)),
            Ok(None) => None,
            Err(e) => {
                log::debug!("Run halted: {e}");
                self.stop();
                Some(Err(e))
            }
        }
    }
}

impl<M, F, K, O> FusedIterator for Generations<'_, M, F, K, O>
where
    M: MutationStrategy,
    F: FitnessStrategy,
    K: RankingStrategy,
    O: EvolutionObserver,
{
}

// ============================================================================
// Tests
// ============================================================================
