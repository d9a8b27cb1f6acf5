//! Property-based tests for u-promptevo.
//!
//! Uses proptest to check the ranking and population invariants.

use proptest::prelude::*;
use rand::Rng;
use std::collections::HashMap;
use u_promptevo::evolution::{FitnessStrategy, MutationStrategy};
use u_promptevo::prelude::*;
use u_promptevo::Result;

/// Returns a fresh, numbered prompt on every call.
struct Numbered;

impl MutationStrategy for Numbered {
    type Config = ();

    fn mutate<R: Rng>(&self, _: &(), parents: &[Prompt], rng: &mut R) -> Result<Prompt> {
        let n: u32 = rng.random();
        Ok(Prompt::new(format!("{}-{n}", parents.len())))
    }
}

/// Scores prompts by their length; odd lengths are unscored.
struct LengthFitness;

impl FitnessStrategy for LengthFitness {
    type Config = ();

    fn fitness<R: Rng>(&self, _: &(), prompt: &Prompt, _rng: &mut R) -> Result<Option<f64>> {
        let len = prompt.len();
        Ok((len % 2 == 0).then_some(len as f64))
    }
}

fn scored_strategy() -> impl Strategy<Value = Vec<ScoredPrompt>> {
    prop::collection::vec(prop::option::of(0u8..5), 0..30).prop_map(|scores| {
        scores
            .into_iter()
            .enumerate()
            .map(|(i, score)| {
                ScoredPrompt::new(Prompt::new(format!("p{i}")), score.map(f64::from))
            })
            .collect()
    })
}

proptest! {
    // ==================== Ranking Properties ====================

    #[test]
    fn ranking_length_is_min(scored in scored_strategy(), top_n in 0usize..40) {
        let expected = top_n.min(scored.len());
        let out = TopNRanking.rank(&TopNRankingConfig::new(top_n), scored);
        prop_assert_eq!(out.len(), expected);
    }

    #[test]
    fn ranking_is_sorted_and_stable(scored in scored_strategy()) {
        let position: HashMap<Prompt, usize> = scored
            .iter()
            .enumerate()
            .map(|(i, s)| (s.prompt.clone(), i))
            .collect();
        let score_of: HashMap<Prompt, f64> = scored
            .iter()
            .map(|s| (s.prompt.clone(), s.effective_score()))
            .collect();

        let out = TopNRanking.rank(&TopNRankingConfig::new(scored.len()), scored);

        for pair in out.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            prop_assert!(score_of[a] >= score_of[b]);
            if score_of[a] == score_of[b] {
                prop_assert!(position[a] < position[b]);
            }
        }
    }

    // ==================== Population Properties ====================

    #[test]
    fn survivors_fill_top_n_every_generation(
        population_size in 1usize..12,
        seed_count in 1usize..12,
        top_n in 1usize..12,
        iterations in 0usize..5,
        seed in any::<u64>(),
    ) {
        prop_assume!(seed_count <= population_size && top_n <= population_size);

        let seeds: Vec<String> = (0..seed_count).map(|i| format!("seed{i}")).collect();
        let runner = EvolutionRunner::new(
            Numbered,
            LengthFitness,
            TopNRanking,
            (),
            (),
            TopNRankingConfig::new(top_n),
            EvolutionConfig::new(seeds)
                .with_population_size(population_size)
                .with_iterations(iterations)
                .with_seed(seed),
        );

        let mut generations = runner.run().unwrap();
        let mut emitted = 0;
        while let Some(generation) = generations.next() {
            let generation = generation.unwrap();
            emitted += 1;
            prop_assert_eq!(generation.index, emitted);
            prop_assert_eq!(generation.survivors.len(), top_n);
            prop_assert_eq!(generations.population().len(), top_n);
        }
        prop_assert_eq!(emitted, iterations);
    }

    #[test]
    fn oversized_seed_sets_are_rejected(population_size in 1usize..10, extra in 1usize..5) {
        let seeds: Vec<String> = (0..population_size + extra).map(|i| format!("s{i}")).collect();
        let runner = EvolutionRunner::new(
            Numbered,
            LengthFitness,
            TopNRanking,
            (),
            (),
            TopNRankingConfig::new(1),
            EvolutionConfig::new(seeds).with_population_size(population_size),
        );
        prop_assert!(runner.run().err().map(|e| e.is_configuration()).unwrap_or(false));
    }
}
