//! Truncation selection.

use crate::evolution::RankingStrategy;
use crate::prompt::{Prompt, ScoredPrompt};

/// Configuration for [`TopNRanking`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TopNRankingConfig {
    /// Number of survivors kept per generation.
    pub top_n: usize,
}

impl TopNRankingConfig {
    /// Keeps the `top_n` best prompts.
    pub fn new(top_n: usize) -> Self {
        Self { top_n }
    }
}

impl Default for TopNRankingConfig {
    fn default() -> Self {
        Self { top_n: 5 }
    }
}

/// Keeps the `top_n` highest-scoring prompts, best first.
///
/// The sort is stable: prompts with equal scores keep their input order.
/// Absent scores rank below every real score.
///
/// ```
/// use u_promptevo::evolution::RankingStrategy;
/// use u_promptevo::ranking::{TopNRanking, TopNRankingConfig};
/// use u_promptevo::{Prompt, ScoredPrompt};
///
/// let scored = vec![
///     ScoredPrompt::new(Prompt::from("A"), Some(1.0)),
///     ScoredPrompt::new(Prompt::from("B"), Some(1.0)),
///     ScoredPrompt::new(Prompt::from("C"), Some(0.5)),
/// ];
/// let survivors = TopNRanking.rank(&TopNRankingConfig::new(2), scored);
/// assert_eq!(survivors, vec![Prompt::from("A"), Prompt::from("B")]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TopNRanking;

impl RankingStrategy for TopNRanking {
    type Config = TopNRankingConfig;

    fn survivor_count(&self, config: &TopNRankingConfig) -> usize {
        config.top_n
    }

    fn rank(&self, config: &TopNRankingConfig, mut scored: Vec<ScoredPrompt>) -> Vec<Prompt> {
        // `sort_by` is stable; descending by effective score.
        scored.sort_by(|a, b| {
            b.effective_score()
                .partial_cmp(&a.effective_score())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(config.top_n);

        log::info!("Top {} prompts:", config.top_n);
        for entry in &scored {
            match entry.score {
                Some(score) => log::info!("{score}\t{}", entry.prompt),
                None => log::info!("-\t{}", entry.prompt),
            }
        }

        scored.into_iter().map(|entry| entry.prompt).collect()
    }
}
