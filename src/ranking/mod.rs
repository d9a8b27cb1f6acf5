//! Survivor selection.
//!
//! Ranking strategies decide which prompts survive a generation and in
//! which order they are emitted.
//!
//! - [`TopNRanking`]: truncation selection keeping the `top_n` best scores

mod top_n;

pub use top_n::{TopNRanking, TopNRankingConfig};
