#![forbid(unsafe_code)]
//! # primerpair
//!
//! PCR **primer-pair search and scoring**: enumerate candidate primers on both strands of a
//! target region, pair them through a **Tm-ranked window**, score every pair by dimer
//! propensity and Tm mismatch, and keep the **best K** pairs.
//!
//! ## Highlights
//! - ❗ **No feature flags**: all capabilities are always enabled.
//! - 🧪 **Injectable models**: Tm ([`thermo::TmModel`]) and pair scoring ([`score::PairScorer`])
//!   are traits; closures implement both, so searches can be driven by deterministic stubs.
//! - 🛑 **Cooperative cancellation**: [`finder::CancelToken`] can stop a search from any thread.
//! - 🧭 **Deterministic output**: same input, same ranked list.
//!
//! ## Pipeline
//! 1. [`input::PrimerDesignInput::validate`] checks the parameters.
//! 2. [`enumerate::PrimerCandidateEnumerator`] yields forward and reverse candidates per
//!    primer length, filtered by 3' [`suffix`] pattern, Tm range and (forward only) uniqueness.
//! 3. [`window::NearestTmWindowSearch`] limits each forward primer to the reverse primers of
//!    closest Tm rank.
//! 4. [`topk::TopKPairAccumulator`] keeps the lowest-scoring pairs.
//!
//! ## Examples
//! ```rust
//! use primerpair::{find_primer_pairs, PrimerDesignInput, Range};
//!
//! let mut input = PrimerDesignInput::new("ATGCCCTTCAGCAAAGCATGGCGGAGTGCCGTTTATCCTGATTTTAGGGAGCAGGGCGCGTATATTAACTACAAGGCAACG");
//! input.amplicon_size_range = Range::new(60, 81);
//! input.primer_size_range = Range::new(18, 20);
//! input.tm_range = Range::new(50.0, 80.0);
//! let pairs = find_primer_pairs(input).unwrap().into_pairs();
//! assert!(!pairs.is_empty());
//! assert!(pairs.windows(2).all(|w| w[0].score <= w[1].score));
//! ```
//!
//! ## Version
//! This build is "0.2.0".

pub mod range;
pub mod primer;
pub mod input;
pub mod dimer;
pub mod thermo;
pub mod suffix;
pub mod enumerate;
pub mod window;
pub mod topk;
pub mod score;
pub mod finder;
pub mod seqio;
pub mod benchmark;
pub mod data { pub mod nearest_neighbor; }

pub use finder::{CancelToken, FinderConfig, FinderError, FinderState, PrimerPairFinder, PrimerPairFinderResult, SearchOutcome, SearchStats};
pub use input::{InputError, PrimerDesignInput};
pub use primer::{Direction, Primer, PrimerPair};
pub use range::Range;
pub use thermo::{NearestNeighborTm, TmModel};
pub use score::{DimerPairScorer, PairScorer};

/// Crate version string (from `CARGO_PKG_VERSION`).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run a search with the default models and configuration.
pub fn find_primer_pairs(input: PrimerDesignInput) -> PrimerPairFinderResult {
    PrimerPairFinder::new(input).find_primer_pairs()
}

/// Melting temperature of `sequence` under the default nearest-neighbour model.
///
/// # Examples
/// ```
/// assert_eq!(primerpair::melting_temperature("ATGCATGC", 1.0), 32.8);
/// ```
pub fn melting_temperature(sequence: &str, sodium: f64) -> f64 {
    NearestNeighborTm::default().compute(sequence.to_ascii_uppercase().as_bytes(), sodium)
}

/// One row per pair, for tables and CSV:
/// `(rank, forward, forward_tm, forward_pos, reverse, reverse_tm, reverse_pos, amplicon_length, score)`.
///
/// Positions are 1-based against the full input sequence: `forward_pos` is the first base of
/// the forward binding site and `reverse_pos` the last base of the reverse one, so together they
/// delimit the amplicon.
pub fn pair_rows(pairs: &[PrimerPair]) -> Vec<(usize, String, f64, usize, String, f64, usize, usize, f64)> {
    pairs
        .iter()
        .enumerate()
        .map(|(i, p)| {
            (
                i + 1,
                p.forward.sequence.clone(),
                p.forward.tm,
                p.amplicon_start(),
                p.reverse.sequence.clone(),
                p.reverse.tm,
                p.amplicon_end(),
                p.amplicon_length,
                p.score,
            )
        })
        .collect()
}
