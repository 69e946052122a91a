//! Primer-pair search: validate, enumerate, pair, rank.
//!
//! [`PrimerPairFinder::find_primer_pairs`] is a blocking call meant to run on a worker thread
//! picked by the caller. It moves through
//! `Idle -> Validating -> Enumerating -> Pairing -> {Done | Error | Cancelled}`:
//!
//! 1. **Validating**: [`PrimerDesignInput::validate`]; failures end in [`FinderError::InvalidInput`].
//! 2. **Enumerating**: for every primer length in the primer size range, forward then reverse
//!    candidates are collected (see [`crate::enumerate`]).
//! 3. **Pairing**: reverse candidates are ranked by Tm ([`crate::window`]); each forward
//!    candidate is paired with the reverse candidates in its Tm window, pairs whose amplicon
//!    length falls inside the amplicon size range are scored and offered to a
//!    [`TopKPairAccumulator`].
//!
//! Cancellation is cooperative. [`CancelToken::cancel`] may be called from any thread; the
//! search polls it before each primer length, before every enumerated window, per forward
//! primer and per window entry, and returns [`SearchOutcome::Cancelled`] with whatever pairs it holds.
//! The token is never reset by the finder.
//!
//! # Examples
//! ```
//! use primerpair::finder::{PrimerPairFinder, SearchOutcome};
//! use primerpair::input::PrimerDesignInput;
//! use primerpair::range::Range;
//!
//! let mut input = PrimerDesignInput::new("ATGCCCTTCAGCAAAGCATGGCGGAGTGCC");
//! input.amplicon_size_range = Range::new(29, 30);
//! input.primer_size_range = Range::new(5, 5);
//! input.tm_range = Range::new(-100.0, 100.0);
//! let finder = PrimerPairFinder::new(input);
//! match finder.find_primer_pairs().unwrap() {
//!     SearchOutcome::Ranked(pairs) => assert_eq!(pairs.len(), 2),
//!     SearchOutcome::Cancelled(_) => unreachable!(),
//! }
//! ```
use std::sync::atomic::{AtomicBool, AtomicU8, AtomicUsize, Ordering};
use std::sync::Arc;

use log::{debug, info, warn};
use thiserror::Error;

use crate::enumerate::PrimerCandidateEnumerator;
use crate::input::{InputError, PrimerDesignInput};
use crate::primer::{amplicon_span, Direction, Primer, PrimerPair};
use crate::score::{DimerPairScorer, PairScorer};
use crate::suffix::SuffixPattern;
use crate::thermo::{NearestNeighborTm, TmModel};
use crate::topk::{TopKPairAccumulator, DEFAULT_MAX_PAIRS};
use crate::window::{NearestTmWindowSearch, DEFAULT_WINDOW_HALF_WIDTH};

/// Terminal failures of a search. `Display` is the message shown to users.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FinderError {
    #[error(transparent)]
    InvalidInput(#[from] InputError),
    #[error("No forward primers were found.")]
    NoForwardPrimers,
    #[error("No reverse primers were found.")]
    NoReversePrimers,
    #[error("No primer pairs could be found.")]
    NoPairsFound,
}

/// Non-error outcomes. Pairs are sorted ascending by score in both variants.
#[derive(Debug, Clone)]
pub enum SearchOutcome {
    Ranked(Vec<PrimerPair>),
    /// Cancelled; holds the pairs accumulated so far (possibly none).
    Cancelled(Vec<PrimerPair>),
}

impl SearchOutcome {
    pub fn pairs(&self) -> &[PrimerPair] {
        match self {
            SearchOutcome::Ranked(p) | SearchOutcome::Cancelled(p) => p,
        }
    }

    pub fn into_pairs(self) -> Vec<PrimerPair> {
        match self {
            SearchOutcome::Ranked(p) | SearchOutcome::Cancelled(p) => p,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, SearchOutcome::Cancelled(_))
    }
}

pub type PrimerPairFinderResult = Result<SearchOutcome, FinderError>;

/// Shared cancellation flag. Clones observe the same flag.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FinderState {
    Idle = 0,
    Validating,
    Enumerating,
    Pairing,
    Done,
    Error,
    Cancelled,
}

impl FinderState {
    fn from_u8(v: u8) -> Self {
        match v {
            1 => FinderState::Validating,
            2 => FinderState::Enumerating,
            3 => FinderState::Pairing,
            4 => FinderState::Done,
            5 => FinderState::Error,
            6 => FinderState::Cancelled,
            _ => FinderState::Idle,
        }
    }
}

/// Snapshot of the running counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub forward_candidates: usize,
    pub reverse_candidates: usize,
    /// Pairs with an acceptable amplicon length that were scored.
    pub pairs_evaluated: usize,
}

#[derive(Debug, Default)]
struct Counters {
    forward: AtomicUsize,
    reverse: AtomicUsize,
    evaluated: AtomicUsize,
}

impl Counters {
    fn reset(&self) {
        self.forward.store(0, Ordering::Relaxed);
        self.reverse.store(0, Ordering::Relaxed);
        self.evaluated.store(0, Ordering::Relaxed);
    }
}

/// Tunables that are not part of the biological input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FinderConfig {
    /// Reverse candidates considered on each side of the closest Tm rank.
    pub window_half_width: usize,
    /// Pairs returned at most.
    pub max_pairs: usize,
    /// Drop forward candidates that occur more than once in the amplicon.
    pub unique_forward: bool,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self { window_half_width: DEFAULT_WINDOW_HALF_WIDTH, max_pairs: DEFAULT_MAX_PAIRS, unique_forward: true }
    }
}

pub struct PrimerPairFinder<M = NearestNeighborTm, S = DimerPairScorer> {
    input: Arc<PrimerDesignInput>,
    config: FinderConfig,
    tm_model: M,
    scorer: S,
    cancel: CancelToken,
    state: AtomicU8,
    counters: Counters,
}

impl PrimerPairFinder {
    /// Finder with the nearest-neighbour Tm model and the dimer pair scorer.
    pub fn new(input: PrimerDesignInput) -> Self {
        Self {
            input: Arc::new(input),
            config: FinderConfig::default(),
            tm_model: NearestNeighborTm::default(),
            scorer: DimerPairScorer,
            cancel: CancelToken::new(),
            state: AtomicU8::new(FinderState::Idle as u8),
            counters: Counters::default(),
        }
    }
}

impl<M, S> PrimerPairFinder<M, S> {
    pub fn with_config(mut self, config: FinderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_window_half_width(mut self, half_width: usize) -> Self {
        self.config.window_half_width = half_width;
        self
    }

    pub fn with_max_pairs(mut self, max_pairs: usize) -> Self {
        self.config.max_pairs = max_pairs;
        self
    }

    pub fn with_unique_forward(mut self, yes: bool) -> Self {
        self.config.unique_forward = yes;
        self
    }

    pub fn with_tm_model<M2>(self, tm_model: M2) -> PrimerPairFinder<M2, S> {
        PrimerPairFinder {
            input: self.input,
            config: self.config,
            tm_model,
            scorer: self.scorer,
            cancel: self.cancel,
            state: self.state,
            counters: self.counters,
        }
    }

    pub fn with_scorer<S2>(self, scorer: S2) -> PrimerPairFinder<M, S2> {
        PrimerPairFinder {
            input: self.input,
            config: self.config,
            tm_model: self.tm_model,
            scorer,
            cancel: self.cancel,
            state: self.state,
            counters: self.counters,
        }
    }

    /// Share an externally owned token (e.g. one held by a timer).
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn input(&self) -> &PrimerDesignInput {
        &self.input
    }

    pub fn config(&self) -> FinderConfig {
        self.config
    }

    /// A handle that cancels this finder.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Ask a running (or future) search to stop at its next check.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub fn state(&self) -> FinderState {
        FinderState::from_u8(self.state.load(Ordering::Acquire))
    }

    pub fn stats(&self) -> SearchStats {
        SearchStats {
            forward_candidates: self.counters.forward.load(Ordering::Relaxed),
            reverse_candidates: self.counters.reverse.load(Ordering::Relaxed),
            pairs_evaluated: self.counters.evaluated.load(Ordering::Relaxed),
        }
    }

    fn set_state(&self, state: FinderState) {
        debug!("finder state -> {:?}", state);
        self.state.store(state as u8, Ordering::Release);
    }

    fn fail(&self, err: FinderError) -> PrimerPairFinderResult {
        self.set_state(FinderState::Error);
        debug!("search failed: {err}");
        Err(err)
    }

    fn cancelled(&self, mut pairs: Vec<PrimerPair>) -> PrimerPairFinderResult {
        self.set_state(FinderState::Cancelled);
        warn!("primer pair search cancelled with {} pair(s) accumulated", pairs.len());
        sort_by_score(&mut pairs);
        Ok(SearchOutcome::Cancelled(pairs))
    }
}

impl<M: TmModel, S: PairScorer> PrimerPairFinder<M, S> {
    /// Run the whole search on the calling thread.
    pub fn find_primer_pairs(&self) -> PrimerPairFinderResult {
        self.counters.reset();
        if self.is_cancelled() {
            return self.cancelled(Vec::new());
        }

        self.set_state(FinderState::Validating);
        if let Err(e) = self.input.validate() {
            return self.fail(e.into());
        }

        self.set_state(FinderState::Enumerating);
        let Some((forward, reverse)) = self.enumerate_candidates() else {
            return self.cancelled(Vec::new());
        };
        if forward.is_empty() {
            return self.fail(FinderError::NoForwardPrimers);
        }
        if reverse.is_empty() {
            return self.fail(FinderError::NoReversePrimers);
        }

        self.set_state(FinderState::Pairing);
        let (acc, interrupted) = self.pair_candidates(&forward, reverse);
        let mut pairs = acc.into_inner();
        if interrupted {
            return self.cancelled(pairs);
        }
        if pairs.is_empty() {
            return self.fail(FinderError::NoPairsFound);
        }
        sort_by_score(&mut pairs);

        let stats = self.stats();
        info!(
            "{} forward / {} reverse candidates, {} pairs evaluated, {} kept (best score {:.2})",
            stats.forward_candidates,
            stats.reverse_candidates,
            stats.pairs_evaluated,
            pairs.len(),
            pairs[0].score
        );
        self.set_state(FinderState::Done);
        Ok(SearchOutcome::Ranked(pairs))
    }

    /// Forward and reverse candidates over every primer length; `None` when cancelled.
    fn enumerate_candidates(&self) -> Option<(Vec<Primer>, Vec<Primer>)> {
        let input = &*self.input;
        let amplicon = input.bounded_amplicon().to_ascii_uppercase().into_bytes();
        let enumerator = PrimerCandidateEnumerator::new(
            &amplicon,
            input.amplicon_size_range.min(),
            input.tm_range,
            input.sodium_concentration,
            &self.tm_model,
        )
        .unique_forward(self.config.unique_forward)
        .with_cancel_token(self.cancel.clone());
        let suffixes = [
            (Direction::Forward, SuffixPattern::parse(&input.forward_suffix), &self.counters.forward),
            (Direction::Reverse, SuffixPattern::parse(&input.reverse_suffix), &self.counters.reverse),
        ];
        for (direction, suffix, _) in &suffixes {
            if !suffix.is_valid() {
                debug!("{direction} suffix pattern {:?} is malformed and matches nothing", suffix.as_str());
            }
        }

        let mut forward = Vec::new();
        let mut reverse = Vec::new();
        for primer_len in input.primer_size_range.iter() {
            if self.is_cancelled() {
                return None;
            }
            for (direction, suffix, counter) in &suffixes {
                let out = match direction {
                    Direction::Forward => &mut forward,
                    Direction::Reverse => &mut reverse,
                };
                let before = out.len();
                for primer in enumerator.candidates(*direction, primer_len, input.prefix(*direction), suffix) {
                    out.push(primer);
                    counter.fetch_add(1, Ordering::Relaxed);
                    if self.is_cancelled() {
                        return None;
                    }
                }
                if self.is_cancelled() {
                    return None;
                }
                debug!("length {primer_len}: {} {direction} candidates", out.len() - before);
            }
        }
        Some((forward, reverse))
    }

    /// Returns the accumulator and whether cancellation interrupted pairing.
    fn pair_candidates(&self, forward: &[Primer], reverse: Vec<Primer>) -> (TopKPairAccumulator, bool) {
        let sizes = self.input.amplicon_size_range;
        let search = NearestTmWindowSearch::new(reverse, self.config.window_half_width);
        let mut acc = TopKPairAccumulator::with_capacity(self.config.max_pairs);

        for f in forward {
            if self.is_cancelled() {
                return (acc, true);
            }
            for r in search.window(f.tm) {
                if self.is_cancelled() {
                    return (acc, true);
                }
                let Some(len) = amplicon_span(f, r) else { continue };
                if !sizes.contains(len) {
                    continue;
                }
                let Some(mut pair) = PrimerPair::new(f.clone(), r.clone(), Arc::clone(&self.input)) else {
                    continue;
                };
                pair.recompute_score(&self.scorer);
                self.counters.evaluated.fetch_add(1, Ordering::Relaxed);
                acc.add(pair);
            }
        }
        (acc, false)
    }
}

fn sort_by_score(pairs: &mut [PrimerPair]) {
    pairs.sort_by(|a, b| a.score.total_cmp(&b.score));
}
