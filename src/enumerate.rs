//! Candidate primer enumeration.
//!
//! A window of the requested primer length slides across the amplicon (forward) or its
//! reverse complement (reverse). Each window is checked against the 3' suffix pattern, prefixed,
//! given a Tm by the injected [`TmModel`] and kept only when the Tm falls inside the range.
//!
//! Offsets:
//! - forward: `0..L - amplicon_min`, position = offset
//! - reverse: `0..=L - amplicon_min`, position = `L - offset`
//!
//! Windows that would run past the end of the strand are never produced. With a
//! [`CancelToken`] attached, the token is checked before every window and a cancelled
//! iterator ends early.
//! Forward windows must also occur exactly once in the amplicon (overlapping occurrences
//! count); reverse windows are not checked.
//!
//! ```
//! use primerpair::enumerate::PrimerCandidateEnumerator;
//! use primerpair::primer::Direction;
//! use primerpair::range::Range;
//! use primerpair::suffix::SuffixPattern;
//!
//! let flat = |_: &[u8], _: f64| 60.0;
//! let e = PrimerCandidateEnumerator::new(b"AACCGGTTAC", 6, Range::new(50.0, 70.0), 1.0, &flat);
//! let any = SuffixPattern::any();
//! let fwd: Vec<_> = e.candidates(Direction::Forward, 3, "", &any).collect();
//! assert_eq!(fwd.iter().map(|p| p.sequence.as_str()).collect::<Vec<_>>(), ["AAC", "ACC", "CCG", "CGG"]);
//! let rev: Vec<_> = e.candidates(Direction::Reverse, 3, "", &any).map(|p| p.sequence_position).collect();
//! assert_eq!(rev, [10, 9, 8, 7, 6]);
//! ```
use core::iter::FusedIterator;

use aho_corasick::AhoCorasick;
use bio::alphabets::dna;

use crate::finder::CancelToken;
use crate::primer::{Direction, Primer};
use crate::range::Range;
use crate::suffix::SuffixPattern;
use crate::thermo::TmModel;

/// Shared state for enumerating one amplicon at several primer lengths.
pub struct PrimerCandidateEnumerator<'a, M: ?Sized> {
    amplicon: &'a [u8],
    reverse_strand: Vec<u8>,
    amplicon_min: usize,
    tm_range: Range<f64>,
    sodium: f64,
    tm_model: &'a M,
    unique_forward: bool,
    cancel: Option<CancelToken>,
}

impl<'a, M: TmModel + ?Sized> PrimerCandidateEnumerator<'a, M> {
    /// `amplicon` should be upper case. The reverse complement is computed here, once.
    pub fn new(amplicon: &'a [u8], amplicon_min: usize, tm_range: Range<f64>, sodium: f64, tm_model: &'a M) -> Self {
        Self {
            amplicon,
            reverse_strand: dna::revcomp(amplicon),
            amplicon_min,
            tm_range,
            sodium,
            tm_model,
            unique_forward: true,
            cancel: None,
        }
    }

    /// Toggle the forward uniqueness filter (on by default).
    pub fn unique_forward(mut self, yes: bool) -> Self {
        self.unique_forward = yes;
        self
    }

    /// Stop iterators early once `token` is cancelled.
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn reverse_strand(&self) -> &[u8] {
        &self.reverse_strand
    }

    /// Exclusive upper bound on window offsets for `direction`.
    pub fn offset_limit(&self, direction: Direction) -> usize {
        let slack = self.amplicon.len().checked_sub(self.amplicon_min);
        match direction {
            Direction::Forward => slack.unwrap_or(0),
            Direction::Reverse => slack.map_or(0, |s| s + 1),
        }
    }

    /// Lazily yield every valid candidate of `primer_len` bases on one strand.
    pub fn candidates<'s>(
        &'s self,
        direction: Direction,
        primer_len: usize,
        prefix: &'s str,
        suffix: &'s SuffixPattern,
    ) -> Candidates<'s, M> {
        let strand: &[u8] = match direction {
            Direction::Forward => self.amplicon,
            Direction::Reverse => &self.reverse_strand,
        };
        Candidates {
            strand,
            amplicon: self.amplicon,
            direction,
            primer_len,
            prefix: prefix.as_bytes(),
            suffix,
            tm_range: self.tm_range,
            sodium: self.sodium,
            tm_model: self.tm_model,
            unique: self.unique_forward && direction == Direction::Forward,
            cancel: self.cancel.as_ref(),
            offset: 0,
            end: self.offset_limit(direction),
        }
    }
}

/// Iterator returned by [`PrimerCandidateEnumerator::candidates`]. Single pass.
pub struct Candidates<'s, M: ?Sized> {
    strand: &'s [u8],
    amplicon: &'s [u8],
    direction: Direction,
    primer_len: usize,
    prefix: &'s [u8],
    suffix: &'s SuffixPattern,
    tm_range: Range<f64>,
    sodium: f64,
    tm_model: &'s M,
    unique: bool,
    cancel: Option<&'s CancelToken>,
    offset: usize,
    end: usize,
}

impl<M: TmModel + ?Sized> Candidates<'_, M> {
    fn position(&self, offset: usize) -> usize {
        match self.direction {
            Direction::Forward => offset,
            Direction::Reverse => self.amplicon.len() - offset,
        }
    }

    fn evaluate(&self, offset: usize) -> Option<Primer> {
        let window = &self.strand[offset..offset + self.primer_len];
        if !self.suffix.matches(window) {
            return None;
        }
        if self.unique && !occurs_once(self.amplicon, window) {
            return None;
        }
        let mut full = Vec::with_capacity(self.prefix.len() + window.len());
        full.extend(self.prefix.iter().map(u8::to_ascii_uppercase));
        full.extend_from_slice(window);
        let tm = self.tm_model.compute(&full, self.sodium);
        if !self.tm_range.contains(tm) {
            return None;
        }
        let sequence = String::from_utf8(full).ok()?;
        let homo_dimer_score = crate::dimer::homo_score(sequence.as_bytes());
        Some(Primer { sequence, tm, sequence_position: self.position(offset), homo_dimer_score })
    }
}

impl<M: TmModel + ?Sized> Iterator for Candidates<'_, M> {
    type Item = Primer;

    fn next(&mut self) -> Option<Primer> {
        if self.primer_len == 0 {
            return None;
        }
        while self.offset < self.end {
            if self.cancel.is_some_and(CancelToken::is_cancelled) {
                self.offset = self.end;
                break;
            }
            let offset = self.offset;
            if offset + self.primer_len > self.strand.len() {
                self.offset = self.end;
                break;
            }
            self.offset += 1;
            if let Some(p) = self.evaluate(offset) {
                return Some(p);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.end.saturating_sub(self.offset)))
    }
}

impl<M: TmModel + ?Sized> FusedIterator for Candidates<'_, M> {}

/// `needle` occurs exactly once in `haystack`, counting overlapping occurrences.
pub fn occurs_once(haystack: &[u8], needle: &[u8]) -> bool {
    match AhoCorasick::new([needle]) {
        Ok(ac) => ac.find_overlapping_iter(haystack).take(2).count() == 1,
        Err(_) => false,
    }
}
