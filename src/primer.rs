//! Core types for **primers** and **primer pairs**.
//!
//! These are plain owned values. A [`Primer`] is created once per accepted candidate and never
//! changes afterwards; a [`PrimerPair`] carries a shared handle to the (one-based) input it was
//! designed from, so presentation code can report coordinates without a second lookup.
use core::fmt;
use std::sync::Arc;

use crate::dimer;
use crate::input::PrimerDesignInput;
use crate::score::PairScorer;
use crate::thermo::TmModel;

/// Strand a candidate was read from.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Direction {
    /// Top strand, read 5'->3' left to right.
    Forward,
    /// Reverse complement of the top strand.
    Reverse,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Forward => "forward",
            Direction::Reverse => "reverse",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single candidate primer.
#[derive(Clone, Debug, PartialEq)]
pub struct Primer {
    /// Full primer, prefix included, upper case.
    pub sequence: String,
    /// Melting temperature of [`Primer::sequence`], degC.
    pub tm: f64,
    /// Forward primers: 0-based start of the window in the amplicon.
    /// Reverse primers: amplicon length minus the offset on the reverse-complement strand,
    /// i.e. the exclusive end of the binding site in forward coordinates.
    pub sequence_position: usize,
    /// `dimer::homo_score(sequence)`, cached at creation.
    pub homo_dimer_score: u32,
}

impl Primer {
    /// Build a primer from its full sequence, computing Tm and the self-dimer score.
    ///
    /// ```
    /// use primerpair::primer::Primer;
    /// use primerpair::thermo::NearestNeighborTm;
    /// let p = Primer::new("ATGCATGC", &NearestNeighborTm::default(), 1.0, 7);
    /// assert_eq!(p.tm, 32.8);
    /// assert_eq!(p.sequence_position, 7);
    /// ```
    pub fn new<M: TmModel + ?Sized>(sequence: impl Into<String>, tm_model: &M, sodium: f64, position: usize) -> Self {
        let sequence = sequence.into();
        let tm = tm_model.compute(sequence.as_bytes(), sodium);
        let homo_dimer_score = dimer::homo_score(sequence.as_bytes());
        Self { sequence, tm, sequence_position: position, homo_dimer_score }
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

impl fmt::Display for Primer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (Tm {:.1}, pos {})", self.sequence, self.tm, self.sequence_position)
    }
}

/// A forward/reverse combination with its derived score.
#[derive(Clone, Debug)]
pub struct PrimerPair {
    pub forward: Primer,
    pub reverse: Primer,
    /// Input the pair was designed from (one-based coordinates).
    pub params: Arc<PrimerDesignInput>,
    /// Penalty, lower is better. Set by [`PrimerPair::recompute_score`].
    pub score: f64,
    /// `reverse.sequence_position - forward.sequence_position`.
    pub amplicon_length: usize,
    /// Display name, empty unless a caller assigns one.
    pub name: String,
}

impl PrimerPair {
    /// Pair two primers. `None` if the reverse site does not end after the forward start.
    pub fn new(forward: Primer, reverse: Primer, params: Arc<PrimerDesignInput>) -> Option<Self> {
        let amplicon_length = amplicon_span(&forward, &reverse)?;
        Some(Self { forward, reverse, params, score: 0.0, amplicon_length, name: String::new() })
    }

    /// Recompute [`PrimerPair::score`] with `scorer`.
    pub fn recompute_score<S: PairScorer + ?Sized>(&mut self, scorer: &S) -> f64 {
        self.score = scorer.score(&self.forward, &self.reverse);
        self.score
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Absolute Tm difference between the two primers.
    pub fn tm_delta(&self) -> f64 {
        (self.forward.tm - self.reverse.tm).abs()
    }

    /// 1-based amplicon start within the full input sequence.
    pub fn amplicon_start(&self) -> usize {
        self.params.amplicon_bounds.min() + self.forward.sequence_position
    }

    /// 1-based inclusive amplicon end within the full input sequence.
    pub fn amplicon_end(&self) -> usize {
        self.amplicon_start() + self.amplicon_length - 1
    }
}

/// Amplicon length spanned by a forward/reverse pair, if positive.
#[inline]
pub fn amplicon_span(forward: &Primer, reverse: &Primer) -> Option<usize> {
    reverse
        .sequence_position
        .checked_sub(forward.sequence_position)
        .filter(|&len| len > 0)
}

impl fmt::Display for PrimerPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.name.is_empty() {
            write!(f, "{}: ", self.name)?;
        }
        write!(
            f,
            "{} / {} ({} bp, score {:.2})",
            self.forward.sequence, self.reverse.sequence, self.amplicon_length, self.score
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::DimerPairScorer;

    fn stub(seq: &str, tm: f64, pos: usize) -> Primer {
        Primer::new(seq, &move |_: &[u8], _: f64| tm, 1.0, pos)
    }

    #[test]
    fn primer_caches_homo_dimer_score() {
        let p = stub("GAATTC", 50.0, 0);
        assert_eq!(p.homo_dimer_score, 14);
        assert_eq!(p.tm, 50.0);
        assert_eq!(p.len(), 6);
    }

    #[test]
    fn pair_length_is_reverse_minus_forward() {
        let params = Arc::new(PrimerDesignInput::new("ACGTACGTAC"));
        let pair = PrimerPair::new(stub("ACG", 50.0, 2), stub("GTA", 52.0, 9), params.clone()).unwrap();
        assert_eq!(pair.amplicon_length, 7);
        assert_eq!(pair.amplicon_start(), 3);
        assert_eq!(pair.amplicon_end(), 9);
        assert!((pair.tm_delta() - 2.0).abs() < 1e-12);
        assert!(PrimerPair::new(stub("ACG", 50.0, 5), stub("GTA", 52.0, 5), params.clone()).is_none());
        assert!(PrimerPair::new(stub("ACG", 50.0, 6), stub("GTA", 52.0, 5), params).is_none());
    }

    #[test]
    fn recompute_score_uses_scorer() {
        let params = Arc::new(PrimerDesignInput::new("ACGTACGTAC"));
        let mut pair = PrimerPair::new(stub("AAAA", 50.0, 0), stub("TTTT", 53.0, 10), params).unwrap();
        let s = pair.recompute_score(&DimerPairScorer);
        // homo(AAAA)=0, homo(TTTT)=0, hetero=8, |dTm|=3
        assert!((s - 11.0).abs() < 1e-12);
        assert_eq!(pair.score, s);
        let named = pair.with_name("P1");
        assert!(named.to_string().starts_with("P1: AAAA / TTTT (10 bp"));
    }
}
