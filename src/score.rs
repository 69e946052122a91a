//! Pair scoring. Lower is better.
//!
//! The finder only sees the [`PairScorer`] trait; [`DimerPairScorer`] is the default and any
//! `Fn(&Primer, &Primer) -> f64` closure works as a stub.
use crate::dimer;
use crate::primer::Primer;

pub trait PairScorer {
    /// Penalty for pairing `forward` with `reverse`.
    fn score(&self, forward: &Primer, reverse: &Primer) -> f64;
}

impl<F> PairScorer for F
where
    F: Fn(&Primer, &Primer) -> f64,
{
    #[inline]
    fn score(&self, forward: &Primer, reverse: &Primer) -> f64 {
        self(forward, reverse)
    }
}

/// `homo(forward) + homo(reverse) + hetero(forward, reverse) + |Tm_f - Tm_r|`.
///
/// Dimer terms use the full, prefixed sequences; homo-dimer scores come from the primers'
/// cached [`Primer::homo_dimer_score`].
#[derive(Clone, Copy, Debug, Default)]
pub struct DimerPairScorer;

impl PairScorer for DimerPairScorer {
    fn score(&self, forward: &Primer, reverse: &Primer) -> f64 {
        let hetero = dimer::score(forward.sequence.as_bytes(), reverse.sequence.as_bytes());
        let dimers = forward.homo_dimer_score + reverse.homo_dimer_score + hetero;
        dimers as f64 + (forward.tm - reverse.tm).abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn primer(seq: &str, tm: f64) -> Primer {
        Primer::new(seq, &move |_: &[u8], _: f64| tm, 1.0, 0)
    }

    #[test]
    fn default_scorer_sums_dimers_and_tm_delta() {
        let f = primer("CCCTTCAGCAAAGCATGGCG", 76.2);
        let r = primer("TCCTTGTTAATATTCTTCCACC", 67.0);
        // 22 + 18 + 15 + 9.2
        assert!((DimerPairScorer.score(&f, &r) - 64.2).abs() < 1e-9);
    }

    #[test]
    fn closures_are_scorers() {
        let by_tm = |f: &Primer, r: &Primer| f.tm + r.tm;
        assert_eq!(by_tm.score(&primer("A", 1.0), &primer("C", 2.0)), 3.0);
    }
}
