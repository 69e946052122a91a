//! Primer-dimer scoring.
//!
//! `seq1` is slid across the reverse complement of `seq2`. At every alignment offset we walk
//! forward through `seq1` and backward through `seq2`, adding a weight for each Watson-Crick
//! pair: 3 for G*C, 2 for A*T. Unknown bases never pair. The score is the best offset's total.
//!
//! Offsets run `0..len(seq1)` anchored at the 5' end of `seq1`, then `1..len(seq2)` anchored
//! at the 5' end of `seq1` with `seq2` shifted; offset zero is visited once.
//!
//! # Examples
//! ```
//! use primerpair::dimer::{score, homo_score};
//! assert_eq!(score(b"AAAA", b"TTTT"), 8);
//! assert_eq!(score(b"GGGG", b"CCCC"), 12);
//! assert_eq!(homo_score(b"GAATTC"), 14);
//! assert_eq!(homo_score(b"GGGG"), 0);
//! ```
use crate::thermo::complement;

/// Pairing weight of a base when it pairs.
#[inline]
fn weight(b: u8) -> u32 {
    match b.to_ascii_uppercase() {
        b'G' | b'C' => 3,
        b'A' | b'T' => 2,
        _ => 0,
    }
}

/// Sum of pair weights walking `a` forward from `i` and `b` backward from `j` (inclusive).
#[inline]
fn walk(a: &[u8], b: &[u8], i: usize, j: usize) -> u32 {
    a[i..]
        .iter()
        .zip(b[..=j].iter().rev())
        .filter(|&(&x, &y)| complement(y).is_some_and(|c| c == x.to_ascii_uppercase()))
        .map(|(&x, _)| weight(x))
        .sum()
}

/// Heuristic dimer score between `seq1` and `seq2`. Higher means more complementary.
pub fn score(seq1: &[u8], seq2: &[u8]) -> u32 {
    if seq1.is_empty() || seq2.is_empty() {
        return 0;
    }
    let last = seq2.len() - 1;
    let anchored_on_seq1 = (0..seq1.len()).map(|o| walk(seq1, seq2, o, last));
    let anchored_on_seq2 = (1..seq2.len()).map(|o| walk(seq1, seq2, 0, last - o));
    anchored_on_seq1.chain(anchored_on_seq2).max().unwrap_or(0)
}

/// Self-dimer score, `score(seq, seq)`.
#[inline]
pub fn homo_score(seq: &[u8]) -> u32 {
    score(seq, seq)
}

/// String convenience for [`score`].
pub fn score_str(seq1: &str, seq2: &str) -> u32 {
    score(seq1.as_bytes(), seq2.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn revcomp(s: &str) -> String {
        s.bytes().rev().map(|b| complement(b).unwrap() as char).collect()
    }

    #[test]
    fn known_self_dimer_scores() {
        for (seq, want) in [
            ("CGCCAGATGAATTGTACAATT", 26),
            ("GTCAACTG", 10),
            ("AGCATGGCGGAGTGC", 22),
            ("AGGCAACGAAAGATACTTTG", 24),
        ] {
            assert_eq!(homo_score(seq.as_bytes()), want, "{seq}");
        }
    }

    #[test]
    fn known_cross_scores() {
        assert_eq!(score_str("ACGT", "TTTT"), 2);
        assert_eq!(score_str("ATAT", "ATAT"), 8);
        assert_eq!(score_str("GGGG", "GGGG"), 0);
    }

    #[test]
    fn case_insensitive_and_unknown_bases_never_pair() {
        assert_eq!(score_str("aaaa", "tttt"), 8);
        assert_eq!(score_str("NNNN", "NNNN"), 0);
        assert_eq!(score_str("ANAA", "TTTT"), 6);
        assert_eq!(score_str("", "ACGT"), 0);
    }

    #[test]
    fn symmetric_under_swapped_reverse_complements() {
        let seqs = [
            "A", "GC", "ACGT", "TTTGCA", "GATTACA", "CGCCAGATGAATTGTACAATT", "AGGCAACGAAAGATACTTTG",
            "CCCTTCAGCAAAGCATGGCG", "TCCTTGTTAATATTCTTCCACC", "GGGGAT",
        ];
        for a in seqs {
            for b in seqs {
                assert_eq!(
                    score_str(a, b),
                    score_str(&revcomp(b), &revcomp(a)),
                    "{a} / {b}"
                );
            }
        }
    }
}
