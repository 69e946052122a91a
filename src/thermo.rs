//! Melting-temperature models.
//!
//! The search treats Tm as an injected pure function: anything implementing [`TmModel`]
//! can drive candidate filtering and pairing. Plain closures implement the trait, which is
//! how tests plug in deterministic stubs.
//!
//! The default model, [`NearestNeighborTm`], uses the unified nearest-neighbour stacking
//! parameters in [`crate::data::nearest_neighbor`] with a sodium correction.
//!
//! # Examples
//! ```
//! use primerpair::thermo::{NearestNeighborTm, TmModel};
//! let nn = NearestNeighborTm::default();
//! assert_eq!(nn.compute(b"TAATACGACTCACTATAGGG", 1.0), 64.0);
//!
//! // any `Fn(&[u8], f64) -> f64` is a model too
//! let by_length = |seq: &[u8], _na: f64| seq.len() as f64;
//! assert_eq!(by_length.compute(b"ACGT", 1.0), 4.0);
//! ```
use crate::data::nearest_neighbor as nn;

/// `compute(sequence, sodium_molar) -> Tm in degC`.
pub trait TmModel {
    fn compute(&self, sequence: &[u8], sodium: f64) -> f64;
}

impl<F> TmModel for F
where
    F: Fn(&[u8], f64) -> f64,
{
    #[inline]
    fn compute(&self, sequence: &[u8], sodium: f64) -> f64 {
        self(sequence, sodium)
    }
}

/// Two-state nearest-neighbour Tm, rounded to one decimal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NearestNeighborTm {
    /// Total strand concentration, molar.
    pub primer_concentration: f64,
}

impl Default for NearestNeighborTm {
    fn default() -> Self {
        Self { primer_concentration: 1e-6 }
    }
}

impl NearestNeighborTm {
    pub fn new(primer_concentration: f64) -> Self {
        Self { primer_concentration }
    }

    /// Summed `(enthalpy, entropy)` for `seq`, including terminal initiation and the symmetry
    /// penalty. The sodium correction is applied later in [`TmModel::compute`].
    pub fn enthalpy_entropy(seq: &[u8]) -> (f64, f64) {
        let (Some(&first), Some(&last)) = (seq.first(), seq.last()) else {
            return (0.0, 0.0);
        };
        let (h5, s5) = nn::initiation(first);
        let (h3, s3) = nn::initiation(last);
        let mut stack_h = 0.0;
        let mut stack_s = 0.0;
        for w in seq.windows(2) {
            if let Some(st) = nn::stack(w[0], w[1]) {
                stack_h += st.enthalpy;
                stack_s += st.entropy;
            }
        }
        let mut entropy = s5 + s3 + stack_s;
        if is_self_complementary(seq) {
            entropy += nn::SYMMETRY_ENTROPY;
        }
        (h5 + h3 + stack_h, entropy)
    }
}

impl TmModel for NearestNeighborTm {
    fn compute(&self, seq: &[u8], sodium: f64) -> f64 {
        if seq.is_empty() {
            return 0.0;
        }
        let (dh, ds) = Self::enthalpy_entropy(seq);
        let phosphates = (seq.len() - 1) as f64;
        let k = if is_self_complementary(seq) { 1.0 } else { 4.0 };
        let num = 1000.0 * dh - nn::SALT_ENTHALPY * phosphates * sodium.ln();
        let den = ds
            + nn::SALT_ENTROPY * phosphates * sodium.ln()
            + nn::GAS_CONSTANT * (self.primer_concentration / k).ln();
        round_tenth(num / den - nn::KELVIN_OFFSET)
    }
}

#[inline]
fn round_tenth(t: f64) -> f64 {
    (t * 10.0 + 0.5).floor() / 10.0
}

/// `seq` equals its own reverse complement. Sequences with non-ACGT bases never are.
pub fn is_self_complementary(seq: &[u8]) -> bool {
    let n = seq.len();
    (0..n).all(|i| match complement(seq[i]) {
        Some(c) => c == seq[n - 1 - i].to_ascii_uppercase(),
        None => false,
    })
}

#[inline]
pub(crate) fn complement(b: u8) -> Option<u8> {
    match b.to_ascii_uppercase() {
        b'A' => Some(b'T'),
        b'T' => Some(b'A'),
        b'C' => Some(b'G'),
        b'G' => Some(b'C'),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_melting_temperatures() {
        let m = NearestNeighborTm::default();
        let cases: [(&str, f64, f64); 9] = [
            ("ATGCATGC", 1.0, 32.8),
            ("ATGCATGC", 0.05, 20.7),
            ("AGCGGATAACAATTTCACACAGGA", 1.0, 74.2),
            ("TAATACGACTCACTATAGGG", 1.0, 64.0),
            ("TAATACGACTCACTATAGGG", 0.05, 48.7),
            ("ATGCCCTTCAGCAAAGCATGGCGGA", 1.0, 83.1),
            ("AGCGGATAACAATTTCACACAGGG", 0.05, 59.2),
            ("ATTCCTTGTTAATATTCTTC", 1.0, 59.3),
            ("CATCATATGCCCTTCAGCAAAGCATG", 1.0, 76.1),
        ];
        for (seq, na, want) in cases {
            let got = m.compute(seq.as_bytes(), na);
            assert!((got - want).abs() < 1e-9, "{seq}@{na}: got {got}, want {want}");
        }
    }

    #[test]
    fn lower_case_matches_upper_case() {
        let m = NearestNeighborTm::default();
        assert_eq!(m.compute(b"atgcatgc", 1.0), m.compute(b"ATGCATGC", 1.0));
    }

    #[test]
    fn empty_sequence_is_zero() {
        assert_eq!(NearestNeighborTm::default().compute(b"", 1.0), 0.0);
    }

    #[test]
    fn palindromes_are_detected() {
        assert!(is_self_complementary(b"ATGCAT"));
        assert!(is_self_complementary(b"gaattc"));
        assert!(!is_self_complementary(b"GGGG"));
        assert!(!is_self_complementary(b"ANNT"));
    }

    #[test]
    fn symmetry_penalty_applies_to_palindromes() {
        // AT + TG + GC + CA + AT, A/T at both ends
        let (h, s) = NearestNeighborTm::enthalpy_entropy(b"ATGCAT");
        let want_h = 2.3 + 2.3 + (-7.2 - 8.5 - 9.8 - 8.5 - 7.2);
        let want_s = 4.1 + 4.1 + (-20.4 - 22.7 - 24.4 - 22.7 - 20.4) - 1.4;
        assert!((h - want_h).abs() < 1e-9);
        assert!((s - want_s).abs() < 1e-9);
    }

    #[test]
    fn closure_models() {
        let constant = |_: &[u8], _: f64| 60.0;
        assert_eq!(constant.compute(b"ACGT", 0.1), 60.0);
    }
}
