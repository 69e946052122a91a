//! Search parameters and their validation.
//!
//! [`PrimerDesignInput`] is owned by the caller and read, never mutated, by the search.
//! Coordinates in [`PrimerDesignInput::amplicon_bounds`] are **1-based and inclusive**, the
//! way a user selects a region; [`PrimerDesignInput::zero_based_bounds`] gives the half-open
//! slice the search works on.
//!
//! ```
//! use primerpair::input::{InputError, PrimerDesignInput};
//! use primerpair::range::Range;
//!
//! let mut input = PrimerDesignInput::new("ACGTACGTACGTACGTACGTACGTACGTACGTACGTACGTACGTACGTACGTACGT");
//! assert!(input.validate().is_ok());
//! input.primer_size_range = Range::new(30, 30);
//! assert!(matches!(input.validate(), Err(InputError::AmpliconTooSmall { .. })));
//! ```
use thiserror::Error;

use crate::primer::Direction;
use crate::range::Range;

/// Primer length used when none is given.
pub const DEFAULT_PRIMER_SIZE: usize = 25;
/// Amplicon sizes from `len - DEFAULT_AMPLICON_SLACK` up to `len` are accepted by default.
pub const DEFAULT_AMPLICON_SLACK: usize = 20;
pub const DEFAULT_TM_RANGE: Range<f64> = Range::new(55.0, 85.0);
/// Molar.
pub const DEFAULT_SODIUM: f64 = 1.0;
pub const DEFAULT_SUFFIX: &str = "***";

/// Reasons an input is rejected before any search work starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("The target sequence is empty.")]
    EmptySequence,
    #[error("The target sequence contains an invalid character '{character}' at position {position}; only A, C, G and T are allowed.")]
    InvalidSequence { character: char, position: usize },
    #[error("The {direction} prefix contains an invalid character '{character}'; only A, C, G and T are allowed.")]
    InvalidPrefix { direction: Direction, character: char },
    #[error("Amplicon bounds {bounds} must be ordered and lie within 1..={len}.")]
    AmpliconBounds { bounds: Range<usize>, len: usize },
    #[error("Amplicon size range {range} must be ordered and start at 1 or more.")]
    AmpliconSizeRange { range: Range<usize> },
    #[error("Maximum amplicon length must be equal to or lower than target sequence length.")]
    AmpliconLongerThanTarget { max: usize, target: usize },
    #[error("Primer size range {range} must be ordered and start at 1 or more.")]
    PrimerSizeRange { range: Range<usize> },
    #[error("The amplicon size that you have selected is too small. The maximum amplicon size must be at least 2 times longer than the minimum primer length.")]
    AmpliconTooSmall { amplicon_max: usize, primer_min: usize },
    #[error("Maximum primer length {primer_max} must not exceed the maximum amplicon length {amplicon_max}.")]
    PrimerLongerThanAmplicon { primer_max: usize, amplicon_max: usize },
    #[error("Melting temperature range {range} must be finite and ordered.")]
    TmRange { range: Range<f64> },
    #[error("Sodium concentration must be a positive number (got {0}).")]
    SodiumConcentration(f64),
}

/// Everything the finder needs to know about one search.
#[derive(Clone, Debug, PartialEq)]
pub struct PrimerDesignInput {
    /// Full target sequence.
    pub sequence: String,
    /// 1-based inclusive slice of [`PrimerDesignInput::sequence`] to search.
    pub amplicon_bounds: Range<usize>,
    /// Accepted amplicon lengths.
    pub amplicon_size_range: Range<usize>,
    /// Primer lengths to try, excluding prefixes.
    pub primer_size_range: Range<usize>,
    /// Accepted Tm (degC) of the prefixed primer.
    pub tm_range: Range<f64>,
    /// Bases prepended to every forward primer (e.g. a restriction site).
    pub forward_prefix: String,
    pub reverse_prefix: String,
    /// 3' constraint on forward primers, see [`crate::suffix`].
    pub forward_suffix: String,
    pub reverse_suffix: String,
    /// Molar.
    pub sodium_concentration: f64,
}

impl PrimerDesignInput {
    /// Defaults for `sequence` (upper-cased): the whole sequence as amplicon, amplicon sizes
    /// within 20 bp of its length (never below 1), 25-mers, Tm 55..=85 degC, no prefixes, any suffix, 1 M Na+.
    pub fn new(sequence: impl Into<String>) -> Self {
        let sequence = sequence.into().to_ascii_uppercase();
        let len = sequence.len();
        Self {
            amplicon_bounds: Range::new(1, len),
            amplicon_size_range: Range::new(len.saturating_sub(DEFAULT_AMPLICON_SLACK).max(1), len),
            primer_size_range: Range::new(DEFAULT_PRIMER_SIZE, DEFAULT_PRIMER_SIZE),
            tm_range: DEFAULT_TM_RANGE,
            forward_prefix: String::new(),
            reverse_prefix: String::new(),
            forward_suffix: DEFAULT_SUFFIX.to_string(),
            reverse_suffix: DEFAULT_SUFFIX.to_string(),
            sodium_concentration: DEFAULT_SODIUM,
            sequence,
        }
    }

    /// Half-open, 0-based `[start, end)` of the amplicon inside [`PrimerDesignInput::sequence`].
    pub fn zero_based_bounds(&self) -> core::ops::Range<usize> {
        self.amplicon_bounds.min().saturating_sub(1)..self.amplicon_bounds.max()
    }

    /// The slice of the sequence being searched. Empty if the bounds are out of range.
    pub fn bounded_amplicon(&self) -> &str {
        self.sequence.get(self.zero_based_bounds()).unwrap_or("")
    }

    pub fn prefix(&self, direction: Direction) -> &str {
        match direction {
            Direction::Forward => &self.forward_prefix,
            Direction::Reverse => &self.reverse_prefix,
        }
    }

    pub fn suffix(&self, direction: Direction) -> &str {
        match direction {
            Direction::Forward => &self.forward_suffix,
            Direction::Reverse => &self.reverse_suffix,
        }
    }

    /// Check every rule in order and report the first violation.
    pub fn validate(&self) -> Result<(), InputError> {
        if self.sequence.is_empty() {
            return Err(InputError::EmptySequence);
        }
        if let Some((position, &b)) = first_non_acgt(self.sequence.as_bytes()) {
            return Err(InputError::InvalidSequence { character: b as char, position: position + 1 });
        }
        for direction in [Direction::Forward, Direction::Reverse] {
            if let Some((_, &b)) = first_non_acgt(self.prefix(direction).as_bytes()) {
                return Err(InputError::InvalidPrefix { direction, character: b as char });
            }
        }

        let len = self.sequence.len();
        let bounds = self.amplicon_bounds;
        if !bounds.is_ordered() || bounds.min() < 1 || bounds.max() > len {
            return Err(InputError::AmpliconBounds { bounds, len });
        }

        let sizes = self.amplicon_size_range;
        if !sizes.is_ordered() || sizes.min() < 1 {
            return Err(InputError::AmpliconSizeRange { range: sizes });
        }
        let target = bounds.len();
        if sizes.max() > target {
            return Err(InputError::AmpliconLongerThanTarget { max: sizes.max(), target });
        }

        let primers = self.primer_size_range;
        if !primers.is_ordered() || primers.min() < 1 {
            return Err(InputError::PrimerSizeRange { range: primers });
        }
        if primers.min().saturating_mul(2) > sizes.max() {
            return Err(InputError::AmpliconTooSmall { amplicon_max: sizes.max(), primer_min: primers.min() });
        }
        if primers.max() > sizes.max() {
            return Err(InputError::PrimerLongerThanAmplicon { primer_max: primers.max(), amplicon_max: sizes.max() });
        }

        if !self.tm_range.is_finite() || !self.tm_range.is_ordered() {
            return Err(InputError::TmRange { range: self.tm_range });
        }
        if !(self.sodium_concentration.is_finite() && self.sodium_concentration > 0.0) {
            return Err(InputError::SodiumConcentration(self.sodium_concentration));
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

fn first_non_acgt(seq: &[u8]) -> Option<(usize, &u8)> {
    seq.iter()
        .enumerate()
        .find(|(_, b)| !matches!(b.to_ascii_uppercase(), b'A' | b'C' | b'G' | b'T'))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TARGET: &str = "ATGCCCTTCAGCAAAGCATGGCGGAGTGCCGTTTATCCTGATTTTAGGGAGCAGGGCGCG";

    #[test]
    fn defaults_follow_sequence_length() {
        let input = PrimerDesignInput::new(TARGET.to_lowercase());
        let len = TARGET.len();
        assert_eq!(input.sequence, TARGET);
        assert_eq!(input.amplicon_bounds, Range::new(1, len));
        assert_eq!(input.amplicon_size_range, Range::new(len - 20, len));
        assert_eq!(input.primer_size_range, Range::new(25, 25));
        assert_eq!(input.tm_range, Range::new(55.0, 85.0));
        assert_eq!(input.forward_suffix, "***");
        assert_eq!(input.sodium_concentration, 1.0);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn short_sequence_defaults_saturate() {
        let mut input = PrimerDesignInput::new("ACGTACGT");
        assert_eq!(input.amplicon_size_range, Range::new(1, 8));
        input.primer_size_range = Range::new(4, 4);
        assert!(input.validate().is_ok());

        let input = PrimerDesignInput::new("A".repeat(20));
        assert_eq!(input.amplicon_size_range, Range::new(1, 20));
    }

    #[test]
    fn bounded_amplicon_is_one_based_inclusive() {
        let mut input = PrimerDesignInput::new("AACCGGTT");
        input.amplicon_bounds = Range::new(3, 6);
        assert_eq!(input.zero_based_bounds(), 2..6);
        assert_eq!(input.bounded_amplicon(), "CCGG");
        input.amplicon_bounds = Range::new(3, 60);
        assert_eq!(input.bounded_amplicon(), "");
    }

    #[test]
    fn first_failing_rule_is_reported() {
        assert_eq!(PrimerDesignInput::new("").validate(), Err(InputError::EmptySequence));

        let bad = PrimerDesignInput::new(format!("{TARGET}N"));
        assert_eq!(
            bad.validate(),
            Err(InputError::InvalidSequence { character: 'N', position: TARGET.len() + 1 })
        );

        let mut input = PrimerDesignInput::new(TARGET);
        input.reverse_prefix = "GAATTX".into();
        assert!(matches!(
            input.validate(),
            Err(InputError::InvalidPrefix { direction: Direction::Reverse, character: 'X' })
        ));

        let mut input = PrimerDesignInput::new(TARGET);
        input.amplicon_bounds = Range::new(0, 10);
        assert!(matches!(input.validate(), Err(InputError::AmpliconBounds { .. })));
        input.amplicon_bounds = Range::new(5, TARGET.len() + 1);
        assert!(matches!(input.validate(), Err(InputError::AmpliconBounds { .. })));
    }

    #[test]
    fn amplicon_size_must_fit_target() {
        let mut input = PrimerDesignInput::new(TARGET);
        input.amplicon_bounds = Range::new(1, 40);
        input.amplicon_size_range = Range::new(30, 41);
        input.primer_size_range = Range::new(10, 12);
        let err = input.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Maximum amplicon length must be equal to or lower than target sequence length."
        );
        input.amplicon_size_range = Range::new(30, 40);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn primer_size_against_amplicon_size() {
        let mut input = PrimerDesignInput::new(TARGET);
        input.amplicon_size_range = Range::new(20, 40);
        input.primer_size_range = Range::new(20, 22);
        assert!(input.validate().is_ok());
        input.primer_size_range = Range::new(21, 22);
        let err = input.validate().unwrap_err();
        assert!(err.to_string().starts_with("The amplicon size that you have selected is too small."));
        input.primer_size_range = Range::new(22, 21);
        assert!(matches!(input.validate(), Err(InputError::PrimerSizeRange { .. })));
    }

    #[test]
    fn primer_max_is_bounded_by_amplicon_max() {
        let mut input = PrimerDesignInput::new(TARGET);
        input.amplicon_size_range = Range::new(20, 40);
        input.primer_size_range = Range::new(18, 40);
        assert!(input.validate().is_ok());
        input.primer_size_range = Range::new(18, 4_000_000_000);
        assert_eq!(
            input.validate(),
            Err(InputError::PrimerLongerThanAmplicon { primer_max: 4_000_000_000, amplicon_max: 40 })
        );
    }

    #[test]
    fn tm_and_sodium_must_be_sane() {
        let mut input = PrimerDesignInput::new(TARGET);
        input.tm_range = Range::new(70.0, 60.0);
        assert!(matches!(input.validate(), Err(InputError::TmRange { .. })));
        input.tm_range = Range::new(f64::NEG_INFINITY, 60.0);
        assert!(matches!(input.validate(), Err(InputError::TmRange { .. })));
        input.tm_range = Range::new(50.0, 60.0);
        for na in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            input.sodium_concentration = na;
            assert!(matches!(input.validate(), Err(InputError::SodiumConcentration(_))), "{na}");
        }
    }

    #[test]
    fn malformed_suffix_is_not_a_validation_error() {
        let mut input = PrimerDesignInput::new(TARGET);
        input.forward_suffix = "ACGTACGT".into();
        input.reverse_suffix = String::new();
        assert!(input.is_valid());
    }
}
