//! 3' end constraints on candidate primers.
//!
//! A pattern has one to three positions. Matching is anchored at the third-from-last base of
//! the (unprefixed) primer window and proceeds left to right, so `"**G/C"` asks for a G or C
//! at the 3' terminal base and `"G"` constrains only the third-from-last base.
//!
//! Position syntax:
//! - `*` or `.`: any base
//! - a base letter `A`, `C`, `G`, `T`
//! - an IUPAC ambiguity code (`S` = G/C, `W` = A/T, `N` = any, ...)
//! - a slash class such as `G/C` or `A/C/G`
//!
//! Malformed patterns parse to a pattern that never matches; they are not an error.
//!
//! ```
//! use primerpair::suffix::SuffixPattern;
//! let clamp = SuffixPattern::parse("**G/C");
//! assert!(clamp.matches(b"AAAAAAAAAG"));
//! assert!(!clamp.matches(b"AAAAAAAAAT"));
//! assert!(SuffixPattern::parse("***").matches(b"ACGT"));
//! assert!(!SuffixPattern::parse("ACGT").matches(b"ACGT"));
//! ```
use core::fmt;

const A: u8 = 0b0001;
const C: u8 = 0b0010;
const G: u8 = 0b0100;
const T: u8 = 0b1000;
const ANY: u8 = A | C | G | T;

/// Width of the 3' region a pattern looks at.
pub const SUFFIX_WIDTH: usize = 3;

/// A parsed suffix constraint. Each position is a bitmask over A/C/G/T.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SuffixPattern {
    source: String,
    positions: Option<Vec<u8>>,
}

fn base_mask(b: u8) -> Option<u8> {
    Some(match b.to_ascii_uppercase() {
        b'A' => A,
        b'C' => C,
        b'G' => G,
        b'T' => T,
        b'R' => A | G,
        b'Y' => C | T,
        b'S' => G | C,
        b'W' => A | T,
        b'K' => G | T,
        b'M' => A | C,
        b'B' => C | G | T,
        b'D' => A | G | T,
        b'H' => A | C | T,
        b'V' => A | C | G,
        b'N' => ANY,
        _ => return None,
    })
}

/// Concrete template bases only; ambiguity codes in the template satisfy nothing.
#[inline]
fn template_mask(b: u8) -> u8 {
    match base_mask(b) {
        Some(m) if m.count_ones() == 1 => m,
        _ => 0,
    }
}

fn parse_positions(pattern: &[u8]) -> Option<Vec<u8>> {
    let mut positions = Vec::with_capacity(SUFFIX_WIDTH);
    let mut i = 0;
    while i < pattern.len() {
        let mask = match pattern[i] {
            b'*' | b'.' => {
                i += 1;
                ANY
            }
            c => {
                let mut mask = base_mask(c)?;
                i += 1;
                while i < pattern.len() && pattern[i] == b'/' {
                    mask |= base_mask(*pattern.get(i + 1)?)?;
                    i += 2;
                }
                mask
            }
        };
        positions.push(mask);
    }
    (1..=SUFFIX_WIDTH).contains(&positions.len()).then_some(positions)
}

impl SuffixPattern {
    /// Parse `pattern`. Never fails; see [`SuffixPattern::is_valid`].
    pub fn parse(pattern: &str) -> Self {
        Self { source: pattern.to_string(), positions: parse_positions(pattern.as_bytes()) }
    }

    /// Matches any window of at least three bases.
    pub fn any() -> Self {
        Self::parse("***")
    }

    /// `false` for malformed patterns, which match nothing.
    pub fn is_valid(&self) -> bool {
        self.positions.is_some()
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Test a raw primer window (without prefix).
    pub fn matches(&self, window: &[u8]) -> bool {
        let Some(positions) = &self.positions else { return false };
        if window.len() < SUFFIX_WIDTH {
            return false;
        }
        let tail = &window[window.len() - SUFFIX_WIDTH..];
        positions
            .iter()
            .zip(tail)
            .all(|(&mask, &b)| template_mask(b) & mask != 0)
    }
}

impl Default for SuffixPattern {
    fn default() -> Self {
        Self::any()
    }
}

impl fmt::Display for SuffixPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcards_match_any_concrete_base() {
        let p = SuffixPattern::parse("***");
        assert!(p.is_valid());
        for w in ["ACG", "TTTT", "GCGCGCGC", "acgt"] {
            assert!(p.matches(w.as_bytes()), "{w}");
        }
        assert!(SuffixPattern::parse("...").matches(b"GATTACA"));
    }

    #[test]
    fn windows_shorter_than_three_never_match() {
        assert!(!SuffixPattern::parse("***").matches(b"AC"));
        assert!(!SuffixPattern::parse("*").matches(b""));
    }

    #[test]
    fn anchored_at_third_from_last_base() {
        let p = SuffixPattern::parse("G");
        assert!(p.matches(b"TTTGAA"));
        assert!(!p.matches(b"TTTAAG"));
        let p = SuffixPattern::parse("*C");
        assert!(p.matches(b"AACA"));
        assert!(!p.matches(b"AAAC"));
    }

    #[test]
    fn classes_and_iupac_codes() {
        let slash = SuffixPattern::parse("**G/C");
        let iupac = SuffixPattern::parse("**S");
        for (w, want) in [("AAAG", true), ("AAAC", true), ("AAAA", false), ("AAAT", false)] {
            assert_eq!(slash.matches(w.as_bytes()), want, "{w}");
            assert_eq!(iupac.matches(w.as_bytes()), want, "{w}");
        }
        let triple = SuffixPattern::parse("A/C/G*T");
        assert!(triple.matches(b"GGT"));
        assert!(!triple.matches(b"TGT"));
        assert!(SuffixPattern::parse("acg").matches(b"TTACG"));
    }

    #[test]
    fn malformed_patterns_never_match() {
        for bad in ["", "ACGT", "****", "X**", "G/", "G/X", "/G", "**G//C"] {
            let p = SuffixPattern::parse(bad);
            assert!(!p.is_valid(), "{bad:?}");
            assert!(!p.matches(b"ACGTACGTACGT"), "{bad:?}");
        }
    }

    #[test]
    fn ambiguous_template_bases_do_not_satisfy_classes() {
        assert!(!SuffixPattern::parse("**N").matches(b"AAN"));
        assert!(!SuffixPattern::parse("***").matches(b"AAN"));
    }
}
