//! Tm-ranked neighbourhood search over reverse candidates.
//!
//! Reverse primers are sorted once by Tm. For a forward primer's Tm the search finds the
//! closest-ranked reverse primer and returns the `W` ranks on either side of it, so each
//! forward primer is paired against at most `2W + 1` reverse primers instead of all of them.
//! Pairs whose Tm ranks lie further apart are never considered.
//!
//! ```
//! use primerpair::window::NearestTmWindowSearch;
//! let w = NearestTmWindowSearch::from_tms([50.0, 10.0, 40.0, 20.0, 30.0], 1);
//! assert_eq!(w.closest_index(32.0), Some(2));
//! assert_eq!(w.window_for(32.0), 1..4);
//! ```
use core::ops::Range;

use crate::primer::Primer;

/// Ranks on either side of the closest match.
pub const DEFAULT_WINDOW_HALF_WIDTH: usize = 100;

#[derive(Clone, Debug)]
pub struct NearestTmWindowSearch {
    primers: Vec<Primer>,
    half_width: usize,
}

impl NearestTmWindowSearch {
    /// Take ownership of `primers` and sort them ascending by Tm (stable).
    pub fn new(mut primers: Vec<Primer>, half_width: usize) -> Self {
        primers.sort_by(|a, b| a.tm.total_cmp(&b.tm));
        Self { primers, half_width }
    }

    /// Index over bare Tm values, mostly for tests and benchmarks.
    pub fn from_tms(tms: impl IntoIterator<Item = f64>, half_width: usize) -> Self {
        let primers = tms
            .into_iter()
            .map(|tm| Primer { sequence: String::new(), tm, sequence_position: 0, homo_dimer_score: 0 })
            .collect();
        Self::new(primers, half_width)
    }

    /// Primers in ascending Tm order.
    pub fn primers(&self) -> &[Primer] {
        &self.primers
    }

    pub fn len(&self) -> usize {
        self.primers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primers.is_empty()
    }

    pub fn half_width(&self) -> usize {
        self.half_width
    }

    /// Index of the primer whose Tm is nearest `target`; ties go to the lower index.
    pub fn closest_index(&self, target: f64) -> Option<usize> {
        let n = self.primers.len();
        if n == 0 {
            return None;
        }
        let above = self.primers.partition_point(|p| p.tm < target);
        Some(match above {
            0 => 0,
            i if i == n => n - 1,
            i => {
                let below = (self.primers[i - 1].tm - target).abs();
                let over = (self.primers[i].tm - target).abs();
                if below <= over { i - 1 } else { i }
            }
        })
    }

    /// Half-open index window `[c - W, c + W + 1)`, clamped to the collection.
    pub fn window_for(&self, target: f64) -> Range<usize> {
        match self.closest_index(target) {
            None => 0..0,
            Some(c) => {
                c.saturating_sub(self.half_width)..c.saturating_add(self.half_width).saturating_add(1).min(self.len())
            }
        }
    }

    /// The primers inside [`NearestTmWindowSearch::window_for`].
    pub fn window(&self, target: f64) -> &[Primer] {
        &self.primers[self.window_for(target)]
    }

    pub fn into_primers(self) -> Vec<Primer> {
        self.primers
    }
}
