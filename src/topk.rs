//! Bounded best-K accumulator (lowest score wins).
//!
//! Below capacity every item is appended. Once full, the current worst item is kept in slot 0,
//! so a new item is compared against that single slot and, if strictly better, replaces it
//! before the next worst is moved to the front. That is O(K) per accepted insertion and O(1)
//! per rejection. Contents come back in no particular order; callers sort.
//!
//! ```
//! use primerpair::topk::TopKPairAccumulator;
//! let mut acc = TopKPairAccumulator::with_capacity(3);
//! for s in [5.0, 3.0, 8.0, 1.0, 9.0, 2.0] {
//!     acc.add(s);
//! }
//! let mut best = acc.into_inner();
//! best.sort_by(f64::total_cmp);
//! assert_eq!(best, [1.0, 2.0, 3.0]);
//! ```
use crate::primer::PrimerPair;

/// Pairs kept when no capacity is given.
pub const DEFAULT_MAX_PAIRS: usize = 50;

/// Anything with a penalty score.
pub trait Scored {
    fn score(&self) -> f64;
}

impl Scored for PrimerPair {
    #[inline]
    fn score(&self) -> f64 {
        self.score
    }
}

impl Scored for f64 {
    #[inline]
    fn score(&self) -> f64 {
        *self
    }
}

#[derive(Clone, Debug)]
pub struct TopKPairAccumulator<T = PrimerPair> {
    items: Vec<T>,
    capacity: usize,
}

impl<T: Scored> Default for TopKPairAccumulator<T> {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_MAX_PAIRS)
    }
}

impl<T: Scored> TopKPairAccumulator<T> {
    /// Keep at most `capacity` items. Storage grows on demand, so a huge capacity costs nothing
    /// up front.
    pub fn with_capacity(capacity: usize) -> Self {
        Self { items: Vec::with_capacity(capacity.min(DEFAULT_MAX_PAIRS)), capacity }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    /// Current worst item, once the accumulator is full.
    pub fn worst(&self) -> Option<&T> {
        if self.is_full() { self.items.first() } else { None }
    }

    /// Offer `item`. Returns `true` if it was kept.
    pub fn add(&mut self, item: T) -> bool {
        if self.capacity == 0 {
            return false;
        }
        if self.items.len() < self.capacity {
            self.items.push(item);
            if self.items.len() == self.capacity {
                self.move_worst_to_front();
            }
            return true;
        }
        if item.score() < self.items[0].score() {
            self.items[0] = item;
            self.move_worst_to_front();
            return true;
        }
        false
    }

    fn move_worst_to_front(&mut self) {
        let mut worst = 0;
        for (i, it) in self.items.iter().enumerate().skip(1) {
            if it.score().total_cmp(&self.items[worst].score()).is_gt() {
                worst = i;
            }
        }
        self.items.swap(0, worst);
    }

    /// Unordered view of what is held.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Hand the held items over, in no particular order.
    pub fn into_inner(self) -> Vec<T> {
        self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(acc: TopKPairAccumulator<f64>) -> Vec<f64> {
        let mut v = acc.into_inner();
        v.sort_by(f64::total_cmp);
        v
    }

    #[test]
    fn keeps_the_lowest_k() {
        let mut acc = TopKPairAccumulator::with_capacity(3);
        let kept: Vec<bool> = [5.0, 3.0, 8.0, 1.0, 9.0, 2.0].into_iter().map(|s| acc.add(s)).collect();
        assert_eq!(kept, [true, true, true, true, false, true]);
        assert_eq!(sorted(acc), [1.0, 2.0, 3.0]);
    }

    #[test]
    fn worst_sits_in_front_once_full() {
        let mut acc = TopKPairAccumulator::with_capacity(3);
        acc.add(1.0);
        acc.add(7.0);
        assert_eq!(acc.worst(), None);
        acc.add(4.0);
        assert_eq!(acc.worst(), Some(&7.0));
        acc.add(2.0);
        assert_eq!(acc.worst(), Some(&4.0));
    }

    #[test]
    fn ties_with_the_worst_are_rejected() {
        let mut acc = TopKPairAccumulator::with_capacity(2);
        acc.add(1.0);
        acc.add(5.0);
        assert!(!acc.add(5.0));
        assert_eq!(acc.len(), 2);
    }

    #[test]
    fn matches_full_sort_on_a_longer_stream() {
        let stream: Vec<f64> = (0..500).map(|i| ((i * 7919) % 1013) as f64 / 10.0).collect();
        let mut acc = TopKPairAccumulator::default();
        for s in &stream {
            acc.add(*s);
        }
        let mut all = stream.clone();
        all.sort_by(f64::total_cmp);
        all.truncate(DEFAULT_MAX_PAIRS);
        assert_eq!(sorted(acc), all);
    }

    #[test]
    fn zero_capacity_keeps_nothing() {
        let mut acc = TopKPairAccumulator::with_capacity(0);
        assert!(!acc.add(1.0));
        assert!(acc.is_empty());
        assert_eq!(acc.worst(), None);
    }

    #[test]
    fn huge_capacity_does_not_preallocate() {
        let mut acc = TopKPairAccumulator::with_capacity(usize::MAX);
        assert_eq!(acc.capacity(), usize::MAX);
        for s in [5.0, 3.0, 8.0] {
            assert!(acc.add(s));
        }
        assert!(!acc.is_full());
        assert_eq!(sorted(acc), [3.0, 5.0, 8.0]);
    }

    #[test]
    fn fewer_items_than_capacity() {
        let mut acc = TopKPairAccumulator::with_capacity(10);
        for s in [4.0, 2.0, 3.0] {
            acc.add(s);
        }
        assert!(!acc.is_full());
        assert_eq!(sorted(acc), [2.0, 3.0, 4.0]);
    }
}
