//! Per-dispatch attempt pool.
//!
//! # Responsibilities
//! - Track which provider indices have not been tried for one request
//! - Draw the next index through a [`Selector`], without replacement

use std::fmt;

use rand::Rng;

/// Chooses a position within the remaining candidates.
pub trait Selector: Send + Sync + fmt::Debug {
    /// Return a position in `0..len`. Never called with `len == 0`.
    fn pick(&self, len: usize) -> usize;
}

/// Uniformly random choice, independent of configuration order.
#[derive(Debug, Default, Clone, Copy)]
pub struct UniformRandom;

impl Selector for UniformRandom {
    fn pick(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Provider indices not yet attempted. Created per dispatch, never shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptPool {
    remaining: Vec<usize>,
}

impl AttemptPool {
    /// Pool holding every index in `0..provider_count`.
    pub fn new(provider_count: usize) -> Self {
        Self {
            remaining: (0..provider_count).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.remaining.len()
    }

    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }

    /// Remove and return one index, or `None` once exhausted.
    pub fn draw(&mut self, selector: &dyn Selector) -> Option<usize> {
        if self.remaining.is_empty() {
            return None;
        }
        // clamp: a misbehaving selector must not panic the request
        let position = selector.pick(self.remaining.len()).min(self.remaining.len() - 1);
        Some(self.remaining.swap_remove(position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[derive(Debug)]
    struct Last;

    impl Selector for Last {
        fn pick(&self, len: usize) -> usize {
            len - 1
        }
    }

    #[derive(Debug)]
    struct OutOfRange;

    impl Selector for OutOfRange {
        fn pick(&self, len: usize) -> usize {
            len + 10
        }
    }

    #[test]
    fn test_draw_without_replacement() {
        let mut pool = AttemptPool::new(5);
        let mut seen = HashSet::new();

        while let Some(index) = pool.draw(&UniformRandom) {
            assert!(seen.insert(index), "index {} drawn twice", index);
        }

        assert_eq!(seen, (0..5).collect());
        assert!(pool.is_empty());
    }

    #[test]
    fn test_pool_shrinks_by_one() {
        let mut pool = AttemptPool::new(3);
        assert_eq!(pool.len(), 3);
        pool.draw(&Last);
        assert_eq!(pool.len(), 2);
        pool.draw(&Last);
        assert_eq!(pool.len(), 1);
        pool.draw(&Last);
        assert_eq!(pool.draw(&Last), None);
    }

    #[test]
    fn test_empty_pool() {
        let mut pool = AttemptPool::new(0);
        assert!(pool.is_empty());
        assert_eq!(pool.draw(&UniformRandom), None);
    }

    #[test]
    fn test_out_of_range_pick_is_clamped() {
        let mut pool = AttemptPool::new(2);
        assert_eq!(pool.draw(&OutOfRange), Some(1));
        assert_eq!(pool.draw(&OutOfRange), Some(0));
    }

    #[test]
    fn test_uniform_first_pick_covers_all() {
        let mut counts = [0usize; 4];
        for _ in 0..2000 {
            let mut pool = AttemptPool::new(4);
            counts[pool.draw(&UniformRandom).unwrap()] += 1;
        }
        // expected 500 each
        for count in counts {
            assert!(count > 350, "skewed distribution: {:?}", counts);
        }
    }
}
