//! Selection policies for picking one record out of a candidate set.
//!
//! [`RandomSelector`] is seeded once from the OS and reused for the life of
//! the process. It is *not* suitable for anything security-sensitive; it only
//! spreads picks across matching records.

use std::sync::{Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Picks an index into a candidate list.
pub trait Selector: Send + Sync {
    /// Return an index in `0..len`, or `None` when `len == 0`.
    fn pick(&self, len: usize) -> Option<usize>;
}

/// Uniform random selection backed by a process-lifetime `StdRng`.
pub struct RandomSelector {
    rng: Mutex<StdRng>,
}

impl RandomSelector {
    /// Seed a new generator from the operating system.
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Build a selector with a fixed seed (reproducible sequences).
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl Selector for RandomSelector {
    fn pick(&self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        // A poisoned lock still holds a usable generator.
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        Some(rng.random_range(0..len))
    }
}

/// Always picks the first candidate.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstSelector;

impl Selector for FirstSelector {
    fn pick(&self, len: usize) -> Option<usize> {
        (len > 0).then_some(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_set_yields_none() {
        assert_eq!(RandomSelector::new().pick(0), None);
        assert_eq!(FirstSelector.pick(0), None);
    }

    #[test]
    fn random_pick_stays_in_range() {
        let selector = RandomSelector::new();
        for len in 1..50 {
            let idx = selector.pick(len).unwrap();
            assert!(idx < len);
        }
    }

    #[test]
    fn random_pick_covers_all_candidates() {
        let selector = RandomSelector::with_seed(7);
        let mut seen = [false; 3];
        for _ in 0..300 {
            seen[selector.pick(3).unwrap()] = true;
        }
        assert!(seen.iter().all(|s| *s), "every index should be picked eventually");
    }

    #[test]
    fn seeded_selectors_are_reproducible() {
        let a = RandomSelector::with_seed(42);
        let b = RandomSelector::with_seed(42);
        let seq_a: Vec<_> = (0..20).map(|_| a.pick(10)).collect();
        let seq_b: Vec<_> = (0..20).map(|_| b.pick(10)).collect();
        assert_eq!(seq_a, seq_b);
    }

    #[test]
    fn first_selector_is_deterministic() {
        assert_eq!(FirstSelector.pick(5), Some(0));
        assert_eq!(FirstSelector.pick(1), Some(0));
    }
}
