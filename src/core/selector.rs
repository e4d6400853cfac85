//! Weighted random selection
//!
//! Maps choices to non-negative probability weights and draws a choice with
//! probability proportional to its weight. A cumulative-fraction table is
//! rebuilt on every weight change (O(n)) so that a draw is a single uniform
//! sample plus a bisection (O(log n)).

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Random choice between weighted alternatives.
///
/// Entries keep insertion order, which makes draws reproducible for a given
/// seed. All weights must be non-negative, and at least one positive weight
/// must be registered before any draw.
#[derive(Debug, Clone)]
pub struct WeightedSelector<C> {
    entries: Vec<(C, f64)>,
    /// Cumulative probability fractions, one per entry; empty when the
    /// total weight is zero.
    cumulative: Vec<f64>,
    rng: StdRng,
}

impl<C: Clone + PartialEq> WeightedSelector<C> {
    /// Create a selector over the given `(choice, weight)` pairs.
    pub fn new<I>(choices: I, seed: u64) -> Self
    where
        I: IntoIterator<Item = (C, f64)>,
    {
        let mut selector = Self {
            entries: Vec::new(),
            cumulative: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
        };
        selector.update(choices, false);
        selector
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The weight registered for `choice`, if any.
    pub fn weight(&self, choice: &C) -> Option<f64> {
        self.entries
            .iter()
            .find(|(c, _)| c == choice)
            .map(|(_, w)| *w)
    }

    /// Set the weight for a choice. No-op (no table rebuild) if the pair
    /// would not change.
    pub fn set(&mut self, choice: C, weight: f64) {
        assert!(weight >= 0.0, "selector weights must be non-negative");
        match self.entries.iter_mut().find(|(c, _)| *c == choice) {
            Some(entry) => {
                if entry.1 == weight {
                    return;
                }
                entry.1 = weight;
            }
            None => self.entries.push((choice, weight)),
        }
        self.rebuild();
    }

    /// Remove a choice. No-op if it was never registered.
    pub fn remove(&mut self, choice: &C) {
        let Some(index) = self.entries.iter().position(|(c, _)| c == choice) else {
            return;
        };
        self.entries.remove(index);
        self.rebuild();
    }

    /// Bulk merge of `(choice, weight)` pairs with a single table rebuild.
    /// With `clear`, existing choices are dropped first.
    pub fn update<I>(&mut self, choices: I, clear: bool)
    where
        I: IntoIterator<Item = (C, f64)>,
    {
        if clear {
            self.entries.clear();
        }
        for (choice, weight) in choices {
            assert!(weight >= 0.0, "selector weights must be non-negative");
            match self.entries.iter_mut().find(|(c, _)| *c == choice) {
                Some(entry) => entry.1 = weight,
                None => self.entries.push((choice, weight)),
            }
        }
        self.rebuild();
    }

    fn rebuild(&mut self) {
        self.cumulative.clear();
        let total: f64 = self.entries.iter().map(|(_, w)| w).sum();
        if total <= 0.0 {
            return;
        }
        let mut acc = 0.0;
        for (_, weight) in &self.entries {
            acc += weight;
            self.cumulative.push(acc / total);
        }
    }

    /// Draw a choice with probability `weight / total_weight`.
    ///
    /// Panics if no positive-weight choice is registered; that state is a
    /// logic error in the caller's weight bookkeeping, not a runtime input.
    pub fn choose(&mut self) -> C {
        assert!(
            !self.cumulative.is_empty(),
            "weighted draw attempted with no positive-weight choices"
        );
        let sample: f64 = self.rng.random();
        let index = self.cumulative.partition_point(|&p| p <= sample);
        let index = index.min(self.entries.len() - 1);
        self.entries[index].0.clone()
    }

    /// An independent selector with identical weights and a fresh RNG stream.
    pub fn clone_with_seed(&self, seed: u64) -> Self {
        Self {
            entries: self.entries.clone(),
            cumulative: self.cumulative.clone(),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}
