//! # Weight Engine
//!
//! Proportional widths for the children of a weighted row.
//!
//! ## Invariants
//!
//! - `sum(weights)` equals the sum the vector was created with
//! - every weight is at least [`MIN_WEIGHT`]
//!
//! ## Drag
//!
//! A pixel drag on child `i` is converted to weight units, where one unit
//! is the average child's share of the row:
//!
//! ```text
//! deltaWeight = (deltaPx / rowWidthPx) * (sum / n)
//! ```
//!
//! Child `i` grows by `deltaWeight` (floored), every other child shrinks by
//! `deltaWeight / (n - 1)` (floored), then the whole vector is rescaled back
//! to the original sum. Flooring can add mass that the rescale would push
//! back under the floor, so pinned children are settled at the floor and
//! the remainder is rescaled over the free ones.

use serde::{Deserialize, Serialize};
use tracing::trace;

/// Smallest weight any child may have
pub const MIN_WEIGHT: f64 = 0.1;

const EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightVector {
    weights: Vec<f64>,
    total: f64,
}

impl WeightVector {
    /// `n` equal shares summing to `n`
    pub fn equal(n: usize) -> Self {
        Self {
            weights: vec![1.0; n],
            total: n as f64,
        }
    }

    /// Use explicit weights verbatim. Falls back to equal shares when any
    /// weight is non-finite or below the floor, since the floor invariant
    /// could not hold for such a vector.
    pub fn from_weights(weights: Vec<f64>) -> Self {
        if weights.iter().all(|w| w.is_finite() && *w >= MIN_WEIGHT) {
            let total = weights.iter().sum();
            Self { weights, total }
        } else {
            trace!(?weights, "Explicit weights rejected, using equal shares");
            Self::equal(weights.len())
        }
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Sum fixed at creation
    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn sum(&self) -> f64 {
        self.weights.iter().sum()
    }

    pub fn min(&self) -> Option<f64> {
        self.weights.iter().copied().reduce(f64::min)
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Fraction of the row occupied by child `index`
    pub fn share(&self, index: usize) -> Option<f64> {
        let w = self.weights.get(index)?;
        Some(if self.total > 0.0 { w / self.total } else { 0.0 })
    }

    /// Apply a horizontal drag of `delta_px` on child `index` of a row
    /// `row_width_px` wide. Rows with fewer than two children, bad indices
    /// and degenerate widths leave the vector unchanged.
    pub fn apply_delta(&self, index: usize, delta_px: f64, row_width_px: f64) -> WeightVector {
        let n = self.weights.len();
        if n < 2 || index >= n || !(row_width_px > 0.0) || !delta_px.is_finite() || delta_px == 0.0 {
            return self.clone();
        }

        let delta_weight = (delta_px / row_width_px) * (self.total / n as f64);
        let share = delta_weight / (n - 1) as f64;

        let mut weights = self.weights.clone();
        for (i, w) in weights.iter_mut().enumerate() {
            *w = if i == index {
                (*w + delta_weight).max(MIN_WEIGHT)
            } else {
                (*w - share).max(MIN_WEIGHT)
            };
        }

        let new_sum: f64 = weights.iter().sum();
        let scale = self.total / new_sum;
        for w in weights.iter_mut() {
            *w *= scale;
        }
        settle_floor(&mut weights, self.total);

        trace!(index, delta_px, ?weights, "Applied weight delta");
        WeightVector {
            weights,
            total: self.total,
        }
    }
}

/// Pin everything under the floor and rescale the rest to keep `total`.
/// Each round pins at least one more child, so this ends within `n` rounds.
fn settle_floor(weights: &mut [f64], total: f64) {
    let mut pinned = vec![false; weights.len()];

    for _ in 0..weights.len() {
        let mut changed = false;
        for (w, pin) in weights.iter_mut().zip(pinned.iter_mut()) {
            if !*pin && *w < MIN_WEIGHT - EPSILON {
                *w = MIN_WEIGHT;
                *pin = true;
                changed = true;
            }
        }
        if !changed {
            return;
        }

        let pinned_mass = pinned.iter().filter(|p| **p).count() as f64 * MIN_WEIGHT;
        let free_mass: f64 = weights
            .iter()
            .zip(&pinned)
            .filter(|(_, p)| !**p)
            .map(|(w, _)| *w)
            .sum();
        if free_mass <= 0.0 {
            return;
        }
        let scale = (total - pinned_mass) / free_mass;
        for (w, pin) in weights.iter_mut().zip(&pinned) {
            if !*pin {
                *w *= scale;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_invariants(w: &WeightVector, expected_sum: f64) {
        assert!((w.sum() - expected_sum).abs() < 1e-4, "sum {} != {}", w.sum(), expected_sum);
        assert!(w.min().unwrap() >= MIN_WEIGHT - 1e-9, "min {:?} below floor", w.min());
    }

    #[test]
    fn test_drag_third_of_row_on_three_children() {
        let w = WeightVector::equal(3);
        let row_width = 900.0;
        let next = w.apply_delta(0, row_width / 3.0, row_width);

        let expected = [4.0 / 3.0, 5.0 / 6.0, 5.0 / 6.0];
        for (got, want) in next.weights().iter().zip(expected) {
            assert!((got - want).abs() < 1e-3, "{:?}", next.weights());
        }
        assert_invariants(&next, 3.0);
    }

    #[test]
    fn test_single_child_rejects_delta() {
        let w = WeightVector::equal(1);
        assert_eq!(w.apply_delta(0, 200.0, 400.0), w);
    }

    #[test]
    fn test_bad_inputs_are_no_ops() {
        let w = WeightVector::equal(2);
        assert_eq!(w.apply_delta(5, 10.0, 100.0), w);
        assert_eq!(w.apply_delta(0, 10.0, 0.0), w);
        assert_eq!(w.apply_delta(0, f64::NAN, 100.0), w);
    }

    #[test]
    fn test_floor_holds_under_large_drags() {
        let mut w = WeightVector::equal(4);
        for _ in 0..20 {
            w = w.apply_delta(1, 800.0, 400.0);
            assert_invariants(&w, 4.0);
        }
        for _ in 0..20 {
            w = w.apply_delta(1, -800.0, 400.0);
            assert_invariants(&w, 4.0);
        }
    }

    #[test]
    fn test_dragged_child_grows_monotonically() {
        let mut w = WeightVector::equal(3);
        let mut last = w.weights()[2];
        for _ in 0..30 {
            w = w.apply_delta(2, 25.0, 300.0);
            assert!(w.weights()[2] >= last - 1e-9);
            last = w.weights()[2];
        }
    }

    #[test]
    fn test_random_sequences_keep_invariants() {
        // Deterministic LCG so failures are reproducible
        let mut seed: u64 = 0x5EED;
        let mut next = || {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            (seed >> 33) as f64 / (1u64 << 31) as f64
        };

        for n in 2..7 {
            let initial: Vec<f64> = (0..n).map(|i| 0.5 + i as f64 * 0.3).collect();
            let mut w = WeightVector::from_weights(initial.clone());
            let expected: f64 = initial.iter().sum();
            for _ in 0..200 {
                let index = (next() * n as f64) as usize % n;
                let delta = (next() - 0.5) * 1200.0;
                w = w.apply_delta(index, delta, 500.0);
                assert_invariants(&w, expected);
            }
        }
    }

    #[test]
    fn test_explicit_weights_below_floor_fall_back() {
        let w = WeightVector::from_weights(vec![0.05, 2.0]);
        assert_eq!(w.weights(), &[1.0, 1.0]);
        let w = WeightVector::from_weights(vec![0.5, 2.0]);
        assert_eq!(w.weights(), &[0.5, 2.0]);
        assert_eq!(w.total(), 2.5);
    }

    #[test]
    fn test_share() {
        let w = WeightVector::from_weights(vec![1.0, 3.0]);
        assert_eq!(w.share(1), Some(0.75));
        assert_eq!(w.share(2), None);
    }
}
