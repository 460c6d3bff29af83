//! Explicit child widths for scrollable rows.
//!
//! Scrollable rows do not distribute a fixed width, so there is nothing to
//! normalize: each child's `widthDp` grows or shrinks on its own.

use serde::{Deserialize, Serialize};

/// Width assumed for children without `widthDp`
pub const DEFAULT_CHILD_WIDTH_DP: f64 = 160.0;

/// Narrowest a scrollable child may become
pub const MIN_CHILD_WIDTH_DP: f64 = 48.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrollWidths {
    widths_dp: Vec<f64>,
}

impl ScrollWidths {
    /// Missing, non-finite or too-small widths are replaced by the default
    /// and the floor respectively.
    pub fn new(widths_dp: Vec<Option<f64>>) -> Self {
        let widths_dp = widths_dp
            .into_iter()
            .map(|w| match w {
                Some(w) if w.is_finite() => w.max(MIN_CHILD_WIDTH_DP),
                _ => DEFAULT_CHILD_WIDTH_DP,
            })
            .collect();
        Self { widths_dp }
    }

    pub fn widths_dp(&self) -> &[f64] {
        &self.widths_dp
    }

    pub fn len(&self) -> usize {
        self.widths_dp.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widths_dp.is_empty()
    }

    /// Grow or shrink one child. Neighbors are never touched.
    pub fn apply_delta(&self, index: usize, delta_dp: f64) -> ScrollWidths {
        let mut next = self.clone();
        if let Some(w) = next.widths_dp.get_mut(index) {
            if delta_dp.is_finite() {
                *w = (*w + delta_dp).max(MIN_CHILD_WIDTH_DP);
            }
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_and_floor_on_creation() {
        let widths = ScrollWidths::new(vec![None, Some(10.0), Some(200.0), Some(f64::INFINITY)]);
        assert_eq!(widths.widths_dp(), &[160.0, 48.0, 200.0, 160.0]);
    }

    #[test]
    fn test_children_resize_independently() {
        let widths = ScrollWidths::new(vec![Some(100.0), Some(100.0)]);
        let next = widths.apply_delta(0, 40.0);
        assert_eq!(next.widths_dp(), &[140.0, 100.0]);
        let next = next.apply_delta(1, -500.0);
        assert_eq!(next.widths_dp(), &[140.0, 48.0]);
    }

    #[test]
    fn test_single_child_may_grow() {
        let widths = ScrollWidths::new(vec![Some(100.0)]);
        assert_eq!(widths.apply_delta(0, 20.0).widths_dp(), &[120.0]);
        assert_eq!(widths.apply_delta(3, 20.0), widths);
    }
}
