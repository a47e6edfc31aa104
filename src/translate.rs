//! World-space translation vectors: rounding, axis-order reconciliation,
//! and derived placements.
//!
//! A [`Translation`] carries real-valued per-axis offsets in raster axis
//! order. Callers hand over whatever they have — a dragged overlay position,
//! a diff of two world positions, or nothing at all — and
//! [`resolve`](Translation::resolve) turns it into integer pixel offsets for
//! a canvas of a given rank.

use log::debug;

/// World-space translation of a source raster's origin relative to the
/// canvas origin.
///
/// Components are in raster axis order (row-major): `(row, col)` for 2D,
/// `(depth, row, col)` for 3D. The component count does not have to match
/// the canvas rank — see [`resolve`](Self::resolve) for the reconciliation
/// rule.
///
/// # Example
///
/// ```
/// use rasterpad::Translation;
///
/// // An over-long world-order vector against a 2D canvas: the trailing
/// // two components win.
/// let t = Translation::new([9.0, 5.4, 10.5]);
/// assert_eq!(t.resolve(2), vec![5, 10]);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Translation {
    components: Vec<f64>,
}

impl Translation {
    /// Create a translation from world-space components.
    pub fn new(components: impl Into<Vec<f64>>) -> Self {
        Self {
            components: components.into(),
        }
    }

    /// The identity translation for a given rank.
    pub fn zero(rank: usize) -> Self {
        Self {
            components: vec![0.0; rank],
        }
    }

    /// The raw world-space components, unrounded.
    pub fn components(&self) -> &[f64] {
        &self.components
    }

    /// Whether every component is exactly zero.
    ///
    /// An empty translation counts as zero: it resolves to all-zero offsets
    /// at any rank.
    pub fn is_zero(&self) -> bool {
        self.components.iter().all(|&c| c == 0.0)
    }

    /// Translation of an overlay's world position relative to the canvas's
    /// world position, componentwise.
    ///
    /// When the two positions have different lengths, the shorter one is
    /// trailing-aligned against the longer and its missing leading
    /// components are taken as zero, consistent with [`resolve`](Self::resolve).
    pub fn between(overlay: &[f64], canvas: &[f64]) -> Self {
        let rank = overlay.len().max(canvas.len());
        let components = (0..rank)
            .map(|axis| {
                trailing_component(overlay, rank, axis) - trailing_component(canvas, rank, axis)
            })
            .collect();
        Self { components }
    }

    /// The centered default placement: `(target - source) / 2` per axis,
    /// floor division.
    ///
    /// Negative when the source extent exceeds the target extent on an axis,
    /// which centers the crop instead of the pad.
    pub fn centered(target_shape: &[usize], source_shape: &[usize]) -> Self {
        let components = target_shape
            .iter()
            .zip(source_shape)
            .map(|(&t, &s)| (t as i64 - s as i64).div_euclid(2) as f64)
            .collect();
        Self { components }
    }

    /// Resolve to integer pixel offsets for a canvas of rank `rank`.
    ///
    /// Axis-order reconciliation:
    /// - component count equals `rank`: components are used in order;
    /// - more components than `rank`: the **last** `rank` components are
    ///   used (trailing alignment), leading ones are discarded;
    /// - fewer components than `rank`: missing **leading** axes (e.g. a
    ///   missing depth offset against a 3D canvas) default to 0.
    ///
    /// Each used component is rounded to the nearest integer, ties to even
    /// (`f64::round_ties_even`). The rule is applied identically regardless
    /// of which axis convention produced the components; downstream code
    /// only ever sees the resolved tuple.
    pub fn resolve(&self, rank: usize) -> Vec<i64> {
        let offsets: Vec<i64> = (0..rank)
            .map(|axis| trailing_component(&self.components, rank, axis).round_ties_even() as i64)
            .collect();
        debug!(
            "resolved translation {:?} to pixel offsets {:?} for rank {}",
            self.components, offsets, rank
        );
        offsets
    }
}

/// Component for `axis` of a `rank`-length tuple, trailing-aligned.
fn trailing_component(values: &[f64], rank: usize, axis: usize) -> f64 {
    if values.len() >= rank {
        values[values.len() - rank + axis]
    } else {
        let lead = rank - values.len();
        if axis < lead {
            0.0
        } else {
            values[axis - lead]
        }
    }
}
