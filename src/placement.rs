//! Placement of a source raster onto a zero-filled canvas.
//!
//! [`place`] embeds a smaller raster into a larger canvas at a rounded
//! world-space offset. The output always has exactly the target shape and
//! the source's element type; whatever falls outside the canvas is cropped,
//! and everything the source does not cover stays at the element type's
//! additive identity. Pure computation — one output allocation, one bounded
//! block copy, no mutation of the source.
//!
//! # Example
//!
//! ```
//! use ndarray::Array2;
//! use rasterpad::{Translation, place};
//!
//! let small = Array2::<u8>::from_elem((2, 3), 9);
//! let out = place(&small, (4, 8), &Translation::new([1.0, 2.0])).unwrap();
//!
//! assert_eq!(out.shape(), &[4, 8]);
//! assert_eq!(out[[1, 2]], 9);
//! assert_eq!(out[[0, 0]], 0);
//! ```

use std::ops::Range;

use std::fmt;

use log::{debug, trace};
use ndarray::{Array, ArrayBase, Data, Dimension, IntoDimension, Slice};
use num_traits::Zero;

use crate::translate::Translation;

/// Placement failure.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlaceError {
    /// Source rank differs from the canvas rank, with no way to align axes.
    ///
    /// Only reachable through dynamic-rank (`IxDyn`) arrays; with statically
    /// ranked arrays the mismatch is a type error instead.
    RankMismatch {
        /// Rank of the source raster.
        source: usize,
        /// Rank of the target canvas.
        target: usize,
    },
}

impl fmt::Display for PlaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaceError::RankMismatch { source, target } => write!(
                f,
                "source rank {source} cannot be reconciled with target rank {target}"
            ),
        }
    }
}

impl std::error::Error for PlaceError {}

/// Clipped copy region along one axis.
#[derive(Clone, Debug, PartialEq, Eq)]
struct AxisSpan {
    dst: Range<usize>,
    src: Range<usize>,
}

/// Embed `source` into a zero-filled canvas of `target_shape`, its origin
/// offset by `translation`.
///
/// The translation is resolved against the canvas rank (trailing alignment,
/// leading-zero defaults, ties-to-even rounding — see
/// [`Translation::resolve`]) and the overlapping hyper-rectangle is copied
/// verbatim. Any offset is valid: a source pushed partly or entirely
/// outside the canvas is cropped to the overlap, down to an untouched
/// all-zero canvas. Zero-sized sources and targets are valid too.
///
/// The computation is per-axis and rank-generic; rank 2 and 3 are the
/// intended domain but nothing here depends on it.
///
/// # Errors
///
/// [`PlaceError::RankMismatch`] when `source` and `target_shape` disagree
/// on rank (dynamic-rank arrays only).
pub fn place<S, D, Sh>(
    source: &ArrayBase<S, D>,
    target_shape: Sh,
    translation: &Translation,
) -> Result<Array<S::Elem, D>, PlaceError>
where
    S: Data,
    S::Elem: Clone + Zero,
    D: Dimension,
    Sh: IntoDimension<Dim = D>,
{
    let dim = target_shape.into_dimension();
    if source.ndim() != dim.ndim() {
        return Err(PlaceError::RankMismatch {
            source: source.ndim(),
            target: dim.ndim(),
        });
    }

    let offsets = translation.resolve(dim.ndim());
    let mut canvas = Array::zeros(dim.clone());

    let mut spans = Vec::with_capacity(dim.ndim());
    for (axis, (&s, &t)) in source.shape().iter().zip(dim.slice()).enumerate() {
        match clip_axis(s, t, offsets[axis]) {
            Some(span) => spans.push(span),
            None => {
                // No overlap on this axis — the all-zero canvas is the result.
                debug!(
                    "no overlap on axis {axis} (source extent {s}, target extent {t}, \
                     offset {}); output stays zero",
                    offsets[axis]
                );
                return Ok(canvas);
            }
        }
    }
    trace!("copy spans per axis: {spans:?}");

    let block = source.slice_each_axis(|ax| Slice::from(spans[ax.axis.index()].src.clone()));
    canvas
        .slice_each_axis_mut(|ax| Slice::from(spans[ax.axis.index()].dst.clone()))
        .assign(&block);
    Ok(canvas)
}

/// Clip one axis of the placement to the canvas bounds.
///
/// Returns `None` when the source lies entirely outside the canvas on this
/// axis (including zero-sized extents). Otherwise both ranges are non-empty,
/// of equal length, and in bounds for their respective arrays.
fn clip_axis(source_extent: usize, target_extent: usize, offset: i64) -> Option<AxisSpan> {
    let s = source_extent as i64;
    let t = target_extent as i64;

    let dst_start = offset.max(0);
    let dst_end = offset.saturating_add(s).min(t);
    if dst_end <= dst_start {
        return None;
    }
    let src_start = 0i64.saturating_sub(offset).max(0);
    let src_end = src_start + (dst_end - dst_start);

    Some(AxisSpan {
        dst: dst_start as usize..dst_end as usize,
        src: src_start as usize..src_end as usize,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array2, ArrayD, IxDyn};

    fn span(dst: Range<usize>, src: Range<usize>) -> AxisSpan {
        AxisSpan { dst, src }
    }

    // ── clip_axis ───────────────────────────────────────────────────────

    #[test]
    fn clip_interior() {
        assert_eq!(clip_axis(10, 50, 5), Some(span(5..15, 0..10)));
    }

    #[test]
    fn clip_negative_offset_crops_leading_edge() {
        assert_eq!(clip_axis(10, 20, -5), Some(span(0..5, 5..10)));
    }

    #[test]
    fn clip_offset_past_leading_edge_crops_trailing_edge() {
        assert_eq!(clip_axis(10, 20, 15), Some(span(15..20, 0..5)));
    }

    #[test]
    fn clip_exact_fit() {
        assert_eq!(clip_axis(20, 20, 0), Some(span(0..20, 0..20)));
    }

    #[test]
    fn clip_source_wider_than_target() {
        assert_eq!(clip_axis(30, 20, -5), Some(span(0..20, 5..25)));
    }

    #[test]
    fn clip_entirely_outside() {
        assert_eq!(clip_axis(10, 20, 20), None);
        assert_eq!(clip_axis(10, 20, -10), None);
        assert_eq!(clip_axis(10, 20, 1000), None);
    }

    #[test]
    fn clip_zero_extents() {
        assert_eq!(clip_axis(0, 20, 5), None);
        assert_eq!(clip_axis(10, 0, 0), None);
    }

    #[test]
    fn clip_extreme_offsets_do_not_overflow() {
        assert_eq!(clip_axis(10, 20, i64::MAX), None);
        assert_eq!(clip_axis(10, 20, i64::MIN), None);
    }

    // ── place ───────────────────────────────────────────────────────────

    #[test]
    fn place_basic() {
        let small = Array2::<u8>::from_elem((2, 2), 7);
        let out = place(&small, (4, 4), &Translation::new([1.0, 1.0])).unwrap();
        assert_eq!(out.shape(), &[4, 4]);
        assert_eq!(out[[1, 1]], 7);
        assert_eq!(out[[2, 2]], 7);
        assert_eq!(out[[0, 0]], 0);
        assert_eq!(out[[3, 3]], 0);
    }

    #[test]
    fn place_rank_mismatch() {
        let source = ArrayD::<u8>::zeros(IxDyn(&[4, 4]));
        let err = place(&source, IxDyn(&[4, 4, 4]), &Translation::zero(3)).unwrap_err();
        assert_eq!(
            err,
            PlaceError::RankMismatch {
                source: 2,
                target: 3
            }
        );
    }

    #[test]
    fn place_dynamic_rank_ok() {
        let source = ArrayD::<u16>::from_elem(IxDyn(&[2, 2]), 3);
        let out = place(&source, IxDyn(&[3, 3]), &Translation::zero(2)).unwrap();
        assert_eq!(out.shape(), &[3, 3]);
        assert_eq!(out[[0, 0]], 3);
        assert_eq!(out[[2, 2]], 0);
    }
}
