//! Caller-side alignment lifecycle around the placement engine.
//!
//! The engine itself is stateless; everything transient — which rasters are
//! selected, whether an overlay is live, where it has been dragged — lives
//! in an [`AlignmentSession`]. States and transitions are explicit:
//!
//! ```text
//!   Idle ── start() ──▶ Aligning ── apply() ──▶ Applied
//!    ▲                    │  ▲                     │
//!    └───── cancel() ─────┘  └────── start() ──────┘
//! ```
//!
//! `start` is guarded on both rasters being selected; `drag_to` and `apply`
//! are only valid while `Aligning`. A host UI maps its buttons onto these
//! transitions and keeps no placement state of its own.

use log::warn;
use ndarray::{Array, Dimension, IntoDimension};
use num_traits::Zero;
use thiserror::Error;

use crate::placement::{PlaceError, place};
use crate::translate::Translation;

/// Lifecycle state of an [`AlignmentSession`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// No alignment in progress.
    #[default]
    Idle,
    /// An overlay is live and may be dragged.
    Aligning,
    /// The last alignment ran to completion.
    ///
    /// A resting state equivalent to [`Idle`](Self::Idle) for transition
    /// purposes; it only records that a padded raster was produced.
    Applied,
}

/// Session transition failure.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum SessionError {
    /// `start` was called with no base raster selected.
    #[error("no base raster selected")]
    BaseNotSelected,
    /// `start` was called with no source raster selected.
    #[error("no source raster selected")]
    SourceNotSelected,
    /// `drag_to` or `apply` was called outside the `Aligning` state.
    #[error("no alignment in progress")]
    NotAligning,
    /// The engine rejected the placement.
    #[error(transparent)]
    Place(#[from] PlaceError),
}

/// Interactive alignment of a source raster over a base canvas.
///
/// Owns the selected base shape, the source raster, and the live overlay
/// position while aligning. The base raster's pixels are never needed —
/// only its shape and world origin.
///
/// # Example
///
/// ```
/// use ndarray::{Array2, Ix2};
/// use rasterpad::{AlignmentSession, SessionState};
///
/// let mut session = AlignmentSession::<u8, Ix2>::new();
/// session.select_base((50, 60));
/// session.select_source(Array2::from_elem((10, 15), 255));
///
/// session.start().unwrap();
/// session.drag_to([5.0, 10.0]).unwrap();
/// let padded = session.apply().unwrap();
///
/// assert_eq!(session.state(), SessionState::Applied);
/// assert_eq!(padded.shape(), &[50, 60]);
/// assert_eq!(padded[[5, 10]], 255);
/// ```
#[derive(Clone, Debug)]
pub struct AlignmentSession<A, D: Dimension> {
    state: SessionState,
    base_shape: Option<D>,
    base_origin: Vec<f64>,
    source: Option<Array<A, D>>,
    overlay: Option<Vec<f64>>,
}

impl<A, D: Dimension> AlignmentSession<A, D> {
    /// Create an idle session with nothing selected.
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
            base_shape: None,
            base_origin: Vec::new(),
            source: None,
            overlay: None,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Select the base canvas by shape, with its world origin at zero.
    pub fn select_base<Sh: IntoDimension<Dim = D>>(&mut self, shape: Sh) {
        let shape = shape.into_dimension();
        self.base_origin = vec![0.0; shape.ndim()];
        self.base_shape = Some(shape);
    }

    /// Select the base canvas by shape and world origin.
    ///
    /// The origin is what overlay positions are diffed against in
    /// [`apply`](Self::apply); hosts whose canvas does not sit at the world
    /// origin pass it here.
    pub fn select_base_at<Sh: IntoDimension<Dim = D>>(
        &mut self,
        shape: Sh,
        origin: impl Into<Vec<f64>>,
    ) {
        self.base_shape = Some(shape.into_dimension());
        self.base_origin = origin.into();
    }

    /// Select the source raster to be placed.
    pub fn select_source(&mut self, raster: Array<A, D>) {
        self.source = Some(raster);
    }

    /// Whether both rasters are selected, i.e. [`start`](Self::start) would
    /// succeed.
    pub fn can_start(&self) -> bool {
        self.base_shape.is_some() && self.source.is_some()
    }

    /// Begin aligning: the overlay appears at the world origin, undragged.
    ///
    /// Valid from any state — starting over mid-alignment discards the
    /// current overlay position.
    ///
    /// # Errors
    ///
    /// [`SessionError::BaseNotSelected`] / [`SessionError::SourceNotSelected`]
    /// when a selection is missing; the state is left unchanged.
    pub fn start(&mut self) -> Result<(), SessionError> {
        let Some(base) = &self.base_shape else {
            return Err(SessionError::BaseNotSelected);
        };
        if self.source.is_none() {
            return Err(SessionError::SourceNotSelected);
        }
        self.overlay = Some(vec![0.0; base.ndim()]);
        self.state = SessionState::Aligning;
        Ok(())
    }

    /// Record the overlay's current world position.
    ///
    /// # Errors
    ///
    /// [`SessionError::NotAligning`] outside the `Aligning` state.
    pub fn drag_to(&mut self, world_position: impl Into<Vec<f64>>) -> Result<(), SessionError> {
        if self.state != SessionState::Aligning {
            return Err(SessionError::NotAligning);
        }
        self.overlay = Some(world_position.into());
        Ok(())
    }

    /// Abandon an in-progress alignment and return to `Idle`.
    ///
    /// A no-op in any other state; selections are kept either way.
    pub fn cancel(&mut self) {
        if self.state == SessionState::Aligning {
            self.overlay = None;
            self.state = SessionState::Idle;
        }
    }

    /// Apply the alignment: compute the translation, run the placement, and
    /// transition to `Applied`.
    ///
    /// The translation is the overlay's world position diffed against the
    /// canvas origin. An overlay that was never moved (still all-zero) falls
    /// back to the centered placement, `(target - source) / 2` per axis with
    /// floor division.
    ///
    /// # Errors
    ///
    /// [`SessionError::NotAligning`] outside the `Aligning` state, or a
    /// wrapped [`PlaceError`] from the engine; in both cases the state is
    /// left unchanged so the caller can correct and retry.
    pub fn apply(&mut self) -> Result<Array<A, D>, SessionError>
    where
        A: Clone + Zero,
    {
        if self.state != SessionState::Aligning {
            return Err(SessionError::NotAligning);
        }
        let (Some(shape), Some(source), Some(overlay)) =
            (&self.base_shape, &self.source, &self.overlay)
        else {
            return Err(SessionError::NotAligning);
        };

        let translation = if overlay.iter().all(|&c| c == 0.0) {
            warn!("overlay was never moved; falling back to centered placement");
            Translation::centered(shape.slice(), source.shape())
        } else {
            Translation::between(overlay, &self.base_origin)
        };

        let padded = place(source, shape.clone(), &translation)?;
        self.overlay = None;
        self.state = SessionState::Applied;
        Ok(padded)
    }
}

impl<A, D: Dimension> Default for AlignmentSession<A, D> {
    fn default() -> Self {
        Self::new()
    }
}
