//! Raster placement: embed a smaller 2D/3D raster into a larger zero-filled
//! canvas at a rounded world-space offset, cropped to bounds.
//!
//! The output always has exactly the requested canvas shape and the source's
//! element type; every element is either a copied source element or zero.
//! Pure computation — no I/O, no shared state, deterministic.
//!
//! # Modules
//!
//! - [`translate`] — world-space translation vectors, rounding, axis-order reconciliation
//! - [`placement`] — the placement engine
//! - [`session`] — caller-side Idle → Aligning → Applied lifecycle
//!
//! # Example
//!
//! ```
//! use ndarray::Array2;
//! use rasterpad::{Translation, place};
//!
//! let small = Array2::<u8>::from_elem((10, 15), 255);
//! let out = place(&small, (50, 60), &Translation::new([5.0, 10.0])).unwrap();
//!
//! assert_eq!(out.shape(), &[50, 60]);
//! assert_eq!(out[[5, 10]], 255);
//! assert_eq!(out[[4, 10]], 0);
//! ```

#![forbid(unsafe_code)]

pub mod placement;
pub mod session;
pub mod translate;

pub use placement::{PlaceError, place};
pub use session::{AlignmentSession, SessionError, SessionState};
pub use translate::Translation;
