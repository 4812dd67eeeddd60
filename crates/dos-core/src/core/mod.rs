//! # Core Module
//!
//! The DOS data layer: single spectral series, the metadata attached to them,
//! the kernels used to broaden them, and collections of many series.
//!
//! ## Key Components
//!
//! - [`data`] - `RawDosData` (weighted delta functions), `GridDosData`
//!   (evenly sampled intensities) and the `DosData` enum that combines them
//! - [`info`] - string metadata and its intersection/selection algebra
//! - [`broadening`] - smearing kernels and grid helpers
//! - [`collection`] - `DosCollection` with generic, raw-only and grid-only kinds
//! - [`plot`] - hand-off of sampled arrays to an external plotting backend
//!
//! ## Combination Rules
//!
//! Raw series combine by concatenation, grid series by summing weights on a
//! shared axis. Either way only the metadata pairs common to both operands
//! survive, which is what makes `DosCollection::sum_by` produce meaningful
//! group labels.

pub mod broadening;
pub mod collection;
pub mod data;
pub mod info;
pub mod plot;
