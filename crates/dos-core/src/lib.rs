//! # dosdata
//!
//! Density-of-states (DOS) data for atomistic and electronic-structure
//! simulations: containers for spectral series, Gaussian broadening onto
//! energy grids, and collections that select, group and sum series by their
//! metadata.
//!
//! ## Layout
//!
//! - **[`core`]: the data layer.** Single series ([`core::data`]), metadata
//!   algebra ([`core::info`]), broadening kernels ([`core::broadening`]),
//!   collections ([`core::collection`]) and the hand-off to a plotting layer
//!   ([`core::plot`]).
//! - **[`config`]:** sampling and plotting parameters with validating builders.
//! - **[`error`]:** the [`error::DosError`] taxonomy shared by every operation.
//!
//! ## Example
//!
//! ```
//! use dosdata::core::collection::DosCollection;
//! use dosdata::core::data::RawDosData;
//! use dosdata::core::info::from_pairs;
//! use dosdata::config::SampleGridConfig;
//!
//! let collection = DosCollection::new(vec![
//!     RawDosData::new(vec![-1.0, 0.5], vec![1.0, 1.0], Some(from_pairs([("symbol", "O")])))
//!         .unwrap()
//!         .into(),
//!     RawDosData::new(vec![0.0], vec![2.0], Some(from_pairs([("symbol", "H")])))
//!         .unwrap()
//!         .into(),
//! ]);
//!
//! let oxygen = collection.select(&from_pairs([("symbol", "O")])).unwrap();
//! assert_eq!(oxygen.len(), 1);
//!
//! let (energies, weights) = collection
//!     .sample_grid(&SampleGridConfig::new(200))
//!     .unwrap();
//! assert_eq!(weights.shape(), (2, energies.len()));
//! ```

pub mod config;
pub mod core;
pub mod error;
