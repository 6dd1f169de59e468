//! sikho-core — Datasets, lookups, explanation composing and leveling.
//!
//! This crate owns the four static datasets sikho serves and every
//! computation performed on them. It does no networking; the server and CLI
//! crates build on the [`Catalog`] defined here.

pub mod catalog;
pub mod compose;
pub mod dataset;
pub mod error;
pub mod leveling;
pub mod model;

pub use catalog::Catalog;
pub use compose::{compose, Explanation};
pub use dataset::{validate_catalog, ValidationWarning};
pub use error::DatasetError;
pub use leveling::{compute_level, XpGain};
pub use model::Xp;
