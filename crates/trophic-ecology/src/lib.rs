//! Validated ecosystem models for the Trophic solver.
//!
//! This crate turns raw species rows into immutable per-ecosystem models and
//! provides the calorie pool that a single simulation run draws from.
//!
//! # Modules
//!
//! - [`builder`] -- Row validation and per-ecosystem model assembly.
//! - [`error`] -- [`ValidationError`] and the [`Violation`] kinds.
//! - [`model`] -- [`EcosystemModel`], the immutable species set of one
//!   ecosystem with name lookups.
//! - [`pool`] -- [`ResourcePool`], remaining calories for one run.

pub mod builder;
pub mod error;
pub mod model;
pub mod pool;

// Re-export primary types at crate root.
pub use builder::{build, build_ecosystem};
pub use error::{ValidationError, Violation};
pub use model::EcosystemModel;
pub use pool::ResourcePool;
