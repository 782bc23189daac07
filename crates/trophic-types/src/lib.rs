//! Shared type definitions for the Trophic coexistence solver.
//!
//! This crate is the single source of truth for the values exchanged between
//! the model builder, the simulator, the aggregator and the engine binary.
//!
//! # Modules
//!
//! - [`ids`] -- Name newtypes for ecosystems and species, plus [`RunId`]
//! - [`enums`] -- [`SpeciesKind`] and the simulator [`Verdict`]
//! - [`structs`] -- Input rows, species, candidates, outcomes and reports

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{SpeciesKind, Verdict};
pub use ids::{EcosystemId, RunId, SpeciesName};
pub use structs::{
    BatchReport, Candidate, Draw, EcosystemReport, EcosystemResult, SimulationOutcome, Species,
    SpeciesRow, split_food_sources,
};
