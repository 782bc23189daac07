//! Error types for the `trophic-ecology` crate.
//!
//! Building a model is the only fallible operation here. A failure is
//! reported as a [`ValidationError`] carrying the ecosystem, the offending
//! species and the [`Violation`] that was detected.

use rust_decimal::Decimal;
use trophic_types::{EcosystemId, SpeciesName};

/// A constraint broken by an input row.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
    /// The species name is empty or whitespace.
    #[error("species name is blank")]
    BlankName,

    /// Another row in the same ecosystem already declared this name.
    #[error("species is declared more than once")]
    DuplicateSpecies,

    /// The kind label is not a recognized species kind.
    #[error("unknown species kind {0:?}")]
    UnknownKind(String),

    /// `calories_provided` is below zero.
    #[error("calories provided is negative ({0})")]
    NegativeCaloriesProvided(Decimal),

    /// `calories_needed` is below zero.
    #[error("calories needed is negative ({0})")]
    NegativeCaloriesNeeded(Decimal),

    /// A food source names a species not declared in the ecosystem.
    #[error("food source {0} is not a species of this ecosystem")]
    DanglingFoodSource(SpeciesName),
}

/// A row that failed validation, with enough context to locate it.
///
/// The whole ecosystem named here is rejected; no partial model is built.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("ecosystem {ecosystem_id}, species '{species_name}': {violation}")]
pub struct ValidationError {
    /// The ecosystem whose build was aborted.
    pub ecosystem_id: EcosystemId,
    /// The species row that broke the constraint.
    pub species_name: SpeciesName,
    /// The constraint that was broken.
    pub violation: Violation,
}
