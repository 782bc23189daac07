//! Core entity structs for the Trophic solver.
//!
//! Covers the raw input row, the validated [`Species`], the candidate and
//! outcome types exchanged with the simulator, and the result/report types
//! produced by the aggregator and batch runner.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::enums::{SpeciesKind, Verdict};
use crate::ids::{EcosystemId, RunId, SpeciesName};

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// One unvalidated species row as handed over by the I/O layer.
///
/// Field aliases accept the column headers of the species sheet
/// (`Ecosystem`, `Species`, `Type`, `CaloriesProvided`, `CaloriesNeeded`,
/// `FoodSources`). The kind is kept as a raw label so the model builder can
/// report unrecognized values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesRow {
    /// Ecosystem the species belongs to.
    #[serde(alias = "Ecosystem")]
    pub ecosystem_id: EcosystemId,
    /// Species name, unique within the ecosystem.
    #[serde(alias = "Species")]
    pub species_name: SpeciesName,
    /// Raw kind label (`Producer`, `Consumer`, or `Animal`).
    #[serde(alias = "Type")]
    pub kind: String,
    /// Calories this species makes available to its eaters.
    #[serde(alias = "CaloriesProvided", default)]
    pub calories_provided: Decimal,
    /// Calories this species must eat. Ignored for producers.
    #[serde(alias = "CaloriesNeeded", default)]
    pub calories_needed: Decimal,
    /// Species this one may eat, in preference order.
    ///
    /// Accepts a list of names or a single comma-separated string.
    #[serde(
        alias = "FoodSources",
        default,
        deserialize_with = "deserialize_food_sources"
    )]
    pub food_sources: Vec<SpeciesName>,
}

/// Split a comma-separated food source cell into names.
///
/// Whitespace around each name is trimmed and empty entries are dropped, so
/// `"Grass, Shrub,,"` yields `["Grass", "Shrub"]`.
pub fn split_food_sources(cell: &str) -> Vec<SpeciesName> {
    cell.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(SpeciesName::from)
        .collect()
}

fn deserialize_food_sources<'de, D>(deserializer: D) -> Result<Vec<SpeciesName>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Cell {
        List(Vec<String>),
        Text(String),
    }

    Ok(match Option::<Cell>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(Cell::Text(text)) => split_food_sources(&text),
        Some(Cell::List(items)) => items
            .iter()
            .map(|item| item.trim())
            .filter(|name| !name.is_empty())
            .map(SpeciesName::from)
            .collect(),
    })
}

// ---------------------------------------------------------------------------
// Validated model
// ---------------------------------------------------------------------------

/// A validated species.
///
/// Constructed by the model builder and never mutated afterwards; the
/// ecosystem model only hands out shared references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Species {
    /// Unique name within the ecosystem.
    pub name: SpeciesName,
    /// Producer or consumer.
    pub kind: SpeciesKind,
    /// Calories initially available to eaters of this species (>= 0).
    pub calories_provided: Decimal,
    /// Calories this species must eat (>= 0, meaningful for consumers).
    pub calories_needed: Decimal,
    /// Species this one may draw from, in declared order.
    pub food_sources: Vec<SpeciesName>,
}

impl Species {
    /// Whether this species is a producer.
    pub const fn is_producer(&self) -> bool {
        matches!(self.kind, SpeciesKind::Producer)
    }

    /// Whether this species is a consumer.
    pub const fn is_consumer(&self) -> bool {
        matches!(self.kind, SpeciesKind::Consumer)
    }
}

// ---------------------------------------------------------------------------
// Simulation
// ---------------------------------------------------------------------------

/// One subset of an ecosystem's consumers to be tested for coexistence.
///
/// Producers are implicit members and are never listed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Candidate {
    /// Ecosystem this candidate belongs to.
    pub ecosystem_id: EcosystemId,
    /// Selected consumers in model insertion order.
    pub consumers: Vec<SpeciesName>,
}

impl Candidate {
    /// The selected consumer names, sorted lexicographically.
    pub fn sorted_consumers(&self) -> Vec<SpeciesName> {
        let mut names = self.consumers.clone();
        names.sort();
        names
    }
}

/// The verdict reached for a single candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationOutcome {
    /// The candidate that was simulated.
    pub candidate: Candidate,
    /// Sustainable, or the first failure encountered.
    pub verdict: Verdict,
}

impl SimulationOutcome {
    /// Whether the candidate was classified as sustainable.
    pub const fn is_sustainable(&self) -> bool {
        self.verdict.is_sustainable()
    }
}

/// A single non-zero draw of calories by a consumer from a food source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draw {
    /// The eating consumer.
    pub consumer: SpeciesName,
    /// The food source drawn from.
    pub source: SpeciesName,
    /// Calories taken.
    pub amount: Decimal,
    /// Calories left in the source after the draw.
    pub remaining: Decimal,
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Summary of all sustainable candidates of one ecosystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EcosystemResult {
    /// The evaluated ecosystem.
    pub ecosystem_id: EcosystemId,
    /// Whether at least one candidate is sustainable.
    pub any_sustainable: bool,
    /// Number of sustainable candidates found.
    pub sustainable_count: usize,
    /// Sustainable candidates in enumeration order, each sorted by name.
    pub combinations: Vec<Vec<SpeciesName>>,
    /// Number of candidates that were simulated.
    pub candidates_evaluated: u64,
    /// Whether evaluation stopped early at the configured result cap.
    pub capped: bool,
}

/// Per-ecosystem entry of a [`BatchReport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EcosystemReport {
    /// The ecosystem was built and evaluated.
    Evaluated(EcosystemResult),
    /// The ecosystem could not be built or evaluated.
    Rejected {
        /// The rejected ecosystem.
        ecosystem_id: EcosystemId,
        /// The offending species, when the failure is tied to one row.
        species_name: Option<SpeciesName>,
        /// Human-readable description of the violated constraint.
        reason: String,
    },
}

impl EcosystemReport {
    /// The ecosystem this entry describes.
    pub const fn ecosystem_id(&self) -> &EcosystemId {
        match self {
            Self::Evaluated(result) => &result.ecosystem_id,
            Self::Rejected { ecosystem_id, .. } => ecosystem_id,
        }
    }
}

/// The output of one batch run over every ecosystem in the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    /// Identifier of this run.
    pub run_id: RunId,
    /// When the run finished.
    pub generated_at: DateTime<Utc>,
    /// Name of the consumption priority policy used.
    pub priority: String,
    /// One entry per ecosystem, ordered by ecosystem id.
    pub ecosystems: Vec<EcosystemReport>,
}
