//! Model builder: raw species rows to validated ecosystem models.
//!
//! Rows are grouped by ecosystem id, keeping row order within each group.
//! Each group is validated independently in two passes:
//!
//! 1. **Row checks** -- blank or duplicate name, unknown kind label,
//!    negative calorie values.
//! 2. **Reference checks** -- every food source names a species declared
//!    in the same ecosystem.
//!
//! The first violation aborts that ecosystem only. Other ecosystems in the
//! same batch are still built.

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;
use tracing::debug;
use trophic_types::{EcosystemId, Species, SpeciesKind, SpeciesName, SpeciesRow};

use crate::error::{ValidationError, Violation};
use crate::model::EcosystemModel;

/// Build one model per ecosystem id found in `rows`.
///
/// The returned map is ordered by ecosystem id. Each entry is either the
/// validated model or the first [`ValidationError`] found for that
/// ecosystem.
pub fn build(rows: &[SpeciesRow]) -> BTreeMap<EcosystemId, Result<EcosystemModel, ValidationError>> {
    let mut groups: BTreeMap<&EcosystemId, Vec<&SpeciesRow>> = BTreeMap::new();
    for row in rows {
        groups.entry(&row.ecosystem_id).or_default().push(row);
    }

    groups
        .into_iter()
        .map(|(id, group)| (id.clone(), build_ecosystem(id, &group)))
        .collect()
}

/// Validate and assemble a single ecosystem from its rows.
///
/// # Errors
///
/// Returns the first [`ValidationError`] encountered; no partial model is
/// produced.
pub fn build_ecosystem(
    id: &EcosystemId,
    rows: &[&SpeciesRow],
) -> Result<EcosystemModel, ValidationError> {
    let reject = |name: &SpeciesName, violation: Violation| ValidationError {
        ecosystem_id: id.clone(),
        species_name: name.clone(),
        violation,
    };

    // Pass 1: per-row checks.
    let mut declared: BTreeSet<&SpeciesName> = BTreeSet::new();
    let mut species = Vec::with_capacity(rows.len());
    for row in rows {
        let name = &row.species_name;
        if name.as_str().trim().is_empty() {
            return Err(reject(name, Violation::BlankName));
        }
        if !declared.insert(name) {
            return Err(reject(name, Violation::DuplicateSpecies));
        }
        let Some(kind) = SpeciesKind::from_label(&row.kind) else {
            return Err(reject(name, Violation::UnknownKind(row.kind.clone())));
        };
        if row.calories_provided < Decimal::ZERO {
            return Err(reject(
                name,
                Violation::NegativeCaloriesProvided(row.calories_provided),
            ));
        }
        if row.calories_needed < Decimal::ZERO {
            return Err(reject(
                name,
                Violation::NegativeCaloriesNeeded(row.calories_needed),
            ));
        }
        species.push(Species {
            name: name.clone(),
            kind,
            calories_provided: row.calories_provided,
            calories_needed: row.calories_needed,
            food_sources: row.food_sources.clone(),
        });
    }

    // Pass 2: referential integrity.
    for s in &species {
        if let Some(missing) = s.food_sources.iter().find(|f| !declared.contains(f)) {
            return Err(reject(&s.name, Violation::DanglingFoodSource(missing.clone())));
        }
    }

    let model = EcosystemModel::from_validated(id.clone(), species);
    debug!(
        ecosystem = %id,
        producers = model.producer_count(),
        consumers = model.consumer_count(),
        "Ecosystem model built"
    );
    Ok(model)
}
