//! The immutable, validated model of one ecosystem.
//!
//! An [`EcosystemModel`] holds every species of an ecosystem in row order
//! and a name index for lookups. It can only be produced by the model
//! builder, so holding one means the referential integrity checks passed.

use std::collections::BTreeMap;

use trophic_types::{Candidate, EcosystemId, Species, SpeciesName};

/// A validated ecosystem: producers and consumers keyed by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EcosystemModel {
    /// The ecosystem identifier.
    id: EcosystemId,
    /// All species in input row order.
    species: Vec<Species>,
    /// Name -> position in `species`.
    index: BTreeMap<SpeciesName, usize>,
}

impl EcosystemModel {
    /// Assemble a model from species that already passed validation.
    pub(crate) fn from_validated(id: EcosystemId, species: Vec<Species>) -> Self {
        let index = species
            .iter()
            .enumerate()
            .map(|(position, s)| (s.name.clone(), position))
            .collect();
        Self { id, species, index }
    }

    /// The ecosystem identifier.
    pub const fn id(&self) -> &EcosystemId {
        &self.id
    }

    /// Look up a species by name.
    pub fn species(&self, name: &SpeciesName) -> Option<&Species> {
        self.index.get(name).and_then(|&i| self.species.get(i))
    }

    /// Look up a consumer by name. Producers and unknown names yield `None`.
    pub fn consumer(&self, name: &SpeciesName) -> Option<&Species> {
        self.species(name).filter(|s| s.is_consumer())
    }

    /// Row position of a species within the ecosystem input.
    pub fn position(&self, name: &SpeciesName) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Producers in row order.
    pub fn producers(&self) -> impl Iterator<Item = &Species> {
        self.species.iter().filter(|s| s.is_producer())
    }

    /// Consumers in row order. This is the order the enumerator indexes.
    pub fn consumers(&self) -> impl Iterator<Item = &Species> {
        self.species.iter().filter(|s| s.is_consumer())
    }

    /// Number of producers.
    pub fn producer_count(&self) -> usize {
        self.producers().count()
    }

    /// Number of consumers (`n` in the `2^n` candidate count).
    pub fn consumer_count(&self) -> usize {
        self.consumers().count()
    }

    /// Build a candidate of this ecosystem from a selection of consumers.
    pub fn candidate<'a>(&self, consumers: impl IntoIterator<Item = &'a Species>) -> Candidate {
        Candidate {
            ecosystem_id: self.id.clone(),
            consumers: consumers.into_iter().map(|s| s.name.clone()).collect(),
        }
    }
}
