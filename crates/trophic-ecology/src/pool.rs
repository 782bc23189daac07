//! Per-run calorie pools.
//!
//! A [`ResourcePool`] tracks the calories each species of one candidate
//! still provides. It is seeded fresh for every simulation run and dropped
//! at the end of it. Draws are capped at what is available, so a pool entry
//! never goes below zero.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use trophic_types::{Candidate, SpeciesName};

use crate::model::EcosystemModel;

/// Remaining calories per species for a single simulation run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResourcePool {
    remaining: BTreeMap<SpeciesName, Decimal>,
}

impl ResourcePool {
    /// Seed a pool for `candidate`.
    ///
    /// Every producer of the model gets an entry, as does every selected
    /// consumer, each starting at its `calories_provided`. Species that are
    /// not part of the candidate have no entry and provide nothing.
    pub fn seed(model: &EcosystemModel, candidate: &Candidate) -> Self {
        let producers = model
            .producers()
            .map(|s| (s.name.clone(), s.calories_provided));
        let consumers = candidate
            .consumers
            .iter()
            .filter_map(|name| model.consumer(name))
            .map(|s| (s.name.clone(), s.calories_provided));
        Self {
            remaining: producers.chain(consumers).collect(),
        }
    }

    /// Calories still available from `source`. Absent species read as zero.
    pub fn available(&self, source: &SpeciesName) -> Decimal {
        self.remaining.get(source).copied().unwrap_or(Decimal::ZERO)
    }

    /// Whether `source` is part of this run.
    pub fn contains(&self, source: &SpeciesName) -> bool {
        self.remaining.contains_key(source)
    }

    /// Whether `source` is part of this run and has nothing left.
    pub fn is_exhausted(&self, source: &SpeciesName) -> bool {
        self.remaining.get(source).is_some_and(Decimal::is_zero)
    }

    /// Draw up to `requested` calories from `source`, returning the amount
    /// actually taken.
    ///
    /// The amount taken is `min(requested, available)`; a zero-sized draw
    /// leaves the pool untouched. Negative requests take nothing.
    pub fn draw(&mut self, source: &SpeciesName, requested: Decimal) -> Decimal {
        let Some(available) = self.remaining.get_mut(source) else {
            return Decimal::ZERO;
        };
        let taken = requested.min(*available).max(Decimal::ZERO);
        if !taken.is_zero() {
            *available = available.saturating_sub(taken);
        }
        taken
    }

    /// Number of species in the pool.
    pub fn len(&self) -> usize {
        self.remaining.len()
    }

    /// Whether the pool has no entries.
    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }
}
