//! Consumption priority policies.
//!
//! Before every feeding turn the simulator picks the pending consumer that
//! a [`PriorityPolicy`] ranks first. The policy is a comparator over
//! [`ConsumerState`] views built from the live pending set and the live
//! pool, so dynamic policies see depletion caused by earlier turns.
//!
//! Built-in policies are selected through [`PriorityKind`]; any closure of
//! the right shape is a policy too.

use std::cmp::Ordering;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use trophic_types::Species;

/// What a policy knows about a pending consumer at selection time.
#[derive(Debug, Clone, Copy)]
pub struct ConsumerState<'a> {
    /// The consumer itself.
    pub species: &'a Species,
    /// Row position of the consumer in the ecosystem input.
    pub position: usize,
    /// Calories the consumer itself still provides in the current run.
    pub available: Decimal,
}

/// Orders pending consumers for feeding.
///
/// `compare` returns [`Ordering::Less`] when `a` must eat before `b`. It
/// should be a total order; on ties the consumer listed first in the
/// candidate wins.
pub trait PriorityPolicy: Sync {
    /// Compare two pending consumers.
    fn compare(&self, a: &ConsumerState<'_>, b: &ConsumerState<'_>) -> Ordering;
}

impl<F> PriorityPolicy for F
where
    F: Fn(&ConsumerState<'_>, &ConsumerState<'_>) -> Ordering + Sync,
{
    fn compare(&self, a: &ConsumerState<'_>, b: &ConsumerState<'_>) -> Ordering {
        self(a, b)
    }
}

/// Built-in priority policies, selectable from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityKind {
    /// Largest `calories_needed` first, ties by ascending name.
    #[default]
    DescendingNeed,
    /// Input row order.
    RowOrder,
    /// Largest remaining own calories first, ties by ascending name.
    RichestFirst,
}

impl PriorityKind {
    /// The configuration name of this policy.
    pub const fn name(self) -> &'static str {
        match self {
            Self::DescendingNeed => "descending_need",
            Self::RowOrder => "row_order",
            Self::RichestFirst => "richest_first",
        }
    }
}

impl core::fmt::Display for PriorityKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

impl PriorityPolicy for PriorityKind {
    fn compare(&self, a: &ConsumerState<'_>, b: &ConsumerState<'_>) -> Ordering {
        match self {
            Self::DescendingNeed => descending_need(a, b),
            Self::RowOrder => row_order(a, b),
            Self::RichestFirst => richest_first(a, b),
        }
    }
}

/// Descending `calories_needed`, then ascending name.
pub fn descending_need(a: &ConsumerState<'_>, b: &ConsumerState<'_>) -> Ordering {
    b.species
        .calories_needed
        .cmp(&a.species.calories_needed)
        .then_with(|| a.species.name.cmp(&b.species.name))
}

/// Ascending input row position.
pub fn row_order(a: &ConsumerState<'_>, b: &ConsumerState<'_>) -> Ordering {
    a.position.cmp(&b.position)
}

/// Descending remaining own calories, then ascending name.
pub fn richest_first(a: &ConsumerState<'_>, b: &ConsumerState<'_>) -> Ordering {
    b.available
        .cmp(&a.available)
        .then_with(|| a.species.name.cmp(&b.species.name))
}
