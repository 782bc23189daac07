//! Sequential consumption simulator.
//!
//! Classifies one candidate (the producers plus a subset of consumers) as
//! sustainable or not:
//!
//! 1. Seed a fresh [`ResourcePool`] from every member of the candidate.
//! 2. While consumers are pending, let the [`PriorityPolicy`] pick the next
//!    eater from the live pending set.
//! 3. The eater walks its food sources in declared order, taking
//!    `min(remaining need, available)` from each.
//! 4. If a draw left any source at exactly zero the run ends with
//!    [`Verdict::ResourceDepleted`], even when the eater was fully fed.
//!    Otherwise, if need remains, it ends with [`Verdict::UnmetNeed`].
//! 5. A run that empties the pending set is [`Verdict::Sustainable`].
//!
//! Every run owns its pool and pending set; nothing is shared between runs.

use rust_decimal::Decimal;
use trophic_ecology::{EcosystemModel, ResourcePool};
use trophic_types::{Candidate, Draw, SimulationOutcome, Species, SpeciesName, Verdict};

use crate::priority::{ConsumerState, PriorityPolicy};

/// Simulate `candidate` against `model` under `policy`.
///
/// Consumer names in the candidate that are not consumers of `model` are
/// ignored.
pub fn simulate(
    candidate: &Candidate,
    model: &EcosystemModel,
    policy: &dyn PriorityPolicy,
) -> SimulationOutcome {
    run(candidate, model, policy, None)
}

/// Like [`simulate`], also returning every non-zero draw in the order it
/// happened.
pub fn trace(
    candidate: &Candidate,
    model: &EcosystemModel,
    policy: &dyn PriorityPolicy,
) -> (SimulationOutcome, Vec<Draw>) {
    let mut draws = Vec::new();
    let outcome = run(candidate, model, policy, Some(&mut draws));
    (outcome, draws)
}

fn run(
    candidate: &Candidate,
    model: &EcosystemModel,
    policy: &dyn PriorityPolicy,
    mut draws: Option<&mut Vec<Draw>>,
) -> SimulationOutcome {
    let mut pool = ResourcePool::seed(model, candidate);
    let mut pending: Vec<&Species> = candidate
        .consumers
        .iter()
        .filter_map(|name| model.consumer(name))
        .collect();

    let verdict = loop {
        let Some(next) = select_next(&pending, &pool, model, policy) else {
            break Verdict::Sustainable;
        };
        let eater = pending.remove(next);
        if let Some(failure) = feed(eater, &mut pool, draws.as_deref_mut()) {
            break failure;
        }
    };

    SimulationOutcome {
        candidate: candidate.clone(),
        verdict,
    }
}

/// Index of the pending consumer the policy ranks first.
fn select_next(
    pending: &[&Species],
    pool: &ResourcePool,
    model: &EcosystemModel,
    policy: &dyn PriorityPolicy,
) -> Option<usize> {
    pending
        .iter()
        .enumerate()
        .map(|(index, species)| {
            let state = ConsumerState {
                species,
                position: model.position(&species.name).unwrap_or(usize::MAX),
                available: pool.available(&species.name),
            };
            (index, state)
        })
        .min_by(|(_, a), (_, b)| policy.compare(a, b))
        .map(|(index, _)| index)
}

/// Run one feeding turn. Returns the failure verdict, if any.
fn feed(
    eater: &Species,
    pool: &mut ResourcePool,
    mut draws: Option<&mut Vec<Draw>>,
) -> Option<Verdict> {
    let mut need = eater.calories_needed;
    let mut depleted: Option<&SpeciesName> = None;

    for source in &eater.food_sources {
        if need.is_zero() {
            break;
        }
        let taken = pool.draw(source, need);
        if taken.is_zero() {
            continue;
        }
        need = need.saturating_sub(taken);
        let remaining = pool.available(source);
        if let Some(log) = draws.as_deref_mut() {
            log.push(Draw {
                consumer: eater.name.clone(),
                source: source.clone(),
                amount: taken,
                remaining,
            });
        }
        if remaining.is_zero() && depleted.is_none() {
            depleted = Some(source);
        }
    }

    if let Some(source) = depleted {
        return Some(Verdict::ResourceDepleted(source.clone()));
    }
    if need > Decimal::ZERO {
        return Some(Verdict::UnmetNeed(eater.name.clone()));
    }
    None
}
