//! Feasibility aggregator.
//!
//! Runs the simulator over every candidate of an ecosystem, in enumeration
//! order, and summarizes the sustainable ones into an [`EcosystemResult`].
//! Each entry of `combinations` is the candidate's consumer names sorted
//! lexicographically; the list itself keeps enumeration order.
//!
//! With the `parallel` feature and `evaluation.parallel` set, candidates are
//! simulated on a rayon pool in chunks no larger than the room left under
//! `result_cap`. Each chunk is tallied in enumeration order, so both paths
//! simulate the same candidates and return identical results.

use tracing::debug;
use trophic_ecology::EcosystemModel;
use trophic_types::{EcosystemId, EcosystemResult, SimulationOutcome, Species, SpeciesName};

use crate::config::EvaluationConfig;
use crate::enumerate::{EnumerateError, enumerate};
use crate::priority::PriorityPolicy;
use crate::simulate::simulate;

/// Errors that prevent an ecosystem from being evaluated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvaluationError {
    /// The ecosystem has more consumers than the configured limit.
    #[error("ecosystem {ecosystem_id} has {count} consumers, above the limit of {limit}")]
    TooManyConsumers {
        /// The refused ecosystem.
        ecosystem_id: EcosystemId,
        /// Its consumer count.
        count: usize,
        /// The configured `max_consumers`.
        limit: usize,
    },

    /// The enumerator could not be started.
    #[error("enumeration failed: {source}")]
    Enumerate {
        /// The underlying enumeration error.
        #[from]
        source: EnumerateError,
    },
}

/// Evaluate every candidate of `model` using the configured priority policy.
///
/// # Errors
///
/// Returns [`EvaluationError::TooManyConsumers`] if the ecosystem exceeds
/// `config.max_consumers`.
pub fn evaluate(
    model: &EcosystemModel,
    config: &EvaluationConfig,
) -> Result<EcosystemResult, EvaluationError> {
    evaluate_with_policy(model, config, &config.priority)
}

/// Evaluate every candidate of `model` under an explicit priority policy.
///
/// `config.priority` is ignored; every other setting applies.
///
/// # Errors
///
/// Returns [`EvaluationError::TooManyConsumers`] if the ecosystem exceeds
/// `config.max_consumers`.
pub fn evaluate_with_policy(
    model: &EcosystemModel,
    config: &EvaluationConfig,
    policy: &dyn PriorityPolicy,
) -> Result<EcosystemResult, EvaluationError> {
    let consumers: Vec<&Species> = model.consumers().collect();
    if consumers.len() > config.max_consumers {
        return Err(EvaluationError::TooManyConsumers {
            ecosystem_id: model.id().clone(),
            count: consumers.len(),
            limit: config.max_consumers,
        });
    }

    let subsets = enumerate(&consumers)?;
    debug!(
        ecosystem = %model.id(),
        consumers = consumers.len(),
        candidates = subsets.total(),
        subset_size = ?config.subset_size,
        "Evaluating ecosystem"
    );

    let candidates = subsets
        .filter(|members| config.subset_size.is_none_or(|k| members.len() == k))
        .map(|members| model.candidate(members.into_iter().copied()));

    if config.parallel {
        #[cfg(feature = "parallel")]
        return Ok(parallel::evaluate(model, candidates, config, policy));

        #[cfg(not(feature = "parallel"))]
        tracing::warn!(
            ecosystem = %model.id(),
            "Parallel evaluation requested without the `parallel` feature; running sequentially"
        );
    }

    let mut tally = Tally::new(model.id().clone(), config.result_cap);
    for candidate in candidates {
        if tally.is_full() {
            tally.capped = true;
            break;
        }
        tally.record(&simulate(&candidate, model, policy));
    }
    Ok(tally.finish())
}

/// Running summary of sustainable candidates, in enumeration order.
struct Tally {
    ecosystem_id: EcosystemId,
    cap: Option<usize>,
    combinations: Vec<Vec<SpeciesName>>,
    evaluated: u64,
    capped: bool,
}

impl Tally {
    const fn new(ecosystem_id: EcosystemId, cap: Option<usize>) -> Self {
        Self {
            ecosystem_id,
            cap,
            combinations: Vec::new(),
            evaluated: 0,
            capped: false,
        }
    }

    fn is_full(&self) -> bool {
        self.cap.is_some_and(|cap| self.combinations.len() >= cap)
    }

    fn record(&mut self, outcome: &SimulationOutcome) {
        self.evaluated = self.evaluated.saturating_add(1);
        debug!(
            ecosystem = %self.ecosystem_id,
            consumers = ?outcome.candidate.consumers,
            verdict = ?outcome.verdict,
            "Candidate simulated"
        );
        if outcome.is_sustainable() {
            self.combinations.push(outcome.candidate.sorted_consumers());
        }
    }

    fn finish(self) -> EcosystemResult {
        EcosystemResult {
            ecosystem_id: self.ecosystem_id,
            any_sustainable: !self.combinations.is_empty(),
            sustainable_count: self.combinations.len(),
            combinations: self.combinations,
            candidates_evaluated: self.evaluated,
            capped: self.capped,
        }
    }
}

#[cfg(feature = "parallel")]
mod parallel {
    use rayon::prelude::*;
    use trophic_types::Candidate;

    use super::{EcosystemModel, EcosystemResult, EvaluationConfig, PriorityPolicy, Tally};
    use crate::simulate::simulate;

    /// Upper bound on candidates held in memory at once.
    const CHUNK: usize = 4096;

    impl Tally {
        /// How many more candidates can be simulated without overshooting
        /// the result cap, even if every one of them is sustainable.
        fn room(&self) -> usize {
            self.cap.map_or(CHUNK, |cap| {
                cap.saturating_sub(self.combinations.len()).min(CHUNK)
            })
        }
    }

    /// Simulate candidates on the rayon pool chunk by chunk, tallying each
    /// chunk in enumeration order.
    pub(super) fn evaluate(
        model: &EcosystemModel,
        candidates: impl Iterator<Item = Candidate>,
        config: &EvaluationConfig,
        policy: &dyn PriorityPolicy,
    ) -> EcosystemResult {
        let mut candidates = candidates.peekable();
        let mut tally = Tally::new(model.id().clone(), config.result_cap);
        loop {
            if tally.is_full() {
                tally.capped = candidates.peek().is_some();
                break;
            }
            let chunk: Vec<Candidate> = candidates.by_ref().take(tally.room()).collect();
            if chunk.is_empty() {
                break;
            }
            let outcomes: Vec<_> = chunk
                .par_iter()
                .map(|candidate| simulate(candidate, model, policy))
                .collect();
            for outcome in &outcomes {
                tally.record(outcome);
            }
        }
        tally.finish()
    }
}
