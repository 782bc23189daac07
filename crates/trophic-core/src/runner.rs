//! Batch runner.
//!
//! This module provides [`run_batch`], which takes every species row of an
//! input, builds one model per ecosystem and evaluates each one that passed
//! validation. Failures are scoped per ecosystem: a rejected ecosystem shows
//! up as a [`EcosystemReport::Rejected`] entry and the rest of the batch is
//! still evaluated.

use chrono::Utc;
use tracing::{info, warn};
use trophic_ecology::{EcosystemModel, build};
use trophic_types::{BatchReport, EcosystemReport, RunId, SpeciesRow};

use crate::config::EvaluationConfig;
use crate::feasibility::{self, EvaluationError};

/// Counts describing a finished batch, for logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Ecosystems that were evaluated.
    pub evaluated: usize,
    /// Ecosystems rejected during build or evaluation.
    pub rejected: usize,
    /// Evaluated ecosystems with at least one sustainable candidate.
    pub with_sustainable: usize,
}

impl BatchSummary {
    /// Summarize a report.
    pub fn of(report: &BatchReport) -> Self {
        report
            .ecosystems
            .iter()
            .fold(Self::default(), |mut summary, entry| {
                match entry {
                    EcosystemReport::Evaluated(result) => {
                        summary.evaluated = summary.evaluated.saturating_add(1);
                        if result.any_sustainable {
                            summary.with_sustainable = summary.with_sustainable.saturating_add(1);
                        }
                    }
                    EcosystemReport::Rejected { .. } => {
                        summary.rejected = summary.rejected.saturating_add(1);
                    }
                }
                summary
            })
    }
}

/// Build and evaluate every ecosystem found in `rows`.
///
/// Entries of the returned report are ordered by ecosystem id.
pub fn run_batch(rows: &[SpeciesRow], config: &EvaluationConfig) -> BatchReport {
    let run_id = RunId::new();
    info!(
        run_id = %run_id,
        rows = rows.len(),
        priority = %config.priority,
        max_consumers = config.max_consumers,
        "Batch starting"
    );

    let ecosystems = build(rows)
        .into_iter()
        .map(|(ecosystem_id, built)| match built {
            Ok(model) => evaluate_model(&model, config),
            Err(err) => {
                warn!(
                    ecosystem = %ecosystem_id,
                    species = %err.species_name,
                    violation = %err.violation,
                    "Ecosystem rejected"
                );
                EcosystemReport::Rejected {
                    ecosystem_id,
                    species_name: Some(err.species_name),
                    reason: err.violation.to_string(),
                }
            }
        })
        .collect();

    let report = BatchReport {
        run_id,
        generated_at: Utc::now(),
        priority: config.priority.name().to_owned(),
        ecosystems,
    };

    let summary = BatchSummary::of(&report);
    info!(
        run_id = %run_id,
        evaluated = summary.evaluated,
        rejected = summary.rejected,
        with_sustainable = summary.with_sustainable,
        "Batch finished"
    );
    report
}

fn evaluate_model(model: &EcosystemModel, config: &EvaluationConfig) -> EcosystemReport {
    match feasibility::evaluate(model, config) {
        Ok(result) => {
            info!(
                ecosystem = %result.ecosystem_id,
                candidates = result.candidates_evaluated,
                sustainable = result.sustainable_count,
                capped = result.capped,
                "Ecosystem evaluated"
            );
            EcosystemReport::Evaluated(result)
        }
        Err(err) => {
            warn!(ecosystem = %model.id(), error = %err, "Ecosystem not evaluated");
            EcosystemReport::Rejected {
                ecosystem_id: model.id().clone(),
                species_name: None,
                reason: rejection_reason(&err),
            }
        }
    }
}

fn rejection_reason(err: &EvaluationError) -> String {
    match err {
        EvaluationError::TooManyConsumers { count, limit, .. } => {
            format!("{count} consumers exceed the limit of {limit}")
        }
        EvaluationError::Enumerate { source } => source.to_string(),
    }
}
