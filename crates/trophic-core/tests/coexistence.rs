//! End-to-end tests: rows in, ecosystem results out.
//!
//! Covers the shared-meadow scenario, determinism, the producers-only
//! baseline, non-monotonic feasibility, and property tests over generated
//! ecosystems.

// Integration tests use expect/unwrap extensively for clarity -- panicking
// on failure is the correct behavior in test code.
#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::missing_panics_doc,
    clippy::arithmetic_side_effects
)]

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use trophic_core::config::EvaluationConfig;
use trophic_core::enumerate::enumerate;
use trophic_core::feasibility::evaluate;
use trophic_core::priority::PriorityKind;
use trophic_core::simulate::{simulate, trace};
use trophic_ecology::{EcosystemModel, build};
use trophic_types::{EcosystemId, SpeciesName, SpeciesRow, Verdict};

fn row(eco: &str, name: &str, kind: &str, provided: Decimal, needed: Decimal, foods: &[&str]) -> SpeciesRow {
    SpeciesRow {
        ecosystem_id: EcosystemId::from(eco),
        species_name: SpeciesName::from(name),
        kind: kind.to_owned(),
        calories_provided: provided,
        calories_needed: needed,
        food_sources: foods.iter().copied().map(SpeciesName::from).collect(),
    }
}

fn single_model(rows: &[SpeciesRow]) -> EcosystemModel {
    build(rows)
        .into_values()
        .next()
        .expect("one ecosystem")
        .expect("valid ecosystem")
}

fn names(list: &[&str]) -> Vec<SpeciesName> {
    list.iter().copied().map(SpeciesName::from).collect()
}

fn e1() -> EcosystemModel {
    single_model(&[
        row("E1", "P1", "Producer", dec!(10), dec!(0), &[]),
        row("E1", "A", "Consumer", dec!(0), dec!(6), &["P1"]),
        row("E1", "B", "Consumer", dec!(0), dec!(6), &["P1"]),
    ])
}

#[test]
fn shared_producer_scenario() {
    let model = e1();
    let policy = PriorityKind::default();
    let consumers: Vec<_> = model.consumers().collect();
    let verdicts: Vec<Verdict> = enumerate(&consumers)
        .expect("two consumers")
        .map(|members| {
            let candidate = model.candidate(members.into_iter().copied());
            simulate(&candidate, &model, &policy).verdict
        })
        .collect();

    assert_eq!(
        verdicts,
        vec![
            Verdict::Sustainable,
            Verdict::Sustainable,
            Verdict::Sustainable,
            Verdict::ResourceDepleted(SpeciesName::from("P1")),
        ]
    );

    let result = evaluate(&model, &EvaluationConfig::default()).expect("evaluates");
    assert_eq!(result.ecosystem_id, EcosystemId::from("E1"));
    assert!(result.any_sustainable);
    assert_eq!(result.sustainable_count, 3);
    assert_eq!(result.combinations, vec![names(&[]), names(&["A"]), names(&["B"])]);
}

#[test]
fn evaluation_is_deterministic() {
    let model = e1();
    let config = EvaluationConfig::default();
    let first = evaluate(&model, &config).expect("evaluates");
    for _ in 0..5 {
        assert_eq!(evaluate(&model, &config).expect("evaluates"), first);
    }
}

#[test]
fn adding_a_consumer_can_break_a_sustainable_set() {
    // {Vole} alone is fine; {Vole, Owl} is not because Owl eats Vole to
    // exhaustion, even though Owl on its own (with no Vole present) simply
    // goes hungry.
    let model = single_model(&[
        row("E1", "Seeds", "Producer", dec!(20), dec!(0), &[]),
        row("E1", "Vole", "Consumer", dec!(3), dec!(2), &["Seeds"]),
        row("E1", "Owl", "Consumer", dec!(0), dec!(3), &["Vole"]),
    ]);
    let policy = PriorityKind::default();
    let vole_only = model.candidate(model.consumer(&SpeciesName::from("Vole")));
    let both = model.candidate(model.consumers());

    assert!(simulate(&vole_only, &model, &policy).is_sustainable());
    assert_eq!(
        simulate(&both, &model, &policy).verdict,
        Verdict::ResourceDepleted(SpeciesName::from("Vole"))
    );
}

#[test]
fn independent_ecosystems_in_one_batch() {
    let rows = vec![
        row("E1", "P1", "Producer", dec!(10), dec!(0), &[]),
        row("E1", "A", "Consumer", dec!(0), dec!(6), &["P1"]),
        row("E2", "Kelp", "Producer", dec!(-1), dec!(0), &[]),
        row("E3", "Kelp", "Producer", dec!(5), dec!(0), &[]),
        row("E3", "Urchin", "Consumer", dec!(0), dec!(1), &["Kelp"]),
    ];
    let built = build(&rows);
    assert_eq!(built.len(), 3);
    let e2 = built.get(&EcosystemId::from("E2")).expect("E2 present");
    assert!(e2.is_err());

    for id in ["E1", "E3"] {
        let model = built
            .get(&EcosystemId::from(id))
            .expect("present")
            .as_ref()
            .expect("valid");
        let result = evaluate(model, &EvaluationConfig::default()).expect("evaluates");
        assert_eq!(result.sustainable_count, 2, "{id}");
    }
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

/// A generated ecosystem: two producers and up to five consumers, each
/// consumer eating from a random selection of earlier species.
fn arb_rows() -> impl Strategy<Value = Vec<SpeciesRow>> {
    let producers = prop::collection::vec(1_u32..40, 2);
    let consumers = prop::collection::vec(
        (0_u32..10, 0_u32..15, prop::collection::vec(any::<prop::sample::Index>(), 0..3)),
        0..=5,
    );
    (producers, consumers).prop_map(|(producers, consumers)| {
        let mut rows = Vec::new();
        let mut declared: Vec<String> = Vec::new();
        for (i, provided) in producers.into_iter().enumerate() {
            let name = format!("P{i}");
            rows.push(row("G", &name, "Producer", Decimal::from(provided), dec!(0), &[]));
            declared.push(name);
        }
        for (i, (provided, needed, picks)) in consumers.into_iter().enumerate() {
            let name = format!("C{i}");
            let foods: Vec<&str> = picks.iter().map(|p| p.get(declared.as_slice()).as_str()).collect();
            let r = row("G", &name, "Consumer", Decimal::from(provided), Decimal::from(needed), &foods);
            rows.push(r);
            declared.push(name);
        }
        rows
    })
}

proptest! {
    #[test]
    fn pools_never_go_negative(rows in arb_rows()) {
        let model = single_model(&rows);
        let consumers: Vec<_> = model.consumers().collect();
        for members in enumerate(&consumers).expect("small") {
            let candidate = model.candidate(members.into_iter().copied());
            let (outcome, draws) = trace(&candidate, &model, &PriorityKind::default());
            prop_assert!(draws.iter().all(|d| d.remaining >= Decimal::ZERO));
            prop_assert!(draws.iter().all(|d| d.amount > Decimal::ZERO));
            // Any draw that hit zero makes the candidate unsustainable.
            if draws.iter().any(|d| d.remaining.is_zero()) {
                prop_assert!(!outcome.is_sustainable());
            }
        }
    }

    #[test]
    fn baseline_first_and_always_sustainable(rows in arb_rows()) {
        let model = single_model(&rows);
        let result = evaluate(&model, &EvaluationConfig::default()).expect("evaluates");
        prop_assert!(result.any_sustainable);
        prop_assert_eq!(result.combinations.first(), Some(&Vec::new()));
        prop_assert_eq!(result.candidates_evaluated, 1_u64 << model.consumer_count());
    }

    #[test]
    fn sustainability_does_not_depend_on_priority(rows in arb_rows()) {
        let model = single_model(&rows);
        let by_need = evaluate(&model, &EvaluationConfig::default()).expect("evaluates");
        for priority in [PriorityKind::RowOrder, PriorityKind::RichestFirst] {
            let config = EvaluationConfig { priority, ..EvaluationConfig::default() };
            let other = evaluate(&model, &config).expect("evaluates");
            prop_assert_eq!(&other.combinations, &by_need.combinations);
        }
    }
}
