//! Candidate enumeration, consumption simulation and feasibility
//! aggregation for the Trophic solver.
//!
//! Given a validated [`EcosystemModel`], the solver tries every subset of its
//! consumers alongside all of its producers and reports which subsets can
//! coexist without exhausting any resource.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `trophic-config.yaml` into
//!   strongly-typed structs.
//! - [`enumerate`] -- Power-set iteration in canonical bitmask order.
//! - [`feasibility`] -- Runs the simulator over every candidate and
//!   summarizes the sustainable ones.
//! - [`priority`] -- [`PriorityPolicy`] trait and the built-in policies.
//! - [`runner`] -- Whole-batch build and evaluation with per-ecosystem
//!   failure scoping.
//! - [`simulate`] -- The sequential consumption simulator.
//!
//! [`EcosystemModel`]: trophic_ecology::EcosystemModel
//! [`PriorityPolicy`]: priority::PriorityPolicy

pub mod config;
pub mod enumerate;
pub mod feasibility;
pub mod priority;
pub mod runner;
pub mod simulate;
