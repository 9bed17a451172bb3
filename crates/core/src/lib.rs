// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Capacity ledger and room allocation core.
//!
//! This crate is pure: it consumes immutable snapshots (capacity
//! settings, candidate participants, candidate rooms) and produces
//! decisions (capacity denials, allocation plans, reconciliation
//! overwrites). Applying those decisions to storage is the persistence
//! layer's job, which keeps every rule here unit-testable without a
//! database.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod engine;
mod error;
mod ledger;
mod reconcile;

#[cfg(test)]
mod tests;

pub use engine::{
    AllocationFilters, AllocationPlan, AssigneeRef, HousingCandidate, PlannedAssignment, Strategy,
    admitted_assignees, plan_assignments,
};
pub use error::CoreError;
pub use ledger::{CapacityDenial, CapacitySettings, LedgerDimension, check_party};
pub use reconcile::{ActualCounts, DimensionReport, ReconciliationOutcome, RoomTypeCounts, reconcile};
