// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Capacity reconciliation: full-overwrite recomputation of every
//! ledger counter from ground truth.
//!
//! The individual decrement/increment calls are clamped but not jointly
//! transactional across dimensions, so partial failures, direct deletes,
//! and manual edits can leave counters drifted. Reconciliation is the
//! corrective pass: recompute `remaining = max(0, capacity - actual)`
//! for every configured dimension and overwrite. The computation is
//! idempotent: running it twice with unchanged registrations produces
//! identical output.

use crate::ledger::{CapacitySettings, LedgerDimension};
use bunkhouse_domain::{Capacity, CapacityDimension, HousingType, PartyCounts, RoomType};
use serde::{Deserialize, Serialize};

/// Actual on-campus individual registrations per room type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomTypeCounts {
    /// Registrations that chose a single.
    pub single: u32,
    /// Registrations that chose a double.
    pub double: u32,
    /// Registrations that chose a triple.
    pub triple: u32,
    /// Registrations that chose a quad.
    pub quad: u32,
}

impl RoomTypeCounts {
    /// The count for one room type.
    #[must_use]
    pub const fn for_room_type(&self, room_type: RoomType) -> u32 {
        match room_type {
            RoomType::Single => self.single,
            RoomType::Double => self.double,
            RoomType::Triple => self.triple,
            RoomType::Quad => self.quad,
        }
    }
}

/// Ground-truth registration counts, aggregated by the persistence
/// layer from active group and individual registrations using the same
/// bucketed-wins duality the lifecycle hooks use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActualCounts {
    /// Heads per housing type.
    pub housing: PartyCounts,
    /// On-campus individual registrations per room type.
    pub room_types: RoomTypeCounts,
}

/// Before/after values for one dimension, for operator visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionReport {
    /// The dimension reported on.
    pub dimension: LedgerDimension,
    /// The configured ceiling (`None` = unlimited, untracked).
    pub capacity: Option<u32>,
    /// Remaining before the overwrite.
    pub before_remaining: u32,
    /// Remaining after the overwrite.
    pub after_remaining: u32,
    /// The actual registered count used for the recomputation.
    pub actual: u32,
}

/// The outcome of one reconciliation computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationOutcome {
    /// The settings to overwrite the stored row with.
    pub new_settings: CapacitySettings,
    /// Per-dimension before/after values, configured dimensions only.
    pub reports: Vec<DimensionReport>,
}

/// Recomputes every configured counter from actual counts.
///
/// Unlimited dimensions are untracked and omitted from the report.
#[must_use]
pub fn reconcile(settings: &CapacitySettings, actuals: &ActualCounts) -> ReconciliationOutcome {
    let mut reports: Vec<DimensionReport> = Vec::new();

    let event: CapacityDimension = settings.event.reconciled(actuals.housing.total());
    push_report(
        &mut reports,
        LedgerDimension::Event,
        settings.event,
        event,
        actuals.housing.total(),
    );

    let mut new_settings: CapacitySettings = CapacitySettings {
        event,
        ..*settings
    };

    for housing_type in HousingType::all() {
        let actual: u32 = actuals.housing.for_housing(housing_type);
        let before: CapacityDimension = settings.housing(housing_type);
        let after: CapacityDimension = before.reconciled(actual);
        push_report(
            &mut reports,
            LedgerDimension::Housing(housing_type),
            before,
            after,
            actual,
        );
        match housing_type {
            HousingType::OnCampus => new_settings.on_campus = after,
            HousingType::OffCampus => new_settings.off_campus = after,
            HousingType::DayPass => new_settings.day_pass = after,
        }
    }

    for room_type in RoomType::all() {
        let actual: u32 = actuals.room_types.for_room_type(room_type);
        let before: CapacityDimension = settings.room_type(room_type);
        let after: CapacityDimension = before.reconciled(actual);
        push_report(
            &mut reports,
            LedgerDimension::RoomType(room_type),
            before,
            after,
            actual,
        );
        match room_type {
            RoomType::Single => new_settings.single = after,
            RoomType::Double => new_settings.double = after,
            RoomType::Triple => new_settings.triple = after,
            RoomType::Quad => new_settings.quad = after,
        }
    }

    ReconciliationOutcome {
        new_settings,
        reports,
    }
}

/// Records a report entry for a configured dimension; unlimited
/// dimensions are skipped.
fn push_report(
    reports: &mut Vec<DimensionReport>,
    dimension: LedgerDimension,
    before: CapacityDimension,
    after: CapacityDimension,
    actual: u32,
) {
    if let Capacity::Bounded(capacity) = before.capacity {
        reports.push(DimensionReport {
            dimension,
            capacity: Some(capacity),
            before_remaining: before.remaining,
            after_remaining: after.remaining,
            actual,
        });
    }
}
