// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::bounded_settings;
use crate::{ActualCounts, CapacitySettings, LedgerDimension, ReconciliationOutcome, RoomTypeCounts, reconcile};
use bunkhouse_domain::{CapacityDimension, HousingType, PartyCounts, RoomType};

fn drifted_settings() -> CapacitySettings {
    let mut settings: CapacitySettings = bounded_settings(100, 40, 30, 20);
    // Counters drifted away from ground truth: too low and too high.
    settings.event = CapacityDimension::bounded(100, 3);
    settings.on_campus = CapacityDimension::bounded(40, 39);
    settings.single = CapacityDimension::bounded(8, 0);
    settings.double = CapacityDimension::bounded(12, 12);
    settings
}

fn actuals() -> ActualCounts {
    ActualCounts {
        housing: PartyCounts {
            on_campus: 25,
            off_campus: 10,
            day_pass: 5,
        },
        room_types: RoomTypeCounts {
            single: 4,
            double: 3,
            triple: 0,
            quad: 0,
        },
    }
}

#[test]
fn test_reconcile_overwrites_drifted_counters() {
    let outcome: ReconciliationOutcome = reconcile(&drifted_settings(), &actuals());
    let new: CapacitySettings = outcome.new_settings;

    assert_eq!(new.event.remaining, 60); // 100 - 40
    assert_eq!(new.on_campus.remaining, 15); // 40 - 25
    assert_eq!(new.off_campus.remaining, 20); // 30 - 10
    assert_eq!(new.day_pass.remaining, 15); // 20 - 5
    assert_eq!(new.single.remaining, 4); // 8 - 4
    assert_eq!(new.double.remaining, 9); // 12 - 3
}

#[test]
fn test_reconcile_is_idempotent() {
    let first: ReconciliationOutcome = reconcile(&drifted_settings(), &actuals());
    let second: ReconciliationOutcome = reconcile(&first.new_settings, &actuals());

    assert_eq!(first.new_settings, second.new_settings);
    // After-values must agree between runs even though before-values differ.
    for (a, b) in first.reports.iter().zip(second.reports.iter()) {
        assert_eq!(a.dimension, b.dimension);
        assert_eq!(a.after_remaining, b.after_remaining);
        assert_eq!(a.actual, b.actual);
    }
    let third: ReconciliationOutcome = reconcile(&second.new_settings, &actuals());
    assert_eq!(second, third);
}

#[test]
fn test_reconcile_clamps_over_registration_at_zero() {
    let settings: CapacitySettings = bounded_settings(10, 10, 10, 10);
    let over: ActualCounts = ActualCounts {
        housing: PartyCounts {
            on_campus: 14,
            off_campus: 0,
            day_pass: 0,
        },
        room_types: RoomTypeCounts::default(),
    };

    let outcome: ReconciliationOutcome = reconcile(&settings, &over);
    assert_eq!(outcome.new_settings.on_campus.remaining, 0);
    assert_eq!(outcome.new_settings.event.remaining, 0);
}

#[test]
fn test_report_covers_configured_dimensions_only() {
    let outcome: ReconciliationOutcome = reconcile(&drifted_settings(), &actuals());
    let dimensions: Vec<LedgerDimension> = outcome
        .reports
        .iter()
        .map(|report| report.dimension)
        .collect();

    assert!(dimensions.contains(&LedgerDimension::Event));
    assert!(dimensions.contains(&LedgerDimension::Housing(HousingType::OnCampus)));
    assert!(dimensions.contains(&LedgerDimension::RoomType(RoomType::Single)));
    // Triple and quad are unlimited in the fixture: untracked, unreported.
    assert!(!dimensions.contains(&LedgerDimension::RoomType(RoomType::Triple)));
    assert!(!dimensions.contains(&LedgerDimension::RoomType(RoomType::Quad)));
}

#[test]
fn test_report_carries_before_and_after_values() {
    let outcome: ReconciliationOutcome = reconcile(&drifted_settings(), &actuals());
    let event_report = outcome
        .reports
        .iter()
        .find(|report| report.dimension == LedgerDimension::Event)
        .expect("event dimension must be reported");

    assert_eq!(event_report.capacity, Some(100));
    assert_eq!(event_report.before_remaining, 3);
    assert_eq!(event_report.after_remaining, 60);
    assert_eq!(event_report.actual, 40);
}
