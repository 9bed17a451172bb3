// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DomainError, HousingBreakdown, HousingType, PartyCounts, party_counts};

fn bucketed_breakdown() -> HousingBreakdown {
    HousingBreakdown {
        on_campus_youth: Some(8),
        on_campus_chaperones: Some(2),
        off_campus_youth: None,
        off_campus_chaperones: Some(1),
        day_pass_youth: Some(3),
        day_pass_chaperones: None,
    }
}

#[test]
fn test_bucketed_counts_win_when_present() {
    let breakdown: HousingBreakdown = bucketed_breakdown();
    // The coarse fields disagree on purpose; they must be ignored.
    let counts: PartyCounts = party_counts(&breakdown, HousingType::OffCampus, 99);

    assert_eq!(counts.on_campus, 10);
    assert_eq!(counts.off_campus, 1);
    assert_eq!(counts.day_pass, 3);
    assert_eq!(counts.total(), 14);
}

#[test]
fn test_coarse_fallback_when_no_buckets() {
    let breakdown: HousingBreakdown = HousingBreakdown::default();
    let counts: PartyCounts = party_counts(&breakdown, HousingType::OnCampus, 12);

    assert_eq!(counts.on_campus, 12);
    assert_eq!(counts.off_campus, 0);
    assert_eq!(counts.day_pass, 0);
    assert_eq!(counts.total(), 12);
}

#[test]
fn test_single_present_bucket_disables_coarse_fallback() {
    // One populated bucket is enough to switch branches; the coarse
    // total must not be added on top (that would double-count).
    let breakdown: HousingBreakdown = HousingBreakdown {
        on_campus_youth: Some(4),
        ..HousingBreakdown::default()
    };
    let counts: PartyCounts = party_counts(&breakdown, HousingType::OnCampus, 4);

    assert_eq!(counts.on_campus, 4);
    assert_eq!(counts.total(), 4);
}

#[test]
fn test_for_housing_selects_the_right_counter() {
    let counts: PartyCounts = PartyCounts {
        on_campus: 5,
        off_campus: 2,
        day_pass: 7,
    };
    assert_eq!(counts.for_housing(HousingType::OnCampus), 5);
    assert_eq!(counts.for_housing(HousingType::OffCampus), 2);
    assert_eq!(counts.for_housing(HousingType::DayPass), 7);
}

#[test]
fn test_consistent_breakdown_validates() {
    let breakdown: HousingBreakdown = bucketed_breakdown();
    assert!(breakdown.validate_against_total(14).is_ok());
}

#[test]
fn test_inconsistent_breakdown_rejected() {
    let breakdown: HousingBreakdown = bucketed_breakdown();
    let result: Result<(), DomainError> = breakdown.validate_against_total(20);
    assert_eq!(
        result,
        Err(DomainError::InconsistentBreakdown {
            bucketed_total: 14,
            declared_total: 20,
        })
    );
}

#[test]
fn test_extreme_bucket_counts_saturate_instead_of_wrapping() {
    // Bucket values come straight from requests; a sum past u32::MAX
    // must clamp, not wrap around to a small total.
    let breakdown: HousingBreakdown = HousingBreakdown {
        on_campus_youth: Some(u32::MAX),
        on_campus_chaperones: Some(u32::MAX),
        day_pass_youth: Some(7),
        ..HousingBreakdown::default()
    };

    assert_eq!(breakdown.bucketed_total(), u32::MAX);
    let counts: PartyCounts = party_counts(&breakdown, HousingType::OnCampus, 0);
    assert_eq!(counts.on_campus, u32::MAX);
    assert_eq!(counts.total(), u32::MAX);
}

#[test]
fn test_bucketless_breakdown_always_validates() {
    let breakdown: HousingBreakdown = HousingBreakdown::default();
    assert!(breakdown.validate_against_total(42).is_ok());
}
