// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::bounded_settings;
use crate::{CapacityDenial, CapacitySettings, LedgerDimension, check_party};
use bunkhouse_domain::{CapacityCheck, CapacityDimension, HousingType, PartyCounts, RoomType};

#[test]
fn test_unlimited_settings_accept_any_party() {
    let settings: CapacitySettings = CapacitySettings::unlimited();
    let counts: PartyCounts = PartyCounts {
        on_campus: 500,
        off_campus: 200,
        day_pass: 300,
    };
    assert!(check_party(&settings, &counts, Some(RoomType::Quad)).is_ok());
}

#[test]
fn test_fitting_party_passes_all_dimensions() {
    let settings: CapacitySettings = bounded_settings(100, 50, 30, 20);
    let counts: PartyCounts = PartyCounts {
        on_campus: 10,
        off_campus: 5,
        day_pass: 2,
    };
    assert!(check_party(&settings, &counts, None).is_ok());
}

#[test]
fn test_event_dimension_checked_against_total_party_size() {
    // Housing dimensions individually fit but the event total does not.
    let mut settings: CapacitySettings = bounded_settings(100, 50, 50, 50);
    settings.event = CapacityDimension::bounded(100, 10);
    let counts: PartyCounts = PartyCounts {
        on_campus: 5,
        off_campus: 5,
        day_pass: 5,
    };

    let denial: CapacityDenial =
        check_party(&settings, &counts, None).expect_err("event dimension must deny");
    assert_eq!(denial.dimension, LedgerDimension::Event);
    assert_eq!(denial.check, CapacityCheck::InsufficientSpots { remaining: 10 });
}

#[test]
fn test_exhausted_housing_dimension_reports_no_spots() {
    let mut settings: CapacitySettings = bounded_settings(100, 50, 30, 20);
    settings.on_campus = CapacityDimension::bounded(50, 0);
    let counts: PartyCounts = PartyCounts {
        on_campus: 1,
        off_campus: 0,
        day_pass: 0,
    };

    let denial: CapacityDenial =
        check_party(&settings, &counts, None).expect_err("on-campus must deny");
    assert_eq!(
        denial.dimension,
        LedgerDimension::Housing(HousingType::OnCampus)
    );
    assert_eq!(denial.check, CapacityCheck::NoSpots);
}

#[test]
fn test_zero_count_housing_dimension_not_checked() {
    // An exhausted day-pass dimension must not block an on-campus party.
    let mut settings: CapacitySettings = bounded_settings(100, 50, 30, 20);
    settings.day_pass = CapacityDimension::bounded(20, 0);
    let counts: PartyCounts = PartyCounts {
        on_campus: 4,
        off_campus: 0,
        day_pass: 0,
    };
    assert!(check_party(&settings, &counts, None).is_ok());
}

#[test]
fn test_room_type_checked_only_for_on_campus() {
    let mut settings: CapacitySettings = bounded_settings(100, 50, 30, 20);
    settings.double = CapacityDimension::bounded(10, 0);

    // Day-pass party with a (stray) room type: room-type dimension ignored.
    let day_pass_counts: PartyCounts = PartyCounts {
        on_campus: 0,
        off_campus: 0,
        day_pass: 3,
    };
    assert!(check_party(&settings, &day_pass_counts, Some(RoomType::Double)).is_ok());

    // On-campus party with the same room type: denied.
    let on_campus_counts: PartyCounts = PartyCounts {
        on_campus: 1,
        off_campus: 0,
        day_pass: 0,
    };
    let denial: CapacityDenial =
        check_party(&settings, &on_campus_counts, Some(RoomType::Double))
            .expect_err("double dimension must deny");
    assert_eq!(
        denial.dimension,
        LedgerDimension::RoomType(RoomType::Double)
    );
}

#[test]
fn test_check_reports_remaining_on_partial_fit() {
    let mut settings: CapacitySettings = bounded_settings(100, 50, 30, 20);
    settings.on_campus = CapacityDimension::bounded(50, 3);
    let counts: PartyCounts = PartyCounts {
        on_campus: 4,
        off_campus: 0,
        day_pass: 0,
    };

    let denial: CapacityDenial =
        check_party(&settings, &counts, None).expect_err("on-campus must deny");
    assert_eq!(
        denial.check,
        CapacityCheck::InsufficientSpots { remaining: 3 }
    );
}
