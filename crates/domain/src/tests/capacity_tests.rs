// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Capacity, CapacityCheck, CapacityDimension};

#[test]
fn test_unlimited_dimension_always_passes() {
    let dim: CapacityDimension = CapacityDimension::unlimited();
    assert_eq!(dim.check(1), CapacityCheck::Ok);
    assert_eq!(dim.check(10_000), CapacityCheck::Ok);
}

#[test]
fn test_bounded_dimension_accepts_fitting_party() {
    let dim: CapacityDimension = CapacityDimension::bounded(10, 6);
    assert_eq!(dim.check(6), CapacityCheck::Ok);
}

#[test]
fn test_exhausted_dimension_reports_no_spots() {
    let dim: CapacityDimension = CapacityDimension::bounded(10, 0);
    assert_eq!(dim.check(1), CapacityCheck::NoSpots);
}

#[test]
fn test_partial_dimension_reports_remaining() {
    let dim: CapacityDimension = CapacityDimension::bounded(10, 3);
    assert_eq!(
        dim.check(4),
        CapacityCheck::InsufficientSpots { remaining: 3 }
    );
}

#[test]
fn test_decrement_floors_at_zero() {
    let dim: CapacityDimension = CapacityDimension::bounded(10, 2);
    let after: CapacityDimension = dim.decremented(5);
    assert_eq!(after.remaining, 0);
}

#[test]
fn test_increment_clamps_at_capacity() {
    // A registration cancelled twice must not push remaining past the
    // configured cap.
    let dim: CapacityDimension = CapacityDimension::bounded(10, 8);
    let after: CapacityDimension = dim.incremented(4);
    assert_eq!(after.remaining, 10);
}

#[test]
fn test_clamp_invariant_holds_under_arbitrary_sequences() {
    let mut dim: CapacityDimension = CapacityDimension::bounded(7, 7);
    let operations: [(bool, u32); 9] = [
        (true, 3),
        (true, 5),
        (false, 2),
        (true, 1),
        (false, 9),
        (false, 1),
        (true, 7),
        (false, 3),
        (true, 2),
    ];

    for (is_decrement, count) in operations {
        dim = if is_decrement {
            dim.decremented(count)
        } else {
            dim.incremented(count)
        };
        assert!(dim.remaining <= 7, "remaining exceeded capacity");
    }
}

#[test]
fn test_unlimited_dimension_ignores_mutations() {
    let dim: CapacityDimension = CapacityDimension::unlimited();
    assert_eq!(dim.decremented(5), dim);
    assert_eq!(dim.incremented(5), dim);
}

#[test]
fn test_reconcile_recomputes_from_actual() {
    let dim: CapacityDimension = CapacityDimension::bounded(10, 1);
    let after: CapacityDimension = dim.reconciled(4);
    assert_eq!(after.remaining, 6);
}

#[test]
fn test_reconcile_never_goes_negative() {
    // Over-registration (actual beyond capacity) reconciles to zero,
    // not to a wrapped value.
    let dim: CapacityDimension = CapacityDimension::bounded(10, 10);
    let after: CapacityDimension = dim.reconciled(14);
    assert_eq!(after.remaining, 0);
}

#[test]
fn test_capacity_column_round_trip() {
    assert_eq!(Capacity::from_column(Some(5)), Capacity::Bounded(5));
    assert_eq!(Capacity::from_column(None), Capacity::Unlimited);
    assert_eq!(Capacity::Bounded(5).to_column(), Some(5));
    assert_eq!(Capacity::Unlimited.to_column(), None);
    assert!(Capacity::Bounded(0).is_bounded());
}

#[test]
fn test_zero_capacity_is_not_unlimited() {
    // A ceiling of zero means "no spots", never "no limit".
    let dim: CapacityDimension = CapacityDimension::bounded(0, 0);
    assert_eq!(dim.check(1), CapacityCheck::NoSpots);
}
