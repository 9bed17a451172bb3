// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Party-size computation for group registrations.
//!
//! Group registrations carry counts in two shapes: explicit per-bucket
//! counts (youth and chaperones split per housing type) and a coarse
//! `housing_type` + `total_participants` pair. The ledger must apply
//! exactly one of the two; applying both double-counts, and applying
//! neither under-counts. The precedence rule lives here and only here:
//! **bucketed counts win whenever any bucket is present**; the coarse
//! fields are the fallback for registrations recorded without buckets.

use crate::error::DomainError;
use crate::types::HousingType;
use serde::{Deserialize, Serialize};

/// A missing bucket counts as zero once buckets are in effect.
const fn bucket(value: Option<u32>) -> u32 {
    match value {
        Some(n) => n,
        None => 0,
    }
}

/// Per-bucket participant counts for a group registration.
///
/// Every field is nullable; a registration recorded without bucket-level
/// data has all of them `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HousingBreakdown {
    /// On-campus youth count.
    pub on_campus_youth: Option<u32>,
    /// On-campus chaperone count.
    pub on_campus_chaperones: Option<u32>,
    /// Off-campus youth count.
    pub off_campus_youth: Option<u32>,
    /// Off-campus chaperone count.
    pub off_campus_chaperones: Option<u32>,
    /// Day-pass youth count.
    pub day_pass_youth: Option<u32>,
    /// Day-pass chaperone count.
    pub day_pass_chaperones: Option<u32>,
}

impl HousingBreakdown {
    /// A breakdown with no bucket-level data at all.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            on_campus_youth: None,
            on_campus_chaperones: None,
            off_campus_youth: None,
            off_campus_chaperones: None,
            day_pass_youth: None,
            day_pass_chaperones: None,
        }
    }

    /// Whether any bucket-level data is present.
    #[must_use]
    pub const fn has_buckets(&self) -> bool {
        self.on_campus_youth.is_some()
            || self.on_campus_chaperones.is_some()
            || self.off_campus_youth.is_some()
            || self.off_campus_chaperones.is_some()
            || self.day_pass_youth.is_some()
            || self.day_pass_chaperones.is_some()
    }

    /// Sum of all present buckets, saturating rather than wrapping on
    /// request-supplied extremes.
    #[must_use]
    pub const fn bucketed_total(&self) -> u32 {
        bucket(self.on_campus_youth)
            .saturating_add(bucket(self.on_campus_chaperones))
            .saturating_add(bucket(self.off_campus_youth))
            .saturating_add(bucket(self.off_campus_chaperones))
            .saturating_add(bucket(self.day_pass_youth))
            .saturating_add(bucket(self.day_pass_chaperones))
    }

    /// Validates bucketed counts against the declared total.
    ///
    /// Only meaningful when buckets are present; a bucket-less breakdown
    /// always validates.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InconsistentBreakdown` if buckets are
    /// present and their sum disagrees with `declared_total`.
    pub const fn validate_against_total(&self, declared_total: u32) -> Result<(), DomainError> {
        if !self.has_buckets() {
            return Ok(());
        }
        let bucketed_total: u32 = self.bucketed_total();
        if bucketed_total == declared_total {
            Ok(())
        } else {
            Err(DomainError::InconsistentBreakdown {
                bucketed_total,
                declared_total,
            })
        }
    }
}

/// The resolved per-housing-type party sizes for one registration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyCounts {
    /// Heads registered for on-campus housing.
    pub on_campus: u32,
    /// Heads registered for off-campus housing.
    pub off_campus: u32,
    /// Heads registered with a day pass.
    pub day_pass: u32,
}

impl PartyCounts {
    /// The count for one housing type.
    #[must_use]
    pub const fn for_housing(&self, housing_type: HousingType) -> u32 {
        match housing_type {
            HousingType::OnCampus => self.on_campus,
            HousingType::OffCampus => self.off_campus,
            HousingType::DayPass => self.day_pass,
        }
    }

    /// Total party size across all housing types.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.on_campus
            .saturating_add(self.off_campus)
            .saturating_add(self.day_pass)
    }
}

/// Resolves a registration's party counts from its two count shapes.
///
/// Exactly one branch applies:
/// - buckets present → each housing type gets the sum of its youth and
///   chaperone buckets; the coarse fields are ignored entirely;
/// - no buckets → the coarse `housing_type` gets the full
///   `total_participants` and the other housing types get zero.
#[must_use]
pub const fn party_counts(
    breakdown: &HousingBreakdown,
    coarse_housing: HousingType,
    total_participants: u32,
) -> PartyCounts {
    if breakdown.has_buckets() {
        PartyCounts {
            on_campus: bucket(breakdown.on_campus_youth)
                .saturating_add(bucket(breakdown.on_campus_chaperones)),
            off_campus: bucket(breakdown.off_campus_youth)
                .saturating_add(bucket(breakdown.off_campus_chaperones)),
            day_pass: bucket(breakdown.day_pass_youth)
                .saturating_add(bucket(breakdown.day_pass_chaperones)),
        }
    } else {
        match coarse_housing {
            HousingType::OnCampus => PartyCounts {
                on_campus: total_participants,
                off_campus: 0,
                day_pass: 0,
            },
            HousingType::OffCampus => PartyCounts {
                on_campus: 0,
                off_campus: total_participants,
                day_pass: 0,
            },
            HousingType::DayPass => PartyCounts {
                on_campus: 0,
                off_campus: 0,
                day_pass: total_participants,
            },
        }
    }
}
