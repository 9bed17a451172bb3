// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The capacity ledger: every independently tracked counter for one
//! event, checked as a unit.
//!
//! The ledger snapshot is read-only here. Checks answer "would this
//! party fit in every dimension it touches?"; the clamped decrement and
//! increment that actually move the counters are single SQL statements
//! in the persistence layer, so two concurrent writers can never lose an
//! update between a read and a write.

use bunkhouse_domain::{CapacityCheck, CapacityDimension, HousingType, PartyCounts, RoomType};
use serde::{Deserialize, Serialize};

/// One addressable ledger counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerDimension {
    /// The event-wide head count.
    Event,
    /// One housing-type counter.
    Housing(HousingType),
    /// One room-type counter (on-campus only).
    RoomType(RoomType),
}

impl std::fmt::Display for LedgerDimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Event => write!(f, "event"),
            Self::Housing(housing_type) => write!(f, "{housing_type}"),
            Self::RoomType(room_type) => write!(f, "{room_type}"),
        }
    }
}

/// The full set of capacity counters for one event.
///
/// Counters live alongside their ceilings in the event settings record;
/// this snapshot mirrors that row plus the event-level pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacitySettings {
    /// Event-wide capacity.
    pub event: CapacityDimension,
    /// On-campus housing capacity.
    pub on_campus: CapacityDimension,
    /// Off-campus housing capacity.
    pub off_campus: CapacityDimension,
    /// Day-pass capacity.
    pub day_pass: CapacityDimension,
    /// Single-room capacity.
    pub single: CapacityDimension,
    /// Double-room capacity.
    pub double: CapacityDimension,
    /// Triple-room capacity.
    pub triple: CapacityDimension,
    /// Quad-room capacity.
    pub quad: CapacityDimension,
}

impl CapacitySettings {
    /// A settings snapshot with every dimension unlimited.
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            event: CapacityDimension::unlimited(),
            on_campus: CapacityDimension::unlimited(),
            off_campus: CapacityDimension::unlimited(),
            day_pass: CapacityDimension::unlimited(),
            single: CapacityDimension::unlimited(),
            double: CapacityDimension::unlimited(),
            triple: CapacityDimension::unlimited(),
            quad: CapacityDimension::unlimited(),
        }
    }

    /// The counter for one housing type.
    #[must_use]
    pub const fn housing(&self, housing_type: HousingType) -> CapacityDimension {
        match housing_type {
            HousingType::OnCampus => self.on_campus,
            HousingType::OffCampus => self.off_campus,
            HousingType::DayPass => self.day_pass,
        }
    }

    /// The counter for one room type.
    #[must_use]
    pub const fn room_type(&self, room_type: RoomType) -> CapacityDimension {
        match room_type {
            RoomType::Single => self.single,
            RoomType::Double => self.double,
            RoomType::Triple => self.triple,
            RoomType::Quad => self.quad,
        }
    }
}

/// A failed capacity check: which dimension denied the party, and how.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityDenial {
    /// The dimension that denied the party.
    pub dimension: LedgerDimension,
    /// The check outcome (never `Ok`).
    pub check: CapacityCheck,
}

/// Checks whether a party fits every ledger dimension it touches.
///
/// Dimensions touched: the event-wide counter (by the total party size,
/// always), each housing-type counter with a non-zero count, and, only
/// when the party includes on-campus heads and a room type is given,
/// that room-type counter. Day-pass and off-campus parties never touch
/// room-type counters.
///
/// # Errors
///
/// Returns the first failing dimension as a `CapacityDenial`. Nothing is
/// mutated by a check.
pub fn check_party(
    settings: &CapacitySettings,
    counts: &PartyCounts,
    room_type: Option<RoomType>,
) -> Result<(), CapacityDenial> {
    let event_check: CapacityCheck = settings.event.check(counts.total());
    if !event_check.is_ok() {
        return Err(CapacityDenial {
            dimension: LedgerDimension::Event,
            check: event_check,
        });
    }

    for housing_type in HousingType::all() {
        let count: u32 = counts.for_housing(housing_type);
        if count == 0 {
            continue;
        }
        let check: CapacityCheck = settings.housing(housing_type).check(count);
        if !check.is_ok() {
            return Err(CapacityDenial {
                dimension: LedgerDimension::Housing(housing_type),
                check,
            });
        }
    }

    if counts.on_campus > 0
        && let Some(room_type) = room_type
    {
        let check: CapacityCheck = settings.room_type(room_type).check(counts.on_campus);
        if !check.is_ok() {
            return Err(CapacityDenial {
                dimension: LedgerDimension::RoomType(room_type),
                check,
            });
        }
    }

    Ok(())
}
