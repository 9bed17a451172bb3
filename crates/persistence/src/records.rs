// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row-shaped record types moving between `SQLite` and the domain.

use crate::error::PersistenceError;
use bunkhouse_domain::{
    Gender, HousingBreakdown, HousingType, Participant, ParticipantType, PartyCounts, RoomType,
    party_counts,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lifecycle status of a registration row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistrationStatus {
    /// Counted by the ledger and eligible for housing.
    Active,
    /// Cancelled; retained for history, ignored by all counting.
    Cancelled,
}

impl RegistrationStatus {
    /// Converts this status to its stored representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Cancelled => "cancelled",
        }
    }
}

impl FromStr for RegistrationStatus {
    type Err = PersistenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(PersistenceError::InvalidRecord {
                table: "registrations",
                message: format!("unknown status '{s}'"),
            }),
        }
    }
}

/// An event row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// The canonical numeric identifier.
    pub event_id: i64,
    /// Display name.
    pub name: String,
    /// Optional overall cap (`None` = unlimited).
    pub capacity_total: Option<u32>,
    /// Mutable event-wide remaining counter.
    pub capacity_remaining: u32,
}

/// A group registration row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRegistrationRecord {
    /// The canonical numeric identifier.
    pub group_registration_id: i64,
    /// The event registered for.
    pub event_id: i64,
    /// Group display name.
    pub group_name: String,
    /// Parish affiliation used by the parish-together strategy.
    pub parish_name: Option<String>,
    /// Coarse housing type (fallback counting shape).
    pub housing_type: HousingType,
    /// Declared total party size (fallback counting shape).
    pub total_participants: u32,
    /// Bucketed counts (preferred counting shape, when present).
    pub breakdown: HousingBreakdown,
    /// Lifecycle status.
    pub status: RegistrationStatus,
}

impl GroupRegistrationRecord {
    /// The resolved per-housing-type party sizes for this registration,
    /// bucketed counts winning over the coarse fields.
    #[must_use]
    pub const fn party_counts(&self) -> PartyCounts {
        party_counts(&self.breakdown, self.housing_type, self.total_participants)
    }
}

/// An individual registration row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndividualRegistrationRecord {
    /// The canonical numeric identifier.
    pub individual_registration_id: i64,
    /// The event registered for.
    pub event_id: i64,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Age in whole years.
    pub age: u8,
    /// Recorded gender, if any.
    pub gender: Option<Gender>,
    /// Age/role classification.
    pub participant_type: ParticipantType,
    /// Chosen housing type.
    pub housing_type: HousingType,
    /// Chosen room type; tracked only for on-campus housing.
    pub room_type: Option<RoomType>,
    /// Lifecycle status.
    pub status: RegistrationStatus,
}

impl IndividualRegistrationRecord {
    /// Party counts for a party of one, in the chosen housing type.
    #[must_use]
    pub const fn party_counts(&self) -> PartyCounts {
        party_counts(&HousingBreakdown::none(), self.housing_type, 1)
    }
}

/// A room assignment row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentRecord {
    /// The canonical numeric identifier.
    pub assignment_id: i64,
    /// The assigned room.
    pub room_id: i64,
    /// Group participant reference, if this assignment is for one.
    pub participant_id: Option<i64>,
    /// Individual registration reference, if this assignment is for one.
    pub individual_registration_id: Option<i64>,
    /// 1-indexed bed, when bed-level.
    pub bed_number: Option<u32>,
    /// ISO-8601 timestamp of assignment.
    pub assigned_at: String,
}

/// Input for creating an event with its capacity configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEvent {
    /// Display name.
    pub name: String,
    /// Optional overall cap.
    pub capacity_total: Option<u32>,
    /// Optional on-campus cap.
    pub on_campus_capacity: Option<u32>,
    /// Optional off-campus cap.
    pub off_campus_capacity: Option<u32>,
    /// Optional day-pass cap.
    pub day_pass_capacity: Option<u32>,
    /// Optional single-room cap.
    pub single_capacity: Option<u32>,
    /// Optional double-room cap.
    pub double_capacity: Option<u32>,
    /// Optional triple-room cap.
    pub triple_capacity: Option<u32>,
    /// Optional quad-room cap.
    pub quad_capacity: Option<u32>,
}

/// Input for creating a group registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGroupRegistration {
    /// The event registered for.
    pub event_id: i64,
    /// Group display name.
    pub group_name: String,
    /// Parish affiliation, if any.
    pub parish_name: Option<String>,
    /// Coarse housing type.
    pub housing_type: HousingType,
    /// Declared total party size.
    pub total_participants: u32,
    /// Bucketed counts, when supplied.
    pub breakdown: HousingBreakdown,
    /// Member records.
    pub participants: Vec<Participant>,
}

/// Input for creating an individual registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewIndividualRegistration {
    /// The event registered for.
    pub event_id: i64,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Age in whole years.
    pub age: u8,
    /// Recorded gender, if any.
    pub gender: Option<Gender>,
    /// Age/role classification.
    pub participant_type: ParticipantType,
    /// Chosen housing type.
    pub housing_type: HousingType,
    /// Chosen room type, on-campus only.
    pub room_type: Option<RoomType>,
}

/// Input for creating a building.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBuilding {
    /// The owning event.
    pub event_id: i64,
    /// Display name.
    pub name: String,
    /// Building-level gender restriction, if any.
    pub gender: Option<Gender>,
}

/// Input for creating a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRoom {
    /// The owning building.
    pub building_id: i64,
    /// Display name.
    pub name: String,
    /// Bed count.
    pub capacity: u32,
    /// Room-level gender restriction, if any.
    pub gender: Option<Gender>,
    /// Population tag, if any.
    pub tag: Option<bunkhouse_domain::RoomCategoryTag>,
    /// Whether the room may receive assignments.
    pub is_available: bool,
}
