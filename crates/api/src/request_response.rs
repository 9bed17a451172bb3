// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Wire types for the HTTP interface.
//!
//! Enumerated fields travel as strings and are parsed at the handler
//! boundary, so a bad value surfaces as a field-level validation error
//! instead of a deserialization failure.

use serde::{Deserialize, Serialize};

use bunkhouse::{ActualCounts, AssigneeRef, CapacitySettings, DimensionReport, HousingCandidate};
use bunkhouse_domain::{HousingBreakdown, RoomProfile};
use bunkhouse_persistence::EventRecord;

/// Whether an action is permitted. Serialized as a bare boolean.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// The action is permitted.
    Allowed,
    /// The action is not permitted.
    Denied,
}

impl Capability {
    /// Returns true if the capability is allowed.
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// Creates a capability from a boolean value.
    #[must_use]
    pub const fn from_bool(value: bool) -> Self {
        if value { Self::Allowed } else { Self::Denied }
    }
}

impl Serialize for Capability {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_bool(matches!(self, Self::Allowed))
    }
}

impl<'de> Deserialize<'de> for Capability {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let allowed: bool = bool::deserialize(deserializer)?;
        Ok(Self::from_bool(allowed))
    }
}

/// What an actor's role permits, for UI gating. Advisory only; the
/// handlers re-check on every mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalCapabilities {
    /// May create events and settings.
    pub can_manage_events: Capability,
    /// May create and cancel registrations.
    pub can_manage_registrations: Capability,
    /// May run auto-assignment and reserve rooms.
    pub can_run_allocation: Capability,
    /// May recalculate capacity counters.
    pub can_recalculate: Capability,
}

/// Actor identification carried by every mutating request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorContext {
    /// The operator performing the action.
    pub actor_id: i64,
    /// The operator's role, as a wire string.
    pub actor_role: String,
}

/// Request to create an event with optional capacity ceilings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateEventRequest {
    /// The acting operator.
    #[serde(flatten)]
    pub actor: ActorContext,
    /// Event display name.
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

/// An event together with its full ledger snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventResponse {
    /// The stored event row.
    pub event: EventRecord,
    /// Every capacity dimension with its remaining count.
    pub settings: CapacitySettings,
}

/// One participant in a group registration payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantPayload {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Age in whole years.
    pub age: u8,
    /// Recorded gender, if any.
    pub gender: Option<String>,
    /// Age/role classification, as a wire string.
    pub participant_type: String,
}

/// Request to register a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRegistrationRequest {
    /// The acting operator.
    #[serde(flatten)]
    pub actor: ActorContext,
    /// The event registered for.
    pub event_id: i64,
    /// Group display name.
    pub group_name: String,
    /// Parish affiliation, if any.
    pub parish_name: Option<String>,
    /// Coarse housing type, as a wire string.
    pub housing_type: String,
    /// Declared total party size.
    pub total_participants: u32,
    /// Bucketed counts; omitted buckets stay unknown.
    #[serde(default)]
    pub breakdown: HousingBreakdown,
    /// Member roster.
    #[serde(default)]
    pub participants: Vec<ParticipantPayload>,
}

/// Request to register a single person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndividualRegistrationRequest {
    /// The acting operator.
    #[serde(flatten)]
    pub actor: ActorContext,
    /// The event registered for.
    pub event_id: i64,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Age in whole years.
    pub age: u8,
    /// Recorded gender, if any.
    pub gender: Option<String>,
    /// Age/role classification, as a wire string.
    pub participant_type: String,
    /// Chosen housing type, as a wire string.
    pub housing_type: String,
    /// Chosen room type, on-campus only.
    pub room_type: Option<String>,
}

/// Request to cancel a registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelRequest {
    /// The acting operator.
    #[serde(flatten)]
    pub actor: ActorContext,
}

/// Response to a registration create or cancel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationResponse {
    /// The registration affected.
    pub registration_id: i64,
    /// Its status after the operation.
    pub status: String,
}

const fn default_only_unassigned() -> bool {
    true
}

/// Request to run auto-assignment for an event or one of its groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoAssignRequest {
    /// The acting operator.
    #[serde(flatten)]
    pub actor: ActorContext,
    /// Restrict the run to one group's roster and reserved rooms.
    pub group_id: Option<i64>,
    /// Placement strategy, as a wire string.
    pub strategy: String,
    /// Skip already-housed candidates (the default) or reassign
    /// everyone in scope.
    #[serde(default = "default_only_unassigned")]
    pub only_unassigned: bool,
    /// Only run categories of this gender.
    pub gender: Option<String>,
    /// `true` youth only, `false` chaperones only.
    pub youth: Option<bool>,
    /// Restrict candidate rooms to these buildings.
    pub buildings: Option<Vec<i64>>,
}

/// One assignee on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssigneeDto {
    /// `"participant"` or `"individual"`.
    pub kind: String,
    /// The participant or individual registration id.
    pub id: i64,
}

impl From<AssigneeRef> for AssigneeDto {
    fn from(assignee: AssigneeRef) -> Self {
        match assignee {
            AssigneeRef::Participant(id) => Self {
                kind: String::from("participant"),
                id,
            },
            AssigneeRef::Individual(id) => Self {
                kind: String::from("individual"),
                id,
            },
        }
    }
}

/// The outcome of an auto-assignment run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoAssignResponse {
    /// Assignments written.
    pub assigned: u32,
    /// Candidates with no eligible room capacity, including plans that
    /// lost a race at apply time.
    pub skipped: Vec<AssigneeDto>,
    /// Candidates the classifier could not place.
    pub unclassifiable: Vec<AssigneeDto>,
    /// Per-item apply failures that did not stop the batch.
    pub errors: Vec<String>,
}

/// Request to reserve rooms for a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocateRoomsRequest {
    /// The acting operator.
    #[serde(flatten)]
    pub actor: ActorContext,
    /// Rooms to reserve.
    pub room_ids: Vec<i64>,
}

/// One contested room in a failed reservation batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomConflictDto {
    /// The contested room.
    pub room_id: i64,
    /// The group currently holding it; absent when the room is
    /// unavailable or belongs to another event.
    pub held_by_group: Option<i64>,
}

/// The outcome of a room reservation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocateRoomsResponse {
    /// Rooms reserved. Zero when conflicts are present.
    pub allocated: usize,
    /// Contested rooms; the batch was rolled back if non-empty.
    pub conflicts: Vec<RoomConflictDto>,
}

/// Request to recalculate capacity counters from ground truth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecalculateRequest {
    /// The acting operator.
    #[serde(flatten)]
    pub actor: ActorContext,
}

/// The outcome of a capacity recalculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecalculateResponse {
    /// Before/after values per configured dimension.
    pub reports: Vec<DimensionReport>,
    /// The actual registration counts used for the recomputation.
    pub actual: ActualCounts,
}

/// Operator view of an event's rooms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomsResponse {
    /// Every room with occupancy and bed state.
    pub rooms: Vec<RoomProfile>,
}

/// Operator view of an event's unhoused people.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnassignedResponse {
    /// Group participants without a bed.
    pub participants: Vec<HousingCandidate>,
    /// On-campus individual registrations without a bed.
    pub individuals: Vec<HousingCandidate>,
}
