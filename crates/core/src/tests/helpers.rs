// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{AssigneeRef, CapacitySettings, HousingCandidate};
use bunkhouse_domain::{
    CapacityDimension, Gender, ParticipantType, RoomCategoryTag, RoomProfile,
};

/// A candidate backed by a group participant row.
pub fn candidate(
    id: i64,
    gender: Option<Gender>,
    age: u8,
    participant_type: ParticipantType,
) -> HousingCandidate {
    HousingCandidate {
        assignee: AssigneeRef::Participant(id),
        display_name: format!("Participant {id}"),
        gender,
        age,
        participant_type,
        parish: None,
    }
}

/// A candidate with a parish affiliation.
pub fn parish_candidate(
    id: i64,
    gender: Option<Gender>,
    age: u8,
    participant_type: ParticipantType,
    parish: &str,
) -> HousingCandidate {
    HousingCandidate {
        parish: Some(parish.to_string()),
        ..candidate(id, gender, age, participant_type)
    }
}

/// An available, unoccupied room in building 1.
pub fn room(
    room_id: i64,
    capacity: u32,
    gender: Option<Gender>,
    tag: Option<RoomCategoryTag>,
) -> RoomProfile {
    RoomProfile {
        room_id,
        building_id: 1,
        name: format!("Room {room_id}"),
        capacity,
        current_occupancy: 0,
        gender,
        building_gender: None,
        tag,
        is_available: true,
        allocated_to_group: None,
        occupied_beds: Vec::new(),
    }
}

/// Settings with every housing dimension bounded and full.
pub const fn bounded_settings(event: u32, on_campus: u32, off_campus: u32, day_pass: u32) -> CapacitySettings {
    CapacitySettings {
        event: CapacityDimension::bounded(event, event),
        on_campus: CapacityDimension::bounded(on_campus, on_campus),
        off_campus: CapacityDimension::bounded(off_campus, off_campus),
        day_pass: CapacityDimension::bounded(day_pass, day_pass),
        single: CapacityDimension::unlimited(),
        double: CapacityDimension::unlimited(),
        triple: CapacityDimension::unlimited(),
        quad: CapacityDimension::unlimited(),
    }
}
