// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    NewBuilding, NewEvent, NewGroupRegistration, NewIndividualRegistration, NewRoom,
    SqlitePersistence,
};
use bunkhouse_domain::{
    Gender, HousingBreakdown, HousingType, Participant, ParticipantType, RoomCategoryTag,
};

pub fn store() -> SqlitePersistence {
    SqlitePersistence::new_in_memory().expect("in-memory store should open")
}

/// An event with every dimension bounded.
pub fn bounded_event(store: &SqlitePersistence) -> i64 {
    store
        .create_event(&NewEvent {
            name: "Summer Conference".to_string(),
            capacity_total: Some(100),
            on_campus_capacity: Some(50),
            off_campus_capacity: Some(30),
            day_pass_capacity: Some(20),
            single_capacity: Some(5),
            double_capacity: Some(10),
            triple_capacity: Some(6),
            quad_capacity: Some(8),
        })
        .expect("event should insert")
}

/// An event with no caps configured at all.
pub fn unlimited_event(store: &SqlitePersistence) -> i64 {
    store
        .create_event(&NewEvent {
            name: "Open House".to_string(),
            capacity_total: None,
            on_campus_capacity: None,
            off_campus_capacity: None,
            day_pass_capacity: None,
            single_capacity: None,
            double_capacity: None,
            triple_capacity: None,
            quad_capacity: None,
        })
        .expect("event should insert")
}

pub fn building(store: &SqlitePersistence, event_id: i64, gender: Option<Gender>) -> i64 {
    store
        .create_building(&NewBuilding {
            event_id,
            name: "Dormitory".to_string(),
            gender,
        })
        .expect("building should insert")
}

pub fn room(
    store: &SqlitePersistence,
    building_id: i64,
    name: &str,
    capacity: u32,
    gender: Option<Gender>,
    tag: Option<RoomCategoryTag>,
) -> i64 {
    store
        .create_room(&NewRoom {
            building_id,
            name: name.to_string(),
            capacity,
            gender,
            tag,
            is_available: true,
        })
        .expect("room should insert")
}

pub fn member(first: &str, age: u8, gender: Gender, participant_type: ParticipantType) -> Participant {
    Participant {
        participant_id: None,
        first_name: first.to_string(),
        last_name: "Tester".to_string(),
        age,
        gender: Some(gender),
        participant_type,
    }
}

pub fn group(
    event_id: i64,
    housing_type: HousingType,
    participants: Vec<Participant>,
) -> NewGroupRegistration {
    let total: u32 = u32::try_from(participants.len()).unwrap();
    NewGroupRegistration {
        event_id,
        group_name: "Youth Group".to_string(),
        parish_name: Some("St. Anne".to_string()),
        housing_type,
        total_participants: total,
        breakdown: HousingBreakdown::none(),
        participants,
    }
}

pub fn individual(event_id: i64, housing_type: HousingType) -> NewIndividualRegistration {
    NewIndividualRegistration {
        event_id,
        first_name: "Dana".to_string(),
        last_name: "Solo".to_string(),
        age: 17,
        gender: Some(Gender::Female),
        participant_type: ParticipantType::YouthU18,
        housing_type,
        room_type: None,
    }
}
