// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::request_response::{
    ActorContext, AutoAssignRequest, CancelRequest, CreateEventRequest, GroupRegistrationRequest,
    IndividualRegistrationRequest, ParticipantPayload,
};
use bunkhouse_domain::{Gender, HousingBreakdown, RoomCategoryTag};
use bunkhouse_persistence::{NewBuilding, NewRoom, SqlitePersistence};

pub fn store() -> SqlitePersistence {
    SqlitePersistence::new_in_memory().expect("in-memory store should open")
}

pub fn admin() -> ActorContext {
    ActorContext {
        actor_id: 1,
        actor_role: String::from("admin"),
    }
}

pub fn coordinator() -> ActorContext {
    ActorContext {
        actor_id: 2,
        actor_role: String::from("coordinator"),
    }
}

pub fn viewer() -> ActorContext {
    ActorContext {
        actor_id: 3,
        actor_role: String::from("viewer"),
    }
}

/// An event request with no caps; callers set the ones they need.
pub fn event_request(name: &str) -> CreateEventRequest {
    CreateEventRequest {
        actor: admin(),
        name: name.to_string(),
        capacity_total: None,
        on_campus_capacity: None,
        off_campus_capacity: None,
        day_pass_capacity: None,
        single_capacity: None,
        double_capacity: None,
        triple_capacity: None,
        quad_capacity: None,
    }
}

pub fn participant(first: &str, age: u8, gender: &str, participant_type: &str) -> ParticipantPayload {
    ParticipantPayload {
        first_name: first.to_string(),
        last_name: String::from("Tester"),
        age,
        gender: Some(gender.to_string()),
        participant_type: participant_type.to_string(),
    }
}

pub fn group_request(
    event_id: i64,
    housing_type: &str,
    participants: Vec<ParticipantPayload>,
) -> GroupRegistrationRequest {
    let total: u32 = u32::try_from(participants.len()).unwrap();
    GroupRegistrationRequest {
        actor: coordinator(),
        event_id,
        group_name: String::from("Youth Group"),
        parish_name: Some(String::from("St. Anne")),
        housing_type: housing_type.to_string(),
        total_participants: total,
        breakdown: HousingBreakdown::none(),
        participants,
    }
}

pub fn individual_request(event_id: i64, housing_type: &str) -> IndividualRegistrationRequest {
    IndividualRegistrationRequest {
        actor: coordinator(),
        event_id,
        first_name: String::from("Dana"),
        last_name: String::from("Solo"),
        age: 17,
        gender: Some(String::from("female")),
        participant_type: String::from("youth_u18"),
        housing_type: housing_type.to_string(),
        room_type: None,
    }
}

pub fn cancel_request() -> CancelRequest {
    CancelRequest {
        actor: coordinator(),
    }
}

pub fn auto_assign_request(group_id: Option<i64>, strategy: &str) -> AutoAssignRequest {
    AutoAssignRequest {
        actor: coordinator(),
        group_id,
        strategy: strategy.to_string(),
        only_unassigned: true,
        gender: None,
        youth: None,
        buildings: None,
    }
}

pub fn seed_building(store: &SqlitePersistence, event_id: i64) -> i64 {
    store
        .create_building(&NewBuilding {
            event_id,
            name: String::from("Dormitory"),
            gender: None,
        })
        .expect("building should insert")
}

pub fn seed_room(
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
