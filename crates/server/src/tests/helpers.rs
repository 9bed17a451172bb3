// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::sync::Arc;

use axum::{Router, body::Body, http::Request, response::Response};
use tokio::sync::Mutex;
use tower::ServiceExt;

use bunkhouse_api::{
    ActorContext, AutoAssignRequest, CancelRequest, CreateEventRequest, GroupRegistrationRequest,
    ParticipantPayload,
};
use bunkhouse_domain::{Gender, HousingBreakdown, RoomCategoryTag};
use bunkhouse_persistence::{NewBuilding, NewRoom, SqlitePersistence};

use crate::{AppState, build_router};

/// Creates a router plus its state, so tests can seed the store directly.
pub fn test_app() -> (Router, AppState) {
    let persistence: SqlitePersistence =
        SqlitePersistence::new_in_memory().expect("in-memory store should open");
    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
    };
    let app: Router = build_router(app_state.clone());
    (app, app_state)
}

pub async fn post_json<T: serde::Serialize>(app: &Router, uri: &str, body: &T) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

pub async fn body_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
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
    actor: ActorContext,
    event_id: i64,
    participants: Vec<ParticipantPayload>,
) -> GroupRegistrationRequest {
    let total: u32 = u32::try_from(participants.len()).unwrap();
    GroupRegistrationRequest {
        actor,
        event_id,
        group_name: String::from("Youth Group"),
        parish_name: Some(String::from("St. Anne")),
        housing_type: String::from("on_campus"),
        total_participants: total,
        breakdown: HousingBreakdown::none(),
        participants,
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

/// Seeds one building with one tagged room, returning the room id.
pub async fn seed_room(
    app_state: &AppState,
    event_id: i64,
    capacity: u32,
    gender: Gender,
    tag: RoomCategoryTag,
) -> i64 {
    let persistence = app_state.persistence.lock().await;
    let building_id: i64 = persistence
        .create_building(&NewBuilding {
            event_id,
            name: String::from("Dormitory"),
            gender: None,
        })
        .expect("building should insert");
    persistence
        .create_room(&NewRoom {
            building_id,
            name: String::from("Room 101"),
            capacity,
            gender: Some(gender),
            tag: Some(tag),
            is_available: true,
        })
        .expect("room should insert")
}
