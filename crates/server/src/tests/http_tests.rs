// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use axum::{Router, http::StatusCode as HttpStatusCode, response::Response};

use bunkhouse_api::{
    AllocateRoomsRequest, AllocateRoomsResponse, AutoAssignResponse, CreateEventRequest,
    EventResponse, ParticipantPayload, RegistrationResponse, UnassignedResponse,
};
use bunkhouse_domain::{Gender, RoomCategoryTag};

use crate::AppState;
use crate::tests::helpers;

/// Creates an event over HTTP and returns its id.
async fn create_event(app: &Router, request: &CreateEventRequest) -> i64 {
    let response: Response = helpers::post_json(app, "/events", request).await;
    assert_eq!(response.status(), HttpStatusCode::OK);
    let body: EventResponse = helpers::body_json(response).await;
    body.event.event_id
}

fn capped_event_request(name: &str, capacity_total: u32) -> CreateEventRequest {
    let mut request: CreateEventRequest = helpers::event_request(name);
    request.capacity_total = Some(capacity_total);
    request
}

fn four_person_roster() -> Vec<ParticipantPayload> {
    vec![
        helpers::participant("Ana", 16, "female", "youth_u18"),
        helpers::participant("Ben", 17, "male", "youth_u18"),
        helpers::participant("Cam", 16, "male", "youth_u18"),
        helpers::participant("Dee", 41, "female", "chaperone"),
    ]
}

#[tokio::test]
async fn test_create_event_and_fetch() {
    let (app, _state): (Router, AppState) = helpers::test_app();

    let event_id: i64 = create_event(&app, &capped_event_request("Summer Conference", 50)).await;

    let response: Response = helpers::get(&app, &format!("/events/{event_id}")).await;
    assert_eq!(response.status(), HttpStatusCode::OK);

    let body: EventResponse = helpers::body_json(response).await;
    assert_eq!(body.event.name, "Summer Conference");
    assert_eq!(body.event.capacity_total, Some(50));
    assert_eq!(body.event.capacity_remaining, 50);
}

#[tokio::test]
async fn test_register_group_consumes_capacity() {
    let (app, _state): (Router, AppState) = helpers::test_app();
    let event_id: i64 = create_event(&app, &capped_event_request("Summer Conference", 10)).await;

    let response: Response = helpers::post_json(
        &app,
        "/registrations/group",
        &helpers::group_request(helpers::coordinator(), event_id, four_person_roster()),
    )
    .await;
    assert_eq!(response.status(), HttpStatusCode::OK);

    let body: RegistrationResponse = helpers::body_json(response).await;
    assert_eq!(body.status, "active");

    let fetched: EventResponse =
        helpers::body_json(helpers::get(&app, &format!("/events/{event_id}")).await).await;
    assert_eq!(fetched.event.capacity_remaining, 6);
}

#[tokio::test]
async fn test_viewer_cannot_register_group() {
    let (app, _state): (Router, AppState) = helpers::test_app();
    let event_id: i64 = create_event(&app, &capped_event_request("Summer Conference", 10)).await;

    let response: Response = helpers::post_json(
        &app,
        "/registrations/group",
        &helpers::group_request(helpers::viewer(), event_id, four_person_roster()),
    )
    .await;
    assert_eq!(response.status(), HttpStatusCode::FORBIDDEN);

    let body: serde_json::Value = helpers::body_json(response).await;
    assert_eq!(body["error"], serde_json::Value::Bool(true));
}

#[tokio::test]
async fn test_over_capacity_returns_conflict() {
    let (app, _state): (Router, AppState) = helpers::test_app();
    let event_id: i64 = create_event(&app, &capped_event_request("Small Retreat", 3)).await;

    let response: Response = helpers::post_json(
        &app,
        "/registrations/group",
        &helpers::group_request(helpers::coordinator(), event_id, four_person_roster()),
    )
    .await;
    assert_eq!(response.status(), HttpStatusCode::CONFLICT);
}

#[tokio::test]
async fn test_unknown_event_returns_not_found() {
    let (app, _state): (Router, AppState) = helpers::test_app();

    let response: Response = helpers::get(&app, "/events/999").await;
    assert_eq!(response.status(), HttpStatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_strategy_returns_bad_request() {
    let (app, _state): (Router, AppState) = helpers::test_app();
    let event_id: i64 = create_event(&app, &helpers::event_request("Summer Conference")).await;

    let response: Response = helpers::post_json(
        &app,
        &format!("/events/{event_id}/auto_assign"),
        &helpers::auto_assign_request(None, "alphabetical"),
    )
    .await;
    assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_cancel_restores_capacity_and_rejects_repeat() {
    let (app, _state): (Router, AppState) = helpers::test_app();
    let event_id: i64 = create_event(&app, &capped_event_request("Summer Conference", 10)).await;

    let registered: RegistrationResponse = helpers::body_json(
        helpers::post_json(
            &app,
            "/registrations/group",
            &helpers::group_request(helpers::coordinator(), event_id, four_person_roster()),
        )
        .await,
    )
    .await;
    let cancel_uri: String = format!(
        "/registrations/group/{}/cancel",
        registered.registration_id
    );

    let response: Response =
        helpers::post_json(&app, &cancel_uri, &helpers::cancel_request()).await;
    assert_eq!(response.status(), HttpStatusCode::OK);
    let cancelled: RegistrationResponse = helpers::body_json(response).await;
    assert_eq!(cancelled.status, "cancelled");

    let fetched: EventResponse =
        helpers::body_json(helpers::get(&app, &format!("/events/{event_id}")).await).await;
    assert_eq!(fetched.event.capacity_remaining, 10);

    let repeat: Response = helpers::post_json(&app, &cancel_uri, &helpers::cancel_request()).await;
    assert_eq!(repeat.status(), HttpStatusCode::CONFLICT);
}

#[tokio::test]
async fn test_allocate_and_auto_assign_houses_group() {
    let (app, state): (Router, AppState) = helpers::test_app();
    let event_id: i64 = create_event(&app, &helpers::event_request("Summer Conference")).await;
    let room_id: i64 =
        helpers::seed_room(&state, event_id, 2, Gender::Male, RoomCategoryTag::YouthU18).await;

    let roster: Vec<ParticipantPayload> = vec![
        helpers::participant("Ben", 17, "male", "youth_u18"),
        helpers::participant("Cam", 16, "male", "youth_u18"),
    ];
    let registered: RegistrationResponse = helpers::body_json(
        helpers::post_json(
            &app,
            "/registrations/group",
            &helpers::group_request(helpers::coordinator(), event_id, roster),
        )
        .await,
    )
    .await;

    let allocate: Response = helpers::post_json(
        &app,
        &format!("/groups/{}/allocate_rooms", registered.registration_id),
        &AllocateRoomsRequest {
            actor: helpers::coordinator(),
            room_ids: vec![room_id],
        },
    )
    .await;
    assert_eq!(allocate.status(), HttpStatusCode::OK);
    let allocated: AllocateRoomsResponse = helpers::body_json(allocate).await;
    assert_eq!(allocated.allocated, 1);
    assert!(allocated.conflicts.is_empty());

    let assign: Response = helpers::post_json(
        &app,
        &format!("/events/{event_id}/auto_assign"),
        &helpers::auto_assign_request(Some(registered.registration_id), "fill_rooms"),
    )
    .await;
    assert_eq!(assign.status(), HttpStatusCode::OK);
    let outcome: AutoAssignResponse = helpers::body_json(assign).await;
    assert_eq!(outcome.assigned, 2);
    assert!(outcome.skipped.is_empty());
    assert!(outcome.errors.is_empty());

    let unassigned: UnassignedResponse =
        helpers::body_json(helpers::get(&app, &format!("/events/{event_id}/unassigned")).await)
            .await;
    assert!(unassigned.participants.is_empty());
    assert!(unassigned.individuals.is_empty());
}
