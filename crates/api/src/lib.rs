// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request handling and authorization layer.
//!
//! Exposes transport-agnostic handler functions over the persistence
//! layer, plus the role and capability machinery the handlers enforce.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod auth;
mod capabilities;
mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthorizationService, Role};
pub use capabilities::compute_global_capabilities;
pub use error::{ApiError, AuthError};
pub use handlers::{
    allocate_rooms, auto_assign, cancel_group, cancel_individual, create_event, get_event,
    list_rooms, list_unassigned, recalculate_capacity, register_group, register_individual,
};
pub use request_response::{
    ActorContext, AllocateRoomsRequest, AllocateRoomsResponse, AssigneeDto, AutoAssignRequest,
    AutoAssignResponse, CancelRequest, Capability, CreateEventRequest, EventResponse,
    GlobalCapabilities, GroupRegistrationRequest, IndividualRegistrationRequest,
    ParticipantPayload, RegistrationResponse, RecalculateRequest, RecalculateResponse,
    RoomConflictDto, RoomsResponse, UnassignedResponse,
};
