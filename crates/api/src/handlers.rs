// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request handlers: authorization, validation, and orchestration of
//! the core planning logic against the persistence layer.
//!
//! Handlers are plain functions over `SqlitePersistence` so they can be
//! driven directly from tests and wrapped by any HTTP frontend.

use std::str::FromStr;

use tracing::info;

use crate::auth::{AuthenticatedActor, AuthorizationService, Role};
use crate::error::ApiError;
use crate::request_response::{
    ActorContext, AllocateRoomsRequest, AllocateRoomsResponse, AutoAssignRequest,
    AutoAssignResponse, CancelRequest, CreateEventRequest, EventResponse,
    GroupRegistrationRequest, IndividualRegistrationRequest, RegistrationResponse,
    RecalculateRequest, RecalculateResponse, RoomConflictDto, RoomsResponse, UnassignedResponse,
};
use bunkhouse::{
    AllocationFilters, AllocationPlan, CapacitySettings, HousingCandidate, ReconciliationOutcome,
    Strategy, admitted_assignees, check_party, plan_assignments, reconcile,
};
use bunkhouse_domain::{
    DomainError, Gender, HousingType, Participant, ParticipantType, PartyCounts, RoomProfile,
    RoomType, party_counts,
};
use bunkhouse_persistence::{
    AssignmentOutcome, GroupRegistrationRecord, IndividualRegistrationRecord, NewEvent,
    NewGroupRegistration, NewIndividualRegistration, RegistrationStatus, RoomAllocationOutcome,
    SqlitePersistence,
};

fn parse_actor(context: &ActorContext) -> Result<AuthenticatedActor, ApiError> {
    let role: Role = Role::from_str(&context.actor_role)?;
    Ok(AuthenticatedActor::new(context.actor_id, role))
}

fn parse_field<T>(value: &str) -> Result<T, ApiError>
where
    T: FromStr<Err = DomainError>,
{
    T::from_str(value).map_err(ApiError::from)
}

fn parse_optional_field<T>(value: Option<&str>) -> Result<Option<T>, ApiError>
where
    T: FromStr<Err = DomainError>,
{
    value.map(parse_field).transpose()
}

fn require_name(value: &str, field: &'static str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(DomainError::EmptyName { field }.into());
    }
    Ok(())
}

/// Creates an event with optional capacity ceilings.
///
/// # Errors
///
/// Returns an error if the actor may not manage events or the input is
/// invalid.
pub fn create_event(
    persistence: &mut SqlitePersistence,
    request: &CreateEventRequest,
) -> Result<EventResponse, ApiError> {
    let actor: AuthenticatedActor = parse_actor(&request.actor)?;
    AuthorizationService::authorize_manage_events(&actor)?;
    require_name(&request.name, "name")?;

    let event_id: i64 = persistence.create_event(&NewEvent {
        name: request.name.clone(),
        capacity_total: request.capacity_total,
        on_campus_capacity: request.on_campus_capacity,
        off_campus_capacity: request.off_campus_capacity,
        day_pass_capacity: request.day_pass_capacity,
        single_capacity: request.single_capacity,
        double_capacity: request.double_capacity,
        triple_capacity: request.triple_capacity,
        quad_capacity: request.quad_capacity,
    })?;
    info!(event_id, "event created");
    get_event(persistence, event_id)
}

/// Fetches an event with its full ledger snapshot.
///
/// # Errors
///
/// Returns an error if the event does not exist.
pub fn get_event(
    persistence: &SqlitePersistence,
    event_id: i64,
) -> Result<EventResponse, ApiError> {
    Ok(EventResponse {
        event: persistence.get_event(event_id)?,
        settings: persistence.get_capacity_settings(event_id)?,
    })
}

/// Registers a group: validates counts, checks every touched capacity
/// dimension, inserts the registration with its roster, and consumes
/// ledger spots.
///
/// # Errors
///
/// Returns an error if the actor may not manage registrations, the
/// input is invalid, or a capacity dimension denies the party.
pub fn register_group(
    persistence: &mut SqlitePersistence,
    request: &GroupRegistrationRequest,
) -> Result<RegistrationResponse, ApiError> {
    let actor: AuthenticatedActor = parse_actor(&request.actor)?;
    AuthorizationService::authorize_manage_registrations(&actor)?;
    require_name(&request.group_name, "group_name")?;
    if request.total_participants == 0 {
        return Err(DomainError::InvalidCount {
            field: "total_participants",
            value: 0,
        }
        .into());
    }

    let housing_type: HousingType = parse_field(&request.housing_type)?;
    request
        .breakdown
        .validate_against_total(request.total_participants)?;

    let mut roster: Vec<Participant> = Vec::with_capacity(request.participants.len());
    for payload in &request.participants {
        require_name(&payload.first_name, "first_name")?;
        require_name(&payload.last_name, "last_name")?;
        roster.push(Participant {
            participant_id: None,
            first_name: payload.first_name.clone(),
            last_name: payload.last_name.clone(),
            age: payload.age,
            gender: parse_optional_field::<Gender>(payload.gender.as_deref())?,
            participant_type: parse_field::<ParticipantType>(&payload.participant_type)?,
        });
    }

    let counts: PartyCounts = party_counts(
        &request.breakdown,
        housing_type,
        request.total_participants,
    );
    let settings: CapacitySettings = persistence.get_capacity_settings(request.event_id)?;
    check_party(&settings, &counts, None)?;

    let registration_id: i64 = persistence.insert_group_registration(&NewGroupRegistration {
        event_id: request.event_id,
        group_name: request.group_name.clone(),
        parish_name: request.parish_name.clone(),
        housing_type,
        total_participants: request.total_participants,
        breakdown: request.breakdown,
        participants: roster,
    })?;
    persistence.decrement_for_party(request.event_id, &counts, None)?;

    info!(
        event_id = request.event_id,
        registration_id,
        party_size = counts.total(),
        "group registered"
    );
    Ok(RegistrationResponse {
        registration_id,
        status: RegistrationStatus::Active.as_str().to_string(),
    })
}

/// Cancels a group registration, releasing beds, reserved rooms, and
/// ledger spots.
///
/// # Errors
///
/// Returns an error if the actor may not manage registrations, or the
/// registration is unknown or already cancelled.
pub fn cancel_group(
    persistence: &mut SqlitePersistence,
    group_registration_id: i64,
    request: &CancelRequest,
) -> Result<RegistrationResponse, ApiError> {
    let actor: AuthenticatedActor = parse_actor(&request.actor)?;
    AuthorizationService::authorize_manage_registrations(&actor)?;

    let cancelled: GroupRegistrationRecord =
        persistence.cancel_group_registration(group_registration_id)?;
    info!(
        event_id = cancelled.event_id,
        registration_id = group_registration_id,
        "group registration cancelled"
    );
    Ok(RegistrationResponse {
        registration_id: group_registration_id,
        status: cancelled.status.as_str().to_string(),
    })
}

/// Registers a single person, consuming the room-type dimension when
/// housed on campus.
///
/// # Errors
///
/// Returns an error if the actor may not manage registrations, the
/// input is invalid (including a room type on non-campus housing), or a
/// capacity dimension denies the registration.
pub fn register_individual(
    persistence: &mut SqlitePersistence,
    request: &IndividualRegistrationRequest,
) -> Result<RegistrationResponse, ApiError> {
    let actor: AuthenticatedActor = parse_actor(&request.actor)?;
    AuthorizationService::authorize_manage_registrations(&actor)?;
    require_name(&request.first_name, "first_name")?;
    require_name(&request.last_name, "last_name")?;

    let housing_type: HousingType = parse_field(&request.housing_type)?;
    let room_type: Option<RoomType> = parse_optional_field(request.room_type.as_deref())?;
    if room_type.is_some() && housing_type != HousingType::OnCampus {
        return Err(DomainError::RoomTypeNotApplicable {
            housing_type: housing_type.as_str().to_string(),
        }
        .into());
    }

    let registration: NewIndividualRegistration = NewIndividualRegistration {
        event_id: request.event_id,
        first_name: request.first_name.clone(),
        last_name: request.last_name.clone(),
        age: request.age,
        gender: parse_optional_field::<Gender>(request.gender.as_deref())?,
        participant_type: parse_field::<ParticipantType>(&request.participant_type)?,
        housing_type,
        room_type,
    };

    let counts: PartyCounts = match housing_type {
        HousingType::OnCampus => PartyCounts {
            on_campus: 1,
            off_campus: 0,
            day_pass: 0,
        },
        HousingType::OffCampus => PartyCounts {
            on_campus: 0,
            off_campus: 1,
            day_pass: 0,
        },
        HousingType::DayPass => PartyCounts {
            on_campus: 0,
            off_campus: 0,
            day_pass: 1,
        },
    };
    let settings: CapacitySettings = persistence.get_capacity_settings(request.event_id)?;
    check_party(&settings, &counts, room_type)?;

    let registration_id: i64 = persistence.insert_individual_registration(&registration)?;
    persistence.decrement_for_party(request.event_id, &counts, room_type)?;

    info!(
        event_id = request.event_id,
        registration_id, "individual registered"
    );
    Ok(RegistrationResponse {
        registration_id,
        status: RegistrationStatus::Active.as_str().to_string(),
    })
}

/// Cancels an individual registration, releasing its bed and ledger
/// spots.
///
/// # Errors
///
/// Returns an error if the actor may not manage registrations, or the
/// registration is unknown or already cancelled.
pub fn cancel_individual(
    persistence: &mut SqlitePersistence,
    individual_registration_id: i64,
    request: &CancelRequest,
) -> Result<RegistrationResponse, ApiError> {
    let actor: AuthenticatedActor = parse_actor(&request.actor)?;
    AuthorizationService::authorize_manage_registrations(&actor)?;

    let cancelled: IndividualRegistrationRecord =
        persistence.cancel_individual_registration(individual_registration_id)?;
    info!(
        event_id = cancelled.event_id,
        registration_id = individual_registration_id,
        "individual registration cancelled"
    );
    Ok(RegistrationResponse {
        registration_id: individual_registration_id,
        status: cancelled.status.as_str().to_string(),
    })
}

/// Runs auto-assignment for an event or one of its groups.
///
/// With a group scope the pool is the group's roster and the rooms are
/// exactly the group's reserved rooms; a group holding none gets an
/// all-skipped result, never someone else's rooms. Without one, the
/// pool is the event's active on-campus individual registrations and
/// the rooms are the unreserved ones. A reassignment run releases only
/// the beds of people the filters admit. Plans that lose a race at
/// apply time are folded into `skipped`; genuine database failures
/// land in `errors` without stopping the batch.
///
/// # Errors
///
/// Returns an error if the actor may not run allocation, the strategy
/// or filters are invalid, or the scope does not exist.
pub fn auto_assign(
    persistence: &mut SqlitePersistence,
    event_id: i64,
    request: &AutoAssignRequest,
) -> Result<AutoAssignResponse, ApiError> {
    let actor: AuthenticatedActor = parse_actor(&request.actor)?;
    AuthorizationService::authorize_allocation(&actor)?;

    let strategy: Strategy = Strategy::from_str(&request.strategy)?;
    let filters: AllocationFilters = AllocationFilters {
        gender: parse_optional_field::<Gender>(request.gender.as_deref())?,
        youth: request.youth,
        buildings: request.buildings.clone(),
    };

    let (candidates, rooms): (Vec<HousingCandidate>, Vec<RoomProfile>) = match request.group_id {
        Some(group_id) => {
            let registration: GroupRegistrationRecord =
                persistence.get_group_registration(group_id)?;
            if registration.event_id != event_id {
                return Err(ApiError::InvalidInput {
                    field: String::from("group_id"),
                    message: format!("group {group_id} does not belong to event {event_id}"),
                });
            }
            if registration.status != RegistrationStatus::Active {
                return Err(ApiError::Conflict {
                    message: format!("registration {group_id} is not active"),
                });
            }
            let candidates: Vec<HousingCandidate> =
                persistence.load_group_candidates(group_id, request.only_unassigned)?;
            if !request.only_unassigned {
                persistence.release_assignments_for(&admitted_assignees(&candidates, &filters))?;
            }
            // Rooms load after the release so freed beds count as free.
            (candidates, persistence.load_group_rooms(group_id)?)
        }
        None => {
            persistence.get_event(event_id)?;
            let candidates: Vec<HousingCandidate> =
                persistence.load_individual_candidates(event_id, request.only_unassigned)?;
            if !request.only_unassigned {
                persistence.release_assignments_for(&admitted_assignees(&candidates, &filters))?;
            }
            (candidates, persistence.load_unreserved_rooms(event_id)?)
        }
    };

    let plan: AllocationPlan = plan_assignments(&candidates, &rooms, strategy, &filters);
    let mut response: AutoAssignResponse = AutoAssignResponse {
        assigned: 0,
        skipped: plan.skipped.iter().copied().map(Into::into).collect(),
        unclassifiable: plan.unclassifiable.iter().copied().map(Into::into).collect(),
        errors: Vec::new(),
    };

    for assignment in &plan.assignments {
        match persistence.apply_assignment(assignment) {
            Ok(AssignmentOutcome::Applied { .. }) => response.assigned += 1,
            Ok(
                AssignmentOutcome::NoCapacity
                | AssignmentOutcome::BedTaken
                | AssignmentOutcome::AlreadyAssigned,
            ) => {
                response.skipped.push(assignment.assignee.into());
            }
            Err(error) => response.errors.push(error.to_string()),
        }
    }

    info!(
        event_id,
        group_id = request.group_id,
        assigned = response.assigned,
        skipped = response.skipped.len(),
        unclassifiable = response.unclassifiable.len(),
        "auto-assignment run finished"
    );
    Ok(response)
}

/// Reserves rooms for a group, all or nothing.
///
/// # Errors
///
/// Returns an error if the actor may not run allocation or a room does
/// not exist. Contested rooms come back in the response, not as an
/// error.
pub fn allocate_rooms(
    persistence: &mut SqlitePersistence,
    group_registration_id: i64,
    request: &AllocateRoomsRequest,
) -> Result<AllocateRoomsResponse, ApiError> {
    let actor: AuthenticatedActor = parse_actor(&request.actor)?;
    AuthorizationService::authorize_allocation(&actor)?;

    match persistence.allocate_rooms_to_group(group_registration_id, &request.room_ids)? {
        RoomAllocationOutcome::Allocated { count } => {
            info!(
                group_id = group_registration_id,
                rooms = count,
                "rooms reserved"
            );
            Ok(AllocateRoomsResponse {
                allocated: count,
                conflicts: Vec::new(),
            })
        }
        RoomAllocationOutcome::Conflicts(conflicts) => Ok(AllocateRoomsResponse {
            allocated: 0,
            conflicts: conflicts
                .into_iter()
                .map(|c| RoomConflictDto {
                    room_id: c.room_id,
                    held_by_group: c.held_by_group,
                })
                .collect(),
        }),
    }
}

/// Recalculates every capacity counter from ground-truth registrations
/// and overwrites the stored values.
///
/// # Errors
///
/// Returns an error if the actor may not recalculate or the event does
/// not exist.
pub fn recalculate_capacity(
    persistence: &mut SqlitePersistence,
    event_id: i64,
    request: &RecalculateRequest,
) -> Result<RecalculateResponse, ApiError> {
    let actor: AuthenticatedActor = parse_actor(&request.actor)?;
    AuthorizationService::authorize_recalculate(&actor)?;

    let settings: CapacitySettings = persistence.get_capacity_settings(event_id)?;
    let actual = persistence.actual_counts(event_id)?;
    let outcome: ReconciliationOutcome = reconcile(&settings, &actual);
    persistence.overwrite_capacity(event_id, &outcome.new_settings)?;

    info!(
        event_id,
        dimensions = outcome.reports.len(),
        "capacity recalculated"
    );
    Ok(RecalculateResponse {
        reports: outcome.reports,
        actual,
    })
}

/// Lists every room of an event with occupancy and bed state.
///
/// # Errors
///
/// Returns an error if the event does not exist.
pub fn list_rooms(
    persistence: &SqlitePersistence,
    event_id: i64,
) -> Result<RoomsResponse, ApiError> {
    persistence.get_event(event_id)?;
    Ok(RoomsResponse {
        rooms: persistence.load_event_rooms(event_id)?,
    })
}

/// Lists everyone in an event without a bed: unassigned group
/// participants and unassigned on-campus individual registrations.
///
/// # Errors
///
/// Returns an error if the event does not exist.
pub fn list_unassigned(
    persistence: &SqlitePersistence,
    event_id: i64,
) -> Result<UnassignedResponse, ApiError> {
    persistence.get_event(event_id)?;
    Ok(UnassignedResponse {
        participants: persistence.load_unassigned_group_candidates(event_id)?,
        individuals: persistence.load_individual_candidates(event_id, true)?,
    })
}
