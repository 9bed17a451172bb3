// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Write-side operations.
//!
//! Counter maintenance never does read-modify-write in Rust. Every
//! adjustment is a single clamped SQL statement, so concurrent writers
//! can interleave without driving a `remaining` column below zero or
//! above its capacity. Assignments and reservations run in short
//! transactions and report contention as outcomes, not errors.

use rusqlite::{Connection, OptionalExtension, Transaction, params};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::debug;

use crate::error::PersistenceError;
use crate::queries;
use crate::records::{
    GroupRegistrationRecord, IndividualRegistrationRecord, NewBuilding, NewEvent,
    NewGroupRegistration, NewIndividualRegistration, NewRoom, RegistrationStatus,
};
use bunkhouse::{AssigneeRef, CapacitySettings, PlannedAssignment};
use bunkhouse_domain::{Capacity, HousingType, PartyCounts, RoomType};

/// Result of attempting one planned bed assignment.
///
/// Contended outcomes are ordinary results; the caller counts them as
/// skipped and moves on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentOutcome {
    /// The assignment row was written and room occupancy bumped.
    Applied {
        /// Row id of the new assignment.
        assignment_id: i64,
    },
    /// The room filled up between planning and application.
    NoCapacity,
    /// Another writer took the bed first.
    BedTaken,
    /// The assignee already holds an assignment.
    AlreadyAssigned,
}

/// A room that could not be reserved for a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomConflict {
    /// The contested room.
    pub room_id: i64,
    /// The group currently holding it, if any. `None` means the room
    /// is marked unavailable.
    pub held_by_group: Option<i64>,
}

/// Result of a group room-reservation request.
///
/// Reservation is all-or-nothing: any conflict rolls the whole batch
/// back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomAllocationOutcome {
    /// Every requested room is now reserved to the group.
    Allocated {
        /// Number of rooms reserved.
        count: usize,
    },
    /// One or more rooms were unavailable or held by another group.
    Conflicts(Vec<RoomConflict>),
}

fn now_rfc3339() -> Result<String, PersistenceError> {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(|e| PersistenceError::DatabaseError(e.to_string()))
}

/// Creates an event and, when any bucket capacity is configured, its
/// settings row. Remaining counters start at capacity.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_event(conn: &Connection, event: &NewEvent) -> Result<i64, PersistenceError> {
    conn.execute(
        "INSERT INTO events (name, capacity_total, capacity_remaining, created_at)
         VALUES (?1, ?2, COALESCE(?2, 0), ?3)",
        params![event.name, event.capacity_total, now_rfc3339()?],
    )?;
    let event_id: i64 = conn.last_insert_rowid();

    let has_buckets: bool = event.on_campus_capacity.is_some()
        || event.off_campus_capacity.is_some()
        || event.day_pass_capacity.is_some()
        || event.single_capacity.is_some()
        || event.double_capacity.is_some()
        || event.triple_capacity.is_some()
        || event.quad_capacity.is_some();
    if has_buckets {
        conn.execute(
            "INSERT INTO event_settings (event_id,
                on_campus_capacity, on_campus_remaining,
                off_campus_capacity, off_campus_remaining,
                day_pass_capacity, day_pass_remaining,
                single_capacity, single_remaining,
                double_capacity, double_remaining,
                triple_capacity, triple_remaining,
                quad_capacity, quad_remaining)
             VALUES (?1, ?2, COALESCE(?2, 0), ?3, COALESCE(?3, 0),
                     ?4, COALESCE(?4, 0), ?5, COALESCE(?5, 0),
                     ?6, COALESCE(?6, 0), ?7, COALESCE(?7, 0),
                     ?8, COALESCE(?8, 0))",
            params![
                event_id,
                event.on_campus_capacity,
                event.off_campus_capacity,
                event.day_pass_capacity,
                event.single_capacity,
                event.double_capacity,
                event.triple_capacity,
                event.quad_capacity,
            ],
        )?;
    }

    debug!("created event {event_id}");
    Ok(event_id)
}

/// Creates a building under an event.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_building(conn: &Connection, building: &NewBuilding) -> Result<i64, PersistenceError> {
    conn.execute(
        "INSERT INTO buildings (event_id, name, gender) VALUES (?1, ?2, ?3)",
        params![
            building.event_id,
            building.name,
            building.gender.map(|g| g.as_str()),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Creates a room under a building.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_room(conn: &Connection, room: &NewRoom) -> Result<i64, PersistenceError> {
    conn.execute(
        "INSERT INTO rooms (building_id, name, capacity, current_occupancy,
                            gender, housing_type_tag, is_available)
         VALUES (?1, ?2, ?3, 0, ?4, ?5, ?6)",
        params![
            room.building_id,
            room.name,
            room.capacity,
            room.gender.map(|g| g.as_str()),
            room.tag.map(|t| t.as_str()),
            room.is_available,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Inserts a group registration and its participant roster in one
/// transaction. Capacity accounting is the caller's job.
///
/// # Errors
///
/// Returns an error if any insert fails.
pub fn insert_group_registration(
    conn: &mut Connection,
    registration: &NewGroupRegistration,
) -> Result<i64, PersistenceError> {
    let created_at: String = now_rfc3339()?;
    let tx: Transaction<'_> = conn.transaction()?;
    tx.execute(
        "INSERT INTO group_registrations (event_id, group_name, parish_name,
            housing_type, total_participants,
            on_campus_youth, on_campus_chaperones,
            off_campus_youth, off_campus_chaperones,
            day_pass_youth, day_pass_chaperones,
            status, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, 'active', ?12)",
        params![
            registration.event_id,
            registration.group_name,
            registration.parish_name,
            registration.housing_type.as_str(),
            registration.total_participants,
            registration.breakdown.on_campus_youth,
            registration.breakdown.on_campus_chaperones,
            registration.breakdown.off_campus_youth,
            registration.breakdown.off_campus_chaperones,
            registration.breakdown.day_pass_youth,
            registration.breakdown.day_pass_chaperones,
            created_at,
        ],
    )?;
    let group_registration_id: i64 = tx.last_insert_rowid();

    for participant in &registration.participants {
        tx.execute(
            "INSERT INTO participants (group_registration_id, first_name, last_name,
                                       age, gender, participant_type)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                group_registration_id,
                participant.first_name,
                participant.last_name,
                participant.age,
                participant.gender.map(|g| g.as_str()),
                participant.participant_type.as_str(),
            ],
        )?;
    }
    tx.commit()?;

    debug!(
        "registered group {group_registration_id} with {} participants",
        registration.participants.len()
    );
    Ok(group_registration_id)
}

/// Inserts an individual registration. Capacity accounting is the
/// caller's job.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_individual_registration(
    conn: &Connection,
    registration: &NewIndividualRegistration,
) -> Result<i64, PersistenceError> {
    conn.execute(
        "INSERT INTO individual_registrations (event_id, first_name, last_name,
            age, gender, participant_type, housing_type, room_type, status, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, 'active', ?9)",
        params![
            registration.event_id,
            registration.first_name,
            registration.last_name,
            registration.age,
            registration.gender.map(|g| g.as_str()),
            registration.participant_type.as_str(),
            registration.housing_type.as_str(),
            registration.room_type.map(|r| r.as_str()),
            now_rfc3339()?,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn housing_column(housing: HousingType) -> &'static str {
    match housing {
        HousingType::OnCampus => "on_campus",
        HousingType::OffCampus => "off_campus",
        HousingType::DayPass => "day_pass",
    }
}

fn room_type_column(room_type: RoomType) -> &'static str {
    match room_type {
        RoomType::Single => "single",
        RoomType::Double => "double",
        RoomType::Triple => "triple",
        RoomType::Quad => "quad",
    }
}

/// Clamped single-statement decrement on one settings column. A missing
/// settings row or an unlimited dimension is a no-op.
fn decrement_settings_column(
    conn: &Connection,
    event_id: i64,
    column: &'static str,
    count: u32,
) -> Result<(), PersistenceError> {
    conn.execute(
        &format!(
            "UPDATE event_settings
             SET {column}_remaining = MAX(0, {column}_remaining - ?1)
             WHERE event_id = ?2 AND {column}_capacity IS NOT NULL"
        ),
        params![count, event_id],
    )?;
    Ok(())
}

/// Clamped single-statement increment on one settings column, capped at
/// the configured capacity.
fn increment_settings_column(
    conn: &Connection,
    event_id: i64,
    column: &'static str,
    count: u32,
) -> Result<(), PersistenceError> {
    conn.execute(
        &format!(
            "UPDATE event_settings
             SET {column}_remaining = MIN({column}_capacity, {column}_remaining + ?1)
             WHERE event_id = ?2 AND {column}_capacity IS NOT NULL"
        ),
        params![count, event_id],
    )?;
    Ok(())
}

/// Consumes ledger spots for a party across every bounded dimension it
/// touches. Floors at zero rather than failing; admission control is an
/// advisory check before this call.
///
/// # Errors
///
/// Returns an error if a statement fails.
pub fn decrement_for_party(
    conn: &Connection,
    event_id: i64,
    counts: &PartyCounts,
    room_type: Option<RoomType>,
) -> Result<(), PersistenceError> {
    let total: u32 = counts.total();
    if total > 0 {
        conn.execute(
            "UPDATE events SET capacity_remaining = MAX(0, capacity_remaining - ?1)
             WHERE event_id = ?2 AND capacity_total IS NOT NULL",
            params![total, event_id],
        )?;
    }
    for housing in HousingType::all() {
        let count: u32 = counts.for_housing(housing);
        if count > 0 {
            decrement_settings_column(conn, event_id, housing_column(housing), count)?;
        }
    }
    if counts.on_campus > 0
        && let Some(room_type) = room_type
    {
        decrement_settings_column(conn, event_id, room_type_column(room_type), counts.on_campus)?;
    }
    Ok(())
}

/// Returns ledger spots for a party, clamped at each dimension's
/// capacity.
///
/// # Errors
///
/// Returns an error if a statement fails.
pub fn increment_for_party(
    conn: &Connection,
    event_id: i64,
    counts: &PartyCounts,
    room_type: Option<RoomType>,
) -> Result<(), PersistenceError> {
    let total: u32 = counts.total();
    if total > 0 {
        conn.execute(
            "UPDATE events SET capacity_remaining = MIN(capacity_total, capacity_remaining + ?1)
             WHERE event_id = ?2 AND capacity_total IS NOT NULL",
            params![total, event_id],
        )?;
    }
    for housing in HousingType::all() {
        let count: u32 = counts.for_housing(housing);
        if count > 0 {
            increment_settings_column(conn, event_id, housing_column(housing), count)?;
        }
    }
    if counts.on_campus > 0
        && let Some(room_type) = room_type
    {
        increment_settings_column(conn, event_id, room_type_column(room_type), counts.on_campus)?;
    }
    Ok(())
}

/// Overwrites every bounded remaining counter with reconciled values.
/// Unlimited dimensions are untouched.
///
/// # Errors
///
/// Returns an error if a statement fails.
pub fn overwrite_capacity(
    conn: &Connection,
    event_id: i64,
    settings: &CapacitySettings,
) -> Result<(), PersistenceError> {
    if let Capacity::Bounded(_) = settings.event.capacity {
        conn.execute(
            "UPDATE events SET capacity_remaining = ?1
             WHERE event_id = ?2 AND capacity_total IS NOT NULL",
            params![settings.event.remaining, event_id],
        )?;
    }

    let columns: [(&'static str, bunkhouse_domain::CapacityDimension); 7] = [
        ("on_campus", settings.on_campus),
        ("off_campus", settings.off_campus),
        ("day_pass", settings.day_pass),
        ("single", settings.single),
        ("double", settings.double),
        ("triple", settings.triple),
        ("quad", settings.quad),
    ];
    for (column, dimension) in columns {
        if let Capacity::Bounded(_) = dimension.capacity {
            conn.execute(
                &format!(
                    "UPDATE event_settings SET {column}_remaining = ?1
                     WHERE event_id = ?2 AND {column}_capacity IS NOT NULL"
                ),
                params![dimension.remaining, event_id],
            )?;
        }
    }
    Ok(())
}

/// Reserves a batch of rooms to a group, all or nothing.
///
/// A room already held by the same group counts as reserved, not as a
/// conflict. Any room held by another group, marked unavailable, or
/// belonging to another event aborts the batch.
///
/// # Errors
///
/// Returns `RoomNotFound` for an unknown room id, or an error if a
/// statement fails.
pub fn allocate_rooms_to_group(
    conn: &mut Connection,
    group_registration_id: i64,
    room_ids: &[i64],
) -> Result<RoomAllocationOutcome, PersistenceError> {
    let event_id: i64 = conn
        .query_row(
            "SELECT event_id FROM group_registrations WHERE group_registration_id = ?1",
            params![group_registration_id],
            |row| row.get(0),
        )
        .optional()?
        .ok_or(PersistenceError::GroupRegistrationNotFound(
            group_registration_id,
        ))?;

    let tx: Transaction<'_> = conn.transaction()?;
    let mut conflicts: Vec<RoomConflict> = Vec::new();
    let mut reserved: usize = 0;

    for &room_id in room_ids {
        let updated: usize = tx.execute(
            "UPDATE rooms SET allocated_to_group = ?1
             WHERE room_id = ?2 AND is_available = 1
               AND (allocated_to_group IS NULL OR allocated_to_group = ?1)
               AND building_id IN
                  (SELECT building_id FROM buildings WHERE event_id = ?3)",
            params![group_registration_id, room_id, event_id],
        )?;
        if updated == 1 {
            reserved += 1;
            continue;
        }

        let holder: Option<(bool, Option<i64>)> = tx
            .query_row(
                "SELECT is_available, allocated_to_group FROM rooms WHERE room_id = ?1",
                params![room_id],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;
        match holder {
            None => return Err(PersistenceError::RoomNotFound(room_id)),
            Some((_, held_by_group)) => conflicts.push(RoomConflict {
                room_id,
                held_by_group,
            }),
        }
    }

    if conflicts.is_empty() {
        tx.commit()?;
        debug!("reserved {reserved} rooms for group {group_registration_id}");
        Ok(RoomAllocationOutcome::Allocated { count: reserved })
    } else {
        // Dropping the transaction rolls back the partial batch.
        Ok(RoomAllocationOutcome::Conflicts(conflicts))
    }
}

/// Clears every room reservation held by a group. Returns the number of
/// rooms released.
///
/// # Errors
///
/// Returns an error if the statement fails.
pub fn release_group_rooms(
    conn: &Connection,
    group_registration_id: i64,
) -> Result<usize, PersistenceError> {
    let released: usize = conn.execute(
        "UPDATE rooms SET allocated_to_group = NULL WHERE allocated_to_group = ?1",
        params![group_registration_id],
    )?;
    Ok(released)
}

/// Applies one planned bed assignment in its own transaction.
///
/// The occupancy bump is guarded by `current_occupancy < capacity` and
/// the insert by the schema's uniqueness constraints, so a plan that
/// lost a race comes back as a contended outcome instead of corrupting
/// counters.
///
/// # Errors
///
/// Returns an error only for genuine database failures.
pub fn apply_assignment(
    conn: &mut Connection,
    assignment: &PlannedAssignment,
) -> Result<AssignmentOutcome, PersistenceError> {
    let assigned_at: String = now_rfc3339()?;
    let tx: Transaction<'_> = conn.transaction()?;

    let updated: usize = tx.execute(
        "UPDATE rooms SET current_occupancy = current_occupancy + 1
         WHERE room_id = ?1 AND is_available = 1 AND current_occupancy < capacity",
        params![assignment.room_id],
    )?;
    if updated == 0 {
        return Ok(AssignmentOutcome::NoCapacity);
    }

    let (participant_id, individual_registration_id): (Option<i64>, Option<i64>) =
        match assignment.assignee {
            AssigneeRef::Participant(id) => (Some(id), None),
            AssigneeRef::Individual(id) => (None, Some(id)),
        };
    let inserted = tx.execute(
        "INSERT INTO room_assignments (room_id, participant_id,
            individual_registration_id, bed_number, assigned_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            assignment.room_id,
            participant_id,
            individual_registration_id,
            assignment.bed_number,
            assigned_at,
        ],
    );
    match inserted {
        Ok(_) => {
            let assignment_id: i64 = tx.last_insert_rowid();
            tx.commit()?;
            Ok(AssignmentOutcome::Applied { assignment_id })
        }
        Err(rusqlite::Error::SqliteFailure(err, message))
            if err.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            // Rollback restores the occupancy bump.
            let detail: String = message.unwrap_or_default();
            if detail.contains("bed_number") {
                Ok(AssignmentOutcome::BedTaken)
            } else {
                Ok(AssignmentOutcome::AlreadyAssigned)
            }
        }
        Err(error) => Err(error.into()),
    }
}

/// Deletes the bed assignments of the named assignees in one
/// transaction, decrementing room occupancy to match. Assignees with
/// no current bed are no-ops. Returns the number released.
///
/// # Errors
///
/// Returns an error if a statement fails.
pub fn release_assignments_for(
    conn: &mut Connection,
    assignees: &[AssigneeRef],
) -> Result<usize, PersistenceError> {
    let tx: Transaction<'_> = conn.transaction()?;
    let mut released: usize = 0;
    for assignee in assignees {
        let (column, id): (&'static str, i64) = match *assignee {
            AssigneeRef::Participant(id) => ("participant_id", id),
            AssigneeRef::Individual(id) => ("individual_registration_id", id),
        };
        tx.execute(
            &format!(
                "UPDATE rooms SET current_occupancy = MAX(0, current_occupancy - 1)
                 WHERE room_id IN
                    (SELECT room_id FROM room_assignments WHERE {column} = ?1)"
            ),
            params![id],
        )?;
        released += tx.execute(
            &format!("DELETE FROM room_assignments WHERE {column} = ?1"),
            params![id],
        )?;
    }
    tx.commit()?;
    Ok(released)
}

fn release_group_assignments_tx(
    tx: &Transaction<'_>,
    group_registration_id: i64,
) -> Result<usize, PersistenceError> {
    tx.execute(
        "UPDATE rooms SET current_occupancy = MAX(0, current_occupancy -
            (SELECT COUNT(*) FROM room_assignments ra
             JOIN participants p ON p.participant_id = ra.participant_id
             WHERE ra.room_id = rooms.room_id AND p.group_registration_id = ?1))
         WHERE room_id IN
            (SELECT ra.room_id FROM room_assignments ra
             JOIN participants p ON p.participant_id = ra.participant_id
             WHERE p.group_registration_id = ?1)",
        params![group_registration_id],
    )?;
    let released: usize = tx.execute(
        "DELETE FROM room_assignments WHERE participant_id IN
            (SELECT participant_id FROM participants WHERE group_registration_id = ?1)",
        params![group_registration_id],
    )?;
    Ok(released)
}

/// Cancels a group registration.
///
/// One transaction releases the roster's bed assignments, drops the
/// group's room reservations, deletes the roster, flips the status,
/// and returns the consumed ledger spots. Returns the cancelled
/// record.
///
/// # Errors
///
/// Returns `GroupRegistrationNotFound` for an unknown id and
/// `RegistrationNotActive` if it was already cancelled.
pub fn cancel_group_registration(
    conn: &mut Connection,
    group_registration_id: i64,
) -> Result<GroupRegistrationRecord, PersistenceError> {
    let registration: GroupRegistrationRecord =
        queries::get_group_registration(conn, group_registration_id)?;
    if registration.status != RegistrationStatus::Active {
        return Err(PersistenceError::RegistrationNotActive(
            group_registration_id,
        ));
    }
    let counts: PartyCounts = registration.party_counts();

    let tx: Transaction<'_> = conn.transaction()?;
    release_group_assignments_tx(&tx, group_registration_id)?;
    tx.execute(
        "UPDATE rooms SET allocated_to_group = NULL WHERE allocated_to_group = ?1",
        params![group_registration_id],
    )?;
    tx.execute(
        "DELETE FROM participants WHERE group_registration_id = ?1",
        params![group_registration_id],
    )?;
    tx.execute(
        "UPDATE group_registrations SET status = 'cancelled'
         WHERE group_registration_id = ?1",
        params![group_registration_id],
    )?;
    increment_for_party(&tx, registration.event_id, &counts, None)?;
    tx.commit()?;

    debug!("cancelled group registration {group_registration_id}");
    Ok(GroupRegistrationRecord {
        status: RegistrationStatus::Cancelled,
        ..registration
    })
}

/// Cancels an individual registration.
///
/// Releases the person's bed assignment if any, flips the status, and
/// returns the consumed ledger spots including the room-type dimension.
///
/// # Errors
///
/// Returns `IndividualRegistrationNotFound` for an unknown id and
/// `RegistrationNotActive` if it was already cancelled.
pub fn cancel_individual_registration(
    conn: &mut Connection,
    individual_registration_id: i64,
) -> Result<IndividualRegistrationRecord, PersistenceError> {
    let registration: IndividualRegistrationRecord =
        queries::get_individual_registration(conn, individual_registration_id)?;
    if registration.status != RegistrationStatus::Active {
        return Err(PersistenceError::RegistrationNotActive(
            individual_registration_id,
        ));
    }
    let counts: PartyCounts = registration.party_counts();

    let tx: Transaction<'_> = conn.transaction()?;
    tx.execute(
        "UPDATE rooms SET current_occupancy = MAX(0, current_occupancy - 1)
         WHERE room_id IN
            (SELECT room_id FROM room_assignments
             WHERE individual_registration_id = ?1)",
        params![individual_registration_id],
    )?;
    tx.execute(
        "DELETE FROM room_assignments WHERE individual_registration_id = ?1",
        params![individual_registration_id],
    )?;
    tx.execute(
        "UPDATE individual_registrations SET status = 'cancelled'
         WHERE individual_registration_id = ?1",
        params![individual_registration_id],
    )?;
    increment_for_party(
        &tx,
        registration.event_id,
        &counts,
        registration.room_type,
    )?;
    tx.commit()?;

    debug!("cancelled individual registration {individual_registration_id}");
    Ok(IndividualRegistrationRecord {
        status: RegistrationStatus::Cancelled,
        ..registration
    })
}
