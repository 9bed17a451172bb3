// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-side queries: snapshots for the allocation core and ground-truth
//! aggregation for reconciliation.

use rusqlite::{Connection, OptionalExtension, params};
use std::collections::HashMap;
use std::str::FromStr;

use crate::error::PersistenceError;
use crate::records::{
    AssignmentRecord, EventRecord, GroupRegistrationRecord, IndividualRegistrationRecord,
    RegistrationStatus,
};
use bunkhouse::{ActualCounts, AssigneeRef, CapacitySettings, HousingCandidate, RoomTypeCounts};
use bunkhouse_domain::{
    CapacityDimension, Gender, HousingBreakdown, HousingType, ParticipantType, PartyCounts,
    RoomCategoryTag, RoomProfile, RoomType,
};

/// Converts a stored count column to `u32`.
fn to_u32(value: i64, table: &'static str) -> Result<u32, PersistenceError> {
    u32::try_from(value).map_err(|_| PersistenceError::InvalidRecord {
        table,
        message: format!("count {value} out of range"),
    })
}

/// Converts a stored age column to `u8`.
fn to_u8(value: i64, table: &'static str) -> Result<u8, PersistenceError> {
    u8::try_from(value).map_err(|_| PersistenceError::InvalidRecord {
        table,
        message: format!("age {value} out of range"),
    })
}

/// Parses an optional stored enum column.
fn parse_optional<T: FromStr>(
    value: Option<String>,
    table: &'static str,
) -> Result<Option<T>, PersistenceError>
where
    T::Err: std::fmt::Display,
{
    value
        .map(|s| {
            T::from_str(&s).map_err(|e| PersistenceError::InvalidRecord {
                table,
                message: e.to_string(),
            })
        })
        .transpose()
}

/// Parses a required stored enum column.
fn parse_required<T: FromStr>(value: &str, table: &'static str) -> Result<T, PersistenceError>
where
    T::Err: std::fmt::Display,
{
    T::from_str(value).map_err(|e| PersistenceError::InvalidRecord {
        table,
        message: e.to_string(),
    })
}

/// Fetches one event row.
///
/// # Errors
///
/// Returns `EventNotFound` if no such event exists.
pub fn get_event(conn: &Connection, event_id: i64) -> Result<EventRecord, PersistenceError> {
    let row: Option<(i64, String, Option<i64>, i64)> = conn
        .query_row(
            "SELECT event_id, name, capacity_total, capacity_remaining
             FROM events WHERE event_id = ?1",
            params![event_id],
            |row| {
                Ok((
                    row.get(0)?,
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                ))
            },
        )
        .optional()?;

    let Some((event_id, name, capacity_total, capacity_remaining)) = row else {
        return Err(PersistenceError::EventNotFound(event_id));
    };

    Ok(EventRecord {
        event_id,
        name,
        capacity_total: capacity_total.map(|v| to_u32(v, "events")).transpose()?,
        capacity_remaining: to_u32(capacity_remaining, "events")?,
    })
}

/// Loads the full capacity ledger snapshot for one event.
///
/// An event without a settings row has every housing and room-type
/// dimension unlimited; the event-wide pair always comes from `events`.
///
/// # Errors
///
/// Returns `EventNotFound` if the event does not exist.
pub fn get_capacity_settings(
    conn: &Connection,
    event_id: i64,
) -> Result<CapacitySettings, PersistenceError> {
    let event: EventRecord = get_event(conn, event_id)?;
    let event_dimension: CapacityDimension = match event.capacity_total {
        Some(capacity) => CapacityDimension::bounded(capacity, event.capacity_remaining),
        None => CapacityDimension::unlimited(),
    };

    let row: Option<[(Option<i64>, i64); 7]> = conn
        .query_row(
            "SELECT on_campus_capacity, on_campus_remaining,
                    off_campus_capacity, off_campus_remaining,
                    day_pass_capacity, day_pass_remaining,
                    single_capacity, single_remaining,
                    double_capacity, double_remaining,
                    triple_capacity, triple_remaining,
                    quad_capacity, quad_remaining
             FROM event_settings WHERE event_id = ?1",
            params![event_id],
            |row| {
                Ok([
                    (row.get(0)?, row.get(1)?),
                    (row.get(2)?, row.get(3)?),
                    (row.get(4)?, row.get(5)?),
                    (row.get(6)?, row.get(7)?),
                    (row.get(8)?, row.get(9)?),
                    (row.get(10)?, row.get(11)?),
                    (row.get(12)?, row.get(13)?),
                ])
            },
        )
        .optional()?;

    let mut settings: CapacitySettings = CapacitySettings::unlimited();
    settings.event = event_dimension;

    if let Some(pairs) = row {
        let mut dimensions: [CapacityDimension; 7] = [CapacityDimension::unlimited(); 7];
        for (index, (capacity, remaining)) in pairs.into_iter().enumerate() {
            dimensions[index] = match capacity {
                Some(capacity) => CapacityDimension::bounded(
                    to_u32(capacity, "event_settings")?,
                    to_u32(remaining, "event_settings")?,
                ),
                None => CapacityDimension::unlimited(),
            };
        }
        settings.on_campus = dimensions[0];
        settings.off_campus = dimensions[1];
        settings.day_pass = dimensions[2];
        settings.single = dimensions[3];
        settings.double = dimensions[4];
        settings.triple = dimensions[5];
        settings.quad = dimensions[6];
    }

    Ok(settings)
}

/// Fetches one group registration row.
///
/// # Errors
///
/// Returns `GroupRegistrationNotFound` if no such registration exists.
pub fn get_group_registration(
    conn: &Connection,
    group_registration_id: i64,
) -> Result<GroupRegistrationRecord, PersistenceError> {
    type Raw = (
        i64,
        i64,
        String,
        Option<String>,
        String,
        i64,
        [Option<i64>; 6],
        String,
    );
    let row: Option<Raw> = conn
        .query_row(
            "SELECT group_registration_id, event_id, group_name, parish_name,
                    housing_type, total_participants,
                    on_campus_youth, on_campus_chaperones,
                    off_campus_youth, off_campus_chaperones,
                    day_pass_youth, day_pass_chaperones, status
             FROM group_registrations WHERE group_registration_id = ?1",
            params![group_registration_id],
            |row| {
                Ok((
                    row.get(0)?,
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                    row.get(4)?,
                    row.get(5)?,
                    [
                        row.get(6)?,
                        row.get(7)?,
                        row.get(8)?,
                        row.get(9)?,
                        row.get(10)?,
                        row.get(11)?,
                    ],
                    row.get(12)?,
                ))
            },
        )
        .optional()?;

    let Some((id, event_id, group_name, parish_name, housing, total, buckets, status)) = row
    else {
        return Err(PersistenceError::GroupRegistrationNotFound(
            group_registration_id,
        ));
    };

    let bucket = |value: Option<i64>| -> Result<Option<u32>, PersistenceError> {
        value.map(|v| to_u32(v, "group_registrations")).transpose()
    };

    Ok(GroupRegistrationRecord {
        group_registration_id: id,
        event_id,
        group_name,
        parish_name,
        housing_type: parse_required::<HousingType>(&housing, "group_registrations")?,
        total_participants: to_u32(total, "group_registrations")?,
        breakdown: HousingBreakdown {
            on_campus_youth: bucket(buckets[0])?,
            on_campus_chaperones: bucket(buckets[1])?,
            off_campus_youth: bucket(buckets[2])?,
            off_campus_chaperones: bucket(buckets[3])?,
            day_pass_youth: bucket(buckets[4])?,
            day_pass_chaperones: bucket(buckets[5])?,
        },
        status: parse_required::<RegistrationStatus>(&status, "group_registrations")?,
    })
}

/// Fetches one individual registration row.
///
/// # Errors
///
/// Returns `IndividualRegistrationNotFound` if no such registration
/// exists.
pub fn get_individual_registration(
    conn: &Connection,
    individual_registration_id: i64,
) -> Result<IndividualRegistrationRecord, PersistenceError> {
    type Raw = (
        i64,
        i64,
        String,
        String,
        i64,
        Option<String>,
        String,
        String,
        Option<String>,
        String,
    );
    let row: Option<Raw> = conn
        .query_row(
            "SELECT individual_registration_id, event_id, first_name, last_name,
                    age, gender, participant_type, housing_type, room_type, status
             FROM individual_registrations WHERE individual_registration_id = ?1",
            params![individual_registration_id],
            |row| {
                Ok((
                    row.get(0)?,
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                    row.get(4)?,
                    row.get(5)?,
                    row.get(6)?,
                    row.get(7)?,
                    row.get(8)?,
                    row.get(9)?,
                ))
            },
        )
        .optional()?;

    let Some((id, event_id, first, last, age, gender, ptype, housing, room_type, status)) = row
    else {
        return Err(PersistenceError::IndividualRegistrationNotFound(
            individual_registration_id,
        ));
    };

    Ok(IndividualRegistrationRecord {
        individual_registration_id: id,
        event_id,
        first_name: first,
        last_name: last,
        age: to_u8(age, "individual_registrations")?,
        gender: parse_optional::<Gender>(gender, "individual_registrations")?,
        participant_type: parse_required::<ParticipantType>(&ptype, "individual_registrations")?,
        housing_type: parse_required::<HousingType>(&housing, "individual_registrations")?,
        room_type: parse_optional::<RoomType>(room_type, "individual_registrations")?,
        status: parse_required::<RegistrationStatus>(&status, "individual_registrations")?,
    })
}

/// Raw room row shared by the room-loading queries.
type RawRoom = (
    i64,
    i64,
    String,
    i64,
    i64,
    Option<String>,
    Option<String>,
    bool,
    Option<i64>,
    Option<String>,
);

const ROOM_COLUMNS: &str = "r.room_id, r.building_id, r.name, r.capacity,
    r.current_occupancy, r.gender, r.housing_type_tag, r.is_available,
    r.allocated_to_group, b.gender";

fn raw_room(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawRoom> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
        row.get(7)?,
        row.get(8)?,
        row.get(9)?,
    ))
}

fn build_rooms(
    conn: &Connection,
    raw: Vec<RawRoom>,
) -> Result<Vec<RoomProfile>, PersistenceError> {
    let mut occupied: HashMap<i64, Vec<u32>> = HashMap::new();
    {
        let mut stmt = conn.prepare(
            "SELECT room_id, bed_number FROM room_assignments WHERE bed_number IS NOT NULL",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?))
        })?;
        for row_result in rows {
            let (room_id, bed) = row_result?;
            occupied
                .entry(room_id)
                .or_default()
                .push(to_u32(bed, "room_assignments")?);
        }
    }

    let mut rooms: Vec<RoomProfile> = Vec::with_capacity(raw.len());
    for (
        room_id,
        building_id,
        name,
        capacity,
        current_occupancy,
        gender,
        tag,
        is_available,
        allocated_to_group,
        building_gender,
    ) in raw
    {
        rooms.push(RoomProfile {
            room_id,
            building_id,
            name,
            capacity: to_u32(capacity, "rooms")?,
            current_occupancy: to_u32(current_occupancy, "rooms")?,
            gender: parse_optional::<Gender>(gender, "rooms")?,
            building_gender: parse_optional::<Gender>(building_gender, "buildings")?,
            tag: parse_optional::<RoomCategoryTag>(tag, "rooms")?,
            is_available,
            allocated_to_group,
            occupied_beds: occupied.remove(&room_id).unwrap_or_default(),
        });
    }
    Ok(rooms)
}

/// Loads every room of one event, with occupied bed numbers attached.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn load_event_rooms(
    conn: &Connection,
    event_id: i64,
) -> Result<Vec<RoomProfile>, PersistenceError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {ROOM_COLUMNS}
         FROM rooms r JOIN buildings b ON b.building_id = r.building_id
         WHERE b.event_id = ?1 ORDER BY r.room_id"
    ))?;
    let raw: Vec<RawRoom> = stmt
        .query_map(params![event_id], raw_room)?
        .collect::<rusqlite::Result<_>>()?;
    build_rooms(conn, raw)
}

/// Loads the rooms reserved to one group.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn load_group_rooms(
    conn: &Connection,
    group_registration_id: i64,
) -> Result<Vec<RoomProfile>, PersistenceError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {ROOM_COLUMNS}
         FROM rooms r JOIN buildings b ON b.building_id = r.building_id
         WHERE r.allocated_to_group = ?1 ORDER BY r.room_id"
    ))?;
    let raw: Vec<RawRoom> = stmt
        .query_map(params![group_registration_id], raw_room)?
        .collect::<rusqlite::Result<_>>()?;
    build_rooms(conn, raw)
}

/// Loads the rooms of an event not reserved to any group.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn load_unreserved_rooms(
    conn: &Connection,
    event_id: i64,
) -> Result<Vec<RoomProfile>, PersistenceError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {ROOM_COLUMNS}
         FROM rooms r JOIN buildings b ON b.building_id = r.building_id
         WHERE b.event_id = ?1 AND r.allocated_to_group IS NULL ORDER BY r.room_id"
    ))?;
    let raw: Vec<RawRoom> = stmt
        .query_map(params![event_id], raw_room)?
        .collect::<rusqlite::Result<_>>()?;
    build_rooms(conn, raw)
}

/// Raw candidate row shared by the candidate-loading queries.
type RawCandidate = (i64, String, String, i64, Option<String>, String, Option<String>);

fn build_candidates(
    raw: Vec<RawCandidate>,
    individual: bool,
) -> Result<Vec<HousingCandidate>, PersistenceError> {
    let table: &'static str = if individual {
        "individual_registrations"
    } else {
        "participants"
    };
    let mut candidates: Vec<HousingCandidate> = Vec::with_capacity(raw.len());
    for (id, first, last, age, gender, ptype, parish) in raw {
        candidates.push(HousingCandidate {
            assignee: if individual {
                AssigneeRef::Individual(id)
            } else {
                AssigneeRef::Participant(id)
            },
            display_name: format!("{first} {last}"),
            gender: parse_optional::<Gender>(gender, table)?,
            age: to_u8(age, table)?,
            participant_type: parse_required::<ParticipantType>(&ptype, table)?,
            parish,
        });
    }
    Ok(candidates)
}

/// Loads one group's participants as housing candidates.
///
/// With `only_unassigned` set, participants holding an active assignment
/// are left out.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn load_group_candidates(
    conn: &Connection,
    group_registration_id: i64,
    only_unassigned: bool,
) -> Result<Vec<HousingCandidate>, PersistenceError> {
    let filter: &str = if only_unassigned {
        "AND p.participant_id NOT IN
            (SELECT participant_id FROM room_assignments WHERE participant_id IS NOT NULL)"
    } else {
        ""
    };
    let mut stmt = conn.prepare(&format!(
        "SELECT p.participant_id, p.first_name, p.last_name, p.age, p.gender,
                p.participant_type, g.parish_name
         FROM participants p
         JOIN group_registrations g ON g.group_registration_id = p.group_registration_id
         WHERE p.group_registration_id = ?1 AND g.status = 'active' {filter}
         ORDER BY p.participant_id"
    ))?;
    let raw: Vec<RawCandidate> = stmt
        .query_map(params![group_registration_id], |row| {
            Ok((
                row.get(0)?,
                row.get(1)?,
                row.get(2)?,
                row.get(3)?,
                row.get(4)?,
                row.get(5)?,
                row.get(6)?,
            ))
        })?
        .collect::<rusqlite::Result<_>>()?;
    build_candidates(raw, false)
}

/// Loads every unassigned group participant across an event's active
/// group registrations.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn load_unassigned_group_candidates(
    conn: &Connection,
    event_id: i64,
) -> Result<Vec<HousingCandidate>, PersistenceError> {
    let mut stmt = conn.prepare(
        "SELECT p.participant_id, p.first_name, p.last_name, p.age, p.gender,
                p.participant_type, g.parish_name
         FROM participants p
         JOIN group_registrations g ON g.group_registration_id = p.group_registration_id
         WHERE g.event_id = ?1 AND g.status = 'active'
           AND p.participant_id NOT IN
              (SELECT participant_id FROM room_assignments
               WHERE participant_id IS NOT NULL)
         ORDER BY p.participant_id",
    )?;
    let raw: Vec<RawCandidate> = stmt
        .query_map(params![event_id], |row| {
            Ok((
                row.get(0)?,
                row.get(1)?,
                row.get(2)?,
                row.get(3)?,
                row.get(4)?,
                row.get(5)?,
                row.get(6)?,
            ))
        })?
        .collect::<rusqlite::Result<_>>()?;
    build_candidates(raw, false)
}

/// Loads an event's active on-campus individual registrations as
/// housing candidates.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn load_individual_candidates(
    conn: &Connection,
    event_id: i64,
    only_unassigned: bool,
) -> Result<Vec<HousingCandidate>, PersistenceError> {
    let filter: &str = if only_unassigned {
        "AND i.individual_registration_id NOT IN
            (SELECT individual_registration_id FROM room_assignments
             WHERE individual_registration_id IS NOT NULL)"
    } else {
        ""
    };
    let mut stmt = conn.prepare(&format!(
        "SELECT i.individual_registration_id, i.first_name, i.last_name, i.age,
                i.gender, i.participant_type, NULL
         FROM individual_registrations i
         WHERE i.event_id = ?1 AND i.status = 'active'
           AND i.housing_type = 'on_campus' {filter}
         ORDER BY i.individual_registration_id"
    ))?;
    let raw: Vec<RawCandidate> = stmt
        .query_map(params![event_id], |row| {
            Ok((
                row.get(0)?,
                row.get(1)?,
                row.get(2)?,
                row.get(3)?,
                row.get(4)?,
                row.get(5)?,
                row.get(6)?,
            ))
        })?
        .collect::<rusqlite::Result<_>>()?;
    build_candidates(raw, true)
}

/// Aggregates ground-truth registration counts for one event.
///
/// Group registrations resolve through the bucketed-wins duality;
/// individual registrations count one head each, plus their room-type
/// choice when housed on campus.
///
/// # Errors
///
/// Returns an error if the database cannot be queried or a stored
/// record fails to parse.
pub fn actual_counts(conn: &Connection, event_id: i64) -> Result<ActualCounts, PersistenceError> {
    let mut housing: PartyCounts = PartyCounts::default();
    let mut room_types: RoomTypeCounts = RoomTypeCounts::default();

    type RawGroup = (String, i64, [Option<i64>; 6]);
    let mut stmt = conn.prepare(
        "SELECT housing_type, total_participants,
                on_campus_youth, on_campus_chaperones,
                off_campus_youth, off_campus_chaperones,
                day_pass_youth, day_pass_chaperones
         FROM group_registrations WHERE event_id = ?1 AND status = 'active'",
    )?;
    let groups: Vec<RawGroup> = stmt
        .query_map(params![event_id], |row| {
            Ok((
                row.get(0)?,
                row.get(1)?,
                [
                    row.get(2)?,
                    row.get(3)?,
                    row.get(4)?,
                    row.get(5)?,
                    row.get(6)?,
                    row.get(7)?,
                ],
            ))
        })?
        .collect::<rusqlite::Result<_>>()?;

    for (housing_type, total, buckets) in groups {
        let bucket = |value: Option<i64>| -> Result<Option<u32>, PersistenceError> {
            value.map(|v| to_u32(v, "group_registrations")).transpose()
        };
        let breakdown: HousingBreakdown = HousingBreakdown {
            on_campus_youth: bucket(buckets[0])?,
            on_campus_chaperones: bucket(buckets[1])?,
            off_campus_youth: bucket(buckets[2])?,
            off_campus_chaperones: bucket(buckets[3])?,
            day_pass_youth: bucket(buckets[4])?,
            day_pass_chaperones: bucket(buckets[5])?,
        };
        let coarse: HousingType = parse_required::<HousingType>(&housing_type, "group_registrations")?;
        let counts: PartyCounts = bunkhouse_domain::party_counts(
            &breakdown,
            coarse,
            to_u32(total, "group_registrations")?,
        );
        housing.on_campus += counts.on_campus;
        housing.off_campus += counts.off_campus;
        housing.day_pass += counts.day_pass;
    }

    let mut stmt = conn.prepare(
        "SELECT housing_type, room_type FROM individual_registrations
         WHERE event_id = ?1 AND status = 'active'",
    )?;
    let individuals: Vec<(String, Option<String>)> = stmt
        .query_map(params![event_id], |row| {
            Ok((row.get(0)?, row.get(1)?))
        })?
        .collect::<rusqlite::Result<_>>()?;

    for (housing_type, room_type) in individuals {
        let coarse: HousingType =
            parse_required::<HousingType>(&housing_type, "individual_registrations")?;
        match coarse {
            HousingType::OnCampus => housing.on_campus += 1,
            HousingType::OffCampus => housing.off_campus += 1,
            HousingType::DayPass => housing.day_pass += 1,
        }
        if coarse == HousingType::OnCampus
            && let Some(room_type) =
                parse_optional::<RoomType>(room_type, "individual_registrations")?
        {
            match room_type {
                RoomType::Single => room_types.single += 1,
                RoomType::Double => room_types.double += 1,
                RoomType::Triple => room_types.triple += 1,
                RoomType::Quad => room_types.quad += 1,
            }
        }
    }

    Ok(ActualCounts {
        housing,
        room_types,
    })
}

/// Lists the active assignments in one room, bed order first.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn list_room_assignments(
    conn: &Connection,
    room_id: i64,
) -> Result<Vec<AssignmentRecord>, PersistenceError> {
    let mut stmt = conn.prepare(
        "SELECT assignment_id, room_id, participant_id, individual_registration_id,
                bed_number, assigned_at
         FROM room_assignments WHERE room_id = ?1
         ORDER BY bed_number IS NULL, bed_number, assignment_id",
    )?;
    let raw: Vec<(i64, i64, Option<i64>, Option<i64>, Option<i64>, String)> = stmt
        .query_map(params![room_id], |row| {
            Ok((
                row.get(0)?,
                row.get(1)?,
                row.get(2)?,
                row.get(3)?,
                row.get(4)?,
                row.get(5)?,
            ))
        })?
        .collect::<rusqlite::Result<_>>()?;

    let mut records: Vec<AssignmentRecord> = Vec::with_capacity(raw.len());
    for (assignment_id, room_id, participant_id, individual_registration_id, bed, assigned_at) in
        raw
    {
        records.push(AssignmentRecord {
            assignment_id,
            room_id,
            participant_id,
            individual_registration_id,
            bed_number: bed.map(|b| to_u32(b, "room_assignments")).transpose()?,
            assigned_at,
        });
    }
    Ok(records)
}
