// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Schema initialization for the `SQLite` backend.
//!
//! Remaining-capacity counters live alongside their ceilings in
//! `events` and `event_settings` rather than in a separate ledger
//! table. The uniqueness constraints on `room_assignments` are the
//! concurrency backstop: a racing double-book surfaces as a constraint
//! violation, which the allocation path converts to a skipped item.

use rusqlite::Connection;
use tracing::info;

use crate::error::PersistenceError;

/// The schema DDL, one statement batch.
const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS events (
    event_id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    capacity_total INTEGER,
    capacity_remaining INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS event_settings (
    event_settings_id INTEGER PRIMARY KEY AUTOINCREMENT,
    event_id INTEGER NOT NULL UNIQUE REFERENCES events(event_id) ON DELETE CASCADE,
    on_campus_capacity INTEGER,
    on_campus_remaining INTEGER NOT NULL DEFAULT 0,
    off_campus_capacity INTEGER,
    off_campus_remaining INTEGER NOT NULL DEFAULT 0,
    day_pass_capacity INTEGER,
    day_pass_remaining INTEGER NOT NULL DEFAULT 0,
    single_capacity INTEGER,
    single_remaining INTEGER NOT NULL DEFAULT 0,
    double_capacity INTEGER,
    double_remaining INTEGER NOT NULL DEFAULT 0,
    triple_capacity INTEGER,
    triple_remaining INTEGER NOT NULL DEFAULT 0,
    quad_capacity INTEGER,
    quad_remaining INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS group_registrations (
    group_registration_id INTEGER PRIMARY KEY AUTOINCREMENT,
    event_id INTEGER NOT NULL REFERENCES events(event_id),
    group_name TEXT NOT NULL,
    parish_name TEXT,
    housing_type TEXT NOT NULL,
    total_participants INTEGER NOT NULL,
    on_campus_youth INTEGER,
    on_campus_chaperones INTEGER,
    off_campus_youth INTEGER,
    off_campus_chaperones INTEGER,
    day_pass_youth INTEGER,
    day_pass_chaperones INTEGER,
    status TEXT NOT NULL DEFAULT 'active',
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS individual_registrations (
    individual_registration_id INTEGER PRIMARY KEY AUTOINCREMENT,
    event_id INTEGER NOT NULL REFERENCES events(event_id),
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    age INTEGER NOT NULL,
    gender TEXT,
    participant_type TEXT NOT NULL,
    housing_type TEXT NOT NULL,
    room_type TEXT,
    status TEXT NOT NULL DEFAULT 'active',
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS participants (
    participant_id INTEGER PRIMARY KEY AUTOINCREMENT,
    group_registration_id INTEGER NOT NULL
        REFERENCES group_registrations(group_registration_id) ON DELETE CASCADE,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    age INTEGER NOT NULL,
    gender TEXT,
    participant_type TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS buildings (
    building_id INTEGER PRIMARY KEY AUTOINCREMENT,
    event_id INTEGER NOT NULL REFERENCES events(event_id) ON DELETE CASCADE,
    name TEXT NOT NULL,
    gender TEXT
);

CREATE TABLE IF NOT EXISTS rooms (
    room_id INTEGER PRIMARY KEY AUTOINCREMENT,
    building_id INTEGER NOT NULL REFERENCES buildings(building_id) ON DELETE CASCADE,
    name TEXT NOT NULL,
    capacity INTEGER NOT NULL,
    current_occupancy INTEGER NOT NULL DEFAULT 0,
    gender TEXT,
    housing_type_tag TEXT,
    is_available INTEGER NOT NULL DEFAULT 1,
    allocated_to_group INTEGER
        REFERENCES group_registrations(group_registration_id) ON DELETE SET NULL
);

CREATE TABLE IF NOT EXISTS room_assignments (
    assignment_id INTEGER PRIMARY KEY AUTOINCREMENT,
    room_id INTEGER NOT NULL REFERENCES rooms(room_id) ON DELETE CASCADE,
    participant_id INTEGER
        REFERENCES participants(participant_id) ON DELETE CASCADE,
    individual_registration_id INTEGER
        REFERENCES individual_registrations(individual_registration_id) ON DELETE CASCADE,
    bed_number INTEGER,
    assigned_at TEXT NOT NULL,
    CHECK ((participant_id IS NULL) <> (individual_registration_id IS NULL)),
    UNIQUE (room_id, bed_number),
    UNIQUE (participant_id),
    UNIQUE (individual_registration_id)
);

CREATE INDEX IF NOT EXISTS idx_participants_group
    ON participants(group_registration_id);
CREATE INDEX IF NOT EXISTS idx_rooms_building ON rooms(building_id);
CREATE INDEX IF NOT EXISTS idx_rooms_allocated ON rooms(allocated_to_group);
CREATE INDEX IF NOT EXISTS idx_assignments_room ON room_assignments(room_id);
";

/// Creates all tables and indexes if they do not exist.
///
/// # Errors
///
/// Returns an error if any DDL statement fails.
pub fn initialize_schema(conn: &Connection) -> Result<(), PersistenceError> {
    conn.execute_batch(SCHEMA)?;
    info!("Schema initialized");
    Ok(())
}

/// Verifies that foreign key enforcement is enabled.
///
/// Referential integrity (e.g., assignments vanishing with their
/// participants) depends on it, so startup fails hard when it is off.
///
/// # Errors
///
/// Returns `ForeignKeyEnforcementNotEnabled` if the pragma reports
/// foreign keys off.
pub fn verify_foreign_key_enforcement(conn: &Connection) -> Result<(), PersistenceError> {
    let foreign_keys_enabled: i32 =
        conn.query_row("PRAGMA foreign_keys", [], |row| row.get(0))?;

    if foreign_keys_enabled == 0 {
        return Err(PersistenceError::ForeignKeyEnforcementNotEnabled);
    }

    info!("Foreign key enforcement is enabled");
    Ok(())
}
