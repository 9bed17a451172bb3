// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! SQLite persistence for the registration and housing store.
//!
//! All state lives in one SQLite database. Counter columns are only
//! ever touched through clamped single-statement updates, and bed
//! assignments through short transactions backed by uniqueness
//! constraints, so the store stays consistent under concurrent
//! writers.

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

mod error;
mod mutations;
mod queries;
mod records;
mod schema;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;
pub use mutations::{AssignmentOutcome, RoomAllocationOutcome, RoomConflict};
pub use records::{
    AssignmentRecord, EventRecord, GroupRegistrationRecord, IndividualRegistrationRecord,
    NewBuilding, NewEvent, NewGroupRegistration, NewIndividualRegistration, NewRoom,
    RegistrationStatus,
};

use rusqlite::Connection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

use bunkhouse::{ActualCounts, AssigneeRef, CapacitySettings, HousingCandidate, PlannedAssignment};
use bunkhouse_domain::{PartyCounts, RoomProfile, RoomType};

/// Counter used to give each in-memory database a unique name so
/// parallel tests do not share state.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// A SQLite-backed store for events, registrations, rooms, and bed
/// assignments.
#[derive(Debug)]
pub struct SqlitePersistence {
    connection: Connection,
}

impl SqlitePersistence {
    /// Opens a uniquely named shared-cache in-memory database and
    /// initializes the schema.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or the schema
    /// cannot be applied.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let uri: String = format!("file:memdb_bunkhouse_{id}?mode=memory&cache=shared");
        let connection: Connection = Connection::open(uri)
            .map_err(|e| PersistenceError::DatabaseConnectionFailed(e.to_string()))?;
        Self::initialize(connection)
    }

    /// Opens (or creates) a database file in WAL mode and initializes
    /// the schema.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or the schema
    /// cannot be applied.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let connection: Connection = Connection::open(path)
            .map_err(|e| PersistenceError::DatabaseConnectionFailed(e.to_string()))?;
        connection
            .pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| PersistenceError::InitializationError(e.to_string()))?;
        Self::initialize(connection)
    }

    fn initialize(connection: Connection) -> Result<Self, PersistenceError> {
        connection
            .pragma_update(None, "foreign_keys", "ON")
            .map_err(|e| PersistenceError::InitializationError(e.to_string()))?;
        schema::initialize_schema(&connection)?;
        schema::verify_foreign_key_enforcement(&connection)?;
        info!("persistence initialized");
        Ok(Self { connection })
    }

    /// Creates an event together with its capacity settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_event(&self, event: &NewEvent) -> Result<i64, PersistenceError> {
        mutations::create_event(&self.connection, event)
    }

    /// Creates a building under an event.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_building(&self, building: &NewBuilding) -> Result<i64, PersistenceError> {
        mutations::create_building(&self.connection, building)
    }

    /// Creates a room under a building.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_room(&self, room: &NewRoom) -> Result<i64, PersistenceError> {
        mutations::create_room(&self.connection, room)
    }

    /// Fetches one event.
    ///
    /// # Errors
    ///
    /// Returns `EventNotFound` if no such event exists.
    pub fn get_event(&self, event_id: i64) -> Result<EventRecord, PersistenceError> {
        queries::get_event(&self.connection, event_id)
    }

    /// Loads the capacity ledger snapshot for one event.
    ///
    /// # Errors
    ///
    /// Returns `EventNotFound` if the event does not exist.
    pub fn get_capacity_settings(
        &self,
        event_id: i64,
    ) -> Result<CapacitySettings, PersistenceError> {
        queries::get_capacity_settings(&self.connection, event_id)
    }

    /// Fetches one group registration.
    ///
    /// # Errors
    ///
    /// Returns `GroupRegistrationNotFound` if no such registration
    /// exists.
    pub fn get_group_registration(
        &self,
        group_registration_id: i64,
    ) -> Result<GroupRegistrationRecord, PersistenceError> {
        queries::get_group_registration(&self.connection, group_registration_id)
    }

    /// Fetches one individual registration.
    ///
    /// # Errors
    ///
    /// Returns `IndividualRegistrationNotFound` if no such registration
    /// exists.
    pub fn get_individual_registration(
        &self,
        individual_registration_id: i64,
    ) -> Result<IndividualRegistrationRecord, PersistenceError> {
        queries::get_individual_registration(&self.connection, individual_registration_id)
    }

    /// Inserts a group registration with its participant roster.
    ///
    /// # Errors
    ///
    /// Returns an error if any insert fails.
    pub fn insert_group_registration(
        &mut self,
        registration: &NewGroupRegistration,
    ) -> Result<i64, PersistenceError> {
        mutations::insert_group_registration(&mut self.connection, registration)
    }

    /// Inserts an individual registration.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_individual_registration(
        &self,
        registration: &NewIndividualRegistration,
    ) -> Result<i64, PersistenceError> {
        mutations::insert_individual_registration(&self.connection, registration)
    }

    /// Consumes ledger spots for a party, clamped at zero.
    ///
    /// # Errors
    ///
    /// Returns an error if a statement fails.
    pub fn decrement_for_party(
        &self,
        event_id: i64,
        counts: &PartyCounts,
        room_type: Option<RoomType>,
    ) -> Result<(), PersistenceError> {
        mutations::decrement_for_party(&self.connection, event_id, counts, room_type)
    }

    /// Returns ledger spots for a party, clamped at capacity.
    ///
    /// # Errors
    ///
    /// Returns an error if a statement fails.
    pub fn increment_for_party(
        &self,
        event_id: i64,
        counts: &PartyCounts,
        room_type: Option<RoomType>,
    ) -> Result<(), PersistenceError> {
        mutations::increment_for_party(&self.connection, event_id, counts, room_type)
    }

    /// Overwrites every bounded remaining counter with reconciled
    /// values.
    ///
    /// # Errors
    ///
    /// Returns an error if a statement fails.
    pub fn overwrite_capacity(
        &self,
        event_id: i64,
        settings: &CapacitySettings,
    ) -> Result<(), PersistenceError> {
        mutations::overwrite_capacity(&self.connection, event_id, settings)
    }

    /// Aggregates ground-truth registration counts for one event.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried.
    pub fn actual_counts(&self, event_id: i64) -> Result<ActualCounts, PersistenceError> {
        queries::actual_counts(&self.connection, event_id)
    }

    /// Loads every room of one event.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried.
    pub fn load_event_rooms(&self, event_id: i64) -> Result<Vec<RoomProfile>, PersistenceError> {
        queries::load_event_rooms(&self.connection, event_id)
    }

    /// Loads the rooms reserved to one group.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried.
    pub fn load_group_rooms(
        &self,
        group_registration_id: i64,
    ) -> Result<Vec<RoomProfile>, PersistenceError> {
        queries::load_group_rooms(&self.connection, group_registration_id)
    }

    /// Loads the rooms of an event not reserved to any group.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried.
    pub fn load_unreserved_rooms(
        &self,
        event_id: i64,
    ) -> Result<Vec<RoomProfile>, PersistenceError> {
        queries::load_unreserved_rooms(&self.connection, event_id)
    }

    /// Loads one group's participants as housing candidates.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried.
    pub fn load_group_candidates(
        &self,
        group_registration_id: i64,
        only_unassigned: bool,
    ) -> Result<Vec<HousingCandidate>, PersistenceError> {
        queries::load_group_candidates(&self.connection, group_registration_id, only_unassigned)
    }

    /// Loads every unassigned group participant across an event's
    /// active group registrations.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried.
    pub fn load_unassigned_group_candidates(
        &self,
        event_id: i64,
    ) -> Result<Vec<HousingCandidate>, PersistenceError> {
        queries::load_unassigned_group_candidates(&self.connection, event_id)
    }

    /// Loads an event's active on-campus individual registrations as
    /// housing candidates.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried.
    pub fn load_individual_candidates(
        &self,
        event_id: i64,
        only_unassigned: bool,
    ) -> Result<Vec<HousingCandidate>, PersistenceError> {
        queries::load_individual_candidates(&self.connection, event_id, only_unassigned)
    }

    /// Lists the assignments in one room.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried.
    pub fn list_room_assignments(
        &self,
        room_id: i64,
    ) -> Result<Vec<AssignmentRecord>, PersistenceError> {
        queries::list_room_assignments(&self.connection, room_id)
    }

    /// Reserves a batch of rooms to a group, all or nothing.
    ///
    /// # Errors
    ///
    /// Returns `RoomNotFound` for an unknown room id.
    pub fn allocate_rooms_to_group(
        &mut self,
        group_registration_id: i64,
        room_ids: &[i64],
    ) -> Result<RoomAllocationOutcome, PersistenceError> {
        mutations::allocate_rooms_to_group(&mut self.connection, group_registration_id, room_ids)
    }

    /// Clears every room reservation held by a group.
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails.
    pub fn release_group_rooms(
        &self,
        group_registration_id: i64,
    ) -> Result<usize, PersistenceError> {
        mutations::release_group_rooms(&self.connection, group_registration_id)
    }

    /// Applies one planned bed assignment.
    ///
    /// # Errors
    ///
    /// Returns an error only for genuine database failures.
    pub fn apply_assignment(
        &mut self,
        assignment: &PlannedAssignment,
    ) -> Result<AssignmentOutcome, PersistenceError> {
        mutations::apply_assignment(&mut self.connection, assignment)
    }

    /// Deletes the bed assignments of the named assignees.
    ///
    /// # Errors
    ///
    /// Returns an error if a statement fails.
    pub fn release_assignments_for(
        &mut self,
        assignees: &[AssigneeRef],
    ) -> Result<usize, PersistenceError> {
        mutations::release_assignments_for(&mut self.connection, assignees)
    }

    /// Cancels a group registration, releasing its beds, rooms, and
    /// ledger spots.
    ///
    /// # Errors
    ///
    /// Returns `GroupRegistrationNotFound` or `RegistrationNotActive`.
    pub fn cancel_group_registration(
        &mut self,
        group_registration_id: i64,
    ) -> Result<GroupRegistrationRecord, PersistenceError> {
        mutations::cancel_group_registration(&mut self.connection, group_registration_id)
    }

    /// Cancels an individual registration, releasing its bed and
    /// ledger spots.
    ///
    /// # Errors
    ///
    /// Returns `IndividualRegistrationNotFound` or
    /// `RegistrationNotActive`.
    pub fn cancel_individual_registration(
        &mut self,
        individual_registration_id: i64,
    ) -> Result<IndividualRegistrationRecord, PersistenceError> {
        mutations::cancel_individual_registration(&mut self.connection, individual_registration_id)
    }
}
