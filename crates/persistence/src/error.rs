// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A database error occurred.
    DatabaseError(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Initialization error.
    InitializationError(String),
    /// Foreign key enforcement is not enabled.
    ForeignKeyEnforcementNotEnabled,
    /// The requested event was not found.
    EventNotFound(i64),
    /// The requested group registration was not found.
    GroupRegistrationNotFound(i64),
    /// The requested individual registration was not found.
    IndividualRegistrationNotFound(i64),
    /// The requested room was not found.
    RoomNotFound(i64),
    /// The registration is not active (already cancelled).
    RegistrationNotActive(i64),
    /// A stored record failed to parse back into its domain type.
    InvalidRecord {
        /// The table holding the record.
        table: &'static str,
        /// What failed to parse.
        message: String,
    },
    /// The requested resource was not found.
    NotFound(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "Foreign key enforcement is not enabled")
            }
            Self::EventNotFound(id) => write!(f, "Event not found: {id}"),
            Self::GroupRegistrationNotFound(id) => {
                write!(f, "Group registration not found: {id}")
            }
            Self::IndividualRegistrationNotFound(id) => {
                write!(f, "Individual registration not found: {id}")
            }
            Self::RoomNotFound(id) => write!(f, "Room not found: {id}"),
            Self::RegistrationNotActive(id) => {
                write!(f, "Registration {id} is not active")
            }
            Self::InvalidRecord { table, message } => {
                write!(f, "Invalid record in table '{table}': {message}")
            }
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<rusqlite::Error> for PersistenceError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::QueryReturnedNoRows => {
                Self::NotFound("Record not found".to_string())
            }
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}
