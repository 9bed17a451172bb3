// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use bunkhouse::{CapacityDenial, CoreError};
use bunkhouse_domain::{CapacityCheck, DomainError};
use bunkhouse_persistence::PersistenceError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The supplied role string is not a known role.
    UnknownRole {
        /// The role that was supplied.
        role: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownRole { role } => write!(f, "Unknown role: {role}"),
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain, core, and persistence errors and
/// represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authorization failed; the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A capacity dimension denied the party.
    CapacityExceeded {
        /// The dimension that denied the party.
        dimension: String,
        /// Spots still available in that dimension.
        remaining: u32,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The request conflicts with the current state of the resource.
    Conflict {
        /// A human-readable description of the conflict.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::CapacityExceeded {
                dimension,
                remaining,
            } => {
                write!(
                    f,
                    "Capacity exceeded on {dimension}: {remaining} spots remaining"
                )
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Conflict { message } => write!(f, "Conflict: {message}"),
            Self::Internal { message } => write!(f, "Internal error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::UnknownRole { role } => Self::InvalidInput {
                field: String::from("actor_role"),
                message: format!("unknown role '{role}'"),
            },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        let field: &'static str = match &error {
            DomainError::InvalidHousingType(_) => "housing_type",
            DomainError::InvalidRoomType(_) => "room_type",
            DomainError::InvalidGender(_) => "gender",
            DomainError::InvalidParticipantType(_) => "participant_type",
            DomainError::InvalidRoomCategoryTag(_) => "housing_type_tag",
            DomainError::EmptyName { field } | DomainError::InvalidCount { field, .. } => *field,
            DomainError::InconsistentBreakdown { .. } => "total_participants",
            DomainError::RoomTypeNotApplicable { .. } => "room_type",
        };
        Self::InvalidInput {
            field: field.to_string(),
            message: error.to_string(),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::DomainViolation(domain_error) => domain_error.into(),
            CoreError::UnknownStrategy(strategy) => Self::InvalidInput {
                field: String::from("strategy"),
                message: format!("unknown strategy '{strategy}'"),
            },
        }
    }
}

impl From<CapacityDenial> for ApiError {
    fn from(denial: CapacityDenial) -> Self {
        let remaining: u32 = match denial.check {
            CapacityCheck::InsufficientSpots { remaining } => remaining,
            CapacityCheck::Ok | CapacityCheck::NoSpots => 0,
        };
        Self::CapacityExceeded {
            dimension: denial.dimension.to_string(),
            remaining,
        }
    }
}

impl From<PersistenceError> for ApiError {
    fn from(error: PersistenceError) -> Self {
        match error {
            PersistenceError::EventNotFound(id) => Self::ResourceNotFound {
                resource_type: String::from("Event"),
                message: format!("event {id}"),
            },
            PersistenceError::GroupRegistrationNotFound(id) => Self::ResourceNotFound {
                resource_type: String::from("Group registration"),
                message: format!("group registration {id}"),
            },
            PersistenceError::IndividualRegistrationNotFound(id) => Self::ResourceNotFound {
                resource_type: String::from("Individual registration"),
                message: format!("individual registration {id}"),
            },
            PersistenceError::RoomNotFound(id) => Self::ResourceNotFound {
                resource_type: String::from("Room"),
                message: format!("room {id}"),
            },
            PersistenceError::RegistrationNotActive(id) => Self::Conflict {
                message: format!("registration {id} is not active"),
            },
            other => Self::Internal {
                message: other.to_string(),
            },
        }
    }
}
