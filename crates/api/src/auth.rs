// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Actor roles and per-action authorization checks.

use std::str::FromStr;

use crate::error::AuthError;

/// Actor roles for authorization.
///
/// Roles apply to the operators driving the system, never to the
/// registered participants they enter data for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Full structural and corrective authority: event setup,
    /// registrations, allocation runs, and capacity recalculation.
    Admin,
    /// Registration desk authority: create and cancel registrations,
    /// run room allocation.
    Coordinator,
    /// Read-only access to rooms and rosters.
    Viewer,
}

impl Role {
    /// Converts this role to its wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Coordinator => "coordinator",
            Self::Viewer => "viewer",
        }
    }
}

impl FromStr for Role {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "coordinator" => Ok(Self::Coordinator),
            "viewer" => Ok(Self::Viewer),
            other => Err(AuthError::UnknownRole {
                role: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An authenticated actor with an associated role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The unique identifier for this actor.
    pub id: i64,
    /// The role assigned to this actor.
    pub role: Role,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    #[must_use]
    pub const fn new(id: i64, role: Role) -> Self {
        Self { id, role }
    }
}

/// Authorization service for enforcing role-based access control.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks if an actor may create events.
    ///
    /// Only Admin actors may create events.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_manage_events(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        match actor.role {
            Role::Admin => Ok(()),
            Role::Coordinator | Role::Viewer => Err(AuthError::Unauthorized {
                action: String::from("manage_events"),
                required_role: String::from("admin"),
            }),
        }
    }

    /// Checks if an actor may create or cancel registrations.
    ///
    /// Admin and Coordinator actors may manage registrations.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor has only the Viewer role.
    pub fn authorize_manage_registrations(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        match actor.role {
            Role::Admin | Role::Coordinator => Ok(()),
            Role::Viewer => Err(AuthError::Unauthorized {
                action: String::from("manage_registrations"),
                required_role: String::from("coordinator"),
            }),
        }
    }

    /// Checks if an actor may run room allocation or reserve rooms.
    ///
    /// Admin and Coordinator actors may run allocation.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor has only the Viewer role.
    pub fn authorize_allocation(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        match actor.role {
            Role::Admin | Role::Coordinator => Ok(()),
            Role::Viewer => Err(AuthError::Unauthorized {
                action: String::from("allocate_rooms"),
                required_role: String::from("coordinator"),
            }),
        }
    }

    /// Checks if an actor may recalculate capacity counters.
    ///
    /// Recalculation is a corrective action; only Admin actors may run
    /// it.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_recalculate(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        match actor.role {
            Role::Admin => Ok(()),
            Role::Coordinator | Role::Viewer => Err(AuthError::Unauthorized {
                action: String::from("recalculate"),
                required_role: String::from("admin"),
            }),
        }
    }
}
