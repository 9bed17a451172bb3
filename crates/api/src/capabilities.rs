// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Capability computation for authorization-aware UI gating.
//!
//! Capabilities expose what actions an operator is permitted to perform
//! without leaking domain internals. They are advisory only and do not
//! replace the handler-level authorization checks.

use crate::auth::Role;
use crate::request_response::{Capability, GlobalCapabilities};

/// Computes global capabilities for a role.
///
/// Capabilities here depend only on the role; there is no per-target
/// state to consult.
#[must_use]
pub const fn compute_global_capabilities(role: Role) -> GlobalCapabilities {
    match role {
        Role::Admin => GlobalCapabilities {
            can_manage_events: Capability::Allowed,
            can_manage_registrations: Capability::Allowed,
            can_run_allocation: Capability::Allowed,
            can_recalculate: Capability::Allowed,
        },
        Role::Coordinator => GlobalCapabilities {
            can_manage_events: Capability::Denied,
            can_manage_registrations: Capability::Allowed,
            can_run_allocation: Capability::Allowed,
            can_recalculate: Capability::Denied,
        },
        Role::Viewer => GlobalCapabilities {
            can_manage_events: Capability::Denied,
            can_manage_registrations: Capability::Denied,
            can_run_allocation: Capability::Denied,
            can_recalculate: Capability::Denied,
        },
    }
}
