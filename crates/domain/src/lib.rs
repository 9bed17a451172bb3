// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod capacity;
mod classify;
mod error;
mod party;
mod types;

#[cfg(test)]
mod tests;

pub use capacity::{Capacity, CapacityCheck, CapacityDimension};
pub use classify::{Classification, ExclusionReason, classify_participant, classify_room};
pub use error::DomainError;
pub use party::{HousingBreakdown, PartyCounts, party_counts};
pub use types::{
    Gender, HousingCategory, HousingType, Participant, ParticipantType, RoomCategoryTag,
    RoomProfile, RoomType,
};
