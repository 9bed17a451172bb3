// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The top-level lodging category for a registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HousingType {
    /// Housed in event-managed rooms on campus.
    OnCampus,
    /// Participants arrange their own lodging off campus.
    OffCampus,
    /// Attending during the day only, no lodging.
    DayPass,
}

impl HousingType {
    /// Converts this housing type to its wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OnCampus => "on_campus",
            Self::OffCampus => "off_campus",
            Self::DayPass => "day_pass",
        }
    }

    /// All housing types, in ledger-column order.
    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::OnCampus, Self::OffCampus, Self::DayPass]
    }
}

impl FromStr for HousingType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "on_campus" => Ok(Self::OnCampus),
            "off_campus" => Ok(Self::OffCampus),
            "day_pass" => Ok(Self::DayPass),
            _ => Err(DomainError::InvalidHousingType(s.to_string())),
        }
    }
}

impl std::fmt::Display for HousingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The bed configuration of an on-campus room choice.
///
/// Room-type capacity is tracked only for on-campus individual
/// registrations; day-pass and off-campus registrations ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomType {
    /// One bed.
    Single,
    /// Two beds.
    Double,
    /// Three beds.
    Triple,
    /// Four beds.
    Quad,
}

impl RoomType {
    /// Converts this room type to its wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Double => "double",
            Self::Triple => "triple",
            Self::Quad => "quad",
        }
    }

    /// The number of beds this configuration holds.
    #[must_use]
    pub const fn bed_count(&self) -> u32 {
        match self {
            Self::Single => 1,
            Self::Double => 2,
            Self::Triple => 3,
            Self::Quad => 4,
        }
    }

    /// All room types, in ledger-column order.
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [Self::Single, Self::Double, Self::Triple, Self::Quad]
    }
}

impl FromStr for RoomType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single" => Ok(Self::Single),
            "double" => Ok(Self::Double),
            "triple" => Ok(Self::Triple),
            "quad" => Ok(Self::Quad),
            _ => Err(DomainError::InvalidRoomType(s.to_string())),
        }
    }
}

impl std::fmt::Display for RoomType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A participant's recorded gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    /// Recorded but not mappable to a gendered housing category.
    Other,
}

impl Gender {
    /// Converts this gender to its wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
        }
    }
}

impl FromStr for Gender {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            "other" => Ok(Self::Other),
            _ => Err(DomainError::InvalidGender(s.to_string())),
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A participant's age/role classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParticipantType {
    /// Youth under 18.
    YouthU18,
    /// Youth 18 or older; housed with chaperones.
    YouthO18,
    /// Adult chaperone.
    Chaperone,
    /// Clergy; never housed by the allocation engine.
    Priest,
}

impl ParticipantType {
    /// Converts this participant type to its wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::YouthU18 => "youth_u18",
            Self::YouthO18 => "youth_o18",
            Self::Chaperone => "chaperone",
            Self::Priest => "priest",
        }
    }
}

impl FromStr for ParticipantType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "youth_u18" => Ok(Self::YouthU18),
            "youth_o18" => Ok(Self::YouthO18),
            "chaperone" => Ok(Self::Chaperone),
            "priest" => Ok(Self::Priest),
            _ => Err(DomainError::InvalidParticipantType(s.to_string())),
        }
    }
}

impl std::fmt::Display for ParticipantType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The allocation-engine housing category.
///
/// Categories are the unit of match between participants and rooms. The
/// four categories are mutually exclusive: a room serves exactly one
/// category (or none), so categories never compete for the same room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HousingCategory {
    MaleYouth,
    FemaleYouth,
    MaleChaperone,
    FemaleChaperone,
}

impl HousingCategory {
    /// Converts this category to its wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MaleYouth => "male_youth",
            Self::FemaleYouth => "female_youth",
            Self::MaleChaperone => "male_chaperone",
            Self::FemaleChaperone => "female_chaperone",
        }
    }

    /// The gender side of this category.
    #[must_use]
    pub const fn gender(&self) -> Gender {
        match self {
            Self::MaleYouth | Self::MaleChaperone => Gender::Male,
            Self::FemaleYouth | Self::FemaleChaperone => Gender::Female,
        }
    }

    /// Whether this is a youth (under-18) category.
    #[must_use]
    pub const fn is_youth(&self) -> bool {
        matches!(self, Self::MaleYouth | Self::FemaleYouth)
    }

    /// All four categories, in processing order.
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [
            Self::MaleYouth,
            Self::FemaleYouth,
            Self::MaleChaperone,
            Self::FemaleChaperone,
        ]
    }
}

impl std::fmt::Display for HousingCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The housing-type tag recorded on a room.
///
/// Tags describe the population a room is intended for, independent of
/// the room's gender restriction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomCategoryTag {
    /// Reserved for under-18 youth.
    YouthU18,
    /// Reserved for adults (chaperones and 18+ youth).
    Chaperone18Plus,
    /// No population restriction; treated as chaperone housing.
    General,
    /// Reserved for clergy; never touched by the allocation engine.
    Clergy,
}

impl RoomCategoryTag {
    /// Converts this tag to its wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::YouthU18 => "youth_u18",
            Self::Chaperone18Plus => "chaperone_18plus",
            Self::General => "general",
            Self::Clergy => "clergy",
        }
    }
}

impl FromStr for RoomCategoryTag {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "youth_u18" => Ok(Self::YouthU18),
            "chaperone_18plus" => Ok(Self::Chaperone18Plus),
            "general" => Ok(Self::General),
            "clergy" => Ok(Self::Clergy),
            _ => Err(DomainError::InvalidRoomCategoryTag(s.to_string())),
        }
    }
}

impl std::fmt::Display for RoomCategoryTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A participant record as the allocation engine sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// The canonical numeric identifier assigned by the database.
    /// `None` indicates the participant has not been persisted yet.
    pub participant_id: Option<i64>,
    /// The participant's first name.
    pub first_name: String,
    /// The participant's last name.
    pub last_name: String,
    /// Age in whole years.
    pub age: u8,
    /// Recorded gender, if any. Missing gender makes a participant
    /// unclassifiable for housing purposes.
    pub gender: Option<Gender>,
    /// Age/role classification.
    pub participant_type: ParticipantType,
}

impl Participant {
    /// Creates a new, not-yet-persisted participant.
    #[must_use]
    pub const fn new(
        first_name: String,
        last_name: String,
        age: u8,
        gender: Option<Gender>,
        participant_type: ParticipantType,
    ) -> Self {
        Self {
            participant_id: None,
            first_name,
            last_name,
            age,
            gender,
            participant_type,
        }
    }
}

/// A snapshot of one room as loaded for classification and allocation.
///
/// `building_gender` carries the owning building's restriction so room
/// classification can fall back to it when the room itself is ungendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomProfile {
    /// The canonical numeric identifier assigned by the database.
    pub room_id: i64,
    /// The owning building.
    pub building_id: i64,
    /// Display name (e.g., "Hall B 204").
    pub name: String,
    /// Total bed count.
    pub capacity: u32,
    /// Count of active assignments referencing this room.
    pub current_occupancy: u32,
    /// Room-level gender restriction, if any.
    pub gender: Option<Gender>,
    /// Building-level gender restriction, if any.
    pub building_gender: Option<Gender>,
    /// Population tag, if any.
    pub tag: Option<RoomCategoryTag>,
    /// Whether the room is open for assignment at all.
    pub is_available: bool,
    /// Exclusive group reservation, if any.
    pub allocated_to_group: Option<i64>,
    /// Bed numbers already taken by active assignments, 1-indexed.
    pub occupied_beds: Vec<u32>,
}

impl RoomProfile {
    /// The effective gender restriction: the room's own, falling back to
    /// the building's.
    #[must_use]
    pub const fn effective_gender(&self) -> Option<Gender> {
        match self.gender {
            Some(g) => Some(g),
            None => self.building_gender,
        }
    }

    /// Beds not yet taken.
    #[must_use]
    pub const fn free_beds(&self) -> u32 {
        self.capacity.saturating_sub(self.current_occupancy)
    }
}
