// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Housing type string is not recognized.
    InvalidHousingType(String),
    /// Room type string is not recognized.
    InvalidRoomType(String),
    /// Gender string is not recognized.
    InvalidGender(String),
    /// Participant type string is not recognized.
    InvalidParticipantType(String),
    /// Room category tag string is not recognized.
    InvalidRoomCategoryTag(String),
    /// A name field is empty.
    EmptyName {
        /// The field that was empty.
        field: &'static str,
    },
    /// A capacity or count value is out of range.
    InvalidCount {
        /// The field that was invalid.
        field: &'static str,
        /// The offending value.
        value: i64,
    },
    /// Bucketed housing counts disagree with the declared total.
    InconsistentBreakdown {
        /// Sum of the bucketed counts.
        bucketed_total: u32,
        /// The declared total participant count.
        declared_total: u32,
    },
    /// A room-type choice was supplied for housing that does not track it.
    RoomTypeNotApplicable {
        /// The housing type that was paired with a room type.
        housing_type: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidHousingType(s) => write!(f, "Invalid housing type: {s}"),
            Self::InvalidRoomType(s) => write!(f, "Invalid room type: {s}"),
            Self::InvalidGender(s) => write!(f, "Invalid gender: {s}"),
            Self::InvalidParticipantType(s) => write!(f, "Invalid participant type: {s}"),
            Self::InvalidRoomCategoryTag(s) => write!(f, "Invalid room category tag: {s}"),
            Self::EmptyName { field } => write!(f, "Field '{field}' must not be empty"),
            Self::InvalidCount { field, value } => {
                write!(f, "Field '{field}' has invalid count {value}")
            }
            Self::InconsistentBreakdown {
                bucketed_total,
                declared_total,
            } => write!(
                f,
                "Bucketed counts sum to {bucketed_total} but declared total is {declared_total}"
            ),
            Self::RoomTypeNotApplicable { housing_type } => {
                write!(f, "Room type is not tracked for {housing_type} housing")
            }
        }
    }
}

impl std::error::Error for DomainError {}
