// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Category classification for participants and rooms.
//!
//! Classification is pure and total: every participant and every room
//! maps to exactly one housing category or to an explicit exclusion.
//! Exclusions are first-class so callers can surface "unclassifiable"
//! records to operators instead of silently dropping them.

use crate::types::{Gender, HousingCategory, ParticipantType, RoomCategoryTag};
use serde::{Deserialize, Serialize};

/// Why a participant or room has no housing category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExclusionReason {
    /// Clergy are housed outside the allocation engine.
    Clergy,
    /// The record lacks the data needed to pick a category
    /// (missing or non-binary gender signal).
    Unclassifiable,
}

/// The result of classifying a participant or room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classification {
    /// Maps to exactly one housing category.
    Housed(HousingCategory),
    /// Never handled by the allocation engine.
    Excluded(ExclusionReason),
}

impl Classification {
    /// The category, if this classification is housed.
    #[must_use]
    pub const fn category(&self) -> Option<HousingCategory> {
        match self {
            Self::Housed(category) => Some(*category),
            Self::Excluded(_) => None,
        }
    }
}

/// Classifies a participant into a housing category.
///
/// Clergy are excluded outright. Otherwise the category is the cross of
/// the participant's gender with their youth/adult side: under-18 (by age
/// or explicit `youth_u18` type) is youth; 18-plus, chaperones, and
/// over-18 youth are chaperone housing. A participant without a male or
/// female gender cannot be placed and is excluded as unclassifiable.
#[must_use]
pub const fn classify_participant(
    gender: Option<Gender>,
    age: u8,
    participant_type: ParticipantType,
) -> Classification {
    if matches!(participant_type, ParticipantType::Priest) {
        return Classification::Excluded(ExclusionReason::Clergy);
    }

    let is_youth: bool = age < 18 || matches!(participant_type, ParticipantType::YouthU18);

    match gender {
        Some(Gender::Male) => {
            if is_youth {
                Classification::Housed(HousingCategory::MaleYouth)
            } else {
                Classification::Housed(HousingCategory::MaleChaperone)
            }
        }
        Some(Gender::Female) => {
            if is_youth {
                Classification::Housed(HousingCategory::FemaleYouth)
            } else {
                Classification::Housed(HousingCategory::FemaleChaperone)
            }
        }
        Some(Gender::Other) | None => Classification::Excluded(ExclusionReason::Unclassifiable),
    }
}

/// Classifies a room into the single housing category it serves.
///
/// `gender` is the room's effective restriction (the room's own, falling
/// back to its building's). Clergy-tagged rooms are excluded. An untagged
/// or `general` room is chaperone housing, never youth housing. A room
/// with no usable gender signal serves no single category and is excluded
/// from automatic assignment; admins can still place people in it by hand.
#[must_use]
pub const fn classify_room(
    gender: Option<Gender>,
    tag: Option<RoomCategoryTag>,
) -> Classification {
    if matches!(tag, Some(RoomCategoryTag::Clergy)) {
        return Classification::Excluded(ExclusionReason::Clergy);
    }

    let side: Gender = match gender {
        Some(g @ (Gender::Male | Gender::Female)) => g,
        Some(Gender::Other) | None => {
            return Classification::Excluded(ExclusionReason::Unclassifiable);
        }
    };

    let category: HousingCategory = match (tag, side) {
        (Some(RoomCategoryTag::YouthU18), Gender::Male) => HousingCategory::MaleYouth,
        (Some(RoomCategoryTag::YouthU18), _) => HousingCategory::FemaleYouth,
        (_, Gender::Male) => HousingCategory::MaleChaperone,
        _ => HousingCategory::FemaleChaperone,
    };

    Classification::Housed(category)
}
