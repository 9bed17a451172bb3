// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The room allocation engine.
//!
//! Planning is pure: given unassigned candidates and a room snapshot, it
//! produces a bed-level `AllocationPlan`. The four housing categories
//! are processed independently: room classification is
//! category-exclusive, so categories never compete for a room. Within a
//! category, rooms are visited in descending free-capacity order to
//! spread occupants instead of packing one room and fragmenting the
//! tail of the run.

use crate::error::CoreError;
use bunkhouse_domain::{
    Classification, ExclusionReason, Gender, HousingCategory, ParticipantType, RoomProfile,
    classify_participant, classify_room,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// A reference to the person behind an assignment: exactly one of a
/// group participant or an individual registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AssigneeRef {
    /// A participant row (group registration member).
    Participant(i64),
    /// An individual registration row.
    Individual(i64),
}

/// One person awaiting a bed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HousingCandidate {
    /// Who gets the bed.
    pub assignee: AssigneeRef,
    /// Display name, for operator-facing error messages.
    pub display_name: String,
    /// Recorded gender, if any.
    pub gender: Option<Gender>,
    /// Age in whole years.
    pub age: u8,
    /// Age/role classification.
    pub participant_type: ParticipantType,
    /// Group-level affiliation used by the parish-together strategy.
    pub parish: Option<String>,
}

/// How the engine distributes people across eligible rooms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    /// Keep each parish's members contiguous before moving on.
    ParishTogether,
    /// First room (in sorted order) with a free bed.
    FillRooms,
    /// Room with the lowest occupancy, re-evaluated per assignment.
    Balance,
}

impl Strategy {
    /// Converts this strategy to its wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ParishTogether => "parish_together",
            Self::FillRooms => "fill_rooms",
            Self::Balance => "balance",
        }
    }
}

impl FromStr for Strategy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "parish_together" => Ok(Self::ParishTogether),
            "fill_rooms" => Ok(Self::FillRooms),
            "balance" => Ok(Self::Balance),
            _ => Err(CoreError::UnknownStrategy(s.to_string())),
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Caller-selected narrowing of an allocation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationFilters {
    /// Only run categories of this gender.
    pub gender: Option<Gender>,
    /// `Some(true)` runs youth categories only, `Some(false)` chaperone
    /// categories only.
    pub youth: Option<bool>,
    /// Restrict candidate rooms to these buildings.
    pub buildings: Option<Vec<i64>>,
}

impl AllocationFilters {
    /// Whether a category participates in this run.
    #[must_use]
    pub fn admits(&self, category: HousingCategory) -> bool {
        if let Some(gender) = self.gender
            && category.gender() != gender
        {
            return false;
        }
        if let Some(youth) = self.youth
            && category.is_youth() != youth
        {
            return false;
        }
        true
    }
}

/// One planned bed assignment, not yet persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedAssignment {
    /// Who gets the bed.
    pub assignee: AssigneeRef,
    /// The room receiving the assignment.
    pub room_id: i64,
    /// The 1-indexed bed, lowest free number in the room.
    pub bed_number: u32,
    /// The category this pairing matched under.
    pub category: HousingCategory,
}

/// The output of one planning run.
///
/// "Skipped" is a terminal state, not an error: no eligible room had a
/// free bed when the candidate was considered. Unclassifiable candidates
/// are kept apart from skipped ones so operators can tell data problems
/// from capacity problems.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationPlan {
    /// Assignments to apply, in planning order.
    pub assignments: Vec<PlannedAssignment>,
    /// Candidates with no eligible room capacity left.
    pub skipped: Vec<AssigneeRef>,
    /// Candidates the classifier could not place.
    pub unclassifiable: Vec<AssigneeRef>,
}

/// Mutable per-room bookkeeping while planning.
struct RoomLedger {
    room_id: i64,
    capacity: u32,
    occupancy: u32,
    occupied_beds: Vec<u32>,
    sort_key: u32,
}

impl RoomLedger {
    const fn free_beds(&self) -> u32 {
        self.capacity.saturating_sub(self.occupancy)
    }

    /// Takes the lowest free 1-indexed bed number.
    fn take_lowest_bed(&mut self) -> Option<u32> {
        if self.free_beds() == 0 {
            return None;
        }
        let bed: u32 = (1..=self.capacity).find(|n| !self.occupied_beds.contains(n))?;
        self.occupied_beds.push(bed);
        self.occupancy += 1;
        Some(bed)
    }
}

/// Plans bed-level assignments for one run.
///
/// Candidates must already be scoped by the caller (a group's allocated
/// rooms, or an event-wide unassigned pool) and already filtered of
/// assigned people unless reassignment was requested. Clergy candidates
/// are never attempted. An empty or fully ineligible room set yields an
/// all-skipped plan, never an error.
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn plan_assignments(
    candidates: &[HousingCandidate],
    rooms: &[RoomProfile],
    strategy: Strategy,
    filters: &AllocationFilters,
) -> AllocationPlan {
    let mut plan: AllocationPlan = AllocationPlan::default();

    // Classify the candidate pool once, bucketed per category.
    let mut by_category: BTreeMap<&'static str, Vec<&HousingCandidate>> = BTreeMap::new();
    for candidate in candidates {
        match classify_participant(candidate.gender, candidate.age, candidate.participant_type) {
            Classification::Housed(category) => {
                if !filters.admits(category) {
                    continue;
                }
                by_category
                    .entry(category.as_str())
                    .or_default()
                    .push(candidate);
            }
            Classification::Excluded(ExclusionReason::Unclassifiable) => {
                plan.unclassifiable.push(candidate.assignee);
            }
            // Clergy are housed outside this engine entirely.
            Classification::Excluded(ExclusionReason::Clergy) => {}
        }
    }

    for category in HousingCategory::all() {
        let Some(waiting) = by_category.get(category.as_str()) else {
            continue;
        };

        let mut ledgers: Vec<RoomLedger> = eligible_rooms(rooms, category, filters);
        // Descending free capacity; room id breaks ties for determinism.
        ledgers.sort_by(|a, b| b.sort_key.cmp(&a.sort_key).then(a.room_id.cmp(&b.room_id)));

        match strategy {
            Strategy::FillRooms => {
                for candidate in waiting {
                    place_first_fit(&mut plan, &mut ledgers, candidate, category);
                }
            }
            Strategy::Balance => {
                for candidate in waiting {
                    place_least_occupied(&mut plan, &mut ledgers, candidate, category);
                }
            }
            Strategy::ParishTogether => {
                for group in parish_groups(waiting) {
                    for candidate in group {
                        place_first_fit(&mut plan, &mut ledgers, candidate, category);
                    }
                }
            }
        }
    }

    plan
}

/// The assignees a filter set would admit into a planning run.
///
/// Callers that release beds before reassigning must scope the release
/// to these people: anyone the filters keep out of the run would lose
/// a bed the run can never give back.
#[must_use]
pub fn admitted_assignees(
    candidates: &[HousingCandidate],
    filters: &AllocationFilters,
) -> Vec<AssigneeRef> {
    candidates
        .iter()
        .filter(|candidate| {
            matches!(
                classify_participant(candidate.gender, candidate.age, candidate.participant_type),
                Classification::Housed(category) if filters.admits(category)
            )
        })
        .map(|candidate| candidate.assignee)
        .collect()
}

/// Builds the mutable room ledgers eligible for one category.
fn eligible_rooms(
    rooms: &[RoomProfile],
    category: HousingCategory,
    filters: &AllocationFilters,
) -> Vec<RoomLedger> {
    rooms
        .iter()
        .filter(|room| room.is_available)
        .filter(|room| {
            filters
                .buildings
                .as_ref()
                .is_none_or(|buildings| buildings.contains(&room.building_id))
        })
        .filter(|room| {
            classify_room(room.effective_gender(), room.tag).category() == Some(category)
        })
        .map(|room| RoomLedger {
            room_id: room.room_id,
            capacity: room.capacity,
            occupancy: room.current_occupancy,
            occupied_beds: room.occupied_beds.clone(),
            sort_key: room.free_beds(),
        })
        .collect()
}

/// Assigns a candidate to the first room (in sorted order) with a free
/// bed, or marks them skipped.
fn place_first_fit(
    plan: &mut AllocationPlan,
    ledgers: &mut [RoomLedger],
    candidate: &HousingCandidate,
    category: HousingCategory,
) {
    for ledger in ledgers.iter_mut() {
        if let Some(bed_number) = ledger.take_lowest_bed() {
            plan.assignments.push(PlannedAssignment {
                assignee: candidate.assignee,
                room_id: ledger.room_id,
                bed_number,
                category,
            });
            return;
        }
    }
    plan.skipped.push(candidate.assignee);
}

/// Assigns a candidate to the room with the lowest current occupancy
/// among those with a free bed, or marks them skipped.
fn place_least_occupied(
    plan: &mut AllocationPlan,
    ledgers: &mut [RoomLedger],
    candidate: &HousingCandidate,
    category: HousingCategory,
) {
    let target: Option<usize> = ledgers
        .iter()
        .enumerate()
        .filter(|(_, ledger)| ledger.free_beds() > 0)
        .min_by(|(_, a), (_, b)| a.occupancy.cmp(&b.occupancy).then(a.room_id.cmp(&b.room_id)))
        .map(|(index, _)| index);

    match target {
        Some(index) => {
            if let Some(bed_number) = ledgers[index].take_lowest_bed() {
                plan.assignments.push(PlannedAssignment {
                    assignee: candidate.assignee,
                    room_id: ledgers[index].room_id,
                    bed_number,
                    category,
                });
            } else {
                plan.skipped.push(candidate.assignee);
            }
        }
        None => plan.skipped.push(candidate.assignee),
    }
}

/// Groups candidates by parish, largest parish first so big groups get
/// the first shot at contiguous rooms. Candidates without a parish form
/// a trailing group of their own.
fn parish_groups<'a>(waiting: &[&'a HousingCandidate]) -> Vec<Vec<&'a HousingCandidate>> {
    let mut grouped: BTreeMap<String, Vec<&'a HousingCandidate>> = BTreeMap::new();
    let mut unaffiliated: Vec<&'a HousingCandidate> = Vec::new();

    for candidate in waiting {
        match &candidate.parish {
            Some(parish) => grouped.entry(parish.clone()).or_default().push(candidate),
            None => unaffiliated.push(candidate),
        }
    }

    let mut groups: Vec<Vec<&'a HousingCandidate>> = grouped.into_values().collect();
    groups.sort_by(|a, b| b.len().cmp(&a.len()));
    if !unaffiliated.is_empty() {
        groups.push(unaffiliated);
    }
    groups
}
