// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    Classification, ExclusionReason, Gender, HousingCategory, ParticipantType, RoomCategoryTag,
    classify_participant, classify_room,
};

#[test]
fn test_male_under_18_is_male_youth() {
    let result: Classification =
        classify_participant(Some(Gender::Male), 14, ParticipantType::YouthU18);
    assert_eq!(result, Classification::Housed(HousingCategory::MaleYouth));
}

#[test]
fn test_female_under_18_is_female_youth() {
    let result: Classification =
        classify_participant(Some(Gender::Female), 17, ParticipantType::YouthU18);
    assert_eq!(result, Classification::Housed(HousingCategory::FemaleYouth));
}

#[test]
fn test_explicit_youth_u18_type_wins_over_adult_age() {
    // Records occasionally carry a stale age; the explicit type is the
    // stronger signal for the youth side.
    let result: Classification =
        classify_participant(Some(Gender::Male), 18, ParticipantType::YouthU18);
    assert_eq!(result, Classification::Housed(HousingCategory::MaleYouth));
}

#[test]
fn test_male_adult_chaperone() {
    let result: Classification =
        classify_participant(Some(Gender::Male), 35, ParticipantType::Chaperone);
    assert_eq!(
        result,
        Classification::Housed(HousingCategory::MaleChaperone)
    );
}

#[test]
fn test_female_adult_chaperone() {
    let result: Classification =
        classify_participant(Some(Gender::Female), 42, ParticipantType::Chaperone);
    assert_eq!(
        result,
        Classification::Housed(HousingCategory::FemaleChaperone)
    );
}

#[test]
fn test_youth_over_18_housed_as_chaperone() {
    let result: Classification =
        classify_participant(Some(Gender::Female), 19, ParticipantType::YouthO18);
    assert_eq!(
        result,
        Classification::Housed(HousingCategory::FemaleChaperone)
    );
}

#[test]
fn test_priest_excluded_regardless_of_gender_and_age() {
    let result: Classification =
        classify_participant(Some(Gender::Male), 55, ParticipantType::Priest);
    assert_eq!(result, Classification::Excluded(ExclusionReason::Clergy));
    assert_eq!(result.category(), None);
}

#[test]
fn test_missing_gender_is_unclassifiable_not_dropped() {
    let result: Classification = classify_participant(None, 15, ParticipantType::YouthU18);
    assert_eq!(
        result,
        Classification::Excluded(ExclusionReason::Unclassifiable)
    );
}

#[test]
fn test_other_gender_is_unclassifiable() {
    let result: Classification =
        classify_participant(Some(Gender::Other), 30, ParticipantType::Chaperone);
    assert_eq!(
        result,
        Classification::Excluded(ExclusionReason::Unclassifiable)
    );
}

#[test]
fn test_room_youth_tag_maps_to_youth_category() {
    let result: Classification =
        classify_room(Some(Gender::Male), Some(RoomCategoryTag::YouthU18));
    assert_eq!(result, Classification::Housed(HousingCategory::MaleYouth));
}

#[test]
fn test_room_chaperone_tag_maps_to_chaperone_category() {
    let result: Classification =
        classify_room(Some(Gender::Female), Some(RoomCategoryTag::Chaperone18Plus));
    assert_eq!(
        result,
        Classification::Housed(HousingCategory::FemaleChaperone)
    );
}

#[test]
fn test_untagged_room_is_chaperone_eligible_not_youth_eligible() {
    let result: Classification = classify_room(Some(Gender::Male), None);
    assert_eq!(
        result,
        Classification::Housed(HousingCategory::MaleChaperone)
    );
}

#[test]
fn test_general_room_is_chaperone_eligible() {
    let result: Classification = classify_room(Some(Gender::Female), Some(RoomCategoryTag::General));
    assert_eq!(
        result,
        Classification::Housed(HousingCategory::FemaleChaperone)
    );
}

#[test]
fn test_clergy_room_excluded() {
    let result: Classification = classify_room(Some(Gender::Male), Some(RoomCategoryTag::Clergy));
    assert_eq!(result, Classification::Excluded(ExclusionReason::Clergy));
}

#[test]
fn test_room_without_gender_signal_is_excluded() {
    let result: Classification = classify_room(None, Some(RoomCategoryTag::YouthU18));
    assert_eq!(
        result,
        Classification::Excluded(ExclusionReason::Unclassifiable)
    );
}

#[test]
fn test_category_pairings_are_mutually_exclusive() {
    // Every (gender, tag) combination that classifies at all lands on
    // exactly one of the four categories.
    let genders: [Gender; 2] = [Gender::Male, Gender::Female];
    let tags: [Option<RoomCategoryTag>; 3] = [
        Some(RoomCategoryTag::YouthU18),
        Some(RoomCategoryTag::Chaperone18Plus),
        None,
    ];

    let mut seen: Vec<HousingCategory> = Vec::new();
    for gender in genders {
        for tag in tags {
            if let Classification::Housed(category) = classify_room(Some(gender), tag) {
                assert_eq!(category.gender(), gender);
                seen.push(category);
            }
        }
    }
    // Both youth and both chaperone categories are reachable.
    assert!(seen.contains(&HousingCategory::MaleYouth));
    assert!(seen.contains(&HousingCategory::FemaleYouth));
    assert!(seen.contains(&HousingCategory::MaleChaperone));
    assert!(seen.contains(&HousingCategory::FemaleChaperone));
}
