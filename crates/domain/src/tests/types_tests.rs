// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    DomainError, Gender, HousingType, ParticipantType, RoomCategoryTag, RoomProfile, RoomType,
};
use std::str::FromStr;

#[test]
fn test_housing_type_round_trip() {
    for housing_type in HousingType::all() {
        let parsed: HousingType =
            HousingType::from_str(housing_type.as_str()).expect("known string must parse");
        assert_eq!(parsed, housing_type);
    }
}

#[test]
fn test_unknown_housing_type_rejected() {
    let result: Result<HousingType, DomainError> = HousingType::from_str("tent");
    assert_eq!(
        result,
        Err(DomainError::InvalidHousingType(String::from("tent")))
    );
}

#[test]
fn test_room_type_bed_counts() {
    assert_eq!(RoomType::Single.bed_count(), 1);
    assert_eq!(RoomType::Double.bed_count(), 2);
    assert_eq!(RoomType::Triple.bed_count(), 3);
    assert_eq!(RoomType::Quad.bed_count(), 4);
}

#[test]
fn test_participant_type_parsing() {
    assert_eq!(
        ParticipantType::from_str("priest").expect("known string must parse"),
        ParticipantType::Priest
    );
    assert!(ParticipantType::from_str("bishop").is_err());
}

#[test]
fn test_room_category_tag_parsing() {
    assert_eq!(
        RoomCategoryTag::from_str("chaperone_18plus").expect("known string must parse"),
        RoomCategoryTag::Chaperone18Plus
    );
    assert!(RoomCategoryTag::from_str("vip").is_err());
}

fn room_profile(gender: Option<Gender>, building_gender: Option<Gender>) -> RoomProfile {
    RoomProfile {
        room_id: 1,
        building_id: 1,
        name: String::from("Hall A 101"),
        capacity: 4,
        current_occupancy: 1,
        gender,
        building_gender,
        tag: None,
        is_available: true,
        allocated_to_group: None,
        occupied_beds: vec![1],
    }
}

#[test]
fn test_effective_gender_prefers_room_over_building() {
    let room: RoomProfile = room_profile(Some(Gender::Female), Some(Gender::Male));
    assert_eq!(room.effective_gender(), Some(Gender::Female));
}

#[test]
fn test_effective_gender_falls_back_to_building() {
    let room: RoomProfile = room_profile(None, Some(Gender::Male));
    assert_eq!(room.effective_gender(), Some(Gender::Male));
}

#[test]
fn test_free_beds_never_underflows() {
    let mut room: RoomProfile = room_profile(None, None);
    room.current_occupancy = 9;
    assert_eq!(room.free_beds(), 0);
}
