// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::*;

const NOW: UtcDateTimeMs = UtcDateTimeMs::from_unix_timestamp_millis(1_700_000_000_000);

fn id() -> EquipmentId {
    EquipmentId::new("EQ-1").unwrap()
}

fn photo() -> PhotoRecord {
    PhotoRecord {
        id: id(),
        display_name: None,
        images: PhotoSlots {
            front: Some("/9j/4AAQ".to_owned()),
            right: Some("data:image/png;name=EQ-1_right_side_view.png;base64,iVBORw0KGgo".to_owned()),
            ..Default::default()
        },
        last_updated: UtcDateTimeMs::from_unix_timestamp_millis(1_600_000_000_000),
        last_updated_by: Some("alice".to_owned()),
    }
}

fn reporting() -> ReportingRecord {
    ReportingRecord {
        id: "EQ-1".to_owned(),
        name: Some("Pump".to_owned()),
        updated_at: Some("2024-01-02".to_owned()),
        updated_by: Some("bob".to_owned()),
    }
}

#[test]
fn equipment_id_is_trimmed_and_non_empty() {
    assert_eq!("EQ-1", EquipmentId::new("  EQ-1 ").unwrap().as_str());
    assert!(EquipmentId::new(" ").is_none());
    assert!(id().is_valid());
}

#[test]
fn view_slot_from_str() {
    assert_eq!(Ok(ViewSlot::Front), "front".parse());
    assert_eq!(Ok(ViewSlot::Left), "LEFT".parse());
    assert!("top".parse::<ViewSlot>().is_err());
    assert_eq!("rear", ViewSlot::Rear.as_ref());
}

#[test]
fn photo_slots_count() {
    let mut slots = PhotoSlots::<Option<u8>>::default();
    assert_eq!(0, slots.count());
    *slots.get_mut(ViewSlot::Left) = Some(1);
    *slots.get_mut(ViewSlot::Rear) = Some(2);
    assert_eq!(2, slots.count());
    assert_eq!(&Some(1), slots.get(ViewSlot::Left));
}

#[test]
fn merge_prefers_photo_values() {
    let record = merge_equipment_record(id(), Some(reporting()), Some(photo()), NOW);
    assert_eq!("Pump", record.name);
    assert_eq!(1_600_000_000_000, record.updated_at.unix_timestamp_millis());
    assert_eq!(Some("alice"), record.updated_by.as_deref());
    assert_eq!(2, record.image_count());
    assert_eq!(
        Some("data:image/jpeg;base64,/9j/4AAQ"),
        record.images.front.as_deref()
    );
    assert_eq!(
        Some("data:image/png;name=EQ-1_right_side_view.png;base64,iVBORw0KGgo"),
        record.images.right.as_deref()
    );
}

#[test]
fn merge_display_name_override() {
    let photo = PhotoRecord {
        display_name: Some("Main Pump".to_owned()),
        ..photo()
    };
    let record = merge_equipment_record(id(), Some(reporting()), Some(photo), NOW);
    assert_eq!("Main Pump", record.name);
}

#[test]
fn merge_without_photo_row() {
    let record = merge_equipment_record(id(), Some(reporting()), None, NOW);
    assert_eq!("Pump", record.name);
    assert_eq!(
        UtcDateTimeMs::parse_lenient("2024-01-02"),
        Some(record.updated_at)
    );
    assert_eq!(Some("bob"), record.updated_by.as_deref());
    assert_eq!(0, record.image_count());
}

#[test]
fn merge_with_id_and_name_only() {
    let reporting = ReportingRecord {
        updated_at: None,
        updated_by: None,
        ..reporting()
    };
    let record = merge_equipment_record(id(), Some(reporting), None, NOW);
    assert_eq!("Pump", record.name);
    assert_eq!(NOW, record.updated_at);
    assert_eq!(None, record.updated_by);
}

#[test]
fn merge_falls_back_to_id_and_now() {
    let reporting = ReportingRecord {
        name: None,
        updated_at: Some("not a date".to_owned()),
        ..reporting()
    };
    let record = merge_equipment_record(id(), Some(reporting), None, NOW);
    assert_eq!("EQ-1", record.name);
    assert_eq!(NOW, record.updated_at);
}

#[test]
fn list_entry_from_photo_record() {
    let record = EquipmentRecord::from_photo_record(photo());
    assert_eq!("EQ-1", record.name);
    assert_eq!(Some("alice"), record.updated_by.as_deref());
    assert_eq!(2, record.image_count());
}
