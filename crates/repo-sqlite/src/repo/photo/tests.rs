// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::num::NonZeroU32;

use test_log::test;

use equiphoto_core::{EquipmentId, ViewSlot, util::clock::UtcDateTimeMs};
use equiphoto_repo::{RepoError, photo::PhotoRepo, prelude::Page};

use crate::{DbConnection, tests::*};

struct Fixture {
    db: DbConnection,
}

impl Fixture {
    fn new() -> TestResult<Self> {
        let db = establish_connection()?;
        Ok(Self { db })
    }
}

fn equipment_id(id: &str) -> EquipmentId {
    EquipmentId::new(id).unwrap()
}

fn at(millis: i64) -> UtcDateTimeMs {
    UtcDateTimeMs::from_unix_timestamp_millis(millis)
}

fn page(number: u32, size: u32) -> Page {
    Page::new(number, NonZeroU32::new(size).unwrap())
}

#[test]
fn insert_if_absent_is_idempotent() -> TestResult<()> {
    let mut fixture = Fixture::new()?;
    let mut db = crate::Connection::new(&mut fixture.db);

    let id = equipment_id("EXC-001");
    assert!(db.insert_photo_record_if_absent(&id, None, at(1_000), Some("alice"))?);
    assert!(!db.insert_photo_record_if_absent(&id, None, at(2_000), Some("bob"))?);

    assert_eq!(1, db.count_photo_records(None)?);
    let record = db.load_photo_record(&id)?;
    assert_eq!(id, record.id);
    assert_eq!(None, record.display_name);
    assert_eq!(0, record.images.count());
    assert_eq!(at(1_000), record.last_updated);
    assert_eq!(Some("alice"), record.last_updated_by.as_deref());
    Ok(())
}

#[test]
fn load_missing_record() -> TestResult<()> {
    let mut fixture = Fixture::new()?;
    let mut db = crate::Connection::new(&mut fixture.db);

    assert!(matches!(
        db.load_photo_record(&equipment_id("EXC-404")),
        Err(RepoError::NotFound)
    ));
    Ok(())
}

#[test]
fn upsert_slot_inserts_missing_record() -> TestResult<()> {
    let mut fixture = Fixture::new()?;
    let mut db = crate::Connection::new(&mut fixture.db);

    let id = equipment_id("EXC-001");
    db.upsert_photo_slot(&id, ViewSlot::Rear, "data:image/jpeg;base64,AA==", at(1_000), None)?;

    let record = db.load_photo_record(&id)?;
    assert_eq!(
        Some("data:image/jpeg;base64,AA=="),
        record.images.rear.as_deref()
    );
    assert_eq!(1, record.images.count());
    assert_eq!(None, record.last_updated_by);
    Ok(())
}

#[test]
fn upsert_slot_keeps_other_slots() -> TestResult<()> {
    let mut fixture = Fixture::new()?;
    let mut db = crate::Connection::new(&mut fixture.db);

    let id = equipment_id("EXC-001");
    db.upsert_photo_slot(&id, ViewSlot::Front, "front-1", at(1_000), Some("alice"))?;
    db.upsert_photo_slot(&id, ViewSlot::Left, "left-1", at(2_000), Some("bob"))?;
    db.upsert_photo_slot(&id, ViewSlot::Front, "front-2", at(3_000), Some("carol"))?;

    let record = db.load_photo_record(&id)?;
    assert_eq!(Some("front-2"), record.images.front.as_deref());
    assert_eq!(Some("left-1"), record.images.left.as_deref());
    assert_eq!(None, record.images.rear);
    assert_eq!(None, record.images.right);
    assert_eq!(at(3_000), record.last_updated);
    assert_eq!(Some("carol"), record.last_updated_by.as_deref());
    assert_eq!(1, db.count_photo_records(None)?);
    Ok(())
}

#[test]
fn clear_slot_only_touches_that_slot() -> TestResult<()> {
    let mut fixture = Fixture::new()?;
    let mut db = crate::Connection::new(&mut fixture.db);

    let id = equipment_id("EXC-001");
    for (slot, image) in [
        (ViewSlot::Front, "front"),
        (ViewSlot::Rear, "rear"),
        (ViewSlot::Right, "right"),
        (ViewSlot::Left, "left"),
    ] {
        db.upsert_photo_slot(&id, slot, image, at(1_000), Some("alice"))?;
    }
    let before = db.load_photo_record(&id)?;

    db.clear_photo_slot(&id, ViewSlot::Front, at(2_000))?;

    let after = db.load_photo_record(&id)?;
    assert_eq!(None, after.images.front);
    assert_eq!(before.images.rear, after.images.rear);
    assert_eq!(before.images.right, after.images.right);
    assert_eq!(before.images.left, after.images.left);
    assert!(after.last_updated > before.last_updated);
    assert_eq!(before.last_updated_by, after.last_updated_by);
    Ok(())
}

#[test]
fn clear_slot_of_missing_record() -> TestResult<()> {
    let mut fixture = Fixture::new()?;
    let mut db = crate::Connection::new(&mut fixture.db);

    assert!(matches!(
        db.clear_photo_slot(&equipment_id("EXC-404"), ViewSlot::Left, at(1_000)),
        Err(RepoError::NotFound)
    ));
    Ok(())
}

#[test]
fn load_records_newest_first_then_id_descending() -> TestResult<()> {
    let mut fixture = Fixture::new()?;
    let mut db = crate::Connection::new(&mut fixture.db);

    db.insert_photo_record_if_absent(&equipment_id("A"), None, at(1_000), None)?;
    db.insert_photo_record_if_absent(&equipment_id("B"), None, at(3_000), None)?;
    db.insert_photo_record_if_absent(&equipment_id("C"), None, at(3_000), None)?;
    db.insert_photo_record_if_absent(&equipment_id("D"), None, at(2_000), None)?;

    let ids = db
        .load_photo_records(None, &page(1, 10))?
        .into_iter()
        .map(|record| record.id.into_inner())
        .collect::<Vec<_>>();
    assert_eq!(vec!["C", "B", "D", "A"], ids);

    let ids = db
        .load_photo_records(None, &page(2, 3))?
        .into_iter()
        .map(|record| record.id.into_inner())
        .collect::<Vec<_>>();
    assert_eq!(vec!["A"], ids);
    Ok(())
}

#[test]
fn search_is_case_insensitive_substring() -> TestResult<()> {
    let mut fixture = Fixture::new()?;
    let mut db = crate::Connection::new(&mut fixture.db);

    db.insert_photo_record_if_absent(&equipment_id("Excavator 320"), None, at(1_000), None)?;
    db.insert_photo_record_if_absent(&equipment_id("Dump Truck 100%"), None, at(2_000), None)?;
    db.insert_photo_record_if_absent(&equipment_id("Dozer D6"), None, at(3_000), None)?;

    assert_eq!(1, db.count_photo_records(Some("EXCAV"))?);
    assert_eq!(2, db.count_photo_records(Some("  d  "))?);
    assert_eq!(3, db.count_photo_records(Some("   "))?);

    // Wildcards are matched literally
    assert_eq!(1, db.count_photo_records(Some("100%"))?);
    assert_eq!(0, db.count_photo_records(Some("_"))?);

    let records = db.load_photo_records(Some("truck"), &page(1, 10))?;
    assert_eq!(1, records.len());
    assert_eq!("Dump Truck 100%", records[0].id.as_str());
    Ok(())
}

#[test]
fn display_name_is_searchable_and_kept_on_upsert() -> TestResult<()> {
    let mut fixture = Fixture::new()?;
    let mut db = crate::Connection::new(&mut fixture.db);

    let id = equipment_id("EXC-001");
    assert!(db.insert_photo_record_if_absent(&id, Some("Excavator 320"), at(1_000), None)?);
    assert_eq!(1, db.count_photo_records(Some("excavator"))?);
    assert_eq!(1, db.count_photo_records(Some("exc-0"))?);

    db.upsert_photo_slot(&id, ViewSlot::Front, "front", at(2_000), Some("bob"))?;
    let record = db.load_photo_record(&id)?;
    assert_eq!(Some("Excavator 320"), record.display_name.as_deref());
    assert_eq!(vec!["EXCAVATOR 320"], db.load_photo_name_keys()?);
    Ok(())
}

#[test]
fn name_keys_are_normalized() -> TestResult<()> {
    let mut fixture = Fixture::new()?;
    let mut db = crate::Connection::new(&mut fixture.db);

    db.insert_photo_record_if_absent(&equipment_id("Excavator 320"), None, at(1_000), None)?;
    db.insert_photo_record_if_absent(&equipment_id("dozer"), None, at(2_000), None)?;

    let mut keys = db.load_photo_name_keys()?;
    keys.sort();
    assert_eq!(vec!["DOZER", "EXCAVATOR 320"], keys);
    Ok(())
}
