// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{
    io::{Cursor, Write as _},
    num::NonZeroU32,
    thread,
    time::Duration,
};

use diesel::connection::SimpleConnection as _;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use tempfile::NamedTempFile;
use test_log::test;

use equiphoto_core::{EquipmentId, ViewSlot, catalog::CatalogSource, schema::ColumnMapping};
use equiphoto_repo::RepoError;
use equiphoto_storage_sqlite::connection::Storage;

use crate::{Error, database::commission_database};

use super::*;

const CREATE_REPORTING_VIEW_SQL: &str = r"
CREATE TABLE equipment_master (
    Equipment TEXT PRIMARY KEY NOT NULL,
    EquipmentDesc TEXT,
    ModifiedAt TEXT,
    CreatedByName TEXT
);
INSERT INTO equipment_master VALUES
    ('Excavator 320', 'CAT 320 hydraulic excavator', '2024-03-01 08:15:00', 'alice'),
    ('Excavator 330', NULL, NULL, NULL),
    ('Dozer D6', 'CAT D6 dozer', NULL, NULL);
CREATE VIEW v_list_equipment AS SELECT * FROM equipment_master;
";

struct Fixture {
    service: Service,
}

impl Fixture {
    fn new(config: ServiceConfig) -> anyhow::Result<Self> {
        let connection_pool = commission_database(&Storage::InMemory, NonZeroU32::MIN, true)?;
        get_pooled_connection(&connection_pool)?.batch_execute(CREATE_REPORTING_VIEW_SQL)?;
        let service = Service::new(connection_pool, config);
        Ok(Self { service })
    }

    fn with_defaults() -> anyhow::Result<Self> {
        Self::new(ServiceConfig::new(ObjectRef::new("main", "v_list_equipment")))
    }
}

fn png_bytes() -> Vec<u8> {
    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(RgbImage::from_pixel(40, 30, Rgb([10, 120, 200])))
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

fn first_page() -> Page {
    Page::first(NonZeroU32::new(10).unwrap())
}

#[test]
fn create_equipment_from_view_catalog() -> anyhow::Result<()> {
    let fixture = Fixture::with_defaults()?;
    let service = &fixture.service;

    let catalog = service.name_catalog()?;
    assert_eq!(CatalogSource::Database, catalog.source());
    assert_eq!(3, catalog.len());

    let outcome =
        service.create_equipment(&NameSelection::new(None, Some("dozer")), Some("alice"))?;
    assert_eq!(
        CreateOutcome::Created(EquipmentId::new("Dozer D6").unwrap()),
        outcome
    );
    let outcome = service.create_equipment(&NameSelection::new(Some("DOZER D6"), None), None)?;
    assert_eq!(
        CreateOutcome::AlreadyExists(EquipmentId::new("Dozer D6").unwrap()),
        outcome
    );
    assert_eq!(
        CreateOutcome::Ambiguous(vec!["Excavator 320".to_owned(), "Excavator 330".to_owned()]),
        service.create_equipment(&NameSelection::new(None, Some("excavator")), None)?
    );
    assert_eq!(
        CreateOutcome::NotFound,
        service.create_equipment(&NameSelection::new(Some("Crane 50t"), None), None)?
    );

    let (records, total) = service.list_equipment(None, &first_page())?;
    assert_eq!(1, total);
    assert_eq!("Dozer D6", records[0].id.as_str());
    assert_eq!(Some("alice"), records[0].updated_by.as_deref());
    Ok(())
}

#[test]
fn create_equipment_row_twice() -> anyhow::Result<()> {
    let fixture = Fixture::with_defaults()?;
    let service = &fixture.service;

    assert!(service.create_equipment_row("Excavator 320", None)?);
    assert!(!service.create_equipment_row(" Excavator 320 ", None)?);
    let (_, total) = service.list_equipment(None, &first_page())?;
    assert_eq!(1, total);
    Ok(())
}

#[test]
fn list_equipment_with_search() -> anyhow::Result<()> {
    let fixture = Fixture::with_defaults()?;
    let service = &fixture.service;
    for name in ["Excavator 320", "Excavator 330", "Dozer D6"] {
        service.create_equipment_row(name, None)?;
    }

    let (records, total) = service.list_equipment(Some("excav"), &first_page())?;
    assert_eq!(2, total);
    assert!(records.iter().all(|record| record.name.starts_with("Excavator")));

    let (records, total) = service.list_equipment(Some("crane"), &first_page())?;
    assert_eq!(0, total);
    assert!(records.is_empty());
    Ok(())
}

#[test]
fn fetch_merged_record() -> anyhow::Result<()> {
    let fixture = Fixture::with_defaults()?;
    let service = &fixture.service;

    // A row in the reporting view suffices
    let record = service.fetch_equipment_one("Excavator 320")?.unwrap();
    assert_eq!("CAT 320 hydraulic excavator", record.name);
    assert_eq!(Some("alice"), record.updated_by.as_deref());
    assert_eq!(0, record.image_count());

    service.upload_view(
        "Excavator 320",
        "front",
        &png_bytes(),
        Some("IMG_0001.png"),
        Some("image/png"),
        Some("bob"),
    )?;
    let record = service.fetch_equipment_one("Excavator 320")?.unwrap();
    assert_eq!(Some("bob"), record.updated_by.as_deref());
    assert_eq!(1, record.image_count());
    let front = record.images.get(ViewSlot::Front).as_deref().unwrap();
    assert!(front.starts_with("data:image/jpeg;name=Excavator_320_front_view.jpg;base64,"));

    assert_eq!(None, service.fetch_equipment_one("Crane 50t")?);
    assert!(matches!(
        service.fetch_equipment_one("  "),
        Err(Error::Input(_))
    ));
    Ok(())
}

#[test]
fn created_name_overrides_view_name() -> anyhow::Result<()> {
    let fixture = Fixture::with_defaults()?;
    let service = &fixture.service;

    let record = service.fetch_equipment_one("Excavator 320")?.unwrap();
    assert_eq!("CAT 320 hydraulic excavator", record.name);

    service.create_equipment(&NameSelection::new(Some("Excavator 320"), None), Some("carol"))?;
    let record = service.fetch_equipment_one("Excavator 320")?.unwrap();
    assert_eq!("Excavator 320", record.name);
    assert_eq!(Some("carol"), record.updated_by.as_deref());

    let (records, total) = service.list_equipment(Some("excavator"), &first_page())?;
    assert_eq!(1, total);
    assert_eq!("Excavator 320", records[0].name);
    Ok(())
}

#[test]
fn fetch_with_explicit_mapping() -> anyhow::Result<()> {
    let mut config = ServiceConfig::new(ObjectRef::new("main", "v_list_equipment"));
    config.column_mapping = ColumnMappingStrategy::Explicit(ColumnMapping {
        id: Some("Equipment".to_owned()),
        name: Some("Equipment".to_owned()),
        ..Default::default()
    });
    let fixture = Fixture::new(config)?;
    let service = &fixture.service;

    let record = service.fetch_equipment_one("Dozer D6")?.unwrap();
    assert_eq!("Dozer D6", record.name);
    assert_eq!(None, record.updated_by);
    assert!(service.view_schema()?.columns.is_empty());
    Ok(())
}

#[test]
fn upload_and_remove_views() -> anyhow::Result<()> {
    let fixture = Fixture::with_defaults()?;
    let service = &fixture.service;
    let png = png_bytes();

    for view in ["front", "rear", "left", "right"] {
        service.upload_view("Dozer D6", view, &png, Some("photo.png"), None, None)?;
    }
    let before = service.fetch_equipment_one("Dozer D6")?.unwrap();
    assert_eq!(4, before.image_count());

    // Millisecond timestamps
    thread::sleep(Duration::from_millis(5));
    service.remove_view("Dozer D6", "FRONT")?;
    let after = service.fetch_equipment_one("Dozer D6")?.unwrap();
    assert_eq!(3, after.image_count());
    assert_eq!(None, after.images.front);
    for slot in [ViewSlot::Rear, ViewSlot::Left, ViewSlot::Right] {
        assert!(before.images.get(slot).is_some());
        assert_eq!(before.images.get(slot), after.images.get(slot), "{slot}");
    }
    assert!(after.updated_at > before.updated_at);

    assert!(matches!(
        service.remove_view("Dozer D6", "top"),
        Err(Error::Input(_))
    ));
    assert!(matches!(
        service.remove_view("Excavator 330", "front"),
        Err(Error::Repository(RepoError::NotFound))
    ));
    Ok(())
}

#[test]
fn reject_invalid_upload() -> anyhow::Result<()> {
    let fixture = Fixture::with_defaults()?;
    let service = &fixture.service;

    assert!(matches!(
        service.upload_view("Dozer D6", "front", b"%PDF-1.7", Some("manual.pdf"), None, None),
        Err(Error::UnsupportedInput(_))
    ));
    assert!(matches!(
        service.upload_view("Dozer D6", "front", &[], Some("photo.png"), None, None),
        Err(Error::UnsupportedInput(_))
    ));
    let (_, total) = service.list_equipment(None, &first_page())?;
    assert_eq!(0, total);
    Ok(())
}

#[test]
fn resolve_name_candidates_excludes_existing() -> anyhow::Result<()> {
    let fixture = Fixture::with_defaults()?;
    let service = &fixture.service;

    assert!(service.resolve_name_candidates("ex", None)?.is_empty());
    let names = |candidates: Vec<NameCandidate>| {
        candidates
            .into_iter()
            .map(|candidate| candidate.name)
            .collect::<Vec<_>>()
    };
    assert_eq!(
        vec!["Excavator 320", "Excavator 330"],
        names(service.resolve_name_candidates("exc", None)?)
    );

    service.create_equipment_row("Excavator 320", None)?;
    assert_eq!(
        vec!["Excavator 330"],
        names(service.resolve_name_candidates("exc", Some(100))?)
    );
    Ok(())
}

#[test]
fn names_file_fallback() -> anyhow::Result<()> {
    let mut names_file = NamedTempFile::new()?;
    writeln!(names_file, "Grader 140\nGrader 140\n\nCompactor CS56")?;
    let mut config = ServiceConfig::new(ObjectRef::new("main", "v_missing"));
    config.names_file = Some(names_file.path().to_path_buf());
    let fixture = Fixture::new(config)?;
    let service = &fixture.service;

    let catalog = service.name_catalog()?;
    assert_eq!(CatalogSource::File, catalog.source());
    assert_eq!(2, catalog.len());
    assert_eq!(
        CreateOutcome::Created(EquipmentId::new("Grader 140").unwrap()),
        service.create_equipment(&NameSelection::new(None, Some("grader")), None)?
    );
    // Not present in the reporting view
    assert_eq!(None, service.fetch_equipment_one("Grader 140")?);
    Ok(())
}

#[test]
fn detect_columns_of_reporting_view() -> anyhow::Result<()> {
    let fixture = Fixture::with_defaults()?;

    let view_schema = fixture.service.detect_columns()?;
    assert_eq!(
        vec!["Equipment", "EquipmentDesc", "ModifiedAt", "CreatedByName"],
        view_schema.columns
    );
    assert_eq!(
        ColumnMapping {
            id: Some("Equipment".to_owned()),
            name: Some("EquipmentDesc".to_owned()),
            updated_at: Some("ModifiedAt".to_owned()),
            updated_by: Some("CreatedByName".to_owned()),
        },
        view_schema.mapping
    );
    Ok(())
}
