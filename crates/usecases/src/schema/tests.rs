// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use test_log::test;

use equiphoto_core::schema::ColumnMapping;

use crate::tests::MockRepo;

use super::*;

fn v_list() -> ObjectRef {
    ObjectRef::new("main", "v_list")
}

#[test]
fn explicit_mapping_bypasses_detection() -> anyhow::Result<()> {
    let mapping = ColumnMapping {
        id: Some("Code".to_owned()),
        name: Some("Label".to_owned()),
        ..Default::default()
    };
    let resolver = ViewSchemaResolver::new(v_list(), ColumnMappingStrategy::Explicit(mapping.clone()));
    let mut repo = MockRepo::with_columns(&["EquipmentCode", "EquipmentDesc"]);

    let view_schema = resolver.resolve(&mut repo)?;
    assert_eq!(mapping, view_schema.mapping);
    assert!(!view_schema.fallback_keys);
    assert_eq!(0, repo.load_columns_count);
    Ok(())
}

#[test]
fn detected_mapping_is_cached() -> anyhow::Result<()> {
    let resolver = ViewSchemaResolver::new(v_list(), ColumnMappingStrategy::Detect);
    let mut repo = MockRepo::with_columns(&["EquipmentCode", "EquipmentDesc"]);

    let first = resolver.resolve(&mut repo)?;
    let second = resolver.resolve(&mut repo)?;
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(Some("EquipmentCode"), second.mapping.id.as_deref());
    assert_eq!(Some("EquipmentDesc"), second.mapping.name.as_deref());
    assert_eq!(1, repo.load_columns_count);
    Ok(())
}

#[test]
fn cached_mapping_is_invalidated_after_schema_change() -> anyhow::Result<()> {
    let resolver = ViewSchemaResolver::new(v_list(), ColumnMappingStrategy::Detect);
    let mut repo = MockRepo::with_columns(&["EquipmentCode", "EquipmentDesc"]);

    let before = resolver.resolve(&mut repo)?;
    assert_eq!(Some("EquipmentDesc"), before.mapping.name.as_deref());

    repo.columns = vec!["Id".to_owned(), "Name".to_owned()];
    repo.schema_version += 1;

    let after = resolver.resolve(&mut repo)?;
    assert_eq!(Some("Id"), after.mapping.id.as_deref());
    assert_eq!(Some("Name"), after.mapping.name.as_deref());
    assert_eq!(2, repo.load_columns_count);
    Ok(())
}

#[test]
fn invalidate_forces_detection() -> anyhow::Result<()> {
    let resolver = ViewSchemaResolver::new(v_list(), ColumnMappingStrategy::Detect);
    let mut repo = MockRepo::with_columns(&["Id"]);

    resolver.resolve(&mut repo)?;
    resolver.invalidate();
    resolver.resolve(&mut repo)?;
    assert_eq!(2, repo.load_columns_count);
    Ok(())
}

#[test]
fn missing_view_leaves_id_unresolved() -> anyhow::Result<()> {
    let resolver = ViewSchemaResolver::new(v_list(), ColumnMappingStrategy::Detect);
    let mut repo = MockRepo::with_columns(&[]);

    let view_schema = resolver.resolve(&mut repo)?;
    assert!(!view_schema.mapping.is_resolved());
    Ok(())
}
