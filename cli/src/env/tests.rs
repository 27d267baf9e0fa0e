// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::collections::HashMap;

use super::*;

fn apply(vars: &[(&str, &str)]) -> Config {
    let vars = vars
        .iter()
        .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
        .collect::<HashMap<_, _>>();
    let mut config = Config::default();
    apply_overrides(&mut config, |name| vars.get(name).cloned());
    config
}

#[test]
fn no_variables() {
    assert_eq!(Config::default(), apply(&[]));
}

#[test]
fn override_database_and_view() {
    let config = apply(&[
        ("DATABASE_URL", " sqlite:///var/lib/equiphoto.db "),
        ("DATABASE_CONNECTION_POOL_SIZE", "4"),
        ("LIST_VIEW", "reporting.v_equipment"),
        ("IMG_NAMECOL", "EquipmentCode"),
        ("EQUIPMENT_NAMES_FILE", "/etc/equiphoto/names.txt"),
    ]);
    assert_eq!("sqlite:///var/lib/equiphoto.db", config.database.url);
    assert_eq!(4, config.database.pool_size.get());
    assert_eq!("reporting.v_equipment", config.reporting_view.object);
    assert_eq!(
        Some("EquipmentCode"),
        config.reporting_view.catalog_column.as_deref()
    );
    assert_eq!(
        Some(PathBuf::from("/etc/equiphoto/names.txt")),
        config.catalog.names_file
    );
}

#[test]
fn override_image_settings() {
    let config = apply(&[
        ("STD_IMAGE_FORMAT", "WEBP"),
        ("STD_IMAGE_WIDTH", "800"),
        ("STD_IMAGE_HEIGHT", "600"),
        ("STD_IMAGE_MODE", "Crop"),
        ("STD_IMAGE_QUALITY", "70"),
        ("STD_IMAGE_MAX_BYTES", "500000"),
        ("MAX_CONTENT_LENGTH_MB", "10"),
    ]);
    assert_eq!(OutputFormat::WebP, config.image.format);
    assert_eq!((800, 600), (config.image.width, config.image.height));
    assert_eq!(ResizeMode::Crop, config.image.mode);
    assert_eq!(70, config.image.quality);
    assert_eq!(500_000, config.image.max_bytes);
    assert_eq!(10 * 1024 * 1024, config.upload.max_upload_bytes);
}

#[test]
fn ignore_unparsable_and_blank_values() {
    let config = apply(&[
        ("DATABASE_URL", "  "),
        ("DATABASE_CONNECTION_POOL_SIZE", "0"),
        ("STD_IMAGE_WIDTH", "wide"),
        ("PER_PAGE", "-1"),
    ]);
    assert_eq!(Config::default(), config);
}

#[test]
fn folder_roots_in_order() {
    let config = apply(&[("FOLDER_REPO_ROOT", "/mnt/images"), ("UPLOAD_ROOT", "/srv/uploads")]);
    assert_eq!(
        vec![PathBuf::from("/srv/uploads"), PathBuf::from("/mnt/images")],
        config.folders.roots
    );
    let config = apply(&[("FOLDER_REPO_ROOT", "/mnt/images")]);
    assert_eq!(vec![PathBuf::from("/mnt/images")], config.folders.roots);
}
