// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::*;

#[test]
fn storage_from_url() {
    assert_eq!(Some(Storage::InMemory), Storage::from_url(":memory:"));
    assert_eq!(Some(Storage::InMemory), Storage::from_url("sqlite://:memory:"));
    assert_eq!(
        Some(Storage::File {
            path: "/var/lib/equiphoto.sqlite".into()
        }),
        Storage::from_url("sqlite:///var/lib/equiphoto.sqlite")
    );
    assert_eq!(
        Some(Storage::File {
            path: "equiphoto.sqlite".into()
        }),
        Storage::from_url(" equiphoto.sqlite ")
    );
    assert_eq!(None, Storage::from_url(""));
    assert_eq!(None, Storage::from_url("sqlite://"));
}

#[test]
fn in_memory_pool_has_a_single_connection() {
    let pool = create_connection_pool(&Storage::InMemory, NonZeroU32::new(8).unwrap()).unwrap();
    assert_eq!(1, pool.max_size());
    assert!(get_pooled_connection(&pool).is_ok());
}

#[test]
fn create_file_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("equiphoto.sqlite");
    let storage = Storage::File { path: path.clone() };
    let pool = create_connection_pool(&storage, NonZeroU32::new(2).unwrap()).unwrap();
    assert_eq!(2, pool.max_size());
    assert!(path.is_file());
}
