// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Lookup of photos in folder repositories.
//!
//! A folder repository contains one sub-directory per equipment item
//! that is named after the equipment.

use std::path::{Component, Path, PathBuf};

use walkdir::WalkDir;

use equiphoto_core::ViewSlot;

use crate::upload::{ALLOWED_FILE_EXTENSIONS, has_allowed_file_extension};

/// Find the first image of an equipment item in any of the `roots`.
///
/// Files named after a view slot, e.g. `front.jpg`, are preferred.
/// Otherwise the first image file in lexicographical order is picked.
#[must_use]
pub fn first_image_path<P: AsRef<Path>>(roots: &[P], equipment_name: &str) -> Option<PathBuf> {
    let equipment_name = equipment_name.trim();
    if !is_plain_dir_name(equipment_name) {
        return None;
    }
    roots
        .iter()
        .map(|root| root.as_ref().join(equipment_name))
        .filter(|dir| dir.is_dir())
        .find_map(|dir| find_view_image(&dir).or_else(|| find_any_image(&dir)))
}

fn is_plain_dir_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

fn find_view_image(dir: &Path) -> Option<PathBuf> {
    ViewSlot::ALL.into_iter().find_map(|slot| {
        ALLOWED_FILE_EXTENSIONS
            .iter()
            .map(|ext| dir.join(format!("{slot}.{ext}")))
            .find(|path| path.is_file())
    })
}

fn find_any_image(dir: &Path) -> Option<PathBuf> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|dir_entry| {
            dir_entry
                .inspect_err(|err| log::warn!("Failed to read directory entry: {err}"))
                .ok()
        })
        .filter(|dir_entry| dir_entry.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .find(|path| has_allowed_file_extension(path))
}
