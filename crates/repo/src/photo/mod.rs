// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use equiphoto_core::{
    EquipmentId, PhotoRecord, ViewSlot,
    util::clock::UtcDateTimeMs,
};

use crate::prelude::*;

/// Access to the photo metadata table that is owned by this application.
pub trait PhotoRepo {
    fn load_photo_record(&mut self, id: &EquipmentId) -> RepoResult<PhotoRecord>;

    /// Records with a case-insensitive substring match of `search` in
    /// either the id or the display name, most recently updated first.
    fn load_photo_records(
        &mut self,
        search: Option<&str>,
        page: &Page,
    ) -> RepoResult<Vec<PhotoRecord>>;

    fn count_photo_records(&mut self, search: Option<&str>) -> RepoResult<u64>;

    /// Upper-cased display names of all records, falling back to the id.
    fn load_photo_name_keys(&mut self) -> RepoResult<Vec<String>>;

    /// Insert a record without images unless a record with the same id
    /// exists.
    ///
    /// The optional `display_name` overrides the name from the reporting view.
    ///
    /// Returns `true` if a new record has been inserted.
    fn insert_photo_record_if_absent(
        &mut self,
        id: &EquipmentId,
        display_name: Option<&str>,
        created_at: UtcDateTimeMs,
        created_by: Option<&str>,
    ) -> RepoResult<bool>;

    /// Store an image in a slot, inserting the record if needed.
    fn upsert_photo_slot(
        &mut self,
        id: &EquipmentId,
        slot: ViewSlot,
        image: &str,
        updated_at: UtcDateTimeMs,
        updated_by: Option<&str>,
    ) -> RepoResult<()>;

    /// Clear a slot of an existing record.
    ///
    /// Fails with [`RepoError::NotFound`] if no record exists.
    fn clear_photo_slot(
        &mut self,
        id: &EquipmentId,
        slot: ViewSlot,
        updated_at: UtcDateTimeMs,
    ) -> RepoResult<()>;
}
