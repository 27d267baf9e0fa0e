// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use diesel::dsl::count_star;

use equiphoto_core::{
    EquipmentId, PhotoRecord, ViewSlot,
    util::{clock::UtcDateTimeMs, string::normalize_key},
};
use equiphoto_repo::photo::PhotoRepo;

use crate::{
    db::equipment_image::{models::*, schema::*},
    prelude::*,
};

fn filter_by_search<'a, ST>(
    query: equipment_image::BoxedQuery<'a, DbBackend, ST>,
    search: Option<&str>,
) -> equipment_image::BoxedQuery<'a, DbBackend, ST> {
    let Some(search) = search.map(str::trim).filter(|search| !search.is_empty()) else {
        return query;
    };
    let pattern = escape_like_contains(search);
    query.filter(
        equipment_image::equipment
            .like(pattern.clone())
            .escape(LIKE_ESCAPE_CHARACTER)
            .or(equipment_image::display_name
                .like(pattern)
                .escape(LIKE_ESCAPE_CHARACTER)),
    )
}

impl PhotoRepo for crate::Connection<'_> {
    fn load_photo_record(&mut self, id: &EquipmentId) -> RepoResult<PhotoRecord> {
        equipment_image::table
            .filter(equipment_image::equipment.eq(id.as_str()))
            .first::<QueryableRecord>(self.as_mut())
            .map_err(repo_error)
            .and_then(|record| record.try_into().map_err(Into::into))
    }

    fn load_photo_records(
        &mut self,
        search: Option<&str>,
        page: &Page,
    ) -> RepoResult<Vec<PhotoRecord>> {
        let (offset, limit) = page_offset_limit(page);
        let query = equipment_image::table
            .order_by((
                equipment_image::last_updated_ms.desc(),
                equipment_image::equipment.desc(),
            ))
            .offset(offset)
            .limit(limit)
            .into_boxed();
        filter_by_search(query, search)
            .load::<QueryableRecord>(self.as_mut())
            .map_err(repo_error)?
            .into_iter()
            .map(|record| record.try_into().map_err(Into::into))
            .collect()
    }

    fn count_photo_records(&mut self, search: Option<&str>) -> RepoResult<u64> {
        let query = equipment_image::table.select(count_star()).into_boxed();
        let count = filter_by_search(query, search)
            .first::<i64>(self.as_mut())
            .map_err(repo_error)?;
        Ok(u64::try_from(count).unwrap_or_default())
    }

    fn load_photo_name_keys(&mut self) -> RepoResult<Vec<String>> {
        let rows = equipment_image::table
            .select((equipment_image::equipment, equipment_image::display_name))
            .load::<(String, Option<String>)>(self.as_mut())
            .map_err(repo_error)?;
        let keys = rows
            .into_iter()
            .map(|(equipment, display_name)| {
                let name = display_name
                    .as_deref()
                    .filter(|name| !name.trim().is_empty())
                    .unwrap_or(&equipment);
                normalize_key(name)
            })
            .collect();
        Ok(keys)
    }

    fn insert_photo_record_if_absent(
        &mut self,
        id: &EquipmentId,
        display_name: Option<&str>,
        created_at: UtcDateTimeMs,
        created_by: Option<&str>,
    ) -> RepoResult<bool> {
        let insertable = InsertableRecord::bind(id, display_name, created_at, created_by);
        let rows_affected = diesel::insert_or_ignore_into(equipment_image::table)
            .values(&insertable)
            .execute(self.as_mut())
            .map_err(repo_error)?;
        debug_assert!(rows_affected <= 1);
        Ok(rows_affected > 0)
    }

    fn upsert_photo_slot(
        &mut self,
        id: &EquipmentId,
        slot: ViewSlot,
        image: &str,
        updated_at: UtcDateTimeMs,
        updated_by: Option<&str>,
    ) -> RepoResult<()> {
        let insertable = InsertableRecord::bind_slot(id, slot, image, updated_at, updated_by);
        let updatable = UpdatableSlot::bind_replace(slot, image, updated_at, updated_by);
        let rows_affected = diesel::insert_into(equipment_image::table)
            .values(&insertable)
            .on_conflict(equipment_image::equipment)
            .do_update()
            .set(&updatable)
            .execute(self.as_mut())
            .map_err(repo_error)?;
        debug_assert_eq!(1, rows_affected);
        Ok(())
    }

    fn clear_photo_slot(
        &mut self,
        id: &EquipmentId,
        slot: ViewSlot,
        updated_at: UtcDateTimeMs,
    ) -> RepoResult<()> {
        let updatable = UpdatableSlot::bind_clear(slot, updated_at);
        let target = equipment_image::table.filter(equipment_image::equipment.eq(id.as_str()));
        let rows_affected = diesel::update(target)
            .set(&updatable)
            .execute(self.as_mut())
            .map_err(repo_error)?;
        debug_assert!(rows_affected <= 1);
        if rows_affected < 1 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
