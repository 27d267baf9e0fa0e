// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use equiphoto_core::{
    EquipmentId, PhotoRecord, PhotoSlots, ViewSlot,
    util::clock::{TimestampMillis, UtcDateTimeMs},
};

use crate::prelude::*;

use super::schema::*;

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = equipment_image, check_for_backend(DbBackend))]
pub(crate) struct QueryableRecord {
    pub(crate) equipment: String,
    pub(crate) display_name: Option<String>,
    pub(crate) front_image: Option<String>,
    pub(crate) rear_image: Option<String>,
    pub(crate) right_image: Option<String>,
    pub(crate) left_image: Option<String>,
    pub(crate) last_updated_ms: TimestampMillis,
    pub(crate) last_updated_by: Option<String>,
}

impl TryFrom<QueryableRecord> for PhotoRecord {
    type Error = anyhow::Error;

    fn try_from(from: QueryableRecord) -> anyhow::Result<Self> {
        let QueryableRecord {
            equipment,
            display_name,
            front_image,
            rear_image,
            right_image,
            left_image,
            last_updated_ms,
            last_updated_by,
        } = from;
        let Some(id) = EquipmentId::new(equipment) else {
            anyhow::bail!("Invalid equipment id");
        };
        Ok(Self {
            id,
            display_name,
            images: PhotoSlots {
                front: front_image,
                rear: rear_image,
                right: right_image,
                left: left_image,
            },
            last_updated: UtcDateTimeMs::from_unix_timestamp_millis(last_updated_ms),
            last_updated_by,
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = equipment_image)]
pub(crate) struct InsertableRecord<'a> {
    pub(crate) equipment: &'a str,
    pub(crate) display_name: Option<&'a str>,
    pub(crate) front_image: Option<&'a str>,
    pub(crate) rear_image: Option<&'a str>,
    pub(crate) right_image: Option<&'a str>,
    pub(crate) left_image: Option<&'a str>,
    pub(crate) last_updated_ms: TimestampMillis,
    pub(crate) last_updated_by: Option<&'a str>,
}

impl<'a> InsertableRecord<'a> {
    /// A record without any images.
    pub(crate) fn bind(
        id: &'a EquipmentId,
        display_name: Option<&'a str>,
        created_at: UtcDateTimeMs,
        created_by: Option<&'a str>,
    ) -> Self {
        Self {
            equipment: id.as_str(),
            display_name,
            front_image: None,
            rear_image: None,
            right_image: None,
            left_image: None,
            last_updated_ms: created_at.unix_timestamp_millis(),
            last_updated_by: created_by,
        }
    }

    /// A record with a single image.
    pub(crate) fn bind_slot(
        id: &'a EquipmentId,
        slot: ViewSlot,
        image: &'a str,
        updated_at: UtcDateTimeMs,
        updated_by: Option<&'a str>,
    ) -> Self {
        let mut record = Self::bind(id, None, updated_at, updated_by);
        *record.slot_mut(slot) = Some(image);
        record
    }

    fn slot_mut(&mut self, slot: ViewSlot) -> &mut Option<&'a str> {
        match slot {
            ViewSlot::Front => &mut self.front_image,
            ViewSlot::Rear => &mut self.rear_image,
            ViewSlot::Right => &mut self.right_image,
            ViewSlot::Left => &mut self.left_image,
        }
    }
}

/// Replaces or clears a single slot.
///
/// Slots that are `None` are left untouched.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = equipment_image)]
#[allow(clippy::option_option)]
pub(crate) struct UpdatableSlot<'a> {
    pub(crate) front_image: Option<Option<&'a str>>,
    pub(crate) rear_image: Option<Option<&'a str>>,
    pub(crate) right_image: Option<Option<&'a str>>,
    pub(crate) left_image: Option<Option<&'a str>>,
    pub(crate) last_updated_ms: TimestampMillis,
    pub(crate) last_updated_by: Option<Option<&'a str>>,
}

impl<'a> UpdatableSlot<'a> {
    pub(crate) fn bind_replace(
        slot: ViewSlot,
        image: &'a str,
        updated_at: UtcDateTimeMs,
        updated_by: Option<&'a str>,
    ) -> Self {
        let mut updatable = Self::touch(updated_at);
        *updatable.slot_mut(slot) = Some(Some(image));
        updatable.last_updated_by = Some(updated_by);
        updatable
    }

    /// The actor is not modified when clearing a slot.
    pub(crate) fn bind_clear(slot: ViewSlot, updated_at: UtcDateTimeMs) -> Self {
        let mut updatable = Self::touch(updated_at);
        *updatable.slot_mut(slot) = Some(None);
        updatable
    }

    fn touch(updated_at: UtcDateTimeMs) -> Self {
        Self {
            front_image: None,
            rear_image: None,
            right_image: None,
            left_image: None,
            last_updated_ms: updated_at.unix_timestamp_millis(),
            last_updated_by: None,
        }
    }

    #[allow(clippy::option_option)]
    fn slot_mut(&mut self, slot: ViewSlot) -> &mut Option<Option<&'a str>> {
        match slot {
            ViewSlot::Front => &mut self.front_image,
            ViewSlot::Rear => &mut self.rear_image,
            ViewSlot::Right => &mut self.right_image,
            ViewSlot::Left => &mut self.left_image,
        }
    }
}
