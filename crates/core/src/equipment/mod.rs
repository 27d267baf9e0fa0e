// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{borrow::Borrow, fmt, ops::Deref};

use strum::{AsRefStr, Display, EnumCount, EnumIter, EnumString, IntoStaticStr};

use crate::{media::browser_source, prelude::*};

/// The canonical name or code of an equipment item.
///
/// Serves as the natural key of the photo metadata.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct EquipmentId(String);

impl EquipmentId {
    /// Create a new identifier from a trimmed, non-empty string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Option<Self> {
        crate::util::string::trimmed_non_empty(id.into()).map(Self)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        let Self(inner) = self;
        inner
    }
}

impl AsRef<str> for EquipmentId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Borrow<str> for EquipmentId {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl Deref for EquipmentId {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl fmt::Display for EquipmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Copy, Clone, Debug)]
pub enum EquipmentIdInvalidity {
    Empty,
    Untrimmed,
}

impl Validate for EquipmentId {
    type Invalidity = EquipmentIdInvalidity;

    fn validate(&self) -> ValidationResult<Self::Invalidity> {
        ValidationContext::new()
            .invalidate_if(self.0.is_empty(), Self::Invalidity::Empty)
            .invalidate_if(self.0.trim() != self.0, Self::Invalidity::Untrimmed)
            .into()
    }
}

/// One of the fixed photo positions per equipment item.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    AsRefStr,
    Display,
    EnumCount,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ViewSlot {
    Front,
    Rear,
    Right,
    Left,
}

impl ViewSlot {
    /// Display order of the slots.
    pub const ALL: [Self; 4] = [Self::Front, Self::Rear, Self::Right, Self::Left];

    /// The position name that is embedded into canonical file names.
    #[must_use]
    pub const fn position_name(self) -> &'static str {
        match self {
            Self::Front => "front_view",
            Self::Rear => "rear_view",
            Self::Right => "right_side_view",
            Self::Left => "left_side_view",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Front => "Front View",
            Self::Rear => "Rear View",
            Self::Right => "Right Side View",
            Self::Left => "Left Side View",
        }
    }
}

/// One value per [`ViewSlot`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhotoSlots<T> {
    pub front: T,
    pub rear: T,
    pub right: T,
    pub left: T,
}

impl<T> PhotoSlots<T> {
    #[must_use]
    pub const fn get(&self, slot: ViewSlot) -> &T {
        match slot {
            ViewSlot::Front => &self.front,
            ViewSlot::Rear => &self.rear,
            ViewSlot::Right => &self.right,
            ViewSlot::Left => &self.left,
        }
    }

    pub fn get_mut(&mut self, slot: ViewSlot) -> &mut T {
        match slot {
            ViewSlot::Front => &mut self.front,
            ViewSlot::Rear => &mut self.rear,
            ViewSlot::Right => &mut self.right,
            ViewSlot::Left => &mut self.left,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (ViewSlot, &T)> {
        ViewSlot::ALL.into_iter().map(|slot| (slot, self.get(slot)))
    }

    #[must_use]
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> PhotoSlots<U> {
        let Self {
            front,
            rear,
            right,
            left,
        } = self;
        PhotoSlots {
            front: f(front),
            rear: f(rear),
            right: f(right),
            left: f(left),
        }
    }
}

impl<T> PhotoSlots<Option<T>> {
    /// Number of occupied slots.
    #[must_use]
    pub fn count(&self) -> usize {
        self.iter().filter(|(_, value)| value.is_some()).count()
    }
}

/// A row of the photo metadata table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoRecord {
    pub id: EquipmentId,

    /// Overrides the display name of the reporting view if present.
    pub display_name: Option<String>,

    /// Inline image payloads as stored.
    pub images: PhotoSlots<Option<String>>,

    pub last_updated: UtcDateTimeMs,

    pub last_updated_by: Option<String>,
}

/// The descriptive attributes of an equipment item in the reporting view.
///
/// Each field has been resolved from the column that plays the
/// corresponding role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportingRecord {
    pub id: String,
    pub name: Option<String>,
    pub updated_at: Option<String>,
    pub updated_by: Option<String>,
}

/// The unified view-model of an equipment item.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EquipmentRecord {
    pub id: EquipmentId,
    pub name: String,
    pub updated_at: UtcDateTimeMs,
    pub updated_by: Option<String>,

    /// Browser-displayable image sources.
    pub images: PhotoSlots<Option<String>>,
}

impl EquipmentRecord {
    #[must_use]
    pub fn image_count(&self) -> usize {
        self.images.count()
    }

    /// List entry built from a photo metadata row alone.
    #[must_use]
    pub fn from_photo_record(record: PhotoRecord) -> Self {
        let PhotoRecord {
            id,
            display_name,
            images,
            last_updated,
            last_updated_by,
        } = record;
        let name = display_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| id.to_string());
        Self {
            id,
            name,
            updated_at: last_updated,
            updated_by: last_updated_by,
            images: images.map(|image| browser_source(image.as_deref())),
        }
    }
}

/// Merge the reporting view row and the photo metadata row of an
/// equipment item.
///
/// Values from the photo table take precedence. The display name falls
/// back to the identifier and the update time falls back to `now`.
#[must_use]
pub fn merge_equipment_record(
    id: EquipmentId,
    reporting: Option<ReportingRecord>,
    photo: Option<PhotoRecord>,
    now: UtcDateTimeMs,
) -> EquipmentRecord {
    let (reporting_name, reporting_updated_at, reporting_updated_by) = reporting
        .map(|record| {
            let ReportingRecord {
                id: _,
                name,
                updated_at,
                updated_by,
            } = record;
            (name, updated_at, updated_by)
        })
        .unwrap_or_default();
    let (display_name, images, last_updated, last_updated_by) = photo
        .map(|record| {
            let PhotoRecord {
                id: _,
                display_name,
                images,
                last_updated,
                last_updated_by,
            } = record;
            (display_name, images, Some(last_updated), last_updated_by)
        })
        .unwrap_or_default();
    let name = display_name
        .filter(|name| !name.trim().is_empty())
        .or(reporting_name)
        .unwrap_or_else(|| id.to_string());
    let updated_at = last_updated
        .or_else(|| {
            reporting_updated_at
                .as_deref()
                .and_then(UtcDateTimeMs::parse_lenient)
        })
        .unwrap_or(now);
    let updated_by = last_updated_by
        .filter(|actor| !actor.trim().is_empty())
        .or(reporting_updated_by);
    EquipmentRecord {
        id,
        name,
        updated_at,
        updated_by,
        images: images.map(|image| browser_source(image.as_deref())),
    }
}

#[cfg(test)]
mod tests;
