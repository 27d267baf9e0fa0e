// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use equiphoto_core::{EquipmentId, ViewSlot, media::InlineImage, util::clock::UtcDateTimeMs};
use equiphoto_media::{
    standardize::{StandardizeConfig, standardize_to_inline_image},
    upload::{DEFAULT_MAX_UPLOAD_BYTES, Upload, validate_upload},
};
use equiphoto_repo::photo::PhotoRepo;

use crate::{InputError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadParams {
    pub max_upload_bytes: u64,
    pub standardize: StandardizeConfig,
}

impl Default for UploadParams {
    fn default() -> Self {
        Self {
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            standardize: StandardizeConfig::default(),
        }
    }
}

pub fn parse_view_slot(view: &str) -> Result<ViewSlot> {
    view.trim()
        .parse()
        .map_err(|_| InputError(anyhow::anyhow!("Invalid view \"{view}\"")).into())
}

/// Validate and standardize an uploaded photo.
///
/// Runs before any storage is accessed.
pub fn prepare_upload(
    id: &EquipmentId,
    slot: ViewSlot,
    upload: &Upload<'_>,
    params: &UploadParams,
) -> Result<InlineImage> {
    validate_upload(upload, params.max_upload_bytes)?;
    let image = standardize_to_inline_image(upload.data, &params.standardize, id.as_str(), slot)?;
    log::debug!(
        "Standardized {} view of {id}: {} -> {} byte(s)",
        slot,
        upload.data.len(),
        image.data.len()
    );
    Ok(image)
}

pub fn store_upload(
    repo: &mut impl PhotoRepo,
    id: &EquipmentId,
    slot: ViewSlot,
    image: &InlineImage,
    actor: Option<&str>,
) -> Result<()> {
    repo.upsert_photo_slot(id, slot, &image.to_data_uri(), UtcDateTimeMs::now(), actor)?;
    log::info!("Stored {slot} view of {id}");
    Ok(())
}

/// Clear a slot of an existing equipment item.
pub fn remove_view(repo: &mut impl PhotoRepo, id: &EquipmentId, slot: ViewSlot) -> Result<()> {
    repo.clear_photo_slot(id, slot, UtcDateTimeMs::now())?;
    log::info!("Removed {slot} view of {id}");
    Ok(())
}
