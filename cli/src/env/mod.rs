// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Overrides of configuration settings from environment variables.

use std::{env, fmt::Display, num::NonZeroU32, path::PathBuf, str::FromStr};

use equiphoto_media::standardize::{OutputFormat, ResizeMode};

use crate::config::Config;

pub(crate) fn init_environment() {
    if let Ok(path) = dotenvy::dotenv() {
        // Print to stderr because logging has not been initialized yet
        eprintln!("Loaded environment from dotenv file {}", path.display());
    }
}

const DATABASE_URL_ENV: &str = "DATABASE_URL";
const DATABASE_CONNECTION_POOL_SIZE_ENV: &str = "DATABASE_CONNECTION_POOL_SIZE";
const LIST_VIEW_ENV: &str = "LIST_VIEW";
const IMG_NAMECOL_ENV: &str = "IMG_NAMECOL";
const STD_IMAGE_FORMAT_ENV: &str = "STD_IMAGE_FORMAT";
const STD_IMAGE_WIDTH_ENV: &str = "STD_IMAGE_WIDTH";
const STD_IMAGE_HEIGHT_ENV: &str = "STD_IMAGE_HEIGHT";
const STD_IMAGE_MODE_ENV: &str = "STD_IMAGE_MODE";
const STD_IMAGE_QUALITY_ENV: &str = "STD_IMAGE_QUALITY";
const STD_IMAGE_MAX_BYTES_ENV: &str = "STD_IMAGE_MAX_BYTES";
const EQUIPMENT_NAMES_FILE_ENV: &str = "EQUIPMENT_NAMES_FILE";
const UPLOAD_ROOT_ENV: &str = "UPLOAD_ROOT";
const FOLDER_REPO_ROOT_ENV: &str = "FOLDER_REPO_ROOT";
const PER_PAGE_ENV: &str = "PER_PAGE";
const MAX_CONTENT_LENGTH_MB_ENV: &str = "MAX_CONTENT_LENGTH_MB";

const BYTES_PER_MB: u64 = 1024 * 1024;

/// Non-empty, trimmed value of a variable.
fn lookup_var(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    let var = lookup(name)?;
    log::debug!("{name} = {var}");
    let var = var.trim();
    (!var.is_empty()).then(|| var.to_owned())
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<T>
where
    T: FromStr,
    T::Err: Display,
{
    let var = lookup_var(lookup, name)?;
    var.parse()
        .map_err(|err| {
            log::warn!("Failed to parse {name} = {var}: {err}");
        })
        .ok()
}

/// Apply the variables provided by `lookup` on top of `config`.
///
/// Unparsable values are logged and ignored.
pub(crate) fn apply_overrides(config: &mut Config, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(url) = lookup_var(&lookup, DATABASE_URL_ENV) {
        config.database.url = url;
    }
    if let Some(pool_size) = parse_var::<NonZeroU32>(&lookup, DATABASE_CONNECTION_POOL_SIZE_ENV) {
        config.database.pool_size = pool_size;
    }
    if let Some(object) = lookup_var(&lookup, LIST_VIEW_ENV) {
        config.reporting_view.object = object;
    }
    if let Some(column) = lookup_var(&lookup, IMG_NAMECOL_ENV) {
        config.reporting_view.catalog_column = Some(column);
    }
    apply_image_overrides(config, &lookup);
    if let Some(names_file) = lookup_var(&lookup, EQUIPMENT_NAMES_FILE_ENV) {
        config.catalog.names_file = Some(names_file.into());
    }
    let upload_root = lookup_var(&lookup, UPLOAD_ROOT_ENV);
    let folder_repo_root = lookup_var(&lookup, FOLDER_REPO_ROOT_ENV);
    if upload_root.is_some() || folder_repo_root.is_some() {
        config.folders.roots = upload_root
            .into_iter()
            .chain(folder_repo_root)
            .map(PathBuf::from)
            .collect();
    }
    if let Some(per_page) = parse_var(&lookup, PER_PAGE_ENV) {
        config.listing.per_page = per_page;
    }
    if let Some(max_content_length_mb) = parse_var::<u64>(&lookup, MAX_CONTENT_LENGTH_MB_ENV) {
        config.upload.max_upload_bytes = max_content_length_mb.saturating_mul(BYTES_PER_MB);
    }
}

fn apply_image_overrides(config: &mut Config, lookup: &impl Fn(&str) -> Option<String>) {
    let image = &mut config.image;
    if let Some(format) = parse_var::<OutputFormat>(lookup, STD_IMAGE_FORMAT_ENV) {
        image.format = format;
    }
    if let Some(width) = parse_var(lookup, STD_IMAGE_WIDTH_ENV) {
        image.width = width;
    }
    if let Some(height) = parse_var(lookup, STD_IMAGE_HEIGHT_ENV) {
        image.height = height;
    }
    if let Some(mode) = lookup_var(lookup, STD_IMAGE_MODE_ENV) {
        image.mode = ResizeMode::from(mode);
    }
    if let Some(quality) = parse_var(lookup, STD_IMAGE_QUALITY_ENV) {
        image.quality = quality;
    }
    if let Some(max_bytes) = parse_var(lookup, STD_IMAGE_MAX_BYTES_ENV) {
        image.max_bytes = max_bytes;
    }
}

pub(crate) fn apply_env_overrides(config: &mut Config) {
    apply_overrides(config, |name| env::var(name).ok());
}

#[cfg(test)]
mod tests;
