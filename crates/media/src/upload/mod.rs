// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::path::Path;

use crate::prelude::*;

pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 200 * 1024 * 1024;

/// File name extensions of accepted uploads.
pub const ALLOWED_FILE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif", "jfif"];

/// An uploaded file as received from the client.
#[derive(Debug, Clone, Copy)]
pub struct Upload<'a> {
    pub file_name: Option<&'a str>,
    pub mime_hint: Option<&'a str>,
    pub data: &'a [u8],
}

#[must_use]
pub fn has_allowed_file_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            ALLOWED_FILE_EXTENSIONS
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ext))
        })
}

fn has_image_mime_hint(mime_hint: Option<&str>) -> bool {
    mime_hint
        .and_then(|hint| hint.trim().parse::<mime::Mime>().ok())
        .is_some_and(|mime| mime.type_() == mime::IMAGE)
}

/// Reject uploads that are obviously not images before touching
/// any storage.
pub fn validate_upload(upload: &Upload<'_>, max_upload_bytes: u64) -> Result<()> {
    let Upload {
        file_name,
        mime_hint,
        data,
    } = upload;
    let Some(file_name) = file_name.map(str::trim).filter(|name| !name.is_empty()) else {
        return Err(Error::UnsupportedInput("no file selected".to_owned()));
    };
    if data.is_empty() {
        return Err(Error::UnsupportedInput(format!("empty file \"{file_name}\"")));
    }
    if data.len() as u64 > max_upload_bytes {
        return Err(Error::UnsupportedInput(format!(
            "file \"{file_name}\" exceeds {max_upload_bytes} bytes"
        )));
    }
    if !has_image_mime_hint(*mime_hint) && !has_allowed_file_extension(Path::new(file_name)) {
        return Err(Error::UnsupportedInput(format!(
            "file \"{file_name}\" is not an image"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests;
