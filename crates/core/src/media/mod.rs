// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{fmt, str::FromStr};

use data_encoding::BASE64;
use mime::Mime;

use crate::{equipment::ViewSlot, util::string::sanitize_file_name};

const DATA_URI_SCHEME: &str = "data:";

const BASE64_MARKER: &str = ";base64,";

const NAME_PARAM: &str = "name=";

/// Fallback media type for payloads of unknown format.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// An encoded image together with its media type.
///
/// Images are stored inline as `data:` URIs with an optional
/// `name` parameter that carries the canonical file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    pub media_type: Mime,
    pub file_name: Option<String>,
    pub data: Vec<u8>,
}

impl InlineImage {
    #[must_use]
    pub fn new(media_type: Mime, data: Vec<u8>) -> Self {
        Self {
            media_type,
            file_name: None,
            data,
        }
    }

    #[must_use]
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    /// Encode as a `data:<mime>[;name=<file>];base64,<payload>` URI.
    #[must_use]
    pub fn to_data_uri(&self) -> String {
        self.to_string()
    }

    #[must_use]
    pub fn essence_str(&self) -> &str {
        self.media_type.essence_str()
    }
}

impl fmt::Display for InlineImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            media_type,
            file_name,
            data,
        } = self;
        write!(f, "{DATA_URI_SCHEME}{}", media_type.essence_str())?;
        if let Some(file_name) = file_name {
            write!(f, ";{NAME_PARAM}{file_name}")?;
        }
        write!(f, "{BASE64_MARKER}{}", BASE64.encode(data))
    }
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum InlineImageParseError {
    #[display("missing data URI scheme")]
    MissingScheme,

    #[display("missing base64 payload")]
    MissingPayload,

    #[display("invalid media type")]
    InvalidMediaType,

    #[display("invalid base64 payload: {_0}")]
    InvalidPayload(data_encoding::DecodeError),
}

impl FromStr for InlineImage {
    type Err = InlineImageParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let Some(rest) = input.trim().strip_prefix(DATA_URI_SCHEME) else {
            return Err(InlineImageParseError::MissingScheme);
        };
        let Some((header, payload)) = rest.split_once(BASE64_MARKER) else {
            return Err(InlineImageParseError::MissingPayload);
        };
        let mut params = header.split(';');
        let media_type = params
            .next()
            .filter(|essence| !essence.is_empty())
            .unwrap_or(OCTET_STREAM)
            .parse::<Mime>()
            .map_err(|_| InlineImageParseError::InvalidMediaType)?;
        let file_name = params
            .filter_map(|param| param.strip_prefix(NAME_PARAM))
            .find(|name| !name.is_empty())
            .map(ToOwned::to_owned);
        let data = BASE64
            .decode(payload.trim().as_bytes())
            .map_err(InlineImageParseError::InvalidPayload)?;
        Ok(Self {
            media_type,
            file_name,
            data,
        })
    }
}

/// Turn a stored image value into something a browser can display.
///
/// Absent or blank values yield `None`. Values that are already URIs are
/// passed through unmodified. Raw base64 payloads are wrapped into a
/// `data:` URI with a media type sniffed from the leading characters.
#[must_use]
pub fn browser_source(value: Option<&str>) -> Option<String> {
    let value = value?.trim();
    if value.is_empty() {
        return None;
    }
    if value.starts_with(DATA_URI_SCHEME)
        || value.starts_with("http://")
        || value.starts_with("https://")
    {
        return Some(value.to_owned());
    }
    let media_type = sniff_base64_media_type(value);
    Some(format!("{DATA_URI_SCHEME}{media_type}{BASE64_MARKER}{value}"))
}

/// Guess the media type of a base64 payload by its encoded magic bytes.
#[must_use]
pub fn sniff_base64_media_type(payload: &str) -> &'static str {
    if payload.starts_with("iVBORw0KGgo") {
        "image/png"
    } else if payload.starts_with("/9j/") {
        "image/jpeg"
    } else if payload.starts_with("R0lGOD") {
        "image/gif"
    } else if payload.starts_with("UklGR") {
        "image/webp"
    } else {
        OCTET_STREAM
    }
}

/// Make sure that a `data:` URI carries a `name` parameter.
///
/// URIs that already have a name and values that are not `data:` URIs
/// are returned unmodified.
#[must_use]
pub fn ensure_named_data_uri(uri: &str, file_name: &str) -> String {
    let Some(rest) = uri.strip_prefix(DATA_URI_SCHEME) else {
        return uri.to_owned();
    };
    let Some((header, payload)) = rest.split_once(BASE64_MARKER) else {
        return uri.to_owned();
    };
    if header
        .split(';')
        .skip(1)
        .any(|param| param.starts_with(NAME_PARAM))
    {
        return uri.to_owned();
    }
    let file_name = sanitize_file_name(file_name);
    if file_name.is_empty() {
        return uri.to_owned();
    }
    format!("{DATA_URI_SCHEME}{header};{NAME_PARAM}{file_name}{BASE64_MARKER}{payload}")
}

/// File name extension for a media type.
#[must_use]
pub fn file_extension_for_media_type(media_type: &str) -> &'static str {
    let essence = media_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    match essence.as_str() {
        "image/png" => "png",
        "image/webp" => "webp",
        "image/gif" => "gif",
        _ => "jpg",
    }
}

/// The canonical file name of a photo, e.g. `EQ-1_front_view.jpg`.
#[must_use]
pub fn canonical_file_name(equipment_id: &str, slot: ViewSlot, media_type: &str) -> String {
    sanitize_file_name(&format!(
        "{equipment_id}_{position}.{ext}",
        position = slot.position_name(),
        ext = file_extension_for_media_type(media_type),
    ))
}
