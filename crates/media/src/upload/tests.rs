// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::*;

const DATA: &[u8] = b"\x89PNG";

fn upload<'a>(file_name: Option<&'a str>, mime_hint: Option<&'a str>) -> Upload<'a> {
    Upload {
        file_name,
        mime_hint,
        data: DATA,
    }
}

#[test]
fn accept_image_by_extension_or_mime_hint() {
    for (file_name, mime_hint) in [
        ("front.JPG", None),
        ("front.jfif", Some("application/octet-stream")),
        ("front", Some("image/png")),
        ("front.bin", Some(" image/webp ")),
    ] {
        assert!(
            validate_upload(&upload(Some(file_name), mime_hint), DEFAULT_MAX_UPLOAD_BYTES).is_ok(),
            "{file_name}"
        );
    }
}

#[test]
fn reject_non_images() {
    for (file_name, mime_hint) in [
        ("report.pdf", Some("application/pdf")),
        ("notes.txt", None),
        ("png", None),
    ] {
        assert!(matches!(
            validate_upload(&upload(Some(file_name), mime_hint), DEFAULT_MAX_UPLOAD_BYTES),
            Err(Error::UnsupportedInput(_))
        ));
    }
}

#[test]
fn reject_missing_file_name() {
    assert!(validate_upload(&upload(None, Some("image/png")), DEFAULT_MAX_UPLOAD_BYTES).is_err());
    assert!(
        validate_upload(&upload(Some("  "), Some("image/png")), DEFAULT_MAX_UPLOAD_BYTES)
            .is_err()
    );
}

#[test]
fn reject_empty_and_oversized_content() {
    let empty = Upload {
        data: &[],
        ..upload(Some("front.png"), None)
    };
    assert!(validate_upload(&empty, DEFAULT_MAX_UPLOAD_BYTES).is_err());
    assert!(validate_upload(&upload(Some("front.png"), None), 3).is_err());
    assert!(validate_upload(&upload(Some("front.png"), None), 4).is_ok());
}
