// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

pub fn trim_in_place(s: &mut String) {
    s.truncate(s.trim_end().len());
    let drain_start_len = s.len() - s.trim_start().len();
    drop(s.drain(0..drain_start_len));
}

#[must_use]
pub fn trimmed_non_empty(mut s: String) -> Option<String> {
    trim_in_place(&mut s);
    if s.is_empty() { None } else { Some(s) }
}

/// Checks if a value carries any non-whitespace content.
#[must_use]
pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Normalized lookup key for names: trimmed and upper-cased.
#[must_use]
pub fn normalize_key(s: &str) -> String {
    s.trim().to_uppercase()
}

/// Turns an arbitrary string into a file name that is safe to embed and
/// to write into any file system.
///
/// Path separators and whitespace runs collapse into a single `_`. All
/// characters except ASCII alphanumerics, `_`, `.` and `-` are dropped.
/// Leading and trailing dots and underscores are stripped, so the result
/// never denotes a hidden or relative path.
#[must_use]
pub fn sanitize_file_name(file_name: &str) -> String {
    let spaced = file_name.replace(['/', '\\'], " ");
    let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");
    let filtered = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect::<String>();
    filtered.trim_matches(['.', '_']).to_owned()
}
