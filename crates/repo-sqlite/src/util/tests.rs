// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::num::NonZeroU32;

use super::*;

#[test]
fn escape_like_wildcards() {
    assert_eq!("%50\\%\\_off\\\\%", escape_like_contains("50%_off\\"));
    assert_eq!("EQ-1", escape_like_matches("EQ-1"));
}

#[test]
fn quote_literal_with_embedded_quotes() {
    assert_eq!("'O''Brien'", quote_string_literal("O'Brien"));
}

#[test]
fn offset_and_limit_of_page() {
    let page = Page::new(3, NonZeroU32::new(20).unwrap());
    assert_eq!((40, 20), page_offset_limit(&page));
}
