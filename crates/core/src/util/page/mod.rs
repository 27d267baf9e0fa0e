// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::num::NonZeroU32;

pub type PageNumber = u32;

pub type PageSize = NonZeroU32;

/// A 1-based page of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub number: PageNumber,
    pub size: PageSize,
}

pub const DEFAULT_PAGE_SIZE: PageSize = PageSize::new(25).unwrap();

impl Page {
    /// Page numbers below 1 are clamped to the first page.
    #[must_use]
    pub fn new(number: PageNumber, size: PageSize) -> Self {
        Self {
            number: number.max(1),
            size,
        }
    }

    #[must_use]
    pub fn first(size: PageSize) -> Self {
        Self::new(1, size)
    }

    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.number.max(1) - 1) * u64::from(self.size.get())
    }

    #[must_use]
    pub fn limit(&self) -> u64 {
        self.size.get().into()
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::first(DEFAULT_PAGE_SIZE)
    }
}

/// Number of pages needed to display `total` items, at least 1.
#[must_use]
pub fn total_pages(total: u64, size: PageSize) -> PageNumber {
    let pages = total.div_ceil(size.get().into()).max(1);
    PageNumber::try_from(pages).unwrap_or(PageNumber::MAX)
}

/// Page numbers to offer for navigation around the `current` page.
///
/// Shows at most `width` consecutive pages. The first and last page stay
/// reachable and a gap is represented by `None`.
#[must_use]
pub fn page_window(
    current: PageNumber,
    total: PageNumber,
    width: PageNumber,
) -> Vec<Option<PageNumber>> {
    if total <= width {
        return (1..=total).map(Some).collect();
    }
    let half = width / 2;
    let start = current.saturating_sub(half).max(1);
    let end = total.min(start + width - 1);
    let start = (end + 1).saturating_sub(width).max(1);
    let mut pages = Vec::with_capacity(width as usize + 4);
    if start > 1 {
        pages.extend([Some(1), None]);
    }
    pages.extend((start..=end).map(Some));
    if end < total {
        pages.extend([None, Some(total)]);
    }
    pages
}
