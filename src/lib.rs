// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Manage standardized view photos of equipment items.
//!
//! The sub-crates are re-exported behind features.

pub use equiphoto_core as core;

#[cfg(feature = "media")]
pub use equiphoto_media as media;

#[cfg(feature = "repo")]
pub use equiphoto_repo as repo;

#[cfg(feature = "sqlite")]
pub use equiphoto_repo_sqlite as repo_sqlite;

#[cfg(feature = "sqlite")]
pub use equiphoto_storage_sqlite as storage_sqlite;

#[cfg(feature = "usecases")]
pub use equiphoto_usecases as usecases;

#[cfg(feature = "sqlite")]
pub use equiphoto_usecases_sqlite as usecases_sqlite;
