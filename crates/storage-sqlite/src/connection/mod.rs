// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{fmt, num::NonZeroU32, path::PathBuf};

use diesel::{Connection as _, r2d2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Result;

pub type ConnectionManager = r2d2::ConnectionManager<diesel::SqliteConnection>;

pub type ConnectionPool = r2d2::Pool<ConnectionManager>;

pub type PooledConnection = r2d2::PooledConnection<ConnectionManager>;

const IN_MEMORY_STORAGE: &str = ":memory:";

const SQLITE_URL_SCHEME: &str = "sqlite://";

/// The location of the database.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Storage {
    InMemory,
    File { path: PathBuf },
}

impl Storage {
    /// Parse a database URL.
    ///
    /// Accepts `:memory:`, a plain file path or a path prefixed
    /// with `sqlite://`.
    #[must_use]
    pub fn from_url(url: &str) -> Option<Self> {
        let url = url.trim();
        let path = url.strip_prefix(SQLITE_URL_SCHEME).unwrap_or(url);
        if path.is_empty() {
            return None;
        }
        if path == IN_MEMORY_STORAGE {
            return Some(Self::InMemory);
        }
        Some(Self::File { path: path.into() })
    }

    #[must_use]
    pub const fn is_in_memory(&self) -> bool {
        matches!(self, Self::InMemory)
    }

    fn connection_string(&self) -> String {
        match self {
            Self::InMemory => IN_MEMORY_STORAGE.to_owned(),
            Self::File { path } => path.display().to_string(),
        }
    }
}

impl fmt::Display for Storage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.connection_string())
    }
}

pub fn create_connection_pool(storage: &Storage, max_size: NonZeroU32) -> Result<ConnectionPool> {
    let connection = storage.connection_string();
    // Each in-memory connection would open a separate, empty database.
    let max_size = if storage.is_in_memory() && max_size.get() > 1 {
        log::warn!("Limiting the connection pool size of an in-memory database to 1");
        NonZeroU32::MIN
    } else {
        max_size
    };
    // Establish a test connection before creating the connection pool to fail early.
    std::mem::drop(diesel::SqliteConnection::establish(&connection)?);
    // The test connection is dropped immediately without using it
    // and missing files should have been created after reaching
    // this point.
    let manager = ConnectionManager::new(connection);
    let mut builder = ConnectionPool::builder().max_size(max_size.get());
    if storage.is_in_memory() {
        // The database vanishes together with its only connection.
        builder = builder.max_lifetime(None).idle_timeout(None);
    }
    let pool = builder.build(manager)?;
    Ok(pool)
}

pub fn get_pooled_connection(pool: &ConnectionPool) -> Result<PooledConnection> {
    pool.get().map_err(Into::into)
}

#[cfg(test)]
mod tests;
