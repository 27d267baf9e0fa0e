// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::num::NonZeroU32;

use equiphoto_repo_sqlite::{initialize_database, run_migrations};
use equiphoto_storage_sqlite::connection::{
    ConnectionPool, Storage, create_connection_pool, get_pooled_connection,
};

use super::*;

pub fn migrate_schema(connection: &mut DbConnection) -> Result<()> {
    for migration_version in run_migrations(connection)
        .map_err(|err| anyhow::anyhow!(err))
        .map_err(Error::DatabaseMigration)?
    {
        log::info!("Applied migration '{migration_version}'");
    }
    Ok(())
}

/// Create the connection pool and prepare the database for use.
pub fn commission_database(
    storage: &Storage,
    pool_size: NonZeroU32,
    migrate: bool,
) -> Result<ConnectionPool> {
    log::info!("Creating SQLite connection pool of max. size {pool_size} for {storage}");
    let connection_pool = create_connection_pool(storage, pool_size)?;

    log::info!("Initializing database");
    initialize_database(&mut *get_pooled_connection(&connection_pool)?)
        .map_err(StorageError::from)?;

    if migrate {
        log::info!("Migrating database schema");
        migrate_schema(&mut *get_pooled_connection(&connection_pool)?)?;
    }

    Ok(connection_pool)
}
