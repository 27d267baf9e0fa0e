// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! A connection pool bundled with the configuration of all operations.
//!
//! Every operation runs in a single transaction on a pooled connection.

use std::{fmt, path::PathBuf, sync::Arc};

use diesel::Connection as _;

use equiphoto_core::{
    EquipmentRecord,
    catalog::{NameCandidate, NameCatalog, NameSelection},
    schema::{ColumnMappingStrategy, ObjectRef, ViewSchema},
};
use equiphoto_media::upload::Upload;
use equiphoto_repo::prelude::Page;
use equiphoto_storage_sqlite::connection::{ConnectionPool, get_pooled_connection};
use equiphoto_usecases::{
    catalog::CatalogLocation,
    equipment::{CreateOutcome, parse_equipment_id},
    photo::{UploadParams, parse_view_slot, prepare_upload},
    schema::ViewSchemaResolver,
};

use crate::{
    DbConnection, Result, TransactionError, catalog, equipment, photo, schema, transaction_error,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub reporting_view: ObjectRef,

    pub column_mapping: ColumnMappingStrategy,

    /// The column of the reporting view that contains the canonical
    /// names. Defaults to the id column of the resolved mapping.
    pub catalog_column: Option<String>,

    pub names_file: Option<PathBuf>,

    pub upload: UploadParams,
}

impl ServiceConfig {
    #[must_use]
    pub fn new(reporting_view: ObjectRef) -> Self {
        Self {
            reporting_view,
            column_mapping: ColumnMappingStrategy::default(),
            catalog_column: None,
            names_file: None,
            upload: UploadParams::default(),
        }
    }
}

pub struct Service {
    connection_pool: ConnectionPool,
    resolver: ViewSchemaResolver,
    catalog_column: Option<String>,
    names_file: Option<PathBuf>,
    upload: UploadParams,
}

impl fmt::Debug for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Service")
            .field("resolver", &self.resolver)
            .field("catalog_column", &self.catalog_column)
            .field("names_file", &self.names_file)
            .field("upload", &self.upload)
            .finish_non_exhaustive()
    }
}

impl Service {
    #[must_use]
    pub fn new(connection_pool: ConnectionPool, config: ServiceConfig) -> Self {
        let ServiceConfig {
            reporting_view,
            column_mapping,
            catalog_column,
            names_file,
            upload,
        } = config;
        Self {
            connection_pool,
            resolver: ViewSchemaResolver::new(reporting_view, column_mapping),
            catalog_column,
            names_file,
            upload,
        }
    }

    #[must_use]
    pub const fn resolver(&self) -> &ViewSchemaResolver {
        &self.resolver
    }

    fn transaction<T>(&self, f: impl FnOnce(&mut DbConnection) -> Result<T>) -> Result<T> {
        let mut pooled_connection = get_pooled_connection(&self.connection_pool)?;
        let connection = &mut *pooled_connection;
        connection
            .transaction::<_, TransactionError, _>(|connection| {
                f(connection).map_err(transaction_error)
            })
            .map_err(Into::into)
    }

    fn catalog_column(&self, connection: &mut DbConnection) -> Option<String> {
        if let Some(catalog_column) = &self.catalog_column {
            return Some(catalog_column.clone());
        }
        match schema::resolve(connection, &self.resolver) {
            Ok(view_schema) => view_schema.mapping.id.clone(),
            Err(err) => {
                log::debug!(
                    "Failed to resolve the catalog column of {}: {err}",
                    self.resolver.object()
                );
                None
            }
        }
    }

    fn catalog_location<'a>(&'a self, column: Option<&'a str>) -> CatalogLocation<'a> {
        CatalogLocation {
            object: self.resolver.object(),
            column,
            names_file: self.names_file.as_deref(),
        }
    }

    fn load_name_catalog(&self, connection: &mut DbConnection) -> NameCatalog {
        let column = self.catalog_column(connection);
        catalog::load_name_catalog(connection, &self.catalog_location(column.as_deref()))
    }

    /// Newest first, then by descending id.
    pub fn list_equipment(
        &self,
        search: Option<&str>,
        page: &Page,
    ) -> Result<(Vec<EquipmentRecord>, u64)> {
        self.transaction(|connection| equipment::list(connection, search, page))
    }

    /// Returns `true` if the item has been created.
    pub fn create_equipment_row(&self, canonical_name: &str, actor: Option<&str>) -> Result<bool> {
        self.transaction(|connection| equipment::create_row(connection, canonical_name, actor))
    }

    pub fn create_equipment(
        &self,
        selection: &NameSelection,
        actor: Option<&str>,
    ) -> Result<CreateOutcome> {
        self.transaction(|connection| {
            let catalog = self.load_name_catalog(connection);
            equipment::create(connection, &catalog, selection, actor)
        })
    }

    pub fn fetch_equipment_one(&self, id: &str) -> Result<Option<EquipmentRecord>> {
        let id = parse_equipment_id(id)?;
        self.transaction(|connection| equipment::fetch_one(connection, &self.resolver, &id))
    }

    /// Standardize an image and store it in the slot of `view`.
    ///
    /// Invalid input is rejected before the database is accessed.
    pub fn upload_view(
        &self,
        id: &str,
        view: &str,
        data: &[u8],
        file_name: Option<&str>,
        mime_hint: Option<&str>,
        actor: Option<&str>,
    ) -> Result<()> {
        let id = parse_equipment_id(id)?;
        let slot = parse_view_slot(view)?;
        let upload = Upload {
            file_name,
            mime_hint,
            data,
        };
        let image = prepare_upload(&id, slot, &upload, &self.upload)?;
        self.transaction(|connection| photo::store_upload(connection, &id, slot, &image, actor))
    }

    pub fn remove_view(&self, id: &str, view: &str) -> Result<()> {
        let id = parse_equipment_id(id)?;
        let slot = parse_view_slot(view)?;
        self.transaction(|connection| photo::remove_view(connection, &id, slot))
    }

    pub fn resolve_name_candidates(
        &self,
        term: &str,
        limit: Option<usize>,
    ) -> Result<Vec<NameCandidate>> {
        self.transaction(|connection| {
            let column = self.catalog_column(connection);
            let location = self.catalog_location(column.as_deref());
            catalog::resolve_name_candidates(connection, &location, term, limit)
        })
    }

    pub fn name_catalog(&self) -> Result<NameCatalog> {
        self.transaction(|connection| Ok(self.load_name_catalog(connection)))
    }

    /// The mapping that is currently in effect.
    pub fn view_schema(&self) -> Result<Arc<ViewSchema>> {
        self.transaction(|connection| schema::resolve(connection, &self.resolver))
    }

    /// Introspect the reporting view, ignoring any configured mapping.
    pub fn detect_columns(&self) -> Result<ViewSchema> {
        self.transaction(|connection| {
            schema::detect_view_schema(connection, self.resolver.object().clone())
        })
    }
}

#[cfg(test)]
mod tests;
