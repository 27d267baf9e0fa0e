// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Resolution of the reporting view's shape.

use std::sync::Arc;

use parking_lot::Mutex;

use equiphoto_core::schema::{ColumnMappingStrategy, ObjectRef, ViewSchema};
use equiphoto_repo::reporting::{ReportingViewRepo, SchemaVersion};

use crate::Result;

#[derive(Debug)]
struct CachedViewSchema {
    schema_version: SchemaVersion,
    view_schema: Arc<ViewSchema>,
}

#[derive(Debug)]
enum Resolution {
    Explicit(Arc<ViewSchema>),
    Detect {
        object: ObjectRef,
        cached: Mutex<Option<CachedViewSchema>>,
    },
}

/// Maps the columns of the reporting view onto logical roles.
///
/// Detected mappings are cached until the schema of the database changes.
#[derive(Debug)]
pub struct ViewSchemaResolver {
    resolution: Resolution,
}

impl ViewSchemaResolver {
    #[must_use]
    pub fn new(object: ObjectRef, strategy: ColumnMappingStrategy) -> Self {
        let resolution = match strategy {
            ColumnMappingStrategy::Explicit(mapping) => {
                Resolution::Explicit(Arc::new(ViewSchema::explicit(object, mapping)))
            }
            ColumnMappingStrategy::Detect => Resolution::Detect {
                object,
                cached: Mutex::new(None),
            },
        };
        Self { resolution }
    }

    #[must_use]
    pub fn object(&self) -> &ObjectRef {
        match &self.resolution {
            Resolution::Explicit(view_schema) => &view_schema.object,
            Resolution::Detect { object, .. } => object,
        }
    }

    pub fn resolve(&self, repo: &mut impl ReportingViewRepo) -> Result<Arc<ViewSchema>> {
        let (object, cached) = match &self.resolution {
            Resolution::Explicit(view_schema) => return Ok(Arc::clone(view_schema)),
            Resolution::Detect { object, cached } => (object, cached),
        };
        let schema_version = repo.load_schema_version()?;
        if let Some(cached) = cached.lock().as_ref() {
            if cached.schema_version == schema_version {
                return Ok(Arc::clone(&cached.view_schema));
            }
            log::debug!(
                "Schema version changed from {} to {schema_version}",
                cached.schema_version
            );
        }
        let view_schema = Arc::new(detect_view_schema(repo, object.clone())?);
        *cached.lock() = Some(CachedViewSchema {
            schema_version,
            view_schema: Arc::clone(&view_schema),
        });
        Ok(view_schema)
    }

    /// Discard a cached detection result.
    pub fn invalidate(&self) {
        if let Resolution::Detect { cached, .. } = &self.resolution {
            cached.lock().take();
        }
    }
}

/// Introspect the view and detect the column mapping heuristically.
pub fn detect_view_schema(
    repo: &mut impl ReportingViewRepo,
    object: ObjectRef,
) -> Result<ViewSchema> {
    let columns = repo.load_object_columns(&object)?;
    if columns.is_empty() {
        log::debug!("No columns found for {object}");
    }
    let view_schema = ViewSchema::detect(object, columns);
    log::debug!(
        "Detected column mapping for {}: {:?}",
        view_schema.object,
        view_schema.mapping
    );
    Ok(view_schema)
}

#[cfg(test)]
mod tests;
