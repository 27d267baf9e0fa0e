// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use equiphoto_core::schema::{ObjectRef, RowValues, ViewSchema};

use crate::prelude::*;

/// A monotonic counter that changes whenever the database schema changes.
pub type SchemaVersion = i64;

/// Read-only access to the foreign reporting view.
pub trait ReportingViewRepo {
    fn load_schema_version(&mut self) -> RepoResult<SchemaVersion>;

    /// Column names in declaration order, empty if the object does not exist.
    fn load_object_columns(&mut self, object: &ObjectRef) -> RepoResult<Vec<String>>;

    /// The relevant columns of the row whose id matches.
    ///
    /// Both the id column and `id` are compared as text.
    fn load_reporting_row(
        &mut self,
        schema: &ViewSchema,
        id: &str,
    ) -> RepoResult<Option<RowValues>>;

    /// Distinct, non-null values of a column as text in ascending order.
    fn load_distinct_column_values(
        &mut self,
        object: &ObjectRef,
        column: &str,
    ) -> RepoResult<Vec<String>>;
}
