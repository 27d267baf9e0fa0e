// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use diesel::sql_types::Text;

use equiphoto_core::schema::{ObjectRef, RowValues, ViewSchema};
use equiphoto_repo::reporting::{ReportingViewRepo, SchemaVersion};

use crate::{db::reporting_view::*, prelude::*};

fn parse_json_row(row_json: &str) -> anyhow::Result<RowValues> {
    let object = serde_json::from_str::<serde_json::Map<String, serde_json::Value>>(row_json)?;
    let row = object
        .into_iter()
        .map(|(column, value)| {
            let value = match value {
                serde_json::Value::Null => None,
                serde_json::Value::String(value) => Some(value),
                value => Some(value.to_string()),
            };
            (column, value)
        })
        .collect();
    Ok(row)
}

impl ReportingViewRepo for crate::Connection<'_> {
    fn load_schema_version(&mut self) -> RepoResult<SchemaVersion> {
        diesel::sql_query(SELECT_SCHEMA_VERSION_SQL)
            .get_result::<SchemaVersionRow>(self.as_mut())
            .map_err(repo_error)
            .map(|row| row.schema_version)
    }

    fn load_object_columns(&mut self, object: &ObjectRef) -> RepoResult<Vec<String>> {
        let rows = diesel::sql_query(SELECT_COLUMN_NAMES_SQL)
            .bind::<Text, _>(object.name.as_str())
            .bind::<Text, _>(object.schema.as_str())
            .load::<ColumnNameRow>(self.as_mut())
            .map_err(repo_error)?;
        log::debug!("Found {} column(s) in {object}", rows.len());
        Ok(rows.into_iter().map(|row| row.name).collect())
    }

    fn load_reporting_row(
        &mut self,
        schema: &ViewSchema,
        id: &str,
    ) -> RepoResult<Option<RowValues>> {
        let Some(id_column) = schema.mapping.id.as_deref() else {
            log::debug!("No id column resolved for {}", schema.object);
            return Ok(None);
        };
        let sql = select_row_by_id_sql(schema, id_column);
        let row = diesel::sql_query(sql)
            .bind::<Text, _>(id)
            .get_result::<JsonRow>(self.as_mut())
            .optional()
            .map_err(repo_error)?;
        let Some(row_json) = row.and_then(|row| row.row_json) else {
            return Ok(None);
        };
        parse_json_row(&row_json).map(Some).map_err(Into::into)
    }

    fn load_distinct_column_values(
        &mut self,
        object: &ObjectRef,
        column: &str,
    ) -> RepoResult<Vec<String>> {
        let sql = select_distinct_values_sql(object, column);
        let rows = diesel::sql_query(sql)
            .load::<TextValueRow>(self.as_mut())
            .map_err(repo_error)?;
        Ok(rows.into_iter().map(|row| row.value).collect())
    }
}
