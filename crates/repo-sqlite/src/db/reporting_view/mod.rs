// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Dynamic queries against the foreign reporting view.
//!
//! The shape of the view is only known at runtime. All identifiers are
//! quoted before they are embedded into SQL.

use diesel::sql_types::{BigInt, Nullable, Text};

use equiphoto_core::schema::{ObjectRef, ViewSchema, quote_identifier};

use crate::prelude::*;

#[derive(Debug, QueryableByName)]
pub(crate) struct SchemaVersionRow {
    #[diesel(sql_type = BigInt)]
    pub(crate) schema_version: i64,
}

pub(crate) const SELECT_SCHEMA_VERSION_SQL: &str =
    "SELECT schema_version FROM pragma_schema_version()";

#[derive(Debug, QueryableByName)]
pub(crate) struct ColumnNameRow {
    #[diesel(sql_type = Text)]
    pub(crate) name: String,
}

/// Bind the name and the schema of the object.
pub(crate) const SELECT_COLUMN_NAMES_SQL: &str =
    "SELECT name FROM pragma_table_info(?, ?) ORDER BY cid";

#[derive(Debug, QueryableByName)]
pub(crate) struct JsonRow {
    #[diesel(sql_type = Nullable<Text>)]
    pub(crate) row_json: Option<String>,
}

/// Select the relevant columns of a single row as a JSON object.
///
/// Every value is cast to text. Bind the id as text.
pub(crate) fn select_row_by_id_sql(schema: &ViewSchema, id_column: &str) -> String {
    let json_args = schema
        .relevant_columns()
        .iter()
        .map(|column| {
            format!(
                "{},CAST({} AS TEXT)",
                quote_string_literal(column),
                quote_identifier(column)
            )
        })
        .collect::<Vec<_>>()
        .join(",");
    format!(
        "SELECT json_object({json_args}) AS row_json FROM {object} WHERE CAST({id} AS TEXT) = ? \
         LIMIT 1",
        object = schema.object.quoted(),
        id = quote_identifier(id_column),
    )
}

#[derive(Debug, QueryableByName)]
pub(crate) struct TextValueRow {
    #[diesel(sql_type = Text)]
    pub(crate) value: String,
}

pub(crate) fn select_distinct_values_sql(object: &ObjectRef, column: &str) -> String {
    let column = quote_identifier(column);
    format!(
        "SELECT DISTINCT CAST({column} AS TEXT) AS value FROM {object} WHERE {column} IS NOT NULL \
         ORDER BY value",
        object = object.quoted(),
    )
}
