// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Mapping of logical roles onto the columns of a foreign reporting view.

use std::{fmt, str::FromStr};

use hashbrown::HashMap;

use crate::equipment::ReportingRecord;

/// The conventional default schema of an `SQLite` database.
pub const DEFAULT_SCHEMA: &str = "main";

pub const ID_CANDIDATES: &[&str] = &[
    "Equipment",
    "EquipmentID",
    "EquipmentId",
    "Equipment_ID",
    "EquipmentKey",
    "EquipmentCode",
    "Code",
    "Id",
    "ID",
];

pub const NAME_CANDIDATES: &[&str] = &[
    "EquipmentName",
    "Name",
    "EquipmentDesc",
    "Description",
    "Nama",
    "Title",
];

pub const UPDATED_AT_CANDIDATES: &[&str] = &[
    "UpdatedAt",
    "UpdatedDate",
    "UpdateDate",
    "ModifiedAt",
    "ModifiedDate",
    "LastUpdate",
    "LastUpdated",
    "LastModified",
    "TanggalUpdate",
];

pub const UPDATED_BY_CANDIDATES: &[&str] = &[
    "CreatedBy",
    "CreateBy",
    "UpdatedBy",
    "User",
    "Username",
    "Created_User",
    "CreatedByName",
    "UpdateBY",
];

/// Additional value names that are tried after the resolved name column.
pub const NAME_FALLBACK_KEYS: &[&str] = &[
    "equipmentname",
    "name",
    "equipmentdesc",
    "description",
    "nama",
    "title",
];

pub const UPDATED_AT_FALLBACK_KEYS: &[&str] = &["lastupdate", "updateddate", "updatedat"];

pub const UPDATED_BY_FALLBACK_KEYS: &[&str] = &["updateby", "createdby", "username", "user"];

/// A schema-qualified reference to a table or view.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectRef {
    pub schema: String,
    pub name: String,
}

impl ObjectRef {
    #[must_use]
    pub fn new(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            name: name.into(),
        }
    }

    /// Parse `schema.name`, `[schema].[name]`, `"schema"."name"` or
    /// a bare `name` in the default schema.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        let (schema, name) = split_qualified(input);
        let name = unquote_identifier(name);
        if name.is_empty() {
            return None;
        }
        let schema = schema
            .map(unquote_identifier)
            .filter(|schema| !schema.is_empty())
            .unwrap_or(DEFAULT_SCHEMA);
        Some(Self::new(schema, name))
    }

    /// Both parts quoted for embedding into SQL.
    #[must_use]
    pub fn quoted(&self) -> String {
        format!(
            "{}.{}",
            quote_identifier(&self.schema),
            quote_identifier(&self.name)
        )
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { schema, name } = self;
        write!(f, "{schema}.{name}")
    }
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("invalid object reference")]
pub struct InvalidObjectRef;

impl FromStr for ObjectRef {
    type Err = InvalidObjectRef;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Self::parse(input).ok_or(InvalidObjectRef)
    }
}

/// Split at the first dot that is not enclosed in brackets or quotes.
fn split_qualified(input: &str) -> (Option<&str>, &str) {
    let mut closing = None;
    for (index, c) in input.char_indices() {
        match (closing, c) {
            (None, '[') => closing = Some(']'),
            (None, '"') => closing = Some('"'),
            (None, '.') => return (Some(&input[..index]), &input[index + 1..]),
            (Some(expected), c) if c == expected => closing = None,
            _ => {}
        }
    }
    (None, input)
}

fn unquote_identifier(ident: &str) -> &str {
    let ident = ident.trim();
    ident
        .strip_prefix('[')
        .and_then(|ident| ident.strip_suffix(']'))
        .or_else(|| {
            ident
                .strip_prefix('"')
                .and_then(|ident| ident.strip_suffix('"'))
        })
        .unwrap_or(ident)
        .trim()
}

/// Quote an identifier with double quotes, escaping embedded quotes.
#[must_use]
pub fn quote_identifier(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// The logical roles of reporting view columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ColumnMapping {
    pub id: Option<String>,
    pub name: Option<String>,
    pub updated_at: Option<String>,
    pub updated_by: Option<String>,
}

impl ColumnMapping {
    /// Records can only be correlated if the id role is resolved.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        self.id.is_some()
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        let Self {
            id,
            name,
            updated_at,
            updated_by,
        } = self;
        [id, name, updated_at, updated_by]
            .into_iter()
            .filter_map(Option::as_deref)
    }
}

/// How the columns of the reporting view are mapped onto roles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ColumnMappingStrategy {
    /// Configured upfront. The view is never introspected.
    Explicit(ColumnMapping),

    /// Detected heuristically from the column names of the view.
    #[default]
    Detect,
}

/// Find the first candidate that matches one of the columns.
///
/// Candidates are tried in order and compared case-insensitively. The
/// `avoid` column is never returned.
#[must_use]
pub fn find_column<'a>(
    columns: &'a [String],
    candidates: &[&str],
    avoid: Option<&str>,
) -> Option<&'a str> {
    candidates.iter().find_map(|candidate| {
        columns
            .iter()
            .map(String::as_str)
            .filter(|column| avoid.is_none_or(|avoid| !column.eq_ignore_ascii_case(avoid)))
            .find(|column| column.eq_ignore_ascii_case(candidate))
    })
}

#[must_use]
pub fn detect_column_mapping(columns: &[String]) -> ColumnMapping {
    let id = find_column(columns, ID_CANDIDATES, None);
    let name = find_column(columns, NAME_CANDIDATES, id);
    let updated_at = find_column(columns, UPDATED_AT_CANDIDATES, None);
    let updated_by = find_column(columns, UPDATED_BY_CANDIDATES, None);
    ColumnMapping {
        id: id.map(ToOwned::to_owned),
        name: name.map(ToOwned::to_owned),
        updated_at: updated_at.map(ToOwned::to_owned),
        updated_by: updated_by.map(ToOwned::to_owned),
    }
}

/// The resolved shape of the reporting view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSchema {
    pub object: ObjectRef,

    /// All columns of the view, empty if not introspected.
    pub columns: Vec<String>,

    pub mapping: ColumnMapping,

    /// Try the well-known fallback names if a resolved column has no value.
    pub fallback_keys: bool,
}

impl ViewSchema {
    #[must_use]
    pub fn detect(object: ObjectRef, columns: Vec<String>) -> Self {
        let mapping = detect_column_mapping(&columns);
        Self {
            object,
            columns,
            mapping,
            fallback_keys: true,
        }
    }

    #[must_use]
    pub const fn explicit(object: ObjectRef, mapping: ColumnMapping) -> Self {
        Self {
            object,
            columns: Vec::new(),
            mapping,
            fallback_keys: false,
        }
    }

    /// The columns that need to be fetched for building a [`ReportingRecord`].
    #[must_use]
    pub fn relevant_columns(&self) -> Vec<String> {
        let mut relevant: Vec<String> = Vec::with_capacity(8);
        let mut push = |column: &str| {
            if !relevant
                .iter()
                .any(|existing| existing.eq_ignore_ascii_case(column))
            {
                relevant.push(column.to_owned());
            }
        };
        self.mapping.columns().for_each(&mut push);
        if self.fallback_keys {
            let fallback_keys = NAME_FALLBACK_KEYS
                .iter()
                .chain(UPDATED_AT_FALLBACK_KEYS)
                .chain(UPDATED_BY_FALLBACK_KEYS);
            for key in fallback_keys {
                if let Some(column) = self
                    .columns
                    .iter()
                    .find(|column| column.eq_ignore_ascii_case(key))
                {
                    push(column.as_str());
                }
            }
        }
        relevant
    }

    fn value_keys<'a>(&'a self, resolved: Option<&'a str>, fallback: &'a [&'a str]) -> Vec<&'a str> {
        let fallback = if self.fallback_keys { fallback } else { &[] };
        resolved.into_iter().chain(fallback.iter().copied()).collect()
    }

    /// Convert a row of the view into a typed record.
    ///
    /// Returns `None` if the id role is unresolved or has no value.
    #[must_use]
    pub fn reporting_record(&self, row: &RowValues) -> Option<ReportingRecord> {
        let ColumnMapping {
            id,
            name,
            updated_at,
            updated_by,
        } = &self.mapping;
        let id_column = id.as_deref()?;
        let id = pick_value(row, [id_column], None)?.to_owned();
        let name = pick_value(
            row,
            self.value_keys(name.as_deref(), NAME_FALLBACK_KEYS),
            Some(id_column),
        );
        let updated_at = pick_value(
            row,
            self.value_keys(updated_at.as_deref(), UPDATED_AT_FALLBACK_KEYS),
            None,
        );
        let updated_by = pick_value(
            row,
            self.value_keys(updated_by.as_deref(), UPDATED_BY_FALLBACK_KEYS),
            None,
        );
        Some(ReportingRecord {
            id,
            name: name.map(ToOwned::to_owned),
            updated_at: updated_at.map(ToOwned::to_owned),
            updated_by: updated_by.map(ToOwned::to_owned),
        })
    }
}

/// Text values of a single row, looked up case-insensitively by column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowValues {
    values: HashMap<String, String>,
}

impl RowValues {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Absent values are not stored.
    pub fn insert(&mut self, column: &str, value: Option<String>) {
        if let Some(value) = value {
            self.values.insert(column.to_lowercase(), value);
        }
    }

    #[must_use]
    pub fn get(&self, column: &str) -> Option<&str> {
        self.values.get(&column.to_lowercase()).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, Option<V>)> for RowValues
where
    K: AsRef<str>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, Option<V>)>>(iter: I) -> Self {
        let mut row = Self::new();
        for (column, value) in iter {
            row.insert(column.as_ref(), value.map(Into::into));
        }
        row
    }
}

/// The first non-blank value among `keys`.
///
/// Empty keys and the `avoid` column are skipped.
#[must_use]
pub fn pick_value<'a, 'k>(
    row: &'a RowValues,
    keys: impl IntoIterator<Item = &'k str>,
    avoid: Option<&str>,
) -> Option<&'a str> {
    keys.into_iter()
        .filter(|key| !key.trim().is_empty())
        .filter(|key| avoid.is_none_or(|avoid| !key.eq_ignore_ascii_case(avoid)))
        .filter_map(|key| row.get(key))
        .find(|value| !value.trim().is_empty())
}
