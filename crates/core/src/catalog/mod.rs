// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! The external catalog of canonical equipment names.

use std::ops::RangeInclusive;

use hashbrown::HashSet;
use strum::{AsRefStr, Display};

use crate::util::string::normalize_key;

/// Autocomplete terms must have at least this many characters.
pub const MIN_TERM_LEN: usize = 3;

pub const DEFAULT_CANDIDATES_LIMIT: usize = 10;

pub const CANDIDATES_LIMIT_RANGE: RangeInclusive<usize> = 1..=50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display)]
#[strum(serialize_all = "lowercase")]
pub enum CatalogSource {
    Database,
    File,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Upper-cased and trimmed lookup key.
    pub key: String,

    /// Canonical display form.
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NameCandidate {
    pub id: String,
    pub name: String,
}

/// How a name for a new equipment item has been entered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameSelection {
    /// Picked from the suggestions.
    Selected(String),

    /// Typed by the operator.
    Query(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameResolution {
    Resolved(String),
    QueryTooShort,
    NotFound,
    Ambiguous(Vec<String>),
}

/// Ordered names, unique by their normalized key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameCatalog {
    source: CatalogSource,
    entries: Vec<CatalogEntry>,
}

impl NameCatalog {
    /// Blank names are skipped and the first occurrence of each key wins.
    #[must_use]
    pub fn from_names<I>(source: CatalogSource, names: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut keys = HashSet::new();
        let entries = names
            .into_iter()
            .filter_map(|name| {
                let name = name.as_ref().trim();
                if name.is_empty() {
                    return None;
                }
                let key = normalize_key(name);
                if !keys.insert(key.clone()) {
                    return None;
                }
                Some(CatalogEntry {
                    key,
                    name: name.to_owned(),
                })
            })
            .collect();
        Self { source, entries }
    }

    #[must_use]
    pub const fn empty(source: CatalogSource) -> Self {
        Self {
            source,
            entries: Vec::new(),
        }
    }

    /// Parse newline-delimited names.
    #[must_use]
    pub fn from_lines(source: CatalogSource, text: &str) -> Self {
        Self::from_names(source, text.lines())
    }

    #[must_use]
    pub const fn source(&self) -> CatalogSource {
        self.source
    }

    #[must_use]
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up the canonical form by exact (normalized) key.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        let key = normalize_key(name);
        self.entries
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| entry.name.as_str())
    }

    /// Suggestions for autocompletion.
    ///
    /// Terms shorter than [`MIN_TERM_LEN`] characters yield no suggestions.
    /// Names contained in `existing` (normalized keys) are excluded. The
    /// `limit` is clamped into [`CANDIDATES_LIMIT_RANGE`].
    #[must_use]
    pub fn candidates(
        &self,
        term: &str,
        existing: &HashSet<String>,
        limit: Option<usize>,
    ) -> Vec<NameCandidate> {
        let term = normalize_key(term);
        if term.chars().count() < MIN_TERM_LEN {
            return Vec::new();
        }
        let limit = limit.unwrap_or(DEFAULT_CANDIDATES_LIMIT).clamp(
            *CANDIDATES_LIMIT_RANGE.start(),
            *CANDIDATES_LIMIT_RANGE.end(),
        );
        self.entries
            .iter()
            .filter(|entry| !existing.contains(&normalize_key(&entry.name)))
            .filter(|entry| entry.key.contains(&term) || entry.name.to_uppercase().contains(&term))
            .take(limit)
            .map(|entry| NameCandidate {
                id: entry.name.clone(),
                name: entry.name.clone(),
            })
            .collect()
    }

    /// Resolve the name of a new equipment item.
    ///
    /// A selected name must be part of the catalog. A typed query
    /// resolves on an exact key match or a single substring match.
    #[must_use]
    pub fn resolve_selection(&self, selection: &NameSelection) -> NameResolution {
        match selection {
            NameSelection::Selected(selected) => self
                .get(selected)
                .map_or(NameResolution::NotFound, |name| {
                    NameResolution::Resolved(name.to_owned())
                }),
            NameSelection::Query(query) => {
                let key = normalize_key(query);
                if key.chars().count() < MIN_TERM_LEN {
                    return NameResolution::QueryTooShort;
                }
                if let Some(name) = self.get(&key) {
                    return NameResolution::Resolved(name.to_owned());
                }
                let mut hits = self
                    .entries
                    .iter()
                    .filter(|entry| entry.key.contains(&key))
                    .map(|entry| entry.name.clone())
                    .collect::<Vec<_>>();
                match hits.len() {
                    0 => NameResolution::NotFound,
                    1 => NameResolution::Resolved(hits.remove(0)),
                    _ => NameResolution::Ambiguous(hits),
                }
            }
        }
    }
}

impl NameSelection {
    /// A non-blank selection takes precedence over the query.
    #[must_use]
    pub fn new(selected: Option<&str>, query: Option<&str>) -> Self {
        match selected.map(str::trim).filter(|selected| !selected.is_empty()) {
            Some(selected) => Self::Selected(selected.to_owned()),
            None => Self::Query(query.unwrap_or_default().trim().to_owned()),
        }
    }
}
