// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{fs, io, path::Path};

use hashbrown::HashSet;

use equiphoto_core::{
    catalog::{CatalogSource, MIN_TERM_LEN, NameCandidate, NameCatalog},
    schema::ObjectRef,
    util::string::normalize_key,
};
use equiphoto_repo::{photo::PhotoRepo, reporting::ReportingViewRepo};

use crate::Result;

/// Where to look for canonical equipment names.
#[derive(Debug, Clone, Copy)]
pub struct CatalogLocation<'a> {
    pub object: &'a ObjectRef,

    /// The column of `object` that contains the names.
    pub column: Option<&'a str>,

    /// Newline-delimited names, used if the database yields nothing.
    pub names_file: Option<&'a Path>,
}

pub fn read_names_file(path: &Path) -> io::Result<NameCatalog> {
    let text = fs::read_to_string(path)?;
    Ok(NameCatalog::from_lines(CatalogSource::File, &text))
}

/// Load the names from the database, falling back to the names file.
///
/// Never fails. An unavailable catalog is empty.
pub fn load_name_catalog(
    repo: &mut impl ReportingViewRepo,
    location: &CatalogLocation<'_>,
) -> NameCatalog {
    let CatalogLocation {
        object,
        column,
        names_file,
    } = *location;
    if let Some(column) = column {
        match repo.load_distinct_column_values(object, column) {
            Ok(names) => {
                let catalog = NameCatalog::from_names(CatalogSource::Database, names);
                if !catalog.is_empty() {
                    log::debug!("Loaded {} name(s) from {object}", catalog.len());
                    return catalog;
                }
                log::debug!("No names found in column {column} of {object}");
            }
            Err(err) => {
                log::warn!("Failed to load names from column {column} of {object}: {err}");
            }
        }
    }
    let Some(names_file) = names_file else {
        return NameCatalog::empty(CatalogSource::File);
    };
    match read_names_file(names_file) {
        Ok(catalog) => {
            log::debug!(
                "Loaded {} name(s) from file {}",
                catalog.len(),
                names_file.display()
            );
            catalog
        }
        Err(err) => {
            log::warn!("Failed to read names file {}: {err}", names_file.display());
            NameCatalog::empty(CatalogSource::File)
        }
    }
}

/// Normalized names of all existing equipment items.
pub fn load_existing_name_keys(repo: &mut impl PhotoRepo) -> Result<HashSet<String>> {
    let keys = repo.load_photo_name_keys()?;
    Ok(keys.into_iter().collect())
}

/// Autocomplete suggestions for names that have no equipment item yet.
pub fn resolve_name_candidates<Repo>(
    repo: &mut Repo,
    location: &CatalogLocation<'_>,
    term: &str,
    limit: Option<usize>,
) -> Result<Vec<NameCandidate>>
where
    Repo: PhotoRepo + ReportingViewRepo,
{
    if normalize_key(term).chars().count() < MIN_TERM_LEN {
        return Ok(Vec::new());
    }
    let catalog = load_name_catalog(repo, location);
    let existing = load_existing_name_keys(repo)?;
    Ok(catalog.candidates(term, &existing, limit))
}
