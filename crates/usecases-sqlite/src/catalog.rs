// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use equiphoto_core::catalog::{NameCandidate, NameCatalog};
use equiphoto_usecases::catalog::{self as uc, CatalogLocation};

use crate::{DbConnection, RepoConnection, Result};

pub fn load_name_catalog(
    connection: &mut DbConnection,
    location: &CatalogLocation<'_>,
) -> NameCatalog {
    let mut repo = RepoConnection::new(connection);
    uc::load_name_catalog(&mut repo, location)
}

pub fn resolve_name_candidates(
    connection: &mut DbConnection,
    location: &CatalogLocation<'_>,
    term: &str,
    limit: Option<usize>,
) -> Result<Vec<NameCandidate>> {
    let mut repo = RepoConnection::new(connection);
    uc::resolve_name_candidates(&mut repo, location, term, limit).map_err(Into::into)
}
