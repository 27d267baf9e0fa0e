// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use equiphoto_core::{
    EquipmentId, EquipmentRecord,
    catalog::{NameCatalog, NameSelection},
};
use equiphoto_repo::prelude::Page;
use equiphoto_usecases::{
    equipment::{self as uc, CreateOutcome},
    schema::ViewSchemaResolver,
};

use crate::{DbConnection, RepoConnection, Result};

pub fn list(
    connection: &mut DbConnection,
    search: Option<&str>,
    page: &Page,
) -> Result<(Vec<EquipmentRecord>, u64)> {
    let mut repo = RepoConnection::new(connection);
    uc::list(&mut repo, search, page).map_err(Into::into)
}

pub fn fetch_one(
    connection: &mut DbConnection,
    resolver: &ViewSchemaResolver,
    id: &EquipmentId,
) -> Result<Option<EquipmentRecord>> {
    let mut repo = RepoConnection::new(connection);
    uc::fetch_one(&mut repo, resolver, id).map_err(Into::into)
}

pub fn create_row(
    connection: &mut DbConnection,
    canonical_name: &str,
    actor: Option<&str>,
) -> Result<bool> {
    let mut repo = RepoConnection::new(connection);
    uc::create_row(&mut repo, canonical_name, actor).map_err(Into::into)
}

pub fn create(
    connection: &mut DbConnection,
    catalog: &NameCatalog,
    selection: &NameSelection,
    actor: Option<&str>,
) -> Result<CreateOutcome> {
    let mut repo = RepoConnection::new(connection);
    uc::create(&mut repo, catalog, selection, actor).map_err(Into::into)
}
