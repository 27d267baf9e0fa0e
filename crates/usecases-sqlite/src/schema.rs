// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::sync::Arc;

use equiphoto_core::schema::{ObjectRef, ViewSchema};
use equiphoto_usecases::schema::{self as uc, ViewSchemaResolver};

use crate::{DbConnection, RepoConnection, Result};

pub fn resolve(
    connection: &mut DbConnection,
    resolver: &ViewSchemaResolver,
) -> Result<Arc<ViewSchema>> {
    let mut repo = RepoConnection::new(connection);
    resolver.resolve(&mut repo).map_err(Into::into)
}

pub fn detect_view_schema(connection: &mut DbConnection, object: ObjectRef) -> Result<ViewSchema> {
    let mut repo = RepoConnection::new(connection);
    uc::detect_view_schema(&mut repo, object).map_err(Into::into)
}
