// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use equiphoto_core::{EquipmentId, ViewSlot, media::InlineImage};
use equiphoto_usecases::photo as uc;

use crate::{DbConnection, RepoConnection, Result};

pub fn store_upload(
    connection: &mut DbConnection,
    id: &EquipmentId,
    slot: ViewSlot,
    image: &InlineImage,
    actor: Option<&str>,
) -> Result<()> {
    let mut repo = RepoConnection::new(connection);
    uc::store_upload(&mut repo, id, slot, image, actor).map_err(Into::into)
}

pub fn remove_view(connection: &mut DbConnection, id: &EquipmentId, slot: ViewSlot) -> Result<()> {
    let mut repo = RepoConnection::new(connection);
    uc::remove_view(&mut repo, id, slot).map_err(Into::into)
}
