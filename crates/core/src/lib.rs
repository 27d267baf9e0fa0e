// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

// Importing all enum variants into a narrow, local scope is acceptable.
#![allow(clippy::enum_glob_use)]

pub mod catalog;
pub mod equipment;
pub mod media;
pub mod schema;
pub mod util;

pub use self::equipment::{
    EquipmentId, EquipmentRecord, PhotoRecord, PhotoSlots, ReportingRecord, ViewSlot,
};

pub mod prelude {
    // Re-export trait methods from semval
    pub use semval::{IsValid as _, Validate as _};

    pub(crate) use semval::prelude::*;

    pub(crate) use crate::util::clock::*;
}
