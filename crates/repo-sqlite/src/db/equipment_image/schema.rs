// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

diesel::table! {
    equipment_image (equipment) {
        equipment -> Text,
        display_name -> Nullable<Text>,
        front_image -> Nullable<Text>,
        rear_image -> Nullable<Text>,
        right_image -> Nullable<Text>,
        left_image -> Nullable<Text>,
        last_updated_ms -> BigInt,
        last_updated_by -> Nullable<Text>,
    }
}
