// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use equiphoto_core::{
    EquipmentId, EquipmentRecord, PhotoSlots, ViewSlot,
    catalog::{NameCatalog, NameResolution, NameSelection},
    equipment::merge_equipment_record,
    media::{canonical_file_name, ensure_named_data_uri},
    util::clock::UtcDateTimeMs,
};
use equiphoto_repo::{
    photo::PhotoRepo,
    prelude::{OptionalRepoResult as _, Page},
    reporting::ReportingViewRepo,
};

use crate::{InputError, Result, schema::ViewSchemaResolver};

pub fn parse_equipment_id(id: &str) -> Result<EquipmentId> {
    EquipmentId::new(id)
        .ok_or_else(|| InputError(anyhow::anyhow!("Missing equipment name")).into())
}

/// A page of equipment items and the total number of matches.
pub fn list(
    repo: &mut impl PhotoRepo,
    search: Option<&str>,
    page: &Page,
) -> Result<(Vec<EquipmentRecord>, u64)> {
    let total = repo.count_photo_records(search)?;
    let records = repo
        .load_photo_records(search, page)?
        .into_iter()
        .map(EquipmentRecord::from_photo_record)
        .collect();
    Ok((records, total))
}

/// Attach a download name to every inline image.
fn name_images(id: &EquipmentId, images: &mut PhotoSlots<Option<String>>) {
    for slot in ViewSlot::ALL {
        let Some(uri) = images.get_mut(slot).as_mut() else {
            continue;
        };
        let media_type = uri
            .strip_prefix("data:")
            .and_then(|rest| rest.split([';', ',']).next())
            .unwrap_or_default();
        let file_name = canonical_file_name(id.as_str(), slot, media_type);
        *uri = ensure_named_data_uri(uri.as_str(), &file_name);
    }
}

/// The merged record of a single equipment item.
///
/// Returns `None` if the reporting view has no matching row or if its
/// id column could not be resolved. Failures of the underlying storage
/// are propagated.
pub fn fetch_one<Repo>(
    repo: &mut Repo,
    resolver: &ViewSchemaResolver,
    id: &EquipmentId,
) -> Result<Option<EquipmentRecord>>
where
    Repo: PhotoRepo + ReportingViewRepo,
{
    let view_schema = resolver.resolve(repo)?;
    if !view_schema.mapping.is_resolved() {
        log::debug!("Unresolved id column of {}", view_schema.object);
        return Ok(None);
    }
    let Some(row) = repo.load_reporting_row(&view_schema, id.as_str())? else {
        return Ok(None);
    };
    let Some(reporting) = view_schema.reporting_record(&row) else {
        return Ok(None);
    };
    let photo = repo.load_photo_record(id).optional()?;
    let mut record = merge_equipment_record(id.clone(), Some(reporting), photo, UtcDateTimeMs::now());
    name_images(id, &mut record.images);
    Ok(Some(record))
}

/// Create an empty equipment item unless it already exists.
///
/// Returns `true` if a new item has been created.
pub fn create_row(
    repo: &mut impl PhotoRepo,
    canonical_name: &str,
    actor: Option<&str>,
) -> Result<bool> {
    let id = parse_equipment_id(canonical_name)?;
    let created =
        repo.insert_photo_record_if_absent(&id, Some(id.as_str()), UtcDateTimeMs::now(), actor)?;
    if created {
        log::info!("Created equipment {id}");
    } else {
        log::debug!("Equipment {id} already exists");
    }
    Ok(created)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    Created(EquipmentId),
    AlreadyExists(EquipmentId),
    QueryTooShort,
    NotFound,
    Ambiguous(Vec<String>),
}

/// Create an equipment item for a name from the catalog.
///
/// Free-text names that are not part of the catalog are rejected.
pub fn create(
    repo: &mut impl PhotoRepo,
    catalog: &NameCatalog,
    selection: &NameSelection,
    actor: Option<&str>,
) -> Result<CreateOutcome> {
    let canonical_name = match catalog.resolve_selection(selection) {
        NameResolution::Resolved(canonical_name) => canonical_name,
        NameResolution::QueryTooShort => return Ok(CreateOutcome::QueryTooShort),
        NameResolution::NotFound => return Ok(CreateOutcome::NotFound),
        NameResolution::Ambiguous(names) => return Ok(CreateOutcome::Ambiguous(names)),
    };
    let id = parse_equipment_id(&canonical_name)?;
    let outcome = if create_row(repo, id.as_str(), actor)? {
        CreateOutcome::Created(id)
    } else {
        CreateOutcome::AlreadyExists(id)
    };
    Ok(outcome)
}
