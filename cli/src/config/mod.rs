// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{
    fs, io,
    num::NonZeroU32,
    path::{Path, PathBuf},
};

use anyhow::{Context as _, anyhow};
use serde::{Deserialize, Serialize};

use equiphoto_core::{
    schema::{ColumnMappingStrategy, ObjectRef},
    util::page::{DEFAULT_PAGE_SIZE, PageSize},
};
use equiphoto_media::{standardize::StandardizeConfig, upload::DEFAULT_MAX_UPLOAD_BYTES};
use equiphoto_storage_sqlite::connection::Storage;
use equiphoto_usecases::photo::UploadParams;
use equiphoto_usecases_sqlite::ServiceConfig;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Config {
    pub(crate) database: DatabaseConfig,
    pub(crate) reporting_view: ReportingViewConfig,
    pub(crate) image: StandardizeConfig,
    pub(crate) upload: UploadConfig,
    pub(crate) catalog: CatalogConfig,
    pub(crate) folders: FoldersConfig,
    pub(crate) listing: ListingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct DatabaseConfig {
    /// `:memory:`, a file path or a `sqlite://` URL.
    pub(crate) url: String,
    pub(crate) pool_size: NonZeroU32,
    pub(crate) migrate_schema_on_startup: bool,
}

const DEFAULT_DATABASE_URL: &str = "equiphoto.sqlite";

const DEFAULT_DATABASE_CONNECTION_POOL_SIZE: NonZeroU32 = NonZeroU32::new(8).unwrap();

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_owned(),
            pool_size: DEFAULT_DATABASE_CONNECTION_POOL_SIZE,
            migrate_schema_on_startup: true,
        }
    }
}

impl DatabaseConfig {
    pub(crate) fn storage(&self) -> anyhow::Result<Storage> {
        Storage::from_url(&self.url)
            .ok_or_else(|| anyhow!("invalid database URL \"{}\"", self.url))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct ReportingViewConfig {
    /// Schema-qualified name of the view, e.g. `main.v_list_equipment`.
    pub(crate) object: String,

    pub(crate) catalog_column: Option<String>,

    pub(crate) columns: ColumnMappingStrategy,
}

const DEFAULT_REPORTING_VIEW: &str = "main.v_list_equipment";

impl Default for ReportingViewConfig {
    fn default() -> Self {
        Self {
            object: DEFAULT_REPORTING_VIEW.to_owned(),
            catalog_column: None,
            columns: ColumnMappingStrategy::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct UploadConfig {
    pub(crate) max_upload_bytes: u64,
    pub(crate) default_actor: Option<String>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            default_actor: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct CatalogConfig {
    /// Newline-delimited equipment names.
    pub(crate) names_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct FoldersConfig {
    /// Searched in order for photos of an equipment item.
    pub(crate) roots: Vec<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct ListingConfig {
    pub(crate) per_page: PageSize,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            per_page: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Config {
    pub(crate) fn service_config(&self) -> anyhow::Result<ServiceConfig> {
        let Self {
            reporting_view,
            image,
            upload,
            catalog,
            ..
        } = self;
        let object = ObjectRef::parse(&reporting_view.object)
            .ok_or_else(|| anyhow!("invalid reporting view \"{}\"", reporting_view.object))?;
        Ok(ServiceConfig {
            reporting_view: object,
            column_mapping: reporting_view.columns.clone(),
            catalog_column: reporting_view.catalog_column.clone(),
            names_file: catalog.names_file.clone(),
            upload: UploadParams {
                max_upload_bytes: upload.max_upload_bytes,
                standardize: image.clone(),
            },
        })
    }
}

/// Load the configuration from a RON file.
///
/// A missing file results in the default configuration.
pub(crate) fn load_config(file_path: &Path) -> anyhow::Result<Config> {
    log::info!("Loading configuration from file: {}", file_path.display());
    match fs::read_to_string(file_path) {
        Ok(text) => ron::from_str(&text)
            .with_context(|| format!("failed to parse configuration file {}", file_path.display())),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            log::info!("Using default configuration");
            Ok(Config::default())
        }
        Err(err) => Err(err)
            .with_context(|| format!("failed to read configuration file {}", file_path.display())),
    }
}

pub(crate) fn save_config(file_path: &Path, config: &Config) -> anyhow::Result<()> {
    log::info!("Saving configuration into file: {}", file_path.display());
    let text = ron::ser::to_string_pretty(config, ron::ser::PrettyConfig::default())?;
    if let Some(parent_path) = file_path.parent() {
        fs::create_dir_all(parent_path)?;
    }
    fs::write(file_path, text)?;
    Ok(())
}
