// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{
    fs,
    num::NonZeroU32,
    path::{Path, PathBuf},
};

use anyhow::{Context as _, bail};
use clap::{Parser, Subcommand};
use directories::ProjectDirs;
use log::LevelFilter;

use equiphoto_core::{
    EquipmentRecord,
    catalog::NameSelection,
    util::page::{Page, PageNumber, page_window, total_pages},
};
use equiphoto_media::fs::first_image_path;
use equiphoto_usecases::equipment::CreateOutcome;
use equiphoto_usecases_sqlite::{Service, database::commission_database};

use crate::config::{Config, load_config, save_config};

mod config;
mod env;

/// Default log level for debug builds.
#[cfg(debug_assertions)]
const DEFAULT_LOG_FILTER_LEVEL: LevelFilter = LevelFilter::Info;

/// Reduce log verbosity for release builds.
#[cfg(not(debug_assertions))]
const DEFAULT_LOG_FILTER_LEVEL: LevelFilter = LevelFilter::Warn;

const PAGE_WINDOW_WIDTH: PageNumber = 5;

const MAX_IMAGE_PREVIEW_LEN: usize = 64;

#[derive(Debug, Parser)]
#[command(version, about = "Manage standardized view photos of equipment items")]
struct Args {
    /// Configuration file in RON format.
    #[arg(long, env = "EQUIPHOTO_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List equipment items, newest first.
    List {
        #[arg(long, short)]
        search: Option<String>,

        #[arg(long, short, default_value_t = 1)]
        page: PageNumber,

        #[arg(long)]
        per_page: Option<NonZeroU32>,
    },

    /// Suggest catalog names that have no equipment item yet.
    Options {
        term: String,

        #[arg(long)]
        limit: Option<usize>,
    },

    /// Create an equipment item for a name from the catalog.
    Create {
        /// A name picked from the suggestions.
        #[arg(long, conflicts_with = "query")]
        selected: Option<String>,

        /// A name or a fragment of it.
        #[arg(long)]
        query: Option<String>,

        #[arg(long)]
        actor: Option<String>,
    },

    /// Show a single equipment item.
    Show {
        id: String,

        /// Print the complete record as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Standardize a photo and store it as a view of an equipment item.
    Upload {
        id: String,

        /// One of front, rear, left or right.
        view: String,

        file: PathBuf,

        #[arg(long)]
        mime: Option<String>,

        #[arg(long)]
        actor: Option<String>,
    },

    /// Remove a view of an equipment item.
    Remove { id: String, view: String },

    /// Detect the column mapping of the reporting view.
    DetectColumns,

    /// Print the catalog of equipment names.
    Catalog,

    /// Find the first photo of an equipment item in the folder roots.
    Thumb { name: String },

    /// Print the effective configuration.
    Config {
        /// Save it into the configuration file.
        #[arg(long)]
        save: bool,
    },
}

fn app_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("org", "equiphoto", env!("CARGO_PKG_NAME"))
}

fn config_file_path(config: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    if let Some(config) = config {
        return Ok(config);
    }
    let Some(app_dirs) = app_dirs() else {
        bail!("config directory is unavailable");
    };
    Ok(app_dirs.config_dir().join("config.ron"))
}

fn commission_service(config: &Config) -> anyhow::Result<Service> {
    let storage = config.database.storage()?;
    let connection_pool = commission_database(
        &storage,
        config.database.pool_size,
        config.database.migrate_schema_on_startup,
    )?;
    Ok(Service::new(connection_pool, config.service_config()?))
}

fn abbreviate(text: &str, max_len: usize) -> String {
    if text.len() <= max_len {
        return text.to_owned();
    }
    let end = (0..=max_len)
        .rev()
        .find(|&end| text.is_char_boundary(end))
        .unwrap_or_default();
    format!("{}…", &text[..end])
}

fn print_record(record: &EquipmentRecord) {
    let EquipmentRecord {
        id,
        name,
        updated_at,
        updated_by,
        images,
    } = record;
    println!("Equipment:  {id}");
    println!("Name:       {name}");
    println!("Updated at: {updated_at}");
    println!("Updated by: {}", updated_by.as_deref().unwrap_or("-"));
    for (slot, image) in images.iter() {
        let image = image
            .as_deref()
            .map_or_else(|| "-".to_owned(), |image| abbreviate(image, MAX_IMAGE_PREVIEW_LEN));
        println!("{:<11} {image}", format!("{}:", slot.label()));
    }
}

fn print_page_navigation(page: &Page, total: u64) {
    let total_pages = total_pages(total, page.size);
    let window = page_window(page.number, total_pages, PAGE_WINDOW_WIDTH)
        .into_iter()
        .map(|number| match number {
            Some(number) if number == page.number => format!("[{number}]"),
            Some(number) => number.to_string(),
            None => "…".to_owned(),
        })
        .collect::<Vec<_>>()
        .join(" ");
    println!("Page {} of {total_pages} ({total} item(s)): {window}", page.number);
}

fn read_upload_file(file: &Path) -> anyhow::Result<(Vec<u8>, Option<String>)> {
    let data = fs::read(file).with_context(|| format!("failed to read {}", file.display()))?;
    let file_name = file
        .file_name()
        .map(|file_name| file_name.to_string_lossy().into_owned());
    Ok((data, file_name))
}

#[allow(clippy::too_many_lines)]
fn run(command: Command, config_file: &Path, config: &Config) -> anyhow::Result<()> {
    let actor = |actor: Option<String>| actor.or_else(|| config.upload.default_actor.clone());
    match command {
        Command::List {
            search,
            page,
            per_page,
        } => {
            let service = commission_service(config)?;
            let page = Page::new(page, per_page.unwrap_or(config.listing.per_page));
            let (records, total) = service.list_equipment(search.as_deref(), &page)?;
            for record in &records {
                println!(
                    "{id}\t{name}\t{updated_at}\t{updated_by}\t{count}/4",
                    id = record.id,
                    name = record.name,
                    updated_at = record.updated_at,
                    updated_by = record.updated_by.as_deref().unwrap_or("-"),
                    count = record.image_count(),
                );
            }
            print_page_navigation(&page, total);
        }
        Command::Options { term, limit } => {
            let service = commission_service(config)?;
            for candidate in service.resolve_name_candidates(&term, limit)? {
                println!("{}", candidate.name);
            }
        }
        Command::Create {
            selected,
            query,
            actor: create_actor,
        } => {
            let service = commission_service(config)?;
            let selection = NameSelection::new(selected.as_deref(), query.as_deref());
            match service.create_equipment(&selection, actor(create_actor).as_deref())? {
                CreateOutcome::Created(id) => println!("Created {id}"),
                CreateOutcome::AlreadyExists(id) => println!("{id} already exists"),
                CreateOutcome::QueryTooShort => bail!("type at least 3 characters"),
                CreateOutcome::NotFound => bail!("no matching name found in the catalog"),
                CreateOutcome::Ambiguous(names) => {
                    bail!("ambiguous name, select one of: {}", names.join(", "));
                }
            }
        }
        Command::Show { id, json } => {
            let service = commission_service(config)?;
            let Some(record) = service.fetch_equipment_one(&id)? else {
                bail!("equipment {} not found", id.trim());
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                print_record(&record);
            }
        }
        Command::Upload {
            id,
            view,
            file,
            mime,
            actor: upload_actor,
        } => {
            let (data, file_name) = read_upload_file(&file)?;
            let service = commission_service(config)?;
            service.upload_view(
                &id,
                &view,
                &data,
                file_name.as_deref(),
                mime.as_deref(),
                actor(upload_actor).as_deref(),
            )?;
            println!("Stored {} view of {}", view.trim(), id.trim());
        }
        Command::Remove { id, view } => {
            let service = commission_service(config)?;
            service.remove_view(&id, &view)?;
            println!("Removed {} view of {}", view.trim(), id.trim());
        }
        Command::DetectColumns => {
            let service = commission_service(config)?;
            let view_schema = service.detect_columns()?;
            println!("Columns of {}: {}", view_schema.object, view_schema.columns.join(", "));
            let pretty = ron::ser::PrettyConfig::default();
            println!(
                "{}",
                ron::ser::to_string_pretty(&view_schema.mapping, pretty)?
            );
        }
        Command::Catalog => {
            let service = commission_service(config)?;
            let catalog = service.name_catalog()?;
            log::info!("Loaded {} name(s) from {}", catalog.len(), catalog.source());
            for entry in catalog.entries() {
                println!("{}", entry.name);
            }
        }
        Command::Thumb { name } => {
            let Some(path) = first_image_path(config.folders.roots.as_slice(), &name) else {
                bail!("no photo of {} found", name.trim());
            };
            println!("{}", path.display());
        }
        Command::Config { save } => {
            if save {
                save_config(config_file, config)?;
            }
            println!(
                "{}",
                ron::ser::to_string_pretty(config, ron::ser::PrettyConfig::default())?
            );
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env::init_environment();

    env_logger::Builder::new()
        .filter_level(DEFAULT_LOG_FILTER_LEVEL)
        // Parse environment variables after configuring all default option(s).
        .parse_default_env()
        .init();

    let Args { config, command } = Args::parse();
    let config_file = config_file_path(config)?;
    let mut config = load_config(&config_file)?;
    env::apply_env_overrides(&mut config);
    run(command, &config_file, &config)
}
