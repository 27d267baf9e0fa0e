// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::result::Result as StdResult;

use thiserror::Error;

use equiphoto_media::Error as MediaError;
use equiphoto_repo::prelude::*;

pub mod catalog;
pub mod equipment;
pub mod photo;
pub mod schema;

#[derive(Error, Debug)]
#[error(transparent)]
pub struct InputError(#[from] pub anyhow::Error);

pub type InputResult<T> = StdResult<T, InputError>;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Input(#[from] InputError),

    /// Rejected before accessing any storage.
    #[error("unsupported input: {0}")]
    UnsupportedInput(String),

    #[error(transparent)]
    Media(MediaError),

    #[error(transparent)]
    Repository(#[from] RepoError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<MediaError> for Error {
    fn from(err: MediaError) -> Self {
        match err {
            MediaError::UnsupportedInput(reason) => Self::UnsupportedInput(reason),
            err => Self::Media(err),
        }
    }
}

pub type Result<T> = StdResult<T, Error>;
