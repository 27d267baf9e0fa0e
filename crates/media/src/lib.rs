// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

// Importing all enum variants into a narrow, local scope is acceptable.
#![allow(clippy::enum_glob_use)]

pub mod fs;
pub mod standardize;
pub mod upload;

use std::{io::Error as IoError, result::Result as StdResult};

use image::ImageError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("unsupported input: {0}")]
    UnsupportedInput(String),

    #[error(transparent)]
    Image(ImageError),

    #[error(transparent)]
    Io(#[from] IoError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = StdResult<T, Error>;

impl From<ImageError> for Error {
    fn from(err: ImageError) -> Self {
        match err {
            ImageError::IoError(err) => Self::Io(err),
            ImageError::Decoding(_) | ImageError::Unsupported(_) => {
                Self::UnsupportedInput(err.to_string())
            }
            _ => Self::Image(err),
        }
    }
}

pub mod prelude {
    pub use super::{Error, Result};
}
