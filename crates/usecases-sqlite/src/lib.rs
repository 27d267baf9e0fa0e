// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

// Importing all enum variants into a narrow, local scope is acceptable.
#![allow(clippy::enum_glob_use)]

use thiserror::Error;

use equiphoto_media::Error as MediaError;
use equiphoto_repo::RepoError;
use equiphoto_repo_sqlite::{
    DbConnection,
    prelude::{Connection as RepoConnection, DieselTransactionError},
};
use equiphoto_storage_sqlite::Error as StorageError;
use equiphoto_usecases as uc;

pub mod catalog;
pub mod database;
pub mod equipment;
pub mod photo;
pub mod schema;
pub mod service;

pub use self::service::{Service, ServiceConfig};

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Input(anyhow::Error),

    #[error("unsupported input: {0}")]
    UnsupportedInput(String),

    #[error(transparent)]
    Media(MediaError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    DatabaseMigration(anyhow::Error),

    #[error(transparent)]
    Repository(#[from] RepoError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl<E> From<DieselTransactionError<E>> for Error
where
    E: Into<Error>,
{
    fn from(err: DieselTransactionError<E>) -> Self {
        err.into_inner().into()
    }
}

impl From<uc::Error> for Error {
    fn from(err: uc::Error) -> Self {
        use uc::Error::*;
        match err {
            Input(uc::InputError(err)) => Self::Input(err),
            UnsupportedInput(reason) => Self::UnsupportedInput(reason),
            Media(err) => Self::Media(err),
            Repository(err) => Self::Repository(err),
            Other(err) => Self::Other(err),
        }
    }
}

pub type TransactionError = DieselTransactionError<Error>;

impl From<Error> for TransactionError {
    fn from(err: Error) -> Self {
        Self::new(err)
    }
}

fn transaction_error<E>(err: E) -> TransactionError
where
    E: Into<Error>,
{
    TransactionError::from(err.into())
}

pub type Result<T> = std::result::Result<T, Error>;
