//! Persistence layer: category and blog entities, the repository traits
//! the API handlers are written against, and their implementations.
//!
//! Handlers never talk to a connection directly. They open a transaction through
//! [`Database::begin`], call repository methods on it and then
//! [`commit`][DatabaseTransaction::commit] it. Dropping a transaction without
//! committing rolls it back.

use std::borrow::Cow;

use thiserror::Error;

pub mod entities;
mod postgres;
mod repository;

#[cfg(any(test, feature = "with_test_facilities"))]
mod memory;

#[cfg(any(test, feature = "with_test_facilities"))]
pub use memory::*;
pub use postgres::*;
pub use repository::*;


/// Embedded schema migrations (see the `migrations` directory of this crate).
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");



#[derive(Debug, Error)]
pub enum QueryError {
    #[error("sqlx error")]
    SqlxError {
        #[from]
        #[source]
        error: sqlx::Error,
    },

    #[error("database inconsistency: {}", .problem)]
    DatabaseInconsistencyError { problem: Cow<'static, str> },
}

impl QueryError {
    pub fn database_inconsistency<R>(problem: R) -> Self
    where
        R: Into<Cow<'static, str>>,
    {
        Self::DatabaseInconsistencyError {
            problem: problem.into(),
        }
    }
}



pub type QueryResult<R, E = QueryError> = Result<R, E>;



pub trait IntoExternalModel {
    type ExternalModel;

    fn into_external_model(self) -> Self::ExternalModel;
}

pub trait TryIntoExternalModel {
    type ExternalModel;
    type Error;

    fn try_into_external_model(self) -> Result<Self::ExternalModel, Self::Error>;
}
