//! Application-wide state (shared between endpoint functions).

use std::sync::Arc;

use actix_web::web::Data;
use quillpost_database::{Database, DatabaseTransaction, QueryResult};



/// Central application state.
///
/// Use [`ApplicationState`] instead as it already wraps this struct
/// in [`actix_web::web::Data`]!
pub struct ApplicationStateInner {
    /// Backing store for categories and blogs; PostgreSQL in production.
    database: Arc<dyn Database>,
}

impl ApplicationStateInner {
    pub fn from_database<D>(database: D) -> Self
    where
        D: Database + 'static,
    {
        Self {
            database: Arc::new(database),
        }
    }

    /// Opens a new transaction. Every endpoint runs inside exactly one.
    pub async fn begin_transaction(&self) -> QueryResult<Box<dyn DatabaseTransaction>> {
        self.database.begin().await
    }

    /// Opens a new transaction and acquires the database write lock
    /// (see [`DatabaseTransaction::acquire_write_lock`]).
    ///
    /// Endpoints that validate something before writing must use this
    /// instead of [`Self::begin_transaction`].
    pub async fn begin_write_transaction(&self) -> QueryResult<Box<dyn DatabaseTransaction>> {
        let mut transaction = self.database.begin().await?;
        transaction.acquire_write_lock().await?;

        Ok(transaction)
    }
}


/// Central application state, wrapped in an actix [`Data`] wrapper.
///
/// This enables usage in endpoint functions.
/// See <https://actix.rs/docs/application#state> for more information.
pub type ApplicationState = Data<ApplicationStateInner>;
