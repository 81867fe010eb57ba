//! HTTP server for the quillpost blogging backend.
//!
//! The binary (`main.rs`) and the end-to-end test harness both build their
//! actix application through [`configure_application`].

use std::time::Duration;

use actix_web::web;
use quillpost_configuration::DatabaseConfiguration;
use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions},
    PgPool,
};

use crate::state::ApplicationState;

pub mod api;
pub mod cli;
pub mod logging;
pub mod state;


pub async fn establish_database_connection_pool(
    database_configuration: &DatabaseConfiguration,
) -> Result<PgPool, sqlx::Error> {
    let mut connection_options = PgConnectOptions::new_without_pgpass()
        .application_name(&format!(
            "quillpost-backend_v{}",
            env!("CARGO_PKG_VERSION")
        ))
        .statement_cache_capacity(database_configuration.statement_cache_capacity)
        .host(&database_configuration.host)
        .port(database_configuration.port)
        .username(&database_configuration.username)
        .database(&database_configuration.database_name);

    if let Some(password) = &database_configuration.password {
        connection_options = connection_options.password(password.as_str());
    }


    PgPoolOptions::new()
        .idle_timeout(Some(Duration::from_secs(60 * 20)))
        .max_lifetime(Some(Duration::from_secs(60 * 60)))
        .min_connections(1)
        .max_connections(10)
        .test_before_acquire(true)
        .connect_with(connection_options)
        .await
}


/// Registers the application state, the extractor configurations,
/// the API router and the API documentation on an actix application.
///
/// Middleware (path normalization, CORS, request tracing) is left to the caller.
pub fn configure_application(
    state: ApplicationState,
    json_body_limit_bytes: usize,
) -> impl FnOnce(&mut web::ServiceConfig) {
    move |service_config| {
        service_config
            .app_data(state)
            .app_data(api::json_extractor_configuration(json_body_limit_bytes))
            .app_data(api::query_extractor_configuration())
            .app_data(api::path_extractor_configuration())
            .service(api::openapi::documentation_service())
            .service(api::api_router());
    }
}
