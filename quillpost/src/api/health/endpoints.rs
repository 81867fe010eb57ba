use actix_web::get;
use quillpost_core::api_models::PingResponse;

use crate::{
    api::errors::{EndpointResponseBuilder, EndpointResult},
    state::ApplicationState,
};


/// Ping the server
///
/// Also opens (and immediately discards) a database transaction,
/// so a `200` means the database is reachable as well.
#[utoipa::path(
    get,
    path = "/api/health/ping",
    tag = "health",
    responses(
        (
            status = 200,
            description = "Server and database are alive and well.",
            body = PingResponse,
        ),
        (
            status = 500,
            description = "The database is unreachable.",
            body = ErrorResponse,
        ),
    )
)]
#[get("/ping")]
pub async fn ping(state: ApplicationState) -> EndpointResult {
    let transaction = state.begin_transaction().await?;
    drop(transaction);

    EndpointResponseBuilder::ok()
        .with_json_body(PingResponse {
            ok: true,
            version: env!("CARGO_PKG_VERSION").to_string(),
        })
        .build()
}
