use serde::Serialize;
use utoipa::ToSchema;

/// Response of `GET /api/health/ping`.
#[derive(Serialize, Clone, Debug, PartialEq, Eq, ToSchema)]
#[cfg_attr(feature = "serde_impls_for_client_on_models", derive(serde::Deserialize))]
#[schema(
    example = json!({
        "ok": true,
        "version": "0.1.0"
    })
)]
pub struct PingResponse {
    /// Always `true`: a broken database connection yields a `500` instead.
    pub ok: bool,

    /// Version of the running server.
    pub version: String,
}
