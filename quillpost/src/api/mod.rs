//! API definitions and annotations for quillpost.
//!
//! Everything lives under the `/api` path:
//! - `/api/categories` (see [`categories`]),
//! - `/api/blogs` and `/api/blog` (see [`blogs`]), and
//! - `/api/health` (see [`health`]).

use actix_web::{
    error::JsonPayloadError,
    web::{self, JsonConfig, PathConfig, QueryConfig},
    Scope,
};
use quillpost_core::{
    api_models::{ErrorReason, InvalidJsonBodyReason},
    validation::validate_name,
};

use self::{
    blogs::{blog_router, blogs_router},
    categories::categories_router,
    errors::{EndpointError, EndpointResponseBuilder, EndpointResult},
    health::health_router,
};

pub mod blogs;
pub mod categories;
pub mod errors;
pub mod health;
pub mod openapi;
pub mod traits;



/// Router for the entire public API.
#[rustfmt::skip]
pub fn api_router() -> Scope {
    web::scope("/api")
        .service(categories_router())
        .service(blogs_router())
        .service(blog_router())
        .service(health_router())
}



/// Maps JSON extraction failures (see [`web::Json`]) to [`EndpointError`]s.
pub fn json_extractor_configuration(json_body_limit_bytes: usize) -> JsonConfig {
    JsonConfig::default()
        .limit(json_body_limit_bytes)
        .error_handler(|error, _| {
            let endpoint_error = match error {
                JsonPayloadError::ContentType => EndpointError::missing_json_body(),
                JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
                    EndpointError::invalid_json_body(InvalidJsonBodyReason::TooLarge)
                }
                JsonPayloadError::Deserialize(deserialization_error)
                    if deserialization_error.is_data() =>
                {
                    EndpointError::invalid_json_body(InvalidJsonBodyReason::InvalidData)
                }
                _ => EndpointError::invalid_json_body(InvalidJsonBodyReason::NotJson),
            };

            endpoint_error.into()
        })
}

/// Maps query string extraction failures (see [`web::Query`]) to [`EndpointError`]s.
pub fn query_extractor_configuration() -> QueryConfig {
    QueryConfig::default().error_handler(|error, _| {
        EndpointError::invalid_query_parameters(error.to_string()).into()
    })
}

/// Maps path parameter extraction failures (see [`web::Path`]) to [`EndpointError`]s.
pub fn path_extractor_configuration() -> PathConfig {
    PathConfig::default().error_handler(|error, _| {
        EndpointError::invalid_path_parameters(error.to_string()).into()
    })
}



/// If the given category or blog name is blank or too long,
/// returns the `400 Bad Request` response to respond with.
pub(crate) fn reject_invalid_name(name: &str) -> Option<EndpointResult> {
    let validation_error = validate_name(name).err()?;

    Some(
        EndpointResponseBuilder::bad_request()
            .with_error_reason(ErrorReason::invalid_field(
                "name",
                validation_error.to_string(),
            ))
            .build(),
    )
}
