//! Provides ways of handling errors in API endpoint functions
//! and ways to have those errors automatically turned into correct
//! HTTP error responses when returned as `Err(error)` from those functions.
//!
//! Endpoints return an [`EndpointResult`]. Expected failures (a missing blog,
//! an invalid ordering field, ...) are regular responses, built with
//! [`EndpointResponseBuilder`] and an [`ErrorReason`]. Everything else is an
//! [`EndpointError`], which can be `?`-propagated and is turned into a
//! `4xx`/`5xx` response by its [`ResponseError`] implementation.

use std::borrow::Cow;

use actix_web::body::BoxBody;
use actix_web::http::header::{self, HeaderName, HeaderValue};
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use quillpost_core::api_models::{ErrorReason, ErrorResponse, InvalidJsonBodyReason};
use quillpost_database::QueryError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;



/// General-purpose API error type.
///
/// Client errors are exposed as a status code and an [`ErrorResponse`] body.
/// Server errors are logged, and the caller only sees a generic
/// `500 Internal Server Error` (**details never leak through the API**).
#[derive(Debug, Error)]
pub enum EndpointError {
    /*
     * Client errors.
     */
    /// The endpoint expected a JSON body, but there was either:
    /// - no JSON body sent with the request,
    /// - or there was an incorrect `Content-Type` header (expected: `application/json`).
    #[error("expected a JSON body")]
    MissingJsonBody,

    /// Invalid JSON body, either due to a deserialization error,
    /// or because the body is too large.
    #[error("invalid JSON body: {:?}", .reason)]
    InvalidJsonBody { reason: InvalidJsonBodyReason },

    #[error("invalid query parameters: {}", .details)]
    InvalidQueryParameters { details: Cow<'static, str> },

    #[error("invalid path parameters: {}", .details)]
    InvalidPathParameters { details: Cow<'static, str> },

    /*
     * Server errors.
     */
    /// Internal error, constructed from a boxed [`Error`][std::error::Error].
    #[error("internal server error")]
    InternalGenericError {
        #[source]
        error: Box<dyn std::error::Error>,
    },

    /// Internal error, constructed from a [`sqlx::Error`].
    #[error("internal database error")]
    InternalDatabaseError {
        #[from]
        #[source]
        error: sqlx::Error,
    },

    #[error("inconsistent internal database state: {}", .problem)]
    InvalidDatabaseState { problem: Cow<'static, str> },
}

impl EndpointError {
    pub const fn missing_json_body() -> Self {
        Self::MissingJsonBody
    }

    pub const fn invalid_json_body(reason: InvalidJsonBodyReason) -> Self {
        Self::InvalidJsonBody { reason }
    }

    pub fn invalid_query_parameters<D>(details: D) -> Self
    where
        D: Into<Cow<'static, str>>,
    {
        Self::InvalidQueryParameters {
            details: details.into(),
        }
    }

    pub fn invalid_path_parameters<D>(details: D) -> Self
    where
        D: Into<Cow<'static, str>>,
    {
        Self::InvalidPathParameters {
            details: details.into(),
        }
    }

    pub fn internal_error<E>(error: E) -> Self
    where
        E: std::error::Error + 'static,
    {
        Self::InternalGenericError {
            error: Box::new(error),
        }
    }

    #[inline]
    pub fn invalid_database_state<S>(problem: S) -> Self
    where
        S: Into<Cow<'static, str>>,
    {
        Self::InvalidDatabaseState {
            problem: problem.into(),
        }
    }

    fn error_reason(&self) -> ErrorReason {
        match self {
            Self::MissingJsonBody => ErrorReason::missing_json_body(),
            Self::InvalidJsonBody { reason } => ErrorReason::invalid_json_body(*reason),
            Self::InvalidQueryParameters { details } => {
                ErrorReason::invalid_query_parameters(details.clone())
            }
            Self::InvalidPathParameters { details } => {
                ErrorReason::invalid_path_parameters(details.clone())
            }
            Self::InternalGenericError { .. }
            | Self::InternalDatabaseError { .. }
            | Self::InvalidDatabaseState { .. } => ErrorReason::internal_server_error(),
        }
    }
}

impl ResponseError for EndpointError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingJsonBody => StatusCode::BAD_REQUEST,
            Self::InvalidJsonBody { reason } => match reason {
                InvalidJsonBodyReason::TooLarge => StatusCode::PAYLOAD_TOO_LARGE,
                InvalidJsonBodyReason::NotJson | InvalidJsonBodyReason::InvalidData => {
                    StatusCode::BAD_REQUEST
                }
            },
            Self::InvalidQueryParameters { .. } => StatusCode::BAD_REQUEST,
            Self::InvalidPathParameters { .. } => StatusCode::BAD_REQUEST,
            Self::InternalGenericError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InternalDatabaseError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InvalidDatabaseState { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        let status_code = self.status_code();

        if status_code.is_server_error() {
            error!(error = ?self, "Internal server error while handling request.");
        }

        EndpointResponseBuilder::new(status_code)
            .with_error_reason(self.error_reason())
            .build()
            .unwrap_or_else(|_| HttpResponse::InternalServerError().finish())
    }
}


impl From<QueryError> for EndpointError {
    fn from(value: QueryError) -> Self {
        match value {
            QueryError::SqlxError { error } => Self::InternalDatabaseError { error },
            QueryError::DatabaseInconsistencyError { problem } => {
                Self::InvalidDatabaseState { problem }
            }
        }
    }
}



pub struct EndpointResponseBuilder {
    status_code: StatusCode,

    body: Option<Result<Vec<u8>, serde_json::Error>>,

    additional_headers: Vec<(HeaderName, HeaderValue)>,
}

impl EndpointResponseBuilder {
    pub fn new(status_code: StatusCode) -> Self {
        Self {
            status_code,
            body: None,
            additional_headers: Vec::with_capacity(1),
        }
    }

    #[inline]
    pub fn ok() -> Self {
        Self::new(StatusCode::OK)
    }

    #[inline]
    pub fn bad_request() -> Self {
        Self::new(StatusCode::BAD_REQUEST)
    }

    #[inline]
    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND)
    }

    pub fn with_json_body<S>(mut self, data: S) -> Self
    where
        S: Serialize,
    {
        self.body = Some(serde_json::to_vec(&data));

        self.additional_headers.push((
            header::CONTENT_TYPE,
            HeaderValue::from_static(mime::APPLICATION_JSON.as_ref()),
        ));

        self
    }

    /// Sets an [`ErrorResponse`] (`{ "message": ... }`) as the body.
    pub fn with_error_reason<R>(self, reason: R) -> Self
    where
        R: Into<ErrorReason>,
    {
        self.with_json_body(ErrorResponse::new(reason))
    }

    pub fn build(self) -> EndpointResult {
        let optional_body = match self.body {
            Some(body_or_error) => match body_or_error {
                Ok(body) => Some(body),
                Err(serialization_error) => {
                    return Err(EndpointError::internal_error(serialization_error))
                }
            },
            None => None,
        };


        let mut response_builder = HttpResponse::build(self.status_code);

        for (header_name, header_value) in self.additional_headers {
            response_builder.insert_header((header_name, header_value));
        }


        match optional_body {
            Some(body) => Ok(response_builder.body(body)),
            None => Ok(response_builder.finish()),
        }
    }
}



/// Short for [`Result`]`<`[`HttpResponse`]`, `[`EndpointError`]`>`, intended to be used
/// as the return type of every endpoint function.
pub type EndpointResult<Body = BoxBody> = Result<HttpResponse<Body>, EndpointError>;



#[cfg(test)]
mod test {
    use actix_web::body::MessageBody;

    use super::*;

    fn response_body_as_json(response: HttpResponse<BoxBody>) -> serde_json::Value {
        let body_bytes = response.into_body().try_into_bytes().unwrap();
        serde_json::from_slice(&body_bytes).unwrap()
    }

    #[test]
    fn internal_errors_do_not_leak_details() {
        let error = EndpointError::invalid_database_state("blog 123 references a missing category");
        let response = error.error_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response_body_as_json(response),
            serde_json::json!({ "message": "Internal server error." })
        );
    }

    #[test]
    fn oversized_json_bodies_are_reported_as_too_large() {
        let error = EndpointError::invalid_json_body(InvalidJsonBodyReason::TooLarge);

        assert_eq!(error.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(
            error.error_response().status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
    }

    #[test]
    fn builds_json_responses() {
        let response = EndpointResponseBuilder::ok()
            .with_json_body(serde_json::json!({ "success": true }))
            .build()
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert_eq!(
            response_body_as_json(response),
            serde_json::json!({ "success": true })
        );
    }
}
