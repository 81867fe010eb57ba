use std::borrow::Cow;

use serde::Serialize;
use utoipa::ToSchema;


/// Pertains to all endpoints under `/categories`.
#[derive(Debug, PartialEq, Eq, Clone)]
#[non_exhaustive]
pub enum CategoryErrorReason {
    CategoryNotFound,

    /// This error is returned when attempting to create a category
    /// whose name is already present on another category.
    CategoryAlreadyExists,
}

impl CategoryErrorReason {
    pub const fn category_not_found() -> Self {
        Self::CategoryNotFound
    }

    pub const fn category_already_exists() -> Self {
        Self::CategoryAlreadyExists
    }

    pub fn message(&self) -> Cow<'static, str> {
        match self {
            Self::CategoryNotFound => Cow::Borrowed("Category not found"),
            Self::CategoryAlreadyExists => Cow::Borrowed("Category already exists"),
        }
    }
}


/// Pertains to all endpoints under `/blogs` and `/blog`.
#[derive(Debug, PartialEq, Eq, Clone)]
#[non_exhaustive]
pub enum BlogErrorReason {
    BlogNotFound,

    InvalidOrderingField { field: String },

    InvalidPageNumber { page: u32 },
}

impl BlogErrorReason {
    pub const fn blog_not_found() -> Self {
        Self::BlogNotFound
    }

    pub fn invalid_ordering_field(field: String) -> Self {
        // To avoid echoing a huge chunk of data back.
        if field.len() > 120 {
            return Self::InvalidOrderingField {
                field: "[redacted]".to_string(),
            };
        }

        Self::InvalidOrderingField { field }
    }

    pub const fn invalid_page_number(page: u32) -> Self {
        Self::InvalidPageNumber { page }
    }

    pub fn message(&self) -> Cow<'static, str> {
        match self {
            Self::BlogNotFound => Cow::Borrowed("Blog not found"),
            Self::InvalidOrderingField { field } => Cow::Owned(format!(
                "Cannot order blogs by \"{}\": expected one of id, name, slug or description, \
                 optionally prefixed with \"-\"",
                field
            )),
            Self::InvalidPageNumber { page } => Cow::Owned(format!(
                "Invalid page number {}: pages start at 1",
                page
            )),
        }
    }
}


#[derive(Debug, PartialEq, Eq, Clone)]
#[non_exhaustive]
pub enum ErrorReason {
    /*
     * General
     */
    /// Request is missing a JSON body.
    MissingJsonBody,

    InvalidJsonBody {
        reason: InvalidJsonBodyReason,
    },

    InvalidQueryParameters {
        details: Cow<'static, str>,
    },

    InvalidPathParameters {
        details: Cow<'static, str>,
    },

    InvalidField {
        field: &'static str,
        problem: Cow<'static, str>,
    },

    InternalServerError,

    /*
     * Category-related
     */
    Category(CategoryErrorReason),

    /*
     * Blog-related
     */
    Blog(BlogErrorReason),
}

impl ErrorReason {
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

    pub fn invalid_field<P>(field: &'static str, problem: P) -> Self
    where
        P: Into<Cow<'static, str>>,
    {
        Self::InvalidField {
            field,
            problem: problem.into(),
        }
    }

    pub const fn internal_server_error() -> Self {
        Self::InternalServerError
    }

    /// Human-readable description of this reason, sent as the
    /// `message` field of an [`ErrorResponse`].
    pub fn message(&self) -> Cow<'static, str> {
        match self {
            Self::MissingJsonBody => Cow::Borrowed("Expected a JSON body."),
            Self::InvalidJsonBody { reason } => match reason {
                InvalidJsonBodyReason::NotJson => Cow::Borrowed("Invalid JSON body: not JSON."),
                InvalidJsonBodyReason::InvalidData => {
                    Cow::Borrowed("Invalid JSON body: invalid data.")
                }
                InvalidJsonBodyReason::TooLarge => Cow::Borrowed("Invalid JSON body: too large."),
            },
            Self::InvalidQueryParameters { details } => {
                Cow::Owned(format!("Invalid query parameters: {}", details))
            }
            Self::InvalidPathParameters { details } => {
                Cow::Owned(format!("Invalid path parameters: {}", details))
            }
            Self::InvalidField { field, problem } => {
                Cow::Owned(format!("Invalid field \"{}\": {}", field, problem))
            }
            Self::InternalServerError => Cow::Borrowed("Internal server error."),
            Self::Category(reason) => reason.message(),
            Self::Blog(reason) => reason.message(),
        }
    }
}

impl From<CategoryErrorReason> for ErrorReason {
    fn from(value: CategoryErrorReason) -> Self {
        Self::Category(value)
    }
}

impl From<BlogErrorReason> for ErrorReason {
    fn from(value: BlogErrorReason) -> Self {
        Self::Blog(value)
    }
}



#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidJsonBodyReason {
    /// Signals an IO / syntax / EOF error while parsing.
    NotJson,

    InvalidData,

    TooLarge,
}



/// JSON body of every non-2xx response produced by the API.
#[derive(Serialize, PartialEq, Eq, Clone, Debug, ToSchema)]
#[cfg_attr(feature = "serde_impls_for_client_on_models", derive(serde::Deserialize))]
#[schema(
    example = json!({
        "message": "Category not found"
    })
)]
pub struct ErrorResponse {
    pub message: String,
}

impl ErrorResponse {
    pub fn new<R>(reason: R) -> Self
    where
        R: Into<ErrorReason>,
    {
        Self {
            message: reason.into().message().into_owned(),
        }
    }
}



#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn serializes_reasons_into_message_bodies() {
        let body = serde_json::to_value(ErrorResponse::new(
            CategoryErrorReason::category_not_found(),
        ))
        .unwrap();

        assert_eq!(
            body,
            serde_json::json!({ "message": "Category not found" })
        );

        assert_eq!(
            ErrorResponse::new(BlogErrorReason::blog_not_found()).message,
            "Blog not found"
        );
    }

    #[test]
    fn redacts_overly_long_ordering_fields() {
        let reason = BlogErrorReason::invalid_ordering_field("x".repeat(500));

        assert_eq!(
            reason,
            BlogErrorReason::InvalidOrderingField {
                field: "[redacted]".to_string()
            }
        );
    }
}
