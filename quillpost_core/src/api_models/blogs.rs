use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::Category;
use crate::ids::{BlogId, CategoryId};

/// Number of blogs on each page of `GET /blogs/paginated`.
pub const BLOG_PAGE_SIZE: u32 = 10;


#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, ToSchema)]
#[schema(
    example = json!({
        "id": "0b6f0a4c-3d57-4b8e-9f43-8d9a1f3c2e11",
        "name": "Hello World",
        "slug": "hello-world",
        "category": {
            "id": 1,
            "name": "Travel"
        },
        "description": "The very first post."
    })
)]
pub struct Blog {
    #[schema(value_type = String, format = Uuid)]
    pub id: BlogId,

    pub name: String,

    pub slug: String,

    /// `null` when the blog is uncategorized.
    pub category: Option<Category>,

    pub description: String,
}



#[derive(Deserialize, Clone, PartialEq, Eq, Debug, ToSchema)]
#[cfg_attr(feature = "serde_impls_for_client_on_models", derive(Serialize))]
#[schema(
    example = json!({
        "name": "Hello World",
        "description": "The very first post.",
        "category_id": 1
    })
)]
pub struct BlogCreationRequest {
    pub name: String,

    pub description: String,

    #[serde(default)]
    #[schema(value_type = Option<i32>)]
    pub category_id: Option<CategoryId>,
}



/// Replaces the name, description and category of a blog.
///
/// An omitted or `null` `category_id` clears the blog's category.
#[derive(Deserialize, Clone, PartialEq, Eq, Debug, ToSchema)]
#[cfg_attr(feature = "serde_impls_for_client_on_models", derive(Serialize))]
#[schema(
    example = json!({
        "name": "Hello again, World",
        "description": "An edited first post.",
        "category_id": null
    })
)]
pub struct BlogUpdateRequest {
    pub name: String,

    pub description: String,

    #[serde(default)]
    #[schema(value_type = Option<i32>)]
    pub category_id: Option<CategoryId>,
}



/// An omitted or `null` `category_id` clears the blog's category.
#[derive(Deserialize, Clone, PartialEq, Eq, Debug, ToSchema)]
#[cfg_attr(feature = "serde_impls_for_client_on_models", derive(Serialize))]
#[schema(
    example = json!({
        "category_id": 1
    })
)]
pub struct BlogCategoryUpdateRequest {
    #[serde(default)]
    #[schema(value_type = Option<i32>)]
    pub category_id: Option<CategoryId>,
}



#[derive(Serialize, Clone, PartialEq, Eq, Debug, ToSchema)]
#[cfg_attr(feature = "serde_impls_for_client_on_models", derive(Deserialize))]
pub struct BlogPageResponse {
    pub items: Vec<Blog>,

    /// Total number of blogs, across all pages.
    pub count: u64,

    pub page: u32,

    pub page_size: u32,
}



#[derive(Deserialize, Clone, PartialEq, Eq, Debug, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BlogPageQuery {
    /// One-based page number.
    #[serde(default = "default_page_number")]
    #[param(default = 1, minimum = 1)]
    pub page: u32,
}

fn default_page_number() -> u32 {
    1
}



#[derive(Deserialize, Clone, PartialEq, Eq, Debug, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BlogSearchQuery {
    /// Case-insensitive substring to look for in blog names and descriptions.
    pub q: String,
}



#[derive(Deserialize, Clone, PartialEq, Eq, Debug, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BlogOrderingQuery {
    /// One of `id`, `name`, `slug` or `description`,
    /// optionally prefixed with `-` for descending order.
    #[serde(default = "default_ordering_field")]
    #[param(default = "name")]
    pub order_by: String,
}

fn default_ordering_field() -> String {
    "name".to_string()
}
