//! OpenAPI document for the whole API, served alongside an interactive
//! RapiDoc page at `/api-documentation`.

use quillpost_core::api_models;
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;

use super::{blogs, categories, health};


#[derive(OpenApi)]
#[openapi(
    info(
        title = "quillpost",
        description = "Categories, blogs, search and pagination."
    ),
    paths(
        // quillpost::api::categories
        categories::get_all_categories,
        categories::create_category,
        categories::get_specific_category,
        categories::update_specific_category,
        categories::delete_specific_category,

        // quillpost::api::blogs
        blogs::get_all_blogs,
        blogs::get_blog_page,
        blogs::search_blogs,
        blogs::get_ordered_blogs,
        blogs::get_specific_blog,
        blogs::create_blog,
        blogs::update_specific_blog,
        blogs::set_blog_category,
        blogs::delete_specific_blog,

        // quillpost::api::health
        health::ping,
    ),
    components(
        schemas(
            api_models::Category,
            api_models::CategoryCreationRequest,
            api_models::CategoryUpdateRequest,
            api_models::CategoryDeletionResponse,

            api_models::Blog,
            api_models::BlogCreationRequest,
            api_models::BlogUpdateRequest,
            api_models::BlogCategoryUpdateRequest,
            api_models::BlogPageResponse,

            api_models::ErrorResponse,
            api_models::PingResponse,
        )
    ),
    tags(
        (name = "categories", description = "Blog categories."),
        (name = "blogs", description = "Blogs, including search, ordering and pagination."),
        (name = "health", description = "Liveness checks."),
    )
)]
pub struct ApiDocumentation;


/// Serves the interactive documentation at `/api-documentation`
/// and the raw document at `/api-documentation/openapi.json`.
pub fn documentation_service() -> RapiDoc<'static, 'static, 'static> {
    RapiDoc::with_openapi(
        "/api-documentation/openapi.json",
        ApiDocumentation::openapi(),
    )
    .path("/api-documentation")
}



#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn documents_every_route() {
        let documentation = ApiDocumentation::openapi();

        for expected_path in [
            "/api/categories",
            "/api/categories/{category_id}",
            "/api/blogs",
            "/api/blogs/paginated",
            "/api/blogs/search",
            "/api/blogs/order",
            "/api/blogs/{slug}",
            "/api/blog/{slug}/set-category",
            "/api/health/ping",
        ] {
            assert!(
                documentation.paths.paths.contains_key(expected_path),
                "missing path {} in OpenAPI document",
                expected_path
            );
        }
    }
}
