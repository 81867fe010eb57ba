use std::str::FromStr;

use actix_web::{delete, get, post, put, web};
use quillpost_core::{
    api_models::{
        Blog,
        BlogCategoryUpdateRequest,
        BlogCreationRequest,
        BlogErrorReason,
        BlogOrderingQuery,
        BlogPageQuery,
        BlogPageResponse,
        BlogSearchQuery,
        BlogUpdateRequest,
        CategoryErrorReason,
        BLOG_PAGE_SIZE,
    },
    ids::CategoryId,
    ordering::BlogOrdering,
};
use quillpost_database::{
    entities::{BlogModel, BlogValuesToUpdate, NewBlog},
    DatabaseTransaction,
};
use tracing::info;

use super::slugs::generate_unique_blog_slug;
use crate::{
    api::{
        errors::{EndpointError, EndpointResponseBuilder, EndpointResult},
        reject_invalid_name,
        traits::IntoApiModel,
    },
    state::ApplicationState,
};



fn blog_not_found() -> EndpointResult {
    EndpointResponseBuilder::not_found()
        .with_error_reason(BlogErrorReason::blog_not_found())
        .build()
}

fn category_not_found() -> EndpointResult {
    EndpointResponseBuilder::not_found()
        .with_error_reason(CategoryErrorReason::category_not_found())
        .build()
}

fn blogs_into_api_models(blogs: Vec<BlogModel>) -> Vec<Blog> {
    blogs
        .into_iter()
        .map(IntoApiModel::into_api_model)
        .collect()
}

/// Returns `false` if a category ID was given, but no such category exists.
async fn optional_category_exists(
    transaction: &mut dyn DatabaseTransaction,
    category_id: Option<CategoryId>,
) -> Result<bool, EndpointError> {
    match category_id {
        Some(category_id) => Ok(transaction.category_exists_by_id(category_id).await?),
        None => Ok(true),
    }
}

/// Re-reads a blog that was just modified in the same transaction.
async fn reload_blog(
    transaction: &mut dyn DatabaseTransaction,
    blog_slug: &str,
) -> Result<BlogModel, EndpointError> {
    transaction
        .get_blog_by_slug(blog_slug)
        .await?
        .ok_or_else(|| {
            EndpointError::invalid_database_state(format!(
                "blog with slug \"{}\" vanished after being updated",
                blog_slug
            ))
        })
}



/// List all blogs
///
/// Blogs are listed in the order they were created in,
/// each with its category embedded (or `null`).
#[utoipa::path(
    get,
    path = "/api/blogs",
    tag = "blogs",
    responses(
        (
            status = 200,
            description = "All blogs.",
            body = Vec<Blog>,
        ),
        (
            status = 500,
            description = "Internal server error.",
            body = ErrorResponse,
        ),
    )
)]
#[get("")]
pub async fn get_all_blogs(state: ApplicationState) -> EndpointResult {
    let mut transaction = state.begin_transaction().await?;

    let blogs = transaction.get_all_blogs().await?;

    EndpointResponseBuilder::ok()
        .with_json_body(blogs_into_api_models(blogs))
        .build()
}



/// List blogs, one page at a time
///
/// Pages hold up to ten blogs each, in creation order. Pages past the last one are empty.
#[utoipa::path(
    get,
    path = "/api/blogs/paginated",
    tag = "blogs",
    params(BlogPageQuery),
    responses(
        (
            status = 200,
            description = "The requested page.",
            body = BlogPageResponse,
        ),
        (
            status = 400,
            description = "The page number is not a positive integer.",
            body = ErrorResponse,
        ),
        (
            status = 500,
            description = "Internal server error.",
            body = ErrorResponse,
        ),
    )
)]
#[get("/paginated")]
pub async fn get_blog_page(
    state: ApplicationState,
    query: web::Query<BlogPageQuery>,
) -> EndpointResult {
    let page = query.into_inner().page;

    if page < 1 {
        return EndpointResponseBuilder::bad_request()
            .with_error_reason(BlogErrorReason::invalid_page_number(page))
            .build();
    }

    let offset = u64::from(page - 1) * u64::from(BLOG_PAGE_SIZE);


    let mut transaction = state.begin_transaction().await?;

    let total_blog_count = transaction.count_blogs().await?;
    let blogs_on_page = transaction
        .get_blog_page(offset, u64::from(BLOG_PAGE_SIZE))
        .await?;

    EndpointResponseBuilder::ok()
        .with_json_body(BlogPageResponse {
            items: blogs_into_api_models(blogs_on_page),
            count: total_blog_count,
            page,
            page_size: BLOG_PAGE_SIZE,
        })
        .build()
}



/// Search blogs
///
/// Returns the blogs whose name or description contains the query (case-insensitive).
#[utoipa::path(
    get,
    path = "/api/blogs/search",
    tag = "blogs",
    params(BlogSearchQuery),
    responses(
        (
            status = 200,
            description = "Matching blogs, in creation order.",
            body = Vec<Blog>,
        ),
        (
            status = 400,
            description = "The `q` query parameter is missing.",
            body = ErrorResponse,
        ),
        (
            status = 500,
            description = "Internal server error.",
            body = ErrorResponse,
        ),
    )
)]
#[get("/search")]
pub async fn search_blogs(
    state: ApplicationState,
    query: web::Query<BlogSearchQuery>,
) -> EndpointResult {
    let search_query = query.into_inner().q;

    let mut transaction = state.begin_transaction().await?;

    let matching_blogs = transaction.search_blogs(&search_query).await?;

    EndpointResponseBuilder::ok()
        .with_json_body(blogs_into_api_models(matching_blogs))
        .build()
}



/// List all blogs in a given order
#[utoipa::path(
    get,
    path = "/api/blogs/order",
    tag = "blogs",
    params(BlogOrderingQuery),
    responses(
        (
            status = 200,
            description = "All blogs, ordered as requested.",
            body = Vec<Blog>,
        ),
        (
            status = 400,
            description = "The blogs can not be ordered by the given field.",
            body = ErrorResponse,
        ),
        (
            status = 500,
            description = "Internal server error.",
            body = ErrorResponse,
        ),
    )
)]
#[get("/order")]
pub async fn get_ordered_blogs(
    state: ApplicationState,
    query: web::Query<BlogOrderingQuery>,
) -> EndpointResult {
    let order_by = query.into_inner().order_by;

    let Ok(ordering) = BlogOrdering::from_str(&order_by) else {
        return EndpointResponseBuilder::bad_request()
            .with_error_reason(BlogErrorReason::invalid_ordering_field(order_by))
            .build();
    };


    let mut transaction = state.begin_transaction().await?;

    let ordered_blogs = transaction.get_all_blogs_ordered(ordering).await?;

    EndpointResponseBuilder::ok()
        .with_json_body(blogs_into_api_models(ordered_blogs))
        .build()
}



/// Get a specific blog
#[utoipa::path(
    get,
    path = "/api/blogs/{slug}",
    tag = "blogs",
    params(
        ("slug" = String, Path, description = "Slug of the blog.")
    ),
    responses(
        (
            status = 200,
            description = "The requested blog.",
            body = Blog,
        ),
        (
            status = 404,
            description = "The blog does not exist.",
            body = ErrorResponse,
            example = json!({ "message": "Blog not found" })
        ),
        (
            status = 500,
            description = "Internal server error.",
            body = ErrorResponse,
        ),
    )
)]
#[get("/{slug}")]
pub async fn get_specific_blog(
    state: ApplicationState,
    parameters: web::Path<(String,)>,
) -> EndpointResult {
    let target_blog_slug = parameters.into_inner().0;

    let mut transaction = state.begin_transaction().await?;

    let Some(blog) = transaction.get_blog_by_slug(&target_blog_slug).await? else {
        return blog_not_found();
    };

    EndpointResponseBuilder::ok()
        .with_json_body(blog.into_api_model())
        .build()
}



/// Create a new blog
///
/// The slug is derived from the name and made unique by appending
/// `-2`, `-3`, ... when needed. It never changes afterwards.
#[utoipa::path(
    post,
    path = "/api/blogs",
    tag = "blogs",
    request_body(
        content = BlogCreationRequest
    ),
    responses(
        (
            status = 200,
            description = "The blog has been created.",
            body = Blog,
        ),
        (
            status = 400,
            description = "Missing, malformed or invalid JSON body (e.g. a blank name).",
            body = ErrorResponse,
        ),
        (
            status = 404,
            description = "The given category does not exist.",
            body = ErrorResponse,
            example = json!({ "message": "Category not found" })
        ),
        (
            status = 500,
            description = "Internal server error.",
            body = ErrorResponse,
        ),
    )
)]
#[post("")]
pub async fn create_blog(
    state: ApplicationState,
    request_body: web::Json<BlogCreationRequest>,
) -> EndpointResult {
    let request_body = request_body.into_inner();

    if let Some(invalid_name_response) = reject_invalid_name(&request_body.name) {
        return invalid_name_response;
    }


    let mut transaction = state.begin_write_transaction().await?;

    if !optional_category_exists(transaction.as_mut(), request_body.category_id).await? {
        return category_not_found();
    }

    let slug = generate_unique_blog_slug(transaction.as_mut(), &request_body.name).await?;

    let newly_created_blog = transaction
        .create_blog(NewBlog {
            name: request_body.name,
            slug,
            description: request_body.description,
            category_id: request_body.category_id,
        })
        .await?;

    transaction.commit().await?;


    info!(
        blog_id = %newly_created_blog.id,
        slug = newly_created_blog.slug.as_str(),
        "Blog created."
    );

    EndpointResponseBuilder::ok()
        .with_json_body(newly_created_blog.into_api_model())
        .build()
}



/// Update a blog
///
/// Replaces the name, description and category of the blog. An omitted or `null`
/// `category_id` removes the blog from its category. The slug stays the same.
#[utoipa::path(
    put,
    path = "/api/blogs/{slug}",
    tag = "blogs",
    params(
        ("slug" = String, Path, description = "Slug of the blog.")
    ),
    request_body(
        content = BlogUpdateRequest
    ),
    responses(
        (
            status = 200,
            description = "The updated blog.",
            body = Blog,
        ),
        (
            status = 400,
            description = "Missing, malformed or invalid JSON body (e.g. a blank name).",
            body = ErrorResponse,
        ),
        (
            status = 404,
            description = "The blog or the given category does not exist.",
            body = ErrorResponse,
            example = json!({ "message": "Blog not found" })
        ),
        (
            status = 500,
            description = "Internal server error.",
            body = ErrorResponse,
        ),
    )
)]
#[put("/{slug}")]
pub async fn update_specific_blog(
    state: ApplicationState,
    parameters: web::Path<(String,)>,
    request_body: web::Json<BlogUpdateRequest>,
) -> EndpointResult {
    let target_blog_slug = parameters.into_inner().0;
    let request_body = request_body.into_inner();

    if let Some(invalid_name_response) = reject_invalid_name(&request_body.name) {
        return invalid_name_response;
    }


    let mut transaction = state.begin_write_transaction().await?;

    let Some(existing_blog) = transaction.get_blog_by_slug(&target_blog_slug).await? else {
        return blog_not_found();
    };

    if !optional_category_exists(transaction.as_mut(), request_body.category_id).await? {
        return category_not_found();
    }


    let blog_was_updated = transaction
        .update_blog(
            existing_blog.id,
            BlogValuesToUpdate {
                name: Some(request_body.name),
                description: Some(request_body.description),
                category_id: Some(request_body.category_id),
            },
        )
        .await?;

    if !blog_was_updated {
        return Err(EndpointError::invalid_database_state(format!(
            "blog {} existed, but could not be updated",
            existing_blog.id
        )));
    }

    let updated_blog = reload_blog(transaction.as_mut(), &target_blog_slug).await?;

    transaction.commit().await?;


    info!(
        blog_id = %updated_blog.id,
        "Blog updated."
    );

    EndpointResponseBuilder::ok()
        .with_json_body(updated_blog.into_api_model())
        .build()
}



/// Set the category of a blog
///
/// An omitted or `null` `category_id` removes the blog from its category.
/// If the given category does not exist, the blog is left unchanged.
#[utoipa::path(
    post,
    path = "/api/blog/{slug}/set-category",
    tag = "blogs",
    params(
        ("slug" = String, Path, description = "Slug of the blog.")
    ),
    request_body(
        content = BlogCategoryUpdateRequest
    ),
    responses(
        (
            status = 200,
            description = "The updated blog.",
            body = Blog,
        ),
        (
            status = 400,
            description = "Missing or malformed JSON body.",
            body = ErrorResponse,
        ),
        (
            status = 404,
            description = "The blog or the given category does not exist.",
            body = ErrorResponse,
            example = json!({ "message": "Category not found" })
        ),
        (
            status = 500,
            description = "Internal server error.",
            body = ErrorResponse,
        ),
    )
)]
#[post("/{slug}/set-category")]
pub async fn set_blog_category(
    state: ApplicationState,
    parameters: web::Path<(String,)>,
    request_body: web::Json<BlogCategoryUpdateRequest>,
) -> EndpointResult {
    let target_blog_slug = parameters.into_inner().0;
    let new_category_id = request_body.into_inner().category_id;


    let mut transaction = state.begin_write_transaction().await?;

    let Some(existing_blog) = transaction.get_blog_by_slug(&target_blog_slug).await? else {
        return blog_not_found();
    };

    if !optional_category_exists(transaction.as_mut(), new_category_id).await? {
        return category_not_found();
    }


    let blog_was_updated = transaction
        .update_blog(
            existing_blog.id,
            BlogValuesToUpdate {
                category_id: Some(new_category_id),
                ..Default::default()
            },
        )
        .await?;

    if !blog_was_updated {
        return Err(EndpointError::invalid_database_state(format!(
            "blog {} existed, but its category could not be updated",
            existing_blog.id
        )));
    }

    let updated_blog = reload_blog(transaction.as_mut(), &target_blog_slug).await?;

    transaction.commit().await?;


    info!(
        blog_id = %updated_blog.id,
        category_id = new_category_id.map(|category_id| category_id.into_inner()),
        "Blog category updated."
    );

    EndpointResponseBuilder::ok()
        .with_json_body(updated_blog.into_api_model())
        .build()
}



/// Delete a blog
///
/// Responds with the blog as it was right before it was deleted.
#[utoipa::path(
    delete,
    path = "/api/blogs/{slug}",
    tag = "blogs",
    params(
        ("slug" = String, Path, description = "Slug of the blog.")
    ),
    responses(
        (
            status = 200,
            description = "The blog has been deleted.",
            body = Blog,
        ),
        (
            status = 404,
            description = "The blog does not exist.",
            body = ErrorResponse,
            example = json!({ "message": "Blog not found" })
        ),
        (
            status = 500,
            description = "Internal server error.",
            body = ErrorResponse,
        ),
    )
)]
#[delete("/{slug}")]
pub async fn delete_specific_blog(
    state: ApplicationState,
    parameters: web::Path<(String,)>,
) -> EndpointResult {
    let target_blog_slug = parameters.into_inner().0;

    let mut transaction = state.begin_transaction().await?;

    let Some(blog_to_delete) = transaction.get_blog_by_slug(&target_blog_slug).await? else {
        return blog_not_found();
    };

    let blog_was_deleted = transaction.delete_blog(blog_to_delete.id).await?;
    if !blog_was_deleted {
        return Err(EndpointError::invalid_database_state(format!(
            "blog {} existed, but could not be deleted",
            blog_to_delete.id
        )));
    }

    transaction.commit().await?;


    info!(
        blog_id = %blog_to_delete.id,
        slug = blog_to_delete.slug.as_str(),
        "Blog deleted."
    );

    EndpointResponseBuilder::ok()
        .with_json_body(blog_to_delete.into_api_model())
        .build()
}
