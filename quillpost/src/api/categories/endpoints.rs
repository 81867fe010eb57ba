use actix_web::{delete, get, post, put, web};
use quillpost_core::{
    api_models::{
        CategoryCreationRequest,
        CategoryDeletionResponse,
        CategoryErrorReason,
        CategoryUpdateRequest,
    },
    ids::CategoryId,
};
use quillpost_database::entities::{CategoryValuesToUpdate, NewCategory};
use tracing::info;

use crate::{
    api::{
        errors::{EndpointError, EndpointResponseBuilder, EndpointResult},
        reject_invalid_name,
        traits::IntoApiModel,
    },
    state::ApplicationState,
};



/// List all categories
///
/// Categories are listed in the order they were created in.
#[utoipa::path(
    get,
    path = "/api/categories",
    tag = "categories",
    responses(
        (
            status = 200,
            description = "All categories.",
            body = Vec<Category>,
        ),
        (
            status = 500,
            description = "Internal server error.",
            body = ErrorResponse,
        ),
    )
)]
#[get("")]
pub async fn get_all_categories(state: ApplicationState) -> EndpointResult {
    let mut transaction = state.begin_transaction().await?;

    let categories = transaction
        .get_all_categories()
        .await?
        .into_iter()
        .map(IntoApiModel::into_api_model)
        .collect::<Vec<_>>();

    EndpointResponseBuilder::ok()
        .with_json_body(categories)
        .build()
}



/// Create a new category
///
/// Category names must be unique. Creating a category with a name that is already
/// taken fails with `404 Not Found` and the message `Category already exists`.
#[utoipa::path(
    post,
    path = "/api/categories",
    tag = "categories",
    request_body(
        content = CategoryCreationRequest
    ),
    responses(
        (
            status = 200,
            description = "The category has been created.",
            body = Category,
        ),
        (
            status = 400,
            description = "Missing, malformed or invalid JSON body (e.g. a blank name).",
            body = ErrorResponse,
        ),
        (
            status = 404,
            description = "A category with the given name already exists.",
            body = ErrorResponse,
            example = json!({ "message": "Category already exists" })
        ),
        (
            status = 500,
            description = "Internal server error.",
            body = ErrorResponse,
        ),
    )
)]
#[post("")]
pub async fn create_category(
    state: ApplicationState,
    request_body: web::Json<CategoryCreationRequest>,
) -> EndpointResult {
    let request_body = request_body.into_inner();

    if let Some(invalid_name_response) = reject_invalid_name(&request_body.name) {
        return invalid_name_response;
    }


    let mut transaction = state.begin_write_transaction().await?;

    let category_already_exists = transaction
        .category_exists_by_name(&request_body.name)
        .await?;

    if category_already_exists {
        return EndpointResponseBuilder::not_found()
            .with_error_reason(CategoryErrorReason::category_already_exists())
            .build();
    }


    let newly_created_category = transaction
        .create_category(NewCategory {
            name: request_body.name,
        })
        .await?;

    transaction.commit().await?;


    info!(
        category_id = %newly_created_category.id,
        "Category created."
    );

    EndpointResponseBuilder::ok()
        .with_json_body(newly_created_category.into_api_model())
        .build()
}



/// Get a specific category
#[utoipa::path(
    get,
    path = "/api/categories/{category_id}",
    tag = "categories",
    params(
        ("category_id" = i32, Path, description = "ID of the category.")
    ),
    responses(
        (
            status = 200,
            description = "The requested category.",
            body = Category,
        ),
        (
            status = 400,
            description = "The category ID is not an integer.",
            body = ErrorResponse,
        ),
        (
            status = 404,
            description = "The category does not exist.",
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
#[get("/{category_id}")]
pub async fn get_specific_category(
    state: ApplicationState,
    parameters: web::Path<(i32,)>,
) -> EndpointResult {
    let target_category_id = CategoryId::new(parameters.into_inner().0);

    let mut transaction = state.begin_transaction().await?;

    let Some(category) = transaction.get_category_by_id(target_category_id).await? else {
        return EndpointResponseBuilder::not_found()
            .with_error_reason(CategoryErrorReason::category_not_found())
            .build();
    };

    EndpointResponseBuilder::ok()
        .with_json_body(category.into_api_model())
        .build()
}



/// Rename a category
///
/// Unlike on creation, the new name is not checked for uniqueness.
#[utoipa::path(
    put,
    path = "/api/categories/{category_id}",
    tag = "categories",
    params(
        ("category_id" = i32, Path, description = "ID of the category.")
    ),
    request_body(
        content = CategoryUpdateRequest
    ),
    responses(
        (
            status = 200,
            description = "The updated category.",
            body = Category,
        ),
        (
            status = 400,
            description = "Invalid category ID, or a missing, malformed or invalid JSON body.",
            body = ErrorResponse,
        ),
        (
            status = 404,
            description = "The category does not exist.",
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
#[put("/{category_id}")]
pub async fn update_specific_category(
    state: ApplicationState,
    parameters: web::Path<(i32,)>,
    request_body: web::Json<CategoryUpdateRequest>,
) -> EndpointResult {
    let target_category_id = CategoryId::new(parameters.into_inner().0);
    let request_body = request_body.into_inner();

    if let Some(invalid_name_response) = reject_invalid_name(&request_body.name) {
        return invalid_name_response;
    }


    let mut transaction = state.begin_transaction().await?;

    let category_was_updated = transaction
        .update_category(
            target_category_id,
            CategoryValuesToUpdate {
                name: request_body.name,
            },
        )
        .await?;

    if !category_was_updated {
        return EndpointResponseBuilder::not_found()
            .with_error_reason(CategoryErrorReason::category_not_found())
            .build();
    }

    let updated_category = transaction
        .get_category_by_id(target_category_id)
        .await?
        .ok_or_else(|| {
            EndpointError::invalid_database_state(format!(
                "category {} vanished after being updated",
                target_category_id
            ))
        })?;

    transaction.commit().await?;


    info!(
        category_id = %target_category_id,
        "Category updated."
    );

    EndpointResponseBuilder::ok()
        .with_json_body(updated_category.into_api_model())
        .build()
}



/// Delete a category
///
/// All blogs in the category are deleted along with it.
#[utoipa::path(
    delete,
    path = "/api/categories/{category_id}",
    tag = "categories",
    params(
        ("category_id" = i32, Path, description = "ID of the category.")
    ),
    responses(
        (
            status = 200,
            description = "The category and its blogs have been deleted.",
            body = CategoryDeletionResponse,
        ),
        (
            status = 400,
            description = "The category ID is not an integer.",
            body = ErrorResponse,
        ),
        (
            status = 404,
            description = "The category does not exist.",
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
#[delete("/{category_id}")]
pub async fn delete_specific_category(
    state: ApplicationState,
    parameters: web::Path<(i32,)>,
) -> EndpointResult {
    let target_category_id = CategoryId::new(parameters.into_inner().0);

    let mut transaction = state.begin_write_transaction().await?;

    let category_exists = transaction
        .category_exists_by_id(target_category_id)
        .await?;

    if !category_exists {
        return EndpointResponseBuilder::not_found()
            .with_error_reason(CategoryErrorReason::category_not_found())
            .build();
    }


    let number_of_deleted_blogs = transaction
        .delete_blogs_by_category(target_category_id)
        .await?;

    let category_was_deleted = transaction.delete_category(target_category_id).await?;
    if !category_was_deleted {
        return Err(EndpointError::invalid_database_state(format!(
            "category {} existed, but could not be deleted",
            target_category_id
        )));
    }

    transaction.commit().await?;


    info!(
        category_id = %target_category_id,
        deleted_blogs = number_of_deleted_blogs,
        "Category deleted."
    );

    EndpointResponseBuilder::ok()
        .with_json_body(CategoryDeletionResponse { success: true })
        .build()
}
