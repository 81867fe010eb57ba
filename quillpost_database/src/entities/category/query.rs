use quillpost_core::ids::CategoryId;
use sqlx::PgConnection;

use super::CategoryModel;
use crate::{IntoExternalModel, QueryResult};


pub struct CategoryQuery;

impl CategoryQuery {
    pub async fn get_all_categories(
        database_connection: &mut PgConnection,
    ) -> QueryResult<Vec<CategoryModel>> {
        let internal_categories = sqlx::query_as::<_, super::InternalCategoryModel>(
            "SELECT id, name \
                FROM quillpost.category \
                ORDER BY id ASC",
        )
        .fetch_all(database_connection)
        .await?;

        Ok(internal_categories
            .into_iter()
            .map(super::InternalCategoryModel::into_external_model)
            .collect())
    }

    pub async fn get_by_id(
        database_connection: &mut PgConnection,
        category_id: CategoryId,
    ) -> QueryResult<Option<CategoryModel>> {
        let internal_category = sqlx::query_as::<_, super::InternalCategoryModel>(
            "SELECT id, name \
                FROM quillpost.category \
                WHERE id = $1",
        )
        .bind(category_id.into_inner())
        .fetch_optional(database_connection)
        .await?;

        Ok(internal_category.map(|category| category.into_external_model()))
    }

    pub async fn exists_by_id(
        database_connection: &mut PgConnection,
        category_id: CategoryId,
    ) -> QueryResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (\
                SELECT 1 \
                    FROM quillpost.category \
                    WHERE id = $1\
            )",
        )
        .bind(category_id.into_inner())
        .fetch_one(database_connection)
        .await?;

        Ok(exists)
    }

    pub async fn exists_by_name(
        database_connection: &mut PgConnection,
        category_name: &str,
    ) -> QueryResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (\
                SELECT 1 \
                    FROM quillpost.category \
                    WHERE name = $1\
            )",
        )
        .bind(category_name)
        .fetch_one(database_connection)
        .await?;

        Ok(exists)
    }
}
