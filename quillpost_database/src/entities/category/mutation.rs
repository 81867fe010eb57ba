use quillpost_core::ids::CategoryId;
use sqlx::PgConnection;

use super::CategoryModel;
use crate::{IntoExternalModel, QueryError, QueryResult};



#[derive(Clone, PartialEq, Eq, Debug)]
pub struct NewCategory {
    pub name: String,
}


#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CategoryValuesToUpdate {
    pub name: String,
}



pub struct CategoryMutation;

impl CategoryMutation {
    pub async fn create(
        database_connection: &mut PgConnection,
        new_category: NewCategory,
    ) -> QueryResult<CategoryModel> {
        let newly_created_category = sqlx::query_as::<_, super::InternalCategoryModel>(
            "INSERT INTO quillpost.category (name) \
                VALUES ($1) \
                RETURNING id, name",
        )
        .bind(new_category.name)
        .fetch_one(database_connection)
        .await?;

        Ok(newly_created_category.into_external_model())
    }

    pub async fn update(
        database_connection: &mut PgConnection,
        category_id: CategoryId,
        values_to_update: CategoryValuesToUpdate,
    ) -> QueryResult<bool> {
        let query_result = sqlx::query(
            "UPDATE quillpost.category \
                SET name = $1 \
                WHERE id = $2",
        )
        .bind(values_to_update.name)
        .bind(category_id.into_inner())
        .execute(database_connection)
        .await?;

        Ok(query_result.rows_affected() == 1)
    }

    pub async fn delete(
        database_connection: &mut PgConnection,
        category_id: CategoryId,
    ) -> QueryResult<bool> {
        let query_result = sqlx::query(
            "DELETE FROM quillpost.category \
                WHERE id = $1",
        )
        .bind(category_id.into_inner())
        .execute(database_connection)
        .await?;

        if query_result.rows_affected() > 1 {
            return Err(QueryError::database_inconsistency(format!(
                "while deleting category {} more than one row was affected ({})",
                category_id,
                query_result.rows_affected()
            )));
        }

        Ok(query_result.rows_affected() == 1)
    }
}
