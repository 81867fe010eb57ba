use chrono::Utc;
use quillpost_core::ids::{BlogId, CategoryId};
use sqlx::{PgConnection, Postgres, QueryBuilder};

use super::{BlogModel, InternalBlogModel};
use crate::{QueryError, QueryResult, TryIntoExternalModel};



#[derive(Clone, PartialEq, Eq, Debug)]
pub struct NewBlog {
    pub name: String,

    /// Must already be unique; see `quillpost_core::slug`.
    pub slug: String,

    pub description: String,

    pub category_id: Option<CategoryId>,
}


/// Fields left as `None` are not touched.
///
/// `category_id` is doubly optional: `Some(None)` detaches the blog from its category.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct BlogValuesToUpdate {
    pub name: Option<String>,

    pub description: Option<String>,

    pub category_id: Option<Option<CategoryId>>,
}

impl BlogValuesToUpdate {
    pub fn has_no_fields_to_update(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.category_id.is_none()
    }
}


fn build_blog_update_query(
    blog_id: BlogId,
    values_to_update: BlogValuesToUpdate,
) -> QueryBuilder<'static, Postgres> {
    let mut update_query_builder: QueryBuilder<Postgres> =
        QueryBuilder::new("UPDATE quillpost.blog SET ");

    let mut separated_set_expressions = update_query_builder.separated(", ");

    if let Some(new_name) = values_to_update.name {
        separated_set_expressions
            .push("name = ")
            .push_bind_unseparated(new_name);
    }

    if let Some(new_description) = values_to_update.description {
        separated_set_expressions
            .push("description = ")
            .push_bind_unseparated(new_description);
    }

    if let Some(new_category_id) = values_to_update.category_id {
        separated_set_expressions
            .push("category_id = ")
            .push_bind_unseparated(new_category_id.map(CategoryId::into_inner));
    }


    update_query_builder.push(" WHERE id = ");
    update_query_builder.push_bind(blog_id.into_uuid());

    update_query_builder
}



pub struct BlogMutation;

impl BlogMutation {
    pub async fn create(
        database_connection: &mut PgConnection,
        new_blog: NewBlog,
    ) -> QueryResult<BlogModel> {
        let blog_id = BlogId::generate();
        let created_at = Utc::now();

        let newly_created_blog = sqlx::query_as::<_, InternalBlogModel>(
            "WITH inserted_blog AS (\
                INSERT INTO quillpost.blog \
                    (id, name, slug, description, category_id, created_at) \
                    VALUES ($1, $2, $3, $4, $5, $6) \
                    RETURNING id, name, slug, description, category_id, created_at\
            ) \
            SELECT \
                blog.id, blog.name, blog.slug, blog.description, blog.created_at, \
                blog.category_id, category.name AS category_name \
            FROM inserted_blog AS blog \
            LEFT JOIN quillpost.category AS category \
                ON category.id = blog.category_id",
        )
        .bind(blog_id.into_uuid())
        .bind(new_blog.name)
        .bind(new_blog.slug)
        .bind(new_blog.description)
        .bind(new_blog.category_id.map(CategoryId::into_inner))
        .bind(created_at)
        .fetch_one(database_connection)
        .await?;

        newly_created_blog.try_into_external_model()
    }

    pub async fn update(
        database_connection: &mut PgConnection,
        blog_id: BlogId,
        values_to_update: BlogValuesToUpdate,
    ) -> QueryResult<bool> {
        if values_to_update.has_no_fields_to_update() {
            let exists = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS (SELECT 1 FROM quillpost.blog WHERE id = $1)",
            )
            .bind(blog_id.into_uuid())
            .fetch_one(database_connection)
            .await?;

            return Ok(exists);
        }


        let mut update_query_builder = build_blog_update_query(blog_id, values_to_update);

        let query_result = update_query_builder
            .build()
            .execute(database_connection)
            .await?;

        Ok(query_result.rows_affected() == 1)
    }

    pub async fn delete(database_connection: &mut PgConnection, blog_id: BlogId) -> QueryResult<bool> {
        let query_result = sqlx::query(
            "DELETE FROM quillpost.blog \
                WHERE id = $1",
        )
        .bind(blog_id.into_uuid())
        .execute(database_connection)
        .await?;

        if query_result.rows_affected() > 1 {
            return Err(QueryError::database_inconsistency(format!(
                "while deleting blog {} more than one row was affected ({})",
                blog_id,
                query_result.rows_affected()
            )));
        }

        Ok(query_result.rows_affected() == 1)
    }

    pub async fn delete_by_category(
        database_connection: &mut PgConnection,
        category_id: CategoryId,
    ) -> QueryResult<u64> {
        let query_result = sqlx::query(
            "DELETE FROM quillpost.blog \
                WHERE category_id = $1",
        )
        .bind(category_id.into_inner())
        .execute(database_connection)
        .await?;

        Ok(query_result.rows_affected())
    }
}




#[cfg(test)]
mod test {
    use sqlx::Execute;
    use uuid::Uuid;

    use super::*;

    #[test]
    fn builds_correct_update_query() {
        let blog_id = BlogId::new(Uuid::nil());

        let mut all_fields = build_blog_update_query(
            blog_id,
            BlogValuesToUpdate {
                name: Some("Rust".to_string()),
                description: Some("All about Rust".to_string()),
                category_id: Some(Some(CategoryId::new(4))),
            },
        );

        assert_eq!(
            all_fields.build().sql(),
            "UPDATE quillpost.blog SET name = $1, description = $2, category_id = $3 WHERE id = $4"
        );


        let mut only_description = build_blog_update_query(
            blog_id,
            BlogValuesToUpdate {
                description: Some("Less about Rust".to_string()),
                ..Default::default()
            },
        );

        assert_eq!(
            only_description.build().sql(),
            "UPDATE quillpost.blog SET description = $1 WHERE id = $2"
        );


        let mut detach_category = build_blog_update_query(
            blog_id,
            BlogValuesToUpdate {
                category_id: Some(None),
                ..Default::default()
            },
        );

        assert_eq!(
            detach_category.build().sql(),
            "UPDATE quillpost.blog SET category_id = $1 WHERE id = $2"
        );
    }
}
