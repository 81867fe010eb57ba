use quillpost_core::ordering::{BlogOrdering, BlogOrderingField, OrderingDirection};
use sqlx::{PgConnection, Postgres, QueryBuilder};

use super::{model::into_external_blog_models, BlogModel, InternalBlogModel};
use crate::{QueryError, QueryResult, TryIntoExternalModel};


/// Turns a user-provided search string into a `LIKE` pattern matching any value
/// that contains it, escaping `%`, `_` and `\` so they match literally.
pub(crate) fn build_contains_pattern(search_query: &str) -> String {
    let mut pattern = String::with_capacity(search_query.len() + 2);
    pattern.push('%');

    for character in search_query.chars() {
        if matches!(character, '%' | '_' | '\\') {
            pattern.push('\\');
        }

        pattern.push(character);
    }

    pattern.push('%');
    pattern
}


fn ordering_column(field: BlogOrderingField) -> &'static str {
    match field {
        BlogOrderingField::Id => "blog.id",
        BlogOrderingField::Name => "blog.name",
        BlogOrderingField::Slug => "blog.slug",
        BlogOrderingField::Description => "blog.description",
    }
}

fn build_ordered_blogs_query(ordering: BlogOrdering) -> QueryBuilder<'static, Postgres> {
    let mut query_builder = QueryBuilder::new(select_blogs_with_category!());

    query_builder.push(" ORDER BY ");
    query_builder.push(ordering_column(ordering.field));

    match ordering.direction {
        OrderingDirection::Ascending => query_builder.push(" ASC"),
        OrderingDirection::Descending => query_builder.push(" DESC"),
    };

    // Ties are broken by insertion order.
    query_builder.push(", blog.created_at ASC, blog.id ASC");

    query_builder
}



pub struct BlogQuery;

impl BlogQuery {
    pub async fn get_all_blogs(database_connection: &mut PgConnection) -> QueryResult<Vec<BlogModel>> {
        let internal_blogs = sqlx::query_as::<_, InternalBlogModel>(concat!(
            select_blogs_with_category!(),
            " ORDER BY blog.created_at ASC, blog.id ASC"
        ))
        .fetch_all(database_connection)
        .await?;

        into_external_blog_models(internal_blogs)
    }

    pub async fn get_page(
        database_connection: &mut PgConnection,
        offset: u64,
        limit: u64,
    ) -> QueryResult<Vec<BlogModel>> {
        let internal_blogs = sqlx::query_as::<_, InternalBlogModel>(concat!(
            select_blogs_with_category!(),
            " ORDER BY blog.created_at ASC, blog.id ASC \
              LIMIT $1 OFFSET $2"
        ))
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .bind(i64::try_from(offset).unwrap_or(i64::MAX))
        .fetch_all(database_connection)
        .await?;

        into_external_blog_models(internal_blogs)
    }

    pub async fn count(database_connection: &mut PgConnection) -> QueryResult<u64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM quillpost.blog")
            .fetch_one(database_connection)
            .await?;

        u64::try_from(count).map_err(|_| {
            QueryError::database_inconsistency(format!(
                "blog count is negative ({})",
                count
            ))
        })
    }

    pub async fn search(
        database_connection: &mut PgConnection,
        search_query: &str,
    ) -> QueryResult<Vec<BlogModel>> {
        let internal_blogs = sqlx::query_as::<_, InternalBlogModel>(concat!(
            select_blogs_with_category!(),
            " WHERE blog.name ILIKE $1 OR blog.description ILIKE $1 \
              ORDER BY blog.created_at ASC, blog.id ASC"
        ))
        .bind(build_contains_pattern(search_query))
        .fetch_all(database_connection)
        .await?;

        into_external_blog_models(internal_blogs)
    }

    pub async fn get_all_blogs_ordered(
        database_connection: &mut PgConnection,
        ordering: BlogOrdering,
    ) -> QueryResult<Vec<BlogModel>> {
        let mut query_builder = build_ordered_blogs_query(ordering);

        let internal_blogs = query_builder
            .build_query_as::<InternalBlogModel>()
            .fetch_all(database_connection)
            .await?;

        into_external_blog_models(internal_blogs)
    }

    pub async fn get_by_slug(
        database_connection: &mut PgConnection,
        blog_slug: &str,
    ) -> QueryResult<Option<BlogModel>> {
        let internal_blog = sqlx::query_as::<_, InternalBlogModel>(concat!(
            select_blogs_with_category!(),
            " WHERE blog.slug = $1"
        ))
        .bind(blog_slug)
        .fetch_optional(database_connection)
        .await?;

        internal_blog
            .map(InternalBlogModel::try_into_external_model)
            .transpose()
    }

    pub async fn exists_by_slug(
        database_connection: &mut PgConnection,
        blog_slug: &str,
    ) -> QueryResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (\
                SELECT 1 \
                    FROM quillpost.blog \
                    WHERE slug = $1\
            )",
        )
        .bind(blog_slug)
        .fetch_one(database_connection)
        .await?;

        Ok(exists)
    }
}
