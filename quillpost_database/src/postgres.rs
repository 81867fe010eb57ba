use async_trait::async_trait;
use quillpost_core::{
    ids::{BlogId, CategoryId},
    ordering::BlogOrdering,
};
use sqlx::{PgPool, Postgres, Transaction};

use crate::{
    entities::{
        BlogModel,
        BlogMutation,
        BlogQuery,
        BlogValuesToUpdate,
        CategoryModel,
        CategoryMutation,
        CategoryQuery,
        CategoryValuesToUpdate,
        NewBlog,
        NewCategory,
    },
    BlogRepository,
    CategoryRepository,
    Database,
    DatabaseTransaction,
    QueryResult,
};



/// PostgreSQL-backed [`Database`].
///
/// The schema is expected to be up to date (see [`MIGRATOR`][crate::MIGRATOR]).
#[derive(Clone)]
pub struct PostgresDatabase {
    pool: PgPool,
}

impl PostgresDatabase {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Database for PostgresDatabase {
    async fn begin(&self) -> QueryResult<Box<dyn DatabaseTransaction>> {
        let transaction = self.pool.begin().await?;

        Ok(Box::new(PostgresTransaction { transaction }))
    }
}



/// Key of the transaction-scoped advisory lock behind
/// [`DatabaseTransaction::acquire_write_lock`].
const WRITE_LOCK_ADVISORY_KEY: i64 = 0x7175_696c_6c70_6f73;


pub struct PostgresTransaction {
    transaction: Transaction<'static, Postgres>,
}

#[async_trait]
impl DatabaseTransaction for PostgresTransaction {
    async fn acquire_write_lock(&mut self) -> QueryResult<()> {
        // Released by Postgres itself at commit or rollback.
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(WRITE_LOCK_ADVISORY_KEY)
            .execute(&mut *self.transaction)
            .await?;

        Ok(())
    }

    async fn commit(self: Box<Self>) -> QueryResult<()> {
        self.transaction.commit().await?;
        Ok(())
    }
}


#[async_trait]
impl CategoryRepository for PostgresTransaction {
    async fn get_all_categories(&mut self) -> QueryResult<Vec<CategoryModel>> {
        CategoryQuery::get_all_categories(&mut *self.transaction).await
    }

    async fn get_category_by_id(
        &mut self,
        category_id: CategoryId,
    ) -> QueryResult<Option<CategoryModel>> {
        CategoryQuery::get_by_id(&mut *self.transaction, category_id).await
    }

    async fn category_exists_by_id(&mut self, category_id: CategoryId) -> QueryResult<bool> {
        CategoryQuery::exists_by_id(&mut *self.transaction, category_id).await
    }

    async fn category_exists_by_name(&mut self, category_name: &str) -> QueryResult<bool> {
        CategoryQuery::exists_by_name(&mut *self.transaction, category_name).await
    }

    async fn create_category(&mut self, new_category: NewCategory) -> QueryResult<CategoryModel> {
        CategoryMutation::create(&mut *self.transaction, new_category).await
    }

    async fn update_category(
        &mut self,
        category_id: CategoryId,
        values_to_update: CategoryValuesToUpdate,
    ) -> QueryResult<bool> {
        CategoryMutation::update(&mut *self.transaction, category_id, values_to_update).await
    }

    async fn delete_category(&mut self, category_id: CategoryId) -> QueryResult<bool> {
        CategoryMutation::delete(&mut *self.transaction, category_id).await
    }
}


#[async_trait]
impl BlogRepository for PostgresTransaction {
    async fn get_all_blogs(&mut self) -> QueryResult<Vec<BlogModel>> {
        BlogQuery::get_all_blogs(&mut *self.transaction).await
    }

    async fn get_blog_page(&mut self, offset: u64, limit: u64) -> QueryResult<Vec<BlogModel>> {
        BlogQuery::get_page(&mut *self.transaction, offset, limit).await
    }

    async fn count_blogs(&mut self) -> QueryResult<u64> {
        BlogQuery::count(&mut *self.transaction).await
    }

    async fn search_blogs(&mut self, query: &str) -> QueryResult<Vec<BlogModel>> {
        BlogQuery::search(&mut *self.transaction, query).await
    }

    async fn get_all_blogs_ordered(
        &mut self,
        ordering: BlogOrdering,
    ) -> QueryResult<Vec<BlogModel>> {
        BlogQuery::get_all_blogs_ordered(&mut *self.transaction, ordering).await
    }

    async fn get_blog_by_slug(&mut self, blog_slug: &str) -> QueryResult<Option<BlogModel>> {
        BlogQuery::get_by_slug(&mut *self.transaction, blog_slug).await
    }

    async fn blog_exists_by_slug(&mut self, blog_slug: &str) -> QueryResult<bool> {
        BlogQuery::exists_by_slug(&mut *self.transaction, blog_slug).await
    }

    async fn create_blog(&mut self, new_blog: NewBlog) -> QueryResult<BlogModel> {
        BlogMutation::create(&mut *self.transaction, new_blog).await
    }

    async fn update_blog(
        &mut self,
        blog_id: BlogId,
        values_to_update: BlogValuesToUpdate,
    ) -> QueryResult<bool> {
        BlogMutation::update(&mut *self.transaction, blog_id, values_to_update).await
    }

    async fn delete_blog(&mut self, blog_id: BlogId) -> QueryResult<bool> {
        BlogMutation::delete(&mut *self.transaction, blog_id).await
    }

    async fn delete_blogs_by_category(&mut self, category_id: CategoryId) -> QueryResult<u64> {
        BlogMutation::delete_by_category(&mut *self.transaction, category_id).await
    }
}
