use async_trait::async_trait;
use quillpost_core::{
    ids::{BlogId, CategoryId},
    ordering::BlogOrdering,
};

use crate::{
    entities::{
        BlogModel,
        BlogValuesToUpdate,
        CategoryModel,
        CategoryValuesToUpdate,
        NewBlog,
        NewCategory,
    },
    QueryResult,
};



#[async_trait]
pub trait CategoryRepository: Send {
    /// Returns all categories in insertion order.
    async fn get_all_categories(&mut self) -> QueryResult<Vec<CategoryModel>>;

    async fn get_category_by_id(
        &mut self,
        category_id: CategoryId,
    ) -> QueryResult<Option<CategoryModel>>;

    async fn category_exists_by_id(&mut self, category_id: CategoryId) -> QueryResult<bool>;

    /// Exact, case-sensitive name comparison.
    async fn category_exists_by_name(&mut self, category_name: &str) -> QueryResult<bool>;

    async fn create_category(&mut self, new_category: NewCategory) -> QueryResult<CategoryModel>;

    /// Returns `false` if no category with the given ID exists.
    async fn update_category(
        &mut self,
        category_id: CategoryId,
        values_to_update: CategoryValuesToUpdate,
    ) -> QueryResult<bool>;

    /// Deletes only the category row. Blogs referencing it must be removed
    /// beforehand with [`BlogRepository::delete_blogs_by_category`].
    ///
    /// Returns `false` if no category with the given ID exists.
    async fn delete_category(&mut self, category_id: CategoryId) -> QueryResult<bool>;
}



#[async_trait]
pub trait BlogRepository: Send {
    /// Returns all blogs in insertion order.
    async fn get_all_blogs(&mut self) -> QueryResult<Vec<BlogModel>>;

    /// Returns at most `limit` blogs in insertion order, skipping the first `offset`.
    async fn get_blog_page(&mut self, offset: u64, limit: u64) -> QueryResult<Vec<BlogModel>>;

    async fn count_blogs(&mut self) -> QueryResult<u64>;

    /// Blogs whose name or description contains `query` (case-insensitive).
    async fn search_blogs(&mut self, query: &str) -> QueryResult<Vec<BlogModel>>;

    async fn get_all_blogs_ordered(
        &mut self,
        ordering: BlogOrdering,
    ) -> QueryResult<Vec<BlogModel>>;

    async fn get_blog_by_slug(&mut self, blog_slug: &str) -> QueryResult<Option<BlogModel>>;

    async fn blog_exists_by_slug(&mut self, blog_slug: &str) -> QueryResult<bool>;

    async fn create_blog(&mut self, new_blog: NewBlog) -> QueryResult<BlogModel>;

    /// Returns `false` if no blog with the given ID exists.
    async fn update_blog(
        &mut self,
        blog_id: BlogId,
        values_to_update: BlogValuesToUpdate,
    ) -> QueryResult<bool>;

    /// Returns `false` if no blog with the given ID exists.
    async fn delete_blog(&mut self, blog_id: BlogId) -> QueryResult<bool>;

    /// Removes every blog in the given category, returning how many were removed.
    async fn delete_blogs_by_category(&mut self, category_id: CategoryId) -> QueryResult<u64>;
}



/// A single unit of work against the database.
///
/// Dropping the transaction without calling [`commit`][Self::commit]
/// discards every change made through it.
#[async_trait]
pub trait DatabaseTransaction: CategoryRepository + BlogRepository + Send {
    /// Waits until no other transaction holds the write lock, then holds it
    /// until this transaction commits or is dropped.
    ///
    /// Handlers that check something (a free slug, an existing category, an unused
    /// category name) and then write based on the answer must take this lock before
    /// the check. Everything read after acquiring it reflects all previously
    /// committed writers.
    async fn acquire_write_lock(&mut self) -> QueryResult<()>;

    async fn commit(self: Box<Self>) -> QueryResult<()>;
}


#[async_trait]
pub trait Database: Send + Sync {
    async fn begin(&self) -> QueryResult<Box<dyn DatabaseTransaction>>;
}
