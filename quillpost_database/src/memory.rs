//! Non-persistent [`Database`] implementation used by the end-to-end test harness.
//!
//! Transactions are serialized: [`InMemoryDatabase::begin`] holds the state lock until
//! the transaction is committed or dropped. All changes are made on a private copy of
//! the state, which replaces the shared one on commit.

use std::{cmp::Ordering, collections::BTreeMap, sync::Arc};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quillpost_core::{
    ids::{BlogId, CategoryId},
    ordering::{BlogOrdering, BlogOrderingField, OrderingDirection},
};
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::{
    entities::{
        BlogModel,
        BlogValuesToUpdate,
        CategoryModel,
        CategoryValuesToUpdate,
        NewBlog,
        NewCategory,
    },
    BlogRepository,
    CategoryRepository,
    Database,
    DatabaseTransaction,
    QueryError,
    QueryResult,
};



#[derive(Clone, Debug)]
struct StoredBlog {
    id: BlogId,
    name: String,
    slug: String,
    description: String,
    category_id: Option<CategoryId>,
    created_at: DateTime<Utc>,
}


#[derive(Clone, Debug)]
struct InMemoryState {
    next_category_id: i32,

    categories: BTreeMap<CategoryId, String>,

    /// Kept in insertion order.
    blogs: Vec<StoredBlog>,
}

impl Default for InMemoryState {
    fn default() -> Self {
        Self {
            next_category_id: 1,
            categories: BTreeMap::new(),
            blogs: Vec::new(),
        }
    }
}

impl InMemoryState {
    fn category_model(&self, category_id: CategoryId) -> Option<CategoryModel> {
        self.categories
            .get(&category_id)
            .map(|name| CategoryModel {
                id: category_id,
                name: name.clone(),
            })
    }

    fn blog_model(&self, blog: &StoredBlog) -> QueryResult<BlogModel> {
        let category = match blog.category_id {
            Some(category_id) => Some(self.category_model(category_id).ok_or_else(|| {
                QueryError::database_inconsistency(format!(
                    "blog {} references category {}, which does not exist",
                    blog.id, category_id
                ))
            })?),
            None => None,
        };

        Ok(BlogModel {
            id: blog.id,
            name: blog.name.clone(),
            slug: blog.slug.clone(),
            category,
            description: blog.description.clone(),
            created_at: blog.created_at,
        })
    }

    fn blog_models<'b, I>(&self, blogs: I) -> QueryResult<Vec<BlogModel>>
    where
        I: IntoIterator<Item = &'b StoredBlog>,
    {
        blogs
            .into_iter()
            .map(|blog| self.blog_model(blog))
            .collect()
    }

    fn blog_position_by_id(&self, blog_id: BlogId) -> Option<usize> {
        self.blogs.iter().position(|blog| blog.id == blog_id)
    }
}


fn compare_blogs(first: &StoredBlog, second: &StoredBlog, field: BlogOrderingField) -> Ordering {
    match field {
        BlogOrderingField::Id => first.id.cmp(&second.id),
        BlogOrderingField::Name => first.name.cmp(&second.name),
        BlogOrderingField::Slug => first.slug.cmp(&second.slug),
        BlogOrderingField::Description => first.description.cmp(&second.description),
    }
}



/// An empty, non-persistent database. Clones share the same state.
#[derive(Clone, Default)]
pub struct InMemoryDatabase {
    state: Arc<Mutex<InMemoryState>>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Database for InMemoryDatabase {
    async fn begin(&self) -> QueryResult<Box<dyn DatabaseTransaction>> {
        let shared_state = self.state.clone().lock_owned().await;
        let working_state = shared_state.clone();

        Ok(Box::new(InMemoryTransaction {
            shared_state,
            working_state,
        }))
    }
}



pub struct InMemoryTransaction {
    shared_state: OwnedMutexGuard<InMemoryState>,
    working_state: InMemoryState,
}

#[async_trait]
impl DatabaseTransaction for InMemoryTransaction {
    /// Every in-memory transaction already holds the store's mutex for its whole lifetime.
    async fn acquire_write_lock(&mut self) -> QueryResult<()> {
        Ok(())
    }

    async fn commit(self: Box<Self>) -> QueryResult<()> {
        let InMemoryTransaction {
            mut shared_state,
            working_state,
        } = *self;

        *shared_state = working_state;

        Ok(())
    }
}


#[async_trait]
impl CategoryRepository for InMemoryTransaction {
    async fn get_all_categories(&mut self) -> QueryResult<Vec<CategoryModel>> {
        Ok(self
            .working_state
            .categories
            .iter()
            .map(|(id, name)| CategoryModel {
                id: *id,
                name: name.clone(),
            })
            .collect())
    }

    async fn get_category_by_id(
        &mut self,
        category_id: CategoryId,
    ) -> QueryResult<Option<CategoryModel>> {
        Ok(self.working_state.category_model(category_id))
    }

    async fn category_exists_by_id(&mut self, category_id: CategoryId) -> QueryResult<bool> {
        Ok(self.working_state.categories.contains_key(&category_id))
    }

    async fn category_exists_by_name(&mut self, category_name: &str) -> QueryResult<bool> {
        Ok(self
            .working_state
            .categories
            .values()
            .any(|name| name == category_name))
    }

    async fn create_category(&mut self, new_category: NewCategory) -> QueryResult<CategoryModel> {
        let category_id = CategoryId::new(self.working_state.next_category_id);
        self.working_state.next_category_id += 1;

        self.working_state
            .categories
            .insert(category_id, new_category.name.clone());

        Ok(CategoryModel {
            id: category_id,
            name: new_category.name,
        })
    }

    async fn update_category(
        &mut self,
        category_id: CategoryId,
        values_to_update: CategoryValuesToUpdate,
    ) -> QueryResult<bool> {
        let Some(name) = self.working_state.categories.get_mut(&category_id) else {
            return Ok(false);
        };

        *name = values_to_update.name;

        Ok(true)
    }

    async fn delete_category(&mut self, category_id: CategoryId) -> QueryResult<bool> {
        let existed = self
            .working_state
            .categories
            .remove(&category_id)
            .is_some();

        // Same as the foreign key's ON DELETE CASCADE.
        if existed {
            self.working_state
                .blogs
                .retain(|blog| blog.category_id != Some(category_id));
        }

        Ok(existed)
    }
}


#[async_trait]
impl BlogRepository for InMemoryTransaction {
    async fn get_all_blogs(&mut self) -> QueryResult<Vec<BlogModel>> {
        self.working_state
            .blog_models(&self.working_state.blogs)
    }

    async fn get_blog_page(&mut self, offset: u64, limit: u64) -> QueryResult<Vec<BlogModel>> {
        let offset = usize::try_from(offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);

        self.working_state
            .blog_models(self.working_state.blogs.iter().skip(offset).take(limit))
    }

    async fn count_blogs(&mut self) -> QueryResult<u64> {
        Ok(self.working_state.blogs.len() as u64)
    }

    async fn search_blogs(&mut self, query: &str) -> QueryResult<Vec<BlogModel>> {
        let lowercase_query = query.to_lowercase();

        self.working_state.blog_models(self.working_state.blogs.iter().filter(|blog| {
            blog.name.to_lowercase().contains(&lowercase_query)
                || blog.description.to_lowercase().contains(&lowercase_query)
        }))
    }

    async fn get_all_blogs_ordered(
        &mut self,
        ordering: BlogOrdering,
    ) -> QueryResult<Vec<BlogModel>> {
        let mut ordered_blogs: Vec<&StoredBlog> = self.working_state.blogs.iter().collect();

        // Stable sort: ties stay in insertion order.
        ordered_blogs.sort_by(|first, second| {
            let ordering_by_field = compare_blogs(first, second, ordering.field);

            match ordering.direction {
                OrderingDirection::Ascending => ordering_by_field,
                OrderingDirection::Descending => ordering_by_field.reverse(),
            }
        });

        self.working_state.blog_models(ordered_blogs)
    }

    async fn get_blog_by_slug(&mut self, blog_slug: &str) -> QueryResult<Option<BlogModel>> {
        self.working_state
            .blogs
            .iter()
            .find(|blog| blog.slug == blog_slug)
            .map(|blog| self.working_state.blog_model(blog))
            .transpose()
    }

    async fn blog_exists_by_slug(&mut self, blog_slug: &str) -> QueryResult<bool> {
        Ok(self
            .working_state
            .blogs
            .iter()
            .any(|blog| blog.slug == blog_slug))
    }

    async fn create_blog(&mut self, new_blog: NewBlog) -> QueryResult<BlogModel> {
        if self.blog_exists_by_slug(&new_blog.slug).await? {
            return Err(QueryError::database_inconsistency(format!(
                "a blog with slug \"{}\" already exists",
                new_blog.slug
            )));
        }

        if let Some(category_id) = new_blog.category_id {
            if !self.working_state.categories.contains_key(&category_id) {
                return Err(QueryError::database_inconsistency(format!(
                    "category {} does not exist",
                    category_id
                )));
            }
        }


        let stored_blog = StoredBlog {
            id: BlogId::generate(),
            name: new_blog.name,
            slug: new_blog.slug,
            description: new_blog.description,
            category_id: new_blog.category_id,
            created_at: Utc::now(),
        };

        let blog_model = self.working_state.blog_model(&stored_blog)?;
        self.working_state.blogs.push(stored_blog);

        Ok(blog_model)
    }

    async fn update_blog(
        &mut self,
        blog_id: BlogId,
        values_to_update: BlogValuesToUpdate,
    ) -> QueryResult<bool> {
        if let Some(Some(category_id)) = values_to_update.category_id {
            if !self.working_state.categories.contains_key(&category_id) {
                return Err(QueryError::database_inconsistency(format!(
                    "category {} does not exist",
                    category_id
                )));
            }
        }

        let Some(blog_position) = self.working_state.blog_position_by_id(blog_id) else {
            return Ok(false);
        };

        let blog = &mut self.working_state.blogs[blog_position];

        if let Some(new_name) = values_to_update.name {
            blog.name = new_name;
        }

        if let Some(new_description) = values_to_update.description {
            blog.description = new_description;
        }

        if let Some(new_category_id) = values_to_update.category_id {
            blog.category_id = new_category_id;
        }

        Ok(true)
    }

    async fn delete_blog(&mut self, blog_id: BlogId) -> QueryResult<bool> {
        let Some(blog_position) = self.working_state.blog_position_by_id(blog_id) else {
            return Ok(false);
        };

        self.working_state.blogs.remove(blog_position);

        Ok(true)
    }

    async fn delete_blogs_by_category(&mut self, category_id: CategoryId) -> QueryResult<u64> {
        let blogs_before = self.working_state.blogs.len();

        self.working_state
            .blogs
            .retain(|blog| blog.category_id != Some(category_id));

        Ok((blogs_before - self.working_state.blogs.len()) as u64)
    }
}




#[cfg(test)]
mod test {
    use super::*;

    fn new_blog(name: &str, slug: &str, category_id: Option<CategoryId>) -> NewBlog {
        NewBlog {
            name: name.to_string(),
            slug: slug.to_string(),
            description: format!("About {}", name),
            category_id,
        }
    }

    #[tokio::test]
    async fn uncommitted_changes_are_discarded() {
        let database = InMemoryDatabase::new();

        {
            let mut transaction = database.begin().await.unwrap();
            transaction
                .create_category(NewCategory {
                    name: "Tech".to_string(),
                })
                .await
                .unwrap();
        }

        let mut transaction = database.begin().await.unwrap();
        assert!(transaction.get_all_categories().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn committed_changes_are_visible_to_later_transactions() {
        let database = InMemoryDatabase::new();

        let mut transaction = database.begin().await.unwrap();
        let category = transaction
            .create_category(NewCategory {
                name: "Tech".to_string(),
            })
            .await
            .unwrap();
        transaction
            .create_blog(new_blog("Rust", "rust", Some(category.id)))
            .await
            .unwrap();
        transaction.commit().await.unwrap();


        let mut transaction = database.begin().await.unwrap();
        let blog = transaction
            .get_blog_by_slug("rust")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(blog.name, "Rust");
        assert_eq!(blog.category, Some(category));
    }

    #[tokio::test]
    async fn category_ids_are_sequential_and_never_reused() {
        let database = InMemoryDatabase::new();
        let mut transaction = database.begin().await.unwrap();

        let first = transaction
            .create_category(NewCategory {
                name: "A".to_string(),
            })
            .await
            .unwrap();
        assert!(transaction.delete_category(first.id).await.unwrap());

        let second = transaction
            .create_category(NewCategory {
                name: "B".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(first.id, CategoryId::new(1));
        assert_eq!(second.id, CategoryId::new(2));
    }

    #[tokio::test]
    async fn deleting_a_category_removes_its_blogs() {
        let database = InMemoryDatabase::new();
        let mut transaction = database.begin().await.unwrap();

        let category = transaction
            .create_category(NewCategory {
                name: "Tech".to_string(),
            })
            .await
            .unwrap();

        transaction
            .create_blog(new_blog("Rust", "rust", Some(category.id)))
            .await
            .unwrap();
        transaction
            .create_blog(new_blog("Cooking", "cooking", None))
            .await
            .unwrap();

        assert!(transaction.delete_category(category.id).await.unwrap());

        let remaining = transaction.get_all_blogs().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].slug, "cooking");
    }

    #[tokio::test]
    async fn pages_search_and_ordering_follow_insertion_order() {
        let database = InMemoryDatabase::new();
        let mut transaction = database.begin().await.unwrap();

        for (name, slug) in [("Beta", "beta"), ("alpha", "alpha"), ("Gamma", "gamma")] {
            transaction
                .create_blog(new_blog(name, slug, None))
                .await
                .unwrap();
        }

        let page = transaction.get_blog_page(1, 10).await.unwrap();
        assert_eq!(
            page.iter().map(|blog| blog.slug.as_str()).collect::<Vec<_>>(),
            vec!["alpha", "gamma"]
        );

        let found = transaction.search_blogs("ALPHA").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].slug, "alpha");

        let ordered = transaction
            .get_all_blogs_ordered(BlogOrdering {
                field: BlogOrderingField::Slug,
                direction: OrderingDirection::Descending,
            })
            .await
            .unwrap();
        assert_eq!(
            ordered
                .iter()
                .map(|blog| blog.slug.as_str())
                .collect::<Vec<_>>(),
            vec!["gamma", "beta", "alpha"]
        );

        assert_eq!(transaction.count_blogs().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn refuses_duplicate_slugs() {
        let database = InMemoryDatabase::new();
        let mut transaction = database.begin().await.unwrap();

        transaction
            .create_blog(new_blog("Rust", "rust", None))
            .await
            .unwrap();

        assert!(transaction
            .create_blog(new_blog("Rust again", "rust", None))
            .await
            .is_err());
    }
}
