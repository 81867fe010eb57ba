use chrono::{DateTime, Utc};
use quillpost_core::ids::{BlogId, CategoryId};
use uuid::Uuid;

use crate::{entities::CategoryModel, QueryError, QueryResult, TryIntoExternalModel};


#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Model {
    pub id: BlogId,

    pub name: String,

    pub slug: String,

    pub category: Option<CategoryModel>,

    pub description: String,

    /// Only used to keep a stable insertion order; not part of the API model.
    pub created_at: DateTime<Utc>,
}


#[derive(sqlx::FromRow)]
pub struct InternalModel {
    pub(crate) id: Uuid,

    pub(crate) name: String,

    pub(crate) slug: String,

    pub(crate) description: String,

    pub(crate) created_at: DateTime<Utc>,

    pub(crate) category_id: Option<i32>,

    pub(crate) category_name: Option<String>,
}

impl TryIntoExternalModel for InternalModel {
    type ExternalModel = Model;
    type Error = QueryError;

    fn try_into_external_model(self) -> Result<Self::ExternalModel, Self::Error> {
        let category = match (self.category_id, self.category_name) {
            (Some(category_id), Some(category_name)) => Some(CategoryModel {
                id: CategoryId::new(category_id),
                name: category_name,
            }),
            (None, None) => None,
            (Some(category_id), None) => {
                return Err(QueryError::database_inconsistency(format!(
                    "blog {} references category {}, which does not exist",
                    self.id, category_id
                )));
            }
            (None, Some(_)) => {
                return Err(QueryError::database_inconsistency(format!(
                    "blog {} has no category, but the join produced a category name",
                    self.id
                )));
            }
        };

        Ok(Self::ExternalModel {
            id: BlogId::new(self.id),
            name: self.name,
            slug: self.slug,
            category,
            description: self.description,
            created_at: self.created_at,
        })
    }
}


pub(crate) fn into_external_blog_models(
    internal_blogs: Vec<InternalModel>,
) -> QueryResult<Vec<Model>> {
    internal_blogs
        .into_iter()
        .map(InternalModel::try_into_external_model)
        .collect()
}
