use quillpost_core::api_models::Blog;
use quillpost_database::entities;

use crate::api::traits::IntoApiModel;



impl IntoApiModel for entities::BlogModel {
    type ApiModel = Blog;

    fn into_api_model(self) -> Self::ApiModel {
        Blog {
            id: self.id,
            name: self.name,
            slug: self.slug,
            category: self.category.map(IntoApiModel::into_api_model),
            description: self.description,
        }
    }
}
