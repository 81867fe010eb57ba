use quillpost_core::api_models::Category;
use quillpost_database::entities;

use crate::api::traits::IntoApiModel;



impl IntoApiModel for entities::CategoryModel {
    type ApiModel = Category;

    fn into_api_model(self) -> Self::ApiModel {
        Category {
            id: self.id,
            name: self.name,
        }
    }
}
