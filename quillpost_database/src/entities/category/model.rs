use quillpost_core::ids::CategoryId;

use crate::IntoExternalModel;


#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Model {
    pub id: CategoryId,

    pub name: String,
}


#[derive(sqlx::FromRow)]
pub struct InternalModel {
    pub(crate) id: i32,

    pub(crate) name: String,
}

impl IntoExternalModel for InternalModel {
    type ExternalModel = Model;

    fn into_external_model(self) -> Self::ExternalModel {
        Self::ExternalModel {
            id: CategoryId::new(self.id),
            name: self.name,
        }
    }
}
