mod model;
mod mutation;
mod query;

pub use model::Model as CategoryModel;
pub(crate) use model::InternalModel as InternalCategoryModel;
pub use mutation::*;
pub use query::*;
