use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::ids::CategoryId;


#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "name": "Travel"
    })
)]
pub struct Category {
    #[schema(value_type = i32)]
    pub id: CategoryId,

    pub name: String,
}



#[derive(Deserialize, Clone, PartialEq, Eq, Debug, ToSchema)]
#[cfg_attr(feature = "serde_impls_for_client_on_models", derive(Serialize))]
#[schema(
    example = json!({
        "name": "Travel"
    })
)]
pub struct CategoryCreationRequest {
    pub name: String,
}



#[derive(Deserialize, Clone, PartialEq, Eq, Debug, ToSchema)]
#[cfg_attr(feature = "serde_impls_for_client_on_models", derive(Serialize))]
#[schema(
    example = json!({
        "name": "Travel & Food"
    })
)]
pub struct CategoryUpdateRequest {
    pub name: String,
}



#[derive(Serialize, Clone, PartialEq, Eq, Debug, ToSchema)]
#[cfg_attr(feature = "serde_impls_for_client_on_models", derive(Deserialize))]
#[schema(
    example = json!({
        "success": true
    })
)]
pub struct CategoryDeletionResponse {
    pub success: bool,
}
