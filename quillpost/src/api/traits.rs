/// Conversion from a database model into its public API representation.
pub trait IntoApiModel {
    type ApiModel;

    fn into_api_model(self) -> Self::ApiModel;
}
