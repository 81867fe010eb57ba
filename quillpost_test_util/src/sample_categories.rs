use quillpost_core::api_models::{Category, CategoryCreationRequest};
use reqwest::{Method, StatusCode};

use crate::TestServer;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SampleCategory {
    Technology,
    Travel,
    Cooking,
}

impl SampleCategory {
    pub fn name(&self) -> &'static str {
        match self {
            SampleCategory::Technology => "Technology",
            SampleCategory::Travel => "Travel",
            SampleCategory::Cooking => "Cooking",
        }
    }
}


pub async fn create_sample_category(server: &TestServer, category: SampleCategory) -> Category {
    let creation_response = server
        .request(Method::POST, "/api/categories")
        .with_json_body(CategoryCreationRequest {
            name: category.name().to_string(),
        })
        .send()
        .await;

    creation_response.assert_status_equals(StatusCode::OK);

    creation_response.json_body::<Category>()
}
