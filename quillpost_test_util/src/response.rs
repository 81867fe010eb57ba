use std::fmt::Debug;

use bytes::Bytes;
use quillpost_core::api_models::ErrorResponse;
use reqwest::{
    header::{HeaderMap, HeaderName},
    Response,
    StatusCode,
};
use serde::Deserialize;

pub struct TestResponse {
    status: StatusCode,
    headers: HeaderMap,
    body_bytes: Bytes,
}

impl TestResponse {
    pub(crate) async fn from_reqwest_response(response: Response) -> Self {
        Self {
            status: response.status(),
            headers: response.headers().to_owned(),
            body_bytes: response
                .bytes()
                .await
                .expect("failed to extract body from response"),
        }
    }

    pub fn assert_status_equals(&self, status_code: StatusCode) {
        assert_eq!(
            self.status,
            status_code,
            "unexpected status code (body: {})",
            String::from_utf8_lossy(&self.body_bytes)
        );
    }

    pub fn assert_header_exists<N>(&self, header_name: N)
    where
        N: Into<HeaderName>,
    {
        let header_name: HeaderName = header_name.into();

        self.headers.get(&header_name).unwrap_or_else(|| {
            panic!(
                "header {} does not exist on response",
                header_name.as_str()
            )
        });
    }

    pub fn json_body<'de, D>(&'de self) -> D
    where
        D: Deserialize<'de>,
    {
        serde_json::from_slice::<D>(&self.body_bytes).expect("failed to deserialize body as JSON")
    }

    pub fn assert_json_body_matches<'de, D>(&'de self, expected_content: D)
    where
        D: Deserialize<'de> + PartialEq + Eq + Debug,
    {
        let data = self.json_body::<D>();

        assert_eq!(data, expected_content);
    }

    /// Asserts the body is an error response (`{ "message": ... }`) with the given message.
    pub fn assert_error_message_equals(&self, expected_message: &str) {
        let error_response = self.json_body::<ErrorResponse>();

        assert_eq!(error_response.message, expected_message);
    }
}
