use quillpost_core::{
    api_models::{Blog, BlogCreationRequest},
    ids::CategoryId,
};
use reqwest::{Method, StatusCode};

use crate::{TestResponse, TestServer};


pub async fn create_blog(
    server: &TestServer,
    name: &str,
    description: &str,
    category_id: Option<CategoryId>,
) -> Blog {
    let creation_response = server
        .request(Method::POST, "/api/blogs")
        .with_json_body(BlogCreationRequest {
            name: name.to_string(),
            description: description.to_string(),
            category_id,
        })
        .send()
        .await;

    creation_response.assert_status_equals(StatusCode::OK);

    creation_response.json_body::<Blog>()
}


/// Creates `count` uncategorized blogs named `Blog 1`, `Blog 2`, ...
pub async fn create_numbered_blogs(server: &TestServer, count: usize) -> Vec<Blog> {
    let mut blogs = Vec::with_capacity(count);

    for index in 1..=count {
        blogs.push(
            create_blog(
                server,
                &format!("Blog {}", index),
                &format!("Numbered blog post {}.", index),
                None,
            )
            .await,
        );
    }

    blogs
}


/// Sends `count` creation requests for identically named blogs at the same time
/// and returns every response, in request order.
pub async fn create_blogs_concurrently(
    server: &TestServer,
    name: &str,
    count: usize,
) -> Vec<TestResponse> {
    let pending_requests = (0..count)
        .map(|index| {
            let request = server
                .request(Method::POST, "/api/blogs")
                .with_json_body(BlogCreationRequest {
                    name: name.to_string(),
                    description: format!("Concurrently created blog post {}.", index + 1),
                    category_id: None,
                })
                .send();

            actix_web::rt::spawn(request)
        })
        .collect::<Vec<_>>();

    let mut responses = Vec::with_capacity(count);
    for pending_request in pending_requests {
        responses.push(pending_request.await.expect("request task panicked"));
    }

    responses
}


pub async fn get_blog_by_slug(server: &TestServer, slug: &str) -> Blog {
    let response = server
        .request(Method::GET, format!("/api/blogs/{}", slug))
        .send()
        .await;

    response.assert_status_equals(StatusCode::OK);

    response.json_body::<Blog>()
}
