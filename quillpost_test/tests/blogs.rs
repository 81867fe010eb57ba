use quillpost_test_util::prelude::*;



#[actix_web::test]
async fn blog_creation_round_trips_and_derives_slugs() {
    let server = TestServer::start().await;

    let travel = create_sample_category(&server, SampleCategory::Travel).await;


    let first_blog = create_blog(
        &server,
        "Hello World",
        "The very first post.",
        Some(travel.id),
    )
    .await;

    assert_eq!(first_blog.slug, "hello-world");
    assert_eq!(first_blog.name, "Hello World");
    assert_eq!(first_blog.description, "The very first post.");
    assert_eq!(first_blog.category, Some(travel.clone()));


    // Reading it back gives the exact same representation.
    assert_eq!(
        get_blog_by_slug(&server, "hello-world").await,
        first_blog
    );


    // A second blog with the same name gets a numeric suffix.
    let second_blog = create_blog(&server, "Hello World", "Again.", None).await;

    assert_eq!(second_blog.slug, "hello-world-2");
    assert_eq!(second_blog.category, None);
    assert_ne!(second_blog.id, first_blog.id);

    let third_blog = create_blog(&server, "hello, world!", "And again.", None).await;
    assert_eq!(third_blog.slug, "hello-world-3");


    // Names that collide with fixed routes never become slugs.
    let search_blog = create_blog(&server, "Search", "About searching.", None).await;
    assert_eq!(search_blog.slug, "search-2");
    assert_eq!(
        get_blog_by_slug(&server, "search-2").await,
        search_blog
    );

    server.stop().await;
}



#[actix_web::test]
async fn blog_creation_with_unknown_category_fails() {
    let server = TestServer::start().await;

    let creation_response = server
        .request(Method::POST, "/api/blogs")
        .with_json_body(BlogCreationRequest {
            name: "Orphan".to_string(),
            description: "Points at nothing.".to_string(),
            category_id: Some(CategoryId::new(4242)),
        })
        .send()
        .await;

    creation_response.assert_status_equals(StatusCode::NOT_FOUND);
    creation_response.assert_error_message_equals("Category not found");


    // Nothing was created, so the slug is still free.
    let blogs = server
        .request(Method::GET, "/api/blogs")
        .send()
        .await
        .json_body::<Vec<Blog>>();

    assert!(blogs.is_empty());

    let orphan = create_blog(&server, "Orphan", "Now without a category.", None).await;
    assert_eq!(orphan.slug, "orphan");

    server.stop().await;
}



#[actix_web::test]
async fn invalid_blog_payloads_are_rejected() {
    let server = TestServer::start().await;

    server
        .request(Method::POST, "/api/blogs")
        .with_json_body(serde_json::json!({ "name": "No description" }))
        .send()
        .await
        .assert_status_equals(StatusCode::BAD_REQUEST);

    server
        .request(Method::POST, "/api/blogs")
        .with_json_body(serde_json::json!({
            "name": "Bad category",
            "description": "The category ID is a string.",
            "category_id": "one"
        }))
        .send()
        .await
        .assert_status_equals(StatusCode::BAD_REQUEST);

    let blank_name_response = server
        .request(Method::POST, "/api/blogs")
        .with_json_body(BlogCreationRequest {
            name: "".to_string(),
            description: "Nameless.".to_string(),
            category_id: None,
        })
        .send()
        .await;

    blank_name_response.assert_status_equals(StatusCode::BAD_REQUEST);
    blank_name_response.assert_error_message_equals("Invalid field \"name\": name must not be blank");

    server.stop().await;
}



#[actix_web::test]
async fn oversized_json_bodies_are_rejected() {
    let server = TestServer::start_with_json_body_limit(256).await;

    server
        .request(Method::POST, "/api/blogs")
        .with_json_body(BlogCreationRequest {
            name: "Long read".to_string(),
            description: "a".repeat(1024),
            category_id: None,
        })
        .send()
        .await
        .assert_status_equals(StatusCode::PAYLOAD_TOO_LARGE);

    server.stop().await;
}



#[actix_web::test]
async fn blog_update_keeps_slug_and_resolves_category() {
    let server = TestServer::start().await;

    let travel = create_sample_category(&server, SampleCategory::Travel).await;
    let cooking = create_sample_category(&server, SampleCategory::Cooking).await;

    let blog = create_blog(&server, "Day trips", "Short trips.", Some(travel.id)).await;


    {
        let update_response = server
            .request(Method::PUT, "/api/blogs/day-trips")
            .with_json_body(BlogUpdateRequest {
                name: "Weekend recipes".to_string(),
                description: "Short recipes.".to_string(),
                category_id: Some(cooking.id),
            })
            .send()
            .await;

        update_response.assert_status_equals(StatusCode::OK);
        update_response.assert_json_body_matches(Blog {
            id: blog.id,
            name: "Weekend recipes".to_string(),
            slug: "day-trips".to_string(),
            category: Some(cooking.clone()),
            description: "Short recipes.".to_string(),
        });
    }

    {
        // Omitting the category clears it.
        let update_response = server
            .request(Method::PUT, "/api/blogs/day-trips")
            .with_json_body(serde_json::json!({
                "name": "Weekend recipes",
                "description": "Short recipes."
            }))
            .send()
            .await;

        update_response.assert_status_equals(StatusCode::OK);
        assert_eq!(update_response.json_body::<Blog>().category, None);
    }

    {
        // An unknown category leaves the blog untouched.
        let update_response = server
            .request(Method::PUT, "/api/blogs/day-trips")
            .with_json_body(BlogUpdateRequest {
                name: "Changed".to_string(),
                description: "Changed.".to_string(),
                category_id: Some(CategoryId::new(4242)),
            })
            .send()
            .await;

        update_response.assert_status_equals(StatusCode::NOT_FOUND);
        update_response.assert_error_message_equals("Category not found");

        let unchanged_blog = get_blog_by_slug(&server, "day-trips").await;
        assert_eq!(unchanged_blog.name, "Weekend recipes");
        assert_eq!(unchanged_blog.category, None);
    }

    {
        let update_response = server
            .request(Method::PUT, "/api/blogs/no-such-blog")
            .with_json_body(BlogUpdateRequest {
                name: "Ghost".to_string(),
                description: "Boo.".to_string(),
                category_id: None,
            })
            .send()
            .await;

        update_response.assert_status_equals(StatusCode::NOT_FOUND);
        update_response.assert_error_message_equals("Blog not found");
    }

    server.stop().await;
}



#[actix_web::test]
async fn setting_a_blog_category_works() {
    let server = TestServer::start().await;

    let technology = create_sample_category(&server, SampleCategory::Technology).await;
    let travel = create_sample_category(&server, SampleCategory::Travel).await;

    create_blog(&server, "Rust tips", "Borrowing, mostly.", Some(technology.id)).await;


    {
        let response = server
            .request(Method::POST, "/api/blog/rust-tips/set-category")
            .with_json_body(BlogCategoryUpdateRequest {
                category_id: Some(travel.id),
            })
            .send()
            .await;

        response.assert_status_equals(StatusCode::OK);
        assert_eq!(response.json_body::<Blog>().category, Some(travel.clone()));
    }

    {
        // A nonexistent category is rejected, and the stored category stays the same.
        let response = server
            .request(Method::POST, "/api/blog/rust-tips/set-category")
            .with_json_body(BlogCategoryUpdateRequest {
                category_id: Some(CategoryId::new(4242)),
            })
            .send()
            .await;

        response.assert_status_equals(StatusCode::NOT_FOUND);
        response.assert_error_message_equals("Category not found");

        assert_eq!(
            get_blog_by_slug(&server, "rust-tips").await.category,
            Some(travel.clone())
        );
    }

    {
        // Null clears the category.
        let response = server
            .request(Method::POST, "/api/blog/rust-tips/set-category")
            .with_json_body(serde_json::json!({ "category_id": null }))
            .send()
            .await;

        response.assert_status_equals(StatusCode::OK);
        assert_eq!(response.json_body::<Blog>().category, None);
    }

    {
        let response = server
            .request(Method::POST, "/api/blog/no-such-blog/set-category")
            .with_json_body(BlogCategoryUpdateRequest {
                category_id: Some(travel.id),
            })
            .send()
            .await;

        response.assert_status_equals(StatusCode::NOT_FOUND);
        response.assert_error_message_equals("Blog not found");
    }

    server.stop().await;
}



#[actix_web::test]
async fn blog_deletion_returns_the_deleted_blog() {
    let server = TestServer::start().await;

    let blog = create_blog(&server, "Ephemeral", "Here today.", None).await;


    let deletion_response = server
        .request(Method::DELETE, "/api/blogs/ephemeral")
        .send()
        .await;

    deletion_response.assert_status_equals(StatusCode::OK);
    deletion_response.assert_json_body_matches(blog);


    server
        .request(Method::GET, "/api/blogs/ephemeral")
        .send()
        .await
        .assert_status_equals(StatusCode::NOT_FOUND);

    let repeated_deletion_response = server
        .request(Method::DELETE, "/api/blogs/ephemeral")
        .send()
        .await;

    repeated_deletion_response.assert_status_equals(StatusCode::NOT_FOUND);
    repeated_deletion_response.assert_error_message_equals("Blog not found");

    server.stop().await;
}



#[actix_web::test]
async fn search_matches_names_and_descriptions_case_insensitively() {
    let server = TestServer::start().await;

    let rust = create_blog(&server, "Rust", "A systems language.", None).await;
    let python = create_blog(&server, "Python", "Scripting, quickly.", None).await;
    let percent = create_blog(&server, "Discounts", "Everything 100% off.", None).await;
    create_blog(&server, "Cooking", "Pasta and bread.", None).await;


    {
        // Matches only in the description.
        let response = server
            .request(Method::GET, "/api/blogs/search?q=SYSTEMS")
            .send()
            .await;

        response.assert_status_equals(StatusCode::OK);
        response.assert_json_body_matches(vec![rust.clone()]);
    }

    {
        let response = server
            .request(Method::GET, "/api/blogs/search?q=py")
            .send()
            .await;

        response.assert_status_equals(StatusCode::OK);
        response.assert_json_body_matches(vec![python]);
    }

    {
        // Wildcards are matched literally.
        let response = server
            .request(Method::GET, "/api/blogs/search?q=100%25")
            .send()
            .await;

        response.assert_status_equals(StatusCode::OK);
        response.assert_json_body_matches(vec![percent]);

        let response = server
            .request(Method::GET, "/api/blogs/search?q=zzz")
            .send()
            .await;

        response.assert_status_equals(StatusCode::OK);
        assert!(response.json_body::<Vec<Blog>>().is_empty());
    }

    {
        // The query parameter is required.
        server
            .request(Method::GET, "/api/blogs/search")
            .send()
            .await
            .assert_status_equals(StatusCode::BAD_REQUEST);
    }

    server.stop().await;
}



#[actix_web::test]
async fn pagination_splits_blogs_into_pages_of_ten() {
    let server = TestServer::start().await;

    let blogs = create_numbered_blogs(&server, 25).await;


    for (page, expected_blogs) in [(1, &blogs[0..10]), (2, &blogs[10..20]), (3, &blogs[20..25])] {
        let response = server
            .request(
                Method::GET,
                format!("/api/blogs/paginated?page={}", page),
            )
            .send()
            .await;

        response.assert_status_equals(StatusCode::OK);

        let page_response = response.json_body::<BlogPageResponse>();
        assert_eq!(page_response.items, expected_blogs);
        assert_eq!(page_response.count, 25);
        assert_eq!(page_response.page, page);
        assert_eq!(page_response.page_size, BLOG_PAGE_SIZE);
    }


    {
        // The page defaults to the first one.
        let response = server
            .request(Method::GET, "/api/blogs/paginated")
            .send()
            .await;

        response.assert_status_equals(StatusCode::OK);
        assert_eq!(
            response.json_body::<BlogPageResponse>().items,
            &blogs[0..10]
        );
    }

    {
        // Pages past the end are empty.
        let response = server
            .request(Method::GET, "/api/blogs/paginated?page=4")
            .send()
            .await;

        response.assert_status_equals(StatusCode::OK);
        assert!(response.json_body::<BlogPageResponse>().items.is_empty());
    }

    for invalid_page in ["0", "-1", "abc"] {
        server
            .request(
                Method::GET,
                format!("/api/blogs/paginated?page={}", invalid_page),
            )
            .send()
            .await
            .assert_status_equals(StatusCode::BAD_REQUEST);
    }

    server.stop().await;
}



#[actix_web::test]
async fn ordering_only_accepts_known_fields() {
    let server = TestServer::start().await;

    let banana = create_blog(&server, "Banana", "Yellow.", None).await;
    let apple = create_blog(&server, "Apple", "Red.", None).await;
    let cherry = create_blog(&server, "Cherry", "Also red.", None).await;


    {
        // Ordered by name by default.
        let response = server.request(Method::GET, "/api/blogs/order").send().await;

        response.assert_status_equals(StatusCode::OK);
        response.assert_json_body_matches(vec![apple.clone(), banana.clone(), cherry.clone()]);
    }

    {
        let response = server
            .request(Method::GET, "/api/blogs/order?order_by=-slug")
            .send()
            .await;

        response.assert_status_equals(StatusCode::OK);
        response.assert_json_body_matches(vec![cherry.clone(), banana.clone(), apple.clone()]);
    }

    {
        let response = server
            .request(Method::GET, "/api/blogs/order?order_by=description")
            .send()
            .await;

        response.assert_status_equals(StatusCode::OK);
        response.assert_json_body_matches(vec![cherry, apple, banana]);
    }

    for invalid_field in ["created_at", "category_id", "name;DROP TABLE blog", "--name"] {
        let response = server
            .request(Method::GET, "/api/blogs/order")
            .with_query(&[("order_by", invalid_field)])
            .send()
            .await;

        response.assert_status_equals(StatusCode::BAD_REQUEST);
    }

    server.stop().await;
}



#[actix_web::test]
async fn health_ping_and_documentation_are_served() {
    let server = TestServer::start().await;

    let ping_response = server.request(Method::GET, "/api/health/ping").send().await;
    ping_response.assert_status_equals(StatusCode::OK);
    ping_response.assert_header_exists(header::CONTENT_TYPE);
    assert!(ping_response.json_body::<PingResponse>().ok);

    let documentation_response = server
        .request(Method::GET, "/api-documentation/openapi.json")
        .send()
        .await;

    documentation_response.assert_status_equals(StatusCode::OK);
    let documentation = documentation_response.json_body::<serde_json::Value>();
    assert!(documentation["paths"]["/api/blogs/{slug}"].is_object());

    server.stop().await;
}



#[actix_web::test]
async fn concurrent_blog_creation_allocates_distinct_slugs() {
    let server = TestServer::start().await;

    let responses = create_blogs_concurrently(&server, "Hello World", 4).await;

    let mut slugs = responses
        .iter()
        .map(|response| {
            response.assert_status_equals(StatusCode::OK);
            response.json_body::<Blog>().slug
        })
        .collect::<Vec<_>>();
    slugs.sort();

    assert_eq!(
        slugs,
        ["hello-world", "hello-world-2", "hello-world-3", "hello-world-4"]
    );

    server.stop().await;
}
