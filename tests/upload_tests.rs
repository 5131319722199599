// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Image upload and static serving tests.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use tower::ServiceExt;

mod common;

const BOUNDARY: &str = "ajito-test-boundary";

fn multipart_body(field: &str, file_name: &str, content: &str) -> String {
    format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\nContent-Type: image/png\r\n\r\n{content}\r\n--{b}--\r\n",
        b = BOUNDARY,
    )
}

fn upload_request(body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn test_upload_stores_and_serves_file() {
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = common::create_test_app(dir.path());

    let response = app
        .clone()
        .oneshot(upload_request(multipart_body(
            "image",
            "tenhou.png",
            "fake-png-data",
        )))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    let url = body["url"].as_str().expect("url in response").to_string();
    assert!(url.starts_with("/uploads/"));
    assert!(url.ends_with("_tenhou.png"));

    // File landed in the upload dir
    let file_name = url.trim_start_matches("/uploads/");
    let stored = std::fs::read_to_string(dir.path().join(file_name)).unwrap();
    assert_eq!(stored, "fake-png-data");

    // And is served back under the same URL
    let response = app
        .oneshot(Request::builder().uri(&url).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let served = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&served[..], b"fake-png-data");
}

#[tokio::test]
async fn test_upload_without_image_field() {
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = common::create_test_app(dir.path());

    let response = app
        .oneshot(upload_request(multipart_body("document", "a.png", "x")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = common::body_json(response).await;
    assert_eq!(body["details"], "No file uploaded");
}

#[tokio::test]
async fn test_upload_requires_multipart() {
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = common::create_test_app(dir.path());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/upload")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_unknown_upload_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = common::create_test_app(dir.path());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/uploads/0_missing.png")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
