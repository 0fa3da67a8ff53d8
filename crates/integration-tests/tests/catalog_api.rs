//! End-to-end tests for the catalog routes: categories, subcategories,
//! products, image uploads, and reference expansion.

#![allow(clippy::unwrap_used)]

use axum::Router;
use axum::http::StatusCode;
use serde_json::Value;
use uuid::Uuid;

use guava_integration_tests::{MultipartBody, get, send, test_app};

async fn create_category(app: &Router, name: &str) -> Value {
    let request = MultipartBody::new()
        .text("name", name)
        .into_request("POST", "/api/categories");
    let (status, body) = send(app, request).await;
    assert_eq!(status, StatusCode::CREATED);
    body["data"].clone()
}

async fn create_product(app: &Router, name: &str, category_id: Option<&str>) -> Value {
    let mut form = MultipartBody::new()
        .text("name", name)
        .text("currentPrice", "99.5");
    if let Some(id) = category_id {
        form = form.text("categoryId", id);
    }
    let (status, body) = send(app, form.into_request("POST", "/api/products")).await;
    assert_eq!(status, StatusCode::CREATED);
    body["data"].clone()
}

#[tokio::test]
async fn test_create_category_applies_defaults() {
    let (app, _state) = test_app().await;

    let category = create_category(&app, "Shoes").await;
    assert_eq!(category["name"], "Shoes");
    assert_eq!(category["status"], "Active");
    assert_eq!(category["image"], Value::Null);
}

#[tokio::test]
async fn test_create_category_without_name_is_rejected() {
    let (app, _state) = test_app().await;

    let request = MultipartBody::new()
        .text("status", "Active")
        .into_request("POST", "/api/categories");
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().contains("name"));

    let (_, list) = send(&app, get("/api/categories")).await;
    assert_eq!(list["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_categories_list_in_insertion_order() {
    let (app, _state) = test_app().await;

    create_category(&app, "Shoes").await;
    create_category(&app, "Hats").await;

    let (status, body) = send(&app, get("/api/categories")).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Shoes", "Hats"]);
}

#[tokio::test]
async fn test_update_category_with_malformed_id_is_not_found() {
    let (app, _state) = test_app().await;

    let request = MultipartBody::new()
        .text("name", "Renamed")
        .into_request("PUT", "/api/categories/not-a-uuid");
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Category not found");
}

#[tokio::test]
async fn test_delete_category_is_not_repeatable() {
    let (app, _state) = test_app().await;

    let category = create_category(&app, "Shoes").await;
    let uri = format!("/api/categories/{}", category["id"].as_str().unwrap());

    let delete = |uri: String| {
        axum::http::Request::builder()
            .method("DELETE")
            .uri(uri)
            .body(axum::body::Body::empty())
            .unwrap()
    };

    let (status, body) = send(&app, delete(uri.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Shoes");

    let (status, body) = send(&app, delete(uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Category not found");
}

#[tokio::test]
async fn test_subcategory_list_expands_full_category() {
    let (app, _state) = test_app().await;

    let category = create_category(&app, "Shoes").await;
    let category_id = category["id"].as_str().unwrap();

    let request = MultipartBody::new()
        .text("name", "Sneakers")
        .text("categoryId", category_id)
        .into_request("POST", "/api/subcategories");
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["categoryId"]["name"], "Shoes");

    let (status, body) = send(
        &app,
        get(&format!("/api/subcategories?category={category_id}")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let matches = body["data"].as_array().unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0]["name"], "Sneakers");
    assert_eq!(matches[0]["categoryId"]["status"], "Active");
}

#[tokio::test]
async fn test_subcategory_filter_with_unknown_or_invalid_id_is_empty() {
    let (app, _state) = test_app().await;

    let category = create_category(&app, "Shoes").await;
    let request = MultipartBody::new()
        .text("name", "Sneakers")
        .text("categoryId", category["id"].as_str().unwrap())
        .into_request("POST", "/api/subcategories");
    send(&app, request).await;

    let other = Uuid::new_v4();
    let (status, body) = send(&app, get(&format!("/api/subcategories?category={other}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 0);

    // A malformed filter value matches nothing rather than erroring
    let (status, body) = send(&app, get("/api/subcategories?category=garbage")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_product_partial_update_preserves_other_fields() {
    let (app, _state) = test_app().await;

    let product = create_product(&app, "Runner", None).await;
    let uri = format!("/api/products/{}", product["id"].as_str().unwrap());

    let request = MultipartBody::new()
        .text("status", "Inactive")
        .into_request("PUT", &uri);
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Product updated");
    assert_eq!(body["data"]["status"], "Inactive");
    assert_eq!(body["data"]["name"], "Runner");
    assert!((body["data"]["currentPrice"].as_f64().unwrap() - 99.5).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_update_unknown_product_is_not_found_and_silent() {
    let (app, state) = test_app().await;
    let mut rx = state.broadcaster().subscribe();

    let request = MultipartBody::new()
        .text("name", "Ghost")
        .into_request("PUT", &format!("/api/products/{}", Uuid::new_v4()));
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Product not found");

    // The failed mutation published nothing
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn test_deleting_category_leaves_product_with_null_reference() {
    let (app, _state) = test_app().await;

    let category = create_category(&app, "Shoes").await;
    let category_id = category["id"].as_str().unwrap();
    let product = create_product(&app, "Runner", Some(category_id)).await;
    assert_eq!(product["categoryId"]["name"], "Shoes");

    let delete = axum::http::Request::builder()
        .method("DELETE")
        .uri(format!("/api/categories/{category_id}"))
        .body(axum::body::Body::empty())
        .unwrap();
    let (status, _) = send(&app, delete).await;
    assert_eq!(status, StatusCode::OK);

    // The product survives; its dangling reference reads as null
    let uri = format!("/api/products/{}", product["id"].as_str().unwrap());
    let (status, body) = send(&app, get(&uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Runner");
    assert_eq!(body["data"]["categoryId"], Value::Null);
}

#[tokio::test]
async fn test_uploaded_image_is_stored_and_served() {
    let (app, _state) = test_app().await;

    let request = MultipartBody::new()
        .text("name", "Shoes")
        .file("image", "shoe.png", b"fake png bytes")
        .into_request("POST", "/api/categories");
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::CREATED);

    let filename = body["data"]["image"].as_str().unwrap();
    assert!(filename.ends_with(".png"));

    let (status, served) = send(&app, get(&format!("/uploads/{filename}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(served, Value::String("fake png bytes".to_string()));
}
