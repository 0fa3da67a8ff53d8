//! Product routes.

use axum::{
    Json, Router,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::Deserialize;

use guava_core::{ApiResponse, ProductId};

use crate::error::AppError;
use crate::models::ProductForm;
use crate::routes::{forms::FormData, parse_id};
use crate::state::AppState;
use crate::store::{IdFilter, ProductFilter};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products", get(list).post(create))
        .route("/products/{id}", get(fetch).put(update).delete(remove))
}

#[derive(Debug, Default, Deserialize)]
struct ListParams {
    category: Option<String>,
    subcategory: Option<String>,
}

async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    let filter = ProductFilter {
        category: IdFilter::parse(params.category.as_deref()),
        subcategory: IdFilter::parse(params.subcategory.as_deref()),
    };
    let products = state.catalog().list_products(filter).await?;
    Ok(Json(ApiResponse::ok(products)))
}

async fn fetch(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id: ProductId = parse_id(&id, "Product")?;
    let view = state.catalog().get_product(id).await?;
    Ok(Json(ApiResponse::ok(view)))
}

async fn create(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let form = read_form(multipart, &state).await?;
    let view = state.catalog().create_product(form).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(view))))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let id: ProductId = parse_id(&id, "Product")?;
    let form = read_form(multipart, &state).await?;
    let view = state.catalog().update_product(id, form).await?;
    Ok(Json(ApiResponse::ok_with_message(view, "Product updated")))
}

async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id: ProductId = parse_id(&id, "Product")?;
    let product = state.catalog().delete_product(id).await?;
    Ok(Json(ApiResponse::ok(product)))
}

async fn read_form(multipart: Multipart, state: &AppState) -> Result<ProductForm, AppError> {
    let mut data = FormData::read(multipart, state.images()).await?;
    Ok(ProductForm {
        name: data.take_text("name"),
        current_price: data.take_text("currentPrice"),
        discount_price: data.take_text("discountPrice"),
        category_id: data.take_text("categoryId"),
        subcategory_id: data.take_text("subcategoryId"),
        description: data.take_text("description"),
        promo_code: data.take_text("promoCode"),
        status: data.take_text("status"),
        image: data.take_file("image"),
    })
}
