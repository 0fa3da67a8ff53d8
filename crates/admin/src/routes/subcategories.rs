//! Subcategory routes.

use axum::{
    Json, Router,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};
use serde::Deserialize;

use guava_core::{ApiResponse, SubcategoryId};

use crate::error::AppError;
use crate::models::SubcategoryForm;
use crate::routes::{forms::FormData, parse_id};
use crate::state::AppState;
use crate::store::IdFilter;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/subcategories", get(list).post(create))
        .route("/subcategories/{id}", put(update).delete(remove))
}

#[derive(Debug, Default, Deserialize)]
struct ListParams {
    category: Option<String>,
}

async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    let filter = IdFilter::parse(params.category.as_deref());
    let subcategories = state.catalog().list_subcategories(filter).await?;
    Ok(Json(ApiResponse::ok(subcategories)))
}

async fn create(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let form = read_form(multipart, &state).await?;
    let view = state.catalog().create_subcategory(form).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(view))))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let id: SubcategoryId = parse_id(&id, "Subcategory")?;
    let form = read_form(multipart, &state).await?;
    let view = state.catalog().update_subcategory(id, form).await?;
    Ok(Json(ApiResponse::ok(view)))
}

async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id: SubcategoryId = parse_id(&id, "Subcategory")?;
    let subcategory = state.catalog().delete_subcategory(id).await?;
    Ok(Json(ApiResponse::ok(subcategory)))
}

async fn read_form(multipart: Multipart, state: &AppState) -> Result<SubcategoryForm, AppError> {
    let mut data = FormData::read(multipart, state.images()).await?;
    Ok(SubcategoryForm {
        name: data.take_text("name"),
        category_id: data.take_text("categoryId"),
        status: data.take_text("status"),
        image: data.take_file("image"),
    })
}
