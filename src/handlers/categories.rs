// handlers/categories.rs - /api/categories handlers

use axum::extract::State;

use crate::database::models::{Category, CategoryInput};
use crate::database::Database;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, Authorized, JsonBody, Message};

use super::{RawId, ReorderRequest};

const RESOURCE: &str = "category";

fn require_name(input: &CategoryInput) -> Result<(), ApiError> {
    if input.name.is_empty() {
        return Err(ApiError::bad_request("Name is required"));
    }
    Ok(())
}

/// GET /api/categories - All categories in display order
pub async fn list(State(db): State<Database>) -> ApiResult<Vec<Category>> {
    let categories = db
        .list_categories()
        .await
        .map_err(|e| ApiError::storage("Failed to get categories", e))?;
    Ok(ApiResponse::success(categories))
}

/// POST /api/categories - Append a new category, 201 with the stored row
pub async fn create(
    _: Authorized,
    State(db): State<Database>,
    JsonBody(input): JsonBody<CategoryInput>,
) -> ApiResult<Category> {
    require_name(&input)?;
    let category = db
        .create_category(&input.name)
        .await
        .map_err(|e| ApiError::storage("Failed to create category", e))?;
    Ok(ApiResponse::created(category))
}

/// PUT /api/categories/:id - Rename a category
pub async fn update(
    _: Authorized,
    State(db): State<Database>,
    raw_id: RawId,
    JsonBody(input): JsonBody<CategoryInput>,
) -> ApiResult<Message> {
    let id = raw_id.parse(RESOURCE)?;
    require_name(&input)?;
    db.update_category(id, &input.name)
        .await
        .map_err(|e| ApiError::storage("Failed to update category", e))?;
    Ok(ApiResponse::message("Category updated"))
}

/// DELETE /api/categories/:id - Delete a category and all of its bookmarks
pub async fn delete(
    _: Authorized,
    State(db): State<Database>,
    raw_id: RawId,
) -> ApiResult<Message> {
    let id = raw_id.parse(RESOURCE)?;
    db.delete_category(id)
        .await
        .map_err(|e| ApiError::storage("Failed to delete category", e))?;
    Ok(ApiResponse::message("Category deleted"))
}

/// POST /api/categories/reorder - `{"ids": [...]}` becomes orders 1..N
pub async fn reorder(
    _: Authorized,
    State(db): State<Database>,
    JsonBody(request): JsonBody<ReorderRequest>,
) -> ApiResult<Message> {
    db.reorder_categories(&request.ids())
        .await
        .map_err(|e| ApiError::storage("Failed to reorder categories", e))?;
    Ok(ApiResponse::message("Categories reordered"))
}
