// handlers/bookmarks.rs - /api/bookmarks handlers

use axum::{extract::State, http::Uri};

use crate::database::models::{Bookmark, BookmarkInput, BookmarkWithCategory};
use crate::database::{Database, ALL_CATEGORIES};
use crate::error::ApiError;
use crate::middleware::{
    first_query_value, ApiResponse, ApiResult, Authorized, Caller, JsonBody, Message,
};

use super::{RawId, ReorderRequest};

const RESOURCE: &str = "bookmark";

#[derive(Debug, Default)]
pub struct BookmarkListQuery {
    /// Restrict the listing to one category. Absent or empty means all categories.
    pub category_id: Option<String>,
}

impl BookmarkListQuery {
    fn from_uri(uri: &Uri) -> Self {
        Self {
            category_id: first_query_value(uri, "category_id"),
        }
    }

    fn category_filter(&self) -> Result<i64, ApiError> {
        match self.category_id.as_deref() {
            None | Some("") => Ok(ALL_CATEGORIES),
            Some(raw) => raw
                .parse()
                .map_err(|_| ApiError::bad_request("Invalid category ID")),
        }
    }
}

fn require_title_and_url(input: &BookmarkInput) -> Result<(), ApiError> {
    if !input.has_required_fields() {
        return Err(ApiError::bad_request("Title and URL are required"));
    }
    Ok(())
}

/// GET /api/bookmarks[?category_id=] - Bookmarks in display order.
/// `account` and `password` are blanked unless the caller supplied the password.
pub async fn list(
    caller: Caller,
    State(db): State<Database>,
    uri: Uri,
) -> ApiResult<Vec<BookmarkWithCategory>> {
    let category_id = BookmarkListQuery::from_uri(&uri).category_filter()?;
    let bookmarks = db
        .list_bookmarks(category_id, !caller.authenticated)
        .await
        .map_err(|e| ApiError::storage("Failed to get bookmarks", e))?;
    Ok(ApiResponse::success(bookmarks))
}

/// POST /api/bookmarks - Append a bookmark, 201 with the stored row
pub async fn create(
    _: Authorized,
    State(db): State<Database>,
    JsonBody(input): JsonBody<BookmarkInput>,
) -> ApiResult<Bookmark> {
    require_title_and_url(&input)?;
    let bookmark = db
        .create_bookmark(&input)
        .await
        .map_err(|e| ApiError::storage("Failed to create bookmark", e))?;
    Ok(ApiResponse::created(bookmark))
}

/// PUT /api/bookmarks/:id - Replace every field except the display order
pub async fn update(
    _: Authorized,
    State(db): State<Database>,
    raw_id: RawId,
    JsonBody(input): JsonBody<BookmarkInput>,
) -> ApiResult<Message> {
    let id = raw_id.parse(RESOURCE)?;
    require_title_and_url(&input)?;
    db.update_bookmark(id, &input)
        .await
        .map_err(|e| ApiError::storage("Failed to update bookmark", e))?;
    Ok(ApiResponse::message("Bookmark updated"))
}

/// DELETE /api/bookmarks/:id
pub async fn delete(
    _: Authorized,
    State(db): State<Database>,
    raw_id: RawId,
) -> ApiResult<Message> {
    let id = raw_id.parse(RESOURCE)?;
    db.delete_bookmark(id)
        .await
        .map_err(|e| ApiError::storage("Failed to delete bookmark", e))?;
    Ok(ApiResponse::message("Bookmark deleted"))
}

/// POST /api/bookmarks/reorder - `{"ids": [...]}` becomes orders 1..N
pub async fn reorder(
    _: Authorized,
    State(db): State<Database>,
    JsonBody(request): JsonBody<ReorderRequest>,
) -> ApiResult<Message> {
    db.reorder_bookmarks(&request.ids())
        .await
        .map_err(|e| ApiError::storage("Failed to reorder bookmarks", e))?;
    Ok(ApiResponse::message("Bookmarks reordered"))
}
