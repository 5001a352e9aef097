use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::null_as_empty;

/// A stored bookmark. Nullable text columns surface as empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Bookmark {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub description: String,
    pub account: String,
    pub password: String,
    pub category_id: i64,
    pub icon: String,
    pub order: i64,
}

/// Listing row: a bookmark plus its category's name, `None` when the category row is gone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct BookmarkWithCategory {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub bookmark: Bookmark,
    pub category_name: Option<String>,
}

impl BookmarkWithCategory {
    /// Blank the credential fields
    pub fn redact(&mut self) {
        self.bookmark.account.clear();
        self.bookmark.password.clear();
    }
}

/// Body of bookmark create/update requests. `id` and `order` are never taken from here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BookmarkInput {
    #[serde(deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub url: String,
    pub description: Option<String>,
    pub account: Option<String>,
    pub password: Option<String>,
    pub category_id: i64,
    pub icon: Option<String>,
}

impl BookmarkInput {
    pub fn has_required_fields(&self) -> bool {
        !self.title.is_empty() && !self.url.is_empty()
    }
}
