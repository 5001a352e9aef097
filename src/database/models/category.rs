use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::null_as_empty;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub order: i64,
}

/// Body of category create/update requests
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CategoryInput {
    #[serde(deserialize_with = "null_as_empty")]
    pub name: String,
}
