pub mod bookmark;
pub mod category;

pub use bookmark::{Bookmark, BookmarkInput, BookmarkWithCategory};
pub use category::{Category, CategoryInput};

use serde::{Deserialize, Deserializer};

/// Treat an explicit JSON `null` like an absent string field
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
