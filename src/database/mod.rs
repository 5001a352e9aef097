pub mod bookmarks;
pub mod categories;
pub mod manager;
pub mod models;
pub mod repository;

pub use bookmarks::ALL_CATEGORIES;
pub use manager::{Database, DatabaseError};
pub use repository::OrderedTable;
