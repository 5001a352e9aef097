pub mod auth;
pub mod body;
pub mod query;
pub mod response;

pub use auth::{Authorized, Caller};
pub use body::JsonBody;
pub use query::first_query_value;
pub use response::{ApiResponse, ApiResult, Message};
