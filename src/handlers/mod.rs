// handlers/mod.rs - HTTP handlers grouped by resource
//
// Mutating handlers take `Authorized` as their first argument so the password
// check runs before path or body extraction.

pub mod auth;
pub mod bookmarks;
pub mod categories;
pub mod site;

use std::convert::Infallible;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{FromRef, FromRequestParts, Path},
    http::{request::Parts, Method, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::auth::SharedSecret;
use crate::error::ApiError;
use crate::middleware::Authorized;

/// Path prefixes whose next segment is a row ID, with the resource name used in errors
const ID_PREFIXES: [(&str, &str); 2] = [
    ("/api/categories/", "category"),
    ("/api/bookmarks/", "bookmark"),
];

/// Body of the reorder endpoints
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReorderRequest {
    pub ids: Option<Vec<i64>>,
}

impl ReorderRequest {
    pub fn ids(&self) -> Vec<i64> {
        self.ids.clone().unwrap_or_default()
    }
}

fn invalid_id(resource: &str) -> ApiError {
    ApiError::bad_request(format!("Invalid {} ID", resource))
}

/// Parse the `{id}` path segment as a base-10 integer
pub(crate) fn parse_id(raw: &str, resource: &str) -> Result<i64, ApiError> {
    raw.parse().map_err(|_| invalid_id(resource))
}

/// The `:id` path segment as routed. A segment that fails to percent-decode is
/// kept as `None` and fails [`RawId::parse`] like any other bad ID.
#[derive(Debug, Clone, Default)]
pub struct RawId(Option<String>);

impl RawId {
    pub fn parse(&self, resource: &str) -> Result<i64, ApiError> {
        match &self.0 {
            Some(raw) => parse_id(raw, resource),
            None => Err(invalid_id(resource)),
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RawId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let segment = Path::<String>::from_request_parts(parts, state)
            .await
            .ok()
            .map(|Path(raw)| raw);
        Ok(RawId(segment))
    }
}

/// Resource name for a path that continues past an ID-bearing prefix
pub(crate) fn id_resource(path: &str) -> Option<&'static str> {
    ID_PREFIXES
        .iter()
        .find(|(prefix, _)| path.strip_prefix(prefix).is_some_and(|rest| !rest.is_empty()))
        .map(|(_, resource)| *resource)
}

/// Answer a path like `/api/categories/1/2` that no route matched. The whole
/// remainder is the ID, which never parses, so writers get 400 once they pass
/// the password check and every other method gets 405.
pub(crate) async fn unroutable_id<S>(parts: &mut Parts, state: &S, resource: &str) -> Response
where
    Arc<SharedSecret>: FromRef<S>,
    S: Send + Sync,
{
    if parts.method != Method::PUT && parts.method != Method::DELETE {
        return method_not_allowed().await.into_response();
    }
    match Authorized::from_request_parts(parts, state).await {
        Ok(_) => invalid_id(resource).into_response(),
        Err(rejection) => rejection.into_response(),
    }
}

/// Resource prefix with a trailing slash but no ID
pub async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

/// Known path, unsupported method
pub async fn method_not_allowed() -> (StatusCode, &'static str) {
    (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}
