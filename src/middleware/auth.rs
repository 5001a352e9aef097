use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::warn;

use crate::auth::{SharedSecret, Verdict};
use crate::error::ApiError;

use super::query::first_query_value;

/// The caller's credential, read from the first `password` query parameter
fn credential(parts: &Parts) -> Option<String> {
    first_query_value(&parts.uri, "password")
}

fn verdict<S>(parts: &Parts, state: &S) -> Verdict
where
    Arc<SharedSecret>: FromRef<S>,
{
    Arc::<SharedSecret>::from_ref(state).verify(credential(parts).as_deref())
}

/// Proof that the request carried the configured password.
///
/// Put it first in a handler's argument list: when the check fails the request
/// is answered with 401 before any other extractor or the handler body runs.
#[derive(Debug, Clone, Copy)]
pub struct Authorized;

#[async_trait]
impl<S> FromRequestParts<S> for Authorized
where
    Arc<SharedSecret>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match verdict(parts, state) {
            Verdict::Granted => Ok(Authorized),
            Verdict::Denied => {
                warn!(method = %parts.method, path = %parts.uri.path(), "rejected write without valid password");
                Err(ApiError::unauthorized())
            }
        }
    }
}

/// Whether the caller authenticated. Never rejects; read-only routes use it to decide
/// how much to reveal.
#[derive(Debug, Clone, Copy)]
pub struct Caller {
    pub authenticated: bool,
}

#[async_trait]
impl<S> FromRequestParts<S> for Caller
where
    Arc<SharedSecret>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Ok(Caller {
            authenticated: verdict(parts, state).is_granted(),
        })
    }
}
