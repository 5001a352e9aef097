// handlers/auth.rs - GET /api/auth/check

use axum::Json;
use serde::Serialize;

use crate::middleware::Caller;

#[derive(Debug, Clone, Serialize)]
pub struct AuthStatus {
    pub authenticated: bool,
}

/// GET /api/auth/check?password= - Report whether the supplied password is accepted
pub async fn check(caller: Caller) -> Json<AuthStatus> {
    Json(AuthStatus {
        authenticated: caller.authenticated,
    })
}
