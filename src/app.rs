use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{FromRef, Request, State},
    response::{IntoResponse, Response},
    routing::{any, get, post, put},
    Router,
};
use tokio::net::TcpListener;
use tower::{ServiceBuilder, ServiceExt};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::auth::SharedSecret;
use crate::config::AppConfig;
use crate::database::Database;
use crate::handlers::{
    auth, bookmarks, categories, id_resource, method_not_allowed, not_found, site, unroutable_id,
};
use site::IndexPage;

/// Everything a request may touch. Immutable after startup apart from the database itself.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
    pub secret: Arc<SharedSecret>,
    pub index: Arc<IndexPage>,
    pub static_dir: PathBuf,
}

impl AppState {
    pub fn new(db: Database, config: &AppConfig) -> Self {
        Self {
            db,
            secret: Arc::new(SharedSecret::new(config.auth.password.clone())),
            index: Arc::new(IndexPage::render(&config.site.title)),
            static_dir: config.site.static_dir.clone(),
        }
    }
}

impl FromRef<AppState> for Database {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}

impl FromRef<AppState> for Arc<SharedSecret> {
    fn from_ref(state: &AppState) -> Self {
        state.secret.clone()
    }
}

impl FromRef<AppState> for Arc<IndexPage> {
    fn from_ref(state: &AppState) -> Self {
        state.index.clone()
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(site::index).fallback(method_not_allowed))
        .route("/health", get(site::health).fallback(method_not_allowed))
        .route("/css/style.css", get(site::stylesheet))
        .route("/js/app.js", get(site::script))
        .merge(category_routes())
        .merge(bookmark_routes())
        .merge(auth_routes())
        .fallback(unrouted)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

/// Requests no route claimed. Paths that run past an ID segment are answered the
/// way that resource answers a bad ID; anything else is a file under
/// `static_dir` or a 404.
async fn unrouted(State(state): State<AppState>, request: Request) -> Response {
    let (mut parts, body) = request.into_parts();
    if let Some(resource) = id_resource(parts.uri.path()) {
        return unroutable_id(&mut parts, &state, resource).await;
    }

    let request = Request::from_parts(parts, body);
    match ServeDir::new(&state.static_dir).oneshot(request).await {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}

// Within each resource the literal `/reorder` route is registered ahead of the
// `/:id` route. The router always prefers a literal segment over a parameter,
// so `reorder` is never handed to ID parsing.

fn category_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/categories/reorder",
            post(categories::reorder).fallback(method_not_allowed),
        )
        .route(
            "/api/categories",
            get(categories::list)
                .post(categories::create)
                .fallback(method_not_allowed),
        )
        .route("/api/categories/", any(not_found))
        .route(
            "/api/categories/:id",
            put(categories::update)
                .delete(categories::delete)
                .fallback(method_not_allowed),
        )
}

fn bookmark_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/bookmarks/reorder",
            post(bookmarks::reorder).fallback(method_not_allowed),
        )
        .route(
            "/api/bookmarks",
            get(bookmarks::list)
                .post(bookmarks::create)
                .fallback(method_not_allowed),
        )
        .route("/api/bookmarks/", any(not_found))
        .route(
            "/api/bookmarks/:id",
            put(bookmarks::update)
                .delete(bookmarks::delete)
                .fallback(method_not_allowed),
        )
}

fn auth_routes() -> Router<AppState> {
    Router::new().route(
        "/api/auth/check",
        get(auth::check).fallback(method_not_allowed),
    )
}

/// Serve the API on an already-bound listener until `shutdown` resolves
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> std::io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown)
        .await
}
