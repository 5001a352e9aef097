// handlers/site.rs - index page, bundled assets and health check

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json},
};
use serde_json::json;
use std::sync::Arc;

use crate::database::Database;

const INDEX_TEMPLATE: &str = include_str!("../../templates/index.html");
const STYLESHEET: &str = include_str!("../../static/css/style.css");
const SCRIPT: &str = include_str!("../../static/js/app.js");

/// The index page with the site title filled in. Rendered once at startup.
#[derive(Debug, Clone)]
pub struct IndexPage {
    html: String,
}

impl IndexPage {
    pub fn render(title: &str) -> Self {
        Self::render_template(INDEX_TEMPLATE, title)
    }

    fn render_template(template: &str, title: &str) -> Self {
        // `<` is escaped so the title can never close the surrounding <script>
        let title_json = serde_json::to_string(title)
            .unwrap_or_else(|_| "\"\"".to_string())
            .replace('<', "\\u003c");
        let html = template
            .replace("{{title_json}}", &title_json)
            .replace("{{title}}", &escape_html(title));
        Self { html }
    }

    pub fn html(&self) -> &str {
        &self.html
    }
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// GET / - The single-page UI
pub async fn index(State(page): State<Arc<IndexPage>>) -> Html<String> {
    Html(page.html().to_string())
}

/// GET /css/style.css - Compiled into the binary so the UI needs no files on disk
pub async fn stylesheet() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], STYLESHEET)
}

/// GET /js/app.js
pub async fn script() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/javascript; charset=utf-8")], SCRIPT)
}

/// GET /health - Database liveness check
pub async fn health(State(db): State<Database>) -> impl IntoResponse {
    match db.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "status": "ok", "database": "ok" })),
        ),
        Err(e) => {
            tracing::error!(error = %e, "health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "degraded", "database": "unavailable" })),
            )
        }
    }
}
