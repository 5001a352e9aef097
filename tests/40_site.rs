mod common;

use anyhow::Result;
use reqwest::StatusCode;

#[tokio::test]
async fn index_page_is_templated() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = server.client.get(server.url("/")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let content_type = res
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/html"), "content-type: {content_type}");

    let body = res.text().await?;
    assert!(body.contains("<title>Test Shelf</title>"));
    assert!(body.contains(r#"const SITE_TITLE = "Test Shelf";"#));

    Ok(())
}

#[tokio::test]
async fn static_assets_are_served() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = server.client.get(server.url("/js/app.js")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.text().await?.contains("/api/bookmarks"));

    let res = server.client.get(server.url("/css/style.css")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = server.client.get(server.url("/js/missing.js")).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = server.client.get(server.url("/health")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["status"], "ok");

    Ok(())
}
