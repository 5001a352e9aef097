use axum::{extract::Query, http::Uri};

/// First value of `key` in the query string. Later repeats of the same key are
/// ignored and a malformed query string reads as absent.
pub fn first_query_value(uri: &Uri, key: &str) -> Option<String> {
    let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(uri).ok()?;
    pairs
        .into_iter()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value)
}
