#![allow(dead_code)]
use attache_core::{Entity, QueryRequest};

/// Helper to create a QueryRequest from a JSON string slice.
/// Panics if the JSON is invalid (intended for tests).
pub fn request_from_json(json: &str) -> QueryRequest {
    QueryRequest::from_json(json).expect("Failed to create test request from JSON")
}

/// Returns the parameters a media-library grid sends for its first page.
pub fn media_grid_request() -> QueryRequest {
    request_from_json(
        r#"{
        "post_type": "attachment",
        "post_status": "inherit,private",
        "posts_per_page": 80,
        "paged": 1,
        "orderby": "date",
        "order": "DESC",
        "post_mime_type": ["image", "video"],
        "date_query": {"year": 2024, "monthnum": 3}
    }"#,
    )
}

/// Returns a small set of mixed entities.
pub fn library() -> Vec<Entity> {
    vec![
        Entity::new(5, "attachment").with_field("post_mime_type", "image/png"),
        Entity::new(7, "post"),
        Entity::new(9, "attachment").with_field("post_mime_type", "image/jpeg"),
        Entity::new(12, "attachment").with_field("post_mime_type", "video/mp4"),
    ]
}
