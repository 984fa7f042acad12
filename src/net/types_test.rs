use super::*;
use serde_json::json;
use time::macros::datetime;

// =============================================================================
// ShortenedLink
// =============================================================================

#[test]
fn link_decodes_service_json() {
    let raw = json!({
        "_id": "1",
        "originalUrl": "https://example.com/a-long-path",
        "shortCode": "abc123",
        "createdBy": "u1",
        "createdAt": "2024-01-01T00:00:00Z",
        "__v": 0
    });
    let link: ShortenedLink = serde_json::from_value(raw).unwrap();
    assert_eq!(link.id, "1");
    assert_eq!(link.original_url, "https://example.com/a-long-path");
    assert_eq!(link.short_code, "abc123");
    assert_eq!(link.owner_id, "u1");
    assert_eq!(link.created_at, datetime!(2024-01-01 00:00:00 UTC));
}

#[test]
fn link_accepts_fractional_seconds_and_offsets() {
    let raw = json!({
        "_id": "2",
        "originalUrl": "https://example.com",
        "shortCode": "x",
        "createdBy": "u1",
        "createdAt": "2024-03-05T10:11:12.345+02:00"
    });
    let link: ShortenedLink = serde_json::from_value(raw).unwrap();
    assert_eq!(link.created_at, datetime!(2024-03-05 08:11:12.345 UTC));
}

#[test]
fn link_missing_short_code_is_rejected() {
    let raw = json!({ "_id": "1", "originalUrl": "https://e.com", "createdBy": "u", "createdAt": "2024-01-01T00:00:00Z" });
    assert!(serde_json::from_value::<ShortenedLink>(raw).is_err());
}

#[test]
fn link_encodes_with_service_field_names() {
    let link = ShortenedLink {
        id: "1".into(),
        original_url: "https://example.com".into(),
        short_code: "abc".into(),
        owner_id: "u1".into(),
        created_at: datetime!(2024-01-01 00:00:00 UTC),
    };
    let value = serde_json::to_value(&link).unwrap();
    assert_eq!(value["_id"], "1");
    assert_eq!(value["shortCode"], "abc");
    assert_eq!(value["createdBy"], "u1");
    assert_eq!(value["createdAt"], "2024-01-01T00:00:00Z");
}

// =============================================================================
// short_url
// =============================================================================

#[test]
fn short_url_joins_base_prefix_and_code() {
    assert_eq!(short_url("http://localhost:3000", "abc123"), "http://localhost:3000/url/abc123");
}

#[test]
fn short_url_tolerates_trailing_slash() {
    assert_eq!(short_url("https://sho.rt/", "z"), "https://sho.rt/url/z");
}

// =============================================================================
// Request bodies
// =============================================================================

#[test]
fn create_request_uses_camel_case() {
    let body = serde_json::to_value(CreateUrlRequest { original_url: "https://e.com" }).unwrap();
    assert_eq!(body, json!({ "originalUrl": "https://e.com" }));
}

#[test]
fn signup_request_shape() {
    let body = serde_json::to_value(SignupRequest { username: "ann", email: "a@e.com", password: "pw" }).unwrap();
    assert_eq!(body, json!({ "username": "ann", "email": "a@e.com", "password": "pw" }));
}

#[test]
fn error_body_tolerates_missing_message() {
    let body: ErrorBody = serde_json::from_str("{}").unwrap();
    assert!(body.message.is_none());
}
