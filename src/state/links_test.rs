use super::*;
use time::macros::datetime;

fn link(id: &str, code: &str) -> ShortenedLink {
    ShortenedLink {
        id: id.into(),
        original_url: format!("https://example.com/{code}"),
        short_code: code.into(),
        owner_id: "u1".into(),
        created_at: datetime!(2024-01-01 00:00:00 UTC),
    }
}

fn codes(state: &LinksState) -> Vec<&str> {
    state.links.iter().map(|l| l.short_code.as_str()).collect()
}

// =============================================================================
// validate_url
// =============================================================================

#[test]
fn validate_rejects_empty_and_whitespace() {
    for input in ["", " ", "\t\n  "] {
        assert_eq!(validate_url(input), Err(EMPTY_URL), "input {input:?}");
    }
}

#[test]
fn validate_rejects_non_urls() {
    for input in ["not a url", "example.com", "/relative/path", "mailto:ann@example.com"] {
        assert_eq!(validate_url(input), Err(INVALID_URL), "input {input:?}");
    }
}

#[test]
fn validate_accepts_absolute_urls_and_trims() {
    assert_eq!(validate_url("  https://example.com/a-long-path  "), Ok("https://example.com/a-long-path".to_owned()));
    assert_eq!(validate_url("http://localhost:8080/x?y=1"), Ok("http://localhost:8080/x?y=1".to_owned()));
}

// =============================================================================
// Mount & fetch
// =============================================================================

#[test]
fn mount_requests_fetch() {
    let (state, request) = LinksState::mount();
    assert_eq!(request, LinksRequest::Fetch);
    assert!(state.loading);
    assert!(state.links.is_empty());
    assert_eq!(state.form, FormState::default());
}

#[test]
fn fetch_success_replaces_in_server_order() {
    let (mut state, _) = LinksState::mount();
    state.links_fetched(Ok(vec![link("1", "a"), link("2", "b")]));
    assert!(!state.loading);
    assert_eq!(codes(&state), ["a", "b"]);
}

#[test]
fn fetch_twice_is_idempotent() {
    let (mut state, _) = LinksState::mount();
    let server = vec![link("1", "a"), link("2", "b")];
    state.links_fetched(Ok(server.clone()));
    let first = state.links.clone();
    state.links_fetched(Ok(server));
    assert_eq!(state.links, first);
}

#[test]
fn fetch_failure_sets_error() {
    let (mut state, _) = LinksState::mount();
    state.links_fetched(Err(RequestError::new("Failed to fetch URLs")));
    assert!(!state.loading);
    assert_eq!(state.form.error.as_deref(), Some("Failed to fetch URLs"));
}

// =============================================================================
// Submit
// =============================================================================

#[test]
fn empty_submit_sets_error_without_request() {
    let (mut state, _) = LinksState::mount();
    state.set_input("   ");
    assert_eq!(state.submit(), None);
    assert_eq!(state.form.error.as_deref(), Some(EMPTY_URL));
    assert!(!state.form.pending);
}

#[test]
fn invalid_submit_sets_error_without_request() {
    let (mut state, _) = LinksState::mount();
    state.set_input("not a url");
    assert_eq!(state.submit(), None);
    assert_eq!(state.form.error.as_deref(), Some(INVALID_URL));
}

#[test]
fn valid_submit_goes_pending_and_clears_error() {
    let (mut state, _) = LinksState::mount();
    state.form.error = Some("old".into());
    state.set_input("https://example.com/a-long-path");
    assert_eq!(
        state.submit(),
        Some(LinksRequest::Create { original_url: "https://example.com/a-long-path".into() })
    );
    assert!(state.form.pending);
    assert!(state.form.error.is_none());
}

#[test]
fn second_submit_while_pending_is_ignored() {
    let (mut state, _) = LinksState::mount();
    state.set_input("https://example.com");
    assert!(state.submit().is_some());
    assert_eq!(state.submit(), None);
    assert!(state.form.error.is_none());
}

#[test]
fn created_link_is_prepended_and_input_cleared() {
    let (mut state, _) = LinksState::mount();
    state.links_fetched(Ok(vec![link("1", "old")]));
    state.set_input("https://example.com/new");
    state.submit();
    state.link_created(Ok(link("2", "new")));
    assert_eq!(codes(&state), ["new", "old"]);
    assert!(state.form.input.is_empty());
    assert!(!state.form.pending);
}

#[test]
fn create_failure_keeps_input_and_sets_error() {
    let (mut state, _) = LinksState::mount();
    state.set_input("https://example.com/new");
    state.submit();
    state.link_created(Err(RequestError::new("Failed to create short URL")));
    assert_eq!(state.form.input, "https://example.com/new");
    assert_eq!(state.form.error.as_deref(), Some("Failed to create short URL"));
    assert!(!state.form.pending);
    assert!(state.links.is_empty());
}

#[test]
fn resubmit_allowed_after_failure() {
    let (mut state, _) = LinksState::mount();
    state.set_input("https://example.com/new");
    state.submit();
    state.link_created(Err(RequestError::new("boom")));
    assert!(state.submit().is_some());
}

// =============================================================================
// copy_target
// =============================================================================

#[test]
fn copy_target_builds_public_address() {
    let (mut state, _) = LinksState::mount();
    state.links_fetched(Ok(vec![link("1", "abc123")]));
    assert_eq!(state.copy_target(0, "http://localhost:3000").as_deref(), Some("http://localhost:3000/url/abc123"));
    assert_eq!(state.copy_target(1, "http://localhost:3000"), None);
}

#[test]
fn position_and_copied_marker_follow_prepends() {
    let (mut state, _) = LinksState::mount();
    state.links_fetched(Ok(vec![link("1", "old")]));
    assert_eq!(state.position("old"), Some(0));
    let _ = state.copied.mark(0);

    state.set_input("https://example.com/new");
    let _ = state.submit();
    state.link_created(Ok(link("2", "new")));
    assert_eq!(state.position("old"), Some(1));
    assert_eq!(state.copied.active(), Some(1));
    assert_eq!(state.position("gone"), None);
}
