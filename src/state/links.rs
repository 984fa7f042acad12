//! Link screen state: create form, held link list, copy feedback.
//!
//! The screen moves idle → pending → success/error on each submit. The
//! list is replaced wholesale on fetch and grows at the front on create.

#[cfg(test)]
#[path = "links_test.rs"]
mod links_test;

use super::copy::CopyFeedback;
use crate::net::api::RequestError;
use crate::net::types::ShortenedLink;

pub const EMPTY_URL: &str = "Please enter a URL";
pub const INVALID_URL: &str = "Please enter a valid URL";

/// Single-input form with a pending flag and an error slot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormState {
    pub input: String,
    pub pending: bool,
    pub error: Option<String>,
}

/// Requests the link screen asks the runtime to run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LinksRequest {
    Fetch,
    Create { original_url: String },
}

#[derive(Clone, Debug, Default)]
pub struct LinksState {
    pub form: FormState,
    /// Newest first once creations start arriving.
    pub links: Vec<ShortenedLink>,
    /// The mount-time fetch is still outstanding.
    pub loading: bool,
    pub copied: CopyFeedback,
}

impl LinksState {
    /// Fresh screen plus the fetch it must issue on mount.
    #[must_use]
    pub fn mount() -> (Self, LinksRequest) {
        (Self { loading: true, ..Self::default() }, LinksRequest::Fetch)
    }

    pub fn links_fetched(&mut self, result: Result<Vec<ShortenedLink>, RequestError>) {
        self.loading = false;
        match result {
            Ok(links) => self.links = links,
            Err(e) => self.form.error = Some(e.message),
        }
    }

    pub fn set_input(&mut self, value: impl Into<String>) {
        self.form.input = value.into();
    }

    /// Validate and start a creation. `None` means nothing should be sent:
    /// either validation failed (error slot set) or a submit is in flight.
    pub fn submit(&mut self) -> Option<LinksRequest> {
        if self.form.pending {
            tracing::debug!("submit ignored while a creation is pending");
            return None;
        }
        match validate_url(&self.form.input) {
            Ok(original_url) => {
                self.form.pending = true;
                self.form.error = None;
                Some(LinksRequest::Create { original_url })
            }
            Err(message) => {
                self.form.error = Some(message.to_owned());
                None
            }
        }
    }

    pub fn link_created(&mut self, result: Result<ShortenedLink, RequestError>) {
        match result {
            Ok(link) => {
                self.links.insert(0, link);
                self.copied.shift_down();
                self.form.input.clear();
            }
            Err(e) => self.form.error = Some(e.message),
        }
        self.form.pending = false;
    }

    /// Public address for the entry at `index`, or `None` if out of range.
    #[must_use]
    pub fn copy_target(&self, index: usize, public_base: &str) -> Option<String> {
        self.links.get(index).map(|link| link.short_url(public_base))
    }

    /// Current list index of the link with `short_code`.
    #[must_use]
    pub fn position(&self, short_code: &str) -> Option<usize> {
        self.links.iter().position(|link| link.short_code == short_code)
    }
}

/// Trimmed input if it is non-empty and parses as an absolute URL with a host.
///
/// # Errors
///
/// Returns the message to show in the error slot.
pub fn validate_url(input: &str) -> Result<String, &'static str> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(EMPTY_URL);
    }
    match url::Url::parse(trimmed) {
        Ok(parsed) if parsed.has_host() => Ok(trimmed.to_owned()),
        _ => Err(INVALID_URL),
    }
}
