//! Plain-text rendering of the current screen.
//!
//! Rendering reads a snapshot and never mutates state; the caller decides
//! when to print (only when the output changed).

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::fmt::Write;

use time::format_description::well_known::Rfc3339;

use crate::app::{App, Screen};
use crate::state::auth_form::{AuthFormState, AuthMode};
use crate::state::links::LinksState;

/// Render the whole view for `app`.
#[must_use]
pub fn render(app: &App) -> String {
    match app.screen() {
        Screen::Loading => "Checking session...\n".to_owned(),
        Screen::Home(links) => render_home(links, app.public_base_url(), app.logout_pending()),
        Screen::Auth(form) => render_auth(form),
        Screen::NotFound => "Page not found. Try `goto /`.\n".to_owned(),
    }
}

fn render_home(links: &LinksState, public_base: &str, logout_pending: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== Shorten a URL ==");
    if logout_pending {
        let _ = writeln!(out, "Signing out...");
    }
    let _ = writeln!(out, "URL: {}", links.form.input);
    if links.form.pending {
        let _ = writeln!(out, "Shortening...");
    }
    if let Some(error) = &links.form.error {
        let _ = writeln!(out, "Error: {error}");
    }

    let _ = writeln!(out, "\n== Your links ==");
    if links.loading {
        let _ = writeln!(out, "Loading links...");
    } else if links.links.is_empty() {
        let _ = writeln!(out, "No links yet.");
    }
    for (i, link) in links.links.iter().enumerate() {
        let created = link.created_at.format(&Rfc3339).unwrap_or_default();
        let marker = if links.copied.is_active(i) { "  [copied]" } else { "" };
        let _ = writeln!(out, "{:>3}. {}{marker}", i + 1, link.short_url(public_base));
        let _ = writeln!(out, "     -> {}  ({created})", link.original_url);
    }
    out
}

fn render_auth(form: &AuthFormState) -> String {
    let mut out = String::new();
    match form.mode {
        AuthMode::Login => {
            let _ = writeln!(out, "== Log in ==");
            let _ = writeln!(out, "login <email> <password>   (no account? `goto signup`)");
        }
        AuthMode::Signup => {
            let _ = writeln!(out, "== Sign up ==");
            let _ = writeln!(out, "signup <username> <email> <password>   (have an account? `goto login`)");
        }
    }
    if form.pending {
        let pending = match form.mode {
            AuthMode::Login => "Logging in...",
            AuthMode::Signup => "Creating account...",
        };
        let _ = writeln!(out, "{pending}");
    }
    if let Some(error) = &form.error {
        let _ = writeln!(out, "Error: {error}");
    }
    out
}
