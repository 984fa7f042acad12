//! Application runtime: owns all client state and runs effects.
//!
//! ARCHITECTURE
//! ============
//! One task owns [`App`] and applies every change through [`App::dispatch`]
//! (user actions) and [`App::handle`] (effect outcomes). Effects run as
//! spawned tokio tasks that only report back through the event channel, so
//! no state is shared across tasks.
//!
//! Every screen mount gets a fresh [`ScreenId`]. Outcomes carry the id of
//! the screen that asked for them; outcomes for a screen that is no longer
//! mounted are dropped instead of touching the new screen. Session writes
//! (probe, login/signup success, logout) are applied regardless, since the
//! server-side session changed either way.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use std::future::Future;
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::clipboard::{Clipboard, ClipboardError};
use crate::net::api::{RequestError, ShortenerApi};
use crate::net::types::ShortenedLink;
use crate::routes::{Resolution, Route, resolve};
use crate::state::auth_form::{AuthFormState, AuthMode, AuthRequest};
use crate::state::copy::COPY_FEEDBACK_DURATION;
use crate::state::links::{LinksRequest, LinksState};
use crate::state::session::{Session, SessionGate, SessionWriter};

// =============================================================================
// TYPES
// =============================================================================

/// Identity of one screen mount.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct ScreenId(u64);

/// The currently mounted screen and its state.
#[derive(Debug)]
pub enum Screen {
    Loading,
    Home(LinksState),
    Auth(AuthFormState),
    NotFound,
}

/// User intents coming from the view layer.
#[derive(Clone, PartialEq, Eq)]
pub enum Action {
    Navigate(Route),
    /// Remount the current screen, refetching what it loads on mount.
    Reload,
    SetInput(String),
    Submit,
    Login { email: String, password: String },
    Signup { username: String, email: String, password: String },
    /// Copy the short link at this 0-based list index.
    Copy(usize),
    Logout,
}

impl std::fmt::Debug for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Navigate(route) => f.debug_tuple("Navigate").field(route).finish(),
            Self::Reload => f.write_str("Reload"),
            Self::SetInput(value) => f.debug_tuple("SetInput").field(value).finish(),
            Self::Submit => f.write_str("Submit"),
            Self::Login { email, .. } => f.debug_struct("Login").field("email", email).finish_non_exhaustive(),
            Self::Signup { username, email, .. } => f
                .debug_struct("Signup")
                .field("username", username)
                .field("email", email)
                .finish_non_exhaustive(),
            Self::Copy(index) => f.debug_tuple("Copy").field(index).finish(),
            Self::Logout => f.write_str("Logout"),
        }
    }
}

/// Result of one effect.
#[derive(Debug)]
pub enum Outcome {
    Probe(Result<(), RequestError>),
    Auth(Result<(), RequestError>),
    LinksFetched(Result<Vec<ShortenedLink>, RequestError>),
    LinkCreated(Result<ShortenedLink, RequestError>),
    /// Keyed by short code: the list can shift before the write settles.
    Copied { short_code: String, result: Result<(), ClipboardError> },
    LoggedOut(Result<(), RequestError>),
}

#[derive(Debug)]
pub enum Event {
    Completed { screen: ScreenId, outcome: Outcome },
    CopyExpired { screen: ScreenId, generation: u64 },
}

// =============================================================================
// APP
// =============================================================================

pub struct App {
    api: Arc<dyn ShortenerApi>,
    clipboard: Arc<dyn Clipboard>,
    public_base_url: String,
    gate: SessionGate,
    writer: SessionWriter,
    route: Route,
    screen: Screen,
    screen_id: ScreenId,
    logout_pending: bool,
    in_flight: usize,
    events_tx: mpsc::UnboundedSender<Event>,
    events_rx: mpsc::UnboundedReceiver<Event>,
}

impl App {
    #[must_use]
    pub fn new(api: Arc<dyn ShortenerApi>, clipboard: Arc<dyn Clipboard>, public_base_url: impl Into<String>) -> Self {
        let (gate, writer) = SessionGate::new();
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            api,
            clipboard,
            public_base_url: public_base_url.into(),
            gate,
            writer,
            route: Route::Home,
            screen: Screen::Loading,
            screen_id: ScreenId(0),
            logout_pending: false,
            in_flight: 0,
            events_tx,
            events_rx,
        }
    }

    /// Issue the one-time session probe. Must be called inside a tokio runtime.
    pub fn start(&mut self) {
        if !self.gate.begin_probe() {
            return;
        }
        let api = Arc::clone(&self.api);
        self.spawn(self.screen_id, async move { Outcome::Probe(api.check_session().await) });
    }

    #[must_use]
    pub fn session(&self) -> Session {
        self.gate.session()
    }

    #[must_use]
    pub fn route(&self) -> Route {
        self.route
    }

    #[must_use]
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    #[must_use]
    pub fn screen_id(&self) -> ScreenId {
        self.screen_id
    }

    #[must_use]
    pub fn public_base_url(&self) -> &str {
        &self.public_base_url
    }

    #[must_use]
    pub fn logout_pending(&self) -> bool {
        self.logout_pending
    }

    /// Whether spawned requests or clipboard writes have yet to report
    /// back. Copy-feedback timers are not counted.
    #[must_use]
    pub fn has_pending_effects(&self) -> bool {
        self.in_flight > 0
    }

    /// Wait for the next effect outcome.
    pub async fn next_event(&mut self) -> Option<Event> {
        self.events_rx.recv().await
    }

    /// Next outcome if one is already queued.
    pub fn try_next_event(&mut self) -> Option<Event> {
        self.events_rx.try_recv().ok()
    }

    /// Apply a user action. Returns `false` when the action does not apply
    /// to the current screen.
    pub fn dispatch(&mut self, action: Action) -> bool {
        tracing::debug!(?action, route = ?self.route, "dispatch");
        match action {
            Action::Navigate(route) => {
                if self.remount_blocked(route) {
                    return false;
                }
                self.navigate(route);
                true
            }
            Action::Reload => {
                if self.remount_blocked(self.route) {
                    return false;
                }
                self.navigate(self.route);
                true
            }
            Action::SetInput(value) => match &mut self.screen {
                Screen::Home(links) => {
                    links.set_input(value);
                    true
                }
                _ => false,
            },
            Action::Submit => self.submit_current(),
            Action::Login { email, password } => match &mut self.screen {
                Screen::Auth(form) if form.mode == AuthMode::Login => {
                    form.email = email;
                    form.password = password;
                    self.submit_current()
                }
                _ => false,
            },
            Action::Signup { username, email, password } => match &mut self.screen {
                Screen::Auth(form) if form.mode == AuthMode::Signup => {
                    form.username = username;
                    form.email = email;
                    form.password = password;
                    self.submit_current()
                }
                _ => false,
            },
            Action::Copy(index) => self.copy(index),
            Action::Logout => self.logout(),
        }
    }

    /// Apply one effect outcome or timer event.
    pub fn handle(&mut self, event: Event) {
        match event {
            Event::Completed { screen, outcome } => {
                self.in_flight = self.in_flight.saturating_sub(1);
                self.complete(screen, outcome);
            }
            Event::CopyExpired { screen, generation } => {
                if screen != self.screen_id {
                    return;
                }
                if let Screen::Home(links) = &mut self.screen {
                    links.copied.expire(generation);
                }
            }
        }
    }

    // -------------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------------

    fn navigate(&mut self, requested: Route) {
        match self.landing(requested) {
            Some(to) => {
                self.route = to;
                self.mount_route(to);
            }
            None => {
                self.route = requested;
                self.mount(Screen::Loading);
            }
        }
    }

    /// Route that `requested` finally renders after redirects, or `None`
    /// while the session is still unknown.
    fn landing(&self, requested: Route) -> Option<Route> {
        let mut route = requested;
        loop {
            match resolve(self.gate.session(), route) {
                Resolution::Loading => return None,
                Resolution::Redirect(to) => {
                    tracing::debug!(from = route.path(), to = to.path(), "redirect");
                    route = to;
                }
                Resolution::Render(to) => return Some(to),
            }
        }
    }

    /// A pending creation pins the home screen: remounting it would reopen
    /// the form and drop the created record as stale.
    fn remount_blocked(&self, requested: Route) -> bool {
        let Screen::Home(links) = &self.screen else {
            return false;
        };
        if !links.form.pending || self.landing(requested) != Some(Route::Home) {
            return false;
        }
        tracing::debug!(route = requested.path(), "remount refused while a creation is pending");
        true
    }

    fn mount_route(&mut self, route: Route) {
        match route {
            Route::Home => {
                let (links, request) = LinksState::mount();
                self.mount(Screen::Home(links));
                self.run_links_request(request);
            }
            Route::Login => self.mount(Screen::Auth(AuthFormState::new(AuthMode::Login))),
            Route::Signup => self.mount(Screen::Auth(AuthFormState::new(AuthMode::Signup))),
            Route::NotFound => self.mount(Screen::NotFound),
        }
    }

    fn mount(&mut self, screen: Screen) {
        self.screen_id = ScreenId(self.screen_id.0 + 1);
        self.screen = screen;
    }

    // -------------------------------------------------------------------------
    // Actions
    // -------------------------------------------------------------------------

    fn submit_current(&mut self) -> bool {
        match &mut self.screen {
            Screen::Home(links) => {
                if let Some(request) = links.submit() {
                    self.run_links_request(request);
                }
                true
            }
            Screen::Auth(form) => {
                if let Some(request) = form.submit() {
                    self.run_auth_request(request);
                }
                true
            }
            Screen::Loading | Screen::NotFound => false,
        }
    }

    fn copy(&mut self, index: usize) -> bool {
        let Screen::Home(links) = &self.screen else {
            return false;
        };
        let (Some(address), Some(link)) = (links.copy_target(index, &self.public_base_url), links.links.get(index)) else {
            return false;
        };
        let short_code = link.short_code.clone();
        let clipboard = Arc::clone(&self.clipboard);
        self.spawn(self.screen_id, async move {
            Outcome::Copied { short_code, result: clipboard.write_text(&address).await }
        });
        true
    }

    fn logout(&mut self) -> bool {
        if !matches!(self.screen, Screen::Home(_)) || self.logout_pending {
            return false;
        }
        self.logout_pending = true;
        let api = Arc::clone(&self.api);
        self.spawn(self.screen_id, async move { Outcome::LoggedOut(api.logout().await) });
        true
    }

    // -------------------------------------------------------------------------
    // Effects
    // -------------------------------------------------------------------------

    fn run_links_request(&mut self, request: LinksRequest) {
        let api = Arc::clone(&self.api);
        match request {
            LinksRequest::Fetch => {
                self.spawn(self.screen_id, async move { Outcome::LinksFetched(api.get_user_urls().await) });
            }
            LinksRequest::Create { original_url } => {
                self.spawn(self.screen_id, async move {
                    Outcome::LinkCreated(api.create_short_url(&original_url).await)
                });
            }
        }
    }

    fn run_auth_request(&mut self, request: AuthRequest) {
        let api = Arc::clone(&self.api);
        self.spawn(self.screen_id, async move {
            let result = match request {
                AuthRequest::Login { email, password } => api.login(&email, &password).await,
                AuthRequest::Signup { username, email, password } => api.signup(&username, &email, &password).await,
            };
            Outcome::Auth(result)
        });
    }

    fn spawn<F>(&mut self, screen: ScreenId, effect: F)
    where
        F: Future<Output = Outcome> + Send + 'static,
    {
        self.in_flight += 1;
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let outcome = effect.await;
            // The receiver lives as long as the app; a send error means we are shutting down.
            let _ = tx.send(Event::Completed { screen, outcome });
        });
    }

    fn schedule_copy_expiry(&self, generation: u64) {
        let tx = self.events_tx.clone();
        let screen = self.screen_id;
        tokio::spawn(async move {
            tokio::time::sleep(COPY_FEEDBACK_DURATION).await;
            let _ = tx.send(Event::CopyExpired { screen, generation });
        });
    }

    // -------------------------------------------------------------------------
    // Outcomes
    // -------------------------------------------------------------------------

    fn complete(&mut self, screen: ScreenId, outcome: Outcome) {
        match outcome {
            Outcome::Probe(result) => {
                if let Err(e) = &result {
                    tracing::debug!(error = %e, "session probe failed");
                }
                self.gate.probe_settled(&self.writer, result.is_ok());
                self.navigate(self.route);
            }
            Outcome::LoggedOut(result) => {
                if let Err(e) = result {
                    tracing::warn!(error = %e, "logout request failed; clearing local session anyway");
                }
                self.logout_pending = false;
                self.gate.signed_out(&self.writer);
                self.navigate(Route::Login);
            }
            Outcome::Auth(result) => {
                let signed_in = result.is_ok();
                if screen == self.screen_id {
                    if let Screen::Auth(form) = &mut self.screen {
                        form.settled(result);
                    }
                } else {
                    tracing::debug!(?screen, "auth outcome for unmounted screen");
                }
                if signed_in {
                    self.gate.signed_in(&self.writer);
                    // Login/signup routes redirect home once authenticated.
                    self.navigate(self.route);
                }
            }
            outcome if screen != self.screen_id => {
                tracing::debug!(?screen, current = ?self.screen_id, ?outcome, "discarding outcome for unmounted screen");
            }
            Outcome::LinksFetched(result) => {
                if let Screen::Home(links) = &mut self.screen {
                    links.links_fetched(result);
                }
            }
            Outcome::LinkCreated(result) => {
                if let Screen::Home(links) = &mut self.screen {
                    links.link_created(result);
                }
            }
            Outcome::Copied { short_code, result } => match result {
                Ok(()) => {
                    let Screen::Home(links) = &mut self.screen else {
                        return;
                    };
                    let Some(index) = links.position(&short_code) else {
                        tracing::debug!(%short_code, "copied link no longer listed");
                        return;
                    };
                    let generation = links.copied.mark(index);
                    self.schedule_copy_expiry(generation);
                }
                Err(e) => tracing::warn!(error = %e, %short_code, "failed to copy short link"),
            },
        }
    }
}
