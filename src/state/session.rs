#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

/// Whether the remote service recognizes our session cookie.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Session {
    /// The startup probe has not settled yet.
    #[default]
    Unknown,
    Authenticated,
    Unauthenticated,
}

/// Write capability for a [`SessionGate`].
///
/// Only [`SessionGate::new`] hands one out, so every code path that can
/// change the session is visible from where the writer is held.
#[derive(Debug)]
pub struct SessionWriter {
    _private: (),
}

/// Tri-state session container. Anyone may read it; writes need a [`SessionWriter`].
#[derive(Debug)]
pub struct SessionGate {
    session: Session,
    probe_issued: bool,
}

impl SessionGate {
    #[must_use]
    pub fn new() -> (Self, SessionWriter) {
        (Self { session: Session::Unknown, probe_issued: false }, SessionWriter { _private: () })
    }

    #[must_use]
    pub fn session(&self) -> Session {
        self.session
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session == Session::Authenticated
    }

    /// Returns `true` exactly once: the caller must issue the probe then.
    pub fn begin_probe(&mut self) -> bool {
        !std::mem::replace(&mut self.probe_issued, true)
    }

    /// Apply the probe outcome. Ignored once the session is already known,
    /// so a slow probe cannot undo a completed login or logout.
    pub fn probe_settled(&mut self, _writer: &SessionWriter, valid: bool) {
        if self.session != Session::Unknown {
            tracing::debug!(session = ?self.session, valid, "late probe result ignored");
            return;
        }
        self.session = if valid { Session::Authenticated } else { Session::Unauthenticated };
        tracing::info!(session = ?self.session, "session probe settled");
    }

    /// Login or signup completed.
    pub fn signed_in(&mut self, _writer: &SessionWriter) {
        self.session = Session::Authenticated;
    }

    /// Logout finished, whatever the server said.
    pub fn signed_out(&mut self, _writer: &SessionWriter) {
        self.session = Session::Unauthenticated;
    }
}
