#[cfg(test)]
#[path = "auth_form_test.rs"]
mod auth_form_test;

use crate::net::api::RequestError;

pub const MISSING_FIELDS: &str = "Please fill in all fields";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Signup,
}

/// Credentials the form asks the runtime to submit.
#[derive(Clone, PartialEq, Eq)]
pub enum AuthRequest {
    Login { email: String, password: String },
    Signup { username: String, email: String, password: String },
}

impl std::fmt::Debug for AuthRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Login { email, .. } => f.debug_struct("Login").field("email", email).finish_non_exhaustive(),
            Self::Signup { username, email, .. } => f
                .debug_struct("Signup")
                .field("username", username)
                .field("email", email)
                .finish_non_exhaustive(),
        }
    }
}

/// Login or signup form. `username` is only read in signup mode.
#[derive(Clone)]
pub struct AuthFormState {
    pub mode: AuthMode,
    pub username: String,
    pub email: String,
    pub password: String,
    pub pending: bool,
    pub error: Option<String>,
}

impl AuthFormState {
    #[must_use]
    pub fn new(mode: AuthMode) -> Self {
        Self {
            mode,
            username: String::new(),
            email: String::new(),
            password: String::new(),
            pending: false,
            error: None,
        }
    }

    /// Validate and start a submission. Username and email are sent
    /// trimmed; the password is sent as typed.
    pub fn submit(&mut self) -> Option<AuthRequest> {
        if self.pending {
            return None;
        }
        let username = self.username.trim();
        let email = self.email.trim();
        let missing = email.is_empty()
            || self.password.trim().is_empty()
            || (self.mode == AuthMode::Signup && username.is_empty());
        if missing {
            self.error = Some(MISSING_FIELDS.to_owned());
            return None;
        }

        let request = match self.mode {
            AuthMode::Login => AuthRequest::Login { email: email.to_owned(), password: self.password.clone() },
            AuthMode::Signup => AuthRequest::Signup {
                username: username.to_owned(),
                email: email.to_owned(),
                password: self.password.clone(),
            },
        };
        self.pending = true;
        self.error = None;
        Some(request)
    }

    /// Apply the outcome. Returns `true` when the session is now established.
    pub fn settled(&mut self, result: Result<(), RequestError>) -> bool {
        self.pending = false;
        match result {
            Ok(()) => {
                self.password.clear();
                true
            }
            Err(e) => {
                self.error = Some(e.message);
                false
            }
        }
    }
}

impl std::fmt::Debug for AuthFormState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthFormState")
            .field("mode", &self.mode)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("pending", &self.pending)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}
