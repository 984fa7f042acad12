use super::*;

fn filled_login() -> AuthFormState {
    let mut form = AuthFormState::new(AuthMode::Login);
    form.email = " ann@example.com ".into();
    form.password = "hunter2".into();
    form
}

#[test]
fn new_form_is_idle() {
    let form = AuthFormState::new(AuthMode::Signup);
    assert_eq!(form.mode, AuthMode::Signup);
    assert!(!form.pending);
    assert!(form.error.is_none());
}

#[test]
fn login_with_blank_field_is_rejected() {
    let mut form = AuthFormState::new(AuthMode::Login);
    form.email = "ann@example.com".into();
    form.password = "   ".into();
    assert_eq!(form.submit(), None);
    assert_eq!(form.error.as_deref(), Some(MISSING_FIELDS));
    assert!(!form.pending);
}

#[test]
fn signup_requires_username() {
    let mut form = AuthFormState::new(AuthMode::Signup);
    form.email = "ann@example.com".into();
    form.password = "pw".into();
    assert_eq!(form.submit(), None);
    assert_eq!(form.error.as_deref(), Some(MISSING_FIELDS));
}

#[test]
fn login_submit_trims_email_and_goes_pending() {
    let mut form = filled_login();
    form.error = Some("old".into());
    assert_eq!(
        form.submit(),
        Some(AuthRequest::Login { email: "ann@example.com".into(), password: "hunter2".into() })
    );
    assert!(form.pending);
    assert!(form.error.is_none());
}

#[test]
fn signup_submit_builds_signup_request() {
    let mut form = AuthFormState::new(AuthMode::Signup);
    form.username = "ann".into();
    form.email = "ann@example.com".into();
    form.password = " spaced ".into();
    assert_eq!(
        form.submit(),
        Some(AuthRequest::Signup {
            username: "ann".into(),
            email: "ann@example.com".into(),
            password: " spaced ".into(),
        })
    );
}

#[test]
fn submit_while_pending_is_ignored() {
    let mut form = filled_login();
    assert!(form.submit().is_some());
    assert_eq!(form.submit(), None);
}

#[test]
fn success_clears_pending_and_password() {
    let mut form = filled_login();
    form.submit();
    assert!(form.settled(Ok(())));
    assert!(!form.pending);
    assert!(form.password.is_empty());
}

#[test]
fn failure_records_message() {
    let mut form = filled_login();
    form.submit();
    assert!(!form.settled(Err(RequestError::new("Invalid credentials"))));
    assert!(!form.pending);
    assert_eq!(form.error.as_deref(), Some("Invalid credentials"));
}

#[test]
fn debug_output_hides_password() {
    let form = filled_login();
    let rendered = format!("{form:?}");
    assert!(!rendered.contains("hunter2"));
    let request = AuthRequest::Login { email: "a".into(), password: "hunter2".into() };
    assert!(!format!("{request:?}").contains("hunter2"));
}
