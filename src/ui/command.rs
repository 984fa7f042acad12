//! Line commands typed at the prompt.

#[cfg(test)]
#[path = "command_test.rs"]
mod command_test;

use crate::app::Action;
use crate::routes::Route;

pub const HELP: &str = "\
commands:
  login <email> <password>             sign in
  signup <username> <email> <password> create an account
  goto <login|signup|/>                switch screen
  url <text>                           set the URL input
  shorten [text]                       submit the URL input
  list                                 reload your links
  copy <n>                             copy link n to the clipboard
  logout                               sign out
  help                                 show this help
  quit                                 exit";

#[derive(Clone, PartialEq, Eq)]
pub enum Command {
    Login { email: String, password: String },
    Signup { username: String, email: String, password: String },
    Goto(Route),
    Url(String),
    Shorten(Option<String>),
    List,
    /// 0-based index, parsed from a 1-based number.
    Copy(usize),
    Logout,
    Help,
    Quit,
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Login { email, .. } => f.debug_struct("Login").field("email", email).finish_non_exhaustive(),
            Self::Signup { username, email, .. } => f
                .debug_struct("Signup")
                .field("username", username)
                .field("email", email)
                .finish_non_exhaustive(),
            Self::Goto(route) => f.debug_tuple("Goto").field(route).finish(),
            Self::Url(text) => f.debug_tuple("Url").field(text).finish(),
            Self::Shorten(text) => f.debug_tuple("Shorten").field(text).finish(),
            Self::List => f.write_str("List"),
            Self::Copy(index) => f.debug_tuple("Copy").field(index).finish(),
            Self::Logout => f.write_str("Logout"),
            Self::Help => f.write_str("Help"),
            Self::Quit => f.write_str("Quit"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}`; type `help`")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
}

/// Parse one input line.
///
/// # Errors
///
/// Returns [`CommandError`] for blank lines, unknown verbs and bad arguments.
pub fn parse(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };
    let args: Vec<&str> = rest.split_whitespace().collect();

    match verb.to_ascii_lowercase().as_str() {
        "" => Err(CommandError::Empty),
        "login" => match args.as_slice() {
            [email, password] => Ok(Command::Login { email: (*email).to_owned(), password: (*password).to_owned() }),
            _ => Err(CommandError::Usage("login <email> <password>")),
        },
        "signup" => match args.as_slice() {
            [username, email, password] => Ok(Command::Signup {
                username: (*username).to_owned(),
                email: (*email).to_owned(),
                password: (*password).to_owned(),
            }),
            _ => Err(CommandError::Usage("signup <username> <email> <password>")),
        },
        "goto" if rest.is_empty() => Err(CommandError::Usage("goto <login|signup|/>")),
        "goto" => Ok(Command::Goto(Route::parse(rest))),
        "url" => Ok(Command::Url(rest.to_owned())),
        "shorten" => Ok(Command::Shorten((!rest.is_empty()).then(|| rest.to_owned()))),
        "list" => Ok(Command::List),
        "copy" => match args.as_slice() {
            [n] => match n.parse::<usize>() {
                Ok(n) if n > 0 => Ok(Command::Copy(n - 1)),
                _ => Err(CommandError::Usage("copy <n>, where n starts at 1")),
            },
            _ => Err(CommandError::Usage("copy <n>")),
        },
        "logout" => Ok(Command::Logout),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(CommandError::Unknown(other.to_owned())),
    }
}

impl Command {
    /// Actions to dispatch, in order. Empty for front-end-only commands.
    #[must_use]
    pub fn into_actions(self) -> Vec<Action> {
        match self {
            Self::Login { email, password } => vec![Action::Login { email, password }],
            Self::Signup { username, email, password } => vec![Action::Signup { username, email, password }],
            Self::Goto(route) => vec![Action::Navigate(route)],
            Self::Url(text) => vec![Action::SetInput(text)],
            Self::Shorten(Some(text)) => vec![Action::SetInput(text), Action::Submit],
            Self::Shorten(None) => vec![Action::Submit],
            Self::List => vec![Action::Reload],
            Self::Copy(index) => vec![Action::Copy(index)],
            Self::Logout => vec![Action::Logout],
            Self::Help | Self::Quit => Vec::new(),
        }
    }
}
