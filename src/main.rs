use std::io::Write;
use std::sync::Arc;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use shortlink::app::App;
use shortlink::clipboard::SystemClipboard;
use shortlink::config::{API_BASE_URL_VAR, ClientConfig, ConfigError, PUBLIC_BASE_URL_VAR};
use shortlink::net::api::HttpApiClient;
use shortlink::state::session::Session;
use shortlink::ui::command::{self, Command, CommandError, HELP};
use shortlink::ui::render::render;

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("http client build failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "shortlink", about = "Terminal client for the URL shortening service")]
struct Cli {
    /// Service address.
    #[arg(long, env = API_BASE_URL_VAR)]
    api_base_url: Option<String>,

    /// Address used when showing and copying short links.
    #[arg(long, env = PUBLIC_BASE_URL_VAR)]
    public_base_url: Option<String>,
}

#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ClientConfig::from_env()?.with_overrides(cli.api_base_url.as_deref(), cli.public_base_url.as_deref())?;
    tracing::info!(api = %config.api_base_url, public = %config.public_base_url, "starting shortlink");

    let api = Arc::new(HttpApiClient::new(&config)?);
    let mut app = App::new(api, Arc::new(SystemClipboard::new()), config.public_base_url.clone());
    app.start();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut last_view = String::new();
    show(&app, &mut last_view)?;

    // The loading screen takes no commands; early lines wait in stdin.
    while app.session() == Session::Unknown {
        let Some(event) = app.next_event().await else { break };
        app.handle(event);
    }
    show(&app, &mut last_view)?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    drain(&mut app, &mut last_view).await?;
                    break;
                };
                match command::parse(&line) {
                    Ok(Command::Quit) => break,
                    Ok(Command::Help) => println!("{HELP}"),
                    Ok(cmd) => {
                        for action in cmd.into_actions() {
                            if !app.dispatch(action) {
                                println!("That command is not available on this screen.");
                                break;
                            }
                        }
                    }
                    Err(CommandError::Empty) => {}
                    Err(e) => println!("{e}"),
                }
            }
            Some(event) = app.next_event() => app.handle(event),
        }
        show(&app, &mut last_view)?;
    }
    Ok(())
}

/// Input is closed: settle what is still in flight so piped commands finish.
async fn drain(app: &mut App, last_view: &mut String) -> Result<(), std::io::Error> {
    while app.has_pending_effects() {
        let Some(event) = app.next_event().await else { break };
        app.handle(event);
        show(app, last_view)?;
    }
    Ok(())
}

/// Print the view only when it changed since the last print.
fn show(app: &App, last_view: &mut String) -> Result<(), std::io::Error> {
    let view = render(app);
    if view != *last_view {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{view}")?;
        write!(stdout, "> ")?;
        stdout.flush()?;
        *last_view = view;
    }
    Ok(())
}
