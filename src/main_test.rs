use super::*;
use clap::CommandFactory;

fn env_of(id: &str) -> Option<String> {
    Cli::command()
        .get_arguments()
        .find(|arg| arg.get_id() == id)
        .and_then(|arg| arg.get_env())
        .map(|env| env.to_string_lossy().into_owned())
}

#[test]
fn base_url_flags_fall_back_to_environment() {
    assert_eq!(env_of("api_base_url").as_deref(), Some(API_BASE_URL_VAR));
    assert_eq!(env_of("public_base_url").as_deref(), Some(PUBLIC_BASE_URL_VAR));
}

#[test]
fn explicit_flag_is_parsed() {
    let cli = Cli::try_parse_from(["shortlink", "--api-base-url", "http://api.test"]).unwrap();
    assert_eq!(cli.api_base_url.as_deref(), Some("http://api.test"));
}
