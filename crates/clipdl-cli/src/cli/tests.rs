use super::*;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).unwrap()
}

#[test]
fn cli_parse_url() {
    let cli = parse(&["clipdl", "https://example.com/watch?v=abc"]);
    assert_eq!(cli.url, "https://example.com/watch?v=abc");
}

#[test]
fn cli_url_not_validated() {
    let cli = parse(&["clipdl", "not a url at all"]);
    assert_eq!(cli.url, "not a url at all");
}

#[test]
fn cli_requires_url() {
    assert!(Cli::try_parse_from(["clipdl"]).is_err());
}

#[test]
fn cli_rejects_extra_arguments() {
    assert!(Cli::try_parse_from(["clipdl", "https://a.example", "https://b.example"]).is_err());
}

#[test]
fn cli_rejects_unknown_flags() {
    assert!(Cli::try_parse_from(["clipdl", "--max-duration", "5", "https://a.example"]).is_err());
}

#[test]
fn cli_definition_is_consistent() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
}

#[test]
fn cli_url_may_start_with_hyphen() {
    let cli = parse(&["clipdl", "-Xabc"]);
    assert_eq!(cli.url, "-Xabc");
}

#[test]
fn cli_usage_errors_exit_one() {
    let missing = Cli::try_parse_from(["clipdl"]).unwrap_err();
    assert_eq!(parse_exit_code(&missing), 1);
    let extra = Cli::try_parse_from(["clipdl", "https://a.example", "https://b.example"]).unwrap_err();
    assert_eq!(parse_exit_code(&extra), 1);
}

#[test]
fn cli_version_exits_zero() {
    let err = Cli::try_parse_from(["clipdl", "--version"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    assert_eq!(parse_exit_code(&err), 0);
}

#[test]
fn execute_fails_on_empty_ytdlp_command() {
    let cli = parse(&["clipdl", "https://example.com/v"]);
    let cfg = ClipConfig {
        ytdlp_command: Some(Vec::new()),
        ..ClipConfig::default()
    };
    let err = cli.execute(&cfg).unwrap_err();
    assert!(err.to_string().contains("empty yt-dlp command"), "{err:#}");
}
