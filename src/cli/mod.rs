use std::{ffi::OsString, path::PathBuf, process::ExitCode, time::Duration};

use clap::Parser;
use log::{LevelFilter, debug, info};

use crate::{
    api::client::ApiClient,
    config::Config,
    error::Result,
    twitter::{outcome::Outcome, tweet::TwitterApi},
};

pub const USAGE_HINT: &str = "Please provide tweet text using the -text flag.";

/// Options that also accept the single-dash spelling, e.g. `-text "hi"`.
const LONG_OPTIONS: [&str; 7] = [
    "text",
    "delete",
    "self-clean",
    "env-file",
    "config",
    "timeout",
    "verbose",
];

/// Options whose value is the following argument.
const VALUE_OPTIONS: [&str; 7] = [
    "--text",
    "-t",
    "--delete",
    "-d",
    "--env-file",
    "--config",
    "--timeout",
];

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Text of the tweet to post
    #[arg(long, short, default_value = "", allow_hyphen_values = true)]
    pub text: String,

    /// ID of the tweet to delete. Takes precedence over --text
    #[arg(long, short, default_value = "", allow_hyphen_values = true)]
    pub delete: String,

    /// Delete the posted tweet again after SECS seconds (default 2)
    #[arg(
        long,
        value_name = "SECS",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "2"
    )]
    pub self_clean: Option<u64>,

    /// Load environment variables from this file instead of ./.env
    #[arg(long, value_name = "PATH")]
    pub env_file: Option<PathBuf>,

    /// Read credentials from a TOML config file instead of the environment
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Log what the CLI is doing
    #[arg(long, short)]
    pub verbose: bool,
}

/// What a single invocation does, in priority order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Delete(String),
    Usage,
    Post {
        text: String,
        self_clean: Option<Duration>,
    },
}

/// How an invocation finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    Usage,
    Deleted(Outcome),
    Posted {
        id: String,
        cleanup: Option<Outcome>,
    },
}

impl Args {
    pub fn action(&self) -> Action {
        if !self.delete.is_empty() {
            Action::Delete(self.delete.clone())
        } else if self.text.is_empty() {
            Action::Usage
        } else {
            Action::Post {
                text: self.text.clone(),
                self_clean: self.self_clean.map(Duration::from_secs),
            }
        }
    }
}

impl Completion {
    pub fn exit_code(&self) -> u8 {
        match self {
            Completion::Usage => 0,
            Completion::Deleted(outcome) => outcome.exit_code(),
            Completion::Posted { cleanup, .. } => cleanup.map_or(0, |outcome| outcome.exit_code()),
        }
    }
}

/// Rewrites Go-style single-dash long options (`-text`, `-delete=1`) into
/// the `--` form clap understands. Option values and everything after `--`
/// are left alone.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut normalized = Vec::new();
    let mut expects_value = false;
    let mut passthrough = false;

    for arg in args.into_iter().map(Into::into) {
        if passthrough || expects_value {
            expects_value = false;
            normalized.push(arg);
            continue;
        }

        let Some(text) = arg.to_str() else {
            normalized.push(arg);
            continue;
        };

        if text == "--" {
            passthrough = true;
            normalized.push(arg);
            continue;
        }

        let rewritten = match text.strip_prefix('-') {
            Some(rest) if !rest.starts_with('-') => {
                let name = rest.split('=').next().unwrap_or(rest);
                LONG_OPTIONS.contains(&name).then(|| format!("-{text}"))
            }
            _ => None,
        };
        let arg = rewritten.map_or(arg, OsString::from);

        if let Some(flag) = arg.to_str() {
            expects_value = !flag.contains('=') && VALUE_OPTIONS.contains(&flag);
        }
        normalized.push(arg);
    }

    normalized
}

/// Runs `action`, connecting to the API only when the action needs it.
pub async fn dispatch<A, F>(action: Action, connect: F) -> Result<Completion>
where
    A: TwitterApi,
    F: FnOnce() -> Result<A>,
{
    match action {
        Action::Delete(id) => {
            let api = connect()?;
            println!("Attempting to delete tweet with ID: {id}");
            let outcome = api.delete(&id).await?;
            println!("{outcome}");
            Ok(Completion::Deleted(outcome))
        }
        Action::Usage => {
            println!("{USAGE_HINT}");
            Ok(Completion::Usage)
        }
        Action::Post { text, self_clean } => {
            let api = connect()?;
            let id = api.create(&text).await?;
            println!("Posted tweet with ID: {id}");

            let cleanup = match self_clean {
                Some(delay) => {
                    info!("Deleting tweet {id} in {}s", delay.as_secs());
                    tokio::time::sleep(delay).await;
                    let outcome = api.delete(&id).await?;
                    println!("{outcome}");
                    Some(outcome)
                }
                None => None,
            };

            Ok(Completion::Posted { id, cleanup })
        }
    }
}

fn init_logger(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init();
}

fn connect(args: &Args) -> Result<ApiClient> {
    let mut cfg = Config::resolve(args.config.as_deref(), args.env_file.as_deref())?;
    if let Some(timeout) = args.timeout {
        cfg.timeout_secs = timeout;
    }
    debug!("Using configuration:\n{cfg}");
    ApiClient::from_config(&cfg)
}

pub async fn run() -> ExitCode {
    let args = Args::parse_from(normalize_args(std::env::args_os()));
    init_logger(args.verbose);

    match dispatch(args.action(), || connect(&args)).await {
        Ok(completion) => ExitCode::from(completion.exit_code()),
        Err(err) => {
            debug!("{err:?}");
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use crate::error::{ApiError, ConfigError, TweetError};

    use super::*;

    #[derive(Default)]
    struct MockApi {
        calls: RefCell<Vec<String>>,
        delete_status: u16,
    }

    impl MockApi {
        fn with_delete_status(delete_status: u16) -> Self {
            Self {
                delete_status,
                ..Default::default()
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    impl TwitterApi for MockApi {
        async fn create(&self, text: &str) -> Result<String> {
            self.calls.borrow_mut().push(format!("create {text}"));
            if text == "fail" {
                return Err(ApiError::UnexpectedStatus {
                    status: 403,
                    status_text: "403 Forbidden".to_string(),
                }
                .into());
            }
            Ok("12345".to_string())
        }

        async fn delete(&self, id: &str) -> Result<Outcome> {
            self.calls.borrow_mut().push(format!("delete {id}"));
            Ok(Outcome::from_status(self.delete_status))
        }
    }

    fn parse(args: &[&str]) -> Args {
        Args::parse_from(normalize_args(args.iter().copied()))
    }

    #[test]
    fn test_normalize_go_style_flags() {
        let args = normalize_args(["tweet", "-text", "hello", "-delete=99", "-verbose"]);
        assert_eq!(args, ["tweet", "--text", "hello", "--delete=99", "--verbose"]);
    }

    #[test]
    fn test_normalize_leaves_values_alone() {
        let args = normalize_args(["tweet", "--text", "-delete", "-t", "-config"]);
        assert_eq!(args, ["tweet", "--text", "-delete", "-t", "-config"]);

        let args = normalize_args(["tweet", "-v", "--", "-text"]);
        assert_eq!(args, ["tweet", "-v", "--", "-text"]);
    }

    #[test]
    fn test_parse_both_spellings() {
        let args = parse(&["tweet", "-text", "hello"]);
        assert_eq!(args.text, "hello");

        let args = parse(&["tweet", "--delete", "99", "-t", "hi"]);
        assert_eq!(args.delete, "99");
        assert_eq!(args.text, "hi");
    }

    #[test]
    fn test_values_may_start_with_a_dash() {
        let args = parse(&["tweet", "-text", "-5 degrees today"]);
        assert_eq!(args.text, "-5 degrees today");

        let args = parse(&["tweet", "-delete", "-1"]);
        assert_eq!(args.delete, "-1");

        let args = parse(&["tweet", "-t", "-verbose", "-v"]);
        assert_eq!(args.text, "-verbose");
        assert!(args.verbose);
    }

    #[test]
    fn test_self_clean_defaults_to_two_seconds() {
        let args = parse(&["tweet", "-text", "hi", "-self-clean"]);
        assert_eq!(args.self_clean, Some(2));

        let args = parse(&["tweet", "--text", "hi", "--self-clean=0"]);
        assert_eq!(args.self_clean, Some(0));

        let args = parse(&["tweet", "--text", "hi"]);
        assert_eq!(args.self_clean, None);
    }

    #[test]
    fn test_action_priority() {
        let args = parse(&["tweet", "-delete", "99", "-text", "hello"]);
        assert_eq!(args.action(), Action::Delete("99".to_string()));

        let args = parse(&["tweet", "-text", "", "-delete", ""]);
        assert_eq!(args.action(), Action::Usage);

        let args = parse(&["tweet"]);
        assert_eq!(args.action(), Action::Usage);

        let args = parse(&["tweet", "-text", "hello"]);
        assert_eq!(
            args.action(),
            Action::Post {
                text: "hello".to_string(),
                self_clean: None
            }
        );
    }

    #[tokio::test]
    async fn test_delete_takes_precedence_over_post() {
        let api = MockApi::with_delete_status(200);
        let args = parse(&["tweet", "-delete", "99", "-text", "hello"]);

        let completion = dispatch(args.action(), || Ok(&api)).await.unwrap();

        assert_eq!(completion, Completion::Deleted(Outcome::Success));
        assert_eq!(api.calls(), ["delete 99"]);
    }

    #[tokio::test]
    async fn test_usage_makes_no_call_and_loads_no_credentials() {
        let args = parse(&["tweet", "-text", "", "-delete", ""]);

        let completion = dispatch(args.action(), || {
            Err::<MockApi, TweetError>(
                ConfigError::MissingField {
                    field: "API_KEY".to_string(),
                }
                .into(),
            )
        })
        .await
        .unwrap();

        assert_eq!(completion, Completion::Usage);
        assert_eq!(completion.exit_code(), 0);
    }

    #[tokio::test]
    async fn test_post_returns_id() {
        let api = MockApi::default();
        let completion = dispatch(
            Action::Post {
                text: "hello".to_string(),
                self_clean: None,
            },
            || Ok(&api),
        )
        .await
        .unwrap();

        assert_eq!(
            completion,
            Completion::Posted {
                id: "12345".to_string(),
                cleanup: None
            }
        );
        assert_eq!(completion.exit_code(), 0);
        assert_eq!(api.calls(), ["create hello"]);
    }

    #[tokio::test]
    async fn test_post_error_is_propagated() {
        let api = MockApi::default();
        let err = dispatch(
            Action::Post {
                text: "fail".to_string(),
                self_clean: Some(Duration::ZERO),
            },
            || Ok(&api),
        )
        .await
        .unwrap_err();

        assert!(matches!(
            err,
            TweetError::ApiError(ApiError::UnexpectedStatus { status: 403, .. })
        ));
        assert_eq!(api.calls(), ["create fail"]);
    }

    #[tokio::test]
    async fn test_self_clean_deletes_created_tweet() {
        let api = MockApi::with_delete_status(200);
        let completion = dispatch(
            Action::Post {
                text: "temporary".to_string(),
                self_clean: Some(Duration::ZERO),
            },
            || Ok(&api),
        )
        .await
        .unwrap();

        assert_eq!(
            completion,
            Completion::Posted {
                id: "12345".to_string(),
                cleanup: Some(Outcome::Success)
            }
        );
        assert_eq!(api.calls(), ["create temporary", "delete 12345"]);
    }

    #[tokio::test]
    async fn test_failed_delete_sets_exit_code() {
        for (status, code) in [(200, 0), (401, 1), (404, 1), (429, 1), (503, 1)] {
            let api = MockApi::with_delete_status(status);
            let completion = dispatch(Action::Delete("1".to_string()), || Ok(&api))
                .await
                .unwrap();
            assert_eq!(completion.exit_code(), code, "status {status}");
        }
    }

    #[tokio::test]
    async fn test_connect_failure_is_reported() {
        let err = dispatch(Action::Delete("1".to_string()), || {
            Err::<MockApi, TweetError>(ConfigError::HomeDirNotFound.into())
        })
        .await
        .unwrap_err();

        assert!(matches!(err, TweetError::ConfigError(_)));
    }
}
