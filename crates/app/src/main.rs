use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{AgentConfig, AppServices, Clock};
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

const DEFAULT_DB_URL: &str = "sqlite://lingua.sqlite3";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    UnknownCommand(String),
    InvalidDbUrl { raw: String },
    InvalidAgentUrl { raw: String },
    InvalidAgent { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::UnknownCommand(cmd) => write!(f, "unknown subcommand: {cmd}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidAgentUrl { raw } => write!(f, "invalid --agent-url value: {raw}"),
            ArgsError::InvalidAgent { raw } => write!(f, "invalid --agent value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  app [ui] [--db <sqlite_url>] [--agent-url <url>] [--agent <assistant_id>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db {DEFAULT_DB_URL}");
    eprintln!("  --agent-url {}", services::agent::DEFAULT_AGENT_URL);
    eprintln!("  --agent {}", lingua_core::model::DEFAULT_AGENT_ID);
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  LINGUA_DB_URL, LINGUA_AGENT_URL, LINGUA_AGENT_ID, RUST_LOG");
}

#[derive(Debug)]
enum Parsed {
    Run(Args),
    Help,
}

#[derive(Debug)]
struct Args {
    db_url: String,
    agent: AgentConfig,
}

impl Args {
    fn parse(argv: Vec<String>) -> Result<Parsed, ArgsError> {
        let mut iter = argv.into_iter().peekable();
        match iter.peek().map(String::as_str) {
            Some("ui") => {
                iter.next();
            }
            Some(first) if !first.starts_with('-') => {
                return Err(ArgsError::UnknownCommand(first.to_string()));
            }
            _ => {}
        }

        let mut db_url = std::env::var("LINGUA_DB_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map_or_else(|| normalize_sqlite_url(DEFAULT_DB_URL.into()), normalize_sqlite_url);
        let mut agent = AgentConfig::from_env();

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut iter, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--agent-url" => {
                    let value = require_value(&mut iter, "--agent-url")?;
                    if !(value.starts_with("http://") || value.starts_with("https://")) {
                        return Err(ArgsError::InvalidAgentUrl { raw: value });
                    }
                    agent.base_url = value;
                }
                "--agent" => {
                    let value = require_value(&mut iter, "--agent")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidAgent { raw: value });
                    }
                    agent.assistant_id = value.trim().to_string();
                }
                "--help" | "-h" => return Ok(Parsed::Help),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Parsed::Run(Self { db_url, agent }))
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || is_absolute_url(&raw) {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite://")
        .or_else(|| trimmed.strip_prefix("sqlite:"))
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn is_absolute_url(url: &str) -> bool {
    url.strip_prefix("sqlite://")
        .is_some_and(|path| std::path::Path::new(path).is_absolute())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    let args = match Args::parse(argv) {
        Ok(Parsed::Run(args)) => args,
        Ok(Parsed::Help) => {
            print_usage();
            return Ok(());
        }
        Err(err) => {
            print_usage();
            return Err(err.into());
        }
    };

    init_tracing();
    prepare_sqlite_file(&args.db_url)?;

    // Storage lives on this runtime; the desktop launcher brings its own for the UI.
    let runtime = tokio::runtime::Runtime::new()?;
    let services = runtime.block_on(AppServices::new_sqlite(
        &args.db_url,
        Clock::system(),
        &args.agent,
    ))?;
    tracing::info!(
        db = %args.db_url,
        agent_url = %args.agent.base_url,
        "starting desktop app"
    );

    let app: Arc<dyn UiApp> = Arc::new(services);
    let context = build_app_context(&app);

    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Lingua")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);

    drop(runtime);
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
