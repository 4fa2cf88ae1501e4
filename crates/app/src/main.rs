mod console;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use quiz_core::model::QuizSettings;
use services::{MovieQuestionFactory, MoviesLoader, MoviesLoaderConfig, QuestionSource};
use storage::Storage;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use ui::{AlertChannel, QuizPresenter, RenderTarget};

use crate::console::{ConsoleAlertChannel, ConsoleRenderTarget, ConsoleState};

const DEFAULT_DB_URL: &str = "sqlite://movie_quiz.sqlite3";
const IN_MEMORY_DB_URL: &str = "sqlite::memory:";
const DEFAULT_LOG_FILTER: &str = "movie_quiz=info,ui=info,services=info,storage=info";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidNumber { flag: &'static str, raw: String },
    MissingApiKey,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidNumber { flag, raw } => write!(f, "invalid {flag} value: {raw}"),
            ArgsError::MissingApiKey => {
                write!(f, "an API key is required (--api-key or MOVIE_QUIZ_API_KEY)")
            }
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

fn parse_number<T: std::str::FromStr>(raw: String, flag: &'static str) -> Result<T, ArgsError> {
    raw.trim()
        .parse()
        .map_err(|_| ArgsError::InvalidNumber { flag, raw })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!(
        "  movie-quiz [--db <sqlite_url>] [--api-key <key>] [--questions <n>] [--delay-ms <ms>]"
    );
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db {DEFAULT_DB_URL}   (use {IN_MEMORY_DB_URL} to keep nothing)");
    eprintln!("  --questions {}", QuizSettings::DEFAULT_TOTAL_QUESTIONS);
    eprintln!(
        "  --delay-ms {}",
        QuizSettings::DEFAULT_PACING_DELAY.as_millis()
    );
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  MOVIE_QUIZ_DB_URL, MOVIE_QUIZ_API_KEY, MOVIE_QUIZ_BASE_URL, RUST_LOG");
}

#[derive(Debug)]
struct Args {
    db_url: String,
    api_key: Option<String>,
    total_questions: u32,
    pacing_delay: Duration,
}

impl Args {
    fn parse(
        args: &mut impl Iterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Option<Self>, ArgsError> {
        let mut db_url = env("MOVIE_QUIZ_DB_URL")
            .map_or_else(|| DEFAULT_DB_URL.into(), normalize_sqlite_url);
        let mut api_key = None;
        let mut total_questions = QuizSettings::DEFAULT_TOTAL_QUESTIONS;
        let mut pacing_delay = QuizSettings::DEFAULT_PACING_DELAY;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--api-key" => {
                    api_key = Some(require_value(args, "--api-key")?);
                }
                "--questions" => {
                    let value = require_value(args, "--questions")?;
                    total_questions = parse_number(value, "--questions")?;
                }
                "--delay-ms" => {
                    let value = require_value(args, "--delay-ms")?;
                    pacing_delay = Duration::from_millis(parse_number(value, "--delay-ms")?);
                }
                "--help" | "-h" => return Ok(None),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Some(Self {
            db_url,
            api_key,
            total_questions,
            pacing_delay,
        }))
    }

    fn loader_config(
        &self,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<MoviesLoaderConfig, ArgsError> {
        let api_key = self
            .api_key
            .clone()
            .or_else(|| env("MOVIE_QUIZ_API_KEY"))
            .filter(|key| !key.trim().is_empty())
            .ok_or(ArgsError::MissingApiKey)?;

        let config = MoviesLoaderConfig::new(api_key);
        Ok(match env("MOVIE_QUIZ_BASE_URL") {
            Some(base_url) => config.with_base_url(base_url),
            None => config,
        })
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == IN_MEMORY_DB_URL || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
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

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == IN_MEMORY_DB_URL {
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

async fn open_storage(db_url: &str) -> Result<Storage, Box<dyn std::error::Error>> {
    if db_url == IN_MEMORY_DB_URL {
        tracing::info!("keeping statistics in memory");
        return Ok(Storage::in_memory());
    }

    prepare_sqlite_file(db_url)?;
    let storage = Storage::sqlite(db_url).await?;
    tracing::info!(url = db_url, "statistics database ready");
    Ok(storage)
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let env = |key: &str| std::env::var(key).ok();
    let mut argv = std::env::args().skip(1);

    let parsed = match Args::parse(&mut argv, env) {
        Ok(Some(parsed)) => parsed,
        Ok(None) => {
            print_usage();
            return Ok(());
        }
        Err(e) => {
            eprintln!("{e}");
            print_usage();
            return Err(e.into());
        }
    };

    let settings = QuizSettings::new(parsed.total_questions, parsed.pacing_delay)?;
    let loader_config = parsed.loader_config(env)?;

    // Storage is opened in the binary so the library crates never touch the filesystem.
    let storage = open_storage(&parsed.db_url).await?;

    let questions: Arc<dyn QuestionSource> =
        Arc::new(MovieQuestionFactory::new(MoviesLoader::new(loader_config)));
    let console = Arc::new(ConsoleState::new());
    let view: Arc<dyn RenderTarget> = Arc::new(ConsoleRenderTarget::new(Arc::clone(&console)));
    let alerts: Arc<dyn AlertChannel> = Arc::new(ConsoleAlertChannel::new(Arc::clone(&console)));

    let session = QuizPresenter::new(questions, Arc::clone(&storage.statistics), view, alerts)
        .with_settings(settings)
        .spawn();
    tracing::info!(
        questions = settings.total_questions(),
        delay_ms = settings.pacing_delay().as_millis(),
        "quiz started"
    );

    let input = console::run_input_loop(console, session.handle()).await;
    session.shutdown().await;
    input?;
    Ok(())
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
