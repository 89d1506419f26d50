//! askbox CLI: terminal chat client for a question-answering service

use askbox_engine::{exchange, ClientConfig, ConfigError, Conversation, HttpAnswerService};
use askbox_tui::Theme;
use clap::{Parser, Subcommand};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Chat with a question-answering service from the terminal
#[derive(Parser)]
#[command(name = "askbox")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Base address of the answer service
    #[arg(long, global = true, env = "ASKBOX_API_BASE")]
    api_base: Option<String>,

    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log file for the TUI (default: askbox.log in the temp directory)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the chat TUI (default when no command specified)
    Tui,

    /// Ask one question and print the answer
    Ask {
        /// Question text; multiple words are joined with spaces
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },

    /// Upload a .txt document to the service's knowledge base
    Upload {
        /// File to upload
        file: PathBuf,
    },

    /// Print the effective configuration
    Config {
        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Write the effective configuration to a file instead of printing it
        #[arg(long, value_name = "PATH")]
        init: Option<PathBuf>,
    },
}

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CliResult<ExitCode> {
    let config = resolve_config(cli.config.as_deref(), cli.api_base.as_deref())?;

    match cli.command {
        None | Some(Commands::Tui) => {
            let log_file = cli
                .log_file
                .unwrap_or_else(|| std::env::temp_dir().join("askbox.log"));
            init_file_logging(&log_file, cli.verbose)?;
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(askbox_tui::run_tui(&config, theme_from_env()))?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Ask { query }) => {
            init_stderr_logging(cli.verbose);
            cmd_ask(&config, &query.join(" "))
        }
        Some(Commands::Upload { file }) => {
            init_stderr_logging(cli.verbose);
            cmd_upload(&config, &file)?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Config { json, init }) => {
            match init {
                Some(path) => cmd_config_init(&config, &path)?,
                None => cmd_config(&config, json)?,
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Resolve configuration: defaults, then the config file, then flag/env.
fn resolve_config(path: Option<&Path>, api_base: Option<&str>) -> Result<ClientConfig, ConfigError> {
    let config = match path {
        Some(path) => ClientConfig::load(path)?,
        None => ClientConfig::default(),
    };
    match api_base {
        Some(base) => config.with_api_base(base),
        None => Ok(config),
    }
}

/// Pick the palette. `NO_COLOR` asks for plain terminal colors.
fn theme_from_env() -> Theme {
    if std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()) {
        Theme::high_contrast()
    } else {
        Theme::midnight()
    }
}

fn env_filter(verbose: bool, quiet_default: &str) -> EnvFilter {
    let default_filter = if verbose { "askbox=debug" } else { quiet_default };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
}

/// Log to a file so output never lands on the alternate screen.
fn init_file_logging(path: &Path, verbose: bool) -> CliResult<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::registry()
        .with(env_filter(verbose, "askbox=info"))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();

    tracing::debug!(path = %path.display(), "File logging enabled");
    Ok(())
}

fn init_stderr_logging(verbose: bool) {
    tracing_subscriber::registry()
        .with(env_filter(verbose, "askbox=warn"))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_writer(std::io::stderr),
        )
        .init();

    if verbose {
        tracing::info!("Debug logging enabled");
    }
}

fn cmd_ask(config: &ClientConfig, query: &str) -> CliResult<ExitCode> {
    let service = HttpAnswerService::new(config)?;
    let mut conversation = Conversation::new();
    conversation.update_draft(query);

    let runtime = tokio::runtime::Runtime::new()?;
    let Some(report) = runtime.block_on(exchange(&mut conversation, &service)) else {
        return Err("query is empty".into());
    };

    println!("{}", report.reply.text());
    Ok(if report.failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn cmd_upload(config: &ClientConfig, file: &Path) -> CliResult<()> {
    let service = HttpAnswerService::new(config)?;
    let runtime = tokio::runtime::Runtime::new()?;
    let message = runtime.block_on(service.upload(file))?;
    println!("{message}");
    Ok(())
}

fn cmd_config(config: &ClientConfig, json: bool) -> CliResult<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(config)?);
        return Ok(());
    }

    println!("askbox Configuration\n");
    println!("  API base:    {}", config.api_base);
    println!("  Ask URL:     {}", config.ask_url());
    println!("  Upload URL:  {}", config.upload_url());
    println!("  Timeout:     {}s", config.timeout_seconds);
    println!("  Assistant:   {}", config.assistant_name);
    Ok(())
}

/// Save the effective configuration so later runs can pass `--config`.
fn cmd_config_init(config: &ClientConfig, path: &Path) -> CliResult<()> {
    if path.exists() {
        return Err(format!("Config already exists at {}", path.display()).into());
    }
    config.save(path)?;
    println!("Wrote configuration to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use tempfile::TempDir;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_means_tui() {
        let cli = Cli::try_parse_from(["askbox"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_ask_joins_words() {
        let cli = Cli::try_parse_from(["askbox", "ask", "what", "is", "rust?"]).unwrap();
        match cli.command {
            Some(Commands::Ask { query }) => assert_eq!(query.join(" "), "what is rust?"),
            _ => panic!("expected ask"),
        }
    }

    #[test]
    fn test_ask_requires_query() {
        assert!(Cli::try_parse_from(["askbox", "ask"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "askbox",
            "config",
            "--json",
            "--api-base",
            "http://example.test:8080",
            "-v",
        ])
        .unwrap();
        assert_eq!(cli.api_base.as_deref(), Some("http://example.test:8080"));
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                json: true,
                init: None
            })
        ));
    }

    #[test]
    fn test_resolve_config_defaults() {
        let config = resolve_config(None, None).unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_flag_overrides_config_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("askbox.json");
        std::fs::write(
            &path,
            r#"{"api_base": "http://from-file:5000", "assistant_name": "Helper"}"#,
        )
        .unwrap();

        let from_file = resolve_config(Some(&path), None).unwrap();
        assert_eq!(from_file.api_base, "http://from-file:5000");
        assert_eq!(from_file.assistant_name, "Helper");

        let overridden = resolve_config(Some(&path), Some("http://from-flag:9000")).unwrap();
        assert_eq!(overridden.api_base, "http://from-flag:9000");
        assert_eq!(overridden.assistant_name, "Helper");
    }

    #[test]
    fn test_config_init_writes_loadable_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("askbox.json");

        let config = resolve_config(None, Some("http://from-flag:9000")).unwrap();
        cmd_config_init(&config, &path).unwrap();

        let loaded = resolve_config(Some(&path), None).unwrap();
        assert_eq!(loaded, config);

        // never overwrites an existing file
        assert!(cmd_config_init(&ClientConfig::default(), &path).is_err());
        assert_eq!(resolve_config(Some(&path), None).unwrap(), config);
    }

    #[test]
    fn test_invalid_api_base_is_rejected() {
        let err = resolve_config(None, Some("not a url")).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBaseUrl(_)));
    }
}
