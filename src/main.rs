// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{debug, error, info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use serde_json::json;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use stj_validator::app_config::{self, Config};
use stj_validator::file_utils::FileManager;
use stj_validator::{AppError, Issue, ValidationError, ValidationMode, ValidationService};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

/// Output format for validation results
#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate STJ files or directories of `*.stj.json` files
    Validate(ValidateArgs),

    /// Generate shell completions for stj-validator
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// STJ files or directories to validate
    #[arg(value_name = "PATH", required = true)]
    paths: Vec<PathBuf>,

    /// Stop at the first error in each file
    #[arg(long)]
    fail_fast: bool,

    /// Skip semantic checks when the structure is already broken
    #[arg(long)]
    strict: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// stj-validator - Standard Transcription JSON validator
///
/// Checks STJ transcription documents for structural and semantic problems.
#[derive(Parser, Debug)]
#[command(name = "stj-validator")]
#[command(version)]
#[command(about = "Validate Standard Transcription JSON (STJ) documents")]
#[command(long_about = "stj-validator checks STJ documents for structural and semantic problems.

EXAMPLES:
    stj-validator validate talk.stj.json              # Validate a single file
    stj-validator validate transcripts/               # Validate every *.stj.json below a directory
    stj-validator validate --fail-fast a.stj.json     # Stop at the first error
    stj-validator validate --format json a.stj.json   # Machine-readable output
    stj-validator completions bash > stj.bash         # Generate bash completions

CONFIGURATION:
    Configuration is read from conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, defaults
    are used.

EXIT STATUS:
    0 when every file is valid, 1 otherwise.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
        }
    }

    // @returns: ANSI colour for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {} {}\x1B[0m",
                Self::get_color_for_level(record.level()),
                now,
                Self::get_emoji_for_level(record.level()),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Outcome of validating one file
struct FileOutcome {
    path: PathBuf,
    valid: bool,
    issues: Vec<Issue>,
    fatal: Option<String>,
}

fn main() -> ExitCode {
    // The level is tightened once the config is loaded
    if let Err(e) = CustomLogger::init(LevelFilter::Trace) {
        eprintln!("Failed to initialize logger: {}", e);
    }
    log::set_max_level(LevelFilter::Warn);

    let cli = CommandLineOptions::parse();

    let result = match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "stj-validator", &mut std::io::stdout());
            Ok(true)
        }
        Commands::Validate(args) => run_validate(args),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_validate(options: ValidateArgs) -> Result<bool> {
    if let Some(cmd_log_level) = &options.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let mut config = Config::load_or_default(&options.config_path)
        .context("Configuration validation failed")?;

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }
    log::set_max_level(config.log_level.to_level_filter());

    if options.fail_fast {
        config.validation.mode = ValidationMode::FailFast;
    }
    if options.strict {
        config.validation.permissive = false;
    }

    let service = ValidationService::with_config(config.validation.clone())
        .context("Failed to create validation service")?;

    let files = FileManager::collect_inputs(&options.paths)?;
    if files.is_empty() {
        warn!("No STJ files found in the given paths");
        return Ok(false);
    }
    info!("Validating {} file(s)", files.len());

    let outcomes: Vec<FileOutcome> = files
        .iter()
        .map(|path| validate_file(&service, path))
        .collect();

    match options.format {
        OutputFormat::Text => print_text(&outcomes),
        OutputFormat::Json => print_json(&outcomes)?,
    }

    Ok(outcomes.iter().all(|o| o.valid))
}

fn validate_file(service: &ValidationService, path: &Path) -> FileOutcome {
    debug!("Validating {:?}", path);

    let result = FileManager::read_json(path).and_then(|value| {
        service
            .validate_value(&value)
            .map_err(AppError::from)
    });

    match result {
        Ok(report) => {
            debug!("{:?}: {}", path, report.summary());
            FileOutcome {
                path: path.to_path_buf(),
                valid: report.is_valid(),
                issues: report.issues,
                fatal: None,
            }
        }
        Err(AppError::Validation(ValidationError::Failed(issue))) => FileOutcome {
            path: path.to_path_buf(),
            valid: false,
            issues: vec![issue],
            fatal: None,
        },
        Err(e) => FileOutcome {
            path: path.to_path_buf(),
            valid: false,
            issues: Vec::new(),
            fatal: Some(e.to_string()),
        },
    }
}

fn print_text(outcomes: &[FileOutcome]) {
    for outcome in outcomes {
        if outcomes.len() > 1 {
            println!("{}:", outcome.path.display());
        }

        if let Some(fatal) = &outcome.fatal {
            println!("Validation failed. {}", fatal);
        } else if outcome.issues.is_empty() {
            println!("Validation successful! No issues found.");
        } else {
            if outcome.valid {
                println!("Validation successful with warnings:");
            } else {
                println!("Validation failed. Found the following issues:");
            }
            for (i, issue) in outcome.issues.iter().enumerate() {
                println!("{}. [{}] {}", i + 1, issue.severity, issue);
            }
        }
    }
}

fn print_json(outcomes: &[FileOutcome]) -> Result<()> {
    let files: Vec<serde_json::Value> = outcomes
        .iter()
        .map(|o| {
            json!({
                "file": o.path.display().to_string(),
                "valid": o.valid,
                "error": o.fatal,
                "issues": o.issues,
            })
        })
        .collect();

    let output = serde_json::to_string_pretty(&json!({ "files": files }))
        .context("Failed to serialize validation results to JSON")?;
    println!("{}", output);
    Ok(())
}
