// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::too_many_arguments)]
// Add other lints specific to this module that you want to allow but not auto-fix

use anyhow::{Result, anyhow, Context};
use log::{warn, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::{Path, PathBuf};
use std::io::Write;
use std::fs::File;
use std::io::BufReader;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use crate::app_config::Config;
use crate::formatting::{PageFormat, PagePreset};
use app_controller::Controller;

mod app_config;
mod app_controller;
mod errors;
mod file_utils;
mod formatting;
mod script_analysis;
mod script_document;

/// CLI Wrapper for PagePreset to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliPagePreset {
    Letter,
    A4,
}

impl From<CliPagePreset> for PagePreset {
    fn from(cli_preset: CliPagePreset) -> Self {
        match cli_preset {
            CliPagePreset::Letter => PagePreset::UsLetter,
            CliPagePreset::A4 => PagePreset::A4,
        }
    }
}

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

#[derive(Subcommand, Debug)]
enum Commands {
    /// Format screenplay text with typed elements and margins (default command)
    #[command(alias = "fmt")]
    Format(FormatArgs),

    /// Print statistics for a script or saved document
    Stats(StatsArgs),

    /// Generate shell completions for screenwright
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct FormatArgs {
    /// Input script file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Directory for output files (defaults to the input's directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Page size preset to use
    #[arg(short, long, value_enum)]
    page_size: Option<CliPagePreset>,

    /// Lines of rendered output per page
    #[arg(long)]
    lines_per_page: Option<u32>,

    /// Time of day appended to scene headings that lack one (e.g. 'day', 'night')
    #[arg(short, long)]
    time_of_day: Option<String>,

    /// Report structural issues without repairing them
    #[arg(long)]
    no_repair: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Parser, Debug)]
struct StatsArgs {
    /// Input script file or saved document to analyze
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// Screenwright - screenplay formatting from plain text
///
/// A screenplay formatting tool that classifies raw script lines into typed
/// elements and renders them with industry standard margins.
#[derive(Parser, Debug)]
#[command(name = "screenwright")]
#[command(author = "Screenwright Team")]
#[command(version = "1.0.0")]
#[command(about = "Screenplay classification and formatting tool")]
#[command(long_about = "Screenwright classifies plain screenplay text into typed elements and
renders them with industry standard margins and pagination.

EXAMPLES:
    screenwright script.txt                    # Format using default config
    screenwright -f script.txt                 # Force overwrite existing output
    screenwright -p a4 script.txt              # Use A4 page geometry
    screenwright --lines-per-page 58 script.txt  # Override page capacity
    screenwright -t night script.txt           # Default headings to NIGHT
    screenwright stats script.txt              # Print script statistics
    screenwright -l debug /scripts/            # Process a directory with debug logging
    screenwright completions bash > screenwright.bash  # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default
    one will be created automatically.

OUTPUT:
    Formatting writes two files next to the input (or into --output-dir):
    <name>.formatted.txt with the rendered layout, and <name>.formatted.json
    holding the typed document.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input script file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Directory for output files (defaults to the input's directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Page size preset to use
    #[arg(short, long, value_enum)]
    page_size: Option<CliPagePreset>,

    /// Lines of rendered output per page
    #[arg(long)]
    lines_per_page: Option<u32>,

    /// Time of day appended to scene headings that lack one (e.g. 'day', 'night')
    #[arg(short, long)]
    time_of_day: Option<String>,

    /// Report structural issues without repairing them
    #[arg(long)]
    no_repair: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
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
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");

            let mut stderr = std::io::stderr();
            let emoji = Self::get_emoji_for_level(record.level());
            let _ = match record.level() {
                Level::Error => writeln!(
                    stderr,
                    "\x1B[1;31m{} {} {}\x1B[0m",
                    now, emoji, record.args()
                ),
                Level::Warn => writeln!(
                    stderr,
                    "\x1B[1;33m{} {} {}\x1B[0m",
                    now, emoji, record.args()
                ),
                Level::Info => writeln!(
                    stderr,
                    "\x1B[1;32m{} {} {}\x1B[0m",
                    now, emoji, record.args()
                ),
                Level::Debug => writeln!(
                    stderr,
                    "\x1B[1;36m{} {} {}\x1B[0m",
                    now, emoji, record.args()
                ),
                Level::Trace => writeln!(
                    stderr,
                    "\x1B[1;35m{} {} {}\x1B[0m",
                    now, emoji, record.args()
                ),
            };
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    // Handle subcommands
    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "screenwright", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Format(args)) => {
            // Use the explicit format subcommand args
            run_format(args)
        }
        Some(Commands::Stats(args)) => run_stats(args),
        None => {
            // Default behavior - use top-level args for backwards compatibility
            let input_path = cli.input_path.ok_or_else(|| {
                anyhow!("INPUT_PATH is required when no subcommand is specified")
            })?;

            let format_args = FormatArgs {
                input_path,
                force_overwrite: cli.force_overwrite,
                output_dir: cli.output_dir,
                page_size: cli.page_size,
                lines_per_page: cli.lines_per_page,
                time_of_day: cli.time_of_day,
                no_repair: cli.no_repair,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            run_format(format_args)
        }
    }
}

// Map a config log level onto the log crate's filter
fn level_filter_for(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

// Read and parse one config file
fn read_config_file(path: &Path) -> Result<Config> {
    let file = File::open(path)
        .context(format!("Failed to open config file: {}", path.display()))?;

    let reader = BufReader::new(file);
    let config: Config = serde_json::from_reader(reader)
        .context(format!("Failed to parse config file: {}", path.display()))?;

    Ok(config)
}

// Load the configuration, creating a default config file when missing
fn load_or_create_config(config_path: &str, cmd_log_level: Option<&CliLogLevel>) -> Result<Config> {
    if Path::new(config_path).exists() {
        // Load existing configuration
        read_config_file(Path::new(config_path))
    } else {
        // Fall back to the per-user config before creating a default
        if let Ok(user_path) = Config::user_config_path() {
            if user_path.exists() {
                return read_config_file(&user_path);
            }
        }

        // Create default configuration if not exists
        warn!("Config file not found at '{}', creating default config.", config_path);

        let mut config = Config::default();

        // Apply command line log level to default config if specified
        if let Some(log_level) = cmd_log_level {
            config.log_level = log_level.clone().into();
        }

        // Save default config
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        Ok(config)
    }
}

fn run_format(options: FormatArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level_filter_for(&config_log_level));
    }

    // Load or create configuration
    let mut config = load_or_create_config(&options.config_path, options.log_level.as_ref())?;

    // Override config with CLI options if provided
    if let Some(preset) = &options.page_size {
        // Presets set the paper geometry, the line capacity stays as configured
        let lines_per_page = config.page_format.lines_per_page;
        config.page_format = PageFormat::from_preset(preset.clone().into());
        config.page_format.lines_per_page = lines_per_page;
    }

    if let Some(lines_per_page) = options.lines_per_page {
        config.page_format.lines_per_page = lines_per_page;
    }

    if let Some(time_of_day) = &options.time_of_day {
        config.formatting.default_time_of_day = time_of_day.to_uppercase();
    }

    if options.no_repair {
        config.formatting.auto_repair = false;
    }

    // Update log level in config if specified via command line
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    // Validate the configuration after loading and overriding
    config.validate()
        .context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        // Just update the max level without reinitializing the logger
        log::set_max_level(level_filter_for(&config.log_level));
    }

    // Create controller
    let controller = Controller::with_config(config)?;

    // Run the controller with the input file(s)
    if options.input_path.is_file() {
        // Process a single file
        let output_dir = match &options.output_dir {
            Some(dir) => dir.clone(),
            None => options.input_path.parent().unwrap_or(Path::new(".")).to_path_buf(),
        };
        controller.run(options.input_path.clone(), output_dir, options.force_overwrite)?;
    } else if options.input_path.is_dir() {
        // Process a directory
        controller.run_folder(options.input_path.clone(), options.force_overwrite)?;
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", options.input_path));
    }

    Ok(())
}

fn run_stats(options: StatsArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level_filter_for(&config_log_level));
    }

    // Load or create configuration
    let config = load_or_create_config(&options.config_path, options.log_level.as_ref())?;

    // Validate the configuration after loading
    config.validate()
        .context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        log::set_max_level(level_filter_for(&config.log_level));
    }

    // Create controller
    let controller = Controller::with_config(config)?;

    controller.stats(options.input_path)
}
