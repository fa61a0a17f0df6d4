// crates/booking-cli/src/main.rs
// ============================================================================
// Module: Booking CLI Entry Point
// Description: Command dispatcher for app key checks and directory previews.
// Purpose: Provide a safe CLI over the app key registry and org directory.
// Dependencies: clap, booking-app-keys, booking-config, booking-directory, serde_json, thiserror.
// ============================================================================

//! ## Overview
//! The booking CLI loads `booking.toml`, builds the app key registry, and
//! answers "is this app configured?" for stored keys read from a file or
//! stdin. It also previews the organization directory for a request host.
//! Security posture: inputs are untrusted and size-limited; stored keys are
//! never echoed or written to the audit log.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use booking_app_keys::AppKeysChecker;
use booking_app_keys::AppSlug;
use booking_app_keys::KeysCheckAuditEvent;
use booking_app_keys::RegistryAuditEvent;
use booking_app_keys::SchemaRegistry;
use booking_cli::input::read_json_input;
use booking_cli::report::AppListEntry;
use booking_cli::report::DirectoryReport;
use booking_cli::report::KeysCheckReport;
use booking_cli::report::app_listing;
use booking_config::BookingConfig;
use booking_config::CONFIG_ENV_VAR;
use booking_config::DEFAULT_CONFIG_NAME;
use booking_config::build_registry;
use booking_config::config_toml_example;
use booking_directory::DomainSettings;
use booking_directory::OrganizationRecord;
use booking_directory::build_directory_page;
use booking_directory::resolve_org_domain;
use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "booking", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// App key requirement utilities.
    Apps {
        /// Selected apps subcommand.
        #[command(subcommand)]
        command: AppsCommand,
    },
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
    /// Organization directory utilities.
    Directory {
        /// Selected directory subcommand.
        #[command(subcommand)]
        command: DirectoryCommand,
    },
}

/// App key subcommands.
#[derive(Subcommand, Debug)]
enum AppsCommand {
    /// Check whether stored keys satisfy an app's key schema.
    Check(AppsCheckCommand),
    /// List configured apps and whether each declares keys.
    List(ConfigPathArgs),
}

/// Arguments for `apps check`.
#[derive(Args, Debug)]
struct AppsCheckCommand {
    /// App slug to check.
    #[arg(long, value_name = "SLUG")]
    app: String,
    /// Stored keys JSON file (`-` for stdin); omit when no keys are stored.
    #[arg(long, value_name = "FILE")]
    keys: Option<String>,
    /// Config file path.
    #[command(flatten)]
    config: ConfigPathArgs,
}

/// Shared `--config` argument.
#[derive(Args, Debug)]
struct ConfigPathArgs {
    /// Path to booking.toml (defaults to `BOOKING_CONFIG`, then ./booking.toml).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Configuration subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate a config file and its key schemas.
    Validate(ConfigPathArgs),
    /// Print the canonical example config.
    Example,
}

/// Directory subcommands.
#[derive(Subcommand, Debug)]
enum DirectoryCommand {
    /// Build and print the directory page for an organization.
    Show(DirectoryShowCommand),
}

/// Arguments for `directory show`.
#[derive(Args, Debug)]
struct DirectoryShowCommand {
    /// Organization record JSON file (`-` for stdin).
    #[arg(long, value_name = "FILE")]
    org: String,
    /// Request host header value.
    #[arg(long, value_name = "HOST")]
    host: Option<String>,
    /// Route `orgSlug` parameter used when the host is not an org subdomain.
    #[arg(long, value_name = "SLUG")]
    org_slug: Option<String>,
    /// Member search query.
    #[arg(long, value_name = "QUERY", default_value = "")]
    query: String,
    /// Config file path.
    #[command(flatten)]
    config: ConfigPathArgs,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for user-facing error messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Parses arguments and dispatches the selected command.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&format!("booking {version}"))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    match command {
        Commands::Apps {
            command,
        } => command_apps(command),
        Commands::Config {
            command,
        } => command_config(command),
        Commands::Directory {
            command,
        } => command_directory(command),
    }
}

/// Prints top-level help.
fn show_help() -> CliResult<()> {
    let mut command = Cli::command();
    command.print_help().map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line("").map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(())
}

// ============================================================================
// SECTION: App Key Commands
// ============================================================================

/// Dispatches app key subcommands.
fn command_apps(command: AppsCommand) -> CliResult<ExitCode> {
    match command {
        AppsCommand::Check(command) => command_apps_check(&command),
        AppsCommand::List(command) => command_apps_list(&command),
    }
}

/// Executes the app key check command.
fn command_apps_check(command: &AppsCheckCommand) -> CliResult<ExitCode> {
    let config = load_config(command.config.config.as_deref())?;
    let registry = load_registry(&config)?;
    let keys: Option<Value> = command
        .keys
        .as_deref()
        .map(read_json_input::<Value>)
        .transpose()
        .map_err(|err| CliError::new(format!("keys input failed: {err}")))?;

    let sink = config
        .audit
        .open_sink()
        .map_err(|err| CliError::new(format!("audit sink failed: {err}")))?;
    sink.record_registry(&RegistryAuditEvent::new(registry.len(), "config"));

    let checker = AppKeysChecker::new(Arc::new(registry));
    let outcome = checker.check(&command.app, keys.as_ref());
    sink.record_check(&KeysCheckAuditEvent::new(AppSlug::new(command.app.as_str()), &outcome));

    let report = KeysCheckReport::new(&command.app, &outcome);
    write_json(&report)?;
    Ok(if report.configured { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

/// Executes the app listing command.
fn command_apps_list(command: &ConfigPathArgs) -> CliResult<ExitCode> {
    let config = load_config(command.config.as_deref())?;
    let registry = load_registry(&config)?;
    let entries: Vec<AppListEntry> =
        app_listing(config.apps.iter().map(|app| app.slug.as_str()), &registry);
    write_json(&entries)?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Config Commands
// ============================================================================

/// Dispatches config subcommands.
fn command_config(command: ConfigCommand) -> CliResult<ExitCode> {
    match command {
        ConfigCommand::Validate(command) => command_config_validate(&command),
        ConfigCommand::Example => {
            write_stdout_bytes(config_toml_example().as_bytes())
                .map_err(|err| CliError::new(output_error("stdout", &err)))?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Executes the config validation command.
fn command_config_validate(command: &ConfigPathArgs) -> CliResult<ExitCode> {
    let config = load_config(command.config.as_deref())?;
    let registry = load_registry(&config)?;
    write_stdout_line(&format!(
        "config ok: {} apps, {} with key schemas",
        config.apps.len(),
        registry.len()
    ))
    .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Directory Commands
// ============================================================================

/// Dispatches directory subcommands.
fn command_directory(command: DirectoryCommand) -> CliResult<ExitCode> {
    match command {
        DirectoryCommand::Show(command) => command_directory_show(&command),
    }
}

/// Executes the directory preview command.
fn command_directory_show(command: &DirectoryShowCommand) -> CliResult<ExitCode> {
    let settings = if config_available(command.config.config.as_deref()) {
        load_config(command.config.config.as_deref())?.directory.domain_settings()
    } else {
        DomainSettings::default()
    };
    let org: Option<OrganizationRecord> = read_json_input(&command.org)
        .map_err(|err| CliError::new(format!("organization input failed: {err}")))?;
    let domain = resolve_org_domain(command.host.as_deref(), command.org_slug.as_deref(), &settings);
    let page = build_directory_page(org, domain, &settings)
        .map_err(|err| CliError::new(format!("directory unavailable ({}): {err}", err.code())))?;
    write_json(&DirectoryReport::new(&page, &command.query))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Config Helpers
// ============================================================================

/// Loads and validates the config file.
fn load_config(path: Option<&Path>) -> CliResult<BookingConfig> {
    BookingConfig::load(path).map_err(|err| CliError::new(format!("config load failed: {err}")))
}

/// Returns true when a config file was named or exists at the default path.
fn config_available(path: Option<&Path>) -> bool {
    path.is_some()
        || std::env::var_os(CONFIG_ENV_VAR).is_some()
        || Path::new(DEFAULT_CONFIG_NAME).exists()
}

/// Builds the app key registry declared by the config.
fn load_registry(config: &BookingConfig) -> CliResult<SchemaRegistry> {
    build_registry(config).map_err(|err| {
        CliError::new(format!("key schema registry failed ({}): {err}", err.code()))
    })
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a value as pretty JSON followed by a newline.
fn write_json<T: Serialize>(value: &T) -> CliResult<()> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|err| CliError::new(format!("json serialization failed: {err}")))?;
    write_stdout_line(&rendered).map_err(|err| CliError::new(output_error("stdout", &err)))
}

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes raw bytes to stdout without adding a newline.
fn write_stdout_bytes(bytes: &[u8]) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    stdout.write_all(bytes)
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats an output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    format!("failed to write {stream}: {error}")
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
