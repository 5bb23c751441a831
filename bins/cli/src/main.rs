//! CLI binary entrypoint.

mod commands;
mod error;
mod format;

use clap::{Parser, Subcommand, ValueEnum};
use cms_admin_adapters::TracingLogger;
use cms_admin_config::{ValidatedValidationConfig, load_validation_config_std_env};
use cms_admin_ports::{LogFields, LoggerPort};
use cms_admin_shared::{ErrorEnvelope, ErrorKind, ValidationError};
use commands::{
    run_component_create, run_component_update, run_config_show, run_role_create,
    run_role_delete, run_roles_delete, run_schema,
};
use error::{CliError, ExitCode, envelope_exit_code};
use format::{OutputArgs, OutputMode};
use serde::Serialize;
use serde_json::Value;
use std::future::Future;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Env var holding the tracing filter (falls back to `RUST_LOG`).
const LOG_ENV: &str = "CMS_LOG";
/// Env var selecting `json` log lines instead of the human format.
const LOG_FORMAT_ENV: &str = "CMS_LOG_FORMAT";

#[derive(Debug, Parser)]
#[command(
    name = "cmsv",
    version,
    about = "Validate CMS admin role and component payloads",
    long_about = None
)]
struct Cli {
    #[command(flatten)]
    output: OutputArgs,

    /// Validator config file (JSON/TOML). Env overrides still apply.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Role payload validation.
    Role {
        #[command(subcommand)]
        command: RoleCommands,
    },
    /// Component payload validation.
    Component {
        #[command(subcommand)]
        command: ComponentCommands,
    },
    /// Config-related commands.
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Print the JSON Schema of an accepted payload.
    Schema {
        #[arg(value_enum)]
        kind: SchemaKind,
    },
}

/// Payload kinds with a published JSON Schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum SchemaKind {
    /// `{name, description?}`.
    RoleCreate,
    /// `{ids}`.
    RolesDelete,
    /// `{component?, components?}`.
    Component,
}

#[derive(Debug, Subcommand)]
enum RoleCommands {
    /// Validate a role creation payload.
    Create {
        /// JSON payload file (`-` reads stdin).
        input: PathBuf,
    },
    /// Validate a single role id and check it may be deleted.
    Delete {
        /// JSON file holding the role id (`-` reads stdin).
        input: PathBuf,
        /// JSON role list answering deletability checks.
        #[arg(long)]
        roles: PathBuf,
    },
    /// Validate a bulk deletion payload `{ids}`.
    DeleteMany {
        /// JSON payload file (`-` reads stdin).
        input: PathBuf,
        /// JSON role list answering deletability checks.
        #[arg(long)]
        roles: PathBuf,
    },
}

#[derive(Debug, Subcommand)]
enum ComponentCommands {
    /// Validate a component creation payload.
    Create {
        /// JSON payload file (`-` reads stdin).
        input: PathBuf,
    },
    /// Validate a component update payload.
    Update {
        /// JSON payload file (`-` reads stdin).
        input: PathBuf,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigCommands {
    /// Print the effective validator config as JSON.
    Show,
}

#[derive(Debug)]
pub(crate) struct CliOutput {
    stdout: String,
    exit_code: ExitCode,
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    init_tracing();
    let mode = OutputMode::from_args(&cli.output);

    match run(&cli, mode) {
        Ok(output) => match write_output(&output) {
            Ok(()) => std::process::ExitCode::from(output.exit_code.as_u8()),
            Err(error) => exit_with_error(&error),
        },
        Err(error) => exit_with_error(&error),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let json = std::env::var(LOG_FORMAT_ENV)
        .is_ok_and(|value| value.eq_ignore_ascii_case("json"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);
    let _ = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}

fn exit_with_error(error: &CliError) -> std::process::ExitCode {
    let _ = writeln!(io::stderr(), "error: {error}");
    std::process::ExitCode::from(error.exit_code().as_u8())
}

fn run(cli: &Cli, mode: OutputMode) -> Result<CliOutput, CliError> {
    let config = cli.config.as_deref();
    let result = match &cli.command {
        Commands::Role { command } => match command {
            RoleCommands::Create { input } => run_role_create(mode, input),
            RoleCommands::Delete { input, roles } => run_role_delete(mode, config, input, roles),
            RoleCommands::DeleteMany { input, roles } => {
                run_roles_delete(mode, config, input, roles)
            },
        },
        Commands::Component { command } => match command {
            ComponentCommands::Create { input } => run_component_create(mode, config, input),
            ComponentCommands::Update { input } => run_component_update(mode, config, input),
        },
        Commands::Config { command } => match command {
            ConfigCommands::Show => run_config_show(config),
        },
        Commands::Schema { kind } => run_schema(*kind),
    };

    match result {
        Err(CliError::Envelope(error)) => format_error_output(mode, &error),
        other => other,
    }
}

/// Read a JSON payload from a file, or from stdin when the path is `-`.
pub(crate) fn read_payload(path: &Path) -> Result<Value, CliError> {
    let input = if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path).map_err(|error| {
            ErrorEnvelope::from(error).with_metadata("path", path.display().to_string())
        })?
    };

    serde_json::from_str(&input).map_err(|error| {
        CliError::InvalidInput(format!("{} is not valid JSON: {error}", path.display()))
    })
}

pub(crate) fn load_config(path: Option<&Path>) -> Result<ValidatedValidationConfig, CliError> {
    Ok(load_validation_config_std_env(path)?)
}

pub(crate) fn cli_logger() -> Arc<dyn LoggerPort> {
    let mut base = LogFields::new();
    base.insert("source".into(), Value::from("cmsv"));
    Arc::new(TracingLogger::new().with_base_fields(base))
}

/// Drive an async validator to completion on a current-thread runtime.
pub(crate) fn block_on<F: Future>(future: F) -> Result<F::Output, CliError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    Ok(runtime.block_on(future))
}

pub(crate) fn format_ok_output(
    mode: OutputMode,
    kind: &str,
    value: &impl Serialize,
) -> Result<CliOutput, CliError> {
    let stdout = if mode.is_json() {
        let payload = serde_json::json!({
            "status": "ok",
            "kind": kind,
            "value": value,
        });
        let mut out = serde_json::to_string_pretty(&payload)?;
        out.push('\n');
        out
    } else {
        format!(
            "status: ok\nkind: {kind}\nvalue: {}\n",
            serde_json::to_string(value)?
        )
    };

    Ok(CliOutput {
        stdout,
        exit_code: ExitCode::Ok,
    })
}

pub(crate) fn format_validation_output(
    mode: OutputMode,
    kind: &str,
    error: &ValidationError,
) -> Result<CliOutput, CliError> {
    let stdout = if mode.is_json() {
        let payload = serde_json::json!({
            "status": "error",
            "kind": kind,
            "message": error.to_string(),
            "errors": error.to_field_map(),
        });
        let mut out = serde_json::to_string_pretty(&payload)?;
        out.push('\n');
        out
    } else {
        let mut out = format!("status: error\nkind: {kind}\nerrors:\n");
        for issue in error.issues() {
            out.push_str("  ");
            out.push_str(&issue.to_string());
            out.push('\n');
        }
        out
    };

    Ok(CliOutput {
        stdout,
        exit_code: ExitCode::InvalidInput,
    })
}

fn format_error_output(mode: OutputMode, error: &ErrorEnvelope) -> Result<CliOutput, CliError> {
    let stdout = if mode.is_json() {
        let payload = serde_json::json!({
            "status": "error",
            "error": error,
        });
        let mut out = serde_json::to_string_pretty(&payload)?;
        out.push('\n');
        out
    } else {
        format_error_text(error)
    };

    Ok(CliOutput {
        stdout,
        exit_code: envelope_exit_code(error),
    })
}

fn format_error_text(error: &ErrorEnvelope) -> String {
    let mut out = String::new();
    out.push_str("status: error\n");
    out.push_str("code: ");
    out.push_str(&error.code.to_string());
    out.push('\n');
    out.push_str("message: ");
    out.push_str(&error.message);
    out.push('\n');
    out.push_str("kind: ");
    out.push_str(match error.kind {
        ErrorKind::Expected => "EXPECTED",
        ErrorKind::Invariant => "INVARIANT",
        ErrorKind::Unexpected => "UNEXPECTED",
    });
    out.push('\n');

    if !error.metadata.is_empty() {
        out.push_str("meta:\n");
        for (key, value) in &error.metadata {
            out.push_str("  ");
            out.push_str(key);
            out.push_str(": ");
            out.push_str(value);
            out.push('\n');
        }
    }
    out
}

fn write_output(output: &CliOutput) -> Result<(), CliError> {
    let mut stdout = io::stdout();
    stdout.write_all(output.stdout.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
