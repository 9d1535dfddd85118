// crates/oraplan-cli/src/main.rs
// ============================================================================
// Module: Oraplan CLI Entry Point
// Description: Command dispatcher for deployment planning workflows.
// Purpose: Provide a safe, offline CLI for plan, validate, and schema tasks.
// Dependencies: clap, oraplan-config, oraplan-core, oraplan-providers, serde
// ============================================================================

//! ## Overview
//! The Oraplan CLI resolves deployment requests into provisioning plans and
//! validates requests and option documents offline. All inputs are untrusted
//! files with hard size limits; nothing is provisioned from here.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Args;
use clap::Parser;
use clap::Subcommand;
use oraplan_config::ConfigError;
use oraplan_config::load_request;
use oraplan_config::request_schema;
use oraplan_config::request_toml_example;
use oraplan_core::DeploymentPlan;
use oraplan_core::DeploymentRequest;
use oraplan_core::FingerprintError;
use oraplan_core::OptionDoc;
use oraplan_core::PlanFingerprint;
use oraplan_core::ResolveError;
use oraplan_core::SecretSink;
use oraplan_core::SecretSinkError;
use oraplan_core::SubnetCandidate;
use oraplan_core::SubnetSource;
use oraplan_core::SubnetSourceError;
use oraplan_core::TagMap;
use oraplan_core::Topology;
use oraplan_core::TopologyResolver;
use oraplan_providers::FileSecretSink;
use oraplan_providers::FileSecretSinkConfig;
use oraplan_providers::JsonSubnetSource;
use oraplan_providers::JsonSubnetSourceConfig;
use oraplan_providers::OptionDocLoadError;
use oraplan_providers::load_option_doc;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum size of a mandatory-tags JSON file.
const MAX_TAGS_FILE_BYTES: usize = 64 * 1024;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "oraplan", disable_help_subcommand = true, disable_version_flag = true)]
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
    /// Resolve a deployment request into a provisioning plan.
    Plan(PlanCommand),
    /// Validate a request and, optionally, an option document.
    Validate(ValidateCommand),
    /// Print the request JSON schema.
    Schema,
    /// Print a canonical example request.
    Example,
}

/// Arguments for the `plan` subcommand.
#[derive(Args, Debug)]
struct PlanCommand {
    /// Request TOML path; defaults to `oraplan.toml` or `ORAPLAN_CONFIG`.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Option document path; required for primary deployments.
    #[arg(long, value_name = "PATH")]
    options: Option<PathBuf>,
    /// Subnet inventory path; required when the request names a VPC.
    #[arg(long, value_name = "PATH")]
    subnets: Option<PathBuf>,
    /// Mandatory tag mapping as a JSON object file.
    #[arg(long, value_name = "PATH")]
    tags: Option<PathBuf>,
    /// Plan output path; stdout when omitted.
    #[arg(long, value_name = "PATH")]
    out: Option<PathBuf>,
    /// Store the generated secret record under this directory.
    #[arg(long, value_name = "DIR")]
    store_secret: Option<PathBuf>,
}

/// Arguments for the `validate` subcommand.
#[derive(Args, Debug)]
struct ValidateCommand {
    /// Request TOML path; defaults to `oraplan.toml` or `ORAPLAN_CONFIG`.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Option document path to validate alongside the request.
    #[arg(long, value_name = "PATH")]
    options: Option<PathBuf>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI result alias.
type CliResult<T> = Result<T, CliError>;

/// CLI error taxonomy.
#[derive(Debug, Error)]
enum CliError {
    /// Request loading failed.
    #[error("{0}")]
    Config(#[from] ConfigError),
    /// Option document loading failed.
    #[error("{0}")]
    Options(#[from] OptionDocLoadError),
    /// Subnet discovery failed.
    #[error("{0}")]
    Subnets(#[from] SubnetSourceError),
    /// Resolution failed.
    #[error("{0}")]
    Resolve(#[from] ResolveError),
    /// Secret storage failed.
    #[error("{0}")]
    Secret(#[from] SecretSinkError),
    /// Fingerprinting failed.
    #[error("{0}")]
    Fingerprint(#[from] FingerprintError),
    /// Input or output handling failed.
    #[error("{0}")]
    Io(String),
}

// ============================================================================
// SECTION: Output Document
// ============================================================================

/// Plan output document emitted by the `plan` subcommand.
#[derive(Debug, Serialize)]
struct PlanDocument {
    /// Resolved deployment plan.
    plan: DeploymentPlan,
    /// Canonical plan fingerprint.
    fingerprint: PlanFingerprint,
}

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            let _ = write_stderr_line(&format!("error: {err}"));
            ExitCode::FAILURE
        }
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&format!("oraplan {version}"))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        write_stdout_line("usage: oraplan <plan|validate|schema|example>; see --help")?;
        return Ok(ExitCode::SUCCESS);
    };

    match command {
        Commands::Plan(command) => run_plan(&command),
        Commands::Validate(command) => run_validate(&command),
        Commands::Schema => run_schema(),
        Commands::Example => run_example(),
    }
}

// ============================================================================
// SECTION: Subcommands
// ============================================================================

/// Resolves a request and emits the plan document.
fn run_plan(command: &PlanCommand) -> CliResult<ExitCode> {
    let request = load_request(command.config.as_deref())?;
    let mandatory_tags = load_tags(command.tags.as_deref())?;
    let options = load_options_for(&request.topology, command.options.as_deref())?;
    let candidates = discover_subnets(&request, command.subnets.as_deref())?;

    let resolver = TopologyResolver::new(mandatory_tags);
    let plan = resolver.resolve(&request, options.as_ref(), &candidates)?;
    let fingerprint = plan.fingerprint()?;

    if let Some(root) = &command.store_secret
        && let Some(secret) = &plan.secret
    {
        let sink = FileSecretSink::new(FileSecretSinkConfig {
            root: root.clone(),
        });
        sink.store(secret)?;
    }

    let document = PlanDocument {
        plan,
        fingerprint,
    };
    let rendered = serde_json::to_string_pretty(&document)
        .map_err(|err| CliError::Io(format!("render plan: {err}")))?;
    match &command.out {
        Some(path) => fs::write(path, rendered)
            .map_err(|err| CliError::Io(format!("write {}: {err}", path.display())))?,
        None => write_stdout_line(&rendered)?,
    }
    Ok(ExitCode::SUCCESS)
}

/// Validates a request and, optionally, an option document.
fn run_validate(command: &ValidateCommand) -> CliResult<ExitCode> {
    let request = load_request(command.config.as_deref())?;
    if let Some(path) = &command.options {
        load_option_doc(path)?;
    }
    write_stdout_line(&format!(
        "request {} ({} instance{}) is valid",
        request.identifier,
        request.instance_count,
        if request.instance_count == 1 { "" } else { "s" }
    ))?;
    Ok(ExitCode::SUCCESS)
}

/// Prints the request JSON schema.
fn run_schema() -> CliResult<ExitCode> {
    let rendered = serde_json::to_string_pretty(&request_schema())
        .map_err(|err| CliError::Io(format!("render schema: {err}")))?;
    write_stdout_line(&rendered)?;
    Ok(ExitCode::SUCCESS)
}

/// Prints the canonical example request.
fn run_example() -> CliResult<ExitCode> {
    write_stdout_line(request_toml_example().trim_end())?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Input Helpers
// ============================================================================

/// Loads the option document when the topology requires one.
fn load_options_for(
    topology: &Topology,
    path: Option<&Path>,
) -> CliResult<Option<OptionDoc>> {
    if topology.as_primary().is_none() {
        return Ok(None);
    }
    let path = path.ok_or_else(|| {
        CliError::Io("--options is required for primary deployments".to_string())
    })?;
    Ok(Some(load_option_doc(path)?))
}

/// Discovers subnet candidates when the request names a VPC.
fn discover_subnets(
    request: &DeploymentRequest,
    path: Option<&Path>,
) -> CliResult<Vec<SubnetCandidate>> {
    let Some(vpc_id) = &request.network.vpc_id else {
        return Ok(Vec::new());
    };
    let path = path.ok_or_else(|| {
        CliError::Io("--subnets is required when the request names a vpc".to_string())
    })?;
    let source = JsonSubnetSource::new(
        JsonSubnetSourceConfig::default(),
        path.to_string_lossy().into_owned(),
    );
    Ok(source.discover(vpc_id)?)
}

/// Loads the mandatory tag mapping from a JSON object file.
fn load_tags(path: Option<&Path>) -> CliResult<TagMap> {
    let Some(path) = path else {
        return Ok(TagMap::new());
    };
    let metadata = fs::metadata(path)
        .map_err(|err| CliError::Io(format!("{}: {err}", path.display())))?;
    if metadata.len() > MAX_TAGS_FILE_BYTES as u64 {
        return Err(CliError::Io(format!("tags file exceeds {MAX_TAGS_FILE_BYTES} bytes")));
    }
    let text = fs::read_to_string(path)
        .map_err(|err| CliError::Io(format!("{}: {err}", path.display())))?;
    serde_json::from_str(&text)
        .map_err(|err| CliError::Io(format!("parse tags {}: {err}", path.display())))
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes one line to stdout without the direct-print macros.
fn write_stdout_line(message: &str) -> CliResult<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
        .map_err(|err| CliError::Io(format!("stdout: {err}")))
}

/// Writes one line to stderr without the direct-print macros.
fn write_stderr_line(message: &str) -> Result<(), std::io::Error> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}
