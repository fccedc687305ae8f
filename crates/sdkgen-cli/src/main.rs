//! sdkgen - REST client SDK generator.
//!
//! Command-line interface turning REST API descriptions into C# and Python
//! client SDKs.
//!
//! # Architecture
//!
//! The CLI is organized around subcommands:
//! - `generate` - Generate client SDKs from one or more descriptions
//! - `inspect` - Show the sub-client groups of a description
//! - `completions` - Generate shell completions
//!
//! # Examples
//!
//! ```bash
//! # Generate a C# client from two API versions
//! sdkgen generate -d v1.json -d v2.yaml -t csharp -o generated --client-name Nexus
//!
//! # Inspect grouping
//! sdkgen inspect -d openapi.json
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;
use sdkgen_cli::commands;
use sdkgen_cli::commands::generate::GenerateOptions;
use sdkgen_cli::config::SettingsOverrides;
use sdkgen_core::cli::{ExitCode, OutputFormat};
use sdkgen_core::{Capability, Target};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// sdkgen - Generate C# and Python client SDKs from REST API descriptions.
#[derive(Parser, Debug)]
#[command(name = "sdkgen")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (json, text, pretty)
    #[arg(long = "format", global = true, default_value = "pretty")]
    format: String,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate client SDKs.
    ///
    /// Every description becomes one version accessor on the root client,
    /// in the order given. Files are written to `<output>/<target>/`.
    ///
    /// # Examples
    ///
    /// ```bash
    /// sdkgen generate -d openapi.json -t csharp -t python -o generated
    ///
    /// sdkgen generate -d openapi.json -t python -o generated \
    ///     --config sdkgen.toml --capability access-token
    /// ```
    Generate {
        /// Description files (JSON, or YAML with a .yaml/.yml extension)
        #[arg(short, long = "description", required = true, num_args = 1)]
        descriptions: Vec<PathBuf>,

        /// Target languages (csharp, python)
        #[arg(short, long = "target", required = true, num_args = 1)]
        targets: Vec<Target>,

        /// Output directory
        #[arg(short, long)]
        output: PathBuf,

        /// TOML configuration file
        #[arg(short, long, env = "SDKGEN_CONFIG")]
        config: Option<PathBuf>,

        /// Namespace of the generated client
        #[arg(long)]
        namespace: Option<String>,

        /// Root client name, without the `Client` suffix
        #[arg(long)]
        client_name: Option<String>,

        /// Exception type name
        #[arg(long)]
        exception_type: Option<String>,

        /// Exception code prefix
        #[arg(long)]
        exception_code_prefix: Option<String>,

        /// Header key used to attach configuration data
        #[arg(long)]
        configuration_header_key: Option<String>,

        /// Enable a capability (refresh-token, access-token, web-assembly-streaming, extended-features)
        #[arg(long = "capability", num_args = 1)]
        capabilities: Vec<Capability>,

        /// Reject request bodies without an `x-name` extension
        #[arg(long)]
        require_body_name: bool,
    },

    /// Show how a description is split into sub-clients.
    Inspect {
        /// Description file
        #[arg(short, long = "description")]
        description: PathBuf,
    },

    /// Generate shell completions.
    Completions {
        /// Target shell for completion generation
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let Ok(output_format) = cli.format.parse::<OutputFormat>() else {
        eprintln!(
            "{} invalid output format '{}' (expected: json, text, or pretty)",
            "error:".red().bold(),
            cli.format
        );
        std::process::exit(ExitCode::INVALID_INPUT.as_i32());
    };

    let exit_code = match execute_command(cli.command, output_format) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            ExitCode::GENERATION_ERROR
        }
    };

    std::process::exit(exit_code.as_i32());
}

/// Sets up tracing on stderr. `--verbose` forces debug level, otherwise
/// `RUST_LOG` applies with `info` as the default.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Routes commands to their handlers.
fn execute_command(command: Commands, output_format: OutputFormat) -> Result<ExitCode> {
    match command {
        Commands::Generate {
            descriptions,
            targets,
            output,
            config,
            namespace,
            client_name,
            exception_type,
            exception_code_prefix,
            configuration_header_key,
            capabilities,
            require_body_name,
        } => {
            let options = GenerateOptions {
                descriptions,
                targets,
                output,
                config,
                overrides: SettingsOverrides {
                    namespace,
                    client_name,
                    exception_type,
                    exception_code_prefix,
                    configuration_header_key,
                    capabilities,
                    require_body_name,
                },
            };
            commands::generate::run(options, output_format)
        }
        Commands::Inspect { description } => commands::inspect::run(&description, output_format),
        Commands::Completions { shell } => {
            use clap::CommandFactory;
            let mut cmd = Cli::command();
            commands::completions::run(shell, &mut cmd)
        }
    }
}
