mod commands;
mod config;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::CliConfig;

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Graph database wire format inspector.
#[derive(Parser)]
#[command(
    name = "graphdb",
    version,
    about = "Graph database wire format inspector"
)]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "json", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a tagged value and print its canonical encoding
    Decode {
        /// Path to a JSON file (reads stdin when omitted)
        file: Option<PathBuf>,
        /// Decode a logical type instead of a value
        #[arg(long)]
        logical_type: bool,
    },

    /// Build a filter value from a scalar type name and a string literal
    Filter {
        /// Scalar type name, e.g. int64, timestamptz, uuid
        scalar_type: String,
        /// Literal to parse
        input: String,
    },

    /// List every value and logical type tag
    Tags,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match config::read_config(path) {
            Ok(config) => config,
            Err(msg) => {
                report_error(&msg, cli.output, cli.quiet);
                process::exit(1);
            }
        },
        None => CliConfig::default(),
    };

    match cli.command {
        Commands::Decode { file, logical_type } => {
            commands::decode::cmd_decode(
                file.as_deref(),
                logical_type,
                &config.decode,
                cli.output,
                cli.quiet,
            );
        }
        Commands::Filter { scalar_type, input } => {
            commands::filter::cmd_filter(
                &scalar_type,
                &input,
                config.decode.pretty,
                cli.output,
                cli.quiet,
            );
        }
        Commands::Tags => {
            commands::tags::cmd_tags(config.decode.pretty, cli.output);
        }
    }
}

/// Print an error to stderr in the selected output format.
pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        }
    }
}

/// Print a JSON document to stdout, pretty or compact.
pub(crate) fn print_json(value: &serde_json::Value, pretty: bool) {
    let text = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    match text {
        Ok(text) => println!("{}", text),
        Err(e) => {
            eprintln!("error: failed to serialize output: {}", e);
            process::exit(1);
        }
    }
}
