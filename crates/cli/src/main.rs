mod config;
mod report;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use schemargs::{Args, Schema};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt};

use crate::report::{CheckReport, ParseReport};

#[derive(Parser)]
#[command(name = "schemargs")]
#[command(version, about = "Check argument lists against a flag schema", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse arguments against a schema and report the typed values
    Parse(ParseArgs),

    /// Compile a schema and list the flags it declares
    Check(CheckArgs),
}

#[derive(clap::Args)]
struct SchemaSource {
    /// Schema string, e.g. "l,p#,d*" (overrides the config file)
    #[arg(short, long)]
    schema: Option<String>,

    /// Path to a schemargs.json config (default: ./schemargs.json if present)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Parser)]
struct ParseArgs {
    #[command(flatten)]
    source: SchemaSource,

    /// Only output JSON (no human-readable output)
    #[arg(long)]
    json: bool,

    /// Arguments to parse; pass them after `--`
    #[arg(value_name = "ARGS", trailing_var_arg = true, allow_hyphen_values = true)]
    argv: Vec<String>,
}

#[derive(Parser)]
struct CheckArgs {
    #[command(flatten)]
    source: SchemaSource,

    /// Only output JSON (no human-readable output)
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Parse(args) => parse_command(args),
        Commands::Check(args) => check_command(args),
    }
}

fn compile_schema(source: &SchemaSource) -> Result<Schema> {
    let text = config::resolve_schema(source.schema.as_deref(), source.config.as_deref())?;
    Schema::compile(&text).with_context(|| format!("invalid schema `{text}`"))
}

fn parse_command(args: ParseArgs) -> Result<()> {
    tracing::debug!("executing parse command");

    let schema = compile_schema(&args.source)?;
    let parsed = Args::with_schema(&schema, &args.argv);
    let report = ParseReport::from_args(&parsed);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        if !parsed.is_valid() {
            std::process::exit(1);
        }
        return Ok(());
    }

    report.print_human();
    if !parsed.is_valid() {
        std::process::exit(1);
    }

    Ok(())
}

fn check_command(args: CheckArgs) -> Result<()> {
    tracing::debug!("executing check command");

    let schema = compile_schema(&args.source)?;
    let report = CheckReport::from_schema(&schema);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        report.print_human();
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
