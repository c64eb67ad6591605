use crate::logging::LogFormat;
use crate::router::{params_to_map, strip_query, RouteTable};
use crate::table::RouteSource;
use anyhow::bail;
use clap::{Parser, Subcommand};
use serde_json::json;
use std::io::{self, Write};
use std::path::PathBuf;

/// Command-line interface for inspecting route tables
#[derive(Parser, Debug)]
#[command(name = "routeshim")]
#[command(about = "Inspect and resolve routeshim route tables", long_about = None)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "ROUTESHIM_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,

    /// Log output format (pretty or json)
    #[arg(
        long,
        global = true,
        env = "ROUTESHIM_LOG_FORMAT",
        default_value = "pretty",
        value_parser = parse_format
    )]
    pub log_format: LogFormat,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

fn parse_format(s: &str) -> Result<LogFormat, String> {
    Ok(LogFormat::parse(s))
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List every canonical path in a route table
    Routes {
        /// Route table file (YAML or JSON)
        #[arg(short, long)]
        table: PathBuf,
    },
    /// Resolve a path and print the matched route with its params
    Resolve {
        /// Route table file (YAML or JSON)
        #[arg(short, long)]
        table: PathBuf,

        /// Path to resolve; a query string is ignored
        path: String,
    },
}

/// Execute a parsed command, writing results to stdout.
pub fn run_cli(cli: Cli) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute(&cli.command, &mut out)
}

/// Execute `command`, writing JSON output to `out`.
///
/// # Errors
///
/// Fails when the table cannot be loaded, or for `resolve` when no route matches.
pub fn execute(command: &Commands, out: &mut impl Write) -> anyhow::Result<()> {
    match command {
        Commands::Routes { table } => {
            let table = RouteTable::from_source(&RouteSource::File(table.clone()))?;
            let entries: Vec<_> = table
                .entries()
                .into_iter()
                .map(|(path, handler)| json!({ "path": path, "handler": handler }))
                .collect();
            serde_json::to_writer_pretty(&mut *out, &entries)?;
            writeln!(out)?;
            Ok(())
        }
        Commands::Resolve { table, path } => {
            let table = RouteTable::from_source(&RouteSource::File(table.clone()))?;
            let target = strip_query(path);
            let Some(route) = table.resolve(target) else {
                bail!(
                    "no route matches {target}; known routes: {}",
                    table.canonical_paths().join(", ")
                );
            };
            let params = params_to_map(&route.params(target));
            let resolved = json!({
                "path": route.canonical_path.as_ref(),
                "handler": route.handler_ref.as_ref(),
                "params": params,
            });
            serde_json::to_writer_pretty(&mut *out, &resolved)?;
            writeln!(out)?;
            Ok(())
        }
    }
}
