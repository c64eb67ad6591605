use clap::Parser;
use routeshim::cli::{run_cli, Cli};
use routeshim::logging::{init_logging, LogConfig};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&LogConfig {
        level: cli.log_level.clone(),
        format: cli.log_format,
    })?;
    run_cli(cli)
}
