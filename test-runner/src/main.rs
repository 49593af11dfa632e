//! Runs one tape program and prints the rendered result line

use anyhow::{bail, Context};
use clap::Parser;
use std::path::PathBuf;
use tapevm_runtime::{TapeVm, VmConfig};

#[derive(Parser, Debug)]
#[command(name = "tapevm-runner")]
#[command(about = "Run a tape program with a time budget")]
struct Cli {
    /// Program source (one token, as the chat command would receive it)
    program: String,

    /// YAML config file providing `timeout` (and optionally `max_loop_depth`)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Time budget in milliseconds, overrides the config file
    #[arg(long)]
    timeout: Option<u64>,

    /// Characters made available to `,`
    #[arg(long, default_value = "")]
    input: String,

    /// Log bracket diagnostics and run counters
    #[arg(long, short)]
    verbose: bool,
}

fn load_config(cli: &Cli) -> anyhow::Result<VmConfig> {
    let mut config = match &cli.config {
        Some(path) => VmConfig::load(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => match cli.timeout {
            Some(timeout) => VmConfig::new(timeout),
            None => bail!("either --config or --timeout is required"),
        },
    };

    if let Some(timeout) = cli.timeout {
        config.timeout = timeout;
    }
    config.validate()?;
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::builder()
        .filter_level(level)
        .format_timestamp(None)
        .init();

    let config = load_config(&cli)?;
    log::info!(
        "Running {} characters with a {}ms budget",
        cli.program.chars().count(),
        config.timeout
    );

    let mut vm = TapeVm::from_config(&cli.program, &config)?;
    vm.push_input(&cli.input);
    if cli.verbose {
        vm.enable_debug();
    }

    let result = vm.run();
    log::debug!(
        "{} instructions in {:?}",
        result.instructions_executed(),
        result.elapsed()
    );

    println!("{}", result);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_flag_alone() {
        let cli = Cli::parse_from(["tapevm-runner", "--timeout", "50", "+."]);
        let config = load_config(&cli).unwrap();
        assert_eq!(config, VmConfig::new(50));
    }

    #[test]
    fn test_config_required() {
        let cli = Cli::parse_from(["tapevm-runner", "+."]);
        assert!(load_config(&cli).is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let cli = Cli::parse_from(["tapevm-runner", "--timeout", "0", "+"]);
        assert!(load_config(&cli).is_err());
    }
}
