use clap::Parser;
use hashcard::{Cli, HashCard, HashCardError, OutputFormatter, StrategyRegistry};
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    // Parse CLI arguments
    let cli = Cli::parse();

    if let Err(e) = setup_logging(&cli) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let registry = StrategyRegistry::builtin();

    if cli.list_strategies {
        let formatter = OutputFormatter::new(cli.output_mode(), 0, false);
        formatter.print_strategies(registry.names());
        return 0;
    }

    let hashcard = match HashCard::from_cli(&cli, registry) {
        Ok(hashcard) => hashcard,
        Err(e) => {
            print_startup_error(&cli, &e);
            return 1;
        }
    };

    match hashcard.run() {
        Ok(report) => {
            hashcard.output_formatter().print_run_report(&report);
            // per-file problems were already logged; a finished walk is a success
            0
        }
        Err(e) => {
            hashcard.handle_error(&e);
            1
        }
    }
}

fn print_startup_error(cli: &Cli, error: &HashCardError) {
    let formatter = OutputFormatter::new(cli.output_mode(), 0, cli.quiet);
    formatter.print_user_friendly_error(error);
}

/// `RUST_LOG` wins; otherwise the level follows -v / -q.
fn setup_logging(cli: &Cli) -> anyhow::Result<()> {
    let level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("hashcard={}", level)))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .with_ansi(console::Term::stderr().features().colors_supported())
        .try_init()
        .map_err(anyhow::Error::msg)?;

    Ok(())
}
