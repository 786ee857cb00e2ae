mod app;
mod cli;
mod config;
mod output;
mod report;

use std::io::IsTerminal;

use clap::Parser;
use image_tokens::PricingDb;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use app::{CommandContext, handle_command, load_pricing};
use cli::Cli;
use config::Config;
use output::NumberFormat;

fn main() {
    let cli = Cli::parse();

    // --verbose forces DEBUG; otherwise RUST_LOG, falling back to WARN
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal()),
        )
        .with(filter)
        .try_init();

    let config = Config::load();
    let cli = cli.with_config(&config);

    let number_format = match NumberFormat::from_locale(cli.locale.as_deref()) {
        Ok(format) => format,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let pricing_db = PricingDb::new(config.pricing_map());
    load_pricing(&cli, &pricing_db);

    handle_command(&CommandContext {
        cli: &cli,
        pricing_db: &pricing_db,
        number_format,
    });
}
