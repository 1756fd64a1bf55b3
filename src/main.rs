use anyhow::Result;
use owo_colors::OwoColorize;
use vitahealth::cli::commands::{self, Context};
use vitahealth::cli::output::Output;
use vitahealth::cli::Cli;
use vitahealth::utils::logging;
use vitahealth::ClientConfig;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse_args();

    let mut config = ClientConfig::load(cli.config.as_deref())?;
    if let Some(origin) = cli.origin.as_deref() {
        config = config.with_origin(origin)?;
    }

    logging::init(&config.logging, cli.verbose);
    tracing::debug!(origin = %config.backend.origin, storage = %config.storage.path.display(), "Configuration loaded");

    let output = if cli.no_color {
        Output::no_color()
    } else {
        Output::new()
    };
    if cli.verbose {
        output.banner();
    }

    let ctx = Context::new(config, output);
    commands::run(&ctx, cli.command).await
}
