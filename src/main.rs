use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use termpage::{
    app::App,
    config::{ConfigLoader, source_for_base},
};

#[derive(Parser)]
#[command(name = "termpage")]
#[command(about = "A single-page terminal presentation hydrated from JSON config", long_about = None)]
struct Cli {
    /// Directory or http(s) URL the site is served from
    #[arg(value_name = "BASE", default_value = ".")]
    base: String,

    /// Fetch and parse the config, report, and exit (don't run TUI)
    #[arg(long)]
    check: bool,

    /// Write log output to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn init_tracing(log_file: Option<&Path>) -> color_eyre::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "termpage=info".into());

    match log_file {
        Some(path) => {
            let file = std::fs::File::create(path).map_err(|e| {
                color_eyre::eyre::eyre!("Failed to open log file {:?}: {}", path, e)
            })?;
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(std::sync::Mutex::new(file))
                        .with_ansi(false),
                )
                .init();
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.log_file.as_deref())?;

    // Check-only mode: fetch and parse, report, exit
    if cli.check {
        let source = source_for_base(&cli.base);
        println!("Checking config at: {}", source.location());
        match ConfigLoader::load(source.as_ref()).await {
            Ok(config) => {
                println!("✓ Config loaded successfully ({} keys)", config.len());
                return Ok(());
            }
            Err(e) => {
                eprintln!("✗ Failed to load config: {}", e);
                std::process::exit(1);
            }
        }
    }

    // Run TUI
    let terminal = ratatui::init();
    let app = App::new(cli.base);
    let result = app
        .run(terminal)
        .await
        .map_err(|e| color_eyre::eyre::eyre!("{}", e));
    ratatui::restore();
    result
}
