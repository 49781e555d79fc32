use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use photo_recon::config::Config;
use photo_recon::logging::init_tracing;
use photo_recon::resolver::{ContentLocator, ImageReference};
use photo_recon::ui::app::{run_once, App};
use photo_recon::ui::controller::ReconController;
use photo_recon::ui::render::render_header;

#[derive(Debug, Parser)]
#[command(name = "photo-recon", version, about = "Ask a generative model what a photo shows")]
struct Cli {
    /// Config file (default: ~/.config/photo-recon/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the built-in sample photos
    List,
    /// Submit a built-in sample by index
    Sample { index: usize },
    /// Submit a photo by path or file:// URI
    Open { locator: String },
    /// Interactive screen (default)
    Interactive,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Interactive);

    let default_level = match command {
        Command::Interactive => "warn",
        _ => "info",
    };
    init_tracing(default_level);

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("loading configuration")?;

    let reference = match command {
        Command::List => {
            print!("{}", render_header());
            return Ok(());
        }
        Command::Interactive => {
            let controller = ReconController::from_config(&config)
                .context("creating inference backend")?;
            let mut app = App::new(controller, io::stdout());
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            app.run(stdin).await?;
            return Ok(());
        }
        Command::Sample { index } => ImageReference::BuiltInSample(index),
        Command::Open { locator } => ImageReference::UserContent(ContentLocator::new(locator)),
    };

    let mut controller =
        ReconController::from_config(&config).context("creating inference backend")?;
    let mut stdout = io::stdout();
    let state = run_once(&mut controller, reference, &mut stdout).await?;
    stdout.flush()?;

    if state.is_error() {
        std::process::exit(1);
    }
    Ok(())
}
