use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mdsite::Config;

#[derive(Parser)]
#[command(name = "mdsite")]
#[command(about = "Build a static HTML site from Markdown files")]
#[command(version)]
struct Cli {
    /// Site config file (defaults are used if it does not exist)
    #[arg(short, long, default_value = "site.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Copy static assets and render every page into the output directory
    Build {
        /// Prefix for root-relative links, e.g. "/my-repo/"
        #[arg(short, long)]
        base_path: Option<String>,
    },
    /// Print the HTML body of a single Markdown file
    Render {
        /// Input Markdown file
        input: PathBuf,
    },
    /// Print the title of a single Markdown file
    Title {
        /// Input Markdown file
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let root = cli.config.parent().unwrap_or(Path::new("."));
    let loaded = Config::try_load(&cli.config)?;
    let found = loaded.is_some();
    let config = loaded
        .unwrap_or_else(Config::compiled_default)
        .rooted_at(root);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if found {
        tracing::debug!(path = %cli.config.display(), "loaded config");
    } else {
        tracing::debug!(path = %cli.config.display(), "no config file, using defaults");
    }

    match cli.command {
        Commands::Build { base_path } => {
            let config = Config {
                base_path: base_path.unwrap_or(config.base_path),
                ..config
            };
            let summary = mdsite::site::build_site(&config)?;
            println!(
                "Generated {} pages, copied {} files into {}",
                summary.pages_generated,
                summary.files_copied,
                config.output_dir.display()
            );
        }
        Commands::Render { input } => {
            let markdown = read_input(&input)?;
            let html = mdsite::convert_markdown_to_html(&markdown)
                .with_context(|| format!("failed to convert {}", input.display()))?;
            println!("{html}");
        }
        Commands::Title { input } => {
            let markdown = read_input(&input)?;
            let title = mdsite::extract_title(&markdown)
                .with_context(|| format!("failed to read title of {}", input.display()))?;
            println!("{title}");
        }
    }

    Ok(())
}

fn read_input(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Error reading {}", path.display()))
}
