//! hexview - Entry Point

use clap::Parser;
use hexview::config::{self, CliOverrides};
use hexview::export::{self, DumpFormat};
use hexview::view::{self, ColorConfig};
use std::path::PathBuf;
use tracing::info;

/// hexview - browse large files as hex and text, one window at a time
#[derive(Parser, Debug)]
#[command(name = "hexview")]
#[command(version)]
#[command(about = "Terminal hex/text viewer that reads only the visible window")]
pub struct Args {
    /// File to view; `-` reads stdin. Press `o` inside the viewer to open one later
    pub file: Option<PathBuf>,

    /// Rows per window
    #[arg(short, long, value_parser = clap::value_parser!(u16).range(1..))]
    pub rows: Option<u16>,

    /// Bytes per row
    #[arg(short, long, value_parser = clap::value_parser!(u16).range(1..))]
    pub cols: Option<u16>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,

    /// Print the first window to stdout instead of starting the viewer
    #[arg(long, value_enum, requires = "file")]
    pub dump: Option<DumpFormat>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let config = config::resolve(CliOverrides {
        config_path: args.config.clone(),
        rows: args.rows,
        cols: args.cols,
    })?;

    hexview::logging::init(&config.log_file_path)?;
    info!(config = ?config, "Configuration loaded and resolved");

    if let Some(format) = args.dump {
        let path = args.file.unwrap_or_else(|| PathBuf::from("-"));
        let file = hexview::source::open_path(&path)?;
        let output = export::dump(file, config.geometry()?, config.io_retries, format)?;
        println!("{output}");
        return Ok(());
    }

    let colors = ColorConfig::from_env_and_args(args.no_color);
    view::run_with_file(args.file, &config, colors)?;

    Ok(())
}
