mod chord;
mod config;
mod fullscreen;
mod layout;
mod note;
mod render;
mod sheet;
mod view;
mod viewer;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::ViewerConfig;
use crate::fullscreen::Headless;
use crate::layout::Size;
use crate::view::ViewState;

#[derive(Parser)]
#[command(name = "chordview", about = "Terminal chord sheet viewer with transposition")]
#[command(version)]
struct Cli {
    /// Config file (defaults to <config dir>/chordview/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Open a chord sheet in the interactive viewer
    View {
        /// Path to a chord sheet
        file: PathBuf,

        /// Start transposed by this many semitones
        #[arg(long, allow_hyphen_values = true, default_value_t = 0)]
        transpose: i32,
    },

    /// Render a chord sheet to stdout once
    Print {
        /// Path to a chord sheet
        file: PathBuf,

        /// Transpose by this many semitones
        #[arg(long, allow_hyphen_values = true, default_value_t = 0)]
        transpose: i32,

        /// Font size in percent
        #[arg(long)]
        font: Option<u32>,

        /// Viewport width used for the column decision
        #[arg(long, default_value_t = 80)]
        width: u32,

        /// Viewport height used for the column decision
        #[arg(long, default_value_t = 24)]
        height: u32,

        /// Render as if fullscreen were on
        #[arg(long)]
        fullscreen: bool,
    },

    /// Transpose a single chord symbol
    Transpose {
        /// Chord symbol, e.g. "Am7/G"
        chord: String,

        /// Semitones (may be negative)
        #[arg(allow_hyphen_values = true)]
        shift: i32,
    },

    /// Show the config path, or write a default config with --init
    Config {
        #[arg(long)]
        init: bool,
    },
}

fn main() {
    // Default to warn so log lines don't land on top of the viewer
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp_millis()
        .init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.clone().or_else(config::default_config_path);

    match cli.command {
        Command::View { file, transpose } => {
            let config = load(config_path.as_deref());
            let sheet = read_sheet(&file)?;
            let mut view = ViewState::new(&config.font);
            view.transpose_by(transpose);
            viewer::run(&sheet, &config, view)?;
        }
        Command::Print {
            file,
            transpose,
            font,
            width,
            height,
            fullscreen,
        } => {
            let config = load(config_path.as_deref());
            let sheet = read_sheet(&file)?;
            let mut view = ViewState::new(&config.font);
            if let Some(font) = font {
                view.set_font(font);
            }
            view.transpose_by(transpose);
            if fullscreen {
                let mut backend = Headless::default();
                view.set_fullscreen(crate::fullscreen::toggle(&mut backend)?);
            }
            render::relayout(&sheet, &mut view, Size::new(width, height));

            for row in render::body_rows(&sheet, &view, config.layout.column_gap) {
                println!("{}", row);
            }
            println!();
            println!("{}", render::status_line(&sheet, &view));
        }
        Command::Transpose { chord, shift } => {
            println!("{}", crate::chord::transpose(&chord, shift)?);
        }
        Command::Config { init } => {
            let path = config_path.context("no config directory on this platform")?;
            if init {
                ViewerConfig::default().save(&path)?;
                println!("Wrote default config to {}", path.display());
            } else {
                println!("{}", path.display());
            }
        }
    }

    Ok(())
}

fn load(path: Option<&Path>) -> ViewerConfig {
    match path {
        Some(p) => ViewerConfig::load(p),
        None => ViewerConfig::default(),
    }
}

fn read_sheet(path: &Path) -> Result<sheet::Sheet> {
    let input = fs::read_to_string(path)
        .with_context(|| format!("Error reading {}", path.display()))?;
    sheet::parse(&input).with_context(|| format!("Parse error in {}", path.display()))
}
