//! CLI Application logic
//!
//! Contains the command-line interface implementation.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, Level};

use transdok_core::{Row, Settings, TranscriptLayout};
use transdok_ooxml::{convert_file, transform_file};

/// Config files looked up in the working directory
const CONFIG_CANDIDATES: [&str; 2] = ["transdok.toml", ".transdok.toml"];

/// Output format for the preview command
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable columns
    #[default]
    Text,
    /// JSON output for tool consumption
    Json,
}

#[derive(Parser)]
#[command(name = "transdok")]
#[command(author, version, about = "Reformat speaker transcripts into two-column tables", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a DOCX transcript into a two-column table document
    Convert {
        /// Input DOCX transcript
        input: PathBuf,

        /// Output DOCX file
        #[arg(short, long, default_value = "output.docx")]
        output: PathBuf,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print the table rows without writing a document
    Preview {
        /// Input DOCX transcript
        input: PathBuf,

        /// Output format (text or json)
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// Run the CLI application
///
/// Parses arguments, sets up logging on stderr and dispatches to the
/// appropriate command.
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Convert {
            input,
            output,
            config,
        } => {
            convert_command(&input, &output, config.as_deref())?;
        }
        Commands::Preview {
            input,
            format,
            config,
        } => {
            preview_command(&input, format, config.as_deref())?;
        }
    }

    Ok(())
}

/// Execute the convert command
///
/// Prints the path of the written document.
pub fn convert_command(input: &Path, output: &Path, config: Option<&Path>) -> Result<PathBuf> {
    let settings = load_settings(config)?;

    let written = convert_file(input, output, &settings)
        .with_context(|| format!("Failed to convert transcript: {}", input.display()))?;

    println!("{}", written.display());
    Ok(written)
}

/// Execute the preview command
pub fn preview_command(input: &Path, format: OutputFormat, config: Option<&Path>) -> Result<()> {
    let settings = load_settings(config)?;

    let layout = transform_file(input, &settings)
        .with_context(|| format!("Failed to read transcript: {}", input.display()))?;

    match format {
        OutputFormat::Text => print!("{}", render_preview(&layout)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&layout)?),
    }

    Ok(())
}

/// Render a layout as `speaker | content` text columns
pub fn render_preview(layout: &TranscriptLayout) -> String {
    let width = layout
        .speakers()
        .iter()
        .map(|name| name.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for row in &layout.rows {
        match row {
            Row::Separator { text, .. } => {
                out.push_str(text);
            }
            Row::Split { speaker, content } => {
                out.push_str(&format!(
                    "{:<width$} | {}",
                    speaker.as_deref().unwrap_or(""),
                    content.as_deref().unwrap_or(""),
                    width = width
                ));
            }
        }
        out.push('\n');
    }

    out.push_str(&format!(
        "\n{} segment(s), {} row(s), {} preamble paragraph(s) skipped\n",
        layout.segments,
        layout.rows.len(),
        layout.skipped
    ));
    out
}

/// Load settings from an explicit path, a config file in the working
/// directory, or defaults
fn load_settings(config_path: Option<&Path>) -> Result<Settings> {
    let settings = match config_path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            Settings::from_toml_str(&content)
                .with_context(|| format!("Failed to parse config: {}", path.display()))?
        }
        None => find_config(Path::new(".")).unwrap_or_default(),
    };

    settings.validate().context("Invalid settings")?;
    Ok(settings)
}

fn find_config(dir: &Path) -> Option<Settings> {
    for candidate in CONFIG_CANDIDATES {
        let path = dir.join(candidate);
        if !path.exists() {
            continue;
        }
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                debug!("Ignoring unreadable config {}: {}", candidate, e);
                continue;
            }
        };
        match Settings::from_toml_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {}", candidate);
                return Some(settings);
            }
            Err(e) => debug!("Ignoring invalid config {}: {}", candidate, e),
        }
    }
    None
}
