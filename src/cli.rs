use crate::config::{CliOverrides, Config};
use crate::converter::DocFormat;
use crate::error::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "kbconvert")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Batch conversion of course materials between PDF and Markdown/DOCX")]
#[command(
    long_about = "kbconvert walks the course knowledge base and converts every eligible \
                  file in place: PDFs become Markdown notes, Markdown exercise sheets \
                  become PDF or DOCX handouts. Output is written next to the input."
)]
#[command(after_help = "EXAMPLES:\n  \
    kbconvert pdf2md\n  \
    kbconvert pdf2md -f temas/guia_docente.pdf\n  \
    kbconvert pdf2md -d apuntes/ --lang java\n  \
    kbconvert md2doc -d enunciados_sinteticos/ --to docx\n  \
    kbconvert generate-config")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(long, value_enum, global = true, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Verbose output level (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert PDF course material to Markdown
    Pdf2md {
        #[command(flatten)]
        target: TargetArgs,

        /// Fallback fence language tag for detected code blocks
        #[arg(long)]
        lang: Option<String>,
    },

    /// Render Markdown exercise sheets to PDF or DOCX
    Md2doc {
        #[command(flatten)]
        target: TargetArgs,

        /// Output document format (defaults to the configured format, or pdf)
        #[arg(long, value_enum)]
        to: Option<RenderFormat>,
    },

    /// Write a sample configuration file
    GenerateConfig {
        /// Destination path (defaults to kbconvert.toml)
        path: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Default)]
pub struct TargetArgs {
    /// Convert a single file
    #[arg(short, long, conflicts_with = "directory")]
    pub file: Option<PathBuf>,

    /// Convert every eligible file under a directory (recursive)
    #[arg(short, long)]
    pub directory: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RenderFormat {
    Pdf,
    Docx,
}

impl From<RenderFormat> for DocFormat {
    fn from(format: RenderFormat) -> Self {
        match format {
            RenderFormat::Pdf => DocFormat::Pdf,
            RenderFormat::Docx => DocFormat::Docx,
        }
    }
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        config.merge_with_cli_args(&self.create_cli_overrides());
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        let mut overrides = CliOverrides::new();

        match &self.command {
            Command::Pdf2md { lang, .. } => {
                overrides = overrides.with_default_code_language(lang.clone());
            }
            Command::Md2doc { to, .. } => {
                // No flag means no override; the config value stays in effect.
                overrides = overrides
                    .with_output_format(to.map(|t| DocFormat::from(t).to_string()));
            }
            Command::GenerateConfig { .. } => {}
        }

        overrides
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}
