pub mod cli;
pub mod config;
pub mod converter;
pub mod driver;
pub mod error;
pub mod scanner;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, Command, OutputFormat, TargetArgs};
pub use config::{CliOverrides, Config, ConversionConfig, FilterConfig, RootsConfig};
pub use converter::{Converter, DocFormat, PandocRenderer, PdfToMarkdown};
pub use driver::{BatchDriver, ConversionJob, ConversionResult, RunSummary, Target};
pub use error::{KbConvertError, Result, UserFriendlyError};
pub use scanner::{SourceFile, SourceScanner};
pub use ui::{OutputFormatter, OutputMode, ProgressManager};

use std::path::Path;

/// Main library interface: wires configuration, operator output and the
/// batch driver for one converter direction.
pub struct KbConvert {
    config: Config,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
}

impl KbConvert {
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        let progress_manager =
            ProgressManager::new(!quiet && output_mode == OutputMode::Human);

        Self {
            config,
            output_formatter,
            progress_manager,
        }
    }

    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        let output_mode = match cli_args.output_format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        };

        Ok(Self::new(
            config,
            output_mode,
            cli_args.verbose,
            cli_args.quiet,
        ))
    }

    /// Execute one conversion subcommand end to end.
    pub fn execute(&self, command: &Command) -> Result<RunSummary> {
        match command {
            Command::Pdf2md { target, .. } => {
                let converter = PdfToMarkdown::new().with_default_code_language(
                    self.config.conversion.default_code_language.clone(),
                );
                self.run_batch(&converter, target, &self.config.roots.knowledge_base)
            }
            Command::Md2doc { target, .. } => {
                let format = self
                    .config
                    .conversion
                    .output_format
                    .as_deref()
                    .and_then(DocFormat::from_name)
                    .unwrap_or(DocFormat::Pdf);
                let converter = PandocRenderer::new(format);
                self.run_batch(&converter, target, &self.config.roots.exercises)
            }
            Command::GenerateConfig { .. } => Err(KbConvertError::Config {
                message: "generate-config is handled before batch execution".to_string(),
            }),
        }
    }

    fn run_batch(
        &self,
        converter: &dyn Converter,
        target_args: &TargetArgs,
        default_root: &Path,
    ) -> Result<RunSummary> {
        let target = resolve_target(target_args, default_root);

        let scanner = SourceScanner::new(converter.source_extension(), &self.config.filters);
        let driver = BatchDriver::new(converter, &scanner);

        self.output_formatter
            .start_operation(&format!("Starting {} conversion", converter.name()));

        let spinner = self.progress_manager.create_spinner("Scanning for source files");
        let discovered = driver.discover(&target);
        spinner.finish_and_clear();
        let sources = discovered?;

        if sources.is_empty() {
            self.output_formatter.warning("No eligible files found");
            let summary = RunSummary::new(0);
            self.output_formatter.print_run_summary(&summary);
            return Ok(summary);
        }

        self.output_formatter.print_discovered(&sources);
        self.output_formatter
            .debug(&scanner.get_statistics(&sources).display_summary());

        let progress_bar = self
            .progress_manager
            .create_file_progress(sources.len() as u64);
        let progress_callback = {
            let pb = progress_bar.clone();
            move |summary: &RunSummary| {
                ui::progress::update_file_progress(&pb, summary);
            }
        };

        let jobs = driver.plan_jobs(&sources);
        let summary = driver.run_jobs(jobs, Some(&progress_callback))?;

        ui::progress::finish_progress(
            &progress_bar,
            &format!("Converted {} of {} files", summary.successes, summary.total_jobs),
        );

        self.output_formatter.print_run_summary(&summary);

        Ok(summary)
    }

    /// Generate sample configuration file
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        let sample_config = Config::create_sample_config();
        std::fs::write(output_path.as_ref(), sample_config)?;
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    pub fn handle_error(&self, error: &KbConvertError) {
        self.progress_manager.clear();
        self.output_formatter.print_user_friendly_error(error);
    }
}

/// Map -f/-d onto a batch target, falling back to the direction's default
/// root when neither is given.
fn resolve_target(target_args: &TargetArgs, default_root: &Path) -> Target {
    if let Some(ref file) = target_args.file {
        Target::File(file.clone())
    } else if let Some(ref dir) = target_args.directory {
        Target::Directory(dir.clone())
    } else {
        Target::Directory(default_root.to_path_buf())
    }
}

pub fn version_info() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
