use crate::converter::Converter;
use crate::driver::report::{ConversionJob, ConversionResult, RunSummary};
use crate::error::{KbConvertError, Result};
use crate::scanner::{SourceFile, SourceScanner};
use std::path::PathBuf;

/// What a batch run operates on.
#[derive(Debug, Clone)]
pub enum Target {
    File(PathBuf),
    Directory(PathBuf),
}

/// Sequential batch loop over one converter direction.
///
/// Each discovered source yields exactly one [`ConversionResult`]; a failing
/// file is recorded and the batch continues. The only error that escapes the
/// per-file boundary is a missing external tool, since every remaining job
/// would fail the same way.
pub struct BatchDriver<'a> {
    converter: &'a dyn Converter,
    scanner: &'a SourceScanner,
}

impl<'a> BatchDriver<'a> {
    pub fn new(converter: &'a dyn Converter, scanner: &'a SourceScanner) -> Self {
        Self { converter, scanner }
    }

    /// Resolve `target` into jobs and process them one at a time.
    pub fn run(
        &self,
        target: &Target,
        progress_callback: Option<&dyn Fn(&RunSummary)>,
    ) -> Result<RunSummary> {
        let sources = self.discover(target)?;
        self.run_jobs(self.plan_jobs(&sources), progress_callback)
    }

    /// Process an already-planned job list strictly sequentially.
    pub fn run_jobs(
        &self,
        jobs: Vec<ConversionJob>,
        progress_callback: Option<&dyn Fn(&RunSummary)>,
    ) -> Result<RunSummary> {
        let mut summary = RunSummary::new(jobs.len());

        for job in jobs {
            let result = self.convert_one(job)?;
            summary.record(&result);

            if let Some(callback) = progress_callback {
                callback(&summary);
            }
        }

        Ok(summary)
    }

    /// Discover eligible sources for the target without converting anything.
    pub fn discover(&self, target: &Target) -> Result<Vec<SourceFile>> {
        match target {
            Target::File(path) => self.scanner.scan_single_file(path),
            Target::Directory(path) => self.scanner.scan_directory(path),
        }
    }

    pub fn plan_jobs(&self, sources: &[SourceFile]) -> Vec<ConversionJob> {
        sources
            .iter()
            .map(|source| {
                ConversionJob::new(
                    source.source_path.clone(),
                    self.converter.target_extension(),
                )
            })
            .collect()
    }

    /// Convert a single job, downgrading per-file errors to a Failure result.
    fn convert_one(&self, job: ConversionJob) -> Result<ConversionResult> {
        match self.converter.convert(&job.source_path, &job.output_path) {
            Ok(()) => Ok(ConversionResult::success(job)),
            Err(KbConvertError::ToolMissing { tool }) => {
                Err(KbConvertError::ToolMissing { tool })
            }
            Err(e) => Ok(ConversionResult::failure(job, e.to_string())),
        }
    }
}
