use std::path::PathBuf;
use std::time::{Duration, Instant};

/// One unit of work: convert `source_path` into `output_path`.
///
/// The output path is derived deterministically: same directory, same stem,
/// target extension swapped in. Existing outputs are overwritten.
#[derive(Debug, Clone)]
pub struct ConversionJob {
    pub source_path: PathBuf,
    pub output_path: PathBuf,
}

impl ConversionJob {
    pub fn new(source_path: PathBuf, target_extension: &str) -> Self {
        let output_path = source_path.with_extension(target_extension);
        Self {
            source_path,
            output_path,
        }
    }
}

/// Outcome of a single job. Exactly one is produced per discovered file.
#[derive(Debug, Clone)]
pub struct ConversionResult {
    pub job: ConversionJob,
    pub error: Option<String>,
}

impl ConversionResult {
    pub fn success(job: ConversionJob) -> Self {
        Self { job, error: None }
    }

    pub fn failure<S: Into<String>>(job: ConversionJob, reason: S) -> Self {
        Self {
            job,
            error: Some(reason.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct FailedJob {
    pub source_path: PathBuf,
    pub reason: String,
}

/// Aggregate outcome of one batch run.
///
/// This is the accumulator threaded through the batch loop; there is no
/// process-wide state behind it.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub successes: usize,
    pub failures: Vec<FailedJob>,
    pub total_jobs: usize,
    pub current_file: Option<String>,
    start_time: Instant,
}

impl RunSummary {
    pub fn new(total_jobs: usize) -> Self {
        Self {
            successes: 0,
            failures: Vec::new(),
            total_jobs,
            current_file: None,
            start_time: Instant::now(),
        }
    }

    pub fn record(&mut self, result: &ConversionResult) {
        self.current_file = result
            .job
            .source_path
            .file_name()
            .and_then(|n| n.to_str())
            .map(String::from);

        match &result.error {
            None => self.successes += 1,
            Some(reason) => self.failures.push(FailedJob {
                source_path: result.job.source_path.clone(),
                reason: reason.clone(),
            }),
        }
    }

    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    pub fn processed(&self) -> usize {
        self.successes + self.failures.len()
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_derivation() {
        let job = ConversionJob::new(PathBuf::from("temas/guia_docente.pdf"), "md");
        assert_eq!(job.output_path, PathBuf::from("temas/guia_docente.md"));

        let job = ConversionJob::new(PathBuf::from("enunciados/hoja1.md"), "docx");
        assert_eq!(job.output_path, PathBuf::from("enunciados/hoja1.docx"));
    }

    #[test]
    fn test_summary_accounting() {
        let mut summary = RunSummary::new(3);

        let ok = ConversionJob::new(PathBuf::from("a.pdf"), "md");
        let bad = ConversionJob::new(PathBuf::from("b.pdf"), "md");

        summary.record(&ConversionResult::success(ok.clone()));
        summary.record(&ConversionResult::failure(bad, "broken xref"));
        summary.record(&ConversionResult::success(ok));

        assert_eq!(summary.successes, 2);
        assert_eq!(summary.failure_count(), 1);
        assert_eq!(summary.processed(), 3);
        assert_eq!(summary.failures[0].reason, "broken xref");
        assert!(summary.has_failures());
    }

    #[test]
    fn test_empty_summary() {
        let summary = RunSummary::new(0);
        assert_eq!(summary.successes, 0);
        assert_eq!(summary.failure_count(), 0);
        assert!(!summary.has_failures());
    }
}
