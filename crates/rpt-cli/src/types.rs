use std::path::PathBuf;

use rpt_model::ValidationReport;

/// Result of one job in a generation batch.
#[derive(Debug)]
pub struct JobOutcome {
    pub job: PathBuf,
    /// Source spreadsheet named by the job, when the job could be read.
    pub source: Option<String>,
    pub output: Option<PathBuf>,
    pub template: Option<String>,
    pub warnings: Vec<String>,
    pub validation: Option<ValidationReport>,
    /// Failure that aborted this job.
    pub error: Option<String>,
}

impl JobOutcome {
    pub fn failed(job: PathBuf, error: String) -> Self {
        Self {
            job,
            source: None,
            output: None,
            template: None,
            warnings: Vec::new(),
            validation: None,
            error: Some(error),
        }
    }

    /// Generation failed or the written file has validation errors.
    pub fn has_errors(&self) -> bool {
        self.error.is_some() || self.validation.as_ref().is_some_and(|r| !r.is_success())
    }
}

#[derive(Debug)]
pub struct BatchResult {
    pub output_dir: PathBuf,
    pub jobs: Vec<JobOutcome>,
    pub has_errors: bool,
}

impl BatchResult {
    pub fn succeeded(&self) -> usize {
        self.jobs.iter().filter(|job| job.error.is_none()).count()
    }

    pub fn failed(&self) -> usize {
        self.jobs.len() - self.succeeded()
    }
}
