//! Sequential batch generation.
//!
//! A failing job is logged and recorded; the remaining jobs still run.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rpt_design::{GenerationContext, generate_report};
use rpt_model::ReportJob;
use rpt_validate::validate_file;
use tracing::{error, info, info_span, warn};

use crate::types::{BatchResult, JobOutcome};

/// Load one job file, generate its report and optionally validate the output.
pub fn run_job(ctx: &GenerationContext, job_path: &Path, validate: bool) -> Result<JobOutcome> {
    let job = ReportJob::load(job_path).context("load job")?;
    let generated = generate_report(ctx, &job.analysis, &job.config)
        .with_context(|| format!("generate report for {}", job.analysis.file_name))?;
    for warning in &generated.warnings {
        warn!(source = %job.analysis.file_name, "{warning}");
    }

    let validation = validate.then(|| validate_file(&generated.path));
    if let Some(report) = &validation {
        for message in &report.errors {
            error!(path = %generated.path.display(), "{message}");
        }
    }

    Ok(JobOutcome {
        job: job_path.to_path_buf(),
        source: Some(job.analysis.file_name),
        output: Some(generated.path),
        template: Some(generated.template),
        warnings: generated.warnings,
        validation,
        error: None,
    })
}

/// Run every job in order.
pub fn run_batch(ctx: &GenerationContext, jobs: &[PathBuf], validate: bool) -> BatchResult {
    let mut outcomes = Vec::with_capacity(jobs.len());
    for job_path in jobs {
        let span = info_span!("job", job = %job_path.display());
        let _guard = span.enter();
        let outcome = match run_job(ctx, job_path, validate) {
            Ok(outcome) => outcome,
            Err(err) => {
                let message = format!("{err:#}");
                error!(error = %message, "job failed");
                JobOutcome::failed(job_path.clone(), message)
            }
        };
        outcomes.push(outcome);
    }

    let has_errors = outcomes.iter().any(JobOutcome::has_errors);
    let result = BatchResult {
        output_dir: ctx.output_dir.clone(),
        jobs: outcomes,
        has_errors,
    };
    info!(
        succeeded = result.succeeded(),
        failed = result.failed(),
        "batch complete"
    );
    result
}
