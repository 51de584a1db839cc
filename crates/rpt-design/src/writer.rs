//! Report files on disk.

use std::fs;
use std::path::{Path, PathBuf};

use rpt_model::{AnalysisResult, GeneratedConfig};
use tracing::{info, info_span};

use crate::builder::DocumentBuilder;
use crate::error::{DesignError, Result};
use crate::profile::GenerationContext;
use crate::serialize::serialize;
use crate::template::TemplateSelector;

/// Appended to the input file stem to name the output file.
pub const OUTPUT_SUFFIX: &str = "_generated.rptdesign";

/// Output file name for an input file name.
pub fn output_file_name(input_file_name: &str) -> String {
    let stem = Path::new(input_file_name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(input_file_name);
    format!("{stem}{OUTPUT_SUFFIX}")
}

/// Write `text` to `<output_dir>/<stem>_generated.rptdesign`, creating the
/// directory if needed.
pub fn write_report(output_dir: &Path, input_file_name: &str, text: &str) -> Result<PathBuf> {
    fs::create_dir_all(output_dir).map_err(|source| DesignError::Write {
        path: output_dir.to_path_buf(),
        source,
    })?;
    let path = output_dir.join(output_file_name(input_file_name));
    fs::write(&path, text).map_err(|source| DesignError::Write {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

#[derive(Debug, Clone)]
pub struct GeneratedReport {
    pub path: PathBuf,
    /// Skeleton file actually used.
    pub template: String,
    pub warnings: Vec<String>,
}

/// Select, load, build, serialize and write one report.
pub fn generate_report(
    ctx: &GenerationContext,
    analysis: &AnalysisResult,
    config: &GeneratedConfig,
) -> Result<GeneratedReport> {
    let span = info_span!("report", file_name = %analysis.file_name);
    let _guard = span.enter();

    let selector = TemplateSelector::new(&ctx.template_dir);
    let skeleton = selector.load(analysis.suggested_report_type)?;

    let report = DocumentBuilder::new(ctx).build(&skeleton.text, analysis, config)?;
    let text = serialize(&report)?;
    let path = write_report(&ctx.output_dir, &analysis.file_name, &text)?;

    let mut warnings = Vec::new();
    warnings.extend(skeleton.fallback_warning);
    warnings.extend(report.warnings);

    info!(
        path = %path.display(),
        template = %skeleton.name,
        warning_count = warnings.len(),
        "report generated"
    );
    Ok(GeneratedReport {
        path,
        template: skeleton.name,
        warnings,
    })
}
