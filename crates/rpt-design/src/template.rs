//! Skeleton selection, loading and variable rendering.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use quick_xml::escape::escape;
use regex::{Captures, Regex};
use rpt_model::{AnalysisResult, GeneratedConfig, ReportType};
use tracing::{debug, warn};

use crate::error::{DesignError, Result};
use crate::profile::{GENERATOR_VERSION, GenerationContext};

pub const BASE_TEMPLATE: &str = "base_template.xml";

// Compiled-in skeletons, used when the template directory lacks a file so
// the binary works from any working directory.

/// base_template.xml
pub const EMBEDDED_BASE_TEMPLATE: &str = include_str!("../templates/birt/base_template.xml");

/// simple_listing_template.xml
pub const EMBEDDED_SIMPLE_LISTING_TEMPLATE: &str =
    include_str!("../templates/birt/simple_listing_template.xml");

/// detailed_listing_template.xml
pub const EMBEDDED_DETAILED_LISTING_TEMPLATE: &str =
    include_str!("../templates/birt/detailed_listing_template.xml");

/// summary_report_template.xml
pub const EMBEDDED_SUMMARY_REPORT_TEMPLATE: &str =
    include_str!("../templates/birt/summary_report_template.xml");

/// Compiled-in skeleton text for a template file name.
pub fn embedded_template(file_name: &str) -> Option<&'static str> {
    match file_name {
        BASE_TEMPLATE => Some(EMBEDDED_BASE_TEMPLATE),
        "simple_listing_template.xml" => Some(EMBEDDED_SIMPLE_LISTING_TEMPLATE),
        "detailed_listing_template.xml" => Some(EMBEDDED_DETAILED_LISTING_TEMPLATE),
        "summary_report_template.xml" => Some(EMBEDDED_SUMMARY_REPORT_TEMPLATE),
        _ => None,
    }
}

/// Creation timestamp format.
pub const CREATED_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// `{{ NAME }}`
static TEMPLATE_VARIABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}").expect("Invalid template variable regex")
});

/// Skeleton file for a report type.
pub fn template_file_name(report_type: ReportType) -> &'static str {
    match report_type {
        ReportType::SimpleListing => "simple_listing_template.xml",
        ReportType::DetailedListing => "detailed_listing_template.xml",
        ReportType::SummaryReport => "summary_report_template.xml",
        ReportType::Dashboard => "dashboard_template.xml",
        ReportType::Empty => BASE_TEMPLATE,
    }
}

/// Where a loaded skeleton came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkeletonSource {
    File(PathBuf),
    Embedded,
}

#[derive(Debug, Clone)]
pub struct Skeleton {
    /// File name of the skeleton actually used.
    pub name: String,
    pub source: SkeletonSource,
    pub text: String,
    /// Set when the requested skeleton was missing and base was used.
    pub fallback_warning: Option<String>,
}

impl Skeleton {
    pub fn is_fallback(&self) -> bool {
        self.fallback_warning.is_some()
    }
}

/// One row of [`TemplateSelector::catalog`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateEntry {
    pub report_type: ReportType,
    pub file_name: &'static str,
    /// Present in the template directory.
    pub exists: bool,
    /// A compiled-in copy is available.
    pub embedded: bool,
}

#[derive(Debug, Clone)]
pub struct TemplateSelector {
    dir: PathBuf,
}

impl TemplateSelector {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn select(&self, report_type: ReportType) -> &'static str {
        template_file_name(report_type)
    }

    pub fn path_for(&self, report_type: ReportType) -> PathBuf {
        self.dir.join(self.select(report_type))
    }

    /// Load the skeleton for `report_type`.
    ///
    /// Lookup order: the mapped file on disk, its compiled-in copy, the base
    /// file on disk, the compiled-in base. The last two carry a fallback
    /// warning.
    pub fn load(&self, report_type: ReportType) -> Result<Skeleton> {
        let name = self.select(report_type);
        let path = self.dir.join(name);
        if path.is_file() {
            debug!(template = name, path = %path.display(), "loading skeleton");
            return read_skeleton(name, &path, None);
        }
        if let Some(text) = embedded_template(name) {
            debug!(template = name, "skeleton not on disk, using embedded copy");
            return Ok(embedded_skeleton(name, text, None));
        }

        let message = format!(
            "template {} not found, using {BASE_TEMPLATE}",
            path.display()
        );
        warn!(template = name, "{message}");

        let base = self.dir.join(BASE_TEMPLATE);
        if base.is_file() {
            return read_skeleton(BASE_TEMPLATE, &base, Some(message));
        }
        debug!("base skeleton not on disk, using embedded copy");
        Ok(embedded_skeleton(
            BASE_TEMPLATE,
            EMBEDDED_BASE_TEMPLATE,
            Some(message),
        ))
    }

    /// Load a skeleton by file name, without fallback.
    pub fn load_named(&self, name: &str) -> Result<Skeleton> {
        let path = self.dir.join(name);
        if !path.is_file() {
            return Err(DesignError::TemplateNotFound { path });
        }
        read_skeleton(name, &path, None)
    }

    /// Every report type with its skeleton file and whether it exists.
    pub fn catalog(&self) -> Vec<TemplateEntry> {
        ReportType::ALL
            .iter()
            .map(|report_type| {
                let file_name = self.select(*report_type);
                TemplateEntry {
                    report_type: *report_type,
                    file_name,
                    exists: self.dir.join(file_name).is_file(),
                    embedded: embedded_template(file_name).is_some(),
                }
            })
            .collect()
    }
}

fn embedded_skeleton(name: &str, text: &str, fallback_warning: Option<String>) -> Skeleton {
    Skeleton {
        name: name.to_string(),
        source: SkeletonSource::Embedded,
        text: text.to_string(),
        fallback_warning,
    }
}

fn read_skeleton(name: &str, path: &Path, fallback_warning: Option<String>) -> Result<Skeleton> {
    let text = fs::read_to_string(path).map_err(|source| DesignError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Skeleton {
        name: name.to_string(),
        source: SkeletonSource::File(path.to_path_buf()),
        text,
        fallback_warning,
    })
}

/// Values substituted into `{{ NAME }}` placeholders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateVars {
    values: BTreeMap<String, String>,
}

impl TemplateVars {
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard variable set for one report.
    pub fn for_report(
        analysis: &AnalysisResult,
        config: &GeneratedConfig,
        ctx: &GenerationContext,
    ) -> Self {
        let data_source = &config.data_source;
        let mut vars = Self::new();
        vars.set("DB_URL", data_source.url());
        vars.set("DB_USER", data_source.user());
        vars.set("DB_PASSWORD", data_source.password());
        vars.set("REPORT_TITLE", report_title(analysis, config));
        vars.set(
            "CREATED_DATE",
            ctx.created_at().format(CREATED_DATE_FORMAT).to_string(),
        );
        vars.set("GENERATOR_VERSION", GENERATOR_VERSION);
        vars
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}

/// Configured report title, else the input file name without extension.
pub fn report_title(analysis: &AnalysisResult, config: &GeneratedConfig) -> String {
    let stem = analysis.file_stem();
    config.title_or(&stem).to_string()
}

/// Substitute `{{ NAME }}` placeholders with XML-escaped values.
/// Unknown names render as empty strings.
pub fn render_skeleton(text: &str, vars: &TemplateVars) -> String {
    TEMPLATE_VARIABLE
        .replace_all(text, |caps: &Captures<'_>| {
            let name = &caps[1];
            match vars.get(name) {
                Some(value) => escape(value).into_owned(),
                None => {
                    debug!(variable = name, "unknown template variable");
                    String::new()
                }
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_report_type_maps_to_a_template() {
        for report_type in ReportType::ALL {
            assert!(template_file_name(report_type).ends_with("_template.xml"));
        }
        assert_eq!(template_file_name(ReportType::Empty), BASE_TEMPLATE);
    }

    #[test]
    fn test_render_escapes_and_blanks_unknown() {
        let mut vars = TemplateVars::new();
        vars.set("REPORT_TITLE", "R&D <draft>");
        let out = render_skeleton("<t>{{ REPORT_TITLE }}|{{MISSING}}|{{  REPORT_TITLE}}</t>", &vars);
        assert_eq!(out, "<t>R&amp;D &lt;draft&gt;||R&amp;D &lt;draft&gt;</t>");
    }

    #[test]
    fn test_report_title_fallback() {
        let analysis = AnalysisResult::new("monthly sales.xlsx");
        assert_eq!(report_title(&analysis, &GeneratedConfig::default()), "monthly sales");
        let config = GeneratedConfig::default().with_title("Sales");
        assert_eq!(report_title(&analysis, &config), "Sales");
    }

    #[test]
    fn test_embedded_base_has_variables() {
        for name in ["DB_URL", "REPORT_TITLE", "CREATED_DATE", "GENERATOR_VERSION"] {
            assert!(EMBEDDED_BASE_TEMPLATE.contains(name), "missing {name}");
        }
    }
}
