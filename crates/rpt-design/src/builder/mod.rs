//! Skeleton + analysis + config to a report design tree.

mod dataset;
mod elements;
mod layout;
mod parameters;
mod script;
pub mod style;

use rpt_model::{AnalysisResult, GeneratedConfig};
use rpt_sql::{NormalizedSql, lint_optional_bindings, normalize_with, sanitize};
use tracing::{debug, warn};

use crate::error::Result;
use crate::ids::IdGenerator;
use crate::parse::parse_document;
use crate::profile::{GenerationContext, GeneratorProfile};
use crate::template::{TemplateVars, render_skeleton, report_title};
use crate::tree::Document;

pub use dataset::{ColumnSpec, column_specs};
pub use elements::{DesignWriter, js_string};
pub use layout::title_html;
pub use script::INITIALIZE_SCRIPT;

/// A built design tree, ready for serialization.
#[derive(Debug, Clone)]
pub struct ReportDocument {
    pub tree: Document,
    pub profile: GeneratorProfile,
    pub title: String,
    /// The query as installed in the dataset.
    pub query: NormalizedSql,
    /// Recoverable conditions noticed while building.
    pub warnings: Vec<String>,
}

pub struct DocumentBuilder<'a> {
    ctx: &'a GenerationContext,
}

impl<'a> DocumentBuilder<'a> {
    pub fn new(ctx: &'a GenerationContext) -> Self {
        Self { ctx }
    }

    /// Render `skeleton`, parse it, and install script, dataset, layout and
    /// parameters. The id source starts fresh for every call.
    pub fn build(
        &self,
        skeleton: &str,
        analysis: &AnalysisResult,
        config: &GeneratedConfig,
    ) -> Result<ReportDocument> {
        let profile = self.ctx.profile;
        let title = report_title(analysis, config);

        let vars = TemplateVars::for_report(analysis, config, self.ctx);
        let rendered = render_skeleton(skeleton, &vars);
        let mut tree = parse_document(&rendered)?;
        let mut ids = IdGenerator::for_document(&tree);

        let (query, warnings) = prepare_query(config, &profile);
        let columns = column_specs(analysis.primary_table());

        let mut writer = DesignWriter::new(&mut tree, &mut ids, profile.script_encoding);
        script::install_initialize_method(&mut writer);
        dataset::install_data_set(&mut writer, &columns, &query, &config.parameters);
        layout::install_layout(&mut writer, &title, &columns);
        parameters::install_parameters(&mut writer, &config.parameters);

        debug!(
            file_name = %analysis.file_name,
            column_count = columns.len(),
            param_count = query.params.len(),
            chart_count = analysis.chart_count(),
            "built report document"
        );

        Ok(ReportDocument {
            tree,
            profile,
            title,
            query,
            warnings,
        })
    }
}

/// Convenience wrapper around [`DocumentBuilder::build`].
pub fn build(
    skeleton: &str,
    analysis: &AnalysisResult,
    config: &GeneratedConfig,
    ctx: &GenerationContext,
) -> Result<ReportDocument> {
    DocumentBuilder::new(ctx).build(skeleton, analysis, config)
}

/// Sanitize (when enabled) and normalize the configured query.
fn prepare_query(config: &GeneratedConfig, profile: &GeneratorProfile) -> (NormalizedSql, Vec<String>) {
    let mut warnings = Vec::new();
    if config.sql_query.is_none() {
        debug!("no query supplied, using placeholder query");
    }

    let sanitized = sanitize(config.query(), &profile.sanitize);
    for pass in &sanitized.applied {
        warnings.push(format!("query rewritten by sanitization pass {pass}"));
    }

    let normalized = normalize_with(&sanitized.sql, profile.quote_style);
    if let Some(message) = lint_optional_bindings(&normalized.text) {
        warnings.push(message);
    }
    for name in &normalized.params {
        if config.parameter(name).is_none() {
            warn!(param = %name, "query parameter has no report parameter declaration");
        }
    }
    (normalized, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rpt_model::{ParameterSpec, TableInfo};
    use rpt_sql::SanitizeOptions;

    fn test_analysis() -> AnalysisResult {
        AnalysisResult::new("codes.xlsx")
            .with_table(TableInfo::new("Sheet1", vec!["code".into(), "name".into()]).with_row_count(10))
    }

    fn build_default(config: &GeneratedConfig) -> ReportDocument {
        let ctx = GenerationContext::default();
        build(crate::template::EMBEDDED_BASE_TEMPLATE, &test_analysis(), config, &ctx).unwrap()
    }

    #[test]
    fn test_initialize_method_follows_last_property() {
        let report = build_default(&GeneratedConfig::default());
        let doc = &report.tree;
        let root = doc.root();
        let method = doc
            .find_child_by_attr(root, "method", "name", "initialize")
            .unwrap();
        let position = doc.position_of(root, method).unwrap();
        let previous = doc.children(root)[position - 1];
        assert!(doc.is_element(previous, "property"));
        assert!(doc.text_content(method).contains("function day()"));
    }

    #[test]
    fn test_existing_initialize_method_is_replaced() {
        let skeleton = crate::template::EMBEDDED_BASE_TEMPLATE.replace(
            "<data-sources>",
            "<method name=\"initialize\">old()</method><data-sources>",
        );
        let ctx = GenerationContext::default();
        let report = build(&skeleton, &test_analysis(), &GeneratedConfig::default(), &ctx).unwrap();
        let methods: Vec<_> = report
            .tree
            .child_elements(report.tree.root(), "method")
            .collect();
        assert_eq!(methods.len(), 1);
        assert!(!report.tree.text_content(methods[0]).contains("old()"));
    }

    #[test]
    fn test_parameters_precede_data_sources() {
        let config = GeneratedConfig::with_query("SELECT * FROM \"T\" WHERE a = :code")
            .with_parameter(ParameterSpec::new("code").required(true));
        let report = build_default(&config);
        let doc = &report.tree;
        let root = doc.root();
        let params = doc.find_child(root, "parameters").unwrap();
        let sources = doc.find_child(root, "data-sources").unwrap();
        assert_eq!(
            doc.position_of(root, params).unwrap() + 1,
            doc.position_of(root, sources).unwrap()
        );
        let scalar = doc.find_child(params, "scalar-parameter").unwrap();
        assert_eq!(doc.attr(scalar, "name"), Some("code"));
        let required = doc
            .find_child_by_attr(scalar, "property", "name", "isRequired")
            .unwrap();
        assert_eq!(doc.text_content(required), "true");
    }

    #[test]
    fn test_no_parameters_section_without_parameters() {
        let report = build_default(&GeneratedConfig::default());
        assert!(report.tree.find_child(report.tree.root(), "parameters").is_none());
    }

    #[test]
    fn test_bindings_follow_placeholder_order() {
        let config = GeneratedConfig::with_query("SELECT * FROM 'T' WHERE b = :second AND a = :first")
            .with_parameter(ParameterSpec::new("first"));
        let report = build_default(&config);
        let doc = &report.tree;
        let bindings = doc
            .find_all(doc.root(), "list-property")
            .into_iter()
            .find(|id| doc.attr(*id, "name") == Some("parameterBindings"))
            .unwrap();
        let names: Vec<String> = doc
            .child_elements(bindings, "structure")
            .map(|s| {
                let prop = doc.find_child_by_attr(s, "property", "name", "paramName").unwrap();
                doc.text_content(prop)
            })
            .collect();
        assert_eq!(names, vec!["second", "first"]);

        let structures: Vec<_> = doc.child_elements(bindings, "structure").collect();
        assert!(doc.find_child(structures[0], "expression").is_none());
        let value = doc.find_child(structures[1], "expression").unwrap();
        assert_eq!(doc.text_content(value), r#"params["first"].value"#);
    }

    #[test]
    fn test_placeholder_query_has_no_bindings() {
        let report = build_default(&GeneratedConfig::default());
        assert!(report.query.params.is_empty());
        let doc = &report.tree;
        let has_bindings = doc
            .find_all(doc.root(), "list-property")
            .into_iter()
            .any(|id| doc.attr(id, "name") == Some("parameterBindings"));
        assert!(!has_bindings);
    }

    #[test]
    fn test_sanitization_reported_as_warning() {
        let ctx = GenerationContext::default().with_profile(GeneratorProfile {
            sanitize: SanitizeOptions::all(),
            ..GeneratorProfile::default()
        });
        let config = GeneratedConfig::with_query("SELECT 'a' as a, 'b' as b");
        let report = build(
            crate::template::EMBEDDED_BASE_TEMPLATE,
            &test_analysis(),
            &config,
            &ctx,
        )
        .unwrap();
        assert_eq!(report.query.text, rpt_sql::FALLBACK_QUERY);
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_table_omitted_without_tables() {
        let ctx = GenerationContext::default();
        let report = build(
            crate::template::EMBEDDED_BASE_TEMPLATE,
            &AnalysisResult::new("empty.xlsx"),
            &GeneratedConfig::default(),
            &ctx,
        )
        .unwrap();
        let doc = &report.tree;
        let body = doc.find_first(doc.root(), "body").unwrap();
        assert_eq!(doc.child_elements(body, "grid").count(), 2);
        assert!(doc.find_child(body, "table").is_none());
        assert_eq!(report.title, "empty");
    }
}
