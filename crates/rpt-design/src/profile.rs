//! Generation settings passed explicitly into the builder.

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use rpt_sql::{QuoteStyle, SanitizeOptions};
use serde::{Deserialize, Serialize};

/// Environment variable overriding the template directory.
pub const TEMPLATE_DIR_ENV: &str = "RPT_TEMPLATE_DIR";

pub const DEFAULT_TEMPLATE_DIR: &str = "templates/birt";

pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Written into the `createdBy` property of generated documents.
pub const GENERATOR_VERSION: &str = concat!("rptdesign ", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamespaceMode {
    /// Strip element prefixes and declare one unprefixed default namespace.
    #[default]
    DefaultOnly,
    /// Emit element names and namespace declarations exactly as parsed.
    Preserve,
}

/// How script and HTML fragments are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptEncoding {
    /// As literal fragments inside CDATA sections.
    #[default]
    Literal,
    /// As ordinary escaped character data.
    Escaped,
}

/// The points where historical generator variants differed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GeneratorProfile {
    #[serde(default)]
    pub namespace: NamespaceMode,
    #[serde(default)]
    pub script_encoding: ScriptEncoding,
    #[serde(default)]
    pub quote_style: QuoteStyle,
    #[serde(default)]
    pub sanitize: SanitizeOptions,
}

impl GeneratorProfile {
    /// Behaviour of the older generator: escaped script text, aggressive
    /// requoting and both sanitization passes.
    pub fn legacy() -> Self {
        Self {
            namespace: NamespaceMode::DefaultOnly,
            script_encoding: ScriptEncoding::Escaped,
            quote_style: QuoteStyle::Aggressive,
            sanitize: SanitizeOptions::all(),
        }
    }
}

/// Everything one generation run needs, with no ambient global state.
///
/// The id source is not stored here: each build starts a fresh one.
#[derive(Debug, Clone)]
pub struct GenerationContext {
    pub template_dir: PathBuf,
    pub output_dir: PathBuf,
    pub profile: GeneratorProfile,
    /// Fixed creation timestamp; the current local time when unset.
    pub created_at: Option<NaiveDateTime>,
}

impl GenerationContext {
    pub fn new(template_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            template_dir: template_dir.into(),
            output_dir: output_dir.into(),
            profile: GeneratorProfile::default(),
            created_at: None,
        }
    }

    /// Template directory from `RPT_TEMPLATE_DIR`, else the default.
    pub fn from_env() -> Self {
        let template_dir = std::env::var_os(TEMPLATE_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TEMPLATE_DIR));
        Self::new(template_dir, DEFAULT_OUTPUT_DIR)
    }

    #[must_use]
    pub fn with_profile(mut self, profile: GeneratorProfile) -> Self {
        self.profile = profile;
        self
    }

    #[must_use]
    pub fn with_created_at(mut self, created_at: NaiveDateTime) -> Self {
        self.created_at = Some(created_at);
        self
    }

    #[must_use]
    pub fn with_output_dir(mut self, output_dir: impl AsRef<Path>) -> Self {
        self.output_dir = output_dir.as_ref().to_path_buf();
        self
    }

    pub fn created_at(&self) -> NaiveDateTime {
        self.created_at
            .unwrap_or_else(|| Local::now().naive_local())
    }
}

impl Default for GenerationContext {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE_DIR, DEFAULT_OUTPUT_DIR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile() {
        let profile = GeneratorProfile::default();
        assert_eq!(profile.namespace, NamespaceMode::DefaultOnly);
        assert_eq!(profile.script_encoding, ScriptEncoding::Literal);
        assert_eq!(profile.quote_style, QuoteStyle::Identifiers);
        assert!(!profile.sanitize.is_enabled());
    }

    #[test]
    fn test_legacy_profile() {
        let profile = GeneratorProfile::legacy();
        assert_eq!(profile.script_encoding, ScriptEncoding::Escaped);
        assert_eq!(profile.quote_style, QuoteStyle::Aggressive);
        assert!(profile.sanitize.constant_select_fallback);
        assert!(profile.sanitize.reserved_table_name);
    }

    #[test]
    fn test_fixed_timestamp() {
        let at = NaiveDateTime::parse_from_str("2024-03-01 08:30:00", "%Y-%m-%d %H:%M:%S").unwrap();
        let ctx = GenerationContext::default().with_created_at(at);
        assert_eq!(ctx.created_at(), at);
    }
}
