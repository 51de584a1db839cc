//! Generated report configuration, as produced by the external config producer.

use serde::{Deserialize, Serialize};

/// Query used when the producer supplied none.
///
/// The SQL normalizer recognizes this as a placeholder and skips parameter
/// binding for it.
pub const DEFAULT_QUERY: &str = "SELECT 1 as id, 'placeholder' as name";

/// Connection URL used when the producer supplied none.
pub const DEFAULT_DB_URL: &str = "jdbc:jeedsql:jtds:sqlserver://localhost:1433;DatabaseName=QS;";

/// Connection settings passed through to the skeleton untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSourceConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_password: Option<String>,
}

impl DataSourceConfig {
    pub fn url(&self) -> &str {
        self.db_url.as_deref().unwrap_or(DEFAULT_DB_URL)
    }

    pub fn user(&self) -> &str {
        self.db_user.as_deref().unwrap_or_default()
    }

    pub fn password(&self) -> &str {
        self.db_password.as_deref().unwrap_or_default()
    }
}

/// A report-level scalar parameter declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSpec {
    pub name: String,
    #[serde(default = "default_parameter_type")]
    pub data_type: String,
    #[serde(default = "default_prompt")]
    pub prompt: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default = "default_control_type")]
    pub control_type: String,
}

fn default_parameter_type() -> String {
    "string".to_string()
}

fn default_prompt() -> String {
    "Please enter a value".to_string()
}

fn default_control_type() -> String {
    "text-box".to_string()
}

impl ParameterSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: default_parameter_type(),
            prompt: default_prompt(),
            required: false,
            control_type: default_control_type(),
        }
    }

    #[must_use]
    pub fn with_data_type(mut self, data_type: impl Into<String>) -> Self {
        self.data_type = data_type.into();
        self
    }

    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sql_query: Option<String>,
    #[serde(default)]
    pub parameters: Vec<ParameterSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_title: Option<String>,
    #[serde(flatten)]
    pub data_source: DataSourceConfig,
}

impl GeneratedConfig {
    pub fn with_query(sql: impl Into<String>) -> Self {
        Self {
            sql_query: Some(sql.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.report_title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_parameter(mut self, parameter: ParameterSpec) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// The configured query, or [`DEFAULT_QUERY`] when absent or blank.
    pub fn query(&self) -> &str {
        match self.sql_query.as_deref() {
            Some(sql) if !sql.trim().is_empty() => sql,
            _ => DEFAULT_QUERY,
        }
    }

    /// The configured title, or the given fallback when absent or blank.
    pub fn title_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self.report_title.as_deref() {
            Some(title) if !title.trim().is_empty() => title,
            _ => fallback,
        }
    }

    pub fn parameter(&self, name: &str) -> Option<&ParameterSpec> {
        self.parameters.iter().find(|param| param.name == name)
    }
}
