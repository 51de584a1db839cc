//! A generation job: one analysis result paired with its generated config.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::AnalysisResult;
use crate::config::GeneratedConfig;
use crate::error::{ModelError, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportJob {
    pub analysis: AnalysisResult,
    #[serde(default)]
    pub config: GeneratedConfig,
}

impl ReportJob {
    pub fn new(analysis: AnalysisResult, config: GeneratedConfig) -> Self {
        Self { analysis, config }
    }

    /// Load a job from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ModelError::Json {
            path: path.to_path_buf(),
            source,
        })
    }
}
