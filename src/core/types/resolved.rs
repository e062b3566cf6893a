use std::path::PathBuf;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::types::{IgnoreMatcher, IgnorePattern, LifecycleHooks, LogLevel};

/// Fully merged, expanded and validated options for one task target
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedOptions {
    pub base_path: PathBuf,
    pub code: Vec<PathBuf>,
    pub specs: Vec<PathBuf>,
    pub mutate: Vec<PathBuf>,
    pub test_framework: String,
    pub log_level: LogLevel,
    pub max_reported_mutation_length: u64,
    pub mutate_production_code: bool,
    pub reporters: Map<String, Value>,
    /// None only when the default was discarded and nothing was supplied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore: Option<Vec<IgnorePattern>>,
    pub discard_default_ignore: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub karma: Option<KarmaOptions>,
    #[serde(skip)]
    pub hooks: LifecycleHooks,
    /// Options without a fixed meaning, passed through to the engine
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ResolvedOptions {
    pub fn ignore_matcher(&self) -> Result<Option<IgnoreMatcher>, regex::Error> {
        self.ignore.as_deref().map(IgnoreMatcher::new).transpose()
    }
}

/// Settings for the companion karma runner
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KarmaOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_included: Option<Vec<PathBuf>>,
    #[serde(flatten)]
    pub settings: Map<String, Value>,
}
