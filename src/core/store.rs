use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde_json::Value;

use crate::types::config::RawOptions;
use crate::types::{StoreError, StoreResult};

pub const DEFAULT_TASK_FILENAME: &str = "mutopt.toml";

/// Table holding a scope's options, both for a task and for its targets
const OPTIONS_KEY: &str = "options";

/// Where a host keeps the raw options for its tasks and targets
pub trait TaskConfigStore {
    /// Options for the whole task when `target` is None, otherwise for
    /// that target alone. Missing scopes yield empty options.
    fn options(&self, task: &str, target: Option<&str>) -> StoreResult<RawOptions>;
}

/// Options read from a TOML task file:
///
/// ```toml
/// [mutationTest.options]
/// code = "src/**/*.js"
///
/// [mutationTest.unit.options]
/// specs = "test/unit/**/*.js"
/// ```
#[derive(Debug, Clone, Default)]
pub struct TomlTaskStore {
    tasks: toml::Table,
}

impl TomlTaskStore {
    pub fn parse(contents: &str) -> StoreResult<Self> {
        let tasks = contents.parse::<toml::Table>()?;
        Ok(Self { tasks })
    }

    pub fn load(path: &Path) -> StoreResult<Self> {
        debug!("Reading task file {}", path.display());
        let contents = fs::read_to_string(path).map_err(|source| StoreError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents)
    }

    /// Target names declared under a task
    pub fn targets(&self, task: &str) -> Vec<String> {
        match self.tasks.get(task).and_then(toml::Value::as_table) {
            Some(table) => table
                .iter()
                .filter(|(name, value)| name.as_str() != OPTIONS_KEY && value.is_table())
                .map(|(name, _)| name.clone())
                .collect(),
            None => vec![],
        }
    }
}

impl TaskConfigStore for TomlTaskStore {
    fn options(&self, task: &str, target: Option<&str>) -> StoreResult<RawOptions> {
        let scope_value = match target {
            None => self.tasks.get(task),
            Some(target) => self.tasks.get(task).and_then(|t| t.get(target)),
        };
        let scope = match target {
            None => task.to_string(),
            Some(target) => format!("{task}:{target}"),
        };

        match scope_value.and_then(|s| s.get(OPTIONS_KEY)) {
            None => Ok(RawOptions::new()),
            Some(toml::Value::Table(table)) => {
                let value = serde_json::to_value(table).map_err(|source| StoreError::Convert {
                    scope: scope.clone(),
                    source,
                })?;
                match value {
                    Value::Object(values) => Ok(RawOptions::from_values(values)),
                    _ => Err(StoreError::NotATable { scope }),
                }
            }
            Some(_) => Err(StoreError::NotATable { scope }),
        }
    }
}

/// Options registered in code, which may carry lifecycle hooks
#[derive(Debug, Clone, Default)]
pub struct MemoryTaskStore {
    scopes: HashMap<(String, Option<String>), RawOptions>,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_task_options(&mut self, task: &str, options: RawOptions) {
        self.scopes.insert((task.to_string(), None), options);
    }

    pub fn set_target_options(&mut self, task: &str, target: &str, options: RawOptions) {
        self.scopes
            .insert((task.to_string(), Some(target.to_string())), options);
    }
}

impl TaskConfigStore for MemoryTaskStore {
    fn options(&self, task: &str, target: Option<&str>) -> StoreResult<RawOptions> {
        let key = (task.to_string(), target.map(str::to_string));
        Ok(self.scopes.get(&key).cloned().unwrap_or_default())
    }
}

/// Walks up from `start` and returns the first task file found
pub fn find_nearest_task_file(start: &Path, filename: &str) -> Option<PathBuf> {
    for dir in start.ancestors() {
        let candidate = dir.join(filename);
        if candidate.is_file() {
            return Some(candidate);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const TASK_FILE: &str = r#"
[mutationTest.options]
code = "src/**/*.js"
basePath = "app"

[mutationTest.options.karma]
configFile = "karma.conf.js"

[mutationTest.unit.options]
specs = ["test/unit/**/*.js"]
logLevel = "DEBUG"

[mutationTest.bare]
"#;

    #[test]
    fn reads_task_scope() {
        let store = TomlTaskStore::parse(TASK_FILE).unwrap();
        let options = store.options("mutationTest", None).unwrap();
        assert_eq!(options.values["code"], json!("src/**/*.js"));
        assert_eq!(options.values["karma"], json!({"configFile": "karma.conf.js"}));
        assert!(options.hooks.is_empty());
    }

    #[test]
    fn reads_target_scope_only() {
        let store = TomlTaskStore::parse(TASK_FILE).unwrap();
        let options = store.options("mutationTest", Some("unit")).unwrap();
        assert_eq!(options.values.len(), 2);
        assert_eq!(options.values["specs"], json!(["test/unit/**/*.js"]));
    }

    #[test]
    fn missing_scopes_are_empty() {
        let store = TomlTaskStore::parse(TASK_FILE).unwrap();
        assert!(store.options("mutationTest", Some("bare")).unwrap().is_empty());
        assert!(store.options("mutationTest", Some("nope")).unwrap().is_empty());
        assert!(store.options("otherTask", None).unwrap().is_empty());
    }

    #[test]
    fn options_must_be_a_table() {
        let store = TomlTaskStore::parse("[task]\noptions = 3\n").unwrap();
        match store.options("task", None) {
            Err(StoreError::NotATable { scope }) => assert_eq!(scope, "task"),
            other => panic!("expected NotATable, got {other:?}"),
        }
    }

    #[test]
    fn lists_targets() {
        let store = TomlTaskStore::parse(TASK_FILE).unwrap();
        let mut targets = store.targets("mutationTest");
        targets.sort();
        assert_eq!(targets, ["bare", "unit"]);
        assert!(store.targets("otherTask").is_empty());
    }

    #[test]
    fn rejects_malformed_files() {
        assert!(matches!(
            TomlTaskStore::parse("[unclosed"),
            Err(StoreError::Parse(_))
        ));
    }

    #[test]
    fn memory_store_separates_scopes() {
        let mut store = MemoryTaskStore::new();
        store.set_task_options("t", RawOptions::new().set("code", "a.js"));
        store.set_target_options("t", "x", RawOptions::new().set("code", "b.js"));
        assert_eq!(store.options("t", None).unwrap().values["code"], json!("a.js"));
        assert_eq!(store.options("t", Some("x")).unwrap().values["code"], json!("b.js"));
        assert!(store.options("t", Some("y")).unwrap().is_empty());
    }
}
