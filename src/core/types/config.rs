use std::collections::BTreeMap;

use serde_json::{Map, Value};
use strum::IntoEnumIterator;

use crate::types::{HookSlot, LifecycleHook};

// Option names, as they appear in task files
pub const CODE: &str = "code";
pub const SPECS: &str = "specs";
pub const MUTATE: &str = "mutate";
pub const BASE_PATH: &str = "basePath";
pub const TEST_FRAMEWORK: &str = "testFramework";
pub const LOG_LEVEL: &str = "logLevel";
pub const MAX_REPORTED_MUTATION_LENGTH: &str = "maxReportedMutationLength";
pub const MUTATE_PRODUCTION_CODE: &str = "mutateProductionCode";
pub const REPORTERS: &str = "reporters";
pub const IGNORE: &str = "ignore";
pub const DISCARD_DEFAULT_IGNORE: &str = "discardDefaultIgnore";
pub const KARMA: &str = "karma";
pub const KARMA_NOT_INCLUDED: &str = "notIncluded";

pub const DEFAULT_BASE_PATH: &str = ".";
pub const DEFAULT_TEST_FRAMEWORK: &str = "karma";
pub const DEFAULT_LOG_LEVEL: &str = "INFO";
pub const DEFAULT_MAX_REPORTED_MUTATION_LENGTH: u64 = 80;
pub const DEFAULT_MUTATE_PRODUCTION_CODE: bool = false;

/// Options with a fixed meaning; everything else is passed through untouched
pub const KNOWN_OPTIONS: &[&str] = &[
    CODE,
    SPECS,
    MUTATE,
    BASE_PATH,
    TEST_FRAMEWORK,
    LOG_LEVEL,
    MAX_REPORTED_MUTATION_LENGTH,
    MUTATE_PRODUCTION_CODE,
    REPORTERS,
    IGNORE,
    DISCARD_DEFAULT_IGNORE,
    KARMA,
];

/// One partially specified layer of options
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawOptions {
    pub values: Map<String, Value>,
    pub hooks: BTreeMap<HookSlot, LifecycleHook>,
}

impl RawOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_values(values: Map<String, Value>) -> Self {
        Self {
            values,
            hooks: BTreeMap::new(),
        }
    }

    pub fn set(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.values.insert(key.to_string(), value.into());
        self
    }

    pub fn with_hook(mut self, slot: HookSlot, hook: LifecycleHook) -> Self {
        self.hooks.insert(slot, hook);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.hooks.is_empty()
    }

    /// Layers `overlay` on top of `self` without touching either side
    pub fn merge(&self, overlay: &RawOptions) -> RawOptions {
        let mut hooks = self.hooks.clone();
        hooks.extend(overlay.hooks.iter().map(|(slot, hook)| (*slot, hook.clone())));
        RawOptions {
            values: deep_merge(&self.values, &overlay.values),
            hooks,
        }
    }
}

/// The bottom layer every resolution starts from
pub fn default_options() -> RawOptions {
    let mut options = RawOptions::new()
        .set(BASE_PATH, DEFAULT_BASE_PATH)
        .set(TEST_FRAMEWORK, DEFAULT_TEST_FRAMEWORK)
        .set(LOG_LEVEL, DEFAULT_LOG_LEVEL)
        .set(
            MAX_REPORTED_MUTATION_LENGTH,
            DEFAULT_MAX_REPORTED_MUTATION_LENGTH,
        )
        .set(MUTATE_PRODUCTION_CODE, DEFAULT_MUTATE_PRODUCTION_CODE);
    for slot in HookSlot::iter() {
        options.hooks.insert(slot, LifecycleHook::noop());
    }
    options
}

/// Mappings merge key by key, recursively. Any other value in `overlay`,
/// arrays included, replaces the value in `base`.
pub fn deep_merge(base: &Map<String, Value>, overlay: &Map<String, Value>) -> Map<String, Value> {
    let mut merged = base.clone();
    for (key, value) in overlay {
        let next = match (merged.get(key), value) {
            (Some(Value::Object(existing)), Value::Object(incoming)) => {
                Value::Object(deep_merge(existing, incoming))
            }
            _ => value.clone(),
        };
        merged.insert(key.clone(), next);
    }
    merged
}

/// Loose truthiness for flag-like options
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(m) => m,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn overlay_wins_field_by_field() {
        let base = map(json!({"a": 1, "b": "keep"}));
        let overlay = map(json!({"a": 2, "c": true}));
        assert_eq!(
            deep_merge(&base, &overlay),
            map(json!({"a": 2, "b": "keep", "c": true}))
        );
    }

    #[test]
    fn nested_mappings_merge_recursively() {
        let base = map(json!({"karma": {"configFile": "k.conf.js", "browsers": ["Chrome"]}}));
        let overlay = map(json!({"karma": {"browsers": ["Firefox"], "port": 9877}}));
        assert_eq!(
            deep_merge(&base, &overlay),
            map(json!({"karma": {
                "configFile": "k.conf.js",
                "browsers": ["Firefox"],
                "port": 9877
            }}))
        );
    }

    #[test]
    fn non_mapping_replaces_mapping() {
        let base = map(json!({"reporters": {"console": true}}));
        let overlay = map(json!({"reporters": "none"}));
        assert_eq!(deep_merge(&base, &overlay), overlay);
    }

    #[test]
    fn merge_leaves_the_defaults_untouched() {
        let defaults = default_options();
        let before = defaults.clone();
        let merged = defaults.merge(&RawOptions::new().set(BASE_PATH, "elsewhere"));
        assert_eq!(defaults, before);
        assert_eq!(merged.values[BASE_PATH], json!("elsewhere"));
    }

    #[test]
    fn defaults_fill_every_hook_slot() {
        let defaults = default_options();
        assert_eq!(defaults.hooks.len(), 5);
        assert!(defaults.hooks.values().all(LifecycleHook::is_noop));
        assert_eq!(defaults.values[LOG_LEVEL], json!("INFO"));
        assert_eq!(defaults.values[MAX_REPORTED_MUTATION_LENGTH], json!(80));
    }

    #[test]
    fn overlay_hooks_replace_lower_layers() {
        let custom = LifecycleHook::new(|done| done(Ok(())));
        let merged =
            default_options().merge(&RawOptions::new().with_hook(HookSlot::Test, custom.clone()));
        assert_eq!(merged.hooks[&HookSlot::Test], custom);
        assert!(merged.hooks[&HookSlot::Before].is_noop());
    }

    #[test]
    fn truthiness() {
        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!(1)));
        assert!(is_truthy(&json!("yes")));
        assert!(is_truthy(&json!([])));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&Value::Null));
    }
}
