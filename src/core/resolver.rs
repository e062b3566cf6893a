use std::path::{Path, PathBuf};

use log::{debug, info};
use serde_json::{Map, Value};
use strum::IntoEnumIterator;

use crate::core::diagnostics::Diagnostics;
use crate::core::expander::{PathExpander, patterns_from_value};
use crate::core::logging::configure_logging;
use crate::core::store::TaskConfigStore;
use crate::types::config::{
    BASE_PATH, CODE, DEFAULT_BASE_PATH, DEFAULT_LOG_LEVEL, DEFAULT_MAX_REPORTED_MUTATION_LENGTH,
    DEFAULT_MUTATE_PRODUCTION_CODE, DEFAULT_TEST_FRAMEWORK, DISCARD_DEFAULT_IGNORE, IGNORE,
    KARMA, KARMA_NOT_INCLUDED, KNOWN_OPTIONS, LOG_LEVEL, MAX_REPORTED_MUTATION_LENGTH, MUTATE,
    MUTATE_PRODUCTION_CODE, REPORTERS, RawOptions, SPECS, TEST_FRAMEWORK, default_options,
    is_truthy,
};
use crate::types::{
    HookSlot, IgnorePattern, KarmaOptions, LifecycleHooks, RequiredOptionError, ResolveError,
    ResolveResult, ResolvedOptions,
};

/// Turns a task's layered raw options into the options handed to the
/// mutation engine.
///
/// Every resolution reconfigures the process-wide logger from the merged
/// `logLevel`, so when several targets resolve in one process the logger
/// reflects whichever resolved last.
pub struct OptionsResolver<'a> {
    store: &'a dyn TaskConfigStore,
    diagnostics: &'a dyn Diagnostics,
    expander: PathExpander,
}

impl<'a> OptionsResolver<'a> {
    pub fn new(store: &'a dyn TaskConfigStore, diagnostics: &'a dyn Diagnostics) -> Self {
        Self {
            store,
            diagnostics,
            expander: PathExpander::new(),
        }
    }

    /// Resolves options for `task`, layering `target`'s options over the
    /// task's when given.
    ///
    /// Returns `Ok(None)` after warning through the diagnostic channel when a
    /// required option is missing or matched no files; the caller must not
    /// proceed in that case.
    pub fn resolve(
        &self,
        task: &str,
        target: Option<&str>,
    ) -> ResolveResult<Option<ResolvedOptions>> {
        let global = self.store.options(task, None)?;
        let local = match target {
            Some(target) => self.store.options(task, Some(target))?,
            None => RawOptions::new(),
        };
        self.resolve_layers(&global, &local)
    }

    pub fn resolve_layers(
        &self,
        global: &RawOptions,
        local: &RawOptions,
    ) -> ResolveResult<Option<ResolvedOptions>> {
        let merged = default_options().merge(global).merge(local);
        let values = &merged.values;

        let log_level = configure_logging(str_option(values, LOG_LEVEL, DEFAULT_LOG_LEVEL)?)?;
        debug!("Merged options: {}", Value::Object(values.clone()));

        let base_path = PathBuf::from(str_option(values, BASE_PATH, DEFAULT_BASE_PATH)?);
        let code = self.expander.expand_value(CODE, values.get(CODE), &base_path)?;
        let specs = self.expander.expand_value(SPECS, values.get(SPECS), &base_path)?;
        let mutate = self.expander.expand_value(MUTATE, values.get(MUTATE), &base_path)?;
        let karma = self.karma_options(values.get(KARMA), &base_path)?;

        // Type faults are raised before the required options are checked
        let reporters = match values.get(REPORTERS) {
            None => None,
            Some(Value::Object(reporters)) => Some(reporters.clone()),
            Some(_) => return Err(invalid(REPORTERS, "a mapping of reporter settings")),
        };

        let discard_default_ignore = values.get(DISCARD_DEFAULT_IGNORE).is_some_and(is_truthy);
        let ignore = resolve_ignore(values.get(IGNORE), discard_default_ignore)?;

        let mut hooks = LifecycleHooks::default();
        for slot in HookSlot::iter() {
            if values.contains_key(slot.key()) {
                return Err(invalid(slot.key(), "a lifecycle callback registered in code"));
            }
            if let Some(hook) = merged.hooks.get(&slot) {
                hooks.set(slot, hook.clone());
            }
        }

        let test_framework = str_option(values, TEST_FRAMEWORK, DEFAULT_TEST_FRAMEWORK)?;
        let max_reported_mutation_length = match values.get(MAX_REPORTED_MUTATION_LENGTH) {
            None => DEFAULT_MAX_REPORTED_MUTATION_LENGTH,
            Some(value) => value
                .as_u64()
                .ok_or_else(|| invalid(MAX_REPORTED_MUTATION_LENGTH, "a non-negative integer"))?,
        };
        let mutate_production_code = match values.get(MUTATE_PRODUCTION_CODE) {
            None => DEFAULT_MUTATE_PRODUCTION_CODE,
            Some(value) => value
                .as_bool()
                .ok_or_else(|| invalid(MUTATE_PRODUCTION_CODE, "a boolean"))?,
        };

        if let Err(err) = are_required_options_set(values, &code, &specs, &mutate) {
            self.diagnostics.warn(&err.to_string());
            return Ok(None);
        }

        let reporters = reporters.unwrap_or_else(default_reporters);

        let extra: Map<String, Value> = values
            .iter()
            .filter(|(key, _)| !KNOWN_OPTIONS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        let resolved = ResolvedOptions {
            base_path,
            code,
            specs,
            mutate,
            test_framework: test_framework.to_string(),
            log_level,
            max_reported_mutation_length,
            mutate_production_code,
            reporters,
            ignore,
            discard_default_ignore,
            karma,
            hooks,
            extra,
        };

        info!(
            "Resolved {} code, {} spec and {} mutate file(s)",
            resolved.code.len(),
            resolved.specs.len(),
            resolved.mutate.len()
        );
        Ok(Some(resolved))
    }

    fn karma_options(
        &self,
        value: Option<&Value>,
        base_path: &Path,
    ) -> ResolveResult<Option<KarmaOptions>> {
        let mut settings = match value {
            None => return Ok(None),
            Some(Value::Object(settings)) => settings.clone(),
            Some(_) => return Err(invalid(KARMA, "a mapping of karma settings")),
        };
        let not_included = match settings.remove(KARMA_NOT_INCLUDED) {
            Some(patterns) => Some(self.expander.expand_value(
                "karma.notIncluded",
                Some(&patterns),
                base_path,
            )?),
            None => None,
        };
        Ok(Some(KarmaOptions {
            not_included,
            settings,
        }))
    }
}

/// Checks the required file options in a fixed order and reports the first
/// one that is missing from `options` or expanded to nothing.
pub fn are_required_options_set(
    options: &Map<String, Value>,
    code: &[PathBuf],
    specs: &[PathBuf],
    mutate: &[PathBuf],
) -> Result<(), RequiredOptionError> {
    for field in [CODE, SPECS, MUTATE] {
        if !options.contains_key(field) {
            return Err(RequiredOptionError::NotSet(field));
        }
    }
    for (field, files) in [(CODE, code), (SPECS, specs), (MUTATE, mutate)] {
        if files.is_empty() {
            return Err(RequiredOptionError::Empty(field));
        }
    }
    Ok(())
}

pub fn default_reporters() -> Map<String, Value> {
    let mut reporters = Map::new();
    reporters.insert("console".to_string(), Value::Bool(true));
    reporters
}

/// The built-in pattern goes first unless discarded
fn resolve_ignore(
    value: Option<&Value>,
    discard_default: bool,
) -> ResolveResult<Option<Vec<IgnorePattern>>> {
    let supplied = match value {
        None | Some(Value::Null) => None,
        Some(value) => Some(
            patterns_from_value(IGNORE, Some(value))?
                .into_iter()
                .map(IgnorePattern::new)
                .collect::<Vec<_>>(),
        ),
    };
    if discard_default {
        return Ok(supplied);
    }
    let mut patterns = vec![IgnorePattern::use_strict()];
    patterns.extend(supplied.unwrap_or_default());
    Ok(Some(patterns))
}

fn str_option<'v>(
    values: &'v Map<String, Value>,
    field: &str,
    default: &'v str,
) -> ResolveResult<&'v str> {
    match values.get(field) {
        None => Ok(default),
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(invalid(field, "a string")),
    }
}

fn invalid(field: &str, expected: &'static str) -> ResolveError {
    ResolveError::InvalidField {
        field: field.to_string(),
        expected,
    }
}
