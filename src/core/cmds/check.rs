use log::{error, info};

use crate::core::cli::CheckArgs;
use crate::core::diagnostics::ConsoleDiagnostics;
use crate::core::resolver::OptionsResolver;
use crate::core::store::TomlTaskStore;
use crate::types::AppResult;

/// Resolves every requested target and compiles its ignore patterns.
/// Returns the process exit code.
pub fn execute_check(store: &TomlTaskStore, args: CheckArgs) -> AppResult<i32> {
    let diagnostics = ConsoleDiagnostics;
    let resolver = OptionsResolver::new(store, &diagnostics);

    let targets: Vec<Option<String>> = match args.target {
        Some(target) => vec![Some(target)],
        None => {
            let declared = store.targets(&args.task);
            if declared.is_empty() {
                vec![None]
            } else {
                declared.into_iter().map(Some).collect()
            }
        }
    };

    let mut failures = 0;
    for target in &targets {
        let scope = match target {
            Some(target) => format!("{}:{}", args.task, target),
            None => args.task.clone(),
        };
        let Some(resolved) = resolver.resolve(&args.task, target.as_deref())? else {
            failures += 1;
            continue;
        };
        match resolved.ignore_matcher() {
            Ok(matcher) => info!(
                "{scope}: ok ({} code, {} spec, {} mutate file(s), {} ignore pattern(s))",
                resolved.code.len(),
                resolved.specs.len(),
                resolved.mutate.len(),
                matcher.map_or(0, |m| m.len())
            ),
            Err(e) => {
                error!("{scope}: invalid ignore pattern: {e}");
                failures += 1;
            }
        }
    }

    Ok(if failures == 0 { 0 } else { 1 })
}
