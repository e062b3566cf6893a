use std::path::PathBuf;

use console::style;

use crate::core::cli::ResolveArgs;
use crate::core::diagnostics::ConsoleDiagnostics;
use crate::core::resolver::OptionsResolver;
use crate::core::store::TaskConfigStore;
use crate::types::{AppResult, ResolvedOptions};

/// Prints the resolved options. Returns the process exit code.
pub fn execute_resolve(store: &dyn TaskConfigStore, args: ResolveArgs) -> AppResult<i32> {
    let diagnostics = ConsoleDiagnostics;
    let resolver = OptionsResolver::new(store, &diagnostics);
    let Some(resolved) = resolver.resolve(&args.task, args.target.as_deref())? else {
        return Ok(1);
    };

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&resolved)?);
    } else {
        print_table(&resolved)?;
    }
    Ok(0)
}

fn print_table(resolved: &ResolvedOptions) -> AppResult<()> {
    println!("{}", style("Resolved Options:").bold());
    println!();
    println!("  basePath: {}", resolved.base_path.display());
    print_files("code", &resolved.code);
    print_files("specs", &resolved.specs);
    print_files("mutate", &resolved.mutate);

    println!();
    println!("  testFramework: {}", resolved.test_framework);
    println!("  logLevel: {}", resolved.log_level);
    println!(
        "  maxReportedMutationLength: {}",
        resolved.max_reported_mutation_length
    );
    println!(
        "  mutateProductionCode: {}",
        resolved.mutate_production_code
    );
    println!(
        "  reporters: {}",
        serde_json::to_string(&resolved.reporters)?
    );
    match &resolved.ignore {
        Some(patterns) => {
            println!("  ignore:");
            for pattern in patterns {
                println!("    - {}", pattern.as_str());
            }
        }
        None => println!("  ignore: (discarded)"),
    }

    if let Some(karma) = &resolved.karma {
        println!();
        println!("  karma:");
        if let Some(not_included) = &karma.not_included {
            print_files("  notIncluded", not_included);
        }
        for (key, value) in &karma.settings {
            println!("    {key}: {value}");
        }
    }

    if !resolved.extra.is_empty() {
        println!();
        for (key, value) in &resolved.extra {
            println!("  {key}: {value}");
        }
    }
    Ok(())
}

fn print_files(label: &str, files: &[PathBuf]) {
    if files.is_empty() {
        println!("  {label}: []");
        return;
    }
    println!("  {label}: ({} file(s))", files.len());
    for file in files {
        println!("    - {}", file.display());
    }
}
