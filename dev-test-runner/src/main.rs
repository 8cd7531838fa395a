//! Golden-file runner: compiles every `*.schema.json` in a fixture directory and
//! diffs it against the sibling `*.d.ts`.
//!
//! usage: dev-test-runner [FIXTURE_DIR]   (defaults to ./fixtures)
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use colored::Colorize;
use schema_tsd::compile;

fn expected_path(schema_path: &Path) -> PathBuf {
    let file_name = schema_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    let stem = file_name.strip_suffix(".schema.json").unwrap_or(file_name);
    schema_path.with_file_name(format!("{stem}.d.ts"))
}

/// `Ok(None)` on a match, `Ok(Some(actual))` on a mismatch.
fn run_fixture(fixture_dir: &Path, schema_path: &Path) -> Result<Option<String>> {
    let source = std::fs::read_to_string(schema_path)
        .with_context(|| format!("reading {}", schema_path.display()))?;
    let schema = serde_json::from_str::<serde_json::Value>(&source)
        .with_context(|| format!("parsing {}", schema_path.display()))?;
    let expected_path = expected_path(schema_path);
    let expected = std::fs::read_to_string(&expected_path)
        .with_context(|| format!("reading {}", expected_path.display()))?;

    let actual = compile(schema, Some(fixture_dir))
        .with_context(|| format!("compiling {}", schema_path.display()))?;
    if actual.trim_end() == expected.trim_end() {
        Ok(None)
    } else {
        Ok(Some(actual))
    }
}

fn main() -> Result<()> {
    let fixture_dir = PathBuf::from(std::env::args().nth(1).unwrap_or_else(|| "fixtures".into()));
    let pattern = format!("{}/*.schema.json", fixture_dir.display());

    let mut failures = 0usize;
    let mut total = 0usize;
    for entry in glob::glob(&pattern)? {
        let schema_path = entry?;
        total += 1;
        match run_fixture(&fixture_dir, &schema_path) {
            Ok(None) => {
                eprintln!("{} {}", "✅ pass".green(), schema_path.display());
            }
            Ok(Some(actual)) => {
                failures += 1;
                eprintln!("{} {}", "❌ mismatch".red().bold(), schema_path.display());
                eprintln!("{}\n{actual}\n{}", "—— actual ——".yellow(), "————————————".yellow());
            }
            Err(error) => {
                failures += 1;
                eprintln!("{} {}: {error:#}", "❌ error".red().bold(), schema_path.display());
            }
        }
    }

    eprintln!("{total} fixtures, {failures} failed");
    if failures > 0 {
        std::process::exit(1);
    }
    Ok(())
}
