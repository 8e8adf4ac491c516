//! Runs JSON-Schema-Test-Suite style fixtures against `json-rules`.
//!
//! usage: dev-test-runner [FIXTURE_GLOB] [DESCRIPTION_REGEX]
//!
//! Each fixture file is an array of groups:
//! `[{ "description", "schema", "tests": [{ "description", "data", "valid" }] }]`
mod path_de;

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result, anyhow};
use colored::Colorize;
use json_rules::{Schema, Value};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

static DEFAULT_FIXTURES: Lazy<String> =
    Lazy::new(|| format!("{}/fixtures/draft4/*.json", env!("CARGO_MANIFEST_DIR")));

#[derive(Debug, Deserialize)]
struct Group {
    description: String,
    schema: serde_json::Value,
    tests: Vec<Case>,
}

#[derive(Debug, Deserialize)]
struct Case {
    description: String,
    data: serde_json::Value,
    valid: bool,
}

#[derive(Debug, Default)]
struct Summary {
    passed: usize,
    failed: Vec<String>,
}

fn run_file(path: &Path, filter: Option<&Regex>, summary: &mut Summary) -> Result<()> {
    let label = path.display().to_string();
    let source = std::fs::read_to_string(path).with_context(|| format!("failed to read fixture ({label})"))?;
    let groups: Vec<Group> = path_de::from_str_with_path(&source)
        .map_err(|e| anyhow!("malformed fixture ({label}): {e}"))?;

    for group in groups {
        let schema = Schema::from_document(group.schema);
        for case in group.tests {
            let name = format!("{label} :: {} :: {}", group.description, case.description);
            if filter.is_some_and(|rx| !rx.is_match(&name)) {
                continue;
            }
            let outcome = match &schema {
                Ok(schema) => schema.default_validator().is_valid(&Value::from(case.data)) == case.valid,
                Err(err) => {
                    summary.failed.push(format!("{name} (schema rejected: {err})"));
                    continue;
                }
            };
            if outcome {
                summary.passed += 1;
            } else {
                summary.failed.push(format!("{name} (expected valid = {})", case.valid));
            }
        }
    }
    Ok(())
}

fn run(pattern: &str, filter: Option<&Regex>) -> Result<Summary> {
    let mut summary = Summary::default();
    let mut files = 0;
    for entry in glob::glob(pattern)? {
        run_file(&entry?, filter, &mut summary)?;
        files += 1;
    }
    if files == 0 {
        return Err(anyhow!("no fixtures matched {pattern}"));
    }
    Ok(summary)
}

fn main() -> ExitCode {
    let mut args = std::env::args().skip(1);
    let pattern = args.next().unwrap_or_else(|| DEFAULT_FIXTURES.to_string());
    let filter = match args.next().map(|src| Regex::new(&src)).transpose() {
        Ok(filter) => filter,
        Err(error) => {
            eprintln!("bad filter regex: {error}");
            return ExitCode::from(2);
        }
    };

    let summary = match run(&pattern, filter.as_ref()) {
        Ok(summary) => summary,
        Err(error) => {
            eprintln!("❌ {error:#}");
            return ExitCode::from(2);
        }
    };
    for name in &summary.failed {
        eprintln!("{} {name}", "FAIL".red().bold());
    }
    let line = format!("{} passed, {} failed", summary.passed, summary.failed.len());
    if summary.failed.is_empty() {
        println!("{}", line.green());
        ExitCode::SUCCESS
    } else {
        println!("{}", line.red());
        ExitCode::from(1)
    }
}
