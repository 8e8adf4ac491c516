//! Minimal CLI: schema + JSON/NDJSON documents → validation report
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result, anyhow, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use json_rules::{Report, Schema, Value};
use rayon::prelude::*;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// validate JSON/NDJSON documents against a draft-04 JSON schema
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    /// more logging on stderr (-v info, -vv debug, -vvv trace); RUST_LOG wins when set
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// validate every input document and print a report
    Validate(ValidateOut),
    /// only check that the schema itself is well formed
    Check(CheckOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// treat input as newline-delimited JSON (NDJSON)
    #[arg(long, default_value_t = false)]
    ndjson: bool,

    /// JSON Pointer to select a subnode in each document (e.g. /data/items/0/payload)
    #[arg(long)]
    json_pointer: Option<String>,

    /// One or more inputs. May be literal paths or quoted glob patterns or '-' for stdin
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Text,
    Json,
}

#[derive(clap::Parser, Debug)]
struct ValidateOut {
    /// schema document (.json)
    #[arg(long, short)]
    schema: PathBuf,

    #[command(flatten)]
    input_settings: InputSettings,

    /// report format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// output file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(clap::Parser, Debug)]
struct CheckOut {
    /// schema document (.json)
    #[arg(long, short)]
    schema: PathBuf,
}

/// How a run ended, mapped onto the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Valid,
    Invalid,
    NoOp,
}

impl Outcome {
    pub fn exit_code(self) -> ExitCode {
        match self {
            Outcome::Valid | Outcome::NoOp => ExitCode::SUCCESS,
            Outcome::Invalid => ExitCode::from(1),
        }
    }
}

#[derive(Debug, Serialize)]
struct DocumentResult {
    source: String,
    #[serde(flatten)]
    report: Report,
}

#[derive(Debug, Serialize)]
struct RunReport {
    schema: String,
    checked_at: String,
    valid: usize,
    invalid: usize,
    documents: Vec<DocumentResult>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    /// Calls `apply` with a source label and the (pointer-selected) value of
    /// every document named by the inputs.
    fn load_process(&self, mut apply: impl FnMut(String, serde_json::Value)) -> Result<()> {
        let source_paths = resolve_file_path_patterns(&self.input)
            .context("failed to resolve input file paths")?;
        for source_path in source_paths {
            let (label, source) = if source_path.as_os_str() == "-" {
                let source = std::io::read_to_string(std::io::stdin()).context("failed to read stdin")?;
                ("<stdin>".to_owned(), source)
            } else {
                let label = source_path.to_string_lossy().to_string();
                let source = std::fs::read_to_string(&source_path)
                    .with_context(|| format!("failed to read source file ({label})"))?;
                (label, source)
            };
            if self.ndjson {
                for (index, line) in source.lines().enumerate() {
                    if line.trim().is_empty() {
                        continue;
                    }
                    let label = format!("{label}:{}", index + 1);
                    let json_value = serde_json::from_str::<serde_json::Value>(line)
                        .with_context(|| format!("failed to parse JSON line ({label})"))?;
                    apply(label.clone(), self.select(json_value, &label)?);
                }
            } else {
                let json_value = serde_json::from_str::<serde_json::Value>(&source)
                    .with_context(|| format!("failed to parse JSON source file ({label})"))?;
                let selected = self.select(json_value, &label)?;
                apply(label, selected);
            }
        }
        Ok(())
    }

    fn select(&self, mut value: serde_json::Value, label: &str) -> Result<serde_json::Value> {
        match self.json_pointer.as_deref() {
            None => Ok(value),
            Some(pointer) => value
                .pointer_mut(pointer)
                .map(serde_json::Value::take)
                .ok_or_else(|| anyhow!("json pointer {pointer} selects nothing in {label}")),
        }
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn init_tracing(&self) {
        let fallback = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    pub fn run(&self) -> Result<Outcome> {
        match &self.cmd {
            Command::Check(target) => {
                load_schema(&target.schema)?;
                println!("{} {}", "ok".green().bold(), target.schema.display());
                Ok(Outcome::Valid)
            }
            Command::Validate(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(Outcome::NoOp);
                }

                // 1) compile the schema once
                let schema = load_schema(&target.schema)?;
                let validator = schema.default_validator();

                // 2) gather documents
                let mut documents = Vec::new();
                target.input_settings.load_process(|source, value| {
                    documents.push((source, value));
                })?;
                tracing::info!(documents = documents.len(), "validating");

                // 3) validate in parallel against the shared rule tree
                let results: Vec<DocumentResult> = documents
                    .into_par_iter()
                    .map(|(source, value)| {
                        let report = validator.validate(&Value::from(value));
                        DocumentResult { source, report }
                    })
                    .collect();

                let invalid = results.iter().filter(|r| !r.report.is_valid()).count();
                let run = RunReport {
                    schema: target.schema.to_string_lossy().to_string(),
                    checked_at: chrono::Utc::now().to_rfc3339(),
                    valid: results.len() - invalid,
                    invalid,
                    documents: results,
                };
                let rendered = match target.format {
                    Format::Json => serde_json::to_string_pretty(&run)?,
                    Format::Text => render_text(&run),
                };
                if let Some(out) = target.out.as_ref() {
                    if let Some(parent) = out.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(out, &rendered)
                        .with_context(|| format!("failed to write {}", out.display()))?;
                } else {
                    println!("{rendered}");
                }
                Ok(if invalid == 0 { Outcome::Valid } else { Outcome::Invalid })
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn load_schema(path: &Path) -> Result<Schema> {
    let label = path.display();
    let source = std::fs::read_to_string(path).with_context(|| format!("failed to read schema ({label})"))?;
    let document = serde_json::from_str::<serde_json::Value>(&source)
        .with_context(|| format!("failed to parse schema ({label})"))?;
    let mut schema = Schema::new();
    schema.wrap(document).with_context(|| format!("rejected schema ({label})"))?;
    Ok(schema)
}

fn render_text(run: &RunReport) -> String {
    let mut out = String::new();
    for doc in &run.documents {
        if doc.report.is_valid() {
            out.push_str(&format!("{} {}\n", "valid  ".green(), doc.source));
        } else {
            out.push_str(&format!("{} {}\n", "invalid".red().bold(), doc.source));
            for failure in &doc.report.failures {
                out.push_str(&format!("    {failure}\n"));
            }
        }
    }
    let summary = format!("{} valid, {} invalid", run.valid, run.invalid);
    if run.invalid == 0 {
        out.push_str(&summary.green().to_string());
    } else {
        out.push_str(&summary.red().to_string());
    }
    out
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
    }

    let mut out = Vec::<PathBuf>::new();
    let mut saw_stdin = false;

    for raw in patterns {
        let pattern = raw.as_ref();

        if pattern == "-" {
            if saw_stdin {
                bail!("stdin ('-') may only be given once");
            }
            saw_stdin = true;
            out.push(PathBuf::from(pattern));
        } else if has_glob_chars(pattern) {
            let before = out.len();
            for entry in glob::glob(pattern)? {
                out.push(entry?);
            }
            if out.len() == before {
                // an explicit glob that matched nothing is almost always a typo
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
