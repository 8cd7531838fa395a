//! Minimal CLI: schema files → TypeScript declarations
use std::path::{Path, PathBuf};
use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use rayon::prelude::*;
use serde_json::Value;
use tracing::{debug, info};

use crate::config::Config;
use crate::loader::FsLoader;
use crate::registry::Registry;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// compile JSON Schema documents into TypeScript interface and type declarations
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,

    /// more logging on stderr (-v debug, -vv trace); RUST_LOG wins when set
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// compile the inputs into one declarations file
    Compile(CompileOut),
    /// compile the inputs and report problems without writing anything
    Check(CheckArgs),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// project config file (defaults to ./schema-tsd.json when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// directory prefixed onto every `$ref` location
    #[arg(long)]
    root_dir: Option<PathBuf>,

    /// JSON Pointer to select a subnode in each document (e.g. /components/schemas/User)
    #[arg(long)]
    json_pointer: Option<String>,

    /// JQ pre-process filter for each document; every output becomes a root schema
    #[arg(long)]
    jq_expr: Option<String>,

    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1..)]
    input: Vec<String>,
}

#[derive(clap::Parser, Debug)]
struct CompileOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output .d.ts file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(clap::Parser, Debug)]
struct CheckArgs {
    #[command(flatten)]
    input_settings: InputSettings,
}

/// Command line merged over the config file.
#[derive(Debug)]
struct Resolved {
    root_dir: Option<PathBuf>,
    inputs: Vec<String>,
    json_pointer: Option<String>,
    jq_expr: Option<String>,
    out: Option<PathBuf>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn resolve(&self, out: Option<&PathBuf>) -> Result<Resolved> {
        let config = Config::discover(self.config.as_deref())?;
        let resolved = Resolved {
            root_dir: self.root_dir.clone().or(config.root_dir),
            inputs: if self.input.is_empty() { config.inputs } else { self.input.clone() },
            json_pointer: self.json_pointer.clone().or(config.json_pointer),
            jq_expr: self.jq_expr.clone().or(config.jq_expr),
            out: out.cloned().or(config.out),
        };
        if resolved.inputs.is_empty() {
            bail!("no input schemas: pass --input or list `inputs` in the config file");
        }
        debug!(?resolved, "resolved settings");
        Ok(resolved)
    }
}

impl Resolved {
    /// Read every input (in parallel), then apply pointer and jq selection in input order.
    fn load_documents(&self) -> Result<Vec<Value>> {
        let source_paths = resolve_file_path_patterns(&self.inputs)
            .map_err(|error| anyhow!("failed to resolve input file paths: {error}"))?;

        let parsed = source_paths
            .par_iter()
            .map(|source_path| read_json(source_path))
            .collect::<Result<Vec<_>>>()?;

        let mut documents = Vec::new();
        for (source_path, json_value) in source_paths.iter().zip(parsed) {
            let json_value = match self.json_pointer.as_deref() {
                None => json_value,
                Some(pointer) => json_value.pointer(pointer).cloned().ok_or_else(|| {
                    anyhow!("JSON pointer {pointer} selects nothing in {}", source_path.display())
                })?,
            };
            match self.jq_expr.as_deref() {
                None => documents.push(json_value),
                Some(jq_expr) => {
                    let outputs = crate::jq_exec::filter_documents(jq_expr, &json_value)
                        .with_context(|| format!("jq pre-filter on {}", source_path.display()))?;
                    documents.extend(outputs);
                }
            }
        }
        info!(files = source_paths.len(), roots = documents.len(), "loaded input schemas");
        Ok(documents)
    }

    /// Compile every selected root; returns the root count with the declarations.
    fn compile(&self) -> Result<(usize, String)> {
        let documents = self.load_documents()?;
        let roots = documents.len();
        let loader = FsLoader;
        let mut registry = Registry::new(&loader);
        if let Some(root_dir) = &self.root_dir {
            registry = registry.with_root_dir(root_dir);
        }
        for document in documents {
            registry.add_schema(document);
        }
        Ok((roots, registry.parse()?))
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }
    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::Compile(target) => {
                let settings = target.input_settings.resolve(target.out.as_ref())?;
                let (_, declarations) = settings.compile()?;
                if let Some(out) = settings.out.as_ref() {
                    if let Some(parent) = out.parent() {
                        std::fs::create_dir_all(parent)
                            .with_context(|| format!("failed to create {}", parent.display()))?;
                    }
                    std::fs::write(out, format!("{declarations}\n"))
                        .with_context(|| format!("failed to write {}", out.display()))?;
                    info!(out = %out.display(), "wrote declarations");
                } else {
                    println!("{declarations}");
                }
            }
            Command::Check(target) => {
                let settings = target.input_settings.resolve(None)?;
                let (roots, declarations) = settings.compile()?;
                eprintln!(
                    "{} {roots} root schemas, {} bytes of declarations",
                    "✔ ok:".green().bold(),
                    declarations.len()
                );
            }
        }
        Ok(())
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn read_json(source_path: &Path) -> Result<Value> {
    let source = std::fs::read_to_string(source_path)
        .with_context(|| format!("Failed to read source file {}", source_path.display()))?;
    serde_json::from_str::<Value>(&source)
        .with_context(|| format!("Failed to parse JSON source file ({})", source_path.display()))
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{' ))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched: Vec<PathBuf> = Vec::new();
            for entry in glob::glob(pattern)? {
                matched.push(entry?);
            }
            if matched.is_empty() {
                // Pattern was explicitly a glob but matched nothing -> surface as an error
                return Err(format!("glob pattern matched no files: {pattern}").into());
            }
            // glob yields alphabetical order already; keep it explicit for stable output
            matched.sort();
            out.extend(matched);
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
