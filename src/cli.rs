//! Minimal CLI: resolve a node → (metadata | tree | export)
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use serde::Serialize;

use crate::ops::{NodeRequest, Operations};
use crate::source::ExportDirSource;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// resolve Figma nodes from local API exports and emit metadata, widget
/// trees, or generated Flutter widgets
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// print raw node metadata (no normalization)
    Metadata(MetadataCmd),
    /// print the normalized widget tree for a node
    Tree(TreeCmd),
    /// generate a Flutter widget from a node
    Export(ExportCmd),
}

#[derive(Args, Debug, Clone)]
struct SourceSettings {
    /// node ID inside the Figma file (e.g. 1:23)
    #[arg(long)]
    node_id: String,

    /// Figma file key; falls back to the FIGMA_FILE_KEY environment variable
    #[arg(long)]
    file_key: Option<String>,

    /// directory of downloaded API exports, one <fileKey>.json per file
    #[arg(long, default_value = ".")]
    source_dir: PathBuf,
}

#[derive(Args, Debug)]
struct MetadataCmd {
    #[command(flatten)]
    source: SourceSettings,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct TreeCmd {
    #[command(flatten)]
    source: SourceSettings,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ExportCmd {
    #[command(flatten)]
    source: SourceSettings,

    /// output .json file for the full response (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// print only the generated Dart source
    #[arg(long, default_value_t = false)]
    code_only: bool,

    /// also write <file_name> into this directory
    #[arg(long)]
    write: Option<PathBuf>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> anyhow::Result<()> {
        match &self.cmd {
            Command::Metadata(cmd) => {
                let source = cmd.source.open();
                let ops = Operations::new(&source, default_file_key());
                let response = ops.get_metadata(&cmd.source.request())?;
                emit_json(&response, cmd.out.as_deref())
            }
            Command::Tree(cmd) => {
                let source = cmd.source.open();
                let ops = Operations::new(&source, default_file_key());
                let response = ops.get_widget_tree(&cmd.source.request())?;
                emit_json(&response, cmd.out.as_deref())
            }
            Command::Export(cmd) => {
                let source = cmd.source.open();
                let ops = Operations::new(&source, default_file_key());
                let response = ops.export_widget(&cmd.source.request())?;

                if let Some(dir) = cmd.write.as_ref() {
                    std::fs::create_dir_all(dir)
                        .with_context(|| format!("failed to create {}", dir.display()))?;
                    let path = dir.join(&response.file_name);
                    std::fs::write(&path, &response.code)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("{} {}", "wrote".green(), path.display());
                }

                if cmd.code_only {
                    print!("{}", response.code);
                    Ok(())
                } else {
                    emit_json(&response, cmd.out.as_deref())
                }
            }
        }
    }
}

impl SourceSettings {
    fn open(&self) -> ExportDirSource {
        ExportDirSource::new(&self.source_dir)
    }

    fn request(&self) -> NodeRequest {
        NodeRequest { node_id: self.node_id.clone(), file_key: self.file_key.clone() }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn default_file_key() -> Option<String> {
    std::env::var("FIGMA_FILE_KEY").ok().filter(|key| !key.is_empty())
}

fn emit_json<T: Serialize>(response: &T, out: Option<&Path>) -> anyhow::Result<()> {
    let rendered = serde_json::to_string_pretty(response)?;
    if let Some(out) = out {
        if let Some(parent) = out.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        std::fs::write(out, &rendered)
            .with_context(|| format!("failed to write {}", out.display()))?;
    } else {
        println!("{rendered}");
    }
    Ok(())
}
