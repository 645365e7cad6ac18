use clap::Parser;
use std::path::PathBuf;

use super::types::{OutputFormatArg, PolicyArg, PreviewArg, TemplateFormatArg};

/// Batch file renaming with a safe dry-run preview
///
/// Renames every file in a folder to `{prefix}_{snake_case_stem}_{NNN}.{ext}`.
/// Without --execute nothing is touched: the intended renames are printed.
#[derive(Parser, Debug)]
#[command(name = "normify")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Folder whose files get renamed
    #[arg(long, value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Prefix for normalized names
    #[arg(long, value_name = "PREFIX")]
    pub prefix: Option<String>,

    /// First index of each numbering sequence
    #[arg(long = "start-index", value_name = "N")]
    pub start_index: Option<usize>,

    /// Process the whole subtree, not just direct children
    #[arg(long)]
    pub recursive: bool,

    /// One continuous counter across all folders (requires --recursive)
    #[arg(long = "global-index")]
    pub global_index: bool,

    /// Actually rename files (default is a dry-run preview)
    #[arg(long)]
    pub execute: bool,

    /// What to do with files that are already normalized
    #[arg(long = "on-already-normalized", value_enum, value_name = "POLICY")]
    pub on_already_normalized: Option<PolicyArg>,

    /// Load settings from a YAML or JSON config file
    #[arg(long, value_name = "FILE", conflicts_with = "show_template")]
    pub config: Option<PathBuf>,

    /// Print a starter config file and exit
    #[arg(long = "show-template", value_enum, value_name = "FORMAT")]
    pub show_template: Option<TemplateFormatArg>,

    /// Output format
    #[arg(long, value_enum, default_value = "summary")]
    pub output: OutputFormatArg,

    /// Render decisions as a table instead of per-file lines
    #[arg(long, value_enum, default_value = "list")]
    pub preview: PreviewArg,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR")]
    pub no_color: bool,
}
