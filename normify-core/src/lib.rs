#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod engine;
pub mod error;
pub mod naming;
pub mod output;
pub mod pattern;
pub mod rules;
pub mod scanner;

pub use config::{config_template, OnAlreadyNormalized, RunConfig, TemplateFormat};
pub use engine::run;
pub use error::{Error, Result};
pub use naming::build_name;
pub use output::{
    render_report, render_table, Outcome, OutputFormat, OutputFormatter, RenameDecision,
    RunReport, RunSummary,
};
pub use pattern::NormalizedMatcher;
pub use rules::{Rule, RuleSet};
pub use scanner::{enumerate, Enumeration, FileEntry};
