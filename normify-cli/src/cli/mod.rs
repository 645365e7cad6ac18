mod args;
mod types;

pub use args::Cli;
pub use types::{OutputFormatArg, PolicyArg, PreviewArg, TemplateFormatArg};
