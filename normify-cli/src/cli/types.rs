use clap::ValueEnum;
use normify_core::{OnAlreadyNormalized, OutputFormat, TemplateFormat};

/// Config template format for `--show-template`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TemplateFormatArg {
    Yaml,
    Json,
}

impl From<TemplateFormatArg> for TemplateFormat {
    fn from(arg: TemplateFormatArg) -> Self {
        match arg {
            TemplateFormatArg::Yaml => Self::Yaml,
            TemplateFormatArg::Json => Self::Json,
        }
    }
}

/// Report format for `--output`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    Summary,
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Summary => Self::Summary,
            OutputFormatArg::Json => Self::Json,
        }
    }
}

/// Policy for files whose names are already normalized
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    Skip,
    Reapply,
}

impl From<PolicyArg> for OnAlreadyNormalized {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Skip => Self::Skip,
            PolicyArg::Reapply => Self::Reapply,
        }
    }
}

/// How the per-file decisions are rendered in summary output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PreviewArg {
    List,
    Table,
}
