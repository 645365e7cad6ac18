use anyhow::{Context, Result};
use normify_core::{
    render_report, render_table, OutputFormat, OutputFormatter, RunConfig, RunReport,
};

use crate::cli::{Cli, PreviewArg};

/// Build the run configuration from the config file (if any) with explicit
/// CLI flags layered on top, then drive the engine.
pub fn handle_run(cli: &Cli, use_color: bool) -> Result<()> {
    let config = build_config(cli)?;

    let report = normify_core::run(&config)?;
    print_report(&report, cli, use_color);
    Ok(())
}

fn build_config(cli: &Cli) -> Result<RunConfig> {
    let mut config = match &cli.config {
        Some(path) => RunConfig::from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => RunConfig::default(),
    };

    // CLI flags override file values field by field, but only when given
    if let Some(path) = &cli.path {
        config.path = Some(path.clone());
    }
    if let Some(prefix) = &cli.prefix {
        config.prefix = prefix.clone();
    }
    if let Some(start_index) = cli.start_index {
        config.start_index = start_index;
    }
    if cli.recursive {
        config.recursive = true;
    }
    if cli.global_index {
        config.global_index = true;
    }
    if cli.execute {
        config.dry_run = false;
    }
    if let Some(policy) = cli.on_already_normalized {
        config.on_already_normalized = policy.into();
    }

    Ok(config)
}

fn print_report(report: &RunReport, cli: &Cli, use_color: bool) {
    match OutputFormat::from(cli.output) {
        OutputFormat::Json => println!("{}", report.format(OutputFormat::Json)),
        OutputFormat::Summary => match cli.preview {
            PreviewArg::Table => {
                println!("{}", render_table(report, use_color));
                print!("{}", summary_tail(report, use_color));
            },
            PreviewArg::List => print!("{}", render_report(report, use_color)),
        },
    }
}

/// The count block without the per-file lines, for table mode.
fn summary_tail(report: &RunReport, use_color: bool) -> String {
    let lines_only = RunReport {
        decisions: vec![],
        summary: report.summary.clone(),
    };
    render_report(&lines_only, use_color)
}
