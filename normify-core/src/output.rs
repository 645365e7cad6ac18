use comfy_table::{Cell, Color, ContentArrangement, Table};
use nu_ansi_term::Color as AnsiColor;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt::Write;
use std::path::PathBuf;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Summary,
    Json,
}

/// What happened (or would happen) to one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Dry-run: the rename was computed but not applied
    Previewed,
    /// Execute mode: the file was renamed
    Applied,
    /// Left untouched (already-normalized skip policy)
    Skipped { reason: String },
    /// Malformed name, collision or filesystem error; the run continued
    Failed { error: String },
}

impl Outcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Per-file outcome record, consumed by the reporter in run order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameDecision {
    pub original_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_name: Option<String>,
    pub folder: PathBuf,
    pub already_normalized: bool,
    pub outcome: Outcome,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunSummary {
    pub total_files: usize,
    pub renamed: usize,
    pub already_normalized: usize,
    pub skipped: usize,
    pub failed: usize,
    pub folders_touched: usize,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub empty_folders: Vec<PathBuf>,
    pub dry_run: bool,
}

/// Result of one orchestration run: every decision in processing order plus
/// the aggregate counts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunReport {
    pub decisions: Vec<RenameDecision>,
    pub summary: RunSummary,
}

/// Trait for formatting output in different formats
pub trait OutputFormatter {
    fn format(&self, format: OutputFormat) -> String;
    fn format_json(&self) -> String;
    fn format_summary(&self) -> String;
}

impl OutputFormatter for RunReport {
    fn format(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => self.format_json(),
            OutputFormat::Summary => self.format_summary(),
        }
    }

    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": true,
            "dry_run": self.summary.dry_run,
            "decisions": self.decisions,
            "summary": self.summary,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        render_report(self, false)
    }
}

fn outcome_line(decision: &RenameDecision, use_color: bool) -> String {
    let arrow = |new_name: &str| format!("{} -> {}", decision.original_name, new_name);
    let note = if decision.already_normalized {
        " (already normalized)"
    } else {
        ""
    };

    match &decision.outcome {
        Outcome::Previewed => {
            let tag = if use_color {
                AnsiColor::Yellow.paint("[DRY-RUN]").to_string()
            } else {
                "[DRY-RUN]".to_string()
            };
            let new_name = decision.new_name.as_deref().unwrap_or("?");
            format!("{tag} {}{note}", arrow(new_name))
        },
        Outcome::Applied => {
            let line = arrow(decision.new_name.as_deref().unwrap_or("?"));
            if use_color {
                format!("{}{note}", AnsiColor::Green.paint(line))
            } else {
                format!("{line}{note}")
            }
        },
        Outcome::Skipped { reason } => {
            let tag = if use_color {
                AnsiColor::Cyan.paint("[SKIP]").to_string()
            } else {
                "[SKIP]".to_string()
            };
            format!("{tag} {} ({reason})", decision.original_name)
        },
        Outcome::Failed { error } => {
            let tag = if use_color {
                AnsiColor::Red.paint("[FAIL]").to_string()
            } else {
                "[FAIL]".to_string()
            };
            format!("{tag} {}: {error}", decision.original_name)
        },
    }
}

/// Human-readable report: per-file lines grouped by folder, empty-folder
/// list and a closing count block.
pub fn render_report(report: &RunReport, use_color: bool) -> String {
    let mut out = String::new();
    let dry_run = report.summary.dry_run;

    let multi_folder = report.summary.folders_touched > 1;
    let mut current_folder: Option<&PathBuf> = None;

    for decision in &report.decisions {
        if multi_folder && current_folder != Some(&decision.folder) {
            let heading = format!("{}:", decision.folder.display());
            if use_color {
                writeln!(out, "{}", AnsiColor::Cyan.bold().paint(heading)).unwrap();
            } else {
                writeln!(out, "{heading}").unwrap();
            }
            current_folder = Some(&decision.folder);
        }
        let indent = if multi_folder { "  " } else { "" };
        writeln!(out, "{indent}{}", outcome_line(decision, use_color)).unwrap();
    }

    if report.summary.total_files == 0 {
        writeln!(out, "No files to rename.").unwrap();
    }

    if !report.summary.empty_folders.is_empty() {
        writeln!(out, "\nEmpty folders (left untouched):").unwrap();
        for folder in &report.summary.empty_folders {
            writeln!(out, "  {}", folder.display()).unwrap();
        }
    }

    let s = &report.summary;
    writeln!(
        out,
        "\nProcessed {} file(s) in {} folder(s): {} renamed, {} skipped, {} failed, {} already normalized",
        s.total_files, s.folders_touched, s.renamed, s.skipped, s.failed, s.already_normalized
    )
    .unwrap();

    if dry_run && s.total_files > 0 {
        let hint = "Dry-run: nothing was changed. Pass --execute to apply.";
        if use_color {
            writeln!(out, "{}", AnsiColor::Yellow.paint(hint)).unwrap();
        } else {
            writeln!(out, "{hint}").unwrap();
        }
    }

    out
}

/// Render the decision list as a table.
pub fn render_table(report: &RunReport, use_color: bool) -> String {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    if use_color {
        table.enforce_styling();
        table.set_header(vec![
            Cell::new("Folder").fg(Color::Cyan),
            Cell::new("Original").fg(Color::Cyan),
            Cell::new("New name").fg(Color::Cyan),
            Cell::new("Status").fg(Color::Cyan),
        ]);
    } else {
        table.set_header(vec!["Folder", "Original", "New name", "Status"]);
    }

    for decision in &report.decisions {
        let status = match &decision.outcome {
            Outcome::Previewed => "preview".to_string(),
            Outcome::Applied => "renamed".to_string(),
            Outcome::Skipped { reason } => format!("skipped: {reason}"),
            Outcome::Failed { error } => format!("failed: {error}"),
        };
        let new_name = decision.new_name.clone().unwrap_or_default();

        if use_color {
            let status_color = match &decision.outcome {
                Outcome::Previewed => Color::Yellow,
                Outcome::Applied => Color::Green,
                Outcome::Skipped { .. } => Color::Cyan,
                Outcome::Failed { .. } => Color::Red,
            };
            table.add_row(vec![
                Cell::new(decision.folder.display().to_string()),
                Cell::new(&decision.original_name),
                Cell::new(&new_name),
                Cell::new(&status).fg(status_color),
            ]);
        } else {
            table.add_row(vec![
                decision.folder.display().to_string(),
                decision.original_name.clone(),
                new_name,
                status,
            ]);
        }
    }

    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> RunReport {
        RunReport {
            decisions: vec![
                RenameDecision {
                    original_name: "My Photo.JPG".to_string(),
                    new_name: Some("doc_my_photo_001.jpg".to_string()),
                    folder: PathBuf::from("/data"),
                    already_normalized: false,
                    outcome: Outcome::Previewed,
                },
                RenameDecision {
                    original_name: "README".to_string(),
                    new_name: None,
                    folder: PathBuf::from("/data"),
                    already_normalized: false,
                    outcome: Outcome::Failed {
                        error: "no '.' in name".to_string(),
                    },
                },
            ],
            summary: RunSummary {
                total_files: 2,
                renamed: 0,
                already_normalized: 0,
                skipped: 0,
                failed: 1,
                folders_touched: 1,
                empty_folders: vec![],
                dry_run: true,
            },
        }
    }

    #[test]
    fn test_summary_lists_decisions_in_order() {
        let text = sample_report().format(OutputFormat::Summary);
        let photo = text.find("My Photo.JPG").unwrap();
        let readme = text.find("README").unwrap();
        assert!(photo < readme);
        assert!(text.contains("[DRY-RUN] My Photo.JPG -> doc_my_photo_001.jpg"));
        assert!(text.contains("[FAIL] README"));
        assert!(text.contains("Dry-run: nothing was changed"));
    }

    #[test]
    fn test_json_output_parses_and_keeps_order() {
        let json_text = sample_report().format(OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&json_text).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["dry_run"], true);
        let decisions = value["decisions"].as_array().unwrap();
        assert_eq!(decisions.len(), 2);
        assert_eq!(decisions[0]["original_name"], "My Photo.JPG");
        assert_eq!(decisions[1]["original_name"], "README");
        assert_eq!(value["summary"]["failed"], 1);
    }

    #[test]
    fn test_empty_run_says_nothing_to_do() {
        let report = RunReport::default();
        let text = report.format_summary();
        assert!(text.contains("No files to rename."));
    }

    #[test]
    fn test_empty_folders_are_listed() {
        let mut report = sample_report();
        report.summary.empty_folders = vec![PathBuf::from("/data/docs")];
        let text = report.format_summary();
        assert!(text.contains("Empty folders"));
        assert!(text.contains("/data/docs"));
    }

    #[test]
    fn test_table_contains_every_decision() {
        let table = render_table(&sample_report(), false);
        assert!(table.contains("My Photo.JPG"));
        assert!(table.contains("doc_my_photo_001.jpg"));
        assert!(table.contains("README"));
        assert!(table.contains("failed"));
    }
}
