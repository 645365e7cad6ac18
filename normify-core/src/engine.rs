use crate::config::{OnAlreadyNormalized, RunConfig};
use crate::error::{Error, Result};
use crate::naming::build_name;
use crate::output::{Outcome, RenameDecision, RunReport, RunSummary};
use crate::pattern::NormalizedMatcher;
use crate::scanner::{enumerate, FileEntry};
use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::PathBuf;

/// Drive one renaming run: validate the config, enumerate files, assign
/// indices, compute names and apply (or preview) each rename.
///
/// Numbering is positional: every enumerated file consumes exactly one
/// index in processing order, whether or not it ends up renamed, so a
/// skipped or failed file never shifts the numbers of the files after it.
///
/// Per-file problems (malformed name, target collision, a failed
/// `fs::rename`) become failed decisions and the run continues; only
/// configuration and path errors abort the whole run, and they do so
/// before anything is renamed.
pub fn run(config: &RunConfig) -> Result<RunReport> {
    // Validate before any filesystem access
    let root = config.path.as_ref().ok_or(Error::MissingPath)?;
    if config.global_index && !config.recursive {
        return Err(Error::GlobalIndexRequiresRecursive);
    }

    // Resolve to an absolute path so entries and reports carry real
    // locations; a missing root falls through to the enumerator's check
    let root = root.canonicalize().unwrap_or_else(|_| root.clone());

    let enumeration = enumerate(&root, config.recursive)?;
    let matcher = NormalizedMatcher::new(&config.prefix);

    let mut decisions = Vec::with_capacity(enumeration.files.len());
    let mut queue = Vec::new();

    let mut counter = config.start_index;
    let mut current_folder: Option<PathBuf> = None;

    for entry in &enumeration.files {
        // Per-folder mode resets the counter at each folder boundary; the
        // enumerator guarantees files arrive grouped by sorted folder path.
        if !config.global_index && current_folder.as_ref() != Some(&entry.parent) {
            counter = config.start_index;
            current_folder = Some(entry.parent.clone());
        }
        let index = counter;
        counter += 1;

        let decision = plan_file(entry, index, config, &matcher);
        if !config.dry_run && decision.outcome == Outcome::Previewed {
            // Previewed at this stage means "ready to apply"
            let new_name = decision.new_name.clone().unwrap_or_default();
            queue.push(PendingRename {
                decision: decisions.len(),
                source: entry.path.clone(),
                target: entry.parent.join(&new_name),
                new_name,
            });
        }
        decisions.push(decision);
    }

    if !config.dry_run {
        apply_batch(&mut decisions, queue);
    }

    let summary = summarize(&decisions, enumeration.empty_folders, config.dry_run);
    Ok(RunReport { decisions, summary })
}

fn plan_file(
    entry: &FileEntry,
    index: usize,
    config: &RunConfig,
    matcher: &NormalizedMatcher,
) -> RenameDecision {
    let already_normalized = matcher.is_normalized(&entry.name);

    let rule = config.rules.as_ref().map(|rules| rules.resolve(&entry.name));

    let new_name = match build_name(&entry.name, index, &config.prefix, rule.as_ref()) {
        Ok(name) => name,
        Err(err) => {
            return RenameDecision {
                original_name: entry.name.clone(),
                new_name: None,
                folder: entry.parent.clone(),
                already_normalized,
                outcome: Outcome::Failed {
                    error: err.to_string(),
                },
            };
        },
    };

    let outcome = if already_normalized && config.on_already_normalized == OnAlreadyNormalized::Skip
    {
        Outcome::Skipped {
            reason: "already normalized".to_string(),
        }
    } else {
        Outcome::Previewed
    };

    RenameDecision {
        original_name: entry.name.clone(),
        new_name: Some(new_name),
        folder: entry.parent.clone(),
        already_normalized,
        outcome,
    }
}

/// One planned rename awaiting execution, pointing back at its decision.
struct PendingRename {
    decision: usize,
    source: PathBuf,
    target: PathBuf,
    new_name: String,
}

/// Execute the pre-computed batch with collision protection.
///
/// Targets claimed by an earlier rename fail instead of overwriting. A
/// target occupied on disk by a batch source that has not moved yet is
/// deferred and retried once that source has been renamed away; a target
/// occupied by anything else is a collision. When a pass resolves nothing
/// the remaining renames (mutual swaps) are reported as collisions.
fn apply_batch(decisions: &mut [RenameDecision], mut queue: Vec<PendingRename>) {
    let mut claimed: BTreeSet<PathBuf> = BTreeSet::new();
    let mut waiting: BTreeSet<PathBuf> = queue.iter().map(|p| p.source.clone()).collect();

    loop {
        let mut progressed = false;
        let mut deferred = Vec::new();

        for item in queue {
            // Renaming a file onto its own name needs no filesystem call
            if item.target == item.source {
                waiting.remove(&item.source);
                claimed.insert(item.target);
                decisions[item.decision].outcome = Outcome::Applied;
                progressed = true;
                continue;
            }

            if claimed.contains(&item.target) {
                waiting.remove(&item.source);
                decisions[item.decision].outcome = collision(&item.new_name, "another file in this batch");
                progressed = true;
                continue;
            }

            if item.target.exists() {
                if waiting.contains(&item.target) {
                    // Occupied by a later batch source; retry after it moves
                    deferred.push(item);
                    continue;
                }
                waiting.remove(&item.source);
                decisions[item.decision].outcome = collision(&item.new_name, "an existing file");
                progressed = true;
                continue;
            }

            waiting.remove(&item.source);
            let original_name = decisions[item.decision].original_name.clone();
            decisions[item.decision].outcome = match fs::rename(&item.source, &item.target) {
                Ok(()) => {
                    claimed.insert(item.target);
                    Outcome::Applied
                },
                Err(source) => Outcome::Failed {
                    error: Error::Rename {
                        from: original_name,
                        to: item.new_name.clone(),
                        source,
                    }
                    .to_string(),
                },
            };
            progressed = true;
        }

        if deferred.is_empty() {
            break;
        }
        if !progressed {
            for item in deferred {
                decisions[item.decision].outcome =
                    collision(&item.new_name, "another file in this batch");
            }
            break;
        }
        queue = deferred;
    }
}

fn collision(target: &str, existing: &str) -> Outcome {
    Outcome::Failed {
        error: Error::Collision {
            target: target.to_string(),
            existing: existing.to_string(),
        }
        .to_string(),
    }
}

fn summarize(
    decisions: &[RenameDecision],
    empty_folders: Vec<PathBuf>,
    dry_run: bool,
) -> RunSummary {
    let mut folders: HashSet<&PathBuf> = HashSet::new();
    let mut summary = RunSummary {
        total_files: decisions.len(),
        empty_folders,
        dry_run,
        ..RunSummary::default()
    };

    for decision in decisions {
        folders.insert(&decision.folder);
        if decision.already_normalized {
            summary.already_normalized += 1;
        }
        match &decision.outcome {
            Outcome::Applied => summary.renamed += 1,
            Outcome::Previewed => {},
            Outcome::Skipped { .. } => summary.skipped += 1,
            Outcome::Failed { .. } => summary.failed += 1,
        }
    }
    summary.folders_touched = folders.len();

    summary
}
