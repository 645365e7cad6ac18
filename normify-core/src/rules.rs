use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A naming rule. Fields left unset inherit from the rule set's default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Prefix override for files matched by this rule
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,

    /// Extensions this rule applies to (with or without the leading dot,
    /// matched case-insensitively). Empty for the default rule.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extensions: Vec<String>,
}

impl Rule {
    /// Shallow merge: `self`'s set fields win, unset fields come from `default`.
    fn merged_onto(&self, default: &Rule) -> Rule {
        Rule {
            prefix: self.prefix.clone().or_else(|| default.prefix.clone()),
            extensions: self.extensions.clone(),
        }
    }

    fn matches_extension(&self, ext: &str) -> bool {
        let ext = ext.trim_start_matches('.');
        self.extensions
            .iter()
            .any(|e| e.trim_start_matches('.').eq_ignore_ascii_case(ext))
    }
}

/// Per-type naming rules keyed by a user-chosen category name.
///
/// `by_type` keeps its definition order (`IndexMap`): when two categories
/// claim the same extension, the one defined first wins.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleSet {
    #[serde(default)]
    pub default: Rule,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub by_type: IndexMap<String, Rule>,
}

impl RuleSet {
    /// Select the effective rule for `filename`.
    ///
    /// The filename's suffix (lowercased, leading dot included) is matched
    /// against each category in definition order; the first hit is merged
    /// onto the default rule. No hit returns the default unchanged.
    pub fn resolve(&self, filename: &str) -> Rule {
        let Some(ext) = file_suffix(filename) else {
            return self.default.clone();
        };

        for rule in self.by_type.values() {
            if rule.matches_extension(&ext) {
                return rule.merged_onto(&self.default);
            }
        }

        self.default.clone()
    }
}

/// Lowercased suffix of a filename, leading dot included (`photo.JPG` -> `.jpg`).
///
/// Follows the filesystem suffix convention: the part after the last dot.
/// Names without a dot (or ending in one) have no suffix.
fn file_suffix(filename: &str) -> Option<String> {
    let idx = filename.rfind('.')?;
    let suffix = &filename[idx..];
    if suffix == "." {
        return None;
    }
    Some(suffix.to_lowercase())
}
