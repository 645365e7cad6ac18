use crate::error::{Error, Result};
use crate::rules::RuleSet;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// What to do with a file whose name already matches the normalized pattern.
///
/// The behavior changed across generations of the tool, so it is exposed as
/// a policy instead of hardcoded: `Reapply` (the current default) recomputes
/// and renames anyway, flagging the file in the report; `Skip` leaves the
/// file untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnAlreadyNormalized {
    Skip,
    Reapply,
}

impl Default for OnAlreadyNormalized {
    fn default() -> Self {
        Self::Reapply
    }
}

/// Full configuration for one renaming run.
///
/// Loadable from a YAML or JSON file; fields left out of a partial file
/// take these defaults. `path` is the only required field and is validated
/// by the engine, not the parser, so CLI flags get a chance to supply it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Root folder whose files get renamed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Run-level prefix for normalized names
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// First index assigned in each numbering sequence
    #[serde(default = "default_start_index")]
    pub start_index: usize,

    /// Process the whole subtree instead of direct children only
    #[serde(default)]
    pub recursive: bool,

    /// One continuous counter across all folders (requires `recursive`)
    #[serde(default)]
    pub global_index: bool,

    /// Preview without touching the filesystem (the default)
    #[serde(default = "default_true")]
    pub dry_run: bool,

    #[serde(default)]
    pub on_already_normalized: OnAlreadyNormalized,

    /// Optional per-type naming rules
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<RuleSet>,
}

fn default_prefix() -> String {
    "file".to_string()
}

const fn default_start_index() -> usize {
    1
}

const fn default_true() -> bool {
    true
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            path: None,
            prefix: default_prefix(),
            start_index: default_start_index(),
            recursive: false,
            global_index: false,
            dry_run: true,
            on_already_normalized: OnAlreadyNormalized::default(),
            rules: None,
        }
    }
}

impl RunConfig {
    /// Load a config file, YAML (`.yaml`/`.yml`) or JSON (`.json`) by
    /// extension. Partial files merge over the defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ConfigNotFound(path.to_path_buf()));
        }

        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        let content = fs::read_to_string(path)?;

        match ext.as_str() {
            "yaml" | "yml" => {
                serde_yaml_ng::from_str(&content).map_err(|e| Error::ConfigParse {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })
            },
            "json" => serde_json::from_str(&content).map_err(|e| Error::ConfigParse {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
            other => Err(Error::UnsupportedConfigFormat(format!(".{other}"))),
        }
    }
}

/// Config file format for template generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateFormat {
    Yaml,
    Json,
}

/// Render a starter config file that users can edit.
pub fn config_template(format: TemplateFormat) -> String {
    let template = RunConfig {
        path: Some(PathBuf::from("./path/to/your/folder")),
        prefix: "document".to_string(),
        ..RunConfig::default()
    };

    match format {
        // Serialization of a plain struct cannot fail
        TemplateFormat::Yaml => serde_yaml_ng::to_string(&template).unwrap(),
        TemplateFormat::Json => serde_json::to_string_pretty(&template).unwrap(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = RunConfig::default();
        assert_eq!(config.path, None);
        assert_eq!(config.prefix, "file");
        assert_eq!(config.start_index, 1);
        assert!(!config.recursive);
        assert!(!config.global_index);
        assert!(config.dry_run);
        assert_eq!(
            config.on_already_normalized,
            OnAlreadyNormalized::Reapply
        );
        assert!(config.rules.is_none());
    }

    #[test]
    fn test_partial_yaml_merges_over_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("normify.yaml");
        fs::write(&path, "prefix: photo\nrecursive: true\n").unwrap();

        let config = RunConfig::from_file(&path).unwrap();
        assert_eq!(config.prefix, "photo");
        assert!(config.recursive);
        assert_eq!(config.start_index, 1);
        assert!(config.dry_run);
    }

    #[test]
    fn test_json_with_rules() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("normify.json");
        fs::write(
            &path,
            r#"{
                "path": "/tmp/photos",
                "rules": {
                    "default": {"prefix": "file"},
                    "by_type": {
                        "images": {"prefix": "img", "extensions": [".jpg", ".png"]}
                    }
                }
            }"#,
        )
        .unwrap();

        let config = RunConfig::from_file(&path).unwrap();
        assert_eq!(config.path, Some(PathBuf::from("/tmp/photos")));
        let rules = config.rules.unwrap();
        assert_eq!(rules.resolve("a.PNG").prefix.as_deref(), Some("img"));
        assert_eq!(rules.resolve("a.pdf").prefix.as_deref(), Some("file"));
    }

    #[test]
    fn test_missing_config_file() {
        let err = RunConfig::from_file(Path::new("/definitely/not/here.yaml")).unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound(_)));
    }

    #[test]
    fn test_unsupported_format() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("normify.toml");
        fs::write(&path, "prefix = 'x'").unwrap();

        let err = RunConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, Error::UnsupportedConfigFormat(ref s) if s == ".toml"));
    }

    #[test]
    fn test_malformed_yaml_reports_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.yaml");
        fs::write(&path, "prefix: [unclosed\n").unwrap();

        let err = RunConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
    }

    #[test]
    fn test_templates_round_trip() {
        let yaml = config_template(TemplateFormat::Yaml);
        let parsed: RunConfig = serde_yaml_ng::from_str(&yaml).unwrap();
        assert_eq!(parsed.prefix, "document");
        assert!(parsed.dry_run);

        let json = config_template(TemplateFormat::Json);
        let parsed: RunConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.path, Some(PathBuf::from("./path/to/your/folder")));
    }

    #[test]
    fn test_policy_parses_from_config() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("normify.yml");
        fs::write(&path, "on_already_normalized: skip\n").unwrap();

        let config = RunConfig::from_file(&path).unwrap();
        assert_eq!(config.on_already_normalized, OnAlreadyNormalized::Skip);
    }
}
