use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong during a normify run.
///
/// Configuration and path errors abort a run before any rename happens.
/// `MalformedName` and `Collision` are per-file conditions: the engine
/// records them as failed decisions and keeps going.
#[derive(Debug, Error)]
pub enum Error {
    #[error("no path configured: pass --path or set `path` in the config file")]
    MissingPath,

    #[error("--global-index requires --recursive")]
    GlobalIndexRequiresRecursive,

    #[error("config file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("unsupported config format: {0} (expected .yaml, .yml or .json)")]
    UnsupportedConfigFormat(String),

    #[error("failed to parse config file {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("path does not exist: {0}")]
    PathNotFound(PathBuf),

    #[error("path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("cannot split '{0}' into stem and extension (no '.' in name)")]
    MalformedName(String),

    #[error("target name '{target}' collides with {existing}")]
    Collision { target: String, existing: String },

    #[error("failed to rename '{from}' to '{to}': {source}")]
    Rename {
        from: String,
        to: String,
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_user_facing() {
        let err = Error::GlobalIndexRequiresRecursive;
        assert_eq!(err.to_string(), "--global-index requires --recursive");

        let err = Error::MalformedName("README".to_string());
        assert!(err.to_string().contains("README"));
        assert!(err.to_string().contains("no '.'"));

        let err = Error::PathNotFound(PathBuf::from("/tmp/missing"));
        assert!(err.to_string().contains("/tmp/missing"));
    }
}
