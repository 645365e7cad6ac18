use regex::Regex;

/// Precompiled matcher for filenames that already follow the normalized
/// convention for a given prefix.
///
/// Built once per run; matching is anchored start to end:
/// `{prefix}_<stem>_<exactly 3 digits>.<extension>`, where the extension may
/// be compound (`.tar.gz`) as one or more dot-separated alphanumeric
/// segments.
#[derive(Debug, Clone)]
pub struct NormalizedMatcher {
    regex: Regex,
}

impl NormalizedMatcher {
    pub fn new(prefix: &str) -> Self {
        let pattern = format!(
            r"^{}_.+_[0-9]{{3}}\.[A-Za-z0-9]+(?:\.[A-Za-z0-9]+)*$",
            regex::escape(prefix)
        );
        // The pattern is built from an escaped literal and fixed syntax
        let regex = Regex::new(&pattern).unwrap();
        Self { regex }
    }

    pub fn is_normalized(&self, filename: &str) -> bool {
        self.regex.is_match(filename)
    }
}
