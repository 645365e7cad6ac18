use crate::error::{Error, Result};
use crate::rules::Rule;

/// Build the normalized name for a file.
///
/// Splits `original` at the last `.` into stem and extension, snake_cases
/// the stem (lowercase, spaces and hyphens become underscores), lowercases
/// the extension and formats `{prefix}_{stem}_{index:03}.{ext}`. The index
/// padding is a minimum width: 1000 renders as `1000`, not truncated.
///
/// The prefix comes from `rule` when the matched rule carries one, else the
/// run-level `prefix`. Names without a `.` cannot be split and fail with
/// [`Error::MalformedName`].
///
/// Re-normalization is stable: a stem that already carries the effective
/// prefix and a trailing index token is unwrapped first, so running the
/// builder on its own output reproduces that output byte for byte instead
/// of stacking `prefix_prefix_..._001_001`.
pub fn build_name(
    original: &str,
    index: usize,
    prefix: &str,
    rule: Option<&Rule>,
) -> Result<String> {
    let (stem, ext) = split_name(original)?;

    let mut stem = stem.to_lowercase().replace([' ', '-'], "_");
    let ext = ext.to_lowercase();

    let prefix = rule.and_then(|r| r.prefix.as_deref()).unwrap_or(prefix);

    if let Some(inner) = unwrap_normalized(&stem, prefix).map(str::to_string) {
        stem = inner;
    }

    Ok(format!("{prefix}_{stem}_{index:03}.{ext}"))
}

/// Split at the last dot. `archive.tar.gz` -> (`archive.tar`, `gz`).
fn split_name(name: &str) -> Result<(&str, &str)> {
    match name.rfind('.') {
        Some(idx) => Ok((&name[..idx], &name[idx + 1..])),
        None => Err(Error::MalformedName(name.to_string())),
    }
}

/// If `stem` is already in normalized form for `prefix`
/// (`{prefix}_{inner}_{digits}`), return the inner stem.
///
/// Both parts are required: a stem that merely starts with the prefix
/// (`file_notes`) or merely ends in digits (`photo_123`) is not normalized
/// output and is left alone.
fn unwrap_normalized<'a>(stem: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = stem.strip_prefix(prefix)?.strip_prefix('_')?;

    let trimmed = rest.trim_end_matches(|c: char| c.is_ascii_digit());
    let digits = rest.len() - trimmed.len();
    if digits >= 3 {
        if let Some(inner) = trimmed.strip_suffix('_') {
            if !inner.is_empty() {
                return Some(inner);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_normalization() {
        assert_eq!(
            build_name("My Photo.JPG", 1, "doc", None).unwrap(),
            "doc_my_photo_001.jpg"
        );
        assert_eq!(
            build_name("report-final.PDF", 2, "doc", None).unwrap(),
            "doc_report_final_002.pdf"
        );
    }

    #[test]
    fn test_spaces_and_hyphens_become_underscores() {
        let name = build_name("a b-c d-e.txt", 7, "file", None).unwrap();
        assert_eq!(name, "file_a_b_c_d_e_007.txt");
        assert!(!name.contains(' '));
        assert!(!name.contains('-'));
    }

    #[test]
    fn test_index_padding_is_minimum_width() {
        assert_eq!(build_name("x.txt", 9, "f", None).unwrap(), "f_x_009.txt");
        assert_eq!(build_name("x.txt", 42, "f", None).unwrap(), "f_x_042.txt");
        assert_eq!(build_name("x.txt", 999, "f", None).unwrap(), "f_x_999.txt");
        assert_eq!(build_name("x.txt", 1000, "f", None).unwrap(), "f_x_1000.txt");
        assert_eq!(
            build_name("x.txt", 12345, "f", None).unwrap(),
            "f_x_12345.txt"
        );
    }

    #[test]
    fn test_splits_at_last_dot() {
        assert_eq!(
            build_name("archive.tar.gz", 1, "bak", None).unwrap(),
            "bak_archive.tar_001.gz"
        );
    }

    #[test]
    fn test_extensionless_name_is_rejected() {
        let err = build_name("README", 1, "file", None).unwrap_err();
        assert!(matches!(err, Error::MalformedName(ref n) if n == "README"));
    }

    #[test]
    fn test_rule_prefix_overrides_run_prefix() {
        let rule = Rule {
            prefix: Some("img".to_string()),
            extensions: vec![".jpg".to_string()],
        };
        assert_eq!(
            build_name("pic.jpg", 3, "file", Some(&rule)).unwrap(),
            "img_pic_003.jpg"
        );

        let no_prefix = Rule::default();
        assert_eq!(
            build_name("pic.jpg", 3, "file", Some(&no_prefix)).unwrap(),
            "file_pic_003.jpg"
        );
    }

    #[test]
    fn test_idempotent_on_own_output() {
        let once = build_name("Some File.TXT", 12, "doc", None).unwrap();
        assert_eq!(once, "doc_some_file_012.txt");
        let twice = build_name(&once, 12, "doc", None).unwrap();
        assert_eq!(twice, once);
    }

    #[test]
    fn test_renormalizing_with_new_index_replaces_old_index() {
        let name = build_name("doc_my_photo_001.jpg", 5, "doc", None).unwrap();
        assert_eq!(name, "doc_my_photo_005.jpg");
    }

    #[test]
    fn test_digit_suffix_without_prefix_is_kept() {
        assert_eq!(
            build_name("photo 123.jpg", 1, "doc", None).unwrap(),
            "doc_photo_123_001.jpg"
        );
    }

    #[test]
    fn test_prefix_shaped_stem_without_index_is_preserved() {
        // Starts with the prefix but carries no index token, so it is not
        // normalized output and must be kept whole
        assert_eq!(
            build_name("file_notes.txt", 1, "file", None).unwrap(),
            "file_file_notes_001.txt"
        );
        assert_eq!(
            build_name("doc_01.pdf", 2, "doc", None).unwrap(),
            "doc_doc_01_002.pdf"
        );
    }
}
