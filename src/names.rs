//! Small-caps naming conventions.
//!
//! A small-caps glyph is named after its base glyph plus [`SMALL_CAPS_SUFFIX`],
//! and its .glif file name carries the same suffix before the extension:
//! `a.sc` lives in `a.sc.glif`, `A.sc` in `A_.sc.glif`.

use std::collections::HashSet;

/// The suffix marking a small-caps glyph name.
pub static SMALL_CAPS_SUFFIX: &str = ".sc";

/// The extension of glyph files.
pub static GLIF_EXTENSION: &str = ".glif";

/// The suffix marking a small-caps glyph file name.
pub static SMALL_CAPS_FILE_SUFFIX: &str = ".sc.glif";

/// Small-caps glyph files that are left alone by default.
///
/// Even in a small-caps-only font, a small-caps hyphen is still useful next
/// to the regular one, and `idotaccent.sc` has no base glyph to replace.
pub static DEFAULT_IGNORE_LIST: &[&str] = &["idotaccent.sc.glif", "hyphen.sc.glif"];

/// Registry keys that are always dropped, whether or not the glyph was promoted.
pub static DEFAULT_LEGACY_REGISTRY_KEYS: &[&str] = &["idotaccent.sc"];

/// Returns the base glyph name if `name` carries the small-caps suffix.
pub fn strip_small_caps_suffix(name: &str) -> Option<&str> {
    name.strip_suffix(SMALL_CAPS_SUFFIX).filter(|base| !base.is_empty())
}

/// Returns `true` if `file_name` names a small-caps .glif file.
pub fn is_small_caps_file(file_name: &str) -> bool {
    base_file_stem(file_name).is_some()
}

/// Given a small-caps glyph file name, compute the file name of its base glyph.
///
/// `a.sc.glif` becomes `a.glif`; file names without the suffix return `None`.
pub fn base_file_name(small_caps_file: &str) -> Option<String> {
    base_file_stem(small_caps_file).map(|stem| format!("{stem}{GLIF_EXTENSION}"))
}

fn base_file_stem(file_name: &str) -> Option<&str> {
    file_name.strip_suffix(SMALL_CAPS_FILE_SUFFIX).filter(|stem| !stem.is_empty())
}

/// Small-caps glyph files excluded from promotion, by file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreList(HashSet<String>);

impl Default for IgnoreList {
    /// The built-in list, see [`DEFAULT_IGNORE_LIST`].
    fn default() -> Self {
        DEFAULT_IGNORE_LIST.iter().copied().collect()
    }
}

impl IgnoreList {
    /// An ignore list that ignores nothing.
    pub fn empty() -> Self {
        IgnoreList(HashSet::new())
    }

    /// Add a glyph file name to the list.
    pub fn insert(&mut self, file_name: impl Into<String>) -> bool {
        self.0.insert(file_name.into())
    }

    /// Returns `true` if the glyph file is ignored.
    pub fn contains_file(&self, file_name: &str) -> bool {
        self.0.contains(file_name)
    }

    /// Returns `true` if the glyph with this name is stored in an ignored file.
    ///
    /// Assumes the glyph uses its default file name.
    pub fn contains_glyph(&self, name: &str) -> bool {
        self.contains_file(&default_file_name_for_glyph_name(name))
    }

    /// Iterate over the ignored file names, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.iter().map(String::as_str)
    }
}

impl<T: Into<String>> FromIterator<T> for IgnoreList {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        IgnoreList(iter.into_iter().map(Into::into).collect())
    }
}

//NOTE: adapted from
// https://github.com/unified-font-object/ufoLib/blob/master/Lib/ufoLib/filenames.py
/// given a glyph name, compute an appropriate file name.
pub fn default_file_name_for_glyph_name(name: impl AsRef<str>) -> String {
    user_name_to_file_name(name.as_ref(), GLIF_EXTENSION)
}

// reserved names and clashes are not handled; neither matters for lookups
fn user_name_to_file_name(name: &str, suffix: &str) -> String {
    static SPECIAL_ILLEGAL: &[char] = &['\\', '*', '+', '/', ':', '<', '>', '?', '[', ']', '|'];
    const MAX_LEN: usize = 255;

    let mut result = String::with_capacity(name.len() + suffix.len());

    for c in name.chars() {
        match c {
            '.' if result.is_empty() => result.push('_'),
            c if (c as u32) < 32 || (c as u32) == 0x7f || SPECIAL_ILLEGAL.contains(&c) => {
                result.push('_')
            }
            c if c.is_ascii_uppercase() => {
                result.push(c);
                result.push('_');
            }
            c => result.push(c),
        }
    }

    if result.len() + suffix.len() > MAX_LEN {
        let mut boundary = MAX_LEN - suffix.len();
        while !result.is_char_boundary(boundary) {
            boundary -= 1;
        }
        result.truncate(boundary);
    }
    result.push_str(suffix);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_suffix() {
        assert_eq!(strip_small_caps_suffix("a.sc"), Some("a"));
        assert_eq!(strip_small_caps_suffix("A.sc"), Some("A"));
        assert_eq!(strip_small_caps_suffix("f_f_i.sc"), Some("f_f_i"));
        assert_eq!(strip_small_caps_suffix("a"), None);
        assert_eq!(strip_small_caps_suffix("a.scx"), None);
        assert_eq!(strip_small_caps_suffix(".sc"), None);
    }

    #[test]
    fn file_names() {
        assert_eq!(base_file_name("a.sc.glif").as_deref(), Some("a.glif"));
        assert_eq!(base_file_name("A_.sc.glif").as_deref(), Some("A_.glif"));
        assert_eq!(base_file_name("a.glif"), None);
        assert_eq!(base_file_name(".sc.glif"), None);
        assert!(is_small_caps_file("hyphen.sc.glif"));
        assert!(!is_small_caps_file("contents.plist"));
        assert!(!is_small_caps_file("a.sc.glif.bak"));
    }

    #[test]
    fn path_for_name() {
        fn trimmed_name(name: &str) -> String {
            default_file_name_for_glyph_name(name).trim_end_matches(".glif").into()
        }

        assert_eq!(trimmed_name("a.sc"), "a.sc");
        assert_eq!(trimmed_name("A.sc"), "A_.sc");
        assert_eq!(trimmed_name("AE.sc"), "A_E_.sc");
        assert_eq!(trimmed_name("f_f_i.sc"), "f_f_i.sc");
        assert_eq!(trimmed_name("T_H.sc"), "T__H_.sc");
        assert_eq!(trimmed_name(".notdef"), "_notdef");
        assert_eq!(trimmed_name("a/b"), "a_b");
    }

    #[test]
    fn ignore_list() {
        let ignore = IgnoreList::default();
        assert!(ignore.contains_file("hyphen.sc.glif"));
        assert!(ignore.contains_glyph("hyphen.sc"));
        assert!(ignore.contains_glyph("idotaccent.sc"));
        assert!(!ignore.contains_glyph("a.sc"));

        let mut ignore = IgnoreList::empty();
        assert!(!ignore.contains_glyph("hyphen.sc"));
        ignore.insert("A_.sc.glif");
        assert!(ignore.contains_glyph("A.sc"));
        assert!(!ignore.contains_glyph("a.sc"));
    }
}
