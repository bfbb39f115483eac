//! Patching glyph references in `features.fea`.
//!
//! Feature files refer to glyphs with escaped names (`\a.sc`). After
//! promotion, a reference to a promoted base glyph is stale and is removed,
//! and a reference to any other small-caps glyph is renamed to its base.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use log::info;

use crate::names::strip_small_caps_suffix;
use crate::Error;

pub(crate) static FEATURES_FILE: &str = "features.fea";

/// The result of patching a feature file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeaturePatch {
    /// The rewritten feature file.
    pub text: String,
    /// Number of glyph references deleted.
    pub tokens_removed: usize,
    /// Number of glyph references that lost their small-caps suffix.
    pub tokens_renamed: usize,
    /// Glyph class declarations left empty, such as `@smcp = [ ];`.
    ///
    /// These are reported but not removed.
    pub empty_classes: Vec<String>,
}

/// What happens to one escaped glyph name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenEdit<'a> {
    Remove,
    Rename(&'a str),
    Keep,
}

/// Rewrite the glyph references in `text`.
///
/// Each escaped glyph name is looked at once, left to right. A name found in
/// `promoted` (the base names of promoted glyphs) is deleted along with its
/// backslash. Otherwise a name with the small-caps suffix loses the suffix.
/// Everything else is copied unchanged.
pub fn patch_features(text: &str, promoted: &HashSet<&str>) -> FeaturePatch {
    let mut tokens_removed = 0;
    let mut tokens_renamed = 0;
    let text = replace_glyph_tokens(text, |name| {
        if promoted.contains(name) {
            tokens_removed += 1;
            TokenEdit::Remove
        } else if let Some(base) = strip_small_caps_suffix(name) {
            tokens_renamed += 1;
            TokenEdit::Rename(base)
        } else {
            TokenEdit::Keep
        }
    });
    let empty_classes =
        text.lines().filter(|line| is_empty_class_declaration(line)).map(String::from).collect();
    FeaturePatch { text, tokens_removed, tokens_renamed, empty_classes }
}

/// Patch the feature file at `path` in place.
pub fn patch_features_file(path: &Path, promoted: &HashSet<&str>) -> Result<FeaturePatch, Error> {
    let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let patch = patch_features(&text, promoted);
    fs::write(path, &patch.text).map_err(|e| Error::io(path, e))?;
    for line in &patch.empty_classes {
        info!("empty glyph class left in {}: {line}", path.display());
    }
    Ok(patch)
}

fn is_glyph_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'.' | b'-' | b'_')
}

fn replace_glyph_tokens<'a>(
    text: &'a str,
    mut edit: impl FnMut(&'a str) -> TokenEdit<'a>,
) -> String {
    let mut result = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find('\\') {
        result.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        // glyph name bytes are ASCII, so this is a char boundary
        let len = after.bytes().take_while(|b| is_glyph_name_byte(*b)).count();
        if len == 0 {
            result.push('\\');
            rest = after;
            continue;
        }
        let name = &after[..len];
        match edit(name) {
            TokenEdit::Remove => (),
            TokenEdit::Rename(new_name) => {
                result.push('\\');
                result.push_str(new_name);
            }
            TokenEdit::Keep => {
                result.push('\\');
                result.push_str(name);
            }
        }
        rest = &after[len..];
    }
    result.push_str(rest);
    result
}

/// Matches lines starting with `@name = [ ];`, with one or more spaces
/// between the brackets and a lowercase class name.
fn is_empty_class_declaration(line: &str) -> bool {
    let Some(rest) = line.strip_prefix('@') else {
        return false;
    };
    let name_len = rest
        .bytes()
        .take_while(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || *b == b'_')
        .count();
    if name_len == 0 {
        return false;
    }
    let Some(rest) = rest[name_len..].strip_prefix(" = [") else {
        return false;
    };
    let spaces = rest.bytes().take_while(|b| *b == b' ').count();
    spaces > 0 && rest[spaces..].starts_with("];")
}
