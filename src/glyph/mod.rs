//! Promoting a single small-caps glyph over its base glyph.

use std::fs;
use std::path::Path;

use log::debug;

mod codepoints;
mod parse;
mod serialize;

#[cfg(test)]
mod tests;

pub use codepoints::Codepoints;

use crate::names::{base_file_name, strip_small_caps_suffix, IgnoreList};
use crate::{Error, WriteOptions};

/// The outcome of promoting one small-caps glyph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromotedGlyph {
    /// The base glyph's name, now carrying the small-caps outline.
    pub name: String,
    /// The small-caps glyph's name, as stored in its .glif file.
    pub small_caps_name: String,
    /// The base glyph's file name, which was overwritten.
    pub file_name: String,
    /// The small-caps glyph's file name, which was deleted.
    pub small_caps_file_name: String,
    /// The codepoints carried over from the base glyph.
    pub codepoints: Codepoints,
}

/// Promote the small-caps glyph stored in `small_caps_file` within `glyph_dir`.
///
/// The base glyph file is overwritten with the small-caps glyph's content,
/// renamed to the base name and carrying the base glyph's codepoints; the
/// small-caps file is then deleted. The small-caps glyph's own codepoints, if
/// any, are discarded. Components referencing small-caps glyphs are
/// retargeted to their base glyphs, except for glyphs in `ignore`.
///
/// # Errors
///
/// Fails if either file cannot be read or parsed, if the base glyph has no
/// codepoint, or if writing or deleting fails. Nothing is written when the
/// failure happens while reading.
pub fn promote_glyph(
    glyph_dir: &Path,
    small_caps_file: &str,
    ignore: &IgnoreList,
    options: &WriteOptions,
) -> Result<PromotedGlyph, Error> {
    let file_name = base_file_name(small_caps_file).ok_or_else(|| {
        Error::InvalidInput(format!("'{small_caps_file}' is not a small-caps glyph file"))
    })?;
    let base_path = glyph_dir.join(&file_name);
    let small_caps_path = glyph_dir.join(small_caps_file);

    let base_xml = fs::read(&base_path).map_err(|e| Error::io(&base_path, e))?;
    let base = parse::parse_header(&base_xml).map_err(|e| Error::glif(&base_path, e))?;
    if base.codepoints.is_empty() {
        return Err(Error::MissingCodepoint { glyph: base_path });
    }

    let small_caps_xml = fs::read(&small_caps_path).map_err(|e| Error::io(&small_caps_path, e))?;
    let small_caps =
        parse::parse_header(&small_caps_xml).map_err(|e| Error::glif(&small_caps_path, e))?;
    if !small_caps.codepoints.is_empty() {
        debug!("discarding {} codepoint(s) of '{}'", small_caps.codepoints.len(), small_caps.name);
    }

    let promoted = serialize::promote_xml(&small_caps_xml, &base.codepoints, ignore, options)
        .map_err(|e| Error::glif(&small_caps_path, e))?;
    fs::write(&base_path, promoted).map_err(|e| Error::io(&base_path, e))?;
    fs::remove_file(&small_caps_path).map_err(|e| Error::io(&small_caps_path, e))?;

    let name = strip_small_caps_suffix(&small_caps.name).unwrap_or(&small_caps.name).to_string();
    if let Some(codepoint) = base.codepoints.first() {
        debug!(
            "promoted '{}' over '{}' (U+{}, {})",
            small_caps.name,
            name,
            codepoints::to_hex(codepoint),
            file_name
        );
    }

    Ok(PromotedGlyph {
        name,
        small_caps_name: small_caps.name,
        file_name,
        small_caps_file_name: small_caps_file.to_string(),
        codepoints: base.codepoints,
    })
}
