//! Building small-caps-only [Unified Font Object][ufo] sources.
//!
//! [ufo]: http://unifiedfontobject.org/versions/ufo3
//!
//! A UFO package that carries small-caps variants of its glyphs (`a.sc`
//! next to `a`) is copied to a sibling package in which every small-caps
//! glyph has replaced its base glyph. The base glyph keeps its Unicode
//! codepoints, components pointing at small-caps glyphs are retargeted, the
//! small-caps entries leave `glyphs/contents.plist`, and `features.fea` is
//! patched to match.
//!
//! # Basic usage:
//!
//! ```no_run
//! use ufo_smallcaps::{promote, PromoteOptions};
//!
//! let report = promote("FooSans-Regular.ufo", &PromoteOptions::default())
//!     .expect("promotion failed");
//! assert_eq!(report.destination.to_str(), Some("FooSansSC-Regular.ufo"));
//! println!("promoted {} glyphs", report.promoted.len());
//! ```

#![deny(rustdoc::broken_intra_doc_links)]

pub mod error;
mod features;
mod glyph;
mod layer;
mod names;
mod package;
mod paths;
mod pipeline;
mod write;

pub use error::{Error, GlifError};
pub use features::{patch_features, patch_features_file, FeaturePatch};
pub use glyph::{promote_glyph, Codepoints, PromotedGlyph};
pub use layer::{GlyphDir, Registry};
pub use names::{
    base_file_name, default_file_name_for_glyph_name, is_small_caps_file,
    strip_small_caps_suffix, IgnoreList, DEFAULT_IGNORE_LIST, DEFAULT_LEGACY_REGISTRY_KEYS,
    GLIF_EXTENSION, SMALL_CAPS_FILE_SUFFIX, SMALL_CAPS_SUFFIX,
};
pub use package::clone_package;
pub use paths::{PackagePaths, DEFAULT_FAMILY_MARKER};
pub use pipeline::{promote, PromoteOptions, PromotionReport};
pub use write::{QuoteChar, WriteOptions};
