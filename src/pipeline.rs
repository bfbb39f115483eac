//! The whole promotion pass over one package.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use log::info;

use crate::features::{patch_features_file, FEATURES_FILE};
use crate::glyph::promote_glyph;
use crate::layer::GlyphDir;
use crate::names::{IgnoreList, DEFAULT_LEGACY_REGISTRY_KEYS};
use crate::package::clone_package;
use crate::paths::{PackagePaths, DEFAULT_FAMILY_MARKER};
use crate::{Error, WriteOptions};

/// Options for a promotion run.
///
/// You construct `PromoteOptions` using builder semantics:
///
/// ```
/// # use ufo_smallcaps::PromoteOptions;
/// let options = PromoteOptions::default()
///     .ignore_glyph_file("ampersand.sc.glif")
///     .family_marker("Caps")
///     .output("build/FooCaps-Regular.ufo");
/// ```
#[derive(Debug, Clone)]
pub struct PromoteOptions {
    pub(crate) ignore: IgnoreList,
    pub(crate) legacy_registry_keys: Vec<String>,
    pub(crate) family_marker: String,
    pub(crate) output: Option<PathBuf>,
    pub(crate) write_options: WriteOptions,
}

impl Default for PromoteOptions {
    fn default() -> Self {
        PromoteOptions {
            ignore: IgnoreList::default(),
            legacy_registry_keys: DEFAULT_LEGACY_REGISTRY_KEYS
                .iter()
                .map(|key| key.to_string())
                .collect(),
            family_marker: DEFAULT_FAMILY_MARKER.to_string(),
            output: None,
            write_options: WriteOptions::default(),
        }
    }
}

impl PromoteOptions {
    /// Builder-style method to leave one more small-caps glyph file alone.
    pub fn ignore_glyph_file(mut self, file_name: impl Into<String>) -> Self {
        self.ignore.insert(file_name);
        self
    }

    /// Builder-style method to replace the ignore list.
    ///
    /// Pass [`IgnoreList::empty`] to promote every small-caps glyph.
    pub fn ignore_list(mut self, ignore: IgnoreList) -> Self {
        self.ignore = ignore;
        self
    }

    /// Builder-style method to set the registry keys that are always dropped.
    pub fn legacy_registry_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.legacy_registry_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Builder-style method to set the text appended to the family name of
    /// the output package.
    ///
    /// By default, this is `SC`.
    pub fn family_marker(mut self, marker: impl Into<String>) -> Self {
        self.family_marker = marker.into();
        self
    }

    /// Builder-style method to write the output package to `path` instead of
    /// next to the input.
    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }

    /// Builder-style method to customize how rewritten files are written.
    pub fn write_options(mut self, options: WriteOptions) -> Self {
        self.write_options = options;
        self
    }

    /// The small-caps glyph files that will be left alone.
    pub fn ignored(&self) -> &IgnoreList {
        &self.ignore
    }

    /// The text appended to the family name of the output package.
    pub fn marker(&self) -> &str {
        &self.family_marker
    }

    /// The output package path, if it overrides the default sibling.
    pub fn output_path(&self) -> Option<&Path> {
        self.output.as_deref()
    }
}

/// What a promotion run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromotionReport {
    /// The input package.
    pub source: PathBuf,
    /// The output package.
    pub destination: PathBuf,
    /// The family name read from the input package name.
    pub family: String,
    /// The style name read from the input package name, if any.
    pub style: Option<String>,
    /// The base glyphs that now carry small-caps outlines, in promotion order.
    pub promoted: Vec<String>,
    /// Glyph names dropped from `contents.plist`.
    pub registry_entries_removed: Vec<String>,
    /// Glyph references deleted from `features.fea`.
    pub tokens_removed: usize,
    /// Glyph references in `features.fea` that lost their small-caps suffix.
    pub tokens_renamed: usize,
    /// Glyph class declarations left empty in `features.fea`.
    pub empty_classes: Vec<String>,
}

/// Build the small-caps copy of the UFO package at `input`.
///
/// The package is copied to its small-caps sibling (`Foo-Regular.ufo` becomes
/// `FooSC-Regular.ufo`, or [`PromoteOptions::output`] if set), and in that copy
/// every small-caps glyph not on the ignore list replaces its base glyph. The
/// glyph registry and the feature file are updated to match. The input package
/// is never modified.
///
/// # Errors
///
/// Any error aborts the run, including a package without `features.fea`.
/// Errors after the copy was made leave a partially promoted output package
/// behind.
pub fn promote(
    input: impl AsRef<Path>,
    options: &PromoteOptions,
) -> Result<PromotionReport, Error> {
    let mut paths = PackagePaths::resolve(input, &options.family_marker)?;
    if let Some(output) = &options.output {
        paths.destination = output.clone();
    }
    info!(
        "promoting small caps from {} to {}",
        paths.source.display(),
        paths.destination.display()
    );

    clone_package(&paths.source, &paths.destination)?;

    let glyph_dir = GlyphDir::for_package(&paths.destination);
    let selected = glyph_dir.select_small_caps(&options.ignore)?;
    info!("found {} small-caps glyphs to promote", selected.len());

    let promoted = selected
        .iter()
        .map(|file| promote_glyph(glyph_dir.path(), file, &options.ignore, &options.write_options))
        .collect::<Result<Vec<_>, _>>()?;

    let registry_entries_removed = glyph_dir.remove_entries(
        &promoted,
        &options.legacy_registry_keys,
        &options.write_options,
    )?;
    info!("removed {} entries from the glyph registry", registry_entries_removed.len());

    let names: HashSet<&str> = promoted.iter().map(|glyph| glyph.name.as_str()).collect();
    let features_path = paths.destination.join(FEATURES_FILE);
    let patch = patch_features_file(&features_path, &names)?;
    info!(
        "patched {}: {} references removed, {} renamed",
        features_path.display(),
        patch.tokens_removed,
        patch.tokens_renamed
    );

    Ok(PromotionReport {
        source: paths.source,
        destination: paths.destination,
        family: paths.family,
        style: paths.style,
        promoted: promoted.into_iter().map(|glyph| glyph.name).collect(),
        registry_entries_removed,
        tokens_removed: patch.tokens_removed,
        tokens_renamed: patch.tokens_renamed,
        empty_classes: patch.empty_classes,
    })
}
