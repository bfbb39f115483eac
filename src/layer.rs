//! The default layer's glyph directory and its `contents.plist` registry.

use std::collections::HashSet;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::glyph::PromotedGlyph;
use crate::names::{is_small_caps_file, IgnoreList};
use crate::write::{write_xml_to_file, WriteOptions};
use crate::Error;

pub(crate) static CONTENTS_FILE: &str = "contents.plist";
pub(crate) static DEFAULT_GLYPHS_DIRNAME: &str = "glyphs";

/// The glyph name to file name mapping stored in `contents.plist`.
///
/// Entry order is preserved across a load and save.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Registry(IndexMap<String, String>);

impl Registry {
    /// Returns the file name registered for a glyph.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Returns the number of registered glyphs.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no glyphs are registered.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(glyph name, file name)` pairs in file order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.0.iter().map(|(name, file)| (name.as_str(), file.as_str()))
    }

    /// Remove every entry for which `remove` returns `true`, keeping the
    /// order of the rest. Returns the removed glyph names.
    fn remove_where(&mut self, mut remove: impl FnMut(&str, &str) -> bool) -> Vec<String> {
        let mut removed = Vec::new();
        self.0.retain(|name, file| {
            if remove(name.as_str(), file.as_str()) {
                removed.push(name.clone());
                false
            } else {
                true
            }
        });
        removed
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Registry {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Registry(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// A [layer]'s directory: one .glif file per glyph plus the registry.
///
/// Only the default `glyphs` directory is ever touched.
///
/// [layer]: http://unifiedfontobject.org/versions/ufo3/glyphs/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphDir {
    path: PathBuf,
}

impl GlyphDir {
    /// The default layer's glyph directory within the package at `ufo_path`.
    pub fn for_package(ufo_path: impl AsRef<Path>) -> Self {
        GlyphDir::new(ufo_path.as_ref().join(DEFAULT_GLYPHS_DIRNAME))
    }

    /// A glyph directory at this path. Nothing is read until requested.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        GlyphDir { path: path.into() }
    }

    /// The directory's path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// List the small-caps glyph files eligible for promotion.
    ///
    /// Regular files directly in the directory whose name ends with the
    /// small-caps file suffix are selected unless `ignore` contains them.
    /// The result is sorted.
    pub fn select_small_caps(&self, ignore: &IgnoreList) -> Result<Vec<String>, Error> {
        let entries = fs::read_dir(&self.path).map_err(|e| Error::io(&self.path, e))?;
        let mut selected = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| Error::io(&self.path, e))?;
            let file_type = entry.file_type().map_err(|e| Error::io(entry.path(), e))?;
            if !file_type.is_file() {
                continue;
            }
            let Ok(file_name) = entry.file_name().into_string() else {
                continue;
            };
            if !is_small_caps_file(&file_name) {
                continue;
            }
            if ignore.contains_file(&file_name) {
                debug!("ignoring '{file_name}'");
                continue;
            }
            selected.push(file_name);
        }
        selected.sort();
        Ok(selected)
    }

    /// Load the registry from `contents.plist`.
    pub fn registry(&self) -> Result<Registry, Error> {
        let path = self.path.join(CONTENTS_FILE);
        let bytes = fs::read(&path).map_err(|e| Error::io(&path, e))?;
        Ok(plist::from_reader(Cursor::new(bytes.as_slice()))?)
    }

    /// Write the registry to `contents.plist`, replacing the existing file.
    pub fn save_registry(&self, registry: &Registry, options: &WriteOptions) -> Result<(), Error> {
        write_xml_to_file(&self.path.join(CONTENTS_FILE), registry, options)
    }

    /// Drop the registry entries of promoted small-caps glyphs.
    ///
    /// An entry goes when its file name is one of the deleted small-caps
    /// files, when its name is a promoted small-caps glyph's name, or when its
    /// name is one of `legacy_keys`. Names that are not registered are
    /// ignored. Returns the removed glyph names in registry order.
    pub fn remove_entries(
        &self,
        promoted: &[PromotedGlyph],
        legacy_keys: &[String],
        options: &WriteOptions,
    ) -> Result<Vec<String>, Error> {
        let files: HashSet<&str> =
            promoted.iter().map(|glyph| glyph.small_caps_file_name.as_str()).collect();
        let names: HashSet<&str> = promoted
            .iter()
            .map(|glyph| glyph.small_caps_name.as_str())
            .chain(legacy_keys.iter().map(String::as_str))
            .collect();

        let mut registry = self.registry()?;
        let removed =
            registry.remove_where(|name, file| files.contains(file) || names.contains(name));
        self.save_registry(&registry, options)?;
        debug!("removed {} registry entries, {} remain", removed.len(), registry.len());
        Ok(removed)
    }
}
