//! Cloning the source package to its destination.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::debug;

use crate::Error;

/// Copy the package at `source` to `destination`.
///
/// Anything already at `destination` is removed first, so a rerun starts
/// from a fresh copy of the source. The source package is never modified.
///
/// # Errors
///
/// Returns [`Error::MissingUfoDir`] if `source` is not a directory and
/// [`Error::InvalidInput`] if `destination` is the source or lies inside it.
pub fn clone_package(source: &Path, destination: &Path) -> Result<(), Error> {
    if !source.is_dir() {
        return Err(Error::MissingUfoDir(source.to_path_buf()));
    }
    let source_abs = fs::canonicalize(source).map_err(|e| Error::io(source, e))?;
    if let Some(destination_abs) = resolve_destination(destination) {
        if destination_abs.starts_with(&source_abs) {
            return Err(Error::InvalidInput(format!(
                "output '{}' would overwrite the input '{}'",
                destination.display(),
                source.display()
            )));
        }
    }

    match fs::remove_dir_all(destination) {
        Ok(()) => debug!("removed existing '{}'", destination.display()),
        Err(e) if e.kind() == ErrorKind::NotFound => (),
        Err(e) => return Err(Error::io(destination, e)),
    }
    copy_dir(source, destination)
}

/// The absolute form of `destination`, as far as it can be worked out.
///
/// A destination that does not exist yet is resolved through its parent.
fn resolve_destination(destination: &Path) -> Option<PathBuf> {
    if let Ok(path) = fs::canonicalize(destination) {
        return Some(path);
    }
    let name = destination.file_name()?;
    let parent = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::canonicalize(parent).ok().map(|parent| parent.join(name))
}

fn copy_dir(from: &Path, to: &Path) -> Result<(), Error> {
    fs::create_dir_all(to).map_err(|e| Error::io(to, e))?;
    for entry in fs::read_dir(from).map_err(|e| Error::io(from, e))? {
        let entry = entry.map_err(|e| Error::io(from, e))?;
        let path = entry.path();
        let target = to.join(entry.file_name());
        let file_type = entry.file_type().map_err(|e| Error::io(&path, e))?;
        if file_type.is_dir() {
            copy_dir(&path, &target)?;
        } else {
            fs::copy(&path, &target).map_err(|e| Error::io(&path, e))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn make_package(root: &Path) -> PathBuf {
        let ufo = root.join("Foo-Regular.ufo");
        fs::create_dir_all(ufo.join("glyphs")).unwrap();
        fs::create_dir_all(ufo.join("data/com.example/nested")).unwrap();
        fs::write(ufo.join("metainfo.plist"), "meta").unwrap();
        fs::write(ufo.join("glyphs/a.glif"), "a").unwrap();
        fs::write(ufo.join("data/com.example/nested/blob.bin"), [0u8, 1, 2]).unwrap();
        ufo
    }

    #[test]
    fn copies_everything() {
        let tmp = tempfile::tempdir().unwrap();
        let source = make_package(tmp.path());
        let destination = tmp.path().join("FooSC-Regular.ufo");

        clone_package(&source, &destination).unwrap();
        assert_eq!(fs::read_to_string(destination.join("metainfo.plist")).unwrap(), "meta");
        assert_eq!(fs::read_to_string(destination.join("glyphs/a.glif")).unwrap(), "a");
        assert_eq!(
            fs::read(destination.join("data/com.example/nested/blob.bin")).unwrap(),
            vec![0u8, 1, 2]
        );
    }

    #[test]
    fn replaces_existing_destination() {
        let tmp = tempfile::tempdir().unwrap();
        let source = make_package(tmp.path());
        let destination = tmp.path().join("FooSC-Regular.ufo");
        fs::create_dir_all(destination.join("glyphs")).unwrap();
        fs::write(destination.join("glyphs/stale.glif"), "stale").unwrap();

        clone_package(&source, &destination).unwrap();
        assert!(!destination.join("glyphs/stale.glif").exists());
        assert!(destination.join("glyphs/a.glif").exists());
    }

    #[test]
    fn missing_source() {
        let tmp = tempfile::tempdir().unwrap();
        let result = clone_package(&tmp.path().join("Nope.ufo"), &tmp.path().join("NopeSC.ufo"));
        assert!(matches!(result, Err(Error::MissingUfoDir(_))));
    }

    #[test]
    fn refuses_to_overwrite_source() {
        let tmp = tempfile::tempdir().unwrap();
        let source = make_package(tmp.path());

        let result = clone_package(&source, &source);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
        let result = clone_package(&source, &source.join("glyphs/inner.ufo"));
        assert!(matches!(result, Err(Error::InvalidInput(_))));
        assert!(source.join("glyphs/a.glif").exists());
    }
}
