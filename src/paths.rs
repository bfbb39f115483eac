//! Working out where the source package is and where its small-caps copy goes.

use std::path::{Path, PathBuf, MAIN_SEPARATOR};

use crate::Error;

/// The family name marker inserted into the output package name.
pub static DEFAULT_FAMILY_MARKER: &str = "SC";

static UFO_EXTENSIONS: &[&str] = &[".ufo", ".ufo2", ".ufo3"];

/// The source and destination packages of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackagePaths {
    /// The input package, without trailing separators.
    pub source: PathBuf,
    /// The output package, a sibling of the input.
    pub destination: PathBuf,
    /// The family name, taken from the package name.
    pub family: String,
    /// The style name, if the package name has one after a hyphen.
    pub style: Option<String>,
}

impl PackagePaths {
    /// Resolve the paths for the package at `input`.
    ///
    /// The package name must end in `.ufo`, `.ufo2` or `.ufo3`, in any case,
    /// optionally followed by path separators. In `Foo-Regular.ufo` the
    /// family is `Foo` and the style `Regular`; `Foo.ufo` has no style. The
    /// destination is the sibling package with `marker` appended to the
    /// family name, such as `FooSC-Regular.ufo`.
    ///
    /// ```
    /// # use std::path::Path;
    /// # use ufo_smallcaps::PackagePaths;
    /// let paths = PackagePaths::resolve("fonts/Foo-Regular.ufo/", "SC").unwrap();
    /// assert_eq!(paths.family, "Foo");
    /// assert_eq!(paths.style.as_deref(), Some("Regular"));
    /// assert_eq!(paths.destination, Path::new("fonts/FooSC-Regular.ufo"));
    /// ```
    pub fn resolve(input: impl AsRef<Path>, marker: &str) -> Result<Self, Error> {
        let input = input.as_ref();
        let input = input
            .to_str()
            .ok_or_else(|| Error::InvalidInput(format!("{} is not valid UTF-8", input.display())))?;
        let trimmed = input.trim_end_matches(['/', MAIN_SEPARATOR]);
        if !has_ufo_extension(trimmed) {
            return Err(Error::InvalidInput(format!("'{input}' must be a UFO")));
        }

        let source = Path::new(trimmed);
        let package_name = source
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| Error::InvalidInput(format!("'{input}' has no package name")))?;
        // has_ufo_extension guarantees a dot
        let extension_start = package_name.rfind('.').unwrap_or(package_name.len());

        let (family, style) = match package_name.rfind('-') {
            Some(hyphen) if hyphen < extension_start => (
                &package_name[..hyphen],
                Some(package_name[hyphen + 1..extension_start].to_string()),
            ),
            _ => (&package_name[..extension_start], None),
        };
        if family.is_empty() {
            return Err(Error::InvalidInput(format!("'{input}' has no family name")));
        }

        let destination_name = format!("{family}{marker}{}", &package_name[family.len()..]);
        let destination = match source.parent() {
            Some(parent) => parent.join(destination_name),
            None => PathBuf::from(destination_name),
        };

        Ok(PackagePaths {
            source: source.to_path_buf(),
            destination,
            family: family.to_string(),
            style,
        })
    }
}

fn has_ufo_extension(path: &str) -> bool {
    let lowercase = path.to_ascii_lowercase();
    UFO_EXTENSIONS.iter().any(|ext| lowercase.ends_with(ext) && lowercase.len() > ext.len())
}
