//! Error types.

use std::io::Error as IoError;
use std::path::PathBuf;

use plist::Error as PlistError;
use quick_xml::events::attributes::AttrError;
use quick_xml::Error as XmlError;

/// Errors that occur while promoting small-caps glyphs.
///
/// Every error is fatal to a run. A failure after the package has been cloned
/// leaves a partially transformed output package behind; the input package is
/// never modified.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The input path does not name a UFO package.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// The source package directory does not exist.
    #[error("{} directory was not found", .0.display())]
    MissingUfoDir(PathBuf),
    /// A filesystem operation failed.
    #[error("failed to access '{}'", path.display())]
    Io {
        /// The path being read, written, copied or removed.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: IoError,
    },
    /// A base glyph has no Unicode codepoint to hand over to its small-caps
    /// replacement.
    #[error("base glyph file '{}' has no unicode codepoint", glyph.display())]
    MissingCodepoint {
        /// The base glyph's file.
        glyph: PathBuf,
    },
    /// A .glif file could not be read or rewritten.
    #[error("error in glif file '{}'", path.display())]
    Glif {
        /// The offending glif file.
        path: PathBuf,
        /// The actual error.
        #[source]
        source: GlifError,
    },
    /// The glyph registry could not be read or written.
    #[error("failed to read or write glyph registry")]
    Plist(#[from] PlistError),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: IoError) -> Self {
        Error::Io { path: path.into(), source }
    }

    pub(crate) fn glif(path: impl Into<PathBuf>, source: GlifError) -> Self {
        Error::Glif { path: path.into(), source }
    }
}

/// An error that occurs while reading or rewriting a single .glif file.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum GlifError {
    /// A [`quick_xml::Error`].
    #[error("failed to read or parse XML structure")]
    Xml(#[from] XmlError),
    /// A malformed element attribute.
    #[error("failed to parse element attribute")]
    Attribute(#[from] AttrError),
    /// Writing the rewritten XML failed.
    #[error("failed to write XML")]
    Write(#[from] IoError),
    /// A `unicode` element's `hex` attribute is not a valid codepoint.
    #[error("failed to parse hexadecimal Unicode code point value '{0}'")]
    BadUnicodeValue(String),
    /// A `unicode` element without a `hex` attribute.
    #[error("a 'unicode' element is missing a 'hex' attribute")]
    UnicodeMissingHex,
    /// The root element is not a named `glyph`.
    #[error("the first element must be a 'glyph' with a 'name' attribute")]
    WrongFirstElement,
    /// The document ended before the `glyph` element was closed.
    #[error("unexpected end of file")]
    UnexpectedEof,
}
