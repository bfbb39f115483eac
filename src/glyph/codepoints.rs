//! A collection of codepoints
//!
//! We want to preserve order and ensure uniqueness, so we use an IndexSet;
//! however we don't want this to be part of our public API, so use a wrapper.

use indexmap::IndexSet;

/// The Unicode codepoints assigned to a glyph, in file order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Codepoints(IndexSet<char>);

impl Codepoints {
    /// Construct a new set of codepoints.
    ///
    /// ```
    /// # use ufo_smallcaps::Codepoints;
    /// let codepoints = Codepoints::new(['a', 'A']);
    /// assert_eq!(codepoints.len(), 2);
    /// ```
    pub fn new(src: impl IntoIterator<Item = char>) -> Self {
        Self(src.into_iter().collect())
    }

    /// Return the number of codepoints.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no codepoints.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Insert a codepoint into the set.
    ///
    /// Returns `true` if this item did not exist in the set.
    /// If this item *does* exist, the order will be unchanged.
    pub fn insert(&mut self, codepoint: char) -> bool {
        self.0.insert(codepoint)
    }

    /// Iterate over the codepoints.
    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.0.iter().copied()
    }

    /// The first codepoint, which is the one a glyph is usually known by.
    pub fn first(&self) -> Option<char> {
        self.0.first().copied()
    }
}

impl FromIterator<char> for Codepoints {
    fn from_iter<T: IntoIterator<Item = char>>(iter: T) -> Self {
        Codepoints(iter.into_iter().collect())
    }
}

/// Format a codepoint the way .glif files store it: uppercase hexadecimal,
/// at least four digits.
pub(crate) fn to_hex(codepoint: char) -> String {
    format!("{:04X}", codepoint as u32)
}
