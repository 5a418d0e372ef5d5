//! Player tag normalization.

use crate::error::LookupError;
use std::fmt;
use std::str::FromStr;


/// Marker character every upstream tag begins with.
pub const TAG_MARKER: char = '#';

/// Canonical player tag, always starting with [`TAG_MARKER`].
///
/// Holds the unencoded form; use [`PlayerTag::encoded`] when embedding the
/// tag in a URL path segment.
///
/// # Examples
///
/// ```rust
/// use clash_lookup::PlayerTag;
///
/// let tag: PlayerTag = "2PP".parse().unwrap();
/// assert_eq!(tag.as_str(), "#2PP");
/// assert_eq!(tag.encoded(), "%232PP");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlayerTag(String);

impl PlayerTag {
    /// Build a tag from raw caller input, prepending the marker if missing.
    ///
    /// Empty or absent input is the only thing rejected here.
    pub fn parse(raw: Option<&str>) -> Result<Self, LookupError> {
        match raw {
            None | Some("") => Err(LookupError::MissingInput),
            Some(s) if s.starts_with(TAG_MARKER) => Ok(Self(s.to_owned())),
            Some(s) => Ok(Self(format!("{TAG_MARKER}{s}"))),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Percent-encoded form, safe for a URL path segment.
    pub fn encoded(&self) -> String {
        urlencoding::encode(&self.0).into_owned()
    }
}

impl fmt::Display for PlayerTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for PlayerTag {
    type Err = LookupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(Some(s))
    }
}

/// Normalize raw input straight to its transport-safe form.
pub fn normalize(raw: Option<&str>) -> Result<String, LookupError> {
    PlayerTag::parse(raw).map(|tag| tag.encoded())
}
