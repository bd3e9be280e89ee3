use crate::error::SerializationError;
use std::fmt::{Display, Formatter};
use std::str::FromStr;


/// Normalized media type used as the registry key.
///
/// Holds the portion of a raw `Content-Type` value before the first `;`,
/// trimmed and ASCII lower-cased. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContentType(String);

impl ContentType {
  pub fn parse(raw: &str) -> Result<Self, SerializationError> {
    let media_type = raw.split_once(';').map_or(raw, |(media_type, _)| media_type).trim();
    if media_type.is_empty() {
      return Err(SerializationError::of_invalid_argument("content type cannot be empty"));
    }
    if media_type.contains("://") {
      return Err(SerializationError::of_invalid_argument(format!(
        "content type must not contain a scheme: {}",
        raw
      )));
    }
    // Ordinal fold, independent of locale.
    Ok(Self(media_type.to_ascii_lowercase()))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// `application/vnd.github+json` -> `application/json`.
  ///
  /// Returns `None` when the subtype carries no structured syntax suffix.
  pub fn without_vendor_prefix(&self) -> Option<ContentType> {
    let (top_level, subtype) = self.0.split_once('/')?;
    let (_, suffix) = subtype.rsplit_once('+')?;
    if suffix.is_empty() {
      return None;
    }
    Some(Self(format!("{}/{}", top_level, suffix)))
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

/// Shorthand for [`ContentType::parse`].
pub fn normalize(raw: &str) -> Result<ContentType, SerializationError> {
  ContentType::parse(raw)
}

impl Display for ContentType {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.write_str(&self.0)
  }
}

impl AsRef<str> for ContentType {
  fn as_ref(&self) -> &str {
    &self.0
  }
}

impl FromStr for ContentType {
  type Err = SerializationError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    ContentType::parse(s)
  }
}

impl TryFrom<&str> for ContentType {
  type Error = SerializationError;

  fn try_from(value: &str) -> Result<Self, Self::Error> {
    ContentType::parse(value)
  }
}

impl TryFrom<String> for ContentType {
  type Error = SerializationError;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    ContentType::parse(&value)
  }
}

impl From<ContentType> for String {
  fn from(value: ContentType) -> Self {
    value.0
  }
}
