use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SerializationError {
  #[error("Invalid argument: {0}")]
  InvalidArgument(String),
  #[error("Unsupported media type: {content_type}, valid content types are {valid_content_types:?}")]
  UnsupportedMediaType {
    content_type: String,
    valid_content_types: Vec<String>,
  },
  #[error("Serialization error: {0}")]
  Serialization(String),
  #[error("Deserialization error: {0}")]
  Deserialization(String),
  #[error("I/O error: {0}")]
  Io(String),
}

impl SerializationError {
  pub fn of_invalid_argument(message: impl Into<String>) -> Self {
    SerializationError::InvalidArgument(message.into())
  }

  pub fn of_unsupported_media_type(content_type: impl Into<String>, valid_content_types: Vec<String>) -> Self {
    SerializationError::UnsupportedMediaType {
      content_type: content_type.into(),
      valid_content_types,
    }
  }

  pub fn of_serialization(message: impl Into<String>) -> Self {
    SerializationError::Serialization(message.into())
  }

  pub fn of_deserialization(message: impl Into<String>) -> Self {
    SerializationError::Deserialization(message.into())
  }

  pub fn of_io(err: &std::io::Error) -> Self {
    SerializationError::Io(err.to_string())
  }

  pub fn is_invalid_argument(&self) -> bool {
    matches!(self, SerializationError::InvalidArgument(_))
  }

  pub fn is_unsupported_media_type(&self) -> bool {
    matches!(self, SerializationError::UnsupportedMediaType { .. })
  }

  pub fn is_deserialization(&self) -> bool {
    matches!(self, SerializationError::Deserialization(_))
  }
}
