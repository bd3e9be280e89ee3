use crate::content_type::ContentType;
use crate::error::SerializationError;
use crate::serialization_writer::SerializationWriter;
use std::fmt::Debug;

/// Format plugin entry point for writing.
pub trait SerializationWriterFactory: Debug + Send + Sync {
  fn valid_content_type(&self) -> &str;

  /// Every content type this factory answers for. Each one gets its own registry entry.
  fn supported_content_types(&self) -> Vec<&str> {
    vec![self.valid_content_type()]
  }

  fn get_serialization_writer(
    &self,
    content_type: &ContentType,
  ) -> Result<Box<dyn SerializationWriter>, SerializationError>;
}
