use crate::error::SerializationError;
use crate::parsable::Parsable;
use std::io::Read;

/// Single-use stream handed back by a writer. Dropping it releases the buffer.
pub type SerializedContent = Box<dyn Read + Send>;

/// Format-specific writer created per serialization call.
///
/// An empty `key` means the value is written at the position the writer is
/// currently at (the document root for the first call) without a field name.
pub trait SerializationWriter {
  fn write_string_value(&mut self, key: &str, value: Option<&str>) -> Result<(), SerializationError>;

  fn write_bool_value(&mut self, key: &str, value: Option<bool>) -> Result<(), SerializationError>;

  fn write_i64_value(&mut self, key: &str, value: Option<i64>) -> Result<(), SerializationError>;

  fn write_f64_value(&mut self, key: &str, value: Option<f64>) -> Result<(), SerializationError>;

  fn write_null_value(&mut self, key: &str) -> Result<(), SerializationError>;

  fn write_object_value(&mut self, key: &str, value: Option<&dyn Parsable>) -> Result<(), SerializationError>;

  /// `None` elements are forwarded as-is; the writer decides how a missing element is represented.
  fn write_collection_of_object_values(
    &mut self,
    key: &str,
    values: &[Option<&dyn Parsable>],
  ) -> Result<(), SerializationError>;

  /// Hands over everything written so far. Ownership of the stream moves to the caller.
  fn get_serialized_content(&mut self) -> Result<SerializedContent, SerializationError>;
}
