use crate::error::SerializationError;
use crate::serialization_writer::SerializationWriter;

/// Model types that know how to walk their own fields into a [`SerializationWriter`].
///
/// Values are borrowed for the duration of a single write; neither the writer
/// nor the registry keeps a reference once the call returns.
pub trait Parsable {
  fn serialize(&self, writer: &mut dyn SerializationWriter) -> Result<(), SerializationError>;
}

impl<P: Parsable + ?Sized> Parsable for Box<P> {
  fn serialize(&self, writer: &mut dyn SerializationWriter) -> Result<(), SerializationError> {
    (**self).serialize(writer)
  }
}
