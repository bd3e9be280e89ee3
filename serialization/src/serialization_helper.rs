use crate::content_type::ContentType;
use crate::error::SerializationError;
use crate::parsable::Parsable;
use crate::parse_node::{ParseNode, ParseNodeExt};
use crate::registry::SerializationRegistry;
use crate::serialization_writer::{SerializationWriter, SerializedContent};
use std::io::{Cursor, Read};


pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Entry points that serialize and deserialize models through a [`SerializationRegistry`].
///
/// Every argument is validated before the registry is consulted. Registry misses
/// surface as [`SerializationError::UnsupportedMediaType`]; failures inside a
/// writer or parse node surface as `Serialization` / `Deserialization`.
#[derive(Debug, Clone)]
pub struct SerializationHelper {
  registry: SerializationRegistry,
}

impl Default for SerializationHelper {
  fn default() -> Self {
    Self::shared()
  }
}

impl SerializationHelper {
  pub fn new(registry: SerializationRegistry) -> Self {
    Self { registry }
  }

  /// Helper over [`SerializationRegistry::shared`].
  pub fn shared() -> Self {
    Self::new(SerializationRegistry::shared())
  }

  pub fn registry(&self) -> &SerializationRegistry {
    &self.registry
  }

  pub fn serialize_as_stream(
    &self,
    content_type: &str,
    value: Option<&dyn Parsable>,
  ) -> Result<SerializedContent, SerializationError> {
    let content_type = ContentType::parse(content_type)?;
    let value = value.ok_or_else(|| SerializationError::of_invalid_argument("value cannot be null"))?;
    let mut writer = self.create_writer(&content_type)?;
    writer.write_object_value("", Some(value))?;
    writer.get_serialized_content()
  }

  pub fn serialize_as_string(&self, content_type: &str, value: Option<&dyn Parsable>) -> Result<String, SerializationError> {
    let content = self.serialize_as_stream(content_type, value)?;
    read_to_string(content)
  }

  pub fn serialize_collection_as_stream(
    &self,
    content_type: &str,
    values: Option<&[Option<&dyn Parsable>]>,
  ) -> Result<SerializedContent, SerializationError> {
    let content_type = ContentType::parse(content_type)?;
    let values = values.ok_or_else(|| SerializationError::of_invalid_argument("values cannot be null"))?;
    let mut writer = self.create_writer(&content_type)?;
    writer.write_collection_of_object_values("", values)?;
    writer.get_serialized_content()
  }

  pub fn serialize_collection_as_string(
    &self,
    content_type: &str,
    values: Option<&[Option<&dyn Parsable>]>,
  ) -> Result<String, SerializationError> {
    let content = self.serialize_collection_as_stream(content_type, values)?;
    read_to_string(content)
  }

  pub fn serialize_as_json_string(&self, value: Option<&dyn Parsable>) -> Result<String, SerializationError> {
    self.serialize_as_string(JSON_CONTENT_TYPE, value)
  }

  pub fn serialize_collection_as_json_string(
    &self,
    values: Option<&[Option<&dyn Parsable>]>,
  ) -> Result<String, SerializationError> {
    self.serialize_collection_as_string(JSON_CONTENT_TYPE, values)
  }

  /// Parses `content` and builds the root model with `factory`. A null document yields `None`.
  pub fn deserialize<T, F>(
    &self,
    content_type: &str,
    content: &mut dyn Read,
    factory: F,
  ) -> Result<Option<T>, SerializationError>
  where
    F: Fn(&dyn ParseNode) -> Result<T, SerializationError>, {
    let content_type = ContentType::parse(content_type)?;
    let root = self.root_parse_node(&content_type, content)?;
    root.get_object_value(&factory)
  }

  pub fn deserialize_from_string<T, F>(
    &self,
    content_type: &str,
    value: &str,
    factory: F,
  ) -> Result<Option<T>, SerializationError>
  where
    F: Fn(&dyn ParseNode) -> Result<T, SerializationError>, {
    let content_type = ContentType::parse(content_type)?;
    let mut content = require_payload(value)?;
    let root = self.root_parse_node(&content_type, &mut content)?;
    root.get_object_value(&factory)
  }

  pub fn deserialize_collection<T, F>(
    &self,
    content_type: &str,
    content: &mut dyn Read,
    factory: F,
  ) -> Result<Vec<Option<T>>, SerializationError>
  where
    F: Fn(&dyn ParseNode) -> Result<T, SerializationError>, {
    let content_type = ContentType::parse(content_type)?;
    let root = self.root_parse_node(&content_type, content)?;
    root.get_collection_of_object_values(&factory)
  }

  pub fn deserialize_collection_from_string<T, F>(
    &self,
    content_type: &str,
    value: &str,
    factory: F,
  ) -> Result<Vec<Option<T>>, SerializationError>
  where
    F: Fn(&dyn ParseNode) -> Result<T, SerializationError>, {
    let content_type = ContentType::parse(content_type)?;
    let mut content = require_payload(value)?;
    let root = self.root_parse_node(&content_type, &mut content)?;
    root.get_collection_of_object_values(&factory)
  }

  pub fn deserialize_from_json_string<T, F>(&self, value: &str, factory: F) -> Result<Option<T>, SerializationError>
  where
    F: Fn(&dyn ParseNode) -> Result<T, SerializationError>, {
    self.deserialize_from_string(JSON_CONTENT_TYPE, value, factory)
  }

  pub fn deserialize_collection_from_json_string<T, F>(
    &self,
    value: &str,
    factory: F,
  ) -> Result<Vec<Option<T>>, SerializationError>
  where
    F: Fn(&dyn ParseNode) -> Result<T, SerializationError>, {
    self.deserialize_collection_from_string(JSON_CONTENT_TYPE, value, factory)
  }

  fn create_writer(&self, content_type: &ContentType) -> Result<Box<dyn SerializationWriter>, SerializationError> {
    self
      .registry
      .find_writer_factory(content_type)?
      .get_serialization_writer(content_type)
  }

  fn root_parse_node(
    &self,
    content_type: &ContentType,
    content: &mut dyn Read,
  ) -> Result<Box<dyn ParseNode>, SerializationError> {
    self
      .registry
      .find_reader_factory(content_type)?
      .get_root_parse_node(content_type, content)
  }
}

fn require_payload(value: &str) -> Result<Cursor<&[u8]>, SerializationError> {
  if value.trim().is_empty() {
    return Err(SerializationError::of_invalid_argument("payload cannot be empty"));
  }
  Ok(Cursor::new(value.as_bytes()))
}

fn read_to_string(mut content: SerializedContent) -> Result<String, SerializationError> {
  let mut buf = Vec::new();
  content
    .read_to_end(&mut buf)
    .map_err(|err| SerializationError::of_io(&err))?;
  drop(content);
  String::from_utf8(buf).map_err(|err| SerializationError::of_serialization(format!("content is not valid UTF-8: {}", err)))
}
