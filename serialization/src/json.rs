//! Reference format plugin backed by `serde_json`.

use crate::content_type::ContentType;
use crate::error::SerializationError;
use crate::parsable::Parsable;
use crate::parse_node::ParseNode;
use crate::parse_node_factory::ParseNodeFactory;
use crate::registry::SerializationRegistry;
use crate::serialization_helper::JSON_CONTENT_TYPE;
use crate::serialization_writer::{SerializationWriter, SerializedContent};
use crate::serialization_writer_factory::SerializationWriterFactory;
use serde_json::{Map, Number, Value};
use std::io::{Cursor, Read};
use std::sync::Arc;


/// Installs the JSON writer and parse node factories on `registry`.
pub fn register_json_defaults(registry: &SerializationRegistry) -> Result<(), SerializationError> {
  registry.register_writer_factory(Arc::new(JsonSerializationWriterFactory::new()))?;
  registry.register_reader_factory(Arc::new(JsonParseNodeFactory::new()))?;
  Ok(())
}

fn ensure_json(content_type: &ContentType) -> Result<(), SerializationError> {
  let is_json = content_type.as_str() == JSON_CONTENT_TYPE
    || content_type
      .without_vendor_prefix()
      .is_some_and(|fallback| fallback.as_str() == JSON_CONTENT_TYPE);
  if is_json {
    Ok(())
  } else {
    Err(SerializationError::of_invalid_argument(format!(
      "expected a JSON content type, got {}",
      content_type
    )))
  }
}

#[derive(Debug, Clone, Default)]
pub struct JsonSerializationWriterFactory;

impl JsonSerializationWriterFactory {
  pub const fn new() -> Self {
    Self
  }
}

impl SerializationWriterFactory for JsonSerializationWriterFactory {
  fn valid_content_type(&self) -> &str {
    JSON_CONTENT_TYPE
  }

  fn get_serialization_writer(
    &self,
    content_type: &ContentType,
  ) -> Result<Box<dyn SerializationWriter>, SerializationError> {
    ensure_json(content_type)?;
    Ok(Box::new(JsonSerializationWriter::new()))
  }
}

#[derive(Debug)]
enum Frame {
  Object(Map<String, Value>),
  Array(Vec<Value>),
}

/// Builds a `serde_json::Value` tree and renders it once content is requested.
///
/// Keyed values that are `None` are omitted; `None` collection elements become `null`.
#[derive(Debug, Default)]
pub struct JsonSerializationWriter {
  frames: Vec<Frame>,
  root: Option<Value>,
}

impl JsonSerializationWriter {
  pub fn new() -> Self {
    Self::default()
  }

  fn write_value(&mut self, key: &str, value: Value) -> Result<(), SerializationError> {
    match self.frames.last_mut() {
      Some(Frame::Object(map)) => match (key.is_empty(), value) {
        (false, value) => {
          map.insert(key.to_string(), value);
        }
        // Unkeyed object inside an object: merge its fields into the enclosing one.
        (true, Value::Object(fields)) => map.extend(fields),
        (true, _) => {
          return Err(SerializationError::of_serialization(
            "a field name is required for scalar values inside an object",
          ));
        }
      },
      Some(Frame::Array(items)) => items.push(value),
      None => {
        if self.root.is_some() {
          return Err(SerializationError::of_serialization("document root has already been written"));
        }
        let value = if key.is_empty() {
          value
        } else {
          let mut map = Map::new();
          map.insert(key.to_string(), value);
          Value::Object(map)
        };
        self.root = Some(value);
      }
    }
    Ok(())
  }

  fn write_optional(&mut self, key: &str, value: Option<Value>) -> Result<(), SerializationError> {
    match value {
      Some(value) => self.write_value(key, value),
      None => Ok(()),
    }
  }
}

impl SerializationWriter for JsonSerializationWriter {
  fn write_string_value(&mut self, key: &str, value: Option<&str>) -> Result<(), SerializationError> {
    self.write_optional(key, value.map(|v| Value::String(v.to_string())))
  }

  fn write_bool_value(&mut self, key: &str, value: Option<bool>) -> Result<(), SerializationError> {
    self.write_optional(key, value.map(Value::Bool))
  }

  fn write_i64_value(&mut self, key: &str, value: Option<i64>) -> Result<(), SerializationError> {
    self.write_optional(key, value.map(Value::from))
  }

  fn write_f64_value(&mut self, key: &str, value: Option<f64>) -> Result<(), SerializationError> {
    let value = value
      .map(|v| {
        Number::from_f64(v)
          .map(Value::Number)
          .ok_or_else(|| SerializationError::of_serialization(format!("{} is not representable in JSON", v)))
      })
      .transpose()?;
    self.write_optional(key, value)
  }

  fn write_null_value(&mut self, key: &str) -> Result<(), SerializationError> {
    self.write_value(key, Value::Null)
  }

  fn write_object_value(&mut self, key: &str, value: Option<&dyn Parsable>) -> Result<(), SerializationError> {
    let Some(value) = value else {
      return Ok(());
    };
    self.frames.push(Frame::Object(Map::new()));
    let result = value.serialize(self);
    let frame = self.frames.pop();
    result?;
    match frame {
      Some(Frame::Object(map)) => self.write_value(key, Value::Object(map)),
      _ => Err(SerializationError::of_serialization("unbalanced object frame")),
    }
  }

  fn write_collection_of_object_values(
    &mut self,
    key: &str,
    values: &[Option<&dyn Parsable>],
  ) -> Result<(), SerializationError> {
    self.frames.push(Frame::Array(Vec::with_capacity(values.len())));
    let result = values.iter().try_for_each(|value| match value {
      Some(value) => self.write_object_value("", Some(*value)),
      None => self.write_value("", Value::Null),
    });
    let frame = self.frames.pop();
    result?;
    match frame {
      Some(Frame::Array(items)) => self.write_value(key, Value::Array(items)),
      _ => Err(SerializationError::of_serialization("unbalanced array frame")),
    }
  }

  fn get_serialized_content(&mut self) -> Result<SerializedContent, SerializationError> {
    if !self.frames.is_empty() {
      return Err(SerializationError::of_serialization(
        "serialized content requested while a value is still being written",
      ));
    }
    let bytes = match self.root.take() {
      Some(value) => serde_json::to_vec(&value).map_err(|err| SerializationError::of_serialization(err.to_string()))?,
      None => Vec::new(),
    };
    Ok(Box::new(Cursor::new(bytes)))
  }
}

#[derive(Debug, Clone, Default)]
pub struct JsonParseNodeFactory;

impl JsonParseNodeFactory {
  pub const fn new() -> Self {
    Self
  }
}

impl ParseNodeFactory for JsonParseNodeFactory {
  fn valid_content_type(&self) -> &str {
    JSON_CONTENT_TYPE
  }

  fn get_root_parse_node(
    &self,
    content_type: &ContentType,
    content: &mut dyn Read,
  ) -> Result<Box<dyn ParseNode>, SerializationError> {
    ensure_json(content_type)?;
    let mut buf = Vec::new();
    content
      .read_to_end(&mut buf)
      .map_err(|err| SerializationError::of_io(&err))?;
    let value: Value =
      serde_json::from_slice(&buf).map_err(|err| SerializationError::of_deserialization(err.to_string()))?;
    Ok(Box::new(JsonParseNode::new(value)))
  }
}

static NULL: Value = Value::Null;

/// Node in a parsed JSON document.
///
/// Every node derived from a root shares its document and addresses its own
/// value by JSON Pointer, so walking children never copies subtrees.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonParseNode {
  document: Arc<Value>,
  pointer: String,
}

impl JsonParseNode {
  pub fn new(value: Value) -> Self {
    Self {
      document: Arc::new(value),
      pointer: String::new(),
    }
  }

  pub fn value(&self) -> &Value {
    self.document.pointer(&self.pointer).unwrap_or(&NULL)
  }

  /// Member `key` of this object, or `None` when this is not an object or the key is absent.
  pub fn child(&self, key: &str) -> Option<JsonParseNode> {
    if !self.value().as_object()?.contains_key(key) {
      return None;
    }
    Some(self.descend(&key.replace('~', "~0").replace('/', "~1")))
  }

  /// Elements of this array, or `None` when this is not an array.
  pub fn elements(&self) -> Option<Vec<JsonParseNode>> {
    let len = self.value().as_array()?.len();
    Some((0..len).map(|index| self.descend(&index.to_string())).collect())
  }

  fn descend(&self, token: &str) -> Self {
    Self {
      document: Arc::clone(&self.document),
      pointer: format!("{}/{}", self.pointer, token),
    }
  }

  fn type_mismatch(&self, expected: &str) -> SerializationError {
    SerializationError::of_deserialization(format!("expected {}, found {}", expected, self.value()))
  }
}

impl ParseNode for JsonParseNode {
  fn get_child_node(&self, key: &str) -> Option<Box<dyn ParseNode>> {
    self.child(key).map(|node| Box::new(node) as Box<dyn ParseNode>)
  }

  fn is_null(&self) -> bool {
    self.value().is_null()
  }

  fn get_string_value(&self) -> Result<Option<String>, SerializationError> {
    match self.value() {
      Value::Null => Ok(None),
      Value::String(value) => Ok(Some(value.clone())),
      _ => Err(self.type_mismatch("a string")),
    }
  }

  fn get_bool_value(&self) -> Result<Option<bool>, SerializationError> {
    match self.value() {
      Value::Null => Ok(None),
      Value::Bool(value) => Ok(Some(*value)),
      _ => Err(self.type_mismatch("a boolean")),
    }
  }

  fn get_i64_value(&self) -> Result<Option<i64>, SerializationError> {
    match self.value() {
      Value::Null => Ok(None),
      Value::Number(number) => number.as_i64().map(Some).ok_or_else(|| self.type_mismatch("an integer")),
      _ => Err(self.type_mismatch("an integer")),
    }
  }

  fn get_f64_value(&self) -> Result<Option<f64>, SerializationError> {
    match self.value() {
      Value::Null => Ok(None),
      Value::Number(number) => number.as_f64().map(Some).ok_or_else(|| self.type_mismatch("a number")),
      _ => Err(self.type_mismatch("a number")),
    }
  }

  fn get_collection_of_nodes(&self) -> Result<Vec<Box<dyn ParseNode>>, SerializationError> {
    let elements = self.elements().ok_or_else(|| self.type_mismatch("an array"))?;
    Ok(
      elements
        .into_iter()
        .map(|node| Box::new(node) as Box<dyn ParseNode>)
        .collect(),
    )
  }
}
