use crate::content_type::ContentType;
use crate::error::SerializationError;
use crate::parsable::Parsable;
use crate::parse_node::ParseNode;
use crate::parse_node_factory::ParseNodeFactory;
use crate::serialization_writer::{SerializationWriter, SerializedContent};
use crate::serialization_writer_factory::SerializationWriterFactory;
use std::io::{Cursor, Read};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TestEntity {
  pub id: Option<String>,
}

impl TestEntity {
  pub fn with_id(id: &str) -> Self {
    Self { id: Some(id.to_string()) }
  }

  pub fn from_mock_node(node: &dyn ParseNode) -> Result<TestEntity, SerializationError> {
    Ok(TestEntity {
      id: node.get_string_value()?,
    })
  }
}

impl Parsable for TestEntity {
  fn serialize(&self, writer: &mut dyn SerializationWriter) -> Result<(), SerializationError> {
    writer.write_string_value("id", self.id.as_deref())
  }
}

pub fn address_of(value: &dyn Parsable) -> usize {
  std::ptr::from_ref(value).cast::<()>() as usize
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriterCall {
  ObjectValue { key: String, address: Option<usize> },
  CollectionOfObjectValues { key: String, addresses: Vec<Option<usize>> },
}

#[derive(Debug, Clone, Default)]
pub struct CallLog {
  calls: Arc<Mutex<Vec<WriterCall>>>,
}

impl CallLog {
  fn push(&self, call: WriterCall) {
    self.calls.lock().expect("call log poisoned").push(call);
  }

  pub fn calls(&self) -> Vec<WriterCall> {
    self.calls.lock().expect("call log poisoned").clone()
  }
}

/// Writer factory that hands out writers emitting a fixed payload and recording what they were asked to write.
#[derive(Debug, Clone)]
pub struct MockWriterFactory {
  content_types: Vec<String>,
  output: Vec<u8>,
  fail_on_write: bool,
  calls: CallLog,
  created: Arc<AtomicUsize>,
}

impl MockWriterFactory {
  pub fn new(content_type: &str, output: &str) -> Self {
    Self {
      content_types: vec![content_type.to_string()],
      output: output.as_bytes().to_vec(),
      fail_on_write: false,
      calls: CallLog::default(),
      created: Arc::new(AtomicUsize::new(0)),
    }
  }

  pub fn with_content_types<S: Into<String>>(mut self, content_types: Vec<S>) -> Self {
    self.content_types = content_types.into_iter().map(Into::into).collect();
    self
  }

  pub fn with_raw_output(mut self, output: Vec<u8>) -> Self {
    self.output = output;
    self
  }

  pub fn failing(mut self) -> Self {
    self.fail_on_write = true;
    self
  }

  pub fn calls(&self) -> Vec<WriterCall> {
    self.calls.calls()
  }

  pub fn created_writers(&self) -> usize {
    self.created.load(Ordering::SeqCst)
  }
}

impl SerializationWriterFactory for MockWriterFactory {
  fn valid_content_type(&self) -> &str {
    self.content_types.first().map(String::as_str).unwrap_or_default()
  }

  fn supported_content_types(&self) -> Vec<&str> {
    self.content_types.iter().map(String::as_str).collect()
  }

  fn get_serialization_writer(
    &self,
    _content_type: &ContentType,
  ) -> Result<Box<dyn SerializationWriter>, SerializationError> {
    self.created.fetch_add(1, Ordering::SeqCst);
    Ok(Box::new(MockWriter {
      output: self.output.clone(),
      fail_on_write: self.fail_on_write,
      calls: self.calls.clone(),
    }))
  }
}

struct MockWriter {
  output: Vec<u8>,
  fail_on_write: bool,
  calls: CallLog,
}

impl MockWriter {
  fn check(&self) -> Result<(), SerializationError> {
    if self.fail_on_write {
      Err(SerializationError::of_serialization("mock writer failure"))
    } else {
      Ok(())
    }
  }
}

impl SerializationWriter for MockWriter {
  fn write_string_value(&mut self, _key: &str, _value: Option<&str>) -> Result<(), SerializationError> {
    self.check()
  }

  fn write_bool_value(&mut self, _key: &str, _value: Option<bool>) -> Result<(), SerializationError> {
    self.check()
  }

  fn write_i64_value(&mut self, _key: &str, _value: Option<i64>) -> Result<(), SerializationError> {
    self.check()
  }

  fn write_f64_value(&mut self, _key: &str, _value: Option<f64>) -> Result<(), SerializationError> {
    self.check()
  }

  fn write_null_value(&mut self, _key: &str) -> Result<(), SerializationError> {
    self.check()
  }

  fn write_object_value(&mut self, key: &str, value: Option<&dyn Parsable>) -> Result<(), SerializationError> {
    self.calls.push(WriterCall::ObjectValue {
      key: key.to_string(),
      address: value.map(address_of),
    });
    self.check()
  }

  fn write_collection_of_object_values(
    &mut self,
    key: &str,
    values: &[Option<&dyn Parsable>],
  ) -> Result<(), SerializationError> {
    self.calls.push(WriterCall::CollectionOfObjectValues {
      key: key.to_string(),
      addresses: values.iter().map(|value| value.map(address_of)).collect(),
    });
    self.check()
  }

  fn get_serialized_content(&mut self) -> Result<SerializedContent, SerializationError> {
    Ok(Box::new(Cursor::new(self.output.clone())))
  }
}

/// Reads the payload as comma separated text; `null` is the null node, a leading `!` is a malformed payload.
#[derive(Debug, Clone)]
pub struct MockParseNodeFactory {
  content_type: &'static str,
}

impl MockParseNodeFactory {
  pub fn new(content_type: &'static str) -> Self {
    Self { content_type }
  }
}

impl ParseNodeFactory for MockParseNodeFactory {
  fn valid_content_type(&self) -> &str {
    self.content_type
  }

  fn get_root_parse_node(
    &self,
    _content_type: &ContentType,
    content: &mut dyn Read,
  ) -> Result<Box<dyn ParseNode>, SerializationError> {
    let mut text = String::new();
    content
      .read_to_string(&mut text)
      .map_err(|err| SerializationError::of_io(&err))?;
    if text.starts_with('!') {
      return Err(SerializationError::of_deserialization("malformed mock payload"));
    }
    Ok(Box::new(MockParseNode::new(&text)))
  }
}

struct MockParseNode {
  text: Option<String>,
}

impl MockParseNode {
  fn new(text: &str) -> Self {
    let text = text.trim();
    Self {
      text: (text != "null").then(|| text.to_string()),
    }
  }
}

impl ParseNode for MockParseNode {
  fn get_child_node(&self, _key: &str) -> Option<Box<dyn ParseNode>> {
    None
  }

  fn is_null(&self) -> bool {
    self.text.is_none()
  }

  fn get_string_value(&self) -> Result<Option<String>, SerializationError> {
    Ok(self.text.clone())
  }

  fn get_bool_value(&self) -> Result<Option<bool>, SerializationError> {
    Err(SerializationError::of_deserialization("not a boolean"))
  }

  fn get_i64_value(&self) -> Result<Option<i64>, SerializationError> {
    Err(SerializationError::of_deserialization("not an integer"))
  }

  fn get_f64_value(&self) -> Result<Option<f64>, SerializationError> {
    Err(SerializationError::of_deserialization("not a number"))
  }

  fn get_collection_of_nodes(&self) -> Result<Vec<Box<dyn ParseNode>>, SerializationError> {
    let text = self.text.as_deref().unwrap_or_default();
    Ok(
      text
        .split(',')
        .map(|item| Box::new(MockParseNode::new(item)) as Box<dyn ParseNode>)
        .collect(),
    )
  }
}
