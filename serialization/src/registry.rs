use crate::config::Config;
use crate::content_type::ContentType;
use crate::error::SerializationError;
use crate::parse_node::ParseNode;
use crate::parse_node_factory::ParseNodeFactory;
use crate::serialization_writer::SerializationWriter;
use crate::serialization_writer_factory::SerializationWriterFactory;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::{BTreeSet, HashMap};
use std::io::Read;
use std::sync::Arc;


static DEFAULT_REGISTRY: Lazy<SerializationRegistry> = Lazy::new(SerializationRegistry::new);

#[derive(Debug)]
struct RegistryInner {
  writer_factories: RwLock<HashMap<ContentType, Arc<dyn SerializationWriterFactory>>>,
  reader_factories: RwLock<HashMap<ContentType, Arc<dyn ParseNodeFactory>>>,
  structured_suffix_fallback: bool,
}

/// Content type to factory tables for writers and readers.
///
/// Cloning is cheap and yields a handle onto the same tables. Each table sits
/// behind one lock: a registration inserts all of a factory's content types under
/// a single write guard, and every lookup or listing reads under a single read guard.
#[derive(Debug, Clone)]
pub struct SerializationRegistry {
  inner: Arc<RegistryInner>,
}

static_assertions::assert_impl_all!(SerializationRegistry: Send, Sync);

impl Default for SerializationRegistry {
  fn default() -> Self {
    Self::new()
  }
}

impl SerializationRegistry {
  /// Creates an empty, isolated registry.
  pub fn new() -> Self {
    Self::with_structured_suffix_fallback(true)
  }

  pub fn with_structured_suffix_fallback(enabled: bool) -> Self {
    Self {
      inner: Arc::new(RegistryInner {
        writer_factories: RwLock::new(HashMap::new()),
        reader_factories: RwLock::new(HashMap::new()),
        structured_suffix_fallback: enabled,
      }),
    }
  }

  /// Process-wide registry shared by every caller that does not bring its own.
  pub fn shared() -> Self {
    DEFAULT_REGISTRY.clone()
  }

  pub fn from_config(config: &Config) -> Result<Self, SerializationError> {
    let registry = Self::with_structured_suffix_fallback(config.is_structured_suffix_fallback());
    for factory in config.get_writer_factories() {
      registry.register_writer_factory(factory.clone())?;
    }
    for factory in config.get_reader_factories() {
      registry.register_reader_factory(factory.clone())?;
    }
    Ok(registry)
  }

  /// Registers `factory` under every content type it declares, replacing earlier entries.
  ///
  /// All declared content types are validated before the table is touched, and
  /// readers see either none or all of them.
  pub fn register_writer_factory(&self, factory: Arc<dyn SerializationWriterFactory>) -> Result<(), SerializationError> {
    let content_types = parse_all(factory.supported_content_types())?;
    tracing::debug!(
      "Registering serialization writer factory: content_types = {:?}, factory = {:?}",
      content_types,
      factory
    );
    let mut table = self.inner.writer_factories.write();
    for content_type in content_types {
      table.insert(content_type, factory.clone());
    }
    Ok(())
  }

  pub fn register_reader_factory(&self, factory: Arc<dyn ParseNodeFactory>) -> Result<(), SerializationError> {
    let content_types = parse_all(factory.supported_content_types())?;
    tracing::debug!(
      "Registering parse node factory: content_types = {:?}, factory = {:?}",
      content_types,
      factory
    );
    let mut table = self.inner.reader_factories.write();
    for content_type in content_types {
      table.insert(content_type, factory.clone());
    }
    Ok(())
  }

  pub fn unregister_writer_factory(&self, content_type: &str) -> Result<(), SerializationError> {
    let content_type = ContentType::parse(content_type)?;
    if self.inner.writer_factories.write().remove(&content_type).is_some() {
      tracing::debug!("Unregistered serialization writer factory: content_type = {}", content_type);
    }
    Ok(())
  }

  pub fn unregister_reader_factory(&self, content_type: &str) -> Result<(), SerializationError> {
    let content_type = ContentType::parse(content_type)?;
    if self.inner.reader_factories.write().remove(&content_type).is_some() {
      tracing::debug!("Unregistered parse node factory: content_type = {}", content_type);
    }
    Ok(())
  }

  /// Removes `content_type` from both tables.
  pub fn unregister(&self, content_type: &str) -> Result<(), SerializationError> {
    self.unregister_writer_factory(content_type)?;
    self.unregister_reader_factory(content_type)
  }

  pub fn get_writer_factory(&self, content_type: &str) -> Result<Arc<dyn SerializationWriterFactory>, SerializationError> {
    let content_type = ContentType::parse(content_type)?;
    self.find_writer_factory(&content_type)
  }

  pub fn get_reader_factory(&self, content_type: &str) -> Result<Arc<dyn ParseNodeFactory>, SerializationError> {
    let content_type = ContentType::parse(content_type)?;
    self.find_reader_factory(&content_type)
  }

  pub fn find_writer_factory(
    &self,
    content_type: &ContentType,
  ) -> Result<Arc<dyn SerializationWriterFactory>, SerializationError> {
    let table = self.inner.writer_factories.read();
    find_factory(&*table, content_type, self.inner.structured_suffix_fallback)
      .ok_or_else(|| SerializationError::of_unsupported_media_type(content_type.as_str(), sorted_names(&*table)))
  }

  pub fn find_reader_factory(&self, content_type: &ContentType) -> Result<Arc<dyn ParseNodeFactory>, SerializationError> {
    let table = self.inner.reader_factories.read();
    find_factory(&*table, content_type, self.inner.structured_suffix_fallback)
      .ok_or_else(|| SerializationError::of_unsupported_media_type(content_type.as_str(), sorted_names(&*table)))
  }

  /// Normalizes `content_type`, resolves its factory and creates a fresh writer.
  pub fn get_serialization_writer(&self, content_type: &str) -> Result<Box<dyn SerializationWriter>, SerializationError> {
    let content_type = ContentType::parse(content_type)?;
    self.find_writer_factory(&content_type)?.get_serialization_writer(&content_type)
  }

  pub fn get_root_parse_node(
    &self,
    content_type: &str,
    content: &mut dyn Read,
  ) -> Result<Box<dyn ParseNode>, SerializationError> {
    let content_type = ContentType::parse(content_type)?;
    self.find_reader_factory(&content_type)?.get_root_parse_node(&content_type, content)
  }

  /// Content types with a registered writer factory.
  pub fn valid_content_types(&self) -> BTreeSet<ContentType> {
    self.inner.writer_factories.read().keys().cloned().collect()
  }

  pub fn valid_reader_content_types(&self) -> BTreeSet<ContentType> {
    self.inner.reader_factories.read().keys().cloned().collect()
  }

  pub fn is_structured_suffix_fallback(&self) -> bool {
    self.inner.structured_suffix_fallback
  }
}

fn parse_all(raw: Vec<&str>) -> Result<Vec<ContentType>, SerializationError> {
  if raw.is_empty() {
    return Err(SerializationError::of_invalid_argument(
      "factory must declare at least one content type",
    ));
  }
  raw.into_iter().map(ContentType::parse).collect()
}

fn sorted_names<F: ?Sized>(table: &HashMap<ContentType, Arc<F>>) -> Vec<String> {
  let mut names = table.keys().map(|content_type| content_type.as_str().to_string()).collect::<Vec<_>>();
  names.sort();
  names
}

fn find_factory<F: ?Sized>(
  table: &HashMap<ContentType, Arc<F>>,
  content_type: &ContentType,
  structured_suffix_fallback: bool,
) -> Option<Arc<F>> {
  if let Some(factory) = table.get(content_type) {
    tracing::trace!("find_factory: hit, content_type = {}", content_type);
    return Some(factory.clone());
  }
  if !structured_suffix_fallback {
    tracing::debug!("find_factory: miss, content_type = {}", content_type);
    return None;
  }
  let fallback = content_type.without_vendor_prefix()?;
  let found = table.get(&fallback).cloned();
  tracing::debug!(
    "find_factory: structured suffix fallback, content_type = {}, fallback = {}, found = {}",
    content_type,
    fallback,
    found.is_some()
  );
  found
}
