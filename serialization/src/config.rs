use crate::config_option::ConfigOption;
use crate::parse_node_factory::ParseNodeFactory;
use crate::serialization_writer_factory::SerializationWriterFactory;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Config {
  writer_factories: Vec<Arc<dyn SerializationWriterFactory>>,
  reader_factories: Vec<Arc<dyn ParseNodeFactory>>,
  structured_suffix_fallback: bool,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      writer_factories: Vec::new(),
      reader_factories: Vec::new(),
      structured_suffix_fallback: true,
    }
  }
}

impl Config {
  pub fn from(options: impl IntoIterator<Item = ConfigOption>) -> Config {
    let mut config = Config::default();
    for option in options {
      option.apply(&mut config);
    }
    config
  }

  pub fn get_writer_factories(&self) -> &[Arc<dyn SerializationWriterFactory>] {
    &self.writer_factories
  }

  pub fn add_writer_factory(&mut self, factory: Arc<dyn SerializationWriterFactory>) {
    self.writer_factories.push(factory);
  }

  pub fn get_reader_factories(&self) -> &[Arc<dyn ParseNodeFactory>] {
    &self.reader_factories
  }

  pub fn add_reader_factory(&mut self, factory: Arc<dyn ParseNodeFactory>) {
    self.reader_factories.push(factory);
  }

  pub fn is_structured_suffix_fallback(&self) -> bool {
    self.structured_suffix_fallback
  }

  pub fn set_structured_suffix_fallback(&mut self, enabled: bool) {
    self.structured_suffix_fallback = enabled;
  }
}
