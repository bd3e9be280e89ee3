use crate::config::Config;
use crate::parse_node_factory::ParseNodeFactory;
use crate::serialization_writer_factory::SerializationWriterFactory;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub enum ConfigOption {
  AddWriterFactory(Arc<dyn SerializationWriterFactory>),
  AddReaderFactory(Arc<dyn ParseNodeFactory>),
  SetStructuredSuffixFallback(bool),
}

impl ConfigOption {
  pub fn apply(&self, config: &mut Config) {
    match self {
      ConfigOption::AddWriterFactory(factory) => {
        config.add_writer_factory(factory.clone());
      }
      ConfigOption::AddReaderFactory(factory) => {
        config.add_reader_factory(factory.clone());
      }
      ConfigOption::SetStructuredSuffixFallback(enabled) => {
        config.set_structured_suffix_fallback(*enabled);
      }
    }
  }

  pub fn with_writer_factory(factory: Arc<dyn SerializationWriterFactory>) -> ConfigOption {
    ConfigOption::AddWriterFactory(factory)
  }

  pub fn with_reader_factory(factory: Arc<dyn ParseNodeFactory>) -> ConfigOption {
    ConfigOption::AddReaderFactory(factory)
  }

  pub fn with_structured_suffix_fallback(enabled: bool) -> ConfigOption {
    ConfigOption::SetStructuredSuffixFallback(enabled)
  }
}
