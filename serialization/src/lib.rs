pub mod config;
pub mod config_option;
pub mod content_type;
pub mod error;
#[cfg(feature = "serde-json")]
pub mod json;
pub mod parsable;
pub mod parse_node;
pub mod parse_node_factory;
pub mod registry;
pub mod serialization_helper;
pub mod serialization_writer;
pub mod serialization_writer_factory;

pub use config::Config;
pub use config_option::ConfigOption;
pub use content_type::{normalize, ContentType};
pub use error::SerializationError;
#[cfg(feature = "serde-json")]
pub use json::{
  register_json_defaults, JsonParseNode, JsonParseNodeFactory, JsonSerializationWriter, JsonSerializationWriterFactory,
};
pub use parsable::Parsable;
pub use parse_node::{ParseNode, ParseNodeExt};
pub use parse_node_factory::ParseNodeFactory;
pub use registry::SerializationRegistry;
pub use serialization_helper::{SerializationHelper, JSON_CONTENT_TYPE};
pub use serialization_writer::{SerializationWriter, SerializedContent};
pub use serialization_writer_factory::SerializationWriterFactory;

#[cfg(test)]
pub(crate) mod mocks;
