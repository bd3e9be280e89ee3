use crate::content_type::ContentType;
use crate::error::SerializationError;
use crate::parse_node::ParseNode;
use std::fmt::Debug;
use std::io::Read;

/// Format plugin entry point for reading.
pub trait ParseNodeFactory: Debug + Send + Sync {
  fn valid_content_type(&self) -> &str;

  fn supported_content_types(&self) -> Vec<&str> {
    vec![self.valid_content_type()]
  }

  /// Consumes `content` and returns the node for the document root.
  fn get_root_parse_node(
    &self,
    content_type: &ContentType,
    content: &mut dyn Read,
  ) -> Result<Box<dyn ParseNode>, SerializationError>;
}
