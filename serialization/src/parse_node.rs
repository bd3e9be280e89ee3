use crate::error::SerializationError;

/// Read cursor over a parsed payload, handed to model factories.
pub trait ParseNode {
  fn get_child_node(&self, key: &str) -> Option<Box<dyn ParseNode>>;

  fn is_null(&self) -> bool;

  fn get_string_value(&self) -> Result<Option<String>, SerializationError>;

  fn get_bool_value(&self) -> Result<Option<bool>, SerializationError>;

  fn get_i64_value(&self) -> Result<Option<i64>, SerializationError>;

  fn get_f64_value(&self) -> Result<Option<f64>, SerializationError>;

  fn get_collection_of_nodes(&self) -> Result<Vec<Box<dyn ParseNode>>, SerializationError>;
}

pub trait ParseNodeExt {
  /// Builds a model from this node with `factory`. A null node yields `None`.
  fn get_object_value<T, F>(&self, factory: &F) -> Result<Option<T>, SerializationError>
  where
    F: Fn(&dyn ParseNode) -> Result<T, SerializationError>;

  fn get_collection_of_object_values<T, F>(&self, factory: &F) -> Result<Vec<Option<T>>, SerializationError>
  where
    F: Fn(&dyn ParseNode) -> Result<T, SerializationError>;
}

impl ParseNodeExt for dyn ParseNode + '_ {
  fn get_object_value<T, F>(&self, factory: &F) -> Result<Option<T>, SerializationError>
  where
    F: Fn(&dyn ParseNode) -> Result<T, SerializationError>, {
    if self.is_null() {
      return Ok(None);
    }
    factory(self).map(Some)
  }

  fn get_collection_of_object_values<T, F>(&self, factory: &F) -> Result<Vec<Option<T>>, SerializationError>
  where
    F: Fn(&dyn ParseNode) -> Result<T, SerializationError>, {
    if self.is_null() {
      return Err(SerializationError::of_deserialization(
        "expected a collection but the payload is null",
      ));
    }
    self
      .get_collection_of_nodes()?
      .iter()
      .map(|node| node.as_ref().get_object_value(factory))
      .collect()
  }
}
