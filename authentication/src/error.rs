use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthenticationError {
  #[error("Invalid argument: {0}")]
  InvalidArgument(String),
}

impl AuthenticationError {
  pub fn of_invalid_argument(message: impl Into<String>) -> Self {
    AuthenticationError::InvalidArgument(message.into())
  }
}
