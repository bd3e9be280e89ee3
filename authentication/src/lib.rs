pub mod allowed_hosts_validator;
pub mod error;

pub use allowed_hosts_validator::AllowedHostsValidator;
pub use error::AuthenticationError;
