pub mod errors;

pub use errors::{ConfigError, TjchatError};

pub type Result<T> = std::result::Result<T, TjchatError>;
