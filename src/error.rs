use thiserror::Error;


/// Errors surfaced when building networks, computing losses
/// or persisting parameter snapshots.
///
/// Arithmetic on [Value](crate::Value)s never fails. Overflow and NaN
/// simply propagate through data and gradients.

#[derive(Error, Debug)]
pub enum Error {
  #[error("invalid config: {0}")]
  InvalidConfig(String),

  #[error("shape mismatch: expected {expected} values, got {actual}")]
  ShapeMismatch { expected: usize, actual: usize },

  #[error("operation requires at least one value")]
  EmptyInput,

  #[error(transparent)]
  Io(#[from] std::io::Error),

  #[error("snapshot encoding failed: {0}")]
  Encoding(#[from] postcard::Error),
}

impl Error {
  pub fn invalid_config(message: impl Into<String>) -> Self {
    Error::InvalidConfig(message.into())
  }
}

pub type Result<T> = std::result::Result<T, Error>;
