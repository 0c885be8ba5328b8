//! Error type for `roster-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("decimal parse error: {0}")]
  Decimal(#[from] bigdecimal::ParseBigDecimalError),

  /// The UNIQUE constraint on `employees.email` rejected a write.
  #[error("email {0:?} is already in use")]
  DuplicateEmail(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl From<Error> for roster_core::Error {
  fn from(e: Error) -> Self {
    match e {
      Error::DuplicateEmail(email) => roster_core::Error::Conflict { email },
      other => roster_core::Error::Store(Box::new(other)),
    }
  }
}
