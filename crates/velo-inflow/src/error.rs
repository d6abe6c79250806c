use thiserror::Error;

#[derive(Debug, Error)]
pub enum InflowError {
    #[error("demand profile: {0}")]
    Profile(String),
}

pub type InflowResult<T> = Result<T, InflowError>;
