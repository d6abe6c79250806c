use thiserror::Error;

use velo_core::AgentId;
use velo_spatial::SpatialError;

#[derive(Debug, Error)]
pub enum ModelError {
    /// The population and spatial index disagree — an invariant failure in
    /// the scheduler's bookkeeping, not a recoverable condition.
    #[error("agent {0} absent from the population")]
    MissingAgent(AgentId),

    #[error(transparent)]
    Spatial(#[from] SpatialError),
}

pub type ModelResult<T> = Result<T, ModelError>;
