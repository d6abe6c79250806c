use thiserror::Error;

use velo_core::VeloError;
use velo_inflow::InflowError;
use velo_model::ModelError;
use velo_spatial::SpatialError;

/// Scheduler errors.
///
/// `Config` is the fail-fast construction surface; everything else signals
/// an internal-invariant failure that aborts the run.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("invariant violated: {0}")]
    Invariant(String),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("spatial invariant violated: {0}")]
    Spatial(#[from] SpatialError),
}

impl From<VeloError> for SimError {
    fn from(e: VeloError) -> Self {
        match e {
            VeloError::Config(m) => SimError::Config(m),
            other => SimError::Invariant(other.to_string()),
        }
    }
}

impl From<InflowError> for SimError {
    fn from(e: InflowError) -> Self {
        SimError::Config(e.to_string())
    }
}

pub type SimResult<T> = Result<T, SimError>;
