//! Spatial-subsystem error type.

use thiserror::Error;

use velo_core::AgentId;

/// Errors produced by `velo-spatial`.
///
/// Both variants signal defects in the caller's bookkeeping: a query or
/// update against an evicted agent, or a second insert for a live one.  The
/// scheduler treats them as invariant failures and aborts the run.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("agent {0} not tracked by the spatial index")]
    UnknownAgent(AgentId),

    #[error("agent {0} already tracked by the spatial index")]
    DuplicateAgent(AgentId),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
