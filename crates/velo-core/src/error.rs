//! Framework error type.
//!
//! Two failure surfaces are kept distinct on purpose.  `Config` means the
//! caller handed us an invalid scenario and is raised fail-fast at
//! construction, never silently clamped.  `Invariant` means the decision
//! model or scheduler produced a state that should be impossible — a defect,
//! not an input problem — and aborts the run.  Sub-crates define their own
//! error enums and wrap or convert `VeloError` as needed.

use thiserror::Error;

use crate::AgentId;

/// The top-level error type for `velo-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum VeloError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invariant violated: {0}")]
    Invariant(String),

    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("agent {0} already exists")]
    DuplicateAgent(AgentId),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `velo-*` crates.
pub type VeloResult<T> = Result<T, VeloError>;
