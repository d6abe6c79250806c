//! The `DecisionModel` trait — the seam between the scheduler and the
//! behavioral physics.

use velo_agent::Pending;
use velo_core::AgentId;

use crate::{ModelResult, TickContext};

/// Pluggable "compute next state from neighbors" capability.
///
/// Implementations must be pure with respect to the tick: `decide` reads
/// only committed state through the [`TickContext`] and returns the agent's
/// speculative next state.  It must not depend on any other agent's pending
/// state — the scheduler guarantees none is visible — and must not branch on
/// iteration order, so results are identical whether agents are processed
/// sequentially, shuffled, or in parallel.
///
/// # Thread safety
///
/// The decide phase may run across agents on Rayon's thread pool, so
/// implementations must be `Send + Sync` and keep per-agent state in the
/// population, not in the model itself.
pub trait DecisionModel: Send + Sync + 'static {
    /// Compute `agent`'s pending state for the tick described by `ctx`.
    fn decide(&self, agent: AgentId, ctx: &TickContext<'_>) -> ModelResult<Pending>;
}
