//! The agent identifier.
//!
//! `AgentId` is `Copy + Ord + Hash` so it works as a map key and sorted
//! collection element without ceremony.  IDs are assigned by
//! `Population::alloc_id` in creation order and never reused, so sorting
//! by ID is sorting by entry order.

use std::fmt;

/// Identifier of one bicycle agent, assigned in entry order.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentId(pub u32);

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AgentId({})", self.0)
    }
}
