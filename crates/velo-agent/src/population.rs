//! The active population: every agent between admission and eviction.
//!
//! # Why a `BTreeMap`
//!
//! Membership order must equal id order, which equals entry order, and both
//! the decide snapshot and the commit phase iterate in exactly that order
//! for determinism.  A `BTreeMap<AgentId, Bicycle>` gives ordered iteration
//! and O(log n) removal when agents leave the corridor; the population of a
//! single bike path stays small enough that the tree constant is noise.

use std::collections::BTreeMap;

use velo_core::{AgentId, VeloError, VeloResult};

use crate::bicycle::Bicycle;

/// Id-ordered set of active agents plus the monotonic id allocator.
#[derive(Default)]
pub struct Population {
    active: BTreeMap<AgentId, Bicycle>,
    /// Next id to hand out.  Never decremented — ids are never reused, even
    /// after eviction.
    next_id: u32,
}

impl Population {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next agent id, in strict creation order.
    pub fn alloc_id(&mut self) -> AgentId {
        let id = AgentId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add a newly created agent.
    ///
    /// Errors with [`VeloError::DuplicateAgent`] if the id is already
    /// active — a defect in the admission logic, not a recoverable state.
    pub fn admit(&mut self, bike: Bicycle) -> VeloResult<()> {
        let id = bike.id;
        if self.active.insert(id, bike).is_some() {
            return Err(VeloError::DuplicateAgent(id));
        }
        Ok(())
    }

    /// Remove an evicted agent, returning it.
    ///
    /// Errors with [`VeloError::AgentNotFound`] if the id is not active —
    /// an agent must be evicted exactly once.
    pub fn remove(&mut self, id: AgentId) -> VeloResult<Bicycle> {
        self.active.remove(&id).ok_or(VeloError::AgentNotFound(id))
    }

    pub fn get(&self, id: AgentId) -> Option<&Bicycle> {
        self.active.get(&id)
    }

    pub fn get_mut(&mut self, id: AgentId) -> Option<&mut Bicycle> {
        self.active.get_mut(&id)
    }

    pub fn contains(&self, id: AgentId) -> bool {
        self.active.contains_key(&id)
    }

    /// Iterate active agents in ascending id order (= entry order).
    pub fn iter(&self) -> impl Iterator<Item = &Bicycle> + '_ {
        self.active.values()
    }

    /// Active ids in ascending order.  This is the decide-phase snapshot.
    pub fn ids(&self) -> Vec<AgentId> {
        self.active.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// How many ids have ever been allocated (= total agents admitted when
    /// ids are only allocated at admission).
    pub fn allocated(&self) -> u32 {
        self.next_id
    }
}
