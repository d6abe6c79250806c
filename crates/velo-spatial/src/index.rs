//! The corridor position index.
//!
//! # Data layout
//!
//! An R-tree (via `rstar`) over `(long, lat)` points answers the
//! radius-bounded part of a neighbor query; a `HashMap<AgentId, Point2>`
//! alongside it gives O(1) position lookup and the exact entry needed for
//! removal.  Both structures are kept in lockstep by `insert`/`update`/
//! `remove`.
//!
//! # Boundary topology
//!
//! The direction filter compares longitudinal coordinates under the
//! corridor's configured [`BoundaryPolicy`], fixed at construction.  Under
//! `Wrap` the radius search is repeated at the reference position shifted by
//! ±corridor length, so agents just across an end are found; under `Clamp` a
//! single search suffices and nothing is visible around the ends.

use std::cmp::Ordering;
use std::collections::HashMap;

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use velo_core::{AgentId, BoundaryPolicy, Corridor, Point2};

use crate::error::{SpatialError, SpatialResult};

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// Entry stored in the R-tree: a 2-D `[long, lat]` point with the owning
/// `AgentId`.
#[derive(Clone, PartialEq)]
struct BikeEntry {
    point: [f64; 2], // [long, lat]
    id: AgentId,
}

impl RTreeObject for BikeEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for BikeEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dl = self.point[0] - point[0];
        let dt = self.point[1] - point[1];
        dl * dl + dt * dt
    }
}

// ── Query types ───────────────────────────────────────────────────────────────

/// Which side of the reference agent a query looks at.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Strictly greater longitudinal coordinate: potential leaders.
    Ahead,
    /// Strictly smaller longitudinal coordinate: potential followers.
    Behind,
}

/// One query result: a neighbor, its committed position, and its
/// longitudinal separation from the reference (always positive).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Neighbor {
    pub id: AgentId,
    pub pos: Point2,
    /// `|longitudinal separation|` under the index's boundary policy.
    pub gap: f64,
}

// ── CorridorIndex ─────────────────────────────────────────────────────────────

/// Tracks every active agent's continuous position and answers directional,
/// radius-bounded neighbor queries.
pub struct CorridorIndex {
    tree: RTree<BikeEntry>,
    positions: HashMap<AgentId, Point2>,
    corridor: Corridor,
    boundary: BoundaryPolicy,
}

impl CorridorIndex {
    pub fn new(corridor: Corridor, boundary: BoundaryPolicy) -> Self {
        Self {
            tree: RTree::new(),
            positions: HashMap::new(),
            corridor,
            boundary,
        }
    }

    pub fn boundary(&self) -> BoundaryPolicy {
        self.boundary
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Committed position of `id`, if tracked.
    pub fn position(&self, id: AgentId) -> Option<Point2> {
        self.positions.get(&id).copied()
    }

    // ── Mutation (commit / evict / admit only) ────────────────────────────

    /// Start tracking a newly admitted agent.
    pub fn insert(&mut self, id: AgentId, pos: Point2) -> SpatialResult<()> {
        if self.positions.contains_key(&id) {
            return Err(SpatialError::DuplicateAgent(id));
        }
        self.tree.insert(BikeEntry { point: [pos.long, pos.lat], id });
        self.positions.insert(id, pos);
        Ok(())
    }

    /// Move a tracked agent to its newly committed position.
    pub fn update(&mut self, id: AgentId, pos: Point2) -> SpatialResult<()> {
        let old = self
            .positions
            .get_mut(&id)
            .ok_or(SpatialError::UnknownAgent(id))?;
        self.tree
            .remove(&BikeEntry { point: [old.long, old.lat], id })
            .ok_or(SpatialError::UnknownAgent(id))?;
        self.tree.insert(BikeEntry { point: [pos.long, pos.lat], id });
        *old = pos;
        Ok(())
    }

    /// Stop tracking an evicted agent.
    pub fn remove(&mut self, id: AgentId) -> SpatialResult<()> {
        let pos = self
            .positions
            .remove(&id)
            .ok_or(SpatialError::UnknownAgent(id))?;
        self.tree
            .remove(&BikeEntry { point: [pos.long, pos.lat], id })
            .ok_or(SpatialError::UnknownAgent(id))?;
        Ok(())
    }

    // ── Queries (decide phase) ────────────────────────────────────────────

    /// Other agents within Euclidean `radius` of `reference` whose
    /// longitudinal coordinate is strictly ahead of / behind the reference's
    /// under the boundary policy, sorted by longitudinal gap ascending
    /// (ties broken by id for determinism).
    ///
    /// Errors with [`SpatialError::UnknownAgent`] if `reference` is not
    /// tracked — querying on behalf of an evicted agent is a defect.
    pub fn neighbors(
        &self,
        reference: AgentId,
        radius:    f64,
        direction: Direction,
    ) -> SpatialResult<Vec<Neighbor>> {
        let ref_pos = self
            .positions
            .get(&reference)
            .copied()
            .ok_or(SpatialError::UnknownAgent(reference))?;

        // Under Wrap, an agent just past a corridor end is close the short
        // way around but far in raw coordinates; repeating the search at
        // shifted centers makes the R-tree see it.
        let centers: &[f64] = match self.boundary {
            BoundaryPolicy::Clamp => &[ref_pos.long],
            BoundaryPolicy::Wrap => &[
                ref_pos.long,
                ref_pos.long - self.corridor.length,
                ref_pos.long + self.corridor.length,
            ],
        };

        let mut found: Vec<Neighbor> = Vec::new();
        for &center in centers {
            for entry in self
                .tree
                .locate_within_distance([center, ref_pos.lat], radius * radius)
            {
                if entry.id == reference {
                    continue;
                }
                let sep =
                    self.corridor
                        .long_separation(ref_pos.long, entry.point[0], self.boundary);
                let keep = match direction {
                    Direction::Ahead  => sep > 0.0,
                    Direction::Behind => sep < 0.0,
                };
                if !keep || found.iter().any(|n| n.id == entry.id) {
                    continue;
                }
                found.push(Neighbor {
                    id: entry.id,
                    pos: Point2::new(entry.point[0], entry.point[1]),
                    gap: sep.abs(),
                });
            }
        }

        found.sort_by(|a, b| {
            a.gap
                .partial_cmp(&b.gap)
                .unwrap_or(Ordering::Equal)
                .then(a.id.cmp(&b.id))
        });
        Ok(found)
    }
}
