//! Mutable id → bounding box index.
//!
//! # Layout
//!
//! Boxes live in two places: an `rstar` R-tree for range queries and a hash
//! map from key to current box.  The map is what makes `upsert` and `remove`
//! work by key; the R-tree removes by value, so the old entry must be known.
//!
//! 2-D boxes are stored in the tree with `z = 0`, so one 3-D tree serves
//! both dimensions.
//!
//! # Query semantics
//!
//! The R-tree compares closed envelopes, so [`SpatialIndex::query`] is
//! pessimistic: boxes that merely touch are reported.  Callers that need the
//! open-box convention filter the results with [`BoundingBox::intersects`] or
//! an exact detection predicate.

use std::fmt;
use std::hash::Hash;

use rstar::{AABB, Envelope, RTree, RTreeObject, SelectionFunction};
use tracing::trace;

use sp_core::{AgentId, BoundingBox, SensorId, SpError, SpResult};

#[cfg(feature = "fx-hash")]
type KeyMap<K, V> = rustc_hash::FxHashMap<K, V>;
#[cfg(not(feature = "fx-hash"))]
type KeyMap<K, V> = std::collections::HashMap<K, V>;

// ── EntityKey ─────────────────────────────────────────────────────────────────

/// What an index entry stands for.
///
/// Agents are indexed by their position (or motion sweep); sensors by the
/// region their field of view covers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EntityKey {
    Agent(AgentId),
    Field(SensorId),
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKey::Agent(id) => write!(f, "{id}"),
            EntityKey::Field(id) => write!(f, "field of {id}"),
        }
    }
}

// ── R-tree entry ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
struct IndexEntry<K> {
    lo:  [f64; 3],
    hi:  [f64; 3],
    key: K,
}

impl<K> IndexEntry<K> {
    fn new(key: K, bb: &BoundingBox) -> Self {
        Self { lo: bb.bottom_left().padded(), hi: bb.top_right().padded(), key }
    }
}

impl<K> RTreeObject for IndexEntry<K> {
    type Envelope = AABB<[f64; 3]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.lo, self.hi)
    }
}

/// Selects every entry whose envelope intersects `area` (closed).
struct Intersecting(AABB<[f64; 3]>);

impl<K> SelectionFunction<IndexEntry<K>> for Intersecting {
    fn should_unpack_parent(&self, envelope: &AABB<[f64; 3]>) -> bool {
        self.0.intersects(envelope)
    }

    fn should_unpack_leaf(&self, leaf: &IndexEntry<K>) -> bool {
        self.0.intersects(&leaf.envelope())
    }
}

// ── SpatialIndex ──────────────────────────────────────────────────────────────

/// A dynamic R-tree of bounding boxes keyed by `K`.
///
/// Every box must have the index's dimension.  There is no implicit cleanup:
/// an entity leaving the playground must be [`remove`](Self::remove)d.
pub struct SpatialIndex<K = EntityKey> {
    dimension: usize,
    tree:      RTree<IndexEntry<K>>,
    boxes:     KeyMap<K, BoundingBox>,
}

impl<K> SpatialIndex<K>
where
    K: Copy + Eq + Hash + Ord + fmt::Debug,
{
    /// An empty index for boxes of the given dimension.
    pub fn new(dimension: usize) -> Self {
        Self { dimension, tree: RTree::new(), boxes: KeyMap::default() }
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Insert `key` or replace its box.
    ///
    /// # Errors
    /// [`SpError::DimensionMismatch`] if `bb` has the wrong dimension.
    pub fn upsert(&mut self, key: K, bb: BoundingBox) -> SpResult<()> {
        self.check_dimension(&bb)?;
        if let Some(old) = self.boxes.insert(key, bb) {
            self.tree.remove(&IndexEntry::new(key, &old));
        }
        self.tree.insert(IndexEntry::new(key, &bb));
        trace!(?key, %bb, "index upsert");
        Ok(())
    }

    /// Remove `key`, returning its last box.
    pub fn remove(&mut self, key: &K) -> Option<BoundingBox> {
        let old = self.boxes.remove(key)?;
        self.tree.remove(&IndexEntry::new(*key, &old));
        trace!(?key, "index remove");
        Some(old)
    }

    /// Current box of `key`.
    #[inline]
    pub fn get(&self, key: &K) -> Option<&BoundingBox> {
        self.boxes.get(key)
    }

    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.boxes.contains_key(key)
    }

    /// Keys whose box touches or overlaps `bb`, sorted.
    ///
    /// # Errors
    /// [`SpError::DimensionMismatch`] if `bb` has the wrong dimension.
    pub fn query(&self, bb: &BoundingBox) -> SpResult<Vec<K>> {
        self.check_dimension(bb)?;
        let area = AABB::from_corners(bb.bottom_left().padded(), bb.top_right().padded());
        let mut keys: Vec<K> = self
            .tree
            .locate_with_selection_function(Intersecting(area))
            .map(|e| e.key)
            .collect();
        keys.sort_unstable();
        Ok(keys)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    fn check_dimension(&self, bb: &BoundingBox) -> SpResult<()> {
        if bb.dimension() == self.dimension {
            Ok(())
        } else {
            Err(SpError::DimensionMismatch {
                context:  "spatial index",
                expected: self.dimension,
                got:      bb.dimension(),
            })
        }
    }
}

impl<K> fmt::Debug for SpatialIndex<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpatialIndex")
            .field("dimension", &self.dimension)
            .field("entries", &self.tree.size())
            .finish()
    }
}
