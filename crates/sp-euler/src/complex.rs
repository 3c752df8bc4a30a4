//! Abstract simplicial complexes over sensor ids.
//!
//! # Layout
//!
//! Simplices are grouped by order: `orders[k]` holds every k-simplex in
//! insertion order, and a hash map resolves a sorted basis to its
//! `(order, slot)`.  The complex is closed under faces: a simplex can only be
//! added once all of its faces are present.

use std::collections::HashMap;

use sp_core::{SensorId, SpError, SpResult};

// ── Simplex ───────────────────────────────────────────────────────────────────

/// A simplex, identified by its sorted basis of vertices.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Simplex {
    basis: Vec<SensorId>,
}

impl Simplex {
    #[inline]
    pub fn basis(&self) -> &[SensorId] {
        &self.basis
    }

    /// Number of vertices minus one.
    #[inline]
    pub fn order(&self) -> usize {
        self.basis.len() - 1
    }

    #[inline]
    pub fn is_vertex(&self) -> bool {
        self.basis.len() == 1
    }

    /// Bases of the (order − 1)-faces, one per omitted vertex.  Vertices have
    /// none.
    pub fn faces(&self) -> impl Iterator<Item = Vec<SensorId>> + '_ {
        let n = if self.is_vertex() { 0 } else { self.basis.len() };
        (0..n).map(move |skip| {
            self.basis
                .iter()
                .enumerate()
                .filter(|&(i, _)| i != skip)
                .map(|(_, &v)| v)
                .collect()
        })
    }
}

/// Sort a basis and reject empty or repeated ones.
fn canonical(basis: &[SensorId]) -> SpResult<Vec<SensorId>> {
    let mut b = basis.to_vec();
    b.sort_unstable();
    b.dedup();
    if b.is_empty() || b.len() != basis.len() {
        return Err(SpError::InvalidValue(format!(
            "a simplex basis needs distinct vertices, got {basis:?}"
        )));
    }
    Ok(b)
}

// ── SimplicialComplex ─────────────────────────────────────────────────────────

/// A face-closed set of simplices.
#[derive(Clone, Debug, Default)]
pub struct SimplicialComplex {
    orders: Vec<Vec<Simplex>>,
    lookup: HashMap<Vec<SensorId>, (usize, usize)>,
}

impl SimplicialComplex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a 0-simplex.  Returns `false` if it was already present.
    pub fn add_vertex(&mut self, v: SensorId) -> bool {
        let basis = vec![v];
        if self.lookup.contains_key(&basis) {
            return false;
        }
        self.push(basis);
        true
    }

    /// Add the simplex on `basis`, given in any order.  Returns `false` if it
    /// was already present.
    ///
    /// # Errors
    /// - [`SpError::InvalidValue`] for an empty basis or repeated vertices.
    /// - [`SpError::SimplexNotFound`] naming a missing face.
    pub fn add_simplex(&mut self, basis: &[SensorId]) -> SpResult<bool> {
        let basis = canonical(basis)?;
        if self.lookup.contains_key(&basis) {
            return Ok(false);
        }
        if basis.len() > 1 {
            for skip in 0..basis.len() {
                let mut face = basis.clone();
                face.remove(skip);
                if !self.lookup.contains_key(&face) {
                    return Err(SpError::SimplexNotFound(face));
                }
            }
        }
        self.push(basis);
        Ok(true)
    }

    fn push(&mut self, basis: Vec<SensorId>) {
        let k = basis.len() - 1;
        if self.orders.len() <= k {
            self.orders.resize_with(k + 1, Vec::new);
        }
        self.lookup.insert(basis.clone(), (k, self.orders[k].len()));
        self.orders[k].push(Simplex { basis });
    }

    /// The simplex on `basis`, given in any order.
    pub fn simplex(&self, basis: &[SensorId]) -> Option<&Simplex> {
        let (k, i) = self.locate(basis)?;
        Some(&self.orders[k][i])
    }

    pub fn contains(&self, basis: &[SensorId]) -> bool {
        self.locate(basis).is_some()
    }

    /// `(order, slot)` of the simplex on `basis`.
    pub(crate) fn locate(&self, basis: &[SensorId]) -> Option<(usize, usize)> {
        let mut b = basis.to_vec();
        b.sort_unstable();
        self.lookup.get(&b).copied()
    }

    /// Highest order present, or `None` for the empty complex.
    pub fn max_order(&self) -> Option<usize> {
        self.orders.len().checked_sub(1)
    }

    /// Every k-simplex, in the order they were added.
    pub fn simplices_of_order(&self, k: usize) -> &[Simplex] {
        self.orders.get(k).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn number_of_simplices_of_order(&self, k: usize) -> usize {
        self.simplices_of_order(k).len()
    }

    /// The 0-simplices' sensor ids.
    pub fn vertices(&self) -> impl Iterator<Item = SensorId> + '_ {
        self.simplices_of_order(0).iter().map(|s| s.basis[0])
    }

    /// Total number of simplices of every order.
    pub fn len(&self) -> usize {
        self.lookup.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lookup.is_empty()
    }
}

// ── Combinations ──────────────────────────────────────────────────────────────

/// The `k`-element subsets of `0..n` as ascending index vectors, in
/// lexicographic order.
#[derive(Clone, Debug)]
pub struct Combinations {
    n:    usize,
    idx:  Vec<usize>,
    done: bool,
}

impl Combinations {
    pub fn new(n: usize, k: usize) -> Self {
        Self { n, idx: (0..k).collect(), done: k > n }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        if self.done {
            return None;
        }
        let out = self.idx.clone();
        let k = self.idx.len();
        match (0..k).rev().find(|&i| self.idx[i] < self.n - k + i) {
            None => self.done = true,
            Some(i) => {
                self.idx[i] += 1;
                for j in i + 1..k {
                    self.idx[j] = self.idx[j - 1] + 1;
                }
            }
        }
        Some(out)
    }
}
