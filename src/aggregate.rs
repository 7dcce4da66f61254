//! Spatial bookkeeping for the growing aggregate.
//!
//! Three views of the same point set are kept in lockstep:
//!
//! - A map from coordinate to generation index, for O(1) membership
//!   tests during the walk.
//! - A max-heap keyed by the attractor distance metric, exposing the
//!   current farthest member in O(1).
//! - An insertion-ordered buffer mirroring the map, for progressive
//!   consumption and generation-ordered serialization.

use std::collections::{BinaryHeap, HashMap};
use std::cmp::Ordering;

use crate::attractor;
use crate::config::AttractorKind;
use crate::types::{GenerationIndex, LatticePoint};

/// Heap entry ordered by distance; the key is computed once at insert
/// (or rebuild) time, so the heap is only valid for one metric.
#[derive(Clone, Copy, Debug)]
struct HeapEntry<P> {
    point: P,
    distance_sq: f64,
}

impl<P: LatticePoint> PartialEq for HeapEntry<P> {
    fn eq(&self, other: &Self) -> bool {
        self.distance_sq.total_cmp(&other.distance_sq) == Ordering::Equal
    }
}

impl<P: LatticePoint> Eq for HeapEntry<P> {}

impl<P: LatticePoint> PartialOrd for HeapEntry<P> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<P: LatticePoint> Ord for HeapEntry<P> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance_sq.total_cmp(&other.distance_sq)
    }
}

/// The set of stuck particles, with their order of formation and an
/// online farthest-point tracker.
///
/// Invariants:
/// - every coordinate appears at most once;
/// - generation indices are gap-free and monotonic from 0;
/// - the heap top is the true maximum of the current metric over all
///   members (restored by [`Aggregate::reconfigure_metric`] after a
///   metric change).
#[derive(Clone, Debug)]
pub struct Aggregate<P: LatticePoint> {
    map: HashMap<P, GenerationIndex>,
    heap: BinaryHeap<HeapEntry<P>>,
    ordered: Vec<P>,
    metric_kind: AttractorKind,
    metric_size: u32,
}

impl<P: LatticePoint> Aggregate<P> {
    /// Creates an empty aggregate ranked under the given metric.
    pub fn new(metric_kind: AttractorKind, metric_size: u32) -> Self {
        Self {
            map: HashMap::new(),
            heap: BinaryHeap::new(),
            ordered: Vec::new(),
            metric_kind,
            metric_size,
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Whether `p` has already stuck.
    pub fn contains(&self, p: &P) -> bool {
        self.map.contains_key(p)
    }

    /// Generation index of `p`, if it is a member.
    pub fn generation_index(&self, p: &P) -> Option<GenerationIndex> {
        self.map.get(p).copied()
    }

    /// Inserts a freshly stuck coordinate and returns its generation
    /// index.
    ///
    /// ### Panics
    /// Panics if `p` is already a member. The walker only ever inserts
    /// positions it just confirmed absent, so a duplicate is a
    /// programming-contract violation.
    pub fn insert(&mut self, p: P) -> GenerationIndex {
        let index = self.ordered.len();
        let previous = self.map.insert(p, index);
        assert!(previous.is_none(), "coordinate {p:?} stuck twice");
        self.heap.push(HeapEntry {
            point: p,
            distance_sq: attractor::distance_sq(p, self.metric_kind, self.metric_size),
        });
        self.ordered.push(p);
        index
    }

    /// The member farthest from the attractor under the current metric.
    ///
    /// ### Panics
    /// Panics on an empty aggregate; callers check [`Aggregate::is_empty`]
    /// first.
    pub fn farthest(&self) -> P {
        self.heap
            .peek()
            .expect("farthest() queried on an empty aggregate")
            .point
    }

    /// Metric value of the farthest member, or `None` when empty.
    pub fn farthest_distance_sq(&self) -> Option<f64> {
        self.heap.peek().map(|e| e.distance_sq)
    }

    /// Members in the order they stuck; index in this slice equals the
    /// generation index.
    pub fn ordered(&self) -> &[P] {
        &self.ordered
    }

    /// Iterates over `(coordinate, generation index)` pairs in
    /// arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (P, GenerationIndex)> + '_ {
        self.map.iter().map(|(p, idx)| (*p, *idx))
    }

    /// Re-ranks every member under a new metric.
    ///
    /// The heap cannot be re-keyed in place, so this is a full
    /// O(n log n) rebuild from the ordered buffer.
    pub fn reconfigure_metric(&mut self, kind: AttractorKind, size: u32) {
        self.metric_kind = kind;
        self.metric_size = size;
        self.heap = self
            .ordered
            .iter()
            .map(|&point| HeapEntry {
                point,
                distance_sq: attractor::distance_sq(point, kind, size),
            })
            .collect();
    }

    /// Removes every member; the metric configuration survives.
    pub fn clear(&mut self) {
        self.map.clear();
        self.heap.clear();
        self.ordered.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{UniformRandom, UniformSource};
    use glam::IVec2;

    fn random_distinct_points(n: usize, seed: u64) -> Vec<IVec2> {
        let mut rng = UniformSource::seeded(seed);
        let mut seen = std::collections::HashSet::new();
        let mut out = Vec::new();
        while out.len() < n {
            let x = (rng.next_unit() * 200.0) as i32 - 100;
            let y = (rng.next_unit() * 200.0) as i32 - 100;
            let p = IVec2::new(x, y);
            if seen.insert(p) {
                out.push(p);
            }
        }
        out
    }

    #[test]
    fn insert_assigns_contiguous_generation_indices() {
        let mut agg = Aggregate::new(AttractorKind::Point, 0);
        for (i, p) in random_distinct_points(50, 1).into_iter().enumerate() {
            assert_eq!(agg.insert(p), i);
        }
        assert_eq!(agg.len(), 50);
        for (i, p) in agg.ordered().iter().enumerate() {
            assert_eq!(agg.generation_index(p), Some(i));
        }
    }

    #[test]
    #[should_panic(expected = "stuck twice")]
    fn duplicate_insert_is_a_contract_violation() {
        let mut agg = Aggregate::new(AttractorKind::Point, 0);
        agg.insert(IVec2::new(1, 1));
        agg.insert(IVec2::new(1, 1));
    }

    #[test]
    fn farthest_matches_a_brute_force_scan_after_every_insert() {
        let mut agg = Aggregate::new(AttractorKind::Point, 0);
        for p in random_distinct_points(200, 2) {
            agg.insert(p);
            let best = agg
                .ordered()
                .iter()
                .map(|&q| attractor::distance_sq(q, AttractorKind::Point, 0))
                .fold(f64::MIN, f64::max);
            assert_eq!(agg.farthest_distance_sq(), Some(best));
        }
    }

    #[test]
    #[should_panic(expected = "empty aggregate")]
    fn farthest_on_empty_store_panics() {
        let agg: Aggregate<IVec2> = Aggregate::new(AttractorKind::Point, 0);
        let _ = agg.farthest();
    }

    #[test]
    fn reconfigure_metric_reorders_the_heap() {
        let mut agg = Aggregate::new(AttractorKind::Point, 0);
        // farthest from the origin is (5, 0); farthest from the x-axis is (0, 3)
        agg.insert(IVec2::new(5, 0));
        agg.insert(IVec2::new(0, 3));
        assert_eq!(agg.farthest(), IVec2::new(5, 0));

        agg.reconfigure_metric(AttractorKind::Line, 8);
        assert_eq!(agg.farthest(), IVec2::new(0, 3));
        assert_eq!(agg.farthest_distance_sq(), Some(9.0));
    }

    #[test]
    fn clear_empties_every_view() {
        let mut agg = Aggregate::new(AttractorKind::Point, 0);
        agg.insert(IVec2::new(2, 2));
        agg.clear();
        assert!(agg.is_empty());
        assert!(agg.ordered().is_empty());
        assert_eq!(agg.farthest_distance_sq(), None);
        // indices restart at zero after a clear
        assert_eq!(agg.insert(IVec2::new(2, 2)), 0);
    }
}
