//! Recursive van Emde Boas integer set.
//!
//! A node over universe `U > 2` splits keys into `r = ceil(sqrt(U))` clusters
//! of size `r`, plus a summary of size `r` recording which clusters are
//! non-empty. Universes of size 1 or 2 store their members directly in the
//! node's min/max.
//!
//! The node's minimum is never stored inside a cluster. That keeps `min()` at
//! O(1) and lets an insert into an empty cluster finish without recursing,
//! so every insert makes at most one non-trivial recursive call.

use crate::error::IndexError;

// =============================================================================
// Universe sizing
// =============================================================================

/// Size of each cluster (and of the summary) for a node over `universe` keys.
///
/// This is `ceil(sqrt(universe))`, computed exactly in integers.
pub fn cluster_size(universe: usize) -> usize {
    if universe <= 1 {
        return universe;
    }
    // Float estimate, then correct to the exact floor.
    let mut r = (universe as f64).sqrt() as usize;
    while r.saturating_mul(r) > universe {
        r -= 1;
    }
    while (r + 1).saturating_mul(r + 1) <= universe {
        r += 1;
    }
    if r * r == universe {
        r
    } else {
        r + 1
    }
}

// =============================================================================
// Nodes
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Span {
    min: usize,
    max: usize,
}

/// Recursive part of a node over a universe larger than 2.
#[derive(Clone)]
struct Branch {
    /// Cluster size and cluster count (`ceil(sqrt(U))`).
    root: usize,
    summary: Box<Node>,
    clusters: Vec<Node>,
}

impl Branch {
    #[inline]
    fn high(&self, key: usize) -> usize {
        key / self.root
    }

    #[inline]
    fn low(&self, key: usize) -> usize {
        key % self.root
    }

    #[inline]
    fn index(&self, high: usize, low: usize) -> usize {
        high * self.root + low
    }
}

#[derive(Clone)]
struct Node {
    universe: usize,
    /// `None` iff the node holds no keys.
    span: Option<Span>,
    /// `None` iff `universe <= 2`.
    branch: Option<Branch>,
}

impl Node {
    fn new(universe: usize) -> Self {
        let branch = (universe > 2).then(|| {
            let root = cluster_size(universe);
            Branch {
                root,
                summary: Box::new(Node::new(root)),
                clusters: (0..root).map(|_| Node::new(root)).collect(),
            }
        });
        Self {
            universe,
            span: None,
            branch,
        }
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.span.is_none()
    }

    /// Record the first key of an empty node without recursing.
    #[inline]
    fn seed(&mut self, key: usize) {
        debug_assert!(self.is_empty());
        self.span = Some(Span { min: key, max: key });
    }

    fn insert(&mut self, mut key: usize) {
        debug_assert!(key < self.universe);

        let Some(mut span) = self.span else {
            self.seed(key);
            return;
        };
        if key == span.min || key == span.max {
            return;
        }
        if key < span.min {
            // The new key becomes the minimum; the old one moves down.
            std::mem::swap(&mut key, &mut span.min);
        }

        if let Some(branch) = self.branch.as_mut() {
            let high = branch.high(key);
            let low = branch.low(key);
            let cluster = &mut branch.clusters[high];
            if cluster.is_empty() {
                branch.summary.insert(high);
                cluster.seed(low);
            } else {
                cluster.insert(low);
            }
        }

        if key > span.max {
            span.max = key;
        }
        self.span = Some(span);
    }

    fn contains(&self, key: usize) -> bool {
        let Some(span) = self.span else {
            return false;
        };
        if key == span.min || key == span.max {
            return true;
        }
        if key < span.min || key > span.max {
            return false;
        }
        let Some(branch) = &self.branch else {
            return false;
        };
        match branch.clusters.get(branch.high(key)) {
            Some(cluster) if !cluster.is_empty() => cluster.contains(branch.low(key)),
            _ => false,
        }
    }

    fn enumerate_into(&self, out: &mut Vec<usize>) {
        let Some(span) = self.span else {
            return;
        };
        out.push(span.min);

        let Some(branch) = &self.branch else {
            if span.max != span.min {
                out.push(span.max);
            }
            return;
        };

        // The maximum lives in the last non-empty cluster, so it is not
        // re-emitted here.
        let mut offsets = Vec::new();
        for (high, cluster) in branch.clusters.iter().enumerate() {
            if cluster.is_empty() {
                continue;
            }
            offsets.clear();
            cluster.enumerate_into(&mut offsets);
            out.extend(offsets.iter().map(|&low| branch.index(high, low)));
        }
    }

    fn heap_bytes(&self) -> usize {
        match &self.branch {
            None => 0,
            Some(branch) => {
                std::mem::size_of::<Node>()
                    + branch.summary.heap_bytes()
                    + branch.clusters.capacity() * std::mem::size_of::<Node>()
                    + branch.clusters.iter().map(Node::heap_bytes).sum::<usize>()
            }
        }
    }
}

// =============================================================================
// VebTree
// =============================================================================

/// A set of integer keys drawn from the fixed universe `[0, universe_size)`.
///
/// The whole recursive structure is allocated up front by [`VebTree::new`];
/// inserts and lookups never allocate.
#[derive(Clone)]
pub struct VebTree {
    root: Node,
    count: usize,
}

impl VebTree {
    /// Build an empty index over `[0, universe_size)`.
    pub fn new(universe_size: usize) -> Result<Self, IndexError> {
        if universe_size == 0 {
            return Err(IndexError::EmptyUniverse);
        }
        Ok(Self {
            root: Node::new(universe_size),
            count: 0,
        })
    }

    #[inline]
    pub fn universe_size(&self) -> usize {
        self.root.universe
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    #[inline]
    pub fn min(&self) -> Option<usize> {
        self.root.span.map(|s| s.min)
    }

    #[inline]
    pub fn max(&self) -> Option<usize> {
        self.root.span.map(|s| s.max)
    }

    /// Number of top-level clusters; zero for universes of size 1 or 2.
    pub fn cluster_count(&self) -> usize {
        self.root.branch.as_ref().map_or(0, |b| b.clusters.len())
    }

    /// Top-level cluster that `key` falls into.
    pub fn high(&self, key: usize) -> usize {
        self.root.branch.as_ref().map_or(0, |b| b.high(key))
    }

    /// Offset of `key` within its top-level cluster.
    pub fn low(&self, key: usize) -> usize {
        self.root.branch.as_ref().map_or(key, |b| b.low(key))
    }

    /// Reassemble a key from its top-level cluster and offset.
    pub fn index(&self, high: usize, low: usize) -> usize {
        self.root.branch.as_ref().map_or(low, |b| b.index(high, low))
    }

    /// Add `key` to the set.
    ///
    /// Returns `Ok(true)` if the key was not present before. Re-inserting a
    /// present key leaves the set unchanged and returns `Ok(false)`.
    pub fn insert(&mut self, key: usize) -> Result<bool, IndexError> {
        self.check(key)?;
        if self.root.contains(key) {
            return Ok(false);
        }
        self.root.insert(key);
        self.count += 1;
        Ok(true)
    }

    /// Whether `key` is in the set. Keys outside the universe never are.
    pub fn contains(&self, key: usize) -> bool {
        key < self.universe_size() && self.root.contains(key)
    }

    /// All keys in ascending order.
    pub fn enumerate(&self) -> Vec<usize> {
        let mut out = Vec::with_capacity(self.count);
        self.root.enumerate_into(&mut out);
        out
    }

    pub fn iter(&self) -> Iter {
        Iter {
            keys: self.enumerate().into_iter(),
        }
    }

    /// Approximate heap bytes owned by the index.
    pub fn memory_usage(&self) -> usize {
        self.root.heap_bytes()
    }

    fn check(&self, key: usize) -> Result<(), IndexError> {
        if key >= self.universe_size() {
            return Err(IndexError::KeyOutOfUniverse {
                key,
                universe_size: self.universe_size(),
            });
        }
        Ok(())
    }
}

impl std::fmt::Debug for VebTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<'a> IntoIterator for &'a VebTree {
    type Item = usize;
    type IntoIter = Iter;

    fn into_iter(self) -> Iter {
        self.iter()
    }
}

/// Ascending iterator over a snapshot of the keys.
pub struct Iter {
    keys: std::vec::IntoIter<usize>,
}

impl Iterator for Iter {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        self.keys.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.keys.size_hint()
    }
}

impl DoubleEndedIterator for Iter {
    #[inline]
    fn next_back(&mut self) -> Option<usize> {
        self.keys.next_back()
    }
}

impl ExactSizeIterator for Iter {}

// =============================================================================
// Structural checks (tests only)
// =============================================================================

/// Walk every node and assert the min/max and summary invariants.
///
/// Returns the number of keys stored below `tree`'s root, counted from the
/// structure itself rather than from `len()`.
#[cfg(test)]
pub(crate) fn validate(tree: &VebTree) -> usize {
    fn walk(node: &Node) -> usize {
        let Some(span) = node.span else {
            if let Some(branch) = &node.branch {
                assert!(branch.summary.is_empty(), "empty node with non-empty summary");
                assert!(
                    branch.clusters.iter().all(Node::is_empty),
                    "empty node with non-empty cluster"
                );
            }
            return 0;
        };
        assert!(span.min <= span.max, "min {} > max {}", span.min, span.max);
        assert!(span.max < node.universe, "max {} outside universe {}", span.max, node.universe);

        let Some(branch) = &node.branch else {
            return if span.min == span.max { 1 } else { 2 };
        };
        assert_eq!(branch.root, cluster_size(node.universe));
        assert_eq!(branch.clusters.len(), branch.root);
        assert_eq!(branch.summary.universe, branch.root);

        let mut non_empty = Vec::new();
        branch.summary.enumerate_into(&mut non_empty);
        let expected: Vec<usize> = (0..branch.clusters.len())
            .filter(|&h| !branch.clusters[h].is_empty())
            .collect();
        assert_eq!(non_empty, expected, "summary must list exactly the non-empty clusters");
        walk(&branch.summary);

        let mut stored = 1;
        for (high, cluster) in branch.clusters.iter().enumerate() {
            assert_eq!(cluster.universe, branch.root);
            if let Some(c) = cluster.span {
                let lo = branch.index(high, c.min);
                let hi = branch.index(high, c.max);
                assert!(lo > span.min, "minimum must not be stored in a cluster");
                assert!(hi <= span.max, "cluster key {hi} above node max {}", span.max);
            }
            stored += walk(cluster);
        }
        if stored == 1 {
            assert_eq!(span.min, span.max, "single-key node must have min == max");
        } else {
            let last = expected.last().copied().unwrap_or(0);
            let last_max = branch.clusters[last].span.map(|c| branch.index(last, c.max));
            assert_eq!(last_max, Some(span.max), "max must live in the last non-empty cluster");
        }
        stored
    }

    walk(&tree.root)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cluster_size_is_exact_ceil_sqrt() {
        assert_eq!(cluster_size(1), 1);
        assert_eq!(cluster_size(2), 2);
        assert_eq!(cluster_size(3), 2);
        assert_eq!(cluster_size(4), 2);
        assert_eq!(cluster_size(5), 3);
        assert_eq!(cluster_size(16), 4);
        assert_eq!(cluster_size(17), 5);
        assert_eq!(cluster_size(256), 16);
        assert_eq!(cluster_size(1 << 30), 1 << 15);
        assert_eq!(cluster_size((1 << 30) + 1), (1 << 15) + 1);
        for u in 2..10_000usize {
            let r = cluster_size(u);
            assert!(r * r >= u, "u={u} r={r}");
            assert!((r - 1) * (r - 1) < u, "u={u} r={r}");
        }
    }

    #[test]
    fn cluster_size_shrinks_above_two() {
        for u in 3..5_000usize {
            assert!(cluster_size(u) < u, "recursion must terminate for u={u}");
        }
    }

    #[test]
    fn construction_is_eager() {
        let t = VebTree::new(16).unwrap();
        let branch = t.root.branch.as_ref().unwrap();
        assert_eq!(branch.root, 4);
        assert_eq!(branch.clusters.len(), 4);
        for cluster in &branch.clusters {
            let sub = cluster.branch.as_ref().unwrap();
            assert_eq!(sub.clusters.len(), 2);
            assert!(sub.clusters.iter().all(|c| c.branch.is_none()));
        }
        assert!(t.memory_usage() > 0);
    }

    #[test]
    fn base_case_has_no_children() {
        for u in [1, 2] {
            let t = VebTree::new(u).unwrap();
            assert!(t.root.branch.is_none());
            assert_eq!(t.cluster_count(), 0);
            assert_eq!(t.memory_usage(), 0);
        }
    }

    #[test]
    fn decomposition_round_trips() {
        let t = VebTree::new(250).unwrap();
        assert_eq!(t.cluster_count(), 16);
        for key in 0..250 {
            assert_eq!(t.index(t.high(key), t.low(key)), key);
            assert!(t.high(key) < t.cluster_count());
        }
    }

    #[test]
    fn first_insert_does_not_touch_clusters() {
        let mut t = VebTree::new(64).unwrap();
        t.insert(37).unwrap();
        let branch = t.root.branch.as_ref().unwrap();
        assert!(branch.summary.is_empty());
        assert!(branch.clusters.iter().all(Node::is_empty));
        assert_eq!(validate(&t), 1);
    }

    #[test]
    fn lower_key_pushes_old_minimum_down() {
        let mut t = VebTree::new(64).unwrap();
        t.insert(37).unwrap();
        t.insert(5).unwrap();
        assert_eq!(t.min(), Some(5));
        assert_eq!(t.max(), Some(37));
        let branch = t.root.branch.as_ref().unwrap();
        let high = 37 / 8;
        assert_eq!(branch.clusters[high].span, Some(Span { min: 5, max: 5 }));
        assert!(branch.summary.contains(high));
        assert_eq!(validate(&t), 2);
    }

    #[test]
    fn duplicate_insert_does_not_seed_a_cluster() {
        let mut t = VebTree::new(64).unwrap();
        t.root.insert(9);
        t.root.insert(9);
        let branch = t.root.branch.as_ref().unwrap();
        assert!(branch.clusters.iter().all(Node::is_empty));
    }
}
