//! Label registry and term graph indexed by a [`VebTree`].
//!
//! Every new label gets the next dense id, and that id is inserted into the
//! index. Edges are undirected parent/child links between ids.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use crate::error::ArborError;
use crate::veb::VebTree;

/// A taxonomy of named terms whose ids live in a fixed-size universe.
#[derive(Clone, Debug)]
pub struct Taxonomy {
    ids: HashMap<String, usize>,
    labels: Vec<String>,
    adjacency: Vec<Vec<usize>>,
    index: VebTree,
}

impl Taxonomy {
    pub const DEFAULT_UNIVERSE: usize = 128;

    pub fn new(universe_size: usize) -> Result<Self, ArborError> {
        Ok(Self {
            ids: HashMap::new(),
            labels: Vec::new(),
            adjacency: Vec::new(),
            index: VebTree::new(universe_size)?,
        })
    }

    #[inline]
    pub fn universe_size(&self) -> usize {
        self.index.universe_size()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// The id index over every registered term.
    pub fn index(&self) -> &VebTree {
        &self.index
    }

    pub fn id_of(&self, label: &str) -> Option<usize> {
        self.ids.get(label).copied()
    }

    pub fn label_of(&self, id: usize) -> Option<&str> {
        self.labels.get(id).map(String::as_str)
    }

    pub fn neighbors(&self, id: usize) -> &[usize] {
        self.adjacency.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Return the id for `label`, allocating one if the label is new.
    pub fn ensure_term(&mut self, label: &str) -> Result<usize, ArborError> {
        if let Some(id) = self.id_of(label) {
            return Ok(id);
        }
        let id = self.labels.len();
        if id >= self.universe_size() {
            return Err(ArborError::CapacityExhausted {
                universe_size: self.universe_size(),
            });
        }
        self.index.insert(id)?;
        self.ids.insert(label.to_owned(), id);
        self.labels.push(label.to_owned());
        self.adjacency.push(Vec::new());
        Ok(id)
    }

    /// Link `parent` and `child`, registering either if needed.
    pub fn connect(&mut self, parent: &str, child: &str) -> Result<(), ArborError> {
        let p = self.ensure_term(parent)?;
        let c = self.ensure_term(child)?;
        self.adjacency[p].push(c);
        self.adjacency[c].push(p);
        Ok(())
    }

    /// Fewest-hops path from `from` to `to`, both ends included.
    ///
    /// Dijkstra over unit edge weights with early exit at the target.
    pub fn shortest_path(&self, from: &str, to: &str) -> Result<Vec<usize>, ArborError> {
        let source = self
            .id_of(from)
            .ok_or_else(|| ArborError::UnknownTerm(from.to_owned()))?;
        let target = self
            .id_of(to)
            .ok_or_else(|| ArborError::UnknownTerm(to.to_owned()))?;

        let n = self.labels.len();
        let mut dist = vec![usize::MAX; n];
        let mut parent: Vec<Option<usize>> = vec![None; n];
        let mut heap = BinaryHeap::new();
        dist[source] = 0;
        heap.push(Reverse((0usize, source)));

        while let Some(Reverse((d, u))) = heap.pop() {
            if d != dist[u] {
                continue;
            }
            if u == target {
                break;
            }
            for &v in &self.adjacency[u] {
                if dist[v] > d + 1 {
                    dist[v] = d + 1;
                    parent[v] = Some(u);
                    heap.push(Reverse((d + 1, v)));
                }
            }
        }

        if dist[target] == usize::MAX {
            return Err(ArborError::NoPath {
                from: from.to_owned(),
                to: to.to_owned(),
            });
        }

        let mut path = vec![target];
        let mut cur = target;
        while let Some(p) = parent[cur] {
            path.push(p);
            cur = p;
        }
        path.reverse();
        Ok(path)
    }

    /// Render ids as their labels, joined by `sep`. Unknown ids render as `#id`.
    pub fn join_labels(&self, ids: &[usize], sep: &str) -> String {
        ids.iter()
            .map(|&id| match self.label_of(id) {
                Some(label) => label.to_owned(),
                None => format!("#{id}"),
            })
            .collect::<Vec<_>>()
            .join(sep)
    }
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_UNIVERSE).expect("default universe is non-empty")
    }
}
