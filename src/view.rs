//! Cluster-grouped dump of the ids held in a taxonomy's index.

use std::fmt;

use crate::taxonomy::Taxonomy;

/// Populated ids of one top-level cluster, with their labels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClusterGroup {
    pub cluster: usize,
    pub ids: Vec<usize>,
    /// `None` for an id that has no label.
    pub labels: Vec<Option<String>>,
}

/// Snapshot of the index grouped by top-level cluster.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClusterView {
    pub universe_size: usize,
    pub groups: Vec<ClusterGroup>,
    pub min: Option<usize>,
    pub max: Option<usize>,
}

impl ClusterView {
    pub fn of(taxonomy: &Taxonomy) -> Self {
        let index = taxonomy.index();
        let mut groups: Vec<ClusterGroup> = Vec::new();

        // Keys arrive ascending, so each cluster's ids are contiguous.
        for id in index.enumerate() {
            let cluster = index.high(id);
            let label = taxonomy.label_of(id).map(str::to_owned);
            match groups.last_mut() {
                Some(group) if group.cluster == cluster => {
                    group.ids.push(id);
                    group.labels.push(label);
                }
                _ => groups.push(ClusterGroup {
                    cluster,
                    ids: vec![id],
                    labels: vec![label],
                }),
            }
        }

        Self {
            universe_size: index.universe_size(),
            groups,
            min: index.min(),
            max: index.max(),
        }
    }
}

fn opt(v: Option<usize>) -> String {
    v.map_or_else(|| "-".to_owned(), |v| v.to_string())
}

impl fmt::Display for ClusterView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- VEB View (U={}) ---", self.universe_size)?;
        for group in &self.groups {
            write!(f, "cluster[{}] -> IDs:", group.cluster)?;
            for id in &group.ids {
                write!(f, " {id}")?;
            }
            write!(f, "\nlabels: ")?;
            let labels: Vec<String> = group
                .ids
                .iter()
                .zip(&group.labels)
                .map(|(id, label)| match label {
                    Some(label) => label.clone(),
                    None => format!("(unused:#{id})"),
                })
                .collect();
            writeln!(f, "{}", labels.join(", "))?;
        }
        write!(f, "minID={}, maxID={}", opt(self.min), opt(self.max))
    }
}
