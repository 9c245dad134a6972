//! Ready-made taxonomies for demos and tests.

use crate::error::ArborError;
use crate::taxonomy::Taxonomy;

/// Parent/child edges of the classic Porphyrian ladder, with a few
/// irrational animals for contrast.
const ANIMALS: &[(&str, &str)] = &[
    ("substance", "body"),
    ("substance", "incorporeal"),
    ("body", "living"),
    ("body", "non_living"),
    ("living", "animal"),
    ("living", "plant"),
    ("animal", "rational_animal"),
    ("animal", "irrational_animal"),
    ("rational_animal", "man"),
    ("rational_animal", "immortal_rational_animal"),
    ("man", "Plato"),
    ("man", "Socrates"),
    ("man", "Aristotle"),
    ("irrational_animal", "equine"),
    ("irrational_animal", "canine"),
    ("irrational_animal", "bird"),
    ("bird", "chicken"),
];

/// Number of distinct terms added by [`build_sample_animals`].
pub const SAMPLE_ANIMAL_TERMS: usize = 18;

pub fn build_sample_animals(taxonomy: &mut Taxonomy) -> Result<(), ArborError> {
    for (parent, child) in ANIMALS {
        taxonomy.connect(parent, child)?;
    }
    Ok(())
}

/// Build a uniform tree with `levels` levels where every node has
/// `branching` children.
///
/// Nodes are named `L<level>_<i>`, with `i` counting from zero within each
/// level; the root is `L1_0`.
pub fn build_synthetic(
    taxonomy: &mut Taxonomy,
    levels: usize,
    branching: usize,
) -> Result<(), ArborError> {
    if levels == 0 {
        return Ok(());
    }
    let root = "L1_0".to_owned();
    taxonomy.ensure_term(&root)?;

    let mut prev = vec![root];
    for level in 2..=levels {
        let mut cur = Vec::with_capacity(prev.len() * branching);
        for parent in &prev {
            for _ in 0..branching {
                let name = format!("L{level}_{}", cur.len());
                taxonomy.connect(parent, &name)?;
                cur.push(name);
            }
        }
        prev = cur;
    }
    Ok(())
}

/// Terms a synthetic tree of the given shape contains.
pub fn synthetic_term_count(levels: usize, branching: usize) -> usize {
    let mut total = 0usize;
    let mut width = 1usize;
    for _ in 0..levels {
        total = total.saturating_add(width);
        width = width.saturating_mul(branching);
    }
    total
}
