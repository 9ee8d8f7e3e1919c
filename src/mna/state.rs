//! Per-category bookkeeping of auxiliary unknowns.

use crate::components::{Category, Component};

/// Running counts and offset counters for each auxiliary-unknown category.
///
/// The unknown space is laid out as ground (index 0, never stored), the
/// node block `1..=node_count`, then one contiguous block per category in
/// [`Category::ALL`] order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkState {
    node_count: usize,
    counts: [usize; Category::COUNT],
    next: [usize; Category::COUNT],
}

impl NetworkState {
    /// Create an empty state for `node_count` non-ground nodes.
    pub fn new(node_count: usize) -> Self {
        let mut state = Self {
            node_count,
            counts: [0; Category::COUNT],
            next: [0; Category::COUNT],
        };
        state.reset();
        state
    }

    /// Build the state for a flattened component list.
    pub fn from_components<'a>(node_count: usize, components: impl IntoIterator<Item = &'a Component>) -> Self {
        let mut state = Self::new(node_count);
        for component in components {
            if let Some(category) = component.kind().category() {
                state.counts[category as usize] += 1;
            }
        }
        state.reset();
        state
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Number of components counted in `category`.
    pub fn count(&self, category: Category) -> usize {
        self.counts[category as usize]
    }

    /// Auxiliary unknowns owned by the whole `category`.
    pub fn aux_count(&self, category: Category) -> usize {
        self.count(category) * category.mna_size()
    }

    /// Dimension of the square system: nodes plus all auxiliary unknowns.
    pub fn full_size(&self) -> usize {
        self.node_count + Category::ALL.iter().map(|c| self.aux_count(*c)).sum::<usize>()
    }

    /// First unknown index of `category`'s block.
    pub fn block_start(&self, category: Category) -> usize {
        let before: usize = Category::ALL
            .iter()
            .take_while(|c| **c != category)
            .map(|c| self.aux_count(*c))
            .sum();
        self.node_count + 1 + before
    }

    /// Take the next offset in `category`, advancing its counter by the
    /// category's auxiliary size.
    pub fn next_offset(&mut self, category: Category) -> usize {
        let offset = self.next[category as usize];
        self.next[category as usize] += category.mna_size();
        offset
    }

    /// Rewind every counter to the start of its block.
    pub fn reset(&mut self) {
        for category in Category::ALL {
            self.next[category as usize] = self.block_start(category);
        }
    }
}
