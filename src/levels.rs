use crate::{
    compat::CompatibilityGraph,
    error::{BondError, Result},
};
use std::num::NonZeroU32;

/// Level-by-level panel counter.
///
/// Holds, for each row, the number of valid panels of the current height
/// whose top row is that row. Each `advance` is one vector–matrix product
/// against the compatibility relation.
#[derive(Debug, Clone)]
pub struct LevelCounter<'a> {
    graph: &'a CompatibilityGraph,
    counts: Vec<u128>,
    height: u32,
}

impl<'a> LevelCounter<'a> {
    /// Height 1: every row on its own is a panel
    pub fn new(graph: &'a CompatibilityGraph) -> Self {
        Self {
            graph,
            counts: vec![1; graph.len()],
            height: 1,
        }
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn counts(&self) -> &[u128] {
        &self.counts
    }

    /// Adds one level on top of every panel counted so far.
    pub fn advance(&mut self) -> Result<()> {
        let next_height = self.height + 1;
        let overflow = || BondError::NumericOverflow {
            height: next_height,
        };

        let mut next = vec![0u128; self.counts.len()];
        for (row, &times) in self.counts.iter().enumerate() {
            if times == 0 {
                continue;
            }
            for &upper in self.graph.above(row) {
                next[upper] = next[upper].checked_add(times).ok_or_else(overflow)?;
            }
        }

        self.counts = next;
        self.height = next_height;
        Ok(())
    }

    /// Number of panels of the current height
    pub fn total(&self) -> Result<u128> {
        self.counts
            .iter()
            .try_fold(0u128, |acc, &c| acc.checked_add(c))
            .ok_or(BondError::NumericOverflow {
                height: self.height,
            })
    }
}

/// Counts panels exactly `height` rows tall.
pub fn count_panels(graph: &CompatibilityGraph, height: NonZeroU32) -> Result<u128> {
    if graph.is_empty() {
        return Ok(0);
    }
    let mut counter = LevelCounter::new(graph);
    while counter.height() < height.get() {
        counter.advance()?;
        if counter.counts().iter().all(|&c| c == 0) {
            return Ok(0);
        }
    }
    counter.total()
}

/// Panel counts for every height from 1 to `height`, from one propagation run.
///
/// Levels are produced lazily, so a tall target costs time, not memory.
pub fn level_totals(graph: &CompatibilityGraph, height: NonZeroU32) -> LevelTotals<'_> {
    LevelTotals {
        counter: LevelCounter::new(graph),
        target: height.get(),
        started: false,
        done: false,
    }
}

#[derive(Debug, Clone)]
pub struct LevelTotals<'a> {
    counter: LevelCounter<'a>,
    target: u32,
    started: bool,
    done: bool,
}

impl Iterator for LevelTotals<'_> {
    type Item = Result<u128>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if self.started {
            if self.counter.height() >= self.target {
                self.done = true;
                return None;
            }
            if let Err(e) = self.counter.advance() {
                self.done = true;
                return Some(Err(e));
            }
        }
        self.started = true;

        let total = self.counter.total();
        self.done = total.is_err();
        Some(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn h(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    fn totals(graph: &CompatibilityGraph, height: u32) -> Vec<u128> {
        level_totals(graph, h(height)).collect::<Result<_>>().unwrap()
    }

    #[test]
    fn test_height_one_is_row_count() {
        let graph = CompatibilityGraph::from_adjacency(vec![vec![], vec![], vec![]]);
        assert_eq!(count_panels(&graph, h(1)).unwrap(), 3);
    }

    #[test]
    fn test_empty_graph_counts_zero() {
        let graph = CompatibilityGraph::default();
        for n in 1..=5 {
            assert_eq!(count_panels(&graph, h(n)).unwrap(), 0);
        }
    }

    #[test]
    fn test_alternating_pair() {
        let graph = CompatibilityGraph::from_adjacency(vec![vec![1], vec![0]]);
        assert_eq!(totals(&graph, 4), vec![2, 2, 2, 2]);
    }

    #[test]
    fn test_directed_chain_dies_out() {
        // 0 -> 1 -> 2, nothing above 2
        let graph = CompatibilityGraph::from_adjacency(vec![vec![1], vec![2], vec![]]);
        assert_eq!(totals(&graph, 4), vec![3, 2, 1, 0]);
        assert_eq!(count_panels(&graph, h(10)).unwrap(), 0);
    }

    #[test]
    fn test_complete_graph_grows_geometrically() {
        let graph = CompatibilityGraph::from_adjacency(vec![vec![0, 1, 2]; 3]);
        assert_eq!(count_panels(&graph, h(5)).unwrap(), 3u128.pow(5));
    }

    #[test]
    fn test_overflow_is_reported() {
        let graph = CompatibilityGraph::from_adjacency(vec![vec![0, 1]; 2]);
        let err = count_panels(&graph, h(200)).unwrap_err();
        assert!(matches!(err, BondError::NumericOverflow { .. }));
    }

    #[test]
    fn test_tall_heights_do_not_preallocate() {
        let graph = CompatibilityGraph::from_adjacency(vec![vec![1], vec![]]);
        let first: Vec<u128> = level_totals(&graph, h(u32::MAX))
            .take(3)
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(first, vec![2, 1, 0]);
        assert_eq!(count_panels(&graph, h(u32::MAX)).unwrap(), 0);
    }

    #[test]
    fn test_level_totals_stop_after_overflow() {
        let graph = CompatibilityGraph::from_adjacency(vec![vec![0, 1]; 2]);
        let results: Vec<Result<u128>> = level_totals(&graph, h(200)).collect();
        assert!(results.len() < 200);
        assert!(matches!(results.last(), Some(Err(BondError::NumericOverflow { .. }))));
    }

    #[test]
    fn test_counter_exposes_level_vector() {
        let graph = CompatibilityGraph::from_adjacency(vec![vec![0, 1], vec![0]]);
        let mut counter = LevelCounter::new(&graph);
        assert_eq!(counter.counts(), &[1, 1]);
        counter.advance().unwrap();
        assert_eq!(counter.height(), 2);
        assert_eq!(counter.counts(), &[2, 1]);
    }
}
