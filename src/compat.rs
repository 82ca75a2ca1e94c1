use crate::rows::Row;
use std::cmp::Ordering;

/// Whether `above` may be laid directly on top of `below`.
///
/// Walks both rows' running sums in lock-step, always advancing the shorter
/// one. Any offset the two rows share before the shared right edge is an
/// aligned joint. Both rows are expected to have the same width.
pub fn rows_compatible(below: &Row, above: &Row) -> bool {
    debug_assert_eq!(below.width(), above.width());
    let width = below.width();

    let mut lower = below.running_sums();
    let mut upper = above.running_sums();
    let (mut lower_sum, mut upper_sum) = (lower.next(), upper.next());

    while let (Some(l), Some(u)) = (lower_sum, upper_sum) {
        match l.cmp(&u) {
            Ordering::Less => lower_sum = lower.next(),
            Ordering::Greater => upper_sum = upper.next(),
            Ordering::Equal => return l >= width,
        }
    }
    true
}

/// Directed "may sit directly above" relation over a row arena.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompatibilityGraph {
    above: Vec<Vec<usize>>,
}

impl CompatibilityGraph {
    /// Tests every ordered pair of rows, O(R² · L).
    pub fn analyze(rows: &[Row]) -> Self {
        let above = rows
            .iter()
            .map(|below| {
                rows.iter()
                    .enumerate()
                    .filter(|(_, candidate)| rows_compatible(below, candidate))
                    .map(|(j, _)| j)
                    .collect()
            })
            .collect();
        Self { above }
    }

    /// Builds a graph from explicit adjacency lists, one per row.
    /// Indices past the last row are dropped.
    #[cfg(test)]
    pub(crate) fn from_adjacency(mut above: Vec<Vec<usize>>) -> Self {
        let rows = above.len();
        for targets in &mut above {
            targets.retain(|&j| j < rows);
        }
        Self { above }
    }

    /// Indices of rows that may be placed directly above row `row`
    pub fn above(&self, row: usize) -> &[usize] {
        self.above.get(row).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of rows in the underlying arena
    pub fn len(&self) -> usize {
        self.above.len()
    }

    pub fn is_empty(&self) -> bool {
        self.above.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.above.iter().map(Vec::len).sum()
    }
}
