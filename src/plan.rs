use crate::{
    blocks::BlockSet,
    compat::CompatibilityGraph,
    constants::DEFAULT_MAX_ROWS,
    error::{BondError, Result},
    length::Length,
    levels::{self, LevelTotals},
    rows::{Row, generate_rows},
};
use log::{debug, trace};
use std::num::NonZeroU32;

/// Rows and their compatibility relation for one (width, block set) pair.
///
/// Building the plan is the expensive part; counting any number of heights
/// afterwards reuses it.
#[derive(Debug, Clone)]
pub struct PanelPlan {
    rows: Vec<Row>,
    graph: CompatibilityGraph,
}

impl PanelPlan {
    pub fn build(width: Length, blocks: &BlockSet) -> Result<Self> {
        Self::build_with_limit(width, blocks, DEFAULT_MAX_ROWS)
    }

    /// Fails with `TooManyRows` instead of enumerating past `max_rows` rows.
    pub fn build_with_limit(width: Length, blocks: &BlockSet, max_rows: usize) -> Result<Self> {
        if width.is_zero() {
            return Err(BondError::InvalidDimension {
                input: width.to_string(),
                reason: "width must be positive",
            });
        }

        let rows = generate_rows(width, blocks, max_rows)?;
        for row in &rows {
            trace!("row {row}");
        }
        let graph = CompatibilityGraph::analyze(&rows);
        debug!(
            "width {width}: {} rows, {} compatible pairs",
            rows.len(),
            graph.edge_count()
        );

        Ok(Self { rows, graph })
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn count(&self, height: NonZeroU32) -> Result<u128> {
        levels::count_panels(&self.graph, height)
    }

    pub fn level_totals(&self, height: NonZeroU32) -> LevelTotals<'_> {
        levels::level_totals(&self.graph, height)
    }
}

/// Number of distinct running-bond panels `width` wide and `height` rows tall.
///
/// Zero when no row fits the width exactly or no stack of that height exists.
pub fn compute_panel_count(width: Length, height: NonZeroU32, blocks: &BlockSet) -> Result<u128> {
    PanelPlan::build(width, blocks)?.count(height)
}
