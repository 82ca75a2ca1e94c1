pub mod blocks;
pub mod compat;
pub mod config;
pub mod constants;
pub mod error;
pub mod length;
pub mod levels;
pub mod plan;
pub mod rows;

pub use blocks::BlockSet;
pub use compat::{CompatibilityGraph, rows_compatible};
pub use config::{Config, Limits};
pub use error::{BondError, Result};
pub use length::Length;
pub use levels::{LevelCounter, LevelTotals, count_panels, level_totals};
pub use plan::{PanelPlan, compute_panel_count};
pub use rows::{Row, generate_rows};
