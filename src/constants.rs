/// Fixed-point scale: every length is stored as a whole number of thousandths
pub const UNITS_PER_WHOLE: u64 = 1000;
pub const MAX_FRACTION_DIGITS: usize = 3;

/// Reference block alphabet {3, 4.5}, in thousandths
pub const DEFAULT_BLOCK_UNITS: [u64; 2] = [3_000, 4_500];

/// Upper bound on rows enumerated for one width; the reference alphabet
/// needs 3329 at width 48
pub const DEFAULT_MAX_ROWS: usize = 10_000;

/// Largest dead-end lookup table kept during row generation
pub const MAX_REACH_TABLE: usize = 1 << 20;

/// Application limits enforced by the command line driver (lengths in thousandths)
pub const DEFAULT_MIN_WIDTH_UNITS: u64 = 3_000;
pub const DEFAULT_MAX_WIDTH_UNITS: u64 = 48_000;
pub const DEFAULT_WIDTH_STEP_UNITS: u64 = 500;
pub const DEFAULT_MIN_BLOCK_UNITS: u64 = 500;
pub const DEFAULT_MIN_HEIGHT: u32 = 1;
pub const DEFAULT_MAX_HEIGHT: u32 = 10;

/// Comma separated block lengths, e.g. "3,4.5"
pub const ENV_BLOCKS: &str = "BOND_CALC_BLOCKS";
