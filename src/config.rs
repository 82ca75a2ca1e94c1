use crate::{
    blocks::BlockSet,
    constants::{
        DEFAULT_MAX_HEIGHT, DEFAULT_MAX_ROWS, DEFAULT_MAX_WIDTH_UNITS, DEFAULT_MIN_BLOCK_UNITS,
        DEFAULT_MIN_HEIGHT, DEFAULT_MIN_WIDTH_UNITS, DEFAULT_WIDTH_STEP_UNITS, ENV_BLOCKS,
        UNITS_PER_WHOLE,
    },
    error::{BondError, Result},
    length::Length,
};
use log::debug;
use serde::Deserialize;
use std::{env, num::NonZeroU32, path::Path};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub blocks: BlockSet,
    pub limits: Limits,
}

/// Accepted input domain for the command line driver
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Limits {
    pub min_width: Length,
    pub max_width: Length,
    pub width_step: Length,
    pub min_height: u32,
    pub max_height: u32,
    /// Shortest block a custom alphabet may contain
    pub min_block: Length,
    /// Rows enumerated for one width before giving up
    pub max_rows: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            min_width: Length::from_units(DEFAULT_MIN_WIDTH_UNITS),
            max_width: Length::from_units(DEFAULT_MAX_WIDTH_UNITS),
            width_step: Length::from_units(DEFAULT_WIDTH_STEP_UNITS),
            min_height: DEFAULT_MIN_HEIGHT,
            max_height: DEFAULT_MAX_HEIGHT,
            min_block: Length::from_units(DEFAULT_MIN_BLOCK_UNITS),
            max_rows: DEFAULT_MAX_ROWS,
        }
    }
}

fn as_f64(length: Length) -> f64 {
    length.units() as f64 / UNITS_PER_WHOLE as f64
}

impl Limits {
    /// Parses a width as typed by the user and checks it against the range
    /// and step.
    ///
    /// Text that is a number but not an exact length (too many decimals, a
    /// sign) gets the same range and step messages an exact width would.
    pub fn parse_width(&self, text: &str) -> Result<Length> {
        let err = match text.parse::<Length>() {
            Ok(width) => {
                self.check_width(width)?;
                return Ok(width);
            }
            Err(err) => err,
        };

        match text.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => {
                if value < as_f64(self.min_width) || value > as_f64(self.max_width) {
                    Err(self.width_range_error())
                } else if (value / as_f64(self.width_step)).fract() != 0.0 {
                    Err(self.width_step_error())
                } else {
                    Err(err)
                }
            }
            _ => Err(err),
        }
    }

    /// Rejects a width outside the range or off the step.
    pub fn check_width(&self, width: Length) -> Result<()> {
        if width < self.min_width || width > self.max_width {
            return Err(self.width_range_error());
        }
        if !width.is_multiple_of(self.width_step) {
            return Err(self.width_step_error());
        }
        Ok(())
    }

    pub fn check_height(&self, height: i64) -> Result<NonZeroU32> {
        u32::try_from(height)
            .ok()
            .filter(|h| (self.min_height..=self.max_height).contains(h))
            .and_then(NonZeroU32::new)
            .ok_or_else(|| {
                BondError::RangeRejected(format!(
                    "Height is not within the valid range: {}-{}.",
                    self.min_height, self.max_height
                ))
            })
    }

    pub fn check_blocks(&self, blocks: &BlockSet) -> Result<()> {
        let shortest = blocks.shortest();
        if shortest < self.min_block {
            return Err(BondError::RangeRejected(format!(
                "Block length {shortest} is below the minimum of {}.",
                self.min_block
            )));
        }
        Ok(())
    }

    fn width_range_error(&self) -> BondError {
        BondError::RangeRejected(format!(
            "Width is not within the valid range: {}-{}.",
            self.min_width, self.max_width
        ))
    }

    fn width_step_error(&self) -> BondError {
        BondError::RangeRejected(format!(
            "Width is not a multiple of {}.",
            self.width_step
        ))
    }
}

impl Config {
    /// Defaults, then the TOML file if one is given, then `BOND_CALC_BLOCKS`,
    /// then `blocks` from the command line.
    pub fn load(path: Option<&Path>, blocks: Option<BlockSet>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => Self::default(),
        };
        config.override_blocks(env::var(ENV_BLOCKS).ok().as_deref())?;
        if let Some(blocks) = blocks {
            debug!("Block lengths overridden on the command line");
            config.blocks = blocks;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            BondError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: Config = toml::from_str(&content)?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Replaces the block set with a comma separated list; blank or missing
    /// text leaves it alone.
    fn override_blocks(&mut self, value: Option<&str>) -> Result<()> {
        if let Some(blocks) = value {
            if !blocks.trim().is_empty() {
                self.blocks = blocks.parse()?;
                debug!("Block lengths overridden by {ENV_BLOCKS}");
            }
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let limits = &self.limits;
        if limits.min_width > limits.max_width {
            return Err(BondError::Config(format!(
                "min_width ({}) is greater than max_width ({})",
                limits.min_width, limits.max_width
            )));
        }
        if limits.width_step.is_zero() {
            return Err(BondError::Config("width_step must be positive".to_string()));
        }
        if limits.min_height == 0 || limits.min_height > limits.max_height {
            return Err(BondError::Config(format!(
                "height range {}-{} is invalid",
                limits.min_height, limits.max_height
            )));
        }
        if limits.max_rows == 0 {
            return Err(BondError::Config("max_rows must be positive".to_string()));
        }
        Ok(())
    }
}
