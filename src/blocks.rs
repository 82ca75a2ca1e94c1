use crate::{
    constants::DEFAULT_BLOCK_UNITS,
    error::{BondError, Result},
    length::Length,
};
use serde::Deserialize;
use std::{fmt, str::FromStr};

/// Ordered alphabet of distinct, positive block lengths.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Vec<Length>")]
pub struct BlockSet {
    lengths: Vec<Length>,
}

impl BlockSet {
    pub fn new(lengths: Vec<Length>) -> Result<Self> {
        if lengths.is_empty() {
            return Err(BondError::InvalidBlockSet(
                "at least one block length is required".to_string(),
            ));
        }
        for (i, length) in lengths.iter().enumerate() {
            if length.is_zero() {
                return Err(BondError::InvalidBlockSet(
                    "block lengths must be positive".to_string(),
                ));
            }
            if lengths[..i].contains(length) {
                return Err(BondError::InvalidBlockSet(format!(
                    "block length {length} is listed more than once"
                )));
            }
        }
        Ok(Self { lengths })
    }

    /// The reference alphabet {3, 4.5}
    pub fn reference() -> Self {
        Self {
            lengths: DEFAULT_BLOCK_UNITS.map(Length::from_units).to_vec(),
        }
    }

    pub fn lengths(&self) -> &[Length] {
        &self.lengths
    }

    /// Shortest block in the set
    pub fn shortest(&self) -> Length {
        self.lengths.iter().copied().min().unwrap_or(Length::ZERO)
    }
}

impl Default for BlockSet {
    fn default() -> Self {
        Self::reference()
    }
}

impl fmt::Display for BlockSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, length) in self.lengths.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{length}")?;
        }
        Ok(())
    }
}

impl TryFrom<Vec<Length>> for BlockSet {
    type Error = BondError;

    fn try_from(lengths: Vec<Length>) -> Result<Self> {
        Self::new(lengths)
    }
}

/// Parses a comma separated list such as `3,4.5`
impl FromStr for BlockSet {
    type Err = BondError;

    fn from_str(s: &str) -> Result<Self> {
        let lengths = s
            .split(',')
            .filter(|part| !part.trim().is_empty())
            .map(str::parse)
            .collect::<Result<Vec<Length>>>()?;
        Self::new(lengths)
    }
}
