use crate::{
    constants::{MAX_FRACTION_DIGITS, UNITS_PER_WHOLE},
    error::{BondError, Result},
};
use serde::{Deserialize, Deserializer};
use std::{fmt, str::FromStr};

/// Exact non-negative decimal length, stored in thousandths.
///
/// All arithmetic on lengths is integer arithmetic, so a row either sums to
/// the panel width or it doesn't; there is no tolerance involved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Length(u64);

impl Length {
    pub const ZERO: Length = Length(0);

    pub const fn from_units(units: u64) -> Self {
        Self(units)
    }

    pub const fn units(self) -> u64 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// True when `self` is an exact multiple of `step`. A zero step divides nothing.
    pub fn is_multiple_of(self, step: Length) -> bool {
        step.0 != 0 && self.0 % step.0 == 0
    }

    pub fn checked_add(self, other: Length) -> Option<Length> {
        self.0.checked_add(other.0).map(Length)
    }
}

impl FromStr for Length {
    type Err = BondError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason| BondError::InvalidDimension {
            input: s.to_string(),
            reason,
        };

        let text = s.trim();
        let (whole, frac) = text.split_once('.').unwrap_or((text, ""));
        if whole.is_empty() && frac.is_empty() {
            return Err(invalid("not a number"));
        }
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(whole) || !all_digits(frac) {
            return Err(invalid("not a non-negative decimal number"));
        }

        let frac = frac.trim_end_matches('0');
        if frac.len() > MAX_FRACTION_DIGITS {
            return Err(invalid("more than three decimal places"));
        }

        let whole: u64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid("too large"))?
        };
        let frac_units = frac
            .bytes()
            .chain(std::iter::repeat(b'0'))
            .take(MAX_FRACTION_DIGITS)
            .fold(0u64, |acc, b| acc * 10 + u64::from(b - b'0'));

        whole
            .checked_mul(UNITS_PER_WHOLE)
            .and_then(|units| units.checked_add(frac_units))
            .map(Length)
            .ok_or_else(|| invalid("too large"))
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / UNITS_PER_WHOLE;
        let frac = self.0 % UNITS_PER_WHOLE;
        if frac == 0 {
            return write!(f, "{whole}");
        }
        let digits = format!("{frac:0width$}", width = MAX_FRACTION_DIGITS);
        write!(f, "{whole}.{}", digits.trim_end_matches('0'))
    }
}

// TOML users write `4.5` as often as `"4.5"`; both go through the decimal parser.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawLength {
    Integer(u64),
    Float(f64),
    Text(String),
}

impl<'de> Deserialize<'de> for Length {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = match RawLength::deserialize(deserializer)? {
            RawLength::Integer(n) => n.to_string(),
            RawLength::Float(x) => x.to_string(),
            RawLength::Text(s) => s,
        };
        text.parse().map_err(serde::de::Error::custom)
    }
}
