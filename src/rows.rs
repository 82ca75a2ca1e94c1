use crate::{
    blocks::BlockSet,
    constants::MAX_REACH_TABLE,
    error::{BondError, Result},
    length::Length,
};
use log::trace;
use std::fmt;

/// One course of blocks laid left to right, spanning the panel width exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Row {
    blocks: Vec<Length>,
}

impl Row {
    pub fn new(blocks: Vec<Length>) -> Self {
        Self { blocks }
    }

    pub fn width(&self) -> Length {
        self.running_sums().last().unwrap_or(Length::ZERO)
    }

    /// Cumulative offset after each block; the last one is the row width
    pub fn running_sums(&self) -> impl Iterator<Item = Length> + '_ {
        self.blocks.iter().scan(Length::ZERO, |sum, &block| {
            *sum = Length::from_units(sum.units() + block.units());
            Some(*sum)
        })
    }

    /// Interior joint offsets, strictly between 0 and the row width
    pub fn joints(&self) -> Vec<Length> {
        let mut sums: Vec<Length> = self.running_sums().collect();
        sums.pop();
        sums
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, block) in self.blocks.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{block}")?;
        }
        write!(f, "]")
    }
}

/// Enumerates every ordered sequence of blocks summing exactly to `width`.
///
/// Blocks are tried in alphabet order, so the output order is stable for a
/// given block set. A width no combination can reach yields an empty vector.
/// Fails with `TooManyRows` as soon as more than `max_rows` rows exist.
pub fn generate_rows(width: Length, blocks: &BlockSet, max_rows: usize) -> Result<Vec<Row>> {
    let Some(finishable) = Finishable::new(width, blocks.lengths()) else {
        trace!("width {width} is not reachable with blocks [{blocks}]");
        return Ok(Vec::new());
    };

    let mut search = RowSearch {
        width,
        alphabet: blocks.lengths(),
        finishable,
        max_rows,
        buffer: Vec::new(),
        rows: Vec::new(),
    };
    search.place_block(Length::ZERO)?;
    trace!("generated {} rows for width {width}", search.rows.len());
    Ok(search.rows)
}

struct RowSearch<'a> {
    width: Length,
    alphabet: &'a [Length],
    finishable: Finishable,
    max_rows: usize,
    buffer: Vec<Length>,
    rows: Vec<Row>,
}

impl RowSearch<'_> {
    fn place_block(&mut self, sum: Length) -> Result<()> {
        if sum == self.width {
            if !self.buffer.is_empty() {
                if self.rows.len() == self.max_rows {
                    return Err(BondError::TooManyRows {
                        width: self.width,
                        limit: self.max_rows,
                    });
                }
                self.rows.push(Row::new(self.buffer.clone()));
            }
            return Ok(());
        }

        let alphabet = self.alphabet;
        for &block in alphabet {
            // prune: no branch continues past the width or into a dead end
            let Some(next) = sum.checked_add(block).filter(|&next| next <= self.width) else {
                continue;
            };
            if !self.finishable.can_finish(self.width.units() - next.units()) {
                continue;
            }
            self.buffer.push(block);
            self.place_block(next)?;
            self.buffer.pop();
        }
        Ok(())
    }
}

/// Which remaining widths some run of blocks can fill exactly.
///
/// Widths are counted in multiples of the blocks' common divisor. Above
/// `MAX_REACH_TABLE` entries no table is kept and every remainder counts as
/// finishable.
struct Finishable {
    step: u64,
    table: Option<Vec<bool>>,
}

impl Finishable {
    /// `None` when the width is not a multiple of the blocks' common divisor.
    fn new(width: Length, alphabet: &[Length]) -> Option<Self> {
        let step = alphabet.iter().fold(0, |acc, block| gcd(acc, block.units()));
        if step == 0 || width.units() % step != 0 {
            return None;
        }

        let steps = width.units() / step;
        let table = usize::try_from(steps)
            .ok()
            .filter(|&n| n <= MAX_REACH_TABLE)
            .map(|n| {
                let sizes: Vec<usize> = alphabet
                    .iter()
                    .filter_map(|b| usize::try_from(b.units() / step).ok())
                    .collect();
                let mut table = vec![false; n + 1];
                table[0] = true;
                for remaining in 1..=n {
                    table[remaining] = sizes
                        .iter()
                        .any(|&size| size <= remaining && table[remaining - size]);
                }
                table
            });
        Some(Self { step, table })
    }

    fn can_finish(&self, remaining_units: u64) -> bool {
        if remaining_units % self.step != 0 {
            return false;
        }
        match (&self.table, usize::try_from(remaining_units / self.step)) {
            (Some(table), Ok(i)) => table.get(i).copied().unwrap_or(false),
            _ => true,
        }
    }
}

fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 { a } else { gcd(b, a % b) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_MAX_ROWS;

    fn len(s: &str) -> Length {
        s.parse().unwrap()
    }

    fn row(parts: &[&str]) -> Row {
        Row::new(parts.iter().map(|s| len(s)).collect())
    }

    fn reference_rows(width: &str) -> Vec<Row> {
        generate_rows(len(width), &BlockSet::reference(), DEFAULT_MAX_ROWS).unwrap()
    }

    #[test]
    fn test_single_block_width() {
        let rows = reference_rows("3");
        assert_eq!(rows, vec![row(&["3"])]);
        assert!(rows[0].joints().is_empty());

        assert_eq!(reference_rows("4.5"), vec![row(&["4.5"])]);
    }

    #[test]
    fn test_order_matters() {
        assert_eq!(
            reference_rows("7.5"),
            vec![row(&["3", "4.5"]), row(&["4.5", "3"])]
        );
    }

    #[test]
    fn test_unreachable_width_is_empty() {
        assert!(reference_rows("5").is_empty());
        assert!(reference_rows("3.5").is_empty());
        assert!(reference_rows("47.5").is_empty());
    }

    #[test]
    fn test_every_row_sums_to_width() {
        let width = len("48");
        let rows = reference_rows("48");
        assert_eq!(rows.len(), 3329);
        assert!(rows.iter().all(|r| r.width() == width));
    }

    #[test]
    fn test_row_limit_is_inclusive() {
        let blocks = BlockSet::reference();
        assert_eq!(generate_rows(len("7.5"), &blocks, 2).unwrap().len(), 2);

        let err = generate_rows(len("7.5"), &blocks, 1).unwrap_err();
        assert!(matches!(err, BondError::TooManyRows { limit: 1, .. }));
    }

    #[test]
    fn test_fine_blocks_stop_at_row_limit() {
        // {0.5, 1} fills a width of 48 in roughly Fib(97) ways
        let blocks: BlockSet = "0.5,1".parse().unwrap();
        let err = generate_rows(len("48"), &blocks, DEFAULT_MAX_ROWS).unwrap_err();
        assert!(matches!(err, BondError::TooManyRows { .. }));
    }

    #[test]
    fn test_dead_ends_are_pruned() {
        // an odd number of halves never fills with whole blocks
        let blocks: BlockSet = "1,2".parse().unwrap();
        assert!(generate_rows(len("47.5"), &blocks, 1).unwrap().is_empty());

        // {2, 3} fills every whole width except 1
        let blocks: BlockSet = "2,3".parse().unwrap();
        let rows = generate_rows(len("7"), &blocks, DEFAULT_MAX_ROWS).unwrap();
        assert_eq!(rows.len(), 3);
        assert!(generate_rows(len("1"), &blocks, 1).unwrap().is_empty());
    }

    #[test]
    fn test_finishable_table() {
        let finishable = Finishable::new(len("7"), &[len("2"), len("3")]).unwrap();
        assert!(!finishable.can_finish(len("1").units()));
        assert!(finishable.can_finish(len("5").units()));
        assert!(!finishable.can_finish(len("2.5").units()));
        assert!(Finishable::new(len("7.5"), &[len("1"), len("2")]).is_none());
    }

    #[test]
    fn test_joints_and_display() {
        let r = row(&["3", "4.5", "3"]);
        assert_eq!(r.joints(), vec![len("3"), len("7.5")]);
        assert_eq!(r.width(), len("10.5"));
        assert_eq!(r.to_string(), "[3, 4.5, 3]");
    }
}
