//! Bracket table lookup functionality.
//!
//! A [`BracketTable`] is an ordered list of [`BracketRow`]s covering
//! `[0, +infinity)`. The first row spans `[0, upper]`, every later row spans
//! `(previous_upper, upper]`, and the final row has no upper bound. Tables are
//! validated once in [`BracketTable::new`], so lookups never fail.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// One row of a bracket table.
///
/// A missing `upper_bound` marks the catch-all row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketRow {
    /// Inclusive upper bound of the row, or `None` for +infinity.
    #[serde(default)]
    pub upper_bound: Option<Decimal>,
    /// Amount owed at the row's lower bound.
    pub base_amount: Decimal,
    /// Marginal rate applied to the excess over the row's lower bound.
    #[serde(default)]
    pub rate: Decimal,
}

impl BracketRow {
    /// Creates a row with a finite upper bound.
    pub fn bounded(upper_bound: Decimal, base_amount: Decimal, rate: Decimal) -> Self {
        Self {
            upper_bound: Some(upper_bound),
            base_amount,
            rate,
        }
    }

    /// Creates the catch-all row.
    pub fn catch_all(base_amount: Decimal, rate: Decimal) -> Self {
        Self {
            upper_bound: None,
            base_amount,
            rate,
        }
    }
}

/// The row matched by a [`BracketTable::lookup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BracketMatch<'a> {
    /// Zero-based position of the row in the table.
    pub index: usize,
    /// Exclusive lower bound of the row (zero for the first row).
    pub lower_bound: Decimal,
    /// The matched row.
    pub row: &'a BracketRow,
}

impl BracketMatch<'_> {
    /// Evaluates `base_amount + rate * (amount - lower_bound)`.
    ///
    /// The excess is floored at zero so amounts clamped into the first row
    /// never produce a value below its base.
    pub fn evaluate(&self, amount: Decimal) -> Decimal {
        let excess = (amount - self.lower_bound).max(Decimal::ZERO);
        self.row.base_amount + self.row.rate * excess
    }
}

/// A validated, ordered bracket table.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::{BracketRow, BracketTable};
/// use rust_decimal::Decimal;
///
/// let table = BracketTable::new(vec![
///     BracketRow::bounded(Decimal::new(1000, 0), Decimal::ZERO, Decimal::ZERO),
///     BracketRow::catch_all(Decimal::ZERO, Decimal::new(10, 2)),
/// ])
/// .unwrap();
///
/// // The upper bound is inclusive.
/// assert_eq!(table.lookup(Decimal::new(1000, 0)).index, 0);
/// assert_eq!(table.lookup(Decimal::new(1500, 0)).index, 1);
/// assert_eq!(table.evaluate(Decimal::new(1500, 0)), Decimal::new(50, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BracketTable {
    rows: Vec<BracketRow>,
}

impl BracketTable {
    /// Validates `rows` and builds a table.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ConfigurationError`] if the table:
    /// - is empty
    /// - has a finite bound that is negative or not strictly greater than the previous one
    /// - lacks a terminal catch-all row, or has a catch-all row before the end
    /// - has a negative base amount or a rate outside `[0, 1]`
    /// - would make the mapped value decrease across a row boundary
    pub fn new(rows: Vec<BracketRow>) -> EngineResult<Self> {
        if rows.is_empty() {
            return Err(config_error("bracket table is empty"));
        }

        let last = rows.len() - 1;
        let mut previous: Option<(Decimal, &BracketRow, Decimal)> = None;

        for (index, row) in rows.iter().enumerate() {
            if row.base_amount < Decimal::ZERO {
                return Err(config_error(format!(
                    "row {} has a negative base amount {}",
                    index, row.base_amount
                )));
            }
            if row.rate < Decimal::ZERO || row.rate > Decimal::ONE {
                return Err(config_error(format!(
                    "row {} has rate {} outside [0, 1]",
                    index, row.rate
                )));
            }

            let lower_bound = previous.map_or(Decimal::ZERO, |(upper, _, _)| upper);

            if let Some((upper, prev_row, prev_lower)) = previous {
                let value_at_boundary = prev_row.base_amount + prev_row.rate * (upper - prev_lower);
                if row.base_amount < value_at_boundary {
                    return Err(config_error(format!(
                        "row {} base amount {} is below the {} reached at the end of row {}",
                        index,
                        row.base_amount,
                        value_at_boundary,
                        index - 1
                    )));
                }
            }

            match (row.upper_bound, index == last) {
                (None, true) => {}
                (None, false) => {
                    return Err(config_error(format!(
                        "row {} has no upper bound but is not the last row",
                        index
                    )));
                }
                (Some(upper), true) => {
                    return Err(config_error(format!(
                        "last row has upper bound {}; a catch-all row is required",
                        upper
                    )));
                }
                (Some(upper), false) => {
                    if upper < Decimal::ZERO {
                        return Err(config_error(format!(
                            "row {} has a negative upper bound {}",
                            index, upper
                        )));
                    }
                    if previous.is_some() && upper <= lower_bound {
                        return Err(config_error(format!(
                            "row {} upper bound {} is not greater than {}",
                            index, upper, lower_bound
                        )));
                    }
                    previous = Some((upper, row, lower_bound));
                }
            }
        }

        Ok(Self { rows })
    }

    /// Returns the rows of the table in order.
    pub fn rows(&self) -> &[BracketRow] {
        &self.rows
    }

    /// Returns the number of rows, including the catch-all.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Always false; a validated table has at least the catch-all row.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns true if every row has a zero rate, i.e. the table is a step function.
    pub fn is_flat(&self) -> bool {
        self.rows.iter().all(|row| row.rate.is_zero())
    }

    /// Finds the row whose range contains `amount`.
    ///
    /// Amounts equal to a row's upper bound match that row. Amounts below zero
    /// clamp to the first row.
    pub fn lookup(&self, amount: Decimal) -> BracketMatch<'_> {
        let index = self
            .rows
            .partition_point(|row| matches!(row.upper_bound, Some(upper) if upper < amount));
        let lower_bound = match index {
            0 => Decimal::ZERO,
            i => self.rows[i - 1].upper_bound.unwrap_or(Decimal::ZERO),
        };

        BracketMatch {
            index,
            lower_bound,
            row: &self.rows[index],
        }
    }

    /// Looks up `amount` and evaluates the matched row.
    pub fn evaluate(&self, amount: Decimal) -> Decimal {
        self.lookup(amount).evaluate(amount)
    }
}

fn config_error(message: impl Into<String>) -> EngineError {
    EngineError::ConfigurationError {
        message: message.into(),
    }
}
