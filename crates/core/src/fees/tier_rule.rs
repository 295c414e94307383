//! A single pricing tier: an inclusive lead-day range with one fee formula.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::fees_errors::{FeeError, FeeResult};
use crate::constants::DISPLAY_DECIMAL_PRECISION;

/// Inclusive range of lead days. A single-day range has `start == end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadDayRange {
    start: i64,
    end: i64,
}

impl LeadDayRange {
    pub const fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    pub const fn single(day: i64) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    pub const fn start(&self) -> i64 {
        self.start
    }

    pub const fn end(&self) -> i64 {
        self.end
    }

    pub const fn contains(&self, lead_days: i64) -> bool {
        lead_days >= self.start && lead_days <= self.end
    }
}

/// How a tier prices the transfers it accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeeFormula {
    /// `flat + amount * rate`, rounded half-up to two places.
    FlatPlusPercentage { flat: Decimal, rate: Decimal },
    /// Every transfer in the range is refused, whatever the amount.
    RejectAll,
}

/// Immutable pricing rule for one lead-day range.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierRule {
    range: LeadDayRange,
    minimum_amount: Decimal,
    formula: FeeFormula,
    description: String,
}

impl TierRule {
    pub fn new(
        range: LeadDayRange,
        minimum_amount: Decimal,
        formula: FeeFormula,
        description: impl Into<String>,
    ) -> Self {
        Self {
            range,
            minimum_amount,
            formula,
            description: description.into(),
        }
    }

    pub fn range(&self) -> LeadDayRange {
        self.range
    }

    pub fn minimum_amount(&self) -> Decimal {
        self.minimum_amount
    }

    pub fn formula(&self) -> FeeFormula {
        self.formula
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_applicable(&self, lead_days: i64) -> bool {
        self.range.contains(lead_days)
    }

    /// Computes the fee for `amount` scheduled `lead_days` ahead.
    ///
    /// Checks run in a fixed order: positive amount, the tier's own minimum,
    /// range applicability, and finally the formula (which may refuse the
    /// transfer outright).
    pub fn calculate_fee(&self, amount: Decimal, lead_days: i64) -> FeeResult<Decimal> {
        if amount <= Decimal::ZERO {
            return Err(FeeError::InvalidAmount);
        }

        if amount < self.minimum_amount {
            return Err(FeeError::BelowMinimumAmount {
                minimum: format!("{:.2}", self.minimum_amount),
            });
        }

        if !self.is_applicable(lead_days) {
            return Err(FeeError::InapplicableRule {
                rule: self.description.clone(),
                lead_days,
            });
        }

        match self.formula {
            FeeFormula::RejectAll => Err(FeeError::RuleRejectsTransfer),
            FeeFormula::FlatPlusPercentage { flat, rate } => Ok((flat + amount * rate)
                .round_dp_with_strategy(
                    DISPLAY_DECIMAL_PRECISION,
                    RoundingStrategy::MidpointAwayFromZero,
                )),
        }
    }
}
