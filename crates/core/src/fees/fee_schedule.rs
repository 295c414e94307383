//! The fee tier table.
//!
//! Tiers are declared here once, in range order. Registration order is the
//! selector's tie-break, so the table order is part of the pricing contract.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::tier_rule::{FeeFormula, LeadDayRange, TierRule};

pub const SAME_DAY: LeadDayRange = LeadDayRange::single(0);
pub const SHORT_NOTICE: LeadDayRange = LeadDayRange::new(1, 10);
pub const THREE_TO_FOUR_WEEKS: LeadDayRange = LeadDayRange::new(21, 30);
pub const SIX_TO_SEVEN_WEEKS: LeadDayRange = LeadDayRange::new(41, 50);

pub const SAME_DAY_MINIMUM: Decimal = dec!(3.00);
pub const SHORT_NOTICE_MINIMUM: Decimal = dec!(12.00);

pub const SAME_DAY_RATE: Decimal = dec!(0.025);
pub const THREE_TO_FOUR_WEEKS_RATE: Decimal = dec!(0.069);
pub const SIX_TO_SEVEN_WEEKS_RATE: Decimal = dec!(0.017);

/// Minimum transfer amount for a lead time.
///
/// Both the tier rules and the scheduling validator read their thresholds from
/// here, so the two checks cannot drift apart.
pub fn minimum_for(lead_days: i64) -> Decimal {
    if SAME_DAY.contains(lead_days) {
        SAME_DAY_MINIMUM
    } else if SHORT_NOTICE.contains(lead_days) {
        SHORT_NOTICE_MINIMUM
    } else {
        Decimal::ZERO
    }
}

fn percent(rate: Decimal) -> Decimal {
    (rate * dec!(100)).normalize()
}

/// Builds the production tier table. Lead days 11-20 and 31-40 are
/// deliberately left uncovered.
pub fn standard_tiers() -> Vec<TierRule> {
    vec![
        TierRule::new(
            SAME_DAY,
            minimum_for(SAME_DAY.start()),
            FeeFormula::FlatPlusPercentage {
                flat: Decimal::ZERO,
                rate: SAME_DAY_RATE,
            },
            format!(
                "Same-day transfers: {}% of the amount (minimum amount {:.2})",
                percent(SAME_DAY_RATE),
                SAME_DAY_MINIMUM
            ),
        ),
        TierRule::new(
            SHORT_NOTICE,
            minimum_for(SHORT_NOTICE.start()),
            FeeFormula::RejectAll,
            format!(
                "Transfers {} to {} days ahead are not permitted (minimum amount {:.2}, no percentage fee applicable)",
                SHORT_NOTICE.start(),
                SHORT_NOTICE.end(),
                SHORT_NOTICE_MINIMUM
            ),
        ),
        TierRule::new(
            THREE_TO_FOUR_WEEKS,
            minimum_for(THREE_TO_FOUR_WEEKS.start()),
            FeeFormula::FlatPlusPercentage {
                flat: Decimal::ZERO,
                rate: THREE_TO_FOUR_WEEKS_RATE,
            },
            format!(
                "Transfers {} to {} days ahead: 0.00 + {}% of the amount",
                THREE_TO_FOUR_WEEKS.start(),
                THREE_TO_FOUR_WEEKS.end(),
                percent(THREE_TO_FOUR_WEEKS_RATE)
            ),
        ),
        TierRule::new(
            SIX_TO_SEVEN_WEEKS,
            minimum_for(SIX_TO_SEVEN_WEEKS.start()),
            FeeFormula::FlatPlusPercentage {
                flat: Decimal::ZERO,
                rate: SIX_TO_SEVEN_WEEKS_RATE,
            },
            format!(
                "Transfers {} to {} days ahead: 0.00 + {}% of the amount",
                SIX_TO_SEVEN_WEEKS.start(),
                SIX_TO_SEVEN_WEEKS.end(),
                percent(SIX_TO_SEVEN_WEEKS_RATE)
            ),
        ),
    ]
}
