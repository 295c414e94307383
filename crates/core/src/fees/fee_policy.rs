use log::debug;
use rust_decimal::Decimal;

use super::fee_schedule::standard_tiers;
use super::fees_errors::{FeeError, FeeResult};
use super::tier_rule::TierRule;

/// Selects the tier rule for a lead time and delegates fee computation to it.
///
/// Rules are held in registration order; the first applicable rule wins.
#[derive(Debug, Clone)]
pub struct FeePolicy {
    rules: Vec<TierRule>,
}

impl FeePolicy {
    pub fn new(rules: Vec<TierRule>) -> Self {
        FeePolicy { rules }
    }

    /// Policy backed by the production tier table.
    pub fn standard() -> Self {
        Self::new(standard_tiers())
    }

    pub fn rules(&self) -> &[TierRule] {
        &self.rules
    }

    fn find_rule(&self, lead_days: i64) -> Option<&TierRule> {
        self.rules.iter().find(|rule| rule.is_applicable(lead_days))
    }

    /// True when some tier covers `lead_days`. The amount is not considered.
    pub fn is_transfer_allowed(&self, lead_days: i64) -> bool {
        self.find_rule(lead_days).is_some()
    }

    /// Computes the fee using the first applicable tier. The tier's own
    /// failures are returned unchanged.
    pub fn calculate_fee(&self, amount: Decimal, lead_days: i64) -> FeeResult<Decimal> {
        let rule = self
            .find_rule(lead_days)
            .ok_or(FeeError::NoApplicableRule { lead_days })?;
        debug!(
            "Pricing {} at {} lead days with tier '{}'",
            amount,
            lead_days,
            rule.description()
        );
        rule.calculate_fee(amount, lead_days)
    }

    /// Tier descriptions in registration order.
    pub fn rule_descriptions(&self) -> Vec<String> {
        self.rules
            .iter()
            .map(|rule| rule.description().to_string())
            .collect()
    }
}

impl Default for FeePolicy {
    fn default() -> Self {
        Self::standard()
    }
}
