/// Earliest schedulable lead time (same-day execution)
pub const MIN_LEAD_DAYS: i64 = 0;

/// Latest schedulable lead time
pub const MAX_LEAD_DAYS: i64 = 50;

/// Decimal places for amounts and fees
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Number of digits in an account identifier
pub const ACCOUNT_NUMBER_LENGTH: usize = 10;
