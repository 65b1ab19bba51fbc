//! Conversions from on-chain integers to display values.

use crate::consts::cli_consts::MAX_SAFE_INTEGER;
use crate::error::DashboardError;
use alloy_primitives::U256;

/// Formats a fixed-point integer scaled by `10^decimals` as a decimal string.
///
/// Trailing fractional zeros are dropped but one fractional digit is always
/// kept, so `2 * 10^18` with 18 decimals is `"2.0"`. With zero decimals the
/// integer is returned unchanged.
pub fn format_units(value: U256, decimals: u8) -> String {
    if decimals == 0 {
        return value.to_string();
    }

    let multiplier = U256::from(10u8).pow(U256::from(decimals));
    let whole = value / multiplier;
    let fraction = (value % multiplier).to_string();

    let padded = format!("{:0>width$}", fraction, width = decimals as usize);
    let trimmed = padded.trim_end_matches('0');
    let fraction = if trimmed.is_empty() { "0" } else { trimmed };

    format!("{}.{}", whole, fraction)
}

/// Converts an on-chain integer to a native one, refusing anything above 2^53 - 1.
pub fn to_safe_integer(value: U256, field: &'static str) -> Result<u64, DashboardError> {
    if value > U256::from(MAX_SAFE_INTEGER) {
        return Err(DashboardError::PriceOrIdOverflow {
            field,
            value: value.to_string(),
        });
    }
    // Bounded above by MAX_SAFE_INTEGER, so it fits.
    Ok(value.to::<u64>())
}
