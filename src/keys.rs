//! Ethereum address validation and parsing.

use alloy_primitives::Address;

/// Check if a given string is a valid Ethereum address.
pub fn is_valid_eth_address(address: &str) -> bool {
    // Must be 42 characters: "0x" + 40 hex digits
    if address.len() != 42 {
        return false;
    }

    if !address.starts_with("0x") && !address.starts_with("0X") {
        return false;
    }

    address[2..].chars().all(|c| c.is_ascii_hexdigit())
}

/// Parse a 0x-prefixed address string. Checksum casing is not enforced.
pub fn parse_address(address: &str) -> Result<Address, String> {
    let trimmed = address.trim();
    if trimmed.is_empty() {
        return Err("address is not set".to_string());
    }
    if !is_valid_eth_address(trimmed) {
        return Err(format!(
            "invalid Ethereum address {:?}: expected a 42-character hex string starting with '0x'",
            trimmed
        ));
    }
    trimmed[2..]
        .parse::<Address>()
        .map_err(|e| format!("invalid Ethereum address {:?}: {}", trimmed, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// Validation should be case-insensitive for hex digits.
    fn valid_mixed_case() {
        assert!(is_valid_eth_address(
            "0x52908400098527886E0F7030069857D2E4169EE7"
        ));
        assert!(is_valid_eth_address(
            "0xde709f2102306220921060314715629080e2fb77"
        ));
    }

    #[test]
    /// Validation should be case-insensitive for prefix "0x".
    fn valid_uppercase_prefix() {
        assert!(is_valid_eth_address(
            "0X52908400098527886E0F7030069857D2E4169EE7"
        ));
    }

    #[test]
    fn invalid_length_or_chars() {
        assert!(!is_valid_eth_address("0x123"));
        assert!(!is_valid_eth_address(
            "0xZ2908400098527886E0F7030069857D2E4169EE7"
        ));
        assert!(!is_valid_eth_address(
            "52908400098527886E0F7030069857D2E4169EE7"
        ));
    }

    #[test]
    fn parse_round_trips_to_checksum() {
        let address = parse_address("0x5fbdb2315678afecb367f032d93f642f64180aa3").unwrap();
        assert_eq!(
            address.to_string(),
            "0x5FbDB2315678afecb367f032d93F642f64180aa3"
        );
    }

    #[test]
    fn parse_rejects_empty_and_malformed() {
        assert_eq!(parse_address("  ").unwrap_err(), "address is not set");
        assert!(parse_address("0x1234").is_err());
    }
}
