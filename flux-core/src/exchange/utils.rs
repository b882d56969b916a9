// exchange/utils.rs
// Utility functions for Hyperliquid payloads

use chrono::{DateTime, Utc};
use flux_common::{Currency, CurrencyPair};
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::service::ServiceError;

/// Quote currency of every perp market
pub const PERP_QUOTE: Currency = Currency::USDC;

/// Validate a wallet address (`0x` followed by 40 hex digits)
pub fn validate_address(address: &str) -> Result<String, ServiceError> {
    let address = address.trim();
    let digits = address
        .strip_prefix("0x")
        .ok_or_else(|| ServiceError::InvalidRequest(format!("Address '{}' lacks 0x prefix", address)))?;

    if digits.len() != 40 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ServiceError::InvalidRequest(format!(
            "Address '{}' is not 20 hex-encoded bytes",
            address
        )));
    }

    Ok(address.to_lowercase())
}

/// Parse a decimal string field of an info payload
pub fn parse_decimal(field: &str, value: &str) -> Result<Decimal, ServiceError> {
    Decimal::from_str(value)
        .map_err(|e| ServiceError::Parse(format!("Invalid {} '{}': {}", field, value, e)))
}

/// Parse an epoch timestamp in milliseconds
pub fn parse_millis(field: &str, millis: u64) -> Result<DateTime<Utc>, ServiceError> {
    i64::try_from(millis)
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .ok_or_else(|| ServiceError::Parse(format!("Invalid {} '{}'", field, millis)))
}

/// Coin name as used in info requests. USDC-quoted pairs address the perp
/// market of their base coin ("BTC"), other pairs the spot market by name
/// ("ETH/BTC"). Index-addressed spot tokens ("@107") pass through.
pub fn coin_for_pair(pair: &CurrencyPair) -> String {
    if pair.quote == PERP_QUOTE || is_spot_only(&pair.base) {
        pair.base.code().to_string()
    } else {
        pair.to_string()
    }
}

/// Pair of a coin reported on an order. Spot names parse as they are
/// ("PURR/USDC"), anything else is a perp coin quoted in USDC. This is not a
/// strict inverse of `coin_for_pair`: a USDC-quoted spot pair maps back to the
/// perp coin of its base.
pub fn pair_for_coin(coin: &str) -> CurrencyPair {
    match coin.parse::<CurrencyPair>() {
        Ok(pair) => pair,
        Err(_) => CurrencyPair::new(coin, PERP_QUOTE),
    }
}

// Spot-only tokens are addressed by index ("@107") on the info API.
fn is_spot_only(currency: &Currency) -> bool {
    currency.code().starts_with('@')
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_address_validation() {
        let address = "0xAbCdEf0000000000000000000000000000000001";
        assert_eq!(
            validate_address(address).unwrap(),
            "0xabcdef0000000000000000000000000000000001"
        );
        assert!(validate_address("AbCdEf0000000000000000000000000000000001").is_err());
        assert!(validate_address("0x1234").is_err());
        assert!(validate_address("0xZZCdEf0000000000000000000000000000000001").is_err());
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("px", "29792.0").unwrap(), dec!(29792));
        assert!(matches!(
            parse_decimal("px", "n/a"),
            Err(ServiceError::Parse(_))
        ));
    }

    #[test]
    fn test_parse_millis() {
        let ts = parse_millis("time", 1_681_247_412_573).unwrap();
        assert_eq!(ts.timestamp_millis(), 1_681_247_412_573);
        assert!(parse_millis("time", u64::MAX).is_err());
    }

    #[test]
    fn test_coin_mapping() {
        let btc = CurrencyPair::new(Currency::BTC, Currency::USDC);
        assert_eq!(coin_for_pair(&btc), "BTC");
        assert_eq!(pair_for_coin("BTC"), btc);

        let purr: CurrencyPair = "PURR/USDC".parse().unwrap();
        assert_eq!(pair_for_coin("PURR/USDC"), purr);
        // USDC-quoted pairs are always looked up as perps.
        assert_eq!(coin_for_pair(&purr), "PURR");

        let eth_btc = CurrencyPair::new(Currency::ETH, Currency::BTC);
        assert_eq!(coin_for_pair(&eth_btc), "ETH/BTC");

        let indexed = pair_for_coin("@107");
        assert_eq!(indexed.quote, Currency::USDC);
        assert_eq!(coin_for_pair(&indexed), "@107");
    }
}
