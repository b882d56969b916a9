// flux-common/src/dto/currency.rs

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Currency code, always upper case ("BTC", "USDT", ...).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Currency(Cow<'static, str>);

impl Currency {
    pub const BTC: Currency = Currency(Cow::Borrowed("BTC"));
    pub const ETH: Currency = Currency(Cow::Borrowed("ETH"));
    pub const USDT: Currency = Currency(Cow::Borrowed("USDT"));
    pub const USDC: Currency = Currency(Cow::Borrowed("USDC"));

    pub fn new(code: impl AsRef<str>) -> Self {
        Currency(Cow::Owned(code.as_ref().trim().to_uppercase()))
    }

    pub fn code(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Currency {
    fn from(code: String) -> Self {
        Currency::new(code)
    }
}

impl From<&str> for Currency {
    fn from(code: &str) -> Self {
        Currency::new(code)
    }
}

impl From<Currency> for String {
    fn from(currency: Currency) -> Self {
        currency.0.into_owned()
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CurrencyPairParseError {
    #[error("Invalid currency pair '{0}': expected BASE/QUOTE")]
    Malformed(String),
}

/// A traded pair, rendered as `BASE/QUOTE`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyPair {
    pub base: Currency,
    pub quote: Currency,
}

impl CurrencyPair {
    pub fn new(base: impl Into<Currency>, quote: impl Into<Currency>) -> Self {
        Self {
            base: base.into(),
            quote: quote.into(),
        }
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

impl FromStr for CurrencyPair {
    type Err = CurrencyPairParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || CurrencyPairParseError::Malformed(s.to_string());

        let (base, quote) = s.split_once('/').ok_or_else(malformed)?;
        let (base, quote) = (base.trim(), quote.trim());

        let valid = |code: &str| !code.is_empty() && code.chars().all(char::is_alphanumeric);
        if !valid(base) || !valid(quote) {
            return Err(malformed());
        }

        Ok(CurrencyPair::new(base, quote))
    }
}

impl TryFrom<String> for CurrencyPair {
    type Error = CurrencyPairParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CurrencyPair> for String {
    fn from(pair: CurrencyPair) -> Self {
        pair.to_string()
    }
}
