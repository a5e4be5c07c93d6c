use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

const MAX_TICKER_LEN: usize = 20;

/// Ticker the backend model is trained on.
pub const DEFAULT_TICKER: &str = "GGRM.JK";

/// Exchange ticker, trimmed and uppercased (`ggrm.jk` becomes `GGRM.JK`).
///
/// Yahoo symbols such as `^JKSE` or `IDR=X` are accepted as-is; the backend
/// decides whether it knows them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ticker(String);

impl Ticker {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let normalized = input.trim().to_ascii_uppercase();
        if normalized.is_empty() {
            return Err(ValidationError::EmptySymbol);
        }

        let len = normalized.chars().count();
        if len > MAX_TICKER_LEN {
            return Err(ValidationError::SymbolTooLong {
                len,
                max: MAX_TICKER_LEN,
            });
        }

        if let Some((index, ch)) = normalized
            .char_indices()
            .find(|(_, ch)| ch.is_whitespace() || ch.is_control())
        {
            return Err(ValidationError::SymbolInvalidChar { ch, index });
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Percent-encoded form for use inside a URL path or query.
    pub fn encoded(&self) -> String {
        urlencoding::encode(&self.0).into_owned()
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Self(String::from(DEFAULT_TICKER))
    }
}

impl Display for Ticker {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Ticker {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for Ticker {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Ticker> for String {
    fn from(value: Ticker) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_exchange_suffixed_ticker() {
        let parsed = Ticker::parse(" ggrm.jk ").expect("ticker should parse");
        assert_eq!(parsed.as_str(), "GGRM.JK");
        assert_eq!(parsed, Ticker::default());
    }

    #[test]
    fn rejects_blank_input() {
        assert_eq!(Ticker::parse("   "), Err(ValidationError::EmptySymbol));
    }

    #[test]
    fn accepts_index_and_currency_symbols() {
        let index = Ticker::parse("^jkse").expect("index symbol should parse");
        assert_eq!(index.as_str(), "^JKSE");
        assert_eq!(index.encoded(), "%5EJKSE");

        let currency = Ticker::parse("IDR=X").expect("currency symbol should parse");
        assert_eq!(currency.encoded(), "IDR%3DX");
    }

    #[test]
    fn path_separators_stay_inside_one_segment() {
        let ticker = Ticker::parse("../status").expect("backend decides");
        assert_eq!(ticker.encoded(), "..%2FSTATUS");
    }

    #[test]
    fn rejects_inner_whitespace_and_overlong_input() {
        let err = Ticker::parse("GGRM JK").expect_err("must fail");
        assert_eq!(err, ValidationError::SymbolInvalidChar { ch: ' ', index: 4 });

        let err = Ticker::parse(&"A".repeat(21)).expect_err("must fail");
        assert_eq!(err, ValidationError::SymbolTooLong { len: 21, max: 20 });
    }

    #[test]
    fn encoded_form_keeps_unreserved_characters() {
        let ticker = Ticker::parse("BRK-B").expect("ticker should parse");
        assert_eq!(ticker.encoded(), "BRK-B");
    }
}
