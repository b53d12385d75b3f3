//! Value amounts.
//!
//! Amounts are denominated in atto-AGR (10^-18 AGR) and carried as `u128`.
//! The RPC wire and config files use decimal strings since u128 does not
//! fit in a JSON number.

use crate::error::TypesError;

/// Value in atto-AGR.
pub type Amount = u128;

/// Decimal places of the base unit.
pub const DECIMALS: u32 = 18;

/// Ticker symbol used in human-readable output.
pub const SYMBOL: &str = "AGR";

/// One whole AGR in atto-AGR.
pub const ONE: Amount = 10u128.pow(DECIMALS);

/// Format an atto-AGR amount as a decimal AGR string, trimming trailing
/// zeros: `10_000_000_000_000_000` -> `"0.01"`.
pub fn format_amount(amount: Amount) -> String {
    let whole = amount / ONE;
    let frac = amount % ONE;
    if frac == 0 {
        return whole.to_string();
    }
    let frac = format!("{:018}", frac);
    format!("{}.{}", whole, frac.trim_end_matches('0'))
}

/// Parse a decimal AGR string into atto-AGR.
///
/// Accepts an optional fractional part of up to 18 digits: `"0.01"`,
/// `"3"`, `"1.5"`.
pub fn parse_amount(s: &str) -> Result<Amount, TypesError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(TypesError::InvalidAmount("empty string".to_string()));
    }

    let (whole, frac) = match s.split_once('.') {
        Some((w, f)) => (w, f),
        None => (s, ""),
    };

    if frac.len() > DECIMALS as usize {
        return Err(TypesError::InvalidAmount(format!(
            "more than {} fractional digits: '{}'",
            DECIMALS, s
        )));
    }

    let whole: Amount = if whole.is_empty() {
        0
    } else {
        whole
            .parse()
            .map_err(|_| TypesError::InvalidAmount(format!("bad integer part: '{}'", s)))?
    };

    let frac: Amount = if frac.is_empty() {
        0
    } else {
        let scaled = format!("{:0<18}", frac);
        scaled
            .parse()
            .map_err(|_| TypesError::InvalidAmount(format!("bad fractional part: '{}'", s)))?
    };

    whole
        .checked_mul(ONE)
        .and_then(|w| w.checked_add(frac))
        .ok_or_else(|| TypesError::InvalidAmount(format!("overflow: '{}'", s)))
}

/// Serde adapter carrying an [`Amount`] as a decimal AGR string, for TOML
/// config files and the RPC wire.
pub mod serde_string {
    use super::{format_amount, parse_amount, Amount};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(amount: &Amount, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_amount(*amount))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Amount, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_amount(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_format() {
        assert_eq!(format_amount(0), "0");
        assert_eq!(format_amount(ONE), "1");
        assert_eq!(format_amount(ONE / 100), "0.01");
        assert_eq!(format_amount(ONE + ONE / 2), "1.5");
        assert_eq!(format_amount(1), "0.000000000000000001");
    }

    #[test]
    fn test_parse() {
        assert_eq!(parse_amount("0.01").unwrap(), ONE / 100);
        assert_eq!(parse_amount("3").unwrap(), 3 * ONE);
        assert_eq!(parse_amount("1.5").unwrap(), ONE + ONE / 2);
        assert_eq!(parse_amount(".5").unwrap(), ONE / 2);
    }

    #[test]
    fn test_parse_rejects() {
        assert!(parse_amount("").is_err());
        assert!(parse_amount("abc").is_err());
        assert!(parse_amount("1.0000000000000000001").is_err());
        assert!(parse_amount("1.2.3").is_err());
    }

    proptest! {
        #[test]
        fn roundtrip_format_parse(amount in 0u128..u128::MAX / 2) {
            let s = format_amount(amount);
            prop_assert_eq!(parse_amount(&s).unwrap(), amount);
        }
    }
}
