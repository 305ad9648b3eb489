//! Quoted bond identifiers.
//!
//! Government bonds in the price history are named by issuer, coupon and
//! maturity month, e.g. `"CAN 2.25 Mar 24"`: a 2.25% coupon Government of
//! Canada bond maturing on 1 March 2024.

use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use termstruct_core::Date;

use crate::error::ParseError;

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// A parsed `"<ISSUER> <COUPON> <MON> <YY>"` bond identifier.
///
/// The coupon is kept as the exact decimal that was quoted (percent of
/// face value per year) so that the identifier displays exactly as parsed.
///
/// # Example
///
/// ```
/// use termstruct_bonds::BondIdentifier;
/// use termstruct_core::Date;
///
/// let id: BondIdentifier = "CAN 2.25 Mar 24".parse().unwrap();
/// assert_eq!(id.issuer(), "CAN");
/// assert_eq!(id.coupon_rate(), 0.0225);
/// assert_eq!(id.maturity(), Date::from_ymd(2024, 3, 1).unwrap());
/// assert_eq!(id.to_string(), "CAN 2.25 Mar 24");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BondIdentifier {
    issuer: String,
    coupon: Decimal,
    maturity: Date,
}

impl BondIdentifier {
    /// Parses an identifier.
    ///
    /// Two-digit years follow the POSIX `%y` pivot: `69`-`99` map to
    /// 1969-1999 and `00`-`68` to 2000-2068. The maturity is the first day
    /// of the quoted month. Month abbreviations are case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] naming the first token that does not fit.
    pub fn parse(identifier: &str) -> Result<Self, ParseError> {
        let tokens: Vec<&str> = identifier.split_whitespace().collect();
        let &[issuer, coupon, month, year] = tokens.as_slice() else {
            return Err(ParseError::TokenCount {
                identifier: identifier.to_string(),
                found: tokens.len(),
            });
        };

        let coupon = parse_coupon(coupon).ok_or_else(|| ParseError::InvalidCoupon {
            identifier: identifier.to_string(),
            token: coupon.to_string(),
        })?;
        let month = parse_month(month).ok_or_else(|| ParseError::InvalidMonth {
            identifier: identifier.to_string(),
            token: month.to_string(),
        })?;
        let year = parse_year(year).ok_or_else(|| ParseError::InvalidYear {
            identifier: identifier.to_string(),
            token: year.to_string(),
        })?;

        // Day 1 of a valid month in 1969-2068 always exists
        let maturity = Date::from_ymd(year, month, 1).map_err(|_| ParseError::InvalidYear {
            identifier: identifier.to_string(),
            token: year.to_string(),
        })?;

        Ok(Self {
            issuer: issuer.to_string(),
            coupon,
            maturity,
        })
    }

    /// Issuer token, e.g. `"CAN"`.
    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Coupon exactly as quoted, in percent per year.
    pub fn coupon_percent(&self) -> Decimal {
        self.coupon
    }

    /// Annual coupon rate as a fraction of face value (`2.25` becomes `0.0225`).
    pub fn coupon_rate(&self) -> f64 {
        self.coupon.to_f64().unwrap_or(0.0) / 100.0
    }

    /// Maturity date: the first day of the quoted month.
    pub fn maturity(&self) -> Date {
        self.maturity
    }
}

fn parse_coupon(token: &str) -> Option<Decimal> {
    if !token.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }
    Decimal::from_str(token).ok()
}

fn parse_month(token: &str) -> Option<u32> {
    MONTH_ABBREVIATIONS
        .iter()
        .position(|m| m.eq_ignore_ascii_case(token))
        .map(|i| i as u32 + 1)
}

/// First two-digit year read as 19xx.
const CENTURY_PIVOT: i32 = 69;

fn parse_year(token: &str) -> Option<i32> {
    if token.len() != 2 || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let yy = token.parse::<i32>().ok()?;
    Some(if yy >= CENTURY_PIVOT { 1900 + yy } else { 2000 + yy })
}

impl fmt::Display for BondIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let month = MONTH_ABBREVIATIONS[self.maturity.month() as usize - 1];
        write!(
            f,
            "{} {} {} {:02}",
            self.issuer,
            self.coupon,
            month,
            self.maturity.year() % 100
        )
    }
}

impl FromStr for BondIdentifier {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for BondIdentifier {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<BondIdentifier> for String {
    fn from(id: BondIdentifier) -> Self {
        id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_canada_bond() {
        let id = BondIdentifier::parse("CAN 2.25 Mar 24").unwrap();

        assert_eq!(id.issuer(), "CAN");
        assert_eq!(id.coupon_percent(), dec!(2.25));
        assert!((id.coupon_rate() - 0.0225).abs() < 1e-15);
        assert_eq!(id.maturity(), Date::from_ymd(2024, 3, 1).unwrap());
    }

    #[test]
    fn test_parse_basket() {
        let cases = [
            ("CAN 1.5 Sep 24", 0.015, (2024, 9)),
            ("CAN 0.25 Mar 26", 0.0025, (2026, 3)),
            ("CAN 1.0 Sep 26", 0.01, (2026, 9)),
            ("CAN 3.25 Sep 28", 0.0325, (2028, 9)),
        ];

        for (text, rate, (year, month)) in cases {
            let id: BondIdentifier = text.parse().unwrap();
            assert!((id.coupon_rate() - rate).abs() < 1e-15, "{text}");
            assert_eq!(id.maturity(), Date::from_ymd(year, month, 1).unwrap());
            assert_eq!(id.to_string(), text);
        }
    }

    #[test]
    fn test_month_case_insensitive_and_extra_whitespace() {
        let id = BondIdentifier::parse("  CAN   0.5 sEP 25 ").unwrap();

        assert_eq!(id.maturity(), Date::from_ymd(2025, 9, 1).unwrap());
        assert_eq!(id.to_string(), "CAN 0.5 Sep 25");
    }

    #[test]
    fn test_zero_coupon_and_year_boundaries() {
        let id = BondIdentifier::parse("CAN 0 Jan 00").unwrap();
        assert_eq!(id.coupon_rate(), 0.0);
        assert_eq!(id.maturity(), Date::from_ymd(2000, 1, 1).unwrap());

        let id = BondIdentifier::parse("CAN 4 Dec 99").unwrap();
        assert_eq!(id.maturity(), Date::from_ymd(1999, 12, 1).unwrap());
        assert_eq!(id.to_string(), "CAN 4 Dec 99");

        let id = BondIdentifier::parse("CAN 4 Jun 69").unwrap();
        assert_eq!(id.maturity(), Date::from_ymd(1969, 6, 1).unwrap());

        let id = BondIdentifier::parse("CAN 4 Jun 68").unwrap();
        assert_eq!(id.maturity(), Date::from_ymd(2068, 6, 1).unwrap());
    }

    #[test]
    fn test_token_count() {
        assert!(matches!(
            BondIdentifier::parse("CAN 2.25 Mar"),
            Err(ParseError::TokenCount { found: 3, .. })
        ));
        assert!(matches!(
            BondIdentifier::parse("CAN 2.25 Mar 24 extra"),
            Err(ParseError::TokenCount { found: 5, .. })
        ));
        assert!(matches!(
            BondIdentifier::parse(""),
            Err(ParseError::TokenCount { found: 0, .. })
        ));
    }

    #[test]
    fn test_invalid_tokens() {
        assert!(matches!(
            BondIdentifier::parse("CAN abc Mar 24"),
            Err(ParseError::InvalidCoupon { .. })
        ));
        assert!(matches!(
            BondIdentifier::parse("CAN -1.0 Mar 24"),
            Err(ParseError::InvalidCoupon { .. })
        ));
        assert!(matches!(
            BondIdentifier::parse("CAN 2.25 March 24"),
            Err(ParseError::InvalidMonth { .. })
        ));
        assert!(matches!(
            BondIdentifier::parse("CAN 2.25 Mar 2024"),
            Err(ParseError::InvalidYear { .. })
        ));
        assert!(matches!(
            BondIdentifier::parse("CAN 2.25 Mar 2x"),
            Err(ParseError::InvalidYear { .. })
        ));
    }

    #[test]
    fn test_serde_as_string() {
        let id = BondIdentifier::parse("CAN 2.75 Sep 27").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"CAN 2.75 Sep 27\"");

        let back: BondIdentifier = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
        assert!(serde_json::from_str::<BondIdentifier>("\"CAN Mar 27\"").is_err());
    }
}
