//! Scalar value types and their lexical forms.

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use thiserror::Error;

use crate::schema::DataType;

/// Conversion failure for a single lexical value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValueError {
    #[error("'{0}' is not a valid xsd:int")]
    Int(String),
    #[error("'{0}' is not a valid xsd:decimal")]
    Decimal(String),
    #[error("'{0}' is not a valid xsd:double")]
    Double(String),
    /// Infinite or NaN floats have no decimal form.
    #[error("{0} cannot be stored as a decimal")]
    NonFinite(f64),
}

/// A scalar that can be stored in a schema field.
pub trait XsdValue: Sized + Clone + fmt::Debug + PartialEq + 'static {
    const DATATYPE: DataType;

    fn parse_lexical(text: &str) -> Result<Self, ValueError>;

    fn to_lexical(&self) -> String;
}

impl XsdValue for String {
    const DATATYPE: DataType = DataType::String;

    fn parse_lexical(text: &str) -> Result<Self, ValueError> {
        Ok(text.to_string())
    }

    fn to_lexical(&self) -> String {
        self.clone()
    }
}

/// `xsd:normalizedString`: tab, carriage return and line feed are replaced
/// by spaces on construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NormalizedString(String);

impl NormalizedString {
    pub fn new(text: impl Into<String>) -> Self {
        let mut text = text.into();
        if text.contains(['\t', '\r', '\n']) {
            text = text.replace(['\t', '\r', '\n'], " ");
        }
        NormalizedString(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Deref for NormalizedString {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NormalizedString {
    fn from(text: &str) -> Self {
        NormalizedString::new(text)
    }
}

impl From<String> for NormalizedString {
    fn from(text: String) -> Self {
        NormalizedString::new(text)
    }
}

impl fmt::Display for NormalizedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl XsdValue for NormalizedString {
    const DATATYPE: DataType = DataType::NormalizedString;

    fn parse_lexical(text: &str) -> Result<Self, ValueError> {
        Ok(NormalizedString::new(text))
    }

    fn to_lexical(&self) -> String {
        self.0.clone()
    }
}

impl XsdValue for i32 {
    const DATATYPE: DataType = DataType::Int;

    fn parse_lexical(text: &str) -> Result<Self, ValueError> {
        text.trim()
            .parse::<i32>()
            .map_err(|_| ValueError::Int(text.to_string()))
    }

    fn to_lexical(&self) -> String {
        self.to_string()
    }
}

/// `xsd:decimal` kept in its lexical form so no digit is ever lost.
///
/// Equality is lexical: `"1.50"` and `"1.5"` are different values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Decimal(String);

impl Decimal {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Nearest `f64`; precision beyond 17 significant digits is dropped.
    pub fn to_f64(&self) -> f64 {
        self.0.parse::<f64>().unwrap_or(f64::NAN)
    }

    /// Shortest decimal that reads back as `value`.
    pub fn from_f64(value: f64) -> Result<Self, ValueError> {
        if !value.is_finite() {
            return Err(ValueError::NonFinite(value));
        }
        Ok(Decimal(format!("{value}")))
    }
}

impl FromStr for Decimal {
    type Err = ValueError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let trimmed = text.trim();
        let unsigned = trimmed
            .strip_prefix(['+', '-'])
            .unwrap_or(trimmed);
        let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if int_part.len() + frac_part.len() == 0 || !all_digits(int_part) || !all_digits(frac_part)
        {
            return Err(ValueError::Decimal(text.to_string()));
        }
        Ok(Decimal(trimmed.to_string()))
    }
}

impl TryFrom<f64> for Decimal {
    type Error = ValueError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Decimal::from_f64(value)
    }
}

impl From<i32> for Decimal {
    fn from(value: i32) -> Self {
        Decimal(value.to_string())
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl XsdValue for Decimal {
    const DATATYPE: DataType = DataType::Decimal;

    fn parse_lexical(text: &str) -> Result<Self, ValueError> {
        text.parse()
    }

    fn to_lexical(&self) -> String {
        self.0.clone()
    }
}

impl XsdValue for f64 {
    const DATATYPE: DataType = DataType::Double;

    fn parse_lexical(text: &str) -> Result<Self, ValueError> {
        let trimmed = text.trim();
        match trimmed {
            "INF" | "+INF" => return Ok(f64::INFINITY),
            "-INF" => return Ok(f64::NEG_INFINITY),
            "NaN" => return Ok(f64::NAN),
            _ => {}
        }
        // Rust also accepts "inf", "nan" and "infinity"; xsd:double does not.
        if trimmed
            .bytes()
            .any(|b| b.is_ascii_alphabetic() && b != b'e' && b != b'E')
        {
            return Err(ValueError::Double(text.to_string()));
        }
        trimmed
            .parse::<f64>()
            .map_err(|_| ValueError::Double(text.to_string()))
    }

    fn to_lexical(&self) -> String {
        if self.is_nan() {
            "NaN".to_string()
        } else if *self == f64::INFINITY {
            "INF".to_string()
        } else if *self == f64::NEG_INFINITY {
            "-INF".to_string()
        } else {
            format!("{self:?}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ints_accept_sign_and_whitespace() {
        assert_eq!(i32::parse_lexical(" +12 ").unwrap(), 12);
        assert_eq!(i32::parse_lexical("-3").unwrap(), -3);
        assert_eq!(i32::parse_lexical("0").unwrap(), 0);
        assert!(matches!(i32::parse_lexical("1.5"), Err(ValueError::Int(_))));
        assert!(i32::parse_lexical("").is_err());
        assert!(i32::parse_lexical("2147483648").is_err());
    }

    #[test]
    fn decimal_keeps_every_digit() {
        let value: Decimal = "12.345678901234567890".parse().unwrap();
        assert_eq!(value.to_lexical(), "12.345678901234567890");
        assert_eq!(" -0.50 ".parse::<Decimal>().unwrap().as_str(), "-0.50");
        assert_eq!("5.".parse::<Decimal>().unwrap().as_str(), "5.");
        assert_eq!(".5".parse::<Decimal>().unwrap().as_str(), ".5");
    }

    #[test]
    fn decimal_rejects_non_decimals() {
        for bad in ["", ".", "+", "1e5", "1.2.3", "abc", "1 2", "INF"] {
            assert!(bad.parse::<Decimal>().is_err(), "{bad:?} accepted");
        }
    }

    #[test]
    fn decimal_float_conversions() {
        let centre: Decimal = "1024.25".parse().unwrap();
        assert_eq!(centre.to_f64(), 1024.25);
        assert_eq!(Decimal::try_from(0.1).unwrap().as_str(), "0.1");
        assert_eq!(Decimal::try_from(-3.0).unwrap().as_str(), "-3");
        assert!(matches!(
            Decimal::try_from(f64::INFINITY),
            Err(ValueError::NonFinite(_))
        ));
        assert_eq!(Decimal::from(7).as_str(), "7");
    }

    #[test]
    fn double_lexical_forms() {
        assert_eq!(f64::parse_lexical("INF").unwrap(), f64::INFINITY);
        assert_eq!(f64::parse_lexical("-INF").unwrap(), f64::NEG_INFINITY);
        assert!(f64::parse_lexical("NaN").unwrap().is_nan());
        assert_eq!(f64::parse_lexical("1.5E3").unwrap(), 1500.0);
        assert!(f64::parse_lexical("inf").is_err());
        assert!(f64::parse_lexical("nan").is_err());
        assert!(f64::parse_lexical("").is_err());
        assert_eq!(f64::INFINITY.to_lexical(), "INF");
        assert_eq!(f64::NEG_INFINITY.to_lexical(), "-INF");
        assert_eq!(2.0f64.to_lexical(), "2.0");
        assert_eq!(f64::parse_lexical(&0.1f64.to_lexical()).unwrap(), 0.1);
    }

    #[test]
    fn normalized_string_replaces_line_breaks() {
        let value = NormalizedString::parse_lexical("a\tb\r\nc").unwrap();
        assert_eq!(value.as_str(), "a b  c");
        assert_eq!(NormalizedString::from("plain").to_lexical(), "plain");
    }

    #[test]
    fn strings_are_preserved() {
        assert_eq!(String::parse_lexical(" a\tb ").unwrap(), " a\tb ");
    }
}
