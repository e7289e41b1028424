use chrono::NaiveDateTime;
use std::fmt::Display;
use std::hash::Hash;
use std::hash::Hasher;

/// A single cell value in a [`Table`](crate::table::Table).
///
/// `Missing` models an absent cell (an empty CSV field or an omitted
/// spreadsheet cell). Numbers are kept as doubles, matching how both
/// CSV inference and XLSX storage treat numeric data.
#[derive(Clone, Debug, Default)]
pub enum Value {
    #[default]
    Missing,
    /// Boolean values (true/false)
    Bool(bool),
    /// Numeric values
    Number(f64),
    /// Free-form text values
    Text(String),
    /// Date/time values
    DateTime(NaiveDateTime),
}

impl Value {
    /// Infers a value from a raw CSV field.
    ///
    /// Empty fields are missing; `true`/`false` (any case) are booleans;
    /// anything `f64` can parse is a number; everything else stays text.
    pub fn parse(field: &str) -> Value {
        if field.is_empty() {
            Value::Missing
        } else if field.eq_ignore_ascii_case("true") {
            Value::Bool(true)
        } else if field.eq_ignore_ascii_case("false") {
            Value::Bool(false)
        } else if let Ok(number) = field.parse::<f64>() {
            Value::Number(number)
        } else {
            Value::Text(field.to_owned())
        }
    }

    /// Returns true if the cell is absent.
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    /// Returns true if the cell holds a number.
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    /// Extracts the numeric value if the cell holds one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(number) => Some(*number),
            _ => None,
        }
    }
}

/// Equality compares numbers by bit pattern so rows containing doubles can be
/// hashed for duplicate detection without an epsilon policy.
impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Missing, Value::Missing) => true,
            (Value::Bool(left), Value::Bool(right)) => left == right,
            (Value::Number(left), Value::Number(right)) => left.to_bits() == right.to_bits(),
            (Value::Text(left), Value::Text(right)) => left == right,
            (Value::DateTime(left), Value::DateTime(right)) => left == right,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        core::mem::discriminant(self).hash(state);
        match self {
            Value::Missing => (),
            Value::Bool(value) => value.hash(state),
            Value::Number(value) => value.to_bits().hash(state),
            Value::Text(value) => value.hash(state),
            Value::DateTime(value) => value.hash(state),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Missing => Ok(()),
            Value::Bool(value) => write!(f, "{}", value),
            Value::Number(value) => write!(f, "{}", value),
            Value::Text(value) => write!(f, "{}", value),
            Value::DateTime(value) => write!(f, "{}", value.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn parse_inference() {
        assert_eq!(Value::parse(""), Value::Missing);
        assert_eq!(Value::parse("true"), Value::Bool(true));
        assert_eq!(Value::parse("FALSE"), Value::Bool(false));
        assert_eq!(Value::parse("42"), Value::Number(42.0));
        assert_eq!(Value::parse("-3.5"), Value::Number(-3.5));
        assert_eq!(Value::parse("1e3"), Value::Number(1000.0));
        assert_eq!(Value::parse("hello"), Value::Text("hello".to_owned()));
        assert_eq!(Value::parse("1,5"), Value::Text("1,5".to_owned()));
    }

    #[test]
    fn number_equality_by_bits() {
        assert_eq!(Value::Number(5.0), Value::Number(5.0));
        assert_ne!(Value::Number(5.0), Value::Number(5.000001));
        assert_ne!(Value::Number(0.0), Value::Missing);
        // NaN equals itself under bitwise comparison, so a row of NaNs
        // still counts as a duplicate of an identical earlier row.
        assert_eq!(Value::Number(f64::NAN), Value::Number(f64::NAN));
    }

    #[test]
    fn display() {
        assert_eq!(Value::Missing.to_string(), "");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::Number(5.0).to_string(), "5");
        assert_eq!(Value::Number(5.5).to_string(), "5.5");
        assert_eq!(Value::Text("x".to_owned()).to_string(), "x");

        let datetime = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(13, 30, 0)
            .unwrap();
        assert_eq!(Value::DateTime(datetime).to_string(), "2024-03-01 13:30:00");
    }
}
