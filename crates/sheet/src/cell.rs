use std::fmt;

/// Represents a cell value in a sheet
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl CellValue {
    /// Check if the value is null
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Read the value as a number.
    ///
    /// Integers, non-NaN floats and numeric text are numbers. Booleans,
    /// nulls and anything else are not.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Int(i) => Some(*i as f64),
            CellValue::Float(f) if !f.is_nan() => Some(*f),
            CellValue::String(s) => s.trim().parse::<f64>().ok().filter(|f| !f.is_nan()),
            _ => None,
        }
    }

    /// Coerce the value into a numeric cell.
    ///
    /// Anything that does not read as a number becomes `Null`; this never fails.
    #[must_use]
    pub fn to_numeric(&self) -> CellValue {
        match self {
            CellValue::Int(i) => CellValue::Int(*i),
            CellValue::String(s) => {
                let trimmed = s.trim();
                if let Ok(i) = trimmed.parse::<i64>() {
                    return CellValue::Int(i);
                }
                self.as_number().map_or(CellValue::Null, CellValue::Float)
            }
            other => other.as_number().map_or(CellValue::Null, CellValue::Float),
        }
    }

    /// Get the value as a string
    #[must_use]
    pub fn as_str(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Int(i) => i.to_string(),
            CellValue::Float(f) => f.to_string(),
            CellValue::String(s) => s.clone(),
        }
    }

    /// Parse a string into a `CellValue` with type inference
    /// Tries: null -> bool -> int -> float -> string
    #[must_use]
    pub fn parse(s: &str) -> CellValue {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return CellValue::Null;
        }

        // "1"/"0" are parsed as Int, not Bool
        match trimmed.to_lowercase().as_str() {
            "true" | "yes" => return CellValue::Bool(true),
            "false" | "no" => return CellValue::Bool(false),
            _ => {}
        }

        if let Ok(i) = trimmed.parse::<i64>() {
            return CellValue::Int(i);
        }

        if let Ok(f) = trimmed.parse::<f64>() {
            return CellValue::Float(f);
        }

        CellValue::String(s.to_string())
    }
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Null
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => write!(f, ""),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Int(i) => write!(f, "{i}"),
            CellValue::Float(fl) => write!(f, "{fl}"),
            CellValue::String(s) => write!(f, "{s}"),
        }
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Int(i)
    }
}

impl From<i32> for CellValue {
    fn from(i: i32) -> Self {
        CellValue::Int(i64::from(i))
    }
}

impl From<f64> for CellValue {
    fn from(f: f64) -> Self {
        CellValue::Float(f)
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => CellValue::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_null() {
        assert_eq!(CellValue::parse(""), CellValue::Null);
        assert_eq!(CellValue::parse("  "), CellValue::Null);
    }

    #[test]
    fn test_parse_numbers() {
        assert_eq!(CellValue::parse("42"), CellValue::Int(42));
        assert_eq!(CellValue::parse("-2.5"), CellValue::Float(-2.5));
        assert_eq!(CellValue::parse("inf"), CellValue::Float(f64::INFINITY));
    }

    #[test]
    fn test_parse_string() {
        assert_eq!(
            CellValue::parse("Brake Pad"),
            CellValue::String("Brake Pad".to_string())
        );
    }

    #[test]
    fn test_to_numeric() {
        assert_eq!(CellValue::from(" 12 ").to_numeric(), CellValue::Int(12));
        assert_eq!(CellValue::from("12.5").to_numeric(), CellValue::Float(12.5));
        assert_eq!(CellValue::from("n/a").to_numeric(), CellValue::Null);
        assert_eq!(CellValue::from("NaN").to_numeric(), CellValue::Null);
        assert_eq!(CellValue::Float(f64::NAN).to_numeric(), CellValue::Null);
        assert_eq!(CellValue::Bool(true).to_numeric(), CellValue::Null);
        assert_eq!(CellValue::Float(3.0).to_numeric(), CellValue::Float(3.0));
        assert_eq!(CellValue::Null.to_numeric(), CellValue::Null);
    }

    #[test]
    fn test_as_number() {
        assert_eq!(CellValue::Int(7).as_number(), Some(7.0));
        assert_eq!(CellValue::from("7.5").as_number(), Some(7.5));
        assert_eq!(CellValue::Bool(true).as_number(), None);
        assert_eq!(CellValue::Float(f64::NAN).as_number(), None);
        assert_eq!(CellValue::Null.as_number(), None);
    }

    #[test]
    fn test_display_floats() {
        assert_eq!(CellValue::Float(120.0).to_string(), "120");
        assert_eq!(CellValue::Float(20.5).to_string(), "20.5");
        assert_eq!(CellValue::Float(f64::INFINITY).to_string(), "inf");
        assert_eq!(CellValue::Float(f64::NEG_INFINITY).to_string(), "-inf");
    }
}
