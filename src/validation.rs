//! Form Validation
//!
//! Only what the forms need before submitting: required text and
//! non-negative numbers. The backend owns every other rule.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("{0} must be a number")]
    NotANumber(&'static str),
    #[error("{0} cannot be negative")]
    Negative(&'static str),
    #[error("{0} is too large")]
    TooLarge(&'static str),
    #[error("{0} is not a valid date")]
    InvalidDate(&'static str),
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: &'static str, min: i64, max: i64 },
}

impl FieldError {
    pub fn field(&self) -> &'static str {
        match self {
            FieldError::Required(f)
            | FieldError::NotANumber(f)
            | FieldError::Negative(f)
            | FieldError::TooLarge(f)
            | FieldError::InvalidDate(f) => f,
            FieldError::OutOfRange { field, .. } => field,
        }
    }
}

pub type FieldResult<T> = Result<T, FieldError>;

/// Collected errors for one form submission
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormErrors(Vec<FieldError>);

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the error (if any) and pass the value through
    pub fn check<T: Default>(&mut self, result: FieldResult<T>) -> T {
        match result {
            Ok(v) => v,
            Err(e) => {
                self.0.push(e);
                T::default()
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn for_field(&self, field: &str) -> Option<String> {
        self.0.iter().find(|e| e.field() == field).map(|e| e.to_string())
    }

    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }
}

pub fn require(field: &'static str, value: &str) -> FieldResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(FieldError::Required(field))
    } else {
        Ok(trimmed.to_string())
    }
}

/// Largest amount or quantity a form accepts (one thousand crore)
pub const MAX_AMOUNT: f64 = 1e10;

pub fn non_negative(field: &'static str, raw: &str) -> FieldResult<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(FieldError::Required(field));
    }
    let value: f64 = raw.parse().map_err(|_| FieldError::NotANumber(field))?;
    if !value.is_finite() {
        return Err(FieldError::NotANumber(field));
    }
    if value < 0.0 {
        return Err(FieldError::Negative(field));
    }
    if value > MAX_AMOUNT {
        return Err(FieldError::TooLarge(field));
    }
    Ok(value)
}

/// Blank is allowed and means zero
pub fn optional_non_negative(field: &'static str, raw: &str) -> FieldResult<f64> {
    if raw.trim().is_empty() {
        Ok(0.0)
    } else {
        non_negative(field, raw)
    }
}

pub fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

pub fn year_in_range(field: &'static str, raw: &str, min: i32, max: i32) -> FieldResult<Option<i32>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    let year: i32 = raw.parse().map_err(|_| FieldError::NotANumber(field))?;
    if year < min || year > max {
        return Err(FieldError::OutOfRange { field, min: min as i64, max: max as i64 });
    }
    Ok(Some(year))
}

/// `<input type="date">` value, "YYYY-MM-DD"
pub fn date(field: &'static str, raw: &str) -> FieldResult<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(FieldError::Required(field));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| FieldError::InvalidDate(field))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_trims() {
        assert_eq!(require("Name", "  Ravi "), Ok("Ravi".to_string()));
        assert_eq!(require("Name", "   "), Err(FieldError::Required("Name")));
    }

    #[test]
    fn test_non_negative() {
        assert_eq!(non_negative("Price", "12.5"), Ok(12.5));
        assert_eq!(non_negative("Price", "0"), Ok(0.0));
        assert_eq!(non_negative("Price", "-1"), Err(FieldError::Negative("Price")));
        assert_eq!(non_negative("Price", "ten"), Err(FieldError::NotANumber("Price")));
        assert_eq!(non_negative("Price", "inf"), Err(FieldError::NotANumber("Price")));
        assert_eq!(optional_non_negative("Discount", ""), Ok(0.0));
    }

    #[test]
    fn test_absurd_amounts_rejected() {
        assert_eq!(optional_non_negative("Parking", "1e300"), Err(FieldError::TooLarge("Parking")));
        assert_eq!(non_negative("Quantity", "1e20"), Err(FieldError::TooLarge("Quantity")));
        assert_eq!(non_negative("Price", "9999999999"), Ok(9_999_999_999.0));
    }

    #[test]
    fn test_year_range() {
        assert_eq!(year_in_range("Year", "", 1950, 2030), Ok(None));
        assert_eq!(year_in_range("Year", "2019", 1950, 2030), Ok(Some(2019)));
        assert!(year_in_range("Year", "1890", 1950, 2030).is_err());
    }

    #[test]
    fn test_form_errors_collects_per_field() {
        let mut errors = FormErrors::new();
        let name = errors.check(require("Name", ""));
        let price = errors.check(non_negative("Price", "-3"));
        assert_eq!(name, "");
        assert_eq!(price, 0.0);
        assert!(!errors.is_empty());
        assert_eq!(errors.for_field("Price").as_deref(), Some("Price cannot be negative"));
        assert_eq!(errors.messages().len(), 2);
        assert_eq!(errors.for_field("Phone"), None);
    }

    #[test]
    fn test_date_input() {
        assert_eq!(date("Date", "2026-10-19"), Ok(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()));
        assert_eq!(date("Date", ""), Err(FieldError::Required("Date")));
        assert_eq!(date("Date", "19/10/2026"), Err(FieldError::InvalidDate("Date")));
    }
}
