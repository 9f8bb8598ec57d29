//! Field and cross-field validators.
//!
//! Date rules are pure predicates over a value and a reference "today",
//! each constructed with an optional custom message. A field can carry any
//! number of rules; callers collect every failure rather than stopping at
//! the first.

use chrono::{Duration, NaiveDate};

use super::{FieldError, FieldErrorCode};

/// How far ahead of today a renewal due date may lie.
pub const RENEWAL_HORIZON_WEEKS: i64 = 4;

const DEFAULT_MIN_DATE_MESSAGE: &str = "Date is in the past";
const DEFAULT_MAX_DATE_MESSAGE: &str = "Date is too far ahead";
const DEFAULT_DATE_ORDER_MESSAGE: &str = "Death date is before birth date";
const DEFAULT_DISTINCT_NAMES_MESSAGE: &str = "First name and last name can't be the same";

/// A single rule applied to one date field.
pub trait DateRule {
    fn check(&self, value: NaiveDate, today: NaiveDate) -> Result<(), FieldError>;
}

/// Run every rule attached to a field, collecting all failures.
pub fn apply_rules(
    value: NaiveDate,
    today: NaiveDate,
    rules: &[&dyn DateRule],
) -> Vec<FieldError> {
    rules
        .iter()
        .filter_map(|rule| rule.check(value, today).err())
        .collect()
}

/// Fails with `DateTooEarly` when the value lies before today.
pub struct MinDateValidator {
    message: Option<String>,
}

impl MinDateValidator {
    pub fn new() -> Self {
        Self { message: None }
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }
}

impl Default for MinDateValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl DateRule for MinDateValidator {
    fn check(&self, value: NaiveDate, today: NaiveDate) -> Result<(), FieldError> {
        if value < today {
            return Err(FieldError::new(
                FieldErrorCode::DateTooEarly,
                self.message.as_deref().unwrap_or(DEFAULT_MIN_DATE_MESSAGE),
            ));
        }
        Ok(())
    }
}

/// Fails with `DateTooLate` when the value lies beyond today plus the
/// horizon. The boundary itself is allowed.
pub struct MaxDateValidator {
    horizon_weeks: i64,
    message: Option<String>,
}

impl MaxDateValidator {
    pub fn new() -> Self {
        Self {
            horizon_weeks: RENEWAL_HORIZON_WEEKS,
            message: None,
        }
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            horizon_weeks: RENEWAL_HORIZON_WEEKS,
            message: Some(message.into()),
        }
    }

    pub fn with_horizon_weeks(mut self, weeks: i64) -> Self {
        self.horizon_weeks = weeks;
        self
    }
}

impl Default for MaxDateValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl DateRule for MaxDateValidator {
    fn check(&self, value: NaiveDate, today: NaiveDate) -> Result<(), FieldError> {
        if value > today + Duration::weeks(self.horizon_weeks) {
            return Err(FieldError::new(
                FieldErrorCode::DateTooLate,
                self.message.as_deref().unwrap_or(DEFAULT_MAX_DATE_MESSAGE),
            ));
        }
        Ok(())
    }
}

/// Cross-field: fails with `InvalidDateOrder` when both dates are present
/// and the death date precedes the birth date. Equal dates pass.
pub fn check_date_order(
    birth: Option<NaiveDate>,
    death: Option<NaiveDate>,
    message: Option<&str>,
) -> Result<(), FieldError> {
    if let (Some(birth), Some(death)) = (birth, death) {
        if death < birth {
            return Err(FieldError::new(
                FieldErrorCode::InvalidDateOrder,
                message.unwrap_or(DEFAULT_DATE_ORDER_MESSAGE),
            ));
        }
    }
    Ok(())
}

/// Cross-field: fails with `DuplicateName` when both names are non-empty
/// and identical. Comparison is exact and case-sensitive.
pub fn check_distinct_names(
    first: &str,
    last: &str,
    message: Option<&str>,
) -> Result<(), FieldError> {
    if !first.is_empty() && !last.is_empty() && first == last {
        return Err(FieldError::new(
            FieldErrorCode::DuplicateName,
            message.unwrap_or(DEFAULT_DISTINCT_NAMES_MESSAGE),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn min_date_rejects_past() {
        let rule = MinDateValidator::new();
        let err = rule
            .check(today() - Duration::days(1), today())
            .unwrap_err();
        assert_eq!(err.code, FieldErrorCode::DateTooEarly);
    }

    #[test]
    fn min_date_accepts_today_and_future() {
        let rule = MinDateValidator::new();
        assert!(rule.check(today(), today()).is_ok());
        assert!(rule.check(today() + Duration::weeks(4), today()).is_ok());
    }

    #[test]
    fn max_date_accepts_horizon_boundary() {
        let rule = MaxDateValidator::new();
        assert!(rule.check(today() + Duration::weeks(4), today()).is_ok());
    }

    #[test]
    fn max_date_rejects_beyond_horizon() {
        let rule = MaxDateValidator::new();
        let err = rule
            .check(today() + Duration::weeks(4) + Duration::days(1), today())
            .unwrap_err();
        assert_eq!(err.code, FieldErrorCode::DateTooLate);
    }

    #[test]
    fn custom_message_is_carried() {
        let rule = MinDateValidator::with_message("Invalid date - renewal in past");
        let err = rule
            .check(today() - Duration::days(7), today())
            .unwrap_err();
        assert_eq!(err.message, "Invalid date - renewal in past");
    }

    #[test]
    fn rules_accumulate_not_short_circuit() {
        let min = MinDateValidator::new();
        // A zero-week horizon makes today the only valid day, so a past
        // date trips only the min rule while both are attached.
        let max = MaxDateValidator::new().with_horizon_weeks(0);
        let errors = apply_rules(today() - Duration::days(1), today(), &[&min, &max]);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, FieldErrorCode::DateTooEarly);

        let errors = apply_rules(today() + Duration::days(1), today(), &[&min, &max]);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, FieldErrorCode::DateTooLate);
    }

    #[test]
    fn date_order_rejects_death_before_birth() {
        let birth = NaiveDate::from_ymd_opt(1950, 1, 2).unwrap();
        let death = NaiveDate::from_ymd_opt(1950, 1, 1).unwrap();
        let err = check_date_order(Some(birth), Some(death), None).unwrap_err();
        assert_eq!(err.code, FieldErrorCode::InvalidDateOrder);
    }

    #[test]
    fn date_order_accepts_equal_and_missing() {
        let d = NaiveDate::from_ymd_opt(1950, 1, 1).unwrap();
        assert!(check_date_order(Some(d), Some(d), None).is_ok());
        assert!(check_date_order(None, Some(d), None).is_ok());
        assert!(check_date_order(Some(d), None, None).is_ok());
        assert!(check_date_order(None, None, None).is_ok());
    }

    #[test]
    fn distinct_names_rejects_identical() {
        let err = check_distinct_names("Sting", "Sting", None).unwrap_err();
        assert_eq!(err.code, FieldErrorCode::DuplicateName);
    }

    #[test]
    fn distinct_names_is_case_sensitive() {
        assert!(check_distinct_names("Sting", "sting", None).is_ok());
        assert!(check_distinct_names("", "", None).is_ok());
        assert!(check_distinct_names("Ursula", "Le Guin", None).is_ok());
    }
}
