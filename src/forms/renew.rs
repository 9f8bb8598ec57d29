//! Renewal form for the librarian checkout-renewal workflow.
//!
//! An unconstrained form: a due-date field carrying both date rules (all
//! failures collected) and a borrower selector. The proposed due date on a
//! fresh form is three weeks out; submissions are accepted up to four
//! weeks out.

use chrono::{Duration, NaiveDate};
use serde::Deserialize;
use utoipa::ToSchema;

use super::validators::{apply_rules, MaxDateValidator, MinDateValidator};
use super::{FieldError, FormErrors};

/// Weeks ahead of today proposed on an unbound form.
pub const PROPOSED_RENEWAL_WEEKS: i64 = 3;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RenewPayload {
    pub new_due_date: Option<NaiveDate>,
    pub new_borrower: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleanedRenewal {
    pub due_date: NaiveDate,
    pub borrower_id: i32,
}

/// Default due date offered when the form is first shown.
pub fn proposed_due_date(today: NaiveDate) -> NaiveDate {
    today + Duration::weeks(PROPOSED_RENEWAL_WEEKS)
}

pub fn clean(payload: &RenewPayload, today: NaiveDate) -> Result<CleanedRenewal, FormErrors> {
    let mut errors = FormErrors::new();

    match payload.new_due_date {
        Some(date) => {
            let min = MinDateValidator::with_message("Invalid date - renewal in past");
            let max =
                MaxDateValidator::with_message("Invalid date - renewal more than 4 weeks ahead");
            for error in apply_rules(date, today, &[&min, &max]) {
                errors.add("new_due_date", error);
            }
        }
        None => errors.add("new_due_date", FieldError::required()),
    }

    if payload.new_borrower.is_none() {
        errors.add("new_borrower", FieldError::required());
    }

    errors.into_result()?;

    Ok(CleanedRenewal {
        due_date: payload.new_due_date.unwrap(),
        borrower_id: payload.new_borrower.unwrap(),
    })
}

#[cfg(test)]
mod tests {
    use super::super::FieldErrorCode;
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn proposed_date_is_three_weeks_out() {
        assert_eq!(
            proposed_due_date(today()),
            NaiveDate::from_ymd_opt(2024, 7, 6).unwrap()
        );
    }

    #[test]
    fn proposed_date_passes_validation() {
        let cleaned = clean(
            &RenewPayload {
                new_due_date: Some(proposed_due_date(today())),
                new_borrower: Some(4),
            },
            today(),
        )
        .unwrap();
        assert_eq!(cleaned.borrower_id, 4);
    }

    #[test]
    fn past_date_fails_with_date_too_early() {
        let errors = clean(
            &RenewPayload {
                new_due_date: Some(today() - Duration::days(1)),
                new_borrower: Some(4),
            },
            today(),
        )
        .unwrap_err();
        let field = errors.field("new_due_date").unwrap();
        assert_eq!(field[0].code, FieldErrorCode::DateTooEarly);
        assert_eq!(field[0].message, "Invalid date - renewal in past");
    }

    #[test]
    fn date_beyond_four_weeks_fails_with_date_too_late() {
        let errors = clean(
            &RenewPayload {
                new_due_date: Some(today() + Duration::weeks(5)),
                new_borrower: Some(4),
            },
            today(),
        )
        .unwrap_err();
        assert_eq!(
            errors.field("new_due_date").unwrap()[0].code,
            FieldErrorCode::DateTooLate
        );
    }

    #[test]
    fn four_week_boundary_is_accepted() {
        assert!(clean(
            &RenewPayload {
                new_due_date: Some(today() + Duration::weeks(4)),
                new_borrower: Some(4),
            },
            today(),
        )
        .is_ok());
    }

    #[test]
    fn missing_fields_are_reported_together() {
        let errors = clean(
            &RenewPayload {
                new_due_date: None,
                new_borrower: None,
            },
            today(),
        )
        .unwrap_err();
        assert_eq!(
            errors.field("new_due_date").unwrap()[0].code,
            FieldErrorCode::RequiredFieldMissing
        );
        assert_eq!(
            errors.field("new_borrower").unwrap()[0].code,
            FieldErrorCode::RequiredFieldMissing
        );
    }
}
