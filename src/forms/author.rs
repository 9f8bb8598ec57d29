//! Author create/update form.
//!
//! Field subset: first name, last name, date of birth, date of death. Both
//! cross-field checks (date ordering and distinct names) run on every
//! submission, and a submission violating both reports both.

use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;

use super::validators::{check_date_order, check_distinct_names};
use super::{required_text, FormErrors};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AuthorPayload {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

/// Cleaned value set for a valid author submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanedAuthor {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

pub fn clean(payload: &AuthorPayload) -> Result<CleanedAuthor, FormErrors> {
    let mut errors = FormErrors::new();

    let first_name = required_text(&payload.first_name, "first_name", &mut errors);
    let last_name = required_text(&payload.last_name, "last_name", &mut errors);

    // Cross-field checks run only once the per-field pass is clean.
    if !errors.is_empty() {
        return Err(errors);
    }

    let first_name = first_name.unwrap();
    let last_name = last_name.unwrap();

    if let Err(e) = check_date_order(payload.date_of_birth, payload.date_of_death, None) {
        errors.add("date_of_death", e);
    }
    if let Err(e) = check_distinct_names(&first_name, &last_name, None) {
        errors.add("last_name", e);
    }
    errors.into_result()?;

    Ok(CleanedAuthor {
        first_name,
        last_name,
        date_of_birth: payload.date_of_birth,
        date_of_death: payload.date_of_death,
    })
}

#[cfg(test)]
mod tests {
    use super::super::FieldErrorCode;
    use super::*;

    fn payload() -> AuthorPayload {
        AuthorPayload {
            first_name: Some("Ursula".to_string()),
            last_name: Some("Le Guin".to_string()),
            date_of_birth: NaiveDate::from_ymd_opt(1929, 10, 21),
            date_of_death: NaiveDate::from_ymd_opt(2018, 1, 22),
        }
    }

    #[test]
    fn valid_submission_cleans() {
        let cleaned = clean(&payload()).unwrap();
        assert_eq!(cleaned.first_name, "Ursula");
        assert_eq!(cleaned.last_name, "Le Guin");
    }

    #[test]
    fn missing_names_are_required_errors() {
        let errors = clean(&AuthorPayload {
            first_name: None,
            last_name: Some("  ".to_string()),
            date_of_birth: None,
            date_of_death: None,
        })
        .unwrap_err();
        assert_eq!(
            errors.field("first_name").unwrap()[0].code,
            FieldErrorCode::RequiredFieldMissing
        );
        assert_eq!(
            errors.field("last_name").unwrap()[0].code,
            FieldErrorCode::RequiredFieldMissing
        );
    }

    #[test]
    fn death_before_birth_is_rejected() {
        let mut p = payload();
        p.date_of_death = NaiveDate::from_ymd_opt(1920, 1, 1);
        let errors = clean(&p).unwrap_err();
        assert_eq!(
            errors.field("date_of_death").unwrap()[0].code,
            FieldErrorCode::InvalidDateOrder
        );
    }

    #[test]
    fn both_cross_field_failures_are_reported_together() {
        let mut p = payload();
        p.first_name = Some("Sting".to_string());
        p.last_name = Some("Sting".to_string());
        p.date_of_death = NaiveDate::from_ymd_opt(1920, 1, 1);
        let errors = clean(&p).unwrap_err();
        assert_eq!(
            errors.field("date_of_death").unwrap()[0].code,
            FieldErrorCode::InvalidDateOrder
        );
        assert_eq!(
            errors.field("last_name").unwrap()[0].code,
            FieldErrorCode::DuplicateName
        );
    }

    #[test]
    fn equal_birth_and_death_dates_pass() {
        let mut p = payload();
        p.date_of_birth = NaiveDate::from_ymd_opt(1900, 5, 5);
        p.date_of_death = NaiveDate::from_ymd_opt(1900, 5, 5);
        assert!(clean(&p).is_ok());
    }
}
