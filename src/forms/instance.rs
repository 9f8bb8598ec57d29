//! Book-copy create/update forms.
//!
//! Create binds: identifier, book, imprint, due-back, borrower. Update
//! binds: imprint, due-back, borrower. Status is never bound from a
//! submission; it is derived from the loan fields at write time
//! (`crate::models::instance::derive_status`), so a due date without a
//! borrower is rejected here.

use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::{required_text, FieldError, FieldErrorCode, FormErrors};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct InstanceCreatePayload {
    /// Copy identifier; generated when omitted.
    pub id: Option<Uuid>,
    pub book: Option<i32>,
    pub imprint: Option<String>,
    pub due_back: Option<NaiveDate>,
    pub borrower: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct InstanceUpdatePayload {
    pub imprint: Option<String>,
    pub due_back: Option<NaiveDate>,
    pub borrower: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanedInstanceCreate {
    pub id: Uuid,
    pub book_id: i32,
    pub imprint: String,
    pub due_back: Option<NaiveDate>,
    pub borrower_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanedInstanceUpdate {
    pub imprint: String,
    pub due_back: Option<NaiveDate>,
    pub borrower_id: Option<i32>,
}

pub fn clean_create(payload: &InstanceCreatePayload) -> Result<CleanedInstanceCreate, FormErrors> {
    let mut errors = FormErrors::new();

    if payload.book.is_none() {
        errors.add("book", FieldError::required());
    }
    let imprint = required_text(&payload.imprint, "imprint", &mut errors);

    if !errors.is_empty() {
        return Err(errors);
    }

    check_loan_fields(payload.due_back, payload.borrower, &mut errors);
    errors.into_result()?;

    Ok(CleanedInstanceCreate {
        id: payload.id.unwrap_or_else(Uuid::new_v4),
        book_id: payload.book.unwrap(),
        imprint: imprint.unwrap(),
        due_back: payload.due_back,
        borrower_id: payload.borrower,
    })
}

pub fn clean_update(payload: &InstanceUpdatePayload) -> Result<CleanedInstanceUpdate, FormErrors> {
    let mut errors = FormErrors::new();

    let imprint = required_text(&payload.imprint, "imprint", &mut errors);

    if !errors.is_empty() {
        return Err(errors);
    }

    check_loan_fields(payload.due_back, payload.borrower, &mut errors);
    errors.into_result()?;

    Ok(CleanedInstanceUpdate {
        imprint: imprint.unwrap(),
        due_back: payload.due_back,
        borrower_id: payload.borrower,
    })
}

/// A due date only makes sense for a copy that is out with someone.
fn check_loan_fields(
    due_back: Option<NaiveDate>,
    borrower: Option<i32>,
    errors: &mut FormErrors,
) {
    if due_back.is_some() && borrower.is_none() {
        errors.add(
            "due_back",
            FieldError::new(
                FieldErrorCode::MissingBorrower,
                "A due date requires a borrower",
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_payload() -> InstanceCreatePayload {
        InstanceCreatePayload {
            id: None,
            book: Some(1),
            imprint: Some("Gollancz, 2004".to_string()),
            due_back: None,
            borrower: None,
        }
    }

    #[test]
    fn create_generates_identifier_when_omitted() {
        let a = clean_create(&create_payload()).unwrap();
        let b = clean_create(&create_payload()).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn create_keeps_submitted_identifier() {
        let id = Uuid::new_v4();
        let mut p = create_payload();
        p.id = Some(id);
        assert_eq!(clean_create(&p).unwrap().id, id);
    }

    #[test]
    fn due_date_without_borrower_is_rejected() {
        let mut p = create_payload();
        p.due_back = NaiveDate::from_ymd_opt(2024, 7, 1);
        let errors = clean_create(&p).unwrap_err();
        assert_eq!(
            errors.field("due_back").unwrap()[0].code,
            FieldErrorCode::MissingBorrower
        );
    }

    #[test]
    fn update_requires_imprint() {
        let errors = clean_update(&InstanceUpdatePayload {
            imprint: None,
            due_back: None,
            borrower: None,
        })
        .unwrap_err();
        assert_eq!(
            errors.field("imprint").unwrap()[0].code,
            FieldErrorCode::RequiredFieldMissing
        );
    }

    #[test]
    fn update_with_loan_fields_cleans() {
        let cleaned = clean_update(&InstanceUpdatePayload {
            imprint: Some("Gollancz, 2004".to_string()),
            due_back: NaiveDate::from_ymd_opt(2024, 7, 1),
            borrower: Some(9),
        })
        .unwrap();
        assert_eq!(cleaned.borrower_id, Some(9));
    }
}
