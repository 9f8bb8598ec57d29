//! Loan listings and the renewal workflow

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    error::AppResult,
    forms::{self, renew::RenewPayload, FieldError, FormErrors},
    models::{
        instance::InstanceDetails,
        user::BorrowerChoice,
    },
    repository::Repository,
};

/// Everything needed to render the renewal form
#[derive(Debug, Clone, serde::Serialize, utoipa::ToSchema)]
pub struct RenewalForm {
    /// The copy being renewed
    pub instance: InstanceDetails,
    /// Suggested due date (three weeks out); the borrower starts unselected
    pub proposed_due_date: NaiveDate,
    /// Every known user, ordered by last name
    pub borrowers: Vec<BorrowerChoice>,
}

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
}

impl LoansService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Copies on loan to one user, soonest due first
    pub async fn user_loans(
        &self,
        user_id: i32,
        page: i64,
        per_page: i64,
    ) -> AppResult<(Vec<InstanceDetails>, i64)> {
        self.repository
            .instances
            .list_on_loan(Some(user_id), page, per_page)
            .await
    }

    /// Every copy currently on loan, soonest due first
    pub async fn all_borrowed(
        &self,
        page: i64,
        per_page: i64,
    ) -> AppResult<(Vec<InstanceDetails>, i64)> {
        self.repository
            .instances
            .list_on_loan(None, page, per_page)
            .await
    }

    /// Data for the unbound renewal form
    pub async fn renewal_form(&self, id: Uuid, today: NaiveDate) -> AppResult<RenewalForm> {
        let instance = self.repository.instances.get_details(id).await?;
        let users = self.repository.users.list_ordered().await?;

        Ok(RenewalForm {
            instance,
            proposed_due_date: forms::renew::proposed_due_date(today),
            borrowers: users.iter().map(BorrowerChoice::from).collect(),
        })
    }

    /// Apply a renewal submission to a copy.
    ///
    /// Date-rule failures and an unresolvable borrower are reported
    /// together; nothing persists unless the whole submission is valid.
    pub async fn renew(
        &self,
        id: Uuid,
        payload: RenewPayload,
        today: NaiveDate,
    ) -> AppResult<InstanceDetails> {
        // A renewal of an unknown copy is a 404 before it is a form error
        self.repository.instances.get_by_id(id).await?;

        let mut errors = FormErrors::new();
        let cleaned = match forms::renew::clean(&payload, today) {
            Ok(cleaned) => Some(cleaned),
            Err(form_errors) => {
                errors.merge(form_errors);
                None
            }
        };

        if let Some(borrower_id) = payload.new_borrower {
            if !self.repository.users.exists(borrower_id).await? {
                errors.add(
                    "new_borrower",
                    FieldError::invalid_choice(format!("User {} does not exist", borrower_id)),
                );
            }
        }

        errors.into_result()?;
        let cleaned = cleaned.unwrap();

        let instance = self
            .repository
            .instances
            .renew(id, cleaned.due_date, cleaned.borrower_id)
            .await?;

        tracing::info!(
            "Renewed copy {} until {} for user {}",
            instance.id,
            cleaned.due_date,
            cleaned.borrower_id
        );

        self.repository.instances.get_details(instance.id).await
    }
}
