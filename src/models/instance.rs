//! Book copy (instance) model and loan status

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::ToSchema;
use uuid::Uuid;

/// Loan status of a physical copy, persisted as a one-letter code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum InstanceStatus {
    Maintenance,
    OnLoan,
    Available,
    Reserved,
}

impl InstanceStatus {
    pub fn as_code(&self) -> &'static str {
        match self {
            InstanceStatus::Maintenance => "m",
            InstanceStatus::OnLoan => "o",
            InstanceStatus::Available => "a",
            InstanceStatus::Reserved => "r",
        }
    }
}

impl std::fmt::Display for InstanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            InstanceStatus::Maintenance => "Maintenance",
            InstanceStatus::OnLoan => "On loan",
            InstanceStatus::Available => "Available",
            InstanceStatus::Reserved => "Reserved",
        };
        write!(f, "{}", label)
    }
}

impl std::str::FromStr for InstanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "m" => Ok(InstanceStatus::Maintenance),
            "o" => Ok(InstanceStatus::OnLoan),
            "a" => Ok(InstanceStatus::Available),
            "r" => Ok(InstanceStatus::Reserved),
            _ => Err(format!("Invalid instance status code: {}", s)),
        }
    }
}

// SQLx conversion: stored as the one-letter text code
impl sqlx::Type<Postgres> for InstanceStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for InstanceStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for InstanceStatus {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        let s: String = self.as_code().to_string();
        <String as Encode<Postgres>>::encode(s, buf)
    }
}

/// Derive the status a copy must carry for a given pair of loan fields.
///
/// Invariant: a borrower is stored only on a copy that is on loan or
/// reserved, and a due date only on a copy that is on loan. Submissions
/// never set status directly; every write runs through this derivation.
pub fn derive_status(
    current: InstanceStatus,
    borrower_id: Option<i32>,
    due_back: Option<NaiveDate>,
) -> InstanceStatus {
    match (borrower_id, due_back) {
        (Some(_), Some(_)) => InstanceStatus::OnLoan,
        (Some(_), None) => InstanceStatus::Reserved,
        (None, _) => {
            if current == InstanceStatus::Maintenance {
                InstanceStatus::Maintenance
            } else {
                InstanceStatus::Available
            }
        }
    }
}

/// Copy record from the database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookInstance {
    /// Globally-unique copy token, used directly in URLs
    pub id: Uuid,
    pub book_id: i32,
    pub imprint: String,
    pub due_back: Option<NaiveDate>,
    pub status: InstanceStatus,
    pub borrower_id: Option<i32>,
}

/// Copy with display fields for listings
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct InstanceDetails {
    pub id: Uuid,
    pub book_id: i32,
    pub book_title: String,
    pub imprint: String,
    pub due_back: Option<NaiveDate>,
    pub status: InstanceStatus,
    pub borrower_id: Option<i32>,
    pub borrower_name: Option<String>,
    /// True when the copy is on loan past its due date
    pub is_overdue: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_round_trip() {
        for status in [
            InstanceStatus::Maintenance,
            InstanceStatus::OnLoan,
            InstanceStatus::Available,
            InstanceStatus::Reserved,
        ] {
            assert_eq!(status.as_code().parse::<InstanceStatus>().unwrap(), status);
        }
        assert!("x".parse::<InstanceStatus>().is_err());
    }

    #[test]
    fn borrower_and_due_date_derive_on_loan() {
        let due = NaiveDate::from_ymd_opt(2024, 7, 1);
        assert_eq!(
            derive_status(InstanceStatus::Available, Some(3), due),
            InstanceStatus::OnLoan
        );
    }

    #[test]
    fn borrower_without_due_date_derives_reserved() {
        assert_eq!(
            derive_status(InstanceStatus::Available, Some(3), None),
            InstanceStatus::Reserved
        );
    }

    #[test]
    fn clearing_the_loan_releases_the_copy() {
        assert_eq!(
            derive_status(InstanceStatus::OnLoan, None, None),
            InstanceStatus::Available
        );
    }

    #[test]
    fn maintenance_is_preserved_without_loan_fields() {
        assert_eq!(
            derive_status(InstanceStatus::Maintenance, None, None),
            InstanceStatus::Maintenance
        );
    }
}
