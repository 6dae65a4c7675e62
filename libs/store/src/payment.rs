//! Payment record types.

use chrono::{DateTime, Utc};
use educore_id::PaymentId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Settlement state of a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentStatus {
    /// Recorded but not yet settled. Every new payment starts here.
    NotPayed,
    /// Settled.
    Payed,
}

/// Unknown status string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown payment status: {0}")]
pub struct ParseStatusError(String);

impl PaymentStatus {
    /// Canonical string form, as stored in the status column.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotPayed => "not-payed",
            Self::Payed => "payed",
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PaymentStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "not-payed" => Ok(Self::NotPayed),
            "payed" => Ok(Self::Payed),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

/// A persisted payment record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    /// External-facing key, assigned once at creation.
    pub id: PaymentId,
    pub student_id: String,
    pub edu_center_id: String,
    /// Amount in minor currency units.
    pub price: i64,
    pub note: Option<String>,
    pub status: PaymentStatus,
    /// Billing month the payment covers, e.g. `2026-08`.
    pub for_month: String,
    pub date_payed: Option<DateTime<Utc>>,
}

/// Input for creating a payment. The ID and status are assigned by the
/// creation workflow, never supplied by the caller.
#[derive(Debug, Clone)]
pub struct NewPayment {
    pub student_id: String,
    pub edu_center_id: String,
    pub price: i64,
    pub note: Option<String>,
    pub for_month: String,
}

impl Payment {
    /// Builds the record for a freshly allocated ID: unsettled, no payed
    /// date.
    #[must_use]
    pub fn from_new(id: PaymentId, new: NewPayment) -> Self {
        Self {
            id,
            student_id: new.student_id,
            edu_center_id: new.edu_center_id,
            price: new.price,
            note: new.note,
            status: PaymentStatus::NotPayed,
            for_month: new.for_month,
            date_payed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("not-payed", PaymentStatus::NotPayed)]
    #[case("payed", PaymentStatus::Payed)]
    fn test_status_string_roundtrip(#[case] s: &str, #[case] status: PaymentStatus) {
        assert_eq!(status.as_str(), s);
        assert_eq!(s.parse::<PaymentStatus>().unwrap(), status);
    }

    #[test]
    fn test_status_unknown_rejected() {
        assert!("paid".parse::<PaymentStatus>().is_err());
        assert!("".parse::<PaymentStatus>().is_err());
    }

    #[test]
    fn test_from_new_defaults() {
        let id: PaymentId = "QKD53271".parse().unwrap();
        let payment = Payment::from_new(
            id,
            NewPayment {
                student_id: "student-1".to_string(),
                edu_center_id: "center-1".to_string(),
                price: 450_000,
                note: None,
                for_month: "2026-08".to_string(),
            },
        );
        assert_eq!(payment.id, id);
        assert_eq!(payment.status, PaymentStatus::NotPayed);
        assert!(payment.date_payed.is_none());
    }

    #[test]
    fn test_payment_json_shape() {
        let payment = Payment {
            id: "ABC12345".parse().unwrap(),
            student_id: "student-1".to_string(),
            edu_center_id: "center-1".to_string(),
            price: 450_000,
            note: Some("first month".to_string()),
            status: PaymentStatus::NotPayed,
            for_month: "2026-08".to_string(),
            date_payed: None,
        };
        let json = serde_json::to_value(&payment).unwrap();
        assert_eq!(json["id"], "ABC12345");
        assert_eq!(json["status"], "not-payed");
    }
}
