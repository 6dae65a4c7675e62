//! In-memory payment store for tests and local development.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use educore_id::PaymentId;
use tokio::sync::RwLock;

use crate::{Payment, PaymentStore, StoreError};

/// Payment store backed by a map behind an async lock.
///
/// Duplicate detection piggybacks on map occupancy, mirroring what the
/// unique constraint does in the Postgres store.
#[derive(Debug, Default)]
pub struct MemoryPaymentStore {
    payments: RwLock<HashMap<PaymentId, Payment>>,
}

impl MemoryPaymentStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored payments.
    pub async fn len(&self) -> usize {
        self.payments.read().await.len()
    }

    /// Returns true if no payments are stored.
    pub async fn is_empty(&self) -> bool {
        self.payments.read().await.is_empty()
    }
}

#[async_trait]
impl PaymentStore for MemoryPaymentStore {
    async fn payment_ids(&self) -> Result<HashSet<PaymentId>, StoreError> {
        Ok(self.payments.read().await.keys().copied().collect())
    }

    async fn insert(&self, payment: Payment) -> Result<(), StoreError> {
        let mut payments = self.payments.write().await;
        match payments.entry(payment.id) {
            Entry::Occupied(_) => Err(StoreError::DuplicateId(payment.id)),
            Entry::Vacant(slot) => {
                slot.insert(payment);
                Ok(())
            }
        }
    }

    async fn get(&self, id: PaymentId) -> Result<Payment, StoreError> {
        self.payments
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use crate::{NewPayment, PaymentStatus};

    use super::*;

    fn sample(id: &str) -> Payment {
        Payment::from_new(
            id.parse().unwrap(),
            NewPayment {
                student_id: "student-1".to_string(),
                edu_center_id: "center-1".to_string(),
                price: 450_000,
                note: None,
                for_month: "2026-08".to_string(),
            },
        )
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let store = MemoryPaymentStore::new();
        let payment = sample("ABC12345");
        store.insert(payment.clone()).await.unwrap();

        let fetched = store.get(payment.id).await.unwrap();
        assert_eq!(fetched, payment);
        assert_eq!(fetched.status, PaymentStatus::NotPayed);
    }

    #[tokio::test]
    async fn test_insert_duplicate_id_rejected() {
        let store = MemoryPaymentStore::new();
        let payment = sample("ABC12345");
        store.insert(payment.clone()).await.unwrap();

        let result = store.insert(sample("ABC12345")).await;
        assert!(matches!(
            result.unwrap_err(),
            StoreError::DuplicateId(id) if id == payment.id
        ));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let store = MemoryPaymentStore::new();
        let id: PaymentId = "ZZZ99999".parse().unwrap();
        let result = store.get(id).await;
        assert!(matches!(result.unwrap_err(), StoreError::NotFound(missing) if missing == id));
    }

    #[tokio::test]
    async fn test_payment_ids_snapshot() {
        let store = MemoryPaymentStore::new();
        assert!(store.payment_ids().await.unwrap().is_empty());

        store.insert(sample("ABC12345")).await.unwrap();
        store.insert(sample("XYZ67890")).await.unwrap();

        let ids = store.payment_ids().await.unwrap();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&"ABC12345".parse().unwrap()));
        assert!(ids.contains(&"XYZ67890".parse().unwrap()));
    }
}
