//! The storage collaborator trait.

use std::collections::HashSet;

use async_trait::async_trait;
use educore_id::PaymentId;

use crate::{Payment, StoreError};

/// Durable storage for payment records.
///
/// The ID namespace is the shared resource: `payment_ids` is a snapshot
/// read with no transactional guarantee against concurrent allocation, and
/// `insert` must reject an already-assigned ID with
/// [`StoreError::DuplicateId`] so the creation workflow can retry.
#[async_trait]
pub trait PaymentStore: Send + Sync {
    /// Snapshot of every payment ID currently in use.
    async fn payment_ids(&self) -> Result<HashSet<PaymentId>, StoreError>;

    /// Persists a new payment atomically.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateId`] if the ID is already assigned.
    async fn insert(&self, payment: Payment) -> Result<(), StoreError>;

    /// Fetches a payment by ID.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no such payment exists.
    async fn get(&self, id: PaymentId) -> Result<Payment, StoreError>;
}
