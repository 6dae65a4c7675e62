//! Store and creation-workflow error types.

use educore_id::{AllocationError, IdError, PaymentId};
use thiserror::Error;

/// Payment store operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to connect to the database.
    #[error("failed to connect to database: {0}")]
    Connect(#[source] sqlx::Error),

    /// Failed to execute a query.
    #[error("query failed: {0}")]
    Query(#[source] sqlx::Error),

    /// The payment ID is already assigned to another record.
    ///
    /// Raised by the store's uniqueness constraint at insert time; the
    /// creation workflow treats it as a signal to re-allocate.
    #[error("payment ID already in use: {0}")]
    DuplicateId(PaymentId),

    /// No payment exists with the given ID.
    #[error("payment not found: {0}")]
    NotFound(PaymentId),

    /// A stored ID column value failed strict parsing.
    #[error("invalid payment ID '{raw}' in store: {source}")]
    InvalidId { raw: String, source: IdError },
}

/// Errors from the create-payment workflow.
#[derive(Debug, Error)]
pub enum CreateError {
    /// The allocator ran out of candidate attempts against one snapshot.
    #[error(transparent)]
    Allocation(#[from] AllocationError),

    /// A store operation other than a duplicate-ID conflict failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Every allocate-then-persist round lost the race to a concurrent
    /// writer.
    #[error("could not persist a unique payment ID after {attempts} attempts")]
    IdRetriesExhausted { attempts: u32 },
}
