//! Payment creation with collision-free ID assignment.
//!
//! The allocator checks candidates against a snapshot of the IDs in use,
//! but the snapshot can go stale between the read and the insert: two
//! concurrent creations can both accept the same ID. The store's uniqueness
//! constraint arbitrates, and the loser re-reads and re-allocates here.

use educore_id::{CandidateSource, IdAllocator, RngCandidates};
use tracing::{debug, warn};

use crate::{CreateError, NewPayment, Payment, PaymentStore, StoreError};

/// Default upper bound on allocate-then-persist rounds.
///
/// Losing the insert race even once requires a concurrent writer to land
/// the same ID out of a multi-billion keyspace in the same window; losing
/// it this many times in a row means something is systematically wrong.
pub const DEFAULT_PERSIST_RETRIES: u32 = 3;

/// Creates a payment with a freshly allocated ID, using the default
/// allocator and the thread-local RNG.
///
/// # Errors
///
/// See [`create_payment_with`].
pub async fn create_payment<S: PaymentStore>(
    store: &S,
    new: NewPayment,
) -> Result<Payment, CreateError> {
    create_payment_with(
        store,
        new,
        &IdAllocator::default(),
        &mut RngCandidates::thread_local(),
        DEFAULT_PERSIST_RETRIES,
    )
    .await
}

/// Creates a payment with explicit allocator, candidate source, and retry
/// bound.
///
/// Each round reads a fresh ID snapshot, allocates a candidate against it,
/// and attempts the insert. A duplicate-ID rejection means a concurrent
/// writer claimed the candidate first; the round is retried from the
/// snapshot read. Any other store error aborts immediately.
///
/// # Errors
///
/// - [`CreateError::Allocation`] if the allocator exhausts its candidate
///   bound against one snapshot
/// - [`CreateError::Store`] for store failures other than a duplicate ID
/// - [`CreateError::IdRetriesExhausted`] if every round lost the insert
///   race
pub async fn create_payment_with<S, C>(
    store: &S,
    new: NewPayment,
    allocator: &IdAllocator,
    source: &mut C,
    persist_retries: u32,
) -> Result<Payment, CreateError>
where
    S: PaymentStore,
    C: CandidateSource,
{
    for attempt in 1..=persist_retries {
        let existing = store.payment_ids().await?;
        let id = allocator.allocate(&existing, source)?;
        debug!(%id, attempt, existing = existing.len(), "allocated candidate payment ID");

        let payment = Payment::from_new(id, new.clone());
        match store.insert(payment.clone()).await {
            Ok(()) => return Ok(payment),
            Err(StoreError::DuplicateId(taken)) => {
                warn!(id = %taken, attempt, "payment ID claimed by a concurrent writer, retrying");
            }
            Err(e) => return Err(e.into()),
        }
    }

    Err(CreateError::IdRetriesExhausted {
        attempts: persist_retries,
    })
}
