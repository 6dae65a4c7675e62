//! Candidate generation and collision-free allocation.
//!
//! Generation and uniqueness checking are deliberately separate: a
//! [`CandidateSource`] produces IDs with no knowledge of what is already in
//! use, and the [`IdAllocator`] filters its output against a snapshot of the
//! occupied IDs. The allocator never persists anything; the caller writes
//! the returned ID to durable storage, where the store's uniqueness
//! constraint has the final word.

use std::collections::HashSet;

use rand::{rngs::ThreadRng, Rng};

use crate::{AllocationError, PaymentId};

/// Default upper bound on candidate draws per allocation.
///
/// A tunable safety net, not a correctness requirement: at realistic table
/// sizes the first draw almost always succeeds.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 1000;

/// A source of payment ID candidates.
///
/// Implementations are pure generators with no uniqueness checking and no
/// storage access. Tests script exact candidate sequences through this
/// seam.
pub trait CandidateSource {
    /// Produces the next candidate.
    fn next_candidate(&mut self) -> PaymentId;
}

/// Candidate source backed by a random number generator.
///
/// Each prefix letter is drawn independently and uniformly from the 26
/// uppercase letters (repetition allowed), and the suffix uniformly from
/// `SUFFIX_MIN..=SUFFIX_MAX`.
#[derive(Debug)]
pub struct RngCandidates<R> {
    rng: R,
}

impl RngCandidates<ThreadRng> {
    /// Creates a source over the thread-local RNG.
    #[must_use]
    pub fn thread_local() -> Self {
        Self { rng: rand::rng() }
    }
}

impl<R: Rng> RngCandidates<R> {
    /// Creates a source over the given RNG. Tests pass a seeded `StdRng`
    /// here for reproducible draws.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl Default for RngCandidates<ThreadRng> {
    fn default() -> Self {
        Self::thread_local()
    }
}

impl<R: Rng> CandidateSource for RngCandidates<R> {
    fn next_candidate(&mut self) -> PaymentId {
        let mut prefix = [0u8; 3];
        for slot in &mut prefix {
            *slot = b'A' + self.rng.random_range(0..26u8);
        }
        let suffix = self
            .rng
            .random_range(PaymentId::SUFFIX_MIN..=PaymentId::SUFFIX_MAX);
        PaymentId::from_raw(prefix, suffix)
    }
}

/// Allocates payment IDs that do not collide with a given set of
/// already-assigned IDs.
#[derive(Debug, Clone, Copy)]
pub struct IdAllocator {
    max_attempts: u32,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl IdAllocator {
    /// Creates an allocator with a custom attempt bound.
    #[must_use]
    pub fn new(max_attempts: u32) -> Self {
        Self { max_attempts }
    }

    /// Returns the attempt bound.
    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Draws candidates from `source` until one is not a member of
    /// `existing`, and returns it.
    ///
    /// `existing` is a snapshot: two callers holding the same snapshot can
    /// both be handed the same ID, and the durable store's uniqueness
    /// constraint must arbitrate.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationError::CapacityExhausted`] if every candidate
    /// within the attempt bound was already taken.
    pub fn allocate<S: CandidateSource>(
        &self,
        existing: &HashSet<PaymentId>,
        source: &mut S,
    ) -> Result<PaymentId, AllocationError> {
        for _ in 0..self.max_attempts {
            let candidate = source.next_candidate();
            if !existing.contains(&candidate) {
                return Ok(candidate);
            }
        }
        Err(AllocationError::CapacityExhausted {
            attempts: self.max_attempts,
        })
    }
}

/// Allocates one ID with the default bound and the thread-local RNG.
///
/// # Errors
///
/// Returns [`AllocationError::CapacityExhausted`] if every candidate within
/// the default attempt bound was already taken.
pub fn allocate(existing: &HashSet<PaymentId>) -> Result<PaymentId, AllocationError> {
    IdAllocator::default().allocate(existing, &mut RngCandidates::thread_local())
}
