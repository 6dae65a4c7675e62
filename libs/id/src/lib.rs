//! # educore-id
//!
//! Payment ID type, generation, and collision-free allocation for the
//! educore backend.
//!
//! ## Design Principles
//!
//! - Payment IDs are short human-readable codes, assigned once at record
//!   creation and never changed or reused afterwards
//! - The canonical string form round-trips through strict parsing
//!   (parse → format → parse)
//! - Candidate generation is pure and separated from uniqueness checking,
//!   so tests can script the exact candidates drawn
//! - Allocation is bounded: it fails with a typed error instead of spinning
//!   when the ID space is saturated
//!
//! ## ID Format
//!
//! Three uppercase letters followed by five digits, no separator. The
//! numeric suffix lies in 10000..=99999, so the encoded form is always
//! exactly 8 characters.
//!
//! Examples:
//! - `QKD53271`
//! - `ABC12345`
//!
//! The keyspace is 26^3 * 90000 (about 5.27 billion) combinations, so a
//! fresh candidate colliding with a realistically sized payment table is
//! vanishingly rare. Membership is still checked against the IDs already in
//! use before a candidate is handed out; durable uniqueness belongs to the
//! store's own constraint, not to this crate.

mod alloc;
mod error;
mod types;

pub use alloc::{allocate, CandidateSource, IdAllocator, RngCandidates, DEFAULT_MAX_ATTEMPTS};
pub use error::{AllocationError, IdError};
pub use types::PaymentId;
