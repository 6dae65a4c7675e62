//! Payment persistence for the educore backend.
//!
//! This crate owns the integration between ID allocation and durable
//! storage:
//! - The [`PaymentStore`] trait, the storage collaborator the allocator
//!   core is written against
//! - An in-memory store for tests and local development
//! - A Postgres store that maps the unique-constraint violation on the ID
//!   column to a typed duplicate error
//! - The [`create_payment`] workflow, which closes the check-then-act gap:
//!   an ID chosen against a stale snapshot can lose the race at insert
//!   time, and the workflow then re-reads and re-allocates
//!
//! Cross-process correctness comes from the store's uniqueness constraint
//! plus the retry loop; there is no in-process locking, since allocation is
//! not restricted to a single process.

mod create;
mod error;
mod memory;
mod payment;
mod postgres;
mod store;

pub use create::{create_payment, create_payment_with, DEFAULT_PERSIST_RETRIES};
pub use error::{CreateError, StoreError};
pub use memory::MemoryPaymentStore;
pub use payment::{NewPayment, ParseStatusError, Payment, PaymentStatus};
pub use postgres::{DbConfig, PgPaymentStore};
pub use store::PaymentStore;
