//! In-memory authoritative trip store.

/// Trip store, snapshot type, and query errors.
pub mod store;
