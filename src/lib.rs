//! In-memory flight-trip record store with an injected audit log sink.
//!
//! # Examples
//!
//! Direct usage with [`core::store::TripStore`]:
//! ```
//! use triplog::{core::store::{StoreError, TripStore}, sink::MemorySink};
//!
//! let sink = MemorySink::new();
//! let mut store = TripStore::with_sink(Box::new(sink.clone()));
//! store.add_trip("AI-854", "AirIndia", "Pune", "Delhi", 5000.0);
//! store.add_trip("6E-702", "Indigo", "Pune", "Bengaluru", 3000.0);
//! store.remove_trip("SG-512");
//! store.update_fare_by_trip("6E-702", 5000.0);
//!
//! assert_eq!(store.total_trips(), 2);
//! assert_eq!(store.find_flight_by_number("6E-702")[0].fare, 5000.0);
//! assert!(matches!(
//!     store.find_max_fare_by_operator("SpiceJet"),
//!     Err(StoreError::NotFound(_))
//! ));
//! assert_eq!(sink.messages()[0], "Adding Trip {AI-854}");
//! ```
//!
//! Shared usage through the single-writer runtime:
//! ```no_run
//! use triplog::{
//!     core::store::TripStore,
//!     runtime::handle::{spawn_trip_store, RuntimeConfig},
//!     trip::TripDraft,
//! };
//!
//! # #[tokio::main]
//! # async fn main() {
//! let handle = spawn_trip_store(TripStore::new(), RuntimeConfig::default());
//! handle
//!     .add_trip(TripDraft::new("AI-854", "AirIndia", "Pune", "Delhi", 5000.0))
//!     .await
//!     .expect("add");
//! assert_eq!(handle.total_trips().await.expect("total"), 1);
//! handle.shutdown().await.expect("shutdown");
//! # }
//! ```
#![deny(missing_docs)]

/// Core in-memory trip store.
pub mod core;
/// Single-writer runtime handle and events.
pub mod runtime;
/// Logging collaborator trait and provided sinks.
pub mod sink;
/// Tracing subscriber setup driven by `RUST_LOG`.
pub mod telemetry;
/// Trip domain records, drafts, and filters.
pub mod trip;
/// Shared primitive aliases and enums.
pub mod types;
