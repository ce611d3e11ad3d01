//! Runtime event stream payloads.

use crate::trip::TripFilter;

/// Events emitted from the single-writer runtime loop after each mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TripEvent {
    /// A trip was appended.
    Added {
        /// Flight number of the new trip.
        flight_number: String,
    },
    /// A remove request was processed.
    Removed {
        /// Requested flight number.
        flight_number: String,
        /// Number of records removed, possibly zero.
        count: usize,
    },
    /// A fare update was processed.
    FareUpdated {
        /// Records the update targeted.
        filter: TripFilter,
        /// Number of records changed, possibly zero.
        count: usize,
    },
}
