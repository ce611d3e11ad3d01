//! Trip domain record, draft, and filter types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::Fare;

/// One stored flight trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRecord {
    /// Flight number, e.g. `6E-702`. Not unique across the store.
    pub flight_number: String,
    /// Carrier name.
    pub operator: String,
    /// Departure city.
    pub origin_city: String,
    /// Arrival city.
    pub destination_city: String,
    /// Fare exactly as last supplied by a caller.
    pub fare: Fare,
}

impl fmt::Display for TripRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FlightTrip{{name: {}, operator: {}, origin_city: {}, destination_city: {}, fare: {}}}",
            self.flight_number, self.operator, self.origin_city, self.destination_city, self.fare
        )
    }
}

/// Insert payload used to create a new [`TripRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripDraft {
    /// Flight number.
    pub flight_number: String,
    /// Carrier name.
    pub operator: String,
    /// Departure city.
    pub origin_city: String,
    /// Arrival city.
    pub destination_city: String,
    /// Initial fare.
    pub fare: Fare,
}

impl TripDraft {
    /// Builds a draft from borrowed field values.
    pub fn new(
        flight_number: impl Into<String>,
        operator: impl Into<String>,
        origin_city: impl Into<String>,
        destination_city: impl Into<String>,
        fare: Fare,
    ) -> Self {
        Self {
            flight_number: flight_number.into(),
            operator: operator.into(),
            origin_city: origin_city.into(),
            destination_city: destination_city.into(),
            fare,
        }
    }
}

impl From<TripDraft> for TripRecord {
    fn from(draft: TripDraft) -> Self {
        Self {
            flight_number: draft.flight_number,
            operator: draft.operator,
            origin_city: draft.origin_city,
            destination_city: draft.destination_city,
            fare: draft.fare,
        }
    }
}

/// Predicate selecting the records a scan acts on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TripFilter {
    /// Records with this flight number.
    FlightNumber(String),
    /// Records flown by this carrier.
    Operator(String),
    /// Records departing from this city.
    OriginCity(String),
    /// Records flying exactly this origin/destination pair.
    Route {
        /// Departure city.
        origin: String,
        /// Arrival city.
        destination: String,
    },
}

impl TripFilter {
    /// Returns true when `trip` is selected by this filter.
    pub fn matches(&self, trip: &TripRecord) -> bool {
        match self {
            Self::FlightNumber(name) => trip.flight_number == *name,
            Self::Operator(op) => trip.operator == *op,
            Self::OriginCity(city) => trip.origin_city == *city,
            Self::Route {
                origin,
                destination,
            } => trip.origin_city == *origin && trip.destination_city == *destination,
        }
    }
}

impl fmt::Display for TripFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FlightNumber(name) => write!(f, "flight number {name}"),
            Self::Operator(op) => write!(f, "operator {op}"),
            Self::OriginCity(city) => write!(f, "origin city {city}"),
            Self::Route {
                origin,
                destination,
            } => write!(f, "route {origin}->{destination}"),
        }
    }
}
