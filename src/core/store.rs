use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    sink::{LogSink, TracingSink},
    trip::{TripDraft, TripFilter, TripRecord},
    types::{Fare, Severity},
};

/// Marker prefixed to every record line written by [`TripStore::display_all_trips`].
pub const DISPLAY_MARKER: &str = " (+) ";

/// Failure of an aggregate query.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The filter selected zero records.
    #[error("no trips match {0}")]
    NotFound(TripFilter),
    /// Averaging was requested over zero records.
    #[error("store holds no trips")]
    EmptyStore,
}

/// Serializable copy of the store contents in sequence order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TripSnapshot {
    /// Records in insertion order.
    pub trips: Vec<TripRecord>,
}

/// Ordered, unindexed collection of trip records.
///
/// Flight numbers are not unique; operations keyed by flight number act on
/// every matching record. Every query is a full scan in insertion order.
pub struct TripStore {
    trips: Vec<TripRecord>,
    sink: Box<dyn LogSink>,
}

impl Default for TripStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TripStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TripStore")
            .field("trips", &self.trips)
            .finish_non_exhaustive()
    }
}

impl TripStore {
    /// Creates an empty store that logs through [`TracingSink`].
    pub fn new() -> Self {
        Self::with_sink(Box::new(TracingSink))
    }

    /// Creates an empty store writing its audit trail to `sink`.
    pub fn with_sink(sink: Box<dyn LogSink>) -> Self {
        Self {
            trips: Vec::new(),
            sink,
        }
    }

    /// Rebuilds a store holding exactly the records of `snapshot`.
    pub fn from_snapshot(snapshot: TripSnapshot, sink: Box<dyn LogSink>) -> Self {
        Self {
            trips: snapshot.trips,
            sink,
        }
    }

    /// Copies the current sequence out.
    pub fn export_snapshot(&self) -> TripSnapshot {
        TripSnapshot {
            trips: self.trips.clone(),
        }
    }

    /// Appends a trip. Duplicate flight numbers and any fare value are accepted.
    pub fn add_trip(
        &mut self,
        flight_number: &str,
        operator: &str,
        origin_city: &str,
        destination_city: &str,
        fare: Fare,
    ) {
        self.add(TripDraft::new(
            flight_number,
            operator,
            origin_city,
            destination_city,
            fare,
        ));
    }

    /// Appends a trip built from `draft`.
    pub fn add(&mut self, draft: TripDraft) {
        self.log(Severity::Info, &format!("Adding Trip {{{}}}", draft.flight_number));
        self.trips.push(draft.into());
    }

    /// Removes every trip with `flight_number` and returns how many went.
    ///
    /// Survivors keep their relative order. Missing flight numbers are a no-op.
    pub fn remove_trip(&mut self, flight_number: &str) -> usize {
        self.log(Severity::Info, &format!("Removing Trip {{{flight_number}}}"));
        let before = self.trips.len();
        self.trips.retain(|t| t.flight_number != flight_number);
        before - self.trips.len()
    }

    /// Sets `fare` on every trip with `flight_number`; returns the match count.
    pub fn update_fare_by_trip(&mut self, flight_number: &str, fare: Fare) -> usize {
        self.log(
            Severity::Info,
            &format!("Updating Fare for Trip {{{flight_number}}}"),
        );
        self.set_fare_where(&TripFilter::FlightNumber(flight_number.to_string()), fare)
    }

    /// Sets `fare` on every trip flown by `operator`; returns the match count.
    pub fn update_fare_by_operator(&mut self, operator: &str, fare: Fare) -> usize {
        self.log(
            Severity::Info,
            &format!("Updating Fare for Operator {{{operator}}}"),
        );
        self.set_fare_where(&TripFilter::Operator(operator.to_string()), fare)
    }

    /// Writes a header and one marked line per trip to the sink.
    pub fn display_all_trips(&self) {
        if !self.sink.enabled(Severity::Info) {
            return;
        }
        self.log(Severity::Info, "Current available trips:");
        for trip in &self.trips {
            self.log(Severity::Info, &format!("{DISPLAY_MARKER}{trip}"));
        }
    }

    /// Returns every trip with `flight_number`, in sequence order.
    pub fn find_flight_by_number(&self, flight_number: &str) -> Vec<TripRecord> {
        self.find(&TripFilter::FlightNumber(flight_number.to_string()))
    }

    /// Returns every trip departing `origin_city`, in sequence order.
    pub fn find_flights_by_origin_city(&self, origin_city: &str) -> Vec<TripRecord> {
        self.find(&TripFilter::OriginCity(origin_city.to_string()))
    }

    /// Returns clones of every trip selected by `filter`.
    pub fn find(&self, filter: &TripFilter) -> Vec<TripRecord> {
        self.matching(filter).cloned().collect()
    }

    /// Mean fare over all trips.
    pub fn find_average_cost_of_all_trips(&self) -> Result<Fare, StoreError> {
        if self.trips.is_empty() {
            return Err(StoreError::EmptyStore);
        }
        let sum: Fare = self.trips.iter().map(|t| t.fare).sum();
        Ok(sum / self.trips.len() as Fare)
    }

    /// Lowest fare on the `origin_city` to `destination_city` route.
    pub fn find_min_fare_between_cities(
        &self,
        origin_city: &str,
        destination_city: &str,
    ) -> Result<Fare, StoreError> {
        let filter = TripFilter::Route {
            origin: origin_city.to_string(),
            destination: destination_city.to_string(),
        };
        self.fold_fares(&filter, Fare::min)
    }

    /// Highest fare among trips flown by `operator`.
    pub fn find_max_fare_by_operator(&self, operator: &str) -> Result<Fare, StoreError> {
        let filter = TripFilter::Operator(operator.to_string());
        self.fold_fares(&filter, Fare::max)
    }

    /// Number of stored trips.
    pub fn total_trips(&self) -> usize {
        self.trips.len()
    }

    /// True when no trips are stored.
    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    /// Borrows the full sequence.
    pub fn trips(&self) -> &[TripRecord] {
        &self.trips
    }

    fn matching<'a>(&'a self, filter: &'a TripFilter) -> impl Iterator<Item = &'a TripRecord> + 'a {
        self.trips.iter().filter(move |t| filter.matches(t))
    }

    fn set_fare_where(&mut self, filter: &TripFilter, fare: Fare) -> usize {
        let mut updated = 0;
        for trip in self.trips.iter_mut().filter(|t| filter.matches(t)) {
            trip.fare = fare;
            updated += 1;
        }
        updated
    }

    fn fold_fares(&self, filter: &TripFilter, pick: fn(Fare, Fare) -> Fare) -> Result<Fare, StoreError> {
        self.matching(filter)
            .map(|t| t.fare)
            .reduce(pick)
            .ok_or_else(|| StoreError::NotFound(filter.clone()))
    }

    fn log(&self, severity: Severity, line: &str) {
        self.sink.log(severity, line);
    }
}
