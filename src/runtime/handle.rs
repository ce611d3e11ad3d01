use tokio::sync::{broadcast, mpsc, oneshot};

use crate::{
    core::store::{StoreError, TripSnapshot, TripStore},
    trip::{TripDraft, TripFilter, TripRecord},
    types::Fare,
};

use super::events::TripEvent;

/// Failure of a call made through [`TripStoreHandle`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuntimeError {
    /// The store rejected the query.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// The writer task has shut down.
    #[error("trip store task is no longer running")]
    ChannelClosed,
}

/// Channel sizing for [`spawn_trip_store`].
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Pending commands buffered before callers wait.
    pub command_queue_bound: usize,
    /// Events retained for slow subscribers before they lag.
    pub event_queue_bound: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            command_queue_bound: 256,
            event_queue_bound: 1024,
        }
    }
}

/// Cloneable front end to a store owned by a single writer task.
///
/// Every call is queued and applied in arrival order, so callers on many
/// tasks observe one serial history.
pub struct TripStoreHandle {
    cmd_tx: mpsc::Sender<Command>,
    events_tx: broadcast::Sender<TripEvent>,
}

impl Clone for TripStoreHandle {
    fn clone(&self) -> Self {
        Self {
            cmd_tx: self.cmd_tx.clone(),
            events_tx: self.events_tx.clone(),
        }
    }
}

enum Command {
    Add {
        draft: TripDraft,
        resp: oneshot::Sender<()>,
    },
    Remove {
        flight_number: String,
        resp: oneshot::Sender<usize>,
    },
    UpdateFareByTrip {
        flight_number: String,
        fare: Fare,
        resp: oneshot::Sender<usize>,
    },
    UpdateFareByOperator {
        operator: String,
        fare: Fare,
        resp: oneshot::Sender<usize>,
    },
    Display {
        resp: oneshot::Sender<()>,
    },
    Find {
        filter: TripFilter,
        resp: oneshot::Sender<Vec<TripRecord>>,
    },
    Average {
        resp: oneshot::Sender<Result<Fare, StoreError>>,
    },
    MinFare {
        origin_city: String,
        destination_city: String,
        resp: oneshot::Sender<Result<Fare, StoreError>>,
    },
    MaxFare {
        operator: String,
        resp: oneshot::Sender<Result<Fare, StoreError>>,
    },
    Total {
        resp: oneshot::Sender<usize>,
    },
    Snapshot {
        resp: oneshot::Sender<TripSnapshot>,
    },
    Shutdown {
        resp: oneshot::Sender<()>,
    },
}

/// Moves `store` onto a new tokio task and returns a handle to it.
///
/// Must be called from within a tokio runtime.
pub fn spawn_trip_store(store: TripStore, config: RuntimeConfig) -> TripStoreHandle {
    let (cmd_tx, mut cmd_rx) = mpsc::channel::<Command>(config.command_queue_bound.max(1));
    let (events_tx, _) = broadcast::channel::<TripEvent>(config.event_queue_bound.max(1));

    let events_tx_loop = events_tx.clone();

    tokio::spawn(async move {
        let mut store = store;
        tracing::debug!(trips = store.total_trips(), "trip store task started");

        while let Some(cmd) = cmd_rx.recv().await {
            if handle_command(cmd, &mut store, &events_tx_loop) {
                break;
            }
        }

        tracing::debug!(trips = store.total_trips(), "trip store task stopped");
    });

    TripStoreHandle { cmd_tx, events_tx }
}

impl TripStoreHandle {
    /// Subscribes to mutation events emitted after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<TripEvent> {
        self.events_tx.subscribe()
    }

    /// Appends a trip.
    pub async fn add_trip(&self, draft: TripDraft) -> Result<(), RuntimeError> {
        self.request(|resp| Command::Add { draft, resp }).await
    }

    /// Removes every trip with `flight_number`; returns how many went.
    pub async fn remove_trip(&self, flight_number: impl Into<String>) -> Result<usize, RuntimeError> {
        let flight_number = flight_number.into();
        self.request(|resp| Command::Remove {
            flight_number,
            resp,
        })
        .await
    }

    /// Sets `fare` on every trip with `flight_number`.
    pub async fn update_fare_by_trip(
        &self,
        flight_number: impl Into<String>,
        fare: Fare,
    ) -> Result<usize, RuntimeError> {
        let flight_number = flight_number.into();
        self.request(|resp| Command::UpdateFareByTrip {
            flight_number,
            fare,
            resp,
        })
        .await
    }

    /// Sets `fare` on every trip flown by `operator`.
    pub async fn update_fare_by_operator(
        &self,
        operator: impl Into<String>,
        fare: Fare,
    ) -> Result<usize, RuntimeError> {
        let operator = operator.into();
        self.request(|resp| Command::UpdateFareByOperator {
            operator,
            fare,
            resp,
        })
        .await
    }

    /// Writes the full table to the store's sink.
    pub async fn display_all_trips(&self) -> Result<(), RuntimeError> {
        self.request(|resp| Command::Display { resp }).await
    }

    /// Trips with `flight_number`, in sequence order.
    pub async fn find_flight_by_number(
        &self,
        flight_number: impl Into<String>,
    ) -> Result<Vec<TripRecord>, RuntimeError> {
        self.find(TripFilter::FlightNumber(flight_number.into())).await
    }

    /// Trips departing `origin_city`, in sequence order.
    pub async fn find_flights_by_origin_city(
        &self,
        origin_city: impl Into<String>,
    ) -> Result<Vec<TripRecord>, RuntimeError> {
        self.find(TripFilter::OriginCity(origin_city.into())).await
    }

    /// Trips selected by `filter`, in sequence order.
    pub async fn find(&self, filter: TripFilter) -> Result<Vec<TripRecord>, RuntimeError> {
        self.request(|resp| Command::Find { filter, resp }).await
    }

    /// Mean fare over all trips.
    pub async fn find_average_cost_of_all_trips(&self) -> Result<Fare, RuntimeError> {
        self.request(|resp| Command::Average { resp }).await?.map_err(RuntimeError::from)
    }

    /// Lowest fare on a route.
    pub async fn find_min_fare_between_cities(
        &self,
        origin_city: impl Into<String>,
        destination_city: impl Into<String>,
    ) -> Result<Fare, RuntimeError> {
        let origin_city = origin_city.into();
        let destination_city = destination_city.into();
        self.request(|resp| Command::MinFare {
            origin_city,
            destination_city,
            resp,
        })
        .await?
        .map_err(RuntimeError::from)
    }

    /// Highest fare flown by `operator`.
    pub async fn find_max_fare_by_operator(&self, operator: impl Into<String>) -> Result<Fare, RuntimeError> {
        let operator = operator.into();
        self.request(|resp| Command::MaxFare { operator, resp })
            .await?
            .map_err(RuntimeError::from)
    }

    /// Number of stored trips.
    pub async fn total_trips(&self) -> Result<usize, RuntimeError> {
        self.request(|resp| Command::Total { resp }).await
    }

    /// Consistent copy of the whole sequence.
    pub async fn snapshot(&self) -> Result<TripSnapshot, RuntimeError> {
        self.request(|resp| Command::Snapshot { resp }).await
    }

    /// Stops the writer task. Later calls fail with [`RuntimeError::ChannelClosed`].
    pub async fn shutdown(&self) -> Result<(), RuntimeError> {
        self.request(|resp| Command::Shutdown { resp }).await
    }

    async fn request<T>(&self, make: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(make(tx))
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }
}

fn handle_command(cmd: Command, store: &mut TripStore, events_tx: &broadcast::Sender<TripEvent>) -> bool {
    match cmd {
        Command::Add { draft, resp } => {
            let flight_number = draft.flight_number.clone();
            store.add(draft);
            let _ = events_tx.send(TripEvent::Added { flight_number });
            let _ = resp.send(());
        }
        Command::Remove {
            flight_number,
            resp,
        } => {
            let count = store.remove_trip(&flight_number);
            let _ = events_tx.send(TripEvent::Removed {
                flight_number,
                count,
            });
            let _ = resp.send(count);
        }
        Command::UpdateFareByTrip {
            flight_number,
            fare,
            resp,
        } => {
            let count = store.update_fare_by_trip(&flight_number, fare);
            let _ = events_tx.send(TripEvent::FareUpdated {
                filter: TripFilter::FlightNumber(flight_number),
                count,
            });
            let _ = resp.send(count);
        }
        Command::UpdateFareByOperator {
            operator,
            fare,
            resp,
        } => {
            let count = store.update_fare_by_operator(&operator, fare);
            let _ = events_tx.send(TripEvent::FareUpdated {
                filter: TripFilter::Operator(operator),
                count,
            });
            let _ = resp.send(count);
        }
        Command::Display { resp } => {
            store.display_all_trips();
            let _ = resp.send(());
        }
        Command::Find { filter, resp } => {
            let _ = resp.send(store.find(&filter));
        }
        Command::Average { resp } => {
            let _ = resp.send(store.find_average_cost_of_all_trips());
        }
        Command::MinFare {
            origin_city,
            destination_city,
            resp,
        } => {
            let _ = resp.send(store.find_min_fare_between_cities(&origin_city, &destination_city));
        }
        Command::MaxFare { operator, resp } => {
            let _ = resp.send(store.find_max_fare_by_operator(&operator));
        }
        Command::Total { resp } => {
            let _ = resp.send(store.total_trips());
        }
        Command::Snapshot { resp } => {
            let _ = resp.send(store.export_snapshot());
        }
        Command::Shutdown { resp } => {
            let _ = resp.send(());
            return true;
        }
    }

    false
}
