use std::time::Duration;

use triplog::{
    core::store::{StoreError, TripStore},
    runtime::{
        events::TripEvent,
        handle::{RuntimeConfig, RuntimeError, spawn_trip_store},
    },
    sink::MemorySink,
    trip::{TripDraft, TripFilter},
};

fn draft(name: &str, operator: &str, origin: &str, destination: &str, fare: f64) -> TripDraft {
    TripDraft::new(name, operator, origin, destination, fare)
}

#[tokio::test]
async fn runtime_mutations_queries_and_events_ordered() {
    let sink = MemorySink::new();
    let handle = spawn_trip_store(TripStore::with_sink(Box::new(sink.clone())), RuntimeConfig::default());
    let mut sub = handle.subscribe();

    handle
        .add_trip(draft("AI-854", "AirIndia", "Pune", "Delhi", 5000.0))
        .await
        .expect("add");
    handle
        .add_trip(draft("6E-702", "Indigo", "Pune", "Bengaluru", 3000.0))
        .await
        .expect("add");
    assert_eq!(handle.remove_trip("SG-512").await.expect("remove"), 0);
    assert_eq!(handle.update_fare_by_trip("6E-702", 5000.0).await.expect("update"), 1);

    assert_eq!(handle.total_trips().await.expect("total"), 2);
    assert_eq!(
        handle.find_flight_by_number("6E-702").await.expect("find")[0].fare,
        5000.0
    );
    assert_eq!(handle.find_flights_by_origin_city("Pune").await.expect("find").len(), 2);

    let mut seen = Vec::new();
    for _ in 0..4 {
        let evt = tokio::time::timeout(Duration::from_secs(1), sub.recv())
            .await
            .expect("event")
            .expect("recv");
        seen.push(evt);
    }

    assert_eq!(
        seen,
        [
            TripEvent::Added {
                flight_number: "AI-854".to_string()
            },
            TripEvent::Added {
                flight_number: "6E-702".to_string()
            },
            TripEvent::Removed {
                flight_number: "SG-512".to_string(),
                count: 0
            },
            TripEvent::FareUpdated {
                filter: TripFilter::FlightNumber("6E-702".to_string()),
                count: 1
            },
        ]
    );

    handle.display_all_trips().await.expect("display");
    assert_eq!(
        sink.messages().iter().filter(|m| m.starts_with(" (+) ")).count(),
        2
    );

    handle.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn aggregate_errors_surface_through_handle() {
    let handle = spawn_trip_store(TripStore::with_sink(Box::new(MemorySink::new())), RuntimeConfig::default());

    assert_eq!(
        handle.find_average_cost_of_all_trips().await,
        Err(RuntimeError::Store(StoreError::EmptyStore))
    );
    assert!(matches!(
        handle.find_max_fare_by_operator("Indigo").await,
        Err(RuntimeError::Store(StoreError::NotFound(_)))
    ));

    handle
        .add_trip(draft("6E-702", "Indigo", "Pune", "Bengaluru", 3000.0))
        .await
        .expect("add");
    handle
        .add_trip(draft("6E-302", "Indigo", "Mumbai", "Bengaluru", 3230.0))
        .await
        .expect("add");

    assert_eq!(handle.find_max_fare_by_operator("Indigo").await, Ok(3230.0));
    assert_eq!(handle.find_min_fare_between_cities("Pune", "Bengaluru").await, Ok(3000.0));
    assert_eq!(handle.find_average_cost_of_all_trips().await, Ok(3115.0));
    assert_eq!(handle.update_fare_by_operator("Indigo", 100.0).await, Ok(2));
    assert_eq!(handle.snapshot().await.expect("snapshot").trips.len(), 2);

    handle.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn clones_share_one_writer_and_calls_fail_after_shutdown() {
    let handle = spawn_trip_store(TripStore::with_sink(Box::new(MemorySink::new())), RuntimeConfig::default());

    let mut tasks = Vec::new();
    for i in 0..16u32 {
        let h = handle.clone();
        tasks.push(tokio::spawn(async move {
            h.add_trip(draft(&format!("T-{i}"), "Indigo", "Pune", "Delhi", f64::from(i)))
                .await
        }));
    }
    for task in tasks {
        task.await.expect("join").expect("add");
    }
    assert_eq!(handle.total_trips().await.expect("total"), 16);

    handle.shutdown().await.expect("shutdown");
    assert_eq!(handle.total_trips().await, Err(RuntimeError::ChannelClosed));
}
