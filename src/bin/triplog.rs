use tracing::{error, info};
use triplog::{core::store::TripStore, telemetry, trip::TripRecord};

fn main() {
    if let Err(e) = telemetry::init() {
        eprintln!("failed to install tracing subscriber: {e}");
    }

    if let Err(e) = run() {
        error!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), serde_json::Error> {
    let mut store = TripStore::new();

    store.add_trip("AI-854", "AirIndia", "Pune", "Delhi", 5000.0);
    store.add_trip("6E-702", "Indigo", "Pune", "Bengaluru", 3000.0);
    store.add_trip("6E-302", "Indigo", "Mumbai", "Bengaluru", 3230.0);
    store.add_trip("SJ-512", "SpiceJet", "Bengaluru", "Ahmedabad", 5000.0);
    store.display_all_trips();

    store.remove_trip("SG-512");
    store.display_all_trips();

    store.update_fare_by_trip("6E-702", 5000.0);
    store.display_all_trips();

    info!(
        "Found flights with number (6E-302): {}",
        render(&store.find_flight_by_number("6E-302"))
    );
    info!(
        "Found flights with origin city (Pune): {}",
        render(&store.find_flights_by_origin_city("Pune"))
    );

    match store.find_average_cost_of_all_trips() {
        Ok(avg) => info!("Found average cost for all trips: {avg}"),
        Err(e) => error!("Average cost unavailable: {e}"),
    }
    match store.find_min_fare_between_cities("Pune", "Bengaluru") {
        Ok(fare) => info!("Found minimum fare between Pune->Bengaluru: {fare}"),
        Err(e) => error!("Minimum fare unavailable: {e}"),
    }
    match store.find_max_fare_by_operator("Indigo") {
        Ok(fare) => info!("Found max fare from Indigo: {fare}"),
        Err(e) => error!("Maximum fare unavailable: {e}"),
    }

    store.update_fare_by_operator("AirIndia", 4500.0);
    store.display_all_trips();

    println!("{}", serde_json::to_string_pretty(&store.export_snapshot())?);
    Ok(())
}

fn render(trips: &[TripRecord]) -> String {
    trips
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
