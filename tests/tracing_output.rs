use std::{
    io,
    sync::{Arc, Mutex},
};

use tracing::Level;
use triplog::{
    core::store::TripStore,
    sink::{LogSink, TracingSink},
    telemetry,
    types::Severity,
};

#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().expect("lock").clone()).expect("utf8")
    }
}

impl io::Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("lock").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn capture(directives: &str, f: impl FnOnce()) -> String {
    let buf = SharedBuf::default();
    let writer = buf.clone();
    let subscriber = telemetry::subscriber(telemetry::filter_from(Some(directives)), move || writer.clone());
    tracing::subscriber::with_default(subscriber, f);
    buf.contents()
}

fn seeded_with_tracing() -> TripStore {
    let mut store = TripStore::new();
    store.add_trip("AI-854", "AirIndia", "Pune", "Delhi", 5000.0);
    store.add_trip("6E-702", "Indigo", "Pune", "Bengaluru", 3000.0);
    store
}

#[test]
fn error_directive_suppresses_info() {
    let subscriber = telemetry::subscriber(telemetry::filter_from(Some("error")), io::sink);
    tracing::subscriber::with_default(subscriber, || {
        assert!(!tracing::enabled!(Level::INFO));
        assert!(tracing::enabled!(Level::ERROR));
    });
}

#[test]
fn missing_directives_default_to_info() {
    let subscriber = telemetry::subscriber(telemetry::filter_from(None), io::sink);
    tracing::subscriber::with_default(subscriber, || {
        assert!(tracing::enabled!(Level::INFO));
        assert!(!tracing::enabled!(Level::DEBUG));
    });
}

#[test]
fn severities_map_to_tracing_levels() {
    let out = capture("debug", || {
        let sink = TracingSink;
        sink.log(Severity::Info, "info line");
        sink.log(Severity::Warn, "warn line");
        sink.log(Severity::Error, "error line");
        sink.log(Severity::Fatal, "fatal line");
        sink.log(Severity::Debug, "debug line");
    });

    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 5, "{out}");
    assert!(lines[0].contains("INFO") && lines[0].contains("info line"));
    assert!(lines[1].contains("WARN") && lines[1].contains("warn line"));
    assert!(lines[2].contains("ERROR") && lines[2].contains("error line"));
    assert!(!lines[2].contains("fatal=true"));
    assert!(lines[3].contains("ERROR") && lines[3].contains("fatal line"));
    assert!(lines[3].contains("fatal=true"));
    assert!(lines[4].contains("DEBUG") && lines[4].contains("debug line"));
}

#[test]
fn tracing_sink_respects_filter_level() {
    let out = capture("info", || {
        let sink = TracingSink;
        assert!(sink.enabled(Severity::Info));
        assert!(!sink.enabled(Severity::Debug));
        sink.log(Severity::Debug, "hidden");
    });
    assert!(out.is_empty(), "{out}");
}

#[test]
fn display_writes_table_when_info_enabled() {
    let out = capture("info", || {
        let store = seeded_with_tracing();
        store.display_all_trips();
    });

    assert!(out.contains("Adding Trip {AI-854}"));
    assert!(out.contains("Current available trips:"));
    assert_eq!(out.matches(" (+) ").count(), 2, "{out}");
    assert!(out.contains(" (+) FlightTrip{name: AI-854, operator: AirIndia"));
    assert!(out.contains(" (+) FlightTrip{name: 6E-702, operator: Indigo"));
}

#[test]
fn display_writes_nothing_when_info_disabled() {
    let out = capture("warn", || {
        let store = seeded_with_tracing();
        store.display_all_trips();
    });
    assert!(out.is_empty(), "{out}");
}
