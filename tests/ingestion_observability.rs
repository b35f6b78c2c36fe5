use std::sync::{Arc, Mutex};

use typed_frame::FrameError;
use typed_frame::ingestion::{
    read_from_path, CompositeObserver, FileFormat, LoadContext, LoadObserver, LoadSeverity,
    LoadStats, ReadOptions, StdErrObserver,
};

#[derive(Default)]
struct RecordingObserver {
    successes: Mutex<Vec<LoadStats>>,
    failures: Mutex<Vec<LoadSeverity>>,
    alerts: Mutex<Vec<LoadSeverity>>,
}

impl LoadObserver for RecordingObserver {
    fn on_success(&self, _ctx: &LoadContext, stats: LoadStats) {
        self.successes.lock().unwrap().push(stats);
    }

    fn on_failure(&self, _ctx: &LoadContext, severity: LoadSeverity, _error: &FrameError) {
        self.failures.lock().unwrap().push(severity);
    }

    fn on_alert(&self, _ctx: &LoadContext, severity: LoadSeverity, _error: &FrameError) {
        self.alerts.lock().unwrap().push(severity);
    }
}

fn options_with(obs: Arc<RecordingObserver>) -> ReadOptions {
    ReadOptions {
        format: Some(FileFormat::Csv),
        observer: Some(obs),
        alert_at_or_above: LoadSeverity::Critical,
        ..Default::default()
    }
}

#[test]
fn observer_receives_failure_and_alert_on_critical_io_error() {
    let obs = Arc::new(RecordingObserver::default());

    // Missing file -> Io error -> Critical
    let _ = read_from_path("tests/fixtures/does_not_exist.csv", &options_with(obs.clone()))
        .unwrap_err();

    assert_eq!(*obs.failures.lock().unwrap(), vec![LoadSeverity::Critical]);
    assert_eq!(*obs.alerts.lock().unwrap(), vec![LoadSeverity::Critical]);
}

#[test]
fn observer_receives_failure_without_alert_for_non_critical_error() {
    let obs = Arc::new(RecordingObserver::default());

    // Ragged record -> csv parse error -> Error severity (not Critical) -> no alert
    let err = read_from_path("tests/fixtures/ragged.csv", &options_with(obs.clone())).unwrap_err();
    assert!(matches!(err, FrameError::Csv(_)));

    assert_eq!(*obs.failures.lock().unwrap(), vec![LoadSeverity::Error]);
    assert!(obs.alerts.lock().unwrap().is_empty());
}

#[test]
fn lower_threshold_alerts_on_errors_too() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = ReadOptions {
        alert_at_or_above: LoadSeverity::Error,
        ..options_with(obs.clone())
    };

    let _ = read_from_path("tests/fixtures/ragged.csv", &opts).unwrap_err();
    assert_eq!(*obs.alerts.lock().unwrap(), vec![LoadSeverity::Error]);
}

#[test]
fn observer_receives_success_stats_through_a_composite() {
    let obs = Arc::new(RecordingObserver::default());
    let composite = CompositeObserver::new(vec![
        obs.clone() as Arc<dyn LoadObserver>,
        Arc::new(StdErrObserver) as Arc<dyn LoadObserver>,
    ]);
    let opts = ReadOptions {
        observer: Some(Arc::new(composite)),
        ..Default::default()
    };

    let df = read_from_path("tests/fixtures/people.json", &opts).unwrap();
    assert_eq!(
        *obs.successes.lock().unwrap(),
        vec![LoadStats {
            rows: df.nrow(),
            columns: df.ncol()
        }]
    );
    assert!(obs.failures.lock().unwrap().is_empty());
}
