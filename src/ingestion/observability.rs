use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::FrameError;

use super::unified::FileFormat;

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LoadSeverity {
    /// Informational event.
    Info,
    /// Warning-level event (non-fatal).
    Warning,
    /// The load failed on its input (bad shape, bad values, ...).
    Error,
    /// The load failed on infrastructure (I/O).
    Critical,
}

/// Context about a load attempt.
#[derive(Debug, Clone)]
pub struct LoadContext {
    /// The input path.
    pub path: PathBuf,
    /// Format used to read the path.
    pub format: FileFormat,
}

/// Shape of a successfully loaded table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadStats {
    /// Number of rows loaded.
    pub rows: usize,
    /// Number of columns loaded.
    pub columns: usize,
}

/// Observer interface for load outcomes.
///
/// Implementors can record metrics, logs, or trigger alerts.
pub trait LoadObserver: Send + Sync {
    /// Called when a load succeeds.
    fn on_success(&self, _ctx: &LoadContext, _stats: LoadStats) {}

    /// Called when a load fails.
    fn on_failure(&self, _ctx: &LoadContext, _severity: LoadSeverity, _error: &FrameError) {}

    /// Called when a failure meets the alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &LoadContext, severity: LoadSeverity, error: &FrameError) {
        self.on_failure(ctx, severity, error)
    }
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn LoadObserver>>,
}

impl CompositeObserver {
    /// Fan out to `observers`, called in order.
    pub fn new(observers: Vec<Arc<dyn LoadObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl LoadObserver for CompositeObserver {
    fn on_success(&self, ctx: &LoadContext, stats: LoadStats) {
        for o in &self.observers {
            o.on_success(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &LoadContext, severity: LoadSeverity, error: &FrameError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &LoadContext, severity: LoadSeverity, error: &FrameError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }
}

/// Logs load events to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl LoadObserver for StdErrObserver {
    fn on_success(&self, ctx: &LoadContext, stats: LoadStats) {
        eprintln!(
            "[load][ok] format={:?} path={} rows={} cols={}",
            ctx.format,
            ctx.path.display(),
            stats.rows,
            stats.columns
        );
    }

    fn on_failure(&self, ctx: &LoadContext, severity: LoadSeverity, error: &FrameError) {
        eprintln!(
            "[load][{:?}] format={:?} path={} err={}",
            severity,
            ctx.format,
            ctx.path.display(),
            error
        );
    }

    fn on_alert(&self, ctx: &LoadContext, severity: LoadSeverity, error: &FrameError) {
        eprintln!(
            "[ALERT][load][{:?}] format={:?} path={} err={}",
            severity,
            ctx.format,
            ctx.path.display(),
            error
        );
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    use super::{CompositeObserver, LoadContext, LoadObserver, LoadSeverity, LoadStats};
    use crate::error::FrameError;
    use crate::ingestion::FileFormat;

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<String>>,
    }

    impl LoadObserver for Recorder {
        fn on_success(&self, _ctx: &LoadContext, stats: LoadStats) {
            self.events.lock().unwrap().push(format!("ok:{}", stats.rows));
        }

        fn on_failure(&self, _ctx: &LoadContext, severity: LoadSeverity, _error: &FrameError) {
            self.events.lock().unwrap().push(format!("fail:{severity:?}"));
        }
    }

    #[test]
    fn severity_orders_by_impact() {
        assert!(LoadSeverity::Info < LoadSeverity::Warning);
        assert!(LoadSeverity::Error < LoadSeverity::Critical);
    }

    #[test]
    fn composite_fans_out_and_alert_defaults_to_failure() {
        let a = Arc::new(Recorder::default());
        let b = Arc::new(Recorder::default());
        let composite = CompositeObserver::new(vec![
            a.clone() as Arc<dyn LoadObserver>,
            b.clone() as Arc<dyn LoadObserver>,
        ]);
        let ctx = LoadContext {
            path: PathBuf::from("x.csv"),
            format: FileFormat::Csv,
        };

        composite.on_success(&ctx, LoadStats { rows: 3, columns: 1 });
        composite.on_alert(&ctx, LoadSeverity::Critical, &FrameError::empty("nothing"));

        for r in [a, b] {
            assert_eq!(*r.events.lock().unwrap(), vec!["ok:3", "fail:Critical"]);
        }
        assert!(format!("{composite:?}").contains("observers_len: 2"));
    }
}
