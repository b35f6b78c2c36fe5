//! Execution engine for running the expensive table operations in parallel.
//!
//! This module sits "above" [`crate::frame`] and provides:
//!
//! - Chunked, parallel join probing and per-group aggregation on a rayon pool
//! - Resource limits / throttling (in-flight chunks)
//! - Real-time metrics + observer hooks for monitoring
//!
//! Every operation returns exactly what its sequential counterpart on [`DataFrame`] or
//! [`Groups`] returns, including row order.
//!
//! ```rust
//! use typed_frame::execution::{ExecutionEngine, ExecutionOptions};
//! use typed_frame::frame::{DataFrame, JoinKind};
//! use typed_frame::series::Series;
//! use typed_frame::types::DataType;
//!
//! # fn main() -> Result<(), typed_frame::FrameError> {
//! let left = DataFrame::new(vec![Series::new([1, 2, 3], DataType::Int64, "id")])?;
//! let right = DataFrame::new(vec![
//!     Series::new([3, 1], DataType::Int64, "id"),
//!     Series::new(["c", "a"], DataType::Utf8, "tag"),
//! ])?;
//!
//! let engine = ExecutionEngine::new(ExecutionOptions { chunk_size: 1, ..Default::default() })?;
//! let out = engine.join(JoinKind::Left, &left, &right, &["id"])?;
//! assert_eq!(out, left.left_join(&right, &["id"])?);
//! # Ok(())
//! # }
//! ```

mod observer;
mod semaphore;

use std::ops::Range;
use std::sync::Arc;
use std::time::{Duration, Instant};

use rayon::prelude::*;
use rayon::ThreadPool;
use rayon::ThreadPoolBuilder;

use crate::error::{FrameError, FrameResult};
use crate::frame::{AggregationType, DataFrame, Groups, JoinKind, JoinPlan};
use crate::series::Series;

pub use observer::{
    ExecutionEvent, ExecutionMetrics, ExecutionMetricsSnapshot, ExecutionObserver,
    StdErrExecutionObserver,
};

use semaphore::Semaphore;

/// Configuration for the [`ExecutionEngine`].
#[derive(Debug, Clone)]
pub struct ExecutionOptions {
    /// Number of worker threads used by the engine.
    ///
    /// If `None`, uses the platform's available parallelism.
    pub num_threads: Option<usize>,
    /// Number of work items per chunk: major rows for a join, groups for an aggregation,
    /// columns for a column apply.
    pub chunk_size: usize,
    /// Upper bound on concurrently executing chunks.
    ///
    /// This is an additional throttle on top of `num_threads`.
    pub max_in_flight_chunks: usize,
}

impl Default for ExecutionOptions {
    fn default() -> Self {
        let n = available_threads();
        Self {
            num_threads: Some(n),
            chunk_size: 1_024,
            max_in_flight_chunks: n,
        }
    }
}

/// A configurable execution engine for joins, aggregations and column applies.
pub struct ExecutionEngine {
    pool: ThreadPool,
    opts: ExecutionOptions,
    observer: Option<Arc<dyn ExecutionObserver>>,
    metrics: Arc<ExecutionMetrics>,
}

impl std::fmt::Debug for ExecutionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutionEngine")
            .field("opts", &self.opts)
            .field("observer_set", &self.observer.is_some())
            .finish()
    }
}

impl ExecutionEngine {
    /// Create a new engine with the given options.
    ///
    /// `chunk_size`, `max_in_flight_chunks` and `num_threads` (when set) must be non-zero.
    pub fn new(opts: ExecutionOptions) -> FrameResult<Self> {
        if opts.chunk_size == 0 {
            return Err(FrameError::unsupported("chunk_size must be > 0"));
        }
        if opts.max_in_flight_chunks == 0 {
            return Err(FrameError::unsupported("max_in_flight_chunks must be > 0"));
        }
        if opts.num_threads == Some(0) {
            return Err(FrameError::unsupported("num_threads must be > 0 when set"));
        }

        let pool = ThreadPoolBuilder::new()
            .num_threads(opts.num_threads.unwrap_or_else(available_threads))
            .build()?;

        Ok(Self {
            pool,
            opts,
            observer: None,
            metrics: Arc::new(ExecutionMetrics::new()),
        })
    }

    /// Attach an observer for execution events (metrics/logging).
    pub fn with_observer(mut self, observer: Arc<dyn ExecutionObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Get a handle to real-time execution metrics.
    pub fn metrics(&self) -> Arc<ExecutionMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Parallel [`DataFrame::join`]: major rows are probed in chunks.
    pub fn join(
        &self,
        kind: JoinKind,
        left: &DataFrame,
        right: &DataFrame,
        keys: &[&str],
    ) -> FrameResult<DataFrame> {
        let plan = JoinPlan::keyed(kind, left, right, keys)?;
        self.run(|| {
            self.emit(ExecutionEvent::JoinStarted {
                kind: Some(kind),
                left_rows: left.nrow(),
                right_rows: right.nrow(),
            });
            self.run_plan(&plan)
        })
    }

    /// Parallel [`DataFrame::cross_join`].
    pub fn cross_join(&self, left: &DataFrame, right: &DataFrame) -> FrameResult<DataFrame> {
        let plan = JoinPlan::cross(left, right);
        self.run(|| {
            self.emit(ExecutionEvent::JoinStarted {
                kind: None,
                left_rows: left.nrow(),
                right_rows: right.nrow(),
            });
            self.run_plan(&plan)
        })
    }

    fn run_plan(&self, plan: &JoinPlan<'_>) -> FrameResult<DataFrame> {
        let pairs = self.run_chunks(plan.major_rows(), |rows| Ok(plan.probe(rows)))?;
        plan.materialize(&plan.finish(pairs))
    }

    /// Parallel [`Groups::aggregation`]: groups are summarized in chunks.
    pub fn aggregate(
        &self,
        groups: &Groups,
        kinds: &[AggregationType],
        colnames: &[&str],
    ) -> FrameResult<DataFrame> {
        let fields = groups.aggregation_fields(kinds, colnames)?;
        let frames: Vec<&DataFrame> = groups.frames().collect();
        self.run(|| {
            self.emit(ExecutionEvent::AggregationStarted {
                groups: frames.len(),
                fields: fields.len(),
            });
            let rows = self.run_chunks(frames.len(), |range| {
                frames[range]
                    .iter()
                    .map(|sub| groups.summarize(sub, &fields))
                    .collect()
            })?;
            groups.summary_frame(&fields, rows)
        })
    }

    /// Parallel [`DataFrame::capply`]: columns are transformed in chunks.
    pub fn capply<F>(&self, frame: &DataFrame, f: F) -> FrameResult<DataFrame>
    where
        F: Fn(&Series) -> Series + Send + Sync,
    {
        let columns = frame.columns();
        self.run(|| {
            let out = self.run_chunks(columns.len(), |range| {
                Ok(columns[range]
                    .iter()
                    .map(|col| f(col).with_name(col.name()))
                    .collect())
            })?;
            DataFrame::new(out)
        })
    }

    /// Bracket a run with metrics and `RunStarted`/`RunFinished` events, inside the pool.
    fn run<T, F>(&self, body: F) -> FrameResult<T>
    where
        T: Send,
        F: FnOnce() -> FrameResult<T> + Send,
    {
        let start = Instant::now();
        self.metrics.begin_run();
        self.emit(ExecutionEvent::RunStarted);

        let out = self.pool.install(body);

        self.metrics.end_run(start.elapsed());
        self.emit(ExecutionEvent::RunFinished {
            elapsed: start.elapsed(),
            metrics: self.metrics.snapshot(),
        });
        out
    }

    /// Split `0..total` into chunks, run `work` on each in parallel under the in-flight limit,
    /// and concatenate the outputs in chunk order.
    fn run_chunks<T, W>(&self, total: usize, work: W) -> FrameResult<Vec<T>>
    where
        T: Send,
        W: Fn(Range<usize>) -> FrameResult<Vec<T>> + Sync,
    {
        let sem = Semaphore::new(self.opts.max_in_flight_chunks);
        let per_chunk = chunk_ranges(total, self.opts.chunk_size)
            .into_par_iter()
            .map(|range| {
                let waited = sem.acquire();
                if waited > Duration::ZERO {
                    self.metrics.on_throttle_wait(waited);
                    self.emit(ExecutionEvent::ThrottleWaited { duration: waited });
                }

                self.metrics.on_chunk_start();
                self.emit(ExecutionEvent::ChunkStarted {
                    start_row: range.start,
                    row_count: range.len(),
                });

                let n = range.len();
                let out = work(range);
                self.metrics.on_rows_processed(n);

                self.emit(ExecutionEvent::ChunkFinished {
                    output_rows: out.as_ref().map_or(0, Vec::len),
                });
                self.metrics.on_chunk_end();
                sem.release();
                out
            })
            .collect::<FrameResult<Vec<Vec<T>>>>()?;

        Ok(per_chunk.into_iter().flatten().collect())
    }

    fn emit(&self, event: ExecutionEvent) {
        if let Some(obs) = &self.observer {
            obs.on_event(&event);
        }
    }
}

fn available_threads() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

fn chunk_ranges(total: usize, chunk_size: usize) -> Vec<Range<usize>> {
    (0..total)
        .step_by(chunk_size)
        .map(|start| start..(start + chunk_size).min(total))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use super::{chunk_ranges, ExecutionEngine, ExecutionOptions};
    use crate::error::FrameError;
    use crate::execution::{ExecutionEvent, ExecutionObserver};
    use crate::frame::{AggregationType, DataFrame, JoinKind};
    use crate::series::Series;
    use crate::types::DataType;

    fn engine(max_in_flight_chunks: usize) -> ExecutionEngine {
        ExecutionEngine::new(ExecutionOptions {
            num_threads: Some(4),
            chunk_size: 1,
            max_in_flight_chunks,
        })
        .unwrap()
    }

    fn wide_frame(ncol: usize) -> DataFrame {
        DataFrame::new(
            (0..ncol)
                .map(|c| Series::new([c as i64], DataType::Int64, format!("c{c}")))
                .collect(),
        )
        .unwrap()
    }

    fn people() -> DataFrame {
        DataFrame::new(vec![
            Series::new([1, 2, 2, 3, 4, 1], DataType::Int64, "id"),
            Series::new(["a", "b", "c", "d", "e", "f"], DataType::Utf8, "name"),
        ])
        .unwrap()
    }

    fn scores() -> DataFrame {
        DataFrame::new(vec![
            Series::new([2, 1, 5, 2], DataType::Int64, "id"),
            Series::new([0.5, 1.5, 2.5, 3.5], DataType::Float64, "score"),
        ])
        .unwrap()
    }

    #[test]
    fn chunk_ranges_cover_every_row_once() {
        assert_eq!(chunk_ranges(5, 2), vec![0..2, 2..4, 4..5]);
        assert!(chunk_ranges(0, 3).is_empty());
    }

    #[test]
    fn invalid_options_are_rejected() {
        let err = ExecutionEngine::new(ExecutionOptions {
            chunk_size: 0,
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, FrameError::Unsupported { .. }));
    }

    #[test]
    fn parallel_joins_match_sequential_joins() {
        let (l, r) = (people(), scores());
        for e in [engine(4), engine(1)] {
            for kind in [JoinKind::Inner, JoinKind::Left, JoinKind::Right, JoinKind::Outer] {
                let par = e.join(kind, &l, &r, &["id"]).unwrap();
                assert_eq!(par, l.join(kind, &r, &["id"]).unwrap(), "{kind:?}");
            }
            assert_eq!(e.cross_join(&l, &r).unwrap(), l.cross_join(&r).unwrap());
        }
    }

    #[test]
    fn parallel_aggregation_matches_sequential() {
        let groups = people().group_by(&["id"]).unwrap();
        let kinds = [AggregationType::Count, AggregationType::Max];
        let par = engine(2).aggregate(&groups, &kinds, &["name", "name"]).unwrap();
        assert_eq!(par, groups.aggregation(&kinds, &["name", "name"]).unwrap());
        assert_eq!(par.nrow(), 4);
    }

    #[test]
    fn errors_propagate_from_chunks_and_planning() {
        let groups = people().group_by(&["id"]).unwrap();
        let err = engine(2)
            .aggregate(&groups, &[AggregationType::Sum], &["missing"])
            .unwrap_err();
        assert!(matches!(err, FrameError::UnknownColumn { .. }));

        let err = engine(2)
            .join(JoinKind::Inner, &people(), &scores(), &["score"])
            .unwrap_err();
        assert!(matches!(err, FrameError::UnknownColumn { .. }));

        let err = engine(2)
            .capply(&people(), |s| {
                if s.name() == "id" { s.slice(0, 1).unwrap() } else { s.clone() }
            })
            .unwrap_err();
        assert!(matches!(err, FrameError::Dimension { .. }));
    }

    #[test]
    fn capply_runs_with_concurrency() {
        let df = wide_frame(40);
        let active = Arc::new(AtomicUsize::new(0));
        let max_active = Arc::new(AtomicUsize::new(0));

        let (active2, max_active2) = (Arc::clone(&active), Arc::clone(&max_active));
        let out = engine(4)
            .capply(&df, move |col| {
                let now = active2.fetch_add(1, Ordering::SeqCst) + 1;
                max_active2.fetch_max(now, Ordering::SeqCst);
                std::thread::sleep(Duration::from_millis(5));
                active2.fetch_sub(1, Ordering::SeqCst);
                col.clone()
            })
            .unwrap();

        assert_eq!(out, df);
        assert!(max_active.load(Ordering::SeqCst) > 1);
    }

    #[derive(Default)]
    struct ConcurrencyObserver {
        active_chunks: AtomicUsize,
        max_active_chunks: AtomicUsize,
        labels: Mutex<Vec<&'static str>>,
    }

    impl ExecutionObserver for ConcurrencyObserver {
        fn on_event(&self, event: &ExecutionEvent) {
            let label = match event {
                ExecutionEvent::ChunkStarted { .. } => {
                    let now = self.active_chunks.fetch_add(1, Ordering::SeqCst) + 1;
                    self.max_active_chunks.fetch_max(now, Ordering::SeqCst);
                    return;
                }
                ExecutionEvent::ChunkFinished { .. } => {
                    self.active_chunks.fetch_sub(1, Ordering::SeqCst);
                    return;
                }
                ExecutionEvent::ThrottleWaited { .. } => return,
                ExecutionEvent::RunStarted => "run",
                ExecutionEvent::JoinStarted { .. } => "join",
                ExecutionEvent::AggregationStarted { .. } => "aggregate",
                ExecutionEvent::RunFinished { .. } => "done",
            };
            self.labels.lock().unwrap().push(label);
        }
    }

    #[test]
    fn max_in_flight_chunks_throttles_chunk_concurrency() {
        let df = wide_frame(30);
        let observer = Arc::new(ConcurrencyObserver::default());
        let engine = engine(1).with_observer(observer.clone());

        let out = engine
            .capply(&df, |col| {
                std::thread::sleep(Duration::from_millis(1));
                col.clone()
            })
            .unwrap();

        assert_eq!(out.ncol(), 30);
        assert_eq!(observer.max_active_chunks.load(Ordering::SeqCst), 1);
        assert_eq!(*observer.labels.lock().unwrap(), vec!["run", "done"]);
    }

    #[test]
    fn join_events_bracket_the_run() {
        let observer = Arc::new(ConcurrencyObserver::default());
        let engine = engine(2).with_observer(observer.clone());
        engine.join(JoinKind::Inner, &people(), &scores(), &["id"]).unwrap();
        assert_eq!(*observer.labels.lock().unwrap(), vec!["run", "join", "done"]);
    }

    #[test]
    fn metrics_are_available_after_run() {
        let df = wide_frame(12);
        let engine = engine(1);
        let metrics = engine.metrics();

        engine
            .capply(&df, |col| {
                std::thread::sleep(Duration::from_millis(2));
                col.clone()
            })
            .unwrap();

        let snap = metrics.snapshot();
        assert_eq!(snap.rows_processed, 12);
        assert_eq!(snap.chunks_started, 12);
        assert_eq!(snap.chunks_finished, 12);
        assert_eq!(snap.max_active_chunks, 1);
        assert!(snap.throttle_wait > Duration::ZERO);
        assert!(snap.elapsed.is_some());
    }
}
