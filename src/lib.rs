//! `typed-frame` is a small library for in-memory, typed, column-oriented tables.
//!
//! A [`frame::DataFrame`] is an ordered set of equal-length, uniquely named
//! [`series::Series`]. Each series holds elements of one kind ([`types::DataType`]) and coerces
//! every value it receives into that kind, recording anything it cannot represent as missing.
//!
//! ## What you can do
//!
//! - **Series**: construct from native values, subset/set by [`series::Indexes`], compare
//!   against scalars or other series, order, summary statistics, rolling windows
//! - **Tables**: select/drop/rename columns, subset rows, bind by columns or rows, filter,
//!   multi-key sort, column/row apply, key joins (inner/left/right/outer) and cross join,
//!   group-by with aggregation, `describe`
//! - **Loading**: records, JSON maps, serializable structs, CSV and JSON files
//!   ([`ingestion`])
//! - **Parallel execution** of joins, aggregations and column applies ([`execution`])
//!
//! Across loaders, cells listed in [`ingestion::LoadOptions::nan_values`] become missing.
//!
//! ## Quick example
//!
//! ```rust
//! use typed_frame::frame::{AggregationType, DataFrame};
//! use typed_frame::series::Series;
//! use typed_frame::types::{DataType, Value};
//!
//! # fn main() -> Result<(), typed_frame::FrameError> {
//! let df = DataFrame::new(vec![
//!     Series::new(["a", "b", "a"], DataType::Utf8, "team"),
//!     Series::new([10, 20, 30], DataType::Int64, "score"),
//! ])?;
//!
//! let totals = df
//!     .group_by(&["team"])?
//!     .aggregation(&[AggregationType::Sum], &["score"])?;
//! assert_eq!(totals.names(), vec!["team", "score_Sum"]);
//! assert_eq!(totals.col("score_Sum")?.value(0), Value::Float64(40.0));
//! # Ok(())
//! # }
//! ```
//!
//! ## Loading example
//!
//! ```rust
//! use typed_frame::ingestion::{read_csv, LoadOptions};
//! use typed_frame::types::DataType;
//!
//! # fn main() -> Result<(), typed_frame::FrameError> {
//! let data = "id,name,score\n1,ann,1.5\n2,bo,NA\n";
//! let df = read_csv(data.as_bytes(), &LoadOptions::default())?;
//! assert_eq!(df.types(), vec![DataType::Int64, DataType::Utf8, DataType::Float64]);
//! assert!(df.elem(1, 2).is_missing());
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`types`]: element kinds and native values
//! - [`series`]: typed columns, indexes, statistics, rolling windows
//! - [`frame`]: tables and table operations
//! - [`ingestion`]: loaders, readers/writers, path-based entrypoint with observer hooks
//! - [`execution`]: rayon-backed engine with throttling, metrics and observer events
//! - [`error`]: the error type shared by every module

pub mod error;
pub mod execution;
pub mod frame;
pub mod ingestion;
pub mod series;
pub mod types;

pub use error::{FrameError, FrameResult};
