//! Loading tables from records, maps, structs and files, and writing them back out.
//!
//! Every loader funnels into [`load_records`]: raw cells are mapped to missing values via
//! [`LoadOptions::nan_values`], then each column's kind comes from [`LoadOptions::types`],
//! detection ([`find_type`]), or [`LoadOptions::default_type`], in that order.
//!
//! Most callers reading files should use [`read_from_path`] (from [`unified`]) which:
//!
//! - picks the format from the file extension (or [`ReadOptions::format`])
//! - optionally reports success/failure/alerts to a [`LoadObserver`]
//!
//! Format-specific functions are also available under:
//! - [`csv`]
//! - [`json`]

pub mod csv;
pub mod json;
pub mod observability;
pub mod options;
pub mod records;
pub mod unified;

pub use csv::{read_csv, read_csv_from_path, write_csv};
pub use json::{read_json, read_json_from_path, write_json};
pub use observability::{
    CompositeObserver, LoadContext, LoadObserver, LoadSeverity, LoadStats, StdErrObserver,
};
pub use options::{LoadOptions, WriteOptions};
pub use records::{find_type, load_maps, load_records, load_structs};
pub use unified::{read_from_path, FileFormat, ReadOptions};
