//! Loader and writer configuration.

use std::collections::HashMap;

use crate::types::DataType;

/// Options shared by every loader ([`super::load_records`], [`super::read_csv`], ...).
///
/// Use [`Default`] for common cases and struct-update syntax for the rest:
///
/// ```rust
/// use typed_frame::ingestion::LoadOptions;
///
/// let opts = LoadOptions {
///     has_header: false,
///     names: Some(vec!["a".to_string(), "b".to_string()]),
///     ..Default::default()
/// };
/// assert!(opts.detect_types);
/// ```
///
/// There is no lazy-quotes switch: the CSV parser always accepts a bare `"` inside an
/// unquoted field and keeps it literally.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadOptions {
    /// Kind used when detection is off or finds nothing.
    pub default_type: DataType,
    /// Detect each column's kind from its raw values.
    pub detect_types: bool,
    /// Treat the first record as the header row.
    pub has_header: bool,
    /// Column names overriding the header (one per column).
    pub names: Option<Vec<String>>,
    /// Raw cells that count as missing.
    pub nan_values: Vec<String>,
    /// Field delimiter for delimited text.
    pub delimiter: u8,
    /// Lines starting with this byte are skipped in delimited text.
    pub comment: Option<u8>,
    /// Explicit kinds by column name; these win over detection.
    pub types: HashMap<String, DataType>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            default_type: DataType::Utf8,
            detect_types: true,
            has_header: true,
            names: None,
            nan_values: vec!["NA".to_string(), "NaN".to_string(), "<nil>".to_string()],
            delimiter: b',',
            comment: None,
            types: HashMap::new(),
        }
    }
}

/// Options for [`super::write_csv`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// Emit the header row.
    pub write_header: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self { write_header: true }
    }
}
