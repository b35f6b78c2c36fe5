//! Path-based loading.
//!
//! Most callers should use [`read_from_path`], which reads a file into a [`DataFrame`].
//!
//! - If [`ReadOptions::format`] is `None`, the format is inferred from the file extension.
//! - If a [`LoadObserver`] is provided, success/failure/alerts are reported to it.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::error::{FrameError, FrameResult};
use crate::frame::DataFrame;

use super::observability::{LoadContext, LoadObserver, LoadSeverity, LoadStats};
use super::options::LoadOptions;
use super::{csv, json};

/// Supported file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// Delimited text.
    Csv,
    /// JSON array-of-objects, a single object, or NDJSON.
    Json,
}

impl FileFormat {
    /// Parse a format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" | "tsv" | "txt" => Some(Self::Csv),
            "json" | "ndjson" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Options for [`read_from_path`].
#[derive(Clone)]
pub struct ReadOptions {
    /// If `None`, infer the format from the file extension.
    pub format: Option<FileFormat>,
    /// Options handed to the format-specific loader.
    ///
    /// Quoting in delimited text is always lenient; see [`LoadOptions`].
    pub load: LoadOptions,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn LoadObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: LoadSeverity,
}

impl fmt::Debug for ReadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadOptions")
            .field("format", &self.format)
            .field("load", &self.load)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            format: None,
            load: LoadOptions::default(),
            observer: None,
            alert_at_or_above: LoadSeverity::Critical,
        }
    }
}

/// Read a file into a table, choosing the loader by format.
///
/// When an observer is configured, this function reports:
///
/// - `on_success` on success, with the table's shape
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
///
/// A path whose format cannot be inferred is rejected before any observer is called.
///
/// ```no_run
/// use std::sync::Arc;
///
/// use typed_frame::ingestion::{read_from_path, LoadSeverity, ReadOptions, StdErrObserver};
///
/// # fn main() -> Result<(), typed_frame::FrameError> {
/// let opts = ReadOptions {
///     observer: Some(Arc::new(StdErrObserver::default())),
///     alert_at_or_above: LoadSeverity::Critical,
///     ..Default::default()
/// };
///
/// let df = read_from_path("people.csv", &opts)?;
/// println!("rows={}", df.nrow());
/// # Ok(())
/// # }
/// ```
pub fn read_from_path(path: impl AsRef<Path>, options: &ReadOptions) -> FrameResult<DataFrame> {
    let path = path.as_ref();
    let format = match options.format {
        Some(f) => f,
        None => infer_format_from_path(path)?,
    };

    let ctx = LoadContext {
        path: path.to_path_buf(),
        format,
    };

    let result = match format {
        FileFormat::Csv => csv::read_csv_from_path(path, &options.load),
        FileFormat::Json => json::read_json_from_path(path, &options.load),
    };

    if let Some(obs) = options.observer.as_ref() {
        match &result {
            Ok(df) => obs.on_success(
                &ctx,
                LoadStats {
                    rows: df.nrow(),
                    columns: df.ncol(),
                },
            ),
            Err(e) => {
                let sev = severity_for_error(e);
                obs.on_failure(&ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }

    result
}

fn severity_for_error(e: &FrameError) -> LoadSeverity {
    match e {
        FrameError::Io(_) => LoadSeverity::Critical,
        FrameError::Csv(err) => match err.kind() {
            ::csv::ErrorKind::Io(_) => LoadSeverity::Critical,
            _ => LoadSeverity::Error,
        },
        FrameError::Json(err) if err.is_io() => LoadSeverity::Critical,
        _ => LoadSeverity::Error,
    }
}

fn infer_format_from_path(path: &Path) -> FrameResult<FileFormat> {
    let ext = path.extension().and_then(|s| s.to_str()).ok_or_else(|| {
        FrameError::unsupported(format!(
            "cannot infer format: path has no extension ({})",
            path.display()
        ))
    })?;

    FileFormat::from_extension(ext).ok_or_else(|| {
        FrameError::unsupported(format!(
            "cannot infer format from extension '{ext}' for path ({})",
            path.display()
        ))
    })
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::{infer_format_from_path, severity_for_error, FileFormat};
    use crate::error::FrameError;
    use crate::ingestion::LoadSeverity;

    #[test]
    fn format_from_extension_is_case_insensitive() {
        assert_eq!(FileFormat::from_extension("CSV"), Some(FileFormat::Csv));
        assert_eq!(FileFormat::from_extension("ndjson"), Some(FileFormat::Json));
        assert_eq!(FileFormat::from_extension("parquet"), None);
    }

    #[test]
    fn unknown_or_missing_extension_is_unsupported() {
        for p in ["data.parquet", "data"] {
            let err = infer_format_from_path(Path::new(p)).unwrap_err();
            assert!(matches!(err, FrameError::Unsupported { .. }));
        }
    }

    #[test]
    fn io_failures_are_critical() {
        let io = FrameError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(severity_for_error(&io), LoadSeverity::Critical);
        assert_eq!(
            severity_for_error(&FrameError::dimension("ragged")),
            LoadSeverity::Error
        );
    }
}
