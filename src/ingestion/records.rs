//! Building tables from raw records, keyed objects and serializable structs.

use serde::Serialize;
use serde_json::{Map, Value as JsonValue};

use crate::error::{FrameError, FrameResult};
use crate::frame::DataFrame;
use crate::series::Series;
use crate::types::DataType;

use super::options::LoadOptions;

/// Build a table from a grid of raw strings.
///
/// With `has_header` the first record names the columns (unless `names` overrides them).
/// Cells listed in `nan_values` become missing. Each column's kind is, in order of precedence,
/// its entry in `types`, the detected kind ([`find_type`]) when `detect_types` is on, or
/// `default_type`.
///
/// ```rust
/// use typed_frame::ingestion::{load_records, LoadOptions};
/// use typed_frame::types::DataType;
///
/// let records = vec![
///     vec!["id".to_string(), "score".to_string()],
///     vec!["1".to_string(), "2.5".to_string()],
///     vec!["2".to_string(), "NA".to_string()],
/// ];
/// let df = load_records(&records, &LoadOptions::default()).unwrap();
/// assert_eq!(df.types(), vec![DataType::Int64, DataType::Float64]);
/// assert!(df.elem(1, 1).is_missing());
/// ```
pub fn load_records(records: &[Vec<String>], options: &LoadOptions) -> FrameResult<DataFrame> {
    let Some(first) = records.first() else {
        return Err(FrameError::empty("load_records: no records"));
    };
    if options.has_header && records.len() == 1 {
        return Err(FrameError::empty("load_records: header without rows"));
    }
    let width = first.len();
    if let Some(names) = &options.names {
        if names.len() != width {
            return Err(FrameError::dimension(format!(
                "load_records: {} names for {width} columns",
                names.len()
            )));
        }
    }

    let (header, rows) = if options.has_header {
        (first.clone(), &records[1..])
    } else {
        (vec![String::new(); width], records)
    };
    let header = options.names.clone().unwrap_or(header);

    if let Some((i, bad)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
        return Err(FrameError::dimension(format!(
            "load_records: record {i} has {} fields, expected {width}",
            bad.len()
        )));
    }

    let columns = header
        .iter()
        .enumerate()
        .map(|(c, name)| {
            let raw: Vec<&str> = rows
                .iter()
                .map(|r| {
                    let cell = r[c].as_str();
                    if options.nan_values.iter().any(|n| n == cell) {
                        "NaN"
                    } else {
                        cell
                    }
                })
                .collect();
            let dtype = column_type(name, &raw, options);
            Series::new(raw, dtype, name.as_str())
        })
        .collect();
    DataFrame::new(columns)
}

fn column_type(name: &str, raw: &[&str], options: &LoadOptions) -> DataType {
    if let Some(&t) = options.types.get(name) {
        return t;
    }
    if options.detect_types {
        if let Some(t) = find_type(raw.iter().copied()) {
            return t;
        }
    }
    options.default_type
}

/// Detect the kind of a column of raw strings.
///
/// Each non-empty, non-`NaN` cell is classified as integer, real, `true`/`false`, or text; the
/// result is the common kind ([`DataType::common`]). Returns `None` when nothing is classified.
pub fn find_type<'a, I>(cells: I) -> Option<DataType>
where
    I: IntoIterator<Item = &'a str>,
{
    DataType::common(
        cells
            .into_iter()
            .filter(|s| !s.is_empty() && *s != "NaN")
            .map(|s| {
                if s.parse::<i64>().is_ok() {
                    DataType::Int64
                } else if s.parse::<f64>().is_ok() {
                    DataType::Float64
                } else if s == "true" || s == "false" {
                    DataType::Bool
                } else {
                    DataType::Utf8
                }
            }),
    )
}

/// Build a table from keyed objects.
///
/// Columns are the union of all keys in order of first appearance; a key absent from an object
/// becomes an empty cell and JSON `null` becomes `NaN`. The rows are then loaded with
/// [`load_records`] (header on, `names` ignored).
pub fn load_maps(maps: &[Map<String, JsonValue>], options: &LoadOptions) -> FrameResult<DataFrame> {
    if maps.is_empty() {
        return Err(FrameError::empty("load_maps: no objects"));
    }
    let mut names: Vec<String> = Vec::new();
    for m in maps {
        for k in m.keys() {
            if !names.contains(k) {
                names.push(k.clone());
            }
        }
    }

    let mut records = Vec::with_capacity(maps.len() + 1);
    records.push(names.clone());
    for m in maps {
        records.push(
            names
                .iter()
                .map(|n| m.get(n).map_or_else(String::new, json_cell))
                .collect(),
        );
    }
    let options = LoadOptions {
        has_header: true,
        names: None,
        ..options.clone()
    };
    load_records(&records, &options)
}

/// Build a table from serializable structs, one row per item.
///
/// Field names follow serde (`#[serde(rename = "...")]` renames a column,
/// `#[serde(skip)]` excludes it). With `detect_types` on, a column's kind is the kind of its
/// serialized values (integers, reals, booleans or text); otherwise `default_type`. Entries in
/// `types` win over both.
///
/// ```rust
/// use serde::Serialize;
/// use typed_frame::ingestion::{load_structs, LoadOptions};
/// use typed_frame::types::DataType;
///
/// #[derive(Serialize)]
/// struct Person {
///     name: String,
///     #[serde(rename = "years")]
///     age: i64,
///     #[serde(skip)]
///     _secret: bool,
/// }
///
/// let people = vec![
///     Person { name: "ann".into(), age: 31, _secret: true },
///     Person { name: "bo".into(), age: 27, _secret: false },
/// ];
/// let df = load_structs(&people, &LoadOptions::default()).unwrap();
/// assert_eq!(df.names(), vec!["name", "years"]);
/// assert_eq!(df.types(), vec![DataType::Utf8, DataType::Int64]);
/// ```
pub fn load_structs<T: Serialize>(items: &[T], options: &LoadOptions) -> FrameResult<DataFrame> {
    if items.is_empty() {
        return Err(FrameError::empty("load_structs: no items"));
    }
    let maps = items
        .iter()
        .map(|item| match serde_json::to_value(item)? {
            JsonValue::Object(m) => Ok(m),
            other => Err(FrameError::unsupported(format!(
                "load_structs: items must serialize to objects, got {other}"
            ))),
        })
        .collect::<FrameResult<Vec<_>>>()?;

    let mut options = options.clone();
    if options.detect_types {
        for key in maps.iter().flat_map(|m| m.keys()) {
            if options.types.contains_key(key) {
                continue;
            }
            if let Some(kind) = native_column_type(&maps, key) {
                options.types.insert(key.clone(), kind);
            }
        }
    }
    load_maps(&maps, &options)
}

fn native_column_type(maps: &[Map<String, JsonValue>], key: &str) -> Option<DataType> {
    DataType::common(maps.iter().filter_map(|m| m.get(key)).filter_map(native_type))
}

fn native_type(v: &JsonValue) -> Option<DataType> {
    match v {
        JsonValue::Null => None,
        JsonValue::Bool(_) => Some(DataType::Bool),
        JsonValue::Number(n) if n.is_i64() || n.is_u64() => Some(DataType::Int64),
        JsonValue::Number(_) => Some(DataType::Float64),
        _ => Some(DataType::Utf8),
    }
}

fn json_cell(v: &JsonValue) -> String {
    match v {
        JsonValue::Null => "NaN".to_string(),
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}
