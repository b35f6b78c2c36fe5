//! JSON reading and writing.
//!
//! Supported inputs:
//! - A JSON array of objects: `[{"a":1}, {"a":2}]`
//! - A single object: `{"a":1}`
//! - Newline-delimited JSON (NDJSON): `{"a":1}\n{"a":2}\n`

use std::io::{Read, Write};
use std::path::Path;

use serde_json::{Map, Value as JsonValue};

use crate::error::{FrameError, FrameResult};
use crate::frame::DataFrame;

use super::options::LoadOptions;
use super::records::load_maps;

/// Read JSON objects into a table via [`load_maps`].
pub fn read_json<R: Read>(mut reader: R, options: &LoadOptions) -> FrameResult<DataFrame> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    let objects = parse_objects(&text)?;
    load_maps(&objects, options)
}

/// Read a JSON file into a table.
pub fn read_json_from_path(
    path: impl AsRef<Path>,
    options: &LoadOptions,
) -> FrameResult<DataFrame> {
    let file = std::fs::File::open(path)?;
    read_json(file, options)
}

/// Write a table as a JSON array with one object per row, keys in column order.
///
/// Missing cells are written as `null`.
pub fn write_json<W: Write>(df: &DataFrame, writer: W) -> FrameResult<()> {
    let rows: Vec<Map<String, JsonValue>> = (0..df.nrow())
        .map(|i| {
            df.columns()
                .iter()
                .map(|c| Ok((c.name().to_string(), serde_json::to_value(c.value(i))?)))
                .collect::<FrameResult<Map<_, _>>>()
        })
        .collect::<FrameResult<_>>()?;
    serde_json::to_writer(writer, &rows)?;
    Ok(())
}

fn parse_objects(input: &str) -> FrameResult<Vec<Map<String, JsonValue>>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(FrameError::empty("json input is empty"));
    }

    // A single document first, NDJSON otherwise.
    let values = match serde_json::from_str::<JsonValue>(trimmed) {
        Ok(JsonValue::Array(items)) => items,
        Ok(v @ JsonValue::Object(_)) => vec![v],
        Ok(_) => {
            return Err(FrameError::unsupported(
                "json must be an object, an array of objects, or NDJSON",
            ));
        }
        Err(_) => trimmed
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| serde_json::from_str::<JsonValue>(line))
            .collect::<Result<Vec<_>, _>>()?,
    };

    values
        .into_iter()
        .enumerate()
        .map(|(i, v)| match v {
            JsonValue::Object(m) => Ok(m),
            _ => Err(FrameError::unsupported(format!(
                "row {} is not a json object",
                i + 1
            ))),
        })
        .collect()
}
