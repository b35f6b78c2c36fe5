//! Delimited-text reading and writing.

use std::io::{Read, Write};
use std::path::Path;

use crate::error::FrameResult;
use crate::frame::DataFrame;

use super::options::{LoadOptions, WriteOptions};
use super::records::load_records;

/// Read delimited text into a table.
///
/// Records are parsed with `options.delimiter` and `options.comment`, then handed to
/// [`load_records`]. Every record must have the same number of fields.
///
/// ```rust
/// use typed_frame::ingestion::{read_csv, LoadOptions};
///
/// let data = "name;age\nann;31\nbo;NA\n";
/// let opts = LoadOptions { delimiter: b';', ..Default::default() };
/// let df = read_csv(data.as_bytes(), &opts).unwrap();
/// assert_eq!(df.dims(), (2, 2));
/// assert!(df.elem(1, 1).is_missing());
/// ```
pub fn read_csv<R: Read>(reader: R, options: &LoadOptions) -> FrameResult<DataFrame> {
    let mut rdr = ::csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(options.delimiter)
        .comment(options.comment)
        .from_reader(reader);

    let mut records = Vec::new();
    for result in rdr.records() {
        let record = result?;
        records.push(record.iter().map(str::to_owned).collect::<Vec<_>>());
    }
    load_records(&records, options)
}

/// Read a delimited-text file into a table.
pub fn read_csv_from_path(path: impl AsRef<Path>, options: &LoadOptions) -> FrameResult<DataFrame> {
    let file = std::fs::File::open(path)?;
    read_csv(file, options)
}

/// Write a table as comma-separated text; missing cells are written as `NaN`.
pub fn write_csv<W: Write>(df: &DataFrame, writer: W, options: &WriteOptions) -> FrameResult<()> {
    let mut wtr = ::csv::WriterBuilder::new().from_writer(writer);
    let records = df.records();
    let skip = usize::from(!options.write_header);
    for record in records.iter().skip(skip) {
        wtr.write_record(record)?;
    }
    wtr.flush()?;
    Ok(())
}
