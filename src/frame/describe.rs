//! Summary statistics for every column.

use crate::error::FrameResult;
use crate::series::Series;
use crate::types::{DataType, Value};

use super::DataFrame;

const LABELS: [&str; 8] = ["mean", "median", "std", "min", "25%", "50%", "75%", "max"];

impl DataFrame {
    /// A summary table: a `column` label column followed by one column per source column.
    ///
    /// Numeric and boolean columns get real-valued statistics; text columns only get their
    /// lexicographic minimum and maximum, with `-` elsewhere.
    pub fn describe(&self) -> FrameResult<DataFrame> {
        let mut columns = Vec::with_capacity(self.ncol() + 1);
        columns.push(Series::new(LABELS, DataType::Utf8, "column"));
        for col in &self.columns {
            columns.push(describe_column(col));
        }
        DataFrame::new(columns)
    }
}

fn describe_column(col: &Series) -> Series {
    if col.dtype() == DataType::Utf8 {
        let dash = || Value::from("-");
        let values = [
            dash(),
            dash(),
            dash(),
            col.min(),
            dash(),
            dash(),
            dash(),
            col.max(),
        ];
        return Series::new(values, DataType::Utf8, col.name());
    }
    let values = [
        Value::Float64(col.mean()),
        Value::Float64(col.median()),
        Value::Float64(col.std_dev()),
        col.min(),
        Value::Float64(col.quantile(0.25)),
        Value::Float64(col.quantile(0.5)),
        Value::Float64(col.quantile(0.75)),
        col.max(),
    ];
    Series::new(values, DataType::Float64, col.name())
}
