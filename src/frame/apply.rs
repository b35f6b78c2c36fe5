//! Column-wise and row-wise function application.

use crate::error::{FrameError, FrameResult};
use crate::series::{Element, Series};
use crate::types::DataType;

use super::DataFrame;

impl DataFrame {
    /// Apply `f` to every column, keeping each column's name.
    ///
    /// The results must all have the same length.
    pub fn capply<F>(&self, f: F) -> FrameResult<DataFrame>
    where
        F: Fn(&Series) -> Series,
    {
        let columns = self
            .columns
            .iter()
            .map(|col| f(col).with_name(col.name()))
            .collect();
        DataFrame::new(columns)
    }

    /// Apply `f` to every row.
    ///
    /// Each row is handed to `f` as a series whose kind is the common kind of the table's
    /// columns ([`DataType::common`]). Every call must return the same number of elements; the
    /// results are transposed back into columns, each taking the common kind of its elements.
    /// Output columns are named `X0, X1, ...`.
    pub fn rapply<F>(&self, f: F) -> FrameResult<DataFrame>
    where
        F: Fn(&Series) -> Series,
    {
        if self.nrows == 0 {
            return Err(FrameError::empty("rapply needs at least one row"));
        }
        let row_kind = DataType::common(self.types())
            .ok_or_else(|| FrameError::empty("rapply needs at least one column"))?;

        let mut rows: Vec<Series> = Vec::with_capacity(self.nrows);
        for i in 0..self.nrows {
            let row = Series::from_elements(self.columns.iter().map(|c| c.elem(i)), row_kind, "");
            let out = f(&row);
            if let Some(first) = rows.first() {
                if first.len() != out.len() {
                    return Err(FrameError::dimension(format!(
                        "rapply: row {i} produced {} values, earlier rows produced {}",
                        out.len(),
                        first.len()
                    )));
                }
            }
            rows.push(out);
        }

        let width = rows[0].len();
        let columns = (0..width)
            .map(|j| {
                let cells: Vec<&Element> = rows.iter().map(|r| r.elem(j)).collect();
                let kind = DataType::common(rows.iter().map(Series::dtype)).unwrap_or(row_kind);
                Series::from_elements(cells, kind, "")
            })
            .collect();
        DataFrame::new(columns)
    }
}
