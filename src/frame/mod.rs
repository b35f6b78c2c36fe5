//! Tables of equal-length, uniquely named columns.
//!
//! A [`DataFrame`] owns its [`Series`]. Operations that "return a new table" never alias the
//! receiver's storage; the only in-place mutators are [`DataFrame::set`] and
//! [`DataFrame::set_names`].
//!
//! ```rust
//! use typed_frame::frame::{DataFrame, Filter, Order};
//! use typed_frame::series::{Comparator, Series};
//! use typed_frame::types::DataType;
//!
//! let df = DataFrame::new(vec![
//!     Series::new(["a", "b", "c"], DataType::Utf8, "name"),
//!     Series::new([3, 1, 2], DataType::Int64, "rank"),
//! ])
//! .unwrap();
//!
//! let sorted = df.arrange(&[Order::asc("rank")]).unwrap();
//! assert_eq!(sorted.col("name").unwrap().records(), vec!["b", "c", "a"]);
//!
//! let top = df.filter(&[Filter::new("rank", Comparator::LessEq, 2)]).unwrap();
//! assert_eq!(top.nrow(), 2);
//! ```

mod apply;
mod bind;
mod describe;
mod filter;
mod group;
mod join;
mod names;
mod select;
mod sort;

use std::collections::HashMap;

use crate::error::{FrameError, FrameResult};
use crate::series::{Element, Indexes, Series};
use crate::types::{DataType, Value};

pub use filter::{ColumnRef, Filter, FilterAggregation};
pub use group::{AggregationType, Groups};
pub use join::JoinKind;
pub use select::ColumnSelection;
pub use sort::Order;

pub(crate) use join::JoinPlan;

use names::fix_colnames;

/// An ordered collection of equal-length, uniquely named columns.
#[derive(Debug, Clone, PartialEq)]
pub struct DataFrame {
    columns: Vec<Series>,
    nrows: usize,
}

impl DataFrame {
    /// Build a table from columns.
    ///
    /// Fails on an empty column list or unequal column lengths. Empty and repeated names are
    /// fixed up (`X0`, `name_0`, ...).
    pub fn new(columns: Vec<Series>) -> FrameResult<Self> {
        let nrows = check_dimensions(&columns)?;
        let mut df = Self { columns, nrows };
        df.fix_names();
        Ok(df)
    }

    fn fix_names(&mut self) {
        let mut names = self.names();
        fix_colnames(&mut names);
        for (col, name) in self.columns.iter_mut().zip(names) {
            col.set_name(name);
        }
    }

    /// Column names, in order.
    pub fn names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name().to_string()).collect()
    }

    /// Column kinds, in order.
    pub fn types(&self) -> Vec<DataType> {
        self.columns.iter().map(Series::dtype).collect()
    }

    /// `(nrow, ncol)`.
    pub fn dims(&self) -> (usize, usize) {
        (self.nrows, self.columns.len())
    }

    /// Number of rows.
    pub fn nrow(&self) -> usize {
        self.nrows
    }

    /// Number of columns.
    pub fn ncol(&self) -> usize {
        self.columns.len()
    }

    /// Borrow every column.
    pub fn columns(&self) -> &[Series] {
        &self.columns
    }

    /// Position of the column called `name`.
    pub fn column_index(&self, name: &str) -> FrameResult<usize> {
        self.columns
            .iter()
            .position(|c| c.name() == name)
            .ok_or_else(|| FrameError::unknown_column(name))
    }

    /// Borrow the column called `name`.
    pub fn column(&self, name: &str) -> FrameResult<&Series> {
        self.column_index(name).map(|i| &self.columns[i])
    }

    /// A copy of the column called `name`.
    pub fn col(&self, name: &str) -> FrameResult<Series> {
        self.column(name).cloned()
    }

    /// Cell at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if either position is out of range.
    pub fn elem(&self, row: usize, col: usize) -> &Element {
        self.columns[col].elem(row)
    }

    /// Rename every column in place. `names` must have one entry per column.
    pub fn set_names<S: AsRef<str>>(&mut self, names: &[S]) -> FrameResult<()> {
        if names.len() != self.ncol() {
            return Err(FrameError::dimension(format!(
                "set_names: {} names for {} columns",
                names.len(),
                self.ncol()
            )));
        }
        for (col, name) in self.columns.iter_mut().zip(names) {
            col.set_name(name.as_ref());
        }
        self.fix_names();
        Ok(())
    }

    /// A new table with column `old` renamed to `new`.
    pub fn rename(&self, new: &str, old: &str) -> FrameResult<DataFrame> {
        let idx = self.column_index(old)?;
        let mut columns = self.columns.clone();
        columns[idx].set_name(new);
        DataFrame::new(columns)
    }

    /// A new table holding the rows at `indexes`, in index order.
    pub fn subset(&self, indexes: impl Into<Indexes>) -> FrameResult<DataFrame> {
        let idx = indexes.into().resolve(self.nrows)?;
        Ok(self.take_rows(&idx))
    }

    /// Gather already-validated row positions.
    pub(crate) fn take_rows(&self, idx: &[usize]) -> DataFrame {
        DataFrame {
            columns: self.columns.iter().map(|c| c.take(idx)).collect(),
            nrows: idx.len(),
        }
    }

    /// Overwrite the rows at `indexes` with the rows of `values`, in place.
    ///
    /// `values` must have the same number of columns as `self` (matched by position) and one
    /// row per selected index. Nothing is written if any check fails.
    pub fn set(&mut self, indexes: impl Into<Indexes>, values: &DataFrame) -> FrameResult<()> {
        if values.ncol() != self.ncol() {
            return Err(FrameError::dimension(format!(
                "set: {} columns but {} new columns",
                self.ncol(),
                values.ncol()
            )));
        }
        let idx = indexes.into().resolve(self.nrows)?;
        if idx.len() != values.nrow() {
            return Err(FrameError::dimension(format!(
                "set: {} positions but {} new rows",
                idx.len(),
                values.nrow()
            )));
        }
        for (col, new) in self.columns.iter_mut().zip(&values.columns) {
            col.set(idx.clone(), new)?;
        }
        Ok(())
    }

    /// A new table where `series` replaces the column of the same name, or is appended.
    pub fn mutate(&self, series: Series) -> FrameResult<DataFrame> {
        if series.len() != self.nrows {
            return Err(FrameError::dimension(format!(
                "mutate: column '{}' has {} rows, table has {}",
                series.name(),
                series.len(),
                self.nrows
            )));
        }
        let mut columns = self.columns.clone();
        match columns.iter().position(|c| c.name() == series.name()) {
            Some(i) => columns[i] = series,
            None => columns.push(series),
        }
        DataFrame::new(columns)
    }

    /// Header row followed by every row rendered as strings.
    pub fn records(&self) -> Vec<Vec<String>> {
        let mut out = Vec::with_capacity(self.nrows + 1);
        out.push(self.names());
        for i in 0..self.nrows {
            out.push(self.columns.iter().map(|c| c.elem(i).to_string()).collect());
        }
        out
    }

    /// Every row as a map from column name to native value.
    pub fn maps(&self) -> Vec<HashMap<String, Value>> {
        (0..self.nrows)
            .map(|i| {
                self.columns
                    .iter()
                    .map(|c| (c.name().to_string(), c.value(i)))
                    .collect()
            })
            .collect()
    }
}

/// Common length of `columns`.
pub(crate) fn check_dimensions(columns: &[Series]) -> FrameResult<usize> {
    let first = columns
        .first()
        .ok_or_else(|| FrameError::empty("a table needs at least one column"))?;
    let nrows = first.len();
    if let Some(bad) = columns.iter().find(|c| c.len() != nrows) {
        return Err(FrameError::dimension(format!(
            "column '{}' has {} rows, expected {nrows}",
            bad.name(),
            bad.len()
        )));
    }
    Ok(nrows)
}
