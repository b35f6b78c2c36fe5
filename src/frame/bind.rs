//! Column and row binding.

use crate::error::{FrameError, FrameResult};
use crate::series::Series;

use super::DataFrame;

impl DataFrame {
    /// A new table with the columns of `self` followed by the columns of `other`.
    ///
    /// Row counts must match; clashing names are fixed up.
    pub fn cbind(&self, other: &DataFrame) -> FrameResult<DataFrame> {
        let mut columns = self.columns.clone();
        columns.extend(other.columns.iter().cloned());
        DataFrame::new(columns)
    }

    /// A new table with the rows of `other` appended below the rows of `self`.
    ///
    /// Columns are matched by name and keep the kind of `self`. Every column of `self` must
    /// exist in `other`; extra columns of `other` are ignored.
    pub fn rbind(&self, other: &DataFrame) -> FrameResult<DataFrame> {
        let columns = self
            .columns
            .iter()
            .map(|col| Ok(col.concat(other.column(col.name())?)))
            .collect::<FrameResult<Vec<_>>>()?;
        DataFrame::new(columns)
    }

    /// Like [`DataFrame::rbind`], but over the union of both tables' column names.
    ///
    /// Columns absent on one side are padded with missing values of the other side's kind.
    /// Column order is the names of `self` followed by the names only `other` has.
    pub fn concat(&self, other: &DataFrame) -> FrameResult<DataFrame> {
        let mut names = self.names();
        for name in other.names() {
            if !names.contains(&name) {
                names.push(name);
            }
        }

        let columns = names
            .iter()
            .map(|name| match (self.column(name).ok(), other.column(name).ok()) {
                (Some(a), Some(b)) => Ok(a.concat(b)),
                (Some(a), None) => Ok(a.concat(&Series::missing(a.dtype(), other.nrows, name))),
                (None, Some(b)) => {
                    Ok(Series::missing(b.dtype(), self.nrows, name.as_str()).concat(b))
                }
                (None, None) => Err(FrameError::unknown_column(name.as_str())),
            })
            .collect::<FrameResult<Vec<_>>>()?;
        DataFrame::new(columns)
    }
}
