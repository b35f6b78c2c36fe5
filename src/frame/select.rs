//! Column projection.

use crate::error::{FrameError, FrameResult};
use crate::series::Series;
use crate::types::DataType;

use super::DataFrame;

/// Selects columns of a table.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnSelection {
    /// One column position.
    Index(usize),
    /// Column positions, in order.
    Indexes(Vec<usize>),
    /// One flag per column.
    Mask(Vec<bool>),
    /// One column name.
    Name(String),
    /// Column names, in order.
    Names(Vec<String>),
    /// An `Int64` (positions), `Bool` (mask) or `Utf8` (names) series.
    Series(Series),
}

impl ColumnSelection {
    /// Resolve to column positions of `df`.
    pub fn resolve(&self, df: &DataFrame) -> FrameResult<Vec<usize>> {
        let ncol = df.ncol();
        let idx = match self {
            Self::Index(i) => vec![*i],
            Self::Indexes(list) => list.clone(),
            Self::Mask(mask) => mask_positions(mask, ncol)?,
            Self::Name(name) => vec![df.column_index(name)?],
            Self::Names(names) => names
                .iter()
                .map(|n| df.column_index(n))
                .collect::<FrameResult<_>>()?,
            Self::Series(s) => return series_positions(s, df),
        };
        if let Some(&bad) = idx.iter().find(|&&i| i >= ncol) {
            return Err(FrameError::IndexOutOfRange {
                index: i64::try_from(bad).unwrap_or(i64::MAX),
                len: ncol,
            });
        }
        Ok(idx)
    }
}

fn mask_positions(mask: &[bool], ncol: usize) -> FrameResult<Vec<usize>> {
    if mask.len() != ncol {
        return Err(FrameError::dimension(format!(
            "column mask has length {} but the table has {ncol} columns",
            mask.len()
        )));
    }
    Ok(mask
        .iter()
        .enumerate()
        .filter_map(|(i, &keep)| keep.then_some(i))
        .collect())
}

fn series_positions(s: &Series, df: &DataFrame) -> FrameResult<Vec<usize>> {
    if s.has_nan() {
        return Err(FrameError::coercion("column selection contains missing values"));
    }
    let selection = match s.dtype() {
        DataType::Int64 => ColumnSelection::Indexes(
            s.to_i64s()?
                .into_iter()
                .map(|i| {
                    usize::try_from(i).map_err(|_| FrameError::IndexOutOfRange {
                        index: i,
                        len: df.ncol(),
                    })
                })
                .collect::<FrameResult<_>>()?,
        ),
        DataType::Bool => ColumnSelection::Mask(s.to_bools()?),
        DataType::Utf8 => ColumnSelection::Names(s.records()),
        DataType::Float64 => {
            return Err(FrameError::unsupported(
                "a float series cannot be used as a column selection",
            ));
        }
    };
    selection.resolve(df)
}

impl DataFrame {
    /// A new table with the selected columns, in selection order.
    pub fn select(&self, selection: impl Into<ColumnSelection>) -> FrameResult<DataFrame> {
        let idx = selection.into().resolve(self)?;
        DataFrame::new(idx.iter().map(|&i| self.columns[i].clone()).collect())
    }

    /// A new table without the selected columns.
    pub fn drop(&self, selection: impl Into<ColumnSelection>) -> FrameResult<DataFrame> {
        let idx = selection.into().resolve(self)?;
        DataFrame::new(
            self.columns
                .iter()
                .enumerate()
                .filter(|(i, _)| !idx.contains(i))
                .map(|(_, c)| c.clone())
                .collect(),
        )
    }
}

impl From<usize> for ColumnSelection {
    fn from(i: usize) -> Self {
        Self::Index(i)
    }
}

impl From<Vec<usize>> for ColumnSelection {
    fn from(v: Vec<usize>) -> Self {
        Self::Indexes(v)
    }
}

impl From<Vec<bool>> for ColumnSelection {
    fn from(v: Vec<bool>) -> Self {
        Self::Mask(v)
    }
}

impl From<&str> for ColumnSelection {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for ColumnSelection {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<Vec<String>> for ColumnSelection {
    fn from(names: Vec<String>) -> Self {
        Self::Names(names)
    }
}

impl From<Vec<&str>> for ColumnSelection {
    fn from(names: Vec<&str>) -> Self {
        Self::Names(names.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for ColumnSelection {
    fn from(names: [&str; N]) -> Self {
        Self::Names(names.into_iter().map(str::to_string).collect())
    }
}

impl From<Series> for ColumnSelection {
    fn from(s: Series) -> Self {
        Self::Series(s)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::FrameError;
    use crate::frame::DataFrame;
    use crate::series::Series;
    use crate::types::DataType;

    fn sample_frame() -> DataFrame {
        DataFrame::new(vec![
            Series::new([1, 2], DataType::Int64, "a"),
            Series::new(["x", "y"], DataType::Utf8, "b"),
            Series::new([true, false], DataType::Bool, "c"),
        ])
        .unwrap()
    }

    #[test]
    fn select_by_every_specifier() {
        let df = sample_frame();
        assert_eq!(df.select(1usize).unwrap().names(), vec!["b"]);
        assert_eq!(df.select(vec![2, 0]).unwrap().names(), vec!["c", "a"]);
        assert_eq!(df.select(vec![true, false, true]).unwrap().names(), vec!["a", "c"]);
        assert_eq!(df.select("c").unwrap().names(), vec!["c"]);
        assert_eq!(df.select(["b", "a"]).unwrap().names(), vec!["b", "a"]);
        assert_eq!(
            df.select(Series::strings(["c"])).unwrap().names(),
            vec!["c"]
        );
        assert_eq!(df.select(Series::ints([0, 1])).unwrap().names(), vec!["a", "b"]);
    }

    #[test]
    fn select_round_trips_names() {
        let df = sample_frame();
        assert_eq!(df.select(df.names()).unwrap(), df);
    }

    #[test]
    fn repeated_selection_is_renamed() {
        let df = sample_frame();
        assert_eq!(df.select(vec![0, 0]).unwrap().names(), vec!["a_0", "a_1"]);
    }

    #[test]
    fn bad_selections_fail() {
        let df = sample_frame();
        assert!(matches!(df.select(5usize).unwrap_err(), FrameError::IndexOutOfRange { .. }));
        assert!(matches!(df.select("zzz").unwrap_err(), FrameError::UnknownColumn { .. }));
        assert!(matches!(df.select(vec![true]).unwrap_err(), FrameError::Dimension { .. }));
        assert!(df.select(Series::floats([1.0])).is_err());
    }

    #[test]
    fn drop_excludes_columns() {
        let df = sample_frame();
        assert_eq!(df.drop("b").unwrap().names(), vec!["a", "c"]);
        assert!(matches!(
            df.drop(vec![0, 1, 2]).unwrap_err(),
            FrameError::Empty { .. }
        ));
    }
}
