//! Row filtering by column comparisons.

use std::fmt;
use std::sync::Arc;

use crate::error::{FrameError, FrameResult};
use crate::series::{Comparator, Element, Operand, Series};

use super::DataFrame;

/// Names a column either by name or by position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnRef {
    /// Column name.
    Name(String),
    /// Column position.
    Index(usize),
}

impl ColumnRef {
    fn resolve<'a>(&self, df: &'a DataFrame) -> FrameResult<&'a Series> {
        match self {
            Self::Name(name) => df.column(name),
            Self::Index(i) => df.columns.get(*i).ok_or(FrameError::IndexOutOfRange {
                index: i64::try_from(*i).unwrap_or(i64::MAX),
                len: df.ncol(),
            }),
        }
    }
}

impl From<&str> for ColumnRef {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for ColumnRef {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<usize> for ColumnRef {
    fn from(i: usize) -> Self {
        Self::Index(i)
    }
}

type Predicate = Arc<dyn Fn(&Element) -> bool + Send + Sync>;

#[derive(Clone)]
enum Test {
    Compare(Comparator, Operand),
    Predicate(Predicate),
}

/// One row test: a column plus either a comparison or a predicate over its elements.
#[derive(Clone)]
pub struct Filter {
    column: ColumnRef,
    test: Test,
}

impl Filter {
    /// Keep rows where `column <comparator> operand` holds.
    pub fn new(
        column: impl Into<ColumnRef>,
        comparator: Comparator,
        operand: impl Into<Operand>,
    ) -> Self {
        Self {
            column: column.into(),
            test: Test::Compare(comparator, operand.into()),
        }
    }

    /// Keep rows where `predicate` accepts the element of `column`.
    pub fn predicate<F>(column: impl Into<ColumnRef>, predicate: F) -> Self
    where
        F: Fn(&Element) -> bool + Send + Sync + 'static,
    {
        Self {
            column: column.into(),
            test: Test::Predicate(Arc::new(predicate)),
        }
    }

    fn mask(&self, df: &DataFrame) -> FrameResult<Vec<bool>> {
        let col = self.column.resolve(df)?;
        let flags = match &self.test {
            Test::Compare(comparator, operand) => col.compare(*comparator, operand.clone())?,
            Test::Predicate(f) => col.compare_fn(|e| f(e)),
        };
        flags.to_bools()
    }
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Filter");
        s.field("column", &self.column);
        match &self.test {
            Test::Compare(comparator, operand) => {
                s.field("comparator", comparator).field("operand", operand)
            }
            Test::Predicate(_) => s.field("predicate", &"<fn>"),
        };
        s.finish()
    }
}

impl<C, O> From<(C, Comparator, O)> for Filter
where
    C: Into<ColumnRef>,
    O: Into<Operand>,
{
    fn from((column, comparator, operand): (C, Comparator, O)) -> Self {
        Self::new(column, comparator, operand)
    }
}

/// How several filters combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterAggregation {
    /// A row is kept if every filter accepts it.
    And,
    /// A row is kept if any filter accepts it.
    Or,
}

impl DataFrame {
    /// Rows accepted by at least one filter. An empty filter list returns a copy.
    pub fn filter(&self, filters: &[Filter]) -> FrameResult<DataFrame> {
        self.filter_aggregation(FilterAggregation::Or, filters)
    }

    /// Rows accepted by the filters combined with `aggregation`.
    pub fn filter_aggregation(
        &self,
        aggregation: FilterAggregation,
        filters: &[Filter],
    ) -> FrameResult<DataFrame> {
        let Some((first, rest)) = filters.split_first() else {
            return Ok(self.clone());
        };
        let mut keep = first.mask(self)?;
        for filter in rest {
            let mask = filter.mask(self)?;
            for (k, m) in keep.iter_mut().zip(mask) {
                *k = match aggregation {
                    FilterAggregation::And => *k && m,
                    FilterAggregation::Or => *k || m,
                };
            }
        }
        self.subset(keep)
    }
}

#[cfg(test)]
mod tests {
    use super::{Filter, FilterAggregation};
    use crate::error::FrameError;
    use crate::frame::DataFrame;
    use crate::series::{Comparator, Element, Series};
    use crate::types::{DataType, Value};

    fn sample_frame() -> DataFrame {
        DataFrame::new(vec![
            Series::new(["a", "b", "c", "d"], DataType::Utf8, "name"),
            Series::new(
                vec![Value::Int64(1), Value::Int64(5), Value::Null, Value::Int64(9)],
                DataType::Int64,
                "n",
            ),
        ])
        .unwrap()
    }

    #[test]
    fn filters_combine_with_or_by_default() {
        let df = sample_frame();
        let out = df
            .filter(&[
                Filter::new("n", Comparator::Greater, 6),
                Filter::new("name", Comparator::Eq, "a"),
            ])
            .unwrap();
        assert_eq!(out.col("name").unwrap().records(), vec!["a", "d"]);
    }

    #[test]
    fn and_aggregation_and_positional_columns() {
        let df = sample_frame();
        let out = df
            .filter_aggregation(
                FilterAggregation::And,
                &[
                    Filter::new(1usize, Comparator::GreaterEq, 1),
                    Filter::new("name", Comparator::In, vec!["b", "c", "d"]),
                ],
            )
            .unwrap();
        // The missing value in row "c" fails every comparison.
        assert_eq!(out.col("name").unwrap().records(), vec!["b", "d"]);
    }

    #[test]
    fn predicate_filters() {
        let df = sample_frame();
        let out = df
            .filter(&[Filter::predicate("n", Element::is_missing)])
            .unwrap();
        assert_eq!(out.nrow(), 1);
        assert_eq!(out.elem(0, 0).to_string(), "c");
    }

    #[test]
    fn empty_filter_list_copies() {
        let df = sample_frame();
        assert_eq!(df.filter(&[]).unwrap(), df);
    }

    #[test]
    fn unknown_column_fails() {
        let df = sample_frame();
        let err = df.filter(&[Filter::from(("zzz", Comparator::Eq, 1))]).unwrap_err();
        assert!(matches!(err, FrameError::UnknownColumn { .. }));
        let err = df.filter(&[Filter::new(4usize, Comparator::Eq, 1)]).unwrap_err();
        assert!(matches!(err, FrameError::IndexOutOfRange { .. }));
    }
}
