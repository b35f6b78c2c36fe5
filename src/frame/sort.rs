//! Multi-column row sorting.

use crate::error::{FrameError, FrameResult};

use super::DataFrame;

/// One sort key of [`DataFrame::arrange`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    /// Column to sort by.
    pub column: String,
    /// Sort descending instead of ascending.
    pub reverse: bool,
}

impl Order {
    /// Ascending by `column`.
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            reverse: false,
        }
    }

    /// Descending by `column`.
    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            reverse: true,
        }
    }
}

impl DataFrame {
    /// A new table with rows stably sorted by `orders`, the first order being the primary key.
    ///
    /// Missing values sort last for every key, ascending or descending.
    pub fn arrange(&self, orders: &[Order]) -> FrameResult<DataFrame> {
        if orders.is_empty() {
            return Err(FrameError::empty("arrange needs at least one order"));
        }
        let cols = orders
            .iter()
            .map(|o| self.column(&o.column))
            .collect::<FrameResult<Vec<_>>>()?;

        // Stable sorts applied from the last key to the first compose into a lexicographic sort.
        let mut perm: Vec<usize> = (0..self.nrows).collect();
        for (order, col) in orders.iter().zip(cols).rev() {
            let current = col.take(&perm);
            perm = current
                .order(order.reverse)
                .into_iter()
                .map(|k| perm[k])
                .collect();
        }
        Ok(self.take_rows(&perm))
    }
}

#[cfg(test)]
mod tests {
    use super::Order;
    use crate::error::FrameError;
    use crate::frame::DataFrame;
    use crate::series::Series;
    use crate::types::DataType;

    fn sample_frame() -> DataFrame {
        DataFrame::new(vec![
            Series::new(["b", "a", "b", "a", "c"], DataType::Utf8, "group"),
            Series::new(["1", "3", "NaN", "2", "5"], DataType::Int64, "n"),
            Series::new([0, 1, 2, 3, 4], DataType::Int64, "row"),
        ])
        .unwrap()
    }

    fn rows(df: &DataFrame) -> Vec<i64> {
        df.col("row").unwrap().to_i64s().unwrap()
    }

    #[test]
    fn single_key_puts_missing_last() {
        let df = sample_frame();
        assert_eq!(rows(&df.arrange(&[Order::asc("n")]).unwrap()), vec![0, 3, 1, 4, 2]);
        assert_eq!(rows(&df.arrange(&[Order::desc("n")]).unwrap()), vec![4, 1, 3, 0, 2]);
    }

    #[test]
    fn later_keys_break_ties() {
        let df = sample_frame();
        let sorted = df.arrange(&[Order::asc("group"), Order::desc("n")]).unwrap();
        assert_eq!(rows(&sorted), vec![1, 3, 0, 2, 4]);
    }

    #[test]
    fn arrange_errors() {
        let df = sample_frame();
        assert!(matches!(df.arrange(&[]).unwrap_err(), FrameError::Empty { .. }));
        assert!(matches!(
            df.arrange(&[Order::asc("missing")]).unwrap_err(),
            FrameError::UnknownColumn { .. }
        ));
    }
}
