//! Key-based and Cartesian joins.
//!
//! A join is planned once ([`JoinPlan`]), probed over ranges of "major" rows (left rows, or
//! right rows for a right join) into [`RowPair`]s, and finally materialized into a table. The
//! probe step has no cross-row state, so the execution engine can split it into chunks.

use std::collections::HashSet;
use std::ops::Range;

use crate::error::{FrameError, FrameResult};
use crate::series::{Element, Series};

use super::DataFrame;

/// Which unmatched rows a key join keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinKind {
    /// Matched pairs only.
    Inner,
    /// Matched pairs plus unmatched left rows.
    Left,
    /// Matched pairs plus unmatched right rows.
    Right,
    /// Matched pairs plus unmatched rows from both sides.
    Outer,
}

/// One output row: positions in the left and right tables, `None` for a padded side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RowPair {
    pub(crate) left: Option<usize>,
    pub(crate) right: Option<usize>,
}

/// A validated join between two tables.
#[derive(Debug)]
pub(crate) struct JoinPlan<'a> {
    kind: Option<JoinKind>,
    left: &'a DataFrame,
    right: &'a DataFrame,
    left_keys: Vec<usize>,
    right_keys: Vec<usize>,
}

impl<'a> JoinPlan<'a> {
    /// Plan a key join. Keys must be non-empty, distinct and present on both sides.
    pub(crate) fn keyed(
        kind: JoinKind,
        left: &'a DataFrame,
        right: &'a DataFrame,
        keys: &[&str],
    ) -> FrameResult<Self> {
        if keys.is_empty() {
            return Err(FrameError::empty("join keys not specified"));
        }
        let mut seen = HashSet::new();
        if let Some(dup) = keys.iter().find(|k| !seen.insert(**k)) {
            return Err(FrameError::dimension(format!("join key '{dup}' given more than once")));
        }
        let left_keys = keys
            .iter()
            .map(|k| left.column_index(k))
            .collect::<FrameResult<Vec<_>>>()?;
        let right_keys = keys
            .iter()
            .map(|k| right.column_index(k))
            .collect::<FrameResult<Vec<_>>>()?;
        Ok(Self {
            kind: Some(kind),
            left,
            right,
            left_keys,
            right_keys,
        })
    }

    /// Plan a Cartesian product.
    pub(crate) fn cross(left: &'a DataFrame, right: &'a DataFrame) -> Self {
        Self {
            kind: None,
            left,
            right,
            left_keys: Vec::new(),
            right_keys: Vec::new(),
        }
    }

    /// Number of rows the probe iterates over.
    pub(crate) fn major_rows(&self) -> usize {
        match self.kind {
            Some(JoinKind::Right) => self.right.nrow(),
            _ => self.left.nrow(),
        }
    }

    fn matches(&self, i: usize, j: usize) -> bool {
        self.left_keys
            .iter()
            .zip(&self.right_keys)
            .all(|(&lk, &rk)| self.left.elem(i, lk).eq_elem(self.right.elem(j, rk)))
    }

    /// Pairs produced by the major rows in `rows`, in major-row order.
    pub(crate) fn probe(&self, rows: Range<usize>) -> Vec<RowPair> {
        let mut pairs = Vec::new();
        let Some(kind) = self.kind else {
            for i in rows {
                pairs.extend((0..self.right.nrow()).map(|j| RowPair {
                    left: Some(i),
                    right: Some(j),
                }));
            }
            return pairs;
        };

        for major in rows {
            let before = pairs.len();
            if kind == JoinKind::Right {
                pairs.extend((0..self.left.nrow()).filter(|&i| self.matches(i, major)).map(
                    |i| RowPair {
                        left: Some(i),
                        right: Some(major),
                    },
                ));
                if pairs.len() == before {
                    pairs.push(RowPair {
                        left: None,
                        right: Some(major),
                    });
                }
            } else {
                pairs.extend((0..self.right.nrow()).filter(|&j| self.matches(major, j)).map(
                    |j| RowPair {
                        left: Some(major),
                        right: Some(j),
                    },
                ));
                if pairs.len() == before && kind != JoinKind::Inner {
                    pairs.push(RowPair {
                        left: Some(major),
                        right: None,
                    });
                }
            }
        }
        pairs
    }

    /// Put probed pairs into final output order.
    ///
    /// A right join lists every matched pair before the unmatched right rows. An outer join
    /// appends the right rows no left row matched.
    pub(crate) fn finish(&self, pairs: Vec<RowPair>) -> Vec<RowPair> {
        match self.kind {
            Some(JoinKind::Right) => {
                let (mut matched, unmatched): (Vec<_>, Vec<_>) =
                    pairs.into_iter().partition(|p| p.left.is_some());
                matched.extend(unmatched);
                matched
            }
            Some(JoinKind::Outer) => {
                let hit: HashSet<usize> = pairs
                    .iter()
                    .filter(|p| p.left.is_some())
                    .filter_map(|p| p.right)
                    .collect();
                let mut pairs = pairs;
                pairs.extend((0..self.right.nrow()).filter(|j| !hit.contains(j)).map(|j| {
                    RowPair {
                        left: None,
                        right: Some(j),
                    }
                }));
                pairs
            }
            _ => pairs,
        }
    }

    /// Build the output table: key columns, left non-key columns, right non-key columns.
    ///
    /// Key values come from the left row, or from the right row (coerced into the left kind)
    /// when the left side is padded.
    pub(crate) fn materialize(&self, pairs: &[RowPair]) -> FrameResult<DataFrame> {
        let mut columns = Vec::with_capacity(self.left.ncol() + self.right.ncol());

        for (&lk, &rk) in self.left_keys.iter().zip(&self.right_keys) {
            let template = &self.left.columns()[lk];
            let source = &self.right.columns()[rk];
            let elements = pairs
                .iter()
                .map(|p| match (p.left, p.right) {
                    (Some(i), _) => template.elem(i).clone(),
                    (None, Some(j)) => source.elem(j).cast(template.dtype()),
                    (None, None) => Element::missing(template.dtype()),
                })
                .collect();
            columns.push(Series::from_owned_elements(
                elements,
                template.dtype(),
                template.name(),
            ));
        }

        for (c, col) in self.left.columns().iter().enumerate() {
            if !self.left_keys.contains(&c) {
                columns.push(gather(col, pairs.iter().map(|p| p.left)));
            }
        }
        for (c, col) in self.right.columns().iter().enumerate() {
            if !self.right_keys.contains(&c) {
                columns.push(gather(col, pairs.iter().map(|p| p.right)));
            }
        }
        DataFrame::new(columns)
    }

    /// Probe every major row and materialize, sequentially.
    pub(crate) fn run(&self) -> FrameResult<DataFrame> {
        let pairs = self.finish(self.probe(0..self.major_rows()));
        self.materialize(&pairs)
    }
}

fn gather<I>(col: &Series, rows: I) -> Series
where
    I: Iterator<Item = Option<usize>>,
{
    let elements = rows
        .map(|r| r.map_or_else(|| Element::missing(col.dtype()), |i| col.elem(i).clone()))
        .collect();
    Series::from_owned_elements(elements, col.dtype(), col.name())
}

impl DataFrame {
    /// Join with `right` on `keys` using `kind`.
    ///
    /// Keys match when every key pair compares equal; a missing key value never matches.
    pub fn join(
        &self,
        kind: JoinKind,
        right: &DataFrame,
        keys: &[&str],
    ) -> FrameResult<DataFrame> {
        JoinPlan::keyed(kind, self, right, keys)?.run()
    }

    /// Rows of both tables whose keys match.
    pub fn inner_join(&self, right: &DataFrame, keys: &[&str]) -> FrameResult<DataFrame> {
        self.join(JoinKind::Inner, right, keys)
    }

    /// Every left row, padded when no right row matches.
    pub fn left_join(&self, right: &DataFrame, keys: &[&str]) -> FrameResult<DataFrame> {
        self.join(JoinKind::Left, right, keys)
    }

    /// Every right row, padded when no left row matches.
    pub fn right_join(&self, right: &DataFrame, keys: &[&str]) -> FrameResult<DataFrame> {
        self.join(JoinKind::Right, right, keys)
    }

    /// Every row of both tables, padded where unmatched.
    pub fn outer_join(&self, right: &DataFrame, keys: &[&str]) -> FrameResult<DataFrame> {
        self.join(JoinKind::Outer, right, keys)
    }

    /// Cartesian product: every left row paired with every right row.
    pub fn cross_join(&self, right: &DataFrame) -> FrameResult<DataFrame> {
        JoinPlan::cross(self, right).run()
    }
}
