//! Row index specifiers accepted by [`super::Series::subset`] and [`super::Series::set`].

use crate::error::{FrameError, FrameResult};
use crate::types::DataType;

use super::Series;

/// Selects positions of a series.
///
/// - `Single` / `List`: explicit positions, in order (repeats allowed)
/// - `Mask`: keep positions marked `true`; must match the series length
/// - `Series`: an `Int64` series behaves like `List`, a `Bool` series like `Mask`
#[derive(Debug, Clone, PartialEq)]
pub enum Indexes {
    /// A single position.
    Single(usize),
    /// A list of positions.
    List(Vec<usize>),
    /// A boolean mask.
    Mask(Vec<bool>),
    /// An integer or boolean series.
    Series(Series),
}

impl Indexes {
    /// Resolve to concrete positions for a sequence of length `len`.
    ///
    /// Every returned position is checked against `len`.
    pub fn resolve(&self, len: usize) -> FrameResult<Vec<usize>> {
        let idx = match self {
            Self::Single(i) => vec![*i],
            Self::List(list) => list.clone(),
            Self::Mask(mask) => mask_positions(mask, len)?,
            Self::Series(s) => series_positions(s, len)?,
        };
        if let Some(&bad) = idx.iter().find(|&&i| i >= len) {
            return Err(FrameError::IndexOutOfRange {
                index: i64::try_from(bad).unwrap_or(i64::MAX),
                len,
            });
        }
        Ok(idx)
    }
}

fn mask_positions(mask: &[bool], len: usize) -> FrameResult<Vec<usize>> {
    if mask.len() != len {
        return Err(FrameError::dimension(format!(
            "boolean index has length {} but the target has length {len}",
            mask.len()
        )));
    }
    Ok(mask
        .iter()
        .enumerate()
        .filter_map(|(i, &keep)| keep.then_some(i))
        .collect())
}

fn series_positions(s: &Series, len: usize) -> FrameResult<Vec<usize>> {
    if s.has_nan() {
        return Err(FrameError::coercion("index contains missing values"));
    }
    match s.dtype() {
        DataType::Int64 => s
            .to_i64s()?
            .into_iter()
            .map(|i| {
                usize::try_from(i).map_err(|_| FrameError::IndexOutOfRange { index: i, len })
            })
            .collect(),
        DataType::Bool => mask_positions(&s.to_bools()?, len),
        other => Err(FrameError::unsupported(format!(
            "a {other} series cannot be used as a row index"
        ))),
    }
}

impl From<usize> for Indexes {
    fn from(i: usize) -> Self {
        Self::Single(i)
    }
}

impl From<Vec<usize>> for Indexes {
    fn from(v: Vec<usize>) -> Self {
        Self::List(v)
    }
}

impl From<&[usize]> for Indexes {
    fn from(v: &[usize]) -> Self {
        Self::List(v.to_vec())
    }
}

impl<const N: usize> From<[usize; N]> for Indexes {
    fn from(v: [usize; N]) -> Self {
        Self::List(v.to_vec())
    }
}

impl From<std::ops::Range<usize>> for Indexes {
    fn from(r: std::ops::Range<usize>) -> Self {
        Self::List(r.collect())
    }
}

impl From<Vec<bool>> for Indexes {
    fn from(v: Vec<bool>) -> Self {
        Self::Mask(v)
    }
}

impl From<&[bool]> for Indexes {
    fn from(v: &[bool]) -> Self {
        Self::Mask(v.to_vec())
    }
}

impl<const N: usize> From<[bool; N]> for Indexes {
    fn from(v: [bool; N]) -> Self {
        Self::Mask(v.to_vec())
    }
}

impl From<Series> for Indexes {
    fn from(s: Series) -> Self {
        Self::Series(s)
    }
}

impl From<&Series> for Indexes {
    fn from(s: &Series) -> Self {
        Self::Series(s.clone())
    }
}
