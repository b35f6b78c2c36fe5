//! Rolling-window reductions.

use crate::types::DataType;

use super::{Element, Series};

/// A window of fixed size sliding over a borrowed series.
///
/// Built with [`Series::rolling`].
#[derive(Debug, Clone, Copy)]
pub struct RollingWindow<'a> {
    window: usize,
    series: &'a Series,
}

/// Lazy sequence of window blocks, one per position of the source series.
#[derive(Debug, Clone)]
pub struct RollingBlocks<'a> {
    window: usize,
    series: &'a Series,
    position: usize,
}

impl<'a> RollingWindow<'a> {
    pub(crate) fn new(window: usize, series: &'a Series) -> Self {
        Self { window, series }
    }

    /// Window size.
    pub fn window(&self) -> usize {
        self.window
    }

    /// Blocks for positions `1..=len`.
    ///
    /// Position `i` yields the `window` elements ending just before `i` (inclusive of `i - 1`),
    /// or an empty series while fewer than `window` elements are available. Each call starts a
    /// fresh iterator.
    pub fn blocks(&self) -> RollingBlocks<'a> {
        RollingBlocks {
            window: self.window,
            series: self.series,
            position: 0,
        }
    }

    /// Mean of every block, as a `Float64` series named `"Mean"`.
    pub fn mean(&self) -> Series {
        self.reduce("Mean", Series::mean)
    }

    /// Sample standard deviation of every block, as a `Float64` series named `"StdDev"`.
    pub fn std_dev(&self) -> Series {
        self.reduce("StdDev", Series::std_dev)
    }

    fn reduce(&self, name: &str, f: fn(&Series) -> f64) -> Series {
        let elements = self
            .blocks()
            .map(|block| Element::Float64(Some(f(&block)).filter(|v| !v.is_nan())))
            .collect();
        Series::from_owned_elements(elements, DataType::Float64, name)
    }
}

impl Iterator for RollingBlocks<'_> {
    type Item = Series;

    fn next(&mut self) -> Option<Series> {
        if self.position >= self.series.len() {
            return None;
        }
        self.position += 1;
        let i = self.position;
        if i < self.window {
            return Some(self.series.empty());
        }
        let idx: Vec<usize> = (i - self.window..i).collect();
        Some(self.series.take(&idx))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.series.len() - self.position;
        (left, Some(left))
    }
}

impl ExactSizeIterator for RollingBlocks<'_> {}
