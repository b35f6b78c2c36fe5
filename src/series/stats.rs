//! Scalar reductions over a series.
//!
//! Numeric reductions read every element as a real number ([`Element::to_f64`]); a text series
//! or an empty series yields `NaN`. A missing element reads as `NaN` and propagates through
//! `sum`, `mean` and `std_dev`. A boolean series reduces as `0`/`1`, so `sum` counts the
//! `true` elements and `mean` is their share.

use crate::types::{DataType, Value};

use super::{Comparator, Element, Series};

impl Series {
    fn numeric_values(&self) -> Option<Vec<f64>> {
        if self.is_empty() || self.dtype() == DataType::Utf8 {
            return None;
        }
        Some(self.to_f64s())
    }

    /// Sum of all elements.
    ///
    /// Booleans count as `1` for `true` and `0` for `false`.
    pub fn sum(&self) -> f64 {
        self.numeric_values().map_or(f64::NAN, |xs| xs.iter().sum())
    }

    /// Arithmetic mean.
    pub fn mean(&self) -> f64 {
        self.numeric_values()
            .map_or(f64::NAN, |xs| xs.iter().sum::<f64>() / xs.len() as f64)
    }

    /// Sample standard deviation (`n - 1` denominator); `NaN` with fewer than two elements.
    pub fn std_dev(&self) -> f64 {
        let Some(xs) = self.numeric_values() else {
            return f64::NAN;
        };
        if xs.len() < 2 {
            return f64::NAN;
        }
        let n = xs.len() as f64;
        let mean = xs.iter().sum::<f64>() / n;
        let ss: f64 = xs.iter().map(|x| (x - mean) * (x - mean)).sum();
        (ss / (n - 1.0)).sqrt()
    }

    /// Middle value of the ascending order; the mean of the two middle values for even lengths.
    ///
    /// Booleans are ordered `false < true` and read as `0`/`1`.
    pub fn median(&self) -> f64 {
        let Some(ordered) = self.ordered_values() else {
            return f64::NAN;
        };
        let n = ordered.len();
        if n % 2 == 1 {
            ordered[n / 2]
        } else {
            (ordered[n / 2 - 1] + ordered[n / 2]) * 0.5
        }
    }

    /// Empirical quantile: the lowest ordered value `q` such that at least a fraction `p` of the
    /// elements are `<= q`.
    ///
    /// Returns `NaN` when `p` is outside `[0, 1]`.
    pub fn quantile(&self, p: f64) -> f64 {
        if !(0.0..=1.0).contains(&p) {
            return f64::NAN;
        }
        let Some(ordered) = self.ordered_values() else {
            return f64::NAN;
        };
        let target = p * ordered.len() as f64;
        ordered
            .iter()
            .enumerate()
            .find(|(i, _)| (i + 1) as f64 >= target)
            .map_or(f64::NAN, |(_, &q)| q)
    }

    /// Largest non-missing element.
    ///
    /// Text series compare lexicographically and return [`Value::Utf8`] (or [`Value::Null`] if
    /// nothing is present). Every other kind returns [`Value::Float64`], `NaN` if nothing is
    /// present.
    pub fn max(&self) -> Value {
        self.extreme(|candidate, best| candidate.compare(Comparator::Greater, best))
    }

    /// Smallest non-missing element. See [`Series::max`] for the return convention.
    pub fn min(&self) -> Value {
        self.extreme(|candidate, best| candidate.less(best))
    }

    fn extreme<F>(&self, better: F) -> Value
    where
        F: Fn(&Element, &Element) -> bool,
    {
        let best = self
            .iter()
            .filter(|e| !e.is_missing())
            .fold(None::<&Element>, |best, e| match best {
                Some(b) if !better(e, b) => Some(b),
                _ => Some(e),
            });
        match (self.dtype(), best) {
            (DataType::Utf8, Some(e)) => e.to_value(),
            (DataType::Utf8, None) => Value::Null,
            (_, Some(e)) => Value::Float64(e.to_f64()),
            (_, None) => Value::Float64(f64::NAN),
        }
    }

    fn ordered_values(&self) -> Option<Vec<f64>> {
        if self.is_empty() || self.dtype() == DataType::Utf8 {
            return None;
        }
        Some(self.order(false).into_iter().map(|i| self.elem(i).to_f64()).collect())
    }
}
