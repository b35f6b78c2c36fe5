//! Named, homogeneously-typed columns.
//!
//! A [`Series`] is an ordered sequence of [`Element`]s that all share the series' [`DataType`].
//! Inputs of any kind are coerced on insertion (see [`Element::from_value`]), so a series never
//! stores a mismatched element.
//!
//! ```rust
//! use typed_frame::series::{Comparator, Series};
//! use typed_frame::types::DataType;
//!
//! let ages = Series::new([25, 30, 35], DataType::Int64, "age");
//! let over_28 = ages.compare(Comparator::Greater, 28).unwrap();
//! assert_eq!(over_28.to_bools().unwrap(), vec![false, true, true]);
//! assert_eq!(ages.mean(), 30.0);
//! ```

mod element;
mod indexes;
mod rolling;
mod stats;

use std::fmt;

use crate::error::{FrameError, FrameResult};
use crate::types::{DataType, Value};

pub use element::{Comparator, Element};
pub use indexes::Indexes;
pub use rolling::{RollingBlocks, RollingWindow};

/// A named column of elements of one kind.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    name: String,
    dtype: DataType,
    elements: Vec<Element>,
}

/// Right-hand side of [`Series::compare`].
///
/// Whatever is given is first coerced into a series of the left-hand side's kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// Raw values.
    Values(Vec<Value>),
    /// Another series.
    Series(Series),
}

impl Series {
    /// Build a series of kind `dtype` from native values.
    pub fn new<I, V>(values: I, dtype: DataType, name: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let elements = values
            .into_iter()
            .map(|v| Element::from_value(dtype, &v.into()))
            .collect();
        Self {
            name: name.into(),
            dtype,
            elements,
        }
    }

    /// A length-1 series holding a single missing element.
    pub fn null(dtype: DataType, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dtype,
            elements: vec![Element::missing(dtype)],
        }
    }

    /// A series of `len` missing elements.
    pub fn missing(dtype: DataType, len: usize, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dtype,
            elements: vec![Element::missing(dtype); len],
        }
    }

    /// Build a series of kind `dtype` from existing elements, coercing each one.
    pub fn from_elements<'a, I>(elements: I, dtype: DataType, name: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = &'a Element>,
    {
        Self {
            name: name.into(),
            dtype,
            elements: elements.into_iter().map(|e| e.cast(dtype)).collect(),
        }
    }

    pub(crate) fn from_owned_elements(
        elements: Vec<Element>,
        dtype: DataType,
        name: impl Into<String>,
    ) -> Self {
        let elements = elements
            .into_iter()
            .map(|e| if e.dtype() == dtype { e } else { e.cast(dtype) })
            .collect();
        Self {
            name: name.into(),
            dtype,
            elements,
        }
    }

    /// Integer series with an empty name.
    pub fn ints<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::new(values, DataType::Int64, "")
    }

    /// Real series with an empty name.
    pub fn floats<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::new(values, DataType::Float64, "")
    }

    /// Boolean series with an empty name.
    pub fn bools<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::new(values, DataType::Bool, "")
    }

    /// Text series with an empty name.
    pub fn strings<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::new(values, DataType::Utf8, "")
    }

    /// An empty series with the same name and kind.
    pub fn empty(&self) -> Self {
        Self {
            name: self.name.clone(),
            dtype: self.dtype,
            elements: Vec::new(),
        }
    }

    /// Re-coerce every element into `dtype`, keeping the name.
    pub fn cast(&self, dtype: DataType) -> Self {
        Self::from_elements(&self.elements, dtype, self.name.clone())
    }

    /// Series name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename in place.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Builder-style rename.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Kind of every element.
    pub fn dtype(&self) -> DataType {
        self.dtype
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the series has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Element at position `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of range.
    pub fn elem(&self, i: usize) -> &Element {
        &self.elements[i]
    }

    /// Element at position `i`, or `None` if out of range.
    pub fn get(&self, i: usize) -> Option<&Element> {
        self.elements.get(i)
    }

    /// Native value at position `i` ([`Value::Null`] when missing or out of range).
    pub fn value(&self, i: usize) -> Value {
        self.get(i).map_or(Value::Null, Element::to_value)
    }

    /// Iterate over elements.
    pub fn iter(&self) -> std::slice::Iter<'_, Element> {
        self.elements.iter()
    }

    /// Returns `true` if any element is missing.
    pub fn has_nan(&self) -> bool {
        self.elements.iter().any(Element::is_missing)
    }

    /// Per-element missing flags.
    pub fn is_nan(&self) -> Vec<bool> {
        self.elements.iter().map(Element::is_missing).collect()
    }

    /// String rendering of every element (`"NaN"` for missing ones).
    pub fn records(&self) -> Vec<String> {
        self.elements.iter().map(ToString::to_string).collect()
    }

    /// Real rendering of every element (`NaN` for missing or unparseable ones).
    pub fn to_f64s(&self) -> Vec<f64> {
        self.elements.iter().map(Element::to_f64).collect()
    }

    /// Integer rendering of every element; fails on the first unconvertible one.
    pub fn to_i64s(&self) -> FrameResult<Vec<i64>> {
        self.elements.iter().map(Element::to_i64).collect()
    }

    /// Boolean rendering of every element; fails on the first unconvertible one.
    pub fn to_bools(&self) -> FrameResult<Vec<bool>> {
        self.elements.iter().map(Element::to_bool).collect()
    }

    /// Append values in place, coercing them into this series' kind.
    pub fn append<I, V>(&mut self, values: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let dtype = self.dtype;
        self.elements
            .extend(values.into_iter().map(|v| Element::from_value(dtype, &v.into())));
    }

    /// Append one element in place, coercing it into this series' kind.
    pub fn push_elem(&mut self, element: &Element) {
        self.elements.push(element.cast(self.dtype));
    }

    /// Append every element of `other` in place.
    pub fn append_series(&mut self, other: &Series) {
        let dtype = self.dtype;
        self.elements.extend(other.elements.iter().map(|e| e.cast(dtype)));
    }

    /// A new series holding `self` followed by `other` (coerced into this kind).
    pub fn concat(&self, other: &Series) -> Series {
        let mut out = self.clone();
        out.append_series(other);
        out
    }

    /// A new series with the elements at `indexes`, in index order.
    pub fn subset(&self, indexes: impl Into<Indexes>) -> FrameResult<Series> {
        let idx = indexes.into().resolve(self.len())?;
        Ok(self.take(&idx))
    }

    /// Gather already-validated positions.
    pub(crate) fn take(&self, idx: &[usize]) -> Series {
        Series {
            name: self.name.clone(),
            dtype: self.dtype,
            elements: idx.iter().map(|&i| self.elements[i].clone()).collect(),
        }
    }

    /// Overwrite the elements at `indexes` with the elements of `values`, in place.
    ///
    /// `values` must have exactly as many elements as `indexes` selects. Nothing is written if
    /// any check fails.
    pub fn set(&mut self, indexes: impl Into<Indexes>, values: &Series) -> FrameResult<()> {
        let idx = indexes.into().resolve(self.len())?;
        if idx.len() != values.len() {
            return Err(FrameError::dimension(format!(
                "set: {} positions but {} new values",
                idx.len(),
                values.len()
            )));
        }
        for (&i, e) in idx.iter().zip(values.iter()) {
            self.elements[i] = e.cast(self.dtype);
        }
        Ok(())
    }

    /// Elements `j..k` as a new series.
    pub fn slice(&self, j: usize, k: usize) -> FrameResult<Series> {
        if j > k || k > self.len() {
            return Err(FrameError::IndexOutOfRange {
                index: i64::try_from(k.max(j)).unwrap_or(i64::MAX),
                len: self.len(),
            });
        }
        Ok(self.take(&(j..k).collect::<Vec<_>>()))
    }

    /// Apply `f` to every element, coercing the results back into this series' kind.
    pub fn map<F>(&self, mut f: F) -> Series
    where
        F: FnMut(&Element) -> Value,
    {
        Series::new(self.elements.iter().map(|e| f(e)), self.dtype, self.name.clone())
    }

    /// Compare every element against `operand`, producing a boolean series of equal length.
    ///
    /// The operand is coerced into a series of this kind first. Then:
    ///
    /// - `In` tests membership of each element in the operand (elementwise `Eq`)
    /// - a length-1 operand is broadcast against every element
    /// - otherwise lengths must match and elements are compared pairwise
    pub fn compare(
        &self,
        comparator: Comparator,
        operand: impl Into<Operand>,
    ) -> FrameResult<Series> {
        let comp = match operand.into() {
            Operand::Values(values) => Series::new(values, self.dtype, ""),
            Operand::Series(s) => s.cast(self.dtype),
        };

        let bools: Vec<bool> = if comparator == Comparator::In {
            self.elements
                .iter()
                .map(|e| comp.elements.iter().any(|m| e.eq_elem(m)))
                .collect()
        } else if comp.len() == 1 {
            let rhs = &comp.elements[0];
            self.elements.iter().map(|e| e.compare(comparator, rhs)).collect()
        } else {
            if self.len() != comp.len() {
                return Err(FrameError::dimension(format!(
                    "can't compare: length {} vs {}",
                    self.len(),
                    comp.len()
                )));
            }
            self.elements
                .iter()
                .zip(comp.elements.iter())
                .map(|(a, b)| a.compare(comparator, b))
                .collect()
        };
        Ok(Series::bools(bools))
    }

    /// Evaluate a caller-supplied predicate on every element.
    pub fn compare_fn<F>(&self, f: F) -> Series
    where
        F: Fn(&Element) -> bool,
    {
        Series::bools(self.elements.iter().map(f).collect::<Vec<_>>())
    }

    /// Positions that sort this series.
    ///
    /// Non-missing elements are stable-sorted ascending (or descending when `reverse`); missing
    /// elements follow in their original relative order regardless of `reverse`.
    pub fn order(&self, reverse: bool) -> Vec<usize> {
        let (mut present, missing): (Vec<usize>, Vec<usize>) =
            (0..self.len()).partition(|&i| !self.elements[i].is_missing());
        present.sort_by(|&a, &b| {
            let (x, y) = (&self.elements[a], &self.elements[b]);
            let ord = if x.less(y) {
                std::cmp::Ordering::Less
            } else if y.less(x) {
                std::cmp::Ordering::Greater
            } else {
                std::cmp::Ordering::Equal
            };
            if reverse { ord.reverse() } else { ord }
        });
        present.extend(missing);
        present
    }

    /// A rolling window of `window` elements over this series.
    pub fn rolling(&self, window: usize) -> RollingWindow<'_> {
        RollingWindow::new(window, self)
    }

    /// Multi-line summary: name, kind, length and values.
    pub fn summary(&self) -> String {
        let mut lines = Vec::new();
        if !self.name.is_empty() {
            lines.push(format!("Name: {}", self.name));
        }
        lines.push(format!("Type: {}", self.dtype));
        lines.push(format!("Length: {}", self.len()));
        if !self.is_empty() {
            lines.push(format!("Values: {self}"));
        }
        lines.join("\n")
    }
}

impl fmt::Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.records().join(" "))
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item = &'a Element;
    type IntoIter = std::slice::Iter<'a, Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl From<Series> for Operand {
    fn from(s: Series) -> Self {
        Self::Series(s)
    }
}

impl From<&Series> for Operand {
    fn from(s: &Series) -> Self {
        Self::Series(s.clone())
    }
}

impl From<Value> for Operand {
    fn from(v: Value) -> Self {
        Self::Values(vec![v])
    }
}

impl From<i64> for Operand {
    fn from(v: i64) -> Self {
        Self::Values(vec![v.into()])
    }
}

impl From<i32> for Operand {
    fn from(v: i32) -> Self {
        Self::Values(vec![v.into()])
    }
}

impl From<f64> for Operand {
    fn from(v: f64) -> Self {
        Self::Values(vec![v.into()])
    }
}

impl From<bool> for Operand {
    fn from(v: bool) -> Self {
        Self::Values(vec![v.into()])
    }
}

impl From<&str> for Operand {
    fn from(v: &str) -> Self {
        Self::Values(vec![v.into()])
    }
}

impl From<String> for Operand {
    fn from(v: String) -> Self {
        Self::Values(vec![v.into()])
    }
}

impl<T: Into<Value>> From<Vec<T>> for Operand {
    fn from(v: Vec<T>) -> Self {
        Self::Values(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Operand {
    fn from(v: [T; N]) -> Self {
        Self::Values(v.into_iter().map(Into::into).collect())
    }
}
