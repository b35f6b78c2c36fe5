//! The tagged scalar stored inside a series.

use std::cmp::Ordering;
use std::fmt;

use crate::error::{FrameError, FrameResult};
use crate::types::{DataType, Value};

/// Relational comparison between two elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    /// `==`
    Eq,
    /// `!=`
    Neq,
    /// `>`
    Greater,
    /// `>=`
    GreaterEq,
    /// `<`
    Less,
    /// `<=`
    LessEq,
    /// Membership in the operand sequence (elementwise `Eq`).
    In,
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Eq => "==",
            Self::Neq => "!=",
            Self::Greater => ">",
            Self::GreaterEq => ">=",
            Self::Less => "<",
            Self::LessEq => "<=",
            Self::In => "in",
        };
        f.write_str(s)
    }
}

/// One element of a series: a kind tag plus an optional payload.
///
/// `None` is the missing value. The payload of a missing element does not exist, so it cannot
/// be read by accident. A `Float64` element never holds `NaN`; NaN inputs become missing.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    /// Integer element.
    Int64(Option<i64>),
    /// Real element.
    Float64(Option<f64>),
    /// Boolean element.
    Bool(Option<bool>),
    /// Text element.
    Utf8(Option<String>),
}

impl Element {
    /// A missing element of the given kind.
    pub fn missing(dtype: DataType) -> Self {
        match dtype {
            DataType::Int64 => Self::Int64(None),
            DataType::Float64 => Self::Float64(None),
            DataType::Bool => Self::Bool(None),
            DataType::Utf8 => Self::Utf8(None),
        }
    }

    /// Coerce a native value into an element of kind `dtype`.
    pub fn new(dtype: DataType, value: impl Into<Value>) -> Self {
        Self::from_value(dtype, &value.into())
    }

    /// Coerce a native value into an element of kind `dtype`.
    ///
    /// Values that cannot be represented in the target kind become missing.
    pub fn from_value(dtype: DataType, value: &Value) -> Self {
        match dtype {
            DataType::Int64 => Self::Int64(value_to_i64(value)),
            DataType::Float64 => Self::Float64(value_to_f64(value)),
            DataType::Bool => Self::Bool(value_to_bool(value)),
            DataType::Utf8 => Self::Utf8(value_to_string(value)),
        }
    }

    /// Coerce this element into another kind. Same-kind casts are plain copies.
    pub fn cast(&self, dtype: DataType) -> Self {
        if self.dtype() == dtype {
            return self.clone();
        }
        Self::from_value(dtype, &self.to_value())
    }

    /// Overwrite this element with `value`, keeping its kind.
    ///
    /// The payload and the missing flag are re-derived together.
    pub fn set(&mut self, value: &Value) {
        *self = Self::from_value(self.dtype(), value);
    }

    /// Kind of this element.
    pub fn dtype(&self) -> DataType {
        match self {
            Self::Int64(_) => DataType::Int64,
            Self::Float64(_) => DataType::Float64,
            Self::Bool(_) => DataType::Bool,
            Self::Utf8(_) => DataType::Utf8,
        }
    }

    /// Returns `true` if this element is missing.
    pub fn is_missing(&self) -> bool {
        match self {
            Self::Int64(v) => v.is_none(),
            Self::Float64(v) => v.is_none(),
            Self::Bool(v) => v.is_none(),
            Self::Utf8(v) => v.is_none(),
        }
    }

    /// Native value of this element ([`Value::Null`] when missing).
    pub fn to_value(&self) -> Value {
        match self {
            Self::Int64(v) => v.map_or(Value::Null, Value::Int64),
            Self::Float64(v) => v.map_or(Value::Null, Value::Float64),
            Self::Bool(v) => v.map_or(Value::Null, Value::Bool),
            Self::Utf8(v) => v.clone().map_or(Value::Null, Value::Utf8),
        }
    }

    /// Real representation; `NaN` when missing or not parseable.
    pub fn to_f64(&self) -> f64 {
        match self {
            Self::Int64(Some(v)) => *v as f64,
            Self::Float64(Some(v)) => *v,
            Self::Bool(Some(v)) => f64::from(u8::from(*v)),
            Self::Utf8(Some(s)) => s.parse::<f64>().unwrap_or(f64::NAN),
            _ => f64::NAN,
        }
    }

    /// Integer representation.
    ///
    /// Fails for missing elements and for values with no integer form.
    pub fn to_i64(&self) -> FrameResult<i64> {
        if self.is_missing() {
            return Err(FrameError::coercion("can't convert NaN to int"));
        }
        value_to_i64(&self.to_value())
            .ok_or_else(|| FrameError::coercion(format!("can't convert {self} to int")))
    }

    /// Boolean representation.
    ///
    /// Fails for missing elements and for values other than `true/t/1` and `false/f/0`.
    pub fn to_bool(&self) -> FrameResult<bool> {
        if self.is_missing() {
            return Err(FrameError::coercion("can't convert NaN to bool"));
        }
        value_to_bool(&self.to_value())
            .ok_or_else(|| FrameError::coercion(format!("can't convert {self} to bool")))
    }

    /// Compare `self` with `other` after coercing `other` into `self`'s kind.
    ///
    /// If either side is missing every comparison is `false`, `Neq` included. `In` behaves like
    /// `Eq` at the element level.
    pub fn compare(&self, comparator: Comparator, other: &Element) -> bool {
        let Some(ord) = self.order_against(other) else {
            return false;
        };
        match comparator {
            Comparator::Eq | Comparator::In => ord == Ordering::Equal,
            Comparator::Neq => ord != Ordering::Equal,
            Comparator::Greater => ord == Ordering::Greater,
            Comparator::GreaterEq => ord != Ordering::Less,
            Comparator::Less => ord == Ordering::Less,
            Comparator::LessEq => ord != Ordering::Greater,
        }
    }

    /// Shorthand for `self.compare(Comparator::Eq, other)`.
    pub fn eq_elem(&self, other: &Element) -> bool {
        self.compare(Comparator::Eq, other)
    }

    /// Shorthand for `self.compare(Comparator::Less, other)`.
    pub fn less(&self, other: &Element) -> bool {
        self.compare(Comparator::Less, other)
    }

    fn order_against(&self, other: &Element) -> Option<Ordering> {
        let rhs = other.cast(self.dtype());
        match (self, &rhs) {
            (Self::Int64(Some(a)), Self::Int64(Some(b))) => Some(a.cmp(b)),
            (Self::Float64(Some(a)), Self::Float64(Some(b))) => a.partial_cmp(b),
            (Self::Bool(Some(a)), Self::Bool(Some(b))) => Some(a.cmp(b)),
            (Self::Utf8(Some(a)), Self::Utf8(Some(b))) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int64(Some(v)) => write!(f, "{v}"),
            Self::Float64(Some(v)) => write!(f, "{v:.6}"),
            Self::Bool(Some(v)) => write!(f, "{v}"),
            Self::Utf8(Some(v)) => f.write_str(v),
            _ => f.write_str("NaN"),
        }
    }
}

fn value_to_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Null => None,
        Value::Int64(v) => Some(*v),
        Value::Float64(v) if v.is_finite() => Some(v.trunc() as i64),
        Value::Float64(_) => None,
        Value::Bool(v) => Some(i64::from(*v)),
        Value::Utf8(s) if s == "NaN" => None,
        Value::Utf8(s) => s.parse::<i64>().ok(),
    }
}

fn value_to_f64(value: &Value) -> Option<f64> {
    let f = match value {
        Value::Null => return None,
        Value::Int64(v) => *v as f64,
        Value::Float64(v) => *v,
        Value::Bool(v) => f64::from(u8::from(*v)),
        Value::Utf8(s) => s.parse::<f64>().ok()?,
    };
    (!f.is_nan()).then_some(f)
}

fn value_to_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Null => None,
        Value::Bool(v) => Some(*v),
        Value::Int64(1) => Some(true),
        Value::Int64(0) => Some(false),
        Value::Int64(_) => None,
        Value::Float64(v) if *v == 1.0 => Some(true),
        Value::Float64(v) if *v == 0.0 => Some(false),
        Value::Float64(_) => None,
        Value::Utf8(s) => match s.to_ascii_lowercase().as_str() {
            "true" | "t" | "1" => Some(true),
            "false" | "f" | "0" => Some(false),
            _ => None,
        },
    }
}

fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Utf8(s) if s == "NaN" => None,
        Value::Float64(v) if v.is_nan() => None,
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::{Comparator, Element};
    use crate::types::{DataType, Value};

    #[test]
    fn text_coerces_into_every_kind() {
        assert_eq!(Element::new(DataType::Int64, "42"), Element::Int64(Some(42)));
        assert_eq!(Element::new(DataType::Int64, "4.2"), Element::Int64(None));
        assert_eq!(Element::new(DataType::Float64, "4.25"), Element::Float64(Some(4.25)));
        assert_eq!(Element::new(DataType::Bool, "T"), Element::Bool(Some(true)));
        assert_eq!(Element::new(DataType::Bool, "False"), Element::Bool(Some(false)));
        assert_eq!(Element::new(DataType::Bool, "yes"), Element::Bool(None));
        for kind in [DataType::Int64, DataType::Float64, DataType::Bool, DataType::Utf8] {
            assert!(Element::new(kind, "NaN").is_missing(), "{kind}");
        }
    }

    #[test]
    fn real_to_integer_truncates_and_rejects_non_finite() {
        assert_eq!(Element::new(DataType::Int64, 3.9), Element::Int64(Some(3)));
        assert_eq!(Element::new(DataType::Int64, -3.9), Element::Int64(Some(-3)));
        assert!(Element::new(DataType::Int64, f64::NAN).is_missing());
        assert!(Element::new(DataType::Int64, f64::INFINITY).is_missing());
        assert!(Element::new(DataType::Float64, f64::NAN).is_missing());
    }

    #[test]
    fn bool_conversions() {
        assert_eq!(Element::new(DataType::Int64, true), Element::Int64(Some(1)));
        assert_eq!(Element::new(DataType::Bool, 0), Element::Bool(Some(false)));
        assert!(Element::new(DataType::Bool, 2).is_missing());
        assert_eq!(Element::new(DataType::Bool, 1.0), Element::Bool(Some(true)));
        assert!(Element::new(DataType::Bool, 0.5).is_missing());
    }

    #[test]
    fn text_rendering() {
        assert_eq!(Element::new(DataType::Utf8, 7), Element::Utf8(Some("7".to_string())));
        assert_eq!(
            Element::new(DataType::Utf8, 2.5),
            Element::Utf8(Some("2.500000".to_string()))
        );
        assert_eq!(Element::Int64(None).to_string(), "NaN");
        assert!(Element::new(DataType::Utf8, Value::Null).is_missing());
    }

    #[test]
    fn comparisons_coerce_right_operand() {
        let three = Element::Int64(Some(3));
        assert!(three.compare(Comparator::Eq, &Element::Float64(Some(3.7))));
        assert!(three.compare(Comparator::Less, &Element::Utf8(Some("10".to_string()))));
        let text = Element::Utf8(Some("10".to_string()));
        // Text ordering is lexicographic.
        assert!(text.compare(Comparator::Less, &Element::Int64(Some(9))));
        assert!(Element::Bool(Some(false)).less(&Element::Bool(Some(true))));
    }

    #[test]
    fn missing_is_never_comparable() {
        let missing = Element::Int64(None);
        let one = Element::Int64(Some(1));
        for cmp in [
            Comparator::Eq,
            Comparator::Neq,
            Comparator::Less,
            Comparator::LessEq,
            Comparator::Greater,
            Comparator::GreaterEq,
        ] {
            assert!(!missing.compare(cmp, &one));
            assert!(!one.compare(cmp, &missing));
            assert!(!missing.compare(cmp, &missing));
        }
        // A right operand that does not coerce counts as missing too.
        assert!(!one.compare(Comparator::Neq, &Element::Utf8(Some("x".to_string()))));
    }

    #[test]
    fn set_rederives_payload_and_flag() {
        let mut e = Element::Int64(None);
        e.set(&Value::from("12"));
        assert_eq!(e, Element::Int64(Some(12)));
        e.set(&Value::from("oops"));
        assert!(e.is_missing());
    }

    #[test]
    fn to_i64_and_to_bool_report_errors() {
        assert_eq!(Element::Float64(Some(2.0)).to_i64().unwrap(), 2);
        assert!(Element::Float64(None).to_i64().is_err());
        assert!(Element::Int64(Some(5)).to_bool().is_err());
        assert!(Element::Utf8(Some("t".to_string())).to_bool().unwrap());
    }
}
