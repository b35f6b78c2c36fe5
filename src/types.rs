//! Scalar kinds and native literal values.
//!
//! Every [`crate::series::Series`] holds elements of exactly one [`DataType`]. Values enter the
//! crate as native [`Value`]s and are coerced into the target kind on insertion.

use std::fmt;

use serde::Serialize;

use crate::error::{FrameError, FrameResult};

/// Logical kind of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    /// 64-bit signed integer.
    Int64,
    /// 64-bit floating point number.
    Float64,
    /// Boolean.
    Bool,
    /// UTF-8 string.
    Utf8,
}

impl DataType {
    /// Parse a kind from a type name such as `"int"`, `"float64"`, `"string"` or `"bool"`.
    pub fn parse(name: &str) -> FrameResult<Self> {
        match name {
            "float" | "float64" | "float32" | "f64" | "f32" => Ok(Self::Float64),
            "int" | "int64" | "int32" | "int16" | "int8" | "i64" | "i32" => Ok(Self::Int64),
            "string" | "str" | "utf8" => Ok(Self::Utf8),
            "bool" => Ok(Self::Bool),
            other => Err(FrameError::unsupported(format!("type '{other}' is not supported"))),
        }
    }

    /// Pick the single kind able to hold every kind in `kinds`.
    ///
    /// Priority is `Utf8 > Bool > Float64 > Int64`: the first kind present in that order wins.
    /// Returns `None` for an empty input.
    pub fn common<I>(kinds: I) -> Option<Self>
    where
        I: IntoIterator<Item = DataType>,
    {
        let (mut utf8, mut boolean, mut float, mut int) = (false, false, false, false);
        for kind in kinds {
            match kind {
                Self::Utf8 => utf8 = true,
                Self::Bool => boolean = true,
                Self::Float64 => float = true,
                Self::Int64 => int = true,
            }
        }
        match (utf8, boolean, float, int) {
            (true, ..) => Some(Self::Utf8),
            (_, true, ..) => Some(Self::Bool),
            (_, _, true, _) => Some(Self::Float64),
            (_, _, _, true) => Some(Self::Int64),
            _ => None,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Int64 => "int",
            Self::Float64 => "float",
            Self::Bool => "bool",
            Self::Utf8 => "string",
        };
        f.write_str(name)
    }
}

/// A native scalar handed to (or returned from) a series.
///
/// `Null` is the missing-value marker: coercing it into any kind produces a missing element.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Missing/empty value.
    Null,
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit float.
    Float64(f64),
    /// Boolean.
    Bool(bool),
    /// UTF-8 string.
    Utf8(String),
}

impl Value {
    /// Returns `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// The kind this value naturally belongs to, or `None` for `Null`.
    pub fn data_type(&self) -> Option<DataType> {
        match self {
            Self::Null => None,
            Self::Int64(_) => Some(DataType::Int64),
            Self::Float64(_) => Some(DataType::Float64),
            Self::Bool(_) => Some(DataType::Bool),
            Self::Utf8(_) => Some(DataType::Utf8),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NaN"),
            Self::Int64(v) => write!(f, "{v}"),
            Self::Float64(v) => write!(f, "{v:.6}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Utf8(v) => f.write_str(v),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int64(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int64(i64::from(v))
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        i64::try_from(v).map(Self::Int64).unwrap_or(Self::Null)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float64(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Utf8(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Utf8(v)
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Self::Utf8(v.clone())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}
