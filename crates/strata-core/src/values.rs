//! Typed per-element property arrays.
//!
//! A [`PropertyArray`] is a flat [`Values`] column plus a component count:
//! scalar properties have one component per element, vector properties
//! such as coordinates store `components` consecutive values per element
//! (row-major).

use std::borrow::Cow;
use std::fmt;

use thiserror::Error;

use crate::error::PropertyError;
use crate::key::PropKey;

/// Storage type of a property column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// 64-bit floats. Missing entries are NaN.
    Float,
    /// 64-bit signed integers. Has no missing value of its own.
    Int,
    /// Labels. Missing entries are `false`.
    Bool,
    /// Optional strings. Missing entries are `None`.
    Text,
}

impl ValueType {
    /// The narrowest type able to hold values of both `self` and `other`.
    ///
    /// Equal types are kept. `Text` absorbs everything; any other mix of
    /// numeric and label types widens to `Float`.
    pub fn join(self, other: Self) -> Self {
        match (self, other) {
            (a, b) if a == b => a,
            (Self::Text, _) | (_, Self::Text) => Self::Text,
            _ => Self::Float,
        }
    }

    /// Whether the type can represent a missing entry.
    pub fn has_sentinel(self) -> bool {
        !matches!(self, Self::Int)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Float => "float",
            Self::Int => "int",
            Self::Bool => "bool",
            Self::Text => "text",
        };
        f.write_str(name)
    }
}

/// A single value, broadcast over every element on write.
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
    /// A float value.
    Float(f64),
    /// An integer value.
    Int(i64),
    /// A label value.
    Bool(bool),
    /// A string value.
    Text(String),
}

impl Scalar {
    /// Storage type produced when this scalar is broadcast.
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::Float(_) => ValueType::Float,
            Self::Int(_) => ValueType::Int,
            Self::Bool(_) => ValueType::Bool,
            Self::Text(_) => ValueType::Text,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Float(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Text(v) => f.write_str(v),
        }
    }
}

/// A flat, typed column of raw values.
#[derive(Clone, Debug, PartialEq)]
pub enum Values {
    /// Float column.
    Float(Vec<f64>),
    /// Integer column.
    Int(Vec<i64>),
    /// Label column.
    Bool(Vec<bool>),
    /// String column.
    Text(Vec<Option<String>>),
}

impl Values {
    /// Storage type of the column.
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::Float(_) => ValueType::Float,
            Self::Int(_) => ValueType::Int,
            Self::Bool(_) => ValueType::Bool,
            Self::Text(_) => ValueType::Text,
        }
    }

    /// Number of raw values (elements × components).
    pub fn len(&self) -> usize {
        match self {
            Self::Float(v) => v.len(),
            Self::Int(v) => v.len(),
            Self::Bool(v) => v.len(),
            Self::Text(v) => v.len(),
        }
    }

    /// Returns `true` if the column holds no values.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A column of `n` missing entries.
    ///
    /// `Int` has no missing value and is zero-filled; callers that need
    /// to represent gaps must widen to `Float` first.
    pub fn missing(ty: ValueType, n: usize) -> Self {
        match ty {
            ValueType::Float => Self::Float(vec![f64::NAN; n]),
            ValueType::Int => Self::Int(vec![0; n]),
            ValueType::Bool => Self::Bool(vec![false; n]),
            ValueType::Text => Self::Text(vec![None; n]),
        }
    }

    /// A column of `n` copies of `scalar`.
    pub fn broadcast(scalar: &Scalar, n: usize) -> Self {
        match scalar {
            Scalar::Float(v) => Self::Float(vec![*v; n]),
            Scalar::Int(v) => Self::Int(vec![*v; n]),
            Scalar::Bool(v) => Self::Bool(vec![*v; n]),
            Scalar::Text(v) => Self::Text(vec![Some(v.clone()); n]),
        }
    }

    /// Convert the column to `ty`, borrowing when it already matches.
    ///
    /// Widening conversions (to `Float` or `Text`) are exact apart from
    /// integer precision above 2^53. Missing entries stay missing: NaN
    /// becomes `None` and `None` becomes NaN. Narrowing conversions are lossy:
    /// floats truncate towards zero, non-zero numbers become `true`.
    pub fn cast(&self, ty: ValueType) -> Cow<'_, Values> {
        if self.value_type() == ty {
            return Cow::Borrowed(self);
        }
        let converted = match (self, ty) {
            (Self::Int(v), ValueType::Float) => Self::Float(v.iter().map(|&x| x as f64).collect()),
            (Self::Bool(v), ValueType::Float) => {
                Self::Float(v.iter().map(|&b| if b { 1.0 } else { 0.0 }).collect())
            }
            (Self::Text(v), ValueType::Float) => Self::Float(
                v.iter()
                    .map(|s| {
                        s.as_deref()
                            .and_then(|s| s.trim().parse::<f64>().ok())
                            .unwrap_or(f64::NAN)
                    })
                    .collect(),
            ),
            (Self::Float(v), ValueType::Int) => Self::Int(v.iter().map(|&x| x as i64).collect()),
            (Self::Bool(v), ValueType::Int) => Self::Int(v.iter().map(|&b| i64::from(b)).collect()),
            (Self::Text(v), ValueType::Int) => Self::Int(
                v.iter()
                    .map(|s| {
                        s.as_deref()
                            .and_then(|s| s.trim().parse::<i64>().ok())
                            .unwrap_or(0)
                    })
                    .collect(),
            ),
            (Self::Float(v), ValueType::Bool) => {
                Self::Bool(v.iter().map(|&x| x != 0.0 && !x.is_nan()).collect())
            }
            (Self::Int(v), ValueType::Bool) => Self::Bool(v.iter().map(|&x| x != 0).collect()),
            (Self::Text(v), ValueType::Bool) => Self::Bool(
                v.iter()
                    .map(|s| s.as_deref().is_some_and(|s| !s.is_empty()))
                    .collect(),
            ),
            (Self::Float(v), ValueType::Text) => Self::Text(
                v.iter()
                    .map(|x| (!x.is_nan()).then(|| x.to_string()))
                    .collect(),
            ),
            (Self::Int(v), ValueType::Text) => {
                Self::Text(v.iter().map(|x| Some(x.to_string())).collect())
            }
            (Self::Bool(v), ValueType::Text) => {
                Self::Text(v.iter().map(|x| Some(x.to_string())).collect())
            }
            // Same-type pairs returned above.
            _ => self.clone(),
        };
        Cow::Owned(converted)
    }

    /// Copy `n` raw values from `src[src_start..]` into `self[dst_start..]`.
    ///
    /// Both columns must already have the same type.
    fn copy_range(&mut self, dst_start: usize, src: &Values, src_start: usize, n: usize) {
        let dst = dst_start..dst_start + n;
        let from = src_start..src_start + n;
        match (self, src) {
            (Self::Float(d), Self::Float(s)) => d[dst].copy_from_slice(&s[from]),
            (Self::Int(d), Self::Int(s)) => d[dst].copy_from_slice(&s[from]),
            (Self::Bool(d), Self::Bool(s)) => d[dst].copy_from_slice(&s[from]),
            (Self::Text(d), Self::Text(s)) => d[dst].clone_from_slice(&s[from]),
            (d, s) => unreachable!(
                "copy from {} column into {} column",
                s.value_type(),
                d.value_type()
            ),
        }
    }
}

/// Error returned when raw values do not split evenly into elements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("{len} values do not form rows of {components} components")]
pub struct ShapeError {
    /// Number of raw values supplied.
    pub len: usize,
    /// Requested component count.
    pub components: u32,
}

/// A property column: one row of `components` values per element.
#[derive(Clone, Debug, PartialEq)]
pub struct PropertyArray {
    values: Values,
    components: u32,
}

impl PropertyArray {
    /// A scalar (one component) array.
    pub fn new(values: Values) -> Self {
        Self {
            values,
            components: 1,
        }
    }

    /// A vector array with `components` values per element.
    pub fn with_components(values: Values, components: u32) -> Result<Self, ShapeError> {
        let len = values.len();
        if components == 0 || len % components as usize != 0 {
            return Err(ShapeError { len, components });
        }
        Ok(Self { values, components })
    }

    /// An array of `len` elements, every entry missing for its type.
    pub fn missing(ty: ValueType, components: u32, len: usize) -> Self {
        Self {
            values: Values::missing(ty, len * components as usize),
            components,
        }
    }

    /// An array of `len` scalar elements all equal to `scalar`.
    pub fn broadcast(scalar: &Scalar, len: usize) -> Self {
        Self::new(Values::broadcast(scalar, len))
    }

    /// Number of elements (rows).
    pub fn len(&self) -> usize {
        self.values.len() / self.components as usize
    }

    /// Returns `true` if the array has no elements.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Values per element.
    pub fn components(&self) -> u32 {
        self.components
    }

    /// Storage type.
    pub fn value_type(&self) -> ValueType {
        self.values.value_type()
    }

    /// The raw column.
    pub fn values(&self) -> &Values {
        &self.values
    }

    /// Consume the array, returning the raw column.
    pub fn into_values(self) -> Values {
        self.values
    }

    /// Raw float values, if this is a float column.
    pub fn as_f64(&self) -> Option<&[f64]> {
        match &self.values {
            Values::Float(v) => Some(v),
            _ => None,
        }
    }

    /// Raw integer values, if this is an integer column.
    pub fn as_i64(&self) -> Option<&[i64]> {
        match &self.values {
            Values::Int(v) => Some(v),
            _ => None,
        }
    }

    /// Raw label values, if this is a label column.
    pub fn as_bool(&self) -> Option<&[bool]> {
        match &self.values {
            Values::Bool(v) => Some(v),
            _ => None,
        }
    }

    /// Raw string values, if this is a text column.
    pub fn as_text(&self) -> Option<&[Option<String>]> {
        match &self.values {
            Values::Text(v) => Some(v),
            _ => None,
        }
    }

    /// Convert to `ty`, borrowing when the type already matches.
    pub fn cast(&self, ty: ValueType) -> Cow<'_, PropertyArray> {
        match self.values.cast(ty) {
            Cow::Borrowed(_) => Cow::Borrowed(self),
            Cow::Owned(values) => Cow::Owned(Self {
                values,
                components: self.components,
            }),
        }
    }

    /// New array holding the given rows of `self`, in the given order.
    ///
    /// # Panics
    ///
    /// Panics if any element index is `>= self.len()`.
    pub fn gather<I>(&self, elements: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        let c = self.components as usize;
        let values = match &self.values {
            Values::Float(v) => Values::Float(gather_rows(v, c, elements)),
            Values::Int(v) => Values::Int(gather_rows(v, c, elements)),
            Values::Bool(v) => Values::Bool(gather_rows(v, c, elements)),
            Values::Text(v) => Values::Text(gather_rows(v, c, elements)),
        };
        Self {
            values,
            components: self.components,
        }
    }

    /// Overwrite row `dst` of `self` with row `src` of `other`.
    ///
    /// # Panics
    ///
    /// Panics if `other` differs in type or component count, or if either
    /// row is out of range.
    pub fn copy_row_from(&mut self, dst: usize, other: &PropertyArray, src: usize) {
        assert_eq!(
            self.value_type(),
            other.value_type(),
            "row copy between different value types"
        );
        assert_eq!(
            self.components, other.components,
            "row copy between different component counts"
        );
        let c = self.components as usize;
        self.values.copy_range(dst * c, &other.values, src * c, c);
    }
}

fn gather_rows<T: Clone, I>(data: &[T], components: usize, rows: I) -> Vec<T>
where
    I: IntoIterator<Item = usize>,
{
    let rows = rows.into_iter();
    let mut out = Vec::with_capacity(rows.size_hint().0 * components);
    for row in rows {
        out.extend_from_slice(&data[row * components..(row + 1) * components]);
    }
    out
}

impl From<Values> for PropertyArray {
    fn from(values: Values) -> Self {
        Self::new(values)
    }
}

impl From<Vec<f64>> for PropertyArray {
    fn from(v: Vec<f64>) -> Self {
        Self::new(Values::Float(v))
    }
}

impl From<Vec<i64>> for PropertyArray {
    fn from(v: Vec<i64>) -> Self {
        Self::new(Values::Int(v))
    }
}

impl From<Vec<bool>> for PropertyArray {
    fn from(v: Vec<bool>) -> Self {
        Self::new(Values::Bool(v))
    }
}

impl From<Vec<Option<String>>> for PropertyArray {
    fn from(v: Vec<Option<String>>) -> Self {
        Self::new(Values::Text(v))
    }
}

/// The right-hand side of a property write.
#[derive(Clone, Debug, PartialEq)]
pub enum PropertyValue {
    /// A full array, one row per target element.
    Array(PropertyArray),
    /// A single value repeated over every target element.
    Broadcast(Scalar),
}

impl PropertyValue {
    /// Materialise the value for a target with `expected` elements.
    ///
    /// Broadcasts expand to `expected` rows; arrays must already have
    /// exactly `expected` rows.
    pub fn resolve(self, key: &PropKey, expected: usize) -> Result<PropertyArray, PropertyError> {
        match self {
            Self::Broadcast(scalar) => Ok(PropertyArray::broadcast(&scalar, expected)),
            Self::Array(array) if array.len() == expected => Ok(array),
            Self::Array(array) => Err(PropertyError::LengthMismatch {
                key: key.clone(),
                expected,
                found: array.len(),
            }),
        }
    }
}

impl From<PropertyArray> for PropertyValue {
    fn from(a: PropertyArray) -> Self {
        Self::Array(a)
    }
}

impl From<Scalar> for PropertyValue {
    fn from(s: Scalar) -> Self {
        Self::Broadcast(s)
    }
}

impl From<f64> for PropertyValue {
    fn from(v: f64) -> Self {
        Self::Broadcast(Scalar::Float(v))
    }
}

impl From<i64> for PropertyValue {
    fn from(v: i64) -> Self {
        Self::Broadcast(Scalar::Int(v))
    }
}

impl From<bool> for PropertyValue {
    fn from(v: bool) -> Self {
        Self::Broadcast(Scalar::Bool(v))
    }
}

impl From<&str> for PropertyValue {
    fn from(v: &str) -> Self {
        Self::Broadcast(Scalar::Text(v.to_string()))
    }
}

impl From<String> for PropertyValue {
    fn from(v: String) -> Self {
        Self::Broadcast(Scalar::Text(v))
    }
}

impl From<Vec<f64>> for PropertyValue {
    fn from(v: Vec<f64>) -> Self {
        Self::Array(v.into())
    }
}

impl From<Vec<i64>> for PropertyValue {
    fn from(v: Vec<i64>) -> Self {
        Self::Array(v.into())
    }
}

impl From<Vec<bool>> for PropertyValue {
    fn from(v: Vec<bool>) -> Self {
        Self::Array(v.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_type() -> impl Strategy<Value = ValueType> {
        prop_oneof![
            Just(ValueType::Float),
            Just(ValueType::Int),
            Just(ValueType::Bool),
            Just(ValueType::Text),
        ]
    }

    #[test]
    fn vector_rows_are_gathered_whole() {
        let coords = PropertyArray::with_components(
            Values::Float(vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 2.0, 2.0, 2.0]),
            3,
        )
        .unwrap();
        assert_eq!(coords.len(), 3);
        let picked = coords.gather([2, 0]);
        assert_eq!(picked.components(), 3);
        assert_eq!(picked.as_f64().unwrap(), &[2.0, 2.0, 2.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn ragged_components_are_rejected() {
        let err = PropertyArray::with_components(Values::Int(vec![1, 2, 3]), 2).unwrap_err();
        assert_eq!(err, ShapeError { len: 3, components: 2 });
        assert!(PropertyArray::with_components(Values::Int(vec![]), 0).is_err());
    }

    #[test]
    fn missing_uses_type_sentinel() {
        let f = PropertyArray::missing(ValueType::Float, 1, 3);
        assert!(f.as_f64().unwrap().iter().all(|v| v.is_nan()));
        let b = PropertyArray::missing(ValueType::Bool, 1, 2);
        assert_eq!(b.as_bool().unwrap(), &[false, false]);
        let t = PropertyArray::missing(ValueType::Text, 2, 2);
        assert_eq!(t.as_text().unwrap().len(), 4);
        assert!(t.as_text().unwrap().iter().all(Option::is_none));
    }

    #[test]
    fn widening_casts() {
        let ints = PropertyArray::from(vec![1_i64, -2]);
        assert_eq!(ints.cast(ValueType::Float).as_f64().unwrap(), &[1.0, -2.0]);
        let labels = PropertyArray::from(vec![true, false]);
        assert_eq!(labels.cast(ValueType::Float).as_f64().unwrap(), &[1.0, 0.0]);
        assert_eq!(
            labels.cast(ValueType::Text).as_text().unwrap(),
            &[Some("true".to_string()), Some("false".to_string())]
        );
    }

    #[test]
    fn same_type_cast_borrows() {
        let a = PropertyArray::from(vec![1.0, 2.0]);
        assert!(matches!(a.cast(ValueType::Float), Cow::Borrowed(_)));
    }

    #[test]
    fn broadcast_resolves_to_target_length() {
        let key = PropKey::pore("diameter").unwrap();
        let arr = PropertyValue::from(0.1).resolve(&key, 50).unwrap();
        assert_eq!(arr.len(), 50);
        assert!(arr.as_f64().unwrap().iter().all(|&v| v == 0.1));
    }

    #[test]
    fn array_of_wrong_length_is_rejected() {
        let key = PropKey::pore("diameter").unwrap();
        let err = PropertyValue::from(vec![1.0, 2.0]).resolve(&key, 3).unwrap_err();
        assert_eq!(
            err,
            PropertyError::LengthMismatch {
                key,
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn copy_row_moves_all_components() {
        let src = PropertyArray::with_components(Values::Int(vec![1, 2, 3, 4]), 2).unwrap();
        let mut dst = PropertyArray::missing(ValueType::Int, 2, 3);
        dst.copy_row_from(2, &src, 1);
        assert_eq!(dst.as_i64().unwrap(), &[0, 0, 0, 0, 3, 4]);
    }

    #[test]
    fn missing_floats_stay_missing_as_text() {
        let floats = PropertyArray::from(vec![f64::NAN, 1.5]);
        assert_eq!(
            floats.cast(ValueType::Text).as_text().unwrap(),
            &[None, Some("1.5".to_string())]
        );
        let text = floats.cast(ValueType::Text).into_owned();
        let back = text.cast(ValueType::Float);
        let v = back.as_f64().unwrap();
        assert!(v[0].is_nan());
        assert_eq!(v[1], 1.5);
    }

    #[test]
    #[should_panic(expected = "different value types")]
    fn copy_row_rejects_type_mismatch() {
        let src = PropertyArray::from(vec![1_i64]);
        let mut dst = PropertyArray::missing(ValueType::Float, 1, 1);
        dst.copy_row_from(0, &src, 0);
    }

    #[test]
    #[should_panic(expected = "different component counts")]
    fn copy_row_rejects_component_mismatch() {
        let src = PropertyArray::with_components(Values::Float(vec![1.0, 2.0]), 2).unwrap();
        let mut dst = PropertyArray::missing(ValueType::Float, 1, 2);
        dst.copy_row_from(0, &src, 0);
    }

    proptest! {
        #[test]
        fn join_commutative(a in arb_type(), b in arb_type()) {
            prop_assert_eq!(a.join(b), b.join(a));
        }

        #[test]
        fn join_associative(a in arb_type(), b in arb_type(), c in arb_type()) {
            prop_assert_eq!(a.join(b).join(c), a.join(b.join(c)));
        }

        #[test]
        fn join_idempotent(a in arb_type()) {
            prop_assert_eq!(a.join(a), a);
        }

        #[test]
        fn cast_preserves_length(v in prop::collection::vec(any::<i64>(), 0..32), ty in arb_type()) {
            let a = PropertyArray::from(v.clone());
            prop_assert_eq!(a.cast(ty).len(), v.len());
        }
    }
}
