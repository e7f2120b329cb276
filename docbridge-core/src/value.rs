//! Comparable representation of BSON values.
//!
//! Equality filters and ordering clauses must behave the same whether a
//! number arrived as `Int32`, `Int64` or `Double`, so raw [`Bson`] equality
//! (which is variant-strict) is never used for matching. [`Comparable`]
//! normalizes numerics to `f64` and compares by value.

use bson::{Bson, datetime::DateTime};
use std::{cmp::Ordering, collections::HashMap};

/// Type-erased, comparable view of a BSON value.
///
/// Borrows from the underlying value; build one per comparison.
#[derive(Debug)]
pub enum Comparable<'a> {
    /// Null value
    Null,
    /// Boolean value
    Bool(bool),
    /// Numeric value (all integers and floats normalized to f64)
    Number(f64),
    /// DateTime value
    DateTime(DateTime),
    /// String value
    String(&'a str),
    /// Array of comparable values
    Array(Vec<Comparable<'a>>),
    /// Map/Object of comparable values
    Map(HashMap<&'a str, Comparable<'a>>),
}

impl<'a> From<&'a Bson> for Comparable<'a> {
    fn from(bson: &'a Bson) -> Self {
        match bson {
            Bson::Null => Comparable::Null,
            Bson::Boolean(value) => Comparable::Bool(*value),
            Bson::Int32(value) => Comparable::Number(*value as f64),
            Bson::Int64(value) => Comparable::Number(*value as f64),
            Bson::Double(value) => Comparable::Number(*value),
            Bson::DateTime(value) => Comparable::DateTime(*value),
            Bson::String(value) => Comparable::String(value),
            Bson::Array(arr) => Comparable::Array(arr.iter().map(Comparable::from).collect::<Vec<_>>()),
            Bson::Document(doc) => Comparable::Map(
                doc.iter()
                    .map(|(k, v)| (k.as_str(), Comparable::from(v)))
                    .collect::<HashMap<_, _>>(),
            ),
            _ => Comparable::Null, // Other types are not comparable
        }
    }
}

impl<'a> PartialEq for Comparable<'a> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Comparable::Null, Comparable::Null) => true,
            (Comparable::Bool(a), Comparable::Bool(b)) => a == b,
            (Comparable::Number(a), Comparable::Number(b)) => a == b,
            (Comparable::DateTime(a), Comparable::DateTime(b)) => a == b,
            (Comparable::String(a), Comparable::String(b)) => a == b,
            (Comparable::Array(a), Comparable::Array(b)) => a == b,
            (Comparable::Map(a), Comparable::Map(b)) => a == b,
            _ => false,
        }
    }
}

impl<'a> PartialOrd for Comparable<'a> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Comparable::Bool(a), Comparable::Bool(b)) => a.partial_cmp(b),
            (Comparable::Number(a), Comparable::Number(b)) => a.partial_cmp(b),
            (Comparable::DateTime(a), Comparable::DateTime(b)) => a.partial_cmp(b),
            (Comparable::String(a), Comparable::String(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}

/// Compares two BSON values by their normalized representation.
pub fn bson_eq(a: &Bson, b: &Bson) -> bool {
    Comparable::from(a) == Comparable::from(b)
}

/// Orders two BSON values, treating incomparable pairs as equal so a sort
/// pass leaves their relative order untouched.
pub fn bson_cmp(a: &Bson, b: &Bson) -> Ordering {
    Comparable::from(a)
        .partial_cmp(&Comparable::from(b))
        .unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_variants_compare_equal() {
        assert!(bson_eq(&Bson::Int32(10), &Bson::Int64(10)));
        assert!(bson_eq(&Bson::Int64(10), &Bson::Double(10.0)));
        assert!(!bson_eq(&Bson::Int32(10), &Bson::Int32(11)));
    }

    #[test]
    fn strings_order_lexicographically() {
        assert_eq!(
            bson_cmp(&Bson::String("Alice".into()), &Bson::String("Bob".into())),
            Ordering::Less
        );
    }

    #[test]
    fn mismatched_types_are_unordered() {
        assert_eq!(
            bson_cmp(&Bson::String("Alice".into()), &Bson::Int32(1)),
            Ordering::Equal
        );
        assert!(!bson_eq(&Bson::String("1".into()), &Bson::Int32(1)));
    }
}
