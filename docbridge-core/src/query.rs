//! The translated query shape sent to storage backends.
//!
//! A [`CollectionQuery`] is the product of the filter translator: an ordered
//! list of equality clauses plus ordering directives, keyed by STORED key
//! names (the field mapper has already run by the time a query reaches a
//! backend). Building one performs no I/O; backends execute it in a single
//! logical round trip.
//!
//! ```ignore
//! use docbridge::query::{CollectionQuery, SortDirection};
//!
//! let query = CollectionQuery::new()
//!     .where_eq("name", "Alice")
//!     .order_by("joined", SortDirection::Desc);
//! ```

use bson::Bson;

/// Sort direction for query results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Ascending order (A to Z, 0 to 9, earliest to latest).
    Asc,
    /// Descending order (Z to A, 9 to 0, latest to earliest).
    Desc,
}

/// Sort specification for query results.
///
/// Specifies which stored field to sort by and in which direction.
#[derive(Debug, Clone, PartialEq)]
pub struct Sort {
    /// The stored key to sort by.
    pub field: String,
    /// The sort direction.
    pub direction: SortDirection,
}

/// A single equality clause: stored field == value.
#[derive(Debug, Clone, PartialEq)]
pub struct WhereClause {
    /// The stored key the clause matches on.
    pub field: String,
    /// The value the stored field must equal.
    pub value: Bson,
}

/// A composed, still-lazy collection query.
///
/// An empty clause list means "list the whole collection". Ordering clauses
/// apply in sequence; earlier clauses dominate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectionQuery {
    /// Equality clauses, in translation order.
    pub clauses: Vec<WhereClause>,
    /// Ordering directives, in application order.
    pub order: Vec<Sort>,
}

impl CollectionQuery {
    /// Creates an empty query matching every document in a collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an equality clause.
    pub fn where_eq(mut self, field: impl Into<String>, value: impl Into<Bson>) -> Self {
        self.clauses.push(WhereClause { field: field.into(), value: value.into() });
        self
    }

    /// Appends an ordering directive.
    pub fn order_by(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.order.push(Sort { field: field.into(), direction });
        self
    }

    /// Returns `true` when the query has no equality clauses, i.e. it lists
    /// the whole collection.
    pub fn is_unfiltered(&self) -> bool {
        self.clauses.is_empty()
    }
}
