//! Filter expressions and the equality translator.
//!
//! Applications describe filters with a full expression tree, but the
//! document store only understands conjunctions of equality clauses. The
//! translator in this module extracts exactly that subset: equality
//! predicates reachable through `And` nodes. Everything else (ranges,
//! membership, negation, `Or` groups) is dropped from the translated query
//! and reported through the logging facade at warn level.
//!
//! # Building filters
//!
//! The [`Q`] struct provides static constructors:
//!
//! ```ignore
//! use docbridge::filter::Q;
//!
//! let expr = Q::eq("name", "Bob").and(Q::eq("age", 10));
//! ```

use bson::Bson;

/// Comparison operators a filter predicate may carry.
///
/// Only [`Lookup::Exact`] survives translation to the store; the others
/// exist so call sites written against a richer query language keep
/// compiling, and are dropped with a warning at translation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// Equal to (exact match). The only lookup the store supports.
    Exact,
    /// Greater than.
    Gt,
    /// Greater than or equal to.
    Gte,
    /// Less than.
    Lt,
    /// Less than or equal to.
    Lte,
    /// Membership in a set of values.
    In,
}

impl std::fmt::Display for Lookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Lookup::Exact => "exact",
            Lookup::Gt => "gt",
            Lookup::Gte => "gte",
            Lookup::Lt => "lt",
            Lookup::Lte => "lte",
            Lookup::In => "in",
        };
        f.write_str(name)
    }
}

/// A filter expression for querying model instances.
///
/// Expressions combine with `And`, `Or` and `Not`; only the equality
/// predicates under conjunctions reach the store.
#[derive(Debug, Clone)]
pub enum Expr {
    /// Logical AND of multiple expressions (all must match).
    And(Vec<Expr>),
    /// Logical OR of multiple expressions (any must match).
    Or(Vec<Expr>),
    /// Logical NOT of an expression (inverts the result).
    Not(Box<Expr>),
    /// A single attribute comparison.
    Predicate {
        /// The model attribute being compared.
        attribute: String,
        /// The comparison operator.
        lookup: Lookup,
        /// The value to compare against.
        value: Bson,
    },
}

impl Expr {
    /// Creates a predicate expression.
    pub fn predicate(attribute: String, lookup: Lookup, value: Bson) -> Self {
        Expr::Predicate { attribute, lookup, value }
    }

    /// Combines this expression with another using logical AND.
    ///
    /// If this expression is already an AND, the other expression is appended
    /// to the list. Otherwise, a new AND expression is created.
    pub fn and(self, other: Expr) -> Self {
        match self {
            Expr::And(mut list) => {
                list.push(other);
                Expr::And(list)
            }
            _ => Expr::And(vec![self, other]),
        }
    }

    /// Combines this expression with another using logical OR.
    ///
    /// If this expression is already an OR, the other expression is appended
    /// to the list. Otherwise, a new OR expression is created.
    pub fn or(self, other: Expr) -> Self {
        match self {
            Expr::Or(mut list) => {
                list.push(other);
                Expr::Or(list)
            }
            _ => Expr::Or(vec![self, other]),
        }
    }

    /// Negates this expression (logical NOT).
    pub fn not(self) -> Self {
        Expr::Not(Box::new(self))
    }
}

/// Static constructors for filter expressions.
///
/// All methods accept attributes as `Into<String>` and values as
/// `Into<Bson>` for ergonomics.
///
/// # Example
///
/// ```ignore
/// use docbridge::filter::Q;
///
/// let expr = Q::eq("status", "active").and(Q::gt("age", 18));
/// ```
pub struct Q;

impl Q {
    /// Creates an equality predicate.
    pub fn eq(attribute: impl Into<String>, value: impl Into<Bson>) -> Expr {
        Expr::predicate(attribute.into(), Lookup::Exact, value.into())
    }

    /// Creates a greater-than predicate. Not translatable; dropped with a
    /// warning at query time.
    pub fn gt(attribute: impl Into<String>, value: impl Into<Bson>) -> Expr {
        Expr::predicate(attribute.into(), Lookup::Gt, value.into())
    }

    /// Creates a greater-than-or-equal predicate. Not translatable.
    pub fn gte(attribute: impl Into<String>, value: impl Into<Bson>) -> Expr {
        Expr::predicate(attribute.into(), Lookup::Gte, value.into())
    }

    /// Creates a less-than predicate. Not translatable.
    pub fn lt(attribute: impl Into<String>, value: impl Into<Bson>) -> Expr {
        Expr::predicate(attribute.into(), Lookup::Lt, value.into())
    }

    /// Creates a less-than-or-equal predicate. Not translatable.
    pub fn lte(attribute: impl Into<String>, value: impl Into<Bson>) -> Expr {
        Expr::predicate(attribute.into(), Lookup::Lte, value.into())
    }

    /// Creates a membership predicate. Not translatable.
    pub fn any_of(attribute: impl Into<String>, values: impl Into<Bson>) -> Expr {
        Expr::predicate(attribute.into(), Lookup::In, values.into())
    }

    /// Creates a logical AND over the given expressions.
    pub fn and(exprs: impl IntoIterator<Item = Expr>) -> Expr {
        Expr::And(exprs.into_iter().collect())
    }

    /// Creates a logical OR over the given expressions.
    pub fn or(exprs: impl IntoIterator<Item = Expr>) -> Expr {
        Expr::Or(exprs.into_iter().collect())
    }
}

/// Extracts the store-translatable subset of a filter expression.
///
/// Walks `And` nodes, collecting `Exact` predicates in encounter order. When
/// the same attribute appears twice the later value overwrites the earlier
/// one in place. `Or` groups, `Not` groups and non-equality predicates do
/// not reach the store; each dropped node is logged at warn level.
pub fn extract_equality(expr: &Expr) -> Vec<(String, Bson)> {
    let mut clauses: Vec<(String, Bson)> = Vec::new();
    collect_equality(expr, &mut clauses);
    clauses
}

fn collect_equality(expr: &Expr, clauses: &mut Vec<(String, Bson)>) {
    match expr {
        Expr::And(children) => {
            for child in children {
                collect_equality(child, clauses);
            }
        }
        Expr::Predicate { attribute, lookup: Lookup::Exact, value } => {
            match clauses.iter_mut().find(|(name, _)| name == attribute) {
                Some((_, existing)) => *existing = value.clone(),
                None => clauses.push((attribute.clone(), value.clone())),
            }
        }
        Expr::Predicate { attribute, lookup, .. } => {
            log::warn!("dropping untranslatable {lookup} predicate on attribute {attribute}");
        }
        Expr::Or(_) => {
            log::warn!("dropping untranslatable OR group from query filter");
        }
        Expr::Not(_) => {
            log::warn!("dropping untranslatable NOT group from query filter");
        }
    }
}
