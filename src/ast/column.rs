use std::fmt;
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

/// Literal SQL token emitted for the authenticated principal's id.
pub const AUTH_UID_TOKEN: &str = "auth.uid()";

/// An erased column reference as stored in expression trees.
///
/// Holds the exact SQL token to emit: a column name (`user_id`), a
/// pre-quoted literal (`'active'`), or a function-call token such as
/// `auth.uid()`. The crate performs no quoting, escaping, or identifier
/// validation; the token is rendered verbatim. Two references are
/// interchangeable iff their tokens are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnRef(String);

impl ColumnRef {
    /// Wrap a literal SQL token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The token as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ColumnRef {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

impl From<String> for ColumnRef {
    fn from(token: String) -> Self {
        Self(token)
    }
}

/// A typed column reference.
///
/// The type parameter records the column's value type so comparisons are
/// checked at compile time; it has no runtime representation. Identity is
/// by token only: two references with equal tokens render identically.
pub struct Column<T> {
    token: String,
    _value: PhantomData<fn() -> T>,
}

impl<T> Column<T> {
    /// A reference to `token`, rendered verbatim.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            _value: PhantomData,
        }
    }

    /// The SQL token this reference renders as.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Erase the value type, keeping only the token.
    pub fn to_ref(&self) -> ColumnRef {
        ColumnRef::new(self.token.clone())
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Column").field(&self.token).finish()
    }
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            token: self.token.clone(),
            _value: PhantomData,
        }
    }
}

impl<T> PartialEq for Column<T> {
    fn eq(&self, other: &Self) -> bool {
        self.token == other.token
    }
}

impl<T> Eq for Column<T> {}

mod sealed {
    pub trait Sealed {}

    impl Sealed for i16 {}
    impl Sealed for i32 {}
    impl Sealed for i64 {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
    impl Sealed for String {}
}

/// Value types with a total SQL ordering (numeric and text).
///
/// Gates the ordered comparison constructors
/// ([`lt`](crate::ast::expr::lt), [`lte`](crate::ast::expr::lte),
/// [`gt`](crate::ast::expr::gt), [`gte`](crate::ast::expr::gte)) at compile
/// time. Sealed: the supported set is fixed by this crate.
pub trait SqlOrdered: sealed::Sealed {}

impl SqlOrdered for i16 {}
impl SqlOrdered for i32 {}
impl SqlOrdered for i64 {}
impl SqlOrdered for f32 {}
impl SqlOrdered for f64 {}
impl SqlOrdered for String {}

/// Text value types, accepted by the pattern-match constructors
/// ([`like`](crate::ast::expr::like), [`not_like`](crate::ast::expr::not_like)).
pub trait SqlText: sealed::Sealed {}

impl SqlText for String {}
