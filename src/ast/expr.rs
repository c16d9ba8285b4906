use serde::{Deserialize, Serialize};

use crate::ast::column::{Column, ColumnRef, SqlOrdered, SqlText};

/// One node of a policy predicate tree.
///
/// Nodes are immutable once constructed and form finite, acyclic trees
/// assembled by the constructor functions in this module. The serde
/// representation is internally tagged on `"op"` with the wire names used
/// by policy manifests (`eq`, `isNull`, `notIn`, …).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Expr {
    /// `(left = right)`
    Eq {
        /// Left-hand column reference.
        left: ColumnRef,
        /// Right-hand column reference.
        right: ColumnRef,
    },
    /// `(left <> right)`
    Ne {
        /// Left-hand column reference.
        left: ColumnRef,
        /// Right-hand column reference.
        right: ColumnRef,
    },
    /// `(left < right)`
    Lt {
        /// Left-hand column reference.
        left: ColumnRef,
        /// Right-hand column reference.
        right: ColumnRef,
    },
    /// `(left <= right)`
    Lte {
        /// Left-hand column reference.
        left: ColumnRef,
        /// Right-hand column reference.
        right: ColumnRef,
    },
    /// `(left > right)`
    Gt {
        /// Left-hand column reference.
        left: ColumnRef,
        /// Right-hand column reference.
        right: ColumnRef,
    },
    /// `(left >= right)`
    Gte {
        /// Left-hand column reference.
        left: ColumnRef,
        /// Right-hand column reference.
        right: ColumnRef,
    },
    /// `(column IS NULL)`
    IsNull {
        /// Column under test.
        column: ColumnRef,
    },
    /// `(column IS NOT NULL)`
    IsNotNull {
        /// Column under test.
        column: ColumnRef,
    },
    /// `(column IN (v1, v2, …))`
    In {
        /// Column under test.
        column: ColumnRef,
        /// Candidate set; order is preserved in the emitted SQL.
        values: Vec<ColumnRef>,
    },
    /// `(column NOT IN (v1, v2, …))`
    NotIn {
        /// Column under test.
        column: ColumnRef,
        /// Candidate set; order is preserved in the emitted SQL.
        values: Vec<ColumnRef>,
    },
    /// `(column LIKE pattern)`
    Like {
        /// Text column under test.
        column: ColumnRef,
        /// Pattern reference (typically a pre-quoted literal).
        pattern: ColumnRef,
    },
    /// `(column NOT LIKE pattern)`
    NotLike {
        /// Text column under test.
        column: ColumnRef,
        /// Pattern reference (typically a pre-quoted literal).
        pattern: ColumnRef,
    },
    /// Conjunction; children joined by ` AND ` with no enclosing pair.
    And {
        /// Sub-expressions, zero or more, rendered in order.
        exprs: Vec<Expr>,
    },
    /// Disjunction; children joined by ` OR ` with no enclosing pair.
    Or {
        /// Sub-expressions, zero or more, rendered in order.
        exprs: Vec<Expr>,
    },
    /// `NOT (<expr>)`
    Not {
        /// The negated sub-expression.
        expr: Box<Expr>,
    },
    /// Operator tag outside the supported set.
    ///
    /// Constructors never build this node; it can only enter a tree by
    /// deserializing externally supplied data. Rendering it fails with
    /// [`RenderError::UnknownOperator`](crate::render::sql::RenderError).
    #[serde(untagged)]
    Unrecognized(UnrecognizedExpr),
}

/// Payload of [`Expr::Unrecognized`]: the raw operator tag that matched no
/// supported variant. Extra fields in the source document are dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnrecognizedExpr {
    /// The unrecognised operator tag.
    pub op: String,
}

/// Equality comparison: `(left = right)`.
pub fn eq<T>(left: &Column<T>, right: &Column<T>) -> Expr {
    Expr::Eq {
        left: left.to_ref(),
        right: right.to_ref(),
    }
}

/// Inequality comparison: `(left <> right)`.
pub fn ne<T>(left: &Column<T>, right: &Column<T>) -> Expr {
    Expr::Ne {
        left: left.to_ref(),
        right: right.to_ref(),
    }
}

/// Less-than comparison: `(left < right)`.
pub fn lt<T: SqlOrdered>(left: &Column<T>, right: &Column<T>) -> Expr {
    Expr::Lt {
        left: left.to_ref(),
        right: right.to_ref(),
    }
}

/// Less-than-or-equal comparison: `(left <= right)`.
pub fn lte<T: SqlOrdered>(left: &Column<T>, right: &Column<T>) -> Expr {
    Expr::Lte {
        left: left.to_ref(),
        right: right.to_ref(),
    }
}

/// Greater-than comparison: `(left > right)`.
pub fn gt<T: SqlOrdered>(left: &Column<T>, right: &Column<T>) -> Expr {
    Expr::Gt {
        left: left.to_ref(),
        right: right.to_ref(),
    }
}

/// Greater-than-or-equal comparison: `(left >= right)`.
pub fn gte<T: SqlOrdered>(left: &Column<T>, right: &Column<T>) -> Expr {
    Expr::Gte {
        left: left.to_ref(),
        right: right.to_ref(),
    }
}

/// Null test: `(column IS NULL)`.
pub fn is_null<T>(column: &Column<T>) -> Expr {
    Expr::IsNull {
        column: column.to_ref(),
    }
}

/// Non-null test: `(column IS NOT NULL)`.
pub fn is_not_null<T>(column: &Column<T>) -> Expr {
    Expr::IsNotNull {
        column: column.to_ref(),
    }
}

/// Set membership: `(column IN (v1, v2, …))`. Candidate order is preserved.
pub fn in_list<T>(column: &Column<T>, values: &[Column<T>]) -> Expr {
    Expr::In {
        column: column.to_ref(),
        values: values.iter().map(Column::to_ref).collect(),
    }
}

/// Negated set membership: `(column NOT IN (v1, v2, …))`.
pub fn not_in_list<T>(column: &Column<T>, values: &[Column<T>]) -> Expr {
    Expr::NotIn {
        column: column.to_ref(),
        values: values.iter().map(Column::to_ref).collect(),
    }
}

/// Pattern match: `(column LIKE pattern)`.
pub fn like<T: SqlText>(column: &Column<T>, pattern: &Column<T>) -> Expr {
    Expr::Like {
        column: column.to_ref(),
        pattern: pattern.to_ref(),
    }
}

/// Negated pattern match: `(column NOT LIKE pattern)`.
pub fn not_like<T: SqlText>(column: &Column<T>, pattern: &Column<T>) -> Expr {
    Expr::NotLike {
        column: column.to_ref(),
        pattern: pattern.to_ref(),
    }
}

/// Conjunction of zero or more predicates, joined by ` AND ` when rendered.
///
/// No enclosing parentheses are added around the conjunction; each
/// comparison child parenthesizes itself. An empty conjunction renders as
/// the empty string.
pub fn and(exprs: Vec<Expr>) -> Expr {
    Expr::And { exprs }
}

/// Disjunction of zero or more predicates, joined by ` OR ` when rendered.
///
/// Same parenthesization rule as [`and`]: no enclosing pair is added.
pub fn or(exprs: Vec<Expr>) -> Expr {
    Expr::Or { exprs }
}

/// Negation: `NOT (<expr>)`.
pub fn not(expr: Expr) -> Expr {
    Expr::Not {
        expr: Box::new(expr),
    }
}
