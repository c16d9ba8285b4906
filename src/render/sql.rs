use std::fmt;

use crate::ast::column::ColumnRef;
use crate::ast::expr::Expr;

/// Error raised while rendering an expression tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The tree contains a node whose operator tag is outside the supported
    /// set. Constructors cannot produce such a node; it can only appear in
    /// trees deserialized from externally supplied data.
    UnknownOperator {
        /// The offending operator tag.
        op: String,
    },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::UnknownOperator { op } => write!(f, "Unknown operator: {op}"),
        }
    }
}

impl std::error::Error for RenderError {}

/// Render one expression tree to a SQL boolean expression.
///
/// Comparison, null-test, membership, and pattern nodes parenthesize
/// themselves as a unit. `And`/`Or` join their rendered children with the
/// bare operator and add no enclosing pair, so the precedence of nested
/// combinators relies on each leaf's own parentheses; `Not` wraps its
/// single child in a fresh pair. Column tokens are emitted verbatim —
/// `auth.uid()` is an ordinary reference whose token happens to be a call
/// expression. Rendering is a pure function of the tree's shape and its
/// leaf tokens.
pub fn expr_to_sql(expr: &Expr) -> Result<String, RenderError> {
    match expr {
        Expr::Eq { left, right } => Ok(format!("({left} = {right})")),
        Expr::Ne { left, right } => Ok(format!("({left} <> {right})")),
        Expr::Lt { left, right } => Ok(format!("({left} < {right})")),
        Expr::Lte { left, right } => Ok(format!("({left} <= {right})")),
        Expr::Gt { left, right } => Ok(format!("({left} > {right})")),
        Expr::Gte { left, right } => Ok(format!("({left} >= {right})")),
        Expr::IsNull { column } => Ok(format!("({column} IS NULL)")),
        Expr::IsNotNull { column } => Ok(format!("({column} IS NOT NULL)")),
        Expr::In { column, values } => Ok(format!("({column} IN ({}))", join_refs(values))),
        Expr::NotIn { column, values } => Ok(format!("({column} NOT IN ({}))", join_refs(values))),
        Expr::Like { column, pattern } => Ok(format!("({column} LIKE {pattern})")),
        Expr::NotLike { column, pattern } => Ok(format!("({column} NOT LIKE {pattern})")),
        Expr::And { exprs } => join_rendered(exprs, " AND "),
        Expr::Or { exprs } => join_rendered(exprs, " OR "),
        Expr::Not { expr } => Ok(format!("NOT ({})", expr_to_sql(expr)?)),
        Expr::Unrecognized(node) => Err(RenderError::UnknownOperator {
            op: node.op.clone(),
        }),
    }
}

fn join_refs(values: &[ColumnRef]) -> String {
    values
        .iter()
        .map(ColumnRef::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

fn join_rendered(exprs: &[Expr], separator: &str) -> Result<String, RenderError> {
    let rendered = exprs
        .iter()
        .map(expr_to_sql)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rendered.join(separator))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::column::Column;
    use crate::ast::expr::{
        and, eq, gt, gte, in_list, is_not_null, is_null, like, lt, lte, ne, not, not_in_list,
        not_like, or, UnrecognizedExpr,
    };

    fn text(token: &str) -> Column<String> {
        Column::new(token)
    }

    fn num(token: &str) -> Column<i64> {
        Column::new(token)
    }

    #[test]
    fn comparison_operators_render_parenthesized() {
        assert_eq!(
            expr_to_sql(&eq(&text("auth.uid()"), &text("user_id"))).unwrap(),
            "(auth.uid() = user_id)"
        );
        assert_eq!(
            expr_to_sql(&ne(&text("id"), &text("auth.uid()"))).unwrap(),
            "(id <> auth.uid())"
        );
        assert_eq!(
            expr_to_sql(&lt(&num("age"), &num("limit"))).unwrap(),
            "(age < limit)"
        );
        assert_eq!(
            expr_to_sql(&lte(&num("age"), &num("limit"))).unwrap(),
            "(age <= limit)"
        );
        assert_eq!(
            expr_to_sql(&gt(&num("age"), &num("min"))).unwrap(),
            "(age > min)"
        );
        assert_eq!(
            expr_to_sql(&gte(&num("age"), &num("min"))).unwrap(),
            "(age >= min)"
        );
    }

    #[test]
    fn null_tests_render_parenthesized() {
        assert_eq!(
            expr_to_sql(&is_null(&text("status"))).unwrap(),
            "(status IS NULL)"
        );
        assert_eq!(
            expr_to_sql(&is_not_null(&text("status"))).unwrap(),
            "(status IS NOT NULL)"
        );
    }

    #[test]
    fn membership_preserves_candidate_order() {
        let values = [text("'active'"), text("'pending'")];
        assert_eq!(
            expr_to_sql(&in_list(&text("status"), &values)).unwrap(),
            "(status IN ('active', 'pending'))"
        );
        assert_eq!(
            expr_to_sql(&not_in_list(&text("status"), &values)).unwrap(),
            "(status NOT IN ('active', 'pending'))"
        );

        let reversed = [text("'pending'"), text("'active'")];
        assert_eq!(
            expr_to_sql(&in_list(&text("status"), &reversed)).unwrap(),
            "(status IN ('pending', 'active'))"
        );
    }

    #[test]
    fn empty_membership_list_renders_degenerate_in() {
        assert_eq!(
            expr_to_sql(&in_list(&text("status"), &[])).unwrap(),
            "(status IN ())"
        );
    }

    #[test]
    fn pattern_matches_render_parenthesized() {
        assert_eq!(
            expr_to_sql(&like(&text("name"), &text("'A%'"))).unwrap(),
            "(name LIKE 'A%')"
        );
        assert_eq!(
            expr_to_sql(&not_like(&text("name"), &text("'B%'"))).unwrap(),
            "(name NOT LIKE 'B%')"
        );
    }

    #[test]
    fn and_or_do_not_add_enclosing_parentheses() {
        let left = eq(&text("auth.uid()"), &text("user_id"));
        let right = gt(&num("age"), &num("min"));

        assert_eq!(
            expr_to_sql(&and(vec![left.clone(), right.clone()])).unwrap(),
            "(auth.uid() = user_id) AND (age > min)"
        );
        assert_eq!(
            expr_to_sql(&or(vec![left, right])).unwrap(),
            "(auth.uid() = user_id) OR (age > min)"
        );
    }

    #[test]
    fn nested_combinators_render_without_grouping() {
        // An `and` nested inside an `or` flattens textually; only the leaf
        // parentheses remain.
        let nested = or(vec![
            and(vec![eq(&text("a"), &text("b")), eq(&text("c"), &text("d"))]),
            eq(&text("e"), &text("f")),
        ]);
        assert_eq!(
            expr_to_sql(&nested).unwrap(),
            "(a = b) AND (c = d) OR (e = f)"
        );
    }

    #[test]
    fn empty_combinators_render_empty_strings() {
        assert_eq!(expr_to_sql(&and(Vec::new())).unwrap(), "");
        assert_eq!(expr_to_sql(&or(Vec::new())).unwrap(), "");
    }

    #[test]
    fn not_wraps_its_child_in_a_fresh_pair() {
        let expr = not(eq(&text("id"), &text("auth.uid()")));
        assert_eq!(expr_to_sql(&expr).unwrap(), "NOT ((id = auth.uid()))");
    }

    #[test]
    fn unrecognized_nodes_fail_with_unknown_operator() {
        let expr = Expr::Unrecognized(UnrecognizedExpr {
            op: "unknown".to_string(),
        });

        let err = expr_to_sql(&expr).expect_err("unknown operator should fail");
        assert_eq!(
            err,
            RenderError::UnknownOperator {
                op: "unknown".to_string(),
            }
        );
        assert_eq!(format!("{err}"), "Unknown operator: unknown");
    }

    #[test]
    fn unrecognized_nodes_fail_inside_combinators() {
        let expr = and(vec![
            eq(&text("a"), &text("b")),
            Expr::Unrecognized(UnrecognizedExpr {
                op: "between".to_string(),
            }),
        ]);

        let err = expr_to_sql(&expr).expect_err("nested unknown operator should fail");
        assert_eq!(
            err,
            RenderError::UnknownOperator {
                op: "between".to_string(),
            }
        );
    }
}
