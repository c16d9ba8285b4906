use crate::ast::expr::Expr;
use crate::policy::definition::{Auth, Command, Policy, PolicyContext, RowLike};
use crate::policy::manifest::{ManifestPolicy, PolicyManifest};
use crate::render::sql::{expr_to_sql, RenderError};

/// Render one policy as a complete `CREATE POLICY` statement.
///
/// Builds the name-resolution context — row columns from
/// [`RowLike::columns`], the auth principal with its reserved `auth.uid()`
/// token, and the policy's command — invokes the predicate function once,
/// and assembles the statement. Any failure is propagated from
/// [`expr_to_sql`].
pub fn policy_to_sql<R: RowLike>(policy: &Policy<R>) -> Result<String, RenderError> {
    let ctx = PolicyContext {
        row: R::columns(),
        auth: Auth::new(),
        command: policy.command,
    };
    let predicate = (policy.predicate)(&ctx);
    assemble(&policy.table, policy.command, &policy.name, &predicate)
}

/// Render several policies in input order, statements joined by one blank
/// line.
///
/// No cross-policy validation is performed: duplicate names or conflicting
/// policies on the same table and command pass through unchanged.
pub fn policies_to_sql<R: RowLike>(policies: &[Policy<R>]) -> Result<String, RenderError> {
    let statements = policies
        .iter()
        .map(policy_to_sql)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(statements.join("\n\n"))
}

/// Render one manifest policy; its tree already carries literal SQL tokens,
/// so no context is constructed.
pub fn manifest_policy_to_sql(policy: &ManifestPolicy) -> Result<String, RenderError> {
    assemble(&policy.table, policy.command, &policy.name, &policy.predicate)
}

/// Render a whole manifest, statements joined by one blank line.
pub fn manifest_to_sql(manifest: &PolicyManifest) -> Result<String, RenderError> {
    let statements = manifest
        .policies
        .iter()
        .map(manifest_policy_to_sql)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(statements.join("\n\n"))
}

fn assemble(
    table: &str,
    command: Command,
    name: &str,
    predicate: &Expr,
) -> Result<String, RenderError> {
    let rendered = expr_to_sql(predicate)?;

    // SELECT/DELETE gate visible rows, INSERT gates written rows, UPDATE both.
    let (using, with_check) = match command {
        Command::Select | Command::Delete => (Some(format!("USING ({rendered})")), None),
        Command::Insert => (None, Some(format!("WITH CHECK ({rendered})"))),
        Command::Update => (
            Some(format!("USING ({rendered})")),
            Some(format!("WITH CHECK ({rendered})")),
        ),
    };

    let clauses = [using, with_check]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");

    let mut lines = vec![
        format!("CREATE POLICY \"{name}\""),
        format!("ON {table}"),
        format!("FOR {command}"),
    ];
    if !clauses.is_empty() {
        lines.push(clauses);
    }
    lines.push(";".to_string());
    Ok(lines.join("\n"))
}
