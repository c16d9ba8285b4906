use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ast::column::{Column, AUTH_UID_TOKEN};
use crate::ast::expr::Expr;

/// The DML command an RLS policy applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Command {
    /// Policy applies to SELECT queries.
    Select,
    /// Policy applies to INSERT statements.
    Insert,
    /// Policy applies to UPDATE statements.
    Update,
    /// Policy applies to DELETE statements.
    Delete,
}

impl fmt::Display for Command {
    // Lowercase, matching the emitted `FOR <command>` line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Select => write!(f, "select"),
            Command::Insert => write!(f, "insert"),
            Command::Update => write!(f, "update"),
            Command::Delete => write!(f, "delete"),
        }
    }
}

impl std::str::FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "select" => Ok(Command::Select),
            "insert" => Ok(Command::Insert),
            "update" => Ok(Command::Update),
            "delete" => Ok(Command::Delete),
            _ => Err(format!("Invalid policy command: {s}")),
        }
    }
}

/// Column references for the authenticated principal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Auth {
    /// The current user's id, rendered as the literal token `auth.uid()`.
    pub uid: Column<String>,
}

impl Auth {
    /// Build the auth context with the reserved uid token.
    pub fn new() -> Self {
        Self {
            uid: Column::new(AUTH_UID_TOKEN),
        }
    }
}

impl Default for Auth {
    fn default() -> Self {
        Self::new()
    }
}

/// Supplies one typed column reference per row field of a table.
///
/// Implementors populate every field with a [`Column`] whose token is the
/// exact SQL text to emit for that field — normally the table's column
/// name. The renderer calls [`RowLike::columns`] once per policy to build
/// the context handed to the predicate function.
pub trait RowLike {
    /// Build the per-field column references for this row shape.
    fn columns() -> Self;
}

/// Context handed to a policy predicate function.
#[derive(Debug, Clone)]
pub struct PolicyContext<R> {
    /// Column references for the target table's row fields.
    pub row: R,
    /// Column references for the authenticated principal.
    pub auth: Auth,
    /// The command the surrounding policy applies to.
    pub command: Command,
}

/// Builds the predicate tree for one policy from its context.
pub type PolicyFn<R> = Box<dyn Fn(&PolicyContext<R>) -> Expr>;

/// A single declared RLS policy.
///
/// Constructed once as a pure value and consumed by the renderer to produce
/// one `CREATE POLICY` statement; it carries no identity beyond its fields.
pub struct Policy<R> {
    /// Target table name, emitted verbatim after `ON`.
    pub table: String,
    /// The command this policy restricts.
    pub command: Command,
    /// Display name, emitted inside a double-quoted identifier. The caller
    /// must ensure it contains no unescaped double quote.
    pub name: String,
    /// Predicate builder invoked once at render time.
    pub predicate: PolicyFn<R>,
}

impl<R> fmt::Debug for Policy<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Policy")
            .field("table", &self.table)
            .field("command", &self.command)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Declare a single policy for `table`.
pub fn define_policy<R>(
    table: impl Into<String>,
    command: Command,
    name: impl Into<String>,
    predicate: impl Fn(&PolicyContext<R>) -> Expr + 'static,
) -> Policy<R> {
    Policy {
        table: table.into(),
        command,
        name: name.into(),
        predicate: Box::new(predicate),
    }
}

/// One command/name/predicate entry for [`define_policies`].
pub struct PolicyEntry<R> {
    /// The command this entry restricts.
    pub command: Command,
    /// Display name for the policy.
    pub name: String,
    /// Predicate builder for the policy.
    pub predicate: PolicyFn<R>,
}

impl<R> PolicyEntry<R> {
    /// Bundle a command, display name, and predicate function.
    pub fn new(
        command: Command,
        name: impl Into<String>,
        predicate: impl Fn(&PolicyContext<R>) -> Expr + 'static,
    ) -> Self {
        Self {
            command,
            name: name.into(),
            predicate: Box::new(predicate),
        }
    }
}

impl<R> fmt::Debug for PolicyEntry<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolicyEntry")
            .field("command", &self.command)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Declare several policies that share a table.
pub fn define_policies<R>(table: &str, entries: Vec<PolicyEntry<R>>) -> Vec<Policy<R>> {
    entries
        .into_iter()
        .map(|entry| Policy {
            table: table.to_string(),
            command: entry.command,
            name: entry.name,
            predicate: entry.predicate,
        })
        .collect()
}
