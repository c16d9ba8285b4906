use serde::{Deserialize, Serialize};

use crate::ast::expr::Expr;
use crate::policy::definition::Command;

/// One policy entry in a [`PolicyManifest`].
///
/// The dynamically-typed counterpart of
/// [`Policy`](crate::policy::definition::Policy): the predicate arrives as a
/// pre-built expression tree whose column references are literal SQL
/// tokens, so an unsupported operator tag surfaces at render time instead
/// of being ruled out by the type system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestPolicy {
    /// Target table name, emitted verbatim after `ON`.
    pub table: String,
    /// The command this policy restricts.
    pub command: Command,
    /// Display name, emitted inside a double-quoted identifier.
    pub name: String,
    /// The predicate tree.
    pub predicate: Expr,
}

/// A set of policies loaded from an external JSON document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyManifest {
    /// Declared policies, rendered in input order.
    pub policies: Vec<ManifestPolicy>,
}

impl PolicyManifest {
    /// Load a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Invalid policy manifest JSON: {e}"))
    }
}
