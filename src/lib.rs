//! Declare `PostgreSQL` Row-Level Security policies as typed expressions and
//! render them as `CREATE POLICY` SQL.
//!
//! Policies are declared per table: the caller describes the table's row
//! shape as a struct of [`ast::column::Column`] references, writes one
//! predicate function per policy using the constructors in [`ast::expr`],
//! and renders the result with [`render::statement`]. Rendering is pure and
//! deterministic; the crate never touches a database.
//!
//! ```
//! use rlsgen::ast::column::Column;
//! use rlsgen::ast::expr::eq;
//! use rlsgen::policy::definition::{define_policies, Command, PolicyContext, PolicyEntry, RowLike};
//! use rlsgen::render::statement::policies_to_sql;
//!
//! struct ProfileRow {
//!     user_id: Column<String>,
//! }
//!
//! impl RowLike for ProfileRow {
//!     fn columns() -> Self {
//!         Self {
//!             user_id: Column::new("user_id"),
//!         }
//!     }
//! }
//!
//! let policies = define_policies(
//!     "profiles",
//!     vec![PolicyEntry::new(
//!         Command::Select,
//!         "Select own profile",
//!         |ctx: &PolicyContext<ProfileRow>| eq(&ctx.auth.uid, &ctx.row.user_id),
//!     )],
//! );
//!
//! let sql = policies_to_sql(&policies).expect("policies should render");
//! assert!(sql.contains("USING ((auth.uid() = user_id))"));
//! ```
#![warn(missing_docs)]

/// Expression AST: column references and predicate nodes with their constructors.
pub mod ast;
/// Policy declarations: commands, contexts, registration helpers, and JSON manifests.
pub mod policy;
/// SQL rendering: expression trees to boolean SQL, policies to `CREATE POLICY` statements.
pub mod render;
