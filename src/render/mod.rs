/// Expression trees to SQL boolean-expression text.
pub mod sql;
/// Policies to complete `CREATE POLICY` statements and scripts.
pub mod statement;
