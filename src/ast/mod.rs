//! Portable query model.
//!
//! A [`Query`] is a set of independently settable clauses. The Oracle
//! compiler treats most of them as opaque fragments; only `limit`, `offset`,
//! `epilog` and `values` are read and rewritten.

pub mod expr;
pub mod query;
pub mod values;

pub use expr::*;
pub use query::*;
pub use values::*;
