//! A small, sandboxed expression language for policy predicates.
//!
//! Rule expressions read a JSON environment (`inputs`, `asOf`,
//! `dependencies`) and produce a value that is coerced to a boolean. The
//! language is deliberately closed: literals, member and index access,
//! arithmetic, comparison, equality, and short-circuit logic. No function
//! calls, no assignment, no host access.
//!
//! Lookup failures are hard errors. An unknown identifier or member means a
//! misauthored rule or a malformed snapshot, never a silent `false`.

#![forbid(unsafe_code)]

mod ast;
mod error;
mod eval;
mod lexer;
mod parser;

pub use ast::{BinaryOp, Expr, UnaryOp};
pub use error::ExprError;
pub use parser::parse;
