//! fieldform Template
//!
//! The expression tree emitted by the compiler and the renderer that prints
//! it as mapping-template text:
//! - `Expr` with the conditional, loop, mutating-call, and raw constructors
//! - Builder helpers (`iff`, `for_each`, `qref`, `raw`, `not`)
//! - The `Render` trait and its default implementation, `VtlPrinter`

mod expr;
mod printer;

pub use expr::*;
pub use printer::{Render, VtlPrinter};
