//! # Templar Core
//!
//! The expression tree model shared by every templar component.
//!
//! This crate provides the foundational building blocks:
//!
//! - **Tree Model**: immutable [`Expr`] nodes with `Arc`-shared children
//! - **Interning**: [`Sym`] identifier interning for cheap equality
//! - **Literals**: [`Lit`] leaf constants
//! - **Error Handling**: [`TemplarError`] and the [`TemplarResult`] alias
//! - **Construction**: the [`tree!`] macro for literal trees

#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod expr;
pub mod lit;
pub mod macros;
pub mod sym;

pub use error::{TemplarError, TemplarResult};
pub use expr::{Expr, Head};
pub use lit::Lit;
pub use sym::{Sym, SymInterner};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
