//! Algebraic manipulation of expressions.
//!
//! # Expression representation
//!
//! Expressions are represented as a tree of [`Expr`] nodes that **flatten** sums and products.
//! See the [`expr`] module for details.
//!
//! # Canonical combinators
//!
//! Expressions are built and simplified with a small set of combinators that always return a
//! canonical form:
//!
//! - [`add()`], [`add_all`], [`subtract`] and [`combine`] build sums, combining like terms.
//! - [`multiply()`], [`multiply_all`], [`negate`], [`divide`] and [`reciprocal`] build products,
//! merging factors with equal bases and distributing over sums when the context is expanding.
//! - [`power()`] normalizes powers through a cascade of identities, including exact rational roots,
//! complex exponentiation and multinomial expansion. [`power_with_steps`] also reports which
//! identity was applied.
//!
//! Each combinator reads its modes from a [`Ctxt`](crate::Ctxt) and can fail only with
//! [`Interrupted`](crate::error::Interrupted) or
//! [`UnsupportedShape`](crate::error::UnsupportedShape).
//!
//! ```
//! use cas_algebra::{Ctxt, symbolic::{add, expr::Expr, multiply}};
//!
//! let ctxt = Ctxt::default();
//! let x = Expr::symbol("x");
//!
//! // 3x + x = 4x
//! let three_x = multiply(&ctxt, Expr::integer(3), x.clone()).unwrap();
//! let sum = add(&ctxt, three_x, x.clone()).unwrap();
//! assert_eq!(sum, Expr::Mul(vec![Expr::integer(4), x]));
//! ```
//!
//! # Evaluation and rewriting
//!
//! [`simplify`] brings a hand-built expression into canonical form by rebuilding it bottom-up with
//! the combinators, evaluating built-in functions like `abs` and `sin` along the way. [`transform`]
//! rewrites expressions with pattern rules.

pub mod add;
pub mod complex;
pub mod eval;
pub mod expr;
pub mod multiply;
pub mod power;
pub mod step_collector;
pub mod tensor;
pub mod transform;
pub mod trig;

pub use add::{add, add_all, combine, subtract};
pub use eval::{eval, simplify, Bindings};
pub use multiply::{divide, multiply, multiply_all, negate, reciprocal};
pub use power::{power, power_with_steps, step::Step};
pub use step_collector::StepCollector;
pub use transform::{decompose, transform, Rule, Rules, Transformed};
