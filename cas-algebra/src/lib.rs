//! The simplification and canonicalization core of a symbolic computer-algebra engine.
//!
//! Given a nested mathematical expression built from sums, products, powers, function calls,
//! exact rationals, floats, complex numbers and tensors, the functions in [`symbolic`] produce a
//! canonical normal form, so that equal quantities compare as structurally equal. Three
//! subsystems do most of the work:
//!
//! - [`symbolic::add`] combines like terms of a sum and sorts the survivors into a canonical
//! order.
//! - [`symbolic::power`] normalizes powers: exponent laws, exact rational roots, complex
//! exponentiation and multinomial expansion.
//! - [`symbolic::transform`] rewrites an expression with pattern rules containing meta-variables,
//! driving table-based transformations such as integral lookup.
//!
//! Every operation reads its evaluation modes from a [`Ctxt`], which also carries the
//! [`Interrupt`] token used to cancel long computations from another thread.
//!
//! ```
//! use cas_algebra::{Ctxt, symbolic::{add, power, expr::Expr}};
//!
//! let ctxt = Ctxt::default();
//!
//! // 4^(1/2) = 2
//! let root = power(&ctxt, Expr::integer(4), Expr::rational(1, 2)).unwrap();
//! assert_eq!(root, Expr::integer(2));
//!
//! // a + a = 2a
//! let a = Expr::symbol("a");
//! let sum = add(&ctxt, a.clone(), a.clone()).unwrap();
//! assert_eq!(sum, Expr::Mul(vec![Expr::integer(2), a]));
//! ```

pub mod consts;
pub mod ctxt;
pub mod error;
pub mod number;
pub mod primitive;
pub mod symbolic;
pub mod trig_mode;

pub use ctxt::{Ctxt, Interrupt};
pub use trig_mode::TrigMode;
