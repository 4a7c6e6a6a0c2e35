//! Expressions that are used throughout the library, stored as static constants.

use crate::symbolic::expr::Expr;
use once_cell::sync::Lazy;

/// The number zero, wrapped in an [`Expr`].
pub static ZERO: Lazy<Expr> = Lazy::new(|| Expr::integer(0));

/// The number one, wrapped in an [`Expr`].
pub static ONE: Lazy<Expr> = Lazy::new(|| Expr::integer(1));

/// The number negative one, wrapped in an [`Expr`].
pub static MINUS_ONE: Lazy<Expr> = Lazy::new(|| Expr::integer(-1));

/// The number two, wrapped in an [`Expr`].
pub static TWO: Lazy<Expr> = Lazy::new(|| Expr::integer(2));

/// The number 1/2, wrapped in an [`Expr`].
pub static ONE_HALF: Lazy<Expr> = Lazy::new(|| Expr::rational(1, 2));

/// The imaginary unit, `(-1)^(1/2)`.
pub static I: Lazy<Expr> = Lazy::new(|| Expr::Exp(
    Box::new(MINUS_ONE.clone()),
    Box::new(ONE_HALF.clone()),
));

/// The symbol `pi`.
pub static PI: Lazy<Expr> = Lazy::new(|| Expr::symbol("pi"));

/// The symbol `e`, Euler's number.
pub static E: Lazy<Expr> = Lazy::new(|| Expr::symbol("e"));
