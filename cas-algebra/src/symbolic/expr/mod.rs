//! A representation of mathematical expressions suited to algebraic manipulation.
//!
//! [`Expr`] **flattens** the tree structure of sums and products: the expression `x + (y + z)` is
//! a single [`Expr::Add`] node with _three_ children, `x`, `y`, and `z`. Products are flattened
//! the same way, and subtraction and division do not exist as separate nodes: `a - b` is
//! `a + (-1)*b` and `a / b` is `a * b^-1`.
//!
//! # Canonical form
//!
//! Expressions are persistent values. The combinators in [`crate::symbolic`] ([`add`],
//! [`multiply`], [`power`], ...) never modify their inputs; they build and return a new node in
//! **canonical form**:
//!
//! - The terms of a sum are combined and sorted with [`ord::compare_terms`], so that there are no
//! two terms that differ only by a numeric coefficient.
//! - The factors of a product are merged by base and sorted, with the numeric coefficient (if it
//! is not `1`) as the first factor.
//! - Powers are normalized by the power cascade, e.g. `4^(1/2)` is `2` and `2^(-1/2)` is
//! `1/2 * 2^(1/2)`.
//!
//! Because canonical forms are unique for the identities the combinators know about, the derived
//! [`PartialEq`] implementation is enough to decide whether two canonical expressions are equal.
//! Equality is **structural and order-sensitive**: `x + y` and `y + x` are different values, but
//! the combinators will only ever produce one of them.
//!
//! Expressions built by hand with the enum constructors are not canonicalized. Use
//! [`simplify`](crate::symbolic::simplify) to bring such an expression into canonical form.
//!
//! # Distinguished constants
//!
//! The imaginary unit `i` is represented as `(-1)^(1/2)`. The constants `pi` and `e` are the
//! symbols `pi` and `e`. See [`crate::consts`].
//!
//! [`add`]: crate::symbolic::add()
//! [`multiply`]: crate::symbolic::multiply()
//! [`power`]: crate::symbolic::power()

mod iter;
pub mod ord;

use crate::number::Number;
use crate::primitive::int;
use iter::ExprIter;
use rug::{Integer, Rational};
use super::tensor::Tensor;

/// One of the three reserved slots a rewrite pattern can bind.
///
/// Patterns are written with the placeholder symbols `a_`, `b_` and `x_`, which are replaced by
/// these slots when a [`Rule`](crate::symbolic::transform::Rule) is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MetaVar {
    /// The slot written as `a_`.
    A,

    /// The slot written as `b_`.
    B,

    /// The slot written as `x_`, bound to the free variable of the transformation.
    X,
}

impl MetaVar {
    /// Returns the placeholder symbol used to write this slot in a pattern.
    pub fn placeholder(self) -> &'static str {
        match self {
            Self::A => "a_",
            Self::B => "b_",
            Self::X => "x_",
        }
    }

    /// Returns the slot written with the given placeholder symbol, if any.
    pub fn from_placeholder(name: &str) -> Option<Self> {
        match name {
            "a_" => Some(Self::A),
            "b_" => Some(Self::B),
            "x_" => Some(Self::X),
            _ => None,
        }
    }
}

/// A single term / factor, such as a number, variable, or function call.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Primary {
    /// A number, such as `2`, `-3/4` or `0.5`.
    Number(Number),

    /// A variable or named constant, such as `x` or `pi`.
    Symbol(String),

    /// A function call, such as `sin(x)` or `f(x, y)`.
    Call(String, Vec<Expr>),

    /// A tensor of expressions.
    Tensor(Tensor),

    /// A reserved rewrite slot.
    Meta(MetaVar),
}

impl std::fmt::Display for Primary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(num) => write!(f, "{}", num),
            Self::Symbol(sym) => write!(f, "{}", sym),
            Self::Call(name, args) => {
                write!(f, "{}(", name)?;
                let mut iter = args.iter();
                if let Some(arg) = iter.next() {
                    write!(f, "{}", arg)?;
                    for arg in iter {
                        write!(f, ", {}", arg)?;
                    }
                }
                write!(f, ")")
            },
            Self::Tensor(tensor) => write!(f, "{}", tensor),
            Self::Meta(meta) => write!(f, "{}", meta.placeholder()),
        }
    }
}

/// A mathematical expression with information about its terms and factors.
///
/// For more information about this type, see the [module-level documentation](self).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    /// A single term or factor.
    Primary(Primary),

    /// Multiple terms added together.
    Add(Vec<Expr>),

    /// Multiple factors multiplied together.
    Mul(Vec<Expr>),

    /// An expression raised to a power.
    Exp(Box<Expr>, Box<Expr>),
}

impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Primary(primary) => write!(f, "{}", primary),
            Self::Add(terms) => {
                let mut iter = terms.iter();
                if let Some(term) = iter.next() {
                    write!(f, "{}", term)?;
                    for term in iter {
                        write!(f, " + {}", term)?;
                    }
                }
                Ok(())
            },
            Self::Mul(factors) => {
                let mut iter = factors.iter();
                if let Some(factor) = iter.next() {
                    self.fmt_operand(f, factor, 2)?;
                    for factor in iter {
                        write!(f, " * ")?;
                        self.fmt_operand(f, factor, 2)?;
                    }
                }
                Ok(())
            },
            Self::Exp(base, exp) => {
                self.fmt_operand(f, base, 4)?;
                write!(f, "^")?;
                self.fmt_operand(f, exp, 4)
            },
        }
    }
}

impl From<Number> for Expr {
    fn from(num: Number) -> Self {
        Self::Primary(Primary::Number(num))
    }
}

impl From<Rational> for Expr {
    fn from(rational: Rational) -> Self {
        Self::from(Number::Rational(rational))
    }
}

impl From<Integer> for Expr {
    fn from(integer: Integer) -> Self {
        Self::from(Number::from(integer))
    }
}

impl From<Tensor> for Expr {
    fn from(tensor: Tensor) -> Self {
        Self::Primary(Primary::Tensor(tensor))
    }
}

impl From<MetaVar> for Expr {
    fn from(meta: MetaVar) -> Self {
        Self::Primary(Primary::Meta(meta))
    }
}

impl Expr {
    /// Creates an exact integer.
    pub fn integer<T>(n: T) -> Self
    where
        Integer: From<T>,
    {
        Self::from(int(n))
    }

    /// Creates an exact rational in lowest terms.
    ///
    /// Panics if the denominator is zero.
    pub fn rational<N, D>(numer: N, denom: D) -> Self
    where
        Integer: From<N> + From<D>,
    {
        Self::from(crate::primitive::rat(numer, denom))
    }

    /// Creates a float. The value must be finite.
    pub fn float(value: f64) -> Self {
        debug_assert!(value.is_finite(), "non-finite float {}", value);
        Self::from(Number::Float(value))
    }

    /// Creates a symbol.
    pub fn symbol(name: &str) -> Self {
        Self::Primary(Primary::Symbol(name.to_string()))
    }

    /// Creates an unevaluated function call.
    pub fn call(name: &str, args: Vec<Expr>) -> Self {
        Self::Primary(Primary::Call(name.to_string(), args))
    }

    /// Returns the binding strength of the expression when printed. Higher values bind tighter.
    fn precedence(&self) -> u8 {
        match self {
            Self::Primary(Primary::Number(Number::Rational(r)))
                if r.cmp0() == std::cmp::Ordering::Less || *r.denom() != 1 => 2,
            Self::Primary(Primary::Number(Number::Float(f))) if *f < 0.0 => 2,
            Self::Primary(_) => 5,
            Self::Add(_) => 1,
            Self::Mul(_) => 2,
            Self::Exp(_, _) => 3,
        }
    }

    /// Writes an operand of this node, wrapped in parentheses if it binds looser than `min`.
    fn fmt_operand(
        &self,
        f: &mut std::fmt::Formatter<'_>,
        operand: &Expr,
        min: u8,
    ) -> std::fmt::Result {
        if operand.precedence() < min {
            write!(f, "({})", operand)
        } else {
            write!(f, "{}", operand)
        }
    }

    /// If the expression is a [`Primary::Number`], returns a reference to the contained number.
    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Self::Primary(Primary::Number(num)) => Some(num),
            _ => None,
        }
    }

    /// Returns true if the expression is a [`Primary::Number`].
    pub fn is_number(&self) -> bool {
        self.as_number().is_some()
    }

    /// If the expression is an exact rational, returns a reference to it.
    pub fn as_rational(&self) -> Option<&Rational> {
        self.as_number().and_then(Number::as_rational)
    }

    /// If the expression is an exact integer, returns a reference to it.
    pub fn as_integer(&self) -> Option<&Integer> {
        self.as_number().and_then(Number::as_integer)
    }

    /// Returns true if the expression is an exact integer.
    pub fn is_integer(&self) -> bool {
        self.as_integer().is_some()
    }

    /// Returns true if the expression is an exact even integer.
    pub fn is_even_integer(&self) -> bool {
        self.as_number().map(Number::is_even_integer).unwrap_or(false)
    }

    /// Returns true if the expression is exact or float zero.
    pub fn is_zero(&self) -> bool {
        self.as_number().map(Number::is_zero).unwrap_or(false)
    }

    /// Returns true if the expression is exact or float one.
    pub fn is_one(&self) -> bool {
        self.as_number().map(Number::is_one).unwrap_or(false)
    }

    /// Returns true if the expression is exact or float negative one.
    pub fn is_minus_one(&self) -> bool {
        self.as_number().map(Number::is_minus_one).unwrap_or(false)
    }

    /// Returns true if the expression is a float.
    pub fn is_float(&self) -> bool {
        self.as_number().map(Number::is_float).unwrap_or(false)
    }

    /// If the expression is a [`Primary::Symbol`], returns a reference to the contained symbol.
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Self::Primary(Primary::Symbol(sym)) => Some(sym),
            _ => None,
        }
    }

    /// Returns true if the expression is the symbol with the given name.
    pub fn is_symbol(&self, name: &str) -> bool {
        self.as_symbol() == Some(name)
    }

    /// If the expression is a call to the function with the given name, returns its arguments.
    pub fn as_call(&self, name: &str) -> Option<&[Expr]> {
        match self {
            Self::Primary(Primary::Call(call, args)) if call == name => Some(args),
            _ => None,
        }
    }

    /// If the expression is a [`Primary::Tensor`], returns a reference to the contained tensor.
    pub fn as_tensor(&self) -> Option<&Tensor> {
        match self {
            Self::Primary(Primary::Tensor(tensor)) => Some(tensor),
            _ => None,
        }
    }

    /// Returns true if the expression is the imaginary unit, `(-1)^(1/2)`.
    pub fn is_imaginary_unit(&self) -> bool {
        match self {
            Self::Exp(base, exp) => base.is_minus_one()
                && exp.as_rational().map(|r| *r.numer() == 1 && *r.denom() == 2).unwrap_or(false),
            _ => false,
        }
    }

    /// Returns true if the expression is a negative number, or a product whose numeric
    /// coefficient is negative.
    pub fn is_negative_term(&self) -> bool {
        match self {
            Self::Primary(Primary::Number(num)) => num.is_negative(),
            Self::Mul(factors) => factors
                .first()
                .and_then(Expr::as_number)
                .map(Number::is_negative)
                .unwrap_or(false),
            _ => false,
        }
    }

    /// Returns true if the expression is an atom, i.e. it has no operands.
    pub fn is_atom(&self) -> bool {
        match self {
            Self::Primary(Primary::Call(..)) | Self::Primary(Primary::Tensor(_)) => false,
            Self::Primary(_) => true,
            _ => false,
        }
    }

    /// Returns the name of the head of a compound expression: `add`, `multiply`, `power`, or the
    /// name of the called function. Returns [`None`] for other expressions.
    pub fn head(&self) -> Option<&str> {
        match self {
            Self::Primary(Primary::Call(name, _)) => Some(name),
            Self::Add(_) => Some("add"),
            Self::Mul(_) => Some("multiply"),
            Self::Exp(_, _) => Some("power"),
            _ => None,
        }
    }

    /// Returns the direct children of the expression: the terms of a sum, the factors of a
    /// product, the base and exponent of a power, the arguments of a call, or the elements of a
    /// tensor.
    pub fn operands(&self) -> Vec<&Expr> {
        match self {
            Self::Primary(Primary::Call(_, args)) => args.iter().collect(),
            Self::Primary(Primary::Tensor(tensor)) => tensor.elems().iter().collect(),
            Self::Primary(_) => Vec::new(),
            Self::Add(exprs) | Self::Mul(exprs) => exprs.iter().collect(),
            Self::Exp(base, exp) => vec![&**base, &**exp],
        }
    }

    /// Returns true if the given expression appears anywhere in this expression, including this
    /// expression itself.
    pub fn contains(&self, target: &Expr) -> bool {
        self.post_order_iter().any(|expr| expr == target)
    }

    /// Returns true if a call to the function with the given name appears anywhere in this
    /// expression.
    pub fn contains_call(&self, name: &str) -> bool {
        self.post_order_iter().any(|expr| expr.as_call(name).is_some())
    }

    /// Trivially downgrades the expression into a simpler form.
    ///
    /// An [`Expr::Add`] with zero / one term, or an [`Expr::Mul`] with zero / one factor, is
    /// replaced by the single term / factor, or by the integer 0 or 1.
    pub(crate) fn downgrade(self) -> Self {
        match self {
            Self::Add(mut terms) => match terms.len() {
                0 => Self::integer(0),
                1 => terms.remove(0),
                _ => Self::Add(terms),
            },
            Self::Mul(mut factors) => match factors.len() {
                0 => Self::integer(1),
                1 => factors.remove(0),
                _ => Self::Mul(factors),
            },
            _ => self,
        }
    }

    /// Returns an iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn post_order_iter(&self) -> ExprIter<'_> {
        ExprIter::new(self)
    }
}
