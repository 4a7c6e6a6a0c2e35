//! Bottom-up evaluation of expressions.
//!
//! [`eval`] rebuilds an expression from its leaves up with the canonical combinators, so that the
//! result is in canonical form even if the input was built by hand. Along the way, rewrite slots
//! are replaced by their [`Bindings`], and calls to built-in functions are evaluated.

use cas_error::Error;
use crate::consts::{E, ONE_HALF, PI};
use crate::ctxt::Ctxt;
use crate::number::Number;
use super::{
    add::{combine, subtract},
    complex,
    expr::{Expr, MetaVar, Primary},
    multiply::multiply_all,
    power::power,
    trig,
};

/// The values bound to the rewrite slots during one activation of the rewriter.
///
/// An unbound slot evaluates to itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bindings {
    /// The value of the slot `a_`.
    pub a: Option<Expr>,

    /// The value of the slot `b_`.
    pub b: Option<Expr>,

    /// The value of the slot `x_`.
    pub x: Option<Expr>,
}

impl Bindings {
    /// Creates an empty set of bindings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value bound to the given slot.
    pub fn get(&self, meta: MetaVar) -> Option<&Expr> {
        match meta {
            MetaVar::A => self.a.as_ref(),
            MetaVar::B => self.b.as_ref(),
            MetaVar::X => self.x.as_ref(),
        }
    }

    /// Binds the given slot to a value, replacing any previous value.
    pub fn set(&mut self, meta: MetaVar, value: Expr) {
        let slot = match meta {
            MetaVar::A => &mut self.a,
            MetaVar::B => &mut self.b,
            MetaVar::X => &mut self.x,
        };
        *slot = Some(value);
    }

    /// Returns these bindings with the given slot bound to a value.
    pub fn with(mut self, meta: MetaVar, value: Expr) -> Self {
        self.set(meta, value);
        self
    }
}

/// Converts a predicate result to the exact integer `1` or `0`.
fn truth(value: bool) -> Expr {
    Expr::integer(u8::from(value))
}

/// `log(x)`, evaluated for `1`, `e`, `e^y` and positive floats.
fn log(x: &Expr) -> Expr {
    if x.is_one() {
        return Expr::integer(0);
    }
    if *x == *E {
        return Expr::integer(1);
    }
    if let Expr::Exp(base, exp) = x {
        if **base == *E {
            return (**exp).clone();
        }
    }
    if let Some(Number::Float(value)) = x.as_number() {
        if let Some(ln) = Number::float(value.ln()).filter(|_| *value > 0.0) {
            return ln.into();
        }
    }
    Expr::call("log", vec![x.clone()])
}

/// Calls the function with the given name on already evaluated arguments.
///
/// Calls to unknown functions, and calls to built-in functions with the wrong number of
/// arguments, are returned unevaluated.
pub(crate) fn call(ctxt: &Ctxt, name: &str, args: Vec<Expr>) -> Result<Expr, Error> {
    let result = match (name, args.as_slice()) {
        ("abs", [z]) => complex::abs(ctxt, z)?,
        ("arg", [z]) => complex::arg(ctxt, z)?,
        ("real", [z]) => complex::real(ctxt, z)?,
        ("imag", [z]) => complex::imag(ctxt, z)?,
        ("rect", [z]) => complex::rect(ctxt, z)?,
        ("conj", [z]) => complex::conjugate(ctxt, z)?,
        ("sin", [x]) => trig::sine(ctxt, x)?,
        ("cos", [x]) => trig::cosine(ctxt, x)?,
        ("arctan", [x]) => trig::arctan(ctxt, x)?,
        ("exp", [x]) => power(ctxt, E.clone(), x.clone())?,
        ("log", [x]) => log(x),
        ("sqrt", [x]) => power(ctxt, x.clone(), ONE_HALF.clone())?,

        ("eq", [a, b]) => truth(subtract(ctxt, a.clone(), b.clone())?.is_zero()),
        ("not", [p]) => truth(p.is_zero()),
        ("isnumber", [a]) => truth(a.is_number()),
        ("isinteger", [a]) => truth(a.is_integer()),
        ("free", [a, v]) => truth(!a.contains(v)),

        _ => Expr::call(name, args),
    };
    Ok(result)
}

/// Evaluates an expression bottom-up, substituting the given bindings for rewrite slots.
///
/// Sums, products and powers are rebuilt with [`combine`], [`multiply_all`] and [`power`], and
/// calls to built-in functions are evaluated. When the context is evaluating floats, the
/// constants `pi` and `e` are replaced by their float values.
pub fn eval(ctxt: &Ctxt, expr: &Expr, bindings: &Bindings) -> Result<Expr, Error> {
    match expr {
        Expr::Primary(Primary::Symbol(_)) if ctxt.evaluating_floats && *expr == *PI => {
            Ok(Expr::float(std::f64::consts::PI))
        },
        Expr::Primary(Primary::Symbol(_)) if ctxt.evaluating_floats && *expr == *E => {
            Ok(Expr::float(std::f64::consts::E))
        },
        Expr::Primary(Primary::Meta(meta)) => {
            Ok(bindings.get(*meta).cloned().unwrap_or_else(|| expr.clone()))
        },
        Expr::Primary(Primary::Call(name, args)) => {
            let args = args
                .iter()
                .map(|arg| eval(ctxt, arg, bindings))
                .collect::<Result<Vec<_>, _>>()?;
            call(ctxt, name, args)
        },
        Expr::Primary(Primary::Tensor(tensor)) => {
            Ok(tensor.try_map(|elem| eval(ctxt, elem, bindings))?.into())
        },
        Expr::Primary(_) => Ok(expr.clone()),
        Expr::Add(terms) => {
            let terms = terms
                .iter()
                .map(|term| eval(ctxt, term, bindings))
                .collect::<Result<Vec<_>, _>>()?;
            combine(ctxt, terms)
        },
        Expr::Mul(factors) => {
            let factors = factors
                .iter()
                .map(|factor| eval(ctxt, factor, bindings))
                .collect::<Result<Vec<_>, _>>()?;
            multiply_all(ctxt, factors)
        },
        Expr::Exp(base, exp) => {
            let base = eval(ctxt, base, bindings)?;
            let exp = eval(ctxt, exp, bindings)?;
            power(ctxt, base, exp)
        },
    }
}

/// Brings an expression into canonical form.
///
/// ```
/// use cas_algebra::{Ctxt, symbolic::{expr::Expr, simplify}};
///
/// // x + x = 2x
/// let x = Expr::symbol("x");
/// let sum = Expr::Add(vec![x.clone(), x.clone()]);
/// assert_eq!(
///     simplify(&Ctxt::default(), &sum).unwrap(),
///     Expr::Mul(vec![Expr::integer(2), x]),
/// );
/// ```
pub fn simplify(ctxt: &Ctxt, expr: &Expr) -> Result<Expr, Error> {
    eval(ctxt, expr, &Bindings::new())
}
