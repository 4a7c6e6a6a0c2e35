//! Powers of numbers.

use cas_error::Error;
use crate::consts::{I, MINUS_ONE};
use crate::ctxt::Ctxt;
use crate::number::Number;
use crate::primitive::prime_factorization;
use rug::{ops::Pow, Integer, Rational};
use std::{cmp::Ordering, f64::consts::PI};
use super::super::{
    add::add,
    expr::{ord::compare_factors, Expr},
    multiply::multiply,
};
use super::power;

/// Builds the unreduced power `base^exponent`.
fn unreduced(base: &Rational, exponent: &Rational) -> Expr {
    Expr::Exp(Box::new(base.clone().into()), Box::new(exponent.clone().into()))
}

/// Returns the factors of the given positive integer as `(factor, count)` pairs.
///
/// Small integers are factored into primes. Larger integers are checked for being an exact
/// `root`-th power; if they are not, the integer itself is returned as the only factor.
fn factors(n: &Integer, root: u32) -> Vec<(Integer, u32)> {
    if let Some(primes) = prime_factorization(n) {
        return primes.into_iter().map(|(p, count)| (Integer::from(p), count)).collect();
    }

    let (root_of_n, rem) = n.clone().root_rem(Integer::new(), root);
    if rem.cmp0() == Ordering::Equal {
        vec![(root_of_n, root)]
    } else {
        vec![(n.clone(), 1)]
    }
}

/// Computes the exact power of two rational numbers.
///
/// Integer exponents are computed exactly. For a non-integer exponent `p/q` and a positive base,
/// the numerator and denominator of the base are factored, and every factor `f^(k*p/q)` is split
/// into an integer power and a power with an exponent between 0 and 1. Integer powers are
/// collected into a rational coefficient, and the remaining factors with equal exponents are
/// multiplied together:
///
/// - `4^(1/2) = 2`
/// - `12^(1/2) = 2 * 3^(1/2)`
/// - `2^(-1/2) = 1/2 * 2^(1/2)`
/// - `(2/3)^(1/2) = 1/3 * 6^(1/2)`
///
/// A negative base is split off as `(-1)^(p/q)`. `0` raised to a negative power is left unreduced.
pub(crate) fn qpow(ctxt: &Ctxt, base: &Rational, exponent: &Rational) -> Result<Expr, Error> {
    if *exponent.denom() == 1 {
        let Some(n) = exponent.numer().to_i32() else {
            return Ok(unreduced(base, exponent));
        };
        if base.cmp0() == Ordering::Equal && n < 0 {
            return Ok(unreduced(base, exponent));
        }
        return Ok(base.clone().pow(n).into());
    }

    match base.cmp0() {
        Ordering::Equal => {
            return Ok(if exponent.cmp0() == Ordering::Greater {
                Expr::integer(0)
            } else {
                unreduced(base, exponent)
            });
        },
        Ordering::Less if *base == -1 => return Ok(unreduced(base, exponent)),
        Ordering::Less => {
            let sign = power(ctxt, MINUS_ONE.clone(), exponent.clone().into())?;
            let magnitude = qpow(ctxt, &base.clone().abs(), exponent)?;
            return multiply(ctxt, sign, magnitude);
        },
        Ordering::Greater => {},
    }

    let Some(root) = exponent.denom().to_u32() else {
        return Ok(unreduced(base, exponent));
    };

    let mut coeff = Rational::from(1);
    let mut radicals: Vec<(Rational, Integer)> = Vec::new();
    for (n, sign) in [(base.numer(), 1), (base.denom(), -1)] {
        for (factor, count) in factors(n, root) {
            let total = Rational::from(exponent * count) * sign;
            let whole = total.clone().floor();
            let frac = total - &whole;

            let Some(whole) = whole.numer().to_i32() else {
                return Ok(unreduced(base, exponent));
            };
            coeff *= Rational::from(factor.clone()).pow(whole);

            if frac.cmp0() != Ordering::Equal {
                match radicals.iter_mut().find(|(existing, _)| *existing == frac) {
                    Some((_, product)) => *product *= factor,
                    None => radicals.push((frac, factor)),
                }
            }
        }
    }

    let mut radicals = radicals
        .into_iter()
        .map(|(frac, product)| Expr::Exp(Box::new(product.into()), Box::new(frac.into())))
        .collect::<Vec<_>>();
    radicals.sort_by(compare_factors);
    if coeff != 1 {
        radicals.insert(0, coeff.into());
    }
    Ok(Expr::Mul(radicals).downgrade())
}

/// Computes the power of two numbers, at least one of which is a float.
///
/// A negative base raised to a non-integer exponent produces the principal complex value,
/// `abs(b)^e * (cos(e*pi) + i*sin(e*pi))`. Returns [`None`] if the result is not finite.
pub(crate) fn float_power(ctxt: &Ctxt, base: &Number, exponent: &Number) -> Result<Option<Expr>, Error> {
    let (base, exponent) = (base.to_f64(), exponent.to_f64());
    if base >= 0.0 || exponent.fract() == 0.0 {
        return Ok(Number::float(base.powf(exponent)).map(Expr::from));
    }

    let magnitude = base.abs().powf(exponent);
    let theta = PI * exponent;
    let (Some(re), Some(im)) = (
        Number::float(magnitude * theta.cos()),
        Number::float(magnitude * theta.sin()),
    ) else {
        return Ok(None);
    };

    let im = multiply(ctxt, im.into(), I.clone())?;
    add(ctxt, re.into(), im).map(Some)
}
