//! Decomposition of complex-valued expressions.
//!
//! The imaginary unit is the expression `(-1)^(1/2)`, so complex numbers appear in two forms:
//!
//! - the **rectangular** form `a + b*i`;
//! - the **clock** form `(-1)^x` and the **exponential** form `e^(i*x)`, which rotate around the
//! unit circle.
//!
//! [`rect`] converts the latter forms into the former, and [`abs`], [`arg`], [`real`] and [`imag`]
//! decompose an expression into polar or rectangular components.

use cas_error::Error;
use crate::consts::{E, I, MINUS_ONE, ONE_HALF, PI, TWO};
use crate::ctxt::Ctxt;
use crate::error::UnsupportedShape;
use crate::number::Number;
use super::{
    add::{add, add_all, subtract},
    eval,
    expr::{Expr, Primary},
    multiply::{divide, multiply, multiply_all, negate, reciprocal},
    power::power,
    trig::{arctan, cosine, sine},
};

/// Returns the coefficient `b` if the expression is the imaginary number `b*i`.
fn imaginary_coefficient(expr: &Expr) -> Option<Number> {
    if expr.is_imaginary_unit() {
        return Some(Number::from(1i64));
    }

    match expr {
        Expr::Mul(factors) => match factors.as_slice() {
            [b, i] if i.is_imaginary_unit() => b.as_number().cloned(),
            _ => None,
        },
        _ => None,
    }
}

/// If the expression is a complex number `a + b*i` with numeric `a` and `b`, returns `(a, b)`.
///
/// The purely imaginary numbers `b*i` and `i` are also recognized, with `a = 0`.
pub(crate) fn complex_parts(expr: &Expr) -> Option<(Number, Number)> {
    if let Some(im) = imaginary_coefficient(expr) {
        return Some((Number::from(0i64), im));
    }

    match expr {
        Expr::Add(terms) => match terms.as_slice() {
            [re, im] => Some((re.as_number()?.clone(), imaginary_coefficient(im)?)),
            _ => None,
        },
        _ => None,
    }
}

/// Returns true if the expression contains a power in clock form: a power of `-1` other than `i`
/// itself, or a power whose base contains `i`.
pub fn has_clock_form(expr: &Expr) -> bool {
    expr.post_order_iter().any(|expr| match expr {
        Expr::Exp(base, _) if !expr.is_imaginary_unit() => base.is_minus_one() || base.contains(&I),
        _ => false,
    })
}

/// Returns true if the expression contains a power of `e` whose exponent contains `i`.
pub fn has_exponential_form(expr: &Expr) -> bool {
    expr.post_order_iter().any(|expr| match expr {
        Expr::Exp(base, exp) => **base == *E && exp.contains(&I),
        _ => false,
    })
}

/// Computes the complex conjugate of an expression, assuming every symbol is real.
pub fn conjugate(ctxt: &Ctxt, expr: &Expr) -> Result<Expr, Error> {
    match expr {
        Expr::Primary(Primary::Call(name, args)) => {
            let args = args
                .iter()
                .map(|arg| conjugate(ctxt, arg))
                .collect::<Result<Vec<_>, _>>()?;
            eval::call(ctxt, name, args)
        },
        Expr::Primary(Primary::Tensor(tensor)) => {
            Ok(tensor.try_map(|elem| conjugate(ctxt, elem))?.into())
        },
        Expr::Primary(_) => Ok(expr.clone()),
        Expr::Add(terms) => {
            let terms = terms
                .iter()
                .map(|term| conjugate(ctxt, term))
                .collect::<Result<Vec<_>, _>>()?;
            add_all(ctxt, terms)
        },
        Expr::Mul(factors) => {
            let factors = factors
                .iter()
                .map(|factor| conjugate(ctxt, factor))
                .collect::<Result<Vec<_>, _>>()?;
            multiply_all(ctxt, factors)
        },
        // conj((-1)^x) = (-1)^-x for real x
        Expr::Exp(base, exp) if base.is_minus_one() && exp.is_number() => {
            let exp = negate(ctxt, (**exp).clone())?;
            power(ctxt, MINUS_ONE.clone(), exp)
        },
        Expr::Exp(base, exp) => {
            let base = conjugate(ctxt, base)?;
            let exp = conjugate(ctxt, exp)?;
            power(ctxt, base, exp)
        },
    }
}

/// Converts an expression to rectangular form, `a + b*i`.
///
/// When variables are assumed to be real, symbols and expressions with no clock or exponential
/// forms are returned unchanged, and sums are converted term by term. Otherwise, the expression
/// is rewritten as `abs(z) * (cos(arg(z)) + i*sin(arg(z)))`.
pub fn rect(ctxt: &Ctxt, z: &Expr) -> Result<Expr, Error> {
    let real = ctxt.assume_real_variables;

    if z.as_symbol().is_some() {
        return Ok(if real { z.clone() } else { Expr::call("rect", vec![z.clone()]) });
    }

    let polar_trig = z.contains_call("sin") && z.contains_call("cos") && z.contains(&I);
    if real && !has_exponential_form(z) && !has_clock_form(z) && !polar_trig {
        return Ok(z.clone());
    }

    if let Expr::Mul(factors) = z {
        if real && factors.first().map(Expr::is_imaginary_unit).unwrap_or(false) {
            return Ok(z.clone());
        }
    }

    if let Expr::Add(terms) = z {
        let terms = terms
            .iter()
            .map(|term| rect(ctxt, term))
            .collect::<Result<Vec<_>, _>>()?;
        return add_all(ctxt, terms);
    }

    let magnitude = abs(ctxt, z)?;
    let angle = arg(ctxt, z)?;
    let re = cosine(ctxt, &angle)?;
    let im = multiply(ctxt, I.clone(), sine(ctxt, &angle)?)?;
    let unit = add(ctxt, re, im)?;
    multiply(ctxt, magnitude, unit)
}

/// Computes the absolute value of a real number, the magnitude of a complex number, or the length
/// of a vector.
///
/// Fails with [`UnsupportedShape`] for tensors of rank greater than 1.
pub fn abs(ctxt: &Ctxt, z: &Expr) -> Result<Expr, Error> {
    if let Some(num) = z.as_number() {
        return Ok(num.abs().into());
    }

    if *z == *PI || *z == *E {
        return Ok(z.clone());
    }

    if let Expr::Add(_) = z {
        if has_clock_form(z) || has_exponential_form(z) || z.contains(&I) {
            // abs(a + bi) = (a^2 + b^2)^(1/2)
            let z = rect(ctxt, z)?;
            let re = power(ctxt, real(ctxt, &z)?, TWO.clone())?;
            let im = power(ctxt, imag(ctxt, &z)?, TWO.clone())?;
            return power(ctxt, add(ctxt, re, im)?, ONE_HALF.clone());
        }
    }

    match z {
        Expr::Exp(base, _) if base.is_minus_one() => return Ok(Expr::integer(1)),
        Expr::Exp(base, exp) if exp.as_number().map(Number::is_positive).unwrap_or(false) => {
            let base = abs(ctxt, base)?;
            return power(ctxt, base, (**exp).clone());
        },
        Expr::Exp(base, exp) if **base == *E => {
            let exp = real(ctxt, exp)?;
            return power(ctxt, E.clone(), exp);
        },
        Expr::Mul(factors) => {
            let factors = factors
                .iter()
                .map(|factor| abs(ctxt, factor))
                .collect::<Result<Vec<_>, _>>()?;
            return multiply_all(ctxt, factors);
        },
        Expr::Primary(Primary::Call(name, args)) if name == "abs" => {
            return Ok(Expr::call("abs", args.clone()));
        },
        Expr::Primary(Primary::Tensor(tensor)) => {
            if tensor.rank() != 1 {
                return Err(Error::unspanned(UnsupportedShape {
                    operation: "abs",
                    rank: tensor.rank(),
                    expected: "a vector",
                }));
            }

            // abs(v) = (v . conj(v))^(1/2)
            let squares = tensor
                .elems()
                .iter()
                .map(|elem| multiply(ctxt, elem.clone(), conjugate(ctxt, elem)?))
                .collect::<Result<Vec<_>, _>>()?;
            return power(ctxt, add_all(ctxt, squares)?, ONE_HALF.clone());
        },
        _ => {},
    }

    let leading_negative = match z {
        Expr::Add(terms) => terms.first().map(Expr::is_negative_term).unwrap_or(false),
        z => z.is_negative_term(),
    };
    if leading_negative {
        return Ok(Expr::call("abs", vec![negate(ctxt, z.clone())?]));
    }

    Ok(Expr::call("abs", vec![z.clone()]))
}

/// Returns `pi` as a float if the given number is a float, or the symbol `pi` otherwise.
fn pi_like(num: &Number) -> Expr {
    if num.is_float() {
        Expr::float(std::f64::consts::PI)
    } else {
        PI.clone()
    }
}

/// Computes the argument (angle) of a complex number, in the range `(-pi, pi]`.
pub fn arg(ctxt: &Ctxt, z: &Expr) -> Result<Expr, Error> {
    match z {
        Expr::Primary(Primary::Number(num)) => {
            return Ok(if num.is_negative() { pi_like(num) } else { Expr::integer(0) });
        },
        Expr::Primary(Primary::Symbol(_)) if *z == *PI || *z == *E => {
            return Ok(Expr::integer(0));
        },
        // arg((-1)^x) = x*pi
        Expr::Exp(base, exp) if base.is_minus_one() => {
            return multiply(ctxt, (**exp).clone(), PI.clone());
        },
        // arg(e^x) = imag(x)
        Expr::Exp(base, exp) if **base == *E => return imag(ctxt, exp),
        Expr::Mul(factors) => {
            let args = factors
                .iter()
                .map(|factor| arg(ctxt, factor))
                .collect::<Result<Vec<_>, _>>()?;
            return add_all(ctxt, args);
        },
        Expr::Add(_) => {
            let z = rect(ctxt, z)?;
            let re = real(ctxt, &z)?;
            let im = imag(ctxt, &z)?;
            if re.is_zero() {
                let quarter = multiply(ctxt, ONE_HALF.clone(), PI.clone())?;
                return if im.is_negative_term() { negate(ctxt, quarter) } else { Ok(quarter) };
            }

            let angle = arctan(ctxt, &divide(ctxt, im.clone(), re.clone())?)?;
            if !re.is_negative_term() {
                return Ok(angle);
            }

            // quadrants II and III
            return if im.is_negative_term() {
                subtract(ctxt, angle, PI.clone())
            } else {
                add(ctxt, angle, PI.clone())
            };
        },
        _ => {},
    }

    if ctxt.assume_real_variables {
        Ok(Expr::integer(0))
    } else {
        Ok(Expr::call("arg", vec![z.clone()]))
    }
}

/// Computes the real part of a complex number: `(z + conj(z)) / 2`.
pub fn real(ctxt: &Ctxt, z: &Expr) -> Result<Expr, Error> {
    let z = rect(ctxt, z)?;
    let conj = conjugate(ctxt, &z)?;
    multiply(ctxt, add(ctxt, z, conj)?, ONE_HALF.clone())
}

/// Computes the imaginary part of a complex number: `(z - conj(z)) / 2i`.
pub fn imag(ctxt: &Ctxt, z: &Expr) -> Result<Expr, Error> {
    let z = rect(ctxt, z)?;
    let conj = conjugate(ctxt, &z)?;
    let twice = subtract(ctxt, z, conj)?;
    let inverse_i = reciprocal(ctxt, I.clone())?;
    multiply_all(ctxt, [twice, ONE_HALF.clone(), inverse_i])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbolic::tensor::Tensor;
    use pretty_assertions::assert_eq;

    fn sym(name: &str) -> Expr {
        Expr::symbol(name)
    }

    fn root(n: i64) -> Expr {
        Expr::Exp(Box::new(Expr::integer(n)), Box::new(ONE_HALF.clone()))
    }

    /// 3 + 4i
    fn three_four() -> Expr {
        Expr::Add(vec![Expr::integer(3), Expr::Mul(vec![Expr::integer(4), I.clone()])])
    }

    #[test]
    fn parts() {
        assert_eq!(complex_parts(&I), Some((Number::from(0i64), Number::from(1i64))));
        assert_eq!(complex_parts(&three_four()), Some((Number::from(3i64), Number::from(4i64))));
        assert_eq!(complex_parts(&sym("x")), None);
    }

    #[test]
    fn forms() {
        assert!(!has_clock_form(&I));
        assert!(has_clock_form(&Expr::Exp(Box::new(Expr::integer(-1)), Box::new(Expr::rational(1, 3)))));
        let exp = Expr::Exp(Box::new(E.clone()), Box::new(Expr::Mul(vec![I.clone(), sym("x")])));
        assert!(has_exponential_form(&exp));
        assert!(!has_exponential_form(&Expr::Exp(Box::new(E.clone()), Box::new(sym("x")))));
    }

    #[test]
    fn conjugate_of_complex_number() {
        let ctxt = Ctxt::default();
        assert_eq!(
            conjugate(&ctxt, &three_four()).unwrap(),
            Expr::Add(vec![Expr::integer(3), Expr::Mul(vec![Expr::integer(-4), I.clone()])]),
        );
        assert_eq!(conjugate(&ctxt, &sym("x")).unwrap(), sym("x"));
    }

    #[test]
    fn real_and_imaginary_parts() {
        let ctxt = Ctxt::default();
        assert_eq!(real(&ctxt, &three_four()).unwrap(), Expr::integer(3));
        assert_eq!(imag(&ctxt, &three_four()).unwrap(), Expr::integer(4));
        assert_eq!(imag(&ctxt, &sym("x")).unwrap(), Expr::integer(0));
    }

    #[test]
    fn magnitude() {
        let ctxt = Ctxt::default();
        assert_eq!(abs(&ctxt, &three_four()).unwrap(), Expr::integer(5));
        assert_eq!(abs(&ctxt, &Expr::rational(-2, 3)).unwrap(), Expr::rational(2, 3));
        assert_eq!(abs(&ctxt, &I).unwrap(), Expr::integer(1));

        let one_plus_i = Expr::Add(vec![Expr::integer(1), I.clone()]);
        assert_eq!(abs(&ctxt, &one_plus_i).unwrap(), root(2));
    }

    #[test]
    fn symbolic_magnitude() {
        let ctxt = Ctxt::default();
        let x = sym("x");
        assert_eq!(abs(&ctxt, &x).unwrap(), Expr::call("abs", vec![x.clone()]));

        let neg_x = Expr::Mul(vec![Expr::integer(-1), x.clone()]);
        assert_eq!(abs(&ctxt, &neg_x).unwrap(), Expr::call("abs", vec![x.clone()]));

        let abs_x = abs(&ctxt, &x).unwrap();
        assert_eq!(abs(&ctxt, &abs_x).unwrap(), abs_x);
    }

    #[test]
    fn vector_length() {
        let ctxt = Ctxt::default();
        let v = Tensor::vector(vec![Expr::integer(3), Expr::integer(4)]).unwrap();
        assert_eq!(abs(&ctxt, &v.into()).unwrap(), Expr::integer(5));

        let m = Tensor::identity(2);
        let err = abs(&ctxt, &m.into()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<UnsupportedShape>().map(|kind| (kind.operation, kind.rank)),
            Some(("abs", 2)),
        );
    }

    #[test]
    fn argument() {
        let ctxt = Ctxt::default();
        assert_eq!(arg(&ctxt, &Expr::integer(-2)).unwrap(), PI.clone());
        assert_eq!(arg(&ctxt, &I).unwrap(), Expr::Mul(vec![ONE_HALF.clone(), PI.clone()]));

        // arg(-1 - i) = -3pi/4
        let z = Expr::Add(vec![Expr::integer(-1), Expr::Mul(vec![Expr::integer(-1), I.clone()])]);
        assert_eq!(arg(&ctxt, &z).unwrap(), Expr::Mul(vec![Expr::rational(-3, 4), PI.clone()]));

        assert_eq!(arg(&ctxt, &sym("x")).unwrap(), Expr::integer(0));
        let ctxt = ctxt.with_assume_real_variables(false);
        assert_eq!(arg(&ctxt, &sym("x")).unwrap(), Expr::call("arg", vec![sym("x")]));
    }

    #[test]
    fn rebuilt_from_magnitude_and_argument() {
        let ctxt = Ctxt::default();
        for (re, im) in [(1, 1), (-1, -1), (-1, 1)] {
            let z = add(
                &ctxt,
                Expr::integer(re),
                multiply(&ctxt, Expr::integer(im), I.clone()).unwrap(),
            ).unwrap();

            // z = abs(z) * (cos(arg(z)) + i*sin(arg(z)))
            let magnitude = abs(&ctxt, &z).unwrap();
            let angle = arg(&ctxt, &z).unwrap();
            let unit = add(
                &ctxt,
                cosine(&ctxt, &angle).unwrap(),
                multiply(&ctxt, I.clone(), sine(&ctxt, &angle).unwrap()).unwrap(),
            ).unwrap();
            assert_eq!(multiply(&ctxt, magnitude, unit).unwrap(), z, "{}", z);
        }

        // 1 + i = abs(1 + i) * (-1)^(arg(1 + i)/pi)
        let z = Expr::Add(vec![Expr::integer(1), I.clone()]);
        let turns = divide(&ctxt, arg(&ctxt, &z).unwrap(), PI.clone()).unwrap();
        let clock = power(&ctxt, Expr::integer(-1), turns).unwrap();
        assert_eq!(multiply(&ctxt, abs(&ctxt, &z).unwrap(), clock).unwrap(), z);
    }

    #[test]
    fn rectangular_form() {
        let ctxt = Ctxt::default();

        // (-1)^(1/4) = 2^(1/2)/2 + i*2^(1/2)/2
        let clock = Expr::Exp(Box::new(Expr::integer(-1)), Box::new(Expr::rational(1, 4)));
        assert_eq!(rect(&ctxt, &clock).unwrap(), Expr::Add(vec![
            Expr::Mul(vec![ONE_HALF.clone(), I.clone(), root(2)]),
            Expr::Mul(vec![ONE_HALF.clone(), root(2)]),
        ]));

        assert_eq!(rect(&ctxt, &three_four()).unwrap(), three_four());

        let ctxt = ctxt.with_assume_real_variables(false);
        assert_eq!(rect(&ctxt, &sym("x")).unwrap(), Expr::call("rect", vec![sym("x")]));
    }
}
