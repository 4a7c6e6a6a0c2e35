//! The power normalizer.
//!
//! [`power`] normalizes `base^exponent` by trying a cascade of identities in a fixed order. The
//! first identity that applies produces the result, which is normalized recursively where needed.
//! If no identity applies, the power is returned unreduced as an [`Expr::Exp`].
//!
//! Each identity is a function with the signature of [`Rule`], returning `Ok(Some(expr))` when
//! it applies. The identities, in order:
//!
//! 1. `1^x = 1`, `x^0 = 1`, `x^1 = x`, `(-1)^-1 = -1`, `(-1)^(1/2) = i`, `(-1)^(-1/2) = -i`
//! 2. `(-1)^(p/q)` is converted to rectangular form.
//! 3. Powers of numbers are computed exactly, or as floats if either number is a float.
//! 4. Non-negative integer powers of square matrices are computed.
//! 5. `abs(x)^(2n) = x^(2n)` when variables are assumed to be real.
//! 6. `e^log(x) = x`, and `e^x` is computed for a float `x`.
//! 7. `e^x`, where `x` contains `i` and `pi`, is converted to rectangular form.
//! 8. `(ab)^n = a^n * b^n` for an integer `n`.
//! 9. `(a^b)^c = a^(bc)` when `c` is an integer or `a` is a positive number.
//! 10. `(a^(2n))^(1/(2n)) = abs(a)`
//! 11. `(a + b + ...)^n` is expanded when the context is expanding.
//! 12. Even powers of `sin` or `cos` are rewritten according to the trigonometric mode.
//! 13. Integer and non-integer powers of complex numbers `a + bi`.
//! 14. `e^(n/2 * i * pi)` is one of `1`, `i`, `-1` or `-i`.

mod multinomial;
mod numeric;
pub mod step;

use cas_error::Error;
use crate::consts::{E, I, MINUS_ONE, ONE_HALF, PI};
use crate::ctxt::Ctxt;
use crate::number::Number;
use crate::trig_mode::TrigMode;
use rug::{Integer, Rational};
use std::cmp::Ordering;
use super::{
    add::{add, subtract},
    complex,
    expr::Expr,
    multiply::{divide, multiply, multiply_all},
    step_collector::StepCollector,
    trig,
};
use step::Step;

/// The signature of an identity in the cascade.
type Rule = fn(&Ctxt, &Expr, &Expr, &mut dyn StepCollector<Step>) -> Result<Option<Expr>, Error>;

/// The identities, in the order they are tried.
const RULES: &[Rule] = &[
    degenerate,
    clock_form,
    numeric,
    tensor,
    abs_even_power,
    exp,
    euler_rect,
    distribute_power,
    power_power,
    power_abs,
    multinomial,
    trig_square,
    complex_power,
    quarter_turn,
];

/// `1^x = 1`, `x^0 = 1`, `x^1 = x`, `(-1)^-1 = -1`, `(-1)^(1/2) = i`, `(-1)^(-1/2) = -i`
fn degenerate(
    ctxt: &Ctxt,
    base: &Expr,
    exponent: &Expr,
    steps: &mut dyn StepCollector<Step>,
) -> Result<Option<Expr>, Error> {
    if base.is_one() {
        steps.push(Step::PowerOneLeft);
        return Ok(Some(Expr::integer(1)));
    }

    if exponent.is_zero() {
        steps.push(Step::PowerZero);
        return Ok(Some(Expr::integer(1)));
    }

    if exponent.is_one() {
        steps.push(Step::PowerOne);
        return Ok(Some(base.clone()));
    }

    if !base.is_minus_one() {
        return Ok(None);
    }

    if exponent.is_minus_one() {
        steps.push(Step::MinusOneInverse);
        return Ok(Some(Expr::integer(-1)));
    }

    if *exponent == *ONE_HALF {
        steps.push(Step::ImaginaryUnit);
        return Ok(Some(I.clone()));
    }

    if *exponent == Expr::rational(-1, 2) {
        steps.push(Step::ImaginaryUnit);
        return multiply(ctxt, Expr::integer(-1), I.clone()).map(Some);
    }

    Ok(None)
}

/// `(-1)^(p/q)` for a positive non-integer rational `p/q`, converted to rectangular form.
///
/// `(-1)^t` has period `2`, so with `r = p mod 2q`, the power is `(-1)^(r/q)` if `r < q`, and
/// `-1 * (-1)^((r - q)/q)` otherwise.
fn clock_form(
    ctxt: &Ctxt,
    base: &Expr,
    exponent: &Expr,
    steps: &mut dyn StepCollector<Step>,
) -> Result<Option<Expr>, Error> {
    if ctxt.evaluating_floats || base.as_rational().map(|b| *b != -1).unwrap_or(true) {
        return Ok(None);
    }
    let Some(exponent) = exponent.as_rational() else {
        return Ok(None);
    };
    if *exponent.denom() == 1 || exponent.cmp0() != Ordering::Greater {
        return Ok(None);
    }

    let (p, q) = (exponent.numer(), exponent.denom());
    let r = Integer::from(p % Integer::from(q * 2u32));
    let (turn, negated) = if r < *q {
        (Rational::from((r, q.clone())), false)
    } else {
        (Rational::from((r - q, q.clone())), true)
    };

    steps.push(Step::ClockForm);
    let clock = Expr::Exp(Box::new(base.clone()), Box::new(turn.into()));
    let root = complex::rect(ctxt, &clock)?;
    if negated {
        multiply(ctxt, base.clone(), root).map(Some)
    } else {
        Ok(Some(root))
    }
}

/// Powers of two numbers.
fn numeric(
    ctxt: &Ctxt,
    base: &Expr,
    exponent: &Expr,
    steps: &mut dyn StepCollector<Step>,
) -> Result<Option<Expr>, Error> {
    if let (Some(base), Some(exponent)) = (base.as_rational(), exponent.as_rational()) {
        // roots of -1 are left to the clock form
        if *base == -1 && *exponent.denom() != 1 {
            return Ok(None);
        }
        steps.push(Step::RationalPower);
        return numeric::qpow(ctxt, base, exponent).map(Some);
    }

    if let (Some(base), Some(exponent)) = (base.as_number(), exponent.as_number()) {
        let result = numeric::float_power(ctxt, base, exponent)?;
        if result.is_some() {
            steps.push(Step::FloatPower);
        }
        return Ok(result);
    }

    Ok(None)
}

/// Integer powers of square matrices.
fn tensor(
    ctxt: &Ctxt,
    base: &Expr,
    exponent: &Expr,
    steps: &mut dyn StepCollector<Step>,
) -> Result<Option<Expr>, Error> {
    let Some(tensor) = base.as_tensor() else {
        return Ok(None);
    };

    let result = tensor.power(ctxt, exponent)?;
    if result.is_some() {
        steps.push(Step::TensorPower);
    }
    Ok(result.map(Expr::from))
}

/// `abs(x)^(2n) = x^(2n)` for real `x`.
fn abs_even_power(
    ctxt: &Ctxt,
    base: &Expr,
    exponent: &Expr,
    steps: &mut dyn StepCollector<Step>,
) -> Result<Option<Expr>, Error> {
    if !ctxt.assume_real_variables || !exponent.is_even_integer() {
        return Ok(None);
    }
    let Some([arg]) = base.as_call("abs") else {
        return Ok(None);
    };

    steps.push(Step::AbsEvenPower);
    power(ctxt, arg.clone(), exponent.clone()).map(Some)
}

/// `e^log(x) = x`, and `e^x` for a float `x`.
fn exp(
    _: &Ctxt,
    base: &Expr,
    exponent: &Expr,
    steps: &mut dyn StepCollector<Step>,
) -> Result<Option<Expr>, Error> {
    if *base != *E {
        return Ok(None);
    }

    if let Some([arg]) = exponent.as_call("log") {
        steps.push(Step::ExpLog);
        return Ok(Some(arg.clone()));
    }

    if let Some(Number::Float(x)) = exponent.as_number() {
        let result = Number::float(x.exp()).map(Expr::from);
        if result.is_some() {
            steps.push(Step::ExpFloat);
        }
        return Ok(result);
    }

    Ok(None)
}

/// `e^x`, where `x` contains both `i` and `pi`, in rectangular form. Applies only if the
/// rectangular form no longer contains `pi`.
fn euler_rect(
    ctxt: &Ctxt,
    base: &Expr,
    exponent: &Expr,
    steps: &mut dyn StepCollector<Step>,
) -> Result<Option<Expr>, Error> {
    if *base != *E || ctxt.evaluating_polar || !exponent.contains(&I) || !exponent.contains(&PI) {
        return Ok(None);
    }

    let exp = Expr::Exp(Box::new(base.clone()), Box::new(exponent.clone()));
    let rect = complex::rect(ctxt, &exp)?;
    if rect.contains(&PI) {
        return Ok(None);
    }

    steps.push(Step::EulerRect);
    Ok(Some(rect))
}

/// `(ab)^n = a^n * b^n` for an integer `n`.
fn distribute_power(
    ctxt: &Ctxt,
    base: &Expr,
    exponent: &Expr,
    steps: &mut dyn StepCollector<Step>,
) -> Result<Option<Expr>, Error> {
    let Expr::Mul(factors) = base else {
        return Ok(None);
    };
    if !exponent.is_integer() {
        return Ok(None);
    }

    let factors = factors
        .iter()
        .map(|factor| power(ctxt, factor.clone(), exponent.clone()))
        .collect::<Result<Vec<_>, _>>()?;
    steps.push(Step::DistributePower);
    multiply_all(ctxt, factors).map(Some)
}

/// `(a^b)^c = a^(bc)`, when `c` is an integer or `a` is a positive number.
fn power_power(
    ctxt: &Ctxt,
    base: &Expr,
    exponent: &Expr,
    steps: &mut dyn StepCollector<Step>,
) -> Result<Option<Expr>, Error> {
    let Expr::Exp(a, b) = base else {
        return Ok(None);
    };
    let a_is_positive = a.as_number().map(Number::is_positive).unwrap_or(false);
    if !exponent.is_integer() && !a_is_positive {
        return Ok(None);
    }

    steps.push(Step::PowerPower);
    let exponent = multiply(ctxt, (**b).clone(), exponent.clone())?;
    power(ctxt, (**a).clone(), exponent).map(Some)
}

/// `(a^b)^c = abs(a)`, when `b` is an even integer and `bc = 1`.
fn power_abs(
    ctxt: &Ctxt,
    base: &Expr,
    exponent: &Expr,
    steps: &mut dyn StepCollector<Step>,
) -> Result<Option<Expr>, Error> {
    let Expr::Exp(a, b) = base else {
        return Ok(None);
    };
    if !b.is_even_integer() || !multiply(ctxt, (**b).clone(), exponent.clone())?.is_one() {
        return Ok(None);
    }

    steps.push(Step::PowerAbs);
    complex::abs(ctxt, a).map(Some)
}

/// `(a + b + ...)^n` for an integer `n > 1`, expanded with the multinomial theorem.
fn multinomial(
    ctxt: &Ctxt,
    base: &Expr,
    exponent: &Expr,
    steps: &mut dyn StepCollector<Step>,
) -> Result<Option<Expr>, Error> {
    if !ctxt.expanding {
        return Ok(None);
    }
    let Expr::Add(terms) = base else {
        return Ok(None);
    };
    let Some(n) = exponent.as_integer().and_then(Integer::to_u32).filter(|&n| n > 1) else {
        return Ok(None);
    };

    steps.push(Step::Multinomial);
    multinomial::expand(ctxt, terms, n).map(Some)
}

/// `sin(x)^(2n) = (1 - cos(x)^2)^n` in cosine mode, and `cos(x)^(2n) = (1 - sin(x)^2)^n` in
/// sine mode.
fn trig_square(
    ctxt: &Ctxt,
    base: &Expr,
    exponent: &Expr,
    steps: &mut dyn StepCollector<Step>,
) -> Result<Option<Expr>, Error> {
    if !exponent.is_even_integer() {
        return Ok(None);
    }

    let complement = match ctxt.trig_mode {
        TrigMode::Cosine => match base.as_call("sin") {
            Some([x]) => trig::cosine(ctxt, x)?,
            _ => return Ok(None),
        },
        TrigMode::Sine => match base.as_call("cos") {
            Some([x]) => trig::sine(ctxt, x)?,
            _ => return Ok(None),
        },
        TrigMode::Mixed => return Ok(None),
    };

    steps.push(Step::TrigSquare);
    let square = power(ctxt, complement, Expr::integer(2))?;
    let base = subtract(ctxt, Expr::integer(1), square)?;
    let exponent = multiply(ctxt, exponent.clone(), ONE_HALF.clone())?;
    power(ctxt, base, exponent).map(Some)
}

/// Multiplies two complex numbers given by their parts, returning [`None`] if a float part
/// overflows.
fn complex_mul((a, b): &(Number, Number), (c, d): &(Number, Number)) -> Option<(Number, Number)> {
    let ac = a.clone().checked_mul(c.clone())?;
    let bd = b.clone().checked_mul(d.clone())?;
    let ad = a.clone().checked_mul(d.clone())?;
    let bc = b.clone().checked_mul(c.clone())?;
    Some((ac.checked_add(-bd)?, ad.checked_add(bc)?))
}

/// `(a + bi)^n` for a positive integer `n`, by repeated squaring.
fn complex_parts_pow(parts: (Number, Number), n: &Integer) -> Option<(Number, Number)> {
    let mut n = n.to_u32()?;
    let mut square = parts;
    let mut acc = (Number::from(1i64), Number::from(0i64));
    while n > 0 {
        if n & 1 == 1 {
            acc = complex_mul(&acc, &square)?;
        }
        n >>= 1;
        if n > 0 {
            square = complex_mul(&square, &square)?;
        }
    }
    Some(acc)
}

/// Integer and non-integer numeric powers of a complex number `a + bi`.
///
/// Positive integer powers only reach this identity when the context is not expanding.
fn complex_power(
    ctxt: &Ctxt,
    base: &Expr,
    exponent: &Expr,
    steps: &mut dyn StepCollector<Step>,
) -> Result<Option<Expr>, Error> {
    let Some((re, im)) = complex::complex_parts(base) else {
        return Ok(None);
    };

    if let Some(n) = exponent.as_integer() {
        if n.cmp0() == Ordering::Greater {
            let Some((re, im)) = complex_parts_pow((re, im), n) else {
                return Ok(None);
            };
            let im = multiply(ctxt, im.into(), I.clone())?;
            steps.push(Step::ComplexIntegerPower);
            return add(ctxt, re.into(), im).map(Some);
        }

        // (a + bi)^-n = ((a - bi) / (a^2 + b^2))^n
        let norm = complex_mul(&(re.clone(), im.clone()), &(re.clone(), -im.clone()))
            .map(|(norm, _)| norm);
        let Some(inverse_norm) = norm.and_then(|norm| norm.recip()) else {
            return Ok(None);
        };
        let conj_im = multiply(ctxt, (-im).into(), I.clone())?;
        let conj = add(ctxt, re.into(), conj_im)?;
        let inverse = multiply(ctxt, conj, inverse_norm.into())?;

        steps.push(Step::ComplexInverse);
        return power(ctxt, inverse, Expr::from(Integer::from(-n))).map(Some);
    }

    let Some(e) = exponent.as_number() else {
        return Ok(None);
    };

    let floats = ctxt.evaluating_floats || ((re.is_float() || im.is_float()) && e.is_float());
    let pi = if floats { Expr::float(std::f64::consts::PI) } else { PI.clone() };

    // z^e = abs(z)^e * (-1)^(arg(z) * e / pi)
    let magnitude = power(ctxt, complex::abs(ctxt, base)?, exponent.clone())?;
    let turns = multiply(ctxt, complex::arg(ctxt, base)?, exponent.clone())?;
    let turns = divide(ctxt, turns, pi)?;
    let rotation = power(ctxt, MINUS_ONE.clone(), turns)?;
    let result = multiply(ctxt, magnitude, rotation)?;

    if ctxt.avoid_arctan_powers && result.contains_call("arctan") {
        return Ok(None);
    }

    steps.push(Step::ComplexPower);
    Ok(Some(result))
}

/// If the expression is `c * i * pi`, where `2c` is an integer, returns the value of `e` raised
/// to it: `1`, `i`, `-1` or `-i`.
fn quarter_turn_value(ctxt: &Ctxt, expr: &Expr) -> Result<Option<Expr>, Error> {
    let Expr::Mul(factors) = expr else {
        return Ok(None);
    };

    let coeff = match factors.as_slice() {
        [i, pi] if i.is_imaginary_unit() && *pi == *PI => Rational::from(1),
        [c, i, pi] if i.is_imaginary_unit() && *pi == *PI => match c.as_rational() {
            Some(c) => c.clone(),
            None => return Ok(None),
        },
        _ => return Ok(None),
    };

    let twice = coeff * 2u32;
    if *twice.denom() != 1 {
        return Ok(None);
    }

    let quarter = twice.numer().mod_u(4);
    let value = match quarter {
        0 => Expr::integer(1),
        1 => I.clone(),
        2 => Expr::integer(-1),
        _ => multiply(ctxt, Expr::integer(-1), I.clone())?,
    };
    Ok(Some(value))
}

/// `e^(n/2 * i * pi)` is one of `1`, `i`, `-1` or `-i`. If the exponent is a sum, the first
/// such term is split off: `e^(n/2 * i * pi + x) = e^(n/2 * i * pi) * e^x`.
fn quarter_turn(
    ctxt: &Ctxt,
    base: &Expr,
    exponent: &Expr,
    steps: &mut dyn StepCollector<Step>,
) -> Result<Option<Expr>, Error> {
    if *base != *E {
        return Ok(None);
    }

    if let Some(value) = quarter_turn_value(ctxt, exponent)? {
        steps.push(Step::QuarterTurn);
        return Ok(Some(value));
    }

    let Expr::Add(terms) = exponent else {
        return Ok(None);
    };
    for term in terms {
        if let Some(value) = quarter_turn_value(ctxt, term)? {
            steps.push(Step::QuarterTurn);
            let rest = subtract(ctxt, exponent.clone(), term.clone())?;
            let rest = power(ctxt, E.clone(), rest)?;
            return multiply(ctxt, value, rest).map(Some);
        }
    }

    Ok(None)
}

/// Normalizes `base^exponent`, reporting the identity applied at the top level to the given step
/// collector.
///
/// ```
/// use cas_algebra::{Ctxt, symbolic::{expr::Expr, power_with_steps, Step}};
///
/// let ctxt = Ctxt::default();
/// let mut steps = Vec::new();
/// let result = power_with_steps(&ctxt, Expr::symbol("x"), Expr::integer(0), &mut steps).unwrap();
/// assert_eq!(result, Expr::integer(1));
/// assert_eq!(steps, vec![Step::PowerZero]);
/// ```
pub fn power_with_steps(
    ctxt: &Ctxt,
    base: Expr,
    exponent: Expr,
    steps: &mut dyn StepCollector<Step>,
) -> Result<Expr, Error> {
    for rule in RULES {
        if let Some(result) = rule(ctxt, &base, &exponent, steps)? {
            return Ok(result);
        }
    }

    steps.push(Step::Unreduced);
    Ok(Expr::Exp(Box::new(base), Box::new(exponent)))
}

/// Normalizes `base^exponent`.
///
/// This never fails for mathematical reasons: a power that cannot be simplified, such as `0^-1`
/// or `x^y`, is returned unreduced. It fails only if the computation is interrupted, or if the
/// base is a tensor that cannot be raised to a power.
pub fn power(ctxt: &Ctxt, base: Expr, exponent: Expr) -> Result<Expr, Error> {
    power_with_steps(ctxt, base, exponent, &mut ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Interrupted, UnsupportedShape};
    use crate::symbolic::tensor::Tensor;
    use pretty_assertions::assert_eq;

    fn sym(name: &str) -> Expr {
        Expr::symbol(name)
    }

    fn pow(base: Expr, exp: Expr) -> Expr {
        Expr::Exp(Box::new(base), Box::new(exp))
    }

    fn steps_of(ctxt: &Ctxt, base: Expr, exponent: Expr) -> (Expr, Vec<Step>) {
        let mut steps = Vec::new();
        let result = power_with_steps(ctxt, base, exponent, &mut steps).unwrap();
        (result, steps)
    }

    #[test]
    fn degenerate_powers() {
        let ctxt = Ctxt::default();
        let x = sym("x");
        assert_eq!(steps_of(&ctxt, x.clone(), Expr::integer(0)), (Expr::integer(1), vec![Step::PowerZero]));
        assert_eq!(steps_of(&ctxt, x.clone(), Expr::integer(1)), (x.clone(), vec![Step::PowerOne]));
        assert_eq!(steps_of(&ctxt, Expr::integer(1), x.clone()), (Expr::integer(1), vec![Step::PowerOneLeft]));
        assert_eq!(power(&ctxt, Expr::integer(0), Expr::integer(0)).unwrap(), Expr::integer(1));
        assert_eq!(power(&ctxt, Expr::integer(-1), Expr::integer(-1)).unwrap(), Expr::integer(-1));
    }

    #[test]
    fn imaginary_unit() {
        let ctxt = Ctxt::default();
        assert_eq!(power(&ctxt, Expr::integer(-1), Expr::rational(1, 2)).unwrap(), I.clone());
        assert_eq!(
            power(&ctxt, Expr::integer(-1), Expr::rational(-1, 2)).unwrap(),
            Expr::Mul(vec![Expr::integer(-1), I.clone()]),
        );
        assert_eq!(power(&ctxt, I.clone(), Expr::integer(2)).unwrap(), Expr::integer(-1));
    }

    #[test]
    fn cube_root_of_minus_one() {
        let ctxt = Ctxt::default();
        let (result, steps) = steps_of(&ctxt, Expr::integer(-1), Expr::rational(1, 3));
        assert_eq!(result, Expr::Add(vec![
            Expr::rational(1, 2),
            Expr::Mul(vec![
                Expr::rational(1, 2),
                I.clone(),
                pow(Expr::integer(3), ONE_HALF.clone()),
            ]),
        ]));
        assert_eq!(steps, vec![Step::ClockForm]);
    }

    #[test]
    fn clock_form_has_period_two() {
        let ctxt = Ctxt::default();
        let minus_one = || Expr::integer(-1);

        assert_eq!(power(&ctxt, minus_one(), Expr::rational(5, 2)).unwrap(), I.clone());
        assert_eq!(
            power(&ctxt, minus_one(), Expr::rational(7, 3)).unwrap(),
            power(&ctxt, minus_one(), Expr::rational(1, 3)).unwrap(),
        );
        assert_eq!(
            power(&ctxt, minus_one(), Expr::rational(5, 3)).unwrap(),
            multiply(&ctxt, minus_one(), power(&ctxt, minus_one(), Expr::rational(2, 3)).unwrap())
                .unwrap(),
        );
        assert_eq!(
            power(&ctxt, minus_one(), Expr::rational(3, 2)).unwrap(),
            Expr::Mul(vec![Expr::integer(-1), I.clone()]),
        );
    }

    #[test]
    fn powers_of_i_cycle() {
        let ctxt = Ctxt::default();
        let minus_i = Expr::Mul(vec![Expr::integer(-1), I.clone()]);
        let expected = [I.clone(), Expr::integer(-1), minus_i.clone(), Expr::integer(1)];
        for (n, expected) in (1..=8).zip(expected.iter().cycle()) {
            assert_eq!(power(&ctxt, I.clone(), Expr::integer(n)).unwrap(), *expected, "i^{}", n);
        }

        // i * i * i * i * i
        assert_eq!(multiply_all(&ctxt, vec![I.clone(); 5]).unwrap(), I.clone());
    }

    #[test]
    fn clock_form_kept_when_evaluating_floats() {
        let ctxt = Ctxt::default().with_evaluating_floats(true);
        let (result, steps) = steps_of(&ctxt, Expr::integer(-1), Expr::rational(1, 3));
        assert_eq!(result, pow(Expr::integer(-1), Expr::rational(1, 3)));
        assert_eq!(steps, vec![Step::Unreduced]);
    }

    #[test]
    fn rational_roots() {
        let ctxt = Ctxt::default();
        assert_eq!(power(&ctxt, Expr::integer(4), ONE_HALF.clone()).unwrap(), Expr::integer(2));
        assert_eq!(
            power(&ctxt, Expr::integer(-4), ONE_HALF.clone()).unwrap(),
            Expr::Mul(vec![Expr::integer(2), I.clone()]),
        );
        assert_eq!(
            power(&ctxt, Expr::integer(0), Expr::integer(-1)).unwrap(),
            pow(Expr::integer(0), Expr::integer(-1)),
        );
    }

    #[test]
    fn float_powers() {
        let ctxt = Ctxt::default();
        let (result, steps) = steps_of(&ctxt, Expr::float(2.0), Expr::integer(10));
        assert_eq!(result, Expr::float(1024.0));
        assert_eq!(steps, vec![Step::FloatPower]);
    }

    #[test]
    fn distribute_over_product() {
        let ctxt = Ctxt::default();
        let (x, y) = (sym("x"), sym("y"));
        let product = Expr::Mul(vec![x.clone(), y.clone()]);
        assert_eq!(
            power(&ctxt, product, Expr::integer(2)).unwrap(),
            Expr::Mul(vec![pow(x.clone(), Expr::integer(2)), pow(y, Expr::integer(2))]),
        );

        let scaled = Expr::Mul(vec![Expr::integer(3), x.clone()]);
        assert_eq!(
            power(&ctxt, scaled, Expr::integer(-1)).unwrap(),
            Expr::Mul(vec![Expr::rational(1, 3), pow(x, Expr::integer(-1))]),
        );
    }

    #[test]
    fn power_of_power() {
        let ctxt = Ctxt::default();
        let x = sym("x");
        let square = pow(x.clone(), Expr::integer(2));
        assert_eq!(
            power(&ctxt, square.clone(), Expr::integer(3)).unwrap(),
            pow(x.clone(), Expr::integer(6)),
        );

        // (x^2)^(1/2) = abs(x), not x
        let (result, steps) = steps_of(&ctxt, square.clone(), ONE_HALF.clone());
        assert_eq!(result, Expr::call("abs", vec![x.clone()]));
        assert_eq!(steps, vec![Step::PowerAbs]);

        // (x^(1/2))^(1/3) is not simplified for a symbolic base
        let root = pow(x.clone(), ONE_HALF.clone());
        assert_eq!(
            power(&ctxt, root.clone(), Expr::rational(1, 3)).unwrap(),
            pow(root, Expr::rational(1, 3)),
        );
    }

    #[test]
    fn abs_even_power() {
        let ctxt = Ctxt::default();
        let abs_x = Expr::call("abs", vec![sym("x")]);
        assert_eq!(
            power(&ctxt, abs_x.clone(), Expr::integer(2)).unwrap(),
            pow(sym("x"), Expr::integer(2)),
        );

        let ctxt = ctxt.with_assume_real_variables(false);
        assert_eq!(
            power(&ctxt, abs_x.clone(), Expr::integer(2)).unwrap(),
            pow(abs_x, Expr::integer(2)),
        );
    }

    #[test]
    fn exp_of_log() {
        let ctxt = Ctxt::default();
        let log_y = Expr::call("log", vec![sym("y")]);
        assert_eq!(power(&ctxt, E.clone(), log_y).unwrap(), sym("y"));
        assert_eq!(power(&ctxt, E.clone(), Expr::float(0.0)).unwrap(), Expr::integer(1));
        assert_eq!(power(&ctxt, E.clone(), Expr::float(1.0)).unwrap(), E.clone());
    }

    #[test]
    fn binomial_expansion() {
        let ctxt = Ctxt::default();
        let (a, b) = (sym("a"), sym("b"));
        let sum = Expr::Add(vec![a.clone(), b.clone()]);
        let (result, steps) = steps_of(&ctxt, sum.clone(), Expr::integer(2));
        assert_eq!(result, Expr::Add(vec![
            Expr::Mul(vec![Expr::integer(2), a.clone(), b.clone()]),
            pow(a, Expr::integer(2)),
            pow(b, Expr::integer(2)),
        ]));
        assert_eq!(steps, vec![Step::Multinomial]);

        let ctxt = ctxt.with_expanding(false);
        assert_eq!(power(&ctxt, sum.clone(), Expr::integer(2)).unwrap(), pow(sum, Expr::integer(2)));
    }

    #[test]
    fn trig_modes() {
        let x = sym("x");
        let sin_x = Expr::call("sin", vec![x.clone()]);
        let cos_x = Expr::call("cos", vec![x.clone()]);

        let mixed = Ctxt::default();
        assert_eq!(
            power(&mixed, sin_x.clone(), Expr::integer(2)).unwrap(),
            pow(sin_x.clone(), Expr::integer(2)),
        );

        let cosine = Ctxt::default().with_trig_mode(TrigMode::Cosine);
        assert_eq!(
            power(&cosine, sin_x.clone(), Expr::integer(2)).unwrap(),
            Expr::Add(vec![
                Expr::integer(1),
                Expr::Mul(vec![Expr::integer(-1), pow(cos_x.clone(), Expr::integer(2))]),
            ]),
        );

        let sine = Ctxt::default().with_trig_mode(TrigMode::Sine);
        assert_eq!(
            power(&sine, cos_x, Expr::integer(2)).unwrap(),
            Expr::Add(vec![
                Expr::integer(1),
                Expr::Mul(vec![Expr::integer(-1), pow(sin_x, Expr::integer(2))]),
            ]),
        );
    }

    #[test]
    fn complex_inverse() {
        // 1 / (1 + i) = 1/2 - i/2
        let ctxt = Ctxt::default();
        let z = Expr::Add(vec![Expr::integer(1), I.clone()]);
        let (result, steps) = steps_of(&ctxt, z, Expr::integer(-1));
        assert_eq!(result, Expr::Add(vec![
            Expr::rational(1, 2),
            Expr::Mul(vec![Expr::rational(-1, 2), I.clone()]),
        ]));
        assert_eq!(steps, vec![Step::ComplexInverse]);
    }

    #[test]
    fn complex_integer_power_without_expanding() {
        let ctxt = Ctxt::default().with_expanding(false);
        let z = Expr::Add(vec![Expr::integer(1), I.clone()]);

        // (1 + i)^2 = 2i
        let (result, steps) = steps_of(&ctxt, z.clone(), Expr::integer(2));
        assert_eq!(result, Expr::Mul(vec![Expr::integer(2), I.clone()]));
        assert_eq!(steps, vec![Step::ComplexIntegerPower]);

        // (1 + i)^3 = -2 + 2i
        assert_eq!(
            power(&ctxt, z.clone(), Expr::integer(3)).unwrap(),
            Expr::Add(vec![Expr::integer(-2), Expr::Mul(vec![Expr::integer(2), I.clone()])]),
        );

        // (1 + i)^-2 = -i/2
        let (result, steps) = steps_of(&ctxt, z, Expr::integer(-2));
        assert_eq!(result, Expr::Mul(vec![Expr::rational(-1, 2), I.clone()]));
        assert_eq!(steps, vec![Step::ComplexInverse]);
    }

    #[test]
    fn complex_root() {
        // i^(1/3) = 3^(1/2)/2 + i/2
        let ctxt = Ctxt::default();
        let (result, steps) = steps_of(&ctxt, I.clone(), Expr::rational(1, 3));
        assert_eq!(result, Expr::Add(vec![
            Expr::Mul(vec![Expr::rational(1, 2), I.clone()]),
            Expr::Mul(vec![Expr::rational(1, 2), pow(Expr::integer(3), ONE_HALF.clone())]),
        ]));
        assert_eq!(steps, vec![Step::ComplexPower]);
    }

    #[test]
    fn euler_identity() {
        let ctxt = Ctxt::default();
        let i_pi = Expr::Mul(vec![I.clone(), PI.clone()]);
        assert_eq!(power(&ctxt, E.clone(), i_pi.clone()).unwrap(), Expr::integer(-1));

        let half_turn = Expr::Mul(vec![Expr::rational(1, 2), I.clone(), PI.clone()]);
        assert_eq!(power(&ctxt, E.clone(), half_turn).unwrap(), I.clone());
    }

    #[test]
    fn quarter_turn_in_polar_mode() {
        let ctxt = Ctxt::default().with_evaluating_polar(true);
        let x = sym("x");
        let three_halves = Expr::Mul(vec![Expr::rational(3, 2), I.clone(), PI.clone()]);
        let exponent = Expr::Add(vec![x.clone(), three_halves.clone()]);

        let (result, steps) = steps_of(&ctxt, E.clone(), three_halves);
        assert_eq!(result, Expr::Mul(vec![Expr::integer(-1), I.clone()]));
        assert_eq!(steps, vec![Step::QuarterTurn]);

        assert_eq!(
            power(&ctxt, E.clone(), exponent).unwrap(),
            Expr::Mul(vec![Expr::integer(-1), I.clone(), pow(E.clone(), x)]),
        );
    }

    #[test]
    fn unreduced() {
        let ctxt = Ctxt::default();
        let (x, y) = (sym("x"), sym("y"));
        let (result, steps) = steps_of(&ctxt, x.clone(), y.clone());
        assert_eq!(result, pow(x, y));
        assert_eq!(steps, vec![Step::Unreduced]);
    }

    #[test]
    fn matrix_power() {
        let ctxt = Ctxt::default();
        let m = Tensor::matrix(vec![
            vec![Expr::integer(0), Expr::integer(1)],
            vec![Expr::integer(1), Expr::integer(0)],
        ]).unwrap();
        assert_eq!(power(&ctxt, m.into(), Expr::integer(2)).unwrap(), Tensor::identity(2).into());

        let v = Tensor::vector(vec![sym("x")]).unwrap();
        let err = power(&ctxt, v.into(), Expr::integer(2)).unwrap_err();
        assert!(err.is::<UnsupportedShape>());
    }

    #[test]
    fn interrupted_expansion() {
        let ctxt = Ctxt::default();
        ctxt.interrupt.request();
        let sum = Expr::Add(vec![sym("a"), sym("b")]);
        let err = power(&ctxt, sum, Expr::integer(2)).unwrap_err();
        assert!(err.is::<Interrupted>());
    }
}
