//! Exact evaluation of trigonometric functions.

mod table;

use cas_error::Error;
use crate::consts::{ONE_HALF, PI};
use crate::ctxt::Ctxt;
use crate::number::Number;
use std::collections::HashMap;
use super::{
    expr::Expr,
    multiply::{multiply, multiply_all, negate},
    power::power,
};
use table::{TrigOut, TURN};

/// Normalizes the angle to a fraction of a full turn and looks it up in the given table.
///
/// ```text
/// sin(pi/6): (pi/6) / (2pi) = 1/12 of a turn = 2/24 of a turn
/// ```
fn lookup(ctxt: &Ctxt, angle: &Expr, table: &HashMap<u32, TrigOut>) -> Result<Option<Expr>, Error> {
    let inverse_pi = power(ctxt, PI.clone(), Expr::integer(-1))?;
    let turns = multiply_all(ctxt, [angle.clone(), ONE_HALF.clone(), inverse_pi])?;
    let Some(turns) = turns.as_rational() else {
        return Ok(None);
    };

    // positive remainder, to handle negative angles
    let frac = turns.clone() - turns.clone().floor();
    let units = frac * TURN;
    if *units.denom() != 1 {
        return Ok(None);
    }
    let Some(out) = units.numer().to_u32().and_then(|k| table.get(&k)) else {
        return Ok(None);
    };

    if out.neg {
        negate(ctxt, out.output.clone()).map(Some)
    } else {
        Ok(Some(out.output.clone()))
    }
}

/// Computes `sin(x)`.
///
/// Exact values are produced for multiples of `pi/6` and `pi/4`, and floats for float arguments.
/// Uses `sin(-x) = -sin(x)` to normalize the sign of the argument. Other arguments produce an
/// unevaluated call.
pub fn sine(ctxt: &Ctxt, x: &Expr) -> Result<Expr, Error> {
    if let Some(Number::Float(x)) = x.as_number() {
        return Ok(Expr::float(x.sin()));
    }

    if let Some(value) = lookup(ctxt, x, &table::SIN_TABLE)? {
        return Ok(value);
    }

    if x.is_negative_term() {
        let sine = sine(ctxt, &negate(ctxt, x.clone())?)?;
        return negate(ctxt, sine);
    }

    Ok(Expr::call("sin", vec![x.clone()]))
}

/// Computes `cos(x)`.
///
/// Exact values are produced for multiples of `pi/6` and `pi/4`, and floats for float arguments.
/// Uses `cos(-x) = cos(x)` to normalize the sign of the argument. Other arguments produce an
/// unevaluated call.
pub fn cosine(ctxt: &Ctxt, x: &Expr) -> Result<Expr, Error> {
    if let Some(Number::Float(x)) = x.as_number() {
        return Ok(Expr::float(x.cos()));
    }

    if let Some(value) = lookup(ctxt, x, &table::COS_TABLE)? {
        return Ok(value);
    }

    if x.is_negative_term() {
        return cosine(ctxt, &negate(ctxt, x.clone())?);
    }

    Ok(Expr::call("cos", vec![x.clone()]))
}

/// Computes `arctan(x)`.
///
/// Exact values are produced for `0`, `1`, `3^(1/2)` and `1/3 * 3^(1/2)`, and floats for float
/// arguments. Uses `arctan(-x) = -arctan(x)` to normalize the sign of the argument. Other arguments
/// produce an unevaluated call.
pub fn arctan(ctxt: &Ctxt, x: &Expr) -> Result<Expr, Error> {
    if let Some(Number::Float(x)) = x.as_number() {
        return Ok(Expr::float(x.atan()));
    }

    if x.is_zero() {
        return Ok(Expr::integer(0));
    }

    let root_three = power(ctxt, Expr::integer(3), ONE_HALF.clone())?;
    let third_root_three = multiply(ctxt, Expr::rational(1, 3), root_three.clone())?;
    let turns = if x.is_one() {
        Some(Expr::rational(1, 4))
    } else if *x == root_three {
        Some(Expr::rational(1, 3))
    } else if *x == third_root_three {
        Some(Expr::rational(1, 6))
    } else {
        None
    };
    if let Some(turns) = turns {
        return multiply(ctxt, turns, PI.clone());
    }

    if x.is_negative_term() {
        let arctan = arctan(ctxt, &negate(ctxt, x.clone())?)?;
        return negate(ctxt, arctan);
    }

    Ok(Expr::call("arctan", vec![x.clone()]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pi_times(n: i64, d: i64) -> Expr {
        Expr::Mul(vec![Expr::rational(n, d), PI.clone()])
    }

    fn root(n: i64) -> Expr {
        Expr::Exp(Box::new(Expr::integer(n)), Box::new(ONE_HALF.clone()))
    }

    #[test]
    fn exact_sine() {
        let ctxt = Ctxt::default();
        assert_eq!(sine(&ctxt, &Expr::integer(0)).unwrap(), Expr::integer(0));
        assert_eq!(sine(&ctxt, &pi_times(1, 6)).unwrap(), Expr::rational(1, 2));
        assert_eq!(sine(&ctxt, &PI).unwrap(), Expr::integer(0));
        assert_eq!(
            sine(&ctxt, &pi_times(-1, 3)).unwrap(),
            Expr::Mul(vec![Expr::rational(-1, 2), root(3)]),
        );
        assert_eq!(sine(&ctxt, &pi_times(5, 2)).unwrap(), Expr::integer(1));
    }

    #[test]
    fn exact_cosine() {
        let ctxt = Ctxt::default();
        assert_eq!(cosine(&ctxt, &PI).unwrap(), Expr::integer(-1));
        assert_eq!(
            cosine(&ctxt, &pi_times(1, 4)).unwrap(),
            Expr::Mul(vec![Expr::rational(1, 2), root(2)]),
        );
        assert_eq!(cosine(&ctxt, &pi_times(2, 3)).unwrap(), Expr::rational(-1, 2));
    }

    #[test]
    fn symmetry() {
        let ctxt = Ctxt::default();
        let x = Expr::symbol("x");
        let neg_x = Expr::Mul(vec![Expr::integer(-1), x.clone()]);
        assert_eq!(
            sine(&ctxt, &neg_x).unwrap(),
            Expr::Mul(vec![Expr::integer(-1), Expr::call("sin", vec![x.clone()])]),
        );
        assert_eq!(cosine(&ctxt, &neg_x).unwrap(), Expr::call("cos", vec![x]));
    }

    #[test]
    fn floats() {
        let ctxt = Ctxt::default();
        assert_eq!(sine(&ctxt, &Expr::float(0.0)).unwrap(), Expr::float(0.0));
        assert_eq!(cosine(&ctxt, &Expr::float(0.0)).unwrap(), Expr::float(1.0));
        assert_eq!(arctan(&ctxt, &Expr::float(0.0)).unwrap(), Expr::float(0.0));
    }

    #[test]
    fn exact_arctan() {
        let ctxt = Ctxt::default();
        assert_eq!(arctan(&ctxt, &Expr::integer(1)).unwrap(), pi_times(1, 4));
        assert_eq!(arctan(&ctxt, &Expr::integer(-1)).unwrap(), pi_times(-1, 4));
        assert_eq!(arctan(&ctxt, &root(3)).unwrap(), pi_times(1, 3));
        assert_eq!(
            arctan(&ctxt, &Expr::integer(2)).unwrap(),
            Expr::call("arctan", vec![Expr::integer(2)]),
        );
    }
}
