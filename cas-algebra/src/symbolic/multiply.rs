//! Canonical products.

use cas_error::Error;
use crate::ctxt::Ctxt;
use crate::number::Number;
use super::{
    add::combine,
    expr::{ord::{base_and_exponent, compare_factors}, Expr, Primary},
    power::power,
    add_all,
};

/// Appends the factors of `expr` to `factors`, flattening nested products.
fn push_factors(factors: &mut Vec<Expr>, expr: Expr) {
    match expr {
        Expr::Mul(inner) => inner.into_iter().for_each(|factor| push_factors(factors, factor)),
        expr => factors.push(expr),
    }
}

/// Groups the given factors by their base, keeping the order in which each base first appears.
fn group_by_base(factors: Vec<Expr>) -> Vec<(Expr, Vec<Expr>)> {
    let mut groups: Vec<(Expr, Vec<Expr>)> = Vec::new();
    for factor in factors {
        let base = base_and_exponent(&factor).0;
        match groups.iter_mut().find(|(existing, _)| existing == base) {
            Some((_, group)) => group.push(factor),
            None => groups.push((base.clone(), vec![factor])),
        }
    }
    groups
}

/// Folds a number into the coefficient. A number whose product with the coefficient overflows a
/// float is kept as a separate factor.
fn fold(coeff: &mut Number, num: Number, unfolded: &mut Vec<Expr>) {
    match coeff.clone().checked_mul(num.clone()) {
        Some(product) => *coeff = product,
        None => unfolded.push(num.into()),
    }
}

/// Multiplies a flat list of factors.
fn product(ctxt: &Ctxt, factors: Vec<Expr>) -> Result<Expr, Error> {
    if factors.len() == 1 {
        return Ok(Expr::Mul(factors).downgrade());
    }

    let (tensors, scalars): (Vec<_>, Vec<_>) = factors
        .into_iter()
        .partition(|factor| factor.as_tensor().is_some());
    if let [tensor] = tensors.as_slice() {
        if let Some(tensor) = tensor.as_tensor() {
            let scalar = product(ctxt, scalars)?;
            return Ok(tensor.scale(ctxt, &scalar)?.into());
        }
    }
    if !tensors.is_empty() {
        // products of tensors are not reduced
        let mut factors = Vec::with_capacity(tensors.len() + 1);
        let scalar = product(ctxt, scalars)?;
        if !scalar.is_one() {
            push_factors(&mut factors, scalar);
        }
        factors.extend(tensors);
        return Ok(Expr::Mul(factors).downgrade());
    }

    let mut factors = scalars;
    if ctxt.expanding {
        if let Some(idx) = factors.iter().position(|factor| matches!(factor, Expr::Add(_))) {
            if let Expr::Add(terms) = factors.remove(idx) {
                let rest = product(ctxt, factors)?;
                let terms = terms
                    .into_iter()
                    .map(|term| multiply(ctxt, term, rest.clone()))
                    .collect::<Result<Vec<_>, _>>()?;
                return combine(ctxt, terms);
            }
        }
    }

    let mut coeff = Number::from(1i64);
    let mut unfolded = Vec::new();
    let mut rest = Vec::with_capacity(factors.len());
    for factor in factors {
        match factor {
            Expr::Primary(Primary::Number(num)) => fold(&mut coeff, num, &mut unfolded),
            factor => rest.push(factor),
        }
    }
    if coeff.is_zero() {
        return Ok(coeff.into());
    }

    let mut merged = Vec::with_capacity(rest.len());
    let mut refold = false;
    for (base, group) in group_by_base(rest) {
        if group.len() == 1 {
            merged.extend(group);
            continue;
        }

        let exponent = add_all(ctxt, group.iter().map(|factor| base_and_exponent(factor).1.clone()))?;
        match power(ctxt, base, exponent)? {
            Expr::Primary(Primary::Number(num)) => fold(&mut coeff, num, &mut unfolded),
            Expr::Mul(inner) => {
                // the factors of the result may share bases with other factors
                refold = true;
                merged.extend(inner);
            },
            sum @ Expr::Add(_) => {
                refold |= ctxt.expanding;
                merged.push(sum);
            },
            factor => merged.push(factor),
        }
    }

    if coeff.is_zero() {
        return Ok(coeff.into());
    }
    if refold {
        merged.push(coeff.into());
        merged.extend(unfolded);
        return multiply_all(ctxt, merged);
    }

    merged.sort_by(compare_factors);
    let mut numbers = Vec::with_capacity(unfolded.len() + 1);
    if !coeff.is_one() || coeff.is_float() {
        numbers.push(coeff.into());
    }
    numbers.extend(unfolded);
    numbers.extend(merged);
    Ok(Expr::Mul(numbers).downgrade())
}

/// Multiplies all of the given expressions.
///
/// Nested products are flattened and numeric factors are folded into a single coefficient. Factors
/// with equal bases are merged by adding their exponents, then re-normalized with [`power`]. When
/// the context is expanding, products are distributed over sums. A single tensor factor is scaled
/// by the product of the other factors.
///
/// The remaining factors are sorted by base, then by exponent. The coefficient, if it is not
/// exactly `1`, is the first factor.
pub fn multiply_all(ctxt: &Ctxt, factors: impl IntoIterator<Item = Expr>) -> Result<Expr, Error> {
    let mut flat = Vec::new();
    factors.into_iter().for_each(|factor| push_factors(&mut flat, factor));
    product(ctxt, flat)
}

/// Multiplies two expressions.
pub fn multiply(ctxt: &Ctxt, lhs: Expr, rhs: Expr) -> Result<Expr, Error> {
    multiply_all(ctxt, [lhs, rhs])
}

/// Negates an expression. Sums are always negated term by term, even when the context is not
/// expanding.
pub fn negate(ctxt: &Ctxt, expr: Expr) -> Result<Expr, Error> {
    match expr {
        Expr::Add(terms) => {
            let terms = terms
                .into_iter()
                .map(|term| negate(ctxt, term))
                .collect::<Result<Vec<_>, _>>()?;
            combine(ctxt, terms)
        },
        expr => multiply(ctxt, Expr::integer(-1), expr),
    }
}

/// Returns `expr^-1`.
pub fn reciprocal(ctxt: &Ctxt, expr: Expr) -> Result<Expr, Error> {
    power(ctxt, expr, Expr::integer(-1))
}

/// Divides `lhs` by `rhs`.
pub fn divide(ctxt: &Ctxt, lhs: Expr, rhs: Expr) -> Result<Expr, Error> {
    let rhs = reciprocal(ctxt, rhs)?;
    multiply(ctxt, lhs, rhs)
}
