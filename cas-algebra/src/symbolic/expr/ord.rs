//! Deterministic orderings over expressions.
//!
//! [`cmp_expr`] is a total order used to sort the factors of a product and, through
//! [`compare_terms`], the terms of a sum. The order itself carries no mathematical meaning; it
//! only has to be deterministic so that every sum and product has exactly one canonical
//! arrangement.

use crate::consts::ONE;
use crate::number::Number;
use std::borrow::Cow;
use std::cmp::Ordering;
use super::{Expr, Primary};

/// The rank of each kind of expression in the order. Kinds with a lower rank sort first.
fn rank(expr: &Expr) -> u8 {
    match expr {
        Expr::Primary(Primary::Number(_)) => 0,
        Expr::Primary(Primary::Symbol(_)) => 1,
        Expr::Primary(Primary::Meta(_)) => 2,
        Expr::Primary(Primary::Tensor(_)) => 3,
        Expr::Primary(Primary::Call(..)) | Expr::Add(_) | Expr::Mul(_) | Expr::Exp(..) => 4,
    }
}

/// Compares two sequences of expressions lexicographically, then by length.
fn cmp_seq<'a>(
    lhs: impl IntoIterator<Item = &'a Expr>,
    rhs: impl IntoIterator<Item = &'a Expr>,
) -> Ordering {
    let mut lhs = lhs.into_iter();
    let mut rhs = rhs.into_iter();
    loop {
        match (lhs.next(), rhs.next()) {
            (Some(l), Some(r)) => match cmp_expr(l, r) {
                Ordering::Equal => continue,
                ord => return ord,
            },
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
        }
    }
}

/// Compares two expressions with the canonical structural order:
///
/// - numbers < symbols < meta-slots < tensors < compound expressions;
/// - numbers are compared by value;
/// - symbols are compared by name;
/// - tensors are compared by shape, then element by element;
/// - compound expressions are compared by the name of their head (`add`, `multiply`, `power`, or
/// the name of the called function), then argument by argument, then by argument count.
///
/// Returns [`Ordering::Equal`] only for structurally equal expressions, except for numbers that
/// have the same value but different representations, such as `1/2` and `0.5`.
pub fn cmp_expr(lhs: &Expr, rhs: &Expr) -> Ordering {
    match (lhs, rhs) {
        (Expr::Primary(Primary::Number(l)), Expr::Primary(Primary::Number(r))) => l.cmp_value(r),
        (Expr::Primary(Primary::Symbol(l)), Expr::Primary(Primary::Symbol(r))) => l.cmp(r),
        (Expr::Primary(Primary::Meta(l)), Expr::Primary(Primary::Meta(r))) => l.cmp(r),
        (Expr::Primary(Primary::Tensor(l)), Expr::Primary(Primary::Tensor(r))) => {
            l.cmp_shape(r).then_with(|| cmp_seq(l.elems(), r.elems()))
        },
        _ => match (lhs.head(), rhs.head()) {
            (Some(l), Some(r)) => l.cmp(r)
                .then_with(|| cmp_seq(lhs.operands(), rhs.operands())),
            _ => rank(lhs).cmp(&rank(rhs)),
        },
    }
}

/// Splits a term into its numeric coefficient and the remaining factors.
///
/// A product whose first factor is a number is "unwrapped": the number is returned as the
/// coefficient, and the remaining factors form the rest (a single remaining factor is returned
/// as-is). A term that is not such a product has an implicit coefficient of `1`.
pub fn split_coefficient(term: &Expr) -> (Number, Cow<'_, Expr>) {
    if let Expr::Mul(factors) = term {
        if let Some((Expr::Primary(Primary::Number(coeff)), rest)) = factors.split_first() {
            let rest = if rest.len() == 1 {
                Cow::Borrowed(&rest[0])
            } else {
                Cow::Owned(Expr::Mul(rest.to_vec()))
            };
            return (coeff.clone(), rest);
        }
    }

    (Number::from(1i64), Cow::Borrowed(term))
}

/// Compares two terms of a sum.
///
/// Terms that compare [`Ordering::Equal`] are exactly the terms that can be combined into one:
///
/// - any two numbers;
/// - two tensors of the same shape (tensors are ordered by rank, then dimensions);
/// - two terms whose non-coefficient parts are structurally equal, such as `2xy` and `-xy`.
///
/// All other pairs are ordered with [`cmp_expr`] on their non-coefficient parts.
pub fn compare_terms(lhs: &Expr, rhs: &Expr) -> Ordering {
    if lhs.is_number() && rhs.is_number() {
        return Ordering::Equal;
    }

    if let (Some(l), Some(r)) = (lhs.as_tensor(), rhs.as_tensor()) {
        return l.cmp_shape(r);
    }

    let (_, lhs) = split_coefficient(lhs);
    let (_, rhs) = split_coefficient(rhs);
    cmp_expr(&lhs, &rhs)
}

/// Compares two factors of a product by their base, then by their exponent. A factor that is not
/// a power has an exponent of `1`.
///
/// Sorting by base keeps the imaginary unit and numeric roots such as `2^(1/2)` (whose bases are
/// numbers) ahead of symbolic factors.
pub fn compare_factors(lhs: &Expr, rhs: &Expr) -> Ordering {
    let (lhs_base, lhs_exp) = base_and_exponent(lhs);
    let (rhs_base, rhs_exp) = base_and_exponent(rhs);
    cmp_expr(lhs_base, rhs_base).then_with(|| cmp_expr(lhs_exp, rhs_exp))
}

/// Splits a factor into its base and exponent.
pub fn base_and_exponent(factor: &Expr) -> (&Expr, &Expr) {
    match factor {
        Expr::Exp(base, exp) => (&**base, &**exp),
        _ => (factor, &*ONE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::I;
    use pretty_assertions::assert_eq;

    fn pow(base: Expr, exp: Expr) -> Expr {
        Expr::Exp(Box::new(base), Box::new(exp))
    }

    #[test]
    fn kinds() {
        let ordered = [
            Expr::integer(-3),
            Expr::rational(1, 2),
            Expr::symbol("a"),
            Expr::symbol("b"),
            Expr::Mul(vec![Expr::symbol("a"), Expr::symbol("b")]),
            pow(Expr::symbol("a"), Expr::integer(2)),
            Expr::call("sin", vec![Expr::symbol("a")]),
        ];
        for pair in ordered.windows(2) {
            assert_eq!(cmp_expr(&pair[0], &pair[1]), Ordering::Less, "{} < {}", pair[0], pair[1]);
            assert_eq!(cmp_expr(&pair[1], &pair[0]), Ordering::Greater);
        }
    }

    #[test]
    fn equal_only_when_structurally_equal() {
        let a = Expr::Add(vec![Expr::symbol("x"), pow(Expr::symbol("y"), Expr::integer(2))]);
        assert_eq!(cmp_expr(&a, &a.clone()), Ordering::Equal);

        let b = Expr::Add(vec![Expr::symbol("x"), pow(Expr::symbol("y"), Expr::integer(3))]);
        assert_eq!(cmp_expr(&a, &b), Ordering::Less);
    }

    #[test]
    fn combinable_terms_compare_equal() {
        let xy = Expr::Mul(vec![Expr::symbol("x"), Expr::symbol("y")]);
        let two_xy = Expr::Mul(vec![Expr::integer(2), Expr::symbol("x"), Expr::symbol("y")]);
        assert_eq!(compare_terms(&xy, &two_xy), Ordering::Equal);
        assert_eq!(compare_terms(&Expr::integer(7), &Expr::float(0.5)), Ordering::Equal);

        let two_x = Expr::Mul(vec![Expr::integer(2), Expr::symbol("x")]);
        assert_eq!(compare_terms(&two_x, &Expr::symbol("x")), Ordering::Equal);
        assert_eq!(compare_terms(&two_x, &Expr::symbol("y")), Ordering::Less);
    }

    #[test]
    fn split() {
        let term = Expr::Mul(vec![Expr::integer(3), Expr::symbol("x")]);
        let (coeff, rest) = split_coefficient(&term);
        assert_eq!(coeff, Number::from(3i64));
        assert_eq!(rest.into_owned(), Expr::symbol("x"));

        let (coeff, rest) = split_coefficient(&Expr::symbol("y"));
        assert!(coeff.is_one());
        assert_eq!(rest.into_owned(), Expr::symbol("y"));
    }

    #[test]
    fn factors_by_base() {
        let x = Expr::symbol("x");
        let root_two = pow(Expr::integer(2), Expr::rational(1, 2));
        assert_eq!(compare_factors(&I, &root_two), Ordering::Less);
        assert_eq!(compare_factors(&root_two, &x), Ordering::Less);
        assert_eq!(compare_factors(&x, &pow(x.clone(), Expr::integer(2))), Ordering::Less);
    }
}
