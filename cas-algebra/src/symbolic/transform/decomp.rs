use cas_error::Error;
use crate::ctxt::Ctxt;
use super::super::{
    add::add_all,
    expr::Expr,
    multiply::{multiply_all, negate},
};

/// Returns true if the expression contains the free variable.
fn depends_on(expr: &Expr, free_var: Option<&Expr>) -> bool {
    free_var.map(|var| expr.contains(var)).unwrap_or(false)
}

fn decompose_into(
    ctxt: &Ctxt,
    expr: &Expr,
    free_var: Option<&Expr>,
    general: bool,
    out: &mut Vec<Expr>,
) -> Result<(), Error> {
    let constant = if general { expr.is_atom() } else { !depends_on(expr, free_var) };
    if constant {
        out.push(expr.clone());
        return Ok(());
    }

    match expr {
        Expr::Add(terms) => {
            let mut constants = Vec::new();
            for term in terms {
                if depends_on(term, free_var) || general {
                    decompose_into(ctxt, term, free_var, general, out)?;
                }
                if !depends_on(term, free_var) {
                    constants.push(term.clone());
                }
            }

            if !constants.is_empty() {
                let sum = add_all(ctxt, constants)?;
                let negated = negate(ctxt, sum.clone())?;
                out.extend([sum, negated]);
            }
        },
        Expr::Mul(factors) => {
            let mut constants = Vec::new();
            for factor in factors {
                if depends_on(factor, free_var) {
                    decompose_into(ctxt, factor, free_var, general, out)?;
                } else {
                    constants.push(factor.clone());
                }
            }

            if !constants.is_empty() {
                out.push(multiply_all(ctxt, constants)?);
            }
        },
        expr => {
            for operand in expr.operands() {
                if general {
                    out.push(operand.clone());
                }
                decompose_into(ctxt, operand, free_var, general, out)?;
            }
        },
    }

    Ok(())
}

/// Decomposes an expression into the sub-expressions that are candidates for the rewrite slots
/// `a_` and `b_` when matching it against a pattern.
///
/// The decomposition is taken with respect to the free variable:
///
/// - A constant expression decomposes to itself. In general mode, every atom is a constant;
/// otherwise, every expression that does not contain the free variable is.
/// - A sum decomposes to the decompositions of its terms that contain the free variable (of all
/// of its terms in general mode), followed by the sum of its constant terms `c`, and `-c`.
/// - A product decomposes to the decompositions of its factors that contain the free variable,
/// followed by the product of its constant factors.
/// - Any other expression decomposes to the decompositions of its operands. In general mode, each
/// operand is also a candidate itself, placed before its decomposition.
pub fn decompose(
    ctxt: &Ctxt,
    expr: &Expr,
    free_var: Option<&Expr>,
    general: bool,
) -> Result<Vec<Expr>, Error> {
    let mut out = Vec::new();
    decompose_into(ctxt, expr, free_var, general, &mut out)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sym(name: &str) -> Expr {
        Expr::symbol(name)
    }

    #[test]
    fn constant() {
        let ctxt = Ctxt::default();
        let x = sym("x");
        let expr = Expr::Mul(vec![Expr::integer(2), sym("y")]);
        assert_eq!(decompose(&ctxt, &expr, Some(&x), false).unwrap(), vec![expr]);
    }

    #[test]
    fn product() {
        // 5xy with respect to x: the decomposition of x is empty, then 5y
        let ctxt = Ctxt::default();
        let x = sym("x");
        let expr = Expr::Mul(vec![Expr::integer(5), x.clone(), sym("y")]);
        assert_eq!(
            decompose(&ctxt, &expr, Some(&x), false).unwrap(),
            vec![Expr::Mul(vec![Expr::integer(5), sym("y")])],
        );
    }

    #[test]
    fn sum() {
        // sin(x) + 3 + y with respect to x
        let ctxt = Ctxt::default();
        let x = sym("x");
        let sin_x = Expr::call("sin", vec![x.clone()]);
        let expr = Expr::Add(vec![Expr::integer(3), sym("y"), sin_x]);
        assert_eq!(
            decompose(&ctxt, &expr, Some(&x), false).unwrap(),
            vec![
                Expr::Add(vec![Expr::integer(3), sym("y")]),
                Expr::Add(vec![Expr::integer(-3), Expr::Mul(vec![Expr::integer(-1), sym("y")])]),
            ],
        );
    }

    #[test]
    fn operands_with_free_variable_are_not_candidates() {
        // x^x and x^2 with respect to x
        let ctxt = Ctxt::default();
        let x = sym("x");
        let self_power = Expr::Exp(Box::new(x.clone()), Box::new(x.clone()));
        assert_eq!(decompose(&ctxt, &self_power, Some(&x), false).unwrap(), vec![]);

        let square = Expr::Exp(Box::new(x.clone()), Box::new(Expr::integer(2)));
        assert_eq!(decompose(&ctxt, &square, Some(&x), false).unwrap(), vec![Expr::integer(2)]);
    }

    #[test]
    fn general_mode() {
        // f(y, 2) without a free variable
        let ctxt = Ctxt::default();
        let expr = Expr::call("f", vec![sym("y"), Expr::integer(2)]);
        assert_eq!(
            decompose(&ctxt, &expr, None, true).unwrap(),
            vec![sym("y"), sym("y"), Expr::integer(2), Expr::integer(2)],
        );
    }
}
