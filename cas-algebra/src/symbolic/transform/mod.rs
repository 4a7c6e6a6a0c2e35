//! Pattern-directed rewriting.
//!
//! [`transform`] matches an expression against [`Rule`]s whose patterns contain the rewrite slots
//! `a_`, `b_` and `x_`. The slot `x_` is bound to the free variable of the transformation, while
//! candidate values for `a_` and `b_` come from the [decomposition](decompose) of the expression.
//! A rule matches when, for some pair of candidates, every guard of the rule evaluates to a
//! non-zero value and the pattern evaluates to an expression equal to the input.
//!
//! Rules are applied in one of two modes, chosen with [`Rules`]:
//!
//! - **Table** mode tries each rule of a table in order, and rewrites the whole expression with
//! the first rule that matches. This is how lookup tables of known forms, such as a table of
//! integrals, are applied.
//! - **General** mode tries a single rule on the whole expression. If it does not match, the rule
//! is tried on each operand of the expression recursively, and the expression is rebuilt from the
//! transformed operands.
//!
//! The slot bindings of one activation are a local value: neither a failed match nor a recursive
//! activation can change the bindings seen by the caller.

mod decomp;
mod rule;

use cas_error::Error;
use crate::ctxt::Ctxt;
use super::{
    add::{add_all, subtract},
    eval::{call, eval, Bindings},
    expr::{Expr, MetaVar, Primary},
    multiply::multiply_all,
    power::power,
};
use tracing::debug;

pub use decomp::decompose;
pub use rule::Rule;

/// The rules to apply with [`transform`].
#[derive(Debug, Clone, Copy)]
pub enum Rules<'a> {
    /// Try each rule in order, and rewrite the whole expression with the first that matches.
    Table(&'a [Rule]),

    /// Try a single rule on the whole expression, then on its operands.
    General(&'a Rule),
}

/// The result of [`transform`].
#[derive(Debug, Clone, PartialEq)]
pub enum Transformed {
    /// A rule matched. Contains the rewritten expression.
    Matched(Expr),

    /// No rule matched in general mode. Contains the original expression.
    Unchanged(Expr),

    /// No rule of the table matched.
    NoMatch,
}

impl Transformed {
    /// Returns true if a rule matched.
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Matched(_))
    }

    /// Returns the resulting expression, if there is one.
    pub fn into_expr(self) -> Option<Expr> {
        match self {
            Self::Matched(expr) | Self::Unchanged(expr) => Some(expr),
            Self::NoMatch => None,
        }
    }
}

/// Returns true if the expression is zero, or a tensor of zeros.
fn is_zero_like(expr: &Expr) -> bool {
    match expr {
        Expr::Primary(Primary::Tensor(tensor)) => tensor.is_zero(),
        expr => expr.is_zero(),
    }
}

/// Searches the candidates for values of `a_` and `b_` under which every guard of the rule holds
/// and the pattern is equal to `expr`. Pairs are tried in candidate order; the first that works is
/// returned.
///
/// The pattern is evaluated with `pattern_ctxt`, everything else with `ctxt`.
fn find_bindings(
    ctxt: &Ctxt,
    pattern_ctxt: &Ctxt,
    expr: &Expr,
    rule: &Rule,
    candidates: &[Expr],
    base: &Bindings,
) -> Result<Option<Bindings>, Error> {
    for a in candidates {
        for b in candidates {
            ctxt.check_interrupt()?;
            let bindings = base.clone()
                .with(MetaVar::A, a.clone())
                .with(MetaVar::B, b.clone());

            let mut guards_hold = true;
            for guard in &rule.guards {
                if is_zero_like(&eval(ctxt, guard, &bindings)?) {
                    guards_hold = false;
                    break;
                }
            }
            if !guards_hold {
                continue;
            }

            let pattern = eval(pattern_ctxt, &rule.pattern, &bindings)?;
            if is_zero_like(&subtract(ctxt, expr.clone(), pattern)?) {
                return Ok(Some(bindings));
            }
        }
    }

    Ok(None)
}

/// Transforms each operand of the expression in general mode, and rebuilds the expression from
/// the results.
fn transform_operands(ctxt: &Ctxt, expr: &Expr, rules: Rules) -> Result<Transformed, Error> {
    let mut matched = false;
    let mut transform_operand = |operand: &Expr| -> Result<Expr, Error> {
        match transform(ctxt, operand, None, rules)? {
            Transformed::Matched(result) => {
                matched = true;
                Ok(result)
            },
            Transformed::Unchanged(result) => Ok(result),
            Transformed::NoMatch => Ok(operand.clone()),
        }
    };

    let rebuilt = match expr {
        Expr::Primary(Primary::Call(name, args)) => {
            let args = args
                .iter()
                .map(&mut transform_operand)
                .collect::<Result<Vec<_>, _>>()?;
            call(ctxt, name, args)?
        },
        Expr::Primary(Primary::Tensor(tensor)) => tensor.try_map(&mut transform_operand)?.into(),
        Expr::Primary(_) => return Ok(Transformed::Unchanged(expr.clone())),
        Expr::Add(terms) => {
            let terms = terms
                .iter()
                .map(&mut transform_operand)
                .collect::<Result<Vec<_>, _>>()?;
            add_all(ctxt, terms)?
        },
        Expr::Mul(factors) => {
            let factors = factors
                .iter()
                .map(&mut transform_operand)
                .collect::<Result<Vec<_>, _>>()?;
            multiply_all(ctxt, factors)?
        },
        Expr::Exp(base, exp) => {
            let base = transform_operand(base)?;
            let exp = transform_operand(exp)?;
            power(ctxt, base, exp)?
        },
    };

    if matched {
        Ok(Transformed::Matched(rebuilt))
    } else {
        Ok(Transformed::Unchanged(expr.clone()))
    }
}

/// Rewrites an expression with the given rules.
///
/// The free variable, if given, is bound to the slot `x_`. See the [module-level
/// documentation](self) for the matching algorithm and the two modes.
///
/// In general mode, numbers are never matched, since a number can match almost any pattern for
/// the right candidate values.
///
/// ```
/// use cas_algebra::{Ctxt, symbolic::{expr::Expr, multiply, transform, Rule, Rules, Transformed}};
///
/// let ctxt = Ctxt::default();
/// let x = Expr::symbol("x");
///
/// // a_ * x_ -> a_
/// let rules = [Rule::new(
///     Expr::Mul(vec![Expr::symbol("a_"), Expr::symbol("x_")]),
///     Expr::symbol("a_"),
///     vec![],
/// )];
///
/// let five_x = multiply(&ctxt, Expr::integer(5), x.clone()).unwrap();
/// let result = transform(&ctxt, &five_x, Some(&x), Rules::Table(&rules)).unwrap();
/// assert_eq!(result, Transformed::Matched(Expr::integer(5)));
/// ```
pub fn transform(
    ctxt: &Ctxt,
    expr: &Expr,
    free_var: Option<&Expr>,
    rules: Rules,
) -> Result<Transformed, Error> {
    ctxt.check_interrupt()?;

    let mut bindings = Bindings::new();
    if let Some(var) = free_var {
        bindings.set(MetaVar::X, var.clone());
    }

    match rules {
        Rules::Table(table) => {
            let mut candidates = vec![Expr::integer(1)];
            candidates.extend(decompose(ctxt, expr, free_var, false)?);

            for (idx, rule) in table.iter().enumerate() {
                if let Some(bindings) = find_bindings(ctxt, ctxt, expr, rule, &candidates, &bindings)? {
                    debug!(rule = idx, %expr, "rewrite rule matched");
                    return eval(ctxt, &rule.replacement, &bindings).map(Transformed::Matched);
                }
            }
            Ok(Transformed::NoMatch)
        },
        Rules::General(rule) => {
            if expr.is_number() {
                return Ok(Transformed::Unchanged(expr.clone()));
            }

            let mut candidates = vec![Expr::integer(1)];
            candidates.extend(decompose(ctxt, expr, free_var, true)?);

            let pattern_ctxt = ctxt.with_expanding(false);
            if let Some(bindings) = find_bindings(ctxt, &pattern_ctxt, expr, rule, &candidates, &bindings)? {
                debug!(%expr, "rewrite rule matched");
                return eval(ctxt, &rule.replacement, &bindings).map(Transformed::Matched);
            }

            transform_operands(ctxt, expr, rules)
        },
    }
}
