//! The canonical term combiner.
//!
//! Adding expressions flattens them into a single list of terms, which is then repeatedly sorted
//! with [`compare_terms`] and scanned for adjacent terms that can be combined: two numbers, two
//! tensors of the same shape, or two terms that differ only in their numeric coefficient, such as
//! `2xy` and `-5xy`. Once no two adjacent terms compare equal, the list is in canonical order.

use cas_error::Error;
use crate::ctxt::Ctxt;
use std::{cmp::Ordering, collections::VecDeque};
use super::{
    expr::{ord::{compare_terms, split_coefficient}, Expr},
    multiply::{multiply, negate},
};
use tracing::{debug, trace, warn};

/// The result of trying to combine two adjacent terms.
enum Pair {
    /// The terms merged into a single, non-zero term.
    Merged(Expr),

    /// The terms cancelled each other out.
    Cancelled,

    /// The terms cannot be combined, and are returned unchanged.
    Distinct(Expr, Expr),
}

/// Appends the terms of `expr` to `terms`, flattening nested sums and dropping zeros.
fn push_terms(terms: &mut Vec<Expr>, expr: Expr) {
    match expr {
        Expr::Add(inner) => inner.into_iter().for_each(|term| push_terms(terms, term)),
        expr if expr.is_zero() => {},
        expr => terms.push(expr),
    }
}

/// Tries to combine two terms of a sum.
fn combine_pair(ctxt: &Ctxt, lhs: Expr, rhs: Expr) -> Result<Pair, Error> {
    if let (Some(l), Some(r)) = (lhs.as_tensor(), rhs.as_tensor()) {
        if l.cmp_shape(r) != Ordering::Equal {
            return Ok(Pair::Distinct(lhs, rhs));
        }
        let sum = l.add(ctxt, r)?;
        return Ok(if sum.is_zero() { Pair::Cancelled } else { Pair::Merged(sum.into()) });
    }

    if let (Some(l), Some(r)) = (lhs.as_number(), rhs.as_number()) {
        return Ok(match l.clone().checked_add(r.clone()) {
            Some(sum) if sum.is_zero() => Pair::Cancelled,
            Some(sum) => Pair::Merged(sum.into()),
            None => Pair::Distinct(lhs, rhs),
        });
    }

    let (lhs_coeff, lhs_rest) = split_coefficient(&lhs);
    let (rhs_coeff, rhs_rest) = split_coefficient(&rhs);
    if lhs_rest != rhs_rest {
        return Ok(Pair::Distinct(lhs, rhs));
    }

    // an overflowing float coefficient keeps the terms apart
    let Some(coeff) = lhs_coeff.checked_add(rhs_coeff) else {
        return Ok(Pair::Distinct(lhs, rhs));
    };
    if coeff.is_zero() {
        return Ok(Pair::Cancelled);
    }

    let merged = multiply(ctxt, coeff.into(), lhs_rest.into_owned())?;
    Ok(Pair::Merged(merged))
}

/// Runs one combination pass over a sorted list of terms.
///
/// Terms are popped from a work queue two at a time. A merged term is pushed back to the front of
/// the queue so that it can merge with the term after it.
fn combine_pass(ctxt: &Ctxt, terms: Vec<Expr>) -> Result<Vec<Expr>, Error> {
    let mut queue = VecDeque::from(terms);
    let mut output = Vec::with_capacity(queue.len());

    while let Some(first) = queue.pop_front() {
        ctxt.check_interrupt()?;

        let Some(second) = queue.pop_front() else {
            output.push(first);
            break;
        };

        match combine_pair(ctxt, first, second)? {
            // a merge can produce a sum, e.g. when distributing a coefficient over `a + b`
            Pair::Merged(Expr::Add(inner)) => {
                inner.into_iter().rev().for_each(|term| queue.push_front(term));
            },
            Pair::Merged(merged) => queue.push_front(merged),
            Pair::Cancelled => {},
            Pair::Distinct(first, second) => {
                output.push(first);
                queue.push_front(second);
            },
        }
    }

    Ok(output)
}

/// Builds the final expression from a sorted list of terms that cannot be combined further.
fn finish(terms: Vec<Expr>) -> Expr {
    Expr::Add(terms).downgrade()
}

/// Returns true if any two adjacent terms of a sorted list can be combined.
fn has_combinable_pair(terms: &[Expr]) -> bool {
    terms.windows(2).any(|pair| compare_terms(&pair[0], &pair[1]) == Ordering::Equal)
}

/// Combines the given terms into a single canonical sum.
///
/// Nested sums are flattened and zeros dropped. The result is zero if every term cancels, the
/// single remaining term if only one survives, or an [`Expr::Add`] of the surviving terms sorted
/// with [`compare_terms`].
///
/// The sort-and-combine cycle runs until a fixed point is reached, at most
/// [`Ctxt::max_combine_passes`] times. If the bound is reached first, a warning is logged and the
/// current (sorted, but possibly not fully combined) sum is returned.
///
/// Fails with [`Interrupted`](crate::error::Interrupted) if an interrupt is requested while
/// combining terms.
pub fn combine(ctxt: &Ctxt, terms: Vec<Expr>) -> Result<Expr, Error> {
    let mut flat = Vec::with_capacity(terms.len());
    terms.into_iter().for_each(|term| push_terms(&mut flat, term));
    let mut terms = flat;

    for pass in 0..ctxt.max_combine_passes {
        terms.sort_by(compare_terms);
        if !has_combinable_pair(&terms) {
            trace!(pass, terms = terms.len(), "terms combined");
            return Ok(finish(terms));
        }
        let combined = combine_pass(ctxt, terms.clone())?;
        if combined == terms {
            debug!(pass, terms = terms.len(), "no adjacent terms could be combined");
            return Ok(finish(terms));
        }
        terms = combined;
    }

    terms.sort_by(compare_terms);
    if has_combinable_pair(&terms) {
        warn!(
            passes = ctxt.max_combine_passes,
            terms = terms.len(),
            "term combination did not reach a fixed point",
        );
    }
    Ok(finish(terms))
}

/// Adds two expressions.
///
/// ```
/// use cas_algebra::{Ctxt, symbolic::{add, expr::Expr}};
///
/// let ctxt = Ctxt::default();
/// assert_eq!(add(&ctxt, Expr::integer(2), Expr::integer(3)).unwrap(), Expr::integer(5));
/// ```
pub fn add(ctxt: &Ctxt, lhs: Expr, rhs: Expr) -> Result<Expr, Error> {
    combine(ctxt, vec![lhs, rhs])
}

/// Adds all of the given expressions.
pub fn add_all(ctxt: &Ctxt, terms: impl IntoIterator<Item = Expr>) -> Result<Expr, Error> {
    combine(ctxt, terms.into_iter().collect())
}

/// Subtracts `rhs` from `lhs`.
pub fn subtract(ctxt: &Ctxt, lhs: Expr, rhs: Expr) -> Result<Expr, Error> {
    let rhs = negate(ctxt, rhs)?;
    add(ctxt, lhs, rhs)
}
