//! Expansion of integer powers of sums with the multinomial theorem:
//!
//! ```text
//! (a_1 + ... + a_k)^n = sum of n! / (n_1! ... n_k!) * a_1^n_1 * ... * a_k^n_k
//! ```
//!
//! where the sum runs over every partition `n_1 + ... + n_k = n`.

use cas_error::Error;
use crate::ctxt::Ctxt;
use rug::Integer;
use super::super::{add::combine, expr::Expr, multiply::multiply_all};
use super::power;
use tracing::trace;

/// The state shared by every step of the partition search.
struct Expansion<'a> {
    ctxt: &'a Ctxt,

    /// `powers[i][j]` is the `i`-th term raised to the `j`-th power.
    powers: Vec<Vec<Expr>>,

    /// `n!`
    numerator: Integer,

    /// The current partition.
    partition: Vec<u32>,

    /// The terms of the expansion found so far.
    terms: Vec<Expr>,
}

impl Expansion<'_> {
    /// Fills the partition from index `i` onwards with every split of the remaining exponent `m`.
    fn descend(&mut self, i: usize, m: u32) -> Result<(), Error> {
        if i + 1 < self.partition.len() {
            for j in 0..=m {
                self.partition[i] = j;
                self.descend(i + 1, m - j)?;
            }
            return Ok(());
        }

        self.ctxt.check_interrupt()?;
        self.partition[i] = m;

        let mut coeff = self.numerator.clone();
        for &part in &self.partition {
            coeff /= Integer::from(Integer::factorial(part));
        }

        let factors = self.partition
            .iter()
            .zip(&self.powers)
            .map(|(&part, powers)| powers[part as usize].clone());
        let term = multiply_all(self.ctxt, std::iter::once(Expr::from(coeff)).chain(factors))?;
        self.terms.push(term);
        Ok(())
    }
}

/// Expands `(terms[0] + terms[1] + ...)^n`.
pub(crate) fn expand(ctxt: &Ctxt, terms: &[Expr], n: u32) -> Result<Expr, Error> {
    let powers = terms
        .iter()
        .map(|term| {
            (0..=n)
                .map(|j| power(ctxt, term.clone(), Expr::integer(j)))
                .collect::<Result<Vec<_>, _>>()
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut expansion = Expansion {
        ctxt,
        powers,
        numerator: Integer::from(Integer::factorial(n)),
        partition: vec![0; terms.len()],
        terms: Vec::new(),
    };
    if !terms.is_empty() {
        expansion.descend(0, n)?;
    }
    trace!(n, terms = expansion.terms.len(), "multinomial expanded");

    combine(ctxt, expansion.terms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Interrupted;
    use pretty_assertions::assert_eq;

    fn pow(base: Expr, exp: Expr) -> Expr {
        Expr::Exp(Box::new(base), Box::new(exp))
    }

    #[test]
    fn binomial_square() {
        let ctxt = Ctxt::default();
        let (a, b) = (Expr::symbol("a"), Expr::symbol("b"));
        let expanded = expand(&ctxt, &[a.clone(), b.clone()], 2).unwrap();
        assert_eq!(expanded, Expr::Add(vec![
            Expr::Mul(vec![Expr::integer(2), a.clone(), b.clone()]),
            pow(a, Expr::integer(2)),
            pow(b, Expr::integer(2)),
        ]));
    }

    #[test]
    fn trinomial_coefficients() {
        // (1 + x + y)^3
        let ctxt = Ctxt::default();
        let (x, y) = (Expr::symbol("x"), Expr::symbol("y"));
        let expanded = expand(&ctxt, &[Expr::integer(1), x.clone(), y.clone()], 3).unwrap();
        let Expr::Add(terms) = &expanded else {
            panic!("expected a sum, got {}", expanded);
        };
        assert_eq!(terms.len(), 10);
        assert_eq!(terms[0], Expr::integer(1));
        assert!(terms.contains(&Expr::Mul(vec![Expr::integer(6), x, y])));
    }

    #[test]
    fn cancellation() {
        // (x - x)^3
        let ctxt = Ctxt::default();
        let x = Expr::symbol("x");
        let neg_x = Expr::Mul(vec![Expr::integer(-1), x.clone()]);
        assert_eq!(expand(&ctxt, &[x, neg_x], 3).unwrap(), Expr::integer(0));
    }

    #[test]
    fn interrupted() {
        let ctxt = Ctxt::default();
        ctxt.interrupt.request();
        let err = expand(&ctxt, &[Expr::symbol("a"), Expr::symbol("b")], 2).unwrap_err();
        assert!(err.is::<Interrupted>());
    }
}
