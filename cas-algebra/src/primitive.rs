//! Functions to construct [`Integer`]s and [`Rational`]s from various types.

use rug::{Integer, Rational};

/// Integers with at most this many significant bits are factored by trial division. Larger
/// integers are only checked for exact roots.
pub const FACTOR_BITS: u32 = 40;

/// Creates an [`Integer`] with the given value.
pub fn int<T>(n: T) -> Integer
where
    Integer: From<T>,
{
    Integer::from(n)
}

/// Creates a [`Rational`] with the given numerator and denominator, reduced to lowest terms.
///
/// Panics if the denominator is zero.
pub fn rat<N, D>(numer: N, denom: D) -> Rational
where
    Integer: From<N> + From<D>,
{
    Rational::from((int(numer), int(denom)))
}

/// Returns the prime factorization of the given positive integer as a list of `(prime, count)`
/// pairs in increasing order of the primes.
///
/// Returns [`None`] if the integer is too large to factor by trial division.
pub fn prime_factorization(n: &Integer) -> Option<Vec<(u64, u32)>> {
    if n.significant_bits() > FACTOR_BITS {
        return None;
    }

    let mut n = n.to_u64()?;
    let mut factors = Vec::new();
    let mut p = 2u64;
    while p * p <= n {
        let mut count = 0;
        while n % p == 0 {
            n /= p;
            count += 1;
        }
        if count > 0 {
            factors.push((p, count));
        }
        p += if p == 2 { 1 } else { 2 };
    }

    if n > 1 {
        factors.push((n, 1));
    }

    Some(factors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn reduced_rational() {
        assert_eq!(rat(6, -4), Rational::from((-3, 2)));
    }

    #[test]
    fn factorization() {
        assert_eq!(prime_factorization(&int(1)), Some(vec![]));
        assert_eq!(prime_factorization(&int(12)), Some(vec![(2, 2), (3, 1)]));
        assert_eq!(prime_factorization(&int(97)), Some(vec![(97, 1)]));
        assert_eq!(prime_factorization(&int(1_000_000)), Some(vec![(2, 6), (5, 6)]));
    }

    #[test]
    fn factorization_too_large() {
        let n = int(1) << 60u32;
        assert_eq!(prime_factorization(&n), None);
    }
}
