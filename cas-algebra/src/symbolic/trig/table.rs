//! Lookup tables of the trigonometric functions at constructible angles.
//!
//! The sine and cosine of multiples of `pi/6` and `pi/4` can be written exactly with square roots.
//! Angles are normalized by dividing them by `2pi`, so that every input angle maps to a fraction
//! of a full turn between 0 and 1. The tables are keyed by that fraction in units of `1/24` of a
//! turn (15 degrees), which is the coarsest grid containing every constructible angle handled
//! here.

use crate::consts::{ONE, ONE_HALF, ZERO};
use crate::symbolic::expr::Expr;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// The number of table units in a full turn.
pub const TURN: u32 = 24;

/// The output of a trigonometric function, which may need to be negated.
#[derive(Debug, Clone)]
pub struct TrigOut {
    /// The magnitude of the output.
    pub output: Expr,

    /// Whether the output should be negated.
    pub neg: bool,
}

/// Common outputs of trigonometric functions.
///
/// The outputs `0`, `1/2`, and `1` are not included in this module. The constants [`ZERO`],
/// [`ONE_HALF`], and [`ONE`] are used instead.
pub mod output {
    use super::*;

    /// sqrt(2)/2
    pub static SQRT_TWO_HALF: Lazy<Expr> = Lazy::new(|| Expr::Mul(vec![
        ONE_HALF.clone(),
        Expr::Exp(Box::new(Expr::integer(2)), Box::new(ONE_HALF.clone())),
    ]));

    /// sqrt(3)/2
    pub static SQRT_THREE_HALF: Lazy<Expr> = Lazy::new(|| Expr::Mul(vec![
        ONE_HALF.clone(),
        Expr::Exp(Box::new(Expr::integer(3)), Box::new(ONE_HALF.clone())),
    ]));
}

/// The sine of an angle in the first half turn, `0 <= k <= 12` units.
fn upper_half_sine(k: u32) -> Option<Expr> {
    let value = match k.min(TURN / 2 - k) {
        0 => ZERO.clone(),
        2 => ONE_HALF.clone(),
        3 => output::SQRT_TWO_HALF.clone(),
        4 => output::SQRT_THREE_HALF.clone(),
        6 => ONE.clone(),
        _ => return None,
    };
    Some(value)
}

/// Builds the sine table: `sin(x + pi) = -sin(x)`.
fn sine_table() -> HashMap<u32, TrigOut> {
    (0..TURN)
        .filter_map(|k| {
            let half = TURN / 2;
            let output = upper_half_sine(k % half)?;
            Some((k, TrigOut { output, neg: k >= half }))
        })
        .collect()
}

/// The values of `sin(k/24 * 2pi)`.
pub static SIN_TABLE: Lazy<HashMap<u32, TrigOut>> = Lazy::new(sine_table);

/// The values of `cos(k/24 * 2pi)`, using `cos(x) = sin(x + pi/2)`.
pub static COS_TABLE: Lazy<HashMap<u32, TrigOut>> = Lazy::new(|| {
    let sine = sine_table();
    (0..TURN)
        .filter_map(|k| {
            let out = sine.get(&((k + TURN / 4) % TURN))?;
            Some((k, out.clone()))
        })
        .collect()
});

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn table_sizes() {
        assert_eq!(SIN_TABLE.len(), 16);
        assert_eq!(COS_TABLE.len(), 16);
    }

    #[test]
    fn quadrants() {
        // sin(7pi/6) = -1/2
        let out = &SIN_TABLE[&14];
        assert_eq!((&out.output, out.neg), (&*ONE_HALF, true));

        // cos(3pi/4) = -sqrt(2)/2
        let out = &COS_TABLE[&9];
        assert_eq!((&out.output, out.neg), (&*output::SQRT_TWO_HALF, true));

        // cos(0) = 1
        let out = &COS_TABLE[&0];
        assert_eq!((&out.output, out.neg), (&*ONE, false));
    }
}
