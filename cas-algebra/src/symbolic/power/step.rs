/// The identity applied by the power normalizer.
///
/// Only the identity applied at the top level of a call to
/// [`power_with_steps`](super::power_with_steps) is reported; powers normalized recursively while
/// applying it are not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// `1^x = 1`
    PowerOneLeft,

    /// `x^0 = 1`
    PowerZero,

    /// `x^1 = x`
    PowerOne,

    /// `(-1)^-1 = -1`
    MinusOneInverse,

    /// `(-1)^(1/2) = i` and `(-1)^(-1/2) = -i`
    ImaginaryUnit,

    /// `(-1)^(p/q)` converted to rectangular form.
    ClockForm,

    /// Exact power of two rational numbers, such as `12^(1/2) = 2 * 3^(1/2)`.
    RationalPower,

    /// Power of two numbers, at least one of which is a float.
    FloatPower,

    /// Integer power of a square matrix.
    TensorPower,

    /// `abs(x)^(2n) = x^(2n)` for real `x`.
    AbsEvenPower,

    /// `e^log(x) = x`
    ExpLog,

    /// `e^x` for a float `x`.
    ExpFloat,

    /// `e^(i*pi*...)` converted to rectangular form.
    EulerRect,

    /// `(ab)^n = a^n * b^n` for an integer `n`.
    DistributePower,

    /// `(a^b)^c = a^(bc)`
    PowerPower,

    /// `(a^(2n))^(1/(2n)) = abs(a)`
    PowerAbs,

    /// Expansion of an integer power of a sum with the multinomial theorem.
    Multinomial,

    /// `sin(x)^2 = 1 - cos(x)^2` or `cos(x)^2 = 1 - sin(x)^2`, depending on the trigonometric mode.
    TrigSquare,

    /// `(a + bi)^n` for a positive integer `n`, computed from the parts.
    ComplexIntegerPower,

    /// `(a + bi)^-n = ((a - bi) / (a^2 + b^2))^n`
    ComplexInverse,

    /// `z^x = abs(z)^x * (-1)^(arg(z) * x / pi)` for a complex number `z`.
    ComplexPower,

    /// `e^(n/2 * i * pi)` is one of `1`, `i`, `-1` or `-i`.
    QuarterTurn,

    /// No identity applies; the power is left as it is.
    Unreduced,
}
