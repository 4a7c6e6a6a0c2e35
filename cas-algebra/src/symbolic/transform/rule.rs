use crate::symbolic::expr::{Expr, MetaVar, Primary};

/// Replaces the placeholder symbols `a_`, `b_` and `x_` with their rewrite slots.
fn substitute_placeholders(expr: &Expr) -> Expr {
    match expr {
        Expr::Primary(Primary::Symbol(name)) => match MetaVar::from_placeholder(name) {
            Some(meta) => meta.into(),
            None => expr.clone(),
        },
        Expr::Primary(Primary::Call(name, args)) => {
            Expr::call(name, args.iter().map(substitute_placeholders).collect())
        },
        Expr::Primary(Primary::Tensor(tensor)) => tensor.map(substitute_placeholders).into(),
        Expr::Primary(_) => expr.clone(),
        Expr::Add(terms) => Expr::Add(terms.iter().map(substitute_placeholders).collect()),
        Expr::Mul(factors) => Expr::Mul(factors.iter().map(substitute_placeholders).collect()),
        Expr::Exp(base, exp) => Expr::Exp(
            Box::new(substitute_placeholders(base)),
            Box::new(substitute_placeholders(exp)),
        ),
    }
}

/// A rewrite rule: an expression matching the pattern is rewritten to the replacement, if every
/// guard holds.
///
/// Rules are written with the placeholder symbols `a_`, `b_` and `x_`. `x_` stands for the free
/// variable of the transformation, while `a_` and `b_` are searched for among the
/// sub-expressions of the expression being transformed.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    /// The pattern to match.
    pub(crate) pattern: Expr,

    /// The expression to produce when the pattern matches.
    pub(crate) replacement: Expr,

    /// Conditions that must all evaluate to a non-zero value for the rule to apply.
    pub(crate) guards: Vec<Expr>,
}

impl Rule {
    /// Creates a rule, replacing the placeholder symbols in each part with rewrite slots.
    ///
    /// ```
    /// use cas_algebra::symbolic::{expr::{Expr, MetaVar}, Rule};
    ///
    /// // a_ * x_ -> a_
    /// let pattern = Expr::Mul(vec![Expr::symbol("a_"), Expr::symbol("x_")]);
    /// let rule = Rule::new(pattern, Expr::symbol("a_"), vec![]);
    /// assert_eq!(rule.replacement(), &Expr::from(MetaVar::A));
    /// ```
    pub fn new(pattern: Expr, replacement: Expr, guards: Vec<Expr>) -> Self {
        Self {
            pattern: substitute_placeholders(&pattern),
            replacement: substitute_placeholders(&replacement),
            guards: guards.iter().map(substitute_placeholders).collect(),
        }
    }

    /// Returns the pattern of the rule.
    pub fn pattern(&self) -> &Expr {
        &self.pattern
    }

    /// Returns the replacement of the rule.
    pub fn replacement(&self) -> &Expr {
        &self.replacement
    }

    /// Returns the guards of the rule.
    pub fn guards(&self) -> &[Expr] {
        &self.guards
    }
}
