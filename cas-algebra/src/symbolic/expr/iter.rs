use super::Expr;

/// An iterator that traverses every node of an expression tree in left-to-right post-order
/// (children before their parent). Function call arguments and tensor elements are children too.
///
/// This iterator is created by [`Expr::post_order_iter`].
pub struct ExprIter<'a> {
    /// Nodes waiting to be visited, paired with whether their children were already pushed.
    stack: Vec<(&'a Expr, bool)>,
}

impl<'a> ExprIter<'a> {
    /// Creates a new iterator starting at the given root.
    pub fn new(expr: &'a Expr) -> Self {
        Self { stack: vec![(expr, false)] }
    }
}

impl<'a> Iterator for ExprIter<'a> {
    type Item = &'a Expr;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (expr, expanded) = self.stack.pop()?;
            if expanded {
                return Some(expr);
            }

            let operands = expr.operands();
            if operands.is_empty() {
                return Some(expr);
            }

            self.stack.push((expr, true));
            for operand in operands.into_iter().rev() {
                self.stack.push((operand, false));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn post_order() {
        // 2 + sin(x)^3
        let x = Expr::symbol("x");
        let sin = Expr::call("sin", vec![x.clone()]);
        let cube = Expr::Exp(Box::new(sin.clone()), Box::new(Expr::integer(3)));
        let expr = Expr::Add(vec![Expr::integer(2), cube.clone()]);

        let nodes = expr.post_order_iter().collect::<Vec<_>>();
        assert_eq!(nodes, vec![
            &Expr::integer(2),
            &x,
            &sin,
            &Expr::integer(3),
            &cube,
            &expr,
        ]);
    }
}
