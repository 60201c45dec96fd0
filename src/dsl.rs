//! Small expression language for rule antecedents.

use crate::variable::{VarHandle, VariableKey};

/// Rule antecedent: `is` propositions composed with fuzzy AND/OR.
#[derive(Clone, Debug)]
pub enum Expr {
    Is(VariableKey, String),
    And(Vec<Expr>),
    Or(Vec<Expr>),
}

impl Expr {
    pub fn and(self, rhs: Expr) -> Self {
        Expr::And(vec![self, rhs])
    }

    pub fn or(self, rhs: Expr) -> Self {
        Expr::Or(vec![self, rhs])
    }

    /// N-ary AND over `exprs`.
    pub fn all(exprs: Vec<Expr>) -> Self {
        Expr::And(exprs)
    }

    /// N-ary OR over `exprs`.
    pub fn any(exprs: Vec<Expr>) -> Self {
        Expr::Or(exprs)
    }

    /// Flattens the expression into its `(variable, label)` propositions.
    pub fn propositions(&self) -> Vec<(VariableKey, &str)> {
        fn walk<'e>(expr: &'e Expr, out: &mut Vec<(VariableKey, &'e str)>) {
            match expr {
                Expr::Is(var_key, label) => out.push((*var_key, label)),
                Expr::And(exprs) | Expr::Or(exprs) => {
                    for expr in exprs {
                        walk(expr, out);
                    }
                }
            }
        }

        let mut props = Vec::new();

        walk(self, &mut props);

        props
    }
}

impl VarHandle {
    /// Proposition "this variable is `label`".
    pub fn is(self, label: impl Into<String>) -> Expr {
        Expr::Is(self.0, label.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variable::{FuzzySet, LinguisticVariable, Variables};

    #[test]
    fn propositions_flatten_nested_expressions() {
        let mut vars = Variables::new();
        let a = vars.add(
            LinguisticVariable::new(
                "a",
                0. ..=1.,
                0.1,
                vec![FuzzySet::triangle("low", 0., 0., 1.)],
            )
            .unwrap(),
        );
        let b = vars.add(
            LinguisticVariable::new(
                "b",
                0. ..=1.,
                0.1,
                vec![FuzzySet::triangle("high", 0., 1., 1.)],
            )
            .unwrap(),
        );

        let expr = a.is("low").and(b.is("high").or(a.is("low")));
        let props = expr.propositions();

        assert_eq!(props.len(), 3);
        assert_eq!(props[0].1, "low");
        assert_eq!(props[1].1, "high");
    }
}
