//! Rule base: IF-THEN rules relating input sets to output sets.

use crate::dsl::Expr;
use crate::variable::{VarHandle, VariableKey};

/// Ordered collection of fuzzy rules.
///
/// This builder performs no cross-validation against a variable registry;
/// unknown labels surface as inference errors. The validated construction
/// path is [`crate::config::ModelConfig::build`].
#[derive(Debug, Default)]
pub struct Rules(pub(crate) Vec<Rule>);

impl Rules {
    pub fn new() -> Self {
        Rules(Vec::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Rules(Vec::with_capacity(capacity))
    }

    /// Adds a rule with the default weight of 1.0.
    pub fn add(&mut self, premise: Expr, output: VarHandle, label: impl Into<String>) {
        self.add_weighted(premise, output, label, 1.0);
    }

    /// Adds a rule whose firing strength is scaled by `weight` in [0, 1].
    pub fn add_weighted(&mut self, premise: Expr, output: VarHandle, label: impl Into<String>, weight: f64) {
        self.0.push(Rule {
            premise,
            consequent: (output.0, label.into()),
            weight,
        });
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug)]
pub(crate) struct Rule {
    pub(crate) premise: Expr,
    pub(crate) consequent: (VariableKey, String),
    pub(crate) weight: f64,
}
