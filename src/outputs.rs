use std::collections::HashMap;

use crate::variable::{VarHandle, VariableKey};

/// Results of one inference call: the crisp defuzzified value per output
/// variable, plus the aggregated output set it was derived from.
#[derive(Debug)]
pub struct Outputs {
    crisp: HashMap<VariableKey, f64>,
    aggregated: HashMap<VariableKey, Vec<f64>>,
}

impl Outputs {
    pub(crate) fn new(crisp: HashMap<VariableKey, f64>, aggregated: HashMap<VariableKey, Vec<f64>>) -> Self {
        Self { crisp, aggregated }
    }

    /// The defuzzified value for `var`, if any rule targeted it.
    pub fn crisp(&self, var: VarHandle) -> Option<f64> {
        self.crisp.get(&var.0).copied()
    }

    /// The aggregated membership over `var`'s universe grid, for
    /// inspection; aligned with `LinguisticVariable::universe`.
    pub fn aggregated(&self, var: VarHandle) -> Option<&[f64]> {
        self.aggregated.get(&var.0).map(Vec::as_slice)
    }
}
