use std::collections::HashMap;

use crate::variable::{VarHandle, VariableKey};

/// Crisp input values for one inference call, keyed by variable.
#[derive(Default)]
pub struct Inputs(pub(crate) HashMap<VariableKey, f64>);

impl Inputs {
    pub fn new() -> Self {
        Inputs(HashMap::new())
    }

    pub fn add(&mut self, var: VarHandle, value: f64) {
        self.0.insert(var.0, value);
    }

    pub fn get(&self, var: VarHandle) -> Option<f64> {
        self.0.get(&var.0).copied()
    }
}
