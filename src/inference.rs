//! The Mamdani inference engine.
//!
//! One call runs the full pipeline: crisp inputs are fuzzified against the
//! input variables, rule premises combine the resulting degrees into firing
//! strengths, each consequent set is clipped (or scaled) at its rule's
//! strength, the clipped sets are aggregated pointwise per output variable,
//! and the aggregate is defuzzified into a crisp value. Configuration is
//! taken by shared reference and never mutated, so one engine value can
//! serve any number of concurrent callers.

use std::collections::HashMap;

use crate::dsl::Expr;
use crate::error::InferenceError;
use crate::inputs::Inputs;
use crate::ops::{AndOp, Defuzz, Implication, OrOp};
use crate::outputs::Outputs;
use crate::rules::Rules;
use crate::variable::{VariableKey, Variables};

/// Operator choices for one inference pipeline.
///
/// The default is the conventional Mamdani configuration: min/max premise
/// combination, clip implication, max aggregation, centroid defuzzification.
#[derive(Clone, Copy, Debug)]
pub struct Mamdani {
    pub and_op: AndOp,
    pub or_op: OrOp,
    pub implication: Implication,
    pub aggregation: OrOp,
    pub defuzz: Defuzz,
}

impl Default for Mamdani {
    fn default() -> Self {
        Self {
            and_op: AndOp::Min,
            or_op: OrOp::Max,
            implication: Implication::Clip,
            aggregation: OrOp::Max,
            defuzz: Defuzz::Centroid,
        }
    }
}

impl Mamdani {
    /// Runs one inference pass over immutable configuration.
    ///
    /// Errors surface degenerate aggregates (no rule fired) and, for rule
    /// bases assembled through the unchecked builder, unknown labels or
    /// missing inputs. Nothing is mutated on any path.
    pub fn infer(&self, vars: &Variables, rules: &Rules, inputs: &Inputs) -> Result<Outputs, InferenceError> {
        let mut aggregated: HashMap<VariableKey, Vec<f64>> = HashMap::new();

        for rule in &rules.0 {
            let strength = self.strength(&rule.premise, vars, inputs)? * rule.weight;
            let (out_key, label) = (&rule.consequent.0, &rule.consequent.1);
            let var = vars.0.get(*out_key).ok_or(InferenceError::UnknownVariable)?;
            let sampled = var.sampled(label).ok_or_else(|| InferenceError::UnknownLabel {
                variable: var.name().to_owned(),
                label: label.clone(),
            })?;
            let agg = aggregated
                .entry(*out_key)
                .or_insert_with(|| vec![0.; sampled.len()]);

            for (a, m) in agg.iter_mut().zip(sampled) {
                *a = self.aggregation.apply(*a, self.implication.apply(strength, *m));
            }
        }

        let mut crisp = HashMap::with_capacity(aggregated.len());

        for (key, membership) in &aggregated {
            let var = &vars.0[*key];
            let value = self
                .defuzz
                .call(var.universe(), membership)
                .ok_or_else(|| InferenceError::DegenerateOutput {
                    variable: var.name().to_owned(),
                })?;

            crisp.insert(*key, value);
        }

        Ok(Outputs::new(crisp, aggregated))
    }

    /// Firing strength of a premise: membership degrees at the leaves,
    /// combined bottom-up with the configured operators.
    fn strength(&self, expr: &Expr, vars: &Variables, inputs: &Inputs) -> Result<f64, InferenceError> {
        match expr {
            Expr::Is(key, label) => {
                let var = vars.0.get(*key).ok_or(InferenceError::UnknownVariable)?;
                let x = inputs
                    .0
                    .get(key)
                    .copied()
                    .ok_or_else(|| InferenceError::MissingInput {
                        variable: var.name().to_owned(),
                    })?;

                var.membership(label, x).ok_or_else(|| InferenceError::UnknownLabel {
                    variable: var.name().to_owned(),
                    label: label.clone(),
                })
            }
            Expr::And(exprs) => {
                let mut acc = 1.;

                for expr in exprs {
                    acc = self.and_op.apply(acc, self.strength(expr, vars, inputs)?);
                }

                Ok(acc)
            }
            Expr::Or(exprs) => {
                let mut acc = 0.;

                for expr in exprs {
                    acc = self.or_op.apply(acc, self.strength(expr, vars, inputs)?);
                }

                Ok(acc)
            }
        }
    }
}
