//! Data-driven domain definition.
//!
//! The domain knowledge — variables, set shapes, rules — lives in plain
//! serde records so it can be versioned, diffed, and tested on its own,
//! apart from the engine. `ModelConfig::build` runs the whole validation
//! pass once and hands back an immutable [`Model`]; after that point no
//! configuration error can surface at inference time.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::dsl::Expr;
use crate::error::ConfigError;
use crate::rules::Rules;
use crate::variable::{FuzzySet, LinguisticVariable, VarHandle, Variables};

/// Grid step used when a variable does not specify one.
pub const DEFAULT_RESOLUTION: f64 = 0.01;

fn default_resolution() -> f64 {
    DEFAULT_RESOLUTION
}

fn default_weight() -> f64 {
    1.0
}

/// A complete model: variables plus the rule base relating them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    pub variables: Vec<VariableConfig>,
    pub rules: Vec<RuleConfig>,
}

/// Whether a variable may appear in antecedents or in consequents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Input,
    Output,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VariableConfig {
    pub name: String,
    pub role: Role,
    /// Universe of discourse as `[min, max]`.
    pub universe: [f64; 2],
    /// Discretization step; the only resource knob, fixed here.
    #[serde(default = "default_resolution")]
    pub resolution: f64,
    pub sets: Vec<SetConfig>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SetConfig {
    pub label: String,
    pub shape: Shape,
}

/// Membership function shapes, by their ordered breakpoints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    /// `[a, b, c]`: feet at `a` and `c`, peak at `b`.
    Triangle([f64; 3]),
    /// `[a, b, c, d]`: feet at `a` and `d`, plateau from `b` to `c`.
    Trapezoid([f64; 4]),
    /// Explicit `[value, degree]` breakpoints.
    Points(Vec<[f64; 2]>),
}

impl Shape {
    fn to_set(&self, label: &str) -> FuzzySet {
        match self {
            Shape::Triangle([a, b, c]) => FuzzySet::triangle(label, *a, *b, *c),
            Shape::Trapezoid([a, b, c, d]) => FuzzySet::trapezoid(label, *a, *b, *c, *d),
            Shape::Points(points) => {
                FuzzySet::from_points(label, points.iter().map(|&[x, y]| (x, y)))
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RuleConfig {
    pub when: Antecedent,
    pub then: Consequent,
    #[serde(default = "default_weight")]
    pub weight: f64,
}

/// Antecedent tree: `is` propositions under `all`/`any` combinators.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Antecedent {
    Is { variable: String, set: String },
    All(Vec<Antecedent>),
    Any(Vec<Antecedent>),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Consequent {
    pub variable: String,
    pub set: String,
}

/// An immutable, fully validated model ready for inference.
#[derive(Debug)]
pub struct Model {
    variables: Variables,
    rules: Rules,
    handles: HashMap<String, (VarHandle, Role)>,
}

impl Model {
    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Handle for the variable named `name`.
    pub fn handle(&self, name: &str) -> Option<VarHandle> {
        self.handles.get(name).map(|&(handle, _)| handle)
    }
}

impl ModelConfig {
    /// Validates the whole definition and builds the runtime model.
    ///
    /// Beyond per-variable checks (universe, resolution, breakpoints,
    /// degrees, duplicate labels), rules are resolved against the declared
    /// variables and roles, weights are range-checked, and every input
    /// fuzzy set must be referenced by at least one rule — an unreferenced
    /// set means some inputs could fire no rule at all, which is a
    /// configuration hole, not a runtime condition.
    pub fn build(&self) -> Result<Model, ConfigError> {
        let mut variables = Variables::new();
        let mut handles: HashMap<String, (VarHandle, Role)> = HashMap::new();

        for var in &self.variables {
            if handles.contains_key(&var.name) {
                return Err(ConfigError::DuplicateVariable {
                    name: var.name.clone(),
                });
            }

            let sets = var
                .sets
                .iter()
                .map(|set| set.shape.to_set(&set.label))
                .collect();
            let built = LinguisticVariable::new(
                &var.name,
                var.universe[0]..=var.universe[1],
                var.resolution,
                sets,
            )?;

            handles.insert(var.name.clone(), (variables.add(built), var.role));
        }

        if self.rules.is_empty() {
            return Err(ConfigError::EmptyRuleBase);
        }

        let mut rules = Rules::with_capacity(self.rules.len());
        let mut referenced: Vec<(String, String)> = Vec::new();

        for rule in &self.rules {
            if !(0.0..=1.0).contains(&rule.weight) {
                return Err(ConfigError::WeightOutOfRange {
                    weight: rule.weight,
                });
            }

            let premise = resolve(&rule.when, &variables, &handles, &mut referenced)?;
            let (handle, role) = lookup(&handles, &rule.then.variable)?;

            if role != Role::Output {
                return Err(ConfigError::NotAnOutput {
                    variable: rule.then.variable.clone(),
                });
            }
            check_label(&variables, handle, &rule.then.variable, &rule.then.set)?;

            rules.add_weighted(premise, handle, &rule.then.set, rule.weight);
        }

        for var in &self.variables {
            if var.role != Role::Input {
                continue;
            }
            for set in &var.sets {
                let covered = referenced
                    .iter()
                    .any(|(v, l)| *v == var.name && *l == set.label);

                if !covered {
                    return Err(ConfigError::UncoveredSet {
                        variable: var.name.clone(),
                        label: set.label.clone(),
                    });
                }
            }
        }

        Ok(Model {
            variables,
            rules,
            handles,
        })
    }
}

fn lookup(
    handles: &HashMap<String, (VarHandle, Role)>,
    name: &str,
) -> Result<(VarHandle, Role), ConfigError> {
    handles
        .get(name)
        .copied()
        .ok_or_else(|| ConfigError::UnknownVariable {
            name: name.to_owned(),
        })
}

fn check_label(
    variables: &Variables,
    handle: VarHandle,
    variable: &str,
    label: &str,
) -> Result<(), ConfigError> {
    let known = variables
        .get(handle)
        .is_some_and(|var| var.labels().any(|l| l == label));

    if known {
        Ok(())
    } else {
        Err(ConfigError::UnknownLabel {
            variable: variable.to_owned(),
            label: label.to_owned(),
        })
    }
}

fn resolve(
    antecedent: &Antecedent,
    variables: &Variables,
    handles: &HashMap<String, (VarHandle, Role)>,
    referenced: &mut Vec<(String, String)>,
) -> Result<Expr, ConfigError> {
    match antecedent {
        Antecedent::Is { variable, set } => {
            let (handle, role) = lookup(handles, variable)?;

            if role != Role::Input {
                return Err(ConfigError::NotAnInput {
                    variable: variable.clone(),
                });
            }
            check_label(variables, handle, variable, set)?;
            referenced.push((variable.clone(), set.clone()));

            Ok(handle.is(set))
        }
        Antecedent::All(children) | Antecedent::Any(children) => {
            if children.is_empty() {
                return Err(ConfigError::EmptyAntecedent);
            }

            let exprs = children
                .iter()
                .map(|child| resolve(child, variables, handles, referenced))
                .collect::<Result<Vec<_>, _>>()?;

            Ok(match antecedent {
                Antecedent::All(_) => Expr::all(exprs),
                _ => Expr::any(exprs),
            })
        }
    }
}
