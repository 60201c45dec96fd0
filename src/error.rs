//! Error types for domain construction and inference.
//!
//! `ConfigError` is fatal: the model must not be used until the
//! configuration is fixed and rebuilt. `InferenceError` is returned per
//! call and leaves the model usable; how to surface it is the caller's
//! decision.

use thiserror::Error;

/// Domain-definition failures, raised once at construction time.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("variable `{variable}`: universe [{min}, {max}] is not a valid range")]
    InvalidUniverse {
        variable: String,
        min: f64,
        max: f64,
    },

    #[error("variable `{variable}`: resolution {step} must be positive and smaller than the universe span")]
    InvalidResolution {
        variable: String,
        step: f64,
    },

    #[error("variable `{variable}` defines no fuzzy sets")]
    NoSets {
        variable: String,
    },

    #[error("variable `{variable}`: duplicate fuzzy set label `{label}`")]
    DuplicateLabel {
        variable: String,
        label: String,
    },

    #[error("variable `{variable}`, set `{label}`: needs at least two distinct breakpoints")]
    TooFewBreakpoints {
        variable: String,
        label: String,
    },

    #[error("variable `{variable}`, set `{label}`: breakpoints must be non-decreasing ({value} follows {previous})")]
    BreakpointsNotSorted {
        variable: String,
        label: String,
        previous: f64,
        value: f64,
    },

    #[error("variable `{variable}`, set `{label}`: breakpoint {value} lies outside the universe [{min}, {max}]")]
    BreakpointOutOfRange {
        variable: String,
        label: String,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("variable `{variable}`, set `{label}`: membership degree {degree} is outside [0, 1]")]
    DegreeOutOfRange {
        variable: String,
        label: String,
        degree: f64,
    },

    #[error("duplicate variable name `{name}`")]
    DuplicateVariable {
        name: String,
    },

    #[error("rule references unknown variable `{name}`")]
    UnknownVariable {
        name: String,
    },

    #[error("rule references unknown set `{label}` on variable `{variable}`")]
    UnknownLabel {
        variable: String,
        label: String,
    },

    #[error("variable `{variable}` is not an input and cannot appear in an antecedent")]
    NotAnInput {
        variable: String,
    },

    #[error("variable `{variable}` is not an output and cannot appear in a consequent")]
    NotAnOutput {
        variable: String,
    },

    #[error("antecedent contains an empty all/any group")]
    EmptyAntecedent,

    #[error("rule weight {weight} is outside [0, 1]")]
    WeightOutOfRange {
        weight: f64,
    },

    #[error("rule base is empty")]
    EmptyRuleBase,

    #[error("no rule references set `{label}` of input variable `{variable}`")]
    UncoveredSet {
        variable: String,
        label: String,
    },
}

/// Per-call inference failures.
///
/// `DegenerateOutput` is the interesting one: every rule fired at zero
/// strength, so the aggregated output set has no mass and a crisp value
/// would be a guess. The remaining variants are only reachable when a rule
/// base is assembled through the unchecked builder API.
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("aggregated output for `{variable}` has zero mass; no rule fired for this input")]
    DegenerateOutput {
        variable: String,
    },

    #[error("no crisp input supplied for variable `{variable}`")]
    MissingInput {
        variable: String,
    },

    #[error("rule references unknown set `{label}` on variable `{variable}`")]
    UnknownLabel {
        variable: String,
        label: String,
    },

    #[error("rule references a variable that is not registered")]
    UnknownVariable,
}
