//! # fuzzy-diesel
//!
//! A Mamdani fuzzy-inference estimator for the retail price of diesel in
//! Poland. The price depends on a handful of market factors — the global
//! diesel benchmark, the excise duty, the zloty/dollar exchange rate — but
//! the dependency is linguistic, not formulaic: *if the global price is
//! high, the domestic price tends to be high*. This crate encodes that
//! knowledge as fuzzy sets and IF-THEN rules and turns a crisp input into
//! a crisp estimate through the usual four stages: fuzzification, rule
//! evaluation, aggregation, defuzzification.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use fuzzy_diesel::DieselEstimator;
//!
//! let estimator = DieselEstimator::new()?;
//!
//! // Global benchmark at 1.30 on the 0-10 severity scale.
//! let price = estimator.estimate_poland_price(1.30)?;
//! ```
//!
//! Custom models are plain data: describe variables, set shapes, and rules
//! with [`ModelConfig`] records, then [`ModelConfig::build`] validates the
//! whole definition once and returns an immutable [`Model`] to run through
//! the [`Mamdani`] engine. Inference never mutates anything, so models and
//! engines can be shared freely across threads.
//!
//! Out-of-range inputs are clamped to the universe boundary by design —
//! extreme inputs saturate rather than fail. A rule base that fires no rule
//! at all for some input is reported as
//! [`InferenceError::DegenerateOutput`] instead of being papered over with
//! a made-up value.

mod config;
mod diesel;
mod dsl;
mod error;
mod inference;
mod inputs;
mod linspace;
mod math;
mod ops;
mod outputs;
mod rules;
mod variable;

pub use config::{
    Antecedent, Consequent, Model, ModelConfig, Role, RuleConfig, SetConfig, Shape,
    VariableConfig, DEFAULT_RESOLUTION,
};
pub use diesel::{
    poland_model, DieselEstimator, Market, REFERENCE_EXCHANGE_RATE, REFERENCE_EXCISE_DUTY,
};
pub use dsl::Expr;
pub use error::{ConfigError, InferenceError};
pub use inference::Mamdani;
pub use inputs::Inputs;
pub use ops::{AndOp, Defuzz, Implication, OrOp};
pub use outputs::Outputs;
pub use rules::Rules;
pub use variable::{FuzzySet, LinguisticVariable, VarHandle, VariableKey, Variables};
