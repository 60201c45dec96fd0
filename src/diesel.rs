//! The Poland diesel pricing model.
//!
//! Retail diesel pricing in Poland tracks three market factors, each rated
//! on a 0-10 severity scale: how expensive diesel is worldwide, how severe
//! the excise duty is, and how unprofitable the zloty/dollar exchange rate
//! is. The relationship is linguistic rather than formulaic — when any
//! factor is unfavorable the final price leans high, when any is favorable
//! it leans low — which is exactly the kind of knowledge a Mamdani rule
//! base encodes well.
//!
//! The domain knowledge lives in [`poland_model`] as a plain configuration
//! record; [`DieselEstimator`] builds it once and answers estimates.

use crate::config::{
    Antecedent, Consequent, Model, ModelConfig, Role, RuleConfig, SetConfig, Shape, VariableConfig,
};
use crate::error::{ConfigError, InferenceError};
use crate::inference::Mamdani;
use crate::inputs::Inputs;
use crate::variable::VarHandle;

const GLOBAL_PRICE: &str = "global_price";
const EXCISE_DUTY: &str = "excise_duty";
const EXCHANGE_RATE: &str = "exchange_rate";
const FINAL_PRICE: &str = "final_price";

/// Excise-duty severity assumed by [`DieselEstimator::estimate_poland_price`]
/// (roughly 1.5 zl per liter on the 0-10 scale).
pub const REFERENCE_EXCISE_DUTY: f64 = 1.59;

/// Exchange-rate severity assumed by
/// [`DieselEstimator::estimate_poland_price`] (roughly 4.2 zl per dollar on
/// the 0-10 scale).
pub const REFERENCE_EXCHANGE_RATE: f64 = 4.21;

/// Crisp market factors for one estimate, each on the 0-10 severity scale.
#[derive(Clone, Copy, Debug)]
pub struct Market {
    pub global_price: f64,
    pub excise_duty: f64,
    pub exchange_rate: f64,
}

impl Market {
    /// A market where everything but the global price sits at the
    /// documented reference levels.
    pub fn at_reference(global_price: f64) -> Self {
        Market {
            global_price,
            excise_duty: REFERENCE_EXCISE_DUTY,
            exchange_rate: REFERENCE_EXCHANGE_RATE,
        }
    }
}

fn graded_input(name: &str) -> VariableConfig {
    VariableConfig {
        name: name.to_owned(),
        role: Role::Input,
        universe: [0., 10.],
        resolution: 0.01,
        sets: vec![
            SetConfig {
                label: "poor".to_owned(),
                shape: Shape::Triangle([0., 0., 5.]),
            },
            SetConfig {
                label: "average".to_owned(),
                shape: Shape::Triangle([0., 5., 10.]),
            },
            SetConfig {
                label: "good".to_owned(),
                shape: Shape::Triangle([5., 10., 10.]),
            },
        ],
    }
}

fn any_factor(set: &str) -> Antecedent {
    Antecedent::Any(
        [GLOBAL_PRICE, EXCISE_DUTY, EXCHANGE_RATE]
            .into_iter()
            .map(|variable| Antecedent::Is {
                variable: variable.to_owned(),
                set: set.to_owned(),
            })
            .collect(),
    )
}

fn price_rule(from: &str, to: &str) -> RuleConfig {
    RuleConfig {
        when: any_factor(from),
        then: Consequent {
            variable: FINAL_PRICE.to_owned(),
            set: to.to_owned(),
        },
        weight: 1.0,
    }
}

/// The hand-authored Poland diesel model as a versionable artifact.
///
/// Three graded inputs (poor/average/good over 0-10) drive one output
/// (low/medium/high over the same scale) through order-preserving rules:
/// any factor poor pulls the final price low, any factor average pulls it
/// medium, any factor good (that is, unfavorable) pulls it high.
pub fn poland_model() -> ModelConfig {
    ModelConfig {
        variables: vec![
            graded_input(GLOBAL_PRICE),
            graded_input(EXCISE_DUTY),
            graded_input(EXCHANGE_RATE),
            VariableConfig {
                name: FINAL_PRICE.to_owned(),
                role: Role::Output,
                universe: [0., 10.],
                resolution: 0.01,
                sets: vec![
                    SetConfig {
                        label: "low".to_owned(),
                        shape: Shape::Triangle([0., 0., 5.]),
                    },
                    SetConfig {
                        label: "medium".to_owned(),
                        shape: Shape::Triangle([0., 5., 10.]),
                    },
                    SetConfig {
                        label: "high".to_owned(),
                        shape: Shape::Triangle([5., 10., 10.]),
                    },
                ],
            },
        ],
        rules: vec![
            price_rule("poor", "low"),
            price_rule("average", "medium"),
            price_rule("good", "high"),
        ],
    }
}

/// Poland diesel price estimator: the [`poland_model`] definition compiled
/// once, plus a Mamdani engine. Construction validates everything; the
/// estimator itself is immutable and freely shareable between threads.
pub struct DieselEstimator {
    model: Model,
    engine: Mamdani,
    global_price: VarHandle,
    excise_duty: VarHandle,
    exchange_rate: VarHandle,
    final_price: VarHandle,
}

impl DieselEstimator {
    /// Builds the estimator with the default Mamdani operator set.
    pub fn new() -> Result<Self, ConfigError> {
        Self::with_engine(Mamdani::default())
    }

    /// Builds the estimator with a custom operator configuration.
    pub fn with_engine(engine: Mamdani) -> Result<Self, ConfigError> {
        let model = poland_model().build()?;
        let handle = |name: &str| {
            model.handle(name).ok_or_else(|| ConfigError::UnknownVariable {
                name: name.to_owned(),
            })
        };
        let global_price = handle(GLOBAL_PRICE)?;
        let excise_duty = handle(EXCISE_DUTY)?;
        let exchange_rate = handle(EXCHANGE_RATE)?;
        let final_price = handle(FINAL_PRICE)?;

        Ok(DieselEstimator {
            model,
            engine,
            global_price,
            excise_duty,
            exchange_rate,
            final_price,
        })
    }

    /// Estimates the final price for a full market description.
    ///
    /// Factors outside the 0-10 scale saturate at the scale boundary; they
    /// are clamped, not rejected.
    pub fn estimate(&self, market: &Market) -> Result<f64, InferenceError> {
        let mut inputs = Inputs::new();

        inputs.add(self.global_price, market.global_price);
        inputs.add(self.excise_duty, market.excise_duty);
        inputs.add(self.exchange_rate, market.exchange_rate);

        let outputs = self
            .engine
            .infer(self.model.variables(), self.model.rules(), &inputs)?;

        outputs
            .crisp(self.final_price)
            .ok_or_else(|| InferenceError::DegenerateOutput {
                variable: FINAL_PRICE.to_owned(),
            })
    }

    /// Estimates the Poland diesel price from the global benchmark alone,
    /// holding excise duty and exchange rate at the reference levels.
    pub fn estimate_poland_price(&self, global_price: f64) -> Result<f64, InferenceError> {
        self.estimate(&Market::at_reference(global_price))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_market_estimate_is_stable() {
        let estimator = DieselEstimator::new().unwrap();
        let estimate = estimator
            .estimate(&Market {
                global_price: 1.30,
                excise_duty: 1.59,
                exchange_rate: 4.21,
            })
            .unwrap();

        assert!((estimate - 4.252488472922298).abs() < 1e-6);
    }

    #[test]
    fn estimate_is_monotone_in_the_global_price() {
        let estimator = DieselEstimator::new().unwrap();
        let mut prev = estimator.estimate_poland_price(0.).unwrap();

        for i in 1..=100 {
            let next = estimator.estimate_poland_price(f64::from(i) * 0.1).unwrap();

            assert!(next >= prev - 1e-12, "estimate decreased near {}", f64::from(i) * 0.1);
            prev = next;
        }
    }

    #[test]
    fn extreme_global_prices_saturate() {
        let estimator = DieselEstimator::new().unwrap();

        assert_eq!(
            estimator.estimate_poland_price(-1000.).unwrap(),
            estimator.estimate_poland_price(0.).unwrap()
        );
        assert_eq!(
            estimator.estimate_poland_price(1e12).unwrap(),
            estimator.estimate_poland_price(10.).unwrap()
        );
    }

    #[test]
    fn repeated_estimates_are_bit_identical() {
        let estimator = DieselEstimator::new().unwrap();
        let a = estimator.estimate_poland_price(1.30).unwrap();
        let b = estimator.estimate_poland_price(1.30).unwrap();

        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn scale_implication_also_lands_in_range() {
        use crate::ops::Implication;

        let mut engine = Mamdani::default();

        engine.implication = Implication::Scale;

        let estimator = DieselEstimator::with_engine(engine).unwrap();
        let estimate = estimator.estimate_poland_price(1.30).unwrap();

        assert!((0. ..=10.).contains(&estimate));
    }
}
