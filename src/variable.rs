//! Linguistic variables and their fuzzy sets.
//!
//! A variable owns a bounded universe of discourse, discretized once at
//! construction, and a collection of uniquely-labelled fuzzy sets given by
//! piecewise-linear breakpoints. Everything here is immutable after
//! `LinguisticVariable::new` succeeds; membership queries are pure.

use std::ops::RangeInclusive;

use slotmap::{new_key_type, SlotMap};

use crate::error::ConfigError;
use crate::linspace::Linspace;
use crate::math::{interp, interp_one};

new_key_type! {
    /// A variable key
    pub struct VariableKey;
}

/// Copyable handle to a variable registered in [`Variables`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct VarHandle(pub(crate) VariableKey);

/// A named fuzzy set: a linguistic label plus the `(value, degree)`
/// breakpoints of its membership function.
#[derive(Clone, Debug)]
pub struct FuzzySet {
    label: String,
    points: Vec<(f64, f64)>,
}

impl FuzzySet {
    /// Builds a set from explicit `(value, degree)` breakpoints.
    ///
    /// Consecutive breakpoints sharing a value collapse into one, keeping
    /// the higher degree, so shoulder shapes like `[0, 0, 5]` evaluate to
    /// their peak at the boundary.
    pub fn from_points(label: impl Into<String>, points: impl IntoIterator<Item = (f64, f64)>) -> Self {
        let mut merged: Vec<(f64, f64)> = Vec::new();

        for (x, y) in points {
            match merged.last_mut() {
                Some((px, py)) if *px == x => *py = py.max(y),
                _ => merged.push((x, y)),
            }
        }

        FuzzySet {
            label: label.into(),
            points: merged,
        }
    }

    /// Triangular membership with feet at `a` and `c` and peak at `b`.
    pub fn triangle(label: impl Into<String>, a: f64, b: f64, c: f64) -> Self {
        Self::from_points(label, [(a, 0.), (b, 1.), (c, 0.)])
    }

    /// Trapezoidal membership with feet at `a` and `d` and a plateau
    /// between `b` and `c`.
    pub fn trapezoid(label: impl Into<String>, a: f64, b: f64, c: f64, d: f64) -> Self {
        Self::from_points(label, [(a, 0.), (b, 1.), (c, 1.), (d, 0.)])
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub(crate) fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// Membership degree at `x`, without universe clamping.
    pub fn membership(&self, x: f64) -> f64 {
        interp_one(x, &self.points)
    }

    fn validate(&self, variable: &str, min_u: f64, max_u: f64) -> Result<(), ConfigError> {
        if self.points.len() < 2 {
            return Err(ConfigError::TooFewBreakpoints {
                variable: variable.to_owned(),
                label: self.label.clone(),
            });
        }

        let mut prev = f64::NEG_INFINITY;

        for &(x, y) in &self.points {
            if !(x >= min_u && x <= max_u) {
                return Err(ConfigError::BreakpointOutOfRange {
                    variable: variable.to_owned(),
                    label: self.label.clone(),
                    value: x,
                    min: min_u,
                    max: max_u,
                });
            }
            if x < prev {
                return Err(ConfigError::BreakpointsNotSorted {
                    variable: variable.to_owned(),
                    label: self.label.clone(),
                    previous: prev,
                    value: x,
                });
            }
            if !(0.0..=1.0).contains(&y) {
                return Err(ConfigError::DegreeOutOfRange {
                    variable: variable.to_owned(),
                    label: self.label.clone(),
                    degree: y,
                });
            }
            prev = x;
        }

        Ok(())
    }
}

/// A linguistic variable: a universe of discourse partitioned into fuzzy
/// sets, with per-set memberships pre-sampled over the universe grid.
#[derive(Debug)]
pub struct LinguisticVariable {
    name: String,
    min_u: f64,
    max_u: f64,
    universe: Vec<f64>,
    sets: Vec<FuzzySet>,
    sampled: Vec<Vec<f64>>,
}

impl LinguisticVariable {
    /// Validates the sets against the universe and discretizes once.
    ///
    /// The grid is the universe sampled at `step` with every set breakpoint
    /// merged in, so the sampled membership vectors hit each vertex exactly.
    pub fn new(
        name: impl Into<String>,
        universe_range: RangeInclusive<f64>,
        step: f64,
        sets: Vec<FuzzySet>,
    ) -> Result<Self, ConfigError> {
        let name = name.into();
        let min_u = *universe_range.start();
        let max_u = *universe_range.end();

        if !(min_u.is_finite() && max_u.is_finite() && min_u < max_u) {
            return Err(ConfigError::InvalidUniverse {
                variable: name,
                min: min_u,
                max: max_u,
            });
        }
        if !(step > 0. && step < max_u - min_u) {
            return Err(ConfigError::InvalidResolution {
                variable: name,
                step,
            });
        }
        if sets.is_empty() {
            return Err(ConfigError::NoSets { variable: name });
        }

        for (i, set) in sets.iter().enumerate() {
            set.validate(&name, min_u, max_u)?;

            if sets[..i].iter().any(|other| other.label == set.label) {
                return Err(ConfigError::DuplicateLabel {
                    variable: name,
                    label: set.label.clone(),
                });
            }
        }

        // floor is closest approx to what python does for int() conversion. But at least one edgecase exists
        // where the decimals are really long: int(4.999999999999999999) == 5
        let num = ((max_u - min_u) / step).floor() as usize + 1;
        let mut universe: Vec<f64> = Linspace::new(min_u, max_u, num).collect();

        universe.extend(sets.iter().flat_map(|set| set.points.iter().map(|&(x, _)| x)));
        universe.sort_unstable_by(|a, b| a.partial_cmp(b).expect("not to find unsortable floats"));
        universe.dedup();

        let sampled = sets
            .iter()
            .map(|set| interp(universe.iter().copied(), &set.points))
            .collect();

        Ok(LinguisticVariable {
            name,
            min_u,
            max_u,
            universe,
            sets,
            sampled,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Universe bounds as `(min, max)`.
    pub fn bounds(&self) -> (f64, f64) {
        (self.min_u, self.max_u)
    }

    /// The discretized universe grid.
    pub fn universe(&self) -> &[f64] {
        &self.universe
    }

    pub fn sets(&self) -> &[FuzzySet] {
        &self.sets
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.sets.iter().map(|set| set.label.as_str())
    }

    pub(crate) fn position(&self, label: &str) -> Option<usize> {
        self.sets.iter().position(|set| set.label == label)
    }

    /// Sampled membership of `label` over the universe grid.
    pub(crate) fn sampled(&self, label: &str) -> Option<&[f64]> {
        self.position(label).map(|i| self.sampled[i].as_slice())
    }

    /// Membership degree of `label` at `x`, or `None` for an unknown label.
    ///
    /// Out-of-range inputs are clamped to the universe boundary, never
    /// extrapolated: an extreme input saturates at the boundary membership.
    pub fn membership(&self, label: &str, x: f64) -> Option<f64> {
        let x = x.clamp(self.min_u, self.max_u);

        self.position(label).map(|i| self.sets[i].membership(x))
    }

    /// Degrees of membership of `x` across all of the variable's sets.
    pub fn fuzzify(&self, x: f64) -> Vec<(&str, f64)> {
        let x = x.clamp(self.min_u, self.max_u);

        self.sets
            .iter()
            .map(|set| (set.label.as_str(), set.membership(x)))
            .collect()
    }
}

/// Registry of linguistic variables, addressed by copyable handles.
#[derive(Debug, Default)]
pub struct Variables(pub(crate) SlotMap<VariableKey, LinguisticVariable>);

impl Variables {
    pub fn new() -> Self {
        Self(SlotMap::with_key())
    }

    pub fn add(&mut self, variable: LinguisticVariable) -> VarHandle {
        VarHandle(self.0.insert(variable))
    }

    pub fn get(&self, handle: VarHandle) -> Option<&LinguisticVariable> {
        self.0.get(handle.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grade() -> Vec<FuzzySet> {
        vec![
            FuzzySet::triangle("poor", 0., 0., 5.),
            FuzzySet::triangle("average", 0., 5., 10.),
            FuzzySet::triangle("good", 5., 10., 10.),
        ]
    }

    #[test]
    fn shoulder_sets_peak_at_the_boundary() {
        let var = LinguisticVariable::new("price", 0. ..=10., 0.01, grade()).unwrap();

        assert_eq!(var.membership("poor", 0.), Some(1.));
        assert_eq!(var.membership("good", 10.), Some(1.));
        assert_eq!(var.membership("average", 5.), Some(1.));
        assert_eq!(var.membership("missing", 5.), None);
    }

    #[test]
    fn out_of_range_inputs_clamp_to_the_boundary() {
        let var = LinguisticVariable::new("price", 0. ..=10., 0.01, grade()).unwrap();

        assert_eq!(var.membership("poor", -1000.), var.membership("poor", 0.));
        assert_eq!(var.membership("good", 1e9), var.membership("good", 10.));
        assert_eq!(var.fuzzify(-1000.), var.fuzzify(0.));
    }

    #[test]
    fn memberships_stay_within_bounds() {
        let var = LinguisticVariable::new("price", 0. ..=10., 0.01, grade()).unwrap();

        for &x in var.universe() {
            let degrees = var.fuzzify(x);

            assert!(degrees.iter().all(|&(_, d)| (0. ..=1.).contains(&d)));
            // The poor/average/good partition leaves no coverage gap.
            assert!(degrees.iter().map(|&(_, d)| d).sum::<f64>() > 0.);
        }
    }

    #[test]
    fn breakpoints_merge_into_the_grid() {
        let sets = vec![
            FuzzySet::triangle("low", 0., 0., 3.),
            FuzzySet::triangle("medium", 1., 3., 5.),
            FuzzySet::triangle("high", 3., 6., 6.),
        ];
        let var = LinguisticVariable::new("price", 0. ..=6., 0.25, sets).unwrap();

        for x in [0., 1., 3., 5., 6.] {
            assert!(var.universe().contains(&x));
        }
        assert_eq!(var.sampled("medium").unwrap().len(), var.universe().len());
    }

    #[test]
    fn malformed_sets_are_rejected() {
        let unsorted = vec![FuzzySet::from_points("bad", [(3., 0.), (1., 1.), (5., 0.)])];
        let err = LinguisticVariable::new("v", 0. ..=10., 0.1, unsorted).unwrap_err();
        assert!(matches!(err, ConfigError::BreakpointsNotSorted { .. }));

        let outside = vec![FuzzySet::triangle("bad", -1., 0., 5.)];
        let err = LinguisticVariable::new("v", 0. ..=10., 0.1, outside).unwrap_err();
        assert!(matches!(err, ConfigError::BreakpointOutOfRange { .. }));

        let degree = vec![FuzzySet::from_points("bad", [(0., 0.), (5., 1.5), (10., 0.)])];
        let err = LinguisticVariable::new("v", 0. ..=10., 0.1, degree).unwrap_err();
        assert!(matches!(err, ConfigError::DegreeOutOfRange { .. }));

        let duplicate = vec![
            FuzzySet::triangle("low", 0., 0., 5.),
            FuzzySet::triangle("low", 5., 10., 10.),
        ];
        let err = LinguisticVariable::new("v", 0. ..=10., 0.1, duplicate).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateLabel { .. }));

        let err = LinguisticVariable::new("v", 10. ..=0., 0.1, grade()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUniverse { .. }));

        let err = LinguisticVariable::new("v", 0. ..=10., 0., grade()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidResolution { .. }));
    }
}
