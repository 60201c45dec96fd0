//! Operator configuration for the inference engine.

/// And operator method for combining the degrees of propositions
/// in a fuzzy rule premise.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AndOp {
    Min,
    Prod,
    BoundedProd,
    DrasticProd,
}

impl AndOp {
    pub fn apply(self, u: f64, v: f64) -> f64 {
        match self {
            Self::Min => u.min(v),
            Self::Prod => u * v,
            Self::BoundedProd => (u + v - 1.).max(0.),
            Self::DrasticProd => {
                if v == 0. {
                    u
                } else if u == 1. {
                    v
                } else {
                    0.
                }
            }
        }
    }
}

/// Or operator method for combining the degrees of propositions in a
/// fuzzy rule premise, and for aggregating clipped rule outputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrOp {
    Max,
    ProbOr,
    BoundedSum,
    DrasticSum,
}

impl OrOp {
    pub fn apply(self, u: f64, v: f64) -> f64 {
        match self {
            Self::Max => u.max(v),
            Self::ProbOr => u + v - u * v,
            Self::BoundedSum => (u + v).min(1.),
            Self::DrasticSum => {
                if v == 0. {
                    u
                } else if u == 0. {
                    v
                } else {
                    1.
                }
            }
        }
    }
}

/// How a rule's firing strength shapes its consequent set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Implication {
    /// Mamdani: truncate the consequent membership at the firing strength.
    Clip,
    /// Larsen: scale the consequent membership by the firing strength.
    Scale,
}

impl Implication {
    pub fn apply(self, strength: f64, membership: f64) -> f64 {
        match self {
            Self::Clip => strength.min(membership),
            Self::Scale => strength * membership,
        }
    }
}

/// Method for defuzzificating the aggregated membership function.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Defuzz {
    /// Center of gravity of the aggregated set.
    Centroid,
    /// Value splitting the aggregated area in half.
    Bisector,
    /// Mean of the values for which the membership function is maximum.
    MeanOfMax,
    /// Smallest value for which the membership function is maximum.
    SmallestOfMax,
    /// Largest value for which the membership function is maximum.
    LargestOfMax,
}

impl Defuzz {
    /// Collapses `membership` over `universe` into one crisp value.
    ///
    /// Returns `None` when the aggregated set carries no mass (every rule
    /// fired at zero strength); the engine reports that as a degenerate
    /// output rather than inventing a value.
    pub fn call(self, universe: &[f64], membership: &[f64]) -> Option<f64> {
        match self {
            Self::Centroid => {
                let den: f64 = membership.iter().sum();

                if den == 0. {
                    return None;
                }

                let num: f64 = universe
                    .iter()
                    .zip(membership)
                    .map(|(u, m)| u * m)
                    .sum();

                Some(num / den)
            }
            Self::Bisector => {
                let n_areas = universe.len().saturating_sub(1);
                let mut areas = Vec::with_capacity(n_areas);

                for i in 0..n_areas {
                    let base = universe[i + 1] - universe[i];
                    areas.push((membership[i] + membership[i + 1]) * base / 2.);
                }

                let total: f64 = areas.iter().sum();

                if total == 0. {
                    return None;
                }

                let target = total / 2.;
                let mut cum = 0.;

                for (i, area) in areas.iter().enumerate() {
                    if cum + area >= target {
                        let frac = if *area == 0. { 0. } else { (target - cum) / area };

                        return Some(universe[i] + frac * (universe[i + 1] - universe[i]));
                    }
                    cum += area;
                }

                universe.last().copied()
            }
            Self::MeanOfMax | Self::SmallestOfMax | Self::LargestOfMax => {
                let peak = membership.iter().copied().fold(0., f64::max);

                if peak == 0. {
                    return None;
                }

                let mut at_peak = universe
                    .iter()
                    .zip(membership)
                    .filter(|&(_, m)| *m == peak)
                    .map(|(u, _)| *u);

                match self {
                    Self::SmallestOfMax => at_peak.next(),
                    Self::LargestOfMax => at_peak.last(),
                    _ => {
                        let (count, sum) = at_peak.fold((0usize, 0.), |(n, acc), u| (n + 1, acc + u));

                        Some(sum / count as f64)
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_premise_operators() {
        assert_eq!(AndOp::Min.apply(0.3, 0.7), 0.3);
        assert_eq!(AndOp::Prod.apply(0.5, 0.5), 0.25);
        assert_eq!(AndOp::BoundedProd.apply(0.5, 0.4), 0.);
        assert_eq!(AndOp::BoundedProd.apply(0.8, 0.7), 0.5);
        assert_eq!(AndOp::DrasticProd.apply(0.5, 0.4), 0.);
        assert_eq!(AndOp::DrasticProd.apply(1., 0.4), 0.4);

        assert_eq!(OrOp::Max.apply(0.3, 0.7), 0.7);
        assert_eq!(OrOp::ProbOr.apply(0.5, 0.5), 0.75);
        assert_eq!(OrOp::BoundedSum.apply(0.8, 0.7), 1.);
        assert_eq!(OrOp::DrasticSum.apply(0., 0.4), 0.4);
        assert_eq!(OrOp::DrasticSum.apply(0.5, 0.4), 1.);
    }

    #[test]
    fn test_implication() {
        assert_eq!(Implication::Clip.apply(0.4, 0.9), 0.4);
        assert_eq!(Implication::Clip.apply(0.4, 0.2), 0.2);
        assert_eq!(Implication::Scale.apply(0.4, 0.5), 0.2);
    }

    #[test]
    fn test_defuzz_symmetric_triangle() {
        let universe = [0., 1., 2., 3., 4.];
        let membership = [0., 0.5, 1., 0.5, 0.];

        assert_eq!(Defuzz::Centroid.call(&universe, &membership), Some(2.));
        assert_eq!(Defuzz::Bisector.call(&universe, &membership), Some(2.));
        assert_eq!(Defuzz::MeanOfMax.call(&universe, &membership), Some(2.));
        assert_eq!(Defuzz::SmallestOfMax.call(&universe, &membership), Some(2.));
        assert_eq!(Defuzz::LargestOfMax.call(&universe, &membership), Some(2.));
    }

    #[test]
    fn test_defuzz_asymmetric() {
        let universe = [0., 1., 2., 3., 4.];
        let membership = [0., 1., 0.5, 0., 0.];

        assert_eq!(
            Defuzz::Centroid.call(&universe, &membership),
            Some(2. / 1.5)
        );
        assert_eq!(Defuzz::MeanOfMax.call(&universe, &membership), Some(1.));
    }

    #[test]
    fn test_defuzz_plateau_of_maxima() {
        let universe = [0., 1., 2., 3., 4.];
        let membership = [0., 1., 1., 1., 0.];

        assert_eq!(Defuzz::SmallestOfMax.call(&universe, &membership), Some(1.));
        assert_eq!(Defuzz::LargestOfMax.call(&universe, &membership), Some(3.));
        assert_eq!(Defuzz::MeanOfMax.call(&universe, &membership), Some(2.));
    }

    #[test]
    fn test_defuzz_zero_mass_is_none() {
        let universe = [0., 1., 2.];
        let membership = [0., 0., 0.];

        for op in [
            Defuzz::Centroid,
            Defuzz::Bisector,
            Defuzz::MeanOfMax,
            Defuzz::SmallestOfMax,
            Defuzz::LargestOfMax,
        ] {
            assert_eq!(op.call(&universe, &membership), None);
        }
    }
}
