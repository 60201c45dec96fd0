use num::Float;

/// Piecewise-linear interpolation at a single point, similar to
/// numpy.interp. Values left of the first breakpoint take the first
/// ordinate, values right of the last take the last (flat extrapolation).
pub(crate) fn interp_one<F: Float>(x: F, coords: &[(F, F)]) -> F {
    let (first, rest) = match coords {
        [] => return F::zero(),
        [only] => return only.1,
        [first, rest @ ..] => (first, rest),
    };

    if x <= first.0 {
        return first.1;
    }

    let mut prev = *first;

    for &(x2, y2) in rest {
        let (x1, y1) = prev;

        if x <= x2 {
            // Zero-width segments are jumps; take the higher ordinate.
            if x2 == x1 {
                return y1.max(y2);
            }

            return y1 + (x - x1) * (y2 - y1) / (x2 - x1);
        }

        prev = (x2, y2);
    }

    prev.1
}

/// Samples `coords` at every point of `xs`.
pub(crate) fn interp<F: Float>(xs: impl IntoIterator<Item = F>, coords: &[(F, F)]) -> Vec<F> {
    xs.into_iter().map(|x| interp_one(x, coords)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interp() {
        let x = [0., 1., 1.5, 2.72, 3.24];
        let coords = [(1., 3.), (2., 2.), (3., 0.)];

        assert_eq!(
            interp(x.into_iter(), &coords),
            vec![3., 3., 2.5, 0.5599999999999996, 0.]
        );

        let x = [2.5, -1., 7.5];
        let coords = [(0., 0.), (1., 2.), (2., 5.), (3., 3.), (4.5, 2.)];

        assert_eq!(interp(x.into_iter(), &coords), vec![4., 0., 2.]);
    }

    #[test]
    fn test_interp_one_endpoints() {
        let coords = [(0., 1.), (5., 0.)];

        assert_eq!(interp_one(0., &coords), 1.);
        assert_eq!(interp_one(5., &coords), 0.);
        assert_eq!(interp_one(2.5, &coords), 0.5);
        assert_eq!(interp_one(-10., &coords), 1.);
        assert_eq!(interp_one(10., &coords), 0.);
    }
}
