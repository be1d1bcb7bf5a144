/// Affine map from a two-point domain onto a two-point range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    domain: [f64; 2],
    range: [f64; 2],
}

impl Default for LinearScale {
    fn default() -> Self {
        Self {
            domain: [0.0, 1.0],
            range: [0.0, 1.0],
        }
    }
}

impl LinearScale {
    /// Scale with the given domain and range.
    pub fn new(domain: [f64; 2], range: [f64; 2]) -> Self {
        Self { domain, range }
    }

    /// Replace the domain.
    pub fn set_domain(&mut self, domain: [f64; 2]) -> &mut Self {
        self.domain = domain;
        self
    }

    /// Replace the range.
    pub fn set_range(&mut self, range: [f64; 2]) -> &mut Self {
        self.range = range;
        self
    }

    /// Current domain.
    pub fn domain(&self) -> [f64; 2] {
        self.domain
    }

    /// Current range.
    pub fn range(&self) -> [f64; 2] {
        self.range
    }

    /// Map a domain value into the range.
    ///
    /// A degenerate domain (`d0 == d1`) maps everything to the middle of the range; a `NaN` bound
    /// maps everything to `NaN`. Values outside the domain extrapolate.
    pub fn map(&self, x: f64) -> f64 {
        let [d0, d1] = self.domain;
        let [r0, r1] = self.range;
        let span = d1 - d0;
        let t = if span.is_nan() {
            f64::NAN
        } else if span == 0.0 {
            0.5
        } else {
            (x - d0) / span
        };
        r0 + (r1 - r0) * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_domain_onto_flipped_range() {
        let s = LinearScale::new([0.0, 10.0], [740.0, 50.0]);
        assert_eq!(s.map(0.0), 740.0);
        assert_eq!(s.map(10.0), 50.0);
        assert_eq!(s.map(5.0), 395.0);
    }

    #[test]
    fn degenerate_domain_maps_to_range_midpoint() {
        let s = LinearScale::new([3.0, 3.0], [0.0, 100.0]);
        assert_eq!(s.map(3.0), 50.0);
        assert_eq!(s.map(-7.0), 50.0);
    }

    #[test]
    fn nan_domain_poisons_output() {
        let s = LinearScale::new([0.0, f64::NAN], [0.0, 100.0]);
        assert!(s.map(1.0).is_nan());
    }
}
