/// Linear domain→range mapping.
///
/// A degenerate (zero-width) domain maps every input to the range start
/// instead of dividing by zero, so layout passes over a zero-size viewport
/// stay total.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn apply(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let width = d1 - d0;
        if width.abs() < 1e-12 || !width.is_finite() {
            return r0;
        }
        r0 + (value - d0) / width * (r1 - r0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_endpoints_and_midpoint() {
        let scale = LinearScale::new((0.0, 100.0), (8.0, 48.0));
        assert_eq!(scale.apply(0.0), 8.0);
        assert_eq!(scale.apply(100.0), 48.0);
        assert_eq!(scale.apply(50.0), 28.0);
    }

    #[test]
    fn does_not_clamp_outside_the_domain() {
        let scale = LinearScale::new((0.0, 10.0), (1.0, 10.0));
        assert_eq!(scale.apply(20.0), 19.0);
    }

    #[test]
    fn zero_width_domain_maps_to_range_start() {
        let scale = LinearScale::new((5.0, 5.0), (1.0, 10.0));
        assert_eq!(scale.apply(5.0), 1.0);
        assert_eq!(scale.apply(100.0), 1.0);
    }
}
