use nalgebra::Vector3;
use num::complex::Complex64;

// A complex 3-vector kept as separate real and imaginary parts, which is how the
// radiation sum is accumulated axis by axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComplexVec3 {
    pub re: Vector3<f64>,
    pub im: Vector3<f64>,
}

impl ComplexVec3 {
    pub fn zeros() -> ComplexVec3 {
        ComplexVec3 {
            re: Vector3::zeros(),
            im: Vector3::zeros(),
        }
    }

    // Adds `weight * e^{j phase} * dir`.
    pub fn accumulate(&mut self, dir: &Vector3<f64>, weight: f64, phase: f64) {
        self.add_phasor(dir, Complex64::from_polar(weight, phase));
    }

    pub fn add_phasor(&mut self, dir: &Vector3<f64>, phasor: Complex64) {
        self.re += dir * phasor.re;
        self.im += dir * phasor.im;
    }

    // Removes the component along the unit vector `dir` from the real and imaginary parts
    // independently.
    pub fn transverse_to(&self, dir: &Vector3<f64>) -> ComplexVec3 {
        ComplexVec3 {
            re: self.re - dir * self.re.dot(dir),
            im: self.im - dir * self.im.dot(dir),
        }
    }

    pub fn norm_squared(&self) -> f64 {
        self.re.norm_squared() + self.im.norm_squared()
    }

    pub fn norm(&self) -> f64 {
        self.norm_squared().sqrt()
    }
}

impl Default for ComplexVec3 {
    fn default() -> Self {
        ComplexVec3::zeros()
    }
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;
    use nalgebra::Vector3;
    use num::complex::Complex64;
    use std::f64::consts::FRAC_PI_2;

    use super::ComplexVec3;

    #[test]
    fn accumulates_phasors_per_axis() {
        let mut acc = ComplexVec3::zeros();
        acc.accumulate(&Vector3::x(), 2., 0.);
        acc.accumulate(&Vector3::x(), 1., FRAC_PI_2);
        assert_relative_eq!(acc.re, Vector3::new(2., 0., 0.), epsilon = 1e-12);
        assert_relative_eq!(acc.im, Vector3::new(1., 0., 0.), epsilon = 1e-12);
        assert_relative_eq!(acc.norm(), 5f64.sqrt(), epsilon = 1e-12);

        acc.add_phasor(&Vector3::y(), Complex64::new(0., -3.));
        assert_relative_eq!(acc.im, Vector3::new(1., -3., 0.), epsilon = 1e-12);
    }

    #[test]
    fn transverse_part_drops_longitudinal() {
        let a = ComplexVec3 {
            re: Vector3::new(1., 2., 3.),
            im: Vector3::new(-1., 0., 4.),
        };
        let perp = a.transverse_to(&Vector3::z());
        assert_relative_eq!(perp.re, Vector3::new(1., 2., 0.));
        assert_relative_eq!(perp.im, Vector3::new(-1., 0., 0.));
    }
}
