use std::f64::consts::PI;

use nalgebra::Vector3;

use crate::{antenna::AntennaDescriptor, complex_vec::ComplexVec3, geometry::WireSegment};

// Spatial phase rate of the radiated field. A wire spanning `harmonic` half-wavelengths over
// `length` units has k = 2π/λ = nπ/L, which keeps the phase model consistent with the assumed
// standing wave.
pub fn wavenumber(descriptor: &AntennaDescriptor) -> f64 {
    descriptor.harmonic as f64 * PI / descriptor.length
}

/*
Far-field radiation sum for one observation direction: a discrete version of
    A(r̂) = ∫ J(r') e^{jk r̂·r'} dr'
with J = current * tangent sampled once per segment. Segment weights are uniform and cancel
in normalization, so they are left out.

An empty slice gives the zero vector.
*/
pub fn integrate(
    segments: &[WireSegment],
    direction: &Vector3<f64>,
    wavenumber: f64,
) -> ComplexVec3 {
    let mut acc = ComplexVec3::zeros();
    for seg in segments {
        let phase = wavenumber * seg.position.dot(direction);
        acc.accumulate(&seg.tangent, seg.current, phase);
    }
    acc
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    use super::*;
    use crate::geometry::discretize;

    #[test]
    fn empty_wire_radiates_nothing() {
        let a = integrate(&[], &Vector3::z(), 3.);
        assert_eq!(a, ComplexVec3::zeros());
        assert!(a.norm().is_finite());
    }

    #[test]
    fn broadside_sum_is_in_phase() {
        let desc = AntennaDescriptor::straight(1, 2.);
        let segs = discretize(&desc, 40).unwrap();
        let a = integrate(&segs, &Vector3::z(), wavenumber(&desc));
        let total: f64 = segs.iter().map(|s| s.current).sum();
        assert_relative_eq!(a.re, Vector3::x() * total, epsilon = 1e-12);
        assert_relative_eq!(a.im.norm(), 0., epsilon = 1e-12);
    }

    #[test]
    fn wavenumber_scales_with_harmonic() {
        let one = wavenumber(&AntennaDescriptor::straight(1, 2.));
        let three = wavenumber(&AntennaDescriptor::straight(3, 2.));
        assert_relative_eq!(one, PI / 2.);
        assert_relative_eq!(three, 3. * one);
    }

    #[test]
    fn second_harmonic_cancels_broadside() {
        // Antisymmetric current on a centred wire: the in-phase sum vanishes broadside.
        let desc = AntennaDescriptor::straight(2, 2.);
        let segs = discretize(&desc, 40).unwrap();
        let a = integrate(&segs, &Vector3::y(), wavenumber(&desc));
        assert!(a.norm() < 1e-9);
    }
}
