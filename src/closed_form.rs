//! Algebraic pattern approximations.
//!
//! These bypass the segment integration entirely. Each one documents the geometry it is exact
//! for; anywhere else it is an approximation, and the numeric engine is the reference.
//! Results are relative amplitudes, not normalized; run them through `gain::normalize`.

use std::f64::consts::PI;

use nalgebra::Vector3;

use crate::{
    helper::{aspect_to_vec, cos_between},
    helper_traits::SphericalFunction,
};

// Below this sin(θ) the direction is treated as lying on a wire axis, where every
// pattern here has a null.
pub const POLE_EPSILON: f64 = 1e-9;

// Far field of a straight wire carrying the standing wave sin(nπt), θ measured from `axis`:
//   odd n:  |cos(nπ/2 · cosθ)| / sinθ
//   even n: |sin(nπ/2 · cosθ)| / sinθ
// For odd n this is also the textbook centre-fed dipole. It is exact for a straight wire only;
// for a V or a drooping OCFD it is the chord-axis approximation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdealDipole {
    pub harmonic: u32,
    pub axis: Vector3<f64>,
}

impl IdealDipole {
    pub fn along_x(harmonic: u32) -> IdealDipole {
        IdealDipole {
            harmonic,
            axis: Vector3::x(),
        }
    }
}

impl SphericalFunction for IdealDipole {
    fn lookup(&self, az: f64, el: f64) -> f64 {
        self.lookup_vec(aspect_to_vec(az, el))
    }

    fn lookup_vec(&self, vec: Vector3<f64>) -> f64 {
        standing_wave_pattern(self.harmonic, cos_between(&vec.normalize(), &self.axis.normalize()))
    }
}

fn standing_wave_pattern(harmonic: u32, cos_theta: f64) -> f64 {
    let sin_theta = (1. - cos_theta * cos_theta).max(0.).sqrt();
    if sin_theta < POLE_EPSILON {
        return 0.;
    }
    let arg = harmonic as f64 * PI / 2. * cos_theta;
    let lobe = if harmonic % 2 == 1 { arg.cos() } else { arg.sin() };
    lobe.abs() / sin_theta
}

// Hertzian (electrically short) dipole: sinθ from `axis`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShortDipole {
    pub axis: Vector3<f64>,
}

impl SphericalFunction for ShortDipole {
    fn lookup(&self, az: f64, el: f64) -> f64 {
        self.lookup_vec(aspect_to_vec(az, el))
    }

    fn lookup_vec(&self, vec: Vector3<f64>) -> f64 {
        let c = cos_between(&vec.normalize(), &self.axis.normalize());
        (1. - c * c).max(0.).sqrt()
    }
}

/*
Two parallel half-wave elements along x, spaced along y, fed with a phase difference.
Pattern = element pattern × |cos((k d cosψ + β)/2)| with ψ measured from +y, d in wavelengths
and β the phase of the +y element relative to the other. Mutual coupling is ignored, so this is
the idealized array factor, not a model of a real two-element beam.
*/
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwoElementArray {
    pub spacing_wavelengths: f64,
    pub phase_offset_rad: f64,
}

impl TwoElementArray {
    // HB9CV: λ/8 spacing, 225° phasing, firing toward +y.
    pub fn hb9cv() -> TwoElementArray {
        TwoElementArray {
            spacing_wavelengths: 0.125,
            phase_offset_rad: 225f64.to_radians(),
        }
    }

    pub fn array_factor(&self, cos_psi: f64) -> f64 {
        let kd = 2. * PI * self.spacing_wavelengths;
        ((kd * cos_psi + self.phase_offset_rad) / 2.).cos().abs()
    }
}

impl SphericalFunction for TwoElementArray {
    fn lookup(&self, az: f64, el: f64) -> f64 {
        self.lookup_vec(aspect_to_vec(az, el))
    }

    fn lookup_vec(&self, vec: Vector3<f64>) -> f64 {
        let dir = vec.normalize();
        let element = standing_wave_pattern(1, cos_between(&dir, &Vector3::x()));
        element * self.array_factor(cos_between(&dir, &Vector3::y()))
    }
}

// Beam heuristic: max(0, cos γ)^exponent, γ measured from `boresight`. The exponent has no
// physical derivation; it is a knob for how sharp a beam looks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CosinePowerBeam {
    pub boresight: Vector3<f64>,
    pub exponent: f64,
}

impl SphericalFunction for CosinePowerBeam {
    fn lookup(&self, az: f64, el: f64) -> f64 {
        self.lookup_vec(aspect_to_vec(az, el))
    }

    fn lookup_vec(&self, vec: Vector3<f64>) -> f64 {
        let c = cos_between(&vec.normalize(), &self.boresight.normalize());
        if c <= 0. {
            0.
        } else {
            c.powf(self.exponent.max(0.))
        }
    }
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    use super::*;

    #[test]
    fn half_wave_dipole_reference() {
        let d = IdealDipole::along_x(1);
        assert_relative_eq!(d.lookup_vec(Vector3::z()), 1.);
        assert_relative_eq!(d.lookup_vec(Vector3::y()), 1.);
        assert_eq!(d.lookup_vec(Vector3::x()), 0.);
        assert_eq!(d.lookup_vec(-Vector3::x()), 0.);
        // Angle convention: azimuth 90° is +y.
        assert_relative_eq!(d.lookup(PI / 2., 0.), 1., epsilon = 1e-12);
    }

    #[test]
    fn even_harmonic_has_broadside_null() {
        let d = IdealDipole::along_x(2);
        assert_relative_eq!(d.lookup_vec(Vector3::z()), 0., epsilon = 1e-12);
        let tilted = Vector3::new(0.5, 0., 0.75f64.sqrt());
        assert!(d.lookup_vec(tilted) > 0.5);
    }

    #[test]
    fn poles_stay_finite() {
        for n in 1..=4 {
            let d = IdealDipole::along_x(n);
            let near = Vector3::new(1., 1e-12, 0.);
            let g = d.lookup_vec(near);
            assert!(g.is_finite());
            assert!(g < 1e-6);
        }
    }

    #[test]
    fn short_dipole_is_sine() {
        let d = ShortDipole { axis: Vector3::z() };
        assert_relative_eq!(d.lookup(0., 0.), 1.);
        assert_relative_eq!(d.lookup(0., PI / 6.), (PI / 6.).cos(), epsilon = 1e-12);
        assert_relative_eq!(d.lookup(0., PI / 2.), 0., epsilon = 1e-12);
    }

    #[test]
    fn hb9cv_fires_forward() {
        let beam = TwoElementArray::hb9cv();
        let front = beam.lookup_vec(Vector3::y());
        let back = beam.lookup_vec(-Vector3::y());
        assert!(front > 0.7);
        assert!(back < 1e-12);
    }

    #[test]
    fn zero_spacing_array_is_the_element() {
        let array = TwoElementArray {
            spacing_wavelengths: 0.,
            phase_offset_rad: 0.,
        };
        let dipole = IdealDipole::along_x(1);
        for dir in [Vector3::y(), Vector3::z(), Vector3::new(1., 1., 0.)] {
            assert_relative_eq!(array.lookup_vec(dir), dipole.lookup_vec(dir), epsilon = 1e-12);
        }
    }

    #[test]
    fn cosine_beam_has_no_back_lobe() {
        let beam = CosinePowerBeam {
            boresight: Vector3::y(),
            exponent: 4.,
        };
        assert_relative_eq!(beam.lookup_vec(Vector3::y()), 1.);
        assert_eq!(beam.lookup_vec(-Vector3::y()), 0.);
        assert_eq!(beam.lookup_vec(Vector3::x()), 0.);
        let off = Vector3::new(1., 1., 0.);
        assert_relative_eq!(beam.lookup_vec(off), 0.25, epsilon = 1e-12);
    }
}
