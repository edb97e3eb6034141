use nalgebra::Vector3;

// Given a direction in the antenna frame, compute the azimuth and elevation.
// x is taken as forward, y as left, z as up. Positive azimuth goes from x to y, positive
// elevation goes from the x-y plane to z.
pub fn vec_to_aspect(vec: Vector3<f64>) -> (f64, f64) {
    let az = f64::atan2(vec[1], vec[0]);
    let norm = vec.magnitude();
    let el = if norm > 0. {
        f64::asin((vec[2] / norm).clamp(-1., 1.))
    } else {
        0.
    };
    (az, el)
}

// Computes a unit vector in the antenna frame given azimuth and elevation.
// Same conventions as `vec_to_aspect`.
pub fn aspect_to_vec(az: f64, el: f64) -> Vector3<f64> {
    Vector3::new(az.cos() * el.cos(), az.sin() * el.cos(), el.sin())
}

pub fn decibels_or_else(x: f64, or: f64) -> f64 {
    if x <= 0. {
        or
    } else {
        10. * x.log10()
    }
}

// Cosine of the angle between a direction and an axis, both assumed to be unit length.
// Clamped so that rounding can never push it outside [-1, 1].
pub fn cos_between(dir: &Vector3<f64>, axis: &Vector3<f64>) -> f64 {
    dir.dot(axis).clamp(-1., 1.)
}

pub fn normalize_all(mut slice: impl AsMut<[Vector3<f64>]>) {
    for x in slice.as_mut().iter_mut() {
        x.normalize_mut();
    }
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    use super::*;

    #[test]
    fn aspect_round_trip_on_axes() {
        let (az, el) = vec_to_aspect(Vector3::new(0., 2., 0.));
        assert_relative_eq!(az, std::f64::consts::FRAC_PI_2);
        assert_relative_eq!(el, 0.);

        let up = aspect_to_vec(0.3, std::f64::consts::FRAC_PI_2);
        assert_relative_eq!(up, Vector3::z(), epsilon = 1e-12);
    }

    #[test]
    fn zero_vector_has_no_elevation() {
        let (_, el) = vec_to_aspect(Vector3::zeros());
        assert_eq!(el, 0.);
    }

    #[test]
    fn decibels_guard() {
        assert_relative_eq!(decibels_or_else(100., -40.), 20.);
        assert_eq!(decibels_or_else(0., -40.), -40.);
    }
}
