use nalgebra::Vector3;

use crate::{
    antenna::{AntennaDescriptor, AntennaShape},
    current::current,
    error::{PatternError, PatternResult},
};

// One sample of the current-carrying wire. `tangent` is the unit direction of positive
// current flow at `position`; `current` is the signed standing-wave amplitude there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WireSegment {
    pub position: Vector3<f64>,
    pub tangent: Vector3<f64>,
    pub current: f64,
}

/*
Turns a descriptor into `segment_count` wire samples taken at the midpoints of equal arc-length
intervals. The wire lives in the x-z plane of the antenna frame with its chord along +x, and the
midpoint of the wire at the origin. Arms are laid out from the apex (the centre of a V, the feed
of an OCFD, the fed end of a sloper) and the whole wire is then shifted so that the point at
t = 0.5 lands on the origin; a straight OCFD therefore occupies the same positions whatever its
feed fraction.

For a bent wire each arm is rotated by the droop angle about y. Tangents are the derivative of
position with respect to increasing arc length, so the left arm's tangent and the right arm's
tangent describe one continuous current path through the apex.

Currents always use the whole-wire fraction t, never a fraction local to one arm.
*/
pub fn discretize(
    descriptor: &AntennaDescriptor,
    segment_count: usize,
) -> PatternResult<Vec<WireSegment>> {
    if segment_count < 2 {
        return Err(PatternError::InvalidSegmentCount(segment_count));
    }
    descriptor.validate()?;

    let apex = descriptor.shape.apex_fraction();
    let centre = midpoint_offset(descriptor);
    let n = segment_count as f64;

    Ok((0..segment_count)
        .map(|i| {
            let t = (i as f64 + 0.5) / n;
            let s = (t - apex) * descriptor.length;
            let (position, tangent) = place(&descriptor.shape, s);
            WireSegment {
                position: position - centre,
                tangent,
                current: current(t, descriptor.harmonic),
            }
        })
        .collect())
}

// Apex-frame position of the wire's arc-length midpoint.
fn midpoint_offset(descriptor: &AntennaDescriptor) -> Vector3<f64> {
    let s = (0.5 - descriptor.shape.apex_fraction()) * descriptor.length;
    place(&descriptor.shape, s).0
}

// Position and tangent at signed arc distance `s` from the apex.
fn place(shape: &AntennaShape, s: f64) -> (Vector3<f64>, Vector3<f64>) {
    match *shape {
        AntennaShape::Straight => (Vector3::new(s, 0., 0.), Vector3::x()),
        AntennaShape::VBent {
            droop_deg,
            orientation,
        } => bent(s, droop_deg.to_radians(), orientation.sign()),
        AntennaShape::OffCenterFed { droop_deg, .. } => bent(s, droop_deg.to_radians(), 1.),
        AntennaShape::EndFedSloper { slope_deg } => {
            let dir = slope_direction(slope_deg);
            (dir * s, dir)
        }
    }
}

fn bent(s: f64, droop: f64, sign: f64) -> (Vector3<f64>, Vector3<f64>) {
    let (sin, cos) = droop.sin_cos();
    // Left arm (s < 0) rises toward the apex, right arm falls away from it.
    let side = if s < 0. { sign } else { -sign };
    let tangent = Vector3::new(cos, 0., side * sin);
    (tangent * s, tangent)
}

// Unit direction of a wire descending `slope_deg` below the horizontal along +x.
pub fn slope_direction(slope_deg: f64) -> Vector3<f64> {
    let (sin, cos) = slope_deg.to_radians().sin_cos();
    Vector3::new(cos, 0., -sin)
}

// Axis along the wire chord, used by the closed-form approximations.
pub fn chord_axis(shape: &AntennaShape) -> Vector3<f64> {
    match *shape {
        AntennaShape::EndFedSloper { slope_deg } => slope_direction(slope_deg),
        _ => Vector3::x(),
    }
}

// Where the feed marker is drawn, in the same frame as the segments.
pub fn feed_point(descriptor: &AntennaDescriptor) -> PatternResult<Vector3<f64>> {
    descriptor.validate()?;
    Ok(-midpoint_offset(descriptor))
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;

    use super::*;
    use crate::antenna::VOrientation;

    #[test]
    fn straight_wire_is_centred_on_x() {
        let segs = discretize(&AntennaDescriptor::straight(1, 2.), 40).unwrap();
        assert_eq!(segs.len(), 40);
        assert_relative_eq!(segs[0].position.x, -1. + 1. / 40., epsilon = 1e-12);
        assert_relative_eq!(segs[39].position.x, 1. - 1. / 40., epsilon = 1e-12);
        for seg in segs.iter() {
            assert_eq!(seg.tangent, Vector3::x());
            assert_eq!(seg.position.y, 0.);
            assert_eq!(seg.position.z, 0.);
            assert!(seg.current >= 0.);
        }
    }

    #[test]
    fn degenerate_inputs_fail_fast() {
        let desc = AntennaDescriptor::straight(1, 1.);
        assert!(matches!(
            discretize(&desc, 1),
            Err(PatternError::InvalidSegmentCount(1))
        ));
        assert!(matches!(
            discretize(&AntennaDescriptor::straight(1, 0.), 40),
            Err(PatternError::InvalidLength(_))
        ));
        assert!(matches!(
            discretize(&AntennaDescriptor::straight(0, 1.), 40),
            Err(PatternError::InvalidHarmonic(0))
        ));
    }

    #[test]
    fn two_segments_is_enough() {
        let segs = discretize(&AntennaDescriptor::straight(1, 1.), 2).unwrap();
        assert_eq!(segs.len(), 2);
        assert!(segs.iter().all(|s| s.current.is_finite() && s.current > 0.));
    }

    #[test]
    fn inverted_v_droops_below_apex() {
        let desc = AntennaDescriptor::inverted_v(1, 2., 30.);
        let segs = discretize(&desc, 20).unwrap();
        for seg in segs.iter() {
            assert!(seg.position.z < 0.);
            assert_relative_eq!(seg.tangent.norm(), 1., epsilon = 1e-12);
            // Tangent is along the arm: position is a multiple of it.
            assert_relative_eq!(seg.position.cross(&seg.tangent).norm(), 0., epsilon = 1e-12);
        }
        // Tangents on both arms point toward increasing x, so current flows through the apex.
        assert!(segs.iter().all(|s| s.tangent.x > 0.));
        assert!(segs[0].tangent.z > 0.);
        assert!(segs[19].tangent.z < 0.);
        // Arc distance from the apex is preserved by the rotation.
        assert_relative_eq!(segs[19].position.norm(), 1. - 1. / 20., epsilon = 1e-12);
    }

    #[test]
    fn upright_v_mirrors_inverted() {
        let mut desc = AntennaDescriptor::inverted_v(1, 2., 20.);
        let inverted = discretize(&desc, 10).unwrap();
        desc.shape = AntennaShape::VBent {
            droop_deg: 20.,
            orientation: VOrientation::Upright,
        };
        let upright = discretize(&desc, 10).unwrap();
        for (a, b) in inverted.iter().zip(upright.iter()) {
            assert_relative_eq!(a.position.x, b.position.x);
            assert_relative_eq!(a.position.z, -b.position.z);
            assert_eq!(a.current, b.current);
        }
    }

    #[test]
    fn ocfd_currents_ignore_feed() {
        let a = discretize(&AntennaDescriptor::off_center_fed(2, 3., 0.2), 30).unwrap();
        let b = discretize(&AntennaDescriptor::off_center_fed(2, 3., 0.5), 30).unwrap();
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.current, y.current);
            assert_relative_eq!(x.position, y.position, epsilon = 1e-12);
        }
    }

    #[test]
    fn sloper_starts_at_feed() {
        let segs = discretize(&AntennaDescriptor::end_fed_sloper(1, 1., 45.), 10).unwrap();
        let dir = slope_direction(45.);
        let feed = feed_point(&AntennaDescriptor::end_fed_sloper(1, 1., 45.)).unwrap();
        assert_relative_eq!(feed, -0.5 * dir, epsilon = 1e-12);
        for seg in segs.iter() {
            assert_relative_eq!(seg.tangent, dir);
            // Every sample lies down-slope of the feed.
            assert!((seg.position - feed).dot(&dir) > 0.);
        }
        assert_relative_eq!(chord_axis(&AntennaShape::EndFedSloper { slope_deg: 45. }), dir);
    }

    #[test]
    fn feed_marker_follows_fraction() {
        let desc = AntennaDescriptor::off_center_fed(2, 3., 1. / 3.);
        assert_relative_eq!(
            feed_point(&desc).unwrap(),
            Vector3::new(-0.5, 0., 0.),
            epsilon = 1e-12
        );
        assert_relative_eq!(desc.shape.apex_fraction(), 1. / 3.);
        let centred = AntennaDescriptor::inverted_v(1, 2., 30.);
        assert_eq!(feed_point(&centred).unwrap(), Vector3::zeros());
    }
}
