use std::f64::consts::PI;

use nalgebra::Vector3;

use crate::{
    antenna::AntennaDescriptor, engine::PatternEngine, error::PatternResult, gain::GainField,
};

// Lobes weaker than this fraction of the peak are treated as numerical noise.
pub const LOBE_THRESHOLD: f64 = 1e-3;

// Directions on the great circle through the wire axis (x) and the droop axis (z),
// φ = 2πi/samples measured from +x toward +z.
pub fn wire_plane_cut(samples: usize) -> Vec<Vector3<f64>> {
    (0..samples)
        .map(|i| {
            let phi = 2. * PI * i as f64 / samples as f64;
            Vector3::new(phi.cos(), 0., phi.sin())
        })
        .collect()
}

// Evaluates the pattern on the wire-plane cut. Values are normalized over the cut itself.
pub fn evaluate_cut(
    engine: &PatternEngine,
    descriptor: &AntennaDescriptor,
    samples: usize,
) -> PatternResult<GainField> {
    engine.evaluate(descriptor, &wire_plane_cut(samples))
}

// Number of local maxima above `threshold` on a closed (circular) sequence of samples.
// A flat top spanning several samples counts once.
pub fn count_lobes(values: &[f64], threshold: f64) -> usize {
    let n = values.len();
    if n < 3 {
        return values.iter().filter(|v| **v > threshold).count().min(1);
    }
    (0..n)
        .filter(|&i| {
            let v = values[i];
            let prev = values[(i + n - 1) % n];
            let next = values[(i + 1) % n];
            v > threshold && v >= prev && v > next
        })
        .count()
}
