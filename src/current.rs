use std::f64::consts::PI;

// Standing-wave current on an open-ended wire spanning `harmonic` half-wavelengths.
// `t` is the whole-wire arc-length fraction. Both wire ends are current nodes, and the
// shape is the same for every antenna type: where the wire is fed never enters here.
pub fn current(t: f64, harmonic: u32) -> f64 {
    if t <= 0. || t >= 1. {
        return 0.;
    }
    (harmonic as f64 * PI * t).sin()
}

// Fractions in (0, 1) where the current vanishes, i.e. the interior standing-wave nodes.
pub fn interior_nodes(harmonic: u32) -> impl Iterator<Item = f64> {
    let n = harmonic.max(1);
    (1..n).map(move |k| k as f64 / n as f64)
}
