use nalgebra::Vector3;
use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::{complex_vec::ComplexVec3, helper::decibels_or_else};

// Maxima at or below this are treated as "no radiation at all".
pub const GAIN_EPSILON: f64 = 1e-12;

// Relative far-field amplitude in `direction`: the magnitude of the part of `a` transverse to
// the direction of propagation. The longitudinal part does not radiate; keeping it would put
// spurious gain along the wire axis.
pub fn gain(a: &ComplexVec3, direction: &Vector3<f64>) -> f64 {
    let g = a.transverse_to(direction).norm();
    if g.is_finite() {
        g
    } else {
        0.
    }
}

// Scales gains so that the largest becomes 1. A field with no finite maximum above
// `GAIN_EPSILON` becomes all zeros. Running it twice changes nothing.
pub fn normalize(gains: &mut [f64]) {
    let max = gains
        .iter()
        .copied()
        .filter(|g| g.is_finite())
        .fold(0., f64::max);
    normalize_to_reference(gains, max);
}

// Like `normalize`, but against a fixed reference so fields for different harmonics stay comparable.
pub fn normalize_to_reference(gains: &mut [f64], reference: f64) {
    if !(reference.is_finite() && reference > GAIN_EPSILON) {
        gains.iter_mut().for_each(|g| *g = 0.);
        return;
    }
    for g in gains.iter_mut() {
        *g = if g.is_finite() {
            (*g / reference).clamp(0., 1.)
        } else {
            0.
        };
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DisplayScale {
    Linear,
    // Power in dB, mapped so that `range_db` below the peak is zero.
    Decibels { range_db: f64 },
}

/*
How a normalized field is turned into display radii. None of this is physics: the exponent
compresses dynamic range and the floor keeps nulls from collapsing to a point. The default is the
identity, so consumers that need raw relative gain get it unless they opt in.
*/
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Presentation {
    pub scale: DisplayScale,
    pub exponent: f64,
    pub floor: f64,
    pub radius: f64,
}

impl Default for Presentation {
    fn default() -> Self {
        Presentation {
            scale: DisplayScale::Linear,
            exponent: 1.,
            floor: 0.,
            radius: 1.,
        }
    }
}

impl Presentation {
    // The tuning the visualisation site shipped with.
    pub fn site() -> Presentation {
        Presentation {
            exponent: 0.8,
            floor: 0.05,
            ..Presentation::default()
        }
    }

    // Maps one normalized gain to a radius fraction in [floor, 1].
    pub fn shape(&self, g: f64) -> f64 {
        let g = if g.is_finite() { g.clamp(0., 1.) } else { 0. };
        let level = match self.scale {
            DisplayScale::Linear => g,
            DisplayScale::Decibels { range_db } if range_db > 0. => {
                let db = decibels_or_else(g * g, -range_db);
                ((db + range_db) / range_db).clamp(0., 1.)
            }
            DisplayScale::Decibels { .. } => g,
        };
        let shaped = if self.exponent > 0. && self.exponent.is_finite() {
            level.powf(self.exponent)
        } else {
            level
        };
        let floor = self.floor.clamp(0., 1.);
        floor + (1. - floor) * shaped
    }
}

// Normalized gain, one value per observation direction in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct GainField {
    values: Array1<f64>,
}

impl GainField {
    // Normalizes raw transverse magnitudes into a field.
    pub fn from_raw(mut raw: Vec<f64>) -> GainField {
        normalize(&mut raw);
        GainField {
            values: Array1::from(raw),
        }
    }

    pub fn from_raw_with_reference(mut raw: Vec<f64>, reference: f64) -> GainField {
        normalize_to_reference(&mut raw, reference);
        GainField {
            values: Array1::from(raw),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &Array1<f64> {
        &self.values
    }

    pub fn get(&self, i: usize) -> Option<f64> {
        self.values.get(i).copied()
    }

    // Index of the strongest direction, or None for an empty field.
    pub fn argmax(&self) -> Option<usize> {
        self.values
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
    }

    pub fn shaped(&self, presentation: &Presentation) -> Array1<f64> {
        self.values.mapv(|g| presentation.shape(g))
    }
}
