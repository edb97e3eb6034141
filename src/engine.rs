use nalgebra::Vector3;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    antenna::AntennaDescriptor,
    closed_form::IdealDipole,
    error::{PatternError, PatternResult},
    gain::{gain, GainField},
    geometry::{chord_axis, discretize},
    helper_traits::SphericalFunction,
    integrator::{integrate, wavenumber},
};

pub const DEFAULT_SEGMENT_COUNT: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationMode {
    // Segment integration with transverse projection.
    Numeric,
    // `IdealDipole` along the wire chord. Exact only for straight wires.
    ClosedForm,
}

impl Default for EvaluationMode {
    fn default() -> Self {
        EvaluationMode::Numeric
    }
}

/*
Turns an antenna descriptor and a borrowed set of observation directions into a fresh
`GainField`. The engine holds no state between calls; every evaluation rebuilds the wire from
the descriptor, and callers replace the previous field with the new one. Directions need not
be unit length; each one is normalized before use.

Directions are independent of each other, so with `parallel` set (and the `parallel` feature
enabled) they are split across the rayon pool. Segments are shared read-only between workers and
each direction gets its own accumulator.
*/
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatternEngine {
    pub segment_count: usize,
    pub mode: EvaluationMode,
    pub parallel: bool,
}

impl Default for PatternEngine {
    fn default() -> Self {
        PatternEngine {
            segment_count: DEFAULT_SEGMENT_COUNT,
            mode: EvaluationMode::Numeric,
            parallel: true,
        }
    }
}

impl PatternEngine {
    pub fn new(segment_count: usize, mode: EvaluationMode) -> PatternEngine {
        PatternEngine {
            segment_count,
            mode,
            ..PatternEngine::default()
        }
    }

    pub fn evaluate(
        &self,
        descriptor: &AntennaDescriptor,
        directions: &[Vector3<f64>],
    ) -> PatternResult<GainField> {
        let raw = self.raw_gains(descriptor, directions)?;
        let field = GainField::from_raw(raw);
        tracing::debug!(
            shape = descriptor.shape.name(),
            harmonic = descriptor.harmonic,
            segments = self.segment_count,
            directions = directions.len(),
            mode = ?self.mode,
            "evaluated gain field"
        );
        Ok(field)
    }

    // Unnormalized transverse magnitudes, for callers normalizing against their own reference.
    pub fn raw_gains(
        &self,
        descriptor: &AntennaDescriptor,
        directions: &[Vector3<f64>],
    ) -> PatternResult<Vec<f64>> {
        if self.segment_count < 2 {
            return Err(PatternError::InvalidSegmentCount(self.segment_count));
        }
        match self.mode {
            EvaluationMode::Numeric => {
                let segments = discretize(descriptor, self.segment_count)?;
                let k = wavenumber(descriptor);
                tracing::trace!(segments = segments.len(), wavenumber = k, "discretized wire");
                Ok(self.map_directions(directions, |dir| {
                    let dir = dir.normalize();
                    gain(&integrate(&segments, &dir, k), &dir)
                }))
            }
            EvaluationMode::ClosedForm => {
                let pattern = closed_form_for(descriptor)?;
                Ok(self.map_directions(directions, |dir| pattern.lookup_vec(*dir)))
            }
        }
    }

    // Evaluates any closed-form pattern over the same directions, through the same normalizer.
    pub fn evaluate_closed_form<F: SphericalFunction + Sync>(
        &self,
        pattern: &F,
        directions: &[Vector3<f64>],
    ) -> GainField {
        GainField::from_raw(self.map_directions(directions, |dir| pattern.lookup_vec(*dir)))
    }

    #[cfg(feature = "parallel")]
    fn map_directions<F>(&self, directions: &[Vector3<f64>], f: F) -> Vec<f64>
    where
        F: Fn(&Vector3<f64>) -> f64 + Sync + Send,
    {
        if self.parallel {
            directions.par_iter().map(f).collect()
        } else {
            directions.iter().map(f).collect()
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn map_directions<F>(&self, directions: &[Vector3<f64>], f: F) -> Vec<f64>
    where
        F: Fn(&Vector3<f64>) -> f64 + Sync + Send,
    {
        directions.iter().map(f).collect()
    }
}

// Closed-form stand-in for a descriptor: the standing-wave pattern along the wire chord.
pub fn closed_form_for(descriptor: &AntennaDescriptor) -> PatternResult<IdealDipole> {
    descriptor.validate()?;
    Ok(IdealDipole {
        harmonic: descriptor.harmonic,
        axis: chord_axis(&descriptor.shape),
    })
}
