use nalgebra::Vector3;

use crate::{
    error::{PatternError, PatternResult},
    gain::{GainField, Presentation},
};

// Render-ready pattern surface: the sampling sphere with each vertex pulled in to its shaped
// gain. Colour runs from red at the floor to green at the peak.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternMesh {
    pub positions: Vec<[f32; 3]>,
    pub colors: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl PatternMesh {
    pub fn build(
        verts_base: &[Vector3<f64>],
        indices_base: &[(usize, usize, usize)],
        field: &GainField,
        presentation: &Presentation,
    ) -> PatternResult<PatternMesh> {
        if field.len() != verts_base.len() {
            return Err(PatternError::LengthMismatch {
                expected: verts_base.len(),
                actual: field.len(),
            });
        }

        let items = field.shaped(presentation);
        let floor = presentation.floor.clamp(0., 1.);
        let span = 1. - floor;

        let positions = verts_base
            .iter()
            .zip(items.iter())
            .map(|(vert, r)| {
                let dir = vert.normalize();
                let p = dir * (presentation.radius * r);
                [p.x as f32, p.y as f32, p.z as f32]
            })
            .collect();

        let colors = items
            .iter()
            .map(|r| {
                let level = if span > 0. { (r - floor) / span } else { 1. };
                [(1. - level) as f32, level as f32, 0.]
            })
            .collect();

        let indices = indices_base
            .iter()
            .flat_map(|x| [x.0 as u32, x.1 as u32, x.2 as u32])
            .collect();

        Ok(PatternMesh {
            positions,
            colors,
            indices,
        })
    }
}
