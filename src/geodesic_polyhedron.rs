use std::collections::HashMap;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::{
    error::{PatternError, PatternResult},
    helper::normalize_all,
};

// Finest sphere accepted: 10·512²+2 ≈ 2.6M directions.
pub const MAX_SUBDIVISIONS: usize = 512;

// (1+sqrt(5))/2
const GOLDEN_RATIO: f64 = 1.618_033_988_749_895;

// Gives an estimate for the mean spherical distance between points at a given subdivision level.
// Recall that a great circle distance is equal to the angle subtended by the endpoints
// multiplied by radius. We assume the sphere has radius 1, so that the distance equals the angle.
// This approximation gets better the more subdivisions there are
pub fn distance_for_subdivision(subdivs: usize) -> f64 {
    // Cover the sphere (of radius 1) with circles of radius r/2 centered at each of the points of the polyhedron. These circles should
    // approximately cover the surface of the sphere, giving us the following relation:
    // 4π=(10n^2+2)(πr^2/4)
    // Solving for r gives us
    // 16/(10n^2+2)=r^2
    let n = subdivs as f64;
    (16. / (10. * n * n + 2.)).sqrt()
}

// Reverses the operation of `distance_for_subdivision`, rounding up so the spacing is never coarser
// than requested.
pub fn subdivisions_for_distance(dist: f64) -> PatternResult<usize> {
    if !(dist.is_finite() && dist > 0.) {
        return Err(PatternError::InvalidSubdivision(0));
    }
    // 16/(10r^2)-1/5=n^2
    let n = (16. / (10. * dist * dist) - 1. / 5.).max(1.).sqrt().ceil();
    if n > MAX_SUBDIVISIONS as f64 {
        return Err(PatternError::InvalidSubdivision(n as usize));
    }
    Ok(n as usize)
}

// Number of distinct vertices at a given subdivision.
pub fn vertex_count(subdivs: usize) -> usize {
    10 * subdivs * subdivs + 2
}

// Constant data for a subdivision 1 mesh, i.e. an icosahedron or D20
const φ: f64 = GOLDEN_RATIO;
const initial_verts: [Vector3<f64>; 12] = [
    Vector3::new(0., φ, -1.),
    Vector3::new(-φ, 1., 0.),
    Vector3::new(-1., 0., -φ),
    Vector3::new(1., 0., -φ),
    Vector3::new(φ, 1., 0.),
    Vector3::new(0., φ, 1.),
    Vector3::new(-1., 0., φ),
    Vector3::new(-φ, -1., 0.),
    Vector3::new(0., -φ, -1.),
    Vector3::new(φ, -1., 0.),
    Vector3::new(1., 0., φ),
    Vector3::new(0., -φ, 1.),
];
// Triangles oriented in antiwiddershins(clockwise) order
const initial_tris: [(usize, usize, usize); 20] = [
    (0, 2, 1),
    (0, 3, 2),
    (0, 4, 3),
    (0, 5, 4),
    (0, 1, 5),
    (7, 6, 1),
    (8, 7, 2),
    (9, 8, 3),
    (10, 9, 4),
    (6, 10, 5),
    (2, 7, 1),
    (3, 8, 2),
    (4, 9, 3),
    (5, 10, 4),
    (1, 6, 5),
    (11, 6, 7),
    (11, 7, 8),
    (11, 8, 9),
    (11, 9, 10),
    (11, 10, 6),
];

// Barycentric interpolation on the triangle specified by tri
fn get_vert(tri: (usize, usize, usize), a: f64, b: f64) -> Vector3<f64> {
    let v1 = initial_verts[tri.0] - initial_verts[tri.1];
    let v2 = initial_verts[tri.2] - initial_verts[tri.1];

    initial_verts[tri.1] + (a * v1 + b * v2)
}

// Points shared between faces are computed from different corners and only agree up to
// rounding, so they are matched on a coarse grid.
fn grid_key(v: &Vector3<f64>) -> (i64, i64, i64) {
    const CELLS: f64 = 1e7;
    (
        (v.x * CELLS).round() as i64,
        (v.y * CELLS).round() as i64,
        (v.z * CELLS).round() as i64,
    )
}

/*
Generates a geodesic polyhedron, created by subdividing each face of an icosahedron
into new faces based on the number of subdivisions. subdivs represents the number of
segments each edge is subdivided into so that, for example, subdivision 2 yields
```
 /\
/\/\
```
while subdivision 3 yields
```
  /\
 /\/\
/\/\/\
```
Returns the vertices projected onto the unit sphere, i.e. the observation directions, and the
face data as triples of indices into the vertex data, ordered for 3d rendering.
*/
pub fn generate_polyhedron(
    subdivs: usize,
) -> PatternResult<(Vec<Vector3<f64>>, Vec<(usize, usize, usize)>)> {
    if !(1..=MAX_SUBDIVISIONS).contains(&subdivs) {
        return Err(PatternError::InvalidSubdivision(subdivs));
    }

    // To generate each vertex, take the 3 vertices of a face in order.
    // The vector from the 2nd vertex to the 1st and 2nd to 3rd form a
    // basis for a plane. They are at 60 degrees from each other.
    // For a subdivision n, take each i/n multiple of these basis vectors
    // where i ranges from 0 to n. This gets you a parallelogram.
    // Our desired triangle is half of this, so we just cut off
    // the indices at the correct point in the triangle.
    let n = subdivs as f64;
    let per_face = ((subdivs + 1) * (subdivs + 2)) / 2;

    let mut out_verts = Vec::with_capacity(vertex_count(subdivs));
    let mut seen = HashMap::with_capacity(vertex_count(subdivs));
    // Map from (face, row, column) order to the deduplicated vertex index.
    let mut uniq = Vec::with_capacity(initial_tris.len() * per_face);

    for tri in initial_tris.iter() {
        for i in 0..subdivs + 1 {
            for j in 0..(subdivs + 1 - i) {
                let vert = get_vert(*tri, (i as f64) / n, (j as f64) / n);
                let ind = *seen.entry(grid_key(&vert)).or_insert_with(|| {
                    out_verts.push(vert);
                    out_verts.len() - 1
                });
                uniq.push(ind);
            }
        }
    }

    // This function gets the deduplicated index of vertex (i, j) of face.
    let get_out_vert_ind = |face: usize, i: usize, j: usize| {
        let base = face * per_face;

        // The number of verts in rows 1 through k of a face, given subdivision n
        // Computed as total number of verts - number of verts in a triangle with n-k verts.
        fn ind(n: usize, k: usize) -> usize {
            (2 * n * k + k - k * k) / 2
        }

        uniq[base + ind(subdivs + 1, i) + j]
    };

    let mut out_tris = Vec::with_capacity(initial_tris.len() * subdivs * subdivs);
    for (ind, _) in initial_tris.iter().enumerate() {
        // Do the triangles with two vertices on the bottom
        for i in 0..subdivs {
            for j in 0..(subdivs - i) {
                out_tris.push((
                    get_out_vert_ind(ind, i, j),
                    get_out_vert_ind(ind, i + 1, j),
                    get_out_vert_ind(ind, i, j + 1),
                ));
            }
        }

        // Do the triangles with two vertices on the top
        for i in 1..subdivs {
            for j in 0..(subdivs - i) {
                out_tris.push((
                    get_out_vert_ind(ind, i, j),
                    get_out_vert_ind(ind, i, j + 1),
                    get_out_vert_ind(ind, i - 1, j + 1),
                ));
            }
        }
    }

    normalize_all(&mut out_verts);
    Ok((out_verts, out_tris))
}

// Functions identically to `generate_polyhedron`, but only returns the directions.
pub fn generate_polyhedron_verts(subdivs: usize) -> PatternResult<Vec<Vector3<f64>>> {
    generate_polyhedron(subdivs).map(|(verts, _)| verts)
}

// How the sphere of observation directions is sampled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SphereSampling {
    // Each icosahedron edge split into `frequency` pieces: 10f²+2 directions.
    Geodesic { frequency: usize },
    // Recursive midpoint subdivision, `detail` times: 10·4^detail+2 directions.
    Icosphere { detail: u32 },
    // Finest geodesic sphere whose mean spacing is at most `degrees`.
    Resolution { degrees: f64 },
}

impl Default for SphereSampling {
    fn default() -> Self {
        SphereSampling::Icosphere { detail: 4 }
    }
}

impl SphereSampling {
    pub fn subdivisions(&self) -> PatternResult<usize> {
        let subdivs = match *self {
            SphereSampling::Geodesic { frequency } => frequency,
            // Repeated halving of every edge is the same grid as splitting it 2^detail ways.
            SphereSampling::Icosphere { detail } => {
                1usize.checked_shl(detail).unwrap_or(usize::MAX)
            }
            SphereSampling::Resolution { degrees } => {
                subdivisions_for_distance(degrees.to_radians())?
            }
        };
        if !(1..=MAX_SUBDIVISIONS).contains(&subdivs) {
            return Err(PatternError::InvalidSubdivision(subdivs));
        }
        Ok(subdivs)
    }

    pub fn directions(&self) -> PatternResult<Vec<Vector3<f64>>> {
        generate_polyhedron_verts(self.subdivisions()?)
    }

    pub fn mesh(&self) -> PatternResult<(Vec<Vector3<f64>>, Vec<(usize, usize, usize)>)> {
        generate_polyhedron(self.subdivisions()?)
    }
}
