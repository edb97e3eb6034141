use clap::Parser;
use farfield_lib::{
    error::PatternResult,
    geodesic_polyhedron::{self, generate_polyhedron},
};

/// Compares the predicted direction spacing of a geodesic sphere with the measured one.
#[derive(Debug, Parser)]
struct Args {
    #[arg(default_value_t = 80)]
    subdivisions: usize,

    /// Print every edge angle, not just the summary.
    #[arg(long)]
    edges: bool,
}

fn main() -> PatternResult<()> {
    let args = Args::parse();
    let (verts, tris) = generate_polyhedron(args.subdivisions)?;

    println!(
        "Prediction: {}",
        geodesic_polyhedron::distance_for_subdivision(args.subdivisions)
    );

    let angles: Vec<f64> = tris
        .iter()
        .flat_map(|tri| {
            [
                verts[tri.0].angle(&verts[tri.1]),
                verts[tri.0].angle(&verts[tri.2]),
                verts[tri.1].angle(&verts[tri.2]),
            ]
        })
        .collect();

    if args.edges {
        for a in &angles {
            println!("{}", a);
        }
    }

    let mean = angles.iter().sum::<f64>() / angles.len().max(1) as f64;
    let min = angles.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = angles.iter().cloned().fold(0., f64::max);
    println!("Vertices: {}", verts.len());
    println!("Measured: mean {} min {} max {}", mean, min, max);
    Ok(())
}
