use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use farfield_lib::{
    antenna::{AntennaDescriptor, AntennaShape, VOrientation},
    config::PatternConfig,
    current::interior_nodes,
    cut::{count_lobes, evaluate_cut, LOBE_THRESHOLD},
    engine::EvaluationMode,
    error::PatternResult,
    gain::GainField,
    geodesic_polyhedron::SphereSampling,
    geometry::feed_point,
    helper::{decibels_or_else, vec_to_aspect},
    logging::{init_logging, LogLevel},
    mesh::PatternMesh,
};
use serde::Serialize;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Shape {
    Straight,
    InvertedV,
    UprightV,
    OffCenterFed,
    EndFedSloper,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    Numeric,
    ClosedForm,
}

/// Evaluates the far-field radiation pattern of a wire antenna.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// JSON pattern configuration; the antenna flags below are ignored when given.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value = "straight")]
    shape: Shape,

    /// Number of half-wavelengths along the wire.
    #[arg(short = 'n', long, default_value_t = 1)]
    harmonic: u32,

    #[arg(short, long, default_value_t = 2.0)]
    length: f64,

    /// Feed position as a fraction of the wire, for off-center-fed wires.
    #[arg(long, default_value_t = 1. / 3.)]
    feed: f64,

    /// Arm droop for V shapes, slope for slopers, in degrees.
    #[arg(long, default_value_t = 0.)]
    angle: f64,

    #[arg(short, long, default_value_t = 40)]
    segments: usize,

    #[arg(short, long, default_value_t = 4)]
    detail: u32,

    #[arg(long, value_enum, default_value = "numeric")]
    mode: Mode,

    /// Evaluate on the calling thread only.
    #[arg(long)]
    serial: bool,

    /// Samples on the wire-plane cut used for lobe counting.
    #[arg(long, default_value_t = 720)]
    cut_samples: usize,

    /// Print the gain field and mesh as JSON instead of the summary.
    #[arg(long)]
    json: bool,

    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn descriptor(&self) -> AntennaDescriptor {
        let shape = match self.shape {
            Shape::Straight => AntennaShape::Straight,
            Shape::InvertedV => AntennaShape::VBent {
                droop_deg: self.angle,
                orientation: VOrientation::Inverted,
            },
            Shape::UprightV => AntennaShape::VBent {
                droop_deg: self.angle,
                orientation: VOrientation::Upright,
            },
            Shape::OffCenterFed => AntennaShape::OffCenterFed {
                feed_fraction: self.feed,
                droop_deg: self.angle,
            },
            Shape::EndFedSloper => AntennaShape::EndFedSloper {
                slope_deg: self.angle,
            },
        };
        AntennaDescriptor {
            shape,
            harmonic: self.harmonic,
            length: self.length,
        }
    }

    fn pattern_config(&self) -> PatternResult<PatternConfig> {
        if let Some(ref path) = self.config {
            return PatternConfig::from_file(path);
        }
        let antenna = self.descriptor();
        antenna.validate()?;
        let mut config = PatternConfig::new(antenna);
        config.segment_count = self.segments;
        config.sampling = SphereSampling::Icosphere {
            detail: self.detail,
        };
        config.mode = match self.mode {
            Mode::Numeric => EvaluationMode::Numeric,
            Mode::ClosedForm => EvaluationMode::ClosedForm,
        };
        config.parallel = !self.serial;
        Ok(config)
    }
}

#[derive(Serialize)]
struct Dump<'a> {
    config: &'a PatternConfig,
    directions: Vec<[f64; 3]>,
    gains: Vec<f64>,
    positions: &'a [[f32; 3]],
    colors: &'a [[f32; 3]],
    indices: &'a [u32],
}

// Field values are amplitudes relative to the peak, so the average is taken over their squares.
fn mean_power_db(field: &GainField) -> f64 {
    let mean_power = field.values().mapv(|g| g * g).mean().unwrap_or(0.);
    decibels_or_else(mean_power, f64::NEG_INFINITY)
}

fn main() -> PatternResult<()> {
    let args = Args::parse();
    let mut config = args.pattern_config()?;
    if args.verbose {
        config.log.level = LogLevel::Debug;
    }
    init_logging(&config.log);

    let engine = config.engine();
    let (verts, tris) = config.sampling.mesh()?;
    let field = engine.evaluate(&config.antenna, &verts)?;
    let mesh = PatternMesh::build(&verts, &tris, &field, &config.presentation)?;

    if args.json {
        let dump = Dump {
            config: &config,
            directions: verts.iter().map(|v| [v.x, v.y, v.z]).collect(),
            gains: field.values().to_vec(),
            positions: &mesh.positions,
            colors: &mesh.colors,
            indices: &mesh.indices,
        };
        println!("{}", serde_json::to_string(&dump)?);
        return Ok(());
    }

    let cut = evaluate_cut(&engine, &config.antenna, args.cut_samples)?;
    let lobes = count_lobes(&cut.values().to_vec(), LOBE_THRESHOLD);
    let feed = feed_point(&config.antenna)?;
    let nodes: Vec<f64> = interior_nodes(config.antenna.harmonic).collect();

    println!(
        "{} antenna, n = {}, L = {}",
        config.antenna.shape.name(),
        config.antenna.harmonic,
        config.antenna.length
    );
    println!("Directions: {}", field.len());
    if let Some(peak) = field.argmax() {
        let (az, el) = vec_to_aspect(verts[peak]);
        println!(
            "Peak: az {:.1}°, el {:.1}°",
            az.to_degrees(),
            el.to_degrees()
        );
    }
    println!("Mean power: {:.2} dB below peak", -mean_power_db(&field));
    println!("Lobes on wire-plane cut: {}", lobes);
    println!("Feed point: ({:.3}, {:.3}, {:.3})", feed.x, feed.y, feed.z);
    println!("Current nodes: {:?}", nodes);

    Ok(())
}
