use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    antenna::AntennaDescriptor,
    engine::{EvaluationMode, PatternEngine, DEFAULT_SEGMENT_COUNT},
    error::PatternResult,
    gain::Presentation,
    geodesic_polyhedron::SphereSampling,
    logging::LogConfig,
};

// Everything one pattern evaluation needs, as loaded from a JSON file. Only `antenna` is
// required; the rest falls back to the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternConfig {
    pub antenna: AntennaDescriptor,
    #[serde(default = "default_segment_count")]
    pub segment_count: usize,
    #[serde(default)]
    pub sampling: SphereSampling,
    #[serde(default)]
    pub mode: EvaluationMode,
    #[serde(default = "default_parallel")]
    pub parallel: bool,
    #[serde(default)]
    pub presentation: Presentation,
    #[serde(default)]
    pub log: LogConfig,
}

fn default_segment_count() -> usize {
    DEFAULT_SEGMENT_COUNT
}

fn default_parallel() -> bool {
    true
}

impl PatternConfig {
    pub fn new(antenna: AntennaDescriptor) -> PatternConfig {
        PatternConfig {
            antenna,
            segment_count: DEFAULT_SEGMENT_COUNT,
            sampling: SphereSampling::default(),
            mode: EvaluationMode::default(),
            parallel: true,
            presentation: Presentation::default(),
            log: LogConfig::default(),
        }
    }

    pub fn from_json(json: &str) -> PatternResult<PatternConfig> {
        let config: PatternConfig = serde_json::from_str(json)?;
        config.antenna.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> PatternResult<PatternConfig> {
        let text = fs::read_to_string(path)?;
        PatternConfig::from_json(&text)
    }

    pub fn engine(&self) -> PatternEngine {
        PatternEngine {
            segment_count: self.segment_count,
            mode: self.mode,
            parallel: self.parallel,
        }
    }
}
