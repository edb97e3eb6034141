use std::{
    collections::{hash_map::DefaultHasher, HashMap, VecDeque},
    hash::{Hash, Hasher},
    sync::Arc,
};

use nalgebra::Vector3;

use crate::{
    antenna::{AntennaDescriptor, AntennaShape, VOrientation},
    engine::{EvaluationMode, PatternEngine},
    error::PatternResult,
    gain::GainField,
};

// Everything an evaluation depends on. Floats are keyed by their bit patterns, so two
// descriptors share an entry only if every parameter is bit-for-bit identical.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PatternKey {
    shape: (u8, u64, u64),
    harmonic: u32,
    length: u64,
    segment_count: usize,
    mode: EvaluationMode,
    direction_count: usize,
    direction_fingerprint: u64,
}

impl PatternKey {
    pub fn new(
        engine: &PatternEngine,
        descriptor: &AntennaDescriptor,
        directions: &[Vector3<f64>],
    ) -> PatternKey {
        PatternKey {
            shape: shape_key(&descriptor.shape),
            harmonic: descriptor.harmonic,
            length: descriptor.length.to_bits(),
            segment_count: engine.segment_count,
            mode: engine.mode,
            direction_count: directions.len(),
            direction_fingerprint: fingerprint(directions),
        }
    }
}

fn shape_key(shape: &AntennaShape) -> (u8, u64, u64) {
    match *shape {
        AntennaShape::Straight => (0, 0, 0),
        AntennaShape::VBent {
            droop_deg,
            orientation,
        } => {
            let side = match orientation {
                VOrientation::Inverted => 0,
                VOrientation::Upright => 1,
            };
            (1, droop_deg.to_bits(), side)
        }
        AntennaShape::OffCenterFed {
            feed_fraction,
            droop_deg,
        } => (2, feed_fraction.to_bits(), droop_deg.to_bits()),
        AntennaShape::EndFedSloper { slope_deg } => (3, slope_deg.to_bits(), 0),
    }
}

fn fingerprint(directions: &[Vector3<f64>]) -> u64 {
    let mut hasher = DefaultHasher::new();
    for dir in directions {
        for c in dir.iter() {
            c.to_bits().hash(&mut hasher);
        }
    }
    hasher.finish()
}

/*
Memoizes gain fields by their full parameter tuple. The cache is a plain value owned by the
caller; nothing about it is global. Fields are handed out behind `Arc` so a consumer can keep
displaying one while a newer one replaces it. Oldest entries are evicted first once `capacity`
is reached. Failed evaluations are not stored.
*/
#[derive(Debug)]
pub struct PatternCache {
    capacity: usize,
    entries: HashMap<PatternKey, Arc<GainField>>,
    order: VecDeque<PatternKey>,
    hits: u64,
    misses: u64,
}

impl PatternCache {
    pub fn new(capacity: usize) -> PatternCache {
        PatternCache {
            capacity: capacity.max(1),
            entries: HashMap::new(),
            order: VecDeque::new(),
            hits: 0,
            misses: 0,
        }
    }

    pub fn get_or_evaluate(
        &mut self,
        engine: &PatternEngine,
        descriptor: &AntennaDescriptor,
        directions: &[Vector3<f64>],
    ) -> PatternResult<Arc<GainField>> {
        let key = PatternKey::new(engine, descriptor, directions);
        if let Some(field) = self.entries.get(&key) {
            self.hits += 1;
            tracing::trace!(hits = self.hits, "pattern cache hit");
            return Ok(Arc::clone(field));
        }

        self.misses += 1;
        let field = Arc::new(engine.evaluate(descriptor, directions)?);
        if self.entries.len() >= self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
            }
        }
        self.order.push_back(key.clone());
        self.entries.insert(key, Arc::clone(&field));
        Ok(field)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use super::*;
    use crate::geodesic_polyhedron::SphereSampling;

    fn dirs() -> Vec<Vector3<f64>> {
        SphereSampling::Geodesic { frequency: 3 }.directions().unwrap()
    }

    #[test]
    fn identical_parameters_hit() {
        let mut cache = PatternCache::new(8);
        let engine = PatternEngine::default();
        let desc = AntennaDescriptor::straight(1, 2.);
        let dirs = dirs();
        let a = cache.get_or_evaluate(&engine, &desc, &dirs).unwrap();
        let b = cache.get_or_evaluate(&engine, &desc, &dirs).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!((cache.hits(), cache.misses()), (1, 1));
    }

    #[test]
    fn any_parameter_change_misses() {
        let mut cache = PatternCache::new(16);
        let engine = PatternEngine::default();
        let dirs = dirs();
        let base = AntennaDescriptor::off_center_fed(2, 2., 0.3);
        cache.get_or_evaluate(&engine, &base, &dirs).unwrap();

        let mut harmonic = base;
        harmonic.harmonic = 3;
        let feed = AntennaDescriptor::off_center_fed(2, 2., 0.31);
        let mut segments = engine;
        segments.segment_count = 41;
        let mut mode = engine;
        mode.mode = EvaluationMode::ClosedForm;

        cache.get_or_evaluate(&engine, &harmonic, &dirs).unwrap();
        cache.get_or_evaluate(&engine, &feed, &dirs).unwrap();
        cache.get_or_evaluate(&segments, &base, &dirs).unwrap();
        cache.get_or_evaluate(&mode, &base, &dirs).unwrap();
        cache.get_or_evaluate(&engine, &base, &dirs[1..]).unwrap();
        assert_eq!(cache.misses(), 6);
        assert_eq!(cache.hits(), 0);
        assert_eq!(cache.len(), 6);
    }

    #[test]
    fn evicts_oldest_first() {
        let mut cache = PatternCache::new(2);
        let engine = PatternEngine::default();
        let dirs = dirs();
        let first = AntennaDescriptor::straight(1, 1.);
        cache.get_or_evaluate(&engine, &first, &dirs).unwrap();
        cache
            .get_or_evaluate(&engine, &AntennaDescriptor::straight(2, 1.), &dirs)
            .unwrap();
        cache
            .get_or_evaluate(&engine, &AntennaDescriptor::straight(3, 1.), &dirs)
            .unwrap();
        assert_eq!(cache.len(), 2);
        cache.get_or_evaluate(&engine, &first, &dirs).unwrap();
        assert_eq!(cache.misses(), 4);
    }

    #[test]
    fn errors_are_not_cached() {
        let mut cache = PatternCache::new(4);
        let engine = PatternEngine::default();
        let bad = AntennaDescriptor::straight(1, 0.);
        assert!(cache.get_or_evaluate(&engine, &bad, &dirs()).is_err());
        assert!(cache.is_empty());
        cache.clear();
        assert_eq!(cache.len(), 0);
    }
}
