use nalgebra::Vector3;

use crate::helper::vec_to_aspect;

// A function defined on the surface of a sphere `S`, i.e. a (not yet normalized) gain pattern.
// Angles follow `helper::vec_to_aspect`.
pub trait SphericalFunction {
    fn lookup(&self, az: f64, el: f64) -> f64;
    fn lookup_vec(&self, vec: Vector3<f64>) -> f64 {
        let (az, el) = vec_to_aspect(vec);
        self.lookup(az, el)
    }
}

pub trait SphericalFunctionHelper {
    fn lookup_many(&self, items: &[Vector3<f64>]) -> Vec<f64>;
}

impl<T: SphericalFunction + ?Sized> SphericalFunctionHelper for T {
    fn lookup_many(&self, items: &[Vector3<f64>]) -> Vec<f64> {
        items.iter().map(|x| self.lookup_vec(*x)).collect()
    }
}
