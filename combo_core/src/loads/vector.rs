//! Six-component point load vector

use std::ops::Add;

use serde::{Deserialize, Serialize};

/// Forces and moments acting at a point: `[Fx, Fy, Fz, Mx, My, Mz]`.
///
/// Values are plain `f64`; NaN and infinities propagate through arithmetic.
///
/// # Example
/// ```
/// use combo_core::loads::LoadVector;
///
/// let d = LoadVector::new([1.0, 0.0, -2.0, 0.0, 0.5, 0.0]);
/// let combined = d.scale(1.2) + LoadVector::ZERO;
/// assert_eq!(combined.fz(), -2.4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LoadVector([f64; 6]);

impl LoadVector {
    /// Column names of the six components, in order
    pub const COMPONENTS: [&'static str; 6] = ["Fx", "Fy", "Fz", "Mx", "My", "Mz"];

    /// The zero vector
    pub const ZERO: LoadVector = LoadVector([0.0; 6]);

    pub const fn new(values: [f64; 6]) -> Self {
        LoadVector(values)
    }

    /// Multiply every component by `factor`
    pub fn scale(&self, factor: f64) -> Self {
        LoadVector(self.0.map(|v| factor * v))
    }

    pub fn values(&self) -> &[f64; 6] {
        &self.0
    }

    pub fn fx(&self) -> f64 {
        self.0[0]
    }

    pub fn fy(&self) -> f64 {
        self.0[1]
    }

    pub fn fz(&self) -> f64 {
        self.0[2]
    }

    pub fn mx(&self) -> f64 {
        self.0[3]
    }

    pub fn my(&self) -> f64 {
        self.0[4]
    }

    pub fn mz(&self) -> f64 {
        self.0[5]
    }
}

impl Add for LoadVector {
    type Output = LoadVector;

    fn add(self, rhs: LoadVector) -> LoadVector {
        let mut out = self.0;
        for (o, r) in out.iter_mut().zip(rhs.0) {
            *o += r;
        }
        LoadVector(out)
    }
}

impl From<[f64; 6]> for LoadVector {
    fn from(values: [f64; 6]) -> Self {
        LoadVector(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_default() {
        assert_eq!(LoadVector::default(), LoadVector::ZERO);
    }

    #[test]
    fn test_scale_and_add() {
        let a = LoadVector::new([1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let b = LoadVector::new([0.5; 6]);
        let sum = a.scale(2.0) + b;
        assert_eq!(sum.values(), &[2.5, 4.5, 6.5, 8.5, 10.5, 12.5]);
    }

    #[test]
    fn test_component_accessors() {
        let v = LoadVector::new([1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(
            [v.fx(), v.fy(), v.fz(), v.mx(), v.my(), v.mz()],
            [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]
        );
    }

    #[test]
    fn test_nan_propagates() {
        let v = LoadVector::new([f64::NAN, 1.0, 0.0, 0.0, 0.0, 0.0]).scale(2.0) + LoadVector::ZERO;
        assert!(v.fx().is_nan());
        assert_eq!(v.fy(), 2.0);
    }

    #[test]
    fn test_zero_times_infinity_is_nan() {
        let v = LoadVector::new([f64::INFINITY, 0.0, 0.0, 0.0, 0.0, 0.0]).scale(0.0);
        assert!(v.fx().is_nan());
    }
}
