use std::fmt;
use std::ops::{Mul, Neg};

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// Runtime-dimension numeric tuple used for positions, velocities and forces.
///
/// Binary operations require both operands to share a dimension and report
/// [`SimError::DimensionMismatch`] otherwise. Scaling cannot fail, so it is
/// also available through `*` with the scalar on either side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vector {
    components: Vec<f64>,
}

impl Vector {
    pub fn new(components: Vec<f64>) -> Self {
        Self { components }
    }

    /// The zero vector of the given dimension.
    pub fn zeros(dimension: usize) -> Self {
        Self {
            components: vec![0.0; dimension],
        }
    }

    pub fn dimension(&self) -> usize {
        self.components.len()
    }

    pub fn components(&self) -> &[f64] {
        &self.components
    }

    pub fn get(&self, index: usize) -> Result<f64> {
        self.components
            .get(index)
            .copied()
            .ok_or(SimError::OutOfRange {
                index,
                dimension: self.dimension(),
            })
    }

    pub fn set(&mut self, index: usize, value: f64) -> Result<()> {
        let dimension = self.dimension();
        let slot = self
            .components
            .get_mut(index)
            .ok_or(SimError::OutOfRange { index, dimension })?;
        *slot = value;
        Ok(())
    }

    pub fn add(&self, other: &Vector) -> Result<Vector> {
        self.zip_with(other, |a, b| a + b)
    }

    pub fn subtract(&self, other: &Vector) -> Result<Vector> {
        self.zip_with(other, |a, b| a - b)
    }

    pub fn dot(&self, other: &Vector) -> Result<f64> {
        self.check_dimension(other)?;
        Ok(self
            .components
            .iter()
            .zip(&other.components)
            .map(|(a, b)| a * b)
            .sum())
    }

    /// Euclidean norm. Zero for the zero vector.
    pub fn magnitude(&self) -> f64 {
        self.components.iter().map(|c| c * c).sum::<f64>().sqrt()
    }

    /// Unit vector in the same direction.
    ///
    /// Only an exactly-zero magnitude is rejected; tiny vectors are still
    /// divided through.
    pub fn normalize(&self) -> Result<Vector> {
        let magnitude = self.magnitude();
        if magnitude == 0.0 {
            return Err(SimError::DegenerateVector);
        }
        Ok(self.scale(1.0 / magnitude))
    }

    pub fn scale(&self, factor: f64) -> Vector {
        Vector {
            components: self.components.iter().map(|c| c * factor).collect(),
        }
    }

    /// Euclidean distance between two points of the same dimension.
    pub fn distance(&self, other: &Vector) -> Result<f64> {
        Ok(self.subtract(other)?.magnitude())
    }

    /// Projects onto the plane of the first two components, padding with zero.
    pub fn to_dvec2(&self) -> DVec2 {
        let x = self.components.first().copied().unwrap_or(0.0);
        let y = self.components.get(1).copied().unwrap_or(0.0);
        DVec2::new(x, y)
    }

    fn check_dimension(&self, other: &Vector) -> Result<()> {
        if self.dimension() != other.dimension() {
            return Err(SimError::DimensionMismatch {
                expected: self.dimension(),
                found: other.dimension(),
            });
        }
        Ok(())
    }

    fn zip_with(&self, other: &Vector, op: impl Fn(f64, f64) -> f64) -> Result<Vector> {
        self.check_dimension(other)?;
        Ok(Vector {
            components: self
                .components
                .iter()
                .zip(&other.components)
                .map(|(a, b)| op(*a, *b))
                .collect(),
        })
    }
}

/// Scalar-on-the-left form of [`Vector::scale`].
pub fn scale(factor: f64, vector: &Vector) -> Vector {
    vector.scale(factor)
}

impl Mul<f64> for &Vector {
    type Output = Vector;

    fn mul(self, factor: f64) -> Vector {
        self.scale(factor)
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    fn mul(self, factor: f64) -> Vector {
        self.scale(factor)
    }
}

impl Mul<&Vector> for f64 {
    type Output = Vector;

    fn mul(self, vector: &Vector) -> Vector {
        vector.scale(self)
    }
}

impl Mul<Vector> for f64 {
    type Output = Vector;

    fn mul(self, vector: Vector) -> Vector {
        vector.scale(self)
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        self.scale(-1.0)
    }
}

impl From<DVec2> for Vector {
    fn from(value: DVec2) -> Self {
        Self::new(vec![value.x, value.y])
    }
}

impl<const N: usize> From<[f64; N]> for Vector {
    fn from(value: [f64; N]) -> Self {
        Self::new(value.to_vec())
    }
}

impl From<Vec<f64>> for Vector {
    fn from(components: Vec<f64>) -> Self {
        Self::new(components)
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vector({:?})", self.components)
    }
}
