//! Symmetric second-rank tensors.

use std::ops::{Add, AddAssign, Mul, Neg, Sub};

use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

/// Symmetric 3×3 tensor stored as its six independent components.
///
/// Serialized as `[xx, xy, xz, yy, yz, zz]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 6]", into = "[f64; 6]")]
pub struct SymmTensor {
    pub xx: f64,
    pub xy: f64,
    pub xz: f64,
    pub yy: f64,
    pub yz: f64,
    pub zz: f64,
}

impl From<[f64; 6]> for SymmTensor {
    fn from([xx, xy, xz, yy, yz, zz]: [f64; 6]) -> Self {
        Self { xx, xy, xz, yy, yz, zz }
    }
}

impl From<SymmTensor> for [f64; 6] {
    fn from(t: SymmTensor) -> Self {
        [t.xx, t.xy, t.xz, t.yy, t.yz, t.zz]
    }
}

impl SymmTensor {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.0);
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 1.0);

    pub const fn new(xx: f64, xy: f64, xz: f64, yy: f64, yz: f64, zz: f64) -> Self {
        Self { xx, xy, xz, yy, yz, zz }
    }

    /// Symmetric part of `m`.
    pub fn from_matrix(m: &Matrix3<f64>) -> Self {
        Self::new(
            m[(0, 0)],
            0.5 * (m[(0, 1)] + m[(1, 0)]),
            0.5 * (m[(0, 2)] + m[(2, 0)]),
            m[(1, 1)],
            0.5 * (m[(1, 2)] + m[(2, 1)]),
            m[(2, 2)],
        )
    }

    pub fn to_matrix(&self) -> Matrix3<f64> {
        Matrix3::new(
            self.xx, self.xy, self.xz, //
            self.xy, self.yy, self.yz, //
            self.xz, self.yz, self.zz,
        )
    }

    pub fn trace(&self) -> f64 {
        self.xx + self.yy + self.zz
    }

    /// Deviatoric part `A − tr(A)/3 I`.
    pub fn dev(&self) -> Self {
        let third = self.trace() / 3.0;
        Self {
            xx: self.xx - third,
            yy: self.yy - third,
            zz: self.zz - third,
            ..*self
        }
    }

    /// `A : B = Σ A_ij B_ij`.
    pub fn double_dot(&self, other: &Self) -> f64 {
        self.xx * other.xx
            + self.yy * other.yy
            + self.zz * other.zz
            + 2.0 * (self.xy * other.xy + self.xz * other.xz + self.yz * other.yz)
    }

    /// `R A Rᵀ`.
    pub fn transform(&self, r: &Matrix3<f64>) -> Self {
        Self::from_matrix(&(r * self.to_matrix() * r.transpose()))
    }

    /// Eigenvalues in descending order.
    pub fn eigenvalues(&self) -> Vector3<f64> {
        let mut ev: Vec<f64> = self.to_matrix().symmetric_eigenvalues().iter().copied().collect();
        ev.sort_by(|a, b| b.total_cmp(a));
        Vector3::new(ev[0], ev[1], ev[2])
    }
}

impl Add for SymmTensor {
    type Output = Self;

    fn add(self, o: Self) -> Self {
        Self::new(
            self.xx + o.xx,
            self.xy + o.xy,
            self.xz + o.xz,
            self.yy + o.yy,
            self.yz + o.yz,
            self.zz + o.zz,
        )
    }
}

impl AddAssign for SymmTensor {
    fn add_assign(&mut self, o: Self) {
        *self = *self + o;
    }
}

impl Sub for SymmTensor {
    type Output = Self;

    fn sub(self, o: Self) -> Self {
        self + (-o)
    }
}

impl Neg for SymmTensor {
    type Output = Self;

    fn neg(self) -> Self {
        self * -1.0
    }
}

impl Mul<f64> for SymmTensor {
    type Output = Self;

    fn mul(self, s: f64) -> Self {
        Self::new(
            self.xx * s,
            self.xy * s,
            self.xz * s,
            self.yy * s,
            self.yz * s,
            self.zz * s,
        )
    }
}
