use std::fmt::Debug;
use std::hash::Hash;

use glam::{IVec2, IVec3};

use crate::config::LatticeKind;
use crate::lattice;

/// 0-based order in which a particle stuck to the aggregate.
///
/// Indices are assigned by [`crate::aggregate::Aggregate::insert`] and are
/// gap-free and strictly increasing for the lifetime of one aggregate.
pub type GenerationIndex = usize;

/// An integer lattice coordinate in two or three dimensions.
///
/// Implemented for [`glam::IVec2`] and [`glam::IVec3`]; equality and
/// hashing are structural, so coordinates can serve as map keys.
pub trait LatticePoint: Copy + Eq + Hash + Debug + Send + 'static {
    /// Number of lattice axes (2 or 3).
    const DIM: usize;
    /// The lattice origin.
    const ZERO: Self;

    /// Value of the `i`-th axis.
    ///
    /// ### Panics
    /// Panics if `i >= Self::DIM`.
    fn axis(self, i: usize) -> i32;

    /// Sets the `i`-th axis to `value`.
    ///
    /// ### Panics
    /// Panics if `i >= Self::DIM`.
    fn set_axis(&mut self, i: usize, value: i32);

    /// Builds a point from per-axis values; `z` is ignored on 2D lattices.
    fn from_xyz(x: i32, y: i32, z: i32) -> Self;

    /// Takes exactly one discrete lattice step chosen by `u` in `[0, 1)`.
    fn step(self, kind: LatticeKind, u: f64) -> Self;
}

impl LatticePoint for IVec2 {
    const DIM: usize = 2;
    const ZERO: Self = IVec2::ZERO;

    fn axis(self, i: usize) -> i32 {
        match i {
            0 => self.x,
            1 => self.y,
            _ => panic!("axis {i} out of range for a 2D lattice point"),
        }
    }

    fn set_axis(&mut self, i: usize, value: i32) {
        match i {
            0 => self.x = value,
            1 => self.y = value,
            _ => panic!("axis {i} out of range for a 2D lattice point"),
        }
    }

    fn from_xyz(x: i32, y: i32, _z: i32) -> Self {
        IVec2::new(x, y)
    }

    fn step(self, kind: LatticeKind, u: f64) -> Self {
        lattice::step_2d(kind, self, u)
    }
}

impl LatticePoint for IVec3 {
    const DIM: usize = 3;
    const ZERO: Self = IVec3::ZERO;

    fn axis(self, i: usize) -> i32 {
        match i {
            0 => self.x,
            1 => self.y,
            2 => self.z,
            _ => panic!("axis {i} out of range for a 3D lattice point"),
        }
    }

    fn set_axis(&mut self, i: usize, value: i32) {
        match i {
            0 => self.x = value,
            1 => self.y = value,
            2 => self.z = value,
            _ => panic!("axis {i} out of range for a 3D lattice point"),
        }
    }

    fn from_xyz(x: i32, y: i32, z: i32) -> Self {
        IVec3::new(x, y, z)
    }

    fn step(self, kind: LatticeKind, u: f64) -> Self {
        lattice::step_3d(kind, self, u)
    }
}
