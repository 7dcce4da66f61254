//! Move-direction rules for each lattice kind and dimensionality.
//!
//! A step is a pure function of `(lattice kind, coordinate, u)`: the
//! unit interval is partitioned into equal-width bins, one per allowed
//! move, and `u` selects the bin. The move tables below fix the bin
//! order, so a given `u` always maps to the same translation.

use glam::{IVec2, IVec3};

use crate::config::LatticeKind;

/// 2D SQUARE: four axis moves, each of width 1/4.
const SQUARE_2D: [IVec2; 4] = [
    IVec2::new(1, 0),
    IVec2::new(-1, 0),
    IVec2::new(0, 1),
    IVec2::new(0, -1),
];

/// 2D TRIANGLE: two x-axis moves plus four diagonals, each of width 1/6.
const TRIANGLE_2D: [IVec2; 6] = [
    IVec2::new(1, 0),
    IVec2::new(-1, 0),
    IVec2::new(1, 1),
    IVec2::new(1, -1),
    IVec2::new(-1, 1),
    IVec2::new(-1, -1),
];

/// 3D SQUARE: six axis moves, each of width 1/6.
const SQUARE_3D: [IVec3; 6] = [
    IVec3::new(1, 0, 0),
    IVec3::new(-1, 0, 0),
    IVec3::new(0, 1, 0),
    IVec3::new(0, -1, 0),
    IVec3::new(0, 0, 1),
    IVec3::new(0, 0, -1),
];

/// 3D TRIANGLE: the 2D triangle moves in the xy-plane plus two z moves,
/// each of width 1/8.
const TRIANGLE_3D: [IVec3; 8] = [
    IVec3::new(1, 0, 0),
    IVec3::new(-1, 0, 0),
    IVec3::new(1, 1, 0),
    IVec3::new(1, -1, 0),
    IVec3::new(-1, 1, 0),
    IVec3::new(-1, -1, 0),
    IVec3::new(0, 0, 1),
    IVec3::new(0, 0, -1),
];

/// Maps `u` in `[0, 1)` to one of `moves.len()` equal-width bins.
fn pick<T: Copy>(moves: &[T], u: f64) -> T {
    // u == 1.0 cannot occur for a half-open source; the min() guards
    // against rounding at the top of the interval anyway.
    let idx = ((u * moves.len() as f64) as usize).min(moves.len() - 1);
    moves[idx]
}

/// One discrete step on a 2D lattice.
pub fn step_2d(kind: LatticeKind, p: IVec2, u: f64) -> IVec2 {
    let mv = match kind {
        LatticeKind::Square => pick(&SQUARE_2D, u),
        LatticeKind::Triangle => pick(&TRIANGLE_2D, u),
    };
    p + mv
}

/// One discrete step on a 3D lattice.
pub fn step_3d(kind: LatticeKind, p: IVec3, u: f64) -> IVec3 {
    let mv = match kind {
        LatticeKind::Square => pick(&SQUARE_3D, u),
        LatticeKind::Triangle => pick(&TRIANGLE_3D, u),
    };
    p + mv
}

#[cfg(test)]
mod tests {
    use super::*;

    // A value just inside bin i of n equal-width bins.
    fn bin(i: usize, n: usize) -> f64 {
        (i as f64 + 0.5) / n as f64
    }

    #[test]
    fn square_2d_partitions_into_four_axis_moves() {
        let origin = IVec2::ZERO;
        assert_eq!(step_2d(LatticeKind::Square, origin, bin(0, 4)), IVec2::new(1, 0));
        assert_eq!(step_2d(LatticeKind::Square, origin, bin(1, 4)), IVec2::new(-1, 0));
        assert_eq!(step_2d(LatticeKind::Square, origin, bin(2, 4)), IVec2::new(0, 1));
        assert_eq!(step_2d(LatticeKind::Square, origin, bin(3, 4)), IVec2::new(0, -1));
    }

    #[test]
    fn square_2d_bin_edges_map_to_expected_moves() {
        let origin = IVec2::ZERO;
        assert_eq!(step_2d(LatticeKind::Square, origin, 0.0), IVec2::new(1, 0));
        assert_eq!(step_2d(LatticeKind::Square, origin, 0.2499), IVec2::new(1, 0));
        assert_eq!(step_2d(LatticeKind::Square, origin, 0.25), IVec2::new(-1, 0));
        assert_eq!(step_2d(LatticeKind::Square, origin, 0.75), IVec2::new(0, -1));
        assert_eq!(step_2d(LatticeKind::Square, origin, 0.9999), IVec2::new(0, -1));
    }

    #[test]
    fn triangle_2d_covers_two_axis_and_four_diagonal_moves() {
        let origin = IVec2::ZERO;
        let expected = [
            IVec2::new(1, 0),
            IVec2::new(-1, 0),
            IVec2::new(1, 1),
            IVec2::new(1, -1),
            IVec2::new(-1, 1),
            IVec2::new(-1, -1),
        ];
        for (i, want) in expected.iter().enumerate() {
            assert_eq!(step_2d(LatticeKind::Triangle, origin, bin(i, 6)), *want);
        }
    }

    #[test]
    fn square_3d_covers_six_axis_moves() {
        let origin = IVec3::ZERO;
        let expected = [
            IVec3::new(1, 0, 0),
            IVec3::new(-1, 0, 0),
            IVec3::new(0, 1, 0),
            IVec3::new(0, -1, 0),
            IVec3::new(0, 0, 1),
            IVec3::new(0, 0, -1),
        ];
        for (i, want) in expected.iter().enumerate() {
            assert_eq!(step_3d(LatticeKind::Square, origin, bin(i, 6)), *want);
        }
    }

    #[test]
    fn triangle_3d_covers_eight_moves() {
        let origin = IVec3::ZERO;
        let expected = [
            IVec3::new(1, 0, 0),
            IVec3::new(-1, 0, 0),
            IVec3::new(1, 1, 0),
            IVec3::new(1, -1, 0),
            IVec3::new(-1, 1, 0),
            IVec3::new(-1, -1, 0),
            IVec3::new(0, 0, 1),
            IVec3::new(0, 0, -1),
        ];
        for (i, want) in expected.iter().enumerate() {
            assert_eq!(step_3d(LatticeKind::Triangle, origin, bin(i, 8)), *want);
        }
    }

    #[test]
    fn step_translates_relative_to_the_input_point() {
        let p = IVec2::new(10, -4);
        assert_eq!(step_2d(LatticeKind::Square, p, 0.0), IVec2::new(11, -4));
    }
}
