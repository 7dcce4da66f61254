//! Spawn-zone sizing and placement of new particles.
//!
//! Each walk starts on the surface of a bounding region sized from the
//! current farthest aggregate member. POINT and CIRCLE attractors use
//! the full bounding box; LINE and PLANE attractors spawn on the faces
//! above and/or below the seed, gated by [`SpawnSources`].

use crate::config::{AttractorKind, SpawnSources};
use crate::random::UniformRandom;
use crate::types::LatticePoint;

/// Fixed margin added to the spawn diameter so fresh particles never
/// start in contact with the structure.
pub const BOUNDARY_OFFSET: i32 = 8;

/// Diameter of the spawn bounding region.
///
/// `2 * round(sqrt(farthest_sq))` plus [`BOUNDARY_OFFSET`]; an empty
/// aggregate falls back to the attractor's own size. The CIRCLE metric
/// is measured from the ring, so its diameter also covers the ring
/// itself.
pub fn spawn_diameter(kind: AttractorKind, size: u32, farthest_sq: Option<f64>) -> i32 {
    let span = match farthest_sq {
        Some(d) => 2 * d.sqrt().round() as i32,
        None => size as i32,
    };
    let span = match kind {
        AttractorKind::Circle => span + 2 * size as i32,
        _ => span,
    };
    span + BOUNDARY_OFFSET
}

/// Places a new particle uniformly at random on the spawn surface.
/// For LINE and PLANE only the faces enabled in `sources` are
/// eligible. Returns the coordinate and the diameter bounding the walk.
pub fn spawn_point<P: LatticePoint>(
    kind: AttractorKind,
    size: u32,
    farthest_sq: Option<f64>,
    sources: SpawnSources,
    rng: &mut impl UniformRandom,
) -> (P, i32) {
    let diam = spawn_diameter(kind, size, farthest_sq);
    let half = diam / 2;
    let mut p = P::ZERO;

    match kind {
        AttractorKind::Point | AttractorKind::Circle => {
            // uniform face of the bounding box: 2 * DIM faces
            let faces = 2 * P::DIM;
            let face = ((rng.next_unit() * faces as f64) as usize).min(faces - 1);
            let fixed = face / 2;
            let sign = if face % 2 == 0 { 1 } else { -1 };
            for i in 0..P::DIM {
                if i == fixed {
                    p.set_axis(i, sign * half);
                } else {
                    p.set_axis(i, surface_offset(diam, rng));
                }
            }
        }
        AttractorKind::Line => {
            // face is a line (2D) or plane (3D) parallel to the x-axis;
            // pick the perpendicular axis uniformly in 3D
            let perp = if P::DIM == 3 && rng.next_unit() < 0.5 { 2 } else { 1 };
            p.set_axis(0, seed_axis_offset(size, diam, rng));
            p.set_axis(perp, side_sign(sources, rng) * half);
            if P::DIM == 3 {
                let other = if perp == 1 { 2 } else { 1 };
                p.set_axis(other, surface_offset(diam, rng));
            }
        }
        AttractorKind::Plane => {
            for i in 0..P::DIM - 1 {
                p.set_axis(i, seed_axis_offset(size, diam, rng));
            }
            p.set_axis(P::DIM - 1, side_sign(sources, rng) * half);
        }
    }
    (p, diam)
}

fn surface_offset(diam: i32, rng: &mut impl UniformRandom) -> i32 {
    (diam as f64 * (rng.next_unit() - 0.5)) as i32
}

/// Uniform offset along an axis the seed extends over, widened by the
/// spawn radius so walks can reach past the seed ends.
fn seed_axis_offset(size: u32, diam: i32, rng: &mut impl UniformRandom) -> i32 {
    let span = size as i32 + diam;
    (span as f64 * (rng.next_unit() - 0.5)) as i32
}

/// +1 for the face above the seed, -1 for the face below, honouring the
/// enabled spawn sources. Both disabled is rejected upstream; the
/// fallback here keeps the function total.
fn side_sign(sources: SpawnSources, rng: &mut impl UniformRandom) -> i32 {
    match (sources.above, sources.below) {
        (true, true) => {
            if rng.next_unit() < 0.5 {
                1
            } else {
                -1
            }
        }
        (true, false) => 1,
        _ => -1,
    }
}
