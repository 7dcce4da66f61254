//! Seed geometries particles can stick to, and the distance metric
//! used to rank aggregate members. The metric is squared distance
//! beyond the attractor surface for every kind; it feeds the
//! farthest-point heap, spawn-zone sizing and the dimension estimate.

use std::collections::HashSet;

use crate::config::AttractorKind;
use crate::error::Error;
use crate::types::LatticePoint;

/// The immutable seed set, rebuilt whenever kind or size changes.
#[derive(Clone, Debug)]
pub struct AttractorSet<P: LatticePoint> {
    kind: AttractorKind,
    size: u32,
    points: HashSet<P>,
}

impl<P: LatticePoint> AttractorSet<P> {
    /// Builds the seed set for `kind` with extent `size`.
    ///
    /// - POINT: the origin.
    /// - LINE: integer points on the x-axis spanning `[-size/2, size/2)`.
    /// - PLANE: an xy grid over the same span, z = 0 (3D only).
    /// - CIRCLE: integer-rounded points on a radius-`size` circle in the
    ///   xy-plane, sampled at 1-degree steps.
    ///
    /// ### Errors
    /// `Error::AttractorDimensionMismatch` for PLANE on a 2D lattice,
    /// `Error::EmptyAttractor` for a LINE or PLANE of size 0, whose
    /// span would hold no points at all.
    pub fn build(kind: AttractorKind, size: u32) -> Result<Self, Error> {
        if kind == AttractorKind::Plane && P::DIM == 2 {
            return Err(Error::AttractorDimensionMismatch { kind, dim: P::DIM });
        }
        if matches!(kind, AttractorKind::Line | AttractorKind::Plane) && size == 0 {
            return Err(Error::EmptyAttractor(kind));
        }

        let mut points = HashSet::new();
        let half = (size / 2) as i32;
        let span = -half..(size as i32 - half);
        match kind {
            AttractorKind::Point => {
                points.insert(P::ZERO);
            }
            AttractorKind::Line => {
                for x in span {
                    points.insert(P::from_xyz(x, 0, 0));
                }
            }
            AttractorKind::Plane => {
                for x in span.clone() {
                    for y in span.clone() {
                        points.insert(P::from_xyz(x, y, 0));
                    }
                }
            }
            AttractorKind::Circle => {
                let radius = size as f64;
                for deg in 0..360 {
                    let theta = (deg as f64).to_radians();
                    let x = (radius * theta.cos()).round() as i32;
                    let y = (radius * theta.sin()).round() as i32;
                    points.insert(P::from_xyz(x, y, 0));
                }
            }
        }
        Ok(Self { kind, size, points })
    }

    pub fn kind(&self) -> AttractorKind {
        self.kind
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn contains(&self, p: &P) -> bool {
        self.points.contains(p)
    }

    pub fn iter(&self) -> impl Iterator<Item = &P> {
        self.points.iter()
    }
}

/// Squared distance of `p` beyond the attractor surface.
pub fn distance_sq<P: LatticePoint>(p: P, kind: AttractorKind, size: u32) -> f64 {
    match kind {
        AttractorKind::Point => norm_sq(p, 0),
        // perpendicular offset from the x-axis
        AttractorKind::Line => norm_sq(p, 1),
        // offset along the plane normal (the last axis)
        AttractorKind::Plane => {
            let z = p.axis(P::DIM - 1) as f64;
            z * z
        }
        AttractorKind::Circle => {
            let offset = norm_sq(p, 0).sqrt() - size as f64;
            offset * offset
        }
    }
}

/// Sum of squared axis values starting at axis `from`.
fn norm_sq<P: LatticePoint>(p: P, from: usize) -> f64 {
    (from..P::DIM)
        .map(|i| {
            let v = p.axis(i) as f64;
            v * v
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{IVec2, IVec3};

    #[test]
    fn point_seed_is_the_origin() {
        let set = AttractorSet::<IVec2>::build(AttractorKind::Point, 0).unwrap();
        assert_eq!(set.len(), 1);
        assert!(set.contains(&IVec2::ZERO));
    }

    #[test]
    fn line_seed_spans_the_half_open_interval() {
        let set = AttractorSet::<IVec2>::build(AttractorKind::Line, 4).unwrap();
        assert_eq!(set.len(), 4);
        for x in -2..2 {
            assert!(set.contains(&IVec2::new(x, 0)), "missing x = {x}");
        }
        assert!(!set.contains(&IVec2::new(2, 0)));
    }

    #[test]
    fn plane_seed_is_a_grid_at_z_zero() {
        let set = AttractorSet::<IVec3>::build(AttractorKind::Plane, 2).unwrap();
        assert_eq!(set.len(), 4);
        for x in -1..1 {
            for y in -1..1 {
                assert!(set.contains(&IVec3::new(x, y, 0)));
            }
        }
    }

    #[test]
    fn plane_is_rejected_on_2d_lattices() {
        let err = AttractorSet::<IVec2>::build(AttractorKind::Plane, 4).unwrap_err();
        assert!(matches!(
            err,
            Error::AttractorDimensionMismatch { kind: AttractorKind::Plane, dim: 2 }
        ));
    }

    #[test]
    fn zero_size_line_and_plane_are_rejected() {
        // a size-0 span contains no lattice points, so a walk toward
        // the seed could never terminate
        let err = AttractorSet::<IVec2>::build(AttractorKind::Line, 0).unwrap_err();
        assert!(matches!(err, Error::EmptyAttractor(AttractorKind::Line)));
        let err = AttractorSet::<IVec3>::build(AttractorKind::Plane, 0).unwrap_err();
        assert!(matches!(err, Error::EmptyAttractor(AttractorKind::Plane)));
    }

    #[test]
    fn circle_seed_points_lie_near_the_ring() {
        let radius = 20u32;
        let set = AttractorSet::<IVec2>::build(AttractorKind::Circle, radius).unwrap();
        assert!(!set.is_empty());
        assert!(!set.contains(&IVec2::ZERO));
        for p in set.iter() {
            let r = ((p.x * p.x + p.y * p.y) as f64).sqrt();
            // rounding to the lattice moves a sample by at most one unit per axis
            assert!(
                (r - radius as f64).abs() <= 2.0_f64.sqrt(),
                "point {p:?} is off the ring"
            );
        }
    }

    #[test]
    fn circle_seed_on_3d_lattice_stays_in_the_equator_plane() {
        let set = AttractorSet::<IVec3>::build(AttractorKind::Circle, 10).unwrap();
        assert!(set.iter().all(|p| p.z == 0));
    }

    #[test]
    fn point_metric_is_squared_euclidean_distance() {
        assert_eq!(distance_sq(IVec2::new(3, 4), AttractorKind::Point, 0), 25.0);
        assert_eq!(
            distance_sq(IVec3::new(1, 2, 2), AttractorKind::Point, 0),
            9.0
        );
    }

    #[test]
    fn line_metric_ignores_the_line_axis() {
        assert_eq!(distance_sq(IVec2::new(100, 3), AttractorKind::Line, 8), 9.0);
        assert_eq!(
            distance_sq(IVec3::new(100, 3, 4), AttractorKind::Line, 8),
            25.0
        );
    }

    #[test]
    fn plane_metric_measures_offset_along_the_normal() {
        assert_eq!(
            distance_sq(IVec3::new(50, -50, 6), AttractorKind::Plane, 8),
            36.0
        );
    }

    #[test]
    fn circle_metric_is_zero_on_the_ring_and_grows_radially() {
        // on the ring
        assert_eq!(distance_sq(IVec2::new(10, 0), AttractorKind::Circle, 10), 0.0);
        // five units outside
        assert_eq!(
            distance_sq(IVec2::new(15, 0), AttractorKind::Circle, 10),
            25.0
        );
        // five units inside is the same offset
        assert_eq!(
            distance_sq(IVec2::new(5, 0), AttractorKind::Circle, 10),
            25.0
        );
    }
}
