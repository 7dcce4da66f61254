//! The random-walk / collision loop for a single particle.
//!
//! One step is: draw a move, reflect off the spawn boundary if the move
//! left it, roll the stick probability, and resolve contact against the
//! aggregate and the attractor seed. On a successful stick the particle
//! adheres one lattice step *before* the collision plane, so the
//! **previous** coordinate is the one reported.

use crate::aggregate::Aggregate;
use crate::attractor::AttractorSet;
use crate::config::{AttractorKind, LatticeKind};
use crate::random::UniformRandom;
use crate::types::LatticePoint;

/// Margin added to the spawn radius before a move counts as leaving
/// the zone.
const BOUNDARY_EPSILON: i32 = 2;

/// Lifecycle of a walker: walking until it sticks, then terminated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WalkerState {
    Walking,
    Terminated,
}

/// Result of advancing a walker by one step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome<P> {
    /// The stick roll succeeded on contact; the carried coordinate is
    /// the particle's pre-contact position, now part of the aggregate.
    Stuck(P),
    /// The stick roll failed; the walk continues.
    Missed,
    /// No contact this step; the walk continues.
    Walking,
}

/// A single in-flight particle.
#[derive(Clone, Copy, Debug)]
pub struct ParticleWalker<P> {
    current: P,
    previous: P,
    spawn_diameter: i32,
    state: WalkerState,
}

impl<P: LatticePoint> ParticleWalker<P> {
    /// A terminated placeholder; the engine replaces it on first spawn.
    pub fn idle() -> Self {
        Self {
            current: P::ZERO,
            previous: P::ZERO,
            spawn_diameter: 0,
            state: WalkerState::Terminated,
        }
    }

    /// Starts a walk at `start`, bounded by `spawn_diameter`.
    pub fn spawn(start: P, spawn_diameter: i32) -> Self {
        Self {
            current: start,
            previous: start,
            spawn_diameter,
            state: WalkerState::Walking,
        }
    }

    pub fn current(&self) -> P {
        self.current
    }

    pub fn previous(&self) -> P {
        self.previous
    }

    pub fn state(&self) -> WalkerState {
        self.state
    }

    pub fn is_terminated(&self) -> bool {
        self.state == WalkerState::Terminated
    }

    /// Advances the walk by exactly one lattice step.
    ///
    /// Draws one uniform value for the move direction and one for the
    /// stick roll. A boundary crossing reverts the move (a reflection,
    /// not a failure) before the stick roll is resolved.
    pub fn step(
        &mut self,
        lattice: LatticeKind,
        attractor: &AttractorSet<P>,
        aggregate: &Aggregate<P>,
        stick_coefficient: f64,
        rng: &mut impl UniformRandom,
    ) -> StepOutcome<P> {
        debug_assert_eq!(self.state, WalkerState::Walking);

        self.previous = self.current;
        self.current = self.current.step(lattice, rng.next_unit());
        reflect_at_boundary(
            &mut self.current,
            self.previous,
            attractor.kind(),
            attractor.size(),
            self.spawn_diameter,
        );

        let occupied =
            aggregate.contains(&self.current) || attractor.contains(&self.current);
        if rng.next_unit() > stick_coefficient {
            // A particle cannot rest on an occupied site. Bouncing it back
            // keeps `previous` free, so a later stick always reports a
            // coordinate that is absent from the aggregate.
            if occupied {
                self.current = self.previous;
            }
            return StepOutcome::Missed;
        }
        if occupied {
            self.state = WalkerState::Terminated;
            return StepOutcome::Stuck(self.previous);
        }
        StepOutcome::Walking
    }
}

/// Reverts `current` to `previous` if the move crossed the spawn
/// boundary; returns whether a reflection occurred.
///
/// The metric-relevant axes reflect at `spawn_diameter / 2 + epsilon`.
/// Axes the seed extends over (the LINE axis, the PLANE in-plane axes)
/// reflect at the seed half-extent plus the same bound, so a walk
/// cannot drift unboundedly along the seed.
pub fn reflect_at_boundary<P: LatticePoint>(
    current: &mut P,
    previous: P,
    kind: AttractorKind,
    size: u32,
    spawn_diameter: i32,
) -> bool {
    let limit = spawn_diameter / 2 + BOUNDARY_EPSILON;
    let seed_limit = (size / 2) as i32 + limit;
    let outside = match kind {
        AttractorKind::Point | AttractorKind::Circle => {
            (0..P::DIM).any(|i| current.axis(i).abs() > limit)
        }
        AttractorKind::Line => {
            current.axis(0).abs() > seed_limit
                || (1..P::DIM).any(|i| current.axis(i).abs() > limit)
        }
        AttractorKind::Plane => {
            (0..P::DIM - 1).any(|i| current.axis(i).abs() > seed_limit)
                || current.axis(P::DIM - 1).abs() > limit
        }
    };
    if outside {
        *current = previous;
    }
    outside
}
