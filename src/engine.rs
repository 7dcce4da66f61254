//! Orchestration of the generation loop.
//!
//! [`DlaEngine`] composes the seed geometry, the spawn calculator, the
//! particle walker and the aggregate store into the loop of one
//! `generate` call:
//!
//! 1. If no particle is in flight, ask the spawn zone for a start
//!    coordinate sized from the current farthest member.
//! 2. Advance the walker one step.
//! 3. On a stick, insert the pre-contact coordinate and publish it to
//!    any subscribed consumer.
//! 4. Check termination (target size, or run forever in continuous
//!    mode) and the cooperative abort signal at the loop top.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crossbeam_channel::{Receiver, Sender, unbounded};
use glam::{IVec2, IVec3};
use tracing::{debug, info};

use crate::aggregate::Aggregate;
use crate::attractor::AttractorSet;
use crate::config::{AttractorKind, Config, LatticeKind, SpawnSources};
use crate::error::Error;
use crate::fractal;
use crate::random::UniformSource;
use crate::spawn;
use crate::types::{GenerationIndex, LatticePoint};
use crate::walker::{ParticleWalker, StepOutcome};

/// External control over a running generation.
///
/// Cloneable and cheap; both signals are cooperative and observed at
/// the top of each particle-step iteration, so they take effect within
/// one step of being raised.
#[derive(Clone, Debug)]
pub struct ControlHandle {
    abort: Arc<AtomicBool>,
    continuous: Arc<AtomicBool>,
}

impl ControlHandle {
    /// Requests an early return from `generate`; the partial aggregate
    /// is retained and the signal is cleared on exit.
    pub fn raise_abort(&self) {
        self.abort.store(true, Ordering::Relaxed);
    }

    /// Switches between bounded and run-until-aborted generation.
    pub fn set_continuous(&self, continuous: bool) {
        self.continuous.store(continuous, Ordering::Relaxed);
    }
}

/// A diffusion-limited aggregation engine over lattice points `P`.
///
/// One instance owns its configuration, seed geometry, aggregate store
/// and random source. Generation is single-threaded and synchronous;
/// concurrent calls to [`DlaEngine::generate`] on one instance are not
/// supported (and not expressible without external synchronization).
pub struct DlaEngine<P: LatticePoint> {
    config: Config,
    attractor: AttractorSet<P>,
    aggregate: Aggregate<P>,
    rng: UniformSource,
    misses: u64,
    abort: Arc<AtomicBool>,
    continuous: Arc<AtomicBool>,
    sink: Option<Sender<(P, GenerationIndex)>>,
}

/// Engine on a two-dimensional integer lattice.
pub type Dla2d = DlaEngine<IVec2>;
/// Engine on a three-dimensional integer lattice.
pub type Dla3d = DlaEngine<IVec3>;

impl<P: LatticePoint> DlaEngine<P> {
    /// Creates an engine seeded from OS entropy.
    ///
    /// ### Errors
    /// Configuration errors from building the seed geometry, e.g. a
    /// PLANE attractor on a 2D lattice.
    pub fn new(config: Config) -> Result<Self, Error> {
        Self::with_source(config, UniformSource::from_entropy())
    }

    /// Creates an engine with a deterministic random seed.
    pub fn with_seed(config: Config, seed: u64) -> Result<Self, Error> {
        Self::with_source(config, UniformSource::seeded(seed))
    }

    fn with_source(config: Config, rng: UniformSource) -> Result<Self, Error> {
        let attractor = AttractorSet::build(config.attractor, config.attractor_size)?;
        Ok(Self {
            aggregate: Aggregate::new(config.attractor, config.attractor_size),
            config,
            attractor,
            rng,
            misses: 0,
            abort: Arc::new(AtomicBool::new(false)),
            continuous: Arc::new(AtomicBool::new(false)),
            sink: None,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Sets the stick coefficient, rejecting values outside `(0, 1]`.
    pub fn set_stick_coefficient(&mut self, value: f64) -> Result<(), Error> {
        self.config.set_stick_coefficient(value)
    }

    pub fn set_lattice_kind(&mut self, kind: LatticeKind) {
        self.config.lattice = kind;
    }

    /// Replaces the attractor geometry.
    ///
    /// Rebuilds the seed set and re-ranks the existing aggregate under
    /// the new distance metric (a full heap rebuild, never an
    /// incremental patch).
    pub fn set_attractor(&mut self, kind: AttractorKind, size: u32) -> Result<(), Error> {
        let attractor = AttractorSet::build(kind, size)?;
        self.config.attractor = kind;
        self.config.attractor_size = size;
        self.attractor = attractor;
        self.aggregate.reconfigure_metric(kind, size);
        debug!(?kind, size, "attractor replaced, aggregate re-ranked");
        Ok(())
    }

    /// Restricts where new particles spawn around LINE/PLANE seeds.
    pub fn set_spawn_sources(&mut self, sources: SpawnSources) -> Result<(), Error> {
        if !sources.above && !sources.below {
            return Err(Error::NoSpawnSources);
        }
        self.config.spawn_sources = sources;
        Ok(())
    }

    /// Handle for aborting or switching continuous mode from another
    /// execution context.
    pub fn control_handle(&self) -> ControlHandle {
        ControlHandle {
            abort: Arc::clone(&self.abort),
            continuous: Arc::clone(&self.continuous),
        }
    }

    /// Convenience for flipping continuous mode from the owning thread.
    pub fn set_continuous(&self, continuous: bool) {
        self.continuous.store(continuous, Ordering::Relaxed);
    }

    /// Subscribes a consumer to newly stuck points.
    ///
    /// Each stick is published exactly once, in strictly increasing
    /// generation-index order, on an unbounded channel; a slow consumer
    /// buffers without blocking generation. Replaces any previous
    /// subscription.
    pub fn subscribe(&mut self) -> Receiver<(P, GenerationIndex)> {
        let (tx, rx) = unbounded();
        self.sink = Some(tx);
        rx
    }

    /// Restarts the random sequence for `seed`.
    pub fn reseed(&mut self, seed: u64) {
        self.rng.reseed(seed);
    }

    pub fn len(&self) -> usize {
        self.aggregate.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aggregate.is_empty()
    }

    /// Failed stick rolls since the last clear.
    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Metric value of the farthest member, `0.0` when empty.
    pub fn spanning_distance_sq(&self) -> f64 {
        self.aggregate.farthest_distance_sq().unwrap_or(0.0)
    }

    pub fn aggregate(&self) -> &Aggregate<P> {
        &self.aggregate
    }

    pub fn attractor(&self) -> &AttractorSet<P> {
        &self.attractor
    }

    /// Drops every stuck particle and the miss counter; configuration
    /// and seed geometry survive.
    pub fn clear(&mut self) {
        self.aggregate.clear();
        self.misses = 0;
    }

    /// Estimate of the aggregate's fractal dimension (see
    /// [`crate::fractal::estimate`]).
    pub fn estimate_fractal_dimension(&self) -> f64 {
        fractal::estimate(self.aggregate.len(), self.aggregate.farthest_distance_sq())
    }

    /// Grows the aggregate until it holds `target` particles.
    ///
    /// In continuous mode the loop ignores `target` and runs until the
    /// abort signal is raised. Abort is observed once per particle-step
    /// iteration; on abort the flag is cleared and the partial
    /// aggregate is retained.
    pub fn generate(&mut self, target: usize) {
        info!(
            particles = target,
            lattice = ?self.config.lattice,
            attractor = ?self.config.attractor,
            "generating aggregate"
        );
        let mut walker = ParticleWalker::<P>::idle();
        loop {
            if self.abort.load(Ordering::Relaxed) {
                self.abort.store(false, Ordering::Relaxed);
                info!(size = self.aggregate.len(), "generation aborted");
                return;
            }
            if self.aggregate.len() >= target && !self.continuous.load(Ordering::Relaxed) {
                break;
            }
            if walker.is_terminated() {
                let (start, diameter) = spawn::spawn_point(
                    self.config.attractor,
                    self.config.attractor_size,
                    self.aggregate.farthest_distance_sq(),
                    self.config.spawn_sources,
                    &mut self.rng,
                );
                walker = ParticleWalker::spawn(start, diameter);
            }
            match walker.step(
                self.config.lattice,
                &self.attractor,
                &self.aggregate,
                self.config.stick_coefficient(),
                &mut self.rng,
            ) {
                StepOutcome::Stuck(point) => {
                    let index = self.aggregate.insert(point);
                    if let Some(sink) = &self.sink {
                        // a dropped receiver just stops publication
                        let _ = sink.send((point, index));
                    }
                }
                StepOutcome::Missed => self.misses += 1,
                StepOutcome::Walking => {}
            }
        }
        info!(
            size = self.aggregate.len(),
            misses = self.misses,
            "generation complete"
        );
    }
}
