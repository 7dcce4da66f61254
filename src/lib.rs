//! Diffusion-limited aggregation on 2D and 3D integer lattices.
//!
//! Main components:
//! - [`lattice`] — move-direction rules per lattice kind.
//! - [`attractor`] — seed geometries and the distance metric.
//! - [`spawn`] — spawn-zone sizing and particle placement.
//! - [`walker`] — the per-particle walk / collision loop.
//! - [`aggregate`] — membership map, farthest-point tracking, ordered buffer.
//! - [`engine`] — the generation loop, termination and cancellation.
//! - [`fractal`] — fractal-dimension estimation.
//! - [`io`] — textual serialization of the point set.
//! - [`config`], [`error`], [`random`], [`types`] — shared plumbing.

pub mod aggregate;
pub mod attractor;
pub mod config;
pub mod engine;
pub mod error;
pub mod fractal;
pub mod io;
pub mod lattice;
pub mod random;
pub mod spawn;
pub mod types;
pub mod walker;
