use crate::error::Error;

/// Allowed step directions of the lattice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LatticeKind {
    /// Axis-aligned unit moves only.
    Square,
    /// Axis moves along x plus the four xy diagonals (plus z moves in 3D).
    Triangle,
}

/// Geometry of the fixed seed that particles stick to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttractorKind {
    Point,
    Line,
    /// 3D only; rejected on 2D lattices at build time.
    Plane,
    Circle,
}

/// Which side(s) of a LINE/PLANE attractor new particles spawn on.
/// Ignored for POINT and CIRCLE.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpawnSources {
    pub above: bool,
    pub below: bool,
}

impl Default for SpawnSources {
    fn default() -> Self {
        Self {
            above: true,
            below: true,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Config {
    stick_coefficient: f64,
    pub lattice: LatticeKind,
    pub attractor: AttractorKind,
    pub attractor_size: u32,
    pub spawn_sources: SpawnSources,
}

impl Config {
    pub fn new(
        stick_coefficient: f64,
        lattice: LatticeKind,
        attractor: AttractorKind,
        attractor_size: u32,
    ) -> Result<Self, Error> {
        let mut cfg = Self {
            stick_coefficient: 1.0,
            lattice,
            attractor,
            attractor_size,
            spawn_sources: SpawnSources::default(),
        };
        cfg.set_stick_coefficient(stick_coefficient)?;
        Ok(cfg)
    }

    pub fn stick_coefficient(&self) -> f64 {
        self.stick_coefficient
    }

    /// Rejects values outside `(0, 1]`.
    pub fn set_stick_coefficient(&mut self, value: f64) -> Result<(), Error> {
        if !(value > 0.0 && value <= 1.0) {
            return Err(Error::StickCoefficientOutOfRange(value));
        }
        self.stick_coefficient = value;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stick_coefficient: 1.0,
            lattice: LatticeKind::Square,
            attractor: AttractorKind::Point,
            attractor_size: 0,
            spawn_sources: SpawnSources::default(),
        }
    }
}
