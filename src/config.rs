// Centralized configuration for simulation parameters

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::simulation::decay::DecayPolicy;

// ====================
// Domain
// ====================
/// Half-width of the simulation domain (from center to edge).
pub const DOMAIN_HALF_WIDTH: f32 = 100.0;
/// Half-height of the simulation domain (from center to edge).
pub const DOMAIN_HALF_HEIGHT: f32 = 100.0;
/// Fixed timestep; one tick advances positions by one velocity unit.
pub const DEFAULT_DT: f32 = 1.0;
/// Target tick rate for the free-running simulation loop.
pub const TICK_RATE_HZ: f32 = 60.0;

// ====================
// Electrostatic Force
// ====================
/// Simplified electrostatic constant for proton-proton repulsion.
pub const ELECTROSTATIC_CONSTANT: f32 = 80.0;
/// Radius beyond which electrostatic repulsion is not applied.
pub const ELECTROSTATIC_RADIUS: f32 = 50.0;
/// Floor applied to inter-particle distances before division.
pub const DISTANCE_EPSILON: f32 = 1e-5;

// ====================
// Strong Force
// ====================
/// Simplified strong-force constant shared by both regimes.
pub const STRONG_FORCE_CONSTANT: f32 = 10.0;
/// Interaction radius; no strong force beyond this distance.
pub const STRONG_FORCE_RADIUS: f32 = 30.0;
/// Below this distance the strong force is repulsive.
pub const STRONG_NEAR_THRESHOLD: f32 = 10.0;
/// Exponential decay length of the strong-force magnitude.
pub const STRONG_DECAY_LENGTH: f32 = 2.0;
/// Fraction of relative velocity removed per pair interaction.
pub const PAIR_DAMPING: f32 = 0.2;

// ====================
// Kinematics
// ====================
/// Default speed limit for nucleons; applied before integration.
pub const MAX_VELOCITY: f32 = 5.0;
/// Velocity multiplier for the speed-up input event.
pub const SPEED_SCALE_UP: f32 = 1.1;
/// Velocity multiplier for the speed-down input event.
pub const SPEED_SCALE_DOWN: f32 = 0.9;

// ====================
// Fragments
// ====================
/// Two nucleons are linked when closer than this fraction of the
/// strong-force radius.
pub const FRAGMENT_LINK_FRACTION: f32 = 0.5;

// ====================
// Decay
// ====================
/// Per-nucleon, per-tick probability of attempting a decay transition.
pub const DECAY_PROBABILITY: f32 = 0.01;
/// Neutron:proton ratio above which a fragment counts as neutron-rich.
pub const NEUTRON_RICH_RATIO: f32 = 1.5;
/// Proton:neutron ratio above which a fragment counts as proton-rich.
pub const PROTON_RICH_RATIO: f32 = 1.5;
/// Bond-strength ceiling for beta-minus decay.
pub const BETA_MINUS_BOND_CEILING: f32 = 4.0;
/// Bond-strength ceiling for beta-plus decay; tighter than beta-minus.
pub const BETA_PLUS_BOND_CEILING: f32 = 2.0;
/// Ticks a decay event stays visible to the render collaborator.
pub const EVENT_LIFETIME_TICKS: u32 = 1;

// ====================
// Initial Composition
// ====================
pub const NUM_PROTONS: usize = 12;
pub const NUM_NEUTRONS: usize = 6;
/// Columns of the spawn lattice.
pub const SPAWN_COLUMNS: usize = 5;
/// Default RNG seed for spawn velocities and decay draws.
pub const DEFAULT_SEED: u64 = 0;

// ====================
// Threading/Parallelism
// ====================
pub const MIN_THREADS: usize = 3; // Minimum number of threads to use
pub const THREADS_LEAVE_FREE: usize = 2; // Number of logical cores to leave free

/// How the integrator treats a nucleon that crosses the domain edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoundaryPolicy {
    /// Clamp to the edge and invert the offending velocity component.
    Reflect,
    /// Map the position back into the domain modulo its size.
    Wrap,
}

impl Default for BoundaryPolicy {
    fn default() -> Self {
        BoundaryPolicy::Reflect
    }
}

/// Immutable simulation configuration, constructed once at startup and owned
/// by the `Simulation`. Runtime state changes go through input events only.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub protons: usize,
    pub neutrons: usize,
    pub domain_half_width: f32,
    pub domain_half_height: f32,
    pub dt: f32,
    pub electrostatic_constant: f32,
    pub electrostatic_radius: f32,
    pub strong_constant: f32,
    pub strong_radius: f32,
    pub strong_near: f32,
    pub strong_decay_length: f32,
    pub pair_damping: f32,
    pub distance_epsilon: f32,
    /// Speed limit applied before integration; `None` disables capping.
    pub max_velocity: Option<f32>,
    pub boundary: BoundaryPolicy,
    /// Fragment adjacency threshold as a fraction of `strong_radius`.
    pub link_fraction: f32,
    pub decay: DecayPolicy,
    pub decay_probability: f32,
    pub neutron_rich_ratio: f32,
    pub proton_rich_ratio: f32,
    pub beta_minus_bond_ceiling: f32,
    pub beta_plus_bond_ceiling: f32,
    pub event_lifetime: u32,
    pub speed_scale_up: f32,
    pub speed_scale_down: f32,
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            protons: NUM_PROTONS,
            neutrons: NUM_NEUTRONS,
            domain_half_width: DOMAIN_HALF_WIDTH,
            domain_half_height: DOMAIN_HALF_HEIGHT,
            dt: DEFAULT_DT,
            electrostatic_constant: ELECTROSTATIC_CONSTANT,
            electrostatic_radius: ELECTROSTATIC_RADIUS,
            strong_constant: STRONG_FORCE_CONSTANT,
            strong_radius: STRONG_FORCE_RADIUS,
            strong_near: STRONG_NEAR_THRESHOLD,
            strong_decay_length: STRONG_DECAY_LENGTH,
            pair_damping: PAIR_DAMPING,
            distance_epsilon: DISTANCE_EPSILON,
            max_velocity: Some(MAX_VELOCITY),
            boundary: BoundaryPolicy::Reflect,
            link_fraction: FRAGMENT_LINK_FRACTION,
            decay: DecayPolicy::StochasticBeta,
            decay_probability: DECAY_PROBABILITY,
            neutron_rich_ratio: NEUTRON_RICH_RATIO,
            proton_rich_ratio: PROTON_RICH_RATIO,
            beta_minus_bond_ceiling: BETA_MINUS_BOND_CEILING,
            beta_plus_bond_ceiling: BETA_PLUS_BOND_CEILING,
            event_lifetime: EVENT_LIFETIME_TICKS,
            speed_scale_up: SPEED_SCALE_UP,
            speed_scale_down: SPEED_SCALE_DOWN,
            seed: DEFAULT_SEED,
        }
    }
}

impl SimConfig {
    /// Parse a TOML config file. Missing keys fall back to the defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: SimConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the config file if present, otherwise the built-in defaults.
    /// A malformed file is reported and also falls back to the defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return Self::default();
        }
        match Self::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("failed to load {}: {e}; using defaults", path.display());
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.domain_half_width <= 0.0 || self.domain_half_height <= 0.0 {
            return Err(Error::Config("domain half-extents must be positive".into()));
        }
        if self.strong_near >= self.strong_radius {
            return Err(Error::Config(
                "strong_near must be below strong_radius".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.decay_probability) {
            return Err(Error::Config(
                "decay_probability must be within [0, 1]".into(),
            ));
        }
        if self.link_fraction <= 0.0 || self.link_fraction > 1.0 {
            return Err(Error::Config("link_fraction must be within (0, 1]".into()));
        }
        if self.event_lifetime == 0 {
            return Err(Error::Config(
                "event_lifetime must be at least one tick".into(),
            ));
        }
        if self.protons + self.neutrons > SPAWN_COLUMNS * SPAWN_COLUMNS {
            return Err(Error::Config(format!(
                "at most {} nucleons fit the spawn lattice",
                SPAWN_COLUMNS * SPAWN_COLUMNS
            )));
        }
        Ok(())
    }

    /// Distance below which two nucleons belong to the same fragment.
    pub fn fragment_link_radius(&self) -> f32 {
        self.link_fraction * self.strong_radius
    }
}
