// simulation/simulation.rs
// Contains the Simulation struct and main methods (new, step, iterate, reset)

use crate::config::{BoundaryPolicy, SimConfig};
use crate::nucleon::Nucleon;
use crate::spawn;
use rayon::prelude::*;
use ultraviolet::Vec2;

use super::decay::{self, ActiveEvent};
use super::forces;
use super::fragments::{self, Fragment};

/// The main simulation state and logic for the nucleon system.
///
/// Owns the particle set, the per-tick fragment census, the active decay
/// events and the RNG. Constructed once from an immutable `SimConfig`;
/// nothing in here is process-global.
pub struct Simulation {
    pub dt: f32,
    pub frame: usize,
    pub nucleons: Vec<Nucleon>,
    /// Census of the fragments detected at the top of the current tick,
    /// indexed by fragment id.
    pub fragments: Vec<Fragment>,
    /// Decay events still within their visible lifetime.
    pub events: Vec<ActiveEvent>,
    pub config: SimConfig,
    pub rng: fastrand::Rng,
    /// Reusable per-nucleon impulse buffer for the pairwise force pass.
    pub impulses: Vec<Vec2>,
}

impl Simulation {
    pub fn new(config: SimConfig) -> Self {
        let mut rng = fastrand::Rng::with_seed(config.seed);
        let mut nucleons = spawn::lattice(&config, &mut rng);
        let fragments = fragments::detect(&mut nucleons, config.fragment_link_radius());
        let dt = config.dt;
        Self {
            dt,
            frame: 0,
            nucleons,
            fragments,
            events: Vec::new(),
            config,
            rng,
            impulses: Vec::new(),
        }
    }

    /// Advance the simulation by one tick.
    ///
    /// Fixed ordering: fragments come from the previous tick's positions,
    /// all pair forces see pre-integration state, and decay reads the bond
    /// strengths the force pass just accumulated.
    pub fn step(&mut self) {
        self.fragments =
            fragments::detect(&mut self.nucleons, self.config.fragment_link_radius());
        forces::apply_pairwise(self);
        self.iterate();

        let lifetime = self.config.event_lifetime;
        self.events.retain_mut(|active| {
            active.age += 1;
            active.age < lifetime
        });
        let emitted = decay::evaluate(
            &mut self.nucleons,
            &self.fragments,
            &self.config,
            &mut self.rng,
        );
        self.events
            .extend(emitted.into_iter().map(|event| ActiveEvent { event, age: 0 }));

        self.frame += 1;
    }

    /// Advance positions from velocities and enforce the boundary policy.
    ///
    /// The velocity cap is applied before integration. A nucleon whose
    /// position goes non-finite is reset to the domain center; a non-finite
    /// velocity is zeroed.
    pub fn iterate(&mut self) {
        let dt = self.dt;
        let half_w = self.config.domain_half_width;
        let half_h = self.config.domain_half_height;
        let boundary = self.config.boundary;
        let cap = self.config.max_velocity;
        self.nucleons.par_iter_mut().for_each(|nucleon| {
            if let Some(cap) = cap {
                nucleon.enforce_max_velocity(cap);
            }
            nucleon.pos += nucleon.vel * dt;

            match boundary {
                BoundaryPolicy::Reflect => {
                    if nucleon.pos.x < -half_w {
                        nucleon.pos.x = -half_w;
                        nucleon.vel.x = -nucleon.vel.x;
                    } else if nucleon.pos.x > half_w {
                        nucleon.pos.x = half_w;
                        nucleon.vel.x = -nucleon.vel.x;
                    }
                    if nucleon.pos.y < -half_h {
                        nucleon.pos.y = -half_h;
                        nucleon.vel.y = -nucleon.vel.y;
                    } else if nucleon.pos.y > half_h {
                        nucleon.pos.y = half_h;
                        nucleon.vel.y = -nucleon.vel.y;
                    }
                }
                BoundaryPolicy::Wrap => {
                    nucleon.pos.x = wrap_coord(nucleon.pos.x, half_w);
                    nucleon.pos.y = wrap_coord(nucleon.pos.y, half_h);
                }
            }

            if !nucleon.pos.x.is_finite() || !nucleon.pos.y.is_finite() {
                eprintln!(
                    "nucleon {} position went non-finite; resetting to center",
                    nucleon.id
                );
                nucleon.pos = Vec2::zero();
            }
            if !nucleon.vel.x.is_finite() || !nucleon.vel.y.is_finite() {
                nucleon.vel = Vec2::zero();
            }
        });
    }

    /// Scale every nucleon's velocity; used by the speed input events.
    pub fn scale_velocities(&mut self, factor: f32) {
        self.nucleons
            .par_iter_mut()
            .for_each(|nucleon| nucleon.vel *= factor);
    }

    /// Rebuild the starting configuration: same counts, same lattice,
    /// reseeded RNG, no pending events. Prior decay history is discarded.
    pub fn reset(&mut self) {
        self.rng = fastrand::Rng::with_seed(self.config.seed);
        self.nucleons = spawn::lattice(&self.config, &mut self.rng);
        self.fragments =
            fragments::detect(&mut self.nucleons, self.config.fragment_link_radius());
        self.events.clear();
        self.frame = 0;
    }

    pub fn proton_count(&self) -> usize {
        self.nucleons
            .iter()
            .filter(|n| n.species == crate::nucleon::Species::Proton)
            .count()
    }

    pub fn neutron_count(&self) -> usize {
        self.nucleons.len() - self.proton_count()
    }
}

/// Map a coordinate back into [-half, half) modulo the domain size.
fn wrap_coord(x: f32, half: f32) -> f32 {
    (x + half).rem_euclid(2.0 * half) - half
}
