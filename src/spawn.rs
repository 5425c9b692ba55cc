//! Initial particle placement.

use crate::config::{SimConfig, SPAWN_COLUMNS};
use crate::nucleon::{Nucleon, Species};
use ultraviolet::Vec2;

/// Build the starting nucleon set: protons first, then neutrons, placed on
/// a fixed column-major lattice spanning the domain, with uniform random
/// velocities in [-1, 1] per axis.
///
/// The lattice is deterministic; only velocities draw from the RNG, so a
/// reseeded reset reproduces the exact starting state.
pub fn lattice(config: &SimConfig, rng: &mut fastrand::Rng) -> Vec<Nucleon> {
    let columns = SPAWN_COLUMNS;
    let cell_w = 2.0 * config.domain_half_width / columns as f32;
    let cell_h = 2.0 * config.domain_half_height / columns as f32;

    let total = config.protons + config.neutrons;
    let mut nucleons = Vec::with_capacity(total);
    for slot in 0..total {
        let col = slot % columns;
        let row = slot / columns;
        let pos = Vec2::new(
            -config.domain_half_width + (col as f32 + 0.5) * cell_w,
            -config.domain_half_height + (row as f32 + 0.5) * cell_h,
        );
        let vel = Vec2::new(rng.f32() * 2.0 - 1.0, rng.f32() * 2.0 - 1.0);
        let species = if slot < config.protons {
            Species::Proton
        } else {
            Species::Neutron
        };
        nucleons.push(Nucleon::new(pos, vel, species));
    }
    nucleons
}
