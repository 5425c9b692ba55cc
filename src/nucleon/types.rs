// nucleon/types.rs
// Contains the Species enum, Nucleon struct, and related methods

use ultraviolet::Vec2;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Species {
    Proton,
    Neutron,
}

impl Species {
    pub fn charge(&self) -> f32 {
        match self {
            Species::Proton => 1.0,
            Species::Neutron => 0.0,
        }
    }

    pub fn color(&self) -> [u8; 4] {
        match self {
            Species::Proton => [255, 0, 0, 255],
            Species::Neutron => [50, 50, 255, 255],
        }
    }
}

/// A single nucleon. Owned exclusively by the simulation; the render
/// collaborator only ever sees copies in the published frame.
#[derive(Clone, Debug)]
pub struct Nucleon {
    pub pos: Vec2,
    pub vel: Vec2,
    pub species: Species,
    /// Dense 0-based component label, reassigned every tick.
    pub fragment_id: usize,
    /// Nucleons within the strong-force radius, recounted every tick.
    pub neighbors: u32,
    /// Accumulated proximity weight; proxy for how tightly bound this
    /// nucleon is to its fragment.
    pub bond_strength: f32,
    pub id: u64,
}

use std::sync::atomic::{AtomicU64, Ordering};
static NEXT_ID: AtomicU64 = AtomicU64::new(1);

impl Nucleon {
    pub fn new(pos: Vec2, vel: Vec2, species: Species) -> Self {
        Self {
            pos,
            vel,
            species,
            fragment_id: 0,
            neighbors: 0,
            bond_strength: 0.0,
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// Scale the velocity back to `cap` if its magnitude exceeds it.
    pub fn enforce_max_velocity(&mut self, cap: f32) {
        let speed_sq = self.vel.mag_sq();
        if speed_sq > cap * cap {
            self.vel *= cap / speed_sq.sqrt();
        }
    }
}
