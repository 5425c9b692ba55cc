//! Stochastic beta decay.
//!
//! Each tick every nucleon gets at most one transition attempt, gated by a
//! small fixed probability. Whether the attempt succeeds depends on the
//! nucleon's fragment composition and how tightly it is bound: loosely
//! bound nucleons in lopsided fragments convert preferentially. This is a
//! deliberately toy approximation of nuclear stability heuristics, not a
//! physical decay-rate model.

use crate::config::SimConfig;
use crate::nucleon::{Nucleon, Species};
use crate::simulation::fragments::Fragment;
use serde::{Deserialize, Serialize};
use ultraviolet::Vec2;

/// Secondary particle kind carried by a decay event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Emission {
    /// Emitted by beta-minus (neutron → proton).
    Electron,
    /// Emitted by beta-plus (proton → neutron).
    Positron,
}

/// Immutable snapshot of a decay, consumed by the render collaborator.
#[derive(Clone, Copy, Debug)]
pub struct DecayEvent {
    pub pos: Vec2,
    pub kind: Emission,
}

/// A decay event plus its age in ticks; retired once the configured
/// lifetime is reached.
#[derive(Clone, Copy, Debug)]
pub struct ActiveEvent {
    pub event: DecayEvent,
    pub age: u32,
}

/// Decay capability variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecayPolicy {
    /// No transitions ever occur.
    Inert,
    /// Stochastic beta-minus / beta-plus transitions.
    StochasticBeta,
}

impl Default for DecayPolicy {
    fn default() -> Self {
        DecayPolicy::StochasticBeta
    }
}

/// Evaluate decay for every nucleon, flipping species in place and
/// returning the emitted events. Particle count never changes.
///
/// `fragments` is the census computed at the top of the tick; a flip does
/// not update it mid-pass, the next tick's detection pass picks it up.
pub fn evaluate(
    nucleons: &mut [Nucleon],
    fragments: &[Fragment],
    config: &SimConfig,
    rng: &mut fastrand::Rng,
) -> Vec<DecayEvent> {
    if config.decay == DecayPolicy::Inert || nucleons.is_empty() {
        return Vec::new();
    }
    let mut events = Vec::new();
    for nucleon in nucleons.iter_mut() {
        if rng.f32() >= config.decay_probability {
            continue;
        }
        let Some(fragment) = fragments.get(nucleon.fragment_id) else {
            continue;
        };
        match nucleon.species {
            Species::Neutron => {
                if beta_minus_allowed(fragment, nucleon.bond_strength, config) {
                    nucleon.species = Species::Proton;
                    events.push(DecayEvent {
                        pos: nucleon.pos,
                        kind: Emission::Electron,
                    });
                }
            }
            Species::Proton => {
                if beta_plus_allowed(fragment, nucleon.bond_strength, config) {
                    nucleon.species = Species::Neutron;
                    events.push(DecayEvent {
                        pos: nucleon.pos,
                        kind: Emission::Positron,
                    });
                }
            }
        }
    }
    events
}

/// Neutron → proton: the fragment must be neutron-rich (or proton-free)
/// and the nucleon loosely bound.
fn beta_minus_allowed(fragment: &Fragment, bond_strength: f32, config: &SimConfig) -> bool {
    if fragment.neutrons == 0 {
        return false;
    }
    let neutron_rich = fragment.protons == 0
        || fragment.neutrons as f32 / fragment.protons as f32 > config.neutron_rich_ratio;
    neutron_rich && bond_strength < config.beta_minus_bond_ceiling
}

/// Proton → neutron: symmetric, with its own richness ratio and a tighter
/// bond ceiling.
fn beta_plus_allowed(fragment: &Fragment, bond_strength: f32, config: &SimConfig) -> bool {
    if fragment.protons == 0 {
        return false;
    }
    let proton_rich = fragment.neutrons == 0
        || fragment.protons as f32 / fragment.neutrons as f32 > config.proton_rich_ratio;
    proton_rich && bond_strength < config.beta_plus_bond_ceiling
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forced_config() -> SimConfig {
        SimConfig {
            decay_probability: 1.0,
            ..Default::default()
        }
    }

    fn lone(species: Species) -> Nucleon {
        Nucleon::new(Vec2::new(3.0, -7.0), Vec2::zero(), species)
    }

    #[test]
    fn lone_neutron_flips_and_emits_one_electron() {
        let config = forced_config();
        let mut rng = fastrand::Rng::with_seed(0);
        let mut nucleons = vec![lone(Species::Neutron)];
        let fragments = vec![Fragment { protons: 0, neutrons: 1 }];
        let events = evaluate(&mut nucleons, &fragments, &config, &mut rng);
        assert_eq!(nucleons[0].species, Species::Proton, "neutron should flip");
        assert_eq!(events.len(), 1, "exactly one event");
        assert_eq!(events[0].kind, Emission::Electron);
        assert_eq!(events[0].pos, nucleons[0].pos, "event sits at the nucleon");
    }

    #[test]
    fn lone_proton_flips_and_emits_one_positron() {
        let config = forced_config();
        let mut rng = fastrand::Rng::with_seed(0);
        let mut nucleons = vec![lone(Species::Proton)];
        let fragments = vec![Fragment { protons: 1, neutrons: 0 }];
        let events = evaluate(&mut nucleons, &fragments, &config, &mut rng);
        assert_eq!(nucleons[0].species, Species::Neutron);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, Emission::Positron);
    }

    #[test]
    fn balanced_fragment_is_stable() {
        let config = forced_config();
        let mut rng = fastrand::Rng::with_seed(0);
        let mut nucleons = vec![lone(Species::Neutron), lone(Species::Proton)];
        // Ratio 1:1 is below both richness thresholds.
        let fragments = vec![Fragment { protons: 1, neutrons: 1 }];
        let events = evaluate(&mut nucleons, &fragments, &config, &mut rng);
        assert!(events.is_empty(), "balanced composition should not decay");
        assert_eq!(nucleons[0].species, Species::Neutron);
        assert_eq!(nucleons[1].species, Species::Proton);
    }

    #[test]
    fn tight_bond_blocks_decay() {
        let config = forced_config();
        let mut rng = fastrand::Rng::with_seed(0);
        let mut nucleon = lone(Species::Neutron);
        nucleon.bond_strength = config.beta_minus_bond_ceiling + 1.0;
        let mut nucleons = vec![nucleon];
        let fragments = vec![Fragment { protons: 0, neutrons: 1 }];
        let events = evaluate(&mut nucleons, &fragments, &config, &mut rng);
        assert!(events.is_empty(), "tightly bound nucleons must not decay");
        assert_eq!(nucleons[0].species, Species::Neutron);
    }

    #[test]
    fn beta_plus_ceiling_is_tighter() {
        let config = forced_config();
        let mut rng = fastrand::Rng::with_seed(0);
        // Bond strength between the two ceilings: beta-minus would pass,
        // beta-plus must not.
        let mut nucleon = lone(Species::Proton);
        nucleon.bond_strength =
            (config.beta_plus_bond_ceiling + config.beta_minus_bond_ceiling) / 2.0;
        let mut nucleons = vec![nucleon];
        let fragments = vec![Fragment { protons: 1, neutrons: 0 }];
        let events = evaluate(&mut nucleons, &fragments, &config, &mut rng);
        assert!(events.is_empty());
    }

    #[test]
    fn inert_policy_never_flips() {
        let config = SimConfig {
            decay: DecayPolicy::Inert,
            decay_probability: 1.0,
            ..Default::default()
        };
        let mut rng = fastrand::Rng::with_seed(0);
        let mut nucleons = vec![lone(Species::Neutron)];
        let fragments = vec![Fragment { protons: 0, neutrons: 1 }];
        let events = evaluate(&mut nucleons, &fragments, &config, &mut rng);
        assert!(events.is_empty());
        assert_eq!(nucleons[0].species, Species::Neutron);
    }

    #[test]
    fn zero_probability_never_attempts() {
        let config = SimConfig {
            decay_probability: 0.0,
            ..Default::default()
        };
        let mut rng = fastrand::Rng::with_seed(42);
        let mut nucleons = vec![lone(Species::Neutron)];
        let fragments = vec![Fragment { protons: 0, neutrons: 1 }];
        for _ in 0..100 {
            let events = evaluate(&mut nucleons, &fragments, &config, &mut rng);
            assert!(events.is_empty());
        }
    }

    #[test]
    fn decay_preserves_particle_count() {
        let config = forced_config();
        let mut rng = fastrand::Rng::with_seed(7);
        let mut nucleons = vec![
            lone(Species::Neutron),
            lone(Species::Neutron),
            lone(Species::Proton),
        ];
        let fragments = vec![Fragment { protons: 1, neutrons: 2 }];
        let before = nucleons.len();
        evaluate(&mut nucleons, &fragments, &config, &mut rng);
        assert_eq!(nucleons.len(), before, "decay flips in place, never creates or destroys");
    }
}
