//! Force calculation functions for the nucleon simulation.
//!
//! Provides routines for computing electrostatic (proton-proton) and
//! strong-force contributions between nucleons. Used by the main simulation
//! loop to update velocities once per tick.

use crate::config::SimConfig;
use crate::nucleon::Nucleon;
use crate::simulation::Simulation;
use rayon::prelude::*;
use ultraviolet::Vec2;

/// Electrostatic impulse for one pair, returned as the (a, b) velocity
/// deltas. Neutrons carry zero charge, so only proton-proton pairs see a
/// nonzero force, active below the configured radius.
///
/// Magnitude follows an inverse-square law with the distance floored at a
/// small epsilon so coincident nucleons cannot produce a singular force.
pub fn electrostatic(a: &Nucleon, b: &Nucleon, config: &SimConfig) -> (Vec2, Vec2) {
    let charge_product = a.species.charge() * b.species.charge();
    if charge_product == 0.0 {
        return (Vec2::zero(), Vec2::zero());
    }
    let sep = b.pos - a.pos;
    let dist = sep.mag().max(config.distance_epsilon);
    if dist >= config.electrostatic_radius {
        return (Vec2::zero(), Vec2::zero());
    }
    let magnitude =
        config.electrostatic_constant * charge_product / (dist * dist + config.distance_epsilon);
    let dir = sep / dist;
    (-dir * magnitude, dir * magnitude)
}

/// Strong-force impulse for one pair, including the pair damping term,
/// returned as the (a, b) velocity deltas.
///
/// Below `strong_near` the force is repulsive; between `strong_near` and
/// `strong_radius` it is attractive; both regimes decay exponentially with
/// distance. The damping term removes a proximity-scaled fraction of the
/// pair's relative velocity (as updated by this pair's own impulse), split
/// equally and oppositely, which suppresses the oscillation the discrete
/// impulse application would otherwise build up.
pub fn strong(a: &Nucleon, b: &Nucleon, config: &SimConfig) -> (Vec2, Vec2) {
    let sep = b.pos - a.pos;
    let dist = sep.mag().max(config.distance_epsilon);
    if dist >= config.strong_radius {
        return (Vec2::zero(), Vec2::zero());
    }
    let falloff = (-dist / config.strong_decay_length).exp();
    // Positive magnitude pulls the pair together, negative pushes apart.
    let magnitude = if dist < config.strong_near {
        -config.strong_constant * falloff
    } else {
        config.strong_constant * falloff
    };
    let dir = sep / dist;
    let delta_a = dir * magnitude;
    let delta_b = -dir * magnitude;

    let rel_vel = (b.vel + delta_b) - (a.vel + delta_a);
    let proximity = 1.0 - dist / config.strong_radius;
    let correction = rel_vel * (config.pair_damping * proximity * 0.5);

    (delta_a + correction, delta_b - correction)
}

/// Run the full O(n²) pairwise pass: reset and re-accumulate neighbor
/// counts and bond strength, gather force impulses into the simulation's
/// per-nucleon buffer, then apply the buffer to velocities in one sweep.
///
/// Impulses are computed from pre-pass positions and velocities only, so
/// every pair contribution is equal and opposite and no nucleon ever sees a
/// partially updated neighbor within the tick.
pub fn apply_pairwise(sim: &mut Simulation) {
    let n = sim.nucleons.len();
    sim.nucleons.par_iter_mut().for_each(|nucleon| {
        nucleon.neighbors = 0;
        nucleon.bond_strength = 0.0;
    });
    sim.impulses.clear();
    sim.impulses.resize(n, Vec2::zero());

    let strong_radius = sim.config.strong_radius;
    for i in 0..n {
        for j in (i + 1)..n {
            let (ea, eb) = electrostatic(&sim.nucleons[i], &sim.nucleons[j], &sim.config);
            let (sa, sb) = strong(&sim.nucleons[i], &sim.nucleons[j], &sim.config);
            sim.impulses[i] += ea + sa;
            sim.impulses[j] += eb + sb;

            let dist = (sim.nucleons[j].pos - sim.nucleons[i].pos).mag();
            if dist < strong_radius {
                let weight = 1.0 - dist / strong_radius;
                sim.nucleons[i].neighbors += 1;
                sim.nucleons[j].neighbors += 1;
                sim.nucleons[i].bond_strength += weight;
                sim.nucleons[j].bond_strength += weight;
            }
        }
    }

    for (nucleon, impulse) in sim.nucleons.iter_mut().zip(&sim.impulses) {
        nucleon.vel += *impulse;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nucleon::Species;

    fn at(x: f32, y: f32, species: Species) -> Nucleon {
        Nucleon::new(Vec2::new(x, y), Vec2::zero(), species)
    }

    #[test]
    fn electrostatic_is_momentum_neutral() {
        let config = SimConfig::default();
        let a = at(0.0, 0.0, Species::Proton);
        let b = at(7.0, -3.0, Species::Proton);
        let (da, db) = electrostatic(&a, &b, &config);
        assert!(da.mag() > 0.0, "protons inside the radius must repel");
        assert!(
            (da + db).mag() < 1e-6,
            "pair velocity deltas must sum to zero"
        );
    }

    #[test]
    fn strong_is_momentum_neutral() {
        let config = SimConfig::default();
        let mut a = at(0.0, 0.0, Species::Proton);
        let mut b = at(15.0, 0.0, Species::Neutron);
        a.vel = Vec2::new(0.3, -0.2);
        b.vel = Vec2::new(-0.1, 0.4);
        let (da, db) = strong(&a, &b, &config);
        assert!(
            (da + db).mag() < 1e-6,
            "strong impulse plus damping must be equal and opposite"
        );
    }

    #[test]
    fn electrostatic_ignores_neutron_pairs() {
        let config = SimConfig::default();
        let a = at(0.0, 0.0, Species::Neutron);
        let b = at(3.0, 0.0, Species::Neutron);
        let (da, db) = electrostatic(&a, &b, &config);
        assert_eq!(da, Vec2::zero(), "neutrons carry no charge");
        assert_eq!(db, Vec2::zero());

        let p = at(3.0, 0.0, Species::Proton);
        let (da, _) = electrostatic(&a, &p, &config);
        assert_eq!(da, Vec2::zero(), "mixed pairs see no electrostatic force");
    }

    #[test]
    fn strong_near_regime_repels() {
        let config = SimConfig::default();
        let a = at(0.0, 0.0, Species::Proton);
        let b = at(5.0, 0.0, Species::Neutron);
        let (da, db) = strong(&a, &b, &config);
        assert!(da.x < 0.0, "a should be pushed away from b below the near threshold");
        assert!(db.x > 0.0, "b should be pushed away from a");
    }

    #[test]
    fn strong_mid_regime_attracts() {
        let config = SimConfig::default();
        let a = at(0.0, 0.0, Species::Proton);
        let b = at(15.0, 0.0, Species::Neutron);
        let (da, db) = strong(&a, &b, &config);
        assert!(da.x > 0.0, "a should be pulled toward b in the mid regime");
        assert!(db.x < 0.0, "b should be pulled toward a");
    }

    #[test]
    fn strong_vanishes_beyond_radius() {
        let config = SimConfig::default();
        let a = at(0.0, 0.0, Species::Proton);
        let b = at(31.0, 0.0, Species::Neutron);
        let (da, db) = strong(&a, &b, &config);
        assert_eq!(da, Vec2::zero());
        assert_eq!(db, Vec2::zero());
    }

    #[test]
    fn coincident_nucleons_produce_finite_forces() {
        let config = SimConfig::default();
        let a = at(10.0, 10.0, Species::Proton);
        let b = at(10.0, 10.0, Species::Proton);
        let (da, _) = electrostatic(&a, &b, &config);
        assert!(da.x.is_finite() && da.y.is_finite());
        let (sa, _) = strong(&a, &b, &config);
        assert!(sa.x.is_finite() && sa.y.is_finite());
    }

    #[test]
    fn damping_reduces_relative_velocity() {
        let config = SimConfig::default();
        // Approaching pair in the attractive regime; damping should bleed
        // off part of the closing speed relative to the undamped impulse.
        let mut a = at(0.0, 0.0, Species::Neutron);
        let mut b = at(15.0, 0.0, Species::Neutron);
        a.vel = Vec2::new(1.0, 0.0);
        b.vel = Vec2::new(-1.0, 0.0);
        let (da, db) = strong(&a, &b, &config);

        let mut undamped = config.clone();
        undamped.pair_damping = 0.0;
        let (ua, ub) = strong(&a, &b, &undamped);

        let rel_damped = ((b.vel + db) - (a.vel + da)).mag();
        let rel_undamped = ((b.vel + ub) - (a.vel + ua)).mag();
        assert!(
            rel_damped < rel_undamped,
            "damping must shrink the pair's relative speed"
        );
    }
}
