// commands.rs
// Handles processing of SimCommand input events for the simulation

use crate::render::{SimCommand, FRAGMENT_VIEW};
use crate::simulation::Simulation;
use std::sync::atomic::Ordering;

/// Process a single SimCommand. Returns `false` when the simulation loop
/// should terminate.
pub fn process_command(cmd: SimCommand, simulation: &mut Simulation) -> bool {
    match cmd {
        SimCommand::Quit => return false,

        // Scale all velocities up or down by the configured factors
        SimCommand::SpeedUp => {
            let factor = simulation.config.speed_scale_up;
            simulation.scale_velocities(factor);
        }
        SimCommand::SpeedDown => {
            let factor = simulation.config.speed_scale_down;
            simulation.scale_velocities(factor);
        }

        SimCommand::ToggleFragmentView => {
            FRAGMENT_VIEW.fetch_xor(true, Ordering::Relaxed);
        }

        // Rebuild the starting configuration and drop pending events
        SimCommand::Reset => {
            simulation.reset();
        }

        // Advance a single tick regardless of the pause flag
        SimCommand::StepOnce => {
            simulation.step();
        }
    }
    true
}
