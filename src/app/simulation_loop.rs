use crate::commands;
use crate::config;
use crate::render::{self, SimCommand, PAUSED};
use crate::simulation::Simulation;
use std::sync::atomic::Ordering;
use std::time::{Duration, Instant};

/// Fixed-tick loop: drain input events, step unless paused, publish the
/// frame, then sleep off the remainder of the tick. Runs until a Quit
/// command arrives.
pub fn run_simulation_loop(rx: std::sync::mpsc::Receiver<SimCommand>, mut simulation: Simulation) {
    let tick = Duration::from_secs_f32(1.0 / config::TICK_RATE_HZ);
    loop {
        let started = Instant::now();

        while let Ok(cmd) = rx.try_recv() {
            if !commands::process_command(cmd, &mut simulation) {
                return;
            }
        }

        if !PAUSED.load(Ordering::Relaxed) {
            simulation.step();
        }

        render::publish(&simulation);

        if simulation.frame % 600 == 0 && simulation.frame > 0 {
            println!(
                "tick {}: {} protons, {} neutrons, {} fragments",
                simulation.frame,
                simulation.proton_count(),
                simulation.neutron_count(),
                simulation.fragments.len(),
            );
        }

        let elapsed = started.elapsed();
        if elapsed < tick {
            std::thread::sleep(tick - elapsed);
        }
    }
}
