use crate::config::{self, SimConfig};
use crate::render::SIM_COMMAND_SENDER;
use crate::simulation::Simulation;
use std::sync::mpsc::channel;

pub mod simulation_loop;

pub fn run() {
    // Creates a global thread pool (using rayon) with threads = max(3, total cores - 2)
    let threads = std::thread::available_parallelism()
        .unwrap()
        .get()
        .max(config::MIN_THREADS)
        - config::THREADS_LEAVE_FREE;
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .unwrap();

    let sim_config = SimConfig::load_or_default("nucleon_config.toml");
    println!(
        "nucleon_sim: {} protons, {} neutrons, domain {}x{}, boundary {:?}",
        sim_config.protons,
        sim_config.neutrons,
        2.0 * sim_config.domain_half_width,
        2.0 * sim_config.domain_half_height,
        sim_config.boundary,
    );

    let (tx, rx) = channel();
    *SIM_COMMAND_SENDER.lock() = Some(tx);

    let simulation = Simulation::new(sim_config);
    simulation_loop::run_simulation_loop(rx, simulation);
}
