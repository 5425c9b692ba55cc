//! Boundary to the external presentation collaborator.
//!
//! The simulation publishes a read-only `RenderFrame` snapshot once per
//! tick and drains `SimCommand`s delivered over a channel. Everything that
//! draws windows, reads keyboards or writes text lives on the other side of
//! this boundary and never touches simulation state directly.

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use ultraviolet::Vec2;

use crate::simulation::decay::Emission;
use crate::simulation::Simulation;

pub static PAUSED: Lazy<AtomicBool> = Lazy::new(|| AtomicBool::new(false));
/// When set, particles are colored by fragment id instead of species.
pub static FRAGMENT_VIEW: Lazy<AtomicBool> = Lazy::new(|| AtomicBool::new(false));
pub static FRAME: Lazy<Mutex<RenderFrame>> = Lazy::new(|| Mutex::new(RenderFrame::default()));

// Simulation commands
// These are used to send input events to the simulation thread
pub enum SimCommand {
    Quit,
    SpeedUp,
    SpeedDown,
    ToggleFragmentView,
    Reset,
    StepOnce,
}

pub static SIM_COMMAND_SENDER: Lazy<Mutex<Option<Sender<SimCommand>>>> =
    Lazy::new(|| Mutex::new(None));

#[derive(Clone, Copy, Debug)]
pub struct RenderParticle {
    pub pos: Vec2,
    pub color: [u8; 4],
    /// Within-strong-radius neighbor count; lets the collaborator draw
    /// bond lines without re-deriving proximity.
    pub neighbors: u32,
}

#[derive(Clone, Copy, Debug)]
pub struct RenderEvent {
    pub pos: Vec2,
    pub kind: Emission,
}

#[derive(Clone, Debug, Default)]
pub struct RenderFrame {
    pub tick: usize,
    pub particles: Vec<RenderParticle>,
    pub events: Vec<RenderEvent>,
    pub fragment_count: usize,
}

/// Copy the current simulation state into the shared frame.
pub fn publish(sim: &Simulation) {
    let fragment_view = FRAGMENT_VIEW.load(Ordering::Relaxed);
    let particles = sim
        .nucleons
        .iter()
        .map(|nucleon| RenderParticle {
            pos: nucleon.pos,
            color: if fragment_view {
                fragment_color(nucleon.fragment_id)
            } else {
                nucleon.species.color()
            },
            neighbors: nucleon.neighbors,
        })
        .collect();
    let events = sim
        .events
        .iter()
        .map(|active| RenderEvent {
            pos: active.event.pos,
            kind: active.event.kind,
        })
        .collect();

    let mut frame = FRAME.lock();
    frame.tick = sim.frame;
    frame.particles = particles;
    frame.events = events;
    frame.fragment_count = sim.fragments.len();
}

/// Fragment-view color: hues spaced by the golden angle so neighboring
/// fragment ids stay visually distinct.
pub fn fragment_color(fragment_id: usize) -> [u8; 4] {
    use palette::{Hsluv, IntoColor, Srgba};
    let hue = (fragment_id as f32 * 137.5) % 360.0;
    let rgba: Srgba = Hsluv::new(hue, 75.0, 65.0).into_color();
    [
        (rgba.red * 255.0) as u8,
        (rgba.green * 255.0) as u8,
        (rgba.blue * 255.0) as u8,
        255,
    ]
}
