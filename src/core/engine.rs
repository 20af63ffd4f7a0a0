//! The ball animation: one ball per arrival, moved and painted every tick

use tracing::{debug, info};

use super::config::EngineConfig;
use super::events::{Arrival, Tick};
use super::particle::ParticleStore;
use super::render::{OverlayStats, Renderer};
use super::spawner::Spawner;
use super::stepper::Stepper;
use super::toggles::{OverlayCommand, OverlayFlags};
use crate::canvas::Surface;
use crate::host::{HostFrame, Registrar, Visualization};

pub struct Engine {
    particles: ParticleStore,
    spawner: Spawner,
    stepper: Stepper,
    renderer: Renderer,
    flags: OverlayFlags,
}

impl Engine {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            particles: ParticleStore::with_capacity(256),
            spawner: Spawner::new(config),
            stepper: Stepper::new(config),
            renderer: Renderer::new(config),
            flags: OverlayFlags::default(),
        }
    }

    pub fn handle_arrival(&mut self, surface_height: f64, _arrival: &Arrival) {
        self.spawner.spawn(&mut self.particles, surface_height);
    }

    /// Move, sweep on prune ticks, then paint the frame
    pub fn handle_tick(&mut self, surface: &mut dyn Surface, tick: &Tick, stats: OverlayStats) {
        self.stepper.step(&mut self.particles, tick, surface.width());
        self.renderer.draw(surface, &self.particles, self.flags, stats);
    }

    pub fn apply(&mut self, command: OverlayCommand) {
        self.flags.apply(command);
        debug!(
            command = command.id(),
            show_fps = self.flags.show_fps,
            show_rpm = self.flags.show_rpm,
            "Overlay toggled"
        );
    }

    pub fn particles(&self) -> &ParticleStore {
        &self.particles
    }

    pub fn flags(&self) -> OverlayFlags {
        self.flags
    }
}

fn on_arrival(engine: &mut Engine, frame: &mut HostFrame<'_>, arrival: &Arrival) {
    engine.handle_arrival(frame.surface.height(), arrival);
}

fn on_tick(engine: &mut Engine, frame: &mut HostFrame<'_>, tick: &Tick) {
    engine.handle_tick(&mut *frame.surface, tick, frame.stats);
}

fn toggle_fps(engine: &mut Engine) {
    engine.apply(OverlayCommand::ToggleFps);
}

fn toggle_rpm(engine: &mut Engine) {
    engine.apply(OverlayCommand::ToggleRpm);
}

impl Visualization for Engine {
    const NAME: &'static str = "Balls";
    type Config = EngineConfig;

    fn run(
        config: EngineConfig,
        registrar: &mut Registrar<'_, Self>,
        surface: &dyn Surface,
    ) -> Self {
        registrar.set_message_color(config.message_color);
        registrar.on_arrival(on_arrival);
        registrar.on_tick(on_tick);

        for &command in OverlayCommand::ALL {
            let handler: fn(&mut Engine) = match command {
                OverlayCommand::ToggleFps => toggle_fps,
                OverlayCommand::ToggleRpm => toggle_rpm,
            };
            registrar.bind(command.key(), command.id(), command.description(), handler);
        }

        info!(
            width = surface.width(),
            height = surface.height(),
            radius = config.radius,
            palette = config.palette.len(),
            prune_interval = config.prune_interval,
            "Engine ready"
        );
        Engine::new(&config)
    }
}
