//! Frame painter: background, balls, then the statistics overlay

use std::f64::consts::TAU;

use super::color::Color;
use super::config::{EngineConfig, OverlayConfig};
use super::particle::ParticleStore;
use super::toggles::OverlayFlags;
use crate::canvas::Surface;

/// Host-measured rates shown in the overlay
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OverlayStats {
    pub fps: f64,
    pub events_per_minute: f64,
}

pub struct Renderer {
    background: Color,
    radius: f64,
    overlay: OverlayConfig,
}

impl Renderer {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            background: config.background,
            radius: config.radius,
            overlay: config.overlay.clone(),
        }
    }

    /// Paint one frame. Order matters: later balls cover earlier ones and the
    /// overlay is never covered.
    pub fn draw(
        &self,
        surface: &mut dyn Surface,
        particles: &ParticleStore,
        flags: OverlayFlags,
        stats: OverlayStats,
    ) {
        let width = surface.width();
        let height = surface.height();
        let ctx = surface.context();

        ctx.set_fill_style(self.background);
        ctx.fill_rect(0.0, 0.0, width, height);

        for particle in particles {
            ctx.set_fill_style(particle.color);
            ctx.begin_path();
            ctx.arc(particle.x, particle.y, self.radius, 0.0, TAU, true);
            ctx.close_path();
            ctx.fill();
        }

        let baseline = height - self.overlay.bottom_margin;
        ctx.set_font(&self.overlay.font);
        ctx.set_fill_style(self.overlay.color);
        ctx.fill_text(&count_label(particles.len()), self.overlay.count_x, baseline);

        if flags.show_fps {
            ctx.fill_text(&format!("{:.0} fps", stats.fps), self.overlay.fps_x, baseline);
        }

        if flags.show_rpm {
            ctx.fill_text(
                &format!("{:.0} rpms", stats.events_per_minute),
                self.overlay.rpm_x,
                baseline,
            );
        }
    }
}

pub fn count_label(count: usize) -> String {
    format!("{} balls", count)
}
