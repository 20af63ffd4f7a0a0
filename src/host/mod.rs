//! Generic host: owns a surface and a launched visualization, measures rates,
//! and turns raw input (lines, frames, keys) into dispatched events.

mod handlers;

pub use handlers::{
    ArrivalHandler, CommandHandler, HandlerTable, HostFrame, KeyBinding, KeyBindings, Registrar,
    TickHandler, Visualization,
};

use tracing::{debug, info, trace};

use crate::canvas::Surface;
use crate::core::{Arrival, Color, EventKind, OverlayStats, Tick};
use crate::metrics::{FpsCounter, RateCounter};

pub struct Host<V, S> {
    surface: S,
    state: V,
    handlers: HandlerTable<V>,
    bindings: KeyBindings<V>,
    message_color: Option<Color>,
    fps_counter: FpsCounter,
    rate_counter: RateCounter,
    /// Ticks dispatched so far (the last tick's sequence count)
    sequence: u64,
    last_tick: Option<f64>,
}

impl<V: Visualization, S: Surface> Host<V, S> {
    /// Run the visualization's initialization against `surface`
    pub fn launch(surface: S, config: V::Config) -> Self {
        let mut handlers = HandlerTable::new();
        let mut bindings = KeyBindings::new();
        let mut message_color = None;

        let state = {
            let mut registrar = Registrar::new(&mut handlers, &mut bindings, &mut message_color);
            V::run(config, &mut registrar, &surface)
        };

        info!(
            visualization = V::NAME,
            width = surface.width(),
            height = surface.height(),
            arrival_handlers = handlers.handler_count(EventKind::Arrival),
            tick_handlers = handlers.handler_count(EventKind::Tick),
            keys = bindings.len(),
            "Visualization launched"
        );

        Self {
            surface,
            state,
            handlers,
            bindings,
            message_color,
            fps_counter: FpsCounter::new(),
            rate_counter: RateCounter::default(),
            sequence: 0,
            last_tick: None,
        }
    }
}

impl<V, S: Surface> Host<V, S> {
    /// Deliver one unit of incoming work
    pub fn arrival(&mut self, payload: impl Into<String>, now: f64) {
        self.rate_counter.record(now);
        let arrival = Arrival::new(payload);
        trace!(len = arrival.payload.len(), "Arrival");

        let stats = self.stats(now);
        let mut frame = HostFrame {
            surface: &mut self.surface,
            stats,
        };
        self.handlers.dispatch_arrival(&mut self.state, &mut frame, &arrival);
    }

    /// Deliver one frame at time `now` (seconds). The first frame has zero
    /// elapsed time; sequence counts start at 1. A clock that steps back
    /// yields zero elapsed time until it passes the latest time seen.
    pub fn tick(&mut self, now: f64) -> Tick {
        let elapsed = self.last_tick.map_or(0.0, |last| (now - last).max(0.0));
        self.last_tick = Some(self.last_tick.map_or(now, |last| last.max(now)));
        self.sequence += 1;
        self.fps_counter.tick(now);

        let tick = Tick::new(elapsed, self.sequence);
        let stats = self.stats(now);
        let mut frame = HostFrame {
            surface: &mut self.surface,
            stats,
        };
        self.handlers.dispatch_tick(&mut self.state, &mut frame, &tick);
        tick
    }

    /// Run the command bound to `key`. Returns false for unbound keys.
    pub fn key(&mut self, key: char) -> bool {
        let Some(binding) = self.bindings.by_key(key) else {
            trace!(key = %key, "Unbound key");
            return false;
        };
        debug!(key = %key, command = binding.command_id, "Key command");
        (binding.handler)(&mut self.state);
        true
    }

    /// Run a command by id. Returns false for unknown commands.
    pub fn command(&mut self, command_id: &str) -> bool {
        let Some(binding) = self.bindings.by_command(command_id) else {
            return false;
        };
        debug!(command = binding.command_id, "Command");
        (binding.handler)(&mut self.state);
        true
    }

    /// Rates as the overlay would show them at `now`
    pub fn stats(&mut self, now: f64) -> OverlayStats {
        OverlayStats {
            fps: self.fps_counter.fps(),
            events_per_minute: self.rate_counter.per_minute(now),
        }
    }

    /// `(key, description)` for every binding, for help output
    pub fn key_help(&self) -> Vec<(char, &'static str)> {
        self.bindings.iter().map(|b| (b.key, b.description)).collect()
    }

    pub fn state(&self) -> &V {
        &self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[cfg(test)]
    pub(crate) fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn message_color(&self) -> Option<Color> {
        self.message_color
    }

    pub fn frames(&self) -> u64 {
        self.sequence
    }

    pub fn total_arrivals(&self) -> u64 {
        self.rate_counter.total()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::RecordingCanvas;

    /// Counts what it sees
    #[derive(Default)]
    struct Probe {
        arrivals: Vec<String>,
        ticks: Vec<Tick>,
        last_stats: OverlayStats,
        pings: u32,
    }

    fn probe_arrival(p: &mut Probe, _: &mut HostFrame<'_>, a: &Arrival) {
        p.arrivals.push(a.payload.clone());
    }

    fn probe_tick(p: &mut Probe, frame: &mut HostFrame<'_>, t: &Tick) {
        p.ticks.push(*t);
        p.last_stats = frame.stats;
    }

    fn ping(p: &mut Probe) {
        p.pings += 1;
    }

    impl Visualization for Probe {
        const NAME: &'static str = "Probe";
        type Config = ();

        fn run(_: (), registrar: &mut Registrar<'_, Self>, _: &dyn Surface) -> Self {
            registrar.on_arrival(probe_arrival);
            registrar.on_tick(probe_tick);
            registrar.bind('p', "ping", "Ping", ping);
            registrar.set_message_color(Color::WHITE);
            Probe::default()
        }
    }

    fn host() -> Host<Probe, RecordingCanvas> {
        Host::launch(RecordingCanvas::new(100.0, 100.0), ())
    }

    #[test]
    fn test_launch_registers() {
        let host = host();
        assert_eq!(host.message_color(), Some(Color::WHITE));
        assert_eq!(host.key_help(), vec![('p', "Ping")]);
    }

    #[test]
    fn test_tick_elapsed_and_sequence() {
        let mut host = host();
        assert_eq!(host.tick(5.0), Tick::new(0.0, 1));
        assert_eq!(host.tick(5.5), Tick::new(0.5, 2));
        // clock going backwards never yields negative elapsed time
        assert_eq!(host.tick(5.25), Tick::new(0.0, 3));
        assert_eq!(host.state().ticks.len(), 3);
        assert_eq!(host.frames(), 3);
    }

    #[test]
    fn test_clock_step_back_is_not_counted_twice() {
        let mut host = host();
        let total: f64 = [5.0, 5.5, 5.25, 5.5, 6.0]
            .into_iter()
            .map(|now| host.tick(now).elapsed_time)
            .sum();
        assert_eq!(total, 1.0);
        let elapsed: Vec<f64> = host.state().ticks.iter().map(|t| t.elapsed_time).collect();
        assert_eq!(elapsed, vec![0.0, 0.5, 0.0, 0.0, 0.5]);
    }

    #[test]
    fn test_arrivals_feed_rate() {
        let mut host = host();
        host.arrival("a", 0.0);
        host.arrival("b", 1.0);
        host.arrival("c", 2.0);
        host.tick(3.0);
        assert_eq!(host.state().arrivals, vec!["a", "b", "c"]);
        assert_eq!(host.state().last_stats.events_per_minute, 3.0);
        assert_eq!(host.total_arrivals(), 3);
    }

    #[test]
    fn test_fps_reaches_handlers() {
        let mut host = host();
        for i in 0..=10 {
            host.tick(i as f64 * 0.1);
        }
        assert!((host.state().last_stats.fps - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_keys_and_commands() {
        let mut host = host();
        assert!(host.key('p'));
        assert!(!host.key('q'));
        assert!(host.command("ping"));
        assert!(!host.command("pong"));
        assert_eq!(host.state().pings, 2);
    }
}
