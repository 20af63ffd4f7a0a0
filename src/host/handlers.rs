//! Handler registration table and key bindings
//!
//! Hosts keep one `HandlerTable` per visualization. Handlers are plain `fn`
//! items taking the visualization state explicitly; they run synchronously,
//! in registration order, one event at a time.

use tracing::warn;

use crate::canvas::Surface;
use crate::core::{Arrival, Color, EventKind, OverlayStats, Tick};

/// What a handler gets to see of the host for one event
pub struct HostFrame<'a> {
    pub surface: &'a mut dyn Surface,
    /// Host-measured rates at dispatch time
    pub stats: OverlayStats,
}

pub type ArrivalHandler<V> = fn(&mut V, &mut HostFrame<'_>, &Arrival);
pub type TickHandler<V> = fn(&mut V, &mut HostFrame<'_>, &Tick);
pub type CommandHandler<V> = fn(&mut V);

/// Event kind → ordered handlers
pub struct HandlerTable<V> {
    arrival: Vec<ArrivalHandler<V>>,
    tick: Vec<TickHandler<V>>,
}

impl<V> Default for HandlerTable<V> {
    fn default() -> Self {
        Self {
            arrival: Vec::new(),
            tick: Vec::new(),
        }
    }
}

impl<V> HandlerTable<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_arrival(&mut self, handler: ArrivalHandler<V>) {
        self.arrival.push(handler);
    }

    pub fn on_tick(&mut self, handler: TickHandler<V>) {
        self.tick.push(handler);
    }

    pub fn handler_count(&self, kind: EventKind) -> usize {
        match kind {
            EventKind::Arrival => self.arrival.len(),
            EventKind::Tick => self.tick.len(),
        }
    }

    pub fn dispatch_arrival(&self, state: &mut V, frame: &mut HostFrame<'_>, arrival: &Arrival) {
        for handler in &self.arrival {
            handler(state, frame, arrival);
        }
    }

    pub fn dispatch_tick(&self, state: &mut V, frame: &mut HostFrame<'_>, tick: &Tick) {
        for handler in &self.tick {
            handler(state, frame, tick);
        }
    }
}

/// A key mapped to a named command
pub struct KeyBinding<V> {
    pub key: char,
    pub command_id: &'static str,
    pub description: &'static str,
    pub handler: CommandHandler<V>,
}

pub struct KeyBindings<V> {
    bindings: Vec<KeyBinding<V>>,
}

impl<V> Default for KeyBindings<V> {
    fn default() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }
}

impl<V> KeyBindings<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a key, replacing any previous binding for the same key
    pub fn bind(
        &mut self,
        key: char,
        command_id: &'static str,
        description: &'static str,
        handler: CommandHandler<V>,
    ) {
        if let Some(existing) = self.bindings.iter_mut().find(|b| b.key == key) {
            warn!(key = %key, old = existing.command_id, new = command_id, "Key rebound");
            *existing = KeyBinding {
                key,
                command_id,
                description,
                handler,
            };
            return;
        }
        self.bindings.push(KeyBinding {
            key,
            command_id,
            description,
            handler,
        });
    }

    pub fn by_key(&self, key: char) -> Option<&KeyBinding<V>> {
        self.bindings.iter().find(|b| b.key == key)
    }

    pub fn by_command(&self, command_id: &str) -> Option<&KeyBinding<V>> {
        self.bindings.iter().find(|b| b.command_id == command_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &KeyBinding<V>> {
        self.bindings.iter()
    }

    pub(crate) fn len(&self) -> usize {
        self.bindings.len()
    }
}

/// Registration handle given to a visualization while it starts up
pub struct Registrar<'a, V> {
    pub(crate) handlers: &'a mut HandlerTable<V>,
    pub(crate) bindings: &'a mut KeyBindings<V>,
    pub(crate) message_color: &'a mut Option<Color>,
}

impl<'a, V> Registrar<'a, V> {
    pub fn new(
        handlers: &'a mut HandlerTable<V>,
        bindings: &'a mut KeyBindings<V>,
        message_color: &'a mut Option<Color>,
    ) -> Self {
        Self {
            handlers,
            bindings,
            message_color,
        }
    }

    pub fn on_arrival(&mut self, handler: ArrivalHandler<V>) {
        self.handlers.on_arrival(handler);
    }

    pub fn on_tick(&mut self, handler: TickHandler<V>) {
        self.handlers.on_tick(handler);
    }

    pub fn bind(
        &mut self,
        key: char,
        command_id: &'static str,
        description: &'static str,
        handler: CommandHandler<V>,
    ) {
        self.bindings.bind(key, command_id, description, handler);
    }

    /// Color the host should use for its own messages
    pub fn set_message_color(&mut self, color: Color) {
        *self.message_color = Some(color);
    }
}

/// A visualization the host can launch
pub trait Visualization: Sized {
    /// Display name
    const NAME: &'static str;
    type Config;

    /// Subscribe handlers, bind keys and build the initial state. The host owns
    /// the returned state for the rest of the session.
    fn run(
        config: Self::Config,
        registrar: &mut Registrar<'_, Self>,
        surface: &dyn Surface,
    ) -> Self;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::RecordingCanvas;

    #[derive(Default)]
    struct Log(Vec<&'static str>);

    fn first(log: &mut Log, _: &mut HostFrame<'_>, _: &Arrival) {
        log.0.push("first");
    }

    fn second(log: &mut Log, _: &mut HostFrame<'_>, _: &Arrival) {
        log.0.push("second");
    }

    fn ticked(log: &mut Log, _: &mut HostFrame<'_>, _: &Tick) {
        log.0.push("tick");
    }

    fn noop(_: &mut Log) {}

    fn shout(log: &mut Log) {
        log.0.push("shout");
    }

    #[test]
    fn test_dispatch_in_registration_order() {
        let mut table = HandlerTable::new();
        table.on_arrival(first);
        table.on_arrival(second);
        table.on_tick(ticked);
        assert_eq!(table.handler_count(EventKind::Arrival), 2);
        assert_eq!(table.handler_count(EventKind::Tick), 1);

        let mut log = Log::default();
        let mut canvas = RecordingCanvas::new(10.0, 10.0);
        let mut frame = HostFrame {
            surface: &mut canvas,
            stats: OverlayStats::default(),
        };
        table.dispatch_arrival(&mut log, &mut frame, &Arrival::new("GET /"));
        table.dispatch_tick(&mut log, &mut frame, &Tick::new(0.0, 1));
        assert_eq!(log.0, vec!["first", "second", "tick"]);
    }

    #[test]
    fn test_rebinding_a_key_replaces_it() {
        let mut bindings = KeyBindings::new();
        bindings.bind('x', "noop", "Does nothing", noop);
        bindings.bind('x', "shout", "Shouts", shout);
        assert_eq!(bindings.len(), 1);

        let binding = bindings.by_key('x').unwrap();
        assert_eq!(binding.command_id, "shout");
        let mut log = Log::default();
        (binding.handler)(&mut log);
        assert_eq!(log.0, vec!["shout"]);
        assert!(bindings.by_command("noop").is_none());
    }

    #[test]
    fn test_registrar_records_message_color() {
        let mut table = HandlerTable::<Log>::new();
        let mut bindings = KeyBindings::new();
        let mut color = None;
        let mut reg = Registrar::new(&mut table, &mut bindings, &mut color);
        reg.set_message_color(Color::WHITE);
        reg.bind('s', "shout", "Shouts", shout);
        assert_eq!(color, Some(Color::WHITE));
        assert_eq!(bindings.len(), 1);
    }
}
