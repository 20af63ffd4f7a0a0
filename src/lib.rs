//! logball - one ball per incoming log line
//!
//! Every arrival (e.g. a request in a server log) becomes a ball that rolls
//! across a 2D surface at a random speed; off-screen balls are swept every
//! few frames and a small overlay shows ball count, fps and events/minute.
//!
//! - `core`: the animation engine (store, spawner, stepper, renderer, toggles)
//! - `host`: handler table, key bindings and the generic `Host` driver
//! - `canvas`: drawing traits plus software raster and recorder surfaces
//! - `web` (feature `wasm`): browser canvas host

pub mod canvas;
pub mod core;
pub mod demo;
pub mod host;
pub mod metrics;
pub mod time;

#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
pub mod web;

pub use crate::core::{Engine, EngineConfig};
pub use crate::host::Host;
