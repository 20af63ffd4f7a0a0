//! Browser host: draws on an HTML canvas through its 2D context
//!
//! JS drives it: call `arrival()` per log line and `frame()` from
//! `requestAnimationFrame`. Both are stamped with the page's performance clock.

use tracing::{info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::canvas::{DrawContext, Surface};
use crate::core::{Color, Engine, EngineConfig};
use crate::host::Host;
use crate::time::now_seconds;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    // Initialize tracing for browser console
    tracing_wasm::set_as_global_default();
}

/// `DrawContext` over a browser 2D context
pub struct WebCanvas {
    ctx: CanvasRenderingContext2d,
}

impl DrawContext for WebCanvas {
    fn set_fill_style(&mut self, color: Color) {
        self.ctx.set_fill_style_str(&color.to_string());
    }

    fn set_font(&mut self, font: &str) {
        self.ctx.set_font(font);
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.fill_rect(x, y, width, height);
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn arc(
        &mut self,
        x: f64,
        y: f64,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        anticlockwise: bool,
    ) {
        if let Err(e) = self
            .ctx
            .arc_with_anticlockwise(x, y, radius, start_angle, end_angle, anticlockwise)
        {
            warn!(?e, "arc failed");
        }
    }

    fn close_path(&mut self) {
        self.ctx.close_path();
    }

    fn fill(&mut self) {
        self.ctx.fill();
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        if let Err(e) = self.ctx.fill_text(text, x, y) {
            warn!(?e, text, "fill_text failed");
        }
    }
}

pub struct WebSurface {
    canvas: HtmlCanvasElement,
    draw: WebCanvas,
}

impl WebSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(JsValue::from)?;
        Ok(Self {
            canvas,
            draw: WebCanvas { ctx },
        })
    }
}

impl Surface for WebSurface {
    fn width(&self) -> f64 {
        self.canvas.width() as f64
    }

    fn height(&self) -> f64 {
        self.canvas.height() as f64
    }

    fn context(&mut self) -> &mut dyn DrawContext {
        &mut self.draw
    }
}

#[wasm_bindgen]
pub struct WebVisualizer {
    host: Host<Engine, WebSurface>,
}

#[wasm_bindgen]
impl WebVisualizer {
    /// `config_json` is an optional JSON `EngineConfig`
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas: HtmlCanvasElement,
        config_json: Option<String>,
    ) -> Result<WebVisualizer, JsValue> {
        let config = match config_json {
            Some(json) => EngineConfig::from_json_str(&json)
                .map_err(|e| JsValue::from_str(&e.to_string()))?,
            None => EngineConfig::default(),
        };
        let surface = WebSurface::new(canvas)?;
        info!(width = surface.width(), height = surface.height(), "Web surface ready");
        Ok(WebVisualizer {
            host: Host::launch(surface, config),
        })
    }

    pub fn arrival(&mut self, payload: &str) {
        self.host.arrival(payload, now_seconds());
    }

    pub fn frame(&mut self) {
        self.host.tick(now_seconds());
    }

    /// Run the command bound to the first character of `key`
    pub fn key(&mut self, key: &str) -> bool {
        key.chars().next().is_some_and(|c| self.host.key(c))
    }

    /// Run a command by id, e.g. `toggle-fps-display`
    pub fn command(&mut self, command_id: &str) -> bool {
        self.host.command(command_id)
    }

    /// `key: description` lines for the bound commands
    pub fn help(&self) -> String {
        self.host
            .key_help()
            .iter()
            .map(|(key, description)| format!("{key}: {description}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[wasm_bindgen(getter)]
    pub fn particle_count(&self) -> usize {
        self.host.state().particles().len()
    }

    /// Color the page should use for host messages
    #[wasm_bindgen(getter)]
    pub fn message_color(&self) -> String {
        self.host.message_color().unwrap_or(Color::WHITE).to_string()
    }
}
