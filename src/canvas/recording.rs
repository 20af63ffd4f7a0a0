//! Draw-call recorder

use super::{DrawContext, Surface};
use crate::core::Color;

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    FillStyle(Color),
    Font(String),
    FillRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    BeginPath,
    Arc {
        x: f64,
        y: f64,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        anticlockwise: bool,
    },
    ClosePath,
    Fill,
    FillText { text: String, x: f64, y: f64 },
}

/// Surface that records draw calls instead of painting
#[derive(Debug, Clone)]
pub struct RecordingCanvas {
    width: f64,
    height: f64,
    ops: Vec<DrawOp>,
}

impl RecordingCanvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Drain recorded ops, e.g. between frames
    pub fn take_ops(&mut self) -> Vec<DrawOp> {
        std::mem::take(&mut self.ops)
    }

    /// Text of every `FillText` in call order
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::FillText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Number of filled paths
    pub fn fill_count(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, DrawOp::Fill)).count()
    }
}

impl Surface for RecordingCanvas {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn context(&mut self) -> &mut dyn DrawContext {
        self
    }
}

impl DrawContext for RecordingCanvas {
    fn set_fill_style(&mut self, color: Color) {
        self.ops.push(DrawOp::FillStyle(color));
    }

    fn set_font(&mut self, font: &str) {
        self.ops.push(DrawOp::Font(font.to_string()));
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ops.push(DrawOp::FillRect {
            x,
            y,
            width,
            height,
        });
    }

    fn begin_path(&mut self) {
        self.ops.push(DrawOp::BeginPath);
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
        self.ops.push(DrawOp::Arc {
            x,
            y,
            radius,
            start_angle,
            end_angle,
            anticlockwise,
        });
    }

    fn close_path(&mut self) {
        self.ops.push(DrawOp::ClosePath);
    }

    fn fill(&mut self) {
        self.ops.push(DrawOp::Fill);
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.ops.push(DrawOp::FillText {
            text: text.to_string(),
            x,
            y,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_order() {
        let mut canvas = RecordingCanvas::new(10.0, 20.0);
        let ctx = canvas.context();
        ctx.set_fill_style(Color::BLACK);
        ctx.fill_rect(0.0, 0.0, 10.0, 20.0);
        ctx.fill_text("hi", 1.0, 2.0);

        assert_eq!(
            canvas.ops(),
            &[
                DrawOp::FillStyle(Color::BLACK),
                DrawOp::FillRect {
                    x: 0.0,
                    y: 0.0,
                    width: 10.0,
                    height: 20.0
                },
                DrawOp::FillText {
                    text: "hi".into(),
                    x: 1.0,
                    y: 2.0
                },
            ]
        );
        assert_eq!(canvas.texts(), vec!["hi"]);

        let drained = canvas.take_ops();
        assert_eq!(drained.len(), 3);
        assert!(canvas.ops().is_empty());
    }
}
