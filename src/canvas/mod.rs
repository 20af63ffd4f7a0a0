//! Drawing surfaces the engine paints on
//!
//! `DrawContext` mirrors the small slice of a 2D canvas API the renderer
//! needs; `Surface` pairs it with the surface dimensions. Two software
//! implementations live here:
//! - `PixelCanvas`: RGBA raster, fills rects and paths, keeps text as runs
//! - `RecordingCanvas`: logs every call, used to inspect frames

mod pixel;
mod recording;

pub use pixel::{PixelCanvas, TextRun};
pub use recording::{DrawOp, RecordingCanvas};

use crate::core::Color;
use std::f64::consts::TAU;

/// 2D drawing primitives
pub trait DrawContext {
    fn set_fill_style(&mut self, color: Color);
    fn set_font(&mut self, font: &str);
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn begin_path(&mut self);
    /// Add an arc to the current path. A sweep of at least a full turn in
    /// either direction is a whole circle.
    fn arc(
        &mut self,
        x: f64,
        y: f64,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        anticlockwise: bool,
    );
    fn close_path(&mut self);
    /// Fill the current path with the fill style
    fn fill(&mut self);
    fn fill_text(&mut self, text: &str, x: f64, y: f64);
}

/// Something with a size and a draw context
pub trait Surface {
    fn width(&self) -> f64;
    fn height(&self) -> f64;
    fn context(&mut self) -> &mut dyn DrawContext;
}

/// Signed sweep of an arc in radians, clamped to one full turn
pub(crate) fn arc_sweep(start_angle: f64, end_angle: f64, anticlockwise: bool) -> f64 {
    let diff = end_angle - start_angle;
    if diff.abs() >= TAU {
        return if anticlockwise { -TAU } else { TAU };
    }
    if anticlockwise {
        let sweep = (start_angle - end_angle).rem_euclid(TAU);
        -sweep
    } else {
        diff.rem_euclid(TAU)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_full_turn_either_direction() {
        assert_eq!(arc_sweep(0.0, TAU, true), -TAU);
        assert_eq!(arc_sweep(0.0, TAU, false), TAU);
        assert_eq!(arc_sweep(TAU, 0.0, false), TAU);
    }

    #[test]
    fn test_partial_sweeps() {
        assert!((arc_sweep(0.0, PI / 2.0, false) - PI / 2.0).abs() < 1e-12);
        assert!((arc_sweep(0.0, PI / 2.0, true) + 3.0 * PI / 2.0).abs() < 1e-12);
        assert!((arc_sweep(PI, 0.0, false) - PI).abs() < 1e-12);
    }
}
