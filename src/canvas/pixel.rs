//! Software RGBA raster
//!
//! Rect and path fills are rasterized into an RGBA byte buffer. Paths are
//! flattened to polygons and scan-converted with the even-odd rule, sampling
//! pixel centers. There is no font rasterizer: text is kept as `TextRun`s for
//! the host to present.

use std::io::{self, Write};

use super::{arc_sweep, DrawContext, Surface};
use crate::core::Color;

/// Upper bound on segments used to flatten one arc
const MAX_ARC_SEGMENTS: usize = 256;

/// Text drawn onto the canvas
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub color: Color,
    pub font: String,
}

pub struct PixelCanvas {
    width: u32,
    height: u32,
    pixel_data: Vec<u8>,
    fill_style: Color,
    font: String,
    /// Closed subpaths of the current path
    subpaths: Vec<Vec<(f64, f64)>>,
    /// Subpath still being built
    current: Vec<(f64, f64)>,
    text_runs: Vec<TextRun>,
}

impl PixelCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixel_data: vec![0x00; (width as usize) * (height as usize) * 4],
            fill_style: Color::BLACK,
            font: "10px sans-serif".to_string(),
            subpaths: Vec::new(),
            current: Vec::new(),
            text_runs: Vec::new(),
        }
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.get_pixel_index(x, y).map(|idx| Color {
            r: self.pixel_data[idx],
            g: self.pixel_data[idx + 1],
            b: self.pixel_data[idx + 2],
            a: self.pixel_data[idx + 3],
        })
    }

    /// Text currently visible, in draw order
    pub fn text_runs(&self) -> &[TextRun] {
        &self.text_runs
    }

    /// Write the raster as a binary PPM (alpha dropped)
    pub fn write_ppm<W: Write>(&self, mut out: W) -> io::Result<()> {
        write!(out, "P6\n{} {}\n255\n", self.width, self.height)?;
        let rgb: Vec<u8> = self
            .pixel_data
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect();
        out.write_all(&rgb)?;
        out.flush()
    }

    fn get_pixel_index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some(((y as usize) * (self.width as usize) + (x as usize)) * 4)
        } else {
            None
        }
    }

    fn blend_pixel(&mut self, x: i32, y: i32, color: Color) {
        let Some(idx) = self.get_pixel_index(x, y) else {
            return;
        };
        if color.a == 0xff {
            self.pixel_data[idx..idx + 4].copy_from_slice(&[color.r, color.g, color.b, color.a]);
            return;
        }
        // Source-over
        let alpha = color.a as f64 / 255.0;
        let dst = &mut self.pixel_data[idx..idx + 4];
        for (d, s) in dst.iter_mut().zip([color.r, color.g, color.b]) {
            *d = (s as f64 * alpha + *d as f64 * (1.0 - alpha)).round() as u8;
        }
        dst[3] = (color.a as f64 + dst[3] as f64 * (1.0 - alpha)).round() as u8;
    }

    /// Pixel columns whose centers fall inside `[x0, x1)`, clipped to the raster
    fn span(&self, x0: f64, x1: f64) -> std::ops::Range<i32> {
        let start = (x0 - 0.5).ceil().max(0.0) as i32;
        let end = (x1 - 0.5).ceil().min(self.width as f64).max(0.0) as i32;
        start..end
    }

    fn fill_polygons(&mut self, polygons: &[&[(f64, f64)]]) {
        let (min_y, max_y) = polygons
            .iter()
            .flat_map(|poly| poly.iter())
            .fold((f64::MAX, f64::MIN), |(lo, hi), &(_, y)| (lo.min(y), hi.max(y)));
        if min_y > max_y {
            return;
        }

        let first_row = (min_y - 0.5).ceil().max(0.0) as i32;
        let last_row = (max_y - 0.5).floor().min(self.height as f64 - 1.0) as i32;
        let color = self.fill_style;
        let mut crossings: Vec<f64> = Vec::new();

        for py in first_row..=last_row {
            let sy = py as f64 + 0.5;
            crossings.clear();
            for poly in polygons {
                if poly.len() < 3 {
                    continue;
                }
                for (i, &(ax, ay)) in poly.iter().enumerate() {
                    let (bx, by) = poly[(i + 1) % poly.len()];
                    if (ay <= sy && by > sy) || (by <= sy && ay > sy) {
                        crossings.push(ax + (sy - ay) * (bx - ax) / (by - ay));
                    }
                }
            }
            crossings.sort_by(|a, b| a.total_cmp(b));
            for pair in crossings.chunks_exact(2) {
                for px in self.span(pair[0], pair[1]) {
                    self.blend_pixel(px, py, color);
                }
            }
        }
    }
}

impl Surface for PixelCanvas {
    fn width(&self) -> f64 {
        self.width as f64
    }

    fn height(&self) -> f64 {
        self.height as f64
    }

    fn context(&mut self) -> &mut dyn DrawContext {
        self
    }
}

impl DrawContext for PixelCanvas {
    fn set_fill_style(&mut self, color: Color) {
        self.fill_style = color;
    }

    fn set_font(&mut self, font: &str) {
        self.font = font.to_string();
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let (x0, x1) = (x.min(x + width), x.max(x + width));
        let (y0, y1) = (y.min(y + height), y.max(y + height));

        // Painting over text hides it
        self.text_runs
            .retain(|run| !(run.x >= x0 && run.x < x1 && run.y >= y0 && run.y < y1));

        let color = self.fill_style;
        let first_row = (y0 - 0.5).ceil().max(0.0) as i32;
        let end_row = (y1 - 0.5).ceil().min(self.height as f64) as i32;
        for py in first_row..end_row {
            for px in self.span(x0, x1) {
                self.blend_pixel(px, py, color);
            }
        }
    }

    fn begin_path(&mut self) {
        self.subpaths.clear();
        self.current.clear();
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
        let radius = radius.abs();
        let sweep = arc_sweep(start_angle, end_angle, anticlockwise);
        let segments = ((sweep.abs() * radius).ceil() as usize).clamp(8, MAX_ARC_SEGMENTS);
        for i in 0..=segments {
            let angle = start_angle + sweep * (i as f64 / segments as f64);
            self.current.push((x + radius * angle.cos(), y + radius * angle.sin()));
        }
    }

    fn close_path(&mut self) {
        if !self.current.is_empty() {
            self.subpaths.push(std::mem::take(&mut self.current));
        }
    }

    fn fill(&mut self) {
        let subpaths = std::mem::take(&mut self.subpaths);
        let current = std::mem::take(&mut self.current);
        {
            let mut polygons: Vec<&[(f64, f64)]> = subpaths.iter().map(Vec::as_slice).collect();
            polygons.push(&current);
            self.fill_polygons(&polygons);
        }
        // The path survives a fill
        self.subpaths = subpaths;
        self.current = current;
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.text_runs.push(TextRun {
            text: text.to_string(),
            x,
            y,
            color: self.fill_style,
            font: self.font.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::TAU;

    const RED: Color = Color::rgb(255, 0, 0);

    #[test]
    fn test_fill_rect_covers_pixel_centers() {
        let mut canvas = PixelCanvas::new(8, 8);
        canvas.set_fill_style(RED);
        canvas.fill_rect(2.0, 2.0, 3.0, 2.0);

        assert_eq!(canvas.pixel(2, 2), Some(RED));
        assert_eq!(canvas.pixel(4, 3), Some(RED));
        assert_eq!(canvas.pixel(5, 3), Some(Color::from_u32(0)));
        assert_eq!(canvas.pixel(2, 4), Some(Color::from_u32(0)));
        assert_eq!(canvas.pixel(8, 0), None);
    }

    #[test]
    fn test_filled_disc() {
        let mut canvas = PixelCanvas::new(32, 32);
        canvas.set_fill_style(Color::BLACK);
        canvas.fill_rect(0.0, 0.0, 32.0, 32.0);

        canvas.set_fill_style(RED);
        canvas.begin_path();
        canvas.arc(10.5, 10.5, 3.0, 0.0, TAU, true);
        canvas.close_path();
        canvas.fill();

        assert_eq!(canvas.pixel(10, 10), Some(RED));
        assert_eq!(canvas.pixel(12, 10), Some(RED));
        assert_eq!(canvas.pixel(10, 8), Some(RED));
        assert_eq!(canvas.pixel(14, 10), Some(Color::BLACK));
        assert_eq!(canvas.pixel(13, 13), Some(Color::BLACK));
        assert_eq!(canvas.pixel(20, 20), Some(Color::BLACK));
    }

    #[test]
    fn test_disc_partly_off_surface_is_clipped() {
        let mut canvas = PixelCanvas::new(4, 4);
        canvas.set_fill_style(RED);
        canvas.begin_path();
        canvas.arc(4.0, 2.0, 3.0, 0.0, TAU, false);
        canvas.close_path();
        canvas.fill();
        assert_eq!(canvas.pixel(3, 2), Some(RED));
    }

    #[test]
    fn test_translucent_fill_blends() {
        let mut canvas = PixelCanvas::new(1, 1);
        canvas.set_fill_style(Color::BLACK);
        canvas.fill_rect(0.0, 0.0, 1.0, 1.0);
        canvas.set_fill_style(Color::from_u32(0xffffff80));
        canvas.fill_rect(0.0, 0.0, 1.0, 1.0);
        let px = canvas.pixel(0, 0).unwrap();
        assert_eq!(px.r, 128);
        assert_eq!(px.a, 255);
    }

    #[test]
    fn test_text_runs_hidden_by_clear() {
        let mut canvas = PixelCanvas::new(100, 100);
        canvas.set_fill_style(Color::WHITE);
        canvas.set_font("12px Arial");
        canvas.fill_text("3 balls", 15.0, 85.0);
        assert_eq!(
            canvas.text_runs(),
            &[TextRun {
                text: "3 balls".into(),
                x: 15.0,
                y: 85.0,
                color: Color::WHITE,
                font: "12px Arial".into(),
            }]
        );

        canvas.fill_rect(0.0, 0.0, 100.0, 100.0);
        assert!(canvas.text_runs().is_empty());
    }

    #[test]
    fn test_write_ppm() {
        let mut canvas = PixelCanvas::new(2, 1);
        canvas.set_fill_style(RED);
        canvas.fill_rect(0.0, 0.0, 1.0, 1.0);
        let mut out = Vec::new();
        canvas.write_ppm(&mut out).unwrap();
        let header = b"P6\n2 1\n255\n";
        assert_eq!(&out[..header.len()], header);
        assert_eq!(&out[header.len()..], &[255, 0, 0, 0, 0, 0]);
    }
}
