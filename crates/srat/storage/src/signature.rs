//! Signature capture: strokes rasterized into a monochrome bitmap
//!
//! The pad mirrors a 300×120 drawing surface with a 2px pen. Captured
//! signatures are encoded as binary PBM (`P4`) and keyed by their blake3
//! digest, so the artifact can be stored without an image library.

use crate::traits::content_digest;
use crate::{StorageError, StorageResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use srat_types::SignatureArtifact;

pub const PAD_WIDTH: u32 = 300;
pub const PAD_HEIGHT: u32 = 120;
pub const PEN_WIDTH: f32 = 2.0;
pub const PBM_MEDIA_TYPE: &str = "image/x-portable-bitmap";

/// A position on the pad, in pixels from the top-left corner
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// One continuous pen-down movement
pub type Stroke = Vec<Point>;

/// Collects strokes and renders them into a [`SignatureArtifact`]
#[derive(Clone, Debug)]
pub struct SignaturePad {
    width: u32,
    height: u32,
    pen_width: f32,
    strokes: Vec<Stroke>,
}

impl SignaturePad {
    pub fn new() -> Self {
        Self::with_size(PAD_WIDTH, PAD_HEIGHT)
    }

    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pen_width: PEN_WIDTH,
            strokes: Vec::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.iter().all(|s| s.is_empty())
    }

    /// Start a new stroke at `at`
    pub fn begin_stroke(&mut self, at: Point) {
        self.strokes.push(vec![at]);
    }

    /// Extend the current stroke; starts one if none is open
    pub fn line_to(&mut self, to: Point) {
        match self.strokes.last_mut() {
            Some(stroke) => stroke.push(to),
            None => self.begin_stroke(to),
        }
    }

    pub fn add_stroke(&mut self, stroke: Stroke) {
        if !stroke.is_empty() {
            self.strokes.push(stroke);
        }
    }

    pub fn clear(&mut self) {
        self.strokes.clear();
    }

    /// Rasterize the current strokes, stamped now
    pub fn capture(&self) -> StorageResult<SignatureArtifact> {
        self.capture_at(Utc::now())
    }

    pub fn capture_at(&self, at: DateTime<Utc>) -> StorageResult<SignatureArtifact> {
        if self.is_empty() {
            return Err(StorageError::InvalidInput("signature is empty".into()));
        }

        let data = self.rasterize().to_pbm();
        let digest = content_digest(&data);
        tracing::debug!(
            strokes = self.strokes.len(),
            bytes = data.len(),
            digest = %digest,
            "Signature captured"
        );

        Ok(SignatureArtifact {
            media_type: PBM_MEDIA_TYPE.to_string(),
            width: self.width,
            height: self.height,
            data,
            digest,
            captured_at: at,
        })
    }

    pub(crate) fn rasterize(&self) -> Bitmap {
        let mut bitmap = Bitmap::new(self.width, self.height);
        let radius = self.pen_width / 2.0;

        for stroke in &self.strokes {
            match stroke.as_slice() {
                [] => {}
                [only] => bitmap.stamp(*only, radius),
                points => {
                    for pair in points.windows(2) {
                        bitmap.segment(pair[0], pair[1], radius);
                    }
                }
            }
        }
        bitmap
    }
}

impl Default for SignaturePad {
    fn default() -> Self {
        Self::new()
    }
}

/// Row-major 1-bit canvas
#[derive(Clone, Debug)]
pub(crate) struct Bitmap {
    width: u32,
    height: u32,
    ink: Vec<bool>,
}

impl Bitmap {
    fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ink: vec![false; width as usize * height as usize],
        }
    }

    pub(crate) fn is_inked(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && self.ink[(y * self.width + x) as usize]
    }

    #[cfg(test)]
    fn inked_count(&self) -> usize {
        self.ink.iter().filter(|p| **p).count()
    }

    /// Ink every pixel whose centre lies within `radius` of `at`
    fn stamp(&mut self, at: Point, radius: f32) {
        if !at.is_finite() {
            return;
        }
        let x0 = (at.x - radius).floor().max(0.0) as u32;
        let y0 = (at.y - radius).floor().max(0.0) as u32;
        let x1 = (at.x + radius).ceil().min(self.width as f32) as u32;
        let y1 = (at.y + radius).ceil().min(self.height as f32) as u32;

        for y in y0..y1 {
            for x in x0..x1 {
                let dx = x as f32 + 0.5 - at.x;
                let dy = y as f32 + 0.5 - at.y;
                if dx * dx + dy * dy <= radius * radius {
                    self.ink[(y * self.width + x) as usize] = true;
                }
            }
        }
    }

    /// Stamp along the part of `from..to` that can reach the canvas.
    /// The step count is bounded by the canvas size, not the segment length.
    fn segment(&mut self, from: Point, to: Point, radius: f32) {
        if !from.is_finite() || !to.is_finite() {
            self.stamp(from, radius);
            self.stamp(to, radius);
            return;
        }
        let Some((from, to)) = self.clip(from, to, radius) else {
            return;
        };

        let span = (to.x - from.x).abs().max((to.y - from.y).abs());
        let steps = ((span * 2.0).ceil() as u32).max(1);
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            self.stamp(
                Point::new(from.x + (to.x - from.x) * t, from.y + (to.y - from.y) * t),
                radius,
            );
        }
    }

    /// Liang-Barsky clip against the canvas grown by `margin` on every side
    fn clip(&self, from: Point, to: Point, margin: f32) -> Option<(Point, Point)> {
        let (dx, dy) = (to.x - from.x, to.y - from.y);
        let edges = [
            (-dx, from.x + margin),
            (dx, self.width as f32 + margin - from.x),
            (-dy, from.y + margin),
            (dy, self.height as f32 + margin - from.y),
        ];

        let (mut t0, mut t1) = (0.0f32, 1.0f32);
        for (p, q) in edges {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let r = q / p;
            if p < 0.0 {
                if r > t1 {
                    return None;
                }
                t0 = t0.max(r);
            } else {
                if r < t0 {
                    return None;
                }
                t1 = t1.min(r);
            }
        }

        let at = |t: f32| Point::new(from.x + dx * t, from.y + dy * t);
        Some((at(t0), at(t1)))
    }

    /// Binary PBM: rows packed MSB first, padded to whole bytes, 1 = ink
    fn to_pbm(&self) -> Vec<u8> {
        let mut out = format!("P4\n{} {}\n", self.width, self.height).into_bytes();
        let row_bytes = (self.width as usize).div_ceil(8);
        for y in 0..self.height {
            let mut row = vec![0u8; row_bytes];
            for x in 0..self.width {
                if self.is_inked(x, y) {
                    row[x as usize / 8] |= 0x80 >> (x % 8);
                }
            }
            out.extend_from_slice(&row);
        }
        out
    }
}
