//! # Viewport Controller
//!
//! Maps laid-out content coordinates onto a bounded drawing surface:
//! `screen = content * scale + translate`.

use serde::Serialize;

use crate::layout::{Point, Rect};

pub const MIN_SCALE: f64 = 0.1;
pub const MAX_SCALE: f64 = 5.0;
/// Horizontal and vertical room left free when fitting content.
pub const FIT_MARGIN_X: f64 = 60.0;
pub const FIT_MARGIN_Y: f64 = 40.0;
/// Screen x of the content's left edge after a fit.
pub const FIT_LEFT: f64 = 30.0;

pub fn clamp_scale(scale: f64) -> f64 {
    scale.clamp(MIN_SCALE, MAX_SCALE)
}

/// Scale and translation of the content; the only state carried across
/// a geometry rebuild.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Transform {
    pub scale: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            translate_x: 0.0,
            translate_y: 0.0,
        }
    }
}

impl Transform {
    pub fn to_screen(&self, p: Point) -> Point {
        Point::new(
            p.x * self.scale + self.translate_x,
            p.y * self.scale + self.translate_y,
        )
    }

    pub fn to_content(&self, p: Point) -> Point {
        Point::new(
            (p.x - self.translate_x) / self.scale,
            (p.y - self.translate_y) / self.scale,
        )
    }

    pub fn rect_to_screen(&self, r: &Rect) -> Rect {
        let origin = self.to_screen(Point::new(r.x, r.y));
        Rect::new(origin.x, origin.y, r.width * self.scale, r.height * self.scale)
    }

    /// Value for an SVG `transform` attribute.
    pub fn to_svg(&self) -> String {
        format!(
            "translate({}, {}) scale({})",
            self.translate_x, self.translate_y, self.scale
        )
    }
}

/// Zoom and pan state of one diagram instance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Viewport {
    transform: Transform,
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn scale(&self) -> f64 {
        self.transform.scale
    }

    pub fn translation(&self) -> Point {
        Point::new(self.transform.translate_x, self.transform.translate_y)
    }

    /// Puts back a transform captured before a rebuild.
    pub fn restore(&mut self, transform: Transform) {
        self.transform = Transform {
            scale: clamp_scale(transform.scale),
            ..transform
        };
    }

    /// Shrinks (never enlarges) `bbox` to fit a `width` × `height` surface,
    /// pins its left edge at [`FIT_LEFT`] and centres it vertically.
    pub fn fit_to_viewport(&mut self, bbox: &Rect, width: f64, height: f64) {
        let mut scale: f64 = 1.0;
        if bbox.width > 0.0 {
            scale = scale.min((width - FIT_MARGIN_X) / bbox.width);
        }
        if bbox.height > 0.0 {
            scale = scale.min((height - FIT_MARGIN_Y) / bbox.height);
        }
        let scale = clamp_scale(scale);

        self.transform = Transform {
            scale,
            translate_x: FIT_LEFT - bbox.x * scale,
            translate_y: (height - bbox.height * scale) / 2.0 - bbox.y * scale,
        };
        log::debug!("fit {:?} into {width}x{height}: {:?}", bbox, self.transform);
    }

    /// Multiplies the scale by `factor`. With an anchor, the content under
    /// the anchor stays where it is on screen; without one the translation
    /// is left alone.
    pub fn zoom_at(&mut self, factor: f64, anchor: Option<Point>) {
        let old = self.transform.scale;
        let new = clamp_scale(old * factor);
        if let Some(a) = anchor {
            let ratio = new / old;
            self.transform.translate_x = a.x - (a.x - self.transform.translate_x) * ratio;
            self.transform.translate_y = a.y - (a.y - self.transform.translate_y) * ratio;
        }
        self.transform.scale = new;
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.transform.translate_x += dx;
        self.transform.translate_y += dy;
    }

    /// Back to scale 1, then fit.
    pub fn reset(&mut self, bbox: &Rect, width: f64, height: f64) {
        self.transform.scale = 1.0;
        self.fit_to_viewport(bbox, width, height);
    }

    pub fn to_screen(&self, p: Point) -> Point {
        self.transform.to_screen(p)
    }

    pub fn to_content(&self, p: Point) -> Point {
        self.transform.to_content(p)
    }
}
