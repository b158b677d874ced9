//! Freehand pencil/eraser compositing.
//!
//! The compositor is a two-state machine (Idle, Drawing). A drag starts with
//! a pointer-down inside the canvas, every pointer-move rasterizes one
//! segment straight into the buffer, and pointer-up or pointer-leave ends the
//! drag. Nothing is kept as vector data once a stroke ends, so strokes cannot
//! be undone.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::buffer::{PixelBuffer, BLACK, WHITE};

pub const MIN_PENCIL_SIZE: u32 = 1;
pub const MAX_PENCIL_SIZE: u32 = 20;
pub const DEFAULT_PENCIL_SIZE: u32 = 5;

/// Canvas coordinate in pixels. Pixel `(x, y)` covers `[x, x+1) × [y, y+1)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    #[default]
    Pencil,
    Eraser,
}

impl Tool {
    /// Pencil draws black, the eraser paints the white background back.
    pub fn color(self) -> [u8; 4] {
        match self {
            Tool::Pencil => BLACK,
            Tool::Eraser => WHITE,
        }
    }
}

/// One continuous drag.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    points: Vec<Point>,
    width: u32,
    color: [u8; 4],
}

impl Stroke {
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn color(&self) -> [u8; 4] {
        self.color
    }
}

#[derive(Debug, Clone, PartialEq)]
enum State {
    Idle,
    Drawing(Stroke),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Compositor {
    tool: Tool,
    pencil_size: u32,
    state: State,
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new(Tool::Pencil, DEFAULT_PENCIL_SIZE)
    }
}

impl Compositor {
    pub fn new(tool: Tool, pencil_size: u32) -> Self {
        Self {
            tool,
            pencil_size: pencil_size.clamp(MIN_PENCIL_SIZE, MAX_PENCIL_SIZE),
            state: State::Idle,
        }
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Takes effect from the next pointer-down.
    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    pub fn pencil_size(&self) -> u32 {
        self.pencil_size
    }

    /// Clamped to `1..=20`. Takes effect from the next pointer-down.
    pub fn set_pencil_size(&mut self, size: u32) {
        self.pencil_size = size.clamp(MIN_PENCIL_SIZE, MAX_PENCIL_SIZE);
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, State::Drawing(_))
    }

    /// The stroke being drawn, if any.
    pub fn active_stroke(&self) -> Option<&Stroke> {
        match &self.state {
            State::Drawing(stroke) => Some(stroke),
            State::Idle => None,
        }
    }

    /// Begin a stroke at `at`. Ignored unless `at` is inside `canvas`.
    ///
    /// Returns whether a stroke was started.
    pub fn pointer_down(&mut self, canvas: &PixelBuffer, at: Point) -> bool {
        let inside = at.x >= 0.0
            && at.y >= 0.0
            && at.x < canvas.width() as f64
            && at.y < canvas.height() as f64;
        if !inside {
            trace!(x = at.x, y = at.y, "Pointer down outside canvas");
            return false;
        }
        debug!(x = at.x, y = at.y, tool = ?self.tool, width = self.pencil_size, "Stroke started");
        self.state = State::Drawing(Stroke {
            points: vec![at],
            width: self.pencil_size,
            color: self.tool.color(),
        });
        true
    }

    /// Extend the active stroke to `at`, rasterizing the new segment.
    pub fn pointer_move(&mut self, canvas: &mut PixelBuffer, at: Point) {
        let State::Drawing(stroke) = &mut self.state else {
            return;
        };
        if let Some(&last) = stroke.points.last() {
            stroke_segment(canvas, last, at, stroke.width, stroke.color);
        }
        stroke.points.push(at);
    }

    /// End the active stroke. Returns it so callers can inspect the drag.
    pub fn pointer_up(&mut self) -> Option<Stroke> {
        match std::mem::replace(&mut self.state, State::Idle) {
            State::Drawing(stroke) => {
                debug!(points = stroke.points.len(), "Stroke finished");
                Some(stroke)
            }
            State::Idle => None,
        }
    }

    /// Leaving the canvas ends the stroke exactly like pointer-up.
    pub fn pointer_leave(&mut self) -> Option<Stroke> {
        self.pointer_up()
    }
}

/// Squared distance from `p` to the segment `a`-`b`.
fn distance_sq_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len_sq = dx * dx + dy * dy;
    let t = if len_sq > 0.0 {
        (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let (cx, cy) = (a.x + t * dx - p.x, a.y + t * dy - p.y);
    cx * cx + cy * cy
}

/// Paint every pixel whose center lies within `width / 2` of the segment.
///
/// Gives round caps and joins; successive segments of a drag overlap at
/// their shared point. Pixels outside the canvas are skipped.
pub fn stroke_segment(
    canvas: &mut PixelBuffer,
    from: Point,
    to: Point,
    width: u32,
    color: [u8; 4],
) {
    let (canvas_w, canvas_h) = (canvas.width(), canvas.height());
    if canvas_w == 0 || canvas_h == 0 {
        return;
    }
    let half = width as f64 / 2.0;
    let radius_sq = half * half;

    let min_x = (from.x.min(to.x) - half).floor().max(0.0);
    let min_y = (from.y.min(to.y) - half).floor().max(0.0);
    let max_x = (from.x.max(to.x) + half).ceil().min(canvas_w as f64 - 1.0);
    let max_y = (from.y.max(to.y) + half).ceil().min(canvas_h as f64 - 1.0);
    // Also false for NaN coordinates.
    if !(min_x <= max_x && min_y <= max_y) {
        return;
    }

    for y in min_y as usize..=max_y as usize {
        for x in min_x as usize..=max_x as usize {
            let center = Point::new(x as f64 + 0.5, y as f64 + 0.5);
            if distance_sq_to_segment(center, from, to) <= radius_sq {
                canvas.set_pixel(x, y, color);
            }
        }
    }
}
