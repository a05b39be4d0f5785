//! Page content stream operations.
//!
//! Only the handful of operators a sticker sheet needs: stroked lines,
//! single-run text, clipping rectangles and image placement.

use lopdf::content::{Content, Operation};
use lopdf::{Object, StringFormat};

use crate::layout::geometry::{Point, Rect};
use crate::layout::metrics::{winansi_byte, FontFace};
use crate::layout::{DrawOp, PagePlan};

/// Numeric operand rounded to two decimals; whole numbers stay integers.
pub fn num(v: f32) -> Object {
    let rounded = (f64::from(v) * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        Object::Integer(rounded as i64)
    } else {
        Object::from(rounded as f32)
    }
}

/// WinAnsi bytes of `text` as a literal string operand.
pub fn literal(text: &str) -> Object {
    Object::String(text.chars().map(winansi_byte).collect(), StringFormat::Literal)
}

fn name(value: &str) -> Object {
    Object::Name(value.as_bytes().to_vec())
}

/// Builds the operation list of one page.
#[derive(Debug, Default)]
pub struct ContentBuilder {
    ops: Vec<Operation>,
}

impl ContentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, operator: &str, operands: Vec<Object>) {
        self.ops.push(Operation::new(operator, operands));
    }

    pub fn save_state(&mut self) {
        self.push("q", vec![]);
    }

    pub fn restore_state(&mut self) {
        self.push("Q", vec![]);
    }

    pub fn stroke_gray(&mut self, gray: f32) {
        self.push("G", vec![num(gray)]);
    }

    pub fn line_width(&mut self, width: f32) {
        self.push("w", vec![num(width)]);
    }

    pub fn line(&mut self, from: Point, to: Point) {
        self.push("m", vec![num(from.x), num(from.y)]);
        self.push("l", vec![num(to.x), num(to.y)]);
        self.push("S", vec![]);
    }

    /// Intersect the clipping path with `rect`.
    pub fn clip_rect(&mut self, rect: Rect) {
        self.push(
            "re",
            vec![num(rect.x), num(rect.y), num(rect.width), num(rect.height)],
        );
        self.push("W", vec![]);
        self.push("n", vec![]);
    }

    /// One text run with its baseline origin at `origin`.
    pub fn text(&mut self, face: FontFace, size: f32, origin: Point, text: &str) {
        self.push("BT", vec![]);
        self.push("Tf", vec![name(face.resource_name()), num(size)]);
        self.push("Td", vec![num(origin.x), num(origin.y)]);
        self.push("Tj", vec![literal(text)]);
        self.push("ET", vec![]);
    }

    /// Paint image XObject `resource` scaled into `rect`.
    pub fn image(&mut self, resource: &str, rect: Rect) {
        self.save_state();
        self.push(
            "cm",
            vec![
                num(rect.width),
                Object::Integer(0),
                Object::Integer(0),
                num(rect.height),
                num(rect.x),
                num(rect.y),
            ],
        );
        self.push("Do", vec![name(resource)]);
        self.restore_state();
    }

    pub fn into_content(self) -> Content {
        Content {
            operations: self.ops,
        }
    }
}

/// Translate the display list of `plan` into content operations.
pub fn page_content(plan: &PagePlan, image_name: impl Fn(usize) -> String) -> Content {
    let mut cs = ContentBuilder::new();
    cs.save_state();
    cs.stroke_gray(plan.grid_gray);
    cs.line_width(plan.grid_line_width);
    for op in &plan.ops {
        match op {
            DrawOp::Line { from, to } => cs.line(*from, *to),
            DrawOp::Text {
                face,
                size,
                origin,
                text,
            } => cs.text(*face, *size, *origin, text),
            DrawOp::Image { image, rect } => cs.image(&image_name(*image), *rect),
            DrawOp::BeginClip { rect } => {
                cs.save_state();
                cs.clip_rect(*rect);
            }
            DrawOp::EndClip => cs.restore_state(),
        }
    }
    cs.restore_state();
    cs.into_content()
}
