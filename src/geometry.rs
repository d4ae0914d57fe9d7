//! Shape manipulation geometry.
//!
//! Every function here is pure: it takes a shape (or the fields it needs) and a
//! gesture delta and returns the new geometry. Deltas are always measured from
//! the start of a gesture, so callers apply them to the shape as it was when the
//! gesture began.

use crate::drawing::{BoxShape, LineShape, Shape};
use crate::math::{rotate_point, to_degrees};

/// Smallest width or height a box can be resized or finalized to.
pub const MIN_SHAPE_SIZE: f32 = 10.0;

/// One of the eight resize handles around a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoxHandle {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl BoxHandle {
    pub const ALL: [BoxHandle; 8] = [
        BoxHandle::NW,
        BoxHandle::N,
        BoxHandle::NE,
        BoxHandle::E,
        BoxHandle::SE,
        BoxHandle::S,
        BoxHandle::SW,
        BoxHandle::W,
    ];

    /// Signs applied to `(x, y, width, height)`; `x`/`width` take `dx`, `y`/`height` take `dy`.
    fn delta_signs(self) -> [f32; 4] {
        match self {
            BoxHandle::NW => [1.0, 1.0, -1.0, -1.0],
            BoxHandle::N => [0.0, 1.0, 0.0, -1.0],
            BoxHandle::NE => [0.0, 1.0, 1.0, -1.0],
            BoxHandle::E => [0.0, 0.0, 1.0, 0.0],
            BoxHandle::SE => [0.0, 0.0, 1.0, 1.0],
            BoxHandle::S => [0.0, 0.0, 0.0, 1.0],
            BoxHandle::SW => [1.0, 0.0, -1.0, 1.0],
            BoxHandle::W => [1.0, 0.0, -1.0, 0.0],
        }
    }

    /// Position on the unrotated box as fractions of width and height.
    fn anchor(self) -> [f32; 2] {
        match self {
            BoxHandle::NW => [0.0, 0.0],
            BoxHandle::N => [0.5, 0.0],
            BoxHandle::NE => [1.0, 0.0],
            BoxHandle::E => [1.0, 0.5],
            BoxHandle::SE => [1.0, 1.0],
            BoxHandle::S => [0.5, 1.0],
            BoxHandle::SW => [0.0, 1.0],
            BoxHandle::W => [0.0, 0.5],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineEndpoint {
    Start,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxGeometry {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// How a line is drawn: a segment of `length` rotated by `angle` degrees about its start point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineRender {
    pub length: f32,
    pub angle: f32,
}

/// Rigid translation. Both endpoints of a line move together.
pub fn move_by(shape: &Shape, dx: f32, dy: f32) -> Shape {
    match shape {
        Shape::Box(b) => Shape::Box(BoxShape {
            x: b.x + dx,
            y: b.y + dy,
            ..b.clone()
        }),
        Shape::Line(l) => Shape::Line(LineShape {
            x: l.x + dx,
            y: l.y + dy,
            x2: l.x2 + dx,
            y2: l.y2 + dy,
            ..l.clone()
        }),
    }
}

/// Drags one resize handle by `(dx, dy)`.
///
/// Width and height never drop below [`MIN_SHAPE_SIZE`]. The position still
/// follows the raw delta when the size clamps.
pub fn resize_box(shape: &BoxShape, handle: BoxHandle, dx: f32, dy: f32) -> BoxShape {
    let [sx, sy, sw, sh] = handle.delta_signs();
    BoxShape {
        x: shape.x + sx * dx,
        y: shape.y + sy * dy,
        width: (shape.width + sw * dx).max(MIN_SHAPE_SIZE),
        height: (shape.height + sh * dy).max(MIN_SHAPE_SIZE),
        ..shape.clone()
    }
}

/// Moves a single endpoint. Lines have no minimum length.
pub fn resize_line(shape: &LineShape, endpoint: LineEndpoint, dx: f32, dy: f32) -> LineShape {
    match endpoint {
        LineEndpoint::Start => LineShape {
            x: shape.x + dx,
            y: shape.y + dy,
            ..shape.clone()
        },
        LineEndpoint::End => LineShape {
            x2: shape.x2 + dx,
            y2: shape.y2 + dy,
            ..shape.clone()
        },
    }
}

/// Absolute rotation from the pointer's direction around `pivot`.
///
/// Offset by 90 degrees so a pointer straight above the pivot gives 0.
pub fn rotate(shape: &Shape, pivot: [f32; 2], pointer: [f32; 2]) -> Shape {
    let angle = to_degrees((pointer[1] - pivot[1]).atan2(pointer[0] - pivot[0])) + 90.0;
    match shape {
        Shape::Box(b) => Shape::Box(BoxShape {
            rotation_degrees: angle,
            ..b.clone()
        }),
        Shape::Line(l) => Shape::Line(LineShape {
            rotation_degrees: angle,
            ..l.clone()
        }),
    }
}

pub fn derive_line_render(line: &LineShape) -> LineRender {
    let dx = line.x2 - line.x;
    let dy = line.y2 - line.y;
    LineRender {
        length: dx.hypot(dy),
        angle: to_degrees(dy.atan2(dx)),
    }
}

/// Box spanned by a creation drag, normalized so it is well-formed in any drag direction.
pub fn creation_size(start: [f32; 2], current: [f32; 2]) -> BoxGeometry {
    BoxGeometry {
        x: start[0].min(current[0]),
        y: start[1].min(current[1]),
        width: (current[0] - start[0]).abs(),
        height: (current[1] - start[1]).abs(),
    }
}

/// Rotation center: the bounding-box center for boxes, the midpoint for lines.
pub fn pivot(shape: &Shape) -> [f32; 2] {
    match shape {
        Shape::Box(b) => box_center(b),
        Shape::Line(l) => [(l.x + l.x2) / 2.0, (l.y + l.y2) / 2.0],
    }
}

pub fn box_center(shape: &BoxShape) -> [f32; 2] {
    [shape.x + shape.width / 2.0, shape.y + shape.height / 2.0]
}

/// Canvas position of a resize handle, following the box's rotation.
pub fn box_handle_position(shape: &BoxShape, handle: BoxHandle) -> [f32; 2] {
    let [fx, fy] = handle.anchor();
    let local = [shape.x + fx * shape.width, shape.y + fy * shape.height];
    rotate_point(local, box_center(shape), shape.rotation_degrees)
}

/// Canvas position of the rotate handle, `offset` above the top-center edge.
pub fn rotate_handle_position(shape: &BoxShape, offset: f32) -> [f32; 2] {
    let local = [shape.x + shape.width / 2.0, shape.y - offset];
    rotate_point(local, box_center(shape), shape.rotation_degrees)
}

pub fn line_endpoint(shape: &LineShape, endpoint: LineEndpoint) -> [f32; 2] {
    match endpoint {
        LineEndpoint::Start => [shape.x, shape.y],
        LineEndpoint::End => [shape.x2, shape.y2],
    }
}
