//! What an external painter needs to draw the canvas.

use crate::app_state::State;
use crate::drawing::{BorderStyle, BoxKind, Color, Shape, ShapeId};
use crate::event_handler::HandleHit;
use crate::geometry::{BoxHandle, LineEndpoint, box_handle_position, derive_line_render, line_endpoint, rotate_handle_position};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Border {
    pub width: f32,
    pub style: BorderStyle,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// Rotated by `rotation` degrees about its center. Circles fill the box as an ellipse.
    Box {
        kind: BoxKind,
        left: f32,
        top: f32,
        width: f32,
        height: f32,
        rotation: f32,
        fill: Color,
    },
    /// A zero-height segment of `length`, rotated by `angle` degrees about `start`.
    Line { start: [f32; 2], length: f32, angle: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderHandle {
    pub hit: HandleHit,
    pub position: [f32; 2],
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderItem {
    pub id: ShapeId,
    pub primitive: Primitive,
    pub border: Border,
    pub selected: bool,
    /// Empty unless the shape is selected.
    pub handles: Vec<RenderHandle>,
}

/// Maps any angle into `[0, 360)`.
pub fn normalize_rotation(degrees: f32) -> f32 {
    let normalized = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if normalized >= 360.0 { 0.0 } else { normalized }
}

impl State {
    /// One item per shape, in paint order.
    pub fn render_list(&self) -> Vec<RenderItem> {
        self.shapes
            .iter()
            .map(|shape| {
                let selected = self.selected == Some(shape.id());
                self.render_item(shape, selected)
            })
            .collect()
    }

    fn render_item(&self, shape: &Shape, selected: bool) -> RenderItem {
        match shape {
            Shape::Box(b) => {
                let handles = if selected {
                    let mut handles: Vec<RenderHandle> = BoxHandle::ALL
                        .into_iter()
                        .map(|handle| RenderHandle {
                            hit: HandleHit::Resize(handle),
                            position: box_handle_position(b, handle),
                        })
                        .collect();
                    handles.push(RenderHandle {
                        hit: HandleHit::Rotate,
                        position: rotate_handle_position(b, self.config.rotate_handle_offset),
                    });
                    handles
                } else {
                    Vec::new()
                };

                RenderItem {
                    id: b.id,
                    primitive: Primitive::Box {
                        kind: b.kind,
                        left: b.x,
                        top: b.y,
                        width: b.width,
                        height: b.height,
                        rotation: normalize_rotation(b.rotation_degrees),
                        fill: b.fill_color,
                    },
                    border: Border {
                        width: b.border_width,
                        style: b.border_style,
                        color: b.stroke_color,
                    },
                    selected,
                    handles,
                }
            }
            Shape::Line(l) => {
                let render = derive_line_render(l);
                let handles = if selected {
                    [LineEndpoint::Start, LineEndpoint::End]
                        .into_iter()
                        .map(|endpoint| RenderHandle {
                            hit: HandleHit::Endpoint(endpoint),
                            position: line_endpoint(l, endpoint),
                        })
                        .collect()
                } else {
                    Vec::new()
                };

                RenderItem {
                    id: l.id,
                    primitive: Primitive::Line {
                        start: [l.x, l.y],
                        length: render.length,
                        angle: render.angle,
                    },
                    border: Border {
                        width: l.border_width,
                        style: l.border_style,
                        color: l.stroke_color,
                    },
                    selected,
                    handles,
                }
            }
        }
    }
}
