use crate::app_state::State;
use crate::drawing::{BoxKind, BoxShape, LineShape, Shape, ShapeId, Tool};
use crate::geometry::{
    self, BoxHandle, LineEndpoint, MIN_SHAPE_SIZE, box_center, box_handle_position, line_endpoint,
    rotate_handle_position,
};
use crate::math::{distance, point_to_line_distance, rotate_point};
use crate::state::{Gesture, UserInputState};

use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Which handle of the selected shape is under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleHit {
    Resize(BoxHandle),
    Endpoint(LineEndpoint),
    Rotate,
}

impl State {
    /// Feeds a window event into the editor. Returns whether it was consumed.
    pub fn input(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                let [x, y] = self
                    .canvas
                    .screen_to_canvas([position.x as f32, position.y as f32]);
                self.pointer_move(x, y);
                true
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                match state {
                    ElementState::Pressed => {
                        let [x, y] = self.input.mouse_pos;
                        self.pointer_down(x, y);
                    }
                    ElementState::Released => self.pointer_up(),
                }
                true
            }
            WindowEvent::KeyboardInput {
                event: key_event, ..
            } => {
                if key_event.state != ElementState::Pressed {
                    return false;
                }

                let PhysicalKey::Code(keycode) = key_event.physical_key else {
                    return false;
                };
                match keycode {
                    KeyCode::Delete | KeyCode::Backspace => self.delete_selected(),
                    KeyCode::Digit1 => {
                        self.set_active_tool(Tool::Select);
                        true
                    }
                    KeyCode::Digit2 => {
                        self.set_active_tool(Tool::Rectangle);
                        true
                    }
                    KeyCode::Digit3 => {
                        self.set_active_tool(Tool::Circle);
                        true
                    }
                    KeyCode::Digit4 => {
                        self.set_active_tool(Tool::Line);
                        true
                    }
                    _ => false,
                }
            }
            _ => false,
        }
    }

    pub fn user_state(&self) -> UserInputState {
        self.input.state()
    }

    /// Starts a gesture at a canvas-local position.
    ///
    /// Handles of the selected shape win over shapes, and shapes win over empty
    /// canvas. Shapes are picked topmost first.
    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.input.mouse_pos = [x, y];
        self.supersede_gesture();

        if let Some((id, hit)) = self.handle_at([x, y]) {
            match hit {
                HandleHit::Resize(handle) => self.begin_resize_box(id, handle, x, y),
                HandleHit::Endpoint(endpoint) => self.begin_resize_line(id, endpoint, x, y),
                HandleHit::Rotate => self.begin_rotate(id),
            }
            return;
        }

        if let Some(id) = self.shape_at([x, y]) {
            self.begin_move(id, x, y);
            return;
        }

        let shape = match self.current_tool {
            Tool::Select => {
                self.selected = None;
                return;
            }
            Tool::Rectangle => Shape::new_box(BoxKind::Rectangle, [x, y], &self.defaults),
            Tool::Circle => Shape::new_box(BoxKind::Circle, [x, y], &self.defaults),
            Tool::Line => Shape::new_line([x, y], &self.defaults),
        };
        let id = shape.id();
        log::debug!("drawing {:?} {id} from ({x}, {y})", self.current_tool);
        self.create(shape);
        self.selected = Some(id);
        self.input.gesture = Some(Gesture::Create { id, anchor: [x, y] });
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.input.mouse_pos = [x, y];
        let Some(gesture) = self.input.gesture.as_ref() else {
            return;
        };

        let updated = match gesture {
            Gesture::Create { id, anchor } => match self.find(*id) {
                Some(Shape::Box(b)) => {
                    let size = geometry::creation_size(*anchor, [x, y]);
                    Shape::Box(BoxShape {
                        x: size.x,
                        y: size.y,
                        width: size.width,
                        height: size.height,
                        ..b.clone()
                    })
                }
                Some(Shape::Line(l)) => Shape::Line(LineShape {
                    x2: x,
                    y2: y,
                    ..l.clone()
                }),
                None => return,
            },
            Gesture::Move { original, start } => geometry::move_by(original, x - start[0], y - start[1]),
            Gesture::ResizeBox {
                original,
                handle,
                start,
            } => Shape::Box(geometry::resize_box(original, *handle, x - start[0], y - start[1])),
            Gesture::ResizeLine {
                original,
                endpoint,
                start,
            } => Shape::Line(geometry::resize_line(original, *endpoint, x - start[0], y - start[1])),
            Gesture::Rotate { original, pivot } => geometry::rotate(original, *pivot, [x, y]),
        };
        self.update(updated);
    }

    pub fn pointer_up(&mut self) {
        self.end_gesture();
    }

    /// Deletes the selected shape. Returns whether anything was selected.
    pub fn delete_selected(&mut self) -> bool {
        match self.selected {
            Some(id) => {
                self.delete(id);
                true
            }
            None => false,
        }
    }

    pub fn begin_move(&mut self, id: ShapeId, x: f32, y: f32) {
        self.supersede_gesture();
        if let Some(original) = self.find(id).cloned() {
            self.start_gesture(Gesture::Move {
                original,
                start: [x, y],
            });
        }
    }

    pub fn begin_resize_box(&mut self, id: ShapeId, handle: BoxHandle, x: f32, y: f32) {
        self.supersede_gesture();
        if let Some(Shape::Box(original)) = self.find(id).cloned() {
            self.start_gesture(Gesture::ResizeBox {
                original,
                handle,
                start: [x, y],
            });
        }
    }

    pub fn begin_resize_line(&mut self, id: ShapeId, endpoint: LineEndpoint, x: f32, y: f32) {
        self.supersede_gesture();
        if let Some(Shape::Line(original)) = self.find(id).cloned() {
            self.start_gesture(Gesture::ResizeLine {
                original,
                endpoint,
                start: [x, y],
            });
        }
    }

    /// Rotation pivots around the shape's center as it is when the gesture starts.
    pub fn begin_rotate(&mut self, id: ShapeId) {
        self.supersede_gesture();
        if let Some(original) = self.find(id).cloned() {
            let pivot = geometry::pivot(&original);
            self.start_gesture(Gesture::Rotate { original, pivot });
        }
    }

    fn start_gesture(&mut self, gesture: Gesture) {
        log::debug!("{:?} on {}", gesture.user_state(), gesture.shape_id());
        self.selected = Some(gesture.shape_id());
        self.input.gesture = Some(gesture);
    }

    /// A pointer-down while a gesture is still open ends that gesture first.
    fn supersede_gesture(&mut self) {
        if self.input.gesture.is_some() {
            log::debug!("superseding unfinished {:?} gesture", self.user_state());
            self.end_gesture();
        }
    }

    fn end_gesture(&mut self) {
        let Some(gesture) = self.input.gesture.take() else {
            return;
        };

        if let Gesture::Create { id, .. } = gesture {
            // accidental clicks would otherwise leave invisible, unselectable boxes
            if let Some(Shape::Box(b)) = self.find(id) {
                if b.width < MIN_SHAPE_SIZE || b.height < MIN_SHAPE_SIZE {
                    let finalized = BoxShape {
                        width: b.width.max(MIN_SHAPE_SIZE),
                        height: b.height.max(MIN_SHAPE_SIZE),
                        ..b.clone()
                    };
                    self.update(Shape::Box(finalized));
                }
            }
            log::info!("created shape {id}");
        }
    }

    /// The handle of the selected shape under `pos`, if any.
    pub fn handle_at(&self, pos: [f32; 2]) -> Option<(ShapeId, HandleHit)> {
        let radius = self.config.handle_radius;
        match self.selected_shape()? {
            Shape::Box(b) => {
                if distance(pos, rotate_handle_position(b, self.config.rotate_handle_offset)) <= radius {
                    return Some((b.id, HandleHit::Rotate));
                }
                BoxHandle::ALL
                    .into_iter()
                    .find(|handle| distance(pos, box_handle_position(b, *handle)) <= radius)
                    .map(|handle| (b.id, HandleHit::Resize(handle)))
            }
            // End first, so a zero-length line grows from its end point
            Shape::Line(l) => [LineEndpoint::End, LineEndpoint::Start]
                .into_iter()
                .find(|endpoint| distance(pos, line_endpoint(l, *endpoint)) <= radius)
                .map(|endpoint| (l.id, HandleHit::Endpoint(endpoint))),
        }
    }

    /// The topmost shape under `pos`, if any.
    pub fn shape_at(&self, pos: [f32; 2]) -> Option<ShapeId> {
        self.shapes
            .iter()
            .rev()
            .find(|shape| self.is_shape_at_position(shape, pos))
            .map(Shape::id)
    }

    fn is_shape_at_position(&self, shape: &Shape, pos: [f32; 2]) -> bool {
        match shape {
            Shape::Box(b) => {
                let center = box_center(b);
                let local = rotate_point(pos, center, -b.rotation_degrees);
                match b.kind {
                    BoxKind::Rectangle => {
                        local[0] >= b.x
                            && local[0] <= b.x + b.width
                            && local[1] >= b.y
                            && local[1] <= b.y + b.height
                    }
                    BoxKind::Circle => {
                        let rx = b.width / 2.0;
                        let ry = b.height / 2.0;
                        if rx <= 0.0 || ry <= 0.0 {
                            return false;
                        }
                        ((local[0] - center[0]) / rx).powi(2) + ((local[1] - center[1]) / ry).powi(2) <= 1.0
                    }
                }
            }
            Shape::Line(l) => {
                let tolerance = self.config.line_hit_tolerance.max(l.border_width);
                point_to_line_distance(pos, [l.x, l.y], [l.x2, l.y2]) <= tolerance
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::derive_line_render;
    use winit::dpi::PhysicalPosition;
    use winit::event::DeviceId;

    fn draw(state: &mut State, tool: Tool, from: [f32; 2], to: [f32; 2]) -> ShapeId {
        state.set_active_tool(tool);
        state.pointer_down(from[0], from[1]);
        state.pointer_move(to[0], to[1]);
        state.pointer_up();
        state.selected.unwrap()
    }

    fn find_box(state: &State, id: ShapeId) -> BoxShape {
        match state.find(id) {
            Some(Shape::Box(b)) => b.clone(),
            other => panic!("expected a box, got {other:?}"),
        }
    }

    fn find_line(state: &State, id: ShapeId) -> LineShape {
        match state.find(id) {
            Some(Shape::Line(l)) => l.clone(),
            other => panic!("expected a line, got {other:?}"),
        }
    }

    #[test]
    fn test_create_rectangle_drag_up_left() {
        let mut state = State::default();
        let id = draw(&mut state, Tool::Rectangle, [50.0, 50.0], [30.0, 20.0]);
        let b = find_box(&state, id);
        assert_eq!((b.x, b.y, b.width, b.height), (30.0, 20.0, 20.0, 30.0));
        assert_eq!(b.kind, BoxKind::Rectangle);
        assert_eq!(state.selected, Some(id));
        assert_eq!(state.user_state(), UserInputState::Idle);
    }

    #[test]
    fn test_create_uses_default_style() {
        let mut state = State::default();
        state.set_default_border_width(4.0);
        let id = draw(&mut state, Tool::Circle, [0.0, 0.0], [30.0, 30.0]);
        let b = find_box(&state, id);
        assert_eq!(b.kind, BoxKind::Circle);
        assert_eq!(b.fill_color, state.defaults.fill);
        assert!((b.border_width - 4.0).abs() < 0.001);
    }

    #[test]
    fn test_live_update_while_drawing() {
        let mut state = State::default();
        state.set_active_tool(Tool::Rectangle);
        state.pointer_down(10.0, 10.0);
        assert_eq!(state.user_state(), UserInputState::Drawing);
        let id = state.selected.unwrap();
        assert_eq!(find_box(&state, id).width, 0.0);

        state.pointer_move(13.0, 12.0);
        let b = find_box(&state, id);
        assert_eq!((b.width, b.height), (3.0, 2.0));
    }

    #[test]
    fn test_click_without_drag_gets_minimum_size() {
        let mut state = State::default();
        state.set_active_tool(Tool::Rectangle);
        state.pointer_down(5.0, 5.0);
        state.pointer_up();
        let b = find_box(&state, state.selected.unwrap());
        assert_eq!((b.x, b.y, b.width, b.height), (5.0, 5.0, 10.0, 10.0));
    }

    #[test]
    fn test_finished_boxes_are_at_least_minimum_size() {
        for to in [[3.0, 100.0], [100.0, 2.0], [7.0, 7.0], [-4.0, -60.0]] {
            let mut state = State::default();
            let id = draw(&mut state, Tool::Circle, [0.0, 0.0], to);
            let b = find_box(&state, id);
            assert!(b.width >= MIN_SHAPE_SIZE && b.height >= MIN_SHAPE_SIZE, "{to:?}");
        }
    }

    #[test]
    fn test_create_line() {
        let mut state = State::default();
        let id = draw(&mut state, Tool::Line, [0.0, 0.0], [10.0, 0.0]);
        let render = derive_line_render(&find_line(&state, id));
        assert!((render.length - 10.0).abs() < 0.001);
        assert!(render.angle.abs() < 0.001);
    }

    #[test]
    fn test_short_line_is_not_clamped() {
        let mut state = State::default();
        let id = draw(&mut state, Tool::Line, [0.0, 0.0], [2.0, 1.0]);
        let l = find_line(&state, id);
        assert_eq!((l.x, l.y, l.x2, l.y2), (0.0, 0.0, 2.0, 1.0));
    }

    #[test]
    fn test_select_tool_on_empty_canvas_clears_selection() {
        let mut state = State::default();
        draw(&mut state, Tool::Rectangle, [0.0, 0.0], [40.0, 40.0]);
        state.set_active_tool(Tool::Select);
        state.pointer_down(300.0, 300.0);
        assert_eq!(state.selected, None);
        assert_eq!(state.user_state(), UserInputState::Idle);
        state.pointer_up();
        assert_eq!(state.shapes.len(), 1);
    }

    #[test]
    fn test_drag_existing_shape_moves_and_selects() {
        let mut state = State::default();
        let first = draw(&mut state, Tool::Rectangle, [0.0, 0.0], [40.0, 40.0]);
        let second = draw(&mut state, Tool::Rectangle, [100.0, 100.0], [140.0, 140.0]);
        assert_eq!(state.selected, Some(second));

        // any tool drags shapes
        state.pointer_down(20.0, 20.0);
        assert_eq!(state.selected, Some(first));
        assert_eq!(state.user_state(), UserInputState::Dragging);
        state.pointer_move(25.0, 30.0);
        state.pointer_move(30.0, 35.0);
        state.pointer_up();

        let b = find_box(&state, first);
        assert_eq!((b.x, b.y, b.width, b.height), (10.0, 15.0, 40.0, 40.0));
        assert_eq!(state.shapes.len(), 2);
    }

    #[test]
    fn test_drag_line_moves_both_endpoints() {
        let mut state = State::default();
        let id = draw(&mut state, Tool::Line, [0.0, 0.0], [100.0, 0.0]);
        state.selected = None;
        state.pointer_down(50.0, 1.0);
        state.pointer_move(60.0, 21.0);
        state.pointer_up();
        let l = find_line(&state, id);
        assert_eq!((l.x, l.y, l.x2, l.y2), (10.0, 20.0, 110.0, 20.0));
    }

    #[test]
    fn test_topmost_shape_is_picked() {
        let mut state = State::default();
        draw(&mut state, Tool::Rectangle, [0.0, 0.0], [50.0, 50.0]);
        let top = draw(&mut state, Tool::Rectangle, [60.0, 60.0], [20.0, 20.0]);
        assert_eq!(state.shape_at([30.0, 30.0]), Some(top));
    }

    #[test]
    fn test_resize_handle_drag_uses_total_delta() {
        let mut state = State::default();
        let id = draw(&mut state, Tool::Rectangle, [0.0, 0.0], [40.0, 40.0]);
        assert_eq!(state.handle_at([40.0, 40.0]), Some((id, HandleHit::Resize(BoxHandle::SE))));

        state.pointer_down(40.0, 40.0);
        assert_eq!(state.user_state(), UserInputState::Resizing);
        state.pointer_move(45.0, 50.0);
        let b = find_box(&state, id);
        assert_eq!((b.width, b.height), (45.0, 50.0));

        state.pointer_move(-10.0, -10.0);
        state.pointer_up();
        let b = find_box(&state, id);
        assert_eq!((b.x, b.y, b.width, b.height), (0.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn test_resize_nw_handle_moves_origin() {
        let mut state = State::default();
        let id = draw(&mut state, Tool::Rectangle, [10.0, 10.0], [50.0, 50.0]);
        state.pointer_down(10.0, 10.0);
        state.pointer_move(0.0, 5.0);
        state.pointer_up();
        let b = find_box(&state, id);
        assert_eq!((b.x, b.y, b.width, b.height), (0.0, 5.0, 50.0, 45.0));
    }

    #[test]
    fn test_line_endpoint_drag() {
        let mut state = State::default();
        let id = draw(&mut state, Tool::Line, [0.0, 0.0], [100.0, 0.0]);
        assert_eq!(state.handle_at([0.0, 0.0]), Some((id, HandleHit::Endpoint(LineEndpoint::Start))));

        state.pointer_down(100.0, 0.0);
        state.pointer_move(100.0, 50.0);
        state.pointer_up();
        let l = find_line(&state, id);
        assert_eq!((l.x, l.y, l.x2, l.y2), (0.0, 0.0, 100.0, 50.0));
    }

    #[test]
    fn test_rotate_handle_drag() {
        let mut state = State::default();
        let id = draw(&mut state, Tool::Rectangle, [0.0, 0.0], [40.0, 40.0]);
        let handle = [20.0, -state.config.rotate_handle_offset];
        assert_eq!(state.handle_at(handle), Some((id, HandleHit::Rotate)));

        state.pointer_down(handle[0], handle[1]);
        assert_eq!(state.user_state(), UserInputState::Rotating);
        state.pointer_move(80.0, 20.0);
        assert!((find_box(&state, id).rotation_degrees - 90.0).abs() < 0.001);
        state.pointer_move(80.0, 20.0);
        assert!((find_box(&state, id).rotation_degrees - 90.0).abs() < 0.001);
        state.pointer_up();

        let b = find_box(&state, id);
        assert_eq!((b.x, b.y, b.width, b.height), (0.0, 0.0, 40.0, 40.0));
    }

    #[test]
    fn test_hit_test_follows_rotation() {
        let mut state = State::default();
        let id = draw(&mut state, Tool::Rectangle, [0.0, 0.0], [100.0, 20.0]);
        let mut b = find_box(&state, id);
        b.rotation_degrees = 90.0;
        state.update(Shape::Box(b));
        assert_eq!(state.shape_at([50.0, -30.0]), Some(id));
        assert_eq!(state.shape_at([90.0, 10.0]), None);
    }

    #[test]
    fn test_circle_hit_test_excludes_corners() {
        let mut state = State::default();
        let id = draw(&mut state, Tool::Circle, [0.0, 0.0], [100.0, 100.0]);
        assert_eq!(state.shape_at([50.0, 50.0]), Some(id));
        assert_eq!(state.shape_at([12.0, 12.0]), None);
    }

    #[test]
    fn test_new_pointer_down_supersedes_open_gesture() {
        let mut state = State::default();
        state.set_active_tool(Tool::Rectangle);
        state.pointer_down(0.0, 0.0);
        state.pointer_move(3.0, 3.0);
        let first = state.selected.unwrap();

        // pointer-up was lost; the next press finishes the open creation
        state.pointer_down(200.0, 200.0);
        let b = find_box(&state, first);
        assert_eq!((b.width, b.height), (10.0, 10.0));
        let second = state.selected.unwrap();
        assert_ne!(first, second);

        state.pointer_move(240.0, 240.0);
        state.pointer_up();
        assert_eq!(find_box(&state, first).width, 10.0);
        assert_eq!(find_box(&state, second).width, 40.0);
        assert_eq!(state.user_state(), UserInputState::Idle);
    }

    #[test]
    fn test_pointer_move_without_gesture_changes_nothing() {
        let mut state = State::default();
        let id = draw(&mut state, Tool::Rectangle, [0.0, 0.0], [40.0, 40.0]);
        let before = state.shapes.clone();
        state.pointer_move(400.0, 400.0);
        state.pointer_up();
        assert_eq!(state.shapes, before);
        assert_eq!(state.selected, Some(id));
    }

    #[test]
    fn test_delete_selected() {
        let mut state = State::default();
        let id = draw(&mut state, Tool::Rectangle, [0.0, 0.0], [40.0, 40.0]);
        assert!(state.delete_selected());
        assert_eq!(state.find(id), None);
        assert_eq!(state.selected, None);
        assert!(!state.delete_selected());
    }

    #[test]
    fn test_begin_with_unknown_id_is_ignored() {
        let mut state = State::default();
        state.begin_move(ShapeId::new(), 0.0, 0.0);
        state.begin_rotate(ShapeId::new());
        assert_eq!(state.user_state(), UserInputState::Idle);
        assert_eq!(state.selected, None);
    }

    #[test]
    fn test_resize_box_handle_on_line_is_ignored() {
        let mut state = State::default();
        let id = draw(&mut state, Tool::Line, [0.0, 0.0], [10.0, 10.0]);
        state.begin_resize_box(id, BoxHandle::SE, 10.0, 10.0);
        assert_eq!(state.user_state(), UserInputState::Idle);
    }

    #[test]
    fn test_window_events_drive_gestures() {
        let device_id = unsafe { DeviceId::dummy() };
        let cursor = |x: f64, y: f64| WindowEvent::CursorMoved {
            device_id,
            position: PhysicalPosition::new(x, y),
        };
        let left = |state: ElementState| WindowEvent::MouseInput {
            device_id,
            state,
            button: MouseButton::Left,
        };

        let mut state = State::default();
        state.canvas.offset = [10.0, 10.0];
        state.set_active_tool(Tool::Rectangle);

        assert!(state.input(&cursor(60.0, 60.0)));
        assert!(state.input(&left(ElementState::Pressed)));
        assert!(state.input(&cursor(40.0, 30.0)));
        assert!(state.input(&left(ElementState::Released)));

        let b = find_box(&state, state.selected.unwrap());
        assert_eq!((b.x, b.y, b.width, b.height), (30.0, 20.0, 20.0, 30.0));

        let right_click = WindowEvent::MouseInput {
            device_id,
            state: ElementState::Pressed,
            button: MouseButton::Right,
        };
        assert!(!state.input(&right_click));
        assert_eq!(state.user_state(), UserInputState::Idle);
    }
}
