use crate::drawing::{BoxShape, LineShape, Shape, ShapeId};
use crate::geometry::{BoxHandle, LineEndpoint};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserInputState {
    Idle,
    Drawing,
    Dragging,
    Resizing,
    Rotating,
}

/// The one pointer gesture in progress.
///
/// A gesture lives from pointer-down to pointer-up and owns everything it needs
/// to track the pointer until then. Dropping it is the whole teardown.
#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    /// Drawing a new shape out from `anchor`.
    Create { id: ShapeId, anchor: [f32; 2] },
    Move { original: Shape, start: [f32; 2] },
    ResizeBox { original: BoxShape, handle: BoxHandle, start: [f32; 2] },
    ResizeLine { original: LineShape, endpoint: LineEndpoint, start: [f32; 2] },
    /// `pivot` is fixed when the gesture starts.
    Rotate { original: Shape, pivot: [f32; 2] },
}

impl Gesture {
    pub fn shape_id(&self) -> ShapeId {
        match self {
            Gesture::Create { id, .. } => *id,
            Gesture::Move { original, .. } | Gesture::Rotate { original, .. } => original.id(),
            Gesture::ResizeBox { original, .. } => original.id,
            Gesture::ResizeLine { original, .. } => original.id,
        }
    }

    pub fn user_state(&self) -> UserInputState {
        match self {
            Gesture::Create { .. } => UserInputState::Drawing,
            Gesture::Move { .. } => UserInputState::Dragging,
            Gesture::ResizeBox { .. } | Gesture::ResizeLine { .. } => UserInputState::Resizing,
            Gesture::Rotate { .. } => UserInputState::Rotating,
        }
    }
}

#[derive(Debug, Default)]
pub struct InputState {
    pub mouse_pos: [f32; 2],
    pub gesture: Option<Gesture>,
}

impl InputState {
    pub fn state(&self) -> UserInputState {
        self.gesture
            .as_ref()
            .map_or(UserInputState::Idle, Gesture::user_state)
    }
}
