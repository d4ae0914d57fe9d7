/// Where the canvas sits inside the window.
///
/// Pointer positions arrive in window coordinates; the editor works in
/// canvas-local coordinates with the origin at the canvas's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CanvasTransform {
    pub offset: [f32; 2],
}

impl CanvasTransform {
    pub fn new() -> Self {
        Self { offset: [0.0, 0.0] }
    }

    pub fn screen_to_canvas(&self, screen_pos: [f32; 2]) -> [f32; 2] {
        [screen_pos[0] - self.offset[0], screen_pos[1] - self.offset[1]]
    }

    pub fn canvas_to_screen(&self, canvas_pos: [f32; 2]) -> [f32; 2] {
        [canvas_pos[0] + self.offset[0], canvas_pos[1] + self.offset[1]]
    }
}
