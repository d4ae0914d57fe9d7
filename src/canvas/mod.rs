mod canvas_transform;

pub use canvas_transform::CanvasTransform;
