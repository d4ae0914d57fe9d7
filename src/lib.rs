mod app_state;
mod canvas;
mod config;
mod drawing;
mod event_handler;
mod geometry;
mod math;
mod notification;
mod persistence;
mod renderer;
mod state;

// Re-export the main public interface
pub use app_state::State;
pub use canvas::CanvasTransform;
pub use config::EditorConfig;
pub use drawing::{
    BorderStyle, BoxKind, BoxShape, Color, ColorParseError, LineShape, Shape, ShapeId, Style, StyleUpdate, Tool,
};
pub use event_handler::HandleHit;
pub use geometry::{
    BoxGeometry, BoxHandle, LineEndpoint, LineRender, MIN_SHAPE_SIZE, creation_size, derive_line_render, move_by,
    resize_box, resize_line, rotate,
};
pub use notification::{Notification, Severity};
#[cfg(target_arch = "wasm32")]
pub use persistence::LocalStorage;
pub use persistence::{KeyValueStore, MemoryStore, PersistError, load_shapes, save_shapes};
pub use renderer::{Border, Primitive, RenderHandle, RenderItem, normalize_rotation};
pub use state::{Gesture, InputState, UserInputState};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Installs the platform logger. Safe to call more than once.
pub fn init_logging() {
    cfg_if::cfg_if! {
        if #[cfg(target_arch = "wasm32")] {
            std::panic::set_hook(Box::new(console_error_panic_hook::hook));
            let _ = console_log::init_with_level(log::Level::Info);
        } else {
            let _ = env_logger::try_init();
        }
    }
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen(start))]
pub fn start() {
    init_logging();
    log::info!("shapecanvas ready");
}
