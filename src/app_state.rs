use crate::canvas::CanvasTransform;
use crate::config::EditorConfig;
use crate::drawing::{BorderStyle, Color, Shape, ShapeId, Style, StyleUpdate, Tool};
use crate::state::InputState;

/// The single drawing session: every shape, the selection, and the active tool and styles.
///
/// `shapes` is in creation order, which is also paint order.
pub struct State {
    pub config: EditorConfig,
    pub canvas: CanvasTransform,
    pub input: InputState,

    pub shapes: Vec<Shape>,
    pub selected: Option<ShapeId>,
    pub current_tool: Tool,
    pub defaults: Style,
}

impl Default for State {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl State {
    pub fn new(config: EditorConfig) -> Self {
        let defaults = config.default_style.clone();
        Self {
            config,
            canvas: CanvasTransform::new(),
            input: InputState::default(),
            shapes: Vec::new(),
            selected: None,
            current_tool: Tool::Select,
            defaults,
        }
    }

    /// Appends a shape. A shape whose id is already present replaces that record in place.
    pub fn create(&mut self, shape: Shape) {
        let id = shape.id();
        if let Some(existing) = self.shapes.iter_mut().find(|s| s.id() == id) {
            log::warn!("create: shape {id} already exists, replacing it");
            *existing = shape;
        } else {
            log::debug!("create: shape {id}");
            self.shapes.push(shape);
        }
    }

    /// Replaces the shape with the same id. Unknown ids are ignored.
    pub fn update(&mut self, shape: Shape) {
        let id = shape.id();
        if let Some(existing) = self.shapes.iter_mut().find(|s| s.id() == id) {
            *existing = shape;
        }
    }

    pub fn delete(&mut self, id: ShapeId) {
        let before = self.shapes.len();
        self.shapes.retain(|s| s.id() != id);
        if self.shapes.len() != before {
            log::debug!("delete: shape {id}");
        }
        if self.selected == Some(id) {
            self.selected = None;
        }
    }

    pub fn find(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id() == id)
    }

    pub fn selected_shape(&self) -> Option<&Shape> {
        self.selected.and_then(|id| self.find(id))
    }

    /// Selects `id`, or clears the selection. Ids not on the canvas are ignored.
    pub fn select(&mut self, id: Option<ShapeId>) {
        match id {
            Some(id) if self.find(id).is_none() => {}
            _ => self.selected = id,
        }
    }

    /// Applies a partial style change to the selected shape, if any.
    pub fn apply_to_selected(&mut self, update: StyleUpdate) {
        if let Some(mut shape) = self.selected_shape().cloned() {
            shape.apply_style(&update);
            self.update(shape);
        }
    }

    pub fn set_active_tool(&mut self, tool: Tool) {
        self.current_tool = tool;
    }

    pub fn set_default_fill(&mut self, color: Color) {
        self.defaults.fill = color;
        self.apply_to_selected(StyleUpdate {
            fill: Some(color),
            ..Default::default()
        });
    }

    pub fn set_default_stroke(&mut self, color: Color) {
        self.defaults.stroke = color;
        self.apply_to_selected(StyleUpdate {
            stroke: Some(color),
            ..Default::default()
        });
    }

    /// Negative widths are floored at zero.
    pub fn set_default_border_width(&mut self, width: f32) {
        let width = width.max(0.0);
        self.defaults.border_width = width;
        self.apply_to_selected(StyleUpdate {
            border_width: Some(width),
            ..Default::default()
        });
    }

    pub fn set_default_border_style(&mut self, style: BorderStyle) {
        self.defaults.border_style = style;
        self.apply_to_selected(StyleUpdate {
            border_style: Some(style),
            ..Default::default()
        });
    }
}
