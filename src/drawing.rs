use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    #[default]
    Select,
    Rectangle,
    Circle,
    Line,
}

/// Identity of a shape for the lifetime of a drawing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapeId(pub Uuid);

impl ShapeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ShapeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoxKind {
    Rectangle,
    Circle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("color must start with '#': {0:?}")]
    MissingHash(String),
    #[error("color must have 3 or 6 hex digits: {0:?}")]
    BadLength(String),
    #[error("invalid hex digit in color: {0:?}")]
    BadDigit(String),
}

/// An opaque RGB color, written as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::MissingHash(s.to_string()))?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::BadDigit(s.to_string()));
        }

        let channel = |hex: &str| u8::from_str_radix(hex, 16).map_err(|_| ColorParseError::BadDigit(s.to_string()));
        match digits.len() {
            6 => Ok(Color::rgb(channel(&digits[0..2])?, channel(&digits[2..4])?, channel(&digits[4..6])?)),
            // #abc is shorthand for #aabbcc
            3 => {
                let r = channel(&digits[0..1])?;
                let g = channel(&digits[1..2])?;
                let b = channel(&digits[2..3])?;
                Ok(Color::rgb(r * 17, g * 17, b * 17))
            }
            _ => Err(ColorParseError::BadLength(s.to_string())),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A rectangle or circle, stored by its unrotated bounding box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxShape {
    pub id: ShapeId,
    pub kind: BoxKind,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub fill_color: Color,
    pub stroke_color: Color,
    pub border_width: f32,
    pub border_style: BorderStyle,
    pub rotation_degrees: f32,
}

/// A segment from `(x, y)` to `(x2, y2)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineShape {
    pub id: ShapeId,
    pub x: f32,
    pub y: f32,
    pub x2: f32,
    pub y2: f32,
    pub stroke_color: Color,
    pub border_width: f32,
    pub border_style: BorderStyle,
    pub rotation_degrees: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
    Box(BoxShape),
    Line(LineShape),
}

impl Shape {
    /// Zero-size box anchored at `at`, styled from `style`.
    pub fn new_box(kind: BoxKind, at: [f32; 2], style: &Style) -> Self {
        Shape::Box(BoxShape {
            id: ShapeId::new(),
            kind,
            x: at[0],
            y: at[1],
            width: 0.0,
            height: 0.0,
            fill_color: style.fill,
            stroke_color: style.stroke,
            border_width: style.border_width,
            border_style: style.border_style,
            rotation_degrees: 0.0,
        })
    }

    /// Zero-length line with both endpoints at `at`.
    pub fn new_line(at: [f32; 2], style: &Style) -> Self {
        Shape::Line(LineShape {
            id: ShapeId::new(),
            x: at[0],
            y: at[1],
            x2: at[0],
            y2: at[1],
            stroke_color: style.stroke,
            border_width: style.border_width,
            border_style: style.border_style,
            rotation_degrees: 0.0,
        })
    }

    pub fn id(&self) -> ShapeId {
        match self {
            Shape::Box(b) => b.id,
            Shape::Line(l) => l.id,
        }
    }

    pub fn rotation_degrees(&self) -> f32 {
        match self {
            Shape::Box(b) => b.rotation_degrees,
            Shape::Line(l) => l.rotation_degrees,
        }
    }

    /// Applies every field set in `update`. Lines have no fill and ignore it.
    pub fn apply_style(&mut self, update: &StyleUpdate) {
        match self {
            Shape::Box(b) => {
                if let Some(fill) = update.fill {
                    b.fill_color = fill;
                }
                if let Some(stroke) = update.stroke {
                    b.stroke_color = stroke;
                }
                if let Some(width) = update.border_width {
                    b.border_width = width;
                }
                if let Some(style) = update.border_style {
                    b.border_style = style;
                }
            }
            Shape::Line(l) => {
                if let Some(stroke) = update.stroke {
                    l.stroke_color = stroke;
                }
                if let Some(width) = update.border_width {
                    l.border_width = width;
                }
                if let Some(style) = update.border_style {
                    l.border_style = style;
                }
            }
        }
    }
}

/// The style given to newly created shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Style {
    pub fill: Color,
    pub stroke: Color,
    pub border_width: f32,
    pub border_style: BorderStyle,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill: Color::rgb(0x3b, 0x82, 0xf6),
            stroke: Color::BLACK,
            border_width: 1.0,
            border_style: BorderStyle::Solid,
        }
    }
}

/// A partial style change; `None` fields are left alone.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StyleUpdate {
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub border_width: Option<f32>,
    pub border_style: Option<BorderStyle>,
}
