use crate::common::DEFAULT_FONT_FAMILY;

/// Fill or stroke color encoded as `#RRGGBB`.
pub type Color = String;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

impl Anchor {
    pub fn as_svg(&self) -> &'static str {
        match self {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Filled box whose top-left corner is the mark position
    Rect {
        width: f64,
        height: f64,
        opacity: f64,
    },
    /// Segment from the mark position to `(x + dx, y + dy)`
    Line { dx: f64, dy: f64, stroke: f64 },
    /// Text whose baseline starts (or is centered, or ends) at the mark position
    Text {
        content: String,
        size: f64,
        anchor: Anchor,
        bold: bool,
        opacity: f64,
    },
    /// Single character stretched to fill a box whose top-left corner is the mark position
    Glyph {
        symbol: char,
        width: f64,
        height: f64,
        opacity: f64,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Mark {
    pub x: f64, // Relative to the panel's origin
    pub y: f64,
    pub color: Color,
    pub shape: Shape,
}

impl Mark {
    pub fn rect(x: f64, y: f64, width: f64, height: f64, color: Color) -> Self {
        Self {
            x,
            y,
            color,
            shape: Shape::Rect {
                width,
                height,
                opacity: 1.0,
            },
        }
    }

    pub fn line(x: f64, y: f64, dx: f64, dy: f64, color: Color) -> Self {
        Self {
            x,
            y,
            color,
            shape: Shape::Line {
                dx,
                dy,
                stroke: 1.0,
            },
        }
    }

    pub fn text(x: f64, y: f64, content: impl Into<String>, size: f64, anchor: Anchor) -> Self {
        Self {
            x,
            y,
            color: "#000000".to_string(),
            shape: Shape::Text {
                content: content.into(),
                size,
                anchor,
                bold: false,
                opacity: 1.0,
            },
        }
    }

    pub fn glyph(x: f64, y: f64, symbol: char, width: f64, height: f64, color: Color) -> Self {
        Self {
            x,
            y,
            color,
            shape: Shape::Glyph {
                symbol,
                width,
                height,
                opacity: 1.0,
            },
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Fill opacity of a rect, text or glyph; lines are always opaque
    pub fn with_opacity(mut self, value: f64) -> Self {
        match &mut self.shape {
            Shape::Rect { opacity, .. }
            | Shape::Text { opacity, .. }
            | Shape::Glyph { opacity, .. } => *opacity = value,
            Shape::Line { .. } => {}
        }
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub label: String,
    pub xpos: f64,
    pub ypos: f64,
    pub width: f64,
    pub height: f64,
    pub marks: Vec<Mark>,
    pub outline: bool,
}

impl Panel {
    pub fn new(label: impl Into<String>, xpos: f64, ypos: f64, width: f64, height: f64) -> Self {
        Self {
            label: label.into(),
            xpos,
            ypos,
            width,
            height,
            marks: Vec::new(),
            outline: false,
        }
    }

    pub fn push(&mut self, mark: Mark) {
        self.marks.push(mark);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub width: f64,
    pub height: f64,
    pub panels: Vec<Panel>,
    pub font_family: String,
}

impl Figure {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            panels: Vec::new(),
            font_family: DEFAULT_FONT_FAMILY.to_string(),
        }
    }

    pub fn set_font_family(&mut self, font_family: &str) {
        self.font_family = font_family.to_string();
    }

    pub fn panels_labeled<'a>(&'a self, label: &'a str) -> impl Iterator<Item = &'a Panel> + 'a {
        self.panels.iter().filter(move |panel| panel.label == label)
    }
}
